//! Actions
//!
//! Naming: the prefix names the area (`Search*`, `Weather*`, `Geolocate*`,
//! `Ui*`); `Did` marks the result of an async task.

use skyforecast_core::{Action as ActionTrait, ActionSummary};

use crate::geolocate::GeoPlace;
use crate::search::{LocationSuggestion, RequestToken};
use crate::weather::CurrentWeather;

#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    // ===== Search =====
    /// Input gained focus (key or click inside)
    SearchFocus,
    /// Esc or a click outside the search box
    SearchBlur,
    SearchQueryChange(String),
    /// Enter with nothing highlighted
    SearchSubmit,
    /// Pick the n-th visible dropdown entry
    SearchPick(usize),
    SearchHighlightNext,
    SearchHighlightPrev,
    SearchDidLoad {
        token: RequestToken,
        suggestions: Vec<LocationSuggestion>,
    },
    SearchDidError {
        token: RequestToken,
        message: String,
    },

    // ===== Page =====
    /// A location was confirmed in the search box
    LocationSelect(String),
    WeatherDidLoad(CurrentWeather),
    GeolocateDidLoad(GeoPlace),
    GeolocateDidError(String),

    // ===== UI =====
    UiToggleUnits,
    UiDismissNotice,

    /// Spinner frame
    Tick,
    Quit,
}

impl ActionTrait for Action {
    fn name(&self) -> &'static str {
        match self {
            Action::SearchFocus => "SearchFocus",
            Action::SearchBlur => "SearchBlur",
            Action::SearchQueryChange(_) => "SearchQueryChange",
            Action::SearchSubmit => "SearchSubmit",
            Action::SearchPick(_) => "SearchPick",
            Action::SearchHighlightNext => "SearchHighlightNext",
            Action::SearchHighlightPrev => "SearchHighlightPrev",
            Action::SearchDidLoad { .. } => "SearchDidLoad",
            Action::SearchDidError { .. } => "SearchDidError",
            Action::LocationSelect(_) => "LocationSelect",
            Action::WeatherDidLoad(_) => "WeatherDidLoad",
            Action::GeolocateDidLoad(_) => "GeolocateDidLoad",
            Action::GeolocateDidError(_) => "GeolocateDidError",
            Action::UiToggleUnits => "UiToggleUnits",
            Action::UiDismissNotice => "UiDismissNotice",
            Action::Tick => "Tick",
            Action::Quit => "Quit",
        }
    }
}

impl ActionSummary for Action {
    fn summary(&self) -> String {
        match self {
            Action::SearchDidLoad { token, suggestions } => format!(
                "SearchDidLoad {{ token: {}, count: {} }}",
                token.value(),
                suggestions.len()
            ),
            Action::WeatherDidLoad(weather) => format!(
                "WeatherDidLoad {{ location: {:?}, temp: {}°F }}",
                weather.location, weather.temperature
            ),
            Action::SearchDidError { message, .. } | Action::GeolocateDidError(message) => {
                let msg = if message.chars().count() > 40 {
                    format!("{}...", message.chars().take(37).collect::<String>())
                } else {
                    message.clone()
                };
                format!("{}({:?})", self.name(), msg)
            }
            _ => format!("{:?}", self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_is_compact() {
        let action = Action::SearchDidLoad {
            token: RequestToken::default(),
            suggestions: vec![LocationSuggestion::new("4", "Tokyo", "Tokyo", "Japan")],
        };
        assert_eq!(action.summary(), "SearchDidLoad { token: 0, count: 1 }");

        let long = Action::GeolocateDidError("x".repeat(100));
        assert_eq!(
            long.summary(),
            format!("GeolocateDidError(\"{}...\")", "x".repeat(37))
        );
        // Short messages are kept whole
        let short = Action::GeolocateDidError("timed out".into());
        assert_eq!(short.summary(), "GeolocateDidError(\"timed out\")");

        assert_eq!(Action::Tick.summary(), "Tick");
        assert_eq!(Action::SearchPick(2).name(), "SearchPick");
    }
}
