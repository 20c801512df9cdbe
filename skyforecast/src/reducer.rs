//! Reducer - (state, action) -> (changed, effects)
//!
//! All state mutation happens here. Async work is only declared, as
//! [`Effect`]s, and performed by the effect handler.

use skyforecast_core::DispatchResult;

use crate::action::Action;
use crate::effect::Effect;
use crate::search::FilterRequest;
use crate::state::AppState;

pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Search =====
        Action::SearchFocus => {
            let was_focused = std::mem::replace(&mut state.search_focused, true);
            let opened = state.search.focus();
            if was_focused && !opened {
                DispatchResult::unchanged()
            } else {
                DispatchResult::changed()
            }
        }

        Action::SearchBlur => {
            let was_focused = std::mem::replace(&mut state.search_focused, false);
            let closed = state.search.blur_outside();
            if was_focused || closed {
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::SearchQueryChange(text) => {
            state.search_focused = true;
            match state.search.query_change(text) {
                Some(FilterRequest::Start { token, query }) => {
                    DispatchResult::changed_with(Effect::FilterCandidates { token, query })
                }
                Some(FilterRequest::Cancel) => DispatchResult::changed_with(Effect::CancelFilter),
                None => DispatchResult::changed(),
            }
        }

        Action::SearchSubmit => match state.search.submit() {
            Some(label) => {
                state.search_focused = false;
                DispatchResult::changed_with(Effect::NotifyLocationSelect(label))
            }
            None => DispatchResult::unchanged(),
        },

        Action::SearchPick(index) => match state.search.pick_visible(index, &state.catalog) {
            Some(label) => {
                state.search_focused = false;
                DispatchResult::changed_with(Effect::NotifyLocationSelect(label))
            }
            None => DispatchResult::unchanged(),
        },

        Action::SearchHighlightNext => {
            DispatchResult::from_changed(state.search.move_highlight(1, &state.catalog))
        }

        Action::SearchHighlightPrev => {
            DispatchResult::from_changed(state.search.move_highlight(-1, &state.catalog))
        }

        Action::SearchDidLoad { token, suggestions } => {
            DispatchResult::from_changed(state.search.filter_done(token, suggestions))
        }

        Action::SearchDidError { token, message } => {
            DispatchResult::from_changed(state.search.filter_failed(token, &message))
        }

        // ===== Page =====
        Action::LocationSelect(location) => {
            state.weather_loading = true;
            DispatchResult::changed_with(Effect::LoadWeather { location })
        }

        Action::WeatherDidLoad(weather) => {
            state.weather = weather;
            state.weather_loading = false;
            DispatchResult::changed()
        }

        Action::GeolocateDidLoad(place) => {
            state.place = Some(place);
            state.geolocating = false;
            DispatchResult::changed()
        }

        Action::GeolocateDidError(message) => {
            state.geolocating = false;
            state.status = Some(format!("Location unavailable: {message}"));
            DispatchResult::changed()
        }

        // ===== UI =====
        Action::UiToggleUnits => {
            state.unit = state.unit.toggle();
            DispatchResult::changed()
        }

        Action::UiDismissNotice => DispatchResult::from_changed(state.status.take().is_some()),

        Action::Tick => {
            state.tick_count = state.tick_count.wrapping_add(1);
            // Only the spinner moves
            DispatchResult::from_changed(state.is_busy())
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// Effects to run once at startup.
pub fn startup_effects(coordinates: Option<(f64, f64)>, state: &mut AppState) -> Vec<Effect> {
    match coordinates {
        Some((lat, lon)) => {
            state.geolocating = true;
            vec![Effect::ReverseGeocode { lat, lon }]
        }
        None => Vec::new(),
    }
}
