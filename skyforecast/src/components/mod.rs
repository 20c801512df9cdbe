//! UI components
//!
//! Each component renders from borrowed props and maps events into
//! [`Action`](crate::action::Action)s. Only the search box takes input; the
//! rest are render-only.

pub mod footer;
pub mod forecast_strip;
pub mod header;
pub mod hero;
pub mod search_bar;
pub mod search_input;
pub mod suggestion_list;
pub mod weather_card;

pub use skyforecast_core::Component;

pub use footer::{Footer, FooterProps};
pub use forecast_strip::{ForecastStrip, ForecastStripProps};
pub use header::{Header, HeaderProps};
pub use hero::{Hero, HeroLayout};
pub use search_bar::{SearchBar, SearchBarProps};
pub use search_input::{SearchInput, SearchInputProps};
pub use suggestion_list::{dropdown_lines, SuggestionList, SuggestionListProps};
pub use weather_card::{WeatherCard, WeatherCardProps};

/// Spinner frames, advanced by the tick subscription.
pub const SPINNERS: [&str; 4] = ["◐", "◓", "◑", "◒"];

pub fn spinner_frame(tick_count: u32) -> &'static str {
    SPINNERS[tick_count as usize % SPINNERS.len()]
}
