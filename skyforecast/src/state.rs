//! Application state - single source of truth
//!
//! Components receive borrowed views of this as props; only the reducer
//! mutates it.

use crate::geolocate::GeoPlace;
use crate::search::{LocationCatalog, SearchState};
use crate::weather::{mock_current, mock_forecast, CurrentWeather, ForecastDay, TempUnit};

/// Spinner period.
pub const LOADING_ANIM_TICK_MS: u64 = 120;

#[derive(Clone, Debug, PartialEq)]
pub struct AppState {
    pub search: SearchState,
    /// Recent searches and popular cities offered by the search box
    pub catalog: LocationCatalog,
    /// Whether key presses go to the search input
    pub search_focused: bool,

    pub weather: CurrentWeather,
    pub forecast: Vec<ForecastDay>,
    pub weather_loading: bool,
    pub unit: TempUnit,

    /// Reverse-geolocated place, once resolved
    pub place: Option<GeoPlace>,
    pub geolocating: bool,
    /// Status line message (geolocation failures)
    pub status: Option<String>,

    pub tick_count: u32,
}

impl AppState {
    pub fn new(catalog: LocationCatalog, unit: TempUnit) -> Self {
        Self {
            search: SearchState::new(),
            catalog,
            search_focused: false,
            weather: mock_current(),
            forecast: mock_forecast(),
            weather_loading: false,
            unit,
            place: None,
            geolocating: false,
            status: None,
            tick_count: 0,
        }
    }

    pub fn is_busy(&self) -> bool {
        self.weather_loading || self.search.is_loading || self.geolocating
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(LocationCatalog::default(), TempUnit::default())
    }
}
