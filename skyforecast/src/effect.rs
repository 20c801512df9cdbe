//! Effects declared by the reducer and the handler that performs them

use std::sync::Arc;

use skyforecast_core::{EffectContext, TaskKey};

use crate::action::Action;
use crate::geolocate::NominatimClient;
use crate::search::{CandidateSource, RequestToken};
use crate::weather::MockWeatherProvider;

pub const SEARCH_TASK: &str = "city_search";
pub const WEATHER_TASK: &str = "weather";
pub const GEOLOCATE_TASK: &str = "geolocate";

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    /// Fetch candidates for `query`; the answer carries `token`
    FilterCandidates { token: RequestToken, query: String },
    /// Abort the candidate fetch in flight
    CancelFilter,
    /// Hand a confirmed location to the page
    NotifyLocationSelect(String),
    LoadWeather { location: String },
    ReverseGeocode { lat: f64, lon: f64 },
}

/// Turns effects into keyed tasks.
///
/// Each kind of work has its own task key, so a newer request aborts the
/// older one of the same kind.
#[derive(Clone)]
pub struct EffectHandler {
    source: Arc<dyn CandidateSource>,
    weather: MockWeatherProvider,
    geolocator: Option<NominatimClient>,
}

impl EffectHandler {
    pub fn new(source: Arc<dyn CandidateSource>, weather: MockWeatherProvider) -> Self {
        Self {
            source,
            weather,
            geolocator: None,
        }
    }

    pub fn with_geolocator(mut self, geolocator: NominatimClient) -> Self {
        self.geolocator = Some(geolocator);
        self
    }

    pub fn handle(&self, effect: Effect, ctx: &mut EffectContext<Action>) {
        match effect {
            Effect::FilterCandidates { token, query } => {
                let source = Arc::clone(&self.source);
                ctx.tasks().spawn(SEARCH_TASK, async move {
                    match source.fetch_candidates(&query).await {
                        Ok(suggestions) => Action::SearchDidLoad { token, suggestions },
                        Err(e) => {
                            tracing::warn!(
                                source = source.name(),
                                query = %query,
                                error = %e,
                                "Candidate fetch failed"
                            );
                            Action::SearchDidError {
                                token,
                                message: e.to_string(),
                            }
                        }
                    }
                });
            }
            Effect::CancelFilter => {
                ctx.tasks().cancel(&TaskKey::new(SEARCH_TASK));
            }
            Effect::NotifyLocationSelect(label) => {
                tracing::info!(location = %label, "Location selected");
                ctx.emit(Action::LocationSelect(label));
            }
            Effect::LoadWeather { location } => {
                let weather = self.weather.clone();
                ctx.tasks().spawn(WEATHER_TASK, async move {
                    Action::WeatherDidLoad(weather.load(&location).await)
                });
            }
            Effect::ReverseGeocode { lat, lon } => {
                let Some(geolocator) = self.geolocator.clone() else {
                    tracing::debug!("No geolocator configured, skipping reverse lookup");
                    return;
                };
                ctx.tasks().spawn(GEOLOCATE_TASK, async move {
                    match geolocator.reverse(lat, lon).await {
                        Ok(place) => Action::GeolocateDidLoad(place),
                        Err(e) => {
                            tracing::warn!(lat, lon, error = %e, "Reverse geolocation failed");
                            Action::GeolocateDidError(e.to_string())
                        }
                    }
                });
            }
        }
    }
}
