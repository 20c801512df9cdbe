//! SkyForecast terminal UI
//!
//! A weather landing page with a location search box. Typing filters recent
//! searches and popular cities (or the Open-Meteo geocoder) on an async pass;
//! confirming a location reloads the mock weather card for it.
//!
//! Built on [`skyforecast_core`]: components map events into [`Action`]s, the
//! [`reducer`](reducer::reducer) updates [`AppState`] and declares
//! [`Effect`]s, and the [`EffectHandler`] runs them as keyed tasks.

pub mod action;
pub mod components;
pub mod config;
pub mod effect;
pub mod geolocate;
pub mod logging;
pub mod page;
pub mod reducer;
pub mod search;
pub mod state;
pub mod weather;

pub use action::Action;
pub use effect::{Effect, EffectHandler};
pub use page::Page;
pub use state::AppState;
