//! Dispatch runtime for the SkyForecast terminal UI
//!
//! The application follows a Redux/Elm-style loop:
//!
//! 1. Terminal events are mapped by components into actions
//! 2. Actions are dispatched to an [`EffectStore`]
//! 3. The reducer mutates state and declares effects
//! 4. Effects become keyed async tasks via [`TaskManager`]
//! 5. Task results come back as actions; changed state re-renders
//!
//! # Core Concepts
//!
//! - **Action**: an intent or an async result (`Did*` naming)
//! - **EffectStore**: state container driven by an effect-emitting reducer
//! - **Component**: renders from props and maps events into actions
//! - **TaskManager**: keyed tasks where a newer spawn aborts the older one
//! - **HitRegions**: screen areas registered by visible components for mouse hit-testing
//!
//! # Example
//!
//! ```ignore
//! use skyforecast_core::{DispatchResult, EffectStore};
//!
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::SearchQueryChange(text) => {
//!             state.query = text.clone();
//!             DispatchResult::changed_with(Effect::Filter { query: text })
//!         }
//!         Action::SearchDidLoad(results) => {
//!             state.results = results;
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//!
//! let mut store = EffectStore::new(AppState::default(), reducer);
//! let result = store.dispatch(Action::SearchQueryChange("Lon".into()));
//! assert!(result.has_effects());
//! ```

pub mod action;
pub mod component;
pub mod effect;
pub mod event;
pub mod runtime;
pub mod subscriptions;
pub mod tasks;
pub mod testing;

pub use action::{Action, ActionSummary};
pub use component::Component;
pub use effect::{
    DispatchResult, EffectReducer, EffectStore, EffectStoreWithMiddleware, LoggingMiddleware,
    Middleware,
};
pub use event::{process_raw_event, rect_contains, spawn_event_poller, EventKind, HitRegions, RawEvent};
pub use runtime::{EffectContext, EffectRuntime, EventOutcome};
pub use subscriptions::Subscriptions;
pub use tasks::{TaskKey, TaskManager};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::action::{Action, ActionSummary};
    pub use crate::component::Component;
    pub use crate::effect::{DispatchResult, EffectStore, LoggingMiddleware};
    pub use crate::event::{EventKind, HitRegions};
    pub use crate::runtime::{EffectContext, EffectRuntime, EventOutcome};
    pub use crate::tasks::{TaskKey, TaskManager};
}
