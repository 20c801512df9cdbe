//! Effect-based state management
//!
//! Reducers return a [`DispatchResult`]: whether state changed plus a list of
//! declarative effects. Effects describe work ("filter candidates for this
//! query", "load weather for this label"); the runtime's effect handler
//! performs it. The reducer itself stays synchronous and side-effect free.
//!
//! ```ignore
//! fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
//!     match action {
//!         Action::LocationSelect(label) => {
//!             state.weather_loading = true;
//!             DispatchResult::changed_with(Effect::LoadWeather { location: label })
//!         }
//!         Action::WeatherDidLoad(weather) => {
//!             state.weather = weather;
//!             state.weather_loading = false;
//!             DispatchResult::changed()
//!         }
//!     }
//! }
//! ```

use std::marker::PhantomData;
use std::time::Instant;

use crate::action::{Action, ActionSummary};

/// Result of dispatching an action to an effect-aware store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchResult<E> {
    /// Whether the state was modified (re-render needed).
    pub changed: bool,
    /// Effects to be processed after dispatch, in order.
    pub effects: Vec<E>,
}

impl<E> Default for DispatchResult<E> {
    fn default() -> Self {
        Self::unchanged()
    }
}

impl<E> DispatchResult<E> {
    #[inline]
    pub fn unchanged() -> Self {
        Self::from_changed(false)
    }

    #[inline]
    pub fn changed() -> Self {
        Self::from_changed(true)
    }

    /// No effects; `changed` as reported by a state method.
    #[inline]
    pub fn from_changed(changed: bool) -> Self {
        Self {
            changed,
            effects: Vec::new(),
        }
    }

    /// State changed with a single effect.
    #[inline]
    pub fn changed_with(effect: E) -> Self {
        Self {
            changed: true,
            effects: vec![effect],
        }
    }

    #[inline]
    pub fn has_effects(&self) -> bool {
        !self.effects.is_empty()
    }
}

/// A reducer function that can emit effects.
pub type EffectReducer<S, A, E> = fn(&mut S, A) -> DispatchResult<E>;

/// State container driven by an effect-emitting reducer.
pub struct EffectStore<S, A, E> {
    state: S,
    reducer: EffectReducer<S, A, E>,
    _marker: PhantomData<(A, E)>,
}

impl<S, A: Action, E> EffectStore<S, A, E> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>) -> Self {
        Self {
            state,
            reducer,
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        &self.state
    }

    #[inline]
    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        (self.reducer)(&mut self.state, action)
    }
}

/// Hooks called around every dispatch.
pub trait Middleware<A: Action> {
    /// Called before the action reaches the reducer
    fn before(&mut self, action: &A);

    /// Called after the reducer ran
    fn after(&mut self, action: &A, result_changed: bool);
}

/// Logs every processed action through `tracing` at debug level, with its
/// sequence number and the time the reducer took.
///
/// Uses [`ActionSummary`] so suggestion lists and weather payloads stay on
/// one line.
#[derive(Debug, Default)]
pub struct LoggingMiddleware {
    started: Option<Instant>,
    dispatched: u64,
}

impl LoggingMiddleware {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<A: ActionSummary> Middleware<A> for LoggingMiddleware {
    fn before(&mut self, _action: &A) {
        self.started = Some(Instant::now());
    }

    fn after(&mut self, action: &A, result_changed: bool) {
        self.dispatched += 1;
        let reduce_us = self
            .started
            .take()
            .map(|started| started.elapsed().as_micros() as u64)
            .unwrap_or_default();
        tracing::debug!(
            seq = self.dispatched,
            action = %action.name(),
            summary = %action.summary(),
            changed = result_changed,
            reduce_us,
            "Action processed"
        );
    }
}

/// An effect store with middleware hooks around each dispatch.
pub struct EffectStoreWithMiddleware<S, A, E, M> {
    store: EffectStore<S, A, E>,
    middleware: M,
}

impl<S, A, E, M> EffectStoreWithMiddleware<S, A, E, M>
where
    A: Action,
    M: Middleware<A>,
{
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        Self {
            store: EffectStore::new(state, reducer),
            middleware,
        }
    }

    #[inline]
    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn dispatch(&mut self, action: A) -> DispatchResult<E> {
        self.middleware.before(&action);
        let result = self.store.dispatch(action.clone());
        self.middleware.after(&action, result.changed);
        result
    }
}
