//! Action trait for type-safe state mutations

use std::fmt::Debug;

/// Marker trait for actions that can be dispatched to the store
///
/// Actions are cloned into the middleware and sent across the task channel,
/// hence the `Clone + Send + 'static` bounds.
pub trait Action: Clone + Debug + Send + 'static {
    /// Variant name, used for logging
    fn name(&self) -> &'static str;
}

/// Concise one-line description of an action for the action log.
///
/// Data-heavy actions override this to avoid dumping whole payloads.
pub trait ActionSummary: Action {
    fn summary(&self) -> String {
        format!("{:?}", self)
    }
}
