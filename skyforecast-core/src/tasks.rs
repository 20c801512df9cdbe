//! Keyed async tasks with replace-on-spawn semantics
//!
//! Each task runs under a [`TaskKey`]. Spawning again under the same key
//! aborts the running task first, so only the newest request for a key can
//! deliver its result. Search-as-you-type relies on this: the "Lo" lookup is
//! gone by the time "Lon" is typed.
//!
//! ```ignore
//! ctx.tasks().spawn("city_search", async move {
//!     match source.fetch_candidates(&query).await {
//!         Ok(suggestions) => Action::SearchDidLoad { token, suggestions },
//!         Err(e) => Action::SearchDidError { token, message: e.to_string() },
//!     }
//! });
//! ```

use std::collections::HashMap;
use std::fmt;
use std::future::Future;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;

use crate::Action;

/// Names a slot for one in-flight task.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for TaskKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TaskKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Completed tasks send their action into the runtime channel. Aborted tasks
/// send nothing.
pub struct TaskManager<A> {
    running: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> TaskManager<A> {
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            running: HashMap::new(),
            action_tx,
        }
    }

    /// Run `future` under `key`, replacing whatever was there.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = A> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let label = key.to_string();
        let handle = tokio::spawn(async move {
            let action = future.await;
            if tx.send(action).is_err() {
                tracing::debug!(task = %label, "Result dropped, runtime is gone");
            }
        });

        tracing::trace!(task = %key, "Task spawned");
        self.running.insert(key, handle.abort_handle());
        self
    }

    /// Abort the task under `key`, if any.
    pub fn cancel(&mut self, key: &TaskKey) {
        let Some(handle) = self.running.remove(key) else {
            return;
        };
        if !handle.is_finished() {
            tracing::debug!(task = %key, "Aborting superseded task");
            handle.abort();
        }
    }

    pub fn cancel_all(&mut self) {
        self.running.drain().for_each(|(_, handle)| handle.abort());
    }

    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.running.get(key).is_some_and(|handle| !handle.is_finished())
    }

    /// True once nothing is registered, finished tasks included.
    pub fn is_empty(&self) -> bool {
        self.running.is_empty()
    }
}

impl<A> Drop for TaskManager<A> {
    fn drop(&mut self) {
        self.running.drain().for_each(|(_, handle)| handle.abort());
    }
}
