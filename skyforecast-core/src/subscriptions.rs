//! Long-lived action sources
//!
//! A subscription keeps emitting until it is replaced, cancelled, or the
//! runtime shuts down. The page uses one for the loading spinner tick.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::AbortHandle;
use tokio::time::{Instant, MissedTickBehavior};

use crate::tasks::TaskKey;
use crate::Action;

pub struct Subscriptions<A> {
    active: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<A>,
}

impl<A: Action> Subscriptions<A> {
    pub fn new(action_tx: mpsc::UnboundedSender<A>) -> Self {
        Self {
            active: HashMap::new(),
            action_tx,
        }
    }

    /// Emit `make_action()` every `period`, first one period from now.
    ///
    /// A stalled runtime skips missed ticks instead of bursting them.
    pub fn interval<F>(&mut self, key: impl Into<TaskKey>, period: Duration, make_action: F) -> &mut Self
    where
        F: Fn() -> A + Send + 'static,
    {
        let key = key.into();
        let tx = self.action_tx.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now() + period, period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if tx.send(make_action()).is_err() {
                    return;
                }
            }
        });

        tracing::trace!(subscription = %key, period_ms = period.as_millis() as u64, "Interval subscribed");
        if let Some(previous) = self.active.insert(key, handle.abort_handle()) {
            previous.abort();
        }
        self
    }

    pub fn cancel_all(&mut self) {
        self.active.drain().for_each(|(_, handle)| handle.abort());
    }

    pub fn is_active(&self, key: &TaskKey) -> bool {
        self.active.get(key).is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> Drop for Subscriptions<A> {
    fn drop(&mut self) {
        self.active.drain().for_each(|(_, handle)| handle.abort());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Tick,
        Blink,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Tick => "Tick",
                TestAction::Blink => "Blink",
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_tick_waits_one_period() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);
        subs.interval("spinner", Duration::from_millis(120), || TestAction::Tick);

        tokio::time::sleep(Duration::from_millis(60)).await;
        assert!(rx.try_recv().is_err());

        assert_eq!(rx.recv().await, Some(TestAction::Tick));
        assert_eq!(rx.recv().await, Some(TestAction::Tick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_same_key_replaces_previous() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);

        subs.interval("spinner", Duration::from_millis(100), || TestAction::Tick);
        subs.interval("spinner", Duration::from_millis(100), || TestAction::Blink);

        assert_eq!(rx.recv().await, Some(TestAction::Blink));
        assert_eq!(rx.recv().await, Some(TestAction::Blink));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_silences_everything() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut subs = Subscriptions::new(tx);
        subs.interval("spinner", Duration::from_millis(100), || TestAction::Tick);
        assert!(subs.is_active(&TaskKey::new("spinner")));

        subs.cancel_all();
        assert!(!subs.is_active(&TaskKey::new("spinner")));

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }
}
