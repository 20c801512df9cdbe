//! The event/action/render loop.
//!
//! [`EffectRuntime`] owns the store, the action channel, the task manager and
//! the subscriptions. The application supplies closures for rendering, event
//! mapping, quitting and effect handling.

use std::io;
use std::time::Duration;

use ratatui::backend::Backend;
use ratatui::layout::Rect;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::effect::{EffectReducer, EffectStoreWithMiddleware, Middleware};
use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
use crate::subscriptions::Subscriptions;
use crate::tasks::TaskManager;
use crate::Action;

/// Timeout of each `crossterm::event::poll` call.
const POLL_TIMEOUT: Duration = Duration::from_millis(10);
/// Pause between poll batches, roughly one frame.
const POLL_INTERVAL: Duration = Duration::from_millis(16);

/// Actions produced by one terminal event, plus a render hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventOutcome<A> {
    pub actions: Vec<A>,
    /// Redraw even if no action changes state (resize).
    pub needs_render: bool,
}

impl<A> EventOutcome<A> {
    pub fn ignored() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: false,
        }
    }

    pub fn needs_render() -> Self {
        Self {
            actions: Vec::new(),
            needs_render: true,
        }
    }

    pub fn action(action: A) -> Self {
        Self::from_actions([action])
    }

    /// Collect whatever a component's `handle_event` returned.
    pub fn from_actions(actions: impl IntoIterator<Item = A>) -> Self {
        Self {
            actions: actions.into_iter().collect(),
            needs_render: false,
        }
    }

    pub fn is_ignored(&self) -> bool {
        self.actions.is_empty() && !self.needs_render
    }
}

impl<A> Default for EventOutcome<A> {
    fn default() -> Self {
        Self::ignored()
    }
}

impl<A> From<A> for EventOutcome<A> {
    fn from(action: A) -> Self {
        Self::action(action)
    }
}

/// Context passed to effect handlers.
pub struct EffectContext<'a, A: Action> {
    action_tx: &'a mpsc::UnboundedSender<A>,
    tasks: &'a mut TaskManager<A>,
    subscriptions: &'a mut Subscriptions<A>,
}

impl<'a, A: Action> EffectContext<'a, A> {
    /// Build a context around externally owned parts (tests drive effects this way).
    pub fn new(
        action_tx: &'a mpsc::UnboundedSender<A>,
        tasks: &'a mut TaskManager<A>,
        subscriptions: &'a mut Subscriptions<A>,
    ) -> Self {
        Self {
            action_tx,
            tasks,
            subscriptions,
        }
    }

    /// Send an action straight back into the queue.
    pub fn emit(&self, action: A) {
        if self.action_tx.send(action).is_err() {
            tracing::debug!("Action channel closed, dropping emitted action");
        }
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        self.subscriptions
    }
}

/// Drives an [`EffectStoreWithMiddleware`] from terminal events and task
/// results.
pub struct EffectRuntime<S, A: Action, E, M: Middleware<A>> {
    store: EffectStoreWithMiddleware<S, A, E, M>,
    action_tx: mpsc::UnboundedSender<A>,
    action_rx: mpsc::UnboundedReceiver<A>,
    tasks: TaskManager<A>,
    subscriptions: Subscriptions<A>,
    should_render: bool,
}

impl<S, A: Action, E, M: Middleware<A>> EffectRuntime<S, A, E, M> {
    pub fn new(state: S, reducer: EffectReducer<S, A, E>, middleware: M) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        Self {
            store: EffectStoreWithMiddleware::new(state, reducer, middleware),
            tasks: TaskManager::new(action_tx.clone()),
            subscriptions: Subscriptions::new(action_tx.clone()),
            action_tx,
            action_rx,
            should_render: true,
        }
    }

    /// Send an action into the runtime queue.
    pub fn enqueue(&self, action: A) {
        if self.action_tx.send(action).is_err() {
            tracing::debug!("Action channel closed, dropping enqueued action");
        }
    }

    pub fn state(&self) -> &S {
        self.store.state()
    }

    pub fn tasks(&mut self) -> &mut TaskManager<A> {
        &mut self.tasks
    }

    pub fn subscriptions(&mut self) -> &mut Subscriptions<A> {
        &mut self.subscriptions
    }

    /// Context for running effects outside a dispatch, e.g. startup work.
    pub fn effect_context(&mut self) -> EffectContext<'_, A> {
        EffectContext::new(&self.action_tx, &mut self.tasks, &mut self.subscriptions)
    }

    fn apply_outcome(&mut self, outcome: EventOutcome<A>) {
        self.should_render |= outcome.needs_render;
        for action in outcome.actions {
            self.enqueue(action);
        }
    }

    fn reduce<F>(&mut self, action: A, handle_effect: &mut F)
    where
        F: FnMut(E, &mut EffectContext<A>),
    {
        let result = self.store.dispatch(action);
        self.should_render |= result.changed;
        if !result.has_effects() {
            return;
        }
        let mut ctx = EffectContext::new(&self.action_tx, &mut self.tasks, &mut self.subscriptions);
        for effect in result.effects {
            handle_effect(effect, &mut ctx);
        }
    }

    fn shutdown(&mut self) {
        self.subscriptions.cancel_all();
        self.tasks.cancel_all();
    }

    /// Run until `should_quit` accepts an action.
    ///
    /// Quit actions are not dispatched. Tasks and subscriptions are cancelled
    /// on the way out.
    pub async fn run<B, FRender, FEvent, FQuit, FEffect>(
        &mut self,
        terminal: &mut Terminal<B>,
        mut render: FRender,
        mut map_event: FEvent,
        mut should_quit: FQuit,
        mut handle_effect: FEffect,
    ) -> io::Result<()>
    where
        B: Backend,
        FRender: FnMut(&mut Frame, Rect, &S),
        FEvent: FnMut(&EventKind, &S) -> EventOutcome<A>,
        FQuit: FnMut(&A) -> bool,
        FEffect: FnMut(E, &mut EffectContext<A>),
    {
        let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
        let poller_cancel = CancellationToken::new();
        let _poller = spawn_event_poller(event_tx, POLL_TIMEOUT, POLL_INTERVAL, poller_cancel.clone());

        let outcome = loop {
            if self.should_render {
                let state = self.store.state();
                let drawn = terminal.draw(|frame| {
                    let area = frame.area();
                    render(frame, area, state);
                });
                if let Err(e) = drawn {
                    break Err(e);
                }
                self.should_render = false;
            }

            tokio::select! {
                Some(raw) = event_rx.recv() => {
                    let event = process_raw_event(raw);
                    let outcome = map_event(&event, self.store.state());
                    self.apply_outcome(outcome);
                }
                Some(action) = self.action_rx.recv() => {
                    if should_quit(&action) {
                        tracing::info!("Quit requested");
                        break Ok(());
                    }
                    self.reduce(action, &mut handle_effect);
                }
                else => break Ok(()),
            }
        };

        poller_cancel.cancel();
        self.shutdown();
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::{DispatchResult, LoggingMiddleware};
    use crate::tasks::TaskKey;
    use crate::ActionSummary;

    #[derive(Clone, Debug, PartialEq)]
    enum TestAction {
        Focus,
        DidLoad,
    }

    impl Action for TestAction {
        fn name(&self) -> &'static str {
            match self {
                TestAction::Focus => "Focus",
                TestAction::DidLoad => "DidLoad",
            }
        }
    }

    impl ActionSummary for TestAction {}

    fn counter(count: &mut u32, action: TestAction) -> DispatchResult<&'static str> {
        *count += 1;
        match action {
            TestAction::Focus => DispatchResult::changed_with("load"),
            TestAction::DidLoad => DispatchResult::changed(),
        }
    }

    fn runtime() -> EffectRuntime<u32, TestAction, &'static str, LoggingMiddleware> {
        EffectRuntime::new(0, counter, LoggingMiddleware::new())
    }

    #[test]
    fn test_event_outcome() {
        assert!(EventOutcome::<TestAction>::ignored().is_ignored());
        assert!(!EventOutcome::<TestAction>::needs_render().is_ignored());

        let outcome: EventOutcome<_> = TestAction::Focus.into();
        assert_eq!(outcome.actions, vec![TestAction::Focus]);
        assert!(!outcome.needs_render);

        let outcome = EventOutcome::from_actions(None::<TestAction>);
        assert!(outcome.is_ignored());
    }

    #[tokio::test]
    async fn test_effect_context_emit_and_tasks() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx.clone());
        let mut subs = Subscriptions::new(tx.clone());
        let mut ctx = EffectContext::new(&tx, &mut tasks, &mut subs);

        ctx.emit(TestAction::Focus);
        ctx.tasks().spawn("load", async { TestAction::DidLoad });

        assert_eq!(rx.recv().await, Some(TestAction::Focus));
        assert_eq!(rx.recv().await, Some(TestAction::DidLoad));
    }

    #[tokio::test]
    async fn test_outcome_actions_are_queued() {
        let mut runtime = runtime();
        runtime.should_render = false;

        runtime.apply_outcome(EventOutcome::from_actions([TestAction::Focus, TestAction::DidLoad]));
        assert_eq!(runtime.action_rx.try_recv().ok(), Some(TestAction::Focus));
        assert_eq!(runtime.action_rx.try_recv().ok(), Some(TestAction::DidLoad));
        assert!(!runtime.should_render);

        runtime.apply_outcome(EventOutcome::needs_render());
        assert!(runtime.should_render);
    }

    #[tokio::test]
    async fn test_reduce_runs_effects_and_marks_render() {
        let mut runtime = runtime();
        runtime.should_render = false;

        let mut handled = Vec::new();
        let mut handle = |effect: &'static str, ctx: &mut EffectContext<TestAction>| {
            handled.push(effect);
            ctx.tasks().spawn("load", async { TestAction::DidLoad });
        };
        runtime.reduce(TestAction::Focus, &mut handle);

        assert_eq!(handled, vec!["load"]);
        assert_eq!(*runtime.state(), 1);
        assert!(runtime.should_render);
        assert_eq!(runtime.action_rx.recv().await, Some(TestAction::DidLoad));
    }

    #[tokio::test]
    async fn test_effect_context_spawns_startup_work() {
        let mut runtime = runtime();
        {
            let mut ctx = runtime.effect_context();
            ctx.tasks().spawn("startup", async { TestAction::DidLoad });
        }

        assert!(runtime.tasks().is_running(&TaskKey::new("startup")));
        assert_eq!(runtime.action_rx.recv().await, Some(TestAction::DidLoad));

        runtime.shutdown();
        assert!(runtime.tasks().is_empty());
    }
}
