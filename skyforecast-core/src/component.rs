//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and emits actions
///
/// Rules:
/// 1. Props carry all read-only data needed for rendering and event handling
/// 2. `handle_event` returns actions and never mutates application state
/// 3. `render` draws from props plus internal UI state (cursor, scroll offset)
///
/// Focus is passed through props, so components stay independent of how the
/// page tracks it.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Map an event into actions.
    ///
    /// Render-only components keep the default, which emits nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
