//! Test utilities
//!
//! - [`key`]: build a `KeyEvent` from a string such as `"ctrl+c"` or `"down"`
//! - [`TestHarness`]: state plus an action channel for effect and task tests
//! - [`RenderHarness`]: render into a `TestBackend` and read the buffer back
//! - Assertion macros for emitted actions
//!
//! ```ignore
//! use skyforecast_core::testing::{key, RenderHarness};
//!
//! let mut render = RenderHarness::new(60, 20);
//! let output = render.render_to_string_plain(|frame| {
//!     search_bar.render(frame, frame.area(), props);
//! });
//! assert!(output.contains("Popular Cities"));
//! ```

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::{Frame, Terminal};
use tokio::sync::mpsc;

use crate::event::EventKind;
use crate::Action;

/// Parse a key description like `"q"`, `"enter"`, `"ctrl+c"` or `"shift+tab"`.
///
/// Returns `None` for empty or unknown key names.
pub fn parse_key(key_str: &str) -> Option<KeyEvent> {
    let key_str = key_str.trim().to_lowercase();
    if key_str.is_empty() {
        return None;
    }

    if key_str == "shift+tab" || key_str == "backtab" {
        return Some(KeyEvent {
            code: KeyCode::BackTab,
            modifiers: KeyModifiers::SHIFT,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        });
    }

    // A lone "+" is a character, not a separator
    let (modifier_parts, key_part) = match key_str.rsplit_once('+') {
        Some((mods, "")) => (Some(mods.trim_end_matches('+')), "+"),
        Some((mods, key)) => (Some(mods), key),
        None => (None, key_str.as_str()),
    };

    let mut modifiers = KeyModifiers::empty();
    for part in modifier_parts.into_iter().flat_map(|m| m.split('+')) {
        match part.trim() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            "" => {}
            _ => return None,
        }
    }

    let code = match key_part.trim() {
        "esc" | "escape" => KeyCode::Esc,
        "enter" | "return" => KeyCode::Enter,
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "delete" | "del" => KeyCode::Delete,
        "space" => KeyCode::Char(' '),
        f if f.len() > 1 && f.starts_with('f') => KeyCode::F(f[1..].parse().ok()?),
        c => {
            let mut chars = c.chars();
            let ch = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(ch)
        }
    };

    Some(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    })
}

/// Like [`parse_key`] but panics on an invalid description.
pub fn key(s: &str) -> KeyEvent {
    parse_key(s).unwrap_or_else(|| panic!("Invalid key string: {:?}", s))
}

/// A plain character key press.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// A character key press with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Wrap a key description into an [`EventKind`].
pub fn key_event(s: &str) -> EventKind {
    EventKind::Key(key(s))
}

/// One `EventKind::Key` per character, for typing a whole query.
pub fn type_str(text: &str) -> Vec<EventKind> {
    text.chars().map(|c| EventKind::Key(char_key(c))).collect()
}

/// State under test plus an action channel.
pub struct TestHarness<S, A: Action> {
    pub state: S,
    tx: mpsc::UnboundedSender<A>,
    rx: mpsc::UnboundedReceiver<A>,
}

impl<S, A: Action> TestHarness<S, A> {
    pub fn new(state: S) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { state, tx, rx }
    }

    /// Sender to hand to a `TaskManager` or effect context.
    pub fn sender(&self) -> mpsc::UnboundedSender<A> {
        self.tx.clone()
    }

    pub fn emit(&self, action: A) {
        let _ = self.tx.send(action);
    }

    /// Drain everything emitted so far without waiting.
    pub fn drain_emitted(&mut self) -> Vec<A> {
        let mut actions = Vec::new();
        while let Ok(action) = self.rx.try_recv() {
            actions.push(action);
        }
        actions
    }

    /// Wait for the next emitted action.
    pub async fn next_emitted(&mut self) -> Option<A> {
        self.rx.recv().await
    }
}

impl<S: Default, A: Action> Default for TestHarness<S, A> {
    fn default() -> Self {
        Self::new(S::default())
    }
}

/// Renders into an in-memory terminal for snapshot-style assertions.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    pub fn new(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = match Terminal::new(backend) {
            Ok(terminal) => terminal,
            Err(e) => panic!("TestBackend terminal failed: {e}"),
        };
        Self { terminal }
    }

    /// Draw one frame and return the resulting buffer.
    pub fn render<F>(&mut self, draw: F) -> Buffer
    where
        F: FnOnce(&mut Frame),
    {
        if let Err(e) = self.terminal.draw(draw) {
            panic!("Render failed: {e}");
        }
        self.terminal.backend().buffer().clone()
    }

    /// Draw one frame and return its text, one line per row, trailing
    /// whitespace trimmed.
    pub fn render_to_string_plain<F>(&mut self, draw: F) -> String
    where
        F: FnOnce(&mut Frame),
    {
        buffer_to_string_plain(&self.render(draw))
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.terminal.backend_mut().resize(width, height);
    }
}

/// Flatten a buffer into plain text.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut lines = Vec::with_capacity(area.height as usize);
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            if let Some(cell) = buffer.cell((x, y)) {
                line.push_str(cell.symbol());
            }
        }
        lines.push(line.trim_end().to_string());
    }
    lines.join("\n")
}

/// Assert that an action matching a pattern was emitted.
///
/// ```ignore
/// let actions = harness.drain_emitted();
/// assert_emitted!(actions, Action::LocationSelect(_));
/// ```
#[macro_export]
macro_rules! assert_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        match &$actions {
            actions => assert!(
                actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
                "Expected action matching `{}` to be emitted, but got: {:?}",
                stringify!($pattern),
                actions
            ),
        }
    };
}

/// Assert that no action matching a pattern was emitted.
#[macro_export]
macro_rules! assert_not_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        match &$actions {
            actions => assert!(
                !actions.iter().any(|a| matches!(a, $pattern $(if $guard)?)),
                "Expected action matching `{}` NOT to be emitted, but it was: {:?}",
                stringify!($pattern),
                actions
            ),
        }
    };
}

/// Count actions matching a pattern.
///
/// ```ignore
/// assert_eq!(count_emitted!(actions, Action::LocationSelect(_)), 1);
/// ```
#[macro_export]
macro_rules! count_emitted {
    ($actions:expr, $pattern:pat $(if $guard:expr)?) => {
        $actions.iter().filter(|a| matches!(a, $pattern $(if $guard)?)).count()
    };
}

/// Assertions over a list of collected actions.
pub trait ActionAssertions<A> {
    fn assert_empty(&self);
    fn assert_count(&self, expected: usize);
    fn assert_first(&self, expected: A);
    fn assert_contains(&self, expected: A);
}

impl<A: PartialEq + std::fmt::Debug> ActionAssertions<A> for Vec<A> {
    fn assert_empty(&self) {
        assert!(self.is_empty(), "Expected no actions, got: {:?}", self);
    }

    fn assert_count(&self, expected: usize) {
        assert_eq!(
            self.len(),
            expected,
            "Expected {} actions, got {}: {:?}",
            expected,
            self.len(),
            self
        );
    }

    fn assert_first(&self, expected: A) {
        match self.first() {
            Some(first) => assert_eq!(first, &expected, "First action mismatch"),
            None => panic!("Expected first action {:?}, got none", expected),
        }
    }

    fn assert_contains(&self, expected: A) {
        assert!(
            self.contains(&expected),
            "Expected {:?} in {:?}",
            expected,
            self
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_key_parsing() {
        assert_eq!(key("q").code, KeyCode::Char('q'));
        assert_eq!(key("Enter").code, KeyCode::Enter);
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("f5").code, KeyCode::F(5));

        let k = key("ctrl+c");
        assert_eq!(k.code, KeyCode::Char('c'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));

        let k = key("shift+tab");
        assert_eq!(k.code, KeyCode::BackTab);

        assert_eq!(key("+").code, KeyCode::Char('+'));
        assert_eq!(key("ctrl++").code, KeyCode::Char('+'));
    }

    #[test]
    fn test_parse_key_rejects_garbage() {
        assert!(parse_key("").is_none());
        assert!(parse_key("hyper+x").is_none());
        assert!(parse_key("notakey").is_none());
    }

    #[test]
    fn test_type_str() {
        let events = type_str("Lon");
        assert_eq!(events.len(), 3);
        assert!(matches!(&events[2], EventKind::Key(k) if k.code == KeyCode::Char('n')));
    }

    #[test]
    fn test_render_harness_plain_text() {
        let mut render = RenderHarness::new(20, 2);
        let output = render.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("SkyForecast"), frame.area());
        });

        assert_eq!(output, "SkyForecast\n");
    }

    #[test]
    fn test_action_assertions() {
        let actions = vec![1, 2, 3];
        actions.assert_count(3);
        actions.assert_first(1);
        actions.assert_contains(2);
        Vec::<i32>::new().assert_empty();
        assert_eq!(count_emitted!(actions, 2 | 3), 2);
        assert_emitted!(actions, 3);
        assert_not_emitted!(actions, 4);
    }

    #[test]
    fn test_emitted_macros_evaluate_once() {
        let label = String::from("Tokyo");
        // Moving `label` twice would not compile
        assert_emitted!(vec![label], l if l == "Tokyo");

        let mut drains = 0;
        let mut drain = || {
            drains += 1;
            vec![String::from("Lon")]
        };
        assert_not_emitted!(drain(), l if l == "Lo");
        assert_eq!(drains, 1);
    }
}
