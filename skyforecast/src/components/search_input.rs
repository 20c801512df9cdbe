//! Single-line location input

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use skyforecast_core::{Component, EventKind};

const SEARCH_ICON: &str = "⌕ ";

pub struct SearchInputProps<'a, A> {
    pub value: &'a str,
    pub placeholder: &'a str,
    pub is_focused: bool,
    /// Shown at the right edge while a filter pass runs
    pub spinner: Option<&'a str>,
    pub on_change: fn(String) -> A,
}

/// Text input with a character-indexed cursor.
///
/// Emits `on_change` for every edit. Enter, Esc and arrows up/down are left
/// to the owner.
#[derive(Default)]
pub struct SearchInput {
    /// Cursor position in chars
    cursor: usize,
    /// Value seen on the last event or render, to detect outside rewrites
    seen: String,
}

impl SearchInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor to the end whenever the value changed behind our back
    /// (a pick rewrites the query with the full label).
    fn sync(&mut self, value: &str) {
        if self.seen != value {
            self.seen = value.to_string();
            self.cursor = value.chars().count();
        }
    }

    fn byte_offset(value: &str, chars: usize) -> usize {
        value
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(value.len())
    }

    fn edited(&mut self, value: String, cursor: usize) -> String {
        self.cursor = cursor;
        self.seen = value.clone();
        value
    }

    fn insert(&mut self, value: &str, c: char) -> String {
        let at = Self::byte_offset(value, self.cursor);
        let mut next = String::with_capacity(value.len() + c.len_utf8());
        next.push_str(&value[..at]);
        next.push(c);
        next.push_str(&value[at..]);
        self.edited(next, self.cursor + 1)
    }

    fn remove_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let start = Self::byte_offset(value, self.cursor - 1);
        let end = Self::byte_offset(value, self.cursor);
        let next = format!("{}{}", &value[..start], &value[end..]);
        Some(self.edited(next, self.cursor - 1))
    }

    fn remove_at(&mut self, value: &str) -> Option<String> {
        if self.cursor >= value.chars().count() {
            return None;
        }
        let start = Self::byte_offset(value, self.cursor);
        let end = Self::byte_offset(value, self.cursor + 1);
        let next = format!("{}{}", &value[..start], &value[end..]);
        Some(self.edited(next, self.cursor))
    }

    /// Drop the word before the cursor (Ctrl+W).
    fn remove_word(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let chars: Vec<char> = value.chars().collect();
        let mut start = self.cursor;
        while start > 0 && chars[start - 1].is_whitespace() {
            start -= 1;
        }
        while start > 0 && !chars[start - 1].is_whitespace() {
            start -= 1;
        }
        let next: String = chars[..start].iter().chain(&chars[self.cursor..]).collect();
        Some(self.edited(next, start))
    }
}

impl<A> Component<A> for SearchInput {
    type Props<'a> = SearchInputProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        if !props.is_focused {
            return None;
        }
        let EventKind::Key(key) = event else {
            return None;
        };

        self.sync(props.value);
        let len = props.value.chars().count();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                KeyCode::Char('e') => {
                    self.cursor = len;
                    None
                }
                KeyCode::Char('u') => {
                    let next = self.edited(String::new(), 0);
                    Some((props.on_change)(next))
                }
                KeyCode::Char('w') => self.remove_word(props.value).map(props.on_change),
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => Some((props.on_change)(self.insert(props.value, c))),
            KeyCode::Backspace => self.remove_before(props.value).map(props.on_change),
            KeyCode::Delete => self.remove_at(props.value).map(props.on_change),
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(len);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = len;
                None
            }
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.sync(props.value);

        let border = if props.is_focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(area);
        frame.render_widget(block, area);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        let prefix = SEARCH_ICON.chars().count() as u16;
        let suffix = if props.spinner.is_some() { 2 } else { 0 };
        let visible = inner.width.saturating_sub(prefix + suffix) as usize;

        // Scroll so the cursor stays in view
        let offset = (self.cursor + 1).saturating_sub(visible);

        let mut spans = vec![Span::styled(SEARCH_ICON, Style::default().fg(Color::Cyan))];
        if props.value.is_empty() {
            spans.push(Span::styled(props.placeholder, Style::default().fg(Color::DarkGray)));
        } else {
            let shown: String = props.value.chars().skip(offset).take(visible).collect();
            spans.push(Span::raw(shown));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), inner);

        if let Some(spinner) = props.spinner {
            let spinner_area = Rect {
                x: inner.right().saturating_sub(2),
                width: 2.min(inner.width),
                ..inner
            };
            frame.render_widget(
                Paragraph::new(Span::styled(spinner, Style::default().fg(Color::Cyan).bold())),
                spinner_area,
            );
        }

        if props.is_focused {
            let x = inner.x + prefix + self.cursor.saturating_sub(offset) as u16;
            if x < inner.right() {
                frame.set_cursor_position((x, inner.y));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyforecast_core::testing::{ctrl_key, key, RenderHarness};

    #[derive(Debug, Clone, PartialEq)]
    enum TestAction {
        Change(String),
    }

    fn props(value: &str) -> SearchInputProps<'_, TestAction> {
        SearchInputProps {
            value,
            placeholder: "Search location...",
            is_focused: true,
            spinner: None,
            on_change: TestAction::Change,
        }
    }

    fn press(input: &mut SearchInput, value: &str, event: EventKind) -> Vec<TestAction> {
        input.handle_event(&event, props(value)).into_iter().collect()
    }

    #[test]
    fn test_typing_appends_at_end() {
        let mut input = SearchInput::new();

        let actions = press(&mut input, "Lo", EventKind::Key(key("n")));
        assert_eq!(actions, vec![TestAction::Change("Lon".into())]);
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_backspace_on_multibyte() {
        let mut input = SearchInput::new();

        let actions = press(&mut input, "Zürich", EventKind::Key(key("left")));
        assert!(actions.is_empty());
        let actions = press(&mut input, "Zürich", EventKind::Key(key("backspace")));
        assert_eq!(actions, vec![TestAction::Change("Zürih".into())]);
    }

    #[test]
    fn test_backspace_at_start_is_silent() {
        let mut input = SearchInput::new();
        press(&mut input, "Oslo", EventKind::Key(key("home")));

        let actions = press(&mut input, "Oslo", EventKind::Key(key("backspace")));
        assert!(actions.is_empty());
    }

    #[test]
    fn test_delete_under_cursor() {
        let mut input = SearchInput::new();
        press(&mut input, "Köln", EventKind::Key(key("home")));
        press(&mut input, "Köln", EventKind::Key(key("right")));

        let actions = press(&mut input, "Köln", EventKind::Key(key("delete")));
        assert_eq!(actions, vec![TestAction::Change("Kln".into())]);
    }

    #[test]
    fn test_ctrl_shortcuts() {
        let mut input = SearchInput::new();

        let actions = press(&mut input, "New York", EventKind::Key(ctrl_key('w')));
        assert_eq!(actions, vec![TestAction::Change("New ".into())]);

        let actions = press(&mut input, "New ", EventKind::Key(ctrl_key('u')));
        assert_eq!(actions, vec![TestAction::Change(String::new())]);
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_outside_rewrite_moves_cursor_to_end() {
        let mut input = SearchInput::new();
        press(&mut input, "To", EventKind::Key(key("home")));
        assert_eq!(input.cursor(), 0);

        press(&mut input, "Tokyo, Tokyo, Japan", EventKind::Key(key("right")));
        assert_eq!(input.cursor(), 19);
    }

    #[test]
    fn test_unfocused_ignores_keys() {
        let mut input = SearchInput::new();
        let props = SearchInputProps {
            is_focused: false,
            ..props("")
        };

        let actions: Vec<_> = input
            .handle_event(&EventKind::Key(key("a")), props)
            .into_iter()
            .collect();
        assert!(actions.is_empty());
    }

    #[test]
    fn test_render_placeholder_and_value() {
        let mut render = RenderHarness::new(40, 3);
        let mut input = SearchInput::new();

        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props(""));
        });
        assert!(output.contains("Search location..."));

        let output = render.render_to_string_plain(|frame| {
            input.render(frame, frame.area(), props("Paris"));
        });
        assert!(output.contains("Paris"));
        assert!(!output.contains("Search location..."));
    }
}
