//! Location search box: input plus dropdown
//!
//! Keys while focused:
//! - Up/Down move the highlight, only while the dropdown is on screen
//! - Enter picks the highlighted entry if it was drawn, or submits the typed text
//! - Esc blurs
//! - everything else edits the query

use crossterm::event::KeyCode;
use ratatui::{layout::Rect, Frame};
use skyforecast_core::{rect_contains, EventKind};

use super::{Component, SearchInput, SearchInputProps, SuggestionList, SuggestionListProps};
use crate::action::Action;
use crate::search::{LocationCatalog, SearchState};

pub const PLACEHOLDER: &str = "Search for any city or location...";

pub struct SearchBarProps<'a> {
    pub search: &'a SearchState,
    pub catalog: &'a LocationCatalog,
    pub is_focused: bool,
    /// Current spinner frame
    pub spinner: &'a str,
}

#[derive(Default)]
pub struct SearchBar {
    input: SearchInput,
    list: SuggestionList,
    input_area: Option<Rect>,
}

impl SearchBar {
    pub const INPUT_HEIGHT: u16 = 3;

    pub fn new() -> Self {
        Self::default()
    }

    /// Input box from the last render.
    pub fn input_area(&self) -> Option<Rect> {
        self.input_area
    }

    /// Dropdown from the last render, when one was drawn.
    pub fn dropdown_area(&self) -> Option<Rect> {
        self.list.area()
    }

    /// Drop layout from the last render, for frames without a search box.
    pub fn hide(&mut self) {
        self.input_area = None;
        self.list.hide();
    }

    fn key_actions(&mut self, event: &EventKind, props: SearchBarProps<'_>) -> Vec<Action> {
        let EventKind::Key(key) = event else {
            return Vec::new();
        };

        match key.code {
            KeyCode::Esc => vec![Action::SearchBlur],
            KeyCode::Enter => {
                match props.search.selected.filter(|index| self.list.shows_entry(*index)) {
                    Some(index) => vec![Action::SearchPick(index)],
                    None => vec![Action::SearchSubmit],
                }
            }
            KeyCode::Up | KeyCode::Down if self.dropdown_area().is_none() => Vec::new(),
            KeyCode::Down => vec![Action::SearchHighlightNext],
            KeyCode::Up => vec![Action::SearchHighlightPrev],
            _ => {
                let input_props = SearchInputProps {
                    value: &props.search.query,
                    placeholder: PLACEHOLDER,
                    is_focused: true,
                    spinner: None,
                    on_change: Action::SearchQueryChange,
                };
                Component::<Action>::handle_event(&mut self.input, event, input_props)
                    .into_iter()
                    .collect()
            }
        }
    }

    fn mouse_actions(&mut self, event: &EventKind, props: SearchBarProps<'_>) -> Vec<Action> {
        let Some((column, row)) = event.mouse_down_at() else {
            return Vec::new();
        };

        if self
            .input_area
            .is_some_and(|area| rect_contains(area, column, row))
        {
            if props.is_focused && props.search.is_open {
                return Vec::new();
            }
            return vec![Action::SearchFocus];
        }

        let list_props = SuggestionListProps {
            view: props.search.view(props.catalog),
            selected: props.search.selected,
            spinner: props.spinner,
            on_pick: Action::SearchPick,
        };
        Component::<Action>::handle_event(&mut self.list, event, list_props)
            .into_iter()
            .collect()
    }
}

impl Component<Action> for SearchBar {
    type Props<'a> = SearchBarProps<'a>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = Action> {
        match event {
            EventKind::Mouse(_) => self.mouse_actions(event, props),
            EventKind::Key(_) if props.is_focused => self.key_actions(event, props),
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let input_area = Rect {
            height: Self::INPUT_HEIGHT.min(area.height),
            ..area
        };
        self.input_area = Some(input_area);

        let input_props = SearchInputProps {
            value: &props.search.query,
            placeholder: PLACEHOLDER,
            is_focused: props.is_focused,
            spinner: props.search.is_loading.then_some(props.spinner),
            on_change: Action::SearchQueryChange,
        };
        Component::<Action>::render(&mut self.input, frame, input_area, input_props);

        // The dropdown overlays whatever sits below the input
        let view = props.search.view(props.catalog);
        let screen = frame.area();
        let top = input_area.bottom();
        let room = screen.bottom().saturating_sub(top);
        let dropdown_area = Rect {
            x: input_area.x,
            y: top,
            width: input_area.width,
            height: SuggestionList::height(&view).min(room),
        };

        let list_props = SuggestionListProps {
            view,
            selected: props.search.selected,
            spinner: props.spinner,
            on_pick: Action::SearchPick,
        };
        Component::<Action>::render(&mut self.list, frame, dropdown_area, list_props);
    }
}
