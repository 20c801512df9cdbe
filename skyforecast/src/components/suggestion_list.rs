//! Dropdown under the search input

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use skyforecast_core::{rect_contains, Component, EventKind};

use crate::search::{DropdownView, LocationSuggestion};

pub const RECENT_HEADING: &str = "Recent Searches";
pub const POPULAR_HEADING: &str = "Popular Cities";
pub const RESULTS_HEADING: &str = "Search Results";
pub const LOADING_TEXT: &str = "Searching...";
pub const EMPTY_TITLE: &str = "No locations found";
pub const EMPTY_HINT: &str = "Try searching for a different city or location";

const RECENT_ICON: &str = "↺";
const PLACE_ICON: &str = "•";

pub struct SuggestionListProps<'a, A> {
    pub view: DropdownView<'a>,
    pub selected: Option<usize>,
    pub spinner: &'a str,
    pub on_pick: fn(usize) -> A,
}

/// One dropdown line; `entry` is the pick index for rows that hold a location.
pub struct DropdownLine<'a> {
    pub line: Line<'a>,
    pub entry: Option<usize>,
}

/// Lay out the dropdown contents. Empty for views that show nothing.
pub fn dropdown_lines<'a>(
    view: &DropdownView<'a>,
    selected: Option<usize>,
    spinner: &'a str,
) -> Vec<DropdownLine<'a>> {
    let mut lines = Vec::new();
    match *view {
        DropdownView::Hidden | DropdownView::TooShort => {}
        DropdownView::Browse { recent, popular } => {
            let mut index = 0;
            for (heading, items) in [(RECENT_HEADING, recent), (POPULAR_HEADING, popular)] {
                if items.is_empty() {
                    continue;
                }
                lines.push(heading_line(heading));
                for item in items {
                    lines.push(entry_line(item, index, selected));
                    index += 1;
                }
            }
        }
        DropdownView::Loading => lines.push(DropdownLine {
            line: Line::from(vec![
                Span::styled(format!(" {spinner} "), Style::default().fg(Color::Cyan)),
                Span::styled(LOADING_TEXT, Style::default().fg(Color::Gray)),
            ]),
            entry: None,
        }),
        DropdownView::Results(items) => {
            lines.push(heading_line(RESULTS_HEADING));
            for (index, item) in items.iter().enumerate() {
                lines.push(entry_line(item, index, selected));
            }
        }
        DropdownView::Empty { notice } => {
            lines.push(DropdownLine {
                line: Line::from(Span::styled(EMPTY_TITLE, Style::default().bold())).centered(),
                entry: None,
            });
            lines.push(DropdownLine {
                line: Line::from(Span::styled(EMPTY_HINT, Style::default().fg(Color::DarkGray)))
                    .centered(),
                entry: None,
            });
            if let Some(notice) = notice {
                lines.push(DropdownLine {
                    line: Line::from(Span::styled(notice, Style::default().fg(Color::Yellow)))
                        .centered(),
                    entry: None,
                });
            }
        }
    }
    lines
}

/// First line to draw so the selected entry stays in view.
///
/// The view only moves when the selection would leave it. A section heading
/// directly above the selection is pulled in with it when there is room.
fn scroll_offset(
    lines: &[DropdownLine<'_>],
    selected: Option<usize>,
    current: usize,
    height: usize,
) -> usize {
    let Some(target) =
        selected.and_then(|index| lines.iter().position(|line| line.entry == Some(index)))
    else {
        return 0;
    };
    let top = match target.checked_sub(1) {
        Some(above) if height > 1 && lines[above].entry.is_none() => above,
        _ => target,
    };
    let offset = if top < current {
        top
    } else if target >= current + height {
        target + 1 - height
    } else {
        current
    };
    offset.min(lines.len().saturating_sub(height))
}

fn heading_line(heading: &str) -> DropdownLine<'_> {
    DropdownLine {
        line: Line::from(Span::styled(
            format!(" {heading}"),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )),
        entry: None,
    }
}

fn entry_line<'a>(
    item: &'a LocationSuggestion,
    index: usize,
    selected: Option<usize>,
) -> DropdownLine<'a> {
    let icon = if item.is_recent { RECENT_ICON } else { PLACE_ICON };
    let base = if selected == Some(index) {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default()
    };
    DropdownLine {
        line: Line::from(vec![
            Span::styled(format!("  {icon} "), base.fg(Color::Cyan)),
            Span::styled(item.name.as_str(), base.bold()),
            Span::styled(format!("  {}", item.detail()), base.fg(Color::DarkGray)),
        ])
        .style(base),
        entry: Some(index),
    }
}

/// Renders a [`DropdownView`] and maps clicks on rows back to pick indices.
///
/// When the dropdown is cut short by the screen edge it scrolls to keep the
/// highlighted entry on screen.
#[derive(Default)]
pub struct SuggestionList {
    /// Screen row of every pickable line from the last render
    rows: Vec<(u16, usize)>,
    area: Option<Rect>,
    /// Index of the first drawn line
    offset: usize,
}

impl SuggestionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rows needed to show `view`, borders included. Zero when nothing is shown.
    pub fn height(view: &DropdownView<'_>) -> u16 {
        let lines = dropdown_lines(view, None, "").len() as u16;
        if lines == 0 {
            0
        } else {
            lines + 2
        }
    }

    /// Area drawn on the last render, if any.
    pub fn area(&self) -> Option<Rect> {
        self.area
    }

    /// Whether the entry at `index` was on screen after the last render.
    pub fn shows_entry(&self, index: usize) -> bool {
        self.rows.iter().any(|(_, entry)| *entry == index)
    }

    /// Forget the last render, for frames where the list is not drawn at all.
    pub fn hide(&mut self) {
        self.rows.clear();
        self.area = None;
        self.offset = 0;
    }

    /// Pick index under a screen row.
    pub fn entry_at(&self, row: u16) -> Option<usize> {
        self.rows
            .iter()
            .find(|(y, _)| *y == row)
            .map(|(_, index)| *index)
    }
}

impl<A> Component<A> for SuggestionList {
    type Props<'a> = SuggestionListProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        let (Some((column, row)), Some(area)) = (event.mouse_down_at(), self.area) else {
            return None;
        };
        if !rect_contains(area, column, row) {
            return None;
        }
        self.entry_at(row).map(props.on_pick)
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let lines = dropdown_lines(&props.view, props.selected, props.spinner);
        if lines.is_empty() || area.height < 3 {
            self.hide();
            return;
        }
        self.rows.clear();

        frame.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);
        self.area = Some(area);

        let height = inner.height as usize;
        self.offset = scroll_offset(&lines, props.selected, self.offset, height);
        let first = self.offset;
        for (row, dropdown_line) in lines.into_iter().skip(first).take(height).enumerate() {
            let y = inner.y + row as u16;
            if let Some(entry) = dropdown_line.entry {
                self.rows.push((y, entry));
            }
            let row_area = Rect {
                y,
                height: 1,
                ..inner
            };
            frame.render_widget(Paragraph::new(dropdown_line.line), row_area);
        }
    }
}
