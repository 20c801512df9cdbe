use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use super::Component;
use crate::action::Action;

pub const HEADLINE: (&str, &str) = ("Your Weather, ", "Perfectly Forecast");
pub const TAGLINE: &str = "Get precise weather forecasts, real-time conditions, and severe weather alerts for any location worldwide.";
pub const STATS: [(&str, &str); 3] = [
    ("99.9%", "Accuracy Rate"),
    ("10M+", "Daily Users"),
    ("24/7", "Live Updates"),
];

const SEARCH_MAX_WIDTH: u16 = 64;

/// Where each hero part goes. The search bar is drawn by the page, last, so
/// its dropdown overlays the content below.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HeroLayout {
    pub headline: Rect,
    pub tagline: Rect,
    pub search: Rect,
    pub stats: Rect,
}

pub struct Hero;

impl Hero {
    pub const HEIGHT: u16 = 9;

    pub fn layout(area: Rect) -> HeroLayout {
        let [_, headline, tagline, _, search_row, _, stats] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let width = search_row.width.min(SEARCH_MAX_WIDTH);
        let search = Rect {
            x: search_row.x + (search_row.width - width) / 2,
            width,
            ..search_row
        };

        HeroLayout {
            headline,
            tagline,
            search,
            stats,
        }
    }
}

impl Component<Action> for Hero {
    type Props<'a> = ();

    fn render(&mut self, frame: &mut Frame, area: Rect, _props: Self::Props<'_>) {
        let layout = Self::layout(area);

        let headline = Line::from(vec![
            Span::styled(HEADLINE.0, Style::default().fg(Color::White).bold()),
            Span::styled(HEADLINE.1, Style::default().fg(Color::LightRed).bold()),
        ])
        .centered();
        frame.render_widget(Paragraph::new(headline), layout.headline);

        let tagline = Line::from(Span::styled(TAGLINE, Style::default().fg(Color::Gray))).centered();
        frame.render_widget(Paragraph::new(tagline), layout.tagline);

        let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(layout.stats);
        for ((value, label), column) in STATS.iter().zip(columns.iter()) {
            let stat = Line::from(vec![
                Span::styled(*value, Style::default().fg(Color::Cyan).bold()),
                Span::styled(format!(" {label}"), Style::default().fg(Color::DarkGray)),
            ])
            .centered();
            frame.render_widget(Paragraph::new(stat), *column);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyforecast_core::testing::RenderHarness;

    #[test]
    fn test_layout_centers_search() {
        let layout = Hero::layout(Rect::new(0, 3, 100, Hero::HEIGHT));
        assert_eq!(layout.search, Rect::new(18, 7, 64, 3));
        assert_eq!(layout.stats.y, 11);
    }

    #[test]
    fn test_render_stats() {
        let mut render = RenderHarness::new(120, Hero::HEIGHT);
        let output = render.render_to_string_plain(|frame| Hero.render(frame, frame.area(), ()));

        assert!(output.contains("Your Weather, Perfectly Forecast"));
        assert!(output.contains("99.9% Accuracy Rate"));
        assert!(output.contains("10M+ Daily Users"));
        assert!(output.contains("24/7 Live Updates"));
    }
}
