use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;

pub const QUICK_LINKS: [&str; 5] = [
    "Current Weather",
    "7-Day Forecast",
    "Weather Radar",
    "Weather Alerts",
    "Historical Data",
];
pub const CONTACT_EMAIL: &str = "support@skyforecast.com";
pub const CONTACT_PHONE: &str = "1-800-WEATHER";
pub const COPYRIGHT: &str = "© SkyForecast. All rights reserved.";

pub struct FooterProps<'a> {
    /// Status notice (geolocation failure), shown instead of the copyright
    pub status: Option<&'a str>,
    pub search_focused: bool,
}

pub struct Footer;

impl Footer {
    pub const HEIGHT: u16 = 5;
}

fn key_hints(hints: &[(&'static str, &'static str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, label) in hints {
        spans.push(Span::styled(format!(" {key}"), Style::default().fg(Color::Cyan).bold()));
        spans.push(Span::styled(format!(" {label} "), Style::default().fg(Color::DarkGray)));
    }
    Line::from(spans).centered()
}

impl Component<Action> for Footer {
    type Props<'a> = FooterProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [links, contact, help, status] = Layout::vertical([Constraint::Length(1); 4]).areas(inner);

        let mut link_spans = vec![Span::styled("Quick Links: ", Style::default().fg(Color::White).bold())];
        for (i, link) in QUICK_LINKS.iter().enumerate() {
            if i > 0 {
                link_spans.push(Span::styled(" · ", Style::default().fg(Color::DarkGray)));
            }
            link_spans.push(Span::styled(*link, Style::default().fg(Color::Gray)));
        }
        frame.render_widget(Paragraph::new(Line::from(link_spans).centered()), links);

        let contact_line = Line::from(vec![
            Span::styled("✉ ", Style::default().fg(Color::Cyan)),
            Span::styled(CONTACT_EMAIL, Style::default().fg(Color::Gray)),
            Span::styled("   ☎ ", Style::default().fg(Color::Cyan)),
            Span::styled(CONTACT_PHONE, Style::default().fg(Color::Gray)),
        ])
        .centered();
        frame.render_widget(Paragraph::new(contact_line), contact);

        let hints = if props.search_focused {
            key_hints(&[("↑↓", "move"), ("enter", "select"), ("esc", "close"), ("ctrl+c", "quit")])
        } else {
            key_hints(&[("/", "search"), ("u", "units"), ("x", "dismiss"), ("q", "quit")])
        };
        frame.render_widget(Paragraph::new(hints), help);

        let status_line = match props.status {
            Some(message) => Line::from(Span::styled(message, Style::default().fg(Color::Yellow))),
            None => Line::from(Span::styled(COPYRIGHT, Style::default().fg(Color::DarkGray))),
        };
        frame.render_widget(Paragraph::new(status_line.centered()), status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyforecast_core::testing::RenderHarness;

    fn render(props: FooterProps<'_>) -> String {
        let mut render = RenderHarness::new(110, Footer::HEIGHT);
        render.render_to_string_plain(|frame| Footer.render(frame, frame.area(), props))
    }

    #[test]
    fn test_render_contact_and_hints() {
        let output = render(FooterProps {
            status: None,
            search_focused: false,
        });

        assert!(output.contains("Historical Data"));
        assert!(output.contains(CONTACT_EMAIL));
        assert!(output.contains(CONTACT_PHONE));
        assert!(output.contains("/ search"));
        assert!(output.contains(COPYRIGHT));
    }

    #[test]
    fn test_status_replaces_copyright() {
        let output = render(FooterProps {
            status: Some("Location unavailable: timed out"),
            search_focused: true,
        });

        assert!(output.contains("Location unavailable: timed out"));
        assert!(!output.contains(COPYRIGHT));
        assert!(output.contains("esc close"));
    }
}
