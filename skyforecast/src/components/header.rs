use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::geolocate::GeoPlace;
use crate::weather::TempUnit;

pub const BRAND: &str = "SkyForecast";
pub const BRAND_TAGLINE: &str = "Weather Intelligence";
pub const NAV_ITEMS: [&str; 4] = ["Home", "7-Day Forecast", "Weather Radar", "Alerts"];

/// Quick weather shown until a place is geolocated
const QUICK_CITY: &str = "New York";
const QUICK_TEMP_F: i32 = 72;

pub struct HeaderProps<'a> {
    pub place: Option<&'a GeoPlace>,
    pub locating: bool,
    pub unit: TempUnit,
    pub spinner: &'a str,
}

pub struct Header;

impl Header {
    pub const HEIGHT: u16 = 2;
}

impl Component<Action> for Header {
    type Props<'a> = HeaderProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [brand_area, nav_area, quick_area] = Layout::horizontal([
            Constraint::Length(36),
            Constraint::Min(0),
            Constraint::Length(30),
        ])
        .areas(inner);

        let brand = Line::from(vec![
            Span::styled(" ☀ ", Style::default().fg(Color::Yellow)),
            Span::styled(BRAND, Style::default().fg(Color::Cyan).bold()),
            Span::styled(format!("  {BRAND_TAGLINE}"), Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(Paragraph::new(brand), brand_area);

        let mut nav = Vec::with_capacity(NAV_ITEMS.len() * 2);
        for (i, item) in NAV_ITEMS.iter().enumerate() {
            if i > 0 {
                nav.push(Span::styled("  ·  ", Style::default().fg(Color::DarkGray)));
            }
            nav.push(Span::styled(*item, Style::default().fg(Color::White)));
        }
        frame.render_widget(Paragraph::new(Line::from(nav).centered()), nav_area);

        let quick = match (props.place, props.locating) {
            (Some(place), _) => Line::from(vec![
                Span::styled("⌖ ", Style::default().fg(Color::LightRed)),
                Span::styled(place.to_string(), Style::default().fg(Color::White)),
            ]),
            (None, true) => Line::from(vec![
                Span::styled(format!("{} ", props.spinner), Style::default().fg(Color::Cyan)),
                Span::styled("Locating...", Style::default().fg(Color::DarkGray)),
            ]),
            (None, false) => Line::from(vec![
                Span::styled("⌖ ", Style::default().fg(Color::LightRed)),
                Span::styled(QUICK_CITY, Style::default().fg(Color::White)),
                Span::styled(
                    format!("  {} ", props.unit.format(QUICK_TEMP_F)),
                    Style::default().fg(Color::Yellow).bold(),
                ),
            ]),
        };
        frame.render_widget(Paragraph::new(quick.right_aligned()), quick_area);
    }
}
