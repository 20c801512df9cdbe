//! Current conditions card

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::weather::{CurrentWeather, TempUnit};

pub const TITLE: &str = "Current Weather Conditions";
pub const LOADING_TEXT: &str = "Loading weather data...";

pub struct WeatherCardProps<'a> {
    pub weather: &'a CurrentWeather,
    pub unit: TempUnit,
    pub is_loading: bool,
    pub spinner: &'a str,
}

pub struct WeatherCard;

impl WeatherCard {
    pub const HEIGHT: u16 = 10;
}

/// Label/value pairs of the details grid, in display order.
pub fn detail_cells(weather: &CurrentWeather) -> [(&'static str, String); 6] {
    [
        ("Humidity", format!("{}%", weather.humidity)),
        ("Wind Speed", format!("{} mph", weather.wind_speed)),
        ("Visibility", format!("{} mi", weather.visibility)),
        ("UV Index", weather.uv_index.to_string()),
        ("Pressure", format!("{:.2} inHg", weather.pressure)),
        ("Cloud Cover", format!("{}%", weather.cloud_cover)),
    ]
}

impl Component<Action> for WeatherCard {
    type Props<'a> = WeatherCardProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" {TITLE} "))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.is_loading {
            let [_, row, _] = Layout::vertical([
                Constraint::Fill(1),
                Constraint::Length(1),
                Constraint::Fill(1),
            ])
            .areas(inner);
            let line = Line::from(vec![
                Span::styled(format!("{} ", props.spinner), Style::default().fg(Color::Cyan)),
                Span::styled(LOADING_TEXT, Style::default().fg(Color::Gray)),
            ])
            .centered();
            frame.render_widget(Paragraph::new(line), row);
            return;
        }

        let weather = props.weather;
        let [location, summary, feels, _, grid] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .areas(inner);

        let location_line = Line::from(Span::styled(
            weather.location.as_str(),
            Style::default().fg(Color::White).bold(),
        ))
        .centered();
        frame.render_widget(Paragraph::new(location_line), location);

        let summary_line = Line::from(vec![
            Span::styled(
                format!("{}  ", weather.condition.glyph()),
                Style::default().fg(Color::Yellow),
            ),
            Span::styled(
                props.unit.format(weather.temperature),
                Style::default().fg(Color::White).bold(),
            ),
            Span::styled(
                format!("  {}", weather.condition.label()),
                Style::default().fg(Color::Gray),
            ),
        ])
        .centered();
        frame.render_widget(Paragraph::new(summary_line), summary);

        let feels_line = Line::from(Span::styled(
            format!("Feels like {}", props.unit.format_short(weather.feels_like)),
            Style::default().fg(Color::DarkGray),
        ))
        .centered();
        frame.render_widget(Paragraph::new(feels_line), feels);

        let rows = Layout::vertical([Constraint::Length(2); 2]).split(grid);
        let cells = detail_cells(weather);
        for (row_area, row_cells) in rows.iter().zip(cells.chunks(3)) {
            let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(*row_area);
            for (column, (label, value)) in columns.iter().zip(row_cells) {
                let text = vec![
                    Line::from(Span::styled(*label, Style::default().fg(Color::DarkGray))).centered(),
                    Line::from(Span::styled(value.as_str(), Style::default().fg(Color::White).bold()))
                        .centered(),
                ];
                frame.render_widget(Paragraph::new(text), *column);
            }
        }
    }
}
