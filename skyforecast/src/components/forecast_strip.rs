use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Component;
use crate::action::Action;
use crate::weather::{ForecastDay, TempUnit};

pub const TITLE: &str = "5-Day Weather Forecast";

pub struct ForecastStripProps<'a> {
    pub days: &'a [ForecastDay],
    pub unit: TempUnit,
}

pub struct ForecastStrip;

impl ForecastStrip {
    pub const HEIGHT: u16 = 5;
}

impl Component<Action> for ForecastStrip {
    type Props<'a> = ForecastStripProps<'a>;

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(80, 80, 100)))
            .title(format!(" {TITLE} "))
            .title_style(Style::default().fg(Color::Cyan).bold())
            .title_alignment(Alignment::Center);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if props.days.is_empty() {
            return;
        }

        let count = props.days.len() as u32;
        let columns = Layout::horizontal(
            (0..count).map(|_| Constraint::Ratio(1, count)),
        )
        .split(inner);

        for (day, column) in props.days.iter().zip(columns.iter()) {
            let lines = vec![
                Line::from(Span::styled(day.day.as_str(), Style::default().fg(Color::White).bold()))
                    .centered(),
                Line::from(vec![
                    Span::styled(
                        format!("{} ", day.condition.glyph()),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(day.condition.label(), Style::default().fg(Color::Gray)),
                ])
                .centered(),
                Line::from(vec![
                    Span::styled(
                        props.unit.format_short(day.high),
                        Style::default().fg(Color::White).bold(),
                    ),
                    Span::styled(" / ", Style::default().fg(Color::DarkGray)),
                    Span::styled(
                        props.unit.format_short(day.low),
                        Style::default().fg(Color::DarkGray),
                    ),
                ])
                .centered(),
            ];
            frame.render_widget(Paragraph::new(lines), *column);
        }
    }
}
