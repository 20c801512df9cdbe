//! The landing page: layout, hit regions and key routing
//!
//! The search bar is drawn last so its dropdown overlays the cards below.
//! While drawn, the input and the dropdown are registered as hit regions; a
//! mouse press that lands in neither blurs the search box.

use crossterm::event::{KeyCode, KeyModifiers};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    Frame,
};
use skyforecast_core::{EventKind, EventOutcome, HitRegions};

use crate::action::Action;
use crate::components::{
    spinner_frame, Component, Footer, FooterProps, ForecastStrip, ForecastStripProps, Header,
    HeaderProps, Hero, SearchBar, SearchBarProps, WeatherCard, WeatherCardProps,
};
use crate::state::AppState;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    SearchInput,
    SearchDropdown,
}

#[derive(Default)]
pub struct Page {
    search: SearchBar,
    regions: HitRegions<Region>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn regions(&self) -> &HitRegions<Region> {
        &self.regions
    }

    fn search_props<'a>(state: &'a AppState) -> SearchBarProps<'a> {
        SearchBarProps {
            search: &state.search,
            catalog: &state.catalog,
            is_focused: state.search_focused,
            spinner: spinner_frame(state.tick_count),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, state: &AppState) {
        let spinner = spinner_frame(state.tick_count);
        let [header, hero, card, forecast, _, footer] = Layout::vertical([
            Constraint::Length(Header::HEIGHT),
            Constraint::Length(Hero::HEIGHT),
            Constraint::Length(WeatherCard::HEIGHT),
            Constraint::Length(ForecastStrip::HEIGHT),
            Constraint::Min(0),
            Constraint::Length(Footer::HEIGHT),
        ])
        .areas(area);

        Header.render(
            frame,
            header,
            HeaderProps {
                place: state.place.as_ref(),
                locating: state.geolocating,
                unit: state.unit,
                spinner,
            },
        );
        Hero.render(frame, hero, ());
        WeatherCard.render(
            frame,
            card,
            WeatherCardProps {
                weather: &state.weather,
                unit: state.unit,
                is_loading: state.weather_loading,
                spinner,
            },
        );
        ForecastStrip.render(
            frame,
            forecast,
            ForecastStripProps {
                days: &state.forecast,
                unit: state.unit,
            },
        );
        Footer.render(
            frame,
            footer,
            FooterProps {
                status: state.status.as_deref(),
                search_focused: state.search_focused,
            },
        );

        let search_area = Hero::layout(hero).search;
        if search_area.height < SearchBar::INPUT_HEIGHT {
            self.search.hide();
            self.regions.deregister(Region::SearchInput);
            self.regions.deregister(Region::SearchDropdown);
            return;
        }

        self.search.render(frame, search_area, Self::search_props(state));
        match self.search.input_area() {
            Some(input) => self.regions.register(Region::SearchInput, input),
            None => self.regions.deregister(Region::SearchInput),
        }
        match self.search.dropdown_area() {
            Some(dropdown) => self.regions.register(Region::SearchDropdown, dropdown),
            None => self.regions.deregister(Region::SearchDropdown),
        }
    }

    pub fn map_event(&mut self, event: &EventKind, state: &AppState) -> EventOutcome<Action> {
        match event {
            EventKind::Resize(..) => EventOutcome::needs_render(),
            EventKind::Scroll { .. } => EventOutcome::ignored(),
            EventKind::Key(key) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
                {
                    return EventOutcome::action(Action::Quit);
                }
                if state.search_focused {
                    return EventOutcome::from_actions(
                        self.search.handle_event(event, Self::search_props(state)),
                    );
                }
                match key.code {
                    KeyCode::Char('q') => Action::Quit.into(),
                    KeyCode::Char('u') => Action::UiToggleUnits.into(),
                    KeyCode::Char('x') => Action::UiDismissNotice.into(),
                    KeyCode::Char('/') | KeyCode::Tab => Action::SearchFocus.into(),
                    _ => EventOutcome::ignored(),
                }
            }
            EventKind::Mouse(_) => {
                let Some((column, row)) = event.mouse_down_at() else {
                    return EventOutcome::ignored();
                };
                match self.regions.hit(column, row) {
                    Some(_) => EventOutcome::from_actions(
                        self.search.handle_event(event, Self::search_props(state)),
                    ),
                    None if state.search_focused || state.search.is_open => {
                        EventOutcome::action(Action::SearchBlur)
                    }
                    None => EventOutcome::ignored(),
                }
            }
        }
    }
}
