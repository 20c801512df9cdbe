//! Whole-page snapshots through the test backend.

use skyforecast::components::header::BRAND;
use skyforecast::components::search_bar::PLACEHOLDER;
use skyforecast::components::{footer, hero, suggestion_list, weather_card};
use skyforecast::reducer::reducer;
use skyforecast::search::RequestToken;
use skyforecast::{Action, AppState, Page};
use skyforecast_core::testing::RenderHarness;

fn draw(state: &AppState) -> String {
    let mut page = Page::new();
    let mut render = RenderHarness::new(100, 36);
    render.render_to_string_plain(|frame| page.render(frame, frame.area(), state))
}

#[test]
fn test_default_page() {
    let output = draw(&AppState::default());

    assert!(output.contains(BRAND));
    assert!(output.contains(hero::HEADLINE.1));
    assert!(output.contains(PLACEHOLDER));
    assert!(output.contains(weather_card::TITLE));
    assert!(output.contains("New York, NY"));
    assert!(output.contains(footer::COPYRIGHT));
    // Dropdown stays closed until the box is focused
    assert!(!output.contains(suggestion_list::RECENT_HEADING));
}

#[test]
fn test_focused_empty_box_browses() {
    let mut state = AppState::default();
    reducer(&mut state, Action::SearchFocus);
    let output = draw(&state);

    assert!(output.contains(suggestion_list::RECENT_HEADING));
    assert!(output.contains(suggestion_list::POPULAR_HEADING));
    assert!(output.contains("Los Angeles"));
}

#[test]
fn test_searching_then_results() {
    let mut state = AppState::default();
    reducer(&mut state, Action::SearchQueryChange("Tok".into()));
    assert!(draw(&state).contains(suggestion_list::LOADING_TEXT));

    let token = state.search.pending().expect("filter pass in flight");
    let tokyo = state
        .catalog
        .popular()
        .iter()
        .find(|item| item.name == "Tokyo")
        .cloned()
        .expect("Tokyo is a popular city");
    reducer(
        &mut state,
        Action::SearchDidLoad {
            token,
            suggestions: vec![tokyo],
        },
    );

    let output = draw(&state);
    assert!(output.contains(suggestion_list::RESULTS_HEADING));
    assert!(output.contains("Tokyo"));
    assert!(!output.contains(suggestion_list::LOADING_TEXT));
}

#[test]
fn test_no_results_message() {
    let mut state = AppState::default();
    reducer(&mut state, Action::SearchQueryChange("zzz".into()));
    let token: RequestToken = state.search.pending().expect("filter pass in flight");
    reducer(
        &mut state,
        Action::SearchDidLoad {
            token,
            suggestions: Vec::new(),
        },
    );

    let output = draw(&state);
    assert!(output.contains(suggestion_list::EMPTY_TITLE));
    assert!(output.contains(suggestion_list::EMPTY_HINT));
}

#[test]
fn test_weather_loading_card() {
    let mut state = AppState::default();
    reducer(&mut state, Action::LocationSelect("Paris, Île-de-France, France".into()));

    let output = draw(&state);
    assert!(output.contains(weather_card::LOADING_TEXT));
}

#[test]
fn test_status_line_replaces_copyright() {
    let mut state = AppState::default();
    reducer(&mut state, Action::GeolocateDidError("timed out".into()));

    let output = draw(&state);
    assert!(output.contains("Location unavailable: timed out"));
    assert!(!output.contains(footer::COPYRIGHT));

    reducer(&mut state, Action::UiDismissNotice);
    assert!(draw(&state).contains(footer::COPYRIGHT));
}

#[test]
fn test_celsius_toggle() {
    let mut state = AppState::default();
    reducer(&mut state, Action::UiToggleUnits);

    let output = draw(&state);
    assert!(output.contains("°C"));
}
