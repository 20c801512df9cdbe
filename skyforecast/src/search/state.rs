//! The location search state machine
//!
//! `SearchState` holds the four observable fields (query, suggestions, open,
//! loading) plus the bookkeeping for keyboard highlight and request tokens.
//! Transitions are plain methods; the reducer turns their return values into
//! effects.

use super::catalog::LocationCatalog;
use super::filter::is_too_short;
use super::suggestion::LocationSuggestion;

/// Identifies one filter pass. Only the latest issued token is accepted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub fn value(self) -> u64 {
        self.0
    }
}

/// Work requested by a query change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FilterRequest {
    /// Start a filter pass for `query`, answered with `token`.
    Start { token: RequestToken, query: String },
    /// Drop the pass in flight.
    Cancel,
}

/// What the dropdown should show right now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropdownView<'a> {
    Hidden,
    /// Query has exactly one character: nothing is listed.
    TooShort,
    /// Empty query: the static lists.
    Browse {
        recent: &'a [LocationSuggestion],
        popular: &'a [LocationSuggestion],
    },
    Loading,
    Results(&'a [LocationSuggestion]),
    /// Filter finished with no matches. Carries the fetch failure notice, if any.
    Empty { notice: Option<&'a str> },
}

impl<'a> DropdownView<'a> {
    /// Pickable entries in display order.
    pub fn entries(&self) -> Vec<&'a LocationSuggestion> {
        match *self {
            DropdownView::Browse { recent, popular } => recent.iter().chain(popular).collect(),
            DropdownView::Results(items) => items.iter().collect(),
            _ => Vec::new(),
        }
    }

    pub fn is_visible(&self) -> bool {
        !matches!(self, DropdownView::Hidden | DropdownView::TooShort)
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub suggestions: Vec<LocationSuggestion>,
    pub is_open: bool,
    pub is_loading: bool,
    /// Keyboard highlight over the visible entries.
    pub selected: Option<usize>,
    /// Inline message shown when the last fetch failed.
    pub notice: Option<String>,
    pending: Option<RequestToken>,
    last_token: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token of the filter pass still awaited, if any.
    pub fn pending(&self) -> Option<RequestToken> {
        self.pending
    }

    fn issue_token(&mut self) -> RequestToken {
        self.last_token += 1;
        let token = RequestToken(self.last_token);
        self.pending = Some(token);
        token
    }

    /// Forget the pass in flight. Returns whether there was one.
    fn invalidate(&mut self) -> bool {
        self.is_loading = false;
        self.pending.take().is_some()
    }

    /// The text changed.
    ///
    /// Opens the dropdown. Short queries clear the suggestions without
    /// filtering; longer ones start a new pass that supersedes any earlier one.
    pub fn query_change(&mut self, text: String) -> Option<FilterRequest> {
        self.query = text;
        self.is_open = true;
        self.selected = None;
        self.notice = None;
        self.suggestions.clear();

        if is_too_short(&self.query) {
            return self.invalidate().then_some(FilterRequest::Cancel);
        }

        self.is_loading = true;
        let token = self.issue_token();
        Some(FilterRequest::Start {
            token,
            query: self.query.clone(),
        })
    }

    /// A filter pass finished. Returns `false` when the result is stale.
    pub fn filter_done(&mut self, token: RequestToken, suggestions: Vec<LocationSuggestion>) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(
                token = token.value(),
                pending = ?self.pending.map(RequestToken::value),
                "Dropping stale search result"
            );
            return false;
        }
        self.pending = None;
        self.is_loading = false;
        self.suggestions = suggestions;
        self.selected = None;
        true
    }

    /// A filter pass failed. Suggestions fall back to empty with a notice.
    pub fn filter_failed(&mut self, token: RequestToken, message: &str) -> bool {
        if self.pending != Some(token) {
            tracing::debug!(token = token.value(), "Dropping stale search failure");
            return false;
        }
        self.pending = None;
        self.is_loading = false;
        self.suggestions.clear();
        self.selected = None;
        self.notice = Some(format!("Search unavailable: {message}"));
        true
    }

    /// Submit the typed text. Returns the trimmed query, or `None` when blank.
    pub fn submit(&mut self) -> Option<String> {
        let trimmed = self.query.trim();
        if trimmed.is_empty() {
            return None;
        }
        let label = trimmed.to_string();
        self.is_open = false;
        self.selected = None;
        Some(label)
    }

    /// Pick an entry. Returns its display label.
    pub fn pick(&mut self, item: &LocationSuggestion) -> String {
        let label = item.display_label();
        self.query = label.clone();
        self.is_open = false;
        self.selected = None;
        self.notice = None;
        self.suggestions.clear();
        self.invalidate();
        label
    }

    /// Pick the `index`-th visible entry. `None` when nothing is there.
    pub fn pick_visible(&mut self, index: usize, catalog: &LocationCatalog) -> Option<String> {
        let item = self.view(catalog).entries().get(index).map(|item| (*item).clone())?;
        Some(self.pick(&item))
    }

    /// Input gained focus.
    pub fn focus(&mut self) -> bool {
        let changed = !self.is_open;
        self.is_open = true;
        changed
    }

    /// Interaction happened outside the search box.
    pub fn blur_outside(&mut self) -> bool {
        let changed = self.is_open || self.selected.is_some();
        self.is_open = false;
        self.selected = None;
        changed
    }

    /// Move the keyboard highlight by `delta`, clamped to the visible entries.
    pub fn move_highlight(&mut self, delta: isize, catalog: &LocationCatalog) -> bool {
        let count = self.view(catalog).entries().len();
        if count == 0 {
            return false;
        }
        let last = count - 1;
        let next = match self.selected {
            None if delta > 0 => 0,
            None => last,
            Some(current) => current.saturating_add_signed(delta).min(last),
        };
        let changed = self.selected != Some(next);
        self.selected = Some(next);
        changed
    }

    pub fn view<'a>(&'a self, catalog: &'a LocationCatalog) -> DropdownView<'a> {
        if !self.is_open {
            DropdownView::Hidden
        } else if self.query.is_empty() {
            DropdownView::Browse {
                recent: catalog.recent(),
                popular: catalog.browse_popular(),
            }
        } else if is_too_short(&self.query) {
            DropdownView::TooShort
        } else if self.is_loading {
            DropdownView::Loading
        } else if self.suggestions.is_empty() {
            DropdownView::Empty {
                notice: self.notice.as_deref(),
            }
        } else {
            DropdownView::Results(&self.suggestions)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::filter::filter_candidates;

    fn catalog() -> LocationCatalog {
        LocationCatalog::default()
    }

    fn start_token(request: Option<FilterRequest>) -> RequestToken {
        match request {
            Some(FilterRequest::Start { token, .. }) => token,
            other => panic!("Expected a filter pass, got {:?}", other),
        }
    }

    fn run_filter(query: &str) -> Vec<LocationSuggestion> {
        let catalog = catalog();
        filter_candidates(catalog.recent(), catalog.popular(), query)
    }

    #[test]
    fn test_empty_query_browses_static_lists() {
        let mut state = SearchState::new();
        let catalog = catalog();

        assert!(state.focus());
        match state.view(&catalog) {
            DropdownView::Browse { recent, popular } => {
                assert_eq!(recent.len(), 3);
                assert_eq!(popular.len(), 5);
            }
            other => panic!("Expected Browse, got {:?}", other),
        }
        assert_eq!(state.view(&catalog).entries().len(), 8);
    }

    #[test]
    fn test_one_char_is_too_short() {
        let mut state = SearchState::new();

        assert_eq!(state.query_change("L".into()), None);
        assert!(state.suggestions.is_empty());
        assert!(!state.is_loading);
        assert!(state.is_open);
        assert_eq!(state.view(&catalog()), DropdownView::TooShort);
        assert!(!state.view(&catalog()).is_visible());
    }

    #[test]
    fn test_shrinking_to_one_char_cancels_pending_pass() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("Lo".into()));

        assert_eq!(state.query_change("L".into()), Some(FilterRequest::Cancel));
        assert!(state.pending().is_none());
        assert!(!state.filter_done(token, run_filter("Lo")));
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_loading_hides_suggestions() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("Tok".into()));
        assert!(state.filter_done(token, run_filter("Tok")));
        assert_eq!(state.suggestions.len(), 1);

        start_token(state.query_change("Toky".into()));
        assert!(state.is_loading);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.view(&catalog()), DropdownView::Loading);
    }

    #[test]
    fn test_stale_result_is_dropped() {
        let mut state = SearchState::new();
        let lo = start_token(state.query_change("Lo".into()));
        let lon = start_token(state.query_change("Lon".into()));
        assert!(lon > lo);

        // Newer answers first, older arrives late
        assert!(state.filter_done(lon, run_filter("Lon")));
        assert!(!state.filter_done(lo, run_filter("Lo")));

        let names: Vec<_> = state.suggestions.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["London"]);
        assert!(!state.is_loading);
    }

    #[test]
    fn test_failure_sets_notice_and_empties() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("Lon".into()));

        assert!(state.filter_failed(token, "provider returned HTTP 503"));
        assert!(state.suggestions.is_empty());
        assert!(!state.is_loading);
        assert_eq!(
            state.view(&catalog()),
            DropdownView::Empty {
                notice: Some("Search unavailable: provider returned HTTP 503")
            }
        );

        // Still interactive
        assert!(matches!(
            state.query_change("Lond".into()),
            Some(FilterRequest::Start { .. })
        ));
        assert!(state.notice.is_none());
    }

    #[test]
    fn test_submit_trims_and_closes() {
        let mut state = SearchState::new();
        state.query_change("  Berlin ".into());

        assert_eq!(state.submit(), Some("Berlin".to_string()));
        assert!(!state.is_open);
    }

    #[test]
    fn test_submit_blank_is_noop() {
        let mut state = SearchState::new();
        state.query_change("   ".into());
        state.is_open = true;

        assert_eq!(state.submit(), None);
        assert!(state.is_open);

        let mut empty = SearchState::new();
        assert_eq!(empty.submit(), None);
    }

    #[test]
    fn test_pick_sets_query_and_closes() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("Tok".into()));
        state.filter_done(token, run_filter("Tok"));

        let label = state.pick_visible(0, &catalog());

        assert_eq!(label.as_deref(), Some("Tokyo, Tokyo, Japan"));
        assert_eq!(state.query, "Tokyo, Tokyo, Japan");
        assert!(!state.is_open);
        assert_eq!(state.view(&catalog()), DropdownView::Hidden);
    }

    #[test]
    fn test_pick_invalidates_pending_pass() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("Lon".into()));

        let london = LocationSuggestion::new("3", "London", "England", "UK");
        state.pick(&london);

        assert!(!state.filter_done(token, run_filter("Lon")));
        assert!(state.suggestions.is_empty());
    }

    #[test]
    fn test_pick_out_of_range() {
        let mut state = SearchState::new();
        state.focus();
        assert_eq!(state.pick_visible(42, &catalog()), None);
        assert!(state.is_open);
    }

    #[test]
    fn test_browse_pick_uses_recent_then_popular_order() {
        let mut state = SearchState::new();
        state.focus();

        assert_eq!(
            state.pick_visible(3, &catalog()).as_deref(),
            Some("Tokyo, Tokyo, Japan")
        );
    }

    #[test]
    fn test_blur_outside_only_closes() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("Tok".into()));
        state.filter_done(token, run_filter("Tok"));

        assert!(state.blur_outside());
        assert!(!state.is_open);
        assert_eq!(state.query, "Tok");
        assert_eq!(state.suggestions.len(), 1);
        assert!(!state.blur_outside());
    }

    #[test]
    fn test_move_highlight_clamps() {
        let mut state = SearchState::new();
        let catalog = catalog();
        state.focus();

        assert!(state.move_highlight(1, &catalog));
        assert_eq!(state.selected, Some(0));
        assert!(!state.move_highlight(-1, &catalog));
        for _ in 0..20 {
            state.move_highlight(1, &catalog);
        }
        assert_eq!(state.selected, Some(7));

        let mut fresh = SearchState::new();
        fresh.focus();
        fresh.move_highlight(-1, &catalog);
        assert_eq!(fresh.selected, Some(7));
    }

    #[test]
    fn test_move_highlight_without_entries() {
        let mut state = SearchState::new();
        state.query_change("zzz".into());
        assert!(!state.move_highlight(1, &catalog()));
        assert_eq!(state.selected, None);
    }

    #[test]
    fn test_no_matches_is_empty_state() {
        let mut state = SearchState::new();
        let token = start_token(state.query_change("zzz".into()));
        assert!(state.filter_done(token, run_filter("zzz")));

        assert_eq!(state.view(&catalog()), DropdownView::Empty { notice: None });
    }
}
