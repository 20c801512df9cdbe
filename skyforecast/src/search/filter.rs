//! Candidate filtering
//!
//! Results are ordered recent-first, then the remaining candidates, each group
//! in source order. An id seen earlier wins over later duplicates.

use std::collections::HashSet;

use super::suggestion::LocationSuggestion;

/// Queries shorter than this (in characters) are not filtered.
pub const MIN_QUERY_CHARS: usize = 2;

/// Whether the query is too short to filter. Counts characters, not bytes.
pub fn is_too_short(query: &str) -> bool {
    query.chars().count() < MIN_QUERY_CHARS
}

/// Case-insensitive substring match against name, region or country.
pub fn matches_query(item: &LocationSuggestion, query: &str) -> bool {
    item.matches_lowercase(&query.to_lowercase())
}

/// Filter `recent` and `others` against `query` and merge them.
pub fn filter_candidates(
    recent: &[LocationSuggestion],
    others: &[LocationSuggestion],
    query: &str,
) -> Vec<LocationSuggestion> {
    let needle = query.to_lowercase();
    merge_recent_first(
        recent
            .iter()
            .filter(|item| item.matches_lowercase(&needle))
            .cloned(),
        others
            .iter()
            .filter(|item| item.matches_lowercase(&needle))
            .cloned(),
    )
}

/// Concatenate recent entries then others, dropping repeated ids.
pub fn merge_recent_first(
    recent: impl IntoIterator<Item = LocationSuggestion>,
    others: impl IntoIterator<Item = LocationSuggestion>,
) -> Vec<LocationSuggestion> {
    let mut seen = HashSet::new();
    recent
        .into_iter()
        .map(LocationSuggestion::recent)
        .chain(others)
        .filter(|item| seen.insert(item.id.clone()))
        .collect()
}
