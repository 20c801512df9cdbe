//! Location search: suggestions, filtering, candidate sources and the
//! search state machine.

pub mod catalog;
pub mod filter;
pub mod open_meteo;
pub mod source;
pub mod state;
pub mod suggestion;

pub use catalog::{LocationCatalog, POPULAR_BROWSE_LIMIT};
pub use filter::{filter_candidates, is_too_short, matches_query, MIN_QUERY_CHARS};
pub use open_meteo::OpenMeteoCandidates;
pub use source::{CandidateSource, SearchError, StaticCandidates, DEFAULT_SEARCH_LATENCY};
pub use state::{DropdownView, FilterRequest, RequestToken, SearchState};
pub use suggestion::LocationSuggestion;
