//! Where search candidates come from

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use super::catalog::LocationCatalog;
use super::filter::filter_candidates;
use super::suggestion::LocationSuggestion;

/// Default simulated latency of the static source.
pub const DEFAULT_SEARCH_LATENCY: Duration = Duration::from_millis(300);

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("provider returned HTTP {0}")]
    Status(u16),

    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Produces the suggestions for a query.
///
/// Implementations return entries that match `query` (see
/// [`matches_query`](super::matches_query)), recent searches first.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<LocationSuggestion>, SearchError>;

    /// Short name for logs.
    fn name(&self) -> &'static str;
}

/// Filters the static recent and popular lists after a simulated delay.
#[derive(Clone, Debug)]
pub struct StaticCandidates {
    catalog: Arc<LocationCatalog>,
    latency: Duration,
}

impl StaticCandidates {
    pub fn new(catalog: Arc<LocationCatalog>) -> Self {
        Self {
            catalog,
            latency: DEFAULT_SEARCH_LATENCY,
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }
}

#[async_trait]
impl CandidateSource for StaticCandidates {
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<LocationSuggestion>, SearchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        let results = filter_candidates(self.catalog.recent(), self.catalog.popular(), query);
        tracing::debug!(query, count = results.len(), "Static candidates filtered");
        Ok(results)
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_static_source_waits_then_filters() {
        let source = StaticCandidates::new(Arc::new(LocationCatalog::default()));
        let started = tokio::time::Instant::now();

        let results = source.fetch_candidates("Tok").await.unwrap();

        assert!(started.elapsed() >= DEFAULT_SEARCH_LATENCY);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_label(), "Tokyo, Tokyo, Japan");
    }

    #[tokio::test]
    async fn test_static_source_without_latency() {
        let source = StaticCandidates::new(Arc::new(LocationCatalog::default()))
            .with_latency(Duration::ZERO);

        assert!(source.fetch_candidates("zzz").await.unwrap().is_empty());
        assert_eq!(source.name(), "static");
    }
}
