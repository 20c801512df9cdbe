//! Open-Meteo geocoding as a candidate source
//!
//! Recent searches are still listed first. Provider results that do not
//! contain the query in name, region or country are dropped, since the
//! geocoder also matches on alternate spellings.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use super::catalog::LocationCatalog;
use super::filter::{filter_candidates, matches_query, merge_recent_first};
use super::source::{CandidateSource, SearchError};
use super::suggestion::LocationSuggestion;

pub const DEFAULT_BASE_URL: &str = "https://geocoding-api.open-meteo.com/v1";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const RESULT_COUNT: u8 = 8;

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    #[serde(default)]
    results: Vec<GeocodingResult>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    id: u64,
    name: String,
    admin1: Option<String>,
    country: Option<String>,
}

impl From<GeocodingResult> for LocationSuggestion {
    fn from(result: GeocodingResult) -> Self {
        LocationSuggestion::new(
            format!("om-{}", result.id),
            result.name,
            result.admin1.unwrap_or_default(),
            result.country.unwrap_or_default(),
        )
    }
}

/// Parse a geocoding response body into suggestions matching `query`.
pub fn parse_response(body: &str, query: &str) -> Result<Vec<LocationSuggestion>, SearchError> {
    let response: GeocodingResponse = serde_json::from_str(body)?;
    Ok(response
        .results
        .into_iter()
        .map(LocationSuggestion::from)
        .filter(|item| matches_query(item, query))
        .collect())
}

pub struct OpenMeteoCandidates {
    client: Client,
    base_url: String,
    catalog: Arc<LocationCatalog>,
}

impl OpenMeteoCandidates {
    pub fn new(catalog: Arc<LocationCatalog>) -> Result<Self, SearchError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("skyforecast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            catalog,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?name={}&count={}&language=en&format=json",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(query.trim()),
            RESULT_COUNT
        )
    }
}

#[async_trait]
impl CandidateSource for OpenMeteoCandidates {
    async fn fetch_candidates(&self, query: &str) -> Result<Vec<LocationSuggestion>, SearchError> {
        let url = self.search_url(query);
        tracing::debug!(%url, "Querying geocoding provider");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        let provider = parse_response(&body, query)?;

        let recent = filter_candidates(self.catalog.recent(), &[], query);
        Ok(merge_recent_first(recent, provider))
    }

    fn name(&self) -> &'static str {
        "open-meteo"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LONDON_BODY: &str = r#"{
        "results": [
            {"id": 2643743, "name": "London", "latitude": 51.5, "longitude": -0.12,
             "admin1": "England", "country": "United Kingdom"},
            {"id": 6058560, "name": "London", "latitude": 42.98, "longitude": -81.23,
             "admin1": "Ontario", "country": "Canada"},
            {"id": 2, "name": "Westminster", "latitude": 51.5, "longitude": -0.13,
             "admin1": "England", "country": "United Kingdom"},
            {"id": 1, "name": "Londres", "latitude": 0.0, "longitude": 0.0}
        ],
        "generationtime_ms": 0.5
    }"#;

    #[test]
    fn test_parse_response_maps_and_filters() {
        let results = parse_response(LONDON_BODY, "Lon").unwrap();

        let names: Vec<_> = results.iter().map(|item| item.name.as_str()).collect();
        // Westminster came back from the geocoder but does not contain "lon"
        assert_eq!(names, vec!["London", "London", "Londres"]);
        assert_eq!(results[0].id, "om-2643743");
        assert_eq!(results[0].display_label(), "London, England, United Kingdom");
        assert_eq!(results[1].region, "Ontario");
    }

    #[test]
    fn test_missing_admin_and_country_coalesce() {
        let results = parse_response(LONDON_BODY, "Londres").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].display_label(), "Londres, , ");
    }

    #[test]
    fn test_no_results_field() {
        let results = parse_response(r#"{"generationtime_ms": 0.3}"#, "zzz").unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_malformed_body_is_decode_error() {
        let err = parse_response("<html>", "Lon").unwrap_err();
        assert!(matches!(err, SearchError::Decode(_)));
    }

    #[test]
    fn test_search_url_encodes_query() {
        let source = OpenMeteoCandidates::new(Arc::new(LocationCatalog::default()))
            .unwrap()
            .with_base_url("http://localhost:1/v1/");

        assert_eq!(
            source.search_url(" São Paulo "),
            "http://localhost:1/v1/search?name=S%C3%A3o%20Paulo&count=8&language=en&format=json"
        );
    }
}
