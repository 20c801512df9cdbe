//! Reverse geocoding through Nominatim (OpenStreetMap)
//!
//! Turns `--lat/--lon` into a "City, Country" line for the header.

use std::fmt;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org/reverse";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const UNKNOWN_CITY: &str = "Unknown city";
const UNKNOWN_COUNTRY: &str = "Unknown country";

#[derive(Debug, Error)]
pub enum GeolocateError {
    #[error("coordinates out of range: {lat}, {lon}")]
    InvalidCoordinates { lat: f64, lon: f64 },

    #[error("location lookup failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("location lookup returned HTTP {0}")]
    Status(u16),

    #[error("unexpected location response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Clone, Debug, PartialEq)]
pub struct GeoPlace {
    pub latitude: f64,
    pub longitude: f64,
    pub city: String,
    pub country: String,
}

impl fmt::Display for GeoPlace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.city, self.country)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Address,
}

#[derive(Debug, Default, Deserialize)]
struct Address {
    city: Option<String>,
    town: Option<String>,
    village: Option<String>,
    country: Option<String>,
}

/// Parse a reverse-geocoding body, falling back city → town → village.
pub fn parse_reverse(body: &str, lat: f64, lon: f64) -> Result<GeoPlace, GeolocateError> {
    let response: ReverseResponse = serde_json::from_str(body)?;
    let address = response.address;
    let city = address
        .city
        .or(address.town)
        .or(address.village)
        .unwrap_or_else(|| UNKNOWN_CITY.to_string());
    let country = address
        .country
        .unwrap_or_else(|| UNKNOWN_COUNTRY.to_string());

    Ok(GeoPlace {
        latitude: lat,
        longitude: lon,
        city,
        country,
    })
}

#[derive(Clone, Debug)]
pub struct NominatimClient {
    client: Client,
    base_url: String,
}

impl NominatimClient {
    pub fn new() -> Result<Self, GeolocateError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("skyforecast/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            client,
            base_url: NOMINATIM_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn reverse_url(&self, lat: f64, lon: f64) -> String {
        format!(
            "{}?format=json&lat={}&lon={}&zoom=10&accept-language=en",
            self.base_url, lat, lon
        )
    }

    pub async fn reverse(&self, lat: f64, lon: f64) -> Result<GeoPlace, GeolocateError> {
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
            return Err(GeolocateError::InvalidCoordinates { lat, lon });
        }

        let url = self.reverse_url(lat, lon);
        tracing::debug!(%url, "Reverse geocoding");

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeolocateError::Status(status.as_u16()));
        }
        let body = response.text().await?;
        parse_reverse(&body, lat, lon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_city() {
        let body = r#"{"address": {"city": "Berlin", "country": "Germany"}}"#;
        let place = parse_reverse(body, 52.52, 13.4).unwrap();
        assert_eq!(place.to_string(), "Berlin, Germany");
    }

    #[test]
    fn test_parse_falls_back_to_town_then_village() {
        let town = r#"{"address": {"town": "Hallstatt", "village": "X", "country": "Austria"}}"#;
        assert_eq!(parse_reverse(town, 0.0, 0.0).unwrap().city, "Hallstatt");

        let village = r#"{"address": {"village": "Giethoorn", "country": "Netherlands"}}"#;
        assert_eq!(parse_reverse(village, 0.0, 0.0).unwrap().city, "Giethoorn");
    }

    #[test]
    fn test_parse_unknowns() {
        let place = parse_reverse(r#"{"address": {}}"#, 0.0, 0.0).unwrap();
        assert_eq!(place.to_string(), "Unknown city, Unknown country");

        let place = parse_reverse(r#"{"error": "Unable to geocode"}"#, 0.0, 0.0).unwrap();
        assert_eq!(place.city, "Unknown city");
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(
            parse_reverse("not json", 0.0, 0.0),
            Err(GeolocateError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_out_of_range_coordinates_fail_fast() {
        let client = NominatimClient::new().unwrap();
        let err = client.reverse(123.0, 0.0).await.unwrap_err();
        assert!(matches!(err, GeolocateError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_reverse_url() {
        let client = NominatimClient::new()
            .unwrap()
            .with_base_url("http://localhost/reverse");
        assert_eq!(
            client.reverse_url(40.7, -74.0),
            "http://localhost/reverse?format=json&lat=40.7&lon=-74&zoom=10&accept-language=en"
        );
    }
}
