//! Weather data shown on the page
//!
//! All values are mock data in imperial units (°F, mph, mi, inHg). Selecting
//! a location "loads" the same readings relabelled after a simulated delay.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

/// Default simulated latency of a weather load.
pub const DEFAULT_WEATHER_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Condition {
    #[default]
    Sunny,
    PartlyCloudy,
    Cloudy,
    Rainy,
}

impl Condition {
    /// Parse a free-form condition name. Unknown names read as sunny.
    pub fn parse(text: &str) -> Self {
        let lower = text.trim().to_lowercase();
        match lower.as_str() {
            "sunny" | "clear" => Condition::Sunny,
            "partly cloudy" | "partly-cloudy" => Condition::PartlyCloudy,
            "cloudy" | "overcast" => Condition::Cloudy,
            "rainy" | "rain" => Condition::Rainy,
            _ => Condition::Sunny,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Condition::Sunny => "Sunny",
            Condition::PartlyCloudy => "Partly Cloudy",
            Condition::Cloudy => "Cloudy",
            Condition::Rainy => "Rainy",
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Condition::Sunny => "☀",
            Condition::PartlyCloudy => "⛅",
            Condition::Cloudy => "☁",
            Condition::Rainy => "☂",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Temperature unit preference. Data is stored in Fahrenheit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TempUnit {
    #[default]
    Fahrenheit,
    Celsius,
}

impl TempUnit {
    pub fn toggle(self) -> Self {
        match self {
            TempUnit::Fahrenheit => TempUnit::Celsius,
            TempUnit::Celsius => TempUnit::Fahrenheit,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            TempUnit::Fahrenheit => "°F",
            TempUnit::Celsius => "°C",
        }
    }

    /// Convert a Fahrenheit reading, rounded to whole degrees.
    pub fn convert(self, fahrenheit: i32) -> i32 {
        match self {
            TempUnit::Fahrenheit => fahrenheit,
            TempUnit::Celsius => ((fahrenheit - 32) as f64 * 5.0 / 9.0).round() as i32,
        }
    }

    /// `"72°F"` / `"22°C"`
    pub fn format(self, fahrenheit: i32) -> String {
        format!("{}{}", self.convert(fahrenheit), self.symbol())
    }

    /// `"72°"` for compact high/low columns.
    pub fn format_short(self, fahrenheit: i32) -> String {
        format!("{}°", self.convert(fahrenheit))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct CurrentWeather {
    pub location: String,
    pub temperature: i32,
    pub condition: Condition,
    /// Percent
    pub humidity: u8,
    /// mph
    pub wind_speed: u16,
    /// Miles
    pub visibility: u16,
    pub feels_like: i32,
    pub uv_index: u8,
    /// inHg
    pub pressure: f32,
    /// Percent
    pub cloud_cover: u8,
}

impl CurrentWeather {
    /// The same readings under another location label.
    pub fn relabelled(&self, location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            ..self.clone()
        }
    }
}

impl Default for CurrentWeather {
    fn default() -> Self {
        mock_current()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ForecastDay {
    pub day: String,
    pub high: i32,
    pub low: i32,
    pub condition: Condition,
}

impl ForecastDay {
    fn new(day: &str, high: i32, low: i32, condition: Condition) -> Self {
        Self {
            day: day.to_string(),
            high,
            low,
            condition,
        }
    }
}

pub fn mock_current() -> CurrentWeather {
    CurrentWeather {
        location: "New York, NY".to_string(),
        temperature: 72,
        condition: Condition::Sunny,
        humidity: 65,
        wind_speed: 8,
        visibility: 10,
        feels_like: 75,
        uv_index: 6,
        pressure: 30.15,
        cloud_cover: 42,
    }
}

pub fn mock_forecast() -> Vec<ForecastDay> {
    vec![
        ForecastDay::new("Today", 75, 62, Condition::Sunny),
        ForecastDay::new("Tomorrow", 78, 65, Condition::PartlyCloudy),
        ForecastDay::new("Wednesday", 71, 58, Condition::Rainy),
        ForecastDay::new("Thursday", 73, 60, Condition::Cloudy),
        ForecastDay::new("Friday", 76, 63, Condition::Sunny),
    ]
}

/// Serves mock weather for any label after a fixed delay.
#[derive(Clone, Debug)]
pub struct MockWeatherProvider {
    latency: Duration,
    base: CurrentWeather,
}

impl MockWeatherProvider {
    pub fn new(latency: Duration) -> Self {
        Self {
            latency,
            base: mock_current(),
        }
    }

    pub async fn load(&self, location: &str) -> CurrentWeather {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        tracing::debug!(location, "Mock weather loaded");
        self.base.relabelled(location)
    }
}

impl Default for MockWeatherProvider {
    fn default() -> Self {
        Self::new(DEFAULT_WEATHER_LATENCY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_condition_parse() {
        assert_eq!(Condition::parse("Sunny"), Condition::Sunny);
        assert_eq!(Condition::parse("clear"), Condition::Sunny);
        assert_eq!(Condition::parse("Partly Cloudy"), Condition::PartlyCloudy);
        assert_eq!(Condition::parse("OVERCAST"), Condition::Cloudy);
        assert_eq!(Condition::parse("rain"), Condition::Rainy);
        assert_eq!(Condition::parse("hail"), Condition::Sunny);
    }

    #[test]
    fn test_temp_unit_conversion() {
        assert_eq!(TempUnit::Fahrenheit.format(72), "72°F");
        assert_eq!(TempUnit::Celsius.format(72), "22°C");
        assert_eq!(TempUnit::Celsius.convert(32), 0);
        assert_eq!(TempUnit::Celsius.format_short(58), "14°");
        assert_eq!(TempUnit::Fahrenheit.toggle(), TempUnit::Celsius);
        assert_eq!(TempUnit::Celsius.toggle(), TempUnit::Fahrenheit);
    }

    #[test]
    fn test_mock_forecast_days() {
        let days: Vec<_> = mock_forecast().into_iter().map(|d| d.day).collect();
        assert_eq!(days, ["Today", "Tomorrow", "Wednesday", "Thursday", "Friday"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_provider_relabels_after_latency() {
        let provider = MockWeatherProvider::default();
        let started = tokio::time::Instant::now();

        let weather = provider.load("Tokyo, Tokyo, Japan").await;

        assert!(started.elapsed() >= DEFAULT_WEATHER_LATENCY);
        assert_eq!(weather.location, "Tokyo, Tokyo, Japan");
        assert_eq!(weather.temperature, 72);
        assert_eq!(weather.pressure, 30.15);
    }
}
