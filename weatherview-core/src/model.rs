use serde::{Deserialize, Serialize};

/// A resolved device or place position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.4}, {:.4}", self.latitude, self.longitude)
    }
}

/// What a single provider request is keyed on.
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherQuery {
    ByName(String),
    ByCoordinates(Coordinates),
}

impl std::fmt::Display for WeatherQuery {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WeatherQuery::ByName(name) => write!(f, "place '{name}'"),
            WeatherQuery::ByCoordinates(coords) => write!(f, "coordinates ({coords})"),
        }
    }
}

/// The current-weather body as returned by the provider.
///
/// Temperatures are Kelvin, pressure hPa, humidity and cloud cover percent,
/// visibility meters, wind speed m/s, sunrise/sunset epoch seconds.
/// Blocks the provider omits fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherSnapshot {
    pub coord: Option<Coord>,
    pub weather: Vec<Condition>,
    pub main: MainMetrics,
    pub name: String,
    pub wind: Wind,
    pub visibility: Option<u32>,
    pub clouds: Clouds,
    pub sys: Sys,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Coord {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Condition {
    pub main: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MainMetrics {
    pub temp: Option<f64>,
    pub feels_like: Option<f64>,
    pub temp_min: Option<f64>,
    pub temp_max: Option<f64>,
    pub pressure: Option<f64>,
    pub humidity: Option<f64>,
    pub sea_level: Option<f64>,
    pub grnd_level: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Wind {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Clouds {
    pub all: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Sys {
    pub sunrise: Option<i64>,
    pub sunset: Option<i64>,
}

impl WeatherSnapshot {
    /// Position the provider resolved the query to, when it sent one.
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coord.map(|c| Coordinates::new(c.lat, c.lon))
    }

    /// Label of the primary weather condition, e.g. "Clouds".
    pub fn condition(&self) -> Option<&str> {
        self.weather
            .first()
            .map(|w| w.main.as_str())
            .filter(|m| !m.is_empty())
    }
}
