use chrono::{DateTime, Local};

use crate::{
    model::WeatherSnapshot,
    units::{direction::degree_to_compass, temperature::kelvin_to_celsius},
};

pub const MISSING: &str = "--";

/// One titled value under the headline temperature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailCard {
    pub title: &'static str,
    pub value: String,
}

impl DetailCard {
    fn new(title: &'static str, value: String) -> Self {
        Self { title, value }
    }
}

pub fn format_celsius(kelvin: Option<f64>) -> String {
    match kelvin_to_celsius(kelvin) {
        Some(c) => format!("{c}°C"),
        None => MISSING.to_string(),
    }
}

fn with_unit(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => format!("{v} {unit}"),
        None => MISSING.to_string(),
    }
}

fn wind_direction(deg: Option<f64>) -> String {
    match deg {
        Some(d) => format!("{d}° {}", degree_to_compass(d)),
        None => MISSING.to_string(),
    }
}

fn local_time(epoch: Option<i64>) -> String {
    epoch
        .and_then(|ts| DateTime::from_timestamp(ts, 0))
        .map(|utc| utc.with_timezone(&Local).format("%-I:%M %p").to_string())
        .unwrap_or_else(|| MISSING.to_string())
}

pub fn detail_cards(snapshot: &WeatherSnapshot) -> Vec<DetailCard> {
    vec![
        DetailCard::new("Clouds", with_unit(snapshot.clouds.all, "%")),
        DetailCard::new(
            "Weather Type",
            snapshot.condition().unwrap_or(MISSING).to_string(),
        ),
        DetailCard::new("Feels Like", format_celsius(snapshot.main.feels_like)),
        DetailCard::new("Humidity", with_unit(snapshot.main.humidity, "%")),
        DetailCard::new(
            "Visibility",
            with_unit(snapshot.visibility.map(f64::from), "m"),
        ),
        DetailCard::new("Wind Speed", with_unit(snapshot.wind.speed, "m/s")),
        DetailCard::new("Wind Direction", wind_direction(snapshot.wind.deg)),
        DetailCard::new("Min", format_celsius(snapshot.main.temp_min)),
        DetailCard::new("Max", format_celsius(snapshot.main.temp_max)),
        DetailCard::new("Pressure", with_unit(snapshot.main.pressure, "hPa")),
        DetailCard::new("Sunrise", local_time(snapshot.sys.sunrise)),
        DetailCard::new("Sunset", local_time(snapshot.sys.sunset)),
    ]
}
