use crate::{model::WeatherSnapshot, units::temperature::kelvin_to_celsius};

const HEAVY_CLOUD_PERCENT: f64 = 80.0;
const HOT_CELSIUS: f64 = 30.0;

/// Picture shown next to the temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherImage {
    SunAndCloud,
    Sun,
    Generic,
}

impl WeatherImage {
    /// Heavy cloud wins over heat; everything else gets the generic icon.
    pub fn select(snapshot: &WeatherSnapshot) -> Self {
        if snapshot.clouds.all.is_some_and(|c| c > HEAVY_CLOUD_PERCENT) {
            return WeatherImage::SunAndCloud;
        }

        match kelvin_to_celsius(snapshot.main.temp) {
            Some(celsius) if celsius > HOT_CELSIUS => WeatherImage::Sun,
            _ => WeatherImage::Generic,
        }
    }

    pub fn asset(&self) -> &'static str {
        match self {
            WeatherImage::SunAndCloud => "sun-and-cloud.png",
            WeatherImage::Sun => "sun.png",
            WeatherImage::Generic => "weather.svg",
        }
    }

    /// Small drawing for terminals, one entry per row.
    pub fn glyph(&self) -> &'static [&'static str] {
        match self {
            WeatherImage::SunAndCloud => &[
                r"   \  /      ",
                r" _ /''.-.    ",
                r"   \_(   ).  ",
                r"   /(___(__) ",
            ],
            WeatherImage::Sun => &[
                r"    \   /    ",
                r"     .-.     ",
                r"  ― (   ) ―  ",
                r"     `-'     ",
                r"    /   \    ",
            ],
            WeatherImage::Generic => &[
                r"     .--.    ",
                r"  .-(    ).  ",
                r" (___.__)__) ",
            ],
        }
    }
}
