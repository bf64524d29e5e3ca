//! Core library for the `weatherview` terminal widget.
//!
//! This crate defines:
//! - The weather data model and the OpenWeather client
//! - Geolocation strategies
//! - The view state machine and the async session driving it
//! - Unit conversion, image selection and clock formatting
//! - Configuration & credentials handling
//!
//! It is used by `weatherview-cli`, but can also be reused by other front ends.

pub mod clock;
pub mod config;
pub mod display;
pub mod error;
pub mod geolocation;
pub mod image;
pub mod model;
pub mod provider;
pub mod session;
pub mod units;
pub mod view;

pub use config::{Config, LocationMode};
pub use error::{FetchError, GeolocationError};
pub use geolocation::Geolocator;
pub use image::WeatherImage;
pub use model::{Coordinates, WeatherQuery, WeatherSnapshot};
pub use provider::WeatherProvider;
pub use session::Session;
pub use view::{Command, Event, RequestId, ViewState, WeatherView};
