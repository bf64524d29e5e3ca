//! Ways of resolving where the user is.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::{fmt::Debug, time::Duration};
use tracing::{debug, info, warn};

use crate::{
    GeolocationError,
    config::{Config, LocationMode},
    model::Coordinates,
};

pub const DEFAULT_GEOIP_URL: &str = "http://ip-api.com/json";
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[async_trait]
pub trait Geolocator: Send + Sync + Debug {
    async fn locate(&self) -> Result<Coordinates, GeolocationError>;
}

/// Resolves the public IP address of this machine to a position.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    url: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct GeoIpResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
    city: Option<String>,
}

impl IpGeolocator {
    pub fn new(url: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {e}");
                Client::new()
            });

        Self {
            url: url.into(),
            http,
        }
    }
}

impl Default for IpGeolocator {
    fn default() -> Self {
        Self::new(DEFAULT_GEOIP_URL)
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        debug!("Resolving position via {}", self.url);

        let res = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| GeolocationError::Unavailable(format!("Position unavailable: {e}")))?;

        if !res.status().is_success() {
            return Err(GeolocationError::Unavailable(format!(
                "Position unavailable: lookup returned {}",
                res.status()
            )));
        }

        let body: GeoIpResponse = res
            .json()
            .await
            .map_err(|e| GeolocationError::Unavailable(format!("Position unavailable: {e}")))?;

        if body.status != "success" {
            let reason = body.message.unwrap_or_else(|| body.status.clone());
            return Err(GeolocationError::Unavailable(format!(
                "Position unavailable: {reason}"
            )));
        }

        match (body.lat, body.lon) {
            (Some(lat), Some(lon)) => {
                info!(
                    "Located near {}",
                    body.city.as_deref().unwrap_or("an unnamed place")
                );
                Ok(Coordinates::new(lat, lon))
            }
            _ => Err(GeolocationError::Unavailable(
                "Position unavailable: lookup returned no coordinates".to_string(),
            )),
        }
    }
}

/// Always answers with the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator(pub Coordinates);

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Geolocation switched off by the user.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeniedGeolocator;

#[async_trait]
impl Geolocator for DeniedGeolocator {
    async fn locate(&self) -> Result<Coordinates, GeolocationError> {
        Err(GeolocationError::Denied)
    }
}

/// Construct the geolocator selected in the config.
pub fn geolocator_from_config(config: &Config) -> anyhow::Result<Box<dyn Geolocator>> {
    let location = &config.location;

    let boxed: Box<dyn Geolocator> = match location.mode {
        LocationMode::Ip => Box::new(IpGeolocator::new(config.geoip_url())),
        LocationMode::Fixed => {
            let coords = location.coordinates().ok_or_else(|| {
                anyhow::anyhow!(
                    "Location mode is 'fixed' but latitude/longitude are not set.\n\
                     Hint: run `weatherview configure` and enter your coordinates."
                )
            })?;
            Box::new(FixedGeolocator(coords))
        }
        LocationMode::Off => Box::new(DeniedGeolocator),
    };

    Ok(boxed)
}
