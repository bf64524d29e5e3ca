use thiserror::Error;

/// Message shown for any failure below the HTTP status layer.
pub const FETCH_FAILED_MESSAGE: &str = "An error occurred while fetching weather data.";

/// Message used when geolocation is switched off.
pub const GEOLOCATION_DENIED_MESSAGE: &str = "User denied Geolocation";

/// Failure of a single provider request.
///
/// `Display` is the exact text the view shows to the user.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider answered with a non-success status.
    #[error("{status_text}")]
    Transport { status: u16, status_text: String },

    /// The request never produced a usable body (network, TLS, decoding).
    #[error("An error occurred while fetching weather data.")]
    Request {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FetchError {
    pub fn transport(status: reqwest::StatusCode) -> Self {
        let status_text = status
            .canonical_reason()
            .map(str::to_owned)
            .unwrap_or_else(|| status.as_str().to_owned());

        FetchError::Transport {
            status: status.as_u16(),
            status_text,
        }
    }

    pub fn request<E>(source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        FetchError::Request {
            source: Box::new(source),
        }
    }
}

/// Failure to resolve the device position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("User denied Geolocation")]
    Denied,

    #[error("{0}")]
    Unavailable(String),
}
