use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a primary weather or forecast request.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The provider has no match for the requested city.
    #[error("City not found")]
    NotFound,

    /// The provider rejected the API key.
    #[error("Provider rejected the API key")]
    Unauthorized,

    #[error("Provider request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Failed to parse provider response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound)
    }

    /// Wording shown in the error panel.
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NotFound => "City not found. Please check the spelling and try again.",
            FetchError::Unauthorized => "Invalid API key. Please check your configuration.",
            FetchError::Network(_) => "Network error. Please check your internet connection.",
            FetchError::Status { .. } | FetchError::Decode(_) => {
                "Unable to fetch weather data. Please try again later."
            }
        }
    }
}

/// Geolocation source failures. Logged, never rendered.
#[derive(Debug, Error)]
pub enum LocationError {
    #[error("Location permission denied")]
    PermissionDenied,
    #[error("Location service unavailable")]
    Unavailable,
    #[error("Location request timed out")]
    Timeout,
    #[error("Location error: {0}")]
    Other(String),
}

/// Why a dashboard trigger did not produce a new display.
#[derive(Debug, Error)]
pub enum TriggerError {
    #[error("Please enter a city name")]
    EmptyQuery,

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A later trigger for the same resource started before this one finished.
    #[error("Request superseded by a newer one")]
    Superseded,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_has_dedicated_message() {
        let msg = FetchError::NotFound.user_message();
        assert!(msg.starts_with("City not found"));
        assert!(FetchError::NotFound.is_not_found());
    }

    #[test]
    fn unauthorized_mentions_api_key() {
        assert!(FetchError::Unauthorized.user_message().contains("API key"));
    }

    #[test]
    fn status_and_decode_share_generic_message() {
        let status = FetchError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "boom".into(),
        };
        let decode = FetchError::from(serde_json::from_str::<u8>("x").unwrap_err());

        assert_eq!(status.user_message(), decode.user_message());
        assert!(status.user_message().starts_with("Unable to fetch weather data"));
        assert!(!status.is_not_found());
    }

    #[test]
    fn trigger_error_is_transparent_over_fetch() {
        let err = TriggerError::from(FetchError::NotFound);
        assert_eq!(err.to_string(), "City not found");
    }
}
