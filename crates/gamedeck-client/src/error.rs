use reqwest::StatusCode;

use gamedeck_core::EnvelopeError;

use crate::config::ConfigError;

/// Failure of an API call. The store hands these back to its caller as-is.
#[derive(Debug)]
pub enum ApiError {
    Config(ConfigError),
    /// Transport failure, or the body could not be read.
    Network(reqwest::Error),
    /// A list response with a non-success status.
    Status {
        status: StatusCode,
        message: Option<String>,
    },
    /// A list body that is not a `{"data": [...]}` envelope.
    Envelope(EnvelopeError),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(e) => write!(f, "{e}"),
            Self::Network(e) => write!(f, "network error: {e}"),
            Self::Status {
                status,
                message: Some(m),
            } => write!(f, "games service returned {status}: {m}"),
            Self::Status {
                status,
                message: None,
            } => write!(f, "games service returned {status}"),
            Self::Envelope(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Network(e) => Some(e),
            Self::Envelope(e) => Some(e),
            Self::Status { .. } => None,
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        Self::Network(e)
    }
}

impl From<EnvelopeError> for ApiError {
    fn from(e: EnvelopeError) -> Self {
        Self::Envelope(e)
    }
}
