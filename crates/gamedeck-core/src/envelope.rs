use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Wire wrapper around a list response body: `{ "data": [...] }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListEnvelope<T> {
    pub data: Vec<T>,
}

impl<T> ListEnvelope<T> {
    pub fn new(data: Vec<T>) -> Self {
        Self { data }
    }
}

/// Error body emitted by the games service on failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub message: String,
}

impl ErrorBody {
    /// Extract the `message` of an error body, if the bytes are one.
    pub fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<ErrorBody>(body).ok().map(|b| b.message)
    }
}

/// Reasons a list body failed to unwrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeError {
    /// The body is a top-level array: the legacy contract, which is no longer
    /// accepted.
    BareArray,
    /// The body is not a valid envelope for the expected item type.
    Malformed(String),
}

impl std::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BareArray => write!(
                f,
                "list response is a bare array; expected a {{\"data\": [...]}} envelope"
            ),
            Self::Malformed(m) => write!(f, "malformed list envelope: {m}"),
        }
    }
}

impl std::error::Error for EnvelopeError {}

/// Parse a `{ "data": [...] }` body and return exactly its `data` sequence,
/// in order.
pub fn unwrap_list<T: DeserializeOwned>(body: &[u8]) -> Result<Vec<T>, EnvelopeError> {
    match serde_json::from_slice::<ListEnvelope<T>>(body) {
        Ok(envelope) => Ok(envelope.data),
        Err(e) => {
            if let Ok(serde_json::Value::Array(_)) =
                serde_json::from_slice::<serde_json::Value>(body)
            {
                Err(EnvelopeError::BareArray)
            } else {
                Err(EnvelopeError::Malformed(e.to_string()))
            }
        },
    }
}
