//! Protocol-boundary errors.

use thiserror::Error;

/// Errors produced while decoding wire payloads.
///
/// Carries the serde rendering rather than the source error so the type
/// stays `Clone + PartialEq` for state-machine tests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// Payload body was not valid JSON for the expected shape.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
}

impl From<serde_json::Error> for ProtocolError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedPayload(err.to_string())
    }
}
