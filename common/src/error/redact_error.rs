//! Errors raised when a redacted value is about to leave the process.

use crate::ErrorLocation;

use thiserror::Error as ThisError;

/// Raised by [`RedactedToken`](crate::RedactedToken) when something tries
/// to serialize the bearer token - the refusal is deliberate, so the error
/// names the call site that attempted the leak.
#[derive(Debug, ThisError)]
pub enum RedactError {
    #[error("Redacted Value Serialization Error: {message} {location}")]
    Serialization {
        message: String,
        location: ErrorLocation,
    },
}
