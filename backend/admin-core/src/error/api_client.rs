use common::{ErrorLocation, HttpStatusCode};

use std::panic::Location;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum ApiClientError {
    /// Connection-level failure before a usable response arrived
    /// (reset, refused, DNS, protocol negotiation).
    #[error("Transport Error: {message} {location}")]
    Transport {
        message: String,
        location: ErrorLocation,
    },

    /// The request exceeded the client's per-request timeout.
    #[error("Timeout Error: {message} {location}")]
    Timeout {
        message: String,
        location: ErrorLocation,
    },

    /// The request could not be constructed (e.g. a header value with a
    /// newline). Local and permanent: no attempt ever reached the wire.
    #[error("Request Build Error: {message} {location}")]
    Build {
        message: String,
        location: ErrorLocation,
    },

    /// A non-2xx response. The message callers see is
    /// `HTTP <status> <statusText>: <body-text>`, body preserved verbatim.
    #[error("HTTP {status} {status_text}: {body} {location}")]
    Status {
        status: HttpStatusCode,
        status_text: String,
        body: String,
        location: ErrorLocation,
    },

    #[error("JSON Error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
    },

    #[error("URL Parse Error: {message} {location}")]
    UrlParse {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiClientError {
    /// Retry eligibility: transport failures, timeouts, and 5xx responses.
    ///
    /// Everything else (4xx, malformed JSON, bad URLs, unbuildable
    /// requests) is surfaced to the caller on the first attempt.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiClientError::Transport { .. } | ApiClientError::Timeout { .. } => true,
            ApiClientError::Status { status, .. } => status.is_retryable(),
            ApiClientError::Build { .. }
            | ApiClientError::Json { .. }
            | ApiClientError::UrlParse { .. } => false,
        }
    }
}

impl From<reqwest::Error> for ApiClientError {
    #[track_caller]
    fn from(error: reqwest::Error) -> Self {
        let location = ErrorLocation::from(Location::caller());
        if error.is_timeout() {
            ApiClientError::Timeout {
                message: error.to_string(),
                location,
            }
        } else if error.is_builder() {
            // Request-kind errors stay Transport below: connection failures
            // report that kind too, and those must remain retryable.
            ApiClientError::Build {
                message: error.to_string(),
                location,
            }
        } else if error.is_decode() {
            ApiClientError::Json {
                message: error.to_string(),
                location,
            }
        } else {
            ApiClientError::Transport {
                message: error.to_string(),
                location,
            }
        }
    }
}

impl From<url::ParseError> for ApiClientError {
    #[track_caller]
    fn from(error: url::ParseError) -> Self {
        ApiClientError::UrlParse {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<serde_json::Error> for ApiClientError {
    #[track_caller]
    fn from(error: serde_json::Error) -> Self {
        ApiClientError::Json {
            message: error.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}
