//! REST API error types
//!
//! Every error renders as a `text/plain` body so clients can match on the
//! message without decoding it first.

use std::panic::Location;

use axum::{
    http::{StatusCode, Uri},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// `/exec` received a command name other than the expected one
    #[error("Command rejected: expected {expected:?}, got {actual:?} {location}")]
    CommandRejected {
        expected: String,
        actual: String,
        status: StatusCode,
        location: ErrorLocation,
    },

    /// Request body declared a content type the endpoint does not take (415)
    #[error("Unsupported media type {actual:?}, expected {expected} {location}")]
    UnsupportedMediaType {
        expected: &'static str,
        actual: String,
        location: ErrorLocation,
    },

    /// No route matched the request path (404)
    #[error("No route for {uri} {location}")]
    NotFound { uri: Uri, location: ErrorLocation },
}

impl ApiError {
    #[track_caller]
    pub fn not_found(uri: Uri) -> Self {
        ApiError::NotFound {
            uri,
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unsupported_media_type(expected: &'static str, actual: &str) -> Self {
        ApiError::UnsupportedMediaType {
            expected,
            actual: actual.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::CommandRejected { status, .. } => *status,
            ApiError::UnsupportedMediaType { .. } => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        log::warn!("{}", self);

        let status = self.status();
        let body = match self {
            // The offending value is quoted verbatim, never escaped, so a client
            // can find `but: was "<name>"` in the body.
            ApiError::CommandRejected {
                expected, actual, ..
            } => format!("Expected: is \"{expected}\"\n     but: was \"{actual}\""),
            ApiError::UnsupportedMediaType {
                expected, actual, ..
            } => format!("unsupported media type: expected {expected}, got \"{actual}\""),
            ApiError::NotFound { uri, .. } => format!("not found: {}", uri.path()),
        };

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
