//! Error types for fetching order snapshots.

use serde::Serialize;
use thiserror::Error;

/// Why a fetch produced no snapshot.
///
/// Both variants carry a message meant for the operator. The controller keeps
/// the error in its `Failed` state, so it is `Clone` and comparable.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FetchError {
    /// Network failure, timeout, or a non-success HTTP status.
    #[error("Transport failure: {0}")]
    TransportFailure(String),

    /// The response arrived but did not contain a usable `orders` array.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

/// Discriminant of [`FetchError`], for callers that only branch on the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FetchErrorKind {
    TransportFailure,
    MalformedResponse,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::TransportFailure(_) => FetchErrorKind::TransportFailure,
            FetchError::MalformedResponse(_) => FetchErrorKind::MalformedResponse,
        }
    }

    pub fn transport(reason: impl Into<String>) -> Self {
        FetchError::TransportFailure(reason.into())
    }

    pub fn malformed(reason: impl Into<String>) -> Self {
        FetchError::MalformedResponse(reason.into())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            return FetchError::MalformedResponse(e.to_string());
        }
        let reason = if e.is_timeout() {
            format!("request timed out: {e}")
        } else if e.is_connect() {
            format!("connection failed: {e}")
        } else {
            e.to_string()
        };
        FetchError::TransportFailure(reason)
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::MalformedResponse(e.to_string())
    }
}
