//! Error types for the request client.
//!
//! # Design
//! Every failed `get` is terminal and reported once. `RequestError` keeps the
//! two failure classes apart: business failures (transport succeeded, the
//! body's `status` is not 200) and transport failures (non-2xx, or no
//! response at all). `code()` collapses either into the numeric code callers
//! branch on.

use serde_json::Value;
use thiserror::Error;

use crate::http::TransportError;

/// Code reported for failures where no status is available.
pub const SETUP_FAILURE_CODE: i64 = -1;

/// Errors returned by `RequestClient::get`.
#[derive(Debug, Error)]
pub enum RequestError {
    /// No token is stored and the path is not allow-listed. No alert was shown.
    #[error("anonymous request to a protected path returned status {status}")]
    Anonymous { status: i64 },

    /// Business status 401: the user is not logged in.
    #[error("not logged in")]
    NotLoggedIn,

    /// Business status 402: the login session has expired.
    #[error("login session expired")]
    SessionExpired,

    /// A business status other than 200, 401 or 402.
    #[error("business status {status}")]
    Business { status: i64, body: Value },

    /// Transport status outside `200..300` on a call made with alerts.
    #[error("HTTP {status}")]
    Http { status: u16, body: String },

    /// Transport status outside `200..300` on a call made without alerts.
    #[error("HTTP {status} (silent)")]
    Rejected { status: u16, body: String },

    /// No response arrived within the timeout.
    #[error("request timed out: {0}")]
    Timeout(TransportError),

    /// The request never produced a response.
    #[error("request failed: {0}")]
    Network(TransportError),

    /// The response body is not an envelope with an integer `status`.
    #[error("malformed response body: {0}")]
    MalformedBody(String),

    /// Query parameters did not serialize to a JSON object.
    #[error("invalid query parameters: {0}")]
    InvalidParams(String),

    #[error("invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl RequestError {
    /// The numeric code: a business or transport status, or `-1`.
    pub fn code(&self) -> i64 {
        match self {
            RequestError::Anonymous { status } | RequestError::Business { status, .. } => *status,
            RequestError::NotLoggedIn => 401,
            RequestError::SessionExpired => 402,
            RequestError::Http { status, .. } => i64::from(*status),
            RequestError::Rejected { .. }
            | RequestError::Timeout(_)
            | RequestError::Network(_)
            | RequestError::MalformedBody(_)
            | RequestError::InvalidParams(_)
            | RequestError::InvalidUrl(_)
            | RequestError::Storage(_) => SETUP_FAILURE_CODE,
        }
    }
}

/// Errors from the JSON layer of `Storage`.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("stored value for `{key}` is not valid JSON: {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("value for `{key}` could not be serialized: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}
