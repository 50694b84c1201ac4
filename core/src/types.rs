//! Per-call options and the success envelope.

use std::time::Duration;

use serde_json::Value;

use crate::error::RequestError;

/// Business status that marks a successful response body.
pub const BUSINESS_OK: i64 = 200;

/// Per-call overrides for `RequestClient::get`.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Show notices and login prompts for failures. Defaults to `true`.
    pub need_alert: bool,
    /// Falls back to `ClientConfig::timeout`.
    pub timeout: Option<Duration>,
    /// Falls back to `ClientConfig::base_url`.
    pub base_url: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            need_alert: true,
            timeout: None,
            base_url: None,
        }
    }
}

impl RequestOptions {
    /// Options that suppress every user-facing alert.
    pub fn silent() -> Self {
        Self {
            need_alert: false,
            ..Self::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = Some(base_url.to_string());
        self
    }
}

/// A successful response: transport 2xx and business status 200.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub http_status: u16,
    pub headers: Vec<(String, String)>,
    /// The whole JSON body, including its `status` field.
    pub body: Value,
}

impl Envelope {
    /// The body's `data` field, if present.
    pub fn data(&self) -> Option<&Value> {
        self.body.get("data")
    }
}

/// Reads the business status out of a response body.
pub(crate) fn parse_business_status(raw: &str) -> Result<(i64, Value), RequestError> {
    let body: Value =
        serde_json::from_str(raw).map_err(|e| RequestError::MalformedBody(e.to_string()))?;
    let status = body
        .get("status")
        .and_then(Value::as_i64)
        .ok_or_else(|| RequestError::MalformedBody("missing integer `status` field".to_string()))?;
    Ok((status, body))
}
