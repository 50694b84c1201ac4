//! Client configuration, resolved from the environment or built by hand.

use std::env;
use std::time::Duration;

use tracing::info;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(6000);
pub const DEFAULT_LOGIN_ROUTE: &str = "/#/user/login";
pub const DEFAULT_TOKEN_KEY: &str = "token";

/// Paths that may be requested without a stored token.
pub const DEFAULT_ALLOW_LIST: [&str; 3] = ["/daas/user/login", "/daas/auth/user/login", "/bi/share"];

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub allow_list: Vec<String>,
    /// Storage key the authentication token lives under.
    pub token_key: String,
    pub login_route: String,
    /// Wait between the "login expired" notice and the redirect on HTTP 403.
    pub login_redirect_delay: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            allow_list: DEFAULT_ALLOW_LIST.iter().map(|p| p.to_string()).collect(),
            token_key: DEFAULT_TOKEN_KEY.to_string(),
            login_route: DEFAULT_LOGIN_ROUTE.to_string(),
            login_redirect_delay: Duration::from_secs(1),
        }
    }

    /// Reads `API_BASE_URL` and `API_TIMEOUT_MS`, falling back to defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| {
            info!("API_BASE_URL not set, using default: {DEFAULT_BASE_URL}");
            DEFAULT_BASE_URL.to_string()
        });
        let mut config = Self::with_base_url(&base_url);

        if let Ok(raw) = env::var("API_TIMEOUT_MS") {
            let millis: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidNumber {
                key: "API_TIMEOUT_MS",
                value: raw.clone(),
            })?;
            config.timeout = Duration::from_millis(millis);
        }

        Ok(config)
    }

    pub fn is_allow_listed(&self, path: &str) -> bool {
        self.allow_list.iter().any(|p| p == path)
    }
}
