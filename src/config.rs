use std::time::Duration;

use serde::Deserialize;

use crate::error::{AuthError, Result};

/// Production verification service
pub const DEFAULT_API_URL: &str = "https://api.runonflux.io";

/// Default request timeout in milliseconds
pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Environment variable overriding [`AuthConfig::base_url`]
pub const API_URL_ENV: &str = "ZELID_AUTH_API_URL";

/// Environment variable overriding [`AuthConfig::timeout_ms`]
pub const TIMEOUT_ENV: &str = "ZELID_AUTH_TIMEOUT_MS";

/// Configuration for talking to the verification service
///
/// This struct contains:
/// - The base URL of the service (`/id/loginphrase` and `/id/verifylogin`
///   are resolved against it)
/// - The per-request timeout in milliseconds
///
/// # Example
/// ```rust
/// use zelid_auth::AuthConfig;
///
/// let config = AuthConfig::new("http://127.0.0.1:16127/").with_timeout_ms(2_000);
/// assert_eq!(config.base_url, "http://127.0.0.1:16127");
/// assert_eq!(config.timeout().as_millis(), 2_000);
/// ```
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct AuthConfig {
    /// Base URL of the verification service, without a trailing slash
    #[serde(default = "default_api_url")]
    pub base_url: String,
    /// Request timeout in milliseconds
    ///
    /// Applies to the whole request, including reading the response body.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            base_url: default_api_url(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl AuthConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build a configuration from `ZELID_AUTH_API_URL` and `ZELID_AUTH_TIMEOUT_MS`
    ///
    /// Unset variables fall back to the defaults.
    ///
    /// # Errors
    /// - `InvalidConfig` - The timeout is not a positive integer
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = match lookup(API_URL_ENV) {
            Some(url) => Self::new(url),
            None => Self::default(),
        };
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_ms = parse_timeout_ms(&raw)?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration can be used to build a client
    ///
    /// # Errors
    /// - `InvalidConfig` - Empty or non-HTTP base URL, or a zero timeout
    pub fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AuthError::InvalidConfig("base URL is empty".to_string()));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(AuthError::InvalidConfig(format!(
                "base URL must start with http:// or https://, got '{}'",
                self.base_url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(AuthError::InvalidConfig(
                "timeout must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}

fn parse_timeout_ms(raw: &str) -> Result<u64> {
    raw.trim()
        .parse::<u64>()
        .map_err(|e| AuthError::InvalidConfig(format!("{TIMEOUT_ENV}='{raw}': {e}")))
}
