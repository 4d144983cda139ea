//! Provider client configuration.
//!
//! Defaults point at the production WebmaniaBR endpoint. Override via
//! environment variables or explicit construction for staging/testing.

use url::Url;

/// How requests authenticate against the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// HTTP Basic with the consumer key/secret pair.
    #[default]
    Basic,
    /// Credential headers on every request: `X-Consumer-Key`,
    /// `X-Consumer-Secret`, `X-Access-Token`, `X-Access-Token-Secret`.
    Headers,
}

/// Configuration for connecting to the NFe provider.
///
/// Custom `Debug` implementation redacts all four credentials
/// to prevent leakage in log output.
#[derive(Clone)]
pub struct ProviderConfig {
    /// Base URL of the provider API.
    /// Default: <https://webmaniabr.com/api/1/nfe/>
    pub base_url: Url,
    /// Application consumer key.
    pub consumer_key: String,
    /// Application consumer secret.
    pub consumer_secret: String,
    /// Account access token.
    pub access_token: String,
    /// Account access token secret.
    pub access_token_secret: String,
    /// Authentication scheme, see [`AuthMode`].
    pub auth_mode: AuthMode,
    /// Callback URL written into successful issuance results.
    pub notification_url: Option<String>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_url", &self.base_url)
            .field("consumer_key", &"[REDACTED]")
            .field("consumer_secret", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("access_token_secret", &"[REDACTED]")
            .field("auth_mode", &self.auth_mode)
            .field("notification_url", &self.notification_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl ProviderConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `NFE_BASE_URL` (default: `https://webmaniabr.com/api/1/nfe/`)
    /// - `NFE_CONSUMER_KEY` (required)
    /// - `NFE_CONSUMER_SECRET` (required)
    /// - `NFE_ACCESS_TOKEN` (required)
    /// - `NFE_ACCESS_TOKEN_SECRET` (required)
    /// - `NFE_AUTH_MODE` (`basic` or `headers`, default: `basic`)
    /// - `NFE_NOTIFICATION_URL` (optional; unset disables the merge)
    /// - `NFE_TIMEOUT_SECS` (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env_url("NFE_BASE_URL", "https://webmaniabr.com/api/1/nfe/")?,
            consumer_key: required("NFE_CONSUMER_KEY")?,
            consumer_secret: required("NFE_CONSUMER_SECRET")?,
            access_token: required("NFE_ACCESS_TOKEN")?,
            access_token_secret: required("NFE_ACCESS_TOKEN_SECRET")?,
            auth_mode: env_auth_mode("NFE_AUTH_MODE")?,
            notification_url: std::env::var("NFE_NOTIFICATION_URL").ok(),
            timeout_secs: std::env::var("NFE_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Create a configuration pointing to a local mock server (for testing).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidUrl` if `base_url` cannot be parsed.
    pub fn local_mock(base_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: Url::parse(base_url)
                .map_err(|e| ConfigError::InvalidUrl("base_url".to_string(), e.to_string()))?,
            consumer_key: "ck".to_string(),
            consumer_secret: "cs".to_string(),
            access_token: "at".to_string(),
            access_token_secret: "ats".to_string(),
            auth_mode: AuthMode::Basic,
            notification_url: None,
            timeout_secs: 5,
        })
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    std::env::var(var).map_err(|_| ConfigError::MissingCredential(var.to_string()))
}

fn env_url(var: &str, default: &str) -> Result<Url, ConfigError> {
    let raw = std::env::var(var).unwrap_or_else(|_| default.to_string());
    Url::parse(&raw).map_err(|e| ConfigError::InvalidUrl(var.to_string(), e.to_string()))
}

fn env_auth_mode(var: &str) -> Result<AuthMode, ConfigError> {
    match std::env::var(var) {
        Err(_) => Ok(AuthMode::default()),
        Ok(raw) => match raw.as_str() {
            "basic" => Ok(AuthMode::Basic),
            "headers" => Ok(AuthMode::Headers),
            _ => Err(ConfigError::InvalidAuthMode(raw)),
        },
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} environment variable is required")]
    MissingCredential(String),
    #[error("invalid URL for {0}: {1}")]
    InvalidUrl(String, String),
    #[error("invalid auth mode {0:?}: expected \"basic\" or \"headers\"")]
    InvalidAuthMode(String),
    #[error("credential for header {0} contains invalid characters")]
    InvalidCredential(String),
}
