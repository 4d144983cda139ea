//! # Application State
//!
//! Shared state handed to every route handler through the `State`
//! extractor. Everything here is fixed at startup and cheap to clone:
//! server configuration, the provider client, and the optional Postgres
//! pool backing the issuance sink.

use nfe_provider_client::NfeClient;
use sqlx::PgPool;

/// Deployment environment, parsed from `APP_ENV`.
///
/// Controls exactly one behavior: whether 500 envelopes carry a `stack`
/// field. Backtraces are captured in `Development` and omitted in
/// `Production`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    /// Local development. Error envelopes include a captured backtrace.
    Development,
    /// Anything that is not explicitly development. The default.
    #[default]
    Production,
}

impl Environment {
    /// Read `APP_ENV`: the exact value `development` selects
    /// [`Environment::Development`]; any other value, or an unset
    /// variable, selects [`Environment::Production`].
    pub fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("development") => Self::Development,
            _ => Self::Production,
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// TCP port the HTTP server binds to.
    pub port: u16,
    /// Deployment environment.
    pub environment: Environment,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            environment: Environment::Production,
        }
    }
}

impl AppConfig {
    /// Load configuration from the environment: `PORT` (default 3000)
    /// and `APP_ENV`.
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(3000);
        Self {
            port,
            environment: Environment::from_env(),
        }
    }
}

/// Shared application state for all route handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: AppConfig,
    /// Client for the five outbound provider operations.
    pub client: NfeClient,
    /// Pool backing the issuance sink. `None` disables persistence.
    pub db_pool: Option<PgPool>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults_to_port_3000_in_production() {
        let config = AppConfig::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.environment, Environment::Production);
    }

    #[test]
    fn environment_recognizes_development_only() {
        std::env::set_var("APP_ENV", "development");
        assert_eq!(Environment::from_env(), Environment::Development);

        std::env::set_var("APP_ENV", "staging");
        assert_eq!(Environment::from_env(), Environment::Production);

        std::env::remove_var("APP_ENV");
        assert_eq!(Environment::from_env(), Environment::Production);
    }
}
