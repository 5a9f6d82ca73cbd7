//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod app;
pub mod auth;
pub mod database;
pub mod logging;
pub mod session;

use serde::{Deserialize, Serialize};

pub use self::app::{CorsConfig, ServerConfig};
pub use self::auth::AuthConfig;
pub use self::database::{DatabaseConfig, DatabaseProvider};
pub use self::logging::LoggingConfig;
pub use self::session::{MAX_TOKEN_TTL_MINUTES, SameSitePolicy, SessionConfig};

use crate::error::AppError;

/// Minimum secret length accepted when running in production.
const MIN_PRODUCTION_SECRET_BYTES: usize = 32;

/// Deployment environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development: relaxed cookie flags.
    #[default]
    Development,
    /// Production: secure cookies and strict secret checks.
    Production,
}

impl Environment {
    /// Returns `true` when running in production.
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Deployment environment.
    #[serde(default)]
    pub environment: Environment,
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database connection settings.
    #[serde(default)]
    pub database: DatabaseConfig,
    /// Token signing settings.
    #[serde(default)]
    pub auth: AuthConfig,
    /// Session token and cookie settings.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the given environment name.
    ///
    /// Merges `config/default.toml` with `config/{env}.toml` and
    /// environment variables prefixed with `PORTAL__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{env}")).required(false));
        Self::finish(builder)
    }

    /// Load configuration from an explicit file path plus environment variables.
    pub fn load_file(path: &str) -> Result<Self, AppError> {
        let builder = config::Config::builder().add_source(config::File::with_name(path));
        Self::finish(builder)
    }

    fn finish(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix("PORTAL")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let config: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    /// Check invariants the deserializer cannot express.
    ///
    /// The signing secret has no fallback value: startup fails without one.
    pub fn validate(&self) -> Result<(), AppError> {
        let secret = self.auth.jwt_secret.trim();
        if secret.is_empty() {
            return Err(AppError::configuration(
                "auth.jwt_secret must be set (PORTAL__AUTH__JWT_SECRET)",
            ));
        }
        if self.environment.is_production() && secret.len() < MIN_PRODUCTION_SECRET_BYTES {
            return Err(AppError::configuration(format!(
                "auth.jwt_secret must be at least {MIN_PRODUCTION_SECRET_BYTES} bytes in production"
            )));
        }
        if self.session.token_ttl_minutes == 0 {
            return Err(AppError::configuration(
                "session.token_ttl_minutes must be greater than zero",
            ));
        }
        if self.session.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(AppError::configuration(format!(
                "session.token_ttl_minutes must be at most {MAX_TOKEN_TTL_MINUTES}"
            )));
        }
        if self.auth.token_marker.is_empty() {
            return Err(AppError::configuration("auth.token_marker must not be empty"));
        }
        Ok(())
    }

    /// Whether the session cookie carries the `Secure` attribute.
    pub fn cookie_secure(&self) -> bool {
        self.session
            .secure
            .unwrap_or_else(|| self.environment.is_production())
    }
}
