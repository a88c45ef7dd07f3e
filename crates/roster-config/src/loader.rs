//! Configuration loader with layered sources.

use crate::{format_validation_errors, AppConfig, ConfigValidator, DatabaseConfig};
use config::{Config, ConfigError, Environment, File};
use roster_core::RosterError;
use std::path::Path;
use tracing::{debug, info, warn};

/// Loads and validates the configuration once at startup.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AppConfig,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Local overrides
    /// 4. Environment variables with `ROSTER__` prefix
    /// 5. `DATABASE_URL`, `ALLOWED_ORIGINS` and `FRONTEND_URL`
    pub fn new(config_dir: impl AsRef<str>) -> Result<Self, RosterError> {
        let config = Self::load_config(config_dir.as_ref())?;
        Ok(Self { config })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, RosterError> {
        Self::new("./config")
    }

    /// Returns the loaded configuration.
    #[must_use]
    pub fn get(&self) -> &AppConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    #[must_use]
    pub fn into_config(self) -> AppConfig {
        self.config
    }

    fn load_config(config_dir: &str) -> Result<AppConfig, RosterError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file found or error loading it: {}", e);
        }

        let environment = std::env::var("ROSTER_ENVIRONMENT").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut app_config = Self::load_layers(config_dir, &environment)?;
        apply_env_overrides(&mut app_config, |key| std::env::var(key).ok());

        Self::validate_config(&app_config)?;

        Ok(app_config)
    }

    /// Merges the file layers and the prefixed environment.
    pub(crate) fn load_layers(config_dir: &str, environment: &str) -> Result<AppConfig, RosterError> {
        let mut builder = Config::builder();

        for name in ["default", environment, "local"] {
            let path = format!("{}/{}.toml", config_dir, name);
            if Path::new(&path).exists() {
                debug!("Loading config from: {}", path);
                builder = builder.add_source(File::with_name(&path).required(false));
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ROSTER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .and_then(|c| c.try_deserialize::<AppConfig>())
            .map_err(config_error_to_roster_error)
    }

    fn validate_config(config: &AppConfig) -> Result<(), RosterError> {
        if config.server.allows_any_origin() {
            warn!("CORS allows any origin; credentials will not be sent by browsers");
        }

        ConfigValidator::validate(config)
            .map_err(|errors| RosterError::Configuration(format_validation_errors(&errors)))
    }
}

/// Applies the unprefixed deployment variables on top of a loaded config.
///
/// * `DATABASE_URL`: `postgres://`/`postgresql://` and `sqlite:` URLs are
///   used as given; any other value falls back to the local SQLite file.
/// * `ALLOWED_ORIGINS`: comma-separated list replacing the configured origins.
/// * `FRONTEND_URL`: one more allowed origin.
pub fn apply_env_overrides<F>(config: &mut AppConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|u| !u.trim().is_empty()) {
        config.database.url = resolve_database_url(url.trim());
    }

    if let Some(origins) = lookup("ALLOWED_ORIGINS") {
        let origins: Vec<String> = origins
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect();
        if !origins.is_empty() {
            config.server.cors_origins = origins;
        }
    }

    if let Some(frontend) = lookup("FRONTEND_URL") {
        let frontend = frontend.trim();
        if !frontend.is_empty() && !config.server.cors_origins.iter().any(|o| o == frontend) {
            config.server.cors_origins.push(frontend.to_string());
        }
    }
}

fn resolve_database_url(url: &str) -> String {
    if url.starts_with("postgres://") || url.starts_with("postgresql://") || url.starts_with("sqlite:") {
        url.to_string()
    } else {
        warn!("Unsupported DATABASE_URL scheme, using local SQLite database");
        DatabaseConfig::LOCAL_SQLITE_URL.to_string()
    }
}

fn config_error_to_roster_error(err: ConfigError) -> RosterError {
    RosterError::Configuration(err.to_string())
}
