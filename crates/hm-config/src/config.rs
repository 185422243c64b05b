use crate::{
    AuthConfig, ConfigError, ConfigErrorResult, DatabaseConfig, IdentityConfig, LoggingConfig,
    ServerConfig,
};

use std::path::PathBuf;
use std::str::FromStr;

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub identity: IdentityConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Load config with full production error handling.
    ///
    /// Loading order:
    /// 1. Check for HM_CONFIG_DIR env var, else use ./.hostly/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply HM_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        // Auto-create config directory
        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join("config.toml");

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    /// Load and parse TOML file with detailed error context.
    fn load_toml(path: &PathBuf) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.clone(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.clone(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: HM_CONFIG_DIR env var > ./.hostly/ (relative to cwd)
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        if let Ok(dir) = std::env::var("HM_CONFIG_DIR") {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(".hostly"))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let config_dir = Self::config_dir()?;

        self.server.validate()?;
        self.auth.validate(&config_dir)?;
        self.identity.validate()?;

        // Validate database path doesn't escape config dir
        let db_path = std::path::Path::new(&self.database.path);
        if db_path.is_absolute() || self.database.path.contains("..") {
            return Err(ConfigError::database(
                "database.path must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }

    /// Get absolute path to database file.
    pub fn database_path(&self) -> Result<PathBuf, ConfigError> {
        let config_dir = Self::config_dir()?;
        Ok(config_dir.join(&self.database.path))
    }

    /// Get bind address as string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!("  server: {}:{}", self.server.host, self.server.port);
        info!("  database: {}", self.database.path);

        let auth_type = if self.auth.jwt_secret.is_some() {
            "HS256"
        } else if self.auth.jwt_public_key_path.is_some() {
            "RS256"
        } else {
            "none"
        };
        info!(
            "  auth: {} ({})",
            if self.auth.enabled {
                "enabled"
            } else {
                "disabled"
            },
            auth_type
        );

        info!(
            "  identity: provider={}, admin_email={}, timeout={}s",
            if self.identity.provider_url.is_some() {
                "http"
            } else {
                "in-memory"
            },
            if self.identity.admin_email.is_some() {
                "configured"
            } else {
                "unset"
            },
            self.identity.provider_timeout_secs
        );

        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("HM_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("HM_SERVER_PORT", &mut self.server.port);

        // Database
        Self::apply_env_string("HM_DATABASE_PATH", &mut self.database.path);

        // Auth
        Self::apply_env_bool("HM_AUTH_ENABLED", &mut self.auth.enabled);
        Self::apply_env_option_string("HM_AUTH_JWT_SECRET", &mut self.auth.jwt_secret);
        Self::apply_env_option_string(
            "HM_AUTH_JWT_PUBLIC_KEY_PATH",
            &mut self.auth.jwt_public_key_path,
        );

        // Identity provider
        Self::apply_env_option_string(
            "HM_IDENTITY_PROVIDER_URL",
            &mut self.identity.provider_url,
        );
        Self::apply_env_option_string("HM_IDENTITY_SECRET_KEY", &mut self.identity.secret_key);
        Self::apply_env_option_string(
            "HM_IDENTITY_WEBHOOK_SECRET",
            &mut self.identity.webhook_secret,
        );
        Self::apply_env_option_string("HM_IDENTITY_ADMIN_EMAIL", &mut self.identity.admin_email);
        Self::apply_env_parse(
            "HM_IDENTITY_TIMEOUT_SECS",
            &mut self.identity.provider_timeout_secs,
        );

        // Logging
        Self::apply_env_parse("HM_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("HM_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("HM_LOG_FILE", &mut self.logging.file);
    }

    fn apply_env_string(key: &str, target: &mut String) {
        if let Ok(value) = std::env::var(key) {
            *target = value;
        }
    }

    fn apply_env_option_string(key: &str, target: &mut Option<String>) {
        if let Ok(value) = std::env::var(key) {
            *target = Some(value);
        }
    }

    fn apply_env_bool(key: &str, target: &mut bool) {
        if let Ok(value) = std::env::var(key) {
            match value.to_lowercase().as_str() {
                "1" | "true" | "yes" => *target = true,
                "0" | "false" | "no" => *target = false,
                _ => {}
            }
        }
    }

    fn apply_env_parse<T: FromStr>(key: &str, target: &mut T) {
        if let Ok(value) = std::env::var(key) {
            if let Ok(parsed) = value.parse::<T>() {
                *target = parsed;
            }
        }
    }
}
