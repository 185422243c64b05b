use crate::{ConfigError, ConfigErrorResult, DEFAULT_AUTH_ENABLED};

use std::path::Path;

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// When disabled, the server trusts the X-Identity-Id header
    /// (development mode only)
    pub enabled: bool,
    /// HS256 shared secret for session token validation
    pub jwt_secret: Option<String>,
    /// Path to an RS256 public key PEM, relative to the config directory
    pub jwt_public_key_path: Option<String>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            enabled: DEFAULT_AUTH_ENABLED,
            jwt_secret: None,
            jwt_public_key_path: None,
        }
    }
}

impl AuthConfig {
    pub fn validate(&self, config_dir: &Path) -> ConfigErrorResult<()> {
        if !self.enabled {
            return Ok(());
        }

        match (&self.jwt_secret, &self.jwt_public_key_path) {
            (None, None) => Err(ConfigError::auth(
                "auth.enabled requires auth.jwt_secret or auth.jwt_public_key_path",
            )),
            (Some(_), Some(_)) => Err(ConfigError::auth(
                "auth.jwt_secret and auth.jwt_public_key_path are mutually exclusive",
            )),
            (Some(secret), None) if secret.len() < 32 => Err(ConfigError::auth(
                "auth.jwt_secret must be at least 32 bytes",
            )),
            (None, Some(path)) if !config_dir.join(path).exists() => Err(ConfigError::auth(
                format!("auth.jwt_public_key_path does not exist: {}", path),
            )),
            _ => Ok(()),
        }
    }
}
