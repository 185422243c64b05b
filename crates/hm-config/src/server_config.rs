use crate::{ConfigErrorResult, DEFAULT_HOST, DEFAULT_PORT};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: String::from(DEFAULT_HOST),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        // Port 0 means "auto-assign" - OS picks an available port.
        // Ports 1-1023 are privileged and rejected.
        if self.port != 0 && self.port < crate::MIN_PORT {
            return Err(crate::ConfigError::server(format!(
                "server.port must be 0 (auto) or >= {}",
                crate::MIN_PORT
            )));
        }
        Ok(())
    }
}
