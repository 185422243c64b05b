use crate::{ConfigError, ConfigErrorResult, DEFAULT_PROVIDER_TIMEOUT_SECS};

use serde::Deserialize;

/// Identity provider and provisioning settings.
///
/// `provider_url` unset selects the in-memory provider (development mode).
/// The webhook secret is always required: identity events cannot be
/// accepted unverified.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IdentityConfig {
    /// Base URL of the hosted identity provider's server API
    pub provider_url: Option<String>,
    /// Privileged server-side API key for the provider
    pub secret_key: Option<String>,
    /// Signing secret for inbound identity-event webhooks
    pub webhook_secret: Option<String>,
    /// Identities created with this primary email are provisioned as admins
    pub admin_email: Option<String>,
    /// Per-call timeout for provider requests
    pub provider_timeout_secs: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            provider_url: None,
            secret_key: None,
            webhook_secret: None,
            admin_email: None,
            provider_timeout_secs: DEFAULT_PROVIDER_TIMEOUT_SECS,
        }
    }
}

impl IdentityConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        match &self.webhook_secret {
            None => {
                return Err(ConfigError::identity(
                    "identity.webhook_secret is required",
                ));
            }
            Some(secret) if secret.is_empty() => {
                return Err(ConfigError::identity(
                    "identity.webhook_secret cannot be empty",
                ));
            }
            Some(_) => {}
        }

        if self.provider_url.is_some() && self.secret_key.is_none() {
            return Err(ConfigError::identity(
                "identity.provider_url requires identity.secret_key",
            ));
        }

        if self.provider_timeout_secs == 0 {
            return Err(ConfigError::identity(
                "identity.provider_timeout_secs must be > 0",
            ));
        }

        Ok(())
    }
}
