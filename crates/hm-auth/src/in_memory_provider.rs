//! In-memory identity provider for development mode and tests.

use crate::{AuthError, Identity, IdentityProvider, Result as AuthErrorResult};

use hm_core::Role;

use std::collections::HashMap;
use std::panic::Location;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use error_location::ErrorLocation;
use tokio::sync::RwLock;

/// Identity provider backed by a process-local map.
///
/// `set_unavailable` lets tests simulate a provider outage; every call then
/// fails with `ProviderUnavailable`.
#[derive(Default)]
pub struct InMemoryIdentityProvider {
    identities: RwLock<HashMap<String, Identity>>,
    unavailable: AtomicBool,
}

impl InMemoryIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, identity: Identity) {
        self.identities
            .write()
            .await
            .insert(identity.id.clone(), identity);
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    #[track_caller]
    fn check_available(&self) -> AuthErrorResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AuthError::ProviderUnavailable {
                message: "simulated outage".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for InMemoryIdentityProvider {
    async fn fetch(&self, user_id: &str) -> AuthErrorResult<Identity> {
        self.check_available()?;
        self.identities
            .read()
            .await
            .get(user_id)
            .cloned()
            .ok_or_else(|| AuthError::IdentityNotFound {
                user_id: user_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    async fn set_role(&self, user_id: &str, role: Role) -> AuthErrorResult<()> {
        self.check_available()?;
        let mut identities = self.identities.write().await;
        let identity =
            identities
                .get_mut(user_id)
                .ok_or_else(|| AuthError::IdentityNotFound {
                    user_id: user_id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        identity.role = Some(role);
        Ok(())
    }

    async fn clear_role(&self, user_id: &str) -> AuthErrorResult<()> {
        self.check_available()?;
        let mut identities = self.identities.write().await;
        let identity =
            identities
                .get_mut(user_id)
                .ok_or_else(|| AuthError::IdentityNotFound {
                    user_id: user_id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        identity.role = None;
        Ok(())
    }

    async fn update_name(
        &self,
        user_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> AuthErrorResult<()> {
        self.check_available()?;
        let mut identities = self.identities.write().await;
        let identity =
            identities
                .get_mut(user_id)
                .ok_or_else(|| AuthError::IdentityNotFound {
                    user_id: user_id.to_string(),
                    location: ErrorLocation::from(Location::caller()),
                })?;
        identity.first_name = Some(first_name.to_string());
        identity.last_name = Some(last_name.to_string());
        Ok(())
    }
}
