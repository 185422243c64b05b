//! Identity-event provisioning.
//!
//! Consumes `user.created` / `user.deleted` events from the identity
//! provider. Delivery is at-least-once, so every step is idempotent:
//! role stamping overwrites the same value, and the profile insert is
//! keyed by identity id with conflicts absorbed.
//!
//! Ordering is deliberate: the role is stamped BEFORE the profile row is
//! written. A signed-in user with a role but no profile is repaired by
//! the dashboard gate; a profile row with no role would strand the user
//! on public pages.

use crate::AppState;
use crate::workflows::{Result as WorkflowResult, WorkflowError};

use hm_auth::IdentityProvider as _;
use hm_core::{OnboardingStatus, ProfileStatus, Role, UserProfile, UserType};
use hm_db::UserProfileRepository;

use log::{error, info, warn};
use serde::Deserialize;

/// `user.created` event payload, as delivered by the identity provider
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityCreatedEvent {
    pub id: String,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub email_address: String,
}

impl IdentityCreatedEvent {
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses
            .first()
            .map(|e| e.email_address.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProvisionOutcome {
    pub role: Role,
    /// False when the profile row already existed (duplicate delivery)
    pub created: bool,
}

/// Provision a newly created identity: stamp its role and insert the
/// matching profile row.
pub async fn handle_identity_created(
    state: &AppState,
    event: &IdentityCreatedEvent,
) -> WorkflowResult<ProvisionOutcome> {
    if event.id.is_empty() {
        return Err(WorkflowError::InvalidPayload {
            field: "id",
            message: "identity id must not be empty".to_string(),
        });
    }

    let email = match event.primary_email() {
        Some(email) => email.to_string(),
        None => {
            return Err(WorkflowError::InvalidPayload {
                field: "email_addresses",
                message: "at least one email address is required".to_string(),
            });
        }
    };

    let is_admin = state
        .admin_email
        .as_deref()
        .is_some_and(|admin| admin.eq_ignore_ascii_case(&email));

    let role = if is_admin { Role::Admin } else { Role::HotelOwner };

    state
        .identity
        .set_role(&event.id, role)
        .await
        .map_err(|e| WorkflowError::Upstream {
            step: "assign role",
            message: e.to_string(),
        })?;

    let mut profile = UserProfile::new(
        event.id.clone(),
        UserType::from(role),
        event.first_name.clone().unwrap_or_default(),
        event.last_name.clone().unwrap_or_default(),
        email,
    );

    if is_admin {
        // Admins have no onboarding flow; they are born active.
        profile.status = ProfileStatus::Active;
        profile.onboarding_status = OnboardingStatus::Completed;
    }

    let created = match UserProfileRepository::new(state.pool.clone())
        .insert_if_absent(&profile)
        .await
    {
        Ok(created) => created,
        Err(e) => {
            error!("Provisioning: profile insert failed for {}: {}", event.id, e);
            // Compensate the role stamp so a retry starts from scratch.
            if let Err(clear_err) = state.identity.clear_role(&event.id).await {
                warn!(
                    "Provisioning: role unwind failed for {}: {}",
                    event.id, clear_err
                );
            }
            return Err(WorkflowError::Upstream {
                step: "create profile",
                message: e.to_string(),
            });
        }
    };

    if created {
        info!("Provisioned {} as {}", event.id, role);
    } else {
        info!("Provisioning: {} already exists, event absorbed", event.id);
    }

    Ok(ProvisionOutcome { role, created })
}

/// `user.deleted` event payload
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityDeletedEvent {
    pub id: String,
}

/// Remove the profile for a deleted identity. Hotel and partner rows go
/// with it via cascade; a missing profile is a no-op.
pub async fn handle_identity_deleted(
    state: &AppState,
    event: &IdentityDeletedEvent,
) -> WorkflowResult<bool> {
    if event.id.is_empty() {
        return Err(WorkflowError::InvalidPayload {
            field: "id",
            message: "identity id must not be empty".to_string(),
        });
    }

    let deleted = UserProfileRepository::new(state.pool.clone())
        .delete(&event.id)
        .await
        .map_err(|e| WorkflowError::Upstream {
            step: "delete profile",
            message: e.to_string(),
        })?;

    if deleted {
        info!("Deprovisioned {}", event.id);
    }

    Ok(deleted)
}
