//! Identity provider boundary.
//!
//! The provider is the service of record for authentication and minimal
//! per-user metadata; this system only reads identities and stamps a role.
//! Role strings are parsed exactly once, here, into the closed `Role` enum.

use crate::{AuthError, Result as AuthErrorResult};

use hm_core::Role;

use std::panic::Location;
use std::str::FromStr;

use async_trait::async_trait;
use error_location::ErrorLocation;

/// A user record as held by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: String,
    /// Verified email addresses, primary first
    pub email_addresses: Vec<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// Role from public metadata; `None` means not yet provisioned
    pub role: Option<Role>,
}

impl Identity {
    pub fn primary_email(&self) -> Option<&str> {
        self.email_addresses.first().map(String::as_str)
    }
}

/// Parse the raw role metadata value at the provider boundary.
///
/// Absent metadata means "not yet provisioned"; an unrecognized value is a
/// typed error rather than a silent default.
#[track_caller]
pub fn parse_role(raw: Option<&str>) -> AuthErrorResult<Option<Role>> {
    match raw {
        None | Some("") => Ok(None),
        Some(value) => Role::from_str(value)
            .map(Some)
            .map_err(|_| AuthError::UnknownRole {
                value: value.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
    }
}

/// Privileged server-side operations against the identity provider
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Fetch an identity by id
    async fn fetch(&self, user_id: &str) -> AuthErrorResult<Identity>;

    /// Stamp the role into the identity's public metadata
    async fn set_role(&self, user_id: &str, role: Role) -> AuthErrorResult<()>;

    /// Clear the role metadata (compensating action during provisioning)
    async fn clear_role(&self, user_id: &str) -> AuthErrorResult<()>;

    /// Update the identity's display name
    async fn update_name(
        &self,
        user_id: &str,
        first_name: &str,
        last_name: &str,
    ) -> AuthErrorResult<()>;
}
