use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Role stamped into the identity provider's per-user metadata.
///
/// Roles are a closed set: parsing happens once at the identity-provider
/// boundary and an unrecognized value is a typed error, never a silent
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Back-office administrator
    Admin,
    /// Hotel owner with a dashboard gated on completed onboarding
    HotelOwner,
    /// External partner (integrations, resellers)
    Partner,
}

impl Role {
    /// Convert to metadata string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::HotelOwner => "hotel_owner",
            Self::Partner => "partner",
        }
    }

    /// Root of the route tree this role lands on after sign-in
    pub fn home_path(&self) -> &'static str {
        match self {
            Self::Admin => "/admin",
            Self::HotelOwner => "/dashboard",
            Self::Partner => "/partner-dashboard",
        }
    }
}

impl FromStr for Role {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "admin" => Ok(Self::Admin),
            "hotel_owner" => Ok(Self::HotelOwner),
            "partner" => Ok(Self::Partner),
            _ => Err(CoreError::InvalidRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
