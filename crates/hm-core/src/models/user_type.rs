use crate::{CoreError, Result as CoreErrorResult, Role};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// Business-level account type stored on the user profile.
///
/// Mirrors (but is independently stored from) the identity-provider role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    Hotel,
    Admin,
    Partner,
}

impl UserType {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hotel => "hotel",
            Self::Admin => "admin",
            Self::Partner => "partner",
        }
    }
}

impl From<Role> for UserType {
    fn from(role: Role) -> Self {
        match role {
            Role::Admin => Self::Admin,
            Role::HotelOwner => Self::Hotel,
            Role::Partner => Self::Partner,
        }
    }
}

impl FromStr for UserType {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "hotel" => Ok(Self::Hotel),
            "admin" => Ok(Self::Admin),
            "partner" => Ok(Self::Partner),
            _ => Err(CoreError::InvalidUserType {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for UserType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
