//! User profile - the business-level record mirroring an external identity.

use crate::{OnboardingStatus, ProfileStatus, UserType};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One row per identity, keyed by the identity provider's opaque user id.
///
/// Name, email, and phone are denormalized copies of identity data; the
/// identity provider remains the source of record for authentication.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Equals the identity provider's user id (1:1)
    pub id: String,
    pub user_type: UserType,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: Option<String>,
    pub status: ProfileStatus,
    pub onboarding_status: OnboardingStatus,
    /// Free-form attributes (partner type, company name, verification flag)
    pub metadata: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile with the given identity fields and default statuses
    pub fn new(id: String, user_type: UserType, first_name: String, last_name: String, email: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            user_type,
            first_name,
            last_name,
            email,
            phone_number: None,
            status: ProfileStatus::Pending,
            onboarding_status: OnboardingStatus::Pending,
            metadata: serde_json::Value::Null,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether dashboard access is permitted for hotel accounts
    pub fn is_onboarded(&self) -> bool {
        self.onboarding_status == OnboardingStatus::Completed
    }
}
