//! Hotel profile - property details captured during owner onboarding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A hotel owned by a user profile.
///
/// The store enforces at most one hotel per owner; see the onboarding
/// workflow for how resubmission is absorbed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotelProfile {
    pub id: Uuid,
    /// Foreign key to `UserProfile.id`
    pub owner_id: String,
    pub hotel_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: String,
    pub postal_code: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl HotelProfile {
    /// Placeholder row created by the completion gate's auto-heal path
    pub fn placeholder(owner_id: String, email: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner_id,
            hotel_name: "My Hotel".to_string(),
            email,
            phone: String::new(),
            address: String::new(),
            city: String::new(),
            state: None,
            country: String::new(),
            postal_code: None,
            created_at: Utc::now(),
        }
    }
}
