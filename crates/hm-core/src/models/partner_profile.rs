//! Partner profile - external partner details linked to a partner account.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartnerProfile {
    pub id: Uuid,
    /// Foreign key to `UserProfile.id` (user_type = partner)
    pub owner_id: String,
    pub partner_type: String,
    pub company_name: String,
    pub website: Option<String>,
    pub description: Option<String>,
    pub is_verified: bool,
    pub created_at: DateTime<Utc>,
}
