//! Partner account creation.
//!
//! Requires a session but no particular role. Tightening this to
//! admin-only is tracked in DESIGN.md.

use crate::AppState;
use crate::api::error::{ApiError, Result as ApiResult};
use crate::api::extractors::Session;

use hm_core::{
    OnboardingStatus, PartnerProfile, ProfileStatus, UserProfile, UserType,
};
use hm_db::{PartnerProfileRepository, UserProfileRepository};

use axum::{Json, extract::State};
use chrono::Utc;
use log::info;
use serde::Deserialize;
use serde_json::{Value, json};
use uuid::Uuid;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub company_name: String,
    pub partner_type: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl CreatePartnerRequest {
    fn validate(&self) -> ApiResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(ApiError::Validation {
                message: "must not be empty".to_string(),
                field: Some("firstName"),
            });
        }
        if self.last_name.trim().is_empty() {
            return Err(ApiError::Validation {
                message: "must not be empty".to_string(),
                field: Some("lastName"),
            });
        }
        if !self.email.contains('@') {
            return Err(ApiError::Validation {
                message: "must be a valid email address".to_string(),
                field: Some("email"),
            });
        }
        if self.company_name.trim().is_empty() {
            return Err(ApiError::Validation {
                message: "must not be empty".to_string(),
                field: Some("companyName"),
            });
        }
        if self.partner_type.trim().is_empty() {
            return Err(ApiError::Validation {
                message: "must not be empty".to_string(),
                field: Some("partnerType"),
            });
        }
        Ok(())
    }
}

/// POST /api/partners
pub async fn create(
    State(state): State<AppState>,
    Session(caller): Session,
    Json(request): Json<CreatePartnerRequest>,
) -> ApiResult<Json<Value>> {
    request.validate()?;

    let owner_id = format!("partner_{}", Uuid::new_v4());

    let mut profile = UserProfile::new(
        owner_id.clone(),
        UserType::Partner,
        request.first_name.clone(),
        request.last_name.clone(),
        request.email.clone(),
    );
    profile.status = ProfileStatus::Active;
    profile.onboarding_status = OnboardingStatus::Completed;
    profile.metadata = json!({
        "companyName": request.company_name,
        "partnerType": request.partner_type,
    });

    UserProfileRepository::new(state.pool.clone())
        .insert_if_absent(&profile)
        .await?;

    let partner = PartnerProfile {
        id: Uuid::new_v4(),
        owner_id: owner_id.clone(),
        partner_type: request.partner_type.clone(),
        company_name: request.company_name.clone(),
        website: request.website.clone(),
        description: request.description.clone(),
        is_verified: false,
        created_at: Utc::now(),
    };

    PartnerProfileRepository::new(state.pool.clone())
        .insert(&partner)
        .await?;

    info!(
        "Partner {} ({}) created by {}",
        partner.id, partner.company_name, caller
    );

    Ok(Json(json!({ "partnerId": partner.id })))
}
