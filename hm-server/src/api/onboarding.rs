//! Onboarding submission endpoint.

use crate::AppState;
use crate::api::error::Result as ApiResult;
use crate::api::extractors::Session;
use crate::workflows::onboarding::{self, OnboardingSubmission};

use axum::{Json, extract::State};
use serde::Deserialize;
use serde_json::{Value, json};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOnboardingRequest {
    pub user_id: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub phone_number: String,
    pub hotel_name: String,
    pub address: String,
    pub city: String,
    #[serde(default)]
    pub state: Option<String>,
    pub country: String,
    #[serde(default)]
    pub postal_code: Option<String>,
}

impl From<SubmitOnboardingRequest> for OnboardingSubmission {
    fn from(req: SubmitOnboardingRequest) -> Self {
        Self {
            user_id: req.user_id,
            first_name: req.first_name,
            last_name: req.last_name,
            email: req.email,
            phone_number: req.phone_number,
            hotel_name: req.hotel_name,
            address: req.address,
            city: req.city,
            state: req.state,
            country: req.country,
            postal_code: req.postal_code,
        }
    }
}

/// POST /api/onboarding
pub async fn submit(
    State(state): State<AppState>,
    Session(user_id): Session,
    Json(request): Json<SubmitOnboardingRequest>,
) -> ApiResult<Json<Value>> {
    let submission = OnboardingSubmission::from(request);
    let hotel_id = onboarding::submit(&state, &user_id, &submission).await?;

    Ok(Json(json!({ "hotelId": hotel_id })))
}
