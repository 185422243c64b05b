//! Page handlers.
//!
//! The frontend renders elsewhere; these return minimal JSON stand-ins
//! so the route tree, middleware, and gate are fully exercisable.

use crate::AppState;
use crate::api::extractors::Session;
use crate::gate;

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde_json::json;

pub async fn home() -> Json<serde_json::Value> {
    Json(json!({ "page": "home" }))
}

pub async fn sign_in() -> Json<serde_json::Value> {
    Json(json!({ "page": "sign-in" }))
}

pub async fn sign_up() -> Json<serde_json::Value> {
    Json(json!({ "page": "sign-up" }))
}

pub async fn onboarding() -> Json<serde_json::Value> {
    Json(json!({ "page": "onboarding" }))
}

/// Catch-all for marketing pages
pub async fn marketing() -> Json<serde_json::Value> {
    Json(json!({ "page": "marketing" }))
}

pub async fn admin_home(Session(user_id): Session) -> Json<serde_json::Value> {
    Json(json!({ "page": "admin", "userId": user_id }))
}

/// Hotel owner dashboard. Runs the onboarding completion gate: an
/// incomplete (or unverifiable) profile is sent back to onboarding.
pub async fn dashboard(State(state): State<AppState>, Session(user_id): Session) -> Response {
    let outcome = gate::ensure_onboarded(&state, &user_id).await;

    if !outcome.onboarding_completed {
        return Redirect::temporary("/onboarding").into_response();
    }

    Json(json!({ "page": "dashboard", "userId": user_id })).into_response()
}

/// Onboarding pages inside the dashboard tree; exempt from the gate so
/// a user mid-onboarding is not redirected in a loop.
pub async fn dashboard_onboarding(Session(user_id): Session) -> Json<serde_json::Value> {
    Json(json!({ "page": "dashboard-onboarding", "userId": user_id }))
}

pub async fn partner_dashboard(Session(user_id): Session) -> Json<serde_json::Value> {
    Json(json!({ "page": "partner-dashboard", "userId": user_id }))
}

pub async fn white_labeling(Session(user_id): Session) -> Json<serde_json::Value> {
    Json(json!({ "page": "white-labeling", "userId": user_id }))
}
