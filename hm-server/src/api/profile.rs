//! Profile completeness check.

use crate::AppState;
use crate::api::extractors::Session;
use crate::gate::{self, GateOutcome};

use axum::{Json, extract::State};

/// GET /api/profile/check
///
/// Runs the full onboarding gate, including its auto-heal side effects,
/// and reports what it found.
pub async fn check(
    State(state): State<AppState>,
    Session(user_id): Session,
) -> Json<GateOutcome> {
    let outcome = gate::ensure_onboarded(&state, &user_id).await;
    Json(outcome)
}
