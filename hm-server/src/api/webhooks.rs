//! Inbound identity-event webhooks.
//!
//! The signature is verified against the raw body BEFORE any JSON
//! parsing; an unverifiable payload never reaches a deserializer.

use crate::AppState;
use crate::api::error::{ApiError, Result as ApiResult};
use crate::workflows::provisioning::{
    self, IdentityCreatedEvent, IdentityDeletedEvent,
};

use hm_auth::webhook::{WEBHOOK_SIGNATURE_HEADER, verify_signature};

use axum::{Json, body::Bytes, extract::State, http::HeaderMap};
use log::{info, warn};
use serde::Deserialize;
use serde_json::{Value, json};

/// Signed event envelope
#[derive(Debug, Deserialize)]
struct EventEnvelope {
    #[serde(rename = "type")]
    event_type: String,
    data: Value,
}

/// POST /api/webhooks/identity
pub async fn identity_events(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<Json<Value>> {
    let signature = headers
        .get(WEBHOOK_SIGNATURE_HEADER)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::validation("missing webhook signature"))?;

    if !verify_signature(state.webhook_secret.as_bytes(), &body, signature) {
        warn!("Webhook rejected: invalid signature");
        return Err(ApiError::validation("invalid webhook signature"));
    }

    let envelope: EventEnvelope = serde_json::from_slice(&body)
        .map_err(|e| ApiError::validation(format!("malformed event payload: {}", e)))?;

    match envelope.event_type.as_str() {
        "identity.created" => {
            let event: IdentityCreatedEvent = serde_json::from_value(envelope.data)
                .map_err(|e| ApiError::validation(format!("malformed event data: {}", e)))?;
            let outcome = provisioning::handle_identity_created(&state, &event).await?;
            Ok(Json(json!({
                "handled": true,
                "role": outcome.role.as_str(),
                "created": outcome.created,
            })))
        }
        "identity.deleted" => {
            let event: IdentityDeletedEvent = serde_json::from_value(envelope.data)
                .map_err(|e| ApiError::validation(format!("malformed event data: {}", e)))?;
            let deleted = provisioning::handle_identity_deleted(&state, &event).await?;
            Ok(Json(json!({ "handled": true, "deleted": deleted })))
        }
        other => {
            // Unknown event types are acknowledged so the provider
            // does not retry them forever.
            info!("Webhook: ignoring event type '{}'", other);
            Ok(Json(json!({ "handled": false })))
        }
    }
}
