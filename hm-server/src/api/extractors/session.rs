//! Authenticated-session extractor for API handlers.
//!
//! API routes bypass the page middleware, so each handler authenticates
//! via this extractor instead. Resolution follows the same rules as the
//! middleware: Bearer JWT when auth is enabled, the development identity
//! header otherwise.

use crate::AppState;
use crate::api::error::ApiError;
use crate::authz::resolve_identity_id;

use axum::extract::FromRequestParts;
use http::request::Parts;

/// The authenticated caller's identity id.
#[derive(Debug, Clone)]
pub struct Session(pub String);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        resolve_identity_id(state, &parts.headers)
            .map(Session)
            .ok_or_else(|| ApiError::unauthorized("Authentication required"))
    }
}
