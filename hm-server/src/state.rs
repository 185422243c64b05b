//! Shared application state.
//!
//! Every external client lives here and is constructed exactly once at
//! startup; handlers receive the state instead of reaching for globals.

use std::sync::Arc;

use hm_auth::{IdentityProvider, JwtValidator};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub identity: Arc<dyn IdentityProvider>,
    /// None = auth disabled (development mode, X-Identity-Id header)
    pub jwt_validator: Option<Arc<JwtValidator>>,
    /// Signing secret for inbound identity-event webhooks
    pub webhook_secret: Arc<str>,
    /// Identities created with this primary email become admins
    pub admin_email: Option<String>,
}
