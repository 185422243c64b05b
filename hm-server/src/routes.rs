//! Router assembly.

use crate::{AppState, api, authz, health, pages};

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;

pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/webhooks/identity", post(api::webhooks::identity_events))
        .route("/onboarding", post(api::onboarding::submit))
        .route("/profile/check", get(api::profile::check))
        .route("/partners", post(api::partners::create));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .route("/", get(pages::home))
        .route("/sign-in", get(pages::sign_in))
        .route("/sign-up", get(pages::sign_up))
        .route("/onboarding", get(pages::onboarding))
        .route("/admin", get(pages::admin_home))
        .route("/admin/{*rest}", get(pages::admin_home))
        .route("/dashboard", get(pages::dashboard))
        .route("/dashboard/onboarding", get(pages::dashboard_onboarding))
        .route(
            "/dashboard/onboarding/{*rest}",
            get(pages::dashboard_onboarding),
        )
        .route("/dashboard/{*rest}", get(pages::dashboard))
        .route("/partner-dashboard", get(pages::partner_dashboard))
        .route("/partner-dashboard/{*rest}", get(pages::partner_dashboard))
        .route("/white-labeling", get(pages::white_labeling))
        .route("/white-labeling/{*rest}", get(pages::white_labeling))
        .nest("/api", api_routes)
        .fallback(pages::marketing)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            authz::role_router,
        ))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
