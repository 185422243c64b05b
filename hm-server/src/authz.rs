//! Role-based request gating.
//!
//! Runs once per inbound request, before any page logic. The middleware
//! deliberately fails OPEN on identity-provider or store errors: it
//! optimizes for availability, while the page-level onboarding gate
//! (`gate.rs`) fails closed and is the last line of defense. Do not "fix"
//! this layer to fail closed.

use crate::AppState;

use hm_auth::IdentityProvider as _;
use hm_core::Role;
use hm_db::UserProfileRepository;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use hm_core::OnboardingStatus;
use log::{debug, warn};

/// Development-mode identity header, honored only when JWT auth is disabled
pub const IDENTITY_HEADER: &str = "X-Identity-Id";

/// Route trees reserved for a single role
const ROLE_TREES: &[(&str, Role)] = &[
    ("/admin", Role::Admin),
    ("/dashboard", Role::HotelOwner),
    ("/partner-dashboard", Role::Partner),
    ("/white-labeling", Role::Admin),
];

const PUBLIC_PATHS: &[&str] = &[
    "/",
    "/sign-in",
    "/sign-up",
    "/onboarding",
    "/about",
    "/contact",
    "/pricing",
    "/health",
    "/live",
    "/ready",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// No auth required
    Public,
    /// Never auth-checked here; the handler performs its own auth
    /// (webhooks verify signatures, API handlers extract sessions)
    Ignored,
    /// Requires an authenticated session with a matching role
    Protected,
}

/// Authorization decision for a protected path.
///
/// `Defer` allows the request through and leaves enforcement to
/// downstream page logic (the two-tier fail-open/fail-closed split).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorizationDecision {
    Allow,
    Deny(&'static str),
    Defer,
}

fn in_tree(path: &str, root: &str) -> bool {
    path.strip_prefix(root)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}

pub fn classify_path(path: &str) -> RouteClass {
    if in_tree(path, "/api") {
        return RouteClass::Ignored;
    }
    if ROLE_TREES.iter().any(|(root, _)| in_tree(path, root)) {
        return RouteClass::Protected;
    }
    if PUBLIC_PATHS.contains(&path) {
        return RouteClass::Public;
    }
    // Marketing catch-all
    RouteClass::Public
}

/// Decide access to a reserved route tree for the given role.
pub fn authorize(role: Option<Role>, path: &str) -> AuthorizationDecision {
    let Some(role) = role else {
        // Unresolved role (provider error or unprovisioned identity):
        // fail open and let the page gate decide.
        return AuthorizationDecision::Defer;
    };

    for (root, required) in ROLE_TREES {
        if in_tree(path, root) {
            return if role == *required {
                AuthorizationDecision::Allow
            } else {
                AuthorizationDecision::Deny(role.home_path())
            };
        }
    }

    AuthorizationDecision::Defer
}

/// Resolve the caller's identity id from the request headers.
///
/// With auth enabled this validates the Bearer session token; in
/// development mode the X-Identity-Id header is trusted as-is.
pub fn resolve_identity_id(state: &AppState, headers: &HeaderMap) -> Option<String> {
    if let Some(validator) = &state.jwt_validator {
        let header = headers.get(http::header::AUTHORIZATION)?.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?;
        match validator.validate(token) {
            Ok(claims) => Some(claims.sub),
            Err(e) => {
                debug!("Session token rejected: {}", e);
                None
            }
        }
    } else {
        headers
            .get(IDENTITY_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(String::from)
    }
}

/// Middleware entry point applied to the whole router.
pub async fn role_router(State(state): State<AppState>, req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();

    let class = classify_path(&path);
    if class == RouteClass::Ignored {
        return next.run(req).await;
    }

    let caller = resolve_identity_id(&state, req.headers());

    // Authenticated callers landing on the root are sent to their role home.
    if path == "/" {
        if let Some(ref user_id) = caller {
            match state.identity.fetch(user_id).await {
                Ok(identity) => {
                    if let Some(role) = identity.role {
                        return Redirect::temporary(role.home_path()).into_response();
                    }
                }
                Err(e) => warn!("Role resolution failed for {} on /: {}", user_id, e),
            }
        }
        return next.run(req).await;
    }

    if class == RouteClass::Public {
        return next.run(req).await;
    }

    let Some(user_id) = caller else {
        return Redirect::temporary("/sign-in").into_response();
    };

    let role = match state.identity.fetch(&user_id).await {
        Ok(identity) => identity.role,
        Err(e) => {
            // Fail open: availability over correctness at this layer.
            warn!("Role resolution failed for {}: {}", user_id, e);
            None
        }
    };

    match authorize(role, &path) {
        AuthorizationDecision::Allow => {}
        AuthorizationDecision::Deny(target) => {
            return Redirect::temporary(target).into_response();
        }
        AuthorizationDecision::Defer => return next.run(req).await,
    }

    // Hotel owners must have completed onboarding before reaching the
    // dashboard, except for the onboarding pages themselves.
    if role == Some(Role::HotelOwner)
        && in_tree(&path, "/dashboard")
        && !in_tree(&path, "/dashboard/onboarding")
    {
        let users = UserProfileRepository::new(state.pool.clone());
        match users.onboarding_status(&user_id).await {
            Ok(OnboardingStatus::Completed) => {}
            Ok(OnboardingStatus::Pending) => {
                return Redirect::temporary("/onboarding").into_response();
            }
            Err(e) if e.is_not_found() => {
                return Redirect::temporary("/onboarding").into_response();
            }
            Err(e) => {
                // Store outage: fail open, the page gate fails closed.
                warn!("Onboarding lookup failed for {}: {}", user_id, e);
            }
        }
    }

    next.run(req).await
}
