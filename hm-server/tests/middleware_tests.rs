mod common;

use common::*;

use hm_core::{OnboardingStatus, ProfileStatus, Role, UserProfile, UserType};
use hm_db::UserProfileRepository;

use http::StatusCode;
use tower::ServiceExt;

/// A provisioned hotel owner with the given onboarding state
async fn seed_owner(app: &TestApp, id: &str, onboarded: bool) {
    app.provider
        .insert(identity(
            id,
            &format!("{}@example.com", id),
            Some(Role::HotelOwner),
        ))
        .await;

    let mut profile = UserProfile::new(
        id.to_string(),
        UserType::Hotel,
        "Grace".to_string(),
        "Hopper".to_string(),
        format!("{}@example.com", id),
    );
    if onboarded {
        profile.status = ProfileStatus::Active;
        profile.onboarding_status = OnboardingStatus::Completed;
    }

    UserProfileRepository::new(app.state.pool.clone())
        .insert_if_absent(&profile)
        .await
        .unwrap();
}

#[tokio::test]
async fn test_no_session_dashboard_redirects_to_sign_in() {
    let app = spawn_app().await;

    let response = app.router.clone().oneshot(get("/dashboard")).await.unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_header(&response).as_deref(), Some("/sign-in"));
}

#[tokio::test]
async fn test_marketing_pages_public() {
    let app = spawn_app().await;

    let response = app.router.clone().oneshot(get("/pricing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app.router.clone().oneshot(get("/sign-in")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_allowed_in_admin_tree() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("admin_1", ADMIN_EMAIL, Some(Role::Admin)))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/admin/users", "admin_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_admin_allowed_in_white_labeling() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("admin_1", ADMIN_EMAIL, Some(Role::Admin)))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/white-labeling", "admin_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_hotel_owner_in_admin_tree_sent_home() {
    let app = spawn_app().await;
    seed_owner(&app, "owner_1", true).await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/admin", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_header(&response).as_deref(), Some("/dashboard"));
}

#[tokio::test]
async fn test_partner_in_dashboard_sent_home() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("partner_1", "p@example.com", Some(Role::Partner)))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard/bookings", "partner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        location_header(&response).as_deref(),
        Some("/partner-dashboard")
    );
}

#[tokio::test]
async fn test_partner_allowed_in_partner_dashboard() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("partner_1", "p@example.com", Some(Role::Partner)))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/partner-dashboard", "partner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_onboarded_owner_allowed_in_dashboard() {
    let app = spawn_app().await;
    seed_owner(&app, "owner_1", true).await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_pending_owner_redirected_to_onboarding() {
    let app = spawn_app().await;
    seed_owner(&app, "owner_1", false).await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard/bookings", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_header(&response).as_deref(), Some("/onboarding"));
}

#[tokio::test]
async fn test_pending_owner_allowed_in_dashboard_onboarding() {
    let app = spawn_app().await;
    seed_owner(&app, "owner_1", false).await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard/onboarding", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_owner_without_profile_redirected_to_onboarding() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("owner_1", "o@example.com", Some(Role::HotelOwner)))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_header(&response).as_deref(), Some("/onboarding"));
}

#[tokio::test]
async fn test_provider_outage_fails_open() {
    let app = spawn_app().await;
    seed_owner(&app, "owner_1", true).await;
    app.provider.set_unavailable(true);

    // Middleware fails open; the page gate still verifies the store
    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_store_outage_dashboard_never_rendered() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("owner_1", "o@example.com", Some(Role::HotelOwner)))
        .await;

    sqlx::query("DROP TABLE hotel_profiles")
        .execute(&app.state.pool)
        .await
        .unwrap();
    sqlx::query("DROP TABLE user_profiles")
        .execute(&app.state.pool)
        .await
        .unwrap();

    // Middleware fails open, the page gate fails closed: the net
    // result is a redirect, never a rendered dashboard.
    let response = app
        .router
        .clone()
        .oneshot(get_as("/dashboard", "owner_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_header(&response).as_deref(), Some("/onboarding"));
}

#[tokio::test]
async fn test_root_redirects_authenticated_admin_home() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("admin_1", ADMIN_EMAIL, Some(Role::Admin)))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(get_as("/", "admin_1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(location_header(&response).as_deref(), Some("/admin"));
}

#[tokio::test]
async fn test_root_serves_anonymous_visitor() {
    let app = spawn_app().await;

    let response = app.router.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_api_routes_skip_redirects() {
    let app = spawn_app().await;

    // No session: the handler's own auth answers, not a redirect
    let response = app
        .router
        .clone()
        .oneshot(get("/api/profile/check"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
