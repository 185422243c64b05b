mod common;

use common::*;

use hm_auth::IdentityProvider as _;
use hm_core::{OnboardingStatus, ProfileStatus, Role, UserType};
use hm_db::{HotelProfileRepository, UserProfileRepository};

use axum::body::Body;
use http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

fn created_event(id: &str, email: &str) -> serde_json::Value {
    json!({
        "type": "identity.created",
        "data": {
            "id": id,
            "email_addresses": [{ "email_address": email }],
            "first_name": "Grace",
            "last_name": "Hopper",
        }
    })
}

#[tokio::test]
async fn test_created_event_provisions_hotel_owner() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("user_1", "grace@example.com", None))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&created_event("user_1", "grace@example.com")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "hotel_owner");
    assert_eq!(body["created"], true);

    let fetched = app.provider.fetch("user_1").await.unwrap();
    assert_eq!(fetched.role, Some(Role::HotelOwner));

    let profile = UserProfileRepository::new(app.state.pool.clone())
        .find_by_id("user_1")
        .await
        .unwrap()
        .expect("profile row");
    assert_eq!(profile.user_type, UserType::Hotel);
    assert_eq!(profile.status, ProfileStatus::Pending);
    assert_eq!(profile.onboarding_status, OnboardingStatus::Pending);
    assert_eq!(profile.email, "grace@example.com");
}

#[tokio::test]
async fn test_created_event_without_email_rejected() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("user_1", "grace@example.com", None))
        .await;

    let envelope = json!({
        "type": "identity.created",
        "data": {
            "id": "user_1",
            "email_addresses": [],
            "first_name": "Grace",
            "last_name": "Hopper",
        }
    });

    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&envelope))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(body["error"]["field"], "email_addresses");

    // Rejected before any write: no profile row, no role stamp
    let profile = UserProfileRepository::new(app.state.pool.clone())
        .find_by_id("user_1")
        .await
        .unwrap();
    assert!(profile.is_none());
    assert_eq!(app.provider.fetch("user_1").await.unwrap().role, None);
}

#[tokio::test]
async fn test_admin_email_provisions_active_admin() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("admin_1", ADMIN_EMAIL, None))
        .await;

    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&created_event("admin_1", ADMIN_EMAIL)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["role"], "admin");

    let profile = UserProfileRepository::new(app.state.pool.clone())
        .find_by_id("admin_1")
        .await
        .unwrap()
        .expect("profile row");
    assert_eq!(profile.user_type, UserType::Admin);
    assert_eq!(profile.status, ProfileStatus::Active);
    assert_eq!(profile.onboarding_status, OnboardingStatus::Completed);

    // Admins never get a hotel row
    assert!(
        !HotelProfileRepository::new(app.state.pool.clone())
            .exists_for_owner("admin_1")
            .await
            .unwrap()
    );
}

#[tokio::test]
async fn test_admin_email_match_is_case_insensitive() {
    let app = spawn_app().await;
    let email = ADMIN_EMAIL.to_uppercase();
    app.provider.insert(identity("admin_2", &email, None)).await;

    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&created_event("admin_2", &email)))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_duplicate_delivery_absorbed_as_noop() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("user_1", "grace@example.com", None))
        .await;

    let event = created_event("user_1", "grace@example.com");

    let first = app
        .router
        .clone()
        .oneshot(signed_webhook(&event))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let second = app
        .router
        .clone()
        .oneshot(signed_webhook(&event))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::OK);
    let body = body_json(second).await;
    assert_eq!(body["created"], false);
}

#[tokio::test]
async fn test_invalid_signature_rejected_before_processing() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("user_1", "grace@example.com", None))
        .await;

    let payload = created_event("user_1", "grace@example.com").to_string();
    let request = Request::builder()
        .method("POST")
        .uri("/api/webhooks/identity")
        .header("content-type", "application/json")
        .header("x-webhook-signature", "deadbeef")
        .body(Body::from(payload))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Nothing was provisioned
    let profile = UserProfileRepository::new(app.state.pool.clone())
        .find_by_id("user_1")
        .await
        .unwrap();
    assert!(profile.is_none());
    assert_eq!(app.provider.fetch("user_1").await.unwrap().role, None);
}

#[tokio::test]
async fn test_missing_signature_rejected() {
    let app = spawn_app().await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/webhooks/identity")
        .header("content-type", "application/json")
        .body(Body::from(
            created_event("user_1", "grace@example.com").to_string(),
        ))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_event_type_acknowledged() {
    let app = spawn_app().await;

    let envelope = json!({ "type": "identity.session_created", "data": {} });
    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&envelope))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["handled"], false);
}

#[tokio::test]
async fn test_profile_insert_failure_unwinds_role_stamp() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("user_1", "grace@example.com", None))
        .await;

    sqlx::query("DROP TABLE user_profiles")
        .execute(&app.state.pool)
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&created_event("user_1", "grace@example.com")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // Compensating clear: a retry starts from an unprovisioned identity
    assert_eq!(app.provider.fetch("user_1").await.unwrap().role, None);
}

#[tokio::test]
async fn test_deleted_event_removes_profile_and_hotel() {
    let app = spawn_app().await;
    app.provider
        .insert(identity("user_1", "grace@example.com", None))
        .await;

    app.router
        .clone()
        .oneshot(signed_webhook(&created_event("user_1", "grace@example.com")))
        .await
        .unwrap();

    let hotels = HotelProfileRepository::new(app.state.pool.clone());
    hotels
        .insert_if_absent(&hm_core::HotelProfile::placeholder(
            "user_1".to_string(),
            "grace@example.com".to_string(),
        ))
        .await
        .unwrap();

    let envelope = json!({ "type": "identity.deleted", "data": { "id": "user_1" } });
    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&envelope))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], true);

    let profile = UserProfileRepository::new(app.state.pool.clone())
        .find_by_id("user_1")
        .await
        .unwrap();
    assert!(profile.is_none());
    // Cascade removed the hotel row
    assert!(!hotels.exists_for_owner("user_1").await.unwrap());
}

#[tokio::test]
async fn test_deleted_event_unknown_id_is_noop() {
    let app = spawn_app().await;

    let envelope = json!({ "type": "identity.deleted", "data": { "id": "ghost" } });
    let response = app
        .router
        .clone()
        .oneshot(signed_webhook(&envelope))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deleted"], false);
}
