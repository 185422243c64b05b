#![allow(dead_code)]

use hm_core::{HotelProfile, UserProfile, UserType};

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};

/// Creates an in-memory SQLite pool with migrations run
pub async fn create_test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::new()
        .filename(":memory:")
        .create_if_missing(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1) // In-memory needs single connection
        .connect_with(options)
        .await
        .expect("Failed to create test pool");

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .expect("Failed to enable foreign keys");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

/// A hotel-owner profile with default pending statuses
pub fn pending_hotel_profile(id: &str) -> UserProfile {
    UserProfile::new(
        id.to_string(),
        UserType::Hotel,
        "Grace".to_string(),
        "Hopper".to_string(),
        format!("{}@example.com", id),
    )
}

/// A fully-populated hotel row for the given owner
pub fn sample_hotel(owner_id: &str) -> HotelProfile {
    HotelProfile {
        hotel_name: "Seaside Resort".to_string(),
        phone: "+15551234567".to_string(),
        address: "1 Beach Road".to_string(),
        city: "Brighton".to_string(),
        state: Some("East Sussex".to_string()),
        country: "UK".to_string(),
        postal_code: Some("BN1 1AA".to_string()),
        ..HotelProfile::placeholder(owner_id.to_string(), format!("{}@example.com", owner_id))
    }
}
