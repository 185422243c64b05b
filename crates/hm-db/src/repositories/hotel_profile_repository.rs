//! Hotel profile repository.

use crate::{DbError, Result as DbErrorResult};

use hm_core::HotelProfile;

use std::str::FromStr;

use chrono::DateTime;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct HotelProfileRepository {
    pool: SqlitePool,
}

impl HotelProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a hotel unless the owner already has one.
    ///
    /// `owner_id` is UNIQUE, so two concurrent submissions for the same
    /// owner cannot both create a row. Returns `true` if a row was created.
    pub async fn insert_if_absent(&self, hotel: &HotelProfile) -> DbErrorResult<bool> {
        let result = sqlx::query(
            r#"
                INSERT INTO hotel_profiles (
                    id, owner_id, hotel_name, email, phone, address,
                    city, state, country, postal_code, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(owner_id) DO NOTHING
            "#,
        )
        .bind(hotel.id.to_string())
        .bind(&hotel.owner_id)
        .bind(&hotel.hotel_name)
        .bind(&hotel.email)
        .bind(&hotel.phone)
        .bind(&hotel.address)
        .bind(&hotel.city)
        .bind(&hotel.state)
        .bind(&hotel.country)
        .bind(&hotel.postal_code)
        .bind(hotel.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> DbErrorResult<Option<HotelProfile>> {
        let row = sqlx::query(
            r#"
                SELECT id, owner_id, hotel_name, email, phone, address,
                    city, state, country, postal_code, created_at
                FROM hotel_profiles
                WHERE owner_id = ?
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_hotel_row).transpose()
    }

    pub async fn exists_for_owner(&self, owner_id: &str) -> DbErrorResult<bool> {
        let row = sqlx::query("SELECT 1 FROM hotel_profiles WHERE owner_id = ?")
            .bind(owner_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.is_some())
    }
}

fn map_hotel_row(row: SqliteRow) -> DbErrorResult<HotelProfile> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(HotelProfile {
        id: Uuid::from_str(&id)
            .map_err(|e| DbError::decode(format!("invalid UUID in hotel_profiles.id: {}", e)))?,
        owner_id: row.try_get("owner_id")?,
        hotel_name: row.try_get("hotel_name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        country: row.try_get("country")?,
        postal_code: row.try_get("postal_code")?,
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| DbError::decode("invalid timestamp in hotel_profiles.created_at"))?,
    })
}
