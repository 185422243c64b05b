//! User profile repository.
//!
//! All mutations are single-row statements; the racy paths (provisioning
//! under at-least-once event delivery) go through `insert_if_absent`, which
//! is an `ON CONFLICT DO NOTHING` upsert keyed by the identity id.

use crate::{DbError, Result as DbErrorResult};

use hm_core::{OnboardingStatus, ProfileStatus, UserProfile, UserType};

use std::panic::Location;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use error_location::ErrorLocation;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

pub struct UserProfileRepository {
    pool: SqlitePool,
}

impl UserProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a profile unless one already exists for the same identity id.
    ///
    /// Returns `true` if a row was created, `false` if the id was already
    /// present (duplicate event delivery, concurrent provisioning).
    pub async fn insert_if_absent(&self, profile: &UserProfile) -> DbErrorResult<bool> {
        let metadata = match &profile.metadata {
            serde_json::Value::Null => None,
            value => Some(value.to_string()),
        };

        let result = sqlx::query(
            r#"
                INSERT INTO user_profiles (
                    id, user_type, first_name, last_name, email, phone_number,
                    status, onboarding_status, metadata, created_at, updated_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(id) DO NOTHING
            "#,
        )
        .bind(&profile.id)
        .bind(profile.user_type.as_str())
        .bind(&profile.first_name)
        .bind(&profile.last_name)
        .bind(&profile.email)
        .bind(&profile.phone_number)
        .bind(profile.status.as_str())
        .bind(profile.onboarding_status.as_str())
        .bind(metadata)
        .bind(profile.created_at.timestamp())
        .bind(profile.updated_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(&self, id: &str) -> DbErrorResult<Option<UserProfile>> {
        let row = sqlx::query(
            r#"
                SELECT id, user_type, first_name, last_name, email, phone_number,
                    status, onboarding_status, metadata, created_at, updated_at
                FROM user_profiles
                WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_profile_row).transpose()
    }

    /// Onboarding status for the given identity id.
    ///
    /// A missing row is `ProfileNotFound`, distinguishable from transport
    /// errors via `DbError::is_not_found`.
    pub async fn onboarding_status(&self, id: &str) -> DbErrorResult<OnboardingStatus> {
        let row = sqlx::query("SELECT onboarding_status FROM user_profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        let Some(row) = row else {
            return Err(DbError::ProfileNotFound {
                user_id: id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let status: String = row.try_get("onboarding_status")?;
        OnboardingStatus::from_str(&status)
            .map_err(|e| DbError::decode(format!("user_profiles.onboarding_status: {}", e)))
    }

    /// Mark an existing profile's onboarding as completed.
    ///
    /// Idempotent; updating an already-completed profile is a no-op.
    pub async fn mark_onboarding_completed(&self, id: &str) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE user_profiles
                SET status = 'active', onboarding_status = 'completed', updated_at = ?
                WHERE id = ? AND onboarding_status != 'completed'
            "#,
        )
        .bind(Utc::now().timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Apply the onboarding form's profile fields and activate the account.
    pub async fn update_onboarded(
        &self,
        id: &str,
        first_name: &str,
        last_name: &str,
        email: &str,
        phone_number: &str,
    ) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                UPDATE user_profiles
                SET first_name = ?, last_name = ?, email = ?, phone_number = ?,
                    status = 'active', onboarding_status = 'completed', updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(first_name)
        .bind(last_name)
        .bind(email)
        .bind(phone_number)
        .bind(Utc::now().timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Compensating update: pin the account back to the given statuses.
    pub async fn set_statuses(
        &self,
        id: &str,
        status: ProfileStatus,
        onboarding_status: OnboardingStatus,
    ) -> DbErrorResult<()> {
        sqlx::query(
            "UPDATE user_profiles SET status = ?, onboarding_status = ?, updated_at = ? WHERE id = ?",
        )
        .bind(status.as_str())
        .bind(onboarding_status.as_str())
        .bind(Utc::now().timestamp())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete the profile for a deleted identity. Missing row is not an error.
    pub async fn delete(&self, id: &str) -> DbErrorResult<bool> {
        let result = sqlx::query("DELETE FROM user_profiles WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_profile_row(row: SqliteRow) -> DbErrorResult<UserProfile> {
    let user_type: String = row.try_get("user_type")?;
    let status: String = row.try_get("status")?;
    let onboarding_status: String = row.try_get("onboarding_status")?;
    let metadata: Option<String> = row.try_get("metadata")?;
    let created_at: i64 = row.try_get("created_at")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(UserProfile {
        id: row.try_get("id")?,
        user_type: UserType::from_str(&user_type)
            .map_err(|e| DbError::decode(format!("user_profiles.user_type: {}", e)))?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        email: row.try_get("email")?,
        phone_number: row.try_get("phone_number")?,
        status: ProfileStatus::from_str(&status)
            .map_err(|e| DbError::decode(format!("user_profiles.status: {}", e)))?,
        onboarding_status: OnboardingStatus::from_str(&onboarding_status)
            .map_err(|e| DbError::decode(format!("user_profiles.onboarding_status: {}", e)))?,
        metadata: match metadata {
            Some(raw) => serde_json::from_str(&raw)
                .map_err(|e| DbError::decode(format!("user_profiles.metadata: {}", e)))?,
            None => serde_json::Value::Null,
        },
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| DbError::decode("invalid timestamp in user_profiles.created_at"))?,
        updated_at: DateTime::from_timestamp(updated_at, 0)
            .ok_or_else(|| DbError::decode("invalid timestamp in user_profiles.updated_at"))?,
    })
}
