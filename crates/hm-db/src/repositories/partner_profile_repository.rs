//! Partner profile repository.

use crate::{DbError, Result as DbErrorResult};

use hm_core::PartnerProfile;

use std::str::FromStr;

use chrono::DateTime;
use sqlx::{Row, SqlitePool, sqlite::SqliteRow};
use uuid::Uuid;

pub struct PartnerProfileRepository {
    pool: SqlitePool,
}

impl PartnerProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, partner: &PartnerProfile) -> DbErrorResult<()> {
        sqlx::query(
            r#"
                INSERT INTO partner_profiles (
                    id, owner_id, partner_type, company_name,
                    website, description, is_verified, created_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(partner.id.to_string())
        .bind(&partner.owner_id)
        .bind(&partner.partner_type)
        .bind(&partner.company_name)
        .bind(&partner.website)
        .bind(&partner.description)
        .bind(partner.is_verified)
        .bind(partner.created_at.timestamp())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn find_by_owner(&self, owner_id: &str) -> DbErrorResult<Option<PartnerProfile>> {
        let row = sqlx::query(
            r#"
                SELECT id, owner_id, partner_type, company_name,
                    website, description, is_verified, created_at
                FROM partner_profiles
                WHERE owner_id = ?
            "#,
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(map_partner_row).transpose()
    }
}

fn map_partner_row(row: SqliteRow) -> DbErrorResult<PartnerProfile> {
    let id: String = row.try_get("id")?;
    let created_at: i64 = row.try_get("created_at")?;

    Ok(PartnerProfile {
        id: Uuid::from_str(&id)
            .map_err(|e| DbError::decode(format!("invalid UUID in partner_profiles.id: {}", e)))?,
        owner_id: row.try_get("owner_id")?,
        partner_type: row.try_get("partner_type")?,
        company_name: row.try_get("company_name")?,
        website: row.try_get("website")?,
        description: row.try_get("description")?,
        is_verified: row.try_get("is_verified")?,
        created_at: DateTime::from_timestamp(created_at, 0)
            .ok_or_else(|| DbError::decode("invalid timestamp in partner_profiles.created_at"))?,
    })
}
