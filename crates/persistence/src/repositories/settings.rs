//! Repository for the registration settings singleton.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::entities::RegistrationSettingsEntity;

/// The settings table holds exactly one row with this id.
const SETTINGS_ROW_ID: i32 = 1;

/// Repository for registration settings database operations.
#[derive(Clone)]
pub struct SettingsRepository {
    pool: PgPool,
}

impl SettingsRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets the settings row. Returns None if it has never been created.
    pub async fn get(&self) -> Result<Option<RegistrationSettingsEntity>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationSettingsEntity>(
            r#"
            SELECT id, enabled, starts_at, ends_at, max_capacity, created_at, updated_at
            FROM registration_settings
            WHERE id = $1
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_optional(&self.pool)
        .await
    }

    /// Gets the settings row, creating the defaults (enabled, no bounds,
    /// unlimited capacity) if it doesn't exist yet.
    pub async fn get_or_create(&self) -> Result<RegistrationSettingsEntity, sqlx::Error> {
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        self.create_default().await
    }

    /// Creates the default settings row.
    pub async fn create_default(&self) -> Result<RegistrationSettingsEntity, sqlx::Error> {
        sqlx::query_as::<_, RegistrationSettingsEntity>(
            r#"
            INSERT INTO registration_settings (id)
            VALUES ($1)
            ON CONFLICT (id) DO UPDATE SET updated_at = NOW()
            RETURNING id, enabled, starts_at, ends_at, max_capacity, created_at, updated_at
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .fetch_one(&self.pool)
        .await
    }

    /// Replaces the gate configuration. Nulls clear the bounds.
    pub async fn update(
        &self,
        enabled: bool,
        starts_at: Option<DateTime<Utc>>,
        ends_at: Option<DateTime<Utc>>,
        max_capacity: Option<i32>,
    ) -> Result<RegistrationSettingsEntity, sqlx::Error> {
        // The singleton must exist before it can be updated
        self.get_or_create().await?;

        sqlx::query_as::<_, RegistrationSettingsEntity>(
            r#"
            UPDATE registration_settings
            SET enabled = $2, starts_at = $3, ends_at = $4, max_capacity = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING id, enabled, starts_at, ends_at, max_capacity, created_at, updated_at
            "#,
        )
        .bind(SETTINGS_ROW_ID)
        .bind(enabled)
        .bind(starts_at)
        .bind(ends_at)
        .bind(max_capacity)
        .fetch_one(&self.pool)
        .await
    }
}
