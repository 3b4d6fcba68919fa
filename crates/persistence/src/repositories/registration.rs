//! Repository for registration rows.
//!
//! Besides the plain CRUD operations, this repository owns the
//! admission-guarded insert: the authoritative capacity/window check runs in
//! the same transaction as the insert, serialized through a lock on the
//! settings row, so concurrent submissions cannot overshoot the capacity
//! ceiling.

use chrono::Utc;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use domain::gate::{self, GateStatus};
use domain::models::NewRegistration;

use crate::entities::{RegistrationEntity, RegistrationSettingsEntity};

/// Outcome of an admission-guarded insert that did not produce a row.
#[derive(Debug, Error)]
pub enum AdmitError {
    /// The gate was closed at the moment of insertion.
    #[error("registration gate is closed")]
    Closed {
        status: GateStatus,
        current_count: i64,
    },

    /// Another row already holds the same (full name, contact number) pair.
    #[error("duplicate registration")]
    Duplicate,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Listing filters; all optional and independently combinable.
#[derive(Debug, Clone, Default)]
pub struct RegistrationFilter {
    /// Case-insensitive substring match over full name and contact number.
    pub search: Option<String>,
    pub has_vehicle: Option<bool>,
    pub confirmed_attendance: Option<bool>,
}

/// Repository for registration database operations.
#[derive(Clone)]
pub struct RegistrationRepository {
    pool: PgPool,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some("23505")
    )
}

impl RegistrationRepository {
    /// Creates a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Total number of registrations.
    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations")
            .fetch_one(&self.pool)
            .await
    }

    /// Whether a row with the same trimmed (full name, contact number) exists.
    pub async fn exists_duplicate(
        &self,
        full_name: &str,
        contact_number: &str,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM registrations
                WHERE full_name = $1 AND contact_number = $2
            )
            "#,
        )
        .bind(full_name.trim())
        .bind(contact_number.trim())
        .fetch_one(&self.pool)
        .await
    }

    /// Lists registrations matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &RegistrationFilter,
    ) -> Result<Vec<RegistrationEntity>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationEntity>(
            r#"
            SELECT id, full_name, contact_number, email, church, role,
                   has_vehicle, plate_number, confirmed_attendance, created_at
            FROM registrations
            WHERE ($1::TEXT IS NULL OR full_name ILIKE '%' || $1 || '%'
                                    OR contact_number ILIKE '%' || $1 || '%')
              AND ($2::BOOLEAN IS NULL OR has_vehicle = $2)
              AND ($3::BOOLEAN IS NULL OR confirmed_attendance = $3)
            ORDER BY created_at DESC
            "#,
        )
        .bind(filter.search.as_deref().map(str::trim))
        .bind(filter.has_vehicle)
        .bind(filter.confirmed_attendance)
        .fetch_all(&self.pool)
        .await
    }

    /// Inserts a registration if and only if the gate admits it.
    ///
    /// The settings row is locked for the duration of the transaction, so at
    /// most one admission decision is in flight at a time; the count the gate
    /// sees cannot go stale between the check and the insert.
    pub async fn insert_admitted(
        &self,
        new: &NewRegistration,
    ) -> Result<RegistrationEntity, AdmitError> {
        let mut tx = self.pool.begin().await?;

        // Lazily create the settings singleton, then take the admission lock
        sqlx::query("INSERT INTO registration_settings (id) VALUES (1) ON CONFLICT (id) DO NOTHING")
            .execute(&mut *tx)
            .await?;

        let settings = sqlx::query_as::<_, RegistrationSettingsEntity>(
            r#"
            SELECT id, enabled, starts_at, ends_at, max_capacity, created_at, updated_at
            FROM registration_settings
            WHERE id = 1
            FOR UPDATE
            "#,
        )
        .fetch_one(&mut *tx)
        .await?;

        let current_count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM registrations")
            .fetch_one(&mut *tx)
            .await?;

        let status = gate::evaluate(&settings.into(), current_count, Utc::now());
        tracing::debug!(
            current_count,
            is_open = status.is_open,
            "Admission check inside insert transaction"
        );
        if !status.is_open {
            return Err(AdmitError::Closed {
                status,
                current_count,
            });
        }

        let row = sqlx::query_as::<_, RegistrationEntity>(
            r#"
            INSERT INTO registrations (
                full_name, contact_number, email, church, role, has_vehicle, plate_number
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, full_name, contact_number, email, church, role,
                      has_vehicle, plate_number, confirmed_attendance, created_at
            "#,
        )
        .bind(&new.full_name)
        .bind(&new.contact_number)
        .bind(&new.email)
        .bind(&new.church)
        .bind(&new.role)
        .bind(new.has_vehicle)
        .bind(&new.plate_number)
        .fetch_one(&mut *tx)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                AdmitError::Duplicate
            } else {
                AdmitError::Database(err)
            }
        })?;

        tx.commit().await?;
        Ok(row)
    }

    /// Replaces the editable fields of a registration.
    /// Returns None when the id is unknown.
    pub async fn update_by_id(
        &self,
        id: Uuid,
        patch: &NewRegistration,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE registrations
            SET full_name = $2, contact_number = $3, email = $4, church = $5,
                role = $6, has_vehicle = $7, plate_number = $8
            WHERE id = $1
            RETURNING id, full_name, contact_number, email, church, role,
                      has_vehicle, plate_number, confirmed_attendance, created_at
            "#,
        )
        .bind(id)
        .bind(&patch.full_name)
        .bind(&patch.contact_number)
        .bind(&patch.email)
        .bind(&patch.church)
        .bind(&patch.role)
        .bind(patch.has_vehicle)
        .bind(&patch.plate_number)
        .fetch_optional(&self.pool)
        .await
    }

    /// Toggles attendance confirmation. Returns None when the id is unknown.
    pub async fn set_attendance(
        &self,
        id: Uuid,
        confirmed: bool,
    ) -> Result<Option<RegistrationEntity>, sqlx::Error> {
        sqlx::query_as::<_, RegistrationEntity>(
            r#"
            UPDATE registrations
            SET confirmed_attendance = $2
            WHERE id = $1
            RETURNING id, full_name, contact_number, email, church, role,
                      has_vehicle, plate_number, confirmed_attendance, created_at
            "#,
        )
        .bind(id)
        .bind(confirmed)
        .fetch_optional(&self.pool)
        .await
    }
}

/// Duplicate-key detection for callers that work with plain sqlx errors.
pub fn is_duplicate_key(err: &sqlx::Error) -> bool {
    is_unique_violation(err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_default_is_unfiltered() {
        let filter = RegistrationFilter::default();
        assert!(filter.search.is_none());
        assert!(filter.has_vehicle.is_none());
        assert!(filter.confirmed_attendance.is_none());
    }

    #[test]
    fn test_row_not_found_is_not_a_unique_violation() {
        assert!(!is_duplicate_key(&sqlx::Error::RowNotFound));
    }
}
