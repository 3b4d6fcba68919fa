//! Registration settings entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database row mapping for the registration_settings singleton table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationSettingsEntity {
    pub id: i32,
    pub enabled: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_capacity: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<RegistrationSettingsEntity> for domain::models::RegistrationSettings {
    fn from(entity: RegistrationSettingsEntity) -> Self {
        Self {
            enabled: entity.enabled,
            starts_at: entity.starts_at,
            ends_at: entity.ends_at,
            max_capacity: entity.max_capacity,
        }
    }
}
