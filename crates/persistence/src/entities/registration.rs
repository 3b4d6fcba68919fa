//! Registration entity (database row mapping).

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the registrations table.
#[derive(Debug, Clone, FromRow)]
pub struct RegistrationEntity {
    pub id: Uuid,
    pub full_name: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub church: String,
    pub role: Option<String>,
    pub has_vehicle: bool,
    pub plate_number: Option<String>,
    pub confirmed_attendance: bool,
    pub created_at: DateTime<Utc>,
}

impl From<RegistrationEntity> for domain::models::Registration {
    fn from(entity: RegistrationEntity) -> Self {
        Self {
            id: entity.id,
            full_name: entity.full_name,
            contact_number: entity.contact_number,
            email: entity.email,
            church: entity.church,
            role: entity.role,
            has_vehicle: entity.has_vehicle,
            plate_number: entity.plate_number,
            confirmed_attendance: entity.confirmed_attendance,
            created_at: entity.created_at,
        }
    }
}
