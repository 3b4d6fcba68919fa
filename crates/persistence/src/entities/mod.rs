//! Entity definitions (database row mappings).

pub mod registration;
pub mod settings;

pub use registration::RegistrationEntity;
pub use settings::RegistrationSettingsEntity;
