//! Repository implementations.

pub mod registration;
pub mod settings;

pub use registration::{is_duplicate_key, AdmitError, RegistrationFilter, RegistrationRepository};
pub use settings::SettingsRepository;
