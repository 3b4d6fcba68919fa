//! Domain model definitions.

pub mod registration;
pub mod settings;

pub use registration::{
    AttendanceFilter, AttendanceRequest, NewRegistration, Registration, SubmitRegistrationRequest,
    UpdateRegistrationRequest, VehicleFilter, OTHERS_ROLE,
};
pub use settings::{RegistrationSettings, UpdateSettingsRequest};
