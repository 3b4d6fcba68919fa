//! Application services.

pub mod cookies;
pub mod login_attempts;
pub mod notify;
pub mod registration;
