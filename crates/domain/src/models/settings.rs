//! Registration settings: the singleton record controlling the admission gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

use shared::validation::field_error;

/// The admission-control record. Created with these defaults on first read:
/// enabled, no time bounds, unlimited capacity.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationSettings {
    pub enabled: bool,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_capacity: Option<i32>,
}

impl Default for RegistrationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            starts_at: None,
            ends_at: None,
            max_capacity: None,
        }
    }
}

/// Full settings update. All fields are given explicitly; nulls clear bounds.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    pub enabled: bool,

    pub starts_at: Option<DateTime<Utc>>,

    pub ends_at: Option<DateTime<Utc>>,

    #[validate(range(min = 1, message = "Maximum capacity must be a positive number."))]
    pub max_capacity: Option<i32>,
}

impl UpdateSettingsRequest {
    /// Field validation plus the window invariant: when both bounds are
    /// present, the end must come strictly after the start.
    pub fn validate_rules(&self) -> Result<(), ValidationErrors> {
        let mut errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };

        if let (Some(starts_at), Some(ends_at)) = (self.starts_at, self.ends_at) {
            if ends_at <= starts_at {
                errors.add(
                    "ends_at",
                    field_error("window_order", "End date must be after start date."),
                );
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_defaults_leave_gate_unbounded() {
        let settings = RegistrationSettings::default();
        assert!(settings.enabled);
        assert!(settings.starts_at.is_none());
        assert!(settings.ends_at.is_none());
        assert!(settings.max_capacity.is_none());
    }

    #[test]
    fn test_update_accepts_open_window() {
        let request = UpdateSettingsRequest {
            enabled: true,
            starts_at: Some(Utc::now()),
            ends_at: None,
            max_capacity: Some(300),
        };
        assert!(request.validate_rules().is_ok());
    }

    #[test]
    fn test_update_rejects_inverted_window() {
        let now = Utc::now();
        let request = UpdateSettingsRequest {
            enabled: true,
            starts_at: Some(now),
            ends_at: Some(now - Duration::hours(1)),
            max_capacity: None,
        };
        let errors = request.validate_rules().unwrap_err();
        assert!(errors.field_errors().contains_key("ends_at"));
    }

    #[test]
    fn test_update_rejects_equal_bounds() {
        let now = Utc::now();
        let request = UpdateSettingsRequest {
            enabled: false,
            starts_at: Some(now),
            ends_at: Some(now),
            max_capacity: None,
        };
        assert!(request.validate_rules().is_err());
    }

    #[test]
    fn test_update_rejects_non_positive_capacity() {
        let request = UpdateSettingsRequest {
            enabled: true,
            starts_at: None,
            ends_at: None,
            max_capacity: Some(0),
        };
        assert!(request.validate_rules().is_err());
    }

    #[test]
    fn test_update_deserializes_camel_case_with_nulls() {
        let json = r#"{"enabled": true, "startsAt": null, "endsAt": null, "maxCapacity": 150}"#;
        let request: UpdateSettingsRequest = serde_json::from_str(json).unwrap();
        assert!(request.enabled);
        assert_eq!(request.max_capacity, Some(150));
        assert!(request.starts_at.is_none());
    }

    #[test]
    fn test_settings_serialize_camel_case() {
        let settings = RegistrationSettings {
            enabled: false,
            starts_at: None,
            ends_at: None,
            max_capacity: Some(40),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"startsAt\":null"));
        assert!(json.contains("\"maxCapacity\":40"));
    }
}
