//! Registration domain models and request types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError, ValidationErrors};

use shared::validation::{field_error, has_text, trimmed_len};

/// Sentinel role value that requires the free-text `roleOther` field.
pub const OTHERS_ROLE: &str = "Others";

/// One attendee's persisted record.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub id: Uuid,
    pub full_name: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub church: String,
    /// Role or ministry; free text, `None` when not given.
    pub role: Option<String>,
    pub has_vehicle: bool,
    /// Present iff `has_vehicle`.
    pub plate_number: Option<String>,
    pub confirmed_attendance: bool,
    pub created_at: DateTime<Utc>,
}

/// Public submission payload.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRegistrationRequest {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(regex(
        path = "*CONTACT_NUMBER_REGEX",
        message = "Contact number must be in PH format: 09XXXXXXXXX."
    ))]
    pub contact_number: String,

    /// Optional; an empty string is treated as not given.
    #[validate(custom(function = "shared::validation::validate_email_or_empty"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_church"))]
    pub church: String,

    /// Fixed role choice; the "Others" sentinel requires `role_other`.
    pub role: Option<String>,

    /// Free-text role, stored in place of the "Others" sentinel.
    pub role_other: Option<String>,

    pub has_vehicle: bool,

    /// Required when `has_vehicle`; discarded otherwise.
    pub plate_number: Option<String>,
}

/// Admin edit payload; same shape and rules as a submission.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRegistrationRequest {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    #[validate(regex(
        path = "*CONTACT_NUMBER_REGEX",
        message = "Contact number must be in PH format: 09XXXXXXXXX."
    ))]
    pub contact_number: String,

    #[validate(custom(function = "shared::validation::validate_email_or_empty"))]
    pub email: Option<String>,

    #[validate(custom(function = "validate_church"))]
    pub church: String,

    pub role: Option<String>,

    pub role_other: Option<String>,

    pub has_vehicle: bool,

    pub plate_number: Option<String>,
}

/// Attendance confirmation toggle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    pub confirmed_attendance: bool,
}

/// Normalized registration fields ready for the store: values trimmed,
/// the role sentinel resolved, and the plate number forced out when the
/// registrant has no vehicle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRegistration {
    pub full_name: String,
    pub contact_number: String,
    pub email: Option<String>,
    pub church: String,
    pub role: Option<String>,
    pub has_vehicle: bool,
    pub plate_number: Option<String>,
}

/// Vehicle-presence listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VehicleFilter {
    Yes,
    No,
}

/// Attendance-confirmation listing filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttendanceFilter {
    Yes,
    No,
}

impl VehicleFilter {
    pub fn as_bool(self) -> bool {
        matches!(self, VehicleFilter::Yes)
    }
}

impl AttendanceFilter {
    pub fn as_bool(self) -> bool {
        matches!(self, AttendanceFilter::Yes)
    }
}

lazy_static::lazy_static! {
    /// PH mobile number: `09` followed by exactly nine digits.
    pub static ref CONTACT_NUMBER_REGEX: regex::Regex = regex::Regex::new(r"^09\d{9}$").unwrap();
}

fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    if trimmed_len(value) >= 3 {
        Ok(())
    } else {
        Err(field_error(
            "full_name_length",
            "Full name must be at least 3 characters.",
        ))
    }
}

fn validate_church(value: &str) -> Result<(), ValidationError> {
    if trimmed_len(value) >= 2 {
        Ok(())
    } else {
        Err(field_error(
            "church_length",
            "Church associated with is required.",
        ))
    }
}

/// Cross-field rules shared by submission and edit payloads.
fn cross_field_errors(
    mut errors: ValidationErrors,
    role: &Option<String>,
    role_other: &Option<String>,
    has_vehicle: bool,
    plate_number: &Option<String>,
) -> Result<(), ValidationErrors> {
    if has_vehicle && !has_text(plate_number) {
        errors.add(
            "plate_number",
            field_error(
                "plate_number_required",
                "Plate number is required when vehicle is YES.",
            ),
        );
    }

    if role.as_deref().map(str::trim) == Some(OTHERS_ROLE) && !has_text(role_other) {
        errors.add(
            "role_other",
            field_error("role_other_required", "Please specify the role or ministry."),
        );
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn resolve_role(role: Option<String>, role_other: Option<String>) -> Option<String> {
    match role.as_deref().map(str::trim) {
        Some(OTHERS_ROLE) => role_other
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from)
            .or_else(|| Some(OTHERS_ROLE.to_string())),
        Some("") | None => None,
        Some(named) => Some(named.to_string()),
    }
}

fn normalize(
    full_name: String,
    contact_number: String,
    email: Option<String>,
    church: String,
    role: Option<String>,
    role_other: Option<String>,
    has_vehicle: bool,
    plate_number: Option<String>,
) -> NewRegistration {
    NewRegistration {
        full_name: full_name.trim().to_string(),
        contact_number: contact_number.trim().to_string(),
        email: email
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(String::from),
        church: church.trim().to_string(),
        role: resolve_role(role, role_other),
        has_vehicle,
        plate_number: if has_vehicle {
            plate_number
                .as_deref()
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        } else {
            None
        },
    }
}

impl SubmitRegistrationRequest {
    /// Field validation plus the cross-field plate/role rules.
    pub fn validate_rules(&self) -> Result<(), ValidationErrors> {
        let errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        cross_field_errors(
            errors,
            &self.role,
            &self.role_other,
            self.has_vehicle,
            &self.plate_number,
        )
    }

    pub fn into_new_registration(self) -> NewRegistration {
        normalize(
            self.full_name,
            self.contact_number,
            self.email,
            self.church,
            self.role,
            self.role_other,
            self.has_vehicle,
            self.plate_number,
        )
    }
}

impl UpdateRegistrationRequest {
    pub fn validate_rules(&self) -> Result<(), ValidationErrors> {
        let errors = match self.validate() {
            Ok(()) => ValidationErrors::new(),
            Err(errors) => errors,
        };
        cross_field_errors(
            errors,
            &self.role,
            &self.role_other,
            self.has_vehicle,
            &self.plate_number,
        )
    }

    pub fn into_new_registration(self) -> NewRegistration {
        normalize(
            self.full_name,
            self.contact_number,
            self.email,
            self.church,
            self.role,
            self.role_other,
            self.has_vehicle,
            self.plate_number,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_request() -> SubmitRegistrationRequest {
        SubmitRegistrationRequest {
            full_name: "Maria Santos".to_string(),
            contact_number: "09171234567".to_string(),
            email: Some("maria@example.com".to_string()),
            church: "Grace Fellowship".to_string(),
            role: Some("Usher".to_string()),
            role_other: None,
            has_vehicle: false,
            plate_number: None,
        }
    }

    #[test]
    fn test_valid_submission_passes() {
        assert!(submit_request().validate_rules().is_ok());
    }

    #[test]
    fn test_short_full_name_rejected() {
        let mut request = submit_request();
        request.full_name = "  Jo ".to_string();
        assert!(request.validate_rules().is_err());
    }

    #[test]
    fn test_contact_number_format() {
        let mut request = submit_request();
        for bad in ["9171234567", "0917123456", "091712345678", "09a71234567", "+639171234567"] {
            request.contact_number = bad.to_string();
            assert!(
                request.validate_rules().is_err(),
                "expected rejection for {}",
                bad
            );
        }
        request.contact_number = "09998887777".to_string();
        assert!(request.validate_rules().is_ok());
    }

    #[test]
    fn test_empty_email_accepted() {
        let mut request = submit_request();
        request.email = Some(String::new());
        assert!(request.validate_rules().is_ok());
        request.email = None;
        assert!(request.validate_rules().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut request = submit_request();
        request.email = Some("nope".to_string());
        assert!(request.validate_rules().is_err());
    }

    #[test]
    fn test_vehicle_requires_plate() {
        let mut request = submit_request();
        request.has_vehicle = true;
        request.plate_number = None;
        let errors = request.validate_rules().unwrap_err();
        assert!(errors.field_errors().contains_key("plate_number"));

        request.plate_number = Some("   ".to_string());
        assert!(request.validate_rules().is_err());

        request.plate_number = Some("ABC 1234".to_string());
        assert!(request.validate_rules().is_ok());
    }

    #[test]
    fn test_plate_discarded_without_vehicle() {
        let mut request = submit_request();
        request.has_vehicle = false;
        request.plate_number = Some("ABC 1234".to_string());
        let payload = request.into_new_registration();
        assert_eq!(payload.plate_number, None);
    }

    #[test]
    fn test_others_role_requires_free_text() {
        let mut request = submit_request();
        request.role = Some(OTHERS_ROLE.to_string());
        request.role_other = None;
        let errors = request.validate_rules().unwrap_err();
        assert!(errors.field_errors().contains_key("role_other"));

        request.role_other = Some("Media team".to_string());
        assert!(request.validate_rules().is_ok());
    }

    #[test]
    fn test_others_role_substituted_with_free_text() {
        let mut request = submit_request();
        request.role = Some(OTHERS_ROLE.to_string());
        request.role_other = Some("  Media team ".to_string());
        let payload = request.into_new_registration();
        assert_eq!(payload.role.as_deref(), Some("Media team"));
    }

    #[test]
    fn test_named_role_kept() {
        let payload = submit_request().into_new_registration();
        assert_eq!(payload.role.as_deref(), Some("Usher"));
    }

    #[test]
    fn test_blank_role_stored_as_none() {
        let mut request = submit_request();
        request.role = Some("  ".to_string());
        let payload = request.into_new_registration();
        assert_eq!(payload.role, None);
    }

    #[test]
    fn test_normalization_trims_fields() {
        let mut request = submit_request();
        request.full_name = "  Maria Santos  ".to_string();
        request.contact_number = "09171234567".to_string();
        request.email = Some("  maria@example.com ".to_string());
        request.church = " Grace Fellowship ".to_string();
        let payload = request.into_new_registration();
        assert_eq!(payload.full_name, "Maria Santos");
        assert_eq!(payload.email.as_deref(), Some("maria@example.com"));
        assert_eq!(payload.church, "Grace Fellowship");
    }

    #[test]
    fn test_empty_email_normalizes_to_none() {
        let mut request = submit_request();
        request.email = Some("   ".to_string());
        assert_eq!(request.into_new_registration().email, None);
    }

    #[test]
    fn test_request_deserializes_camel_case() {
        let json = r#"{
            "fullName": "Juan dela Cruz",
            "contactNumber": "09181112222",
            "church": "Living Hope",
            "role": "Others",
            "roleOther": "Sound crew",
            "hasVehicle": true,
            "plateNumber": "XYZ 987"
        }"#;
        let request: SubmitRegistrationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.full_name, "Juan dela Cruz");
        assert!(request.has_vehicle);
        assert_eq!(request.role_other.as_deref(), Some("Sound crew"));
        assert!(request.validate_rules().is_ok());
    }

    #[test]
    fn test_registration_serializes_camel_case() {
        let registration = Registration {
            id: Uuid::new_v4(),
            full_name: "Juan dela Cruz".to_string(),
            contact_number: "09181112222".to_string(),
            email: None,
            church: "Living Hope".to_string(),
            role: None,
            has_vehicle: false,
            plate_number: None,
            confirmed_attendance: false,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&registration).unwrap();
        assert!(json.contains("\"fullName\""));
        assert!(json.contains("\"contactNumber\""));
        assert!(json.contains("\"confirmedAttendance\":false"));
    }

    #[test]
    fn test_filters_deserialize() {
        assert_eq!(
            serde_json::from_str::<VehicleFilter>("\"yes\"").unwrap(),
            VehicleFilter::Yes
        );
        assert_eq!(
            serde_json::from_str::<AttendanceFilter>("\"no\"").unwrap(),
            AttendanceFilter::No
        );
        assert!(serde_json::from_str::<VehicleFilter>("\"maybe\"").is_err());
        assert!(VehicleFilter::Yes.as_bool());
        assert!(!AttendanceFilter::No.as_bool());
    }

    #[test]
    fn test_attendance_request_deserializes() {
        let request: AttendanceRequest =
            serde_json::from_str(r#"{"confirmedAttendance": true}"#).unwrap();
        assert!(request.confirmed_attendance);
    }
}
