//! Admission gate evaluation.
//!
//! The gate decides whether a new registration may be accepted right now,
//! combining the manual enable flag, the scheduled window, and the capacity
//! ceiling. The decision order is part of the contract: an earlier rule wins
//! over every later one. The evaluator is pure; callers re-evaluate it on
//! every admission decision because the count and the clock both move.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::RegistrationSettings;

/// Why the gate is open or closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GateReason {
    ManualOff,
    NotStarted,
    Ended,
    Full,
    Open,
}

/// The admission decision plus the settings it was made against.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GateStatus {
    pub is_open: bool,
    pub reason: GateReason,
    pub message: String,
    pub starts_at: Option<DateTime<Utc>>,
    pub ends_at: Option<DateTime<Utc>>,
    pub max_capacity: Option<i32>,
}

impl GateStatus {
    fn closed(reason: GateReason, message: String, settings: &RegistrationSettings) -> Self {
        Self {
            is_open: false,
            reason,
            message,
            starts_at: settings.starts_at,
            ends_at: settings.ends_at,
            max_capacity: settings.max_capacity,
        }
    }
}

/// Evaluates the gate. First matching rule wins:
///
/// 1. manually disabled
/// 2. no opening date configured
/// 3. opening date in the future
/// 4. closing date passed
/// 5. capacity reached
/// 6. open
pub fn evaluate(
    settings: &RegistrationSettings,
    current_count: i64,
    now: DateTime<Utc>,
) -> GateStatus {
    if !settings.enabled {
        return GateStatus::closed(
            GateReason::ManualOff,
            "Registration is currently closed.".to_string(),
            settings,
        );
    }

    let Some(starts_at) = settings.starts_at else {
        return GateStatus::closed(
            GateReason::NotStarted,
            "Registration opening date is not set yet.".to_string(),
            settings,
        );
    };

    if now < starts_at {
        return GateStatus::closed(
            GateReason::NotStarted,
            format!(
                "Registration opens on {}.",
                starts_at.format("%B %-d, %Y %H:%M UTC")
            ),
            settings,
        );
    }

    if let Some(ends_at) = settings.ends_at {
        if now > ends_at {
            return GateStatus::closed(
                GateReason::Ended,
                "Registration has ended.".to_string(),
                settings,
            );
        }
    }

    if let Some(max_capacity) = settings.max_capacity {
        if current_count >= i64::from(max_capacity) {
            return GateStatus::closed(
                GateReason::Full,
                "Registration is closed: maximum capacity reached.".to_string(),
                settings,
            );
        }
    }

    GateStatus {
        is_open: true,
        reason: GateReason::Open,
        message: "Registration is open.".to_string(),
        starts_at: settings.starts_at,
        ends_at: settings.ends_at,
        max_capacity: settings.max_capacity,
    }
}
