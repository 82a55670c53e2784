//! Appointment service wire types.
//!
//! The appointment service authenticates every call with the session's bearer
//! token; scheduling rules are entirely server-side.

#[cfg(test)]
#[path = "appointments_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};

pub const APPOINTMENTS_PATH: &str = "/appointments";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AppointmentStatus {
    Scheduled,
    Confirmed,
    Cancelled,
    Completed,
    NoShow,
    Rescheduled,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub patient_id: String,
    pub doctor_id: String,
    /// ISO date.
    pub appointment_date: String,
    /// `HH:MM[:SS]`.
    pub appointment_time: String,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    /// Booked and not yet held. Only `SCHEDULED` counts; the portal shows
    /// these as upcoming to patients and pending to admins.
    #[must_use]
    pub fn is_upcoming(&self) -> bool {
        self.status == AppointmentStatus::Scheduled
    }
}

/// `Authorization` header value for `token`.
#[must_use]
pub fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}
