//! Data models for the front-desk system.
//!
//! This module defines the core records shared by every other module:
//! - Priority: binary urgency tag on a queued patient
//! - PatientStatus: where a walk-in currently is in the visit
//! - Patient: a queued walk-in
//! - Doctor: roster entry with weekly availability
//! - Appointment: a booked visit and its status

use chrono::{DateTime, Local, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::DeskError;

/// Priority levels for queued patients.
///
/// Urgent patients are always shown ahead of normal ones, whatever
/// secondary sort key the desk has chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    Normal,
}

impl Priority {
    pub fn name(&self) -> &'static str {
        match self {
            Priority::Urgent => "Urgent",
            Priority::Normal => "Normal",
        }
    }

    pub fn is_urgent(&self) -> bool {
        matches!(self, Priority::Urgent)
    }
}

impl PartialOrd for Priority {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Priority {
    /// Urgent orders before Normal.
    fn cmp(&self, other: &Self) -> Ordering {
        other.is_urgent().cmp(&self.is_urgent())
    }
}

impl FromStr for Priority {
    type Err = DeskError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "urgent" => Ok(Priority::Urgent),
            "normal" => Ok(Priority::Normal),
            _ => Err(DeskError::InvalidValue(format!(
                "priority '{}', must be one of: urgent, normal",
                value
            ))),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Where a walk-in patient currently is.
///
/// Completed and Cancelled patients stay in the store so the board and
/// the analytics can still count them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    Waiting,
    #[serde(rename = "With Doctor")]
    WithDoctor,
    Completed,
    Cancelled,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 4] = [
        PatientStatus::Waiting,
        PatientStatus::WithDoctor,
        PatientStatus::Completed,
        PatientStatus::Cancelled,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PatientStatus::Waiting => "Waiting",
            PatientStatus::WithDoctor => "With Doctor",
            PatientStatus::Completed => "Completed",
            PatientStatus::Cancelled => "Cancelled",
        }
    }

    /// Waiting or with a doctor.
    pub fn is_active(&self) -> bool {
        matches!(self, PatientStatus::Waiting | PatientStatus::WithDoctor)
    }
}

impl FromStr for PatientStatus {
    type Err = DeskError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "waiting" => Ok(PatientStatus::Waiting),
            "with doctor" | "with-doctor" | "with_doctor" => Ok(PatientStatus::WithDoctor),
            "completed" => Ok(PatientStatus::Completed),
            "cancelled" => Ok(PatientStatus::Cancelled),
            _ => Err(DeskError::InvalidValue(format!(
                "patient status '{}', must be one of: waiting, with doctor, completed, cancelled",
                value
            ))),
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A walk-in patient on the queue board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: u32,
    pub name: String,
    pub queue_number: u32,
    pub status: PatientStatus,
    pub priority: Priority,
    pub arrival_time: DateTime<Local>,
    pub doctor: String,
}

/// Slots offered by a doctor on one weekday.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub day: Weekday,
    /// `HH:MM` start times in the order they are offered.
    pub slots: Vec<String>,
}

/// A roster entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: u32,
    pub name: String,
    pub specialization: String,
    pub availability: Vec<DayAvailability>,
    pub rating: f32,
    pub reviews: u32,
}

impl Doctor {
    /// Slot strings offered on the given weekday, empty when the doctor
    /// does not work that day.
    pub fn slots_on(&self, day: Weekday) -> &[String] {
        self.availability
            .iter()
            .find(|a| a.day == day)
            .map(|a| a.slots.as_slice())
            .unwrap_or(&[])
    }

    pub fn works_on(&self, day: Weekday) -> bool {
        self.availability.iter().any(|a| a.day == day)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AppointmentStatus {
    Booked,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn name(&self) -> &'static str {
        match self {
            AppointmentStatus::Booked => "Booked",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    /// Only a booked appointment can move, and only to a terminal state.
    pub fn can_transition_to(&self, next: AppointmentStatus) -> bool {
        matches!(
            (self, next),
            (AppointmentStatus::Booked, AppointmentStatus::Completed)
                | (AppointmentStatus::Booked, AppointmentStatus::Cancelled)
        )
    }
}

impl FromStr for AppointmentStatus {
    type Err = DeskError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "booked" => Ok(AppointmentStatus::Booked),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" => Ok(AppointmentStatus::Cancelled),
            _ => Err(DeskError::InvalidValue(format!(
                "appointment status '{}', must be one of: booked, completed, cancelled",
                value
            ))),
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A booked visit with a doctor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_name: String,
    pub doctor_name: String,
    pub specialization: String,
    pub start_time: DateTime<Local>,
    pub status: AppointmentStatus,
}

impl Appointment {
    /// Create a freshly booked appointment.
    pub fn new(
        patient_name: String,
        doctor: &Doctor,
        start_time: DateTime<Local>,
    ) -> Result<Self, DeskError> {
        let patient_name = patient_name.trim().to_string();
        if patient_name.is_empty() {
            return Err(DeskError::Validation(
                "Patient name cannot be empty".to_string(),
            ));
        }

        Ok(Appointment {
            id: Uuid::new_v4(),
            patient_name,
            doctor_name: doctor.name.clone(),
            specialization: doctor.specialization.clone(),
            start_time,
            status: AppointmentStatus::Booked,
        })
    }
}

/// Parse an `HH:MM` slot string.
pub fn parse_slot(slot: &str) -> Result<NaiveTime, DeskError> {
    NaiveTime::parse_from_str(slot.trim(), "%H:%M")
        .map_err(|_| DeskError::InvalidValue(format!("time slot '{}', expected HH:MM", slot)))
}
