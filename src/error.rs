//! Error types for the front-desk core.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

use crate::models::AppointmentStatus;

#[derive(Debug, Error)]
pub enum DeskError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid {0}")]
    InvalidValue(String),

    #[error("Patient {0} not found")]
    PatientNotFound(u32),

    #[error("Doctor '{0}' is not on the roster")]
    UnknownDoctor(String),

    #[error("Appointment {0} not found")]
    AppointmentNotFound(Uuid),

    #[error("{doctor} has no {slot} slot on {date}")]
    SlotUnavailable {
        doctor: String,
        date: NaiveDate,
        slot: String,
    },

    #[error("{doctor} is already booked at {slot} on {date}")]
    SlotTaken {
        doctor: String,
        date: NaiveDate,
        slot: String,
    },

    #[error("Cannot book on {0}, the date is in the past")]
    DateInPast(NaiveDate),

    #[error("Cannot move appointment from {from} to {to}")]
    InvalidTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
