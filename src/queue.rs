//! Walk-in patient store.
//!
//! `PatientStore` is the single owner of the queue records. Callers
//! mutate it only through `admit`, `set_status` and `set_priority`, and
//! hand it by reference to the ranking engine for display.

use chrono::{DateTime, Local};
use tracing::{info, warn};

use crate::error::DeskError;
use crate::models::{Patient, PatientStatus, Priority};

#[derive(Debug, Clone)]
pub struct PatientStore {
    patients: Vec<Patient>,
    next_id: u32,
    next_queue_number: u32,
}

impl Default for PatientStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PatientStore {
    pub fn new() -> Self {
        PatientStore {
            patients: Vec::new(),
            next_id: 1,
            next_queue_number: 1,
        }
    }

    /// Build a store from existing records. New ids and queue numbers
    /// continue after the largest ones already present.
    pub fn from_records(records: Vec<Patient>) -> Self {
        let next_id = records.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        let next_queue_number = records.iter().map(|p| p.queue_number).max().unwrap_or(0) + 1;

        PatientStore {
            patients: records,
            next_id,
            next_queue_number,
        }
    }

    /// Register a walk-in. The patient starts out `Waiting`.
    pub fn admit(
        &mut self,
        name: &str,
        doctor: &str,
        priority: Priority,
        arrival_time: DateTime<Local>,
    ) -> Result<&Patient, DeskError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("rejected walk-in with empty name");
            return Err(DeskError::Validation(
                "Patient name cannot be empty".to_string(),
            ));
        }
        let doctor = doctor.trim();
        if doctor.is_empty() {
            warn!(patient = name, "rejected walk-in without a doctor");
            return Err(DeskError::Validation(
                "A doctor must be assigned".to_string(),
            ));
        }

        let patient = Patient {
            id: self.next_id,
            name: name.to_string(),
            queue_number: self.next_queue_number,
            status: PatientStatus::Waiting,
            priority,
            arrival_time,
            doctor: doctor.to_string(),
        };
        self.next_id += 1;
        self.next_queue_number += 1;

        info!(
            id = patient.id,
            queue_number = patient.queue_number,
            doctor = %patient.doctor,
            priority = %patient.priority,
            "admitted walk-in {}",
            patient.name
        );

        self.patients.push(patient);
        // Just pushed, so the vector is non-empty.
        Ok(&self.patients[self.patients.len() - 1])
    }

    pub fn set_status(&mut self, id: u32, status: PatientStatus) -> Result<(), DeskError> {
        let patient = self.get_mut(id)?;
        let previous = patient.status;
        patient.status = status;
        info!(id, from = %previous, to = %status, "patient status changed");
        Ok(())
    }

    pub fn set_priority(&mut self, id: u32, priority: Priority) -> Result<(), DeskError> {
        let patient = self.get_mut(id)?;
        patient.priority = priority;
        info!(id, priority = %priority, "patient priority changed");
        Ok(())
    }

    pub fn get(&self, id: u32) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    fn get_mut(&mut self, id: u32) -> Result<&mut Patient, DeskError> {
        self.patients
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| {
                warn!(id, "no such patient");
                DeskError::PatientNotFound(id)
            })
    }

    /// All records in registration order.
    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn len(&self) -> usize {
        self.patients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patients.is_empty()
    }

    /// Patients still waiting or with a doctor.
    pub fn active_count(&self) -> usize {
        self.patients.iter().filter(|p| p.status.is_active()).count()
    }
}
