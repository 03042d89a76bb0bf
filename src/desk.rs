//! The front desk: one owner for the queue, the roster and the book.

use chrono::{DateTime, Local, NaiveDate};
use tracing::warn;
use uuid::Uuid;

use crate::analytics::{self, DailySummary, HourBucket, HourWindow, Overview, Workload};
use crate::calendar::{AppointmentBook, BookingRequest};
use crate::config::DeskConfig;
use crate::error::DeskError;
use crate::models::{Appointment, AppointmentStatus, Patient, PatientStatus, Priority};
use crate::queue::PatientStore;
use crate::ranking::{self, QueueView};
use crate::roster::DoctorRoster;
use crate::seed;

#[derive(Debug, Clone)]
pub struct FrontDesk {
    pub patients: PatientStore,
    pub roster: DoctorRoster,
    pub book: AppointmentBook,
    peak_window: HourWindow,
}

impl FrontDesk {
    pub fn new(roster: DoctorRoster, patients: PatientStore, book: AppointmentBook) -> Self {
        FrontDesk {
            patients,
            roster,
            book,
            peak_window: HourWindow::default(),
        }
    }

    /// Build the desk described by `config`, seeding demo records for
    /// `today` when asked to. Demo records reference the demo roster, so
    /// they are skipped when the config supplies its own doctors.
    pub fn from_config(config: &DeskConfig, today: NaiveDate) -> Self {
        let custom_roster = config.doctors.is_some();
        if custom_roster && config.seed_demo_data {
            warn!("custom roster configured; not loading demo patients and appointments");
        }
        let roster = DoctorRoster::new(config.doctors.clone().unwrap_or_else(seed::doctors));
        let (patients, book) = if config.seed_demo_data && !custom_roster {
            (
                PatientStore::from_records(seed::patients(today)),
                AppointmentBook::new(seed::appointments(today)),
            )
        } else {
            (PatientStore::new(), AppointmentBook::default())
        };

        let mut desk = FrontDesk::new(roster, patients, book);
        desk.peak_window = config.peak_hours;
        desk
    }

    /// Register a walk-in for a doctor on the roster.
    pub fn admit_walk_in(
        &mut self,
        name: &str,
        doctor: &str,
        priority: Priority,
        arrival_time: DateTime<Local>,
    ) -> Result<&Patient, DeskError> {
        let doctor = doctor.trim();
        if self.roster.find(doctor).is_none() {
            warn!(doctor, "walk-in assigned to unknown doctor");
            return Err(DeskError::UnknownDoctor(doctor.to_string()));
        }
        self.patients.admit(name, doctor, priority, arrival_time)
    }

    pub fn update_status(&mut self, id: u32, status: PatientStatus) -> Result<(), DeskError> {
        self.patients.set_status(id, status)
    }

    pub fn update_priority(&mut self, id: u32, priority: Priority) -> Result<(), DeskError> {
        self.patients.set_priority(id, priority)
    }

    /// The queue board as `view` asks for it.
    pub fn queue(&self, view: &QueueView) -> Vec<&Patient> {
        ranking::rank(self.patients.patients(), view)
    }

    pub fn book_appointment(
        &mut self,
        request: BookingRequest,
        today: NaiveDate,
    ) -> Result<Appointment, DeskError> {
        self.book.book(request, &self.roster, today)
    }

    pub fn set_appointment_status(
        &mut self,
        id: Uuid,
        status: AppointmentStatus,
    ) -> Result<(), DeskError> {
        self.book.set_status(id, status)
    }

    pub fn overview(&self, today: NaiveDate) -> Overview {
        analytics::overview(self.patients.patients(), &self.book, &self.roster, today)
    }

    pub fn summary(&self, today: NaiveDate) -> DailySummary {
        analytics::daily_summary(self.patients.patients(), &self.book, today)
    }

    pub fn peak_hours(&self) -> Vec<HourBucket> {
        analytics::peak_hours(self.patients.patients(), self.peak_window)
    }

    pub fn workload(&self) -> Vec<Workload<'_>> {
        analytics::doctor_workload(&self.roster, self.patients.patients())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn should_reject_walk_in_for_unknown_doctor() {
        let mut desk = FrontDesk::from_config(&DeskConfig::default(), monday());
        let arrival = Local.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let err = desk
            .admit_walk_in("Kim", "Dr. Nobody", Priority::Normal, arrival)
            .unwrap_err();
        assert!(matches!(err, DeskError::UnknownDoctor(_)));
        assert_eq!(desk.patients.len(), 5);
    }

    #[test]
    fn should_accept_padded_doctor_name() {
        let mut desk = FrontDesk::from_config(&DeskConfig::default(), monday());
        let arrival = Local.with_ymd_and_hms(2026, 3, 2, 10, 0, 0).unwrap();
        let patient = desk
            .admit_walk_in("Kim", "  Dr. Evelyn Reed ", Priority::Normal, arrival)
            .unwrap();
        assert_eq!(patient.doctor, "Dr. Evelyn Reed");
        let reed = desk
            .workload()
            .into_iter()
            .find(|w| w.doctor.name == "Dr. Evelyn Reed")
            .unwrap();
        assert_eq!(reed.patients, 3);
    }

    #[test]
    fn should_skip_demo_records_with_custom_roster() {
        let mut stone = seed::doctors().remove(0);
        stone.name = "Dr. Ada Stone".to_string();
        let config = DeskConfig {
            doctors: Some(vec![stone]),
            ..DeskConfig::default()
        };
        assert!(config.seed_demo_data);

        let desk = FrontDesk::from_config(&config, monday());
        assert!(desk.patients.is_empty());
        assert!(desk.book.all().is_empty());
        assert_eq!(desk.roster.doctors().len(), 1);
    }

    #[test]
    fn should_start_empty_without_seed() {
        let config = DeskConfig {
            seed_demo_data: false,
            ..DeskConfig::default()
        };
        let desk = FrontDesk::from_config(&config, monday());
        assert!(desk.patients.is_empty());
        assert!(desk.book.all().is_empty());
        assert_eq!(desk.roster.doctors().len(), 3);
    }

    #[test]
    fn should_use_configured_peak_window() {
        let config = DeskConfig {
            peak_hours: HourWindow { first: 9, last: 9 },
            ..DeskConfig::default()
        };
        let desk = FrontDesk::from_config(&config, monday());
        assert_eq!(desk.peak_hours(), vec![HourBucket { hour: 9, arrivals: 4 }]);
    }
}
