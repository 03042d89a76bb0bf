//! Dashboard figures derived from the queue, the roster and the book.

use chrono::{Datelike, NaiveDate, Timelike};
use serde::{Deserialize, Serialize};

use crate::calendar::AppointmentBook;
use crate::models::{AppointmentStatus, Doctor, Patient, PatientStatus};
use crate::roster::DoctorRoster;

/// Headline cards on the overview page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Overview {
    pub patients_in_queue: usize,
    pub appointments_today: usize,
    pub doctors_available_today: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DailySummary {
    pub patients_today: usize,
    pub appointments_today: usize,
    pub completed_today: usize,
}

/// Inclusive range of hours shown on the peak-hours chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourWindow {
    pub first: u32,
    pub last: u32,
}

impl Default for HourWindow {
    fn default() -> Self {
        HourWindow { first: 8, last: 19 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct HourBucket {
    pub hour: u32,
    pub arrivals: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Workload<'a> {
    pub doctor: &'a Doctor,
    pub patients: usize,
}

pub fn overview(
    patients: &[Patient],
    book: &AppointmentBook,
    roster: &DoctorRoster,
    today: NaiveDate,
) -> Overview {
    Overview {
        patients_in_queue: patients.iter().filter(|p| p.status.is_active()).count(),
        appointments_today: book
            .on_date(today)
            .iter()
            .filter(|a| a.status == AppointmentStatus::Booked)
            .count(),
        doctors_available_today: roster.available_on(today.weekday()).len(),
    }
}

pub fn daily_summary(patients: &[Patient], book: &AppointmentBook, today: NaiveDate) -> DailySummary {
    let todays_patients: Vec<&Patient> = patients
        .iter()
        .filter(|p| p.arrival_time.date_naive() == today)
        .collect();
    let todays_appointments = book.on_date(today);

    let completed = todays_appointments
        .iter()
        .filter(|a| a.status == AppointmentStatus::Completed)
        .count()
        + todays_patients
            .iter()
            .filter(|p| p.status == PatientStatus::Completed)
            .count();

    DailySummary {
        patients_today: todays_patients.len(),
        appointments_today: todays_appointments.len(),
        completed_today: completed,
    }
}

/// Arrivals per hour of day, one bucket per hour in `window`.
pub fn peak_hours(patients: &[Patient], window: HourWindow) -> Vec<HourBucket> {
    (window.first..=window.last)
        .map(|hour| HourBucket {
            hour,
            arrivals: patients
                .iter()
                .filter(|p| p.arrival_time.hour() == hour)
                .count(),
        })
        .collect()
}

/// Patients assigned to each doctor, busiest first.
pub fn doctor_workload<'a>(roster: &'a DoctorRoster, patients: &[Patient]) -> Vec<Workload<'a>> {
    let mut workload: Vec<Workload<'a>> = roster
        .doctors()
        .iter()
        .map(|doctor| Workload {
            doctor,
            patients: patients.iter().filter(|p| p.doctor == doctor.name).count(),
        })
        .collect();
    workload.sort_by(|a, b| b.patients.cmp(&a.patients));
    workload
}
