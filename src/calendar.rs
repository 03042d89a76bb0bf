//! Appointment book for the clinic's scheduled visits.
//!
//! Bookings are checked against the doctor roster: the slot has to be one
//! the doctor offers on that weekday, and a doctor can only hold one
//! booked appointment per start time.

use chrono::{DateTime, Datelike, Local, NaiveDate};
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::DeskError;
use crate::models::{parse_slot, Appointment, AppointmentStatus};
use crate::roster::DoctorRoster;

/// What the booking form collects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingRequest {
    pub patient_name: String,
    pub doctor_name: String,
    pub date: NaiveDate,
    /// `HH:MM`, one of the doctor's offered slots.
    pub slot: String,
}

#[derive(Debug, Clone, Default)]
pub struct AppointmentBook {
    appointments: Vec<Appointment>,
}

impl AppointmentBook {
    pub fn new(appointments: Vec<Appointment>) -> Self {
        AppointmentBook { appointments }
    }

    /// Book a visit. `today` is the earliest date that can be booked.
    pub fn book(
        &mut self,
        request: BookingRequest,
        roster: &DoctorRoster,
        today: NaiveDate,
    ) -> Result<Appointment, DeskError> {
        let doctor = roster
            .find(&request.doctor_name)
            .ok_or_else(|| DeskError::UnknownDoctor(request.doctor_name.clone()))?;

        if request.date < today {
            warn!(date = %request.date, "booking rejected, date in the past");
            return Err(DeskError::DateInPast(request.date));
        }

        let time = parse_slot(&request.slot)?;
        let offered = doctor
            .slots_on(request.date.weekday())
            .iter()
            .any(|s| parse_slot(s).map_or(false, |t| t == time));
        if !offered {
            warn!(doctor = %doctor.name, date = %request.date, slot = %request.slot, "slot not offered");
            return Err(DeskError::SlotUnavailable {
                doctor: doctor.name.clone(),
                date: request.date,
                slot: request.slot,
            });
        }

        let start_time: DateTime<Local> = request
            .date
            .and_time(time)
            .and_local_timezone(Local)
            .single()
            .ok_or_else(|| {
                DeskError::InvalidValue(format!(
                    "local time {} {}",
                    request.date, request.slot
                ))
            })?;

        let taken = self.appointments.iter().any(|a| {
            a.status == AppointmentStatus::Booked
                && a.doctor_name == doctor.name
                && a.start_time == start_time
        });
        if taken {
            warn!(doctor = %doctor.name, %start_time, "slot already booked");
            return Err(DeskError::SlotTaken {
                doctor: doctor.name.clone(),
                date: request.date,
                slot: request.slot,
            });
        }

        let appointment = Appointment::new(request.patient_name, doctor, start_time)?;
        info!(
            id = %appointment.id,
            doctor = %appointment.doctor_name,
            start = %appointment.start_time.format("%Y-%m-%d %H:%M"),
            "booked appointment for {}",
            appointment.patient_name
        );
        self.appointments.push(appointment.clone());

        Ok(appointment)
    }

    /// Move a booked appointment to Completed or Cancelled.
    pub fn set_status(&mut self, id: Uuid, status: AppointmentStatus) -> Result<(), DeskError> {
        let appointment = self
            .appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(DeskError::AppointmentNotFound(id))?;

        if !appointment.status.can_transition_to(status) {
            return Err(DeskError::InvalidTransition {
                from: appointment.status,
                to: status,
            });
        }

        appointment.status = status;
        info!(%id, status = %status, "appointment status changed");
        Ok(())
    }

    pub fn get(&self, id: Uuid) -> Option<&Appointment> {
        self.appointments.iter().find(|a| a.id == id)
    }

    /// All appointments in booking order.
    pub fn all(&self) -> &[Appointment] {
        &self.appointments
    }

    /// Appointments starting on `date`, earliest first.
    pub fn on_date(&self, date: NaiveDate) -> Vec<&Appointment> {
        let mut day: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.start_time.date_naive() == date)
            .collect();
        day.sort_by_key(|a| a.start_time);
        day
    }

    /// Distinct dates that carry at least one appointment, ascending.
    pub fn booked_dates(&self) -> Vec<NaiveDate> {
        let mut dates: Vec<NaiveDate> = self
            .appointments
            .iter()
            .map(|a| a.start_time.date_naive())
            .collect();
        dates.sort();
        dates.dedup();
        dates
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;

    // 2026-03-02 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn request(patient: &str, doctor: &str, date: NaiveDate, slot: &str) -> BookingRequest {
        BookingRequest {
            patient_name: patient.to_string(),
            doctor_name: doctor.to_string(),
            date,
            slot: slot.to_string(),
        }
    }

    #[test]
    fn should_book_offered_slot() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();

        let appointment = book
            .book(request("Grace Lee", "Dr. Evelyn Reed", monday(), "11:00"), &roster, monday())
            .unwrap();

        assert_eq!(appointment.status, AppointmentStatus::Booked);
        assert_eq!(appointment.specialization, "Cardiology");
        assert_eq!(appointment.start_time.format("%H:%M").to_string(), "11:00");
        assert_eq!(book.on_date(monday()).len(), 1);
    }

    #[test]
    fn should_reject_slot_not_offered_that_day() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();

        let err = book
            .book(request("Grace Lee", "Dr. Samuel Green", monday(), "09:30"), &roster, monday())
            .unwrap_err();
        assert!(matches!(err, DeskError::SlotUnavailable { .. }));
    }

    #[test]
    fn should_reject_unknown_doctor_and_past_dates() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();

        let err = book
            .book(request("Grace Lee", "Dr. Nobody", monday(), "09:00"), &roster, monday())
            .unwrap_err();
        assert!(matches!(err, DeskError::UnknownDoctor(_)));

        let yesterday = monday().pred_opt().unwrap();
        let err = book
            .book(request("Grace Lee", "Dr. Evelyn Reed", yesterday, "09:00"), &roster, monday())
            .unwrap_err();
        assert!(matches!(err, DeskError::DateInPast(_)));
    }

    #[test]
    fn should_reject_blank_patient_name() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();
        let err = book
            .book(request("  ", "Dr. Evelyn Reed", monday(), "09:00"), &roster, monday())
            .unwrap_err();
        assert!(matches!(err, DeskError::Validation(_)));
        assert!(book.all().is_empty());
    }

    #[test]
    fn should_not_double_book_until_cancelled() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();

        let first = book
            .book(request("Grace Lee", "Dr. Evelyn Reed", monday(), "09:00"), &roster, monday())
            .unwrap();
        let err = book
            .book(request("Jack Turner", "Dr. Evelyn Reed", monday(), "09:00"), &roster, monday())
            .unwrap_err();
        assert!(matches!(err, DeskError::SlotTaken { .. }));

        book.set_status(first.id, AppointmentStatus::Cancelled).unwrap();
        assert!(book
            .book(request("Jack Turner", "Dr. Evelyn Reed", monday(), "09:00"), &roster, monday())
            .is_ok());
    }

    #[test]
    fn should_only_move_booked_appointments() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();
        let appointment = book
            .book(request("Grace Lee", "Dr. Evelyn Reed", monday(), "14:00"), &roster, monday())
            .unwrap();

        book.set_status(appointment.id, AppointmentStatus::Completed).unwrap();
        let err = book
            .set_status(appointment.id, AppointmentStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(err, DeskError::InvalidTransition { .. }));
        assert_eq!(book.get(appointment.id).unwrap().status, AppointmentStatus::Completed);

        let err = book.set_status(Uuid::new_v4(), AppointmentStatus::Completed).unwrap_err();
        assert!(matches!(err, DeskError::AppointmentNotFound(_)));
    }

    #[test]
    fn should_list_booked_dates_once() {
        let roster = DoctorRoster::new(seed::doctors());
        let mut book = AppointmentBook::default();
        let next_monday = monday() + chrono::Duration::days(7);
        book.book(request("A", "Dr. Evelyn Reed", next_monday, "09:00"), &roster, monday())
            .unwrap();
        book.book(request("B", "Dr. Evelyn Reed", monday(), "09:00"), &roster, monday())
            .unwrap();
        book.book(request("C", "Dr. Olivia Blue", monday(), "13:00"), &roster, monday())
            .unwrap();

        assert_eq!(book.booked_dates(), vec![monday(), next_monday]);
        let names: Vec<&str> = book
            .on_date(monday())
            .iter()
            .map(|a| a.patient_name.as_str())
            .collect();
        assert_eq!(names, vec!["B", "C"]);
    }
}
