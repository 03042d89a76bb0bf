//! Demo data loaded into the desk at startup.
//!
//! All names are fictional. Patient arrivals are placed on `today` and
//! appointments on the two following days.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime, Weekday};
use uuid::Uuid;

use crate::models::{
    Appointment, AppointmentStatus, DayAvailability, Doctor, Patient, PatientStatus, Priority,
};

fn slots(times: &[&str]) -> Vec<String> {
    times.iter().map(|t| t.to_string()).collect()
}

/// Local timestamp on `date`, falling back to the earliest valid instant
/// when the wall-clock time does not exist.
fn local_at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Local> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let naive = date.and_time(time);
    naive
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or_else(|| naive.and_utc().with_timezone(&Local))
}

pub fn doctors() -> Vec<Doctor> {
    vec![
        Doctor {
            id: 1,
            name: "Dr. Evelyn Reed".to_string(),
            specialization: "Cardiology".to_string(),
            availability: vec![
                DayAvailability { day: Weekday::Mon, slots: slots(&["09:00", "11:00", "14:00"]) },
                DayAvailability { day: Weekday::Wed, slots: slots(&["10:00", "12:00", "15:00"]) },
            ],
            rating: 4.9,
            reviews: 124,
        },
        Doctor {
            id: 2,
            name: "Dr. Samuel Green".to_string(),
            specialization: "Pediatrics".to_string(),
            availability: vec![
                DayAvailability { day: Weekday::Tue, slots: slots(&["09:30", "11:30", "14:30"]) },
                DayAvailability { day: Weekday::Thu, slots: slots(&["10:30", "12:30", "15:30"]) },
            ],
            rating: 4.8,
            reviews: 98,
        },
        Doctor {
            id: 3,
            name: "Dr. Olivia Blue".to_string(),
            specialization: "Dermatology".to_string(),
            availability: vec![
                DayAvailability { day: Weekday::Mon, slots: slots(&["13:00", "16:00"]) },
                DayAvailability { day: Weekday::Fri, slots: slots(&["09:00", "11:00", "14:00"]) },
            ],
            rating: 4.7,
            reviews: 152,
        },
    ]
}

pub fn patients(today: NaiveDate) -> Vec<Patient> {
    let rows = [
        ("Alice Johnson", PatientStatus::WithDoctor, (9, 5), "Dr. Evelyn Reed"),
        ("Bob Williams", PatientStatus::Waiting, (9, 15), "Dr. Samuel Green"),
        ("Charlie Brown", PatientStatus::Waiting, (9, 30), "Dr. Evelyn Reed"),
        ("Diana Miller", PatientStatus::Waiting, (9, 45), "Dr. Olivia Blue"),
        ("Ethan Davis", PatientStatus::Completed, (8, 50), "Dr. Samuel Green"),
    ];

    rows.iter()
        .enumerate()
        .map(|(i, (name, status, (hour, minute), doctor))| Patient {
            id: i as u32 + 1,
            name: name.to_string(),
            queue_number: i as u32 + 1,
            status: *status,
            priority: Priority::Normal,
            arrival_time: local_at(today, *hour, *minute),
            doctor: doctor.to_string(),
        })
        .collect()
}

pub fn appointments(today: NaiveDate) -> Vec<Appointment> {
    let rows = [
        ("Grace Lee", "Dr. Evelyn Reed", "Cardiology", 1, (10, 0)),
        ("Henry Wilson", "Dr. Samuel Green", "Pediatrics", 1, (11, 30)),
        ("Ivy Clark", "Dr. Olivia Blue", "Dermatology", 2, (14, 0)),
        ("Jack Turner", "Dr. Evelyn Reed", "Cardiology", 2, (15, 0)),
    ];

    rows.iter()
        .map(|(patient, doctor, specialization, days, (hour, minute))| Appointment {
            id: Uuid::new_v4(),
            patient_name: patient.to_string(),
            doctor_name: doctor.to_string(),
            specialization: specialization.to_string(),
            start_time: local_at(today + Duration::days(*days), *hour, *minute),
            status: AppointmentStatus::Booked,
        })
        .collect()
}
