//! Doctor roster: who works when, and how patients rate them.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::models::Doctor;

/// Podium position on the doctor rankings board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedDoctor<'a> {
    pub rank: usize,
    pub medal: Option<Medal>,
    pub doctor: &'a Doctor,
}

#[derive(Debug, Clone, Default)]
pub struct DoctorRoster {
    doctors: Vec<Doctor>,
}

impl DoctorRoster {
    pub fn new(doctors: Vec<Doctor>) -> Self {
        DoctorRoster { doctors }
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    /// Look a doctor up by display name.
    pub fn find(&self, name: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.name == name)
    }

    pub fn is_available_on(&self, name: &str, day: Weekday) -> bool {
        self.find(name).map_or(false, |d| d.works_on(day))
    }

    /// Slots the doctor offers on the weekday of `date`.
    pub fn slots_on(&self, name: &str, date: NaiveDate) -> &[String] {
        self.find(name)
            .map(|d| d.slots_on(date.weekday()))
            .unwrap_or(&[])
    }

    pub fn available_on(&self, day: Weekday) -> Vec<&Doctor> {
        self.doctors.iter().filter(|d| d.works_on(day)).collect()
    }

    /// Distinct specializations in roster order.
    pub fn specializations(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for doctor in &self.doctors {
            if !seen.contains(&doctor.specialization.as_str()) {
                seen.push(&doctor.specialization);
            }
        }
        seen
    }

    /// Doctors by rating, best first. The top three get a medal.
    pub fn rankings(&self) -> Vec<RankedDoctor<'_>> {
        let mut sorted: Vec<&Doctor> = self.doctors.iter().collect();
        sorted.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        sorted
            .into_iter()
            .enumerate()
            .map(|(rank, doctor)| RankedDoctor {
                rank: rank + 1,
                medal: match rank {
                    0 => Some(Medal::Gold),
                    1 => Some(Medal::Silver),
                    2 => Some(Medal::Bronze),
                    _ => None,
                },
                doctor,
            })
            .collect()
    }
}
