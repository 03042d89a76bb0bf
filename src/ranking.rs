//! Queue ranking engine.
//!
//! Turns the patient collection plus the desk's filter and sort
//! preferences into the ordered list shown on the queue board. The
//! ordering is a fixed comparator chain:
//!
//! 1. priority tag, Urgent before Normal, whatever else is selected
//! 2. the selected secondary key in the selected direction
//! 3. ascending arrival time
//! 4. ascending queue number, so the order is total
//!
//! Ranking is a pure function of its inputs and never fails.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::models::{Patient, PatientStatus};

/// Column the board is sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    QueueNumber,
    Name,
    ArrivalTime,
    /// No secondary key: urgent first, then arrival order.
    #[default]
    Priority,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    #[default]
    Descending,
}

impl SortDirection {
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Filter and sort preferences for one rendering of the queue board.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct QueueView {
    /// Case-insensitive substring of the patient name. Empty matches all.
    pub name_filter: String,
    /// `None` shows every status.
    pub status_filter: Option<PatientStatus>,
    /// Exact doctor display name. `None` shows every doctor.
    pub doctor_filter: Option<String>,
    pub sort_key: SortKey,
    pub direction: SortDirection,
}

impl QueueView {
    pub fn new(sort_key: SortKey, direction: SortDirection) -> Self {
        QueueView {
            sort_key,
            direction,
            ..Default::default()
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name_filter = name.into();
        self
    }

    pub fn with_status(mut self, status: PatientStatus) -> Self {
        self.status_filter = Some(status);
        self
    }

    pub fn with_doctor(mut self, doctor: impl Into<String>) -> Self {
        self.doctor_filter = Some(doctor.into());
        self
    }

    /// Column-header click: the active key flips direction, a new key
    /// starts ascending.
    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort_key == key {
            self.direction = self.direction.flipped();
        } else {
            self.sort_key = key;
            self.direction = SortDirection::Ascending;
        }
    }

    /// Clear the name, status and doctor filters. Sorting is kept.
    pub fn reset_filters(&mut self) {
        self.name_filter.clear();
        self.status_filter = None;
        self.doctor_filter = None;
    }

    pub fn matches(&self, patient: &Patient) -> bool {
        let needle = self.name_filter.to_lowercase();
        patient.name.to_lowercase().contains(&needle)
            && self.status_filter.map_or(true, |s| patient.status == s)
            && self
                .doctor_filter
                .as_deref()
                .map_or(true, |d| patient.doctor == d)
    }
}

/// Compare two patients by the full comparator chain.
pub fn compare(a: &Patient, b: &Patient, key: SortKey, direction: SortDirection) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then_with(|| compare_secondary(a, b, key, direction))
        .then_with(|| a.arrival_time.cmp(&b.arrival_time))
        .then_with(|| a.queue_number.cmp(&b.queue_number))
}

fn compare_secondary(a: &Patient, b: &Patient, key: SortKey, direction: SortDirection) -> Ordering {
    let ordering = match key {
        SortKey::Priority => return Ordering::Equal,
        SortKey::QueueNumber => a.queue_number.cmp(&b.queue_number),
        SortKey::Name => a.name.cmp(&b.name),
        SortKey::ArrivalTime => a.arrival_time.cmp(&b.arrival_time),
    };
    direction.apply(ordering)
}

/// Filter and order the patients for display.
pub fn rank<'a, I>(patients: I, view: &QueueView) -> Vec<&'a Patient>
where
    I: IntoIterator<Item = &'a Patient>,
{
    let mut ranked: Vec<&Patient> = patients.into_iter().filter(|p| view.matches(p)).collect();
    ranked.sort_by(|a, b| compare(a, b, view.sort_key, view.direction));
    ranked
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use crate::models::Priority;
    use chrono::{Duration, Local, TimeZone};
    use proptest::prelude::*;
    use std::collections::BTreeSet;

    const NAMES: [&str; 6] = ["Alice", "Bob", "Cara", "Dev", "alice", "Bo"];
    const DOCTORS: [&str; 3] = ["Dr. Evelyn Reed", "Dr. Samuel Green", "Dr. Olivia Blue"];

    fn patients_strategy() -> impl Strategy<Value = Vec<Patient>> {
        proptest::collection::vec(
            (any::<bool>(), 0..NAMES.len(), 0i64..240, 0..4usize, 0..DOCTORS.len()),
            0..40,
        )
        .prop_map(|rows| {
            let base = Local.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap();
            rows.into_iter()
                .enumerate()
                .map(|(i, (urgent, name, minutes, status, doctor))| Patient {
                    id: i as u32 + 1,
                    name: NAMES[name].to_string(),
                    queue_number: i as u32 + 1,
                    status: PatientStatus::ALL[status],
                    priority: if urgent { Priority::Urgent } else { Priority::Normal },
                    arrival_time: base + Duration::minutes(minutes),
                    doctor: DOCTORS[doctor].to_string(),
                })
                .collect()
        })
    }

    fn view_strategy() -> impl Strategy<Value = QueueView> {
        (
            prop_oneof![
                Just(SortKey::Priority),
                Just(SortKey::QueueNumber),
                Just(SortKey::Name),
                Just(SortKey::ArrivalTime),
            ],
            any::<bool>(),
        )
            .prop_map(|(key, ascending)| {
                let direction = if ascending {
                    SortDirection::Ascending
                } else {
                    SortDirection::Descending
                };
                QueueView::new(key, direction)
            })
    }

    fn same_key(a: &Patient, b: &Patient, key: SortKey) -> bool {
        match key {
            SortKey::Priority => true,
            SortKey::QueueNumber => a.queue_number == b.queue_number,
            SortKey::Name => a.name == b.name,
            SortKey::ArrivalTime => a.arrival_time == b.arrival_time,
        }
    }

    proptest! {
        /// An unfiltered view neither drops nor duplicates records.
        #[test]
        fn unfiltered_view_preserves_every_record(
            patients in patients_strategy(),
            view in view_strategy(),
        ) {
            let ranked = rank(&patients, &view);
            prop_assert_eq!(ranked.len(), patients.len());
            let ids: BTreeSet<u32> = ranked.iter().map(|p| p.id).collect();
            prop_assert_eq!(ids.len(), patients.len());
        }

        /// No Normal record ever appears before an Urgent one.
        #[test]
        fn urgent_always_precedes_normal(
            patients in patients_strategy(),
            view in view_strategy(),
        ) {
            let ranked = rank(&patients, &view);
            let first_normal = ranked.iter().position(|p| !p.priority.is_urgent());
            if let Some(idx) = first_normal {
                prop_assert!(ranked[idx..].iter().all(|p| !p.priority.is_urgent()));
            }
        }

        /// Normal records tied on the active key come out in arrival order.
        #[test]
        fn ties_fall_back_to_arrival_order(
            patients in patients_strategy(),
            view in view_strategy(),
        ) {
            let ranked = rank(&patients, &view);
            let normals: Vec<&&Patient> = ranked
                .iter()
                .filter(|p| !p.priority.is_urgent())
                .collect();
            for (i, earlier) in normals.iter().enumerate() {
                for later in &normals[i + 1..] {
                    if same_key(earlier, later, view.sort_key) {
                        prop_assert!(earlier.arrival_time <= later.arrival_time);
                    }
                }
            }
        }

        /// Ranking the same input twice gives the same order.
        #[test]
        fn ranking_is_idempotent(
            patients in patients_strategy(),
            view in view_strategy(),
            needle in "[a-zA-Z]{0,2}",
        ) {
            let view = view.with_name(needle);
            let first: Vec<u32> = rank(&patients, &view).iter().map(|p| p.id).collect();
            let second: Vec<u32> = rank(&patients, &view).iter().map(|p| p.id).collect();
            prop_assert_eq!(first, second);
        }
    }
}
