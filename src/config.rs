//! Desk configuration, read from a TOML file.
//!
//! Every field has a default, so an empty file (or no file at all) gives
//! a working desk seeded with the demo roster.
//!
//! ```toml
//! log_filter = "frontdesk=debug"
//! sort_key = "arrival_time"
//! direction = "ascending"
//! seed_demo_data = true
//!
//! [peak_hours]
//! first = 7
//! last = 20
//! ```

use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::analytics::HourWindow;
use crate::error::DeskError;
use crate::models::{parse_slot, Doctor};
use crate::ranking::{QueueView, SortDirection, SortKey};

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeskConfig {
    /// `tracing_subscriber::EnvFilter` directive. `RUST_LOG` wins when set.
    pub log_filter: String,
    pub sort_key: SortKey,
    pub direction: SortDirection,
    pub peak_hours: HourWindow,
    /// Load the demo patients and appointments at startup.
    pub seed_demo_data: bool,
    /// Replaces the demo roster when present. Demo patients and
    /// appointments are not loaded alongside a custom roster.
    pub doctors: Option<Vec<Doctor>>,
}

impl Default for DeskConfig {
    fn default() -> Self {
        DeskConfig {
            log_filter: "info".to_string(),
            sort_key: SortKey::default(),
            direction: SortDirection::default(),
            peak_hours: HourWindow::default(),
            seed_demo_data: true,
            doctors: None,
        }
    }
}

impl DeskConfig {
    pub fn from_toml(content: &str) -> Result<Self, DeskError> {
        let config: DeskConfig =
            toml::from_str(content).map_err(|e| DeskError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read the file at `path`, or fall back to defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self, DeskError> {
        match path {
            Some(path) => {
                debug!(path = %path.display(), "loading desk config");
                let content = fs::read_to_string(path)?;
                Self::from_toml(&content)
            }
            None => Ok(DeskConfig::default()),
        }
    }

    fn validate(&self) -> Result<(), DeskError> {
        let HourWindow { first, last } = self.peak_hours;
        if first > last || last > 23 {
            return Err(DeskError::Config(format!(
                "peak_hours must satisfy first <= last <= 23, got {}..={}",
                first, last
            )));
        }
        if let Some(doctors) = &self.doctors {
            for (i, doctor) in doctors.iter().enumerate() {
                if doctors[..i].iter().any(|d| d.name == doctor.name) {
                    return Err(DeskError::Config(format!(
                        "doctor '{}' is listed twice",
                        doctor.name
                    )));
                }
                if !doctor.rating.is_finite() {
                    return Err(DeskError::Config(format!(
                        "doctor '{}' has a non-finite rating",
                        doctor.name
                    )));
                }
                for slot in doctor.availability.iter().flat_map(|a| &a.slots) {
                    parse_slot(slot).map_err(|_| {
                        DeskError::Config(format!(
                            "doctor '{}' has slot '{}', expected HH:MM",
                            doctor.name, slot
                        ))
                    })?;
                }
            }
        }
        Ok(())
    }

    /// The queue view the board opens with.
    pub fn initial_view(&self) -> QueueView {
        QueueView::new(self.sort_key, self.direction)
    }
}
