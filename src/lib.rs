//! Clinic front-desk core.
//!
//! A walk-in queue ranked urgent-first, a doctor roster with weekly
//! availability, an appointment book, dashboard analytics, and thin
//! wrappers around an external language model.

pub mod analytics;
pub mod assist;
pub mod calendar;
pub mod config;
pub mod desk;
pub mod error;
pub mod models;
pub mod queue;
pub mod ranking;
pub mod roster;
pub mod seed;

pub use desk::FrontDesk;
pub use error::DeskError;
pub use ranking::{rank, QueueView, SortDirection, SortKey};
