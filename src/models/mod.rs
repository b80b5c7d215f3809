//! Domain models for the tracker.
//!
//! # Core Concepts
//!
//! - [`Project`]: Top-level container. Its `has_daily` flag turns on the
//!   stand-up section of the daily report.
//! - [`Resource`]: A person that works on projects.
//! - [`ResourceProject`] / [`ResourceTask`]: Assignment links.
//! - [`Task`]: Work unit under a project with a priority and an optional end date.
//! - [`DailyTask`] / [`DailyImpediment`]: Stand-up entries for one resource
//!   in one project.
//!
//! Dates are kept as the text the user entered (nominally `dd/MM/yyyy`, see
//! [`crate::dates`]). Nothing is physically deleted in normal use; rows are
//! retired through their `active` flag.

mod assignment;
mod daily;
mod project;
mod resource;
mod task;

pub use assignment::*;
pub use daily::*;
pub use project::*;
pub use resource::*;
pub use task::*;
