//! Project, task and stand-up tracker with daily Markdown reports.
//!
//! Layers, leaves first:
//! - [`dates`]: `dd/MM/yyyy` parsing, comparison and range checks
//! - [`db`]: SQLite entity store
//! - [`services`]: validating facade used by the command layer
//! - [`report`]: the daily report generator
//! - [`ai`]: management suggestions from a chat-completions API
//! - [`cli`] and [`output`]: the `dtrack` command line

pub mod ai;
pub mod cli;
pub mod config;
pub mod dates;
pub mod db;
pub mod models;
pub mod output;
pub mod report;
pub mod services;
