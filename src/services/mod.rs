//! Validating facade over the entity store.
//!
//! [`Tracker`] is what the command layer talks to. It checks required fields,
//! date syntax and referenced rows before anything reaches [`Database`], and
//! turns "no such row" into [`ServiceError::NotFound`].

mod daily;
mod projects;
mod resources;
mod tasks;

use thiserror::Error;

use crate::dates;
use crate::db::Database;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

#[derive(Clone)]
pub struct Tracker {
    db: Database,
}

impl Tracker {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    fn require_project(&self, id: i64) -> ServiceResult<()> {
        match self.db.get_project(id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound {
                entity: "Project",
                id,
            }),
        }
    }

    fn require_resource(&self, id: i64) -> ServiceResult<()> {
        match self.db.get_resource(id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound {
                entity: "Resource",
                id,
            }),
        }
    }

    fn require_task(&self, id: i64) -> ServiceResult<()> {
        match self.db.get_task(id)? {
            Some(_) => Ok(()),
            None => Err(ServiceError::NotFound { entity: "Task", id }),
        }
    }
}

fn not_found(entity: &'static str, id: i64) -> ServiceError {
    ServiceError::NotFound { entity, id }
}

/// Reject a missing or whitespace-only required text field.
fn require_text(field: &str, value: &str) -> ServiceResult<()> {
    if value.trim().is_empty() {
        return Err(ServiceError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// An update may leave a required field alone, but not blank it.
fn require_text_if_set(field: &str, value: Option<&str>) -> ServiceResult<()> {
    match value {
        Some(value) => require_text(field, value),
        None => Ok(()),
    }
}

/// Empty means "no date"; anything else must be `dd/MM/yyyy`.
fn check_date(field: &str, value: Option<&str>) -> ServiceResult<()> {
    match value {
        Some(value) if !value.is_empty() => dates::parse_date(value)
            .map(|_| ())
            .map_err(|e| ServiceError::Validation(format!("{}: {}", field, e))),
        _ => Ok(()),
    }
}
