use serde::{Deserialize, Serialize};

/// A tracked unit of work.
///
/// Projects are the top-level organizational unit. Tasks, daily tasks and
/// impediments all belong to a project, and resources are attached to it
/// through [`ResourceProject`](super::ResourceProject) assignments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    /// Start date as stored, nominally `dd/MM/yyyy`.
    pub start_date: String,
    pub active: bool,
    /// Whether the daily report includes a stand-up section for this project.
    pub has_daily: bool,
}

/// Input for creating a new project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to today when not provided.
    pub start_date: Option<String>,
    /// Defaults to `true`.
    pub active: Option<bool>,
    /// Defaults to `false`.
    pub has_daily: Option<bool>,
}

/// Input for updating an existing project. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProjectInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub start_date: Option<String>,
    pub active: Option<bool>,
    pub has_daily: Option<bool>,
}
