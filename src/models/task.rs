use serde::{Deserialize, Serialize};

/// Priority assigned when a task is created without one.
pub const DEFAULT_PRIORITY: &str = "Media";

/// A unit of work within a project.
///
/// Priority is free text. The CLI documents `Alta`, `Media` and `Baja`, but
/// stored rows may carry anything and are rendered as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub detail: Option<String>,
    pub created_at: String,
    /// Completion or due date. `None` means open-ended.
    pub end_date: Option<String>,
    pub priority: String,
    pub active: bool,
}

/// Input for creating a new task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskInput {
    pub project_id: i64,
    pub title: String,
    pub detail: Option<String>,
    pub created_at: Option<String>,
    pub end_date: Option<String>,
    /// Defaults to [`DEFAULT_PRIORITY`] when missing or blank.
    pub priority: Option<String>,
    pub active: Option<bool>,
}

/// Input for updating a task. All fields are optional for partial updates.
///
/// `Some("")` clears `detail` or `end_date`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskInput {
    pub title: Option<String>,
    pub detail: Option<String>,
    pub end_date: Option<String>,
    pub priority: Option<String>,
    pub active: Option<bool>,
}

/// Filter for task listings. Every `Some` field narrows the result.
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    pub id: Option<i64>,
    pub project_id: Option<i64>,
    pub active: Option<bool>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
    /// Exact priority match.
    pub priority: Option<String>,
}
