use serde::{Deserialize, Serialize};

/// Links a resource to a project.
///
/// A `(project_id, resource_id)` pair can only be assigned once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceProject {
    pub id: i64,
    pub project_id: i64,
    pub resource_id: i64,
    pub assigned_at: String,
}

/// Links a resource to a task.
///
/// A `(task_id, resource_id)` pair can only be assigned once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceTask {
    pub id: i64,
    pub task_id: i64,
    pub resource_id: i64,
    pub assigned_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateResourceProjectInput {
    pub project_id: i64,
    pub resource_id: i64,
    pub assigned_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResourceProjectInput {
    pub project_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub assigned_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateResourceTaskInput {
    pub task_id: i64,
    pub resource_id: i64,
    pub assigned_at: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResourceTaskInput {
    pub task_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub assigned_at: Option<String>,
}
