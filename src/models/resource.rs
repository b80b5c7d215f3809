use serde::{Deserialize, Serialize};

/// A person or team member that can be assigned to projects and tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub name: String,
    pub active: bool,
    pub created_at: String,
}

/// Input for creating a new resource.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateResourceInput {
    pub name: String,
    pub active: Option<bool>,
    pub created_at: Option<String>,
}

/// Input for updating an existing resource. All fields are optional for partial updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateResourceInput {
    pub name: Option<String>,
    pub active: Option<bool>,
}
