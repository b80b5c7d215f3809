use serde::{Deserialize, Serialize};

/// A stand-up item tracked for one resource within one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTask {
    pub id: i64,
    pub project_id: i64,
    pub resource_id: i64,
    pub title: String,
    pub created_at: String,
    pub end_date: Option<String>,
    pub active: bool,
}

/// A blocking issue reported by a resource within a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyImpediment {
    pub id: i64,
    pub project_id: i64,
    pub resource_id: i64,
    pub impediment: String,
    pub explanation: String,
    pub created_at: String,
    pub end_date: Option<String>,
    pub active: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateDailyTaskInput {
    pub project_id: i64,
    pub resource_id: i64,
    pub title: String,
    pub created_at: Option<String>,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

/// `Some("")` for `end_date` reopens the daily task.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateDailyTaskInput {
    pub title: Option<String>,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateImpedimentInput {
    pub project_id: i64,
    pub resource_id: i64,
    pub impediment: String,
    pub explanation: String,
    pub created_at: Option<String>,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateImpedimentInput {
    pub impediment: Option<String>,
    pub explanation: Option<String>,
    pub end_date: Option<String>,
    pub active: Option<bool>,
}

/// Filter for daily task listings.
#[derive(Debug, Clone, Default)]
pub struct DailyTaskFilter {
    pub id: Option<i64>,
    pub project_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub active: Option<bool>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

/// Filter for impediment listings.
#[derive(Debug, Clone, Default)]
pub struct ImpedimentFilter {
    pub id: Option<i64>,
    pub project_id: Option<i64>,
    pub resource_id: Option<i64>,
    pub active: Option<bool>,
    /// Case-insensitive substring of the impediment text.
    pub text: Option<String>,
}
