//! Task wire types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        Self::Medium
    }
}

/// Task status. Transitions are free; the employee tracks their own
/// progress.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Task as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskView {
    pub id: String,
    /// Assigned employee record id ("employee:...")
    pub employee: String,
    /// Assigning HR record id ("hr:...")
    pub hr: String,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
    pub status: TaskStatus,
    /// Unix timestamp millis
    pub created_at: i64,
}

/// Create task payload (HR only). The due date travels as a
/// "YYYY-MM-DD" string so format problems surface as validation errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreateRequest {
    /// Assigned employee record id
    pub employee: String,
    pub title: Option<String>,
    #[serde(default)]
    pub description: String,
    pub due_date: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
}

/// Status update payload (owning employee only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskStatusUpdateRequest {
    pub status: TaskStatus,
}
