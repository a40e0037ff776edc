//! Task Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::{TaskPriority, TaskStatus};
use surrealdb::RecordId;

/// Task ID type
pub type TaskId = RecordId;

/// Task row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<TaskId>,
    /// Assigned employee
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    /// Assigning HR account
    #[serde(with = "serde_helpers::record_id")]
    pub hr: RecordId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub created_at: i64,
}

impl Task {
    /// Wire representation
    pub fn to_view(&self) -> shared::models::TaskView {
        shared::models::TaskView {
            id: self
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            employee: self.employee.to_string(),
            hr: self.hr.to_string(),
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date,
            priority: self.priority,
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Internal create payload, built by the handler after validation
#[derive(Debug, Clone)]
pub struct TaskCreate {
    pub employee: RecordId,
    pub hr: RecordId,
    pub title: String,
    pub description: String,
    pub due_date: NaiveDate,
    pub priority: TaskPriority,
}
