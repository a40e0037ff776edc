//! Leave Request Model

use super::serde_helpers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shared::models::LeaveStatus;
use surrealdb::RecordId;

/// Leave request ID type
pub type LeaveId = RecordId;

/// Leave request row
///
/// `employee_name` and `department` are snapshots taken at submit time
/// so HR list filters need no joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<LeaveId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    pub employee_name: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    #[serde(default)]
    pub status: LeaveStatus,
    #[serde(default)]
    pub created_at: i64,
}

impl LeaveRequest {
    /// Wire representation
    pub fn to_view(&self) -> shared::models::LeaveView {
        shared::models::LeaveView {
            id: self
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            employee: self.employee.to_string(),
            employee_name: self.employee_name.clone(),
            department: self.department.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            reason: self.reason.clone(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Internal create payload, built by the handler after validation
#[derive(Debug, Clone)]
pub struct LeaveCreate {
    pub employee: RecordId,
    pub employee_name: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
}
