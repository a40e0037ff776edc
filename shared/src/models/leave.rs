//! Leave request wire types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Leave request status. Pending is the only non-terminal state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl Default for LeaveStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Leave request as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveView {
    pub id: String,
    /// Employee record id ("employee:...")
    pub employee: String,
    /// Employee name snapshot at submit time
    pub employee_name: String,
    pub department: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub reason: String,
    pub status: LeaveStatus,
    /// Unix timestamp millis
    pub created_at: i64,
}

/// Submit leave payload. Dates travel as "YYYY-MM-DD" strings so the
/// server can report format problems as validation errors instead of
/// deserialization failures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSubmitRequest {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    #[serde(default)]
    pub reason: String,
}

/// HR action on a pending leave
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveActionRequest {
    /// "approve" | "reject"
    pub action: String,
}
