//! Attendance Record Model

use super::serde_helpers;
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use shared::models::AttendanceStatus;
use surrealdb::RecordId;

/// Attendance record ID type
pub type AttendanceId = RecordId;

/// Attendance row, unique per (employee, date).
///
/// `employee_name` and `department` are snapshots taken at mark time
/// so HR list filters need no joins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<AttendanceId>,
    #[serde(with = "serde_helpers::record_id")]
    pub employee: RecordId,
    pub employee_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    #[serde(default)]
    pub created_at: i64,
}

impl AttendanceRecord {
    /// Wire representation
    pub fn to_view(&self) -> shared::models::AttendanceView {
        shared::models::AttendanceView {
            id: self
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            employee: self.employee.to_string(),
            employee_name: self.employee_name.clone(),
            department: self.department.clone(),
            date: self.date,
            status: self.status,
            check_in: self.check_in,
            check_out: self.check_out,
            created_at: self.created_at,
        }
    }
}
