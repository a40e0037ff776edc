//! Attendance wire types

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Attendance status. `OnLeave` rows are written by leave approval,
/// never by the employee.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AttendanceStatus {
    Present,
    Absent,
    #[serde(rename = "Leave")]
    OnLeave,
}

/// Attendance record as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceView {
    pub id: String,
    /// Employee record id ("employee:...")
    pub employee: String,
    /// Employee name snapshot at mark time
    pub employee_name: String,
    pub department: String,
    pub date: NaiveDate,
    pub status: AttendanceStatus,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
    /// Unix timestamp millis
    pub created_at: i64,
}

/// HR correction payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttendanceUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<AttendanceStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_in: Option<NaiveTime>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub check_out: Option<NaiveTime>,
}
