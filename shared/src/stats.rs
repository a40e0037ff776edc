//! Dashboard and analytics response types

use serde::{Deserialize, Serialize};

/// GET /api/counts/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountsResponse {
    pub employees_count: u64,
    pub departments_count: u64,
}

/// GET /api/employees/department-count/ (one entry per department)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentCount {
    pub department: String,
    pub count: u64,
}

/// GET /api/leaves/status-summary/
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LeaveStatusSummary {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

/// GET /api/leave/summary/ (per employee)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveSummary {
    pub total_taken: u64,
    pub pending: u64,
}

/// GET /api/attendance-percentage/{employee_id}/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendancePercentage {
    pub employee_id: String,
    pub employee_name: String,
    pub total_days: u64,
    pub present_days: u64,
    pub attendance_percentage: f64,
}

/// GET /api/attendance/stats/employee/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeAttendanceStats {
    pub total_leaves: u64,
    pub pending_leaves: u64,
    pub attendance_percent: f64,
}

/// Per-department attendance percentage (HR analytics)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DepartmentAttendance {
    pub department: String,
    pub attendance_percent: f64,
}

/// Lowest-attendance entry (HR analytics)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LowAttendanceEntry {
    pub employee: String,
    pub present: u64,
    pub total: u64,
}

/// GET /api/attendance/stats/hr/
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrAttendanceStats {
    pub departments: Vec<DepartmentAttendance>,
    pub lowest_attendance: Vec<LowAttendanceEntry>,
}
