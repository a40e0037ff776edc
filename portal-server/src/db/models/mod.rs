//! Database models matching the SurrealDB tables

pub mod attendance;
pub mod employee;
pub mod hr;
pub mod leave;
pub mod password;
pub mod serde_helpers;
pub mod task;

pub use attendance::{AttendanceId, AttendanceRecord};
pub use employee::{Employee, EmployeeId};
pub use hr::{Hr, HrCreate, HrId};
pub use leave::{LeaveCreate, LeaveId, LeaveRequest};
pub use task::{Task, TaskCreate, TaskId};
