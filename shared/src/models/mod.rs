//! Wire models
//!
//! Request payloads and response views for the portal API. Status and
//! priority enums live here so the server's rows and the client agree
//! on the serialized forms.

pub mod attendance;
pub mod employee;
pub mod leave;
pub mod task;

pub use attendance::{AttendanceStatus, AttendanceUpdateRequest, AttendanceView};
pub use employee::{EmployeeCreateRequest, EmployeeUpdateRequest, EmployeeView};
pub use leave::{LeaveActionRequest, LeaveStatus, LeaveSubmitRequest, LeaveView};
pub use task::{TaskCreateRequest, TaskPriority, TaskStatus, TaskStatusUpdateRequest, TaskView};
