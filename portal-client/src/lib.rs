//! Typed HTTP client for the portal server
//!
//! # Example
//!
//! ```no_run
//! use portal_client::{ClientConfig, PortalClient};
//!
//! # async fn run() -> Result<(), portal_client::ClientError> {
//! let config = ClientConfig::new("http://localhost:8000");
//! let mut client = PortalClient::new(&config)?;
//! client.login("hr@example.com", "password").await?;
//! let employees = client.employees(None, None).await?;
//! println!("{} employees", employees.len());
//! # Ok(())
//! # }
//! ```

mod api;
mod config;
mod error;
mod http;

pub use api::PortalClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult, ErrorBody, error_for_status};
pub use http::HttpClient;

// Re-export the wire types callers hold
pub use shared::client::{ChangePasswordRequest, LoginResponse, UserInfo};
pub use shared::models::{
    AttendanceUpdateRequest, AttendanceView, EmployeeCreateRequest, EmployeeUpdateRequest,
    EmployeeView, LeaveStatus, LeaveSubmitRequest, LeaveView, TaskCreateRequest, TaskPriority,
    TaskStatus, TaskView,
};
