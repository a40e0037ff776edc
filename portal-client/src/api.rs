//! Typed portal API client
//!
//! One method per server route. Role enforcement happens server-side;
//! calling an HR route with an employee token simply returns
//! [`ClientError::Forbidden`].

use crate::{ClientConfig, ClientError, ClientResult, HttpClient};
use shared::client::{ChangePasswordRequest, LoginRequest, LoginResponse, UserInfo};
use shared::models::{
    AttendanceUpdateRequest, AttendanceView, EmployeeCreateRequest, EmployeeUpdateRequest,
    EmployeeView, LeaveActionRequest, LeaveSubmitRequest, LeaveView, TaskCreateRequest,
    TaskStatus, TaskStatusUpdateRequest, TaskView,
};
use shared::stats::{
    AttendancePercentage, CountsResponse, DepartmentCount, EmployeeAttendanceStats,
    HrAttendanceStats, LeaveStatusSummary, LeaveSummary,
};

/// Build a query string from the pairs that are present
fn with_query(path: &str, pairs: &[(&str, Option<&str>)]) -> String {
    let mut out = String::from(path);
    let mut first = true;
    for (key, value) in pairs {
        let Some(value) = value else { continue };
        out.push(if first { '?' } else { '&' });
        out.push_str(key);
        out.push('=');
        out.push_str(value);
        first = false;
    }
    out
}

/// High-level portal client
#[derive(Debug, Clone)]
pub struct PortalClient {
    http: HttpClient,
    retry_delay: std::time::Duration,
}

impl PortalClient {
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(config)?,
            retry_delay: std::time::Duration::from_millis(config.retry_delay_ms),
        })
    }

    /// Access to the underlying transport
    pub fn http(&self) -> &HttpClient {
        &self.http
    }

    // ========== Auth ==========

    /// Login and keep the returned token for subsequent calls
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginResponse> {
        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.http.post("/api/auth/login/", &request).await?;
        self.http.set_token(response.token.clone());
        Ok(response)
    }

    /// Forget the stored token
    pub fn logout(&mut self) {
        self.http.clear_token();
    }

    /// Current account information
    pub async fn me(&self) -> ClientResult<UserInfo> {
        self.http.get("/api/auth/me/").await
    }

    // ========== Employees (HR) ==========

    pub async fn create_employee(
        &self,
        request: &EmployeeCreateRequest,
    ) -> ClientResult<EmployeeView> {
        self.http.post("/api/employee/create/", request).await
    }

    pub async fn employee(&self, id: &str) -> ClientResult<EmployeeView> {
        self.http.get(&format!("/api/employee/{id}/")).await
    }

    pub async fn update_employee(
        &self,
        id: &str,
        request: &EmployeeUpdateRequest,
    ) -> ClientResult<EmployeeView> {
        self.http
            .put(&format!("/api/employee/update/{id}/"), request)
            .await
    }

    pub async fn delete_employee(&self, id: &str) -> ClientResult<EmployeeView> {
        self.http.delete(&format!("/api/employee/delete/{id}/")).await
    }

    pub async fn employees(
        &self,
        department: Option<&str>,
        search: Option<&str>,
    ) -> ClientResult<Vec<EmployeeView>> {
        let path = with_query(
            "/api/employees/",
            &[("department", department), ("search", search)],
        );
        self.http.get(&path).await
    }

    pub async fn department_counts(&self) -> ClientResult<Vec<DepartmentCount>> {
        self.http.get("/api/employees/department-count/").await
    }

    // ========== Employee self-service ==========

    pub async fn change_password(
        &self,
        request: &ChangePasswordRequest,
    ) -> ClientResult<serde_json::Value> {
        self.http
            .post("/api/employees/change-password/", request)
            .await
    }

    // ========== Leave ==========

    pub async fn submit_leave(&self, request: &LeaveSubmitRequest) -> ClientResult<LeaveView> {
        self.http.post("/api/leave/request/", request).await
    }

    /// Own leave history. Retried once after a short delay on transport
    /// failure; the read is idempotent.
    pub async fn my_leaves(&self) -> ClientResult<Vec<LeaveView>> {
        match self.http.get("/api/leave/mine/").await {
            Err(ClientError::Http(e)) => {
                tracing::warn!(error = %e, "leave history request failed, retrying once");
                tokio::time::sleep(self.retry_delay).await;
                self.http.get("/api/leave/mine/").await
            }
            other => other,
        }
    }

    pub async fn leave_summary(&self) -> ClientResult<LeaveSummary> {
        self.http.get("/api/leave/summary/").await
    }

    pub async fn pending_leaves(
        &self,
        q: Option<&str>,
        department: Option<&str>,
        date: Option<&str>,
    ) -> ClientResult<Vec<LeaveView>> {
        let path = with_query(
            "/api/leave/pending/",
            &[("q", q), ("department", department), ("date", date)],
        );
        self.http.get(&path).await
    }

    /// Approve or reject a pending request. `action` is "approve" or
    /// "reject".
    pub async fn act_on_leave(&self, id: &str, action: &str) -> ClientResult<LeaveView> {
        self.http
            .post(
                &format!("/api/leave/action/{id}/"),
                &LeaveActionRequest {
                    action: action.to_string(),
                },
            )
            .await
    }

    pub async fn leave_status_summary(&self) -> ClientResult<LeaveStatusSummary> {
        self.http.get("/api/leaves/status-summary/").await
    }

    // ========== Attendance ==========

    pub async fn mark_attendance(&self) -> ClientResult<AttendanceView> {
        self.http.post_empty("/api/attendance/mark/").await
    }

    pub async fn checkout(&self) -> ClientResult<AttendanceView> {
        self.http.post_empty("/api/attendance/checkout/").await
    }

    pub async fn attendance(
        &self,
        date: Option<&str>,
        employee_id: Option<&str>,
        department: Option<&str>,
        period: Option<&str>,
    ) -> ClientResult<Vec<AttendanceView>> {
        let path = with_query(
            "/api/attendance/",
            &[
                ("date", date),
                ("employee_id", employee_id),
                ("department", department),
                ("period", period),
            ],
        );
        self.http.get(&path).await
    }

    pub async fn update_attendance(
        &self,
        id: &str,
        request: &AttendanceUpdateRequest,
    ) -> ClientResult<AttendanceView> {
        self.http
            .put(&format!("/api/attendance/{id}/update/"), request)
            .await
    }

    pub async fn my_attendance_stats(&self) -> ClientResult<EmployeeAttendanceStats> {
        self.http.get("/api/attendance/stats/employee/").await
    }

    pub async fn hr_attendance_stats(&self) -> ClientResult<HrAttendanceStats> {
        self.http.get("/api/attendance/stats/hr/").await
    }

    pub async fn attendance_percentage(
        &self,
        employee_id: &str,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> ClientResult<AttendancePercentage> {
        let path = with_query(
            &format!("/api/attendance-percentage/{employee_id}/"),
            &[("start_date", start_date), ("end_date", end_date)],
        );
        self.http.get(&path).await
    }

    // ========== Tasks ==========

    pub async fn create_task(&self, request: &TaskCreateRequest) -> ClientResult<TaskView> {
        self.http.post("/api/tasks/", request).await
    }

    pub async fn assigned_tasks(&self) -> ClientResult<Vec<TaskView>> {
        self.http.get("/api/tasks/").await
    }

    pub async fn my_tasks(&self) -> ClientResult<Vec<TaskView>> {
        self.http.get("/api/tasks/my-tasks/").await
    }

    pub async fn update_task_status(
        &self,
        id: &str,
        status: TaskStatus,
    ) -> ClientResult<TaskView> {
        self.http
            .patch(
                &format!("/api/tasks/{id}/"),
                &TaskStatusUpdateRequest { status },
            )
            .await
    }

    // ========== Dashboard ==========

    pub async fn counts(&self) -> ClientResult<CountsResponse> {
        self.http.get("/api/counts/").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_builder_skips_missing_pairs() {
        assert_eq!(with_query("/api/employees/", &[("department", None)]), "/api/employees/");
        assert_eq!(
            with_query(
                "/api/leave/pending/",
                &[("q", Some("john")), ("department", None), ("date", Some("2099-01-10"))]
            ),
            "/api/leave/pending/?q=john&date=2099-01-10"
        );
    }
}
