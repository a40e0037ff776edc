//! Employee API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{EmployeeFilter, EmployeeRepository, parse_id};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_email,
    validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};
use shared::client::ChangePasswordRequest;
use shared::models::{EmployeeCreateRequest, EmployeeUpdateRequest, EmployeeView};
use shared::stats::DepartmentCount;

/// Query params for listing employees
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub department: Option<String>,
    pub search: Option<String>,
    /// Restrict to employees created by this HR account
    pub hr_id: Option<String>,
}

fn validate_create(req: &EmployeeCreateRequest) -> AppResult<()> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;
    validate_required_text(&req.department, "department", MAX_NAME_LEN)?;
    validate_required_text(&req.designation, "designation", MAX_NAME_LEN)?;
    validate_optional_text(&req.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&req.address, "address", MAX_NOTE_LEN)?;
    if req.salary.is_sign_negative() {
        return Err(AppError::validation("salary must be non-negative"));
    }
    Ok(())
}

/// GET /api/employees/ - 员工目录 (HR)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<EmployeeView>>> {
    let repo = EmployeeRepository::new(&state.db_service());
    let hr = query
        .hr_id
        .as_deref()
        .map(|raw| parse_id("hr", raw))
        .transpose()?;

    let employees = repo
        .find_all(EmployeeFilter {
            department: query.department,
            search: query.search,
            hr,
        })
        .await?;

    Ok(Json(employees.iter().map(|e| e.to_view()).collect()))
}

/// GET /api/employee/{id}/ - 单个员工 (HR)
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeView>> {
    let record_id = parse_id("employee", &id)?;
    let employee = EmployeeRepository::new(&state.db_service())
        .find_by_id(&record_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", id)))?;
    Ok(Json(employee.to_view()))
}

/// POST /api/employee/create/ - 创建员工账户 (HR)
///
/// 创建成功后尽力发送欢迎邮件；邮件失败不影响创建结果。
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<EmployeeCreateRequest>,
) -> AppResult<(StatusCode, Json<EmployeeView>)> {
    validate_create(&payload)?;

    let hr = parse_id("hr", &current_user.id)?;
    let employee = EmployeeRepository::new(&state.db_service())
        .create(&payload, hr)
        .await?;

    if let Some(mailer) = &state.mailer {
        mailer
            .notify_welcome(&employee.name, &employee.email, &payload.password)
            .await;
    }

    Ok((StatusCode::CREATED, Json(employee.to_view())))
}

/// PUT /api/employee/update/{id}/ - 更新员工档案 (HR)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdateRequest>,
) -> AppResult<Json<EmployeeView>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.email {
        validate_email(email)?;
    }
    if let Some(department) = &payload.department {
        validate_required_text(department, "department", MAX_NAME_LEN)?;
    }
    if let Some(designation) = &payload.designation {
        validate_required_text(designation, "designation", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_NOTE_LEN)?;
    if payload.salary.is_some_and(|s| s.is_sign_negative()) {
        return Err(AppError::validation("salary must be non-negative"));
    }

    let record_id = parse_id("employee", &id)?;
    let employee = EmployeeRepository::new(&state.db_service())
        .update(&record_id, &payload)
        .await?;
    Ok(Json(employee.to_view()))
}

/// DELETE /api/employee/delete/{id}/ - 删除员工账户 (HR)
pub async fn remove(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<EmployeeView>> {
    let record_id = parse_id("employee", &id)?;
    let employee = EmployeeRepository::new(&state.db_service())
        .delete(&record_id)
        .await?;
    Ok(Json(employee.to_view()))
}

/// GET /api/employees/department-count/ - 各部门人数 (HR)
pub async fn department_count(
    State(state): State<ServerState>,
) -> AppResult<Json<Vec<DepartmentCount>>> {
    let counts = EmployeeRepository::new(&state.db_service())
        .department_counts()
        .await?;
    Ok(Json(counts))
}

/// POST /api/employees/change-password/ - 员工改密
///
/// 身份来自令牌；请求体只携带口令，不携带任何用户 ID。
pub async fn change_password(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> AppResult<Json<serde_json::Value>> {
    validate_required_text(&payload.old_password, "old_password", MAX_PASSWORD_LEN)?;
    validate_required_text(&payload.new_password, "new_password", MAX_PASSWORD_LEN)?;
    if payload.new_password != payload.confirm_password {
        return Err(AppError::validation(
            "new_password and confirm_password do not match",
        ));
    }
    if payload.new_password == payload.old_password {
        return Err(AppError::validation(
            "New password must differ from the old password",
        ));
    }

    let record_id = parse_id("employee", &current_user.id)?;
    let repo = EmployeeRepository::new(&state.db_service());
    let employee = repo
        .find_by_id(&record_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

    if !employee.verify_password(&payload.old_password).unwrap_or(false) {
        return Err(AppError::validation("Old password is incorrect"));
    }

    repo.change_password(&record_id, &payload.new_password)
        .await?;
    Ok(Json(serde_json::json!({ "success": true })))
}
