//! Auth API Handlers

use std::time::{Duration, Instant};

use axum::{
    Json,
    extract::{Extension, State},
};

use crate::auth::{CurrentUser, ROLE_EMPLOYEE, ROLE_HR};
use crate::core::ServerState;
use crate::db::repository::{EmployeeRepository, HrRepository, parse_id};
use crate::security_log;
use crate::utils::{AppError, AppResult};
use shared::client::{LoginRequest, LoginResponse, UserInfo};

/// Minimum wall-clock time for a login attempt. Success and every
/// failure mode take the same time, so response latency leaks nothing
/// about whether the email exists.
const MIN_LOGIN_DURATION: Duration = Duration::from_millis(500);

/// POST /api/auth/login/ - 登录 (HR 或员工)
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let started = Instant::now();
    let result = authenticate(&state, &payload).await;

    let elapsed = started.elapsed();
    if elapsed < MIN_LOGIN_DURATION {
        tokio::time::sleep(MIN_LOGIN_DURATION - elapsed).await;
    }

    let response = result?;
    Ok(Json(response))
}

async fn authenticate(state: &ServerState, payload: &LoginRequest) -> AppResult<LoginResponse> {
    let email = payload.email.trim().to_lowercase();
    if email.is_empty() || payload.password.is_empty() {
        return Err(AppError::invalid_credentials());
    }

    let db = state.db_service();
    let jwt = state.get_jwt_service();

    // HR accounts take precedence; the two tables never share an email in
    // practice.
    if let Some(hr) = HrRepository::new(&db).find_by_email(&email).await? {
        if hr.verify_password(&payload.password).unwrap_or(false) {
            let id = hr
                .id
                .as_ref()
                .map(|id| id.to_string())
                .ok_or_else(|| AppError::internal("HR row missing id"))?;
            let token = jwt
                .generate_token(&id, &hr.name, &hr.email, ROLE_HR)
                .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
            return Ok(LoginResponse {
                token,
                role: ROLE_HR.to_string(),
                user: UserInfo {
                    id,
                    name: hr.name,
                    email: hr.email,
                    role: ROLE_HR.to_string(),
                    department: hr.department,
                    designation: None,
                },
            });
        }
        security_log!("WARN", "login_failed", email = email.clone());
        return Err(AppError::invalid_credentials());
    }

    if let Some(employee) = EmployeeRepository::new(&db).find_by_email(&email).await? {
        if employee.verify_password(&payload.password).unwrap_or(false) {
            let id = employee
                .id
                .as_ref()
                .map(|id| id.to_string())
                .ok_or_else(|| AppError::internal("Employee row missing id"))?;
            let token = jwt
                .generate_token(&id, &employee.name, &employee.email, ROLE_EMPLOYEE)
                .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;
            return Ok(LoginResponse {
                token,
                role: ROLE_EMPLOYEE.to_string(),
                user: UserInfo {
                    id,
                    name: employee.name,
                    email: employee.email,
                    role: ROLE_EMPLOYEE.to_string(),
                    department: employee.department,
                    designation: Some(employee.designation),
                },
            });
        }
    }

    security_log!("WARN", "login_failed", email = email.clone());
    Err(AppError::invalid_credentials())
}

/// GET /api/auth/me/ - 当前账户信息
pub async fn me(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<UserInfo>> {
    let db = state.db_service();

    if current_user.is_hr() {
        let id = parse_id("hr", &current_user.id)?;
        let hr = HrRepository::new(&db)
            .find_by_id(&id)
            .await?
            .ok_or_else(|| AppError::not_found("Account no longer exists"))?;
        return Ok(Json(UserInfo {
            id: current_user.id,
            name: hr.name,
            email: hr.email,
            role: ROLE_HR.to_string(),
            department: hr.department,
            designation: None,
        }));
    }

    let id = parse_id("employee", &current_user.id)?;
    let employee = EmployeeRepository::new(&db)
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;
    Ok(Json(UserInfo {
        id: current_user.id,
        name: employee.name,
        email: employee.email,
        role: ROLE_EMPLOYEE.to_string(),
        department: employee.department,
        designation: Some(employee.designation),
    }))
}
