//! Stats API Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::repository::EmployeeRepository;
use crate::utils::AppResult;
use shared::stats::CountsResponse;

/// GET /api/counts/ - 员工与部门总数 (HR)
pub async fn counts(State(state): State<ServerState>) -> AppResult<Json<CountsResponse>> {
    let repo = EmployeeRepository::new(&state.db_service());
    let employees_count = repo.count().await?;
    let departments_count = repo.department_counts().await?.len() as u64;

    Ok(Json(CountsResponse {
        employees_count,
        departments_count,
    }))
}
