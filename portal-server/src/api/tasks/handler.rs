//! Task API Handlers

use axum::{
    Json,
    extract::{Extension, Path, State},
    http::StatusCode,
};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::TaskCreate;
use crate::db::repository::{EmployeeRepository, TaskRepository, parse_id};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, parse_required_date, validate_required_text,
};
use crate::utils::{AppError, AppResult, time};
use shared::models::{TaskCreateRequest, TaskStatusUpdateRequest, TaskView};

/// GET /api/tasks/ - 自己派发的任务 (HR)
pub async fn list(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<TaskView>>> {
    let hr = parse_id("hr", &current_user.id)?;
    let tasks = TaskRepository::new(&state.db_service())
        .find_by_hr(&hr)
        .await?;
    Ok(Json(tasks.iter().map(|t| t.to_view()).collect()))
}

/// POST /api/tasks/ - 派发任务 (HR)
pub async fn create(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<TaskCreateRequest>,
) -> AppResult<(StatusCode, Json<TaskView>)> {
    let title = payload
        .title
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::validation("title is required"))?;
    validate_required_text(title, "title", MAX_NAME_LEN)?;
    if payload.description.len() > MAX_NOTE_LEN {
        return Err(AppError::validation("description is too long"));
    }

    let due_date = parse_required_date(payload.due_date.as_deref(), "due_date")?;
    if due_date < time::today() {
        return Err(AppError::validation("due_date cannot be in the past"));
    }

    let db = state.db_service();
    let employee_id = parse_id("employee", &payload.employee)?;
    EmployeeRepository::new(&db)
        .find_by_id(&employee_id)
        .await?
        .ok_or_else(|| {
            AppError::not_found(format!("Employee {} not found", payload.employee))
        })?;

    let hr = parse_id("hr", &current_user.id)?;
    let task = TaskRepository::new(&db)
        .create(TaskCreate {
            employee: employee_id,
            hr,
            title: title.to_string(),
            description: payload.description,
            due_date,
            priority: payload.priority,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(task.to_view())))
}

/// GET /api/tasks/my-tasks/ - 自己名下的任务 (员工)
pub async fn my_tasks(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<TaskView>>> {
    let employee = parse_id("employee", &current_user.id)?;
    let tasks = TaskRepository::new(&state.db_service())
        .find_by_employee(&employee)
        .await?;
    Ok(Json(tasks.iter().map(|t| t.to_view()).collect()))
}

/// PATCH /api/tasks/{id}/ - 更新任务状态 (员工)
///
/// 任务归属来自存储记录与令牌身份的比对；修改他人任务返回 403。
pub async fn update_status(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(payload): Json<TaskStatusUpdateRequest>,
) -> AppResult<Json<TaskView>> {
    let db = state.db_service();
    let task_id = parse_id("task", &id)?;
    let repo = TaskRepository::new(&db);

    let task = repo
        .find_by_id(&task_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Task {} not found", id)))?;

    let me = parse_id("employee", &current_user.id)?;
    if task.employee != me {
        return Err(AppError::forbidden("You may only modify your own tasks"));
    }

    let updated = repo.update_status(&task_id, payload.status).await?;
    Ok(Json(updated.to_view()))
}
