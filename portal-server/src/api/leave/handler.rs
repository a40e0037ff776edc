//! Leave API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::LeaveCreate;
use crate::db::repository::{
    AttendanceRepository, EmployeeRepository, LeaveRepository, PendingLeaveFilter, parse_id,
};
use crate::utils::validation::{MAX_NOTE_LEN, parse_required_date, validate_leave_dates,
    validate_required_text};
use crate::utils::{AppError, AppResult, time};
use shared::models::{LeaveActionRequest, LeaveStatus, LeaveSubmitRequest, LeaveView};
use shared::stats::{LeaveStatusSummary, LeaveSummary};

/// POST /api/leave/request/ - 提交请假 (员工)
pub async fn submit(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
    Json(payload): Json<LeaveSubmitRequest>,
) -> AppResult<(StatusCode, Json<LeaveView>)> {
    let (start_date, end_date) = validate_leave_dates(
        payload.start_date.as_deref(),
        payload.end_date.as_deref(),
        time::today(),
    )?;
    validate_required_text(&payload.reason, "reason", MAX_NOTE_LEN)?;

    let db = state.db_service();
    let employee_id = parse_id("employee", &current_user.id)?;
    let employee = EmployeeRepository::new(&db)
        .find_by_id(&employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

    let leave = LeaveRepository::new(&db)
        .create(LeaveCreate {
            employee: employee_id,
            employee_name: employee.name,
            department: employee.department,
            start_date,
            end_date,
            reason: payload.reason,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(leave.to_view())))
}

/// GET /api/leave/mine/ - 自己的请假记录 (员工)
pub async fn mine(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<Vec<LeaveView>>> {
    let employee_id = parse_id("employee", &current_user.id)?;
    let leaves = LeaveRepository::new(&state.db_service())
        .find_mine(&employee_id)
        .await?;
    Ok(Json(leaves.iter().map(|l| l.to_view()).collect()))
}

/// GET /api/leave/summary/ - 自己的请假汇总 (员工)
pub async fn summary(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<LeaveSummary>> {
    let employee_id = parse_id("employee", &current_user.id)?;
    let counts = LeaveRepository::new(&state.db_service())
        .summary_for(&employee_id)
        .await?;
    Ok(Json(LeaveSummary {
        total_taken: counts.approved,
        pending: counts.pending,
    }))
}

/// Query params for the pending queue
#[derive(Debug, Deserialize)]
pub struct PendingQuery {
    /// Substring match on employee name
    pub q: Option<String>,
    pub department: Option<String>,
    /// Requests covering this date (YYYY-MM-DD)
    pub date: Option<String>,
}

/// GET /api/leave/pending/ - 待审批队列 (HR)
pub async fn pending(
    State(state): State<ServerState>,
    Query(query): Query<PendingQuery>,
) -> AppResult<Json<Vec<LeaveView>>> {
    let date = query
        .date
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_required_date(Some(s), "date"))
        .transpose()?;

    let leaves = LeaveRepository::new(&state.db_service())
        .find_pending(PendingLeaveFilter {
            q: query.q,
            department: query.department,
            date,
        })
        .await?;
    Ok(Json(leaves.iter().map(|l| l.to_view()).collect()))
}

/// POST /api/leave/action/{id}/ - 审批请假 (HR)
///
/// `action` 只接受 "approve" 或 "reject"。只有 Pending 状态可以审批；
/// 已决议的请求返回 409。批准后为请假区间逐日写入 Leave 考勤记录。
pub async fn act(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LeaveActionRequest>,
) -> AppResult<Json<LeaveView>> {
    let status = match payload.action.as_str() {
        "approve" => LeaveStatus::Approved,
        "reject" => LeaveStatus::Rejected,
        other => {
            return Err(AppError::validation(format!(
                "Unknown action '{other}'; expected 'approve' or 'reject'"
            )));
        }
    };

    let db = state.db_service();
    let leave_id = parse_id("leave", &id)?;
    let leave = LeaveRepository::new(&db).act(&leave_id, status).await?;

    if leave.status == LeaveStatus::Approved {
        let attendance = AttendanceRepository::new(&db);
        let mut day = leave.start_date;
        while day <= leave.end_date {
            attendance
                .upsert_leave_day(&leave.employee, &leave.employee_name, &leave.department, day)
                .await?;
            day = day
                .succ_opt()
                .ok_or_else(|| AppError::internal("Date overflow while expanding leave range"))?;
        }
    }

    Ok(Json(leave.to_view()))
}

/// GET /api/leaves/status-summary/ - 全局请假状态统计 (HR)
pub async fn status_summary(
    State(state): State<ServerState>,
) -> AppResult<Json<LeaveStatusSummary>> {
    let summary = LeaveRepository::new(&state.db_service())
        .status_summary()
        .await?;
    Ok(Json(summary))
}
