//! Attendance API Handlers

use axum::{
    Json,
    extract::{Extension, Path, Query, State},
    http::StatusCode,
};
use chrono::Datelike;
use serde::Deserialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::{
    AttendanceFilter, AttendanceRepository, EmployeeRepository, LeaveRepository, parse_id,
};
use crate::utils::validation::parse_required_date;
use crate::utils::{AppError, AppResult, time};
use shared::models::{AttendanceUpdateRequest, AttendanceView};
use shared::stats::{
    AttendancePercentage, DepartmentAttendance, EmployeeAttendanceStats, HrAttendanceStats,
    LowAttendanceEntry,
};

/// Parse an optional `YYYY-MM-DD` query param; blank counts as absent.
fn parse_opt_date(
    raw: &Option<String>,
    field: &str,
) -> AppResult<Option<chrono::NaiveDate>> {
    raw.as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|s| parse_required_date(Some(s), field))
        .transpose()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn percent(present: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        round2(present as f64 / total as f64 * 100.0)
    }
}

/// POST /api/attendance/mark/ - 打卡 (员工)
///
/// 每天一条记录；当天已有批准的请假时拒绝打卡。
pub async fn mark(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<(StatusCode, Json<AttendanceView>)> {
    let db = state.db_service();
    let employee_id = parse_id("employee", &current_user.id)?;
    let today = time::today();

    if LeaveRepository::new(&db)
        .approved_covering(&employee_id, today)
        .await?
    {
        return Err(AppError::conflict(
            "Leave approved for today; cannot mark attendance.",
        ));
    }

    let employee = EmployeeRepository::new(&db)
        .find_by_id(&employee_id)
        .await?
        .ok_or_else(|| AppError::not_found("Account no longer exists"))?;

    let record = AttendanceRepository::new(&db)
        .mark(
            &employee_id,
            &employee.name,
            &employee.department,
            today,
            time::now_time(),
        )
        .await?;

    Ok((StatusCode::CREATED, Json(record.to_view())))
}

/// POST /api/attendance/checkout/ - 签退 (员工)
pub async fn checkout(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<AttendanceView>> {
    let employee_id = parse_id("employee", &current_user.id)?;
    let record = AttendanceRepository::new(&state.db_service())
        .checkout(&employee_id, time::today(), time::now_time())
        .await?;
    Ok(Json(record.to_view()))
}

/// Query params for the HR attendance list
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    /// Exact day (YYYY-MM-DD)
    pub date: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub employee_id: Option<String>,
    /// Substring match on employee name
    pub q: Option<String>,
    pub department: Option<String>,
    /// "weekly" | "monthly" - computed range ending today
    pub period: Option<String>,
}

/// GET /api/attendance/ - 考勤记录查询 (HR)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<AttendanceView>>> {
    let date = parse_opt_date(&query.date, "date")?;
    let mut start = parse_opt_date(&query.start_date, "start_date")?;
    let mut end = parse_opt_date(&query.end_date, "end_date")?;

    // A named period fills in the range unless one was given explicitly
    if start.is_none() && end.is_none() {
        let today = time::today();
        match query.period.as_deref() {
            Some("weekly") => {
                start = today.checked_sub_days(chrono::Days::new(6));
                end = Some(today);
            }
            Some("monthly") => {
                start = today.with_day(1);
                end = Some(today);
            }
            Some(other) if !other.is_empty() => {
                return Err(AppError::validation(format!(
                    "Unknown period '{other}'; expected 'weekly' or 'monthly'"
                )));
            }
            _ => {}
        }
    }

    let employee = query
        .employee_id
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .map(|raw| parse_id("employee", raw))
        .transpose()?;

    let records = AttendanceRepository::new(&state.db_service())
        .list(AttendanceFilter {
            date,
            start,
            end,
            employee,
            name_query: query.q,
            department: query.department,
        })
        .await?;

    Ok(Json(records.iter().map(|r| r.to_view()).collect()))
}

/// PUT /api/attendance/{id}/update/ - 修正考勤记录 (HR)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AttendanceUpdateRequest>,
) -> AppResult<Json<AttendanceView>> {
    if let (Some(check_in), Some(check_out)) = (payload.check_in, payload.check_out)
        && check_out < check_in
    {
        return Err(AppError::validation("check_out cannot be before check_in"));
    }

    let record_id = parse_id("attendance", &id)?;
    let record = AttendanceRepository::new(&state.db_service())
        .update(&record_id, &payload)
        .await?;
    Ok(Json(record.to_view()))
}

/// GET /api/attendance/stats/employee/ - 自己的考勤统计 (员工)
pub async fn employee_stats(
    State(state): State<ServerState>,
    Extension(current_user): Extension<CurrentUser>,
) -> AppResult<Json<EmployeeAttendanceStats>> {
    let db = state.db_service();
    let employee_id = parse_id("employee", &current_user.id)?;

    let (total, present) = AttendanceRepository::new(&db)
        .counts(&employee_id, None, None)
        .await?;
    let leaves = LeaveRepository::new(&db).summary_for(&employee_id).await?;

    Ok(Json(EmployeeAttendanceStats {
        total_leaves: leaves.approved,
        pending_leaves: leaves.pending,
        attendance_percent: percent(present, total),
    }))
}

/// GET /api/attendance/stats/hr/ - 全局考勤分析 (HR)
///
/// 各部门出勤率加出勤率最低的 5 名员工。
pub async fn hr_stats(State(state): State<ServerState>) -> AppResult<Json<HrAttendanceStats>> {
    let db = state.db_service();
    let attendance = AttendanceRepository::new(&db);

    let departments = attendance
        .department_counts()
        .await?
        .into_iter()
        .map(|(department, total, present)| DepartmentAttendance {
            department,
            attendance_percent: percent(present, total),
        })
        .collect();

    let employees = EmployeeRepository::new(&db).find_all(Default::default()).await?;
    let mut lowest: Vec<LowAttendanceEntry> = Vec::new();
    for employee in &employees {
        let Some(id) = employee.id.as_ref() else {
            continue;
        };
        let (total, present) = attendance.counts(id, None, None).await?;
        if total == 0 {
            continue;
        }
        lowest.push(LowAttendanceEntry {
            employee: employee.name.clone(),
            present,
            total,
        });
    }
    lowest.sort_by(|a, b| {
        let pa = a.present as f64 / a.total as f64;
        let pb = b.present as f64 / b.total as f64;
        pa.partial_cmp(&pb).unwrap_or(std::cmp::Ordering::Equal)
    });
    lowest.truncate(5);

    Ok(Json(HrAttendanceStats {
        departments,
        lowest_attendance: lowest,
    }))
}

/// Optional date range for the single-employee percentage
#[derive(Debug, Deserialize)]
pub struct PercentageQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// GET /api/attendance-percentage/{employee_id}/ - 单人出勤率 (HR)
///
/// 可选 start_date / end_date 只统计范围内的考勤。
pub async fn percentage(
    State(state): State<ServerState>,
    Path(employee_id): Path<String>,
    Query(query): Query<PercentageQuery>,
) -> AppResult<Json<AttendancePercentage>> {
    let start = parse_opt_date(&query.start_date, "start_date")?;
    let end = parse_opt_date(&query.end_date, "end_date")?;
    if let (Some(start), Some(end)) = (start, end)
        && start > end
    {
        return Err(AppError::validation("start_date cannot be after end_date."));
    }

    let db = state.db_service();
    let record_id = parse_id("employee", &employee_id)?;
    let employee = EmployeeRepository::new(&db)
        .find_by_id(&record_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Employee {} not found", employee_id)))?;

    let (total, present) = AttendanceRepository::new(&db)
        .counts(&record_id, start, end)
        .await?;

    Ok(Json(AttendancePercentage {
        employee_id: record_id.to_string(),
        employee_name: employee.name,
        total_days: total,
        present_days: present,
        attendance_percentage: percent(present, total),
    }))
}
