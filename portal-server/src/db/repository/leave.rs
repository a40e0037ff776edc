//! Leave Request Repository
//!
//! A leave request is a tiny state machine: Pending is the only state
//! that can change, and it changes exactly once. The transition runs as
//! a conditional UPDATE so two racing approvals cannot both win.

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::DbService;
use crate::db::models::{LeaveCreate, LeaveId, LeaveRequest};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::models::LeaveStatus;
use shared::stats::LeaveStatusSummary;
use surrealdb::RecordId;

/// Filters for the HR pending-leave queue
#[derive(Debug, Default, Clone)]
pub struct PendingLeaveFilter {
    /// Case-insensitive substring match on employee name
    pub q: Option<String>,
    pub department: Option<String>,
    /// Requests whose range covers this date
    pub date: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct LeaveRepository {
    base: BaseRepository,
}

impl LeaveRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Whether an approved request for the employee overlaps [start, end].
    /// `exclude` skips one record so a request never collides with itself.
    async fn approved_overlapping(
        &self,
        employee: &RecordId,
        start: NaiveDate,
        end: NaiveDate,
        exclude: Option<&LeaveId>,
    ) -> RepoResult<bool> {
        let mut sql = String::from(
            "SELECT count() AS count FROM leave \
             WHERE employee = $employee AND status = 'Approved' \
             AND start_date <= $end_date AND end_date >= $start_date",
        );
        if exclude.is_some() {
            sql.push_str(" AND id != $exclude");
        }
        sql.push_str(" GROUP ALL");

        let mut query = self
            .base
            .db
            .query(sql)
            .bind(("employee", employee.to_string()))
            .bind(("start_date", start))
            .bind(("end_date", end));
        if let Some(id) = exclude {
            query = query.bind(("exclude", id.clone()));
        }
        let row: Option<super::CountRow> = query.await?.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0) > 0)
    }

    /// Submit a new request. Rejected when an approved leave for the same
    /// employee already overlaps the requested range.
    pub async fn create(&self, payload: LeaveCreate) -> RepoResult<LeaveRequest> {
        if self
            .approved_overlapping(
                &payload.employee,
                payload.start_date,
                payload.end_date,
                None,
            )
            .await?
        {
            return Err(RepoError::Conflict(
                "An approved leave already exists for the requested date range.".to_string(),
            ));
        }

        let leave = LeaveRequest {
            id: None,
            employee: payload.employee,
            employee_name: payload.employee_name,
            department: payload.department,
            start_date: payload.start_date,
            end_date: payload.end_date,
            reason: payload.reason,
            status: LeaveStatus::Pending,
            created_at: crate::utils::time::now_millis(),
        };

        let created: Option<LeaveRequest> = self.base.db.create("leave").content(leave).await?;
        created.ok_or_else(|| RepoError::Database("Leave creation returned nothing".to_string()))
    }

    pub async fn find_by_id(&self, id: &LeaveId) -> RepoResult<Option<LeaveRequest>> {
        let leave: Option<LeaveRequest> = self.base.db.select(id.clone()).await?;
        Ok(leave)
    }

    /// All requests for one employee, newest first
    pub async fn find_mine(&self, employee: &RecordId) -> RepoResult<Vec<LeaveRequest>> {
        let mut result = self
            .base
            .db
            .query(
                "SELECT * FROM leave WHERE employee = $employee \
                 ORDER BY created_at DESC",
            )
            .bind(("employee", employee.to_string()))
            .await?;
        let leaves: Vec<LeaveRequest> = result.take(0)?;
        Ok(leaves)
    }

    pub async fn find_pending(&self, filter: PendingLeaveFilter) -> RepoResult<Vec<LeaveRequest>> {
        let mut sql = String::from("SELECT * FROM leave WHERE status = 'Pending'");
        if filter.q.is_some() {
            sql.push_str(" AND string::lowercase(employee_name) CONTAINS $q");
        }
        if filter.department.is_some() {
            sql.push_str(" AND department = $department");
        }
        if filter.date.is_some() {
            sql.push_str(" AND start_date <= $date AND end_date >= $date");
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db.query(sql);
        if let Some(q) = filter.q {
            query = query.bind(("q", q.to_lowercase()));
        }
        if let Some(department) = filter.department {
            query = query.bind(("department", department));
        }
        if let Some(date) = filter.date {
            query = query.bind(("date", date));
        }

        let leaves: Vec<LeaveRequest> = query.await?.take(0)?;
        Ok(leaves)
    }

    /// Resolve a pending request. The UPDATE only fires while the row is
    /// still Pending; an empty result is then disambiguated into 404
    /// (no such request) or 409 (already resolved). Approval re-checks
    /// the overlap rule: two pending requests may share dates, but only
    /// one of them can become Approved.
    pub async fn act(&self, id: &LeaveId, status: LeaveStatus) -> RepoResult<LeaveRequest> {
        if status == LeaveStatus::Approved {
            let request = self
                .find_by_id(id)
                .await?
                .ok_or_else(|| RepoError::NotFound(format!("No such leave request: {id}")))?;
            if self
                .approved_overlapping(
                    &request.employee,
                    request.start_date,
                    request.end_date,
                    Some(id),
                )
                .await?
            {
                return Err(RepoError::Conflict(
                    "Another approved leave already covers part of this date range.".to_string(),
                ));
            }
        }

        let mut result = self
            .base
            .db
            .query(
                "UPDATE $record SET status = $status \
                 WHERE status = 'Pending' RETURN AFTER",
            )
            .bind(("record", id.clone()))
            .bind(("status", status))
            .await?;
        let updated: Option<LeaveRequest> = result.take(0)?;

        match updated {
            Some(leave) => Ok(leave),
            None => match self.find_by_id(id).await? {
                Some(existing) => Err(RepoError::Conflict(format!(
                    "Leave request is already {:?}",
                    existing.status
                ))),
                None => Err(RepoError::NotFound(format!("No such leave request: {id}"))),
            },
        }
    }

    /// Whether the employee has an approved leave covering the given date
    pub async fn approved_covering(
        &self,
        employee: &RecordId,
        date: NaiveDate,
    ) -> RepoResult<bool> {
        let mut result = self
            .base
            .db
            .query(
                "SELECT count() AS count FROM leave \
                 WHERE employee = $employee AND status = 'Approved' \
                 AND start_date <= $date AND end_date >= $date \
                 GROUP ALL",
            )
            .bind(("employee", employee.to_string()))
            .bind(("date", date))
            .await?;
        let row: Option<super::CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0) > 0)
    }

    /// Per-status counts for one employee (employee dashboard)
    pub async fn summary_for(&self, employee: &RecordId) -> RepoResult<LeaveStatusSummary> {
        let mut result = self
            .base
            .db
            .query(
                "SELECT status, count() AS count FROM leave \
                 WHERE employee = $employee GROUP BY status",
            )
            .bind(("employee", employee.to_string()))
            .await?;
        let rows: Vec<StatusCountRow> = result.take(0)?;
        Ok(summarize(rows))
    }

    /// Per-status counts over all requests (HR dashboard)
    pub async fn status_summary(&self) -> RepoResult<LeaveStatusSummary> {
        let mut result = self
            .base
            .db
            .query("SELECT status, count() AS count FROM leave GROUP BY status")
            .await?;
        let rows: Vec<StatusCountRow> = result.take(0)?;
        Ok(summarize(rows))
    }
}

#[derive(Debug, Deserialize)]
struct StatusCountRow {
    status: LeaveStatus,
    count: u64,
}

fn summarize(rows: Vec<StatusCountRow>) -> LeaveStatusSummary {
    let mut summary = LeaveStatusSummary::default();
    for row in rows {
        match row.status {
            LeaveStatus::Pending => summary.pending = row.count,
            LeaveStatus::Approved => summary.approved = row.count,
            LeaveStatus::Rejected => summary.rejected = row.count,
        }
    }
    summary
}
