//! Attendance Repository
//!
//! One row per (employee, date), backed by a unique index. Mark and
//! checkout are both single conditional statements so concurrent
//! requests for the same day cannot produce duplicates or double
//! checkouts.

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::DbService;
use crate::db::models::{AttendanceId, AttendanceRecord};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;
use shared::models::{AttendanceStatus, AttendanceUpdateRequest};
use surrealdb::RecordId;

/// Filters for the HR attendance list
#[derive(Debug, Default, Clone)]
pub struct AttendanceFilter {
    pub date: Option<NaiveDate>,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub employee: Option<RecordId>,
    /// Case-insensitive substring match on employee name
    pub name_query: Option<String>,
    pub department: Option<String>,
}

#[derive(Clone)]
pub struct AttendanceRepository {
    base: BaseRepository,
}

impl AttendanceRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Mark today's attendance as Present with a check-in time.
    /// Fails with a duplicate error when a row for the day already exists.
    pub async fn mark(
        &self,
        employee: &RecordId,
        employee_name: &str,
        department: &str,
        date: NaiveDate,
        check_in: NaiveTime,
    ) -> RepoResult<AttendanceRecord> {
        if self.find_for_day(employee, date).await?.is_some() {
            return Err(RepoError::Duplicate(
                "Attendance already marked for today.".to_string(),
            ));
        }

        let record = AttendanceRecord {
            id: None,
            employee: employee.clone(),
            employee_name: employee_name.to_string(),
            department: department.to_string(),
            date,
            status: AttendanceStatus::Present,
            check_in: Some(check_in),
            check_out: None,
            created_at: crate::utils::time::now_millis(),
        };

        // The unique index catches the race the pre-check cannot.
        let created: Option<AttendanceRecord> = self
            .base
            .db
            .create("attendance")
            .content(record)
            .await
            .map_err(|e| match RepoError::from(e) {
                RepoError::Duplicate(_) => {
                    RepoError::Duplicate("Attendance already marked for today.".to_string())
                }
                other => other,
            })?;
        created.ok_or_else(|| {
            RepoError::Database("Attendance creation returned nothing".to_string())
        })
    }

    /// Record a checkout time on today's row. Conditional so only the
    /// first checkout of a checked-in day succeeds.
    pub async fn checkout(
        &self,
        employee: &RecordId,
        date: NaiveDate,
        check_out: NaiveTime,
    ) -> RepoResult<AttendanceRecord> {
        let mut result = self
            .base
            .db
            .query(
                "UPDATE attendance SET check_out = $check_out \
                 WHERE employee = $employee AND date = $date \
                 AND check_in != NONE AND check_out = NONE \
                 RETURN AFTER",
            )
            .bind(("check_out", check_out))
            .bind(("employee", employee.to_string()))
            .bind(("date", date))
            .await?;
        let updated: Option<AttendanceRecord> = result.take(0)?;

        match updated {
            Some(record) => Ok(record),
            None => match self.find_for_day(employee, date).await? {
                Some(existing) if existing.check_out.is_some() => Err(RepoError::Conflict(
                    "Already checked out for today.".to_string(),
                )),
                Some(_) => Err(RepoError::Conflict(
                    "No check-in recorded for today.".to_string(),
                )),
                None => Err(RepoError::NotFound(
                    "No attendance record for today.".to_string(),
                )),
            },
        }
    }

    pub async fn find_for_day(
        &self,
        employee: &RecordId,
        date: NaiveDate,
    ) -> RepoResult<Option<AttendanceRecord>> {
        let mut result = self
            .base
            .db
            .query(
                "SELECT * FROM attendance \
                 WHERE employee = $employee AND date = $date LIMIT 1",
            )
            .bind(("employee", employee.to_string()))
            .bind(("date", date))
            .await?;
        let record: Option<AttendanceRecord> = result.take(0)?;
        Ok(record)
    }

    /// Write (or overwrite) a Leave day for an approved leave request.
    /// Existing check-in/out times are cleared; the day belongs to the
    /// leave once it is approved.
    pub async fn upsert_leave_day(
        &self,
        employee: &RecordId,
        employee_name: &str,
        department: &str,
        date: NaiveDate,
    ) -> RepoResult<()> {
        let existing = self.find_for_day(employee, date).await?;
        match existing.and_then(|r| r.id) {
            Some(id) => {
                self.base
                    .db
                    .query(
                        "UPDATE $record SET status = 'Leave', \
                         check_in = NONE, check_out = NONE",
                    )
                    .bind(("record", id))
                    .await?;
            }
            None => {
                let record = AttendanceRecord {
                    id: None,
                    employee: employee.clone(),
                    employee_name: employee_name.to_string(),
                    department: department.to_string(),
                    date,
                    status: AttendanceStatus::OnLeave,
                    check_in: None,
                    check_out: None,
                    created_at: crate::utils::time::now_millis(),
                };
                let _: Option<AttendanceRecord> =
                    self.base.db.create("attendance").content(record).await?;
            }
        }
        Ok(())
    }

    pub async fn list(&self, filter: AttendanceFilter) -> RepoResult<Vec<AttendanceRecord>> {
        let mut sql = String::from("SELECT * FROM attendance WHERE 1 = 1");
        if filter.date.is_some() {
            sql.push_str(" AND date = $date");
        }
        if filter.start.is_some() {
            sql.push_str(" AND date >= $start");
        }
        if filter.end.is_some() {
            sql.push_str(" AND date <= $end");
        }
        if filter.employee.is_some() {
            sql.push_str(" AND employee = $employee");
        }
        if filter.name_query.is_some() {
            sql.push_str(" AND string::lowercase(employee_name) CONTAINS $name_query");
        }
        if filter.department.is_some() {
            sql.push_str(" AND department = $department");
        }
        sql.push_str(" ORDER BY date DESC");

        let mut query = self.base.db.query(sql);
        if let Some(date) = filter.date {
            query = query.bind(("date", date));
        }
        if let Some(start) = filter.start {
            query = query.bind(("start", start));
        }
        if let Some(end) = filter.end {
            query = query.bind(("end", end));
        }
        if let Some(employee) = filter.employee {
            query = query.bind(("employee", employee.to_string()));
        }
        if let Some(name_query) = filter.name_query {
            query = query.bind(("name_query", name_query.to_lowercase()));
        }
        if let Some(department) = filter.department {
            query = query.bind(("department", department));
        }

        let records: Vec<AttendanceRecord> = query.await?.take(0)?;
        Ok(records)
    }

    /// HR correction of a single record
    pub async fn update(
        &self,
        id: &AttendanceId,
        req: &AttendanceUpdateRequest,
    ) -> RepoResult<AttendanceRecord> {
        let mut result = self
            .base
            .db
            .query(
                "UPDATE $record SET \
                 status = IF $has_status THEN $status ELSE status END, \
                 check_in = IF $has_check_in THEN $check_in ELSE check_in END, \
                 check_out = IF $has_check_out THEN $check_out ELSE check_out END \
                 RETURN AFTER",
            )
            .bind(("record", id.clone()))
            .bind(("has_status", req.status.is_some()))
            .bind(("status", req.status.unwrap_or(AttendanceStatus::Present)))
            .bind(("has_check_in", req.check_in.is_some()))
            .bind(("check_in", req.check_in))
            .bind(("has_check_out", req.check_out.is_some()))
            .bind(("check_out", req.check_out))
            .await?;
        let updated: Option<AttendanceRecord> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("No such attendance record: {id}")))
    }

    /// (total, present) day counts for one employee, optionally limited
    /// to a date range.
    pub async fn counts(
        &self,
        employee: &RecordId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> RepoResult<(u64, u64)> {
        let mut base_sql =
            String::from("SELECT count() AS count FROM attendance WHERE employee = $employee");
        if start.is_some() {
            base_sql.push_str(" AND date >= $start");
        }
        if end.is_some() {
            base_sql.push_str(" AND date <= $end");
        }
        let total_sql = format!("{base_sql} GROUP ALL");
        let present_sql = format!("{base_sql} AND status = 'Present' GROUP ALL");

        let mut query = self
            .base
            .db
            .query(total_sql)
            .query(present_sql)
            .bind(("employee", employee.to_string()));
        if let Some(start) = start {
            query = query.bind(("start", start));
        }
        if let Some(end) = end {
            query = query.bind(("end", end));
        }

        let mut result = query.await?;
        let total: Option<CountRow> = result.take(0)?;
        let present: Option<CountRow> = result.take(1)?;
        Ok((
            total.map(|r| r.count).unwrap_or(0),
            present.map(|r| r.count).unwrap_or(0),
        ))
    }

    /// (total, present) day counts grouped by department
    pub async fn department_counts(&self) -> RepoResult<Vec<(String, u64, u64)>> {
        #[derive(Deserialize)]
        struct Row {
            department: String,
            count: u64,
        }
        let mut result = self
            .base
            .db
            .query(
                "SELECT department, count() AS count FROM attendance \
                 GROUP BY department",
            )
            .query(
                "SELECT department, count() AS count FROM attendance \
                 WHERE status = 'Present' GROUP BY department",
            )
            .await?;
        let totals: Vec<Row> = result.take(0)?;
        let presents: Vec<Row> = result.take(1)?;

        let mut out: Vec<(String, u64, u64)> = totals
            .into_iter()
            .map(|r| (r.department, r.count, 0))
            .collect();
        for p in presents {
            if let Some(entry) = out.iter_mut().find(|(d, _, _)| *d == p.department) {
                entry.2 = p.count;
            }
        }
        Ok(out)
    }
}
