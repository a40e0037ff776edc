//! Repository layer
//!
//! Each table gets a thin repository over the shared database handle.
//! Status transitions are done with conditional UPDATE statements so a
//! record can only move out of its current state once, no matter how
//! many requests race for it.

pub mod attendance;
pub mod employee;
pub mod hr;
pub mod leave;
pub mod task;

use crate::db::DbService;
use serde::Deserialize;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};
use thiserror::Error;

pub use attendance::{AttendanceFilter, AttendanceRepository};
pub use employee::{EmployeeFilter, EmployeeRepository};
pub use hr::HrRepository;
pub use leave::{LeaveRepository, PendingLeaveFilter};
pub use task::TaskRepository;

/// Repository errors, mapped to HTTP-facing errors at the API boundary
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Duplicate record: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index violations surface as plain query errors; keep the
        // duplicate signal so callers can answer 409 instead of 500.
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

/// Shared base for all repositories
#[derive(Clone)]
pub struct BaseRepository {
    pub db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: &DbService) -> Self {
        Self { db: db.db.clone() }
    }
}

/// Parse a client-supplied id into a `RecordId` for the given table.
///
/// Accepts both the full `table:key` form and a bare key. A full form
/// naming a different table is rejected rather than silently redirected.
pub fn parse_id(table: &str, raw: &str) -> RepoResult<RecordId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(RepoError::Validation("id must not be empty".to_string()));
    }
    match raw.split_once(':') {
        Some((tb, key)) if !key.is_empty() => {
            if tb != table {
                return Err(RepoError::NotFound(format!("No such {table}: {raw}")));
            }
            Ok(RecordId::from_table_key(table, key))
        }
        _ => Ok(RecordId::from_table_key(table, raw)),
    }
}

/// Row shape for `count()` aggregate queries
#[derive(Debug, Deserialize)]
pub struct CountRow {
    pub count: u64,
}
