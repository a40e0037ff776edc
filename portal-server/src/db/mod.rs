//! Database Module
//!
//! Embedded SurrealDB storage. The schema is a handful of DEFINE
//! statements applied at startup; the unique (employee, date) index is
//! what enforces the one-attendance-record-per-day invariant at the
//! storage layer.

pub mod models;
pub mod repository;

use crate::utils::AppError;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

const NAMESPACE: &str = "portal";
const DATABASE: &str = "portal";

/// Database service — owns the embedded SurrealDB handle
#[derive(Clone)]
pub struct DbService {
    pub db: Surreal<Db>,
}

impl DbService {
    /// Open (or create) the on-disk database and apply the schema
    pub async fn new(db_path: &str) -> Result<Self, AppError> {
        let db = Surreal::new::<RocksDb>(db_path)
            .await
            .map_err(|e| AppError::database(format!("Failed to open database: {e}")))?;
        Self::init(db).await
    }

    /// In-memory database (tests)
    pub async fn memory() -> Result<Self, AppError> {
        let db = Surreal::new::<Mem>(())
            .await
            .map_err(|e| AppError::database(format!("Failed to open in-memory database: {e}")))?;
        Self::init(db).await
    }

    async fn init(db: Surreal<Db>) -> Result<Self, AppError> {
        db.use_ns(NAMESPACE)
            .use_db(DATABASE)
            .await
            .map_err(|e| AppError::database(format!("Failed to select namespace: {e}")))?;

        db.query(
            r#"
            DEFINE TABLE IF NOT EXISTS hr SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS hr_email ON hr FIELDS email UNIQUE;

            DEFINE TABLE IF NOT EXISTS employee SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS employee_email ON employee FIELDS email UNIQUE;

            DEFINE TABLE IF NOT EXISTS leave SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS leave_employee ON leave FIELDS employee;

            DEFINE TABLE IF NOT EXISTS attendance SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS attendance_employee_date ON attendance FIELDS employee, date UNIQUE;

            DEFINE TABLE IF NOT EXISTS task SCHEMALESS;
            DEFINE INDEX IF NOT EXISTS task_employee ON task FIELDS employee;
            "#,
        )
        .await
        .map_err(|e| AppError::database(format!("Failed to apply schema: {e}")))?;

        tracing::info!("Database ready (embedded SurrealDB, schema applied)");
        Ok(Self { db })
    }
}
