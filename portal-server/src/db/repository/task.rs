//! Task Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::DbService;
use crate::db::models::{Task, TaskCreate, TaskId};
use shared::models::TaskStatus;
use surrealdb::RecordId;

#[derive(Clone)]
pub struct TaskRepository {
    base: BaseRepository,
}

impl TaskRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn create(&self, payload: TaskCreate) -> RepoResult<Task> {
        let task = Task {
            id: None,
            employee: payload.employee,
            hr: payload.hr,
            title: payload.title,
            description: payload.description,
            due_date: payload.due_date,
            priority: payload.priority,
            status: TaskStatus::Pending,
            created_at: crate::utils::time::now_millis(),
        };
        let created: Option<Task> = self.base.db.create("task").content(task).await?;
        created.ok_or_else(|| RepoError::Database("Task creation returned nothing".to_string()))
    }

    pub async fn find_by_id(&self, id: &TaskId) -> RepoResult<Option<Task>> {
        let task: Option<Task> = self.base.db.select(id.clone()).await?;
        Ok(task)
    }

    /// Tasks assigned by one HR account, newest first
    pub async fn find_by_hr(&self, hr: &RecordId) -> RepoResult<Vec<Task>> {
        let mut result = self
            .base
            .db
            .query("SELECT * FROM task WHERE hr = $hr ORDER BY created_at DESC")
            .bind(("hr", hr.to_string()))
            .await?;
        let tasks: Vec<Task> = result.take(0)?;
        Ok(tasks)
    }

    /// Tasks assigned to one employee, newest first
    pub async fn find_by_employee(&self, employee: &RecordId) -> RepoResult<Vec<Task>> {
        let mut result = self
            .base
            .db
            .query("SELECT * FROM task WHERE employee = $employee ORDER BY created_at DESC")
            .bind(("employee", employee.to_string()))
            .await?;
        let tasks: Vec<Task> = result.take(0)?;
        Ok(tasks)
    }

    /// Ownership is checked by the handler before this runs.
    pub async fn update_status(&self, id: &TaskId, status: TaskStatus) -> RepoResult<Task> {
        let mut result = self
            .base
            .db
            .query("UPDATE $record SET status = $status RETURN AFTER")
            .bind(("record", id.clone()))
            .bind(("status", status))
            .await?;
        let updated: Option<Task> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("No such task: {id}")))
    }
}
