//! HR Account Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::DbService;
use crate::db::models::{Hr, HrCreate, HrId, password};

#[derive(Clone)]
pub struct HrRepository {
    base: BaseRepository,
}

impl HrRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, id: &HrId) -> RepoResult<Option<Hr>> {
        let hr: Option<Hr> = self.base.db.select(id.clone()).await?;
        Ok(hr)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Hr>> {
        let mut result = self
            .base
            .db
            .query("SELECT * FROM hr WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let hr: Option<Hr> = result.take(0)?;
        Ok(hr)
    }

    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db
            .query("SELECT count() AS count FROM hr GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    /// Used at first boot (seed account) and in tests
    pub async fn create(&self, req: &HrCreate) -> RepoResult<Hr> {
        if self.find_by_email(&req.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "An account with email {} already exists",
                req.email
            )));
        }

        let hash_pass = password::hash(&req.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        let hr = Hr {
            id: None,
            name: req.name.clone(),
            email: req.email.clone(),
            hash_pass,
            department: req.department.clone(),
            created_at: crate::utils::time::now_millis(),
        };

        let created: Option<Hr> = self.base.db.create("hr").content(hr).await?;
        created.ok_or_else(|| RepoError::Database("HR creation returned nothing".to_string()))
    }
}
