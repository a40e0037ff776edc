//! Employee Repository

use super::{BaseRepository, CountRow, RepoError, RepoResult};
use crate::db::DbService;
use crate::db::models::{Employee, EmployeeId, password};
use serde::Deserialize;
use shared::models::{EmployeeCreateRequest, EmployeeUpdateRequest};
use shared::stats::DepartmentCount;
use surrealdb::RecordId;

/// List filters for the HR employee directory
#[derive(Debug, Default, Clone)]
pub struct EmployeeFilter {
    pub department: Option<String>,
    /// Case-insensitive substring match on name or email
    pub search: Option<String>,
    pub hr: Option<RecordId>,
}

#[derive(Clone)]
pub struct EmployeeRepository {
    base: BaseRepository,
}

impl EmployeeRepository {
    pub fn new(db: &DbService) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_all(&self, filter: EmployeeFilter) -> RepoResult<Vec<Employee>> {
        let mut sql = String::from("SELECT * FROM employee WHERE 1 = 1");
        if filter.department.is_some() {
            sql.push_str(" AND department = $department");
        }
        if filter.search.is_some() {
            sql.push_str(
                " AND (string::lowercase(name) CONTAINS $search \
                 OR string::lowercase(email) CONTAINS $search)",
            );
        }
        if filter.hr.is_some() {
            sql.push_str(" AND hr = $hr");
        }
        sql.push_str(" ORDER BY name ASC");

        let mut query = self.base.db.query(sql);
        if let Some(department) = filter.department {
            query = query.bind(("department", department));
        }
        if let Some(search) = filter.search {
            query = query.bind(("search", search.to_lowercase()));
        }
        if let Some(hr) = filter.hr {
            // Link fields are stored as "table:id" strings
            query = query.bind(("hr", hr.to_string()));
        }

        let employees: Vec<Employee> = query.await?.take(0)?;
        Ok(employees)
    }

    pub async fn find_by_id(&self, id: &EmployeeId) -> RepoResult<Option<Employee>> {
        let employee: Option<Employee> = self.base.db.select(id.clone()).await?;
        Ok(employee)
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<Employee>> {
        let mut result = self
            .base
            .db
            .query("SELECT * FROM employee WHERE email = $email LIMIT 1")
            .bind(("email", email.to_string()))
            .await?;
        let employee: Option<Employee> = result.take(0)?;
        Ok(employee)
    }

    /// Create an employee account. The caller has already validated the
    /// request fields; this only guards the unique email.
    pub async fn create(
        &self,
        req: &EmployeeCreateRequest,
        hr: RecordId,
    ) -> RepoResult<Employee> {
        if self.find_by_email(&req.email).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "An account with email {} already exists",
                req.email
            )));
        }

        let hash_pass = password::hash(&req.password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;

        let employee = Employee {
            id: None,
            name: req.name.clone(),
            email: req.email.clone(),
            hash_pass,
            department: req.department.clone(),
            designation: req.designation.clone(),
            salary: req.salary,
            phone: req.phone.clone(),
            address: req.address.clone(),
            hr,
            created_at: crate::utils::time::now_millis(),
        };

        let created: Option<Employee> = self.base.db.create("employee").content(employee).await?;
        created.ok_or_else(|| RepoError::Database("Employee creation returned nothing".to_string()))
    }

    /// Partial update; only fields present in the request change.
    pub async fn update(
        &self,
        id: &EmployeeId,
        req: &EmployeeUpdateRequest,
    ) -> RepoResult<Employee> {
        if let Some(email) = &req.email {
            if let Some(existing) = self.find_by_email(email).await? {
                if existing.id.as_ref() != Some(id) {
                    return Err(RepoError::Duplicate(format!(
                        "An account with email {email} already exists"
                    )));
                }
            }
        }

        let mut result = self
            .base
            .db
            .query(
                "UPDATE $record SET \
                 name = IF $has_name THEN $name ELSE name END, \
                 email = IF $has_email THEN $email ELSE email END, \
                 department = IF $has_department THEN $department ELSE department END, \
                 designation = IF $has_designation THEN $designation ELSE designation END, \
                 salary = IF $has_salary THEN $salary ELSE salary END, \
                 phone = IF $has_phone THEN $phone ELSE phone END, \
                 address = IF $has_address THEN $address ELSE address END \
                 RETURN AFTER",
            )
            .bind(("record", id.clone()))
            .bind(("has_name", req.name.is_some()))
            .bind(("name", req.name.clone().unwrap_or_default()))
            .bind(("has_email", req.email.is_some()))
            .bind(("email", req.email.clone().unwrap_or_default()))
            .bind(("has_department", req.department.is_some()))
            .bind(("department", req.department.clone().unwrap_or_default()))
            .bind(("has_designation", req.designation.is_some()))
            .bind(("designation", req.designation.clone().unwrap_or_default()))
            .bind(("has_salary", req.salary.is_some()))
            .bind(("salary", req.salary.unwrap_or_default()))
            .bind(("has_phone", req.phone.is_some()))
            .bind(("phone", req.phone.clone()))
            .bind(("has_address", req.address.is_some()))
            .bind(("address", req.address.clone()))
            .await?;

        let updated: Option<Employee> = result.take(0)?;
        updated.ok_or_else(|| RepoError::NotFound(format!("No such employee: {id}")))
    }

    pub async fn delete(&self, id: &EmployeeId) -> RepoResult<Employee> {
        let deleted: Option<Employee> = self.base.db.delete(id.clone()).await?;
        deleted.ok_or_else(|| RepoError::NotFound(format!("No such employee: {id}")))
    }

    pub async fn change_password(&self, id: &EmployeeId, new_password: &str) -> RepoResult<()> {
        let hash_pass = password::hash(new_password)
            .map_err(|e| RepoError::Database(format!("Password hashing failed: {e}")))?;
        let mut result = self
            .base
            .db
            .query("UPDATE $record SET hash_pass = $hash_pass RETURN AFTER")
            .bind(("record", id.clone()))
            .bind(("hash_pass", hash_pass))
            .await?;
        let updated: Option<Employee> = result.take(0)?;
        updated
            .map(|_| ())
            .ok_or_else(|| RepoError::NotFound(format!("No such employee: {id}")))
    }

    pub async fn count(&self) -> RepoResult<u64> {
        let mut result = self
            .base
            .db
            .query("SELECT count() AS count FROM employee GROUP ALL")
            .await?;
        let row: Option<CountRow> = result.take(0)?;
        Ok(row.map(|r| r.count).unwrap_or(0))
    }

    pub async fn department_counts(&self) -> RepoResult<Vec<DepartmentCount>> {
        #[derive(Deserialize)]
        struct Row {
            department: String,
            count: u64,
        }
        let mut result = self
            .base
            .db
            .query(
                "SELECT department, count() AS count FROM employee \
                 GROUP BY department ORDER BY department ASC",
            )
            .await?;
        let rows: Vec<Row> = result.take(0)?;
        Ok(rows
            .into_iter()
            .map(|r| DepartmentCount {
                department: r.department,
                count: r.count,
            })
            .collect())
    }
}
