//! Employee Model

use super::{password, serde_helpers};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::EmployeeView;
use surrealdb::RecordId;

/// Employee ID type
pub type EmployeeId = RecordId;

/// Employee row. The stored shape carries the password hash; responses
/// go through [`Employee::to_view`], which never does.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<EmployeeId>,
    pub name: String,
    pub email: String,
    pub hash_pass: String,
    pub department: String,
    pub designation: String,
    pub salary: Decimal,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Owning HR account
    #[serde(with = "serde_helpers::record_id")]
    pub hr: RecordId,
    #[serde(default)]
    pub created_at: i64,
}

impl Employee {
    /// Verify password using argon2
    pub fn verify_password(&self, candidate: &str) -> Result<bool, argon2::password_hash::Error> {
        password::verify(&self.hash_pass, candidate)
    }

    /// Wire representation without the password hash
    pub fn to_view(&self) -> EmployeeView {
        EmployeeView {
            id: self
                .id
                .as_ref()
                .map(|id| id.to_string())
                .unwrap_or_default(),
            name: self.name.clone(),
            email: self.email.clone(),
            department: self.department.clone(),
            designation: self.designation.clone(),
            salary: self.salary,
            phone: self.phone.clone(),
            address: self.address.clone(),
            hr: self.hr.to_string(),
            created_at: self.created_at,
        }
    }
}
