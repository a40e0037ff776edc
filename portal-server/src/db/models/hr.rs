//! HR Account Model

use super::{password, serde_helpers};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// HR account ID type
pub type HrId = RecordId;

/// HR account row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hr {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<HrId>,
    pub name: String,
    pub email: String,
    pub hash_pass: String,
    pub department: String,
    #[serde(default)]
    pub created_at: i64,
}

impl Hr {
    /// Verify password using argon2
    pub fn verify_password(&self, candidate: &str) -> Result<bool, argon2::password_hash::Error> {
        password::verify(&self.hash_pass, candidate)
    }
}

/// Create HR account payload (seeding and tests)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HrCreate {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
}
