//! Employee wire types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Employee as returned by the API (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeView {
    pub id: String,
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub salary: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Owning HR account id ("hr:...")
    pub hr: String,
    /// Unix timestamp millis
    #[serde(default)]
    pub created_at: i64,
}

/// Create employee payload (HR only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeCreateRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub department: String,
    pub designation: String,
    pub salary: Decimal,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// Update employee payload (HR only, partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeeUpdateRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub designation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}
