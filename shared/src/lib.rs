//! Shared types for the HR portal
//!
//! Wire-level request/response types used across crates: the server
//! deserializes requests into these, portal-client deserializes the
//! server's responses, and portal-mailer shares the mail DTOs.

pub mod client;
pub mod mail;
pub mod models;
pub mod stats;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use client::{ChangePasswordRequest, LoginRequest, LoginResponse, UserInfo};
pub use mail::{SendMailResponse, WelcomeEmailRequest};
