//! Mailer service DTOs
//!
//! Shared between portal-mailer and the server's best-effort
//! welcome-mail notification.

use serde::{Deserialize, Serialize};

/// POST /send-welcome-email payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeEmailRequest {
    pub name: String,
    pub email: String,
    /// Initial plaintext credential; the recipient is told to change it
    /// on first login.
    pub password: String,
}

/// Mailer response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SendMailResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
