//! Mailer configuration

/// Mailer service configuration, loaded from environment variables
#[derive(Debug, Clone)]
pub struct MailerConfig {
    /// HTTP listen port (MAILER_PORT, default 3001)
    pub port: u16,
    /// SMTP account (EMAIL_USER)
    pub email_user: String,
    /// SMTP password or app password (EMAIL_PASS)
    pub email_pass: String,
    /// SMTP relay host (SMTP_RELAY, default smtp.gmail.com)
    pub relay: String,
    /// Display name on outgoing mail
    pub from_name: String,
}

impl MailerConfig {
    pub fn from_env() -> Self {
        let port = std::env::var("MAILER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3001);

        Self {
            port,
            email_user: std::env::var("EMAIL_USER").unwrap_or_default(),
            email_pass: std::env::var("EMAIL_PASS").unwrap_or_default(),
            relay: std::env::var("SMTP_RELAY")
                .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
            from_name: std::env::var("MAILER_FROM_NAME")
                .unwrap_or_else(|_| "HR Portal".to_string()),
        }
    }

    /// Whether SMTP credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.email_user.is_empty() && !self.email_pass.is_empty()
    }
}
