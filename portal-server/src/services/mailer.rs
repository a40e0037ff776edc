//! Mailer client
//!
//! Thin HTTP client for the mail microservice. Mail delivery is best
//! effort: a welcome email that cannot be sent must never fail the
//! employee creation that triggered it, so every error here is logged
//! and swallowed.

use shared::mail::{SendMailResponse, WelcomeEmailRequest};
use std::time::Duration;

const MAILER_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Clone)]
pub struct MailerClient {
    client: reqwest::Client,
    base_url: String,
}

impl MailerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(MAILER_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Fire the welcome email for a freshly created account.
    /// Never returns an error; failures only produce a warning log.
    pub async fn notify_welcome(&self, name: &str, email: &str, password: &str) {
        let url = format!("{}/send-welcome-email", self.base_url.trim_end_matches('/'));
        let body = WelcomeEmailRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.client.post(&url).json(&body).send().await {
            Ok(response) => {
                let status = response.status();
                match response.json::<SendMailResponse>().await {
                    Ok(result) if result.success => {
                        tracing::info!(email = %email, "Welcome email sent");
                    }
                    Ok(result) => {
                        tracing::warn!(
                            email = %email,
                            error = ?result.error,
                            "Mailer reported a delivery failure"
                        );
                    }
                    Err(e) => {
                        tracing::warn!(
                            email = %email,
                            status = %status,
                            error = %e,
                            "Unreadable mailer response"
                        );
                    }
                }
            }
            Err(e) => {
                tracing::warn!(email = %email, error = %e, "Mailer unreachable");
            }
        }
    }
}
