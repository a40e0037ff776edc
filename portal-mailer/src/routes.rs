//! HTTP surface of the mailer service

use std::sync::Arc;

use axum::{Json, Router, extract::State, http::StatusCode, routing::get, routing::post};
use shared::mail::{SendMailResponse, WelcomeEmailRequest};

use crate::backend::{MailBackend, OutgoingMail};

#[derive(Clone)]
pub struct MailerState {
    pub backend: Arc<dyn MailBackend>,
}

pub fn build_app(backend: Arc<dyn MailBackend>) -> Router {
    Router::new()
        .route("/send-welcome-email", post(send_welcome_email))
        .route("/health", get(health))
        .with_state(MailerState { backend })
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Compose the welcome mail for a freshly created account
fn welcome_mail(request: &WelcomeEmailRequest) -> OutgoingMail {
    OutgoingMail {
        to: request.email.clone(),
        subject: "Welcome to HR Portal".to_string(),
        body: format!(
            "Dear {}, your HR portal account has been created. \
             Username: {}, Password: {}. \
             Please login and change your password immediately.",
            request.name, request.email, request.password
        ),
    }
}

/// POST /send-welcome-email
///
/// 400 when any field is missing or empty, 500 when delivery fails.
/// Either way the body carries `{success, error}` so the caller never
/// has to parse a bare status.
async fn send_welcome_email(
    State(state): State<MailerState>,
    Json(request): Json<WelcomeEmailRequest>,
) -> (StatusCode, Json<SendMailResponse>) {
    if request.name.trim().is_empty()
        || request.email.trim().is_empty()
        || request.password.is_empty()
    {
        return (
            StatusCode::BAD_REQUEST,
            Json(SendMailResponse {
                success: false,
                error: Some("name,email,password required".to_string()),
            }),
        );
    }

    match state.backend.send(welcome_mail(&request)).await {
        Ok(()) => {
            tracing::info!(to = %request.email, "welcome email sent");
            (
                StatusCode::OK,
                Json(SendMailResponse {
                    success: true,
                    error: None,
                }),
            )
        }
        Err(e) => {
            tracing::error!(to = %request.email, error = %e, "welcome email failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SendMailResponse {
                    success: false,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
