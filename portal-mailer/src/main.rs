use std::sync::Arc;

use portal_mailer::{MailerConfig, SmtpBackend, build_app};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = MailerConfig::from_env();
    if !config.has_credentials() {
        tracing::warn!("EMAIL_USER/EMAIL_PASS not set; delivery will fail until they are");
    }

    let backend = Arc::new(SmtpBackend::new(&config)?);
    let app = build_app(backend);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "mailer listening");
    axum::serve(listener, app).await?;
    Ok(())
}
