//! Mailer error types

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailerError {
    #[error("Invalid request: {0}")]
    Validation(String),

    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("Send failed: {0}")]
    Send(String),
}

pub type MailerResult<T> = Result<T, MailerError>;
