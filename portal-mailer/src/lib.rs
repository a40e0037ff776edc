//! Welcome-mail microservice
//!
//! A single-endpoint HTTP service the portal server calls after creating
//! an employee account. Delivery goes through [`backend::MailBackend`],
//! so the HTTP layer is testable without an SMTP connection.

pub mod backend;
pub mod config;
pub mod error;
pub mod routes;

pub use backend::{MailBackend, MemoryBackend, OutgoingMail, SmtpBackend};
pub use config::MailerConfig;
pub use error::{MailerError, MailerResult};
pub use routes::build_app;
