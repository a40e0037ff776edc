//! Mail delivery backends
//!
//! The HTTP layer only knows the [`MailBackend`] trait; tests swap in
//! [`MemoryBackend`] so no SMTP connection is ever opened.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use crate::config::MailerConfig;
use crate::error::{MailerError, MailerResult};

/// An outgoing mail
#[derive(Debug, Clone)]
pub struct OutgoingMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait MailBackend: Send + Sync {
    async fn send(&self, mail: OutgoingMail) -> MailerResult<()>;
}

/// SMTP delivery via lettre
pub struct SmtpBackend {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpBackend {
    pub fn new(config: &MailerConfig) -> MailerResult<Self> {
        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.relay)?
            .credentials(Credentials::new(
                config.email_user.clone(),
                config.email_pass.clone(),
            ))
            .build();

        Ok(Self {
            transport,
            from: format!("{} <{}>", config.from_name, config.email_user),
        })
    }
}

#[async_trait]
impl MailBackend for SmtpBackend {
    async fn send(&self, mail: OutgoingMail) -> MailerResult<()> {
        let message = Message::builder()
            .from(self.from.parse()?)
            .to(mail.to.parse()?)
            .subject(mail.subject)
            .header(ContentType::TEXT_PLAIN)
            .body(mail.body)?;

        self.transport.send(message).await?;
        Ok(())
    }
}

/// In-memory backend for tests. Records every mail; optionally fails
/// each send.
#[derive(Default)]
pub struct MemoryBackend {
    pub sent: std::sync::Mutex<Vec<OutgoingMail>>,
    pub fail: bool,
}

impl MemoryBackend {
    pub fn failing() -> Self {
        Self {
            sent: std::sync::Mutex::new(Vec::new()),
            fail: true,
        }
    }
}

#[async_trait]
impl MailBackend for MemoryBackend {
    async fn send(&self, mail: OutgoingMail) -> MailerResult<()> {
        if self.fail {
            return Err(MailerError::Send("simulated delivery failure".to_string()));
        }
        self.sent.lock().unwrap().push(mail);
        Ok(())
    }
}
