//! 服务模块
//!
//! - [`MailerClient`] - 邮件微服务客户端

pub mod mailer;

pub use mailer::MailerClient;
