//! Mail-sending capability
//!
//! The notification dispatcher depends on the `Mailer` trait only; the SMTP
//! transport is one implementation, selected by configuration. No-op when
//! email is disabled or SMTP is not configured.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use tireflow_core::Config;

#[derive(Debug, thiserror::Error)]
pub enum MailerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to build message: {0}")]
    BuildFailed(String),

    #[error("Transport error: {0}")]
    Transport(String),
}

/// Injected "send message" capability. Implementations must not retry
/// internally; the dispatcher treats every failure as final and logs it.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body_html: &str) -> Result<(), MailerError>;
}

/// SMTP transport over lettre with a bounded send timeout. A hung SMTP
/// connection must not hold a workflow transition open.
#[derive(Clone)]
pub struct SmtpMailer {
    mailer: Arc<AsyncSmtpTransport<Tokio1Executor>>,
    from: String,
}

impl SmtpMailer {
    /// Build from config. Returns `None` when email is disabled or SMTP is
    /// not configured; callers fall back to a no-op mailer.
    pub fn from_config(config: &Config) -> Option<Self> {
        if !config.email_enabled {
            tracing::debug!("Email notifications disabled (EMAIL_ENABLED=false)");
            return None;
        }
        let host = config.smtp_host.as_deref()?;
        let from = config.smtp_from.clone()?;
        let port = config.smtp_port.unwrap_or(587);
        let timeout = Duration::from_secs(config.notify_timeout_seconds);

        let mailer = if config.smtp_tls {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host).ok()?;
            let builder = builder.port(port).timeout(Some(timeout));
            let builder = if let (Some(user), Some(password)) =
                (config.smtp_user.as_ref(), config.smtp_password.as_ref())
            {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            } else {
                builder
            };
            tracing::info!(host = %host, port = port, "Mailer initialized (SMTP with STARTTLS)");
            builder.build()
        } else {
            let builder = AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
                .port(port)
                .timeout(Some(timeout));
            let builder = if let (Some(user), Some(password)) =
                (config.smtp_user.as_ref(), config.smtp_password.as_ref())
            {
                builder.credentials(Credentials::new(user.clone(), password.clone()))
            } else {
                builder
            };
            tracing::info!(host = %host, port = port, "Mailer initialized (SMTP)");
            builder.build()
        };

        Some(Self {
            mailer: Arc::new(mailer),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, to: &str, subject: &str, body_html: &str) -> Result<(), MailerError> {
        let to_addr: Mailbox = to
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("{}: {}", to, e)))?;
        let from_addr: Mailbox = self
            .from
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("SMTP_FROM: {}", e)))?;

        let email = Message::builder()
            .from(from_addr)
            .to(to_addr)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body_html.to_string())
            .map_err(|e| MailerError::BuildFailed(e.to_string()))?;

        self.mailer
            .send(email)
            .await
            .map_err(|e| MailerError::Transport(e.to_string()))?;
        Ok(())
    }
}

/// Drops every message. Used when email is disabled so the workflow still
/// runs end to end.
pub struct NoopMailer;

#[async_trait]
impl Mailer for NoopMailer {
    async fn send(&self, to: &str, subject: &str, _body_html: &str) -> Result<(), MailerError> {
        tracing::debug!(to = %to, subject = %subject, "Email disabled, dropping notification");
        Ok(())
    }
}
