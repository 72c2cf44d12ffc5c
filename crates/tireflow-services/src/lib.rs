//! Tireflow services: mail transport and the notification dispatcher.

pub mod mailer;
pub mod notify;
pub mod test_support;

pub use mailer::{Mailer, MailerError, NoopMailer, SmtpMailer};
pub use notify::{NotificationConfig, NotificationService};
