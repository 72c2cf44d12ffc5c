//! Mock mail transport for tests in this crate and downstream crates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::mailer::{Mailer, MailerError};

#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Records every send; optionally fails each one to simulate a broken
/// transport.
#[derive(Default)]
pub struct MockMailer {
    sent: Mutex<Vec<SentMail>>,
    attempts: AtomicUsize,
    fail: bool,
}

impl MockMailer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().expect("mock mailer lock").clone()
    }

    /// Total send attempts, including failed ones.
    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Mailer for MockMailer {
    async fn send(&self, to: &str, subject: &str, body_html: &str) -> Result<(), MailerError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(MailerError::Transport("simulated transport failure".to_string()));
        }
        self.sent.lock().expect("mock mailer lock").push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: body_html.to_string(),
        });
        Ok(())
    }
}
