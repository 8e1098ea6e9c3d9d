//! Mock mailer for testing.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use aima_core::traits::{Mailer, OutgoingEmail};

/// A mailer that records emails instead of sending them.
///
/// Can be told to fail every delivery, to exercise error paths.
pub struct MockMailer {
    /// Every email accepted so far.
    sent: Mutex<Vec<OutgoingEmail>>,
    /// Error message returned by every send, if set.
    failure: Option<String>,
    /// Number of calls made, including failed ones.
    call_count: AtomicU32,
}

impl MockMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failure: None,
            call_count: AtomicU32::new(0),
        }
    }

    /// Create a mock whose every send fails with `message`.
    pub fn failing(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
            ..Self::new()
        }
    }

    /// Get the number of calls made to this mailer.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// Emails accepted so far, oldest first.
    pub fn sent(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// The most recently accepted email.
    pub fn last_email(&self) -> Option<OutgoingEmail> {
        self.sent.lock().unwrap().last().cloned()
    }
}

impl Default for MockMailer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Mailer for MockMailer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if let Some(message) = &self.failure {
            anyhow::bail!("{message}");
        }
        self.sent.lock().unwrap().push(email.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email() -> OutgoingEmail {
        OutgoingEmail {
            to: vec!["info@allureima.com".into()],
            subject: "New Campus Tour Request".into(),
            html: "<p>hi</p>".into(),
        }
    }

    #[tokio::test]
    async fn records_sent_email() {
        let mailer = MockMailer::new();
        mailer.send(&email()).await.unwrap();

        assert_eq!(mailer.call_count(), 1);
        assert_eq!(mailer.sent().len(), 1);
        assert_eq!(
            mailer.last_email().unwrap().subject,
            "New Campus Tour Request"
        );
    }

    #[tokio::test]
    async fn failing_mock_records_nothing() {
        let mailer = MockMailer::failing("connection refused");
        let err = mailer.send(&email()).await.unwrap_err();

        assert_eq!(err.to_string(), "connection refused");
        assert_eq!(mailer.call_count(), 1);
        assert!(mailer.sent().is_empty());
    }
}
