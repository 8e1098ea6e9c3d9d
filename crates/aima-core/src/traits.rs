//! Core trait definitions for outgoing mail.
//!
//! The [`Mailer`] trait is implemented by the `aima-mail` crate (SMTP and
//! mock transports) and consumed by the relay server and the CLI.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A rendered email ready for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    /// Recipient addresses.
    pub to: Vec<String>,
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Trait for transports that deliver rendered email.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Transport name (e.g. "smtp").
    fn name(&self) -> &str;

    /// Deliver one email to all of its recipients.
    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()>;
}
