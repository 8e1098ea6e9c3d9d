//! Mail error types.

use thiserror::Error;

/// Errors that can occur while delivering or relaying email.
#[derive(Debug, Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.).
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// A sender or recipient address could not be parsed.
    #[error("email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled.
    #[error("email build error: {0}")]
    Build(String),

    /// The email has no recipients.
    #[error("email has no recipients")]
    NoRecipients,

    /// Required settings are missing.
    #[error("mail is not configured: {0}")]
    NotConfigured(String),

    /// The relay endpoint returned an error response.
    #[error("relay error (HTTP {status}): {message}")]
    Relay { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    Network(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relay_error_display() {
        let err = MailError::Relay {
            status: 500,
            message: "Failed to send email".into(),
        };
        assert_eq!(err.to_string(), "relay error (HTTP 500): Failed to send email");
    }

    #[test]
    fn address_error_display() {
        let addr_err: Result<lettre::Address, _> = "not-an-email".parse();
        let err = MailError::Address(addr_err.unwrap_err());
        assert!(err.to_string().contains("email address parse error"));
    }
}
