//! aima-mail: configuration and mail delivery.
//!
//! Implements the `Mailer` trait over SMTP (lettre) plus an in-memory mock,
//! and provides a client for posting form submissions to a running relay.

pub mod config;
pub mod error;
pub mod mock;
pub mod relay;
pub mod smtp;

pub use config::{load_config, load_config_from, AimaConfig, ServerSettings, SmtpSettings};
pub use error::MailError;
pub use mock::MockMailer;
pub use relay::RelayClient;
pub use smtp::SmtpMailer;
