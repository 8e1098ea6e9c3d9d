//! SMTP delivery via lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::instrument;

use aima_core::traits::{Mailer, OutgoingEmail};

use crate::config::SmtpSettings;
use crate::error::MailError;

/// Sends HTML email through an SMTP relay.
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a mailer from settings. Fails if no host is configured or the
    /// `From` address does not parse.
    pub fn new(settings: &SmtpSettings) -> Result<Self, MailError> {
        let host = settings
            .host
            .as_deref()
            .filter(|h| !h.trim().is_empty())
            .ok_or_else(|| MailError::NotConfigured("SMTP host is not set".into()))?;
        let from: Mailbox = settings.from.parse()?;

        let mut builder = if settings.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)?
        }
        .port(settings.effective_port());

        if let (Some(user), Some(pass)) = (&settings.user, &settings.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        tracing::debug!(
            host,
            port = settings.effective_port(),
            secure = settings.secure,
            "SMTP transport configured"
        );

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }

    /// Deliver one email.
    #[instrument(skip(self, email), fields(subject = %email.subject, recipients = email.to.len()))]
    pub async fn deliver(&self, email: &OutgoingEmail) -> Result<(), MailError> {
        let message = build_message(&self.from, email)?;
        self.transport.send(message).await?;
        tracing::info!("email sent");
        Ok(())
    }
}

/// Assemble the MIME message for an outgoing email.
pub fn build_message(from: &Mailbox, email: &OutgoingEmail) -> Result<Message, MailError> {
    if email.to.is_empty() {
        return Err(MailError::NoRecipients);
    }

    let mut builder = Message::builder()
        .from(from.clone())
        .subject(email.subject.clone())
        .header(ContentType::TEXT_HTML);
    for recipient in &email.to {
        builder = builder.to(recipient.parse()?);
    }

    builder
        .body(email.html.clone())
        .map_err(|e| MailError::Build(e.to_string()))
}

#[async_trait]
impl Mailer for SmtpMailer {
    fn name(&self) -> &str {
        "smtp"
    }

    async fn send(&self, email: &OutgoingEmail) -> anyhow::Result<()> {
        Ok(self.deliver(email).await?)
    }
}
