use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::message::Message;
use lettre::transport::smtp::authentication::Credentials;
use lettre::AsyncSmtpTransport;
use lettre::AsyncTransport;
use lettre::Tokio1Executor;

use crate::config::EmailConfig;
use crate::domain::user::models::OutgoingEmail;
use crate::domain::user::ports::Mailer;
use crate::user::errors::MailerError;

/// SMTP delivery of transactional email.
#[derive(Clone)]
pub struct SmtpMailer {
    from: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build a mailer from configuration.
    ///
    /// With `tls` the connection is upgraded via STARTTLS; without it the
    /// session is plaintext, which is only acceptable against a local or
    /// sandbox relay.
    ///
    /// # Errors
    /// * `InvalidAddress` - Sender address does not parse
    /// * `DeliveryFailed` - Relay host cannot be used for TLS
    pub fn new(config: &EmailConfig, tls: bool) -> Result<Self, MailerError> {
        let from: Mailbox = config
            .from_address
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("from address: {}", e)))?;

        let builder = if tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                .map_err(|e| MailerError::DeliveryFailed(format!("SMTP setup failed: {}", e)))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
        };

        let builder = builder.port(config.port);
        let builder = if config.username.is_empty() {
            builder
        } else {
            builder.credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
        };

        Ok(Self {
            from,
            transport: builder.build(),
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: &OutgoingEmail) -> Result<(), MailerError> {
        let to: Mailbox = email
            .to
            .as_str()
            .parse()
            .map_err(|e| MailerError::InvalidAddress(format!("to address: {}", e)))?;

        let message = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(email.subject.as_str())
            .header(ContentType::TEXT_PLAIN)
            .body(email.body.clone())
            .map_err(|e| MailerError::BuildFailed(e.to_string()))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| MailerError::DeliveryFailed(e.to_string()))?;

        tracing::info!(to = %email.to, subject = %email.subject, "Email sent");
        Ok(())
    }
}
