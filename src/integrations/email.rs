use std::time::Duration;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::message::OwnerMessage;
use super::{DeliveryOutcome, IntegrationError, OwnerNotifier};
use crate::config::SmtpConfig;

/// Sends the lead summary as a plain-text email to the owner's inbox.
pub struct EmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Mailbox,
}

impl EmailNotifier {
    /// Addresses are parsed up front so a bad `OWNER_NOTIFY_EMAIL` fails at startup.
    pub fn new(config: &SmtpConfig, to: String, timeout: Duration) -> Result<Self, String> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| format!("Invalid from address: {e}"))?;
        let to: Mailbox = to.parse().map_err(|e| format!("Invalid to address: {e}"))?;

        let creds = Credentials::new(config.user.clone(), config.pass.clone());

        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| format!("Owner SMTP error: {e}"))?
            .port(config.port)
            .credentials(creds)
            .timeout(Some(timeout))
            .build();

        Ok(Self { transport, from, to })
    }
}

#[async_trait]
impl OwnerNotifier for EmailNotifier {
    fn id(&self) -> &str {
        "email"
    }

    async fn notify(&self, message: &OwnerMessage) -> Result<DeliveryOutcome, IntegrationError> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(message.title.clone())
            .header(ContentType::TEXT_PLAIN)
            .body(message.content.clone())
            .map_err(|e| IntegrationError::from(format!("Failed to build email: {e}")))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| IntegrationError::from(format!("Failed to send email: {e}")))?;

        Ok(DeliveryOutcome::success("Email sent successfully"))
    }
}
