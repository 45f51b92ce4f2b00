//! Notification delivery over SMTP (lettre, tokio executor)

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};

use super::config::MailConfig;
use super::errors::{MailError, MailResult};
use super::notifier::Notifier;

/// SMTP notifier
pub struct SmtpNotifier {
    from: Mailbox,
    to: Mailbox,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

fn parse_mailbox(address: &str) -> MailResult<Mailbox> {
    address.parse().map_err(|e: lettre::address::AddressError| MailError::InvalidAddress {
        address: address.to_string(),
        reason: e.to_string(),
    })
}

impl SmtpNotifier {
    /// Build the transport; no connection is opened until the first send
    pub fn new(config: MailConfig) -> MailResult<Self> {
        let transport = if config.smtp_user.is_empty() {
            // Local development servers (MailHog and friends)
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
                .port(config.smtp_port)
                .build()
        } else {
            let creds = Credentials::new(config.smtp_user.clone(), config.smtp_password.clone());

            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)
                .map_err(|e| MailError::Transport(e.to_string()))?
                .credentials(creds)
                .port(config.smtp_port)
                .build()
        };

        Ok(Self {
            from: parse_mailbox(&config.from)?,
            to: parse_mailbox(&config.to)?,
            transport,
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send_notification(&self, subject: &str, body: &str) -> MailResult<()> {
        let email = Message::builder()
            .from(self.from.clone())
            .to(self.to.clone())
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(body.to_string())
            .map_err(|e| MailError::Build(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| MailError::Send(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sender_rejected() {
        let config = MailConfig {
            enabled: true,
            from: "not an address".into(),
            ..Default::default()
        };
        assert!(matches!(
            SmtpNotifier::new(config),
            Err(MailError::InvalidAddress { .. })
        ));
    }

    #[tokio::test]
    async fn test_default_config_builds() {
        let config = MailConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(SmtpNotifier::new(config).is_ok());
    }
}
