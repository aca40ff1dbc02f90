use crate::config::email::{portal_url, EmailConfig};
use crate::error::NotificationError;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::future::Future;

/// Anything that can deliver a plain-text email. The notifier worker is
/// generic over this so tests can swap SMTP out.
pub trait Mailer: Send + Sync + 'static {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send;
}

#[derive(Clone)]
pub struct EmailService {
    transport: Option<AsyncSmtpTransport<Tokio1Executor>>,
    from_address: Option<String>,
    portal_url: String,
}

impl EmailService {
    /// Build from environment variables. If SMTP is not configured, email
    /// sending is silently skipped (graceful degradation).
    pub fn from_env() -> Self {
        match EmailConfig::from_env() {
            Some(cfg) => {
                let creds = Credentials::new(cfg.smtp_username.clone(), cfg.smtp_password.clone());
                let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(&cfg.smtp_host)
                    .map(|builder| builder.port(cfg.smtp_port).credentials(creds).build());

                match transport {
                    Ok(t) => Self {
                        transport: Some(t),
                        from_address: Some(cfg.from_address),
                        portal_url: cfg.portal_url,
                    },
                    Err(e) => {
                        tracing::warn!("Failed to build SMTP transport: {e}");
                        Self::disabled()
                    }
                }
            }
            None => Self::disabled(),
        }
    }

    pub fn disabled() -> Self {
        Self {
            transport: None,
            from_address: None,
            portal_url: portal_url(),
        }
    }

    /// Returns true if SMTP is configured and available.
    pub fn is_configured(&self) -> bool {
        self.transport.is_some()
    }

    async fn send_email(&self, to: &str, subject: &str, body: &str) -> Result<(), NotificationError> {
        let transport = match &self.transport {
            Some(t) => t,
            None => {
                tracing::debug!("SMTP not configured, skipping email to {to}");
                return Ok(());
            }
        };
        let from_address = match &self.from_address {
            Some(f) => f,
            None => return Ok(()),
        };

        let from_mailbox: Mailbox = from_address.parse().map_err(
            |e: lettre::address::AddressError| NotificationError::Address {
                address: from_address.clone(),
                reason: e.to_string(),
            },
        )?;
        let to_mailbox: Mailbox =
            to.trim()
                .parse()
                .map_err(|e: lettre::address::AddressError| NotificationError::Address {
                    address: to.to_string(),
                    reason: e.to_string(),
                })?;

        let body = format!(
            "{}\n\n--\nThis notification was sent from the Campus Lost & Found portal: {}",
            body, self.portal_url
        );
        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;

        transport.send(email).await?;
        tracing::info!("Email sent to {to}: {subject}");
        Ok(())
    }
}

impl Mailer for EmailService {
    fn send(
        &self,
        to: &str,
        subject: &str,
        body: &str,
    ) -> impl Future<Output = Result<(), NotificationError>> + Send {
        self.send_email(to, subject, body)
    }
}
