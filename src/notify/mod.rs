//! Outbound email notifications
//!
//! Delivery is always a post-commit side effect: callers hand a message to
//! [`deliver_in_background`] after their transaction has committed, and the
//! HTTP response never waits on SMTP. A failed delivery is logged and
//! retried a bounded number of times, then dropped.

use crate::config::EmailConfig;
use crate::utils::error::{ForumError, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

const DELIVERY_ATTEMPTS: u32 = 3;
const RETRY_DELAY: Duration = Duration::from_secs(5);

/// Sender of a single email message
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()>;
}

/// SMTP-backed notifier using STARTTLS on the configured relay
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
}

impl SmtpNotifier {
    pub fn new(config: &EmailConfig) -> Result<Self> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| ForumError::Email(format!("Invalid SMTP relay: {e}")))?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        Ok(Self {
            transport: builder.build(),
            from_address: config.from_address.clone(),
        })
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, html_body: &str) -> Result<()> {
        let message = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|e| ForumError::Email(format!("Invalid from address: {e}")))?,
            )
            .to(to
                .parse()
                .map_err(|e| ForumError::Email(format!("Invalid recipient: {e}")))?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html_body.to_string())
            .map_err(|e| ForumError::Email(format!("Failed to build message: {e}")))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ForumError::Email(format!("SMTP delivery failed: {e}")))?;

        debug!("Email sent to {}", to);
        Ok(())
    }
}

/// No-op notifier used when email is disabled
pub struct NullNotifier;

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, to: &str, subject: &str, _html_body: &str) -> Result<()> {
        info!("Email disabled, dropping message to {}: {}", to, subject);
        Ok(())
    }
}

/// Build the notifier matching the email configuration
pub fn build_notifier(config: &EmailConfig) -> Result<Arc<dyn Notifier>> {
    if config.enabled {
        info!("SMTP notifications enabled via {}", config.smtp_host);
        Ok(Arc::new(SmtpNotifier::new(config)?))
    } else {
        info!("Email notifications disabled");
        Ok(Arc::new(NullNotifier))
    }
}

/// Spawn a detached delivery task with bounded retries
pub fn deliver_in_background(
    notifier: Arc<dyn Notifier>,
    to: String,
    subject: String,
    html_body: String,
) {
    tokio::spawn(async move {
        for attempt in 1..=DELIVERY_ATTEMPTS {
            match notifier.send(&to, &subject, &html_body).await {
                Ok(()) => return,
                Err(e) if attempt < DELIVERY_ATTEMPTS => {
                    warn!(
                        "Email delivery attempt {}/{} failed: {}",
                        attempt, DELIVERY_ATTEMPTS, e
                    );
                    tokio::time::sleep(RETRY_DELAY).await;
                }
                Err(e) => {
                    error!(
                        "Giving up on email to {} after {} attempts: {}",
                        to, DELIVERY_ATTEMPTS, e
                    );
                }
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_null_notifier_always_succeeds() {
        let notifier = NullNotifier;
        assert!(notifier
            .send("someone@example.com", "Subject", "<p>Body</p>")
            .await
            .is_ok());
    }

    #[test]
    fn test_disabled_config_builds_null_notifier() {
        let config = EmailConfig {
            enabled: false,
            ..Default::default()
        };
        assert!(build_notifier(&config).is_ok());
    }
}
