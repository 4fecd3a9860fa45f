//! Settlement notifications over SMTP.
//!
//! Messages are single-part plain text, relayed without authentication to the configured host. Delivery is best
//! effort; failures are returned to the caller, who logs them.
use ambassador_engine::traits::{Notification, Notifier, NotifierError};
use lettre::{
    message::{header::ContentType, Mailbox},
    AsyncSmtpTransport,
    AsyncTransport,
    Message,
    Tokio1Executor,
};
use log::*;

use crate::config::MailConfig;

#[derive(Clone)]
pub struct SmtpNotifier {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: String,
}

impl SmtpNotifier {
    pub fn new(config: &MailConfig) -> Self {
        let mailer =
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host).port(config.smtp_port).build();
        info!("📧️ Notifications will be relayed through {}:{}", config.smtp_host, config.smtp_port);
        Self { mailer, from: config.from.clone() }
    }
}

impl Notifier for SmtpNotifier {
    async fn send(&self, notification: Notification) -> Result<(), NotifierError> {
        let message = build_message(&self.from, &notification)?;
        self.mailer.send(message).await.map_err(|e| NotifierError::DeliveryFailed(e.to_string()))?;
        debug!("📧️ Sent \"{}\" to {}", notification.subject, notification.to);
        Ok(())
    }
}

fn build_message(from: &str, notification: &Notification) -> Result<Message, NotifierError> {
    let from = parse_mailbox(from)?;
    let to = parse_mailbox(&notification.to)?;
    Message::builder()
        .from(from)
        .to(to)
        .subject(notification.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(notification.body.clone())
        .map_err(|e| NotifierError::MessageBuild(e.to_string()))
}

fn parse_mailbox(address: &str) -> Result<Mailbox, NotifierError> {
    address.parse::<Mailbox>().map_err(|_| NotifierError::InvalidAddress(address.to_string()))
}
