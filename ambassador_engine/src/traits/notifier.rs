use std::future::Future;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn new<S: Into<String>>(to: S, subject: S, body: S) -> Self {
        Self { to: to.into(), subject: subject.into(), body: body.into() }
    }
}

#[derive(Debug, Clone, Error)]
pub enum NotifierError {
    #[error("Invalid e-mail address: {0}")]
    InvalidAddress(String),
    #[error("Could not build the message. {0}")]
    MessageBuild(String),
    #[error("Could not deliver the message. {0}")]
    DeliveryFailed(String),
}

/// A best-effort, fire-and-forget outbound message channel. Callers log failures; nothing is retried.
pub trait Notifier {
    fn send(&self, notification: Notification) -> impl Future<Output = Result<(), NotifierError>> + Send;
}
