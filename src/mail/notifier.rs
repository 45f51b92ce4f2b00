//! Notification sink and the creation notice
//!
//! Delivery is best effort: callers log a failed send and carry on.

use std::sync::Mutex;

use async_trait::async_trait;

use super::errors::MailResult;
use crate::entity::FahrradDocument;

/// Sink for notification mails
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Send a notification with an HTML body
    async fn send_notification(&self, subject: &str, body: &str) -> MailResult<()>;
}

/// Subject and body announcing a new bicycle
pub fn creation_notice(doc: &FahrradDocument) -> (String, String) {
    (
        format!("New bicycle {}", doc.id),
        format!(
            "The bicycle with model <strong>{}</strong> has been created",
            doc.fahrrad.model
        ),
    )
}

/// Notifier used when mail is disabled
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopNotifier;

#[async_trait]
impl Notifier for NoopNotifier {
    async fn send_notification(&self, _subject: &str, _body: &str) -> MailResult<()> {
        Ok(())
    }
}

/// Notifier that keeps every message in memory
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<(String, String)>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far as `(subject, body)`
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_notification(&self, subject: &str, body: &str) -> MailResult<()> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push((subject.to_string(), body.to_string()));
        }
        Ok(())
    }
}
