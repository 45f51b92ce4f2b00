//! # Notification Mail
//!
//! Best-effort notification sent after a bicycle has been created.

mod config;
mod errors;
mod notifier;
mod smtp;

pub use config::MailConfig;
pub use errors::{MailError, MailResult};
pub use notifier::{creation_notice, NoopNotifier, Notifier, RecordingNotifier};
pub use smtp::SmtpNotifier;

use std::sync::Arc;

/// Create a notifier based on config
pub fn create_notifier(config: &MailConfig) -> MailResult<Arc<dyn Notifier>> {
    if config.enabled {
        Ok(Arc::new(SmtpNotifier::new(config.clone())?))
    } else {
        Ok(Arc::new(NoopNotifier))
    }
}
