use serde::{Deserialize, Serialize};

/// Notification mail configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MailConfig {
    /// Send mails at all (default: false)
    #[serde(default)]
    pub enabled: bool,

    /// SMTP server host
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,

    /// SMTP server port
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username; empty means no authentication and no TLS
    #[serde(default)]
    pub smtp_user: String,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: String,

    /// Sender mailbox
    #[serde(default = "default_from")]
    pub from: String,

    /// Recipient mailbox
    #[serde(default = "default_to")]
    pub to: String,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from() -> String {
    "Fahrrad Service <noreply@fahrrad.local>".to_string()
}

fn default_to() -> String {
    "Catalog Admin <admin@fahrrad.local>".to_string()
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_user: String::new(),
            smtp_password: String::new(),
            from: default_from(),
            to: default_to(),
        }
    }
}
