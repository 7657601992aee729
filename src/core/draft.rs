use chrono::{Local, SecondsFormat};
use serde_json::{Value, json};
use thiserror::Error;

/// Delivery channels the backend understands.
pub const CHANNEL_EMAIL: &str = "email";
pub const CHANNEL_STDOUT: &str = "stdout";
pub const CHANNEL_TELEGRAM: &str = "telegram";

/// Precondition failures caught locally, before any network call. Anything
/// beyond these required-field checks is the backend's job.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("email address is required")]
    MissingRecipients,
    #[error("subject is required")]
    MissingSubject,
}

/// A notification waiting to be submitted.
#[derive(Debug, Clone)]
pub struct NotificationDraft {
    /// Delivery channel, normalized to lowercase.
    pub channel: String,
    pub message: String,
    /// Scheduled send time, ISO-8601 with UTC offset.
    pub send_at: String,
    /// Email-only: subject line.
    pub subject: String,
    /// Email-only: recipient addresses.
    pub send_to: Vec<String>,
}

impl NotificationDraft {
    pub fn new(channel: &str, message: impl Into<String>) -> Self {
        Self {
            channel: channel.to_lowercase(),
            message: message.into(),
            send_at: default_send_at(),
            subject: String::new(),
            send_to: Vec::new(),
        }
    }

    pub fn is_email(&self) -> bool {
        self.channel == CHANNEL_EMAIL
    }

    /// Parse a comma-separated recipient list: entries trimmed, empties
    /// dropped.
    pub fn set_recipients(&mut self, raw: &str) {
        self.send_to = raw
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(String::from)
            .collect();
    }

    /// Required-field checks for the email channel. Other channels pass
    /// unchecked.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.is_email() {
            if self.send_to.is_empty() {
                return Err(DraftError::MissingRecipients);
            }
            if self.subject.is_empty() {
                return Err(DraftError::MissingSubject);
            }
        }
        Ok(())
    }

    /// JSON body for the create request. Email-only fields are sent only on
    /// the email channel.
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "channel": self.channel,
            "message": self.message,
            "send_at": self.send_at,
        });
        if self.is_email() {
            payload["subject"] = json!(self.subject);
            payload["send_to"] = json!(self.send_to);
        }
        payload
    }
}

/// Local wall-clock time with UTC offset — the pre-populated send-at
/// default, editable before submission.
pub fn default_send_at() -> String {
    Local::now().to_rfc3339_opts(SecondsFormat::Secs, false)
}
