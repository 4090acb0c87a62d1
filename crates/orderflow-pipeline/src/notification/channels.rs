//! Reference notification channels.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::info;

use super::Notifier;
use crate::error::NotificationResult;

// -----------------------------------------------------------------------------
// Tracing channel
// -----------------------------------------------------------------------------

/// Writes each message as a structured `tracing` event.
#[derive(Debug, Clone)]
pub struct TracingNotifier {
    channel: String,
}

impl TracingNotifier {
    pub fn new(channel: impl Into<String>) -> Self {
        TracingNotifier {
            channel: channel.into(),
        }
    }
}

impl Default for TracingNotifier {
    fn default() -> Self {
        Self::new("log")
    }
}

#[async_trait]
impl Notifier for TracingNotifier {
    fn channel(&self) -> &str {
        &self.channel
    }

    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> NotificationResult<()> {
        info!(
            channel = %self.channel,
            recipient = %recipient,
            subject = %subject,
            body = %body,
            "Notification sent"
        );
        Ok(())
    }
}

// -----------------------------------------------------------------------------
// Recording channel
// -----------------------------------------------------------------------------

/// A message captured by [`RecordingNotifier`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
    pub sent_at: DateTime<Utc>,
}

/// Keeps every delivered message in memory.
#[derive(Debug)]
pub struct RecordingNotifier {
    channel: String,
    sent: Mutex<Vec<SentMessage>>,
}

impl RecordingNotifier {
    pub fn new(channel: impl Into<String>) -> Self {
        RecordingNotifier {
            channel: channel.into(),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub async fn messages(&self) -> Vec<SentMessage> {
        self.sent.lock().await.clone()
    }

    pub async fn count(&self) -> usize {
        self.sent.lock().await.len()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn channel(&self) -> &str {
        &self.channel
    }

    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> NotificationResult<()> {
        self.sent.lock().await.push(SentMessage {
            recipient: recipient.to_string(),
            subject: subject.to_string(),
            body: body.to_string(),
            sent_at: Utc::now(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_recording_notifier_captures() {
        let notifier = RecordingNotifier::new("email");
        notifier.notify("a@b.com", "Hi", "Body").await.unwrap();

        assert_eq!(notifier.channel(), "email");
        let messages = notifier.messages().await;
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].recipient, "a@b.com");
        assert_eq!(messages[0].subject, "Hi");
    }

    #[tokio::test]
    async fn test_tracing_notifier_always_succeeds() {
        let notifier = TracingNotifier::default();
        assert_eq!(notifier.channel(), "log");
        assert!(notifier.notify("system", "ORDER_PROCESSED", "ok").await.is_ok());
    }
}
