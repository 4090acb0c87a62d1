//! # Composite Notification Service
//!
//! Sends the composed messages over an ordered list of channels, one
//! message per channel, and reports what happened to each.
//!
//! ## Fan-out
//! ```text
//! messages:  [confirmation]   [manager alert]   [audit]
//!                  │                 │              │
//! channels:    channel 0         channel 1      channel 2     channel 3 ...
//!                  │                 │              │          (unused)
//!                  ▼                 ▼              ▼
//!             Delivered /       Delivered /    Delivered /
//!              Failed            Failed         Failed
//! ```
//!
//! A failed channel is logged and recorded; the remaining channels still
//! run and `notify_all` still returns `Ok`.

use std::sync::Arc;

use async_trait::async_trait;
use orderflow_core::{Order, OrderSummary};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::{compose_messages, NotificationService, Notifier};
use crate::config::NotificationSettings;
use crate::error::NotificationResult;

// =============================================================================
// Delivery Report
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeliveryStatus {
    Delivered,
    Failed { reason: String },
}

/// What happened to one message on one channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOutcome {
    pub channel: String,
    pub recipient: String,
    pub subject: String,
    #[serde(flatten)]
    pub status: DeliveryStatus,
}

impl ChannelOutcome {
    pub fn is_delivered(&self) -> bool {
        matches!(self.status, DeliveryStatus::Delivered)
    }
}

/// Per-channel results of one fan-out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryReport {
    /// One entry per attempted delivery, in channel order.
    pub outcomes: Vec<ChannelOutcome>,
    /// Messages dropped because there were fewer channels than messages.
    pub undelivered: usize,
}

impl DeliveryReport {
    pub fn delivered(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_delivered()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.delivered()
    }

    /// True when every message reached its channel successfully.
    pub fn is_complete(&self) -> bool {
        self.undelivered == 0 && self.failed() == 0
    }
}

// =============================================================================
// Composite Service
// =============================================================================

pub struct CompositeNotificationService {
    channels: Vec<Arc<dyn Notifier>>,
    settings: NotificationSettings,
}

impl CompositeNotificationService {
    /// Creates a service with the default internal recipients.
    pub fn new(channels: Vec<Arc<dyn Notifier>>) -> Self {
        Self::with_settings(channels, NotificationSettings::default())
    }

    pub fn with_settings(channels: Vec<Arc<dyn Notifier>>, settings: NotificationSettings) -> Self {
        CompositeNotificationService { channels, settings }
    }

    pub fn channel_names(&self) -> Vec<&str> {
        self.channels.iter().map(|c| c.channel()).collect()
    }

    pub fn settings(&self) -> &NotificationSettings {
        &self.settings
    }
}

impl std::fmt::Debug for CompositeNotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeNotificationService")
            .field("channels", &self.channel_names())
            .field("settings", &self.settings)
            .finish()
    }
}

#[async_trait]
impl NotificationService for CompositeNotificationService {
    async fn notify_all(
        &self,
        summary: &OrderSummary,
        order: &Order,
    ) -> NotificationResult<DeliveryReport> {
        let messages = compose_messages(summary, order, &self.settings);
        let mut report = DeliveryReport {
            outcomes: Vec::with_capacity(messages.len().min(self.channels.len())),
            undelivered: messages.len().saturating_sub(self.channels.len()),
        };

        for (message, channel) in messages.iter().zip(&self.channels) {
            let status = match channel
                .notify(&message.recipient, &message.subject, &message.body)
                .await
            {
                Ok(()) => {
                    debug!(
                        order_id = %summary.order_id,
                        channel = %channel.channel(),
                        subject = %message.subject,
                        "Notification delivered"
                    );
                    DeliveryStatus::Delivered
                }
                Err(e) => {
                    warn!(
                        order_id = %summary.order_id,
                        channel = %channel.channel(),
                        recipient = %message.recipient,
                        error = %e,
                        "Failed to notify"
                    );
                    DeliveryStatus::Failed {
                        reason: e.to_string(),
                    }
                }
            };

            report.outcomes.push(ChannelOutcome {
                channel: channel.channel().to_string(),
                recipient: message.recipient.clone(),
                subject: message.subject.clone(),
                status,
            });
        }

        if report.undelivered > 0 {
            warn!(
                order_id = %summary.order_id,
                dropped = report.undelivered,
                "Not enough channels for all notifications"
            );
        }

        Ok(report)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
