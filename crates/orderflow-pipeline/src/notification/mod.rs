//! # Notification Module
//!
//! Delivers the messages that follow a successfully persisted order.
//!
//! ## Message Plan
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  #  Recipient              Subject               Body                   │
//! │  ─  ─────────────────────  ────────────────────  ─────────────────────  │
//! │  0  order.contact          Order Confirmation    Your order {id} is     │
//! │                                                  confirmed! Total: $x   │
//! │  1  manager_recipient      New Order Alert       New order: {id} |      │
//! │                                                  Total: $x | Client: c  │
//! │  2  audit_recipient        ORDER_PROCESSED       Order {id} processed   │
//! │                                                  successfully. Total: $x│
//! │                                                                         │
//! │  Message i goes to channel i. Extra channels get nothing; missing       │
//! │  channels drop the remaining messages.                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod channels;
mod composite;

pub use channels::{RecordingNotifier, SentMessage, TracingNotifier};
pub use composite::{ChannelOutcome, CompositeNotificationService, DeliveryReport, DeliveryStatus};

use async_trait::async_trait;
use orderflow_core::{Order, OrderSummary};
use serde::{Deserialize, Serialize};

use crate::config::NotificationSettings;
use crate::error::NotificationResult;

pub const SUBJECT_CONFIRMATION: &str = "Order Confirmation";
pub const SUBJECT_MANAGER_ALERT: &str = "New Order Alert";
pub const SUBJECT_AUDIT: &str = "ORDER_PROCESSED";

/// A single delivery channel (e-mail, chat bot, log...).
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs and delivery reports.
    fn channel(&self) -> &str;

    async fn notify(&self, recipient: &str, subject: &str, body: &str) -> NotificationResult<()>;
}

/// Contract for the notification stage.
#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn notify_all(
        &self,
        summary: &OrderSummary,
        order: &Order,
    ) -> NotificationResult<DeliveryReport>;
}

/// A composed message before it is assigned to a channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Builds the three messages for a processed order, in delivery order.
pub fn compose_messages(
    summary: &OrderSummary,
    order: &Order,
    settings: &NotificationSettings,
) -> [OutboundMessage; 3] {
    [
        OutboundMessage {
            recipient: order.contact.clone(),
            subject: SUBJECT_CONFIRMATION.to_string(),
            body: format!(
                "Your order {} is confirmed! Total: {}",
                summary.order_id, summary.total
            ),
        },
        OutboundMessage {
            recipient: settings.manager_recipient.clone(),
            subject: SUBJECT_MANAGER_ALERT.to_string(),
            body: format!(
                "New order: {} | Total: {} | Client: {}",
                summary.order_id, summary.total, order.contact
            ),
        },
        OutboundMessage {
            recipient: settings.audit_recipient.clone(),
            subject: SUBJECT_AUDIT.to_string(),
            body: format!(
                "Order {} processed successfully. Total: {}",
                summary.order_id, summary.total
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use orderflow_core::{Address, Money, OrderKind};

    #[test]
    fn test_compose_messages() {
        let order = Order::new("ORD-7", OrderKind::Premium, "a@b.com", Address::in_city("New York"));
        let summary = OrderSummary::new("ORD-7", Money::from_cents(137_700));

        let [customer, manager, audit] =
            compose_messages(&summary, &order, &NotificationSettings::default());

        assert_eq!(customer.recipient, "a@b.com");
        assert_eq!(customer.subject, "Order Confirmation");
        assert_eq!(customer.body, "Your order ORD-7 is confirmed! Total: $1377.00");

        assert_eq!(manager.recipient, "@warehouse_manager");
        assert_eq!(manager.subject, "New Order Alert");
        assert_eq!(manager.body, "New order: ORD-7 | Total: $1377.00 | Client: a@b.com");

        assert_eq!(audit.recipient, "system");
        assert_eq!(audit.subject, "ORDER_PROCESSED");
        assert_eq!(audit.body, "Order ORD-7 processed successfully. Total: $1377.00");
    }
}
