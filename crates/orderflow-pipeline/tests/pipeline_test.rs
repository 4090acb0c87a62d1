//! End-to-end tests for the order processing pipeline.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use orderflow_core::pricing::FixedRate;
use orderflow_core::{
    Address, Item, Modifier, Money, Order, OrderKind, OrderSummary, PricingError,
    SmartPriceCalculator, ValidationError,
};
use orderflow_pipeline::{
    CachedOrderRepository, DeliveryReport, InMemoryOrderRepository, NotificationError,
    NotificationResult, NotificationService, Notifier, OrderProcessor, OrderRepository,
    PipelineConfig, ProcessError, RecordingNotifier, RepositoryError, RepositoryResult, Stage,
};

// =============================================================================
// Test Doubles
// =============================================================================

/// Repository that counts calls and optionally fails every save.
#[derive(Default)]
struct SpyRepository {
    saves: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl OrderRepository for SpyRepository {
    async fn save(&self, order: &Order, _total: Money) -> RepositoryResult<()> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::Unavailable(format!("cannot store {}", order.id)));
        }
        Ok(())
    }

    async fn exists(&self, _order_id: &str) -> bool {
        false
    }
}

/// Notification stage that counts calls and optionally fails outright.
#[derive(Default)]
struct SpyNotificationService {
    calls: AtomicUsize,
    fail: bool,
}

#[async_trait]
impl NotificationService for SpyNotificationService {
    async fn notify_all(
        &self,
        _summary: &OrderSummary,
        _order: &Order,
    ) -> NotificationResult<DeliveryReport> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(NotificationError::send_failed("all", "broker down"));
        }
        Ok(DeliveryReport::default())
    }
}

struct BrokenChannel;

#[async_trait]
impl Notifier for BrokenChannel {
    fn channel(&self) -> &str {
        "email"
    }

    async fn notify(&self, _recipient: &str, _subject: &str, _body: &str) -> NotificationResult<()> {
        Err(NotificationError::send_failed("email", "smtp timeout"))
    }
}

// =============================================================================
// Fixtures
// =============================================================================

struct Harness {
    processor: OrderProcessor,
    backing: Arc<InMemoryOrderRepository>,
    channels: Vec<Arc<RecordingNotifier>>,
}

fn harness() -> Harness {
    let backing = Arc::new(InMemoryOrderRepository::new());
    let channels: Vec<Arc<RecordingNotifier>> = ["email", "telegram", "log"]
        .into_iter()
        .map(|name| Arc::new(RecordingNotifier::new(name)))
        .collect();

    let mut builder = OrderProcessor::builder(PipelineConfig::default()).with_repository(backing.clone());
    for channel in &channels {
        builder = builder.with_channel(channel.clone());
    }

    Harness {
        processor: builder.build().unwrap(),
        backing,
        channels,
    }
}

fn laptop_order() -> Order {
    Order::new("ORD-001", OrderKind::Premium, "a@b.com", Address::in_city("New York"))
        .with_item(Item::new("1", "Laptop", Money::from_major_minor(1500, 0)))
        .with_card("Gold")
}

fn spied_processor(
    repository: Arc<SpyRepository>,
    notifier: Arc<SpyNotificationService>,
) -> OrderProcessor {
    OrderProcessor::builder(PipelineConfig::default())
        .with_uncached_repository(repository)
        .with_notifier(notifier)
        .build()
        .unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_premium_gold_order_end_to_end() {
    let h = harness();

    let processed = h.processor.process(&laptop_order()).await.unwrap();

    assert_eq!(processed.summary.order_id, "ORD-001");
    assert_eq!(processed.summary.total, Money::from_cents(137_700));
    assert!(processed.delivery.is_complete());
    assert_eq!(processed.delivery.delivered(), 3);

    assert_eq!(h.backing.count_for("ORD-001").await, 1);
    assert_eq!(h.backing.records().await[0].total.to_string(), "$1377.00");

    for channel in &h.channels {
        assert_eq!(channel.count().await, 1);
    }
    let sent = h.channels[0].messages().await;
    let confirmation = &sent[0];
    assert_eq!(confirmation.recipient, "a@b.com");
    assert_eq!(confirmation.body, "Your order ORD-001 is confirmed! Total: $1377.00");
    assert_eq!(
        h.channels[1].messages().await[0].body,
        "New order: ORD-001 | Total: $1377.00 | Client: a@b.com"
    );
}

#[tokio::test]
async fn test_empty_order_has_no_side_effects() {
    let repository = Arc::new(SpyRepository::default());
    let notifier = Arc::new(SpyNotificationService::default());
    let processor = spied_processor(repository.clone(), notifier.clone());

    let order = Order::new("ORD-E", OrderKind::Standard, "a@b.com", Address::in_city("X"));
    let err = processor.process(&order).await.unwrap_err();

    assert!(matches!(err, ProcessError::Validation(ValidationError::EmptyOrder)));
    assert_eq!(err.stage(), Stage::Validation);
    assert_eq!(err.to_string(), "validation error: order must have at least one item");
    assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unknown_order_kind_stops_before_persistence() {
    let repository = Arc::new(SpyRepository::default());
    let notifier = Arc::new(SpyNotificationService::default());
    let processor = spied_processor(repository.clone(), notifier.clone());

    let order = Order::new("ORD-X", "Express", "a@b.com", Address::in_city("Lyon"))
        .with_item(Item::new("1", "Box", Money::from_cents(100)))
        .with_card("Silver");
    let err = processor.process(&order).await.unwrap_err();

    assert!(matches!(
        err,
        ProcessError::Calculation(PricingError::UnknownOrderKind(ref tag)) if tag == "Express"
    ));
    assert_eq!(err.to_string(), "calculation error: unknown order type: Express");
    assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_overflowing_total_stops_before_persistence() {
    let repository = Arc::new(SpyRepository::default());
    let notifier = Arc::new(SpyNotificationService::default());
    let processor = spied_processor(repository.clone(), notifier.clone());

    let order = Order::new("ORD-BIG", OrderKind::International, "a@b.com", Address::in_city("Lima"))
        .with_item(Item::new("1", "Freighter", Money::from_cents(i64::MAX / 4 * 3)));
    let err = processor.process(&order).await.unwrap_err();

    assert!(matches!(err, ProcessError::Calculation(PricingError::AmountOverflow)));
    assert_eq!(err.stage(), Stage::Calculation);
    assert_eq!(repository.saves.load(Ordering::SeqCst), 0);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_repository_failure_skips_notification() {
    let repository = Arc::new(SpyRepository {
        fail: true,
        ..Default::default()
    });
    let notifier = Arc::new(SpyNotificationService::default());
    let processor = spied_processor(repository.clone(), notifier.clone());

    let err = processor.process(&laptop_order()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Repository);
    assert_eq!(
        err.to_string(),
        "repository error: repository unavailable: cannot store ORD-001"
    );
    assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
    assert_eq!(notifier.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_notification_stage_failure_after_persist() {
    let repository = Arc::new(SpyRepository::default());
    let notifier = Arc::new(SpyNotificationService {
        fail: true,
        ..Default::default()
    });
    let processor = spied_processor(repository.clone(), notifier.clone());

    let err = processor.process(&laptop_order()).await.unwrap_err();

    assert_eq!(err.stage(), Stage::Notification);
    assert!(err.after_persistence());
    assert_eq!(repository.saves.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_failing_channel_does_not_fail_process() {
    let backing = Arc::new(InMemoryOrderRepository::new());
    let telegram = Arc::new(RecordingNotifier::new("telegram"));
    let log = Arc::new(RecordingNotifier::new("log"));

    let processor = OrderProcessor::builder(PipelineConfig::default())
        .with_repository(backing.clone())
        .with_channel(Arc::new(BrokenChannel))
        .with_channel(telegram.clone())
        .with_channel(log.clone())
        .build()
        .unwrap();

    let processed = processor.process(&laptop_order()).await.unwrap();

    assert_eq!(processed.delivery.failed(), 1);
    assert_eq!(processed.delivery.delivered(), 2);
    assert_eq!(telegram.count().await, 1);
    assert_eq!(log.count().await, 1);
    assert_eq!(backing.record_count().await, 1);
}

#[tokio::test]
async fn test_reprocessing_persists_once() {
    let h = harness();
    let order = laptop_order();

    h.processor.process(&order).await.unwrap();
    h.processor.process(&order).await.unwrap();

    assert_eq!(h.backing.count_for("ORD-001").await, 1);
    assert_eq!(h.channels[2].count().await, 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_processing_of_same_order() {
    let backing = Arc::new(InMemoryOrderRepository::new());
    let cached = Arc::new(CachedOrderRepository::new(backing.clone()));
    let processor = OrderProcessor::builder(PipelineConfig::default())
        .with_uncached_repository(cached.clone())
        .build()
        .unwrap();

    let handles: Vec<_> = (0..50)
        .map(|_| {
            let processor = processor.clone();
            tokio::spawn(async move { processor.process(&laptop_order()).await })
        })
        .collect();

    for handle in handles {
        assert!(handle.await.unwrap().is_ok());
    }

    assert_eq!(backing.record_count().await, 1);
    assert_eq!(cached.cached_count().await, 1);
    assert!(cached.exists("ORD-001").await);
}

#[tokio::test]
async fn test_batch_continues_past_failures() {
    let h = harness();

    let orders = vec![
        laptop_order(),
        Order::new("ORD-EMPTY", OrderKind::Standard, "a@b.com", Address::in_city("X")),
        Order::new("ORD-B", OrderKind::Budget, "b@c.com", Address::in_city("Porto"))
            .with_item(Item::new("1", "Pen", Money::from_cents(150))),
    ];

    let results = h.processor.process_batch(&orders).await;

    assert_eq!(results.len(), 3);
    assert!(results[0].is_ok());
    assert!(matches!(results[1], Err(ProcessError::Validation(ValidationError::EmptyOrder))));
    assert_eq!(results[2].as_ref().unwrap().summary.total.cents(), 150);
    assert_eq!(h.backing.record_count().await, 2);
}

#[tokio::test]
async fn test_runtime_registered_kind_flows_through() {
    let calculator = Arc::new(SmartPriceCalculator::new());
    let processor = OrderProcessor::builder(PipelineConfig::default())
        .with_repository(Arc::new(InMemoryOrderRepository::new()))
        .with_calculator(calculator.clone())
        .build()
        .unwrap();

    let order = Order::new("ORD-EXP", "Express", "a@b.com", Address::in_city("Oslo"))
        .with_item(Item::new("1", "Parcel", Money::from_cents(10_000)));
    assert!(processor.process(&order).await.is_err());

    calculator.register_order_strategy("Express", Arc::new(FixedRate::new(Modifier::from_bps(13_000))));

    let processed = processor.process(&order).await.unwrap();
    assert_eq!(processed.summary.total.cents(), 13_000);
}
