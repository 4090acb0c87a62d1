//! # Order Processor
//!
//! Runs one order through the fixed stage sequence.
//!
//! ## Stage Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       process(order)                                    │
//! │                                                                         │
//! │  ┌────────────┐   ┌────────────┐   ┌────────────┐   ┌────────────────┐ │
//! │  │  validate  │──►│ calculate  │──►│  persist   │──►│    notify      │ │
//! │  └─────┬──────┘   └─────┬──────┘   └─────┬──────┘   └───────┬────────┘ │
//! │        │ Err            │ Err            │ Err              │ Err      │
//! │        ▼                ▼                ▼                  ▼          │
//! │  "validation     "calculation     "repository       "notification     │
//! │   error: ..."     error: ..."      error: ..."       error: ..."      │
//! │                                                                         │
//! │  • No side effect before persist                                       │
//! │  • No retries, no rollback after persist                               │
//! │  • Channel failures end up in the DeliveryReport, not in the error     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use orderflow_core::{
    BasicOrderValidator, Order, OrderSummary, OrderValidator, PriceCalculator,
    SmartPriceCalculator,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::config::PipelineConfig;
use crate::error::{ConfigError, ConfigResult, ProcessError, ProcessResult};
use crate::notification::{
    CompositeNotificationService, DeliveryReport, NotificationService, Notifier,
};
use crate::repository::{CachedOrderRepository, OrderRepository};

/// Outcome of a successful `process` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessedOrder {
    pub summary: OrderSummary,
    pub delivery: DeliveryReport,
}

// =============================================================================
// Processor
// =============================================================================

/// Stateless orchestrator; clones share the same collaborators.
#[derive(Clone)]
pub struct OrderProcessor {
    validator: Arc<dyn OrderValidator>,
    calculator: Arc<dyn PriceCalculator>,
    repository: Arc<dyn OrderRepository>,
    notifier: Arc<dyn NotificationService>,
}

impl OrderProcessor {
    /// Wires the four stages as given. The repository is used as-is.
    pub fn new(
        validator: Arc<dyn OrderValidator>,
        calculator: Arc<dyn PriceCalculator>,
        repository: Arc<dyn OrderRepository>,
        notifier: Arc<dyn NotificationService>,
    ) -> Self {
        OrderProcessor {
            validator,
            calculator,
            repository,
            notifier,
        }
    }

    pub fn builder(config: PipelineConfig) -> OrderProcessorBuilder {
        OrderProcessorBuilder::new(config)
    }

    /// Validates, prices, persists and announces one order.
    #[instrument(skip(self, order), fields(order_id = %order.id))]
    pub async fn process(&self, order: &Order) -> ProcessResult<ProcessedOrder> {
        let result = self.run(order).await;

        match &result {
            Ok(processed) => info!(
                total = %processed.summary.total,
                delivered = processed.delivery.delivered(),
                "Order processed"
            ),
            Err(e) => warn!(stage = %e.stage(), error = %e, "Order processing failed"),
        }

        result
    }

    async fn run(&self, order: &Order) -> ProcessResult<ProcessedOrder> {
        self.validator
            .validate(order)
            .map_err(ProcessError::Validation)?;

        let total = self
            .calculator
            .calculate(order)
            .map_err(ProcessError::Calculation)?;

        self.repository
            .save(order, total)
            .await
            .map_err(ProcessError::Repository)?;

        let summary = OrderSummary::new(order.id.clone(), total);

        let delivery = self
            .notifier
            .notify_all(&summary, order)
            .await
            .map_err(ProcessError::Notification)?;

        Ok(ProcessedOrder { summary, delivery })
    }

    /// Processes orders one after another, continuing past failures.
    ///
    /// Returns one result per input order, in input order.
    pub async fn process_batch(&self, orders: &[Order]) -> Vec<ProcessResult<ProcessedOrder>> {
        let mut results = Vec::with_capacity(orders.len());
        for order in orders {
            results.push(self.process(order).await);
        }

        let failed = results.iter().filter(|r| r.is_err()).count();
        info!(total = orders.len(), failed, "Batch processed");

        results
    }
}

impl std::fmt::Debug for OrderProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderProcessor").finish_non_exhaustive()
    }
}

// =============================================================================
// Builder Pattern
// =============================================================================

/// Builder that fills unset stages from a [`PipelineConfig`].
///
/// ## Defaults
/// - validator: `BasicOrderValidator` with `config.validation`
/// - calculator: `SmartPriceCalculator::new()`
/// - notifier: `CompositeNotificationService` over the added channels,
///   with `config.notification`
/// - repository: required
pub struct OrderProcessorBuilder {
    config: PipelineConfig,
    validator: Option<Arc<dyn OrderValidator>>,
    calculator: Option<Arc<dyn PriceCalculator>>,
    repository: Option<Arc<dyn OrderRepository>>,
    channels: Vec<Arc<dyn Notifier>>,
    notifier: Option<Arc<dyn NotificationService>>,
}

impl OrderProcessorBuilder {
    pub fn new(config: PipelineConfig) -> Self {
        OrderProcessorBuilder {
            config,
            validator: None,
            calculator: None,
            repository: None,
            channels: Vec::new(),
            notifier: None,
        }
    }

    pub fn with_validator(mut self, validator: Arc<dyn OrderValidator>) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn with_calculator(mut self, calculator: Arc<dyn PriceCalculator>) -> Self {
        self.calculator = Some(calculator);
        self
    }

    /// Sets the backing store. It is wrapped in a `CachedOrderRepository`.
    pub fn with_repository(mut self, backing: Arc<dyn OrderRepository>) -> Self {
        self.repository = Some(Arc::new(CachedOrderRepository::new(backing)));
        self
    }

    /// Sets a repository that already handles duplicates. Used as-is.
    pub fn with_uncached_repository(mut self, repository: Arc<dyn OrderRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Appends a channel. Channel order decides which message it receives.
    pub fn with_channel(mut self, channel: Arc<dyn Notifier>) -> Self {
        self.channels.push(channel);
        self
    }

    /// Replaces the notification stage; added channels are then ignored.
    pub fn with_notifier(mut self, notifier: Arc<dyn NotificationService>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    pub fn build(self) -> ConfigResult<OrderProcessor> {
        self.config.validate()?;

        let repository = self
            .repository
            .ok_or_else(|| ConfigError::Invalid("Repository required".into()))?;

        let validator = self.validator.unwrap_or_else(|| {
            Arc::new(BasicOrderValidator::with_rules(self.config.validation.clone()))
        });

        let calculator = self
            .calculator
            .unwrap_or_else(|| Arc::new(SmartPriceCalculator::new()));

        let notifier = match self.notifier {
            Some(notifier) => notifier,
            None => Arc::new(CompositeNotificationService::with_settings(
                self.channels,
                self.config.notification.clone(),
            )),
        };

        Ok(OrderProcessor::new(validator, calculator, repository, notifier))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
