//! # Pipeline Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError ──────► ProcessError::Validation   "validation error"  │
//! │  PricingError ─────────► ProcessError::Calculation  "calculation error" │
//! │  RepositoryError ──────► ProcessError::Repository   "repository error"  │
//! │  NotificationError ────► ProcessError::Notification "notification error"│
//! │                                                                         │
//! │  Channel failures inside the fan-out are recorded in the               │
//! │  DeliveryReport and never reach ProcessError.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use orderflow_core::{PricingError, ValidationError};
use thiserror::Error;

// =============================================================================
// Repository Error
// =============================================================================

/// Failures reported by a persistence collaborator.
///
/// The cached repository passes these through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The store rejected or failed to write the record.
    #[error("failed to save order {order_id}: {reason}")]
    WriteFailed { order_id: String, reason: String },

    /// The store could not be reached.
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

impl RepositoryError {
    pub fn write_failed(order_id: impl Into<String>, reason: impl Into<String>) -> Self {
        RepositoryError::WriteFailed {
            order_id: order_id.into(),
            reason: reason.into(),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

// =============================================================================
// Notification Error
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotificationError {
    #[error("notification failed on channel {channel}: {reason}")]
    SendFailed { channel: String, reason: String },
}

impl NotificationError {
    pub fn send_failed(channel: impl Into<String>, reason: impl Into<String>) -> Self {
        NotificationError::SendFailed {
            channel: channel.into(),
            reason: reason.into(),
        }
    }
}

pub type NotificationResult<T> = Result<T, NotificationError>;

// =============================================================================
// Process Error
// =============================================================================

/// Pipeline stage names, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Validation,
    Calculation,
    Repository,
    Notification,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Validation => write!(f, "validation"),
            Stage::Calculation => write!(f, "calculation"),
            Stage::Repository => write!(f, "repository"),
            Stage::Notification => write!(f, "notification"),
        }
    }
}

/// Error returned by `OrderProcessor::process`, tagged with the failing stage.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("validation error: {0}")]
    Validation(#[source] ValidationError),

    #[error("calculation error: {0}")]
    Calculation(#[source] PricingError),

    #[error("repository error: {0}")]
    Repository(#[source] RepositoryError),

    #[error("notification error: {0}")]
    Notification(#[source] NotificationError),
}

impl ProcessError {
    pub fn stage(&self) -> Stage {
        match self {
            ProcessError::Validation(_) => Stage::Validation,
            ProcessError::Calculation(_) => Stage::Calculation,
            ProcessError::Repository(_) => Stage::Repository,
            ProcessError::Notification(_) => Stage::Notification,
        }
    }

    /// True if the order may already be persisted.
    pub fn after_persistence(&self) -> bool {
        matches!(self, ProcessError::Notification(_))
    }
}

pub type ProcessResult<T> = Result<T, ProcessError>;

// =============================================================================
// Config Error
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid pipeline configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Unit Tests
// =============================================================================
