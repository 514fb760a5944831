//! Retry notification hooks
//!
//! This module provides the `RetryObserver` trait, invoked once per consumed
//! retry attempt, and a `TracingObserver` implementation that logs using the
//! `tracing` crate.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Local};

/// Observer notified on every retry
///
/// Implementations are shared by every call made through one engine, and
/// calls may run concurrently, so `notify` must be safe to invoke from
/// several threads at once. The engine does not serialize calls to it.
///
/// # Example
///
/// ```rust
/// use chrono::{DateTime, Local};
/// use resilience_core::retry::RetryObserver;
///
/// struct MetricsObserver {
///     // Your metrics client here
/// }
///
/// impl RetryObserver for MetricsObserver {
///     fn notify(&self, message: &str, timestamp: DateTime<Local>) {
///         // Record retry metric
///         let _ = (message, timestamp);
///     }
/// }
/// ```
pub trait RetryObserver: Send + Sync {
    /// Called when a retryable failure consumed an attempt
    ///
    /// # Arguments
    ///
    /// * `message` - The retryable failure's message, or the poll label
    /// * `timestamp` - Local time at which the failure was observed
    fn notify(&self, message: &str, timestamp: DateTime<Local>);
}

/// A no-op observer that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpObserver;

impl RetryObserver for NoOpObserver {
    fn notify(&self, _message: &str, _timestamp: DateTime<Local>) {}
}

/// An observer that logs retries using the `tracing` crate at WARN
///
/// # Example
///
/// ```rust
/// use resilience_core::retry::TracingObserver;
///
/// // Create with operation name for better log context
/// let observer = TracingObserver::new("download");
/// ```
#[derive(Debug, Clone)]
pub struct TracingObserver {
    /// Name of the operation being retried (for log context)
    operation: String,
}

impl TracingObserver {
    /// Create a new tracing observer
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
        }
    }

    /// Get the operation name
    pub fn operation(&self) -> &str {
        &self.operation
    }
}

impl Default for TracingObserver {
    fn default() -> Self {
        Self::new("retry")
    }
}

impl RetryObserver for TracingObserver {
    fn notify(&self, message: &str, timestamp: DateTime<Local>) {
        tracing::warn!(
            operation = %self.operation,
            "Retrying due to: {} at {}",
            message,
            timestamp.time()
        );
    }
}

/// An observer that records every notification
///
/// Useful for testing and metrics collection.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<(String, DateTime<Local>)>>,
}

impl RecordingObserver {
    /// Create a new recording observer
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications received
    pub fn count(&self) -> usize {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    /// Messages received, in order
    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(message, _)| message.clone())
            .collect()
    }

    /// Timestamps received, in order
    pub fn timestamps(&self) -> Vec<DateTime<Local>> {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .iter()
            .map(|(_, at)| *at)
            .collect()
    }
}

impl RetryObserver for RecordingObserver {
    fn notify(&self, message: &str, timestamp: DateTime<Local>) {
        self.events
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push((message.to_string(), timestamp));
    }
}

/// An observer backed by a closure
pub struct FnObserver<F> {
    notify: F,
}

impl<F> FnObserver<F> {
    /// Create a new closure-based observer
    pub fn new(notify: F) -> Self {
        Self { notify }
    }
}

impl<F> RetryObserver for FnObserver<F>
where
    F: Fn(&str, DateTime<Local>) + Send + Sync,
{
    fn notify(&self, message: &str, timestamp: DateTime<Local>) {
        (self.notify)(message, timestamp)
    }
}

/// Implement RetryObserver for Arc<T> where T: RetryObserver
impl<T: RetryObserver + ?Sized> RetryObserver for Arc<T> {
    fn notify(&self, message: &str, timestamp: DateTime<Local>) {
        (**self).notify(message, timestamp)
    }
}

/// Implement RetryObserver for Box<T> where T: RetryObserver
impl<T: RetryObserver + ?Sized> RetryObserver for Box<T> {
    fn notify(&self, message: &str, timestamp: DateTime<Local>) {
        (**self).notify(message, timestamp)
    }
}
