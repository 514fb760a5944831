//! Retry execution engine with a fixed delay and an attempt budget
//!
//! This module runs an operation, retries it while it reports a retryable
//! failure, and notifies an observer on every retry.
//!
//! # Features
//!
//! - Blocking and suspending entry points, for void and value-returning operations
//! - Predicate polling until a boolean check reaches a target value
//! - Fail-fast classification: only `Failure::Retryable` consumes budget
//! - Observable retries via the `RetryObserver` trait
//! - Built-in `TracingObserver` for logging
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use resilience_core::retry::{Failure, ResilienceRetry, RetryError, TracingObserver};
//!
//! async fn example() -> Result<String, RetryError<std::io::Error>> {
//!     let retry = ResilienceRetry::with_observer(TracingObserver::new("fetch"));
//!
//!     retry
//!         .perform_return_async(
//!             || async {
//!                 // Your fallible operation here
//!                 Ok::<_, Failure<std::io::Error>>("success".to_string())
//!             },
//!             Duration::from_millis(500),
//!             3,
//!         )
//!         .await
//! }
//! ```

mod engine;
mod error;
mod observer;
mod outcome;
mod poller;

pub use engine::ResilienceRetry;
pub use error::{RetryError, INVALID_ATTEMPTS_MESSAGE};
pub use observer::{FnObserver, NoOpObserver, RecordingObserver, RetryObserver, TracingObserver};
pub use outcome::Failure;
pub use poller::Poll;
