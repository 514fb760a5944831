//! Retry execution engine
//!
//! This module provides the bounded attempt loop with a fixed delay, in
//! blocking and suspending forms, for void and value-returning operations.

use std::future::Future;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use chrono::Local;

use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::outcome::{Failure, Verdict};

/// Retry engine bound to a notification hook
///
/// The engine holds nothing but its observer; every call keeps its own
/// attempt bookkeeping, so one engine can serve concurrent callers.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use resilience_core::retry::{Failure, ResilienceRetry, RetryError, TracingObserver};
///
/// let retry = ResilienceRetry::with_observer(TracingObserver::new("download"));
/// let mut calls = 0;
///
/// let value: Result<u32, RetryError<std::io::Error>> = retry.perform_return(
///     || {
///         calls += 1;
///         if calls < 3 {
///             Err(Failure::retry("not ready"))
///         } else {
///             Ok(calls)
///         }
///     },
///     Duration::from_millis(1),
///     3,
/// );
///
/// assert_eq!(value.unwrap(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResilienceRetry<O = NoOpObserver> {
    observer: O,
}

impl ResilienceRetry<NoOpObserver> {
    /// Create an engine that notifies nobody
    pub fn new() -> Self {
        Self {
            observer: NoOpObserver,
        }
    }
}

impl<O: RetryObserver> ResilienceRetry<O> {
    /// Create an engine wired to the given observer
    pub fn with_observer(observer: O) -> Self {
        Self { observer }
    }

    /// Get the observer
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Run a blocking operation until it succeeds or the budget runs out
    ///
    /// # Arguments
    ///
    /// * `op` - The operation; `Failure::Retryable` requests another attempt
    /// * `delay` - Fixed wait between a failed attempt and the next
    /// * `attempts` - Total executions permitted, first try included
    pub fn perform<F, E>(&self, op: F, delay: Duration, attempts: u32) -> Result<(), RetryError<E>>
    where
        F: FnMut() -> Result<(), Failure<E>>,
    {
        self.perform_return(op, delay, attempts)
    }

    /// Run a blocking operation and return the value it eventually produces
    ///
    /// Sleeps on the calling thread between attempts.
    pub fn perform_return<F, T, E>(
        &self,
        mut op: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, Failure<E>>,
    {
        let mut budget = AttemptBudget::new(attempts, delay)?;

        loop {
            budget.begin();

            match op() {
                Ok(value) => {
                    budget.succeeded();
                    return Ok(value);
                }
                Err(failure) => {
                    let wait = budget.record_failure(failure, &self.observer)?;
                    if !wait.is_zero() {
                        std::thread::sleep(wait);
                    }
                }
            }
        }
    }

    /// Suspending counterpart of [`perform`](Self::perform)
    pub async fn perform_async<F, Fut, E>(
        &self,
        op: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<(), Failure<E>>>,
    {
        self.perform_return_async(op, delay, attempts).await
    }

    /// Suspending counterpart of [`perform_return`](Self::perform_return)
    ///
    /// Both the operation and the delay are awaited, so the calling task
    /// yields to the runtime instead of holding a worker thread.
    pub async fn perform_return_async<F, Fut, T, E>(
        &self,
        mut op: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Failure<E>>>,
    {
        let mut budget = AttemptBudget::new(attempts, delay)?;

        loop {
            budget.begin();

            match op().await {
                Ok(value) => {
                    budget.succeeded();
                    return Ok(value);
                }
                Err(failure) => {
                    let wait = budget.record_failure(failure, &self.observer)?;
                    if !wait.is_zero() {
                        tokio::time::sleep(wait).await;
                    }
                }
            }
        }
    }
}

/// Per-call attempt bookkeeping shared by the blocking and suspending loops
#[derive(Debug)]
struct AttemptBudget {
    max_attempts: u32,
    attempt: u32,
    delay: Duration,
    start: Instant,
}

impl AttemptBudget {
    fn new<E>(max_attempts: u32, delay: Duration) -> Result<Self, RetryError<E>> {
        if max_attempts == 0 {
            return Err(RetryError::InvalidAttempts);
        }

        Ok(Self {
            max_attempts,
            attempt: 0,
            delay,
            start: Instant::now(),
        })
    }

    fn begin(&mut self) {
        self.attempt += 1;
        tracing::debug!(
            attempt = self.attempt,
            max_attempts = self.max_attempts,
            "starting attempt"
        );
    }

    fn succeeded(&self) {
        let total_duration_ms = self.start.elapsed().as_millis() as u64;
        if self.attempt > 1 {
            tracing::info!(
                attempt = self.attempt,
                total_duration_ms,
                "succeeded after retry"
            );
        } else {
            tracing::debug!(duration_ms = total_duration_ms, "succeeded on first attempt");
        }
    }

    /// Decide what follows a failed attempt
    ///
    /// Returns the delay to wait before the next attempt, or the terminal
    /// error that ends the call.
    fn record_failure<E, O>(&self, failure: Failure<E>, observer: &O) -> Result<Duration, RetryError<E>>
    where
        O: RetryObserver,
    {
        match failure.classify() {
            Verdict::Propagate(error) => {
                tracing::warn!(
                    attempt = self.attempt,
                    "non-retryable failure, giving up without retrying"
                );
                Err(RetryError::non_retryable(error))
            }
            Verdict::Retry(message) => {
                notify(observer, &message);

                if self.attempt >= self.max_attempts {
                    tracing::error!(
                        attempts = self.attempt,
                        error = %message,
                        "all retry attempts exhausted"
                    );
                    return Err(RetryError::exhausted(message, self.attempt));
                }

                Ok(self.delay)
            }
        }
    }
}

/// Invoke the observer, containing any panic it raises
fn notify<O: RetryObserver>(observer: &O, message: &str) {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        observer.notify(message, Local::now())
    }));

    if outcome.is_err() {
        tracing::error!(error = %message, "retry observer panicked; notification dropped");
    }
}
