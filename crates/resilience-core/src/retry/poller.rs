//! Predicate polling
//!
//! Polls a boolean check until it reaches a target value. A miss is treated
//! as a retryable failure whose message is the poll's label, so budget,
//! delay and notification follow the engine's rules exactly.

use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use super::engine::ResilienceRetry;
use super::error::RetryError;
use super::observer::RetryObserver;
use super::outcome::Failure;

/// A labelled check target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Poll<'a> {
    label: &'a str,
    target: bool,
}

impl<'a> Poll<'a> {
    /// Poll until the check reports `true`
    pub fn until_true(label: &'a str) -> Self {
        Self {
            label,
            target: true,
        }
    }

    /// Poll until the check reports `false`
    pub fn until_false(label: &'a str) -> Self {
        Self {
            label,
            target: false,
        }
    }

    /// Diagnostic label reported on every miss
    pub fn label(&self) -> &'a str {
        self.label
    }

    /// Value the check has to reach
    pub fn target(&self) -> bool {
        self.target
    }

    /// Turn one observed value into an attempt outcome
    pub fn evaluate(&self, observed: bool) -> Result<(), Failure<Infallible>> {
        if observed == self.target {
            Ok(())
        } else {
            Err(Failure::retry(self.label))
        }
    }
}

impl<O: RetryObserver> ResilienceRetry<O> {
    /// Poll `check` until it returns `true`
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use resilience_core::retry::ResilienceRetry;
    ///
    /// let retry = ResilienceRetry::new();
    /// let mut polls = 0;
    ///
    /// retry
    ///     .until_true("waiting for file", || { polls += 1; polls == 2 }, Duration::ZERO, 3)
    ///     .unwrap();
    /// ```
    pub fn until_true<F>(
        &self,
        label: &str,
        check: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<Infallible>>
    where
        F: FnMut() -> bool,
    {
        self.poll(Poll::until_true(label), check, delay, attempts)
    }

    /// Poll `check` until it returns `false`
    pub fn until_false<F>(
        &self,
        label: &str,
        check: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<Infallible>>
    where
        F: FnMut() -> bool,
    {
        self.poll(Poll::until_false(label), check, delay, attempts)
    }

    /// Suspending counterpart of [`until_true`](Self::until_true)
    pub async fn until_true_async<F, Fut>(
        &self,
        label: &str,
        check: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<Infallible>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.poll_async(Poll::until_true(label), check, delay, attempts)
            .await
    }

    /// Suspending counterpart of [`until_false`](Self::until_false)
    pub async fn until_false_async<F, Fut>(
        &self,
        label: &str,
        check: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<Infallible>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.poll_async(Poll::until_false(label), check, delay, attempts)
            .await
    }

    /// Run a blocking poll
    pub fn poll<F>(
        &self,
        poll: Poll<'_>,
        mut check: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<Infallible>>
    where
        F: FnMut() -> bool,
    {
        self.perform(|| poll.evaluate(check()), delay, attempts)
    }

    /// Run a suspending poll
    pub async fn poll_async<F, Fut>(
        &self,
        poll: Poll<'_>,
        mut check: F,
        delay: Duration,
        attempts: u32,
    ) -> Result<(), RetryError<Infallible>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = bool>,
    {
        self.perform_async(
            || {
                let observed = check();
                async move { poll.evaluate(observed.await) }
            },
            delay,
            attempts,
        )
        .await
    }
}
