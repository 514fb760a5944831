//! Error types for the retry execution engine
//!
//! Every call ends in success or in exactly one of the three terminal
//! variants below. Only [`Failure::Retryable`](super::Failure::Retryable)
//! is ever absorbed by the retry loop.

use std::error::Error;
use std::fmt;

/// Message carried by [`RetryError::InvalidAttempts`]
pub const INVALID_ATTEMPTS_MESSAGE: &str = "Retry count should be greater than zero";

/// Terminal errors of a retry call
///
/// The error type is generic over `E`, the non-retryable error type of the
/// operation being retried.
#[derive(Debug)]
pub enum RetryError<E> {
    /// The attempt budget was zero
    ///
    /// Raised before the operation is invoked even once.
    InvalidAttempts,

    /// All attempts failed with a retryable failure
    Exhausted {
        /// Message of the last retryable failure, unwrapped
        message: String,
        /// Number of attempts made before giving up
        attempts: u32,
    },

    /// The operation failed with an error that is never retried
    ///
    /// The inner error is the one the operation produced, unchanged.
    NonRetryable(E),
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::InvalidAttempts => f.write_str(INVALID_ATTEMPTS_MESSAGE),
            RetryError::Exhausted { message, .. } => f.write_str(message),
            RetryError::NonRetryable(source) => write!(f, "{}", source),
        }
    }
}

impl<E: Error + 'static> Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RetryError::NonRetryable(source) => Some(source),
            _ => None,
        }
    }
}

impl<E> RetryError<E> {
    /// Create a new exhausted error
    pub fn exhausted(message: impl Into<String>, attempts: u32) -> Self {
        RetryError::Exhausted {
            message: message.into(),
            attempts,
        }
    }

    /// Create a new non-retryable error
    pub fn non_retryable(source: E) -> Self {
        RetryError::NonRetryable(source)
    }

    /// Check if the attempt budget was rejected
    pub fn is_invalid_attempts(&self) -> bool {
        matches!(self, RetryError::InvalidAttempts)
    }

    /// Check if this error indicates all attempts were exhausted
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// Check if this error is non-retryable
    pub fn is_non_retryable(&self) -> bool {
        matches!(self, RetryError::NonRetryable(_))
    }

    /// Message of the last retryable failure, if the budget was exhausted
    pub fn message(&self) -> Option<&str> {
        match self {
            RetryError::Exhausted { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Number of attempts made, if any were made
    pub fn attempts(&self) -> Option<u32> {
        match self {
            RetryError::InvalidAttempts => None,
            RetryError::Exhausted { attempts, .. } => Some(*attempts),
            RetryError::NonRetryable(_) => None,
        }
    }

    /// Get the non-retryable error, consuming this error
    pub fn into_inner(self) -> Option<E> {
        match self {
            RetryError::NonRetryable(source) => Some(source),
            _ => None,
        }
    }

    /// Map the non-retryable error type using a closure
    pub fn map_err<F, E2>(self, f: F) -> RetryError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            RetryError::InvalidAttempts => RetryError::InvalidAttempts,
            RetryError::Exhausted { message, attempts } => {
                RetryError::Exhausted { message, attempts }
            }
            RetryError::NonRetryable(source) => RetryError::NonRetryable(f(source)),
        }
    }
}
