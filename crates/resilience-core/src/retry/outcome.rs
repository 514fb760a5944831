//! Failure classification
//!
//! Wrapped operations report trouble through [`Failure`]. Only the
//! [`Failure::Retryable`] kind is eligible for another attempt; everything
//! else leaves the retry loop on first occurrence.

use std::error::Error;
use std::fmt;

/// Failure returned by an operation run under the retry engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Failure<E> {
    /// Transient trouble; the message is forwarded to the observer and, on
    /// exhaustion, to [`RetryError::Exhausted`](super::RetryError::Exhausted)
    Retryable(String),

    /// Any other failure; propagated unchanged without retrying
    Fatal(E),
}

impl<E> Failure<E> {
    /// Create a retryable failure
    pub fn retry(message: impl Into<String>) -> Self {
        Failure::Retryable(message.into())
    }

    /// Create a non-retryable failure
    pub fn fatal(error: E) -> Self {
        Failure::Fatal(error)
    }

    /// Whether this failure may consume another attempt
    pub fn is_retryable(&self) -> bool {
        matches!(self, Failure::Retryable(_))
    }

    pub(crate) fn classify(self) -> Verdict<E> {
        match self {
            Failure::Retryable(message) => Verdict::Retry(message),
            Failure::Fatal(error) => Verdict::Propagate(error),
        }
    }
}

impl<E: fmt::Display> fmt::Display for Failure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Retryable(message) => f.write_str(message),
            Failure::Fatal(error) => write!(f, "{}", error),
        }
    }
}

impl<E: Error + 'static> Error for Failure<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Failure::Retryable(_) => None,
            Failure::Fatal(error) => Some(error),
        }
    }
}

/// What the retry loop does with a failure
#[derive(Debug)]
pub(crate) enum Verdict<E> {
    Retry(String),
    Propagate(E),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_only_retryable_kind_is_retried() {
        let transient: Failure<io::Error> = Failure::retry("busy");
        let fatal: Failure<io::Error> = Failure::fatal(io::Error::other("bad input"));

        assert!(transient.is_retryable());
        assert!(!fatal.is_retryable());
    }

    #[test]
    fn test_classify() {
        let verdict = Failure::<io::Error>::retry("busy").classify();
        assert!(matches!(verdict, Verdict::Retry(ref m) if m == "busy"));

        let verdict = Failure::fatal(io::Error::new(io::ErrorKind::NotFound, "gone")).classify();
        assert!(matches!(verdict, Verdict::Propagate(ref e) if e.kind() == io::ErrorKind::NotFound));
    }

    #[test]
    fn test_display() {
        assert_eq!(Failure::<io::Error>::retry("busy").to_string(), "busy");
        assert_eq!(
            Failure::fatal(io::Error::other("bad input")).to_string(),
            "bad input"
        );
    }
}
