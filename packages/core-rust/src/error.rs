//! Error types produced by bridge adapters and policy parsing.

use std::fmt::Display;

/// A checked failure wrapped by [`Bridge::nest`](crate::Bridge::nest).
///
/// Displays the cause's message captured at wrap time; `source()` returns the
/// cause itself.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct Nested<E> {
    message: String,
    #[source]
    cause: E,
}

impl<E: Display> Nested<E> {
    /// Wraps `cause`, reusing its `Display` output as the message.
    pub fn new(cause: E) -> Self {
        Self {
            message: cause.to_string(),
            cause,
        }
    }
}

impl<E> Nested<E> {
    /// Wraps `cause` under a custom message.
    pub fn with_message(message: impl Into<String>, cause: E) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    /// The message this error displays.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The original checked failure.
    #[must_use]
    pub fn cause(&self) -> &E {
        &self.cause
    }

    /// Unwraps the original checked failure.
    #[must_use]
    pub fn into_cause(self) -> E {
        self.cause
    }
}

/// A checked failure escalated by [`Bridge::or_throw`](crate::Bridge::or_throw).
///
/// Displays as the target; the original failure is reachable through
/// [`cause`](Escalated::cause) and `source()`.
#[derive(Debug, thiserror::Error)]
#[error("{target}")]
pub struct Escalated<X, E> {
    target: X,
    #[source]
    cause: E,
}

impl<X, E> Escalated<X, E> {
    pub(crate) fn new(target: X, cause: E) -> Self {
        Self { target, cause }
    }

    /// The freshly constructed target error.
    #[must_use]
    pub fn target(&self) -> &X {
        &self.target
    }

    /// The original checked failure.
    #[must_use]
    pub fn cause(&self) -> &E {
        &self.cause
    }

    /// Splits into `(target, cause)`.
    #[must_use]
    pub fn into_parts(self) -> (X, E) {
        (self.target, self.cause)
    }
}

/// Misuse of a bridge adapter, as opposed to a failure of the wrapped operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BridgeError<E> {
    /// The recovery handler of [`Bridge::try_recover`](crate::Bridge::try_recover)
    /// returned no fallback operation. The fallback was never invoked.
    #[error("recovery handler returned no fallback operation")]
    MissingFallback {
        /// The checked failure the handler was asked to recover from.
        #[source]
        cause: E,
    },
}

impl<E> BridgeError<E> {
    /// The checked failure that triggered the misuse.
    #[must_use]
    pub fn cause(&self) -> &E {
        match self {
            Self::MissingFallback { cause } => cause,
        }
    }
}

/// Errors from parsing a [`PolicyKind`](crate::PolicyKind) or [`Operand`](crate::Operand).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("unknown bridge policy: {0}")]
    UnknownPolicy(String),
    #[error("unknown operand position: {0}")]
    UnknownOperand(String),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[derive(Debug, PartialEq, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[derive(Debug, Default, thiserror::Error)]
    #[error("storage unavailable")]
    struct Unavailable;

    #[test]
    fn nested_reuses_cause_message() {
        let err = Nested::new(DiskFull);
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.message(), "disk full");
        assert_eq!(err.cause(), &DiskFull);
    }

    #[test]
    fn nested_source_is_cause() {
        let err = Nested::with_message("write failed", DiskFull);
        assert_eq!(err.to_string(), "write failed");
        let source = err.source().expect("source");
        assert!(source.downcast_ref::<DiskFull>().is_some());
        assert_eq!(err.into_cause(), DiskFull);
    }

    #[test]
    fn escalated_displays_target() {
        let err = Escalated::new(Unavailable, DiskFull);
        assert_eq!(err.to_string(), "storage unavailable");
        assert!(err.source().expect("source").is::<DiskFull>());
        let (target, cause) = err.into_parts();
        assert_eq!(target.to_string(), "storage unavailable");
        assert_eq!(cause, DiskFull);
    }

    #[test]
    fn missing_fallback_keeps_cause() {
        let err = BridgeError::MissingFallback { cause: DiskFull };
        assert_eq!(err.cause(), &DiskFull);
        assert_eq!(err.to_string(), "recovery handler returned no fallback operation");
        assert!(err.source().is_some());
    }
}
