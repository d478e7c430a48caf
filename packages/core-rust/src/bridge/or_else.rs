//! `OrElse` policy: any failure of the inner operation, a panic included,
//! switches to a fixed fallback operation run with the same input.
//!
//! Unlike every other policy, `OrElse` also catches panics from the inner
//! operation. Callers that want panics to unwind should use
//! [`Bridge::recover`](super::Bridge::recover) with a handler that ignores the
//! cause.

use tracing::trace;

use super::{catch_unchecked, Bridged};
use crate::operation::Operation;
use crate::policy::PolicyKind;

/// Adapter produced by [`Bridge::or_else`](super::Bridge::or_else).
#[derive(Debug, Clone, Copy)]
pub struct OrElse<F, G> {
    inner: F,
    other: G,
}

impl<F, G> OrElse<F, G> {
    pub(crate) fn new(inner: F, other: G) -> Self {
        Self { inner, other }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, G, I, T, E> Operation<I> for OrElse<F, G>
where
    I: Clone,
    F: Operation<I, Output = Result<T, E>>,
    G: Operation<I, Output = T>,
{
    type Output = T;

    fn invoke(&self, input: I) -> T {
        let attempt = input.clone();
        let outcome = catch_unchecked(PolicyKind::OrElse, || self.inner.invoke(attempt));
        if let Some(Ok(value)) = outcome {
            return value;
        }
        trace!(policy = %PolicyKind::OrElse, "switching to fallback operation");
        self.other.invoke(input)
    }
}

impl<F, G> Bridged for OrElse<F, G> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::OrElse
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use crate::bridge::Bridge;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("sensor offline")]
    struct Offline;

    fn read_sensor(channel: u8) -> Result<f32, Offline> {
        if channel < 4 {
            Ok(f32::from(channel) * 1.5)
        } else {
            Err(Offline)
        }
    }

    #[test]
    fn success_skips_fallback() {
        let fallback_calls = Cell::new(0);
        let reading = read_sensor.or_else(|_: u8| {
            fallback_calls.set(fallback_calls.get() + 1);
            0.0
        });
        assert!((reading.invoke(2) - 3.0).abs() < f32::EPSILON);
        assert_eq!(fallback_calls.get(), 0);
    }

    #[test]
    fn checked_failure_runs_other_with_same_input() {
        let reading = read_sensor.or_else(|channel: u8| f32::from(channel) * -1.0);
        assert!((reading.invoke(9) + 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn panic_in_inner_runs_other() {
        let flaky = |channel: u8| -> Result<u8, Offline> {
            assert!(channel != 0, "channel zero is reserved");
            Ok(channel)
        };
        let guarded = flaky.or_else(|_: u8| u8::MAX);
        assert_eq!(guarded.invoke(0), u8::MAX);
        assert_eq!(guarded.invoke(5), 5);
    }

    #[test]
    #[should_panic(expected = "fallback failed too")]
    fn panic_in_other_propagates() {
        let guarded = read_sensor.or_else(|_: u8| -> f32 { panic!("fallback failed too") });
        guarded.invoke(200);
    }
}
