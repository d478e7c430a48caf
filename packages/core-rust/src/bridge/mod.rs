//! Bridges from fallible operations to non-failing (or differently-failing) ones.
//!
//! A fallible operation is any [`Operation`] whose output is `Result<T, E>`.
//! The `Err` arm is the *checked* failure channel; a panic is the *unchecked*
//! one. Each method of [`Bridge`] picks a policy for the checked channel and
//! returns an adapter that implements `Operation` with the same input:
//!
//! | Policy                  | Panic from inner | `Err` from inner             |
//! |-------------------------|------------------|------------------------------|
//! | [`nest`]                | unwinds          | wrapped, returned            |
//! | [`recover`]             | unwinds          | fallback operation runs      |
//! | [`or_else`]             | **caught**       | fallback operation runs      |
//! | [`or_throw`]            | unwinds          | escalated, returned          |
//! | [`ignore`]              | unwinds          | swallowed                    |
//! | [`ignore_all`]          | caught           | swallowed                    |
//! | [`or_return`]           | unwinds          | constant returned            |
//! | [`or_return_with`]      | unwinds          | supplied value returned      |
//! | [`or_return_left`] etc. | unwinds          | chosen input returned        |
//!
//! Every policy resolves in at most one extra step: no retries, and a fallback
//! is invoked at most once per call.
//!
//! [`nest`]: Bridge::nest
//! [`recover`]: Bridge::recover
//! [`or_else`]: Bridge::or_else
//! [`or_throw`]: Bridge::or_throw
//! [`ignore`]: Bridge::ignore
//! [`ignore_all`]: Bridge::ignore_all
//! [`or_return`]: Bridge::or_return
//! [`or_return_with`]: Bridge::or_return_with
//! [`or_return_left`]: Bridge::or_return_left

pub mod fallback;
pub mod ignore;
pub mod nest;
pub mod or_else;
pub mod or_throw;
pub mod recover;

use std::any::Any;
use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use tracing::debug;

pub use fallback::{Operands, OrReturn, OrReturnOperand, OrReturnWith, TernaryOperands};
pub use ignore::{Ignore, IgnoreAll};
pub use nest::Nest;
pub use or_else::OrElse;
pub use or_throw::OrThrow;
pub use recover::{Recover, TryRecover};

use crate::error::Nested;
use crate::operation::Operation;
use crate::policy::{Operand, PolicyKind};

/// Adapters that apply a bridge policy.
pub trait Bridged {
    /// The policy this adapter applies to checked failures.
    fn policy(&self) -> PolicyKind;
}

/// Policy constructors for fallible operations.
///
/// Implemented for every [`Operation`]; the bounds on each method restrict it
/// to the operation shapes the policy makes sense for.
pub trait Bridge<I>: Operation<I> {
    /// Wraps checked failures in [`Nested`], keeping the original as its cause.
    #[must_use]
    fn nest<T, E>(self) -> Nest<Self, fn(E) -> Nested<E>>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        E: Display,
    {
        Nest::new(self, Nested::<E>::new as fn(E) -> Nested<E>)
    }

    /// Wraps checked failures with `mapper`.
    #[must_use]
    fn nest_with<T, E, M, W>(self, mapper: M) -> Nest<Self, M>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        M: Fn(E) -> W,
    {
        Nest::new(self, mapper)
    }

    /// On a checked failure, asks `handler` for a fallback operation and runs
    /// it with the original input.
    #[must_use]
    fn recover<T, E, H, G>(self, handler: H) -> Recover<Self, H>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        H: Fn(E) -> G,
        G: Operation<I, Output = T>,
        I: Clone,
    {
        Recover::new(self, handler)
    }

    /// Like [`recover`](Bridge::recover), but the handler may decline. A
    /// declined recovery surfaces as [`BridgeError::MissingFallback`](crate::BridgeError::MissingFallback).
    #[must_use]
    fn try_recover<T, E, H, G>(self, handler: H) -> TryRecover<Self, H>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        H: Fn(&E) -> Option<G>,
        G: Operation<I, Output = T>,
        I: Clone,
    {
        TryRecover::new(self, handler)
    }

    /// Runs `other` with the same input whenever the inner operation fails,
    /// including when it panics.
    #[must_use]
    fn or_else<T, E, G>(self, other: G) -> OrElse<Self, G>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        G: Operation<I, Output = T>,
        I: Clone,
    {
        OrElse::new(self, other)
    }

    /// Escalates checked failures to a target error built by `factory`.
    #[must_use]
    fn or_throw<T, E, P, X>(self, factory: P) -> OrThrow<Self, P>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        P: Fn() -> X,
    {
        OrThrow::new(self, factory)
    }

    /// Escalates checked failures to `X::default()`.
    #[must_use]
    fn or_throw_default<X>(self) -> OrThrow<Self, fn() -> X>
    where
        Self: Sized,
        X: Default,
    {
        OrThrow::new(self, X::default as fn() -> X)
    }

    /// Swallows checked failures of a consumer. Panics still unwind.
    ///
    /// Only consumers qualify; a value-returning operation has no result to
    /// give back once its failure is dropped:
    ///
    /// ```compile_fail
    /// use opbridge_core::{Bridge, Operation};
    ///
    /// let checked_half = |x: i32| x.checked_div(2).ok_or("no result");
    /// checked_half.ignore().invoke(4);
    /// ```
    #[must_use]
    fn ignore<E>(self) -> Ignore<Self>
    where
        Self: Sized + Operation<I, Output = Result<(), E>>,
    {
        Ignore::new(self)
    }

    /// Swallows every failure of a consumer, panics included.
    #[must_use]
    fn ignore_all<E>(self) -> IgnoreAll<Self>
    where
        Self: Sized + Operation<I, Output = Result<(), E>>,
    {
        IgnoreAll::new(self)
    }

    /// Returns a clone of `value` on checked failure.
    #[must_use]
    fn or_return<T, E>(self, value: T) -> OrReturn<Self, T>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        T: Clone,
    {
        OrReturn::new(self, value)
    }

    /// Returns a fresh value from `supplier` on checked failure.
    #[must_use]
    fn or_return_with<T, E, S>(self, supplier: S) -> OrReturnWith<Self, S>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        S: Fn() -> T,
    {
        OrReturnWith::new(self, supplier)
    }

    /// Returns the first input of a same-typed binary or ternary operator on
    /// checked failure.
    #[must_use]
    fn or_return_left<T, E>(self) -> OrReturnOperand<Self, I, T>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        I: Operands<T>,
    {
        OrReturnOperand::new(self, Operand::Left, <I as Operands<T>>::left)
    }

    /// Returns the middle input of a same-typed ternary operator on checked
    /// failure.
    #[must_use]
    fn or_return_middle<T, E>(self) -> OrReturnOperand<Self, I, T>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        I: TernaryOperands<T>,
    {
        OrReturnOperand::new(self, Operand::Middle, <I as TernaryOperands<T>>::middle)
    }

    /// Returns the last input of a same-typed binary or ternary operator on
    /// checked failure.
    #[must_use]
    fn or_return_right<T, E>(self) -> OrReturnOperand<Self, I, T>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        I: Operands<T>,
    {
        OrReturnOperand::new(self, Operand::Right, <I as Operands<T>>::right)
    }
}

impl<I, F> Bridge<I> for F where F: Operation<I> {}

/// Runs `f`, converting a panic into `None`.
///
/// Reserved for the policies that opt into swallowing unchecked failures.
pub(crate) fn catch_unchecked<R>(policy: PolicyKind, f: impl FnOnce() -> R) -> Option<R> {
    debug_assert!(policy.catches_panics(), "{policy} must not catch panics");
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Some(value),
        Err(payload) => {
            debug!(
                policy = %policy,
                panic = panic_message(payload.as_ref()),
                "caught unchecked failure"
            );
            None
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("<non-string panic payload>")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::error::Error as _;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::EnvFilter;

    use super::*;

    #[derive(Debug, PartialEq, Eq, thiserror::Error)]
    #[error("rejected input: {0}")]
    struct Declared(bool);

    fn reject_true(flag: bool) -> Result<(), Declared> {
        if flag {
            Err(Declared(flag))
        } else {
            Ok(())
        }
    }

    #[test]
    fn ignore_then_nest_on_same_consumer() {
        reject_true.ignore().invoke(true);

        let err = reject_true.nest().invoke(true).unwrap_err();
        assert_eq!(err.cause(), &Declared(true));
        assert_eq!(err.to_string(), "rejected input: true");
        let source = err.source().expect("source");
        assert_eq!(source.downcast_ref::<Declared>(), Some(&Declared(true)));
    }

    #[test]
    fn adapters_report_their_policy() {
        assert_eq!(reject_true.nest().policy(), PolicyKind::Nest);
        assert_eq!(reject_true.ignore().policy(), PolicyKind::Ignore);
        assert_eq!(reject_true.ignore_all().policy(), PolicyKind::IgnoreAll);
        assert_eq!(reject_true.or_else(|_: bool| ()).policy(), PolicyKind::OrElse);
        assert_eq!(reject_true.or_return(()).policy(), PolicyKind::FallbackValue);
        assert_eq!(
            reject_true.or_return_with(|| ()).policy(),
            PolicyKind::FallbackSupplier
        );
        assert_eq!(
            reject_true.or_throw_default::<String>().policy(),
            PolicyKind::OrThrow
        );
    }

    #[test]
    fn catch_unchecked_returns_value_without_panic() {
        assert_eq!(catch_unchecked(PolicyKind::IgnoreAll, || 7), Some(7));
    }

    #[test]
    fn catch_unchecked_swallows_panic() {
        let caught: Option<()> = catch_unchecked(PolicyKind::OrElse, || panic!("boom"));
        assert_eq!(caught, None);
    }

    #[test]
    fn panic_message_reads_str_and_string_payloads() {
        let static_payload: Box<dyn Any + Send> = Box::new("static");
        let owned_payload: Box<dyn Any + Send> = Box::new(String::from("owned"));
        let other_payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(static_payload.as_ref()), "static");
        assert_eq!(panic_message(owned_payload.as_ref()), "owned");
        assert_eq!(panic_message(other_payload.as_ref()), "<non-string panic payload>");
    }

    /// Shared in-memory sink for formatted tracing output.
    #[derive(Clone, Default)]
    struct CapturedLog(Arc<Mutex<Vec<u8>>>);

    impl CapturedLog {
        fn contents(&self) -> String {
            let bytes = self.0.lock().expect("log buffer poisoned");
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }

    impl io::Write for CapturedLog {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().expect("log buffer poisoned").extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn capture_events(run: impl FnOnce()) -> String {
        let log = CapturedLog::default();
        let writer = log.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new("trace"))
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, run);
        log.contents()
    }

    #[test]
    fn policies_emit_events_with_policy_field() {
        let output = capture_events(|| {
            reject_true.ignore().invoke(true);
            assert!(reject_true.nest().invoke(true).is_err());
        });
        assert!(output.contains("policy=ignore"), "{output}");
        assert!(output.contains("dropping checked failure"), "{output}");
        assert!(output.contains("policy=nest"), "{output}");
        assert!(output.contains("wrapping checked failure"), "{output}");
    }

    #[test]
    fn caught_panic_is_logged_with_its_message() {
        let exploding = |_: bool| -> Result<(), Declared> { panic!("consumer invariant broken") };
        let output = capture_events(|| exploding.ignore_all().invoke(true));
        assert!(output.contains("DEBUG"), "{output}");
        assert!(output.contains("policy=ignore-all"), "{output}");
        assert!(output.contains("caught unchecked failure"), "{output}");
        assert!(output.contains("consumer invariant broken"), "{output}");
    }

    #[test]
    fn checked_failure_values_stay_out_of_events() {
        let output = capture_events(|| {
            reject_true.ignore().invoke(true);
            reject_true.ignore_all().invoke(true);
            assert!(reject_true.nest().invoke(true).is_err());
            let _ = reject_true.or_throw_default::<String>().invoke(true);
            reject_true.or_return(()).invoke(true);
        });
        assert!(!output.is_empty());
        assert!(!output.contains("rejected input"), "{output}");
        assert!(!output.contains("Declared"), "{output}");
    }

    #[test]
    fn success_emits_no_events() {
        let output = capture_events(|| {
            reject_true.ignore().invoke(false);
            assert!(reject_true.nest().invoke(false).is_ok());
        });
        assert!(output.is_empty(), "{output}");
    }
}
