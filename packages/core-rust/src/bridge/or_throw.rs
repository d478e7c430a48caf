//! `OrThrow` policy: checked failures are escalated to a caller-chosen error.

use tracing::trace;

use super::Bridged;
use crate::error::Escalated;
use crate::operation::Operation;
use crate::policy::PolicyKind;

/// Adapter produced by [`Bridge::or_throw`](super::Bridge::or_throw) and
/// [`Bridge::or_throw_default`](super::Bridge::or_throw_default).
///
/// `factory` builds a new target for every failure. The original failure stays
/// reachable from the returned [`Escalated`].
#[derive(Debug, Clone, Copy)]
pub struct OrThrow<F, P> {
    inner: F,
    factory: P,
}

impl<F, P> OrThrow<F, P> {
    pub(crate) fn new(inner: F, factory: P) -> Self {
        Self { inner, factory }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, P, I, T, E, X> Operation<I> for OrThrow<F, P>
where
    F: Operation<I, Output = Result<T, E>>,
    P: Fn() -> X,
{
    type Output = Result<T, Escalated<X, E>>;

    fn invoke(&self, input: I) -> Result<T, Escalated<X, E>> {
        self.inner.invoke(input).map_err(|cause| {
            trace!(policy = %PolicyKind::OrThrow, "escalating checked failure");
            Escalated::new((self.factory)(), cause)
        })
    }
}

impl<F, P> Bridged for OrThrow<F, P> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::OrThrow
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use proptest::prelude::*;

    use crate::bridge::Bridge;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
    #[error("checksum mismatch at byte {0}")]
    struct Mismatch(usize);

    #[derive(Debug, Default, thiserror::Error)]
    #[error("payload rejected")]
    struct Rejected;

    #[derive(Debug, thiserror::Error)]
    #[error("upstream {0} unavailable")]
    struct Upstream(&'static str);

    fn verify(len: usize) -> Result<usize, Mismatch> {
        if len % 2 == 0 {
            Ok(len)
        } else {
            Err(Mismatch(len))
        }
    }

    #[test]
    fn success_passes_through() {
        assert_eq!(verify.or_throw_default::<Rejected>().invoke(8).expect("ok"), 8);
    }

    #[test]
    fn default_target_carries_cause() {
        let err = verify.or_throw_default::<Rejected>().invoke(3).unwrap_err();
        assert_eq!(err.to_string(), "payload rejected");
        assert_eq!(err.cause(), &Mismatch(3));
        let source = err.source().expect("source");
        assert_eq!(source.to_string(), "checksum mismatch at byte 3");
    }

    #[test]
    fn factory_builds_fresh_target_per_failure() {
        let escalating = verify.or_throw(|| Upstream("billing"));
        let first = escalating.invoke(1).unwrap_err();
        let second = escalating.invoke(5).unwrap_err();
        assert_eq!(first.target().0, "billing");
        assert_eq!(second.into_parts().1, Mismatch(5));
    }

    #[test]
    #[should_panic(expected = "length overflow")]
    fn panic_unwinds_unmodified() {
        let op = |_: usize| -> Result<usize, Mismatch> { panic!("length overflow") };
        let _ = op.or_throw_default::<Rejected>().invoke(0);
    }

    proptest! {
        #[test]
        fn every_checked_failure_becomes_target(half in 0..usize::MAX / 2) {
            let len = half * 2 + 1;
            let err = verify.or_throw_default::<Rejected>().invoke(len).unwrap_err();
            prop_assert_eq!(err.to_string(), "payload rejected");
            let cause = err.source().and_then(|s| s.downcast_ref::<Mismatch>());
            prop_assert_eq!(cause, Some(&Mismatch(len)));
        }
    }
}
