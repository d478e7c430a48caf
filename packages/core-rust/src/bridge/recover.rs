//! Recover policy: a handler maps the checked failure to a fallback operation,
//! which then runs with the original input.

use tracing::trace;

use super::Bridged;
use crate::error::BridgeError;
use crate::operation::Operation;
use crate::policy::PolicyKind;

// ---------------------------------------------------------------------------
// Recover
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::recover`](super::Bridge::recover).
#[derive(Debug, Clone, Copy)]
pub struct Recover<F, H> {
    inner: F,
    handler: H,
}

impl<F, H> Recover<F, H> {
    pub(crate) fn new(inner: F, handler: H) -> Self {
        Self { inner, handler }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, H, G, I, T, E> Operation<I> for Recover<F, H>
where
    I: Clone,
    F: Operation<I, Output = Result<T, E>>,
    H: Fn(E) -> G,
    G: Operation<I, Output = T>,
{
    type Output = T;

    fn invoke(&self, input: I) -> T {
        match self.inner.invoke(input.clone()) {
            Ok(value) => value,
            Err(cause) => {
                trace!(policy = %PolicyKind::Recover, "running recovery fallback");
                (self.handler)(cause).invoke(input)
            }
        }
    }
}

impl<F, H> Bridged for Recover<F, H> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::Recover
    }
}

// ---------------------------------------------------------------------------
// TryRecover
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::try_recover`](super::Bridge::try_recover).
///
/// A handler that returns `None` is a misuse of the bridge, reported as
/// [`BridgeError::MissingFallback`] without running any fallback.
///
/// Reports [`PolicyKind::Recover`] like [`Recover`]; only the output type tells
/// the two apart.
#[derive(Debug, Clone, Copy)]
pub struct TryRecover<F, H> {
    inner: F,
    handler: H,
}

impl<F, H> TryRecover<F, H> {
    pub(crate) fn new(inner: F, handler: H) -> Self {
        Self { inner, handler }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, H, G, I, T, E> Operation<I> for TryRecover<F, H>
where
    I: Clone,
    F: Operation<I, Output = Result<T, E>>,
    H: Fn(&E) -> Option<G>,
    G: Operation<I, Output = T>,
{
    type Output = Result<T, BridgeError<E>>;

    fn invoke(&self, input: I) -> Result<T, BridgeError<E>> {
        let cause = match self.inner.invoke(input.clone()) {
            Ok(value) => return Ok(value),
            Err(cause) => cause,
        };
        match (self.handler)(&cause) {
            Some(fallback) => {
                trace!(policy = %PolicyKind::Recover, "running recovery fallback");
                Ok(fallback.invoke(input))
            }
            None => Err(BridgeError::MissingFallback { cause }),
        }
    }
}

impl<F, H> Bridged for TryRecover<F, H> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::Recover
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
