//! Nest policy: checked failures are wrapped, panics unwind untouched.

use tracing::trace;

use super::Bridged;
use crate::operation::Operation;
use crate::policy::PolicyKind;

/// Adapter produced by [`Bridge::nest`](super::Bridge::nest) and
/// [`Bridge::nest_with`](super::Bridge::nest_with).
#[derive(Debug, Clone, Copy)]
pub struct Nest<F, M> {
    inner: F,
    mapper: M,
}

impl<F, M> Nest<F, M> {
    pub(crate) fn new(inner: F, mapper: M) -> Self {
        Self { inner, mapper }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, M, I, T, E, W> Operation<I> for Nest<F, M>
where
    F: Operation<I, Output = Result<T, E>>,
    M: Fn(E) -> W,
{
    type Output = Result<T, W>;

    fn invoke(&self, input: I) -> Result<T, W> {
        self.inner.invoke(input).map_err(|cause| {
            trace!(policy = %PolicyKind::Nest, "wrapping checked failure");
            (self.mapper)(cause)
        })
    }
}

impl<F, M> Bridged for Nest<F, M> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::Nest
    }
}
