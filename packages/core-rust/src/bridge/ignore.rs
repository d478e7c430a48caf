//! Ignore policies for consumers.
//!
//! [`Ignore`] drops checked failures and lets panics unwind. [`IgnoreAll`] also
//! catches panics; callers opt into it explicitly.

use tracing::trace;

use super::{catch_unchecked, Bridged};
use crate::operation::Operation;
use crate::policy::PolicyKind;

// ---------------------------------------------------------------------------
// Ignore
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::ignore`](super::Bridge::ignore).
#[derive(Debug, Clone, Copy)]
pub struct Ignore<F> {
    inner: F,
}

impl<F> Ignore<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Unwraps the protected consumer.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, I, E> Operation<I> for Ignore<F>
where
    F: Operation<I, Output = Result<(), E>>,
{
    type Output = ();

    fn invoke(&self, input: I) {
        if self.inner.invoke(input).is_err() {
            trace!(policy = %PolicyKind::Ignore, "dropping checked failure");
        }
    }
}

impl<F> Bridged for Ignore<F> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::Ignore
    }
}

// ---------------------------------------------------------------------------
// IgnoreAll
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::ignore_all`](super::Bridge::ignore_all).
#[derive(Debug, Clone, Copy)]
pub struct IgnoreAll<F> {
    inner: F,
}

impl<F> IgnoreAll<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self { inner }
    }

    /// Unwraps the protected consumer.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, I, E> Operation<I> for IgnoreAll<F>
where
    F: Operation<I, Output = Result<(), E>>,
{
    type Output = ();

    fn invoke(&self, input: I) {
        let outcome = catch_unchecked(PolicyKind::IgnoreAll, || self.inner.invoke(input));
        if let Some(Err(_)) = outcome {
            trace!(policy = %PolicyKind::IgnoreAll, "dropping checked failure");
        }
    }
}

impl<F> Bridged for IgnoreAll<F> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::IgnoreAll
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
