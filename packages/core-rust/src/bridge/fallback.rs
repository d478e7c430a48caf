//! Substitute-value policies: a checked failure yields a constant, a supplied
//! value, or one of the operator's own inputs.

use std::fmt;

use tracing::trace;

use super::Bridged;
use crate::operation::Operation;
use crate::policy::{Operand, PolicyKind};

// ---------------------------------------------------------------------------
// OrReturn
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::or_return`](super::Bridge::or_return).
#[derive(Debug, Clone, Copy)]
pub struct OrReturn<F, T> {
    inner: F,
    value: T,
}

impl<F, T> OrReturn<F, T> {
    pub(crate) fn new(inner: F, value: T) -> Self {
        Self { inner, value }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, I, T, E> Operation<I> for OrReturn<F, T>
where
    F: Operation<I, Output = Result<T, E>>,
    T: Clone,
{
    type Output = T;

    fn invoke(&self, input: I) -> T {
        self.inner.invoke(input).unwrap_or_else(|_| {
            trace!(policy = %PolicyKind::FallbackValue, "substituting fallback value");
            self.value.clone()
        })
    }
}

impl<F, T> Bridged for OrReturn<F, T> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::FallbackValue
    }
}

// ---------------------------------------------------------------------------
// OrReturnWith
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::or_return_with`](super::Bridge::or_return_with).
#[derive(Debug, Clone, Copy)]
pub struct OrReturnWith<F, S> {
    inner: F,
    supplier: S,
}

impl<F, S> OrReturnWith<F, S> {
    pub(crate) fn new(inner: F, supplier: S) -> Self {
        Self { inner, supplier }
    }

    /// Unwraps the protected operation.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, S, I, T, E> Operation<I> for OrReturnWith<F, S>
where
    F: Operation<I, Output = Result<T, E>>,
    S: Fn() -> T,
{
    type Output = T;

    fn invoke(&self, input: I) -> T {
        self.inner.invoke(input).unwrap_or_else(|_| {
            trace!(policy = %PolicyKind::FallbackSupplier, "substituting supplied value");
            (self.supplier)()
        })
    }
}

impl<F, S> Bridged for OrReturnWith<F, S> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::FallbackSupplier
    }
}

// ---------------------------------------------------------------------------
// Operands
// ---------------------------------------------------------------------------

mod sealed {
    pub trait Sealed {}

    impl<T> Sealed for (T, T) {}
    impl<T> Sealed for (T, T, T) {}
}

/// Inputs of a same-typed binary or ternary operator.
pub trait Operands<T>: Clone + sealed::Sealed {
    /// The first operand.
    fn left(self) -> T;
    /// The last operand.
    fn right(self) -> T;
}

/// Inputs of a same-typed ternary operator.
pub trait TernaryOperands<T>: Operands<T> {
    /// The second operand.
    fn middle(self) -> T;
}

impl<T: Clone> Operands<T> for (T, T) {
    fn left(self) -> T {
        self.0
    }

    fn right(self) -> T {
        self.1
    }
}

impl<T: Clone> Operands<T> for (T, T, T) {
    fn left(self) -> T {
        self.0
    }

    fn right(self) -> T {
        self.2
    }
}

impl<T: Clone> TernaryOperands<T> for (T, T, T) {
    fn middle(self) -> T {
        self.1
    }
}

// ---------------------------------------------------------------------------
// OrReturnOperand
// ---------------------------------------------------------------------------

/// Adapter produced by [`Bridge::or_return_left`](super::Bridge::or_return_left),
/// [`Bridge::or_return_middle`](super::Bridge::or_return_middle) and
/// [`Bridge::or_return_right`](super::Bridge::or_return_right).
pub struct OrReturnOperand<F, I, T> {
    inner: F,
    operand: Operand,
    pick: fn(I) -> T,
}

impl<F, I, T> OrReturnOperand<F, I, T> {
    pub(crate) fn new(inner: F, operand: Operand, pick: fn(I) -> T) -> Self {
        Self {
            inner,
            operand,
            pick,
        }
    }

    /// Which input is returned on failure.
    #[must_use]
    pub fn operand(&self) -> Operand {
        self.operand
    }

    /// Unwraps the protected operator.
    #[must_use]
    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F, I, T, E> Operation<I> for OrReturnOperand<F, I, T>
where
    I: Clone,
    F: Operation<I, Output = Result<T, E>>,
{
    type Output = T;

    fn invoke(&self, input: I) -> T {
        match self.inner.invoke(input.clone()) {
            Ok(value) => value,
            Err(_) => {
                trace!(policy = %self.policy(), "returning input operand");
                (self.pick)(input)
            }
        }
    }
}

impl<F, I, T> Bridged for OrReturnOperand<F, I, T> {
    fn policy(&self) -> PolicyKind {
        PolicyKind::FallbackOperand(self.operand)
    }
}

impl<F: Clone, I, T> Clone for OrReturnOperand<F, I, T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            operand: self.operand,
            pick: self.pick,
        }
    }
}

impl<F: fmt::Debug, I, T> fmt::Debug for OrReturnOperand<F, I, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrReturnOperand")
            .field("inner", &self.inner)
            .field("operand", &self.operand)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
