//! The [`Operation`] abstraction shared by every combinator and bridge adapter.
//!
//! An operation is anything that can be invoked with an input `I` and yields an
//! [`Operation::Output`]. Arity is carried by the input type:
//!
//! | Arity | Input       | Example                         |
//! |-------|-------------|---------------------------------|
//! | 0     | `()`        | supplier `\|(): ()\| 42`        |
//! | 1     | `A`         | operator `\|x: i32\| x * 2`     |
//! | 2     | `(A, B)`    | `\|(a, b): (i32, i32)\| a + b`  |
//! | 3     | `(A, B, C)` | ternary operator                |
//!
//! Consumers have `Output = ()`, predicates `Output = bool`. A fallible
//! operation is simply one whose output is a `Result`; the [`Bridge`](crate::Bridge)
//! trait turns those into non-failing operations.
//!
//! Every `Fn(I) -> O` is an operation, so closures and function items compose
//! directly without wrapping.

use std::fmt;
use std::marker::PhantomData;

use crate::compose::{And, AndThen, Compose, Negate, Or, ThenAccept, TryAndThen, TryCompose};

/// A composable unit of behavior invoked with input `I`.
pub trait Operation<I> {
    /// Value produced by one invocation.
    type Output;

    /// Runs the operation on `input`.
    fn invoke(&self, input: I) -> Self::Output;

    /// Returns an operation that feeds its input through `before` first:
    /// `input -> self.invoke(before.invoke(input))`.
    #[must_use]
    fn compose<B, J>(self, before: B) -> Compose<Self, B>
    where
        Self: Sized,
        B: Operation<J, Output = I>,
    {
        Compose::new(self, before)
    }

    /// Returns an operation that feeds this operation's output into `after`:
    /// `input -> after.invoke(self.invoke(input))`.
    #[must_use]
    fn and_then<G>(self, after: G) -> AndThen<Self, G>
    where
        Self: Sized,
        G: Operation<Self::Output>,
    {
        AndThen::new(self, after)
    }

    /// Fallible counterpart of [`compose`](Operation::compose). An `Err` from
    /// `before` is returned without invoking `self`.
    #[must_use]
    fn try_compose<B, J, T, E>(self, before: B) -> TryCompose<Self, B>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        B: Operation<J, Output = Result<I, E>>,
    {
        TryCompose::new(self, before)
    }

    /// Fallible counterpart of [`and_then`](Operation::and_then). An `Err`
    /// from `self` is returned without invoking `after`.
    #[must_use]
    fn try_and_then<G, T, U, E>(self, after: G) -> TryAndThen<Self, G>
    where
        Self: Sized + Operation<I, Output = Result<T, E>>,
        G: Operation<T, Output = Result<U, E>>,
    {
        TryAndThen::new(self, after)
    }

    /// Short-circuiting logical AND of two predicates over the same input.
    #[must_use]
    fn and<P>(self, other: P) -> And<Self, P>
    where
        Self: Sized + Operation<I, Output = bool>,
        P: Operation<I, Output = bool>,
        I: Clone,
    {
        And::new(self, other)
    }

    /// Short-circuiting logical OR of two predicates over the same input.
    #[must_use]
    fn or<P>(self, other: P) -> Or<Self, P>
    where
        Self: Sized + Operation<I, Output = bool>,
        P: Operation<I, Output = bool>,
        I: Clone,
    {
        Or::new(self, other)
    }

    /// Logical negation of a predicate.
    #[must_use]
    fn negate(self) -> Negate<Self>
    where
        Self: Sized + Operation<I, Output = bool>,
    {
        Negate::new(self)
    }

    /// Runs this consumer, then `after`, both with the same input.
    #[must_use]
    fn then_accept<G>(self, after: G) -> ThenAccept<Self, G>
    where
        Self: Sized + Operation<I, Output = ()>,
        G: Operation<I, Output = ()>,
        I: Clone,
    {
        ThenAccept::new(self, after)
    }

    /// Erases the concrete type so heterogeneous operations can share a
    /// collection or a struct field.
    #[must_use]
    fn boxed<'a>(self) -> BoxedOperation<'a, I, Self::Output>
    where
        Self: Sized + Send + Sync + 'a,
    {
        BoxedOperation {
            inner: Box::new(self),
        }
    }
}

impl<F, I, O> Operation<I> for F
where
    F: Fn(I) -> O,
{
    type Output = O;

    fn invoke(&self, input: I) -> O {
        self(input)
    }
}

// ---------------------------------------------------------------------------
// BoxedOperation
// ---------------------------------------------------------------------------

/// Type-erased, thread-safe operation from `I` to `O`.
pub struct BoxedOperation<'a, I, O> {
    inner: Box<dyn Operation<I, Output = O> + Send + Sync + 'a>,
}

impl<I, O> Operation<I> for BoxedOperation<'_, I, O> {
    type Output = O;

    fn invoke(&self, input: I) -> O {
        (*self.inner).invoke(input)
    }
}

impl<I, O> fmt::Debug for BoxedOperation<'_, I, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedOperation").finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// Operation that returns its input unchanged. The unit of composition.
pub struct Identity<T>(PhantomData<fn(T) -> T>);

/// Creates the identity operation for `T`.
#[must_use]
pub const fn identity<T>() -> Identity<T> {
    Identity(PhantomData)
}

impl<T> Operation<T> for Identity<T> {
    type Output = T;

    fn invoke(&self, input: T) -> T {
        input
    }
}

impl<T> Clone for Identity<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Identity<T> {}

impl<T> Default for Identity<T> {
    fn default() -> Self {
        identity()
    }
}

impl<T> fmt::Debug for Identity<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Identity")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
