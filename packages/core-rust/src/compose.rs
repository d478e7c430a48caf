//! Stateless composition combinators.
//!
//! None of these adapters handle failures. A panic or `Err` from either stage
//! travels through the composed operation unmodified; the `try_*` variants only
//! stop invoking later stages once an `Err` has been produced.

use crate::operation::Operation;

// ---------------------------------------------------------------------------
// Compose / AndThen
// ---------------------------------------------------------------------------

/// Operation produced by [`Operation::compose`]: runs `before`, then `outer`.
#[derive(Debug, Clone, Copy)]
pub struct Compose<F, B> {
    outer: F,
    before: B,
}

impl<F, B> Compose<F, B> {
    pub(crate) fn new(outer: F, before: B) -> Self {
        Self { outer, before }
    }
}

impl<F, B, J> Operation<J> for Compose<F, B>
where
    B: Operation<J>,
    F: Operation<B::Output>,
{
    type Output = <F as Operation<B::Output>>::Output;

    fn invoke(&self, input: J) -> Self::Output {
        self.outer.invoke(self.before.invoke(input))
    }
}

/// Operation produced by [`Operation::and_then`]: runs `first`, then `after`.
#[derive(Debug, Clone, Copy)]
pub struct AndThen<F, G> {
    first: F,
    after: G,
}

impl<F, G> AndThen<F, G> {
    pub(crate) fn new(first: F, after: G) -> Self {
        Self { first, after }
    }
}

impl<F, G, I> Operation<I> for AndThen<F, G>
where
    F: Operation<I>,
    G: Operation<F::Output>,
{
    type Output = <G as Operation<F::Output>>::Output;

    fn invoke(&self, input: I) -> Self::Output {
        self.after.invoke(self.first.invoke(input))
    }
}

// ---------------------------------------------------------------------------
// TryCompose / TryAndThen
// ---------------------------------------------------------------------------

/// Operation produced by [`Operation::try_compose`].
#[derive(Debug, Clone, Copy)]
pub struct TryCompose<F, B> {
    outer: F,
    before: B,
}

impl<F, B> TryCompose<F, B> {
    pub(crate) fn new(outer: F, before: B) -> Self {
        Self { outer, before }
    }
}

impl<F, B, J, T, U, E> Operation<J> for TryCompose<F, B>
where
    B: Operation<J, Output = Result<T, E>>,
    F: Operation<T, Output = Result<U, E>>,
{
    type Output = Result<U, E>;

    fn invoke(&self, input: J) -> Result<U, E> {
        self.outer.invoke(self.before.invoke(input)?)
    }
}

/// Operation produced by [`Operation::try_and_then`].
#[derive(Debug, Clone, Copy)]
pub struct TryAndThen<F, G> {
    first: F,
    after: G,
}

impl<F, G> TryAndThen<F, G> {
    pub(crate) fn new(first: F, after: G) -> Self {
        Self { first, after }
    }
}

impl<F, G, I, T, U, E> Operation<I> for TryAndThen<F, G>
where
    F: Operation<I, Output = Result<T, E>>,
    G: Operation<T, Output = Result<U, E>>,
{
    type Output = Result<U, E>;

    fn invoke(&self, input: I) -> Result<U, E> {
        self.after.invoke(self.first.invoke(input)?)
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// Predicate produced by [`Operation::and`].
#[derive(Debug, Clone, Copy)]
pub struct And<F, P> {
    first: F,
    second: P,
}

impl<F, P> And<F, P> {
    pub(crate) fn new(first: F, second: P) -> Self {
        Self { first, second }
    }
}

impl<F, P, I> Operation<I> for And<F, P>
where
    I: Clone,
    F: Operation<I, Output = bool>,
    P: Operation<I, Output = bool>,
{
    type Output = bool;

    fn invoke(&self, input: I) -> bool {
        self.first.invoke(input.clone()) && self.second.invoke(input)
    }
}

/// Predicate produced by [`Operation::or`].
#[derive(Debug, Clone, Copy)]
pub struct Or<F, P> {
    first: F,
    second: P,
}

impl<F, P> Or<F, P> {
    pub(crate) fn new(first: F, second: P) -> Self {
        Self { first, second }
    }
}

impl<F, P, I> Operation<I> for Or<F, P>
where
    I: Clone,
    F: Operation<I, Output = bool>,
    P: Operation<I, Output = bool>,
{
    type Output = bool;

    fn invoke(&self, input: I) -> bool {
        self.first.invoke(input.clone()) || self.second.invoke(input)
    }
}

/// Predicate produced by [`Operation::negate`].
#[derive(Debug, Clone, Copy)]
pub struct Negate<F> {
    inner: F,
}

impl<F> Negate<F> {
    pub(crate) fn new(inner: F) -> Self {
        Self { inner }
    }
}

impl<F, I> Operation<I> for Negate<F>
where
    F: Operation<I, Output = bool>,
{
    type Output = bool;

    fn invoke(&self, input: I) -> bool {
        !self.inner.invoke(input)
    }
}

// ---------------------------------------------------------------------------
// Consumers
// ---------------------------------------------------------------------------

/// Consumer produced by [`Operation::then_accept`].
#[derive(Debug, Clone, Copy)]
pub struct ThenAccept<F, G> {
    first: F,
    after: G,
}

impl<F, G> ThenAccept<F, G> {
    pub(crate) fn new(first: F, after: G) -> Self {
        Self { first, after }
    }
}

impl<F, G, I> Operation<I> for ThenAccept<F, G>
where
    I: Clone,
    F: Operation<I, Output = ()>,
    G: Operation<I, Output = ()>,
{
    type Output = ();

    fn invoke(&self, input: I) {
        self.first.invoke(input.clone());
        self.after.invoke(input);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
