//! The generate/shrink contract and its combinator entry points.

use std::fmt;
use std::rc::Rc;

use crate::combinators::{Chain, Filter, Map, NoBias, NoShrink, WithBias, Zip};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// A description of an input domain that can both generate and shrink values
///
/// Implementations are stateless with respect to any single generation: all
/// randomness comes from `rng`, and everything needed to shrink a value later
/// travels with it in its [`Context`].
pub trait Arbitrary<T: 'static> {
    /// Produce a value from the current state of `rng`
    ///
    /// `bias_factor` is the inverse probability of drawing from a biased
    /// (edge-leaning) zone instead of the full domain; `None` disables biasing.
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T>;

    /// Whether `value` could have been produced by this arbitrary, so that
    /// [`Arbitrary::shrink`] can be called on it without a context
    fn can_shrink_without_context(&self, value: &T) -> bool;

    /// Stream of strictly "smaller" candidates for `value`
    ///
    /// `context` is the context attached to `value` by a previous `generate`
    /// or `shrink` call. When it is `None` the value is treated as freshly
    /// generated.
    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>>;
}

/// Type-erased, cheaply clonable arbitrary
pub struct BoxedArbitrary<T> {
    inner: Rc<dyn Arbitrary<T>>,
}

impl<T: 'static> BoxedArbitrary<T> {
    /// Box an arbitrary
    pub fn new<A: Arbitrary<T> + 'static>(arbitrary: A) -> Self {
        Self {
            inner: Rc::new(arbitrary),
        }
    }

    /// Whether two handles point at the same arbitrary
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T> Clone for BoxedArbitrary<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T> fmt::Debug for BoxedArbitrary<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoxedArbitrary").finish_non_exhaustive()
    }
}

impl<T: 'static> Arbitrary<T> for BoxedArbitrary<T> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        self.inner.generate(rng, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.inner.can_shrink_without_context(value)
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        self.inner.shrink(value, context)
    }
}

/// Combinators available on every arbitrary
pub trait ArbitraryExt<T: 'static>: Arbitrary<T> + Sized + 'static {
    /// Transform generated values; mapped values shrink through their pre-image
    fn map<U, F>(self, mapper: F) -> Map<T, U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
    {
        Map::new(self.boxed(), mapper, None)
    }

    /// Like [`ArbitraryExt::map`], with an inverse so that values seen
    /// without a context can still be shrunk
    fn map_with_inverse<U, F, G>(self, mapper: F, unmapper: G) -> Map<T, U>
    where
        U: 'static,
        F: Fn(&T) -> U + 'static,
        G: Fn(&U) -> Option<T> + 'static,
    {
        let unmapper: Rc<dyn Fn(&U) -> Option<T>> = Rc::new(unmapper);
        Map::new(self.boxed(), mapper, Some(unmapper))
    }

    /// Only keep values satisfying `predicate`
    ///
    /// Generation retries until the predicate holds, without bound.
    fn filter<F>(self, predicate: F) -> Filter<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        Filter::new(self.boxed(), predicate)
    }

    /// Generate a second value from an arbitrary chosen by the first one
    fn chain<U, F>(self, chainer: F) -> Chain<T, U>
    where
        T: Clone,
        U: 'static,
        F: Fn(&T) -> BoxedArbitrary<U> + 'static,
    {
        Chain::new(self.boxed(), chainer)
    }

    /// Disable shrinking
    fn no_shrink(self) -> NoShrink<T> {
        NoShrink::new(self.boxed())
    }

    /// Generate without bias, for this arbitrary and all of its children
    fn no_bias(self) -> NoBias<T> {
        NoBias::new(self.boxed())
    }

    /// Generate with a fixed bias factor, ignoring the caller's one
    ///
    /// A factor of zero is treated as one (always biased).
    fn with_bias(self, frequency: u32) -> WithBias<T> {
        WithBias::new(self.boxed(), frequency)
    }

    /// Pair this arbitrary with another
    fn zip<U, A>(self, other: A) -> Zip<T, U>
    where
        T: Clone,
        U: Clone + 'static,
        A: Arbitrary<U> + 'static,
    {
        Zip::new(self.boxed(), BoxedArbitrary::new(other))
    }

    /// Erase the concrete type
    fn boxed(self) -> BoxedArbitrary<T> {
        BoxedArbitrary::new(self)
    }
}

impl<T: 'static, A: Arbitrary<T> + 'static> ArbitraryExt<T> for A {}
