use std::rc::Rc;

use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// Arbitrary produced by [`crate::ArbitraryExt::filter`]
pub struct Filter<T> {
    source: BoxedArbitrary<T>,
    predicate: Rc<dyn Fn(&T) -> bool>,
}

impl<T: 'static> Filter<T> {
    pub(crate) fn new<F>(source: BoxedArbitrary<T>, predicate: F) -> Self
    where
        F: Fn(&T) -> bool + 'static,
    {
        Self {
            source,
            predicate: Rc::new(predicate),
        }
    }
}

impl<T: 'static> Arbitrary<T> for Filter<T> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        loop {
            let candidate = self.source.generate(rng, bias_factor);
            if (self.predicate)(candidate.value()) {
                return candidate;
            }
        }
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.source.can_shrink_without_context(value) && (self.predicate)(value)
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        let predicate = Rc::clone(&self.predicate);
        self.source
            .shrink(value, context)
            .filter(move |v| predicate(v.value()))
    }
}
