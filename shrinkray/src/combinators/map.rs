use std::rc::Rc;

use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value, downcast};

type Mapper<T, U> = Rc<dyn Fn(&T) -> U>;
type Unmapper<T, U> = Rc<dyn Fn(&U) -> Option<T>>;

/// Arbitrary produced by [`crate::ArbitraryExt::map`]
pub struct Map<T, U> {
    source: BoxedArbitrary<T>,
    mapper: Mapper<T, U>,
    unmapper: Option<Unmapper<T, U>>,
}

/// Pre-image of a mapped value
struct MapContext<T> {
    original_value: T,
    original_context: Option<Context>,
}

impl<T: 'static, U: 'static> Map<T, U> {
    pub(crate) fn new<F>(
        source: BoxedArbitrary<T>,
        mapper: F,
        unmapper: Option<Unmapper<T, U>>,
    ) -> Self
    where
        F: Fn(&T) -> U + 'static,
    {
        Self {
            source,
            mapper: Rc::new(mapper),
            unmapper,
        }
    }

    fn wrap(mapper: &Mapper<T, U>, source_value: Value<T>) -> Value<U> {
        let (original_value, original_context) = source_value.into_parts();
        let mapped = mapper(&original_value);
        Value::with_context(
            mapped,
            MapContext {
                original_value,
                original_context,
            },
        )
    }
}

impl<T: 'static, U: 'static> Arbitrary<U> for Map<T, U> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<U> {
        Self::wrap(&self.mapper, self.source.generate(rng, bias_factor))
    }

    fn can_shrink_without_context(&self, value: &U) -> bool {
        match &self.unmapper {
            Some(unmapper) => unmapper(value)
                .is_some_and(|original| self.source.can_shrink_without_context(&original)),
            None => false,
        }
    }

    fn shrink(&self, value: &U, context: Option<&Context>) -> Stream<Value<U>> {
        let mapper = Rc::clone(&self.mapper);
        if let Some(ctx) = downcast::<MapContext<T>>(context) {
            return self
                .source
                .shrink(&ctx.original_value, ctx.original_context.as_ref())
                .map(move |v| Self::wrap(&mapper, v));
        }

        let Some(unmapper) = &self.unmapper else {
            return Stream::nil();
        };
        match unmapper(value) {
            Some(original) if self.source.can_shrink_without_context(&original) => self
                .source
                .shrink(&original, None)
                .map(move |v| Self::wrap(&mapper, v)),
            _ => Stream::nil(),
        }
    }
}
