use std::rc::Rc;

use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value, downcast};

type Chainer<T, U> = Rc<dyn Fn(&T) -> BoxedArbitrary<U>>;

/// Arbitrary produced by [`crate::ArbitraryExt::chain`]
///
/// The chained arbitrary depends on the source value, so shrinking the source
/// means regenerating the dependent value. Regeneration always starts from the
/// random state captured before the original source draw, which keeps shrink
/// candidates reproducible.
pub struct Chain<T, U> {
    source: BoxedArbitrary<T>,
    chainer: Chainer<T, U>,
}

struct ChainContext<T, U> {
    original_bias: Option<u32>,
    original_value: T,
    original_context: Option<Context>,
    /// Set once shrinking has moved into the chained value; the source is
    /// then frozen
    stopped_for_original: bool,
    chained_arbitrary: BoxedArbitrary<U>,
    chained_context: Option<Context>,
    cloned_rng: Random,
}

impl<T: Clone, U> Clone for ChainContext<T, U> {
    fn clone(&self) -> Self {
        Self {
            original_bias: self.original_bias,
            original_value: self.original_value.clone(),
            original_context: self.original_context.clone(),
            stopped_for_original: self.stopped_for_original,
            chained_arbitrary: self.chained_arbitrary.clone(),
            chained_context: self.chained_context.clone(),
            cloned_rng: self.cloned_rng.clone(),
        }
    }
}

impl<T: Clone + 'static, U: 'static> Chain<T, U> {
    pub(crate) fn new<F>(source: BoxedArbitrary<T>, chainer: F) -> Self
    where
        F: Fn(&T) -> BoxedArbitrary<U> + 'static,
    {
        Self {
            source,
            chainer: Rc::new(chainer),
        }
    }

    /// Draw the dependent value for `source_value` on `generate_rng`
    fn chain_value(
        chainer: &Chainer<T, U>,
        source_value: Value<T>,
        generate_rng: &mut Random,
        cloned_rng: Random,
        bias_factor: Option<u32>,
    ) -> Value<U> {
        let (original_value, original_context) = source_value.into_parts();
        let chained_arbitrary = chainer(&original_value);
        let (chained, chained_context) = chained_arbitrary
            .generate(generate_rng, bias_factor)
            .into_parts();
        Value::with_context(
            chained,
            ChainContext {
                original_bias: bias_factor,
                original_value,
                original_context,
                stopped_for_original: false,
                chained_arbitrary,
                chained_context,
                cloned_rng,
            },
        )
    }
}

impl<T: Clone + 'static, U: 'static> Arbitrary<U> for Chain<T, U> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<U> {
        let cloned_rng = rng.clone();
        let source_value = self.source.generate(rng, bias_factor);
        Self::chain_value(&self.chainer, source_value, rng, cloned_rng, bias_factor)
    }

    fn can_shrink_without_context(&self, _value: &U) -> bool {
        false
    }

    fn shrink(&self, value: &U, context: Option<&Context>) -> Stream<Value<U>> {
        let Some(ctx) = downcast::<ChainContext<T, U>>(context) else {
            return Stream::nil();
        };

        let source_shrinks = if ctx.stopped_for_original {
            Stream::nil()
        } else {
            let source = self.source.clone();
            let chainer = Rc::clone(&self.chainer);
            let ctx = ctx.clone();
            Stream::lazy(move || {
                let fork = ctx.cloned_rng;
                let bias = ctx.original_bias;
                source
                    .shrink(&ctx.original_value, ctx.original_context.as_ref())
                    .map(move |v| {
                        let mut generate_rng = fork.clone();
                        Self::chain_value(&chainer, v, &mut generate_rng, fork.clone(), bias)
                    })
            })
        };

        let base = ctx.clone();
        let chained_shrinks = ctx
            .chained_arbitrary
            .shrink(value, ctx.chained_context.as_ref())
            .map(move |v| {
                let (chained, chained_context) = v.into_parts();
                let mut next = base.clone();
                next.stopped_for_original = true;
                next.chained_context = chained_context;
                Value::with_context(chained, next)
            });

        source_shrinks.join(chained_shrinks)
    }
}
