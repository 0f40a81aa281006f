use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value, downcast};

/// Pairs of independently generated values
pub struct Zip<A, B> {
    left: BoxedArbitrary<A>,
    right: BoxedArbitrary<B>,
}

#[derive(Clone)]
struct ZipContext {
    left: Option<Context>,
    right: Option<Context>,
}

/// Arbitrary over pairs `(a, b)`
pub fn zip<A, B>(left: impl Arbitrary<A> + 'static, right: impl Arbitrary<B> + 'static) -> Zip<A, B>
where
    A: Clone + 'static,
    B: Clone + 'static,
{
    Zip::new(BoxedArbitrary::new(left), BoxedArbitrary::new(right))
}

impl<A: Clone + 'static, B: Clone + 'static> Zip<A, B> {
    pub(crate) fn new(left: BoxedArbitrary<A>, right: BoxedArbitrary<B>) -> Self {
        Self { left, right }
    }
}

impl<A: Clone + 'static, B: Clone + 'static> Arbitrary<(A, B)> for Zip<A, B> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<(A, B)> {
        let (a, left) = self.left.generate(rng, bias_factor).into_parts();
        let (b, right) = self.right.generate(rng, bias_factor).into_parts();
        Value::with_context((a, b), ZipContext { left, right })
    }

    fn can_shrink_without_context(&self, value: &(A, B)) -> bool {
        self.left.can_shrink_without_context(&value.0)
            && self.right.can_shrink_without_context(&value.1)
    }

    fn shrink(&self, value: &(A, B), context: Option<&Context>) -> Stream<Value<(A, B)>> {
        let ctx = downcast::<ZipContext>(context).cloned().unwrap_or(ZipContext {
            left: None,
            right: None,
        });

        let (a, b) = value.clone();
        let right_context = ctx.right.clone();
        let left_shrinks = self
            .left
            .shrink(&value.0, ctx.left.as_ref())
            .map(move |v| {
                let (shrunk, left) = v.into_parts();
                Value::with_context(
                    (shrunk, b.clone()),
                    ZipContext {
                        left,
                        right: right_context.clone(),
                    },
                )
            });

        let right = self.right.clone();
        let b = value.1.clone();
        let right_shrinks = Stream::lazy(move || {
            let left_context = ctx.left;
            right.shrink(&b, ctx.right.as_ref()).map(move |v| {
                let (shrunk, right) = v.into_parts();
                Value::with_context(
                    (a.clone(), shrunk),
                    ZipContext {
                        left: left_context.clone(),
                        right,
                    },
                )
            })
        });

        left_shrinks.join(right_shrinks)
    }
}
