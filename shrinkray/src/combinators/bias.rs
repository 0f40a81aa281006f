use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// Arbitrary produced by [`crate::ArbitraryExt::no_shrink`]
pub struct NoShrink<T> {
    source: BoxedArbitrary<T>,
}

impl<T: 'static> NoShrink<T> {
    pub(crate) fn new(source: BoxedArbitrary<T>) -> Self {
        Self { source }
    }
}

impl<T: 'static> Arbitrary<T> for NoShrink<T> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        self.source.generate(rng, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.source.can_shrink_without_context(value)
    }

    fn shrink(&self, _value: &T, _context: Option<&Context>) -> Stream<Value<T>> {
        Stream::nil()
    }
}

/// Arbitrary produced by [`crate::ArbitraryExt::no_bias`]
pub struct NoBias<T> {
    source: BoxedArbitrary<T>,
}

impl<T: 'static> NoBias<T> {
    pub(crate) fn new(source: BoxedArbitrary<T>) -> Self {
        Self { source }
    }
}

impl<T: 'static> Arbitrary<T> for NoBias<T> {
    fn generate(&self, rng: &mut Random, _bias_factor: Option<u32>) -> Value<T> {
        self.source.generate(rng, None)
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.source.can_shrink_without_context(value)
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        self.source.shrink(value, context)
    }
}

/// Arbitrary produced by [`crate::ArbitraryExt::with_bias`]
pub struct WithBias<T> {
    source: BoxedArbitrary<T>,
    frequency: u32,
}

impl<T: 'static> WithBias<T> {
    pub(crate) fn new(source: BoxedArbitrary<T>, frequency: u32) -> Self {
        Self {
            source,
            frequency: frequency.max(1),
        }
    }
}

impl<T: 'static> Arbitrary<T> for WithBias<T> {
    fn generate(&self, rng: &mut Random, _bias_factor: Option<u32>) -> Value<T> {
        self.source.generate(rng, Some(self.frequency))
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.source.can_shrink_without_context(value)
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        self.source.shrink(value, context)
    }
}

#[cfg(test)]
mod tests {
    use crate::arbitrary::{Arbitrary, ArbitraryExt};
    use crate::config::IntegerConstraints;
    use crate::numeric::integer;
    use crate::rng::Random;

    fn wide() -> crate::numeric::IntegerArbitrary {
        integer(IntegerConstraints::default()).unwrap()
    }

    #[test]
    fn test_no_shrink_is_empty_but_recognises() {
        let arb = wide().no_shrink();
        assert_eq!(arb.shrink(&1_000, None).count(), 0);
        assert!(arb.can_shrink_without_context(&1_000));
    }

    #[test]
    fn test_with_bias_one_always_draws_small_values() {
        // Every draw is biased: the widest biased zone is within log2 of the bounds
        let arb = wide().with_bias(1);
        let mut rng = Random::new(4);
        for _ in 0..500 {
            let v = *arb.generate(&mut rng, None).value();
            let near_zero = (-31..=30).contains(&v);
            let near_max = v >= i32::MAX - 30;
            let near_min = v <= i32::MIN + 31;
            assert!(near_zero || near_max || near_min, "unexpected {}", v);
        }
    }

    #[test]
    fn test_with_bias_zero_is_clamped() {
        let arb = wide().with_bias(0);
        let mut rng = Random::new(4);
        let v = *arb.generate(&mut rng, None).value();
        assert!(v.unsigned_abs() <= 31 || v >= i32::MAX - 30 || v <= i32::MIN + 31);
    }

    #[test]
    fn test_no_bias_overrides_caller_bias() {
        let arb = wide().no_bias();
        let mut rng = Random::new(9);
        let far = (0..200)
            .map(|_| *arb.generate(&mut rng, Some(1)).value())
            .filter(|v| v.unsigned_abs() > 1_000_000)
            .count();
        assert!(far > 150);
    }
}
