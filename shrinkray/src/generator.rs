//! Adapters between context-free generators and context-carrying arbitraries.

use rand::RngCore;

use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::config::GeneratorConfig;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// Context-free generator contract
///
/// Shrinking starts from the value alone, so every call re-derives whatever
/// state it needs. Prefer [`Arbitrary`] for new code; the adapters below
/// convert in both directions.
pub trait Generator<T> {
    /// Generate a random value of type T using the provided RNG and configuration
    fn generate(&self, rng: &mut dyn RngCore, config: &GeneratorConfig) -> T;

    /// Create an iterator of shrunk values from the given value
    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>>;
}

/// Use a [`Generator`] where an [`Arbitrary`] is expected
///
/// Values carry no context and every value is considered shrinkable.
pub struct FromGenerator<G> {
    generator: G,
}

impl<G> FromGenerator<G> {
    pub fn new(generator: G) -> Self {
        Self { generator }
    }
}

impl<T: 'static, G: Generator<T>> Arbitrary<T> for FromGenerator<G> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        let config = GeneratorConfig { bias_factor };
        Value::without_context(self.generator.generate(rng, &config))
    }

    fn can_shrink_without_context(&self, _value: &T) -> bool {
        true
    }

    fn shrink(&self, value: &T, _context: Option<&Context>) -> Stream<Value<T>> {
        Stream::new(self.generator.shrink(value).map(Value::without_context))
    }
}

/// Use an [`Arbitrary`] where a [`Generator`] is expected
///
/// Each `shrink` call starts without a context, so shrinking restarts from
/// the value every time.
pub struct AsGenerator<T> {
    arbitrary: BoxedArbitrary<T>,
}

impl<T: 'static> AsGenerator<T> {
    pub fn new(arbitrary: impl Arbitrary<T> + 'static) -> Self {
        Self {
            arbitrary: BoxedArbitrary::new(arbitrary),
        }
    }
}

impl<T: 'static> Generator<T> for AsGenerator<T> {
    fn generate(&self, rng: &mut dyn RngCore, config: &GeneratorConfig) -> T {
        let mut random = Random::from_rng(rng);
        self.arbitrary
            .generate(&mut random, config.bias_factor)
            .into_value()
    }

    fn shrink(&self, value: &T) -> Box<dyn Iterator<Item = T>> {
        Box::new(self.arbitrary.shrink(value, None).map(Value::into_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IntegerConstraints;
    use crate::numeric::integer;

    /// Even numbers below a bound, shrinking by halving
    struct EvenGenerator {
        max: u32,
    }

    impl Generator<u32> for EvenGenerator {
        fn generate(&self, rng: &mut dyn RngCore, config: &GeneratorConfig) -> u32 {
            if config.bias_factor == Some(1) {
                return 0;
            }
            (rng.next_u32() % (self.max / 2)) * 2
        }

        fn shrink(&self, value: &u32) -> Box<dyn Iterator<Item = u32>> {
            let start = *value;
            Box::new(
                std::iter::successors(Some(start / 2), |v| (*v > 0).then(|| v / 2))
                    .map(|v| v - v % 2),
            )
        }
    }

    #[test]
    fn test_from_generator_passes_bias_and_shrinks() {
        let arb = FromGenerator::new(EvenGenerator { max: 100 });
        let mut rng = Random::new(1);
        assert_eq!(*arb.generate(&mut rng, Some(1)).value(), 0);
        for _ in 0..50 {
            assert_eq!(arb.generate(&mut rng, None).value() % 2, 0);
        }
        assert!(arb.can_shrink_without_context(&7));
        let shrunk: Vec<u32> = arb.shrink(&40, None).map(Value::into_value).collect();
        assert_eq!(shrunk, vec![20, 10, 4, 2, 0, 0]);
    }

    #[test]
    fn test_as_generator_round_trip() {
        let generator = AsGenerator::new(integer(IntegerConstraints { min: -10, max: 10 }).unwrap());
        let mut rng = rand::rngs::mock::StepRng::new(3, 7);
        let config = GeneratorConfig::default();
        for _ in 0..20 {
            let v = generator.generate(&mut rng, &config);
            assert!((-10..=10).contains(&v));
        }
        let shrunk: Vec<i32> = generator.shrink(&8).collect();
        assert_eq!(shrunk, vec![0, 4, 6, 7]);
    }
}
