use crate::arbitrary::{Arbitrary, BoxedArbitrary};
use crate::depth::DepthContext;
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value, downcast};

/// An arbitrary with its relative selection weight
pub struct WeightedArbitrary<T> {
    pub weight: u32,
    pub arbitrary: BoxedArbitrary<T>,
}

impl<T: 'static> WeightedArbitrary<T> {
    pub fn new(weight: u32, arbitrary: impl Arbitrary<T> + 'static) -> Self {
        Self {
            weight,
            arbitrary: BoxedArbitrary::new(arbitrary),
        }
    }
}

impl<T> Clone for WeightedArbitrary<T> {
    fn clone(&self) -> Self {
        Self {
            weight: self.weight,
            arbitrary: self.arbitrary.clone(),
        }
    }
}

/// Options for [`one_of`] and [`frequency`]
#[derive(Debug, Clone, Default)]
pub struct OneOfConstraints {
    /// Once the depth context reaches this depth, only the first arbitrary is used
    pub max_depth: Option<usize>,
    /// Depth counter shared with the other choices of a recursive structure
    pub depth_context: Option<DepthContext>,
    /// When shrinking a value drawn from another arbitrary, first try a value
    /// drawn from the first one
    pub with_cross_shrink: bool,
}

/// Weighted choice between arbitraries
pub struct Frequency<T> {
    arbitraries: Vec<WeightedArbitrary<T>>,
    cumulative: Vec<u64>,
    total_weight: u64,
    max_depth: usize,
    depth_context: DepthContext,
    with_cross_shrink: bool,
}

struct FrequencyContext {
    selected_index: usize,
    original_context: Option<Context>,
    original_bias: Option<u32>,
    fallback_rng: Option<Random>,
}

/// Uniform choice between `arbitraries`
pub fn one_of<T: 'static>(
    arbitraries: Vec<BoxedArbitrary<T>>,
    constraints: OneOfConstraints,
) -> Result<Frequency<T>, ConstraintError> {
    let weighted = arbitraries
        .into_iter()
        .map(|arbitrary| WeightedArbitrary {
            weight: 1,
            arbitrary,
        })
        .collect();
    frequency(weighted, constraints)
}

/// Weighted choice between `arbitraries`
pub fn frequency<T: 'static>(
    arbitraries: Vec<WeightedArbitrary<T>>,
    constraints: OneOfConstraints,
) -> Result<Frequency<T>, ConstraintError> {
    if arbitraries.is_empty() {
        return Err(ConstraintError::EmptyChoice);
    }

    let mut cumulative = Vec::with_capacity(arbitraries.len());
    let mut total_weight = 0u64;
    for weighted in &arbitraries {
        total_weight += u64::from(weighted.weight);
        cumulative.push(total_weight);
    }
    if total_weight == 0 || total_weight > i32::MAX as u64 {
        return Err(ConstraintError::InvalidWeights {
            total: total_weight,
        });
    }

    Ok(Frequency {
        arbitraries,
        cumulative,
        total_weight,
        max_depth: constraints.max_depth.unwrap_or(usize::MAX),
        depth_context: constraints.depth_context.unwrap_or_default(),
        with_cross_shrink: constraints.with_cross_shrink,
    })
}

impl<T: 'static> Frequency<T> {
    fn must_generate_first(&self) -> bool {
        self.depth_context.depth() >= self.max_depth
    }

    fn must_fallback_to_first(&self, index: usize) -> bool {
        index != 0 && self.with_cross_shrink && self.arbitraries[0].weight != 0
    }

    fn generate_for_index(
        &self,
        rng: &mut Random,
        index: usize,
        bias_factor: Option<u32>,
    ) -> Value<T> {
        let _depth = self.depth_context.enter();
        let (value, original_context) = self.arbitraries[index]
            .arbitrary
            .generate(rng, bias_factor)
            .into_parts();
        let fallback_rng = self
            .must_fallback_to_first(index)
            .then(|| rng.clone());
        Value::with_context(
            value,
            FrequencyContext {
                selected_index: index,
                original_context,
                original_bias: bias_factor,
                fallback_rng,
            },
        )
    }

    /// Index of the first arbitrary able to shrink `value` without context
    fn recognising_index(&self, value: &T) -> Option<usize> {
        if self.must_generate_first() {
            return self.arbitraries[0]
                .arbitrary
                .can_shrink_without_context(value)
                .then_some(0);
        }
        let _depth = self.depth_context.enter();
        self.arbitraries
            .iter()
            .position(|w| w.weight != 0 && w.arbitrary.can_shrink_without_context(value))
    }

    fn tag(index: usize, bias: Option<u32>) -> impl FnMut(Value<T>) -> Value<T> {
        move |v| {
            let (value, original_context) = v.into_parts();
            Value::with_context(
                value,
                FrequencyContext {
                    selected_index: index,
                    original_context,
                    original_bias: bias,
                    fallback_rng: None,
                },
            )
        }
    }
}

impl<T: 'static> Arbitrary<T> for Frequency<T> {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<T> {
        if self.must_generate_first() {
            return self.generate_for_index(rng, 0, bias_factor);
        }
        let last = (self.total_weight - 1) as i32;
        let selected = rng.next_int(0, last) as u64;
        let index = self
            .cumulative
            .iter()
            .position(|&upper| selected < upper)
            .unwrap_or(self.arbitraries.len() - 1);
        self.generate_for_index(rng, index, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &T) -> bool {
        self.recognising_index(value).is_some()
    }

    fn shrink(&self, value: &T, context: Option<&Context>) -> Stream<Value<T>> {
        // A context from a choice with fewer arms falls through to recognition
        let selected = downcast::<FrequencyContext>(context).and_then(|ctx| {
            self.arbitraries
                .get(ctx.selected_index)
                .map(|weighted| (ctx, weighted))
        });
        if let Some((ctx, selected)) = selected {
            let index = ctx.selected_index;
            let bias = ctx.original_bias;
            let own_shrinks = selected
                .arbitrary
                .shrink(value, ctx.original_context.as_ref())
                .map(Self::tag(index, bias));

            let Some(fallback_rng) = ctx.fallback_rng.clone() else {
                return own_shrinks;
            };
            let first = self.arbitraries[0].arbitrary.clone();
            let depth_context = self.depth_context.clone();
            let from_first = Stream::lazy(move || {
                let _depth = depth_context.enter();
                let mut rng = fallback_rng;
                let generated = first.generate(&mut rng, bias);
                Stream::once(generated).map(Self::tag(0, bias))
            });
            return from_first.join(own_shrinks);
        }

        match self.recognising_index(value) {
            Some(index) => self.arbitraries[index]
                .arbitrary
                .shrink(value, None)
                .map(Self::tag(index, None)),
            None => Stream::nil(),
        }
    }
}

impl<T> Clone for Frequency<T> {
    fn clone(&self) -> Self {
        Self {
            arbitraries: self.arbitraries.clone(),
            cumulative: self.cumulative.clone(),
            total_weight: self.total_weight,
            max_depth: self.max_depth,
            depth_context: self.depth_context.clone(),
            with_cross_shrink: self.with_cross_shrink,
        }
    }
}

impl<T> std::fmt::Debug for Frequency<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let weights: Vec<u32> = self.arbitraries.iter().map(|w| w.weight).collect();
        f.debug_struct("Frequency")
            .field("weights", &weights)
            .field("max_depth", &self.max_depth)
            .field("with_cross_shrink", &self.with_cross_shrink)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arbitrary::ArbitraryExt;
    use crate::combinators::constant;
    use crate::config::IntegerConstraints;
    use crate::numeric::integer;

    fn ints(min: i32, max: i32) -> BoxedArbitrary<i32> {
        integer(IntegerConstraints { min, max }).unwrap().boxed()
    }

    #[test]
    fn test_rejects_empty_and_zero_weights() {
        assert_eq!(
            one_of::<i32>(vec![], OneOfConstraints::default()).unwrap_err(),
            ConstraintError::EmptyChoice
        );
        let zero = vec![WeightedArbitrary::new(0, constant(1))];
        assert_eq!(
            frequency(zero, OneOfConstraints::default()).unwrap_err(),
            ConstraintError::InvalidWeights { total: 0 }
        );
    }

    #[test]
    fn test_weights_drive_selection() {
        let arb = frequency(
            vec![
                WeightedArbitrary::new(3, constant(0)),
                WeightedArbitrary::new(1, constant(1)),
                WeightedArbitrary::new(0, constant(2)),
            ],
            OneOfConstraints::default(),
        )
        .unwrap();
        let mut rng = Random::new(123);
        let mut counts = [0usize; 3];
        for _ in 0..4000 {
            counts[*arb.generate(&mut rng, None).value() as usize] += 1;
        }
        assert_eq!(counts[2], 0);
        let ratio = counts[0] as f64 / counts[1] as f64;
        assert!((2.5..3.5).contains(&ratio), "ratio was {}", ratio);
    }

    #[test]
    fn test_shrink_stays_in_selected_arbitrary() {
        let arb = one_of(vec![ints(0, 10), ints(1000, 2000)], OneOfConstraints::default()).unwrap();
        let mut rng = Random::new(42);
        for _ in 0..20 {
            let generated = arb.generate(&mut rng, None);
            let high = *generated.value() >= 1000;
            for shrunk in arb.shrink(generated.value(), generated.context()) {
                assert_eq!(*shrunk.value() >= 1000, high);
            }
        }
    }

    #[test]
    fn test_shrink_without_context_uses_recognising_arbitrary() {
        let arb = one_of(vec![ints(0, 10), ints(1000, 2000)], OneOfConstraints::default()).unwrap();
        assert!(arb.can_shrink_without_context(&1500));
        assert!(!arb.can_shrink_without_context(&500));
        let shrunk: Vec<i32> = arb.shrink(&1004, None).map(|v| v.into_value()).collect();
        assert_eq!(shrunk, vec![1000, 1002, 1003]);
        assert_eq!(arb.shrink(&500, None).count(), 0);
    }

    #[test]
    fn test_foreign_context_with_out_of_range_index() {
        let wide = one_of(
            vec![ints(0, 10), ints(100, 200), ints(2000, 3000)],
            OneOfConstraints::default(),
        )
        .unwrap();
        let narrow = one_of(vec![ints(2000, 3000)], OneOfConstraints::default()).unwrap();

        let mut rng = Random::new(17);
        let generated = loop {
            let v = wide.generate(&mut rng, None);
            if *v.value() > 2000 {
                break v;
            }
        };
        let shrunk: Vec<i32> = narrow
            .shrink(generated.value(), generated.context())
            .map(|v| v.into_value())
            .collect();
        let expected: Vec<i32> = narrow
            .shrink(generated.value(), None)
            .map(|v| v.into_value())
            .collect();
        assert!(!shrunk.is_empty());
        assert_eq!(shrunk, expected);

        let outside = one_of(vec![ints(0, 10)], OneOfConstraints::default()).unwrap();
        assert_eq!(outside.shrink(generated.value(), generated.context()).count(), 0);
    }

    #[test]
    fn test_cross_shrink_offers_first_arbitrary_first() {
        let arb = one_of(
            vec![constant(-1).boxed(), ints(1000, 2000)],
            OneOfConstraints {
                with_cross_shrink: true,
                ..OneOfConstraints::default()
            },
        )
        .unwrap();
        let mut rng = Random::new(5);
        let generated = loop {
            let v = arb.generate(&mut rng, None);
            if *v.value() != -1 {
                break v;
            }
        };
        let first = arb
            .shrink(generated.value(), generated.context())
            .next()
            .unwrap();
        assert_eq!(*first.value(), -1);
    }

    #[test]
    fn test_max_depth_forces_first_arbitrary() {
        let depth = DepthContext::new();
        let arb = one_of(
            vec![constant(0).boxed(), constant(1).boxed()],
            OneOfConstraints {
                max_depth: Some(1),
                depth_context: Some(depth.clone()),
                with_cross_shrink: false,
            },
        )
        .unwrap();
        let _guard = depth.enter();
        let mut rng = Random::new(8);
        for _ in 0..50 {
            assert_eq!(*arb.generate(&mut rng, None).value(), 0);
        }
    }
}
