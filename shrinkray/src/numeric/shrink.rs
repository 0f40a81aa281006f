use std::cell::OnceCell;

use super::Integral;
use super::bias::{BiasedRange, biased_ranges, pick_biased};
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value, downcast};

/// Context of a shrunk integer: the last value known to be on the passing
/// side, used as the target of the next shrink
#[derive(Debug, Clone)]
pub(crate) struct ShrinkTarget<N>(pub(crate) N);

/// Candidates moving `current` toward `target` by halving the gap
///
/// With `try_target_asap` the target itself comes first; otherwise the first
/// step removes half of the gap. Every candidate carries the previously
/// emitted one (or `target`) as its context.
pub(crate) fn shrink_toward<N: Integral>(
    current: N,
    target: N,
    try_target_asap: bool,
) -> Stream<Value<N>> {
    let real_gap = current.clone() - target.clone();
    let mut previous = if try_target_asap {
        None
    } else {
        Some(target.clone())
    };
    let mut to_remove = if try_target_asap {
        real_gap.clone()
    } else {
        real_gap.halve()
    };

    Stream::new(std::iter::from_fn(move || {
        if to_remove.is_zero() {
            return None;
        }
        let next = if to_remove == real_gap {
            target.clone()
        } else {
            current.clone() - to_remove.clone()
        };
        let context = previous.replace(next.clone()).map(ShrinkTarget);
        to_remove = to_remove.halve();
        Some(match context {
            Some(ctx) => Value::with_context(next, ctx),
            None => Value::without_context(next),
        })
    }))
}

/// Bounds and lazily computed bias table shared by every integral arbitrary
pub(crate) struct IntegralDomain<N> {
    min: N,
    max: N,
    max_generated: N,
    biased: OnceCell<Vec<BiasedRange<N>>>,
}

impl<N: Integral> IntegralDomain<N> {
    /// Generate in `min..=max_generated`, recognise and shrink in `min..=max`
    ///
    /// Callers guarantee `min <= max_generated <= max`.
    pub(crate) fn new(min: N, max_generated: N, max: N) -> Self {
        Self {
            min,
            max,
            max_generated,
            biased: OnceCell::new(),
        }
    }

    pub(crate) fn min(&self) -> &N {
        &self.min
    }

    pub(crate) fn max(&self) -> &N {
        &self.max
    }

    pub(crate) fn contains(&self, value: &N) -> bool {
        self.min <= *value && *value <= self.max
    }

    pub(crate) fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> N {
        let ranges = self
            .biased
            .get_or_init(|| biased_ranges(&self.min, &self.max_generated));
        match pick_biased(rng, bias_factor, ranges) {
            Some(range) => N::draw(rng, &range.min, &range.max),
            None => N::draw(rng, &self.min, &self.max_generated),
        }
    }

    /// Zero when in range, otherwise the bound closest to zero
    pub(crate) fn default_target(&self) -> N {
        let zero = N::zero();
        if self.min <= zero && self.max >= zero {
            zero
        } else if self.min < zero {
            self.max.clone()
        } else {
            self.min.clone()
        }
    }

    /// A stored target is usable when it is zero or on the same side of zero
    fn is_valid_target(current: &N, target: &N) -> bool {
        let zero = N::zero();
        target.is_zero() || ((*current > zero) == (*target > zero) && !current.is_zero())
    }

    /// The neighbour of the target was emitted by halving but the target
    /// itself may not have been; try it alone before giving up
    fn is_last_chance(&self, current: &N, target: &N) -> bool {
        let zero = N::zero();
        if *current > zero {
            *current == target.clone() + N::unit() && *current > self.min
        } else if *current < zero {
            *current == target.clone() - N::unit() && *current < self.max
        } else {
            false
        }
    }

    pub(crate) fn shrink(&self, current: N, context: Option<&Context>) -> Stream<Value<N>> {
        match downcast::<ShrinkTarget<N>>(context) {
            Some(ShrinkTarget(target)) if Self::is_valid_target(&current, target) => {
                if self.is_last_chance(&current, target) {
                    Stream::once(Value::without_context(target.clone()))
                } else {
                    shrink_toward(current, target.clone(), false)
                }
            }
            _ => shrink_toward(current, self.default_target(), true),
        }
    }
}
