use super::float_index::{float_to_index, index_to_float};
use super::integer::{IntegerArbitrary, integer};
use crate::arbitrary::{Arbitrary, ArbitraryExt};
use crate::combinators::Map;
use crate::config::{FloatConstraints, IntegerConstraints};
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// 32-bit floats, generated and shrunk through their integer index
pub struct FloatArbitrary {
    inner: Map<i32, f32>,
}

/// Floats in `min..=max`, optionally including NaN
pub fn float(constraints: FloatConstraints) -> Result<FloatArbitrary, ConstraintError> {
    let (default_min, default_max) = if constraints.no_default_infinity {
        (-f32::MAX, f32::MAX)
    } else {
        (f32::NEG_INFINITY, f32::INFINITY)
    };
    let min = constraints.min.unwrap_or(default_min);
    let max = constraints.max.unwrap_or(default_max);
    if min.is_nan() {
        return Err(ConstraintError::NaNBound {
            arbitrary: "float",
            field: "min",
        });
    }
    if max.is_nan() {
        return Err(ConstraintError::NaNBound {
            arbitrary: "float",
            field: "max",
        });
    }

    let min_index = float_to_index(min) + i32::from(constraints.min_excluded);
    let max_index = float_to_index(max) - i32::from(constraints.max_excluded);
    if min_index > max_index {
        return Err(ConstraintError::min_greater_than_max("float", min, max));
    }

    let inner = if constraints.no_nan {
        indices(min_index, max_index)?.map_with_inverse(
            |index| index_to_float(*index),
            |value: &f32| (!value.is_nan()).then(|| float_to_index(*value)),
        )
    } else {
        // NaN takes one extra slot at the end facing away from zero
        let nan_index = if max_index > 0 {
            max_index + 1
        } else {
            min_index - 1
        };
        indices(min_index.min(nan_index), max_index.max(nan_index))?.map_with_inverse(
            move |index| {
                if *index == nan_index {
                    f32::NAN
                } else {
                    index_to_float(*index)
                }
            },
            move |value: &f32| {
                if value.is_nan() {
                    return Some(nan_index);
                }
                let index = float_to_index(*value);
                (min_index..=max_index).contains(&index).then_some(index)
            },
        )
    };
    Ok(FloatArbitrary { inner })
}

fn indices(min: i32, max: i32) -> Result<IntegerArbitrary, ConstraintError> {
    integer(IntegerConstraints { min, max })
}

impl Arbitrary<f32> for FloatArbitrary {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<f32> {
        self.inner.generate(rng, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &f32) -> bool {
        self.inner.can_shrink_without_context(value)
    }

    fn shrink(&self, value: &f32, context: Option<&Context>) -> Stream<Value<f32>> {
        self.inner.shrink(value, context)
    }
}
