use super::array_int64::ArrayInt64;
use super::float_index::{double_to_index, index_to_double};
use super::int64::ArrayInt64Arbitrary;
use crate::arbitrary::{Arbitrary, ArbitraryExt};
use crate::combinators::Map;
use crate::config::DoubleConstraints;
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// 64-bit floats, generated and shrunk through their [`ArrayInt64`] index
pub struct DoubleArbitrary {
    inner: Map<ArrayInt64, f64>,
}

/// Doubles in `min..=max`, optionally including NaN
pub fn double(constraints: DoubleConstraints) -> Result<DoubleArbitrary, ConstraintError> {
    let (default_min, default_max) = if constraints.no_default_infinity {
        (-f64::MAX, f64::MAX)
    } else {
        (f64::NEG_INFINITY, f64::INFINITY)
    };
    let min = constraints.min.unwrap_or(default_min);
    let max = constraints.max.unwrap_or(default_max);
    if min.is_nan() {
        return Err(ConstraintError::NaNBound {
            arbitrary: "double",
            field: "min",
        });
    }
    if max.is_nan() {
        return Err(ConstraintError::NaNBound {
            arbitrary: "double",
            field: "max",
        });
    }

    let one = ArrayInt64::from_i64(1);
    let mut min_index = double_to_index(min);
    let mut max_index = double_to_index(max);
    if constraints.min_excluded {
        min_index = min_index + one;
    }
    if constraints.max_excluded {
        max_index = max_index - one;
    }
    if min_index > max_index {
        return Err(ConstraintError::min_greater_than_max("double", min, max));
    }

    let inner = if constraints.no_nan {
        ArrayInt64Arbitrary::from_bounds(min_index, max_index)?.map_with_inverse(
            |index| index_to_double(*index),
            |value: &f64| (!value.is_nan()).then(|| double_to_index(*value)),
        )
    } else {
        let nan_index = if max_index.is_strictly_positive() {
            max_index + one
        } else {
            min_index - one
        };
        let domain = ArrayInt64Arbitrary::from_bounds(
            min_index.min(nan_index),
            max_index.max(nan_index),
        )?;
        domain.map_with_inverse(
            move |index| {
                if *index == nan_index {
                    f64::NAN
                } else {
                    index_to_double(*index)
                }
            },
            move |value: &f64| {
                if value.is_nan() {
                    return Some(nan_index);
                }
                let index = double_to_index(*value);
                (min_index <= index && index <= max_index).then_some(index)
            },
        )
    };
    Ok(DoubleArbitrary { inner })
}

impl Arbitrary<f64> for DoubleArbitrary {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<f64> {
        self.inner.generate(rng, bias_factor)
    }

    fn can_shrink_without_context(&self, value: &f64) -> bool {
        self.inner.can_shrink_without_context(value)
    }

    fn shrink(&self, value: &f64, context: Option<&Context>) -> Stream<Value<f64>> {
        self.inner.shrink(value, context)
    }
}
