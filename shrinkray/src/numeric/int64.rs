use super::array_int64::ArrayInt64;
use super::shrink::IntegralDomain;
use crate::arbitrary::Arbitrary;
use crate::config::Int64Constraints;
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// 64-bit integers in sign-magnitude form
pub struct ArrayInt64Arbitrary {
    domain: IntegralDomain<ArrayInt64>,
}

/// 64-bit integers in `min..=max`
///
/// Both bounds must fit in an `i64`, which keeps every gap between two values
/// within the 64-bit magnitude.
pub fn int64(constraints: Int64Constraints) -> Result<ArrayInt64Arbitrary, ConstraintError> {
    let Int64Constraints { min, max } = constraints;
    let to_bound = |field: &'static str, value: i128| {
        i64::try_from(value)
            .map(ArrayInt64::from_i64)
            .map_err(|_| ConstraintError::out_of_range("int64", field, value))
    };
    let min = to_bound("min", min)?;
    let max = to_bound("max", max)?;
    ArrayInt64Arbitrary::from_bounds(min, max)
}

impl ArrayInt64Arbitrary {
    pub(crate) fn from_bounds(min: ArrayInt64, max: ArrayInt64) -> Result<Self, ConstraintError> {
        if min > max {
            return Err(ConstraintError::min_greater_than_max("int64", min, max));
        }
        Ok(Self {
            domain: IntegralDomain::new(min, max, max),
        })
    }
}

impl Arbitrary<ArrayInt64> for ArrayInt64Arbitrary {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<ArrayInt64> {
        Value::without_context(self.domain.generate(rng, bias_factor))
    }

    fn can_shrink_without_context(&self, value: &ArrayInt64) -> bool {
        self.domain.contains(value)
    }

    fn shrink(&self, value: &ArrayInt64, context: Option<&Context>) -> Stream<Value<ArrayInt64>> {
        self.domain.shrink(*value, context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a(v: i64) -> ArrayInt64 {
        ArrayInt64::from_i64(v)
    }

    #[test]
    fn test_rejects_out_of_range_bounds() {
        let too_wide = Int64Constraints {
            min: i128::from(i64::MIN) - 1,
            max: 0,
        };
        assert!(matches!(
            int64(too_wide),
            Err(ConstraintError::OutOfRange { field: "min", .. })
        ));
        let inverted = Int64Constraints { min: 1, max: 0 };
        assert!(matches!(
            int64(inverted),
            Err(ConstraintError::MinGreaterThanMax { .. })
        ));
    }

    #[test]
    fn test_generate_in_bounds_with_and_without_bias() {
        let arb = int64(Int64Constraints {
            min: -(1 << 40),
            max: 1 << 50,
        })
        .unwrap();
        let mut rng = Random::new(12);
        for bias in [None, Some(1), Some(3)] {
            for _ in 0..200 {
                let v = arb.generate(&mut rng, bias).into_value().to_i128();
                assert!((-(1 << 40)..=(1 << 50)).contains(&v));
            }
        }
    }

    #[test]
    fn test_shrink_extremes() {
        let arb = int64(Int64Constraints::default()).unwrap();
        let from_min: Vec<ArrayInt64> = arb
            .shrink(&a(i64::MIN), None)
            .map(|v| v.into_value())
            .collect();
        assert_eq!(from_min.len(), 64);
        assert_eq!(from_min[0], a(0));
        assert_eq!(from_min[1], a(i64::MIN / 2));
        assert_eq!(from_min[63], a(i64::MIN + 1));
    }

    #[test]
    fn test_last_chance_probe() {
        let arb = int64(Int64Constraints::default()).unwrap();
        let step = arb
            .shrink(&a(1 << 33), None)
            .nth(1)
            .unwrap();
        // Second candidate removes half the gap, with zero as its context
        assert_eq!(*step.value(), a(1 << 32));
        let next: Vec<_> = arb
            .shrink(step.value(), step.context())
            .map(|v| v.into_value())
            .collect();
        assert_eq!(next.first(), Some(&a(1 << 31)));
        assert!(next.iter().all(|v| *v < a(1 << 32) && *v > a(0)));

        let resumed = arb
            .shrink(&a(1 << 32), step.context())
            .last()
            .unwrap();
        assert_eq!(*resumed.value(), a((1 << 32) - 1));
        let probe: Vec<_> = arb
            .shrink(resumed.value(), resumed.context())
            .map(|v| v.into_value())
            .collect();
        assert_eq!(probe, vec![a((1 << 32) - 2)]);
    }
}
