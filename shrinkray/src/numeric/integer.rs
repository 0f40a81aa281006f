use super::shrink::IntegralDomain;
use crate::arbitrary::Arbitrary;
use crate::config::IntegerConstraints;
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// Signed 32-bit integers with target-directed shrinking
///
/// Arithmetic runs on `i64` so that gaps between any two `i32` values are
/// representable.
pub struct IntegerArbitrary {
    domain: IntegralDomain<i64>,
}

/// Integers in `min..=max`
pub fn integer(constraints: IntegerConstraints) -> Result<IntegerArbitrary, ConstraintError> {
    let IntegerConstraints { min, max } = constraints;
    if min > max {
        return Err(ConstraintError::min_greater_than_max("integer", min, max));
    }
    Ok(IntegerArbitrary {
        domain: IntegralDomain::new(i64::from(min), i64::from(max), i64::from(max)),
    })
}

impl IntegerArbitrary {
    /// Generates in `min..=max_generated` but recognises and shrinks any
    /// value of `min..=max`
    pub fn restricted(min: i32, max_generated: i32, max: i32) -> Result<Self, ConstraintError> {
        if min > max_generated {
            return Err(ConstraintError::min_greater_than_max(
                "integer",
                min,
                max_generated,
            ));
        }
        if max_generated > max {
            return Err(ConstraintError::out_of_range(
                "integer",
                "max_generated",
                max_generated,
            ));
        }
        Ok(Self {
            domain: IntegralDomain::new(i64::from(min), i64::from(max_generated), i64::from(max)),
        })
    }

    pub fn min(&self) -> i32 {
        narrow(*self.domain.min())
    }

    pub fn max(&self) -> i32 {
        narrow(*self.domain.max())
    }
}

/// Values coming out of the domain always lie within the `i32` bounds it was
/// built from
fn narrow(value: i64) -> i32 {
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

impl Arbitrary<i32> for IntegerArbitrary {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<i32> {
        Value::without_context(narrow(self.domain.generate(rng, bias_factor)))
    }

    fn can_shrink_without_context(&self, value: &i32) -> bool {
        self.domain.contains(&i64::from(*value))
    }

    fn shrink(&self, value: &i32, context: Option<&Context>) -> Stream<Value<i32>> {
        self.domain
            .shrink(i64::from(*value), context)
            .map(|v| {
                let (value, context) = v.into_parts();
                Value::new(narrow(value), context)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shrink_values(arb: &IntegerArbitrary, v: i32) -> Vec<i32> {
        arb.shrink(&v, None).map(|v| v.into_value()).collect()
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let err = integer(IntegerConstraints { min: 5, max: 4 }).err().unwrap();
        assert!(matches!(err, ConstraintError::MinGreaterThanMax { .. }));
        assert!(IntegerArbitrary::restricted(0, 11, 10).is_err());
        assert!(IntegerArbitrary::restricted(3, 2, 10).is_err());
    }

    #[test]
    fn test_seven_shrinks_to_zero() {
        let arb = integer(IntegerConstraints { min: -5, max: 10 }).unwrap();
        assert_eq!(shrink_values(&arb, 7), vec![0, 4, 6]);
    }

    #[test]
    fn test_target_is_bound_closest_to_zero() {
        let positive = integer(IntegerConstraints { min: 10, max: 50 }).unwrap();
        assert_eq!(shrink_values(&positive, 14), vec![10, 12, 13]);

        let negative = integer(IntegerConstraints { min: -50, max: -10 }).unwrap();
        assert_eq!(shrink_values(&negative, -14), vec![-10, -12, -13]);
    }

    #[test]
    fn test_full_range_extremes_do_not_overflow() {
        let arb = integer(IntegerConstraints::default()).unwrap();
        let from_min = shrink_values(&arb, i32::MIN);
        assert_eq!(from_min.first(), Some(&0));
        assert_eq!(from_min.last(), Some(&(i32::MIN + 1)));
        assert_eq!(from_min.len(), 32);

        let from_max = shrink_values(&arb, i32::MAX);
        assert_eq!(from_max.first(), Some(&0));
        assert_eq!(from_max.last(), Some(&(i32::MAX - 1)));
    }

    #[test]
    fn test_restricted_generation_and_recognition() {
        let arb = IntegerArbitrary::restricted(0, 10, 100).unwrap();
        let mut rng = Random::new(31);
        for _ in 0..300 {
            assert!((0..=10).contains(arb.generate(&mut rng, Some(3)).value()));
        }
        assert!(arb.can_shrink_without_context(&75));
        assert!(!arb.can_shrink_without_context(&101));
        assert_eq!((arb.min(), arb.max()), (0, 100));
    }
}
