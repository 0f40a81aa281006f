use num_bigint::BigInt;

use super::shrink::IntegralDomain;
use crate::arbitrary::Arbitrary;
use crate::config::BigIntConstraints;
use crate::error::ConstraintError;
use crate::rng::Random;
use crate::stream::Stream;
use crate::value::{Context, Value};

/// Arbitrary-precision integers with target-directed shrinking
pub struct BigIntArbitrary {
    domain: IntegralDomain<BigInt>,
}

/// Big integers in `min..=max`
pub fn big_int(constraints: BigIntConstraints) -> Result<BigIntArbitrary, ConstraintError> {
    let BigIntConstraints { min, max } = constraints;
    if min > max {
        return Err(ConstraintError::min_greater_than_max("big_int", &min, &max));
    }
    Ok(BigIntArbitrary {
        domain: IntegralDomain::new(min, max.clone(), max),
    })
}

impl Arbitrary<BigInt> for BigIntArbitrary {
    fn generate(&self, rng: &mut Random, bias_factor: Option<u32>) -> Value<BigInt> {
        Value::without_context(self.domain.generate(rng, bias_factor))
    }

    fn can_shrink_without_context(&self, value: &BigInt) -> bool {
        self.domain.contains(value)
    }

    fn shrink(&self, value: &BigInt, context: Option<&Context>) -> Stream<Value<BigInt>> {
        self.domain.shrink(value.clone(), context)
    }
}
