//! Numeric arbitraries: target-directed integer shrinking, the sign-magnitude
//! 64-bit representation and index encodings for floating-point values.

mod array_int64;
mod bias;
mod big_int;
mod double;
mod float;
mod float_index;
mod int64;
mod integer;
mod shrink;

use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use rand::Rng;

use crate::rng::Random;

pub use array_int64::{ArrayInt64, Sign};
pub use big_int::{BigIntArbitrary, big_int};
pub use double::{DoubleArbitrary, double};
pub use float::{FloatArbitrary, float};
pub use float_index::{double_to_index, float_to_index, index_to_double, index_to_float};
pub use int64::{ArrayInt64Arbitrary, int64};
pub use integer::{IntegerArbitrary, integer};

/// Integer-like domain the shrinker and the bias tables operate on
pub(crate) trait Integral:
    Clone
    + Ord
    + fmt::Debug
    + fmt::Display
    + Zero
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + 'static
{
    fn unit() -> Self;

    /// Halve, rounding toward zero
    fn halve(&self) -> Self;

    /// `floor(log2(|self|))` carrying the sign of `self`, zero for zero
    fn log_like(&self) -> Self;

    /// Uniform draw over `min..=max`
    fn draw(rng: &mut Random, min: &Self, max: &Self) -> Self;
}

impl Integral for i64 {
    fn unit() -> Self {
        1
    }

    fn halve(&self) -> Self {
        self / 2
    }

    fn log_like(&self) -> Self {
        if *self == 0 {
            return 0;
        }
        let log = i64::from(63 - self.unsigned_abs().leading_zeros());
        if *self < 0 { -log } else { log }
    }

    fn draw(rng: &mut Random, min: &Self, max: &Self) -> Self {
        match (i32::try_from(*min), i32::try_from(*max)) {
            (Ok(lo), Ok(hi)) => i64::from(rng.next_int(lo, hi)),
            _ => rng.gen_range(*min..=*max),
        }
    }
}

impl Integral for BigInt {
    fn unit() -> Self {
        BigInt::from(1)
    }

    fn halve(&self) -> Self {
        self / 2
    }

    fn log_like(&self) -> Self {
        if self.is_zero() {
            return BigInt::zero();
        }
        let log = BigInt::from(self.bits() - 1);
        if self.is_negative() { -log } else { log }
    }

    fn draw(rng: &mut Random, min: &Self, max: &Self) -> Self {
        rng.next_big_int(min, max)
    }
}

impl Integral for ArrayInt64 {
    fn unit() -> Self {
        ArrayInt64::from_i64(1)
    }

    fn halve(&self) -> Self {
        ArrayInt64::halve(self)
    }

    fn log_like(&self) -> Self {
        ArrayInt64::log_like(self)
    }

    fn draw(rng: &mut Random, min: &Self, max: &Self) -> Self {
        rng.next_array_int(min, max)
    }
}
