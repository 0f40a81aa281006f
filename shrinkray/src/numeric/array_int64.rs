use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Neg, Sub};

use num_traits::Zero;

/// Sign of an [`ArrayInt64`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sign {
    Positive,
    Negative,
}

/// Sign-magnitude 64-bit integer stored as two unsigned 32-bit words
///
/// The magnitude spans the full `u64` range, so the representable values are
/// `-(2^64 - 1) ..= 2^64 - 1`. Positive and negative zero compare equal.
/// Additions whose magnitude exceeds 64 bits wrap the magnitude.
#[derive(Clone, Copy)]
pub struct ArrayInt64 {
    sign: Sign,
    /// `[high, low]` words of the magnitude
    data: [u32; 2],
}

impl ArrayInt64 {
    pub const ZERO: ArrayInt64 = ArrayInt64 {
        sign: Sign::Positive,
        data: [0, 0],
    };

    /// Build from a sign and the `[high, low]` magnitude words
    pub fn new(sign: Sign, data: [u32; 2]) -> Self {
        Self { sign, data }
    }

    fn from_magnitude(sign: Sign, magnitude: u64) -> Self {
        let sign = if magnitude == 0 { Sign::Positive } else { sign };
        Self {
            sign,
            data: [(magnitude >> 32) as u32, magnitude as u32],
        }
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn data(&self) -> [u32; 2] {
        self.data
    }

    pub fn magnitude(&self) -> u64 {
        (u64::from(self.data[0]) << 32) | u64::from(self.data[1])
    }

    pub fn from_i64(value: i64) -> Self {
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Self::from_magnitude(sign, value.unsigned_abs())
    }

    /// `None` when the value does not fit in an `i64`
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(self.to_i128()).ok()
    }

    /// `None` when the magnitude does not fit in 64 bits
    pub fn from_i128(value: i128) -> Option<Self> {
        let magnitude = u64::try_from(value.unsigned_abs()).ok()?;
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Some(Self::from_magnitude(sign, magnitude))
    }

    /// Like [`ArrayInt64::from_i128`], keeping the low 64 bits of the magnitude
    pub(crate) fn from_i128_truncating(value: i128) -> Self {
        let sign = if value < 0 {
            Sign::Negative
        } else {
            Sign::Positive
        };
        Self::from_magnitude(sign, value.unsigned_abs() as u64)
    }

    pub fn to_i128(&self) -> i128 {
        let magnitude = i128::from(self.magnitude());
        match self.sign {
            Sign::Positive => magnitude,
            Sign::Negative => -magnitude,
        }
    }

    pub fn is_zero(&self) -> bool {
        self.data == [0, 0]
    }

    pub fn is_strictly_positive(&self) -> bool {
        self.sign == Sign::Positive && !self.is_zero()
    }

    pub fn is_strictly_negative(&self) -> bool {
        self.sign == Sign::Negative && !self.is_zero()
    }

    pub fn negate(&self) -> Self {
        let sign = match self.sign {
            Sign::Positive => Sign::Negative,
            Sign::Negative => Sign::Positive,
        };
        Self::from_magnitude(sign, self.magnitude())
    }

    pub fn add(self, other: Self) -> Self {
        let (a, b) = (self.magnitude(), other.magnitude());
        if self.is_zero() {
            return other;
        }
        if other.is_zero() || self.sign == other.sign {
            return Self::from_magnitude(self.sign, a.wrapping_add(b));
        }
        match a.cmp(&b) {
            Ordering::Less => Self::from_magnitude(other.sign, b - a),
            _ => Self::from_magnitude(self.sign, a - b),
        }
    }

    pub fn sub(self, other: Self) -> Self {
        self.add(other.negate())
    }

    /// Halve the magnitude, keeping the sign (rounds toward zero)
    pub fn halve(&self) -> Self {
        Self::from_magnitude(self.sign, self.magnitude() >> 1)
    }

    /// `floor(log2(|self|))` with the sign of `self`, zero for zero
    pub fn log_like(&self) -> Self {
        let magnitude = self.magnitude();
        if magnitude == 0 {
            return Self::ZERO;
        }
        Self::from_magnitude(self.sign, u64::from(63 - magnitude.leading_zeros()))
    }
}

impl Default for ArrayInt64 {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i64> for ArrayInt64 {
    fn from(value: i64) -> Self {
        Self::from_i64(value)
    }
}

impl PartialEq for ArrayInt64 {
    fn eq(&self, other: &Self) -> bool {
        self.to_i128() == other.to_i128()
    }
}

impl Eq for ArrayInt64 {}

impl PartialOrd for ArrayInt64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ArrayInt64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.to_i128().cmp(&other.to_i128())
    }
}

impl Add for ArrayInt64 {
    type Output = ArrayInt64;

    fn add(self, rhs: ArrayInt64) -> ArrayInt64 {
        ArrayInt64::add(self, rhs)
    }
}

impl Sub for ArrayInt64 {
    type Output = ArrayInt64;

    fn sub(self, rhs: ArrayInt64) -> ArrayInt64 {
        ArrayInt64::sub(self, rhs)
    }
}

impl Neg for ArrayInt64 {
    type Output = ArrayInt64;

    fn neg(self) -> ArrayInt64 {
        self.negate()
    }
}

impl Zero for ArrayInt64 {
    fn zero() -> Self {
        Self::ZERO
    }

    fn is_zero(&self) -> bool {
        ArrayInt64::is_zero(self)
    }
}

impl fmt::Display for ArrayInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_i128())
    }
}

impl fmt::Debug for ArrayInt64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayInt64")
            .field("sign", &self.sign)
            .field("data", &self.data)
            .field("value", &self.to_i128())
            .finish()
    }
}
