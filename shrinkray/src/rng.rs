//! Deterministic random source with explicit forking.

use num_bigint::{BigInt, RandBigInt};
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use crate::numeric::ArrayInt64;

/// Random source handed to every `generate` call.
///
/// `Random` is a plain value: cloning it forks the stream. The clone replays
/// exactly the draws the original would have produced from the same point,
/// and the two copies advance independently afterwards. Combinators that need
/// to look ahead (see [`crate::combinators::Chain`]) clone before consuming.
#[derive(Debug, Clone)]
pub struct Random {
    inner: StdRng,
}

impl Random {
    /// Create a random source from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a random source seeded from the operating system
    pub fn from_entropy() -> Self {
        Self {
            inner: StdRng::from_entropy(),
        }
    }

    /// Create a random source seeded by a draw from another generator
    pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        Self::new(rng.next_u64())
    }

    /// Uniform draw over `0..=2^bits - 1`, for `1 <= bits <= 32`
    pub fn next(&mut self, bits: u32) -> u32 {
        debug_assert!((1..=32).contains(&bits), "bits must be in 1..=32");
        if bits >= 32 {
            self.inner.next_u32()
        } else {
            self.inner.gen_range(0..(1u32 << bits))
        }
    }

    /// Uniform draw over `min..=max`
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    pub fn next_int(&mut self, min: i32, max: i32) -> i32 {
        self.inner.gen_range(min..=max)
    }

    /// Uniform draw over the whole signed 32-bit domain
    pub fn next_int_full(&mut self) -> i32 {
        self.next_int(i32::MIN, i32::MAX)
    }

    /// Uniform draw in `[0, 1)` with the full 53 bits of double precision
    pub fn next_double(&mut self) -> f64 {
        let a = f64::from(self.next(26));
        let b = f64::from(self.next(27));
        (a * 134_217_728.0 + b) * 2f64.powi(-53)
    }

    /// Uniform draw over `min..=max` for arbitrary-precision integers
    pub fn next_big_int(&mut self, min: &BigInt, max: &BigInt) -> BigInt {
        let upper = max + 1u32;
        self.inner.gen_bigint_range(min, &upper)
    }

    /// Uniform draw over `min..=max` for sign-magnitude 64-bit integers
    pub fn next_array_int(&mut self, min: &ArrayInt64, max: &ArrayInt64) -> ArrayInt64 {
        let drawn = self.inner.gen_range(min.to_i128()..=max.to_i128());
        ArrayInt64::from_i128_truncating(drawn)
    }
}

impl RngCore for Random {
    fn next_u32(&mut self) -> u32 {
        self.inner.next_u32()
    }

    fn next_u64(&mut self) -> u64 {
        self.inner.next_u64()
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.inner.fill_bytes(dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.inner.try_fill_bytes(dest)
    }
}
