//! Order-preserving integer indices for floating-point values.
//!
//! Non-negative values (including `+0`) map to their bit pattern, negative
//! values (including `-0`) to `-(bits of the magnitude) - 1`. Consecutive
//! representable values therefore get consecutive indices, `-0` sits right
//! before `+0`, and the infinities sit at the ends. NaN has no index of its
//! own; the float and double arbitraries give it a dedicated slot.

use super::array_int64::{ArrayInt64, Sign};

const F32_SIGN: u32 = 0x8000_0000;
const F64_SIGN: u64 = 0x8000_0000_0000_0000;

pub fn float_to_index(value: f32) -> i32 {
    let bits = value.to_bits();
    if bits & F32_SIGN == 0 {
        bits as i32
    } else {
        -((bits & !F32_SIGN) as i32) - 1
    }
}

pub fn index_to_float(index: i32) -> f32 {
    if index >= 0 {
        f32::from_bits(index as u32)
    } else {
        f32::from_bits((-(index + 1)) as u32 | F32_SIGN)
    }
}

pub fn double_to_index(value: f64) -> ArrayInt64 {
    let bits = value.to_bits();
    if bits & F64_SIGN == 0 {
        ArrayInt64::new(Sign::Positive, split(bits))
    } else {
        ArrayInt64::new(Sign::Negative, split((bits & !F64_SIGN) + 1))
    }
}

pub fn index_to_double(index: ArrayInt64) -> f64 {
    let magnitude = index.magnitude();
    if index.is_strictly_negative() {
        f64::from_bits((magnitude - 1) | F64_SIGN)
    } else {
        f64::from_bits(magnitude)
    }
}

fn split(magnitude: u64) -> [u32; 2] {
    [(magnitude >> 32) as u32, magnitude as u32]
}
