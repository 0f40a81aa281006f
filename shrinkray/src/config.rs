//! Configuration and constraint types for arbitraries.

use num_bigint::BigInt;
use num_traits::One;

#[cfg(feature = "persistence")]
use serde::{Deserialize, Serialize};

/// Configuration validation errors
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Bias factor must be at least 1
    InvalidBiasFactor(u32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidBiasFactor(n) => {
                write!(f, "Invalid bias factor: {} (must be >= 1)", n)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Configuration handed to legacy [`crate::Generator`] implementations
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct GeneratorConfig {
    /// Inverse probability of a biased draw; `None` disables biasing
    pub bias_factor: Option<u32>,
}

impl GeneratorConfig {
    /// Create a configuration with the given bias factor
    pub fn with_bias(bias_factor: u32) -> Result<Self, ConfigError> {
        let config = Self {
            bias_factor: Some(bias_factor),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.bias_factor {
            Some(0) => Err(ConfigError::InvalidBiasFactor(0)),
            _ => Ok(()),
        }
    }
}

/// Bounds for [`crate::integer`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct IntegerConstraints {
    pub min: i32,
    pub max: i32,
}

impl Default for IntegerConstraints {
    fn default() -> Self {
        Self {
            min: i32::MIN,
            max: i32::MAX,
        }
    }
}

/// Bounds for [`crate::big_int`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct BigIntConstraints {
    pub min: BigInt,
    pub max: BigInt,
}

impl Default for BigIntConstraints {
    fn default() -> Self {
        let half = BigInt::one() << 255u32;
        Self {
            min: -half.clone(),
            max: half - 1,
        }
    }
}

/// Bounds for [`crate::int64`]
///
/// Stored wide so that callers can express any value; bounds outside the
/// `i64` range are rejected when the arbitrary is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct Int64Constraints {
    pub min: i128,
    pub max: i128,
}

impl Default for Int64Constraints {
    fn default() -> Self {
        Self {
            min: i128::from(i64::MIN),
            max: i128::from(i64::MAX),
        }
    }
}

/// Constraints for [`crate::float`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct FloatConstraints {
    /// Lower bound, defaults to negative infinity
    pub min: Option<f32>,
    /// Upper bound, defaults to positive infinity
    pub max: Option<f32>,
    /// Use `-f32::MAX..=f32::MAX` as default bounds instead of infinities
    pub no_default_infinity: bool,
    /// Never produce NaN
    pub no_nan: bool,
    /// Exclude `min` itself
    pub min_excluded: bool,
    /// Exclude `max` itself
    pub max_excluded: bool,
}

/// Constraints for [`crate::double`]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct DoubleConstraints {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub no_default_infinity: bool,
    pub no_nan: bool,
    pub min_excluded: bool,
    pub max_excluded: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_config_validation() {
        assert!(GeneratorConfig::default().validate().is_ok());
        assert!(GeneratorConfig::with_bias(1).is_ok());
        assert_eq!(
            GeneratorConfig::with_bias(0),
            Err(ConfigError::InvalidBiasFactor(0))
        );
    }

    #[test]
    fn test_default_bounds() {
        let ints = IntegerConstraints::default();
        assert_eq!((ints.min, ints.max), (i32::MIN, i32::MAX));

        let big = BigIntConstraints::default();
        assert_eq!(big.min.bits(), 256);
        assert_eq!(big.max.bits(), 255);
        assert_eq!(&big.max + 1, -big.min);

        let wide = Int64Constraints::default();
        assert_eq!(wide.min, i128::from(i64::MIN));
        assert_eq!(wide.max, i128::from(i64::MAX));
    }

    #[test]
    fn test_float_defaults_are_open() {
        let c = FloatConstraints::default();
        assert!(c.min.is_none() && c.max.is_none());
        assert!(!c.no_nan && !c.no_default_infinity);
    }
}
