//! Construction-time validation errors for arbitraries.

use std::fmt;

/// Error returned when an arbitrary cannot be built from its constraints
#[derive(Debug, Clone, PartialEq)]
pub enum ConstraintError {
    /// Lower bound is above the upper bound
    MinGreaterThanMax {
        arbitrary: &'static str,
        min: String,
        max: String,
    },

    /// A bound lies outside the domain the arbitrary can represent
    OutOfRange {
        arbitrary: &'static str,
        field: &'static str,
        value: String,
    },

    /// A floating-point bound is NaN
    NaNBound {
        arbitrary: &'static str,
        field: &'static str,
    },

    /// A weighted choice was given no arbitraries
    EmptyChoice,

    /// Weights of a choice sum to zero or overflow the draw range
    InvalidWeights { total: u64 },

    /// A recursive placeholder was never bound
    UnboundPlaceholder { name: String },

    /// A recursive placeholder was bound twice
    AlreadyBound { name: String },

    /// Any other invalid constraint, described in prose
    Invalid { message: String },
}

impl fmt::Display for ConstraintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintError::MinGreaterThanMax { arbitrary, min, max } => {
                write!(
                    f,
                    "{}: min must be lower than or equal to max (min: {}, max: {})",
                    arbitrary, min, max
                )
            }
            ConstraintError::OutOfRange {
                arbitrary,
                field,
                value,
            } => write!(f, "{}: {} is out of range ({})", arbitrary, field, value),
            ConstraintError::NaNBound { arbitrary, field } => {
                write!(f, "{}: {} cannot be NaN", arbitrary, field)
            }
            ConstraintError::EmptyChoice => {
                write!(f, "one_of: at least one arbitrary is required")
            }
            ConstraintError::InvalidWeights { total } => write!(
                f,
                "one_of: total weight must be in 1..={} (got {})",
                i32::MAX,
                total
            ),
            ConstraintError::UnboundPlaceholder { name } => {
                write!(f, "letrec: placeholder '{}' was never bound", name)
            }
            ConstraintError::AlreadyBound { name } => {
                write!(f, "letrec: placeholder '{}' is already bound", name)
            }
            ConstraintError::Invalid { message } => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for ConstraintError {}

impl ConstraintError {
    /// Create a bounds-ordering error
    pub fn min_greater_than_max(
        arbitrary: &'static str,
        min: impl fmt::Display,
        max: impl fmt::Display,
    ) -> Self {
        ConstraintError::MinGreaterThanMax {
            arbitrary,
            min: min.to_string(),
            max: max.to_string(),
        }
    }

    /// Create an out-of-range error
    pub fn out_of_range(
        arbitrary: &'static str,
        field: &'static str,
        value: impl fmt::Display,
    ) -> Self {
        ConstraintError::OutOfRange {
            arbitrary,
            field,
            value: value.to_string(),
        }
    }

    /// Create a free-form error
    pub fn invalid(message: impl Into<String>) -> Self {
        ConstraintError::Invalid {
            message: message.into(),
        }
    }
}
