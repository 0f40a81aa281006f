//! # Shrinkray - Context-Carrying Generation and Shrinking
//!
//! Shrinkray is the generation and shrinking engine behind property-based
//! tests. Arbitraries describe input domains: they produce values
//! deterministically from a [`Random`] source, and when a property fails they
//! stream progressively smaller candidates so a runner can find a minimal
//! counter-example.
//!
//! Every generated [`Value`] carries an opaque context. Feeding it back into
//! [`Arbitrary::shrink`] lets combinators resume exactly where the previous
//! shrink step left off instead of recomputing how the value was derived.
//!
//! ## Quick Start
//!
//! ```rust
//! use shrinkray::{Arbitrary, ArbitraryExt, IntegerConstraints, Random, integer};
//!
//! let even = integer(IntegerConstraints { min: -100, max: 100 })
//!     .unwrap()
//!     .map(|v| v * 2);
//! let mut rng = Random::new(42);
//!
//! let generated = even.generate(&mut rng, None);
//! assert_eq!(generated.value() % 2, 0);
//!
//! // Candidates always move toward zero
//! for candidate in even.shrink(generated.value(), generated.context()) {
//!     assert!(candidate.value().abs() < generated.value().abs());
//! }
//! ```

// Public modules
pub mod arbitrary;
pub mod combinators;
pub mod config;
pub mod depth;
pub mod error;
pub mod generator;
pub mod letrec;
pub mod numeric;
pub mod rng;
pub mod stream;
pub mod value;

// Re-export the main public API
pub use arbitrary::{Arbitrary, ArbitraryExt, BoxedArbitrary};
pub use combinators::{
    Chain, Constant, Filter, Frequency, Map, NoBias, NoShrink, OneOfConstraints,
    WeightedArbitrary, WithBias, Zip, constant, frequency, one_of, zip,
};
pub use config::{
    BigIntConstraints, ConfigError, DoubleConstraints, FloatConstraints, GeneratorConfig,
    Int64Constraints, IntegerConstraints,
};
pub use depth::{DepthContext, DepthGuard};
pub use error::ConstraintError;
pub use generator::{AsGenerator, FromGenerator, Generator};
pub use letrec::{LazyArbitrary, Letrec, LetrecBuilder};
pub use numeric::{
    ArrayInt64, ArrayInt64Arbitrary, BigIntArbitrary, DoubleArbitrary, FloatArbitrary,
    IntegerArbitrary, Sign, big_int, double, double_to_index, float, float_to_index,
    index_to_double, index_to_float, int64, integer,
};
pub use rng::Random;
pub use stream::Stream;
pub use value::{Context, Value};
