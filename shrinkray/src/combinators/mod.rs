//! Combinators transforming one or more arbitraries into a new one.

mod bias;
mod chain;
mod constant;
mod filter;
mod map;
mod one_of;
mod zip;

pub use bias::{NoBias, NoShrink, WithBias};
pub use chain::Chain;
pub use constant::{Constant, constant};
pub use filter::Filter;
pub use map::Map;
pub use one_of::{Frequency, OneOfConstraints, WeightedArbitrary, frequency, one_of};
pub use zip::{Zip, zip};
