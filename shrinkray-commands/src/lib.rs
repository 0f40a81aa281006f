//! # Shrinkray Commands
//!
//! Model-based testing on top of shrinkray: generate sequences of commands,
//! run them against a simplified model and the real system side by side, and
//! shrink failing sequences down to the commands that matter.
//!
//! ## Features
//!
//! - **Run tracking**: every command records whether it actually ran, so
//!   commands skipped by their precondition are dropped first when shrinking
//! - **Sequence shrinking**: remove prefixes and middles, then shrink
//!   individual commands in place
//! - **Replay paths**: a failing sequence prints a compact `replayPath` that
//!   reproduces the same shrink path on a later run
//!
//! ## Quick Example
//!
//! ```rust
//! use shrinkray::{ArbitraryExt, Random, Arbitrary};
//! use shrinkray_commands::prelude::*;
//!
//! #[derive(Debug)]
//! struct Push(u32);
//!
//! impl Command<Vec<u32>, Vec<u32>> for Push {
//!     fn check(&self, _model: &Vec<u32>) -> bool {
//!         true
//!     }
//!
//!     fn run(&self, model: &mut Vec<u32>, real: &mut Vec<u32>) -> Result<(), String> {
//!         model.push(self.0);
//!         real.push(self.0);
//!         Ok(())
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct Pop;
//!
//! impl Command<Vec<u32>, Vec<u32>> for Pop {
//!     fn check(&self, model: &Vec<u32>) -> bool {
//!         !model.is_empty()
//!     }
//!
//!     fn run(&self, model: &mut Vec<u32>, real: &mut Vec<u32>) -> Result<(), String> {
//!         if model.pop() == real.pop() {
//!             Ok(())
//!         } else {
//!             Err("stacks diverged".to_string())
//!         }
//!     }
//! }
//!
//! let commands: CommandsArbitrary<Vec<u32>, Vec<u32>> = CommandsArbitrary::new(
//!     vec![just(Push(7)).boxed(), just(Pop).boxed()],
//!     CommandsConstraints::default(),
//! )
//! .unwrap();
//!
//! let generated = commands.generate(&mut Random::new(42), None);
//! assert!(model_run(|| (Vec::new(), Vec::new()), generated.value()).is_ok());
//! ```

pub mod arbitrary;
pub mod command;
pub mod config;
pub mod error;
pub mod iterable;
pub mod replay_path;
pub mod runner;

pub use arbitrary::CommandsArbitrary;
pub use command::{Command, CommandRef, JustCommand, WrappedCommand, just};
pub use config::{CommandsConstraints, MAX_COMMANDS_UPPER_BOUND, Size};
pub use error::{CommandsError, ReplayError, ReplayPathError};
pub use iterable::CommandsIterable;
pub use runner::model_run;

/// Re-exports for convenient imports
pub mod prelude {
    pub use crate::arbitrary::CommandsArbitrary;
    pub use crate::command::{Command, CommandRef, WrappedCommand, just};
    pub use crate::config::{CommandsConstraints, Size};
    pub use crate::error::{CommandsError, ReplayError};
    pub use crate::iterable::CommandsIterable;
    pub use crate::runner::model_run;
}
