//! Configuration for command sequence generation.

#[cfg(feature = "persistence")]
use serde::{Deserialize, Serialize};

use shrinkray::ConstraintError;

/// Largest number of commands a sequence may ever hold
pub const MAX_COMMANDS_UPPER_BOUND: usize = 0x7fff_ffff;

/// How long generated sequences tend to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub enum Size {
    XSmall,
    #[default]
    Small,
    Medium,
    Large,
    XLarge,
    /// Up to `max_commands`
    Max,
}

impl Size {
    /// Longest sequence generated for this size when capped at `max_commands`
    pub fn max_generated(self, max_commands: usize) -> usize {
        let base = match self {
            Size::XSmall => 1,
            Size::Small => 10,
            Size::Medium => 100,
            Size::Large => 1_000,
            Size::XLarge => 10_000,
            Size::Max => max_commands,
        };
        base.min(max_commands)
    }
}

/// Options for [`crate::CommandsArbitrary`]
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "persistence", derive(Serialize, Deserialize))]
pub struct CommandsConstraints {
    /// Defaults to [`Size::Max`] when `max_commands` is set, [`Size::Small`] otherwise
    pub size: Option<Size>,
    /// Hard cap on the sequence length, defaults to [`MAX_COMMANDS_UPPER_BOUND`]
    pub max_commands: Option<usize>,
    /// Leave the replay path out of printed sequences
    pub disable_replay_log: bool,
    /// Replay path printed by a previous run, to shrink the same way again
    pub replay_path: Option<String>,
}

impl CommandsConstraints {
    pub fn validate(&self) -> Result<(), ConstraintError> {
        if let Some(max) = self.max_commands {
            if max > MAX_COMMANDS_UPPER_BOUND {
                return Err(ConstraintError::out_of_range(
                    "commands",
                    "max_commands",
                    max,
                ));
            }
        }
        Ok(())
    }

    pub fn max_commands(&self) -> usize {
        self.max_commands.unwrap_or(MAX_COMMANDS_UPPER_BOUND)
    }

    pub fn size(&self) -> Size {
        match (self.size, self.max_commands) {
            (Some(size), _) => size,
            (None, Some(_)) => Size::Max,
            (None, None) => Size::Small,
        }
    }

    /// Longest sequence produced by generation
    pub fn max_generated(&self) -> usize {
        self.size().max_generated(self.max_commands())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constraints() {
        let constraints = CommandsConstraints::default();
        assert!(constraints.validate().is_ok());
        assert_eq!(constraints.size(), Size::Small);
        assert_eq!(constraints.max_commands(), MAX_COMMANDS_UPPER_BOUND);
        assert_eq!(constraints.max_generated(), 10);
    }

    #[test]
    fn test_max_commands_implies_max_size() {
        let constraints = CommandsConstraints {
            max_commands: Some(42),
            ..Default::default()
        };
        assert_eq!(constraints.size(), Size::Max);
        assert_eq!(constraints.max_generated(), 42);

        let constraints = CommandsConstraints {
            max_commands: Some(42),
            size: Some(Size::XSmall),
            ..Default::default()
        };
        assert_eq!(constraints.max_generated(), 1);
    }

    #[test]
    fn test_size_is_capped() {
        assert_eq!(Size::Large.max_generated(5), 5);
        assert_eq!(Size::Medium.max_generated(5_000), 100);
        assert_eq!(Size::XLarge.max_generated(MAX_COMMANDS_UPPER_BOUND), 10_000);
    }

    #[test]
    fn test_validate_rejects_huge_max() {
        let constraints = CommandsConstraints {
            max_commands: Some(MAX_COMMANDS_UPPER_BOUND + 1),
            ..Default::default()
        };
        assert!(matches!(
            constraints.validate(),
            Err(ConstraintError::OutOfRange { .. })
        ));
    }
}
