//! Errors raised while building or shrinking command sequences.

use std::fmt;

use shrinkray::ConstraintError;

/// A replay path string could not be decoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayPathError {
    /// No `:` between the counts and the changes
    MissingSeparator,

    /// A character outside `A-Z a-z 0-9 + /`
    InvalidCharacter { character: char, position: usize },

    /// Fewer change bits than encoded runs
    TruncatedChanges { runs: usize, characters: usize },
}

impl fmt::Display for ReplayPathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayPathError::MissingSeparator => {
                write!(f, "replay path must contain a ':' separator")
            }
            ReplayPathError::InvalidCharacter {
                character,
                position,
            } => write!(
                f,
                "replay path contains invalid character '{}' at position {}",
                character, position
            ),
            ReplayPathError::TruncatedChanges { runs, characters } => write!(
                f,
                "replay path encodes {} runs but only {} change characters",
                runs, characters
            ),
        }
    }
}

impl std::error::Error for ReplayPathError {}

/// The replay log disagrees with what actually ran
///
/// Either the source replay path was recorded for a different sequence, or
/// the system under test is not deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayError {
    /// The replay path ended before the commands being shrunk
    TooShort { required: usize, available: usize },

    /// The replay path marks a command as skipped but it ran
    Mismatch { position: usize },
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplayError::TooShort {
                required,
                available,
            } => write!(
                f,
                "Too short replayPath: {} entries required, {} available",
                required, available
            ),
            ReplayError::Mismatch { position } => write!(
                f,
                "Mismatch between replayPath and real execution at command {}",
                position
            ),
        }
    }
}

impl std::error::Error for ReplayError {}

/// Error returned when a commands arbitrary cannot be built
#[derive(Debug, Clone, PartialEq)]
pub enum CommandsError {
    Constraint(ConstraintError),
    ReplayPath(ReplayPathError),
}

impl fmt::Display for CommandsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandsError::Constraint(err) => write!(f, "commands: {}", err),
            CommandsError::ReplayPath(err) => write!(f, "commands: {}", err),
        }
    }
}

impl std::error::Error for CommandsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CommandsError::Constraint(err) => Some(err),
            CommandsError::ReplayPath(err) => Some(err),
        }
    }
}

impl From<ConstraintError> for CommandsError {
    fn from(err: ConstraintError) -> Self {
        CommandsError::Constraint(err)
    }
}

impl From<ReplayPathError> for CommandsError {
    fn from(err: ReplayPathError) -> Self {
        CommandsError::ReplayPath(err)
    }
}
