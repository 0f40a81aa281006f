//! Generated command sequences and the replay log they report.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::command::WrappedCommand;
use crate::replay_path;

/// Which commands ran, recorded across one generate-then-shrink cycle
#[derive(Debug, Default)]
pub(crate) struct ReplayLog {
    pub(crate) path: Vec<bool>,
    pub(crate) position: usize,
}

pub(crate) type SharedReplayLog = Rc<RefCell<ReplayLog>>;

/// A generated sequence of commands
///
/// Clones share run flags with the original. [`CommandsIterable::fresh`]
/// gives a copy whose commands have not run yet.
pub struct CommandsIterable<M, R> {
    commands: Vec<WrappedCommand<M, R>>,
    replay_log: Option<SharedReplayLog>,
}

impl<M, R> CommandsIterable<M, R> {
    pub(crate) fn new(
        commands: Vec<WrappedCommand<M, R>>,
        replay_log: Option<SharedReplayLog>,
    ) -> Self {
        Self {
            commands,
            replay_log,
        }
    }

    pub fn commands(&self) -> &[WrappedCommand<M, R>] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, WrappedCommand<M, R>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn fresh(&self) -> Self {
        Self {
            commands: self.commands.iter().map(WrappedCommand::fresh).collect(),
            replay_log: self.replay_log.clone(),
        }
    }

    /// `replayPath="..."` for the path recorded so far, or an empty string
    /// when replay logging is disabled
    pub fn replay_metadata(&self) -> String {
        match &self.replay_log {
            Some(log) => format!(
                "replayPath={:?}",
                replay_path::stringify(&log.borrow().path)
            ),
            None => String::new(),
        }
    }
}

impl<M, R> Clone for CommandsIterable<M, R> {
    fn clone(&self) -> Self {
        Self {
            commands: self.commands.clone(),
            replay_log: self.replay_log.clone(),
        }
    }
}

impl<'a, M, R> IntoIterator for &'a CommandsIterable<M, R> {
    type Item = &'a WrappedCommand<M, R>;
    type IntoIter = std::slice::Iter<'a, WrappedCommand<M, R>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<M, R> fmt::Debug for CommandsIterable<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandsIterable")
            .field("commands", &self.commands)
            .field("replay_log", &self.replay_log.is_some())
            .finish()
    }
}

/// Executed commands, comma separated, followed by the replay metadata
impl<M, R> fmt::Display for CommandsIterable<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let executed = self
            .commands
            .iter()
            .filter(|c| c.has_ran())
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let metadata = self.replay_metadata();
        if metadata.is_empty() {
            f.write_str(&executed)
        } else {
            write!(f, "{} /*{}*/", executed, metadata)
        }
    }
}
