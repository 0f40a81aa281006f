//! Commands and their run-tracking wrapper.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use shrinkray::{Arbitrary, Context, Random, Stream, Value};

/// A single step of a model-based test
///
/// `M` is the model the step is checked against, `R` the real system it runs
/// on.
pub trait Command<M, R>: fmt::Debug {
    /// Precondition: whether the command applies to the current model
    fn check(&self, model: &M) -> bool;

    /// Apply the command to both the model and the real system
    fn run(&self, model: &mut M, real: &mut R) -> Result<(), String>;

    /// Human-readable description, used when printing sequences
    fn description(&self) -> String {
        format!("{:?}", self)
    }
}

/// Shared handle to a command
pub type CommandRef<M, R> = Rc<dyn Command<M, R>>;

/// A command plus a flag recording whether it has been run
///
/// Clones share the flag, so running a command from a printed sequence is
/// visible to the shrinker holding the same command. Use
/// [`WrappedCommand::fresh`] for an independent copy.
pub struct WrappedCommand<M, R> {
    command: CommandRef<M, R>,
    has_ran: Rc<Cell<bool>>,
}

impl<M, R> WrappedCommand<M, R> {
    pub fn new(command: CommandRef<M, R>) -> Self {
        Self {
            command,
            has_ran: Rc::new(Cell::new(false)),
        }
    }

    /// Same command with a new, unset run flag
    pub fn fresh(&self) -> Self {
        Self::new(Rc::clone(&self.command))
    }

    pub fn has_ran(&self) -> bool {
        self.has_ran.get()
    }

    pub fn command(&self) -> &CommandRef<M, R> {
        &self.command
    }

    pub fn check(&self, model: &M) -> bool {
        self.command.check(model)
    }

    /// Run the command, marking it as run first
    pub fn run(&self, model: &mut M, real: &mut R) -> Result<(), String> {
        self.has_ran.set(true);
        self.command.run(model, real)
    }
}

impl<M, R> Clone for WrappedCommand<M, R> {
    fn clone(&self) -> Self {
        Self {
            command: Rc::clone(&self.command),
            has_ran: Rc::clone(&self.has_ran),
        }
    }
}

impl<M, R> fmt::Debug for WrappedCommand<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WrappedCommand")
            .field("command", &self.command)
            .field("has_ran", &self.has_ran.get())
            .finish()
    }
}

impl<M, R> fmt::Display for WrappedCommand<M, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command.description())
    }
}

/// Arbitrary always producing the same command
pub struct JustCommand<M, R> {
    command: CommandRef<M, R>,
}

/// Arbitrary always producing `command`
pub fn just<M, R, C>(command: C) -> JustCommand<M, R>
where
    C: Command<M, R> + 'static,
{
    JustCommand {
        command: Rc::new(command),
    }
}

impl<M: 'static, R: 'static> Arbitrary<CommandRef<M, R>> for JustCommand<M, R> {
    fn generate(&self, _rng: &mut Random, _bias_factor: Option<u32>) -> Value<CommandRef<M, R>> {
        Value::without_context(Rc::clone(&self.command))
    }

    fn can_shrink_without_context(&self, value: &CommandRef<M, R>) -> bool {
        Rc::ptr_eq(value, &self.command)
    }

    fn shrink(
        &self,
        _value: &CommandRef<M, R>,
        _context: Option<&Context>,
    ) -> Stream<Value<CommandRef<M, R>>> {
        Stream::nil()
    }
}
