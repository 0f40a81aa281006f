//! Executing command sequences against a model and a real system.

use crate::iterable::CommandsIterable;

/// Run `commands` against a fresh `(model, real)` pair built by `setup`
///
/// Commands whose precondition fails on the current model are skipped and
/// keep their run flag unset, so shrinking drops them. The first error
/// returned by a command stops the run.
pub fn model_run<M, R, S>(setup: S, commands: &CommandsIterable<M, R>) -> Result<(), String>
where
    S: FnOnce() -> (M, R),
{
    let (mut model, mut real) = setup();
    for command in commands {
        if command.check(&model) {
            command.run(&mut model, &mut real)?;
        } else {
            tracing::trace!(command = %command, "skipping command, precondition does not hold");
        }
    }
    Ok(())
}
