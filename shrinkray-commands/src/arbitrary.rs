//! Arbitrary over sequences of commands.

use std::cell::RefCell;
use std::rc::Rc;

use shrinkray::{
    Arbitrary, ArbitraryExt, BoxedArbitrary, Context, IntegerArbitrary, OneOfConstraints, Random,
    Stream, Value, WeightedArbitrary, frequency,
};

use crate::command::{CommandRef, WrappedCommand};
use crate::config::CommandsConstraints;
use crate::error::{CommandsError, ReplayError};
use crate::iterable::{CommandsIterable, ReplayLog, SharedReplayLog};
use crate::replay_path;

/// Shrink state of a generated sequence
struct CommandsContext<M, R> {
    shrunk_once: bool,
    items: Vec<Value<WrappedCommand<M, R>>>,
}

/// Generates sequences of commands and shrinks them by dropping the ones
/// that did not run
///
/// Shrinking reads the run flags set while the property executed the
/// sequence and records them in a replay log. A replay path printed by a
/// failing run can be passed back through
/// [`CommandsConstraints::replay_path`] to take the same shrink path again
/// without relying on those flags.
pub struct CommandsArbitrary<M, R> {
    one_command: BoxedArbitrary<WrappedCommand<M, R>>,
    length: Rc<IntegerArbitrary>,
    source_replay_path: Option<Vec<bool>>,
    replay_log: SharedReplayLog,
    disable_replay_log: bool,
}

impl<M: 'static, R: 'static> CommandsArbitrary<M, R> {
    /// Sequences drawing each command uniformly from `commands`
    pub fn new(
        commands: Vec<BoxedArbitrary<CommandRef<M, R>>>,
        constraints: CommandsConstraints,
    ) -> Result<Self, CommandsError> {
        let weighted = commands
            .into_iter()
            .map(|arbitrary| WeightedArbitrary {
                weight: 1,
                arbitrary,
            })
            .collect();
        Self::weighted(weighted, constraints)
    }

    /// Sequences drawing each command according to its weight
    pub fn weighted(
        commands: Vec<WeightedArbitrary<CommandRef<M, R>>>,
        constraints: CommandsConstraints,
    ) -> Result<Self, CommandsError> {
        constraints.validate()?;
        let source_replay_path = constraints
            .replay_path
            .as_deref()
            .map(replay_path::parse)
            .transpose()?;

        let one_command = frequency(commands, OneOfConstraints::default())?
            .map(|command: &CommandRef<M, R>| WrappedCommand::new(Rc::clone(command)))
            .boxed();
        // Both bounds were validated against i32::MAX
        let max_commands = constraints.max_commands() as i32;
        let max_generated = constraints.max_generated() as i32;
        let length = IntegerArbitrary::restricted(0, max_generated, max_commands)?;

        Ok(Self {
            one_command,
            length: Rc::new(length),
            source_replay_path,
            replay_log: Rc::new(RefCell::new(ReplayLog::default())),
            disable_replay_log: constraints.disable_replay_log,
        })
    }

    fn build_value(
        items: Vec<Value<WrappedCommand<M, R>>>,
        shrunk_once: bool,
        replay_log: Option<SharedReplayLog>,
    ) -> Value<CommandsIterable<M, R>> {
        let commands = items.iter().map(|item| item.value().clone()).collect();
        let context = CommandsContext { shrunk_once, items };
        Value::with_context(CommandsIterable::new(commands, replay_log), context)
    }

    fn printed_log(&self) -> Option<SharedReplayLog> {
        (!self.disable_replay_log).then(|| Rc::clone(&self.replay_log))
    }

    fn filter_on_replay(
        log: &ReplayLog,
        raw: &[Value<WrappedCommand<M, R>>],
    ) -> Result<Vec<Value<WrappedCommand<M, R>>>, ReplayError> {
        let mut kept = Vec::new();
        for (offset, item) in raw.iter().enumerate() {
            let position = log.position + offset;
            match log.path.get(position) {
                None => {
                    return Err(ReplayError::TooShort {
                        required: log.position + raw.len(),
                        available: log.path.len(),
                    });
                }
                Some(false) if item.value().has_ran() => {
                    return Err(ReplayError::Mismatch { position });
                }
                Some(true) => kept.push(item.clone()),
                Some(false) => {}
            }
        }
        Ok(kept)
    }

    fn filter_on_execution(
        log: &mut ReplayLog,
        raw: &[Value<WrappedCommand<M, R>>],
    ) -> Vec<Value<WrappedCommand<M, R>>> {
        let mut kept = Vec::new();
        for item in raw {
            let ran = item.value().has_ran();
            log.path.push(ran);
            if ran {
                kept.push(item.clone());
            }
        }
        kept
    }

    /// Drop the commands that did not run, reading either the replay path or
    /// the run flags
    fn filter_for_shrink(
        &self,
        raw: &[Value<WrappedCommand<M, R>>],
    ) -> Result<Vec<Value<WrappedCommand<M, R>>>, ReplayError> {
        let mut log = self.replay_log.borrow_mut();
        if log.position == 0 {
            log.path = self.source_replay_path.clone().unwrap_or_default();
        }

        let kept = if log.position < log.path.len() {
            tracing::debug!(
                position = log.position,
                commands = raw.len(),
                "filtering commands from replay path"
            );
            Self::filter_on_replay(&log, raw).inspect_err(|err| {
                tracing::debug!(error = %err, "replay path rejected");
            })?
        } else {
            tracing::debug!(
                position = log.position,
                commands = raw.len(),
                "filtering commands from execution flags"
            );
            Self::filter_on_execution(&mut log, raw)
        };
        log.position += raw.len();
        Ok(kept)
    }

    /// Shrink a sequence, reporting replay inconsistencies as errors
    pub fn try_shrink(
        &self,
        _value: &CommandsIterable<M, R>,
        context: Option<&Context>,
    ) -> Result<Stream<Value<CommandsIterable<M, R>>>, ReplayError> {
        let Some(context) = context.and_then(|c| c.downcast_ref::<CommandsContext<M, R>>()) else {
            return Ok(Stream::nil());
        };
        let items = self.filter_for_shrink(&context.items)?;
        if items.is_empty() {
            return Ok(Stream::nil());
        }

        let items = Rc::new(items);
        let n = items.len();
        let mut sources = Vec::with_capacity(2 * n + 1);

        if !context.shrunk_once {
            sources.push(Stream::once(Vec::new()));
        }

        // Keep a prefix, drop part of the remainder but always keep its tail
        for keep in 0..n {
            let items = Rc::clone(&items);
            let length = Rc::clone(&self.length);
            sources.push(Stream::lazy(move || {
                let remaining = (n - 1 - keep) as i32;
                length.shrink(&remaining, None).map(move |l| {
                    let tail = *l.value() as usize + 1;
                    let mut next = items[..keep].to_vec();
                    next.extend_from_slice(&items[n - tail..]);
                    next
                })
            }));
        }

        // Shrink commands one at a time
        for at in 0..n {
            let items = Rc::clone(&items);
            let one_command = self.one_command.clone();
            sources.push(Stream::lazy(move || {
                let item = items[at].clone();
                one_command
                    .shrink(item.value(), item.context())
                    .map(move |shrunk| {
                        let mut next = items.to_vec();
                        next[at] = shrunk;
                        next
                    })
            }));
        }

        let replay_log = self.printed_log();
        Ok(Stream::concat(sources).map(move |candidate| {
            let fresh = candidate
                .into_iter()
                .map(|item| {
                    let (command, context) = item.into_parts();
                    Value::new(command.fresh(), context)
                })
                .collect();
            Self::build_value(fresh, true, replay_log.clone())
        }))
    }
}

impl<M: 'static, R: 'static> Arbitrary<CommandsIterable<M, R>> for CommandsArbitrary<M, R> {
    fn generate(&self, rng: &mut Random, _bias_factor: Option<u32>) -> Value<CommandsIterable<M, R>> {
        let size = *self.length.generate(rng, None).value();
        let items = (0..size)
            .map(|_| self.one_command.generate(rng, None))
            .collect();
        self.replay_log.borrow_mut().position = 0;
        Self::build_value(items, false, self.printed_log())
    }

    fn can_shrink_without_context(&self, _value: &CommandsIterable<M, R>) -> bool {
        false
    }

    /// # Panics
    ///
    /// Panics when the replay log contradicts the recorded execution; see
    /// [`CommandsArbitrary::try_shrink`].
    fn shrink(
        &self,
        value: &CommandsIterable<M, R>,
        context: Option<&Context>,
    ) -> Stream<Value<CommandsIterable<M, R>>> {
        match self.try_shrink(value, context) {
            Ok(stream) => stream,
            Err(err) => panic!("{}", err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Command, just};
    use crate::runner::model_run;

    #[derive(Debug)]
    struct Push(u8);

    impl Command<usize, Vec<u8>> for Push {
        fn check(&self, _model: &usize) -> bool {
            true
        }

        fn run(&self, model: &mut usize, real: &mut Vec<u8>) -> Result<(), String> {
            *model += 1;
            real.push(self.0);
            Ok(())
        }
    }

    fn pushes(constraints: CommandsConstraints) -> CommandsArbitrary<usize, Vec<u8>> {
        CommandsArbitrary::new(
            vec![just(Push(1)).boxed(), just(Push(2)).boxed()],
            constraints,
        )
        .unwrap()
    }

    #[test]
    fn test_generated_length_respects_max() {
        let arb = pushes(CommandsConstraints {
            max_commands: Some(4),
            ..Default::default()
        });
        let mut rng = Random::new(11);
        for _ in 0..100 {
            assert!(arb.generate(&mut rng, None).value().len() <= 4);
        }
    }

    #[test]
    fn test_no_context_no_shrink() {
        let arb = pushes(CommandsConstraints::default());
        let value = arb.generate(&mut Random::new(1), None).into_value();
        assert!(!arb.can_shrink_without_context(&value));
        assert_eq!(arb.shrink(&value, None).count(), 0);
    }

    #[test]
    fn test_nothing_ran_nothing_to_shrink() {
        let arb = pushes(CommandsConstraints::default());
        let generated = arb.generate(&mut Random::new(3), None);
        assert_eq!(arb.shrink(generated.value(), generated.context()).count(), 0);
    }

    #[test]
    fn test_first_candidate_is_empty_then_shorter_sequences() {
        let arb = pushes(CommandsConstraints {
            size: Some(crate::config::Size::Medium),
            ..Default::default()
        });
        let mut rng = Random::new(5);
        let generated = loop {
            let g = arb.generate(&mut rng, None);
            if g.value().len() >= 3 {
                break g;
            }
        };
        model_run(|| (0usize, Vec::new()), generated.value()).unwrap();
        let n = generated.value().len();

        let candidates: Vec<_> = arb
            .shrink(generated.value(), generated.context())
            .take(5)
            .collect();
        assert!(candidates[0].value().is_empty());
        for candidate in &candidates[1..] {
            assert!(candidate.value().len() < n);
            assert!(candidate.value().iter().all(|c| !c.has_ran()));
        }
    }

    #[test]
    fn test_malformed_replay_path_is_rejected() {
        let result = CommandsArbitrary::<usize, Vec<u8>>::new(
            vec![just(Push(1)).boxed()],
            CommandsConstraints {
                replay_path: Some("no separator".to_string()),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(CommandsError::ReplayPath(_))));
    }

    #[test]
    fn test_empty_command_list_is_rejected() {
        let result = CommandsArbitrary::<usize, Vec<u8>>::new(vec![], CommandsConstraints::default());
        assert!(matches!(result, Err(CommandsError::Constraint(_))));
    }
}
