//! `CommandExecutor` — drives commands through their lifecycle.
//!
//! Send side: [`send_batch`](CommandExecutor::send_batch) validates each
//! command against the sender, applies its local part, and either applies a
//! self-targeted command on the spot or wraps it as an [`InFlightCommand`]
//! due after the signal delay.
//!
//! Receive side: [`apply_batch`](CommandExecutor::apply_batch) runs commands
//! one after another against a single target.  Later commands see the
//! effects of earlier ones.  A rejection or an execute fault affects only
//! the command that caused it.

use std::fmt;

use st_agent::{AgentState, AgentStore};
use st_core::{AgentId, Int3D, Int4D, Tick, UniverseSettings};
use tracing::{debug, error};

use crate::{
    Command, CommandError, CommandHooks, CommandOutcome, CommandResult, InFlightCommand,
    LocalizableMessage,
};

/// Where in the lifecycle a record was produced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CommandPhase {
    /// Sender-side validation.  A successful record means "transmitted".
    Send,
    /// A self-targeted command applied during the send phase.
    Local,
    /// Receiver-side validation and execution.
    Receive,
}

impl CommandPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            CommandPhase::Send    => "send",
            CommandPhase::Local   => "local",
            CommandPhase::Receive => "receive",
        }
    }
}

impl fmt::Display for CommandPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One command's fate at one phase.  Handed to observers.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandRecord {
    pub phase:   CommandPhase,
    pub from_id: AgentId,
    pub to_id:   AgentId,
    pub kind:    &'static str,
    pub outcome: CommandOutcome,
    /// `execute` returned a fault (the outcome is then a failure too).
    pub faulted: bool,
}

/// Result of [`CommandExecutor::send_batch`].
#[derive(Debug, Default)]
pub struct SendReport {
    /// Commands to enqueue for remote delivery.
    pub in_flight: Vec<InFlightCommand>,
    /// One record per submitted command.
    pub records:   Vec<CommandRecord>,
}

impl SendReport {
    pub fn rejected(&self) -> usize {
        self.records.iter().filter(|r| !r.outcome.success).count()
    }
}

/// Runs the command lifecycle under one universe's constants.
#[derive(Copy, Clone, Debug)]
pub struct CommandExecutor<'a> {
    settings: &'a UniverseSettings,
}

impl<'a> CommandExecutor<'a> {
    pub fn new(settings: &'a UniverseSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &'a UniverseSettings {
        self.settings
    }

    /// Validate and dispatch `commands` emitted by `sender` at `now`.
    ///
    /// `locate` answers the current position of a receiver.  A command to an
    /// agent it cannot place is rejected before anything is debited.
    /// Remote commands arrive after `max(1, ⌈d / c⌉)` ticks.
    pub fn send_batch(
        &self,
        sender:   &mut AgentState,
        commands: Vec<Command>,
        now:      Tick,
        locate:   impl Fn(AgentId) -> Option<Int3D>,
    ) -> SendReport {
        let metric = self.settings.metric();
        let mut report = SendReport::default();

        for (sequence, command) in commands.into_iter().enumerate() {
            let from_id = sender.id;
            let to_id = command.to_id();
            let kind = command.kind();
            let record = move |phase: CommandPhase, outcome: CommandOutcome, faulted: bool| CommandRecord {
                phase,
                from_id,
                to_id,
                kind,
                outcome,
                faulted,
            };

            let Some(target_position) = locate(to_id) else {
                let outcome = CommandOutcome::fail(LocalizableMessage::text("unknown receiver").with_value(to_id));
                debug!(from = %from_id, to = %to_id, kind, reason = %outcome.reason, "command rejected at send");
                report.records.push(record(CommandPhase::Send, outcome, false));
                continue;
            };

            let outcome = command.can_send(sender, self.settings);
            if !outcome.success {
                debug!(from = %from_id, to = %to_id, kind, reason = %outcome.reason, "command rejected at send");
                report.records.push(record(CommandPhase::Send, outcome, false));
                continue;
            }

            command.self_execute_before_send(sender, self.settings);

            if sender.is_self(to_id) {
                let origin = sender.coordinate;
                let (outcome, faulted) = self.apply_one(sender, &command, from_id, origin);
                report.records.push(record(CommandPhase::Local, outcome, faulted));
                continue;
            }

            let distance = metric.distance(sender.coordinate, target_position.at(sender.coordinate.t));
            let delay = metric.delay_ticks(distance).max(1);
            report.records.push(record(CommandPhase::Send, CommandOutcome::ok(), false));
            report.in_flight.push(InFlightCommand {
                command,
                from_id,
                from_coordinate: sender.coordinate,
                sent_tick: now,
                arrival_tick: now.offset(delay),
                sequence: sequence as u32,
            });
        }

        report
    }

    /// Apply `commands` to `target` in order, returning one outcome each.
    pub fn apply_batch(&self, target: &mut AgentState, commands: Vec<InFlightCommand>) -> Vec<CommandOutcome> {
        self.deliver(target, commands).into_iter().map(|r| r.outcome).collect()
    }

    /// Like [`apply_batch`](Self::apply_batch) but keeps the full records.
    ///
    /// A command addressed to another agent fails without touching `target`;
    /// its record names the intended receiver.  So does one whose sending
    /// event is not in the past light cone of `target.coordinate`.
    pub fn deliver(&self, target: &mut AgentState, commands: Vec<InFlightCommand>) -> Vec<CommandRecord> {
        let metric = self.settings.metric();
        commands
            .into_iter()
            .map(|in_flight| {
                let to_id = in_flight.command.to_id();
                let (outcome, faulted) = if to_id != target.id {
                    let reason = LocalizableMessage::text("misaddressed command").with_value(to_id);
                    debug!(from = %in_flight.from_id, to = %to_id, at = %target.id, "command rejected at receive");
                    (CommandOutcome::fail(reason), false)
                } else if !metric.is_causally_reachable(in_flight.from_coordinate, target.coordinate) {
                    let reason = LocalizableMessage::text("arrived outside the sender's light cone");
                    debug!(from = %in_flight.from_id, to = %to_id, sent = %in_flight.from_coordinate, at = %target.coordinate, "command rejected at receive");
                    (CommandOutcome::fail(reason), false)
                } else {
                    self.apply_one(target, &in_flight.command, in_flight.from_id, in_flight.from_coordinate)
                };
                CommandRecord {
                    phase: CommandPhase::Receive,
                    from_id: in_flight.from_id,
                    to_id,
                    kind: in_flight.command.kind(),
                    outcome,
                    faulted,
                }
            })
            .collect()
    }

    /// [`deliver`](Self::deliver) to an agent looked up in `store`.
    pub fn deliver_to(
        &self,
        store:    &mut AgentStore,
        target:   AgentId,
        commands: Vec<InFlightCommand>,
    ) -> CommandResult<Vec<CommandRecord>> {
        let state = store.get_mut(target).ok_or(CommandError::UnknownTarget(target))?;
        Ok(self.deliver(state, commands))
    }

    /// `can_execute` then `execute` for a single command.
    fn apply_one(
        &self,
        target:          &mut AgentState,
        command:         &Command,
        from_id:         AgentId,
        from_coordinate: Int4D,
    ) -> (CommandOutcome, bool) {
        let outcome = command.can_execute(target, from_id, from_coordinate, self.settings);
        if !outcome.success {
            debug!(from = %from_id, to = %target.id, kind = command.kind(), reason = %outcome.reason, "command rejected at receive");
            return (outcome, false);
        }
        match command.execute(target, from_id, from_coordinate, self.settings) {
            Ok(()) => (CommandOutcome::ok(), false),
            Err(fault) => {
                error!(from = %from_id, to = %target.id, kind = command.kind(), %fault, "command execution fault");
                let reason = LocalizableMessage::text("execution fault").with_value(&fault);
                (CommandOutcome::fail(reason), true)
            }
        }
    }
}
