//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use st_agent::AgentStore;
use st_command::CommandRecord;
use st_core::Tick;
use st_sim::{SimObserver, TickSummary};

use crate::row::{AgentSnapshotRow, CommandLogRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every stream to an [`OutputWriter`].
///
/// Command records are buffered for the tick and written in one batch at
/// tick end.  Writer errors are kept (first one wins) and read back with
/// [`take_error`][Self::take_error] once `sim.run()` returns.
pub struct SimOutputObserver<W: OutputWriter> {
    writer:       W,
    log_commands: bool,
    pending:      Vec<CommandLogRow>,
    last_error:   Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, log_commands: true, pending: Vec::new(), last_error: None }
    }

    /// Skip `command_log` rows.  Summaries and snapshots are still written.
    pub fn without_command_log(mut self) -> Self {
        self.log_commands = false;
        self
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_command(&mut self, tick: Tick, record: &CommandRecord) {
        if self.log_commands {
            self.pending.push(CommandLogRow::new(tick, record));
        }
    }

    fn on_tick_end(&mut self, _tick: Tick, summary: &TickSummary) {
        if !self.pending.is_empty() {
            let rows = std::mem::take(&mut self.pending);
            let result = self.writer.write_commands(&rows);
            self.store_err(result);
        }
        let result = self.writer.write_tick_summary(&TickSummaryRow::from(summary));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &AgentStore) {
        let rows: Vec<AgentSnapshotRow> = agents.states.iter().map(|s| AgentSnapshotRow::new(tick, s)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
