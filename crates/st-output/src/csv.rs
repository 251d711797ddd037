//! CSV output backend.
//!
//! Creates three files in the configured output directory:
//! - `tick_summaries.csv`
//! - `command_log.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, CommandLogRow, OutputResult, TickSummaryRow};

pub struct CsvWriter {
    summaries: Writer<File>,
    commands:  Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the three CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record([
            "tick",
            "delivered",
            "applied",
            "rejected_at_receive",
            "faults",
            "emitted",
            "sent",
            "local",
            "rejected_at_send",
            "in_flight",
        ])?;

        let mut commands = Writer::from_path(dir.join("command_log.csv"))?;
        commands.write_record(["tick", "phase", "from", "to", "kind", "success", "reason"])?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record([
            "agent_id",
            "tick",
            "x",
            "y",
            "z",
            "direct_leader",
            "storage_fuel",
            "total_fuel",
            "population",
            "enemies",
            "factories",
        ])?;

        Ok(Self { summaries, commands, snapshots, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.delivered.to_string(),
            row.applied.to_string(),
            row.rejected_at_receive.to_string(),
            row.faults.to_string(),
            row.emitted.to_string(),
            row.sent.to_string(),
            row.local.to_string(),
            row.rejected_at_send.to_string(),
            row.in_flight.to_string(),
        ])?;
        Ok(())
    }

    fn write_commands(&mut self, rows: &[CommandLogRow]) -> OutputResult<()> {
        for row in rows {
            self.commands.write_record(&[
                row.tick.to_string(),
                row.phase.to_string(),
                row.from_id.to_string(),
                row.to_id.to_string(),
                row.kind.to_string(),
                (row.success as u8).to_string(),
                row.reason.clone(),
            ])?;
        }
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.z.to_string(),
                row.direct_leader.to_string(),
                row.storage_fuel.to_string(),
                row.total_fuel.to_string(),
                row.population.to_string(),
                row.enemies.to_string(),
                row.factories.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.summaries.flush()?;
        self.commands.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
