//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, CommandLogRow, OutputResult, TickSummaryRow};

/// Sink for the three observation streams.
///
/// Errors surface through [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error]
/// because observer hooks cannot return them.
pub trait OutputWriter {
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Write a batch of command records, in lifecycle order.
    fn write_commands(&mut self, rows: &[CommandLogRow]) -> OutputResult<()>;

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
