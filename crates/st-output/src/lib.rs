//! `st-output` — observation log writers for `st` simulations.
//!
//! | Backend | Files created                                                   |
//! |---------|-----------------------------------------------------------------|
//! | CSV     | `tick_summaries.csv`, `command_log.csv`, `agent_snapshots.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `st_sim::SimObserver`.  The files
//! are a record of what happened, not a checkpoint: nothing reads them back.
//!
//! # Usage
//!
//! ```rust,ignore
//! use st_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer);
//! sim.run(&mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::{AgentSnapshotRow, CommandLogRow, TickSummaryRow};
pub use writer::OutputWriter;
