//! Simulation observer trait for progress reporting and data collection.

use st_agent::AgentStore;
use st_command::CommandRecord;
use st_core::Tick;

use crate::TickSummary;

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — war tracker
///
/// ```rust,ignore
/// struct WarTracker { declared: usize }
///
/// impl SimObserver for WarTracker {
///     fn on_command(&mut self, _tick: Tick, record: &CommandRecord) {
///         if record.kind == "declare_war" && record.outcome.success {
///             self.declared += 1;
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once per command per lifecycle phase: receive records first
    /// (ascending target), then send and local records (ascending sender).
    fn on_command(&mut self, _tick: Tick, _record: &CommandRecord) {}

    /// Called at the end of each tick with the tick's counters.
    fn on_tick_end(&mut self, _tick: Tick, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with read-only access
    /// to the full agent state.
    fn on_snapshot(&mut self, _tick: Tick, _agents: &AgentStore) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
