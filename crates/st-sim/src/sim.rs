//! The `Sim` struct and its tick loop.

use st_agent::{AgentRngs, AgentState, AgentStore};
use st_ai::{DecisionContext, DecisionModel};
use st_command::{Command, CommandError, CommandExecutor, CommandRecord, InFlightCommand, InFlightQueue};
use st_core::{AgentId, Int3D, SimClock, SimConfig, Tick, UniverseSettings};
use tracing::{debug, info};

use crate::{SimObserver, SimResult, TickSummary};

#[cfg(feature = "fx-hash")]
type InboxMap = rustc_hash::FxHashMap<AgentId, Vec<InFlightCommand>>;
#[cfg(not(feature = "fx-hash"))]
type InboxMap = std::collections::HashMap<AgentId, Vec<InFlightCommand>>;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Each tick runs three phases against the agent store:
///
/// 1. **Deliver**: drain commands due by `now` from the in-flight queue and
///    apply each target's batch in causal order (targets in parallel with
///    the `parallel` feature).
/// 2. **Decide**: every agent runs the [`DecisionModel`] against the
///    post-delivery store, read-only (parallel with `parallel`).
/// 3. **Send**: sequentially, in ascending `AgentId`, validate and debit
///    each agent's commands and enqueue the remote ones.
///
/// Nothing emitted at tick `t` can arrive before `t + 1`.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: DecisionModel> {
    pub config: SimConfig,

    /// Constants shared by every command in the run.
    pub settings: UniverseSettings,

    pub clock: SimClock,

    pub agents: AgentStore,

    /// Per-agent deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: AgentRngs,

    pub model: M,

    /// Commands between send and arrival.
    pub queue: InFlightQueue,
}

impl<M: DecisionModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        info!(
            agents = self.agents.len(),
            start = %self.clock.current_tick,
            end = %self.config.end_tick(),
            "simulation starting"
        );
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        info!(final_tick = %self.clock.current_tick, in_flight = self.queue.len(), "simulation finished");
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// Process the current tick, fire observer hooks, advance the clock.
    pub fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<TickSummary> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);

        let summary = self.process_tick(now, observer)?;
        debug!(
            tick = %now,
            delivered = summary.delivered,
            applied = summary.applied,
            faults = summary.faults,
            sent = summary.sent,
            in_flight = summary.in_flight,
            "tick complete"
        );
        observer.on_tick_end(now, &summary);

        if self.config.output_interval_ticks > 0 && now.0.is_multiple_of(self.config.output_interval_ticks) {
            observer.on_snapshot(now, &self.agents);
        }

        self.clock.advance();
        Ok(summary)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickSummary> {
        let mut summary = TickSummary::new(now);
        self.agents.set_time(now.as_time());

        // ── Phase 1: deliver ──────────────────────────────────────────────
        for record in self.deliver(now)? {
            summary.record(&record);
            observer.on_command(now, &record);
        }

        // ── Phase 2: decide (read-only over the store) ────────────────────
        let emitted = self.compute_commands(now)?;
        summary.emitted = emitted.iter().map(Vec::len).sum();

        // ── Phase 3: send (sequential, ascending AgentId) ─────────────────
        //
        // Positions are taken once; nothing in the send phase moves agents.
        let positions: Vec<Int3D> = self.agents.states.iter().map(|s| s.coordinate.to_int3d()).collect();
        let locate = |id: AgentId| positions.get(id.index()).copied();
        let exec = CommandExecutor::new(&self.settings);

        for (sender, commands) in self.agents.states.iter_mut().zip(emitted) {
            if commands.is_empty() {
                continue;
            }
            let report = exec.send_batch(sender, commands, now, locate);
            for record in &report.records {
                summary.record(record);
                observer.on_command(now, record);
            }
            self.queue.extend(report.in_flight);
        }

        summary.in_flight = self.queue.len();
        Ok(summary)
    }

    /// Apply every command due by `now`.  Records come back grouped by
    /// target in ascending `AgentId`, causal order within a target.
    fn deliver(&mut self, now: Tick) -> SimResult<Vec<CommandRecord>> {
        let due = self.queue.drain_until(now);
        if due.is_empty() {
            return Ok(Vec::new());
        }

        let mut inbox = InboxMap::default();
        for command in due {
            inbox.entry(command.to_id()).or_default().push(command);
        }
        if let Some(&missing) = inbox.keys().find(|&&id| self.agents.get(id).is_none()) {
            return Err(CommandError::UnknownTarget(missing).into());
        }

        // Pair each addressed state with its batch; walking the states keeps
        // the pairing in ascending id whatever the map's order.
        let jobs: Vec<(&mut AgentState, Vec<InFlightCommand>)> = self
            .agents
            .states
            .iter_mut()
            .filter_map(|state| inbox.remove(&state.id).map(|batch| (state, batch)))
            .collect();

        let exec = CommandExecutor::new(&self.settings);

        #[cfg(not(feature = "parallel"))]
        let per_target: Vec<Vec<CommandRecord>> =
            jobs.into_iter().map(|(state, batch)| exec.deliver(state, batch)).collect();

        #[cfg(feature = "parallel")]
        let per_target: Vec<Vec<CommandRecord>> = {
            use rayon::prelude::*;
            jobs.into_par_iter().map(|(state, batch)| exec.deliver(state, batch)).collect()
        };

        Ok(per_target.into_iter().flatten().collect())
    }

    /// One command list per agent, indexed by `AgentId`.
    fn compute_commands(&mut self, now: Tick) -> SimResult<Vec<Vec<Command>>> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let agents   = &self.agents;
        let settings = &self.settings;
        let model    = &self.model;
        let rngs     = &mut self.rngs.inner;

        let decide_one = |(i, rng): (usize, &mut st_core::AgentRng)| -> SimResult<Vec<Command>> {
            let ctx = DecisionContext::new(now, AgentId(i as u32), settings, agents)?;
            Ok(model.decide(&ctx, rng))
        };

        #[cfg(not(feature = "parallel"))]
        {
            rngs.iter_mut().enumerate().map(decide_one).collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;
            rngs.par_iter_mut().enumerate().map(decide_one).collect()
        }
    }
}
