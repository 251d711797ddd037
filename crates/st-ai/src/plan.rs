//! `PlanState` — per-pass memo table and plan-only scratch state.
//!
//! A fresh `PlanState` is created for each agent's decision pass and dropped
//! at its end.  Values are computed on first request from the universe
//! snapshot and never invalidated while the pass runs, so every option sees
//! the same numbers.  Map presence marks "computed"; there are no sentinel
//! values.

use rustc_hash::{FxHashMap, FxHashSet};
use st_core::AgentId;

use crate::DecisionContext;

#[derive(Debug, Default)]
pub struct PlanState {
    population:     FxHashMap<AgentId, f64>,
    average_salary: FxHashMap<AgentId, f64>,
    fuel_fraction:  FxHashMap<(AgentId, AgentId), f64>,
    distance:       FxHashMap<(AgentId, AgentId), u64>,
    contacted:      FxHashSet<AgentId>,
    reserved_fuel:  f64,
    misses:         usize,
}

impl PlanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total carrier population of `agent`.
    pub fn population(&mut self, ctx: &DecisionContext<'_>, agent: AgentId) -> Option<f64> {
        if let Some(&v) = self.population.get(&agent) {
            return Some(v);
        }
        let v = ctx.other(agent)?.total_population();
        self.misses += 1;
        self.population.insert(agent, v);
        Some(v)
    }

    /// Population-weighted mean carrier salary of `agent`.
    pub fn average_salary(&mut self, ctx: &DecisionContext<'_>, agent: AgentId) -> Option<f64> {
        if let Some(&v) = self.average_salary.get(&agent) {
            return Some(v);
        }
        let v = ctx.other(agent)?.average_salary();
        self.misses += 1;
        self.average_salary.insert(agent, v);
        Some(v)
    }

    /// Fraction of fuel that would survive a transfer from `from` to `to`
    /// right now, sharing both declared loss rates.
    pub fn fuel_remaining_fraction(
        &mut self,
        ctx:  &DecisionContext<'_>,
        from: AgentId,
        to:   AgentId,
    ) -> Option<f64> {
        if let Some(&v) = self.fuel_fraction.get(&(from, to)) {
            return Some(v);
        }
        let (a, b) = (ctx.other(from)?, ctx.other(to)?);
        let v = ctx.settings.metric().transfer_fraction(
            a.coordinate,
            b.coordinate,
            a.physics.fuel_loss_rate_per_distance,
            b.physics.fuel_loss_rate_per_distance,
        );
        self.misses += 1;
        self.fuel_fraction.insert((from, to), v);
        Some(v)
    }

    pub fn causal_distance(&mut self, ctx: &DecisionContext<'_>, from: AgentId, to: AgentId) -> Option<u64> {
        if let Some(&v) = self.distance.get(&(from, to)) {
            return Some(v);
        }
        let (a, b) = (ctx.other(from)?, ctx.other(to)?);
        let v = ctx.settings.metric().distance(a.coordinate, b.coordinate);
        self.misses += 1;
        self.distance.insert((from, to), v);
        Some(v)
    }

    // ── Plan-only state ───────────────────────────────────────────────────

    /// Remember that a command to `agent` was planned this pass.
    pub fn mark_contacted(&mut self, agent: AgentId) {
        self.contacted.insert(agent);
    }

    pub fn was_contacted(&self, agent: AgentId) -> bool {
        self.contacted.contains(&agent)
    }

    /// Earmark storage fuel for a planned command.
    pub fn reserve_fuel(&mut self, amount: f64) {
        self.reserved_fuel += amount.max(0.0);
    }

    pub fn reserved_fuel(&self) -> f64 {
        self.reserved_fuel
    }

    /// Own storage fuel not yet earmarked this pass.
    pub fn available_storage_fuel(&self, ctx: &DecisionContext<'_>) -> f64 {
        (ctx.own().fuel.storage - self.reserved_fuel).max(0.0)
    }

    /// Number of values computed (rather than served from cache).
    pub fn cache_misses(&self) -> usize {
        self.misses
    }
}
