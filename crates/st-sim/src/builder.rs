//! Fluent builder for constructing a [`Sim`].

use st_agent::{AgentRngs, AgentStore};
use st_ai::DecisionModel;
use st_command::{InFlightCommand, InFlightQueue};
use st_core::{SimClock, SimConfig, UniverseSettings};

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: total ticks, seed, thread count, output interval
/// - [`UniverseSettings`]: speed of light, locality radius, grid extent
/// - [`AgentStore`] + [`AgentRngs`] from [`st_agent::AgentStoreBuilder`]
/// - `M: DecisionModel`, e.g. [`st_ai::ReasonerModel`]
///
/// # Optional inputs
///
/// | Method           | Default      |
/// |------------------|--------------|
/// | `.in_flight(v)`  | empty queue  |
///
/// # Example
///
/// ```rust,ignore
/// let (store, rngs) = AgentStoreBuilder::new(n, seed).build()?;
/// let model = ReasonerModel::new(default_reasoner())?;
/// let mut sim = SimBuilder::new(config, settings, store, rngs, model).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<M: DecisionModel> {
    config:    SimConfig,
    settings:  UniverseSettings,
    agents:    AgentStore,
    rngs:      AgentRngs,
    model:     M,
    in_flight: Vec<InFlightCommand>,
}

impl<M: DecisionModel> SimBuilder<M> {
    pub fn new(
        config:   SimConfig,
        settings: UniverseSettings,
        agents:   AgentStore,
        rngs:     AgentRngs,
        model:    M,
    ) -> Self {
        Self { config, settings, agents, rngs, model, in_flight: Vec::new() }
    }

    /// Commands already travelling when the run starts, e.g. restored from a
    /// checkpoint.  Their targets must exist.
    pub fn in_flight(mut self, commands: Vec<InFlightCommand>) -> Self {
        self.in_flight = commands;
        self
    }

    /// Validate inputs and return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        self.config.validate()?;
        self.settings.validate()?;

        if self.rngs.len() != self.agents.len() {
            return Err(SimError::AgentCountMismatch {
                expected: self.agents.len(),
                got:      self.rngs.len(),
                what:     "agent RNGs",
            });
        }

        for state in &self.agents.states {
            let position = state.coordinate.to_int3d();
            if !self.settings.contains(position) {
                return Err(SimError::OutOfBounds { agent: state.id, position });
            }
        }

        if let Some(c) = self.in_flight.iter().find(|c| self.agents.get(c.to_id()).is_none()) {
            return Err(st_command::CommandError::UnknownTarget(c.to_id()).into());
        }

        configure_thread_pool(&self.config);

        let mut queue = InFlightQueue::new();
        queue.extend(self.in_flight);

        Ok(Sim {
            clock:    SimClock::new(),
            config:   self.config,
            settings: self.settings,
            agents:   self.agents,
            rngs:     self.rngs,
            model:    self.model,
            queue,
        })
    }
}

#[cfg(feature = "parallel")]
fn configure_thread_pool(config: &SimConfig) {
    let Some(n) = config.num_threads else {
        return;
    };
    // Only the first global pool configuration in a process takes effect.
    if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
        tracing::warn!(threads = n, error = %e, "rayon pool already initialised");
    }
}

#[cfg(not(feature = "parallel"))]
fn configure_thread_pool(_config: &SimConfig) {}
