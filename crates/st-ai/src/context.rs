//! Read-only view handed to every consideration and option.

use st_agent::{AgentState, AgentStore};
use st_core::{AgentId, Tick, UniverseSettings};

use crate::{AiError, AiResult};

/// What one agent may look at while deciding.
///
/// `universe` is the state at the end of the previous tick.  Nothing reachable
/// from here is mutated until every agent has decided.
#[derive(Copy, Clone)]
pub struct DecisionContext<'a> {
    pub tick:     Tick,
    pub agent:    AgentId,
    pub settings: &'a UniverseSettings,
    pub universe: &'a AgentStore,
    own:          &'a AgentState,
}

impl<'a> DecisionContext<'a> {
    pub fn new(
        tick:     Tick,
        agent:    AgentId,
        settings: &'a UniverseSettings,
        universe: &'a AgentStore,
    ) -> AiResult<Self> {
        let own = universe.get(agent).ok_or(AiError::UnknownAgent(agent))?;
        Ok(Self { tick, agent, settings, universe, own })
    }

    /// The deciding agent's own state.
    #[inline]
    pub fn own(&self) -> &'a AgentState {
        self.own
    }

    #[inline]
    pub fn other(&self, agent: AgentId) -> Option<&'a AgentState> {
        self.universe.get(agent)
    }
}
