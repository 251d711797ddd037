//! `AgentStore` (all agent states + opaque components) and `AgentRngs`.
//!
//! # Why two structs?
//!
//! The decision phase needs `&AgentStore` (shared read of the prior-tick
//! universe) and `&mut AgentRng` for each deciding agent at the same time.
//! Keeping RNGs outside the store lets the sim loop borrow both:
//!
//! ```ignore
//! let store: &AgentStore = &sim.agents;
//! let decisions: Vec<_> = sim.rngs.inner
//!     .par_iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| model.decide(&context(store, AgentId(i as u32)), rng))
//!     .collect();
//! ```

use st_core::{AgentId, AgentRng};

use crate::component::ComponentMap;
use crate::hierarchy::derive_authority;
use crate::{AgentError, AgentResult, AgentState};

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// One seeded RNG stream per agent, indexed by `AgentId`.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    pub(crate) fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, AgentId(i)))
            .collect();
        Self { inner }
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentRng> {
        self.inner.get_mut(agent.index())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentStore ────────────────────────────────────────────────────────────────

/// Every agent's state, indexed by `AgentId`.
///
/// `states[i].id == AgentId(i)` always holds.  The authority closures inside
/// each state are kept consistent by going through
/// [`set_direct_leader`](Self::set_direct_leader) rather than editing
/// `authority` by hand.
#[derive(Debug)]
pub struct AgentStore {
    pub states: Vec<AgentState>,
    components: ComponentMap,
}

impl AgentStore {
    pub(crate) fn new(states: Vec<AgentState>, components: ComponentMap) -> Self {
        Self { states, components }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.states.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn agent_ids(&self) -> impl Iterator<Item = AgentId> + '_ {
        (0..self.states.len() as u32).map(AgentId)
    }

    #[inline]
    pub fn get(&self, agent: AgentId) -> Option<&AgentState> {
        self.states.get(agent.index())
    }

    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> Option<&mut AgentState> {
        self.states.get_mut(agent.index())
    }

    /// Like [`get`](Self::get) but with a typed error.
    pub fn state(&self, agent: AgentId) -> AgentResult<&AgentState> {
        self.get(agent).ok_or(AgentError::UnknownAgent(agent))
    }

    /// Stamp every agent's coordinate with the current time.
    pub fn set_time(&mut self, t: i64) {
        for state in &mut self.states {
            state.coordinate.t = t;
        }
    }

    // ── Hierarchy ─────────────────────────────────────────────────────────

    /// Walk `direct_leader_id` links from `agent` to the root of its tree.
    ///
    /// Stops at the first agent without a leader or whose leader is itself.
    /// Returns `None` for an unknown agent or a corrupted (cyclic) chain.
    pub fn top_leader_id(&self, agent: AgentId) -> Option<AgentId> {
        let mut current = agent;
        for _ in 0..=self.len() {
            let state = self.get(current)?;
            match state.authority.direct_leader_id {
                Some(leader) if leader != current => current = leader,
                _ => return Some(current),
            }
        }
        None
    }

    /// Re-point `agent` at `leader` (or detach it) and rebuild every
    /// authority closure.  The store is left untouched on error.
    pub fn set_direct_leader(&mut self, agent: AgentId, leader: Option<AgentId>) -> AgentResult<()> {
        if agent.index() >= self.len() {
            return Err(AgentError::UnknownAgent(agent));
        }
        let mut links: Vec<Option<AgentId>> =
            self.states.iter().map(|s| s.authority.direct_leader_id).collect();
        links[agent.index()] = leader;
        let derived = derive_authority(&links)?;
        for (state, authority) in self.states.iter_mut().zip(derived) {
            state.authority = authority;
        }
        Ok(())
    }

    // ── Component access ──────────────────────────────────────────────────

    pub fn component<T: Default + Send + Sync + 'static>(&self) -> Option<&[T]> {
        self.components.get::<T>()
    }

    /// Only call outside the decision phase.
    pub fn component_mut<T: Default + Send + Sync + 'static>(&mut self) -> Option<&mut [T]> {
        self.components.get_mut::<T>()
    }

    pub fn components(&self) -> &ComponentMap {
        &self.components
    }
}
