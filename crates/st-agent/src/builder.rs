//! Fluent construction of `AgentStore` + `AgentRngs`.
//!
//! ```rust
//! use st_agent::AgentStoreBuilder;
//! use st_core::{AgentId, Int3D};
//!
//! #[derive(Default)]
//! struct Morale(f32);
//!
//! let (store, rngs) = AgentStoreBuilder::new(3, 42)
//!     .positions(vec![Int3D::new(0, 0, 0), Int3D::new(1, 0, 0), Int3D::new(5, 5, 0)])
//!     .leader(AgentId(1), AgentId(0))
//!     .configure(|s| s.fuel.storage = 100.0)
//!     .register_component::<Morale>()
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(store.len(), 3);
//! assert_eq!(rngs.len(), 3);
//! assert!(store.states[0].is_subordinate(AgentId(1)));
//! ```

use st_core::{AgentId, Int3D};

use crate::component::ComponentMap;
use crate::hierarchy::derive_authority;
use crate::{AgentError, AgentResult, AgentRngs, AgentState, AgentStore};

type Configure = Box<dyn FnMut(&mut AgentState)>;

pub struct AgentStoreBuilder {
    count:      usize,
    seed:       u64,
    positions:  Option<Vec<Int3D>>,
    leaders:    Vec<(AgentId, AgentId)>,
    configure:  Vec<Configure>,
    components: ComponentMap,
}

impl AgentStoreBuilder {
    /// `count` agents seeded from `seed`.  Everyone starts at the origin,
    /// empty, and without a leader.
    pub fn new(count: usize, seed: u64) -> Self {
        Self {
            count,
            seed,
            positions:  None,
            leaders:    Vec::new(),
            configure:  Vec::new(),
            components: ComponentMap::new(),
        }
    }

    /// One spatial position per agent.  Length must equal `count`.
    pub fn positions(mut self, positions: Vec<Int3D>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Make `leader` the direct leader of `agent`.
    pub fn leader(mut self, agent: AgentId, leader: AgentId) -> Self {
        self.leaders.push((agent, leader));
        self
    }

    /// Run `f` over every freshly created state, in id order.  Closures run in
    /// registration order and before authority is derived.
    pub fn configure(mut self, f: impl FnMut(&mut AgentState) + 'static) -> Self {
        self.configure.push(Box::new(f));
        self
    }

    pub fn register_component<T: Default + Send + Sync + 'static>(mut self) -> Self {
        self.components.register::<T>(self.count);
        self
    }

    pub fn build(mut self) -> AgentResult<(AgentStore, AgentRngs)> {
        let positions = match self.positions.take() {
            Some(p) if p.len() != self.count => {
                return Err(AgentError::CountMismatch {
                    expected: self.count,
                    got:      p.len(),
                    what:     "positions",
                });
            }
            Some(p) => p,
            None => vec![Int3D::default(); self.count],
        };

        let mut links = vec![None; self.count];
        for &(agent, leader) in &self.leaders {
            if agent.index() >= self.count {
                return Err(AgentError::UnknownAgent(agent));
            }
            links[agent.index()] = Some(leader);
        }
        let authority = derive_authority(&links)?;

        let mut states = Vec::with_capacity(self.count);
        for (i, (pos, auth)) in positions.into_iter().zip(authority).enumerate() {
            let mut state = AgentState::new(AgentId(i as u32), pos.at(0));
            for f in &mut self.configure {
                f(&mut state);
            }
            state.authority = auth;
            states.push(state);
        }

        let store = AgentStore::new(states, self.components);
        let rngs = AgentRngs::new(self.count, self.seed);
        Ok((store, rngs))
    }
}
