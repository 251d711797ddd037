//! Agent identifiers.
//!
//! Agent ids are stable for the lifetime of a run: they index directly into
//! `AgentStore::states`, and commands carry them across ticks.  Sub-entities
//! that can be destroyed (carriers, factories) use generation-checked slot
//! map keys instead (see `st-agent`).  "No agent" is spelled `Option<AgentId>`.

use std::fmt;

/// Index of an agent ("player") in the store.
///
/// Ordering is numeric, which is also the order the send phase walks agents
/// in and the order enemy / subordinate sets iterate in.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct AgentId(pub u32);

impl AgentId {
    /// Cast to `usize` for direct use as a `Vec` index.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AgentId({})", self.0)
    }
}

impl TryFrom<usize> for AgentId {
    type Error = std::num::TryFromIntError;

    fn try_from(n: usize) -> Result<AgentId, Self::Error> {
        u32::try_from(n).map(AgentId)
    }
}
