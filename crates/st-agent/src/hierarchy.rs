//! Leader/subordinate forest derivation.
//!
//! Input is one optional direct-leader link per agent.  A link pointing at
//! the agent itself counts as "no leader".  Output is the full [`Authority`]
//! record for every agent: leader chain (top first) plus direct and transitive
//! subordinate sets.  Cycles are rejected.

use st_core::AgentId;

use crate::{AgentError, AgentResult, Authority};

/// Derive every agent's [`Authority`] from direct-leader links.
///
/// `direct_leaders[i]` is the direct leader of `AgentId(i)`.
pub fn derive_authority(direct_leaders: &[Option<AgentId>]) -> AgentResult<Vec<Authority>> {
    let count = direct_leaders.len();
    let link = |i: usize| -> AgentResult<Option<AgentId>> {
        match direct_leaders[i] {
            Some(l) if l.index() == i => Ok(None),
            Some(l) if l.index() >= count => Err(AgentError::UnknownAgent(l)),
            other => Ok(other),
        }
    };

    let mut out: Vec<Authority> = Vec::with_capacity(count);
    for i in 0..count {
        let direct = link(i)?;
        let mut chain = Vec::new();
        let mut cursor = direct;
        while let Some(leader) = cursor {
            if leader.index() == i || chain.contains(&leader) {
                return Err(AgentError::HierarchyCycle(AgentId(i as u32)));
            }
            chain.push(leader);
            cursor = link(leader.index())?;
        }
        chain.reverse();
        out.push(Authority {
            direct_leader_id: direct,
            leader_ids:       chain,
            ..Authority::default()
        });
    }

    // Fill subordinate sets from the leader chains.
    for i in 0..count {
        let me = AgentId(i as u32);
        let (direct, leaders) = (out[i].direct_leader_id, out[i].leader_ids.clone());
        if let Some(d) = direct {
            out[d.index()].direct_subordinate_ids.insert(me);
        }
        for l in leaders {
            out[l.index()].subordinate_ids.insert(me);
        }
    }

    Ok(out)
}
