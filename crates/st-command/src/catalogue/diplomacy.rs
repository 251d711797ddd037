//! War and peace.
//!
//! Enemy lists are kept on both sides.  Each side changes its own list: the
//! sender in `self_execute_before_send`, the receiver in `execute`.

use st_agent::AgentState;
use st_core::{AgentId, Int4D, UniverseSettings};

use super::authority;
use crate::{CommandHooks, CommandOutcome, ExecuteFault};

/// Declare war on an agent outside one's own chain of command.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DeclareWar {
    pub to_id: AgentId,
}

impl CommandHooks for DeclareWar {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            authority(!sender.is_leader_or_self(self.to_id), "is a leader or self", self.to_id),
            authority(!sender.is_subordinate(self.to_id), "is a subordinate", self.to_id),
            authority(!sender.is_enemy(self.to_id), "is already an enemy", self.to_id),
        ])
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, _: &UniverseSettings) {
        sender.diplomacy.enemies.insert(self.to_id);
    }

    fn can_execute(
        &self,
        target:   &AgentState,
        from_id:  AgentId,
        _:        Int4D,
        _:        &UniverseSettings,
    ) -> CommandOutcome {
        CommandOutcome::all([
            authority(!target.is_leader_or_self(from_id), "is a leader or self", from_id),
            authority(!target.is_subordinate(from_id), "is a subordinate", from_id),
        ])
    }

    fn execute(&self, target: &mut AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        target.diplomacy.enemies.insert(from_id);
        Ok(())
    }
}

/// Offer peace to an enemy.  The offer is recorded on the receiver.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProposePeace {
    pub to_id: AgentId,
}

impl CommandHooks for ProposePeace {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        authority(sender.is_enemy(self.to_id), "is not an enemy", self.to_id)
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        authority(target.is_enemy(from_id), "is not an enemy", from_id)
    }

    fn execute(&self, target: &mut AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        target.diplomacy.peace_offers.insert(from_id);
        Ok(())
    }
}

/// Accept a pending peace offer, ending the war on both sides.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AcceptPeace {
    pub to_id: AgentId,
}

impl CommandHooks for AcceptPeace {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            authority(sender.is_enemy(self.to_id), "is not an enemy", self.to_id),
            authority(sender.has_peace_offer_from(self.to_id), "has not offered peace", self.to_id),
        ])
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, _: &UniverseSettings) {
        sender.end_war_with(self.to_id);
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        authority(target.is_enemy(from_id), "is not an enemy", from_id)
    }

    fn execute(&self, target: &mut AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        target.end_war_with(from_id);
        Ok(())
    }
}
