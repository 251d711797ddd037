//! Economic settings a leader pushes down its chain of command.

use st_agent::{AgentState, CarrierId};
use st_core::{AgentId, Int4D, UniverseSettings};

use super::{authority, non_negative};
use crate::{CommandHooks, CommandOutcome, ExecuteFault, LocalizableMessage};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SetTaxRate {
    pub to_id:    AgentId,
    pub tax_rate: f64,
}

impl CommandHooks for SetTaxRate {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            CommandOutcome::check((0.0..=1.0).contains(&self.tax_rate), || {
                LocalizableMessage::text("tax rate must lie in [0, 1], got").with_value(self.tax_rate)
            }),
            authority(sender.is_subordinate_or_self(self.to_id), "is not a subordinate", self.to_id),
        ])
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        authority(target.is_leader_or_self(from_id), "is not a leader", from_id)
    }

    fn execute(&self, target: &mut AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        target.economy.tax_rate = self.tax_rate;
        Ok(())
    }
}

/// Set the salary paid on one of the receiver's carriers.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChangeSalary {
    pub to_id:      AgentId,
    pub carrier_id: CarrierId,
    pub salary:     f64,
}

impl CommandHooks for ChangeSalary {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            non_negative("salary", self.salary),
            authority(sender.is_subordinate_or_self(self.to_id), "is not a subordinate", self.to_id),
        ])
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            authority(target.is_leader_or_self(from_id), "is not a leader", from_id),
            CommandOutcome::check(target.carriers.contains(self.carrier_id), || {
                LocalizableMessage::text("carrier no longer exists")
            }),
        ])
    }

    fn execute(&self, target: &mut AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        let carrier = target
            .carriers
            .get_mut(self.carrier_id)
            .ok_or(ExecuteFault::MissingCarrier(self.carrier_id))?;
        carrier.salary = self.salary;
        Ok(())
    }
}
