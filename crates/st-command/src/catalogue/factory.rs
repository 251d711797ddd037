//! Factory construction, supply and removal.
//!
//! Factories may be built on another agent's carrier only inside the same
//! hierarchy tree.  A `BuildFactory` carries the top leader of its sender;
//! the sender's side checks the claim and the receiver's side checks that it
//! shares that top leader.

use st_agent::{AgentState, CarrierId, Factory, FactoryId};
use st_core::{AgentId, Int4D, ResourceType, UniverseSettings};

use super::{arrived_amount, authority, non_negative, rate_matches, sufficient};
use crate::{CommandHooks, CommandOutcome, ExecuteFault, LocalizableMessage};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BuildFactory {
    pub to_id:            AgentId,
    pub carrier_id:       CarrierId,
    pub output:           ResourceType,
    /// Storage fuel handed over as the factory's initial reserve.
    pub fuel:             f64,
    pub top_leader_id:    AgentId,
    pub sender_loss_rate: f64,
}

impl BuildFactory {
    pub fn new(
        sender:     &AgentState,
        to_id:      AgentId,
        carrier_id: CarrierId,
        output:     ResourceType,
        fuel:       f64,
    ) -> Self {
        Self {
            to_id,
            carrier_id,
            output,
            fuel,
            top_leader_id:    sender.top_leader_id(),
            sender_loss_rate: sender.physics.fuel_loss_rate_per_distance,
        }
    }
}

impl CommandHooks for BuildFactory {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            non_negative("factory fuel", self.fuel),
            sufficient("storage fuel", sender.fuel.storage, self.fuel),
            CommandOutcome::check(
                sender.is_self(self.to_id) || sender.top_leader_id() == self.top_leader_id,
                || LocalizableMessage::text("claimed top leader").with_value(self.top_leader_id).with_text("is not ours"),
            ),
            rate_matches(self.sender_loss_rate, sender.physics.fuel_loss_rate_per_distance),
        ])
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, _: &UniverseSettings) {
        sender.fuel.storage -= self.fuel;
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            CommandOutcome::check(target.carriers.contains(self.carrier_id), || {
                LocalizableMessage::text("carrier no longer exists")
            }),
            authority(
                target.is_self(from_id) || target.top_leader_id() == self.top_leader_id,
                "is outside this hierarchy",
                from_id,
            ),
        ])
    }

    fn execute(
        &self,
        target:          &mut AgentState,
        from_id:         AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> Result<(), ExecuteFault> {
        if !target.carriers.contains(self.carrier_id) {
            return Err(ExecuteFault::MissingCarrier(self.carrier_id));
        }
        let fuel_reserve = arrived_amount(
            "factory fuel",
            self.fuel,
            from_coordinate,
            target.coordinate,
            self.sender_loss_rate,
            target.physics.fuel_loss_rate_per_distance,
            settings,
        )?;
        target.factories.insert(Factory {
            owner_id: from_id,
            carrier_id: self.carrier_id,
            output: self.output,
            fuel_reserve,
        });
        Ok(())
    }
}

/// Top up the fuel reserve of a factory the sender owns.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SupplyFactory {
    pub to_id:            AgentId,
    pub factory_id:       FactoryId,
    pub amount:           f64,
    pub sender_loss_rate: f64,
}

impl SupplyFactory {
    pub fn new(sender: &AgentState, to_id: AgentId, factory_id: FactoryId, amount: f64) -> Self {
        Self {
            to_id,
            factory_id,
            amount,
            sender_loss_rate: sender.physics.fuel_loss_rate_per_distance,
        }
    }
}

impl CommandHooks for SupplyFactory {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            non_negative("supply amount", self.amount),
            sufficient("storage fuel", sender.fuel.storage, self.amount),
            rate_matches(self.sender_loss_rate, sender.physics.fuel_loss_rate_per_distance),
        ])
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, _: &UniverseSettings) {
        sender.fuel.storage -= self.amount;
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        match target.factories.get(self.factory_id) {
            None => CommandOutcome::fail(LocalizableMessage::text("factory no longer exists")),
            Some(factory) => authority(factory.owner_id == from_id, "does not own this factory", from_id),
        }
    }

    fn execute(
        &self,
        target:          &mut AgentState,
        _from_id:        AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> Result<(), ExecuteFault> {
        let received = arrived_amount(
            "factory supply",
            self.amount,
            from_coordinate,
            target.coordinate,
            self.sender_loss_rate,
            target.physics.fuel_loss_rate_per_distance,
            settings,
        )?;
        let factory = target
            .factories
            .get_mut(self.factory_id)
            .ok_or(ExecuteFault::MissingFactory(self.factory_id))?;
        factory.fuel_reserve += received;
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RemoveFactory {
    pub to_id:      AgentId,
    pub factory_id: FactoryId,
}

impl CommandHooks for RemoveFactory {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        authority(sender.is_subordinate_or_self(self.to_id), "is not a subordinate", self.to_id)
    }

    fn can_execute(&self, target: &AgentState, from_id: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            authority(target.is_leader_or_self(from_id), "is not a leader", from_id),
            CommandOutcome::check(target.factories.contains(self.factory_id), || {
                LocalizableMessage::text("factory no longer exists")
            }),
        ])
    }

    fn execute(&self, target: &mut AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        target
            .factories
            .remove(self.factory_id)
            .map(|_| ())
            .ok_or(ExecuteFault::MissingFactory(self.factory_id))
    }
}
