//! Fuel and resource transfers.
//!
//! The sender debits the full amount when sending; the receiver is credited
//! `amount × (1 - r)^d` on arrival, where `r` averages the sender's captured
//! rate and the receiver's own rate.  Transfers over the same-locality
//! distance arrive intact.

use st_agent::{AgentState, ResourceQuality};
use st_core::{AgentId, Int4D, QualityClass, ResourceType, UniverseSettings};

use super::{arrived_amount, non_negative, rate_matches, sufficient};
use crate::{CommandHooks, CommandOutcome, ExecuteFault, LocalizableMessage};

/// Move storage fuel to another agent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SendFuel {
    pub to_id:            AgentId,
    pub amount:           f64,
    /// Sender's `fuel_loss_rate_per_distance` when the command was built.
    pub sender_loss_rate: f64,
}

impl SendFuel {
    pub fn new(sender: &AgentState, to_id: AgentId, amount: f64) -> Self {
        Self {
            to_id,
            amount,
            sender_loss_rate: sender.physics.fuel_loss_rate_per_distance,
        }
    }
}

impl CommandHooks for SendFuel {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::all([
            non_negative("fuel amount", self.amount),
            sufficient("storage fuel", sender.fuel.storage, self.amount),
            rate_matches(self.sender_loss_rate, sender.physics.fuel_loss_rate_per_distance),
        ])
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, _: &UniverseSettings) {
        sender.fuel.storage -= self.amount;
    }

    fn can_execute(&self, _: &AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::ok()
    }

    fn execute(
        &self,
        target:          &mut AgentState,
        _from_id:        AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> Result<(), ExecuteFault> {
        let received = arrived_amount(
            "received fuel",
            self.amount,
            from_coordinate,
            target.coordinate,
            self.sender_loss_rate,
            target.physics.fuel_loss_rate_per_distance,
            settings,
        )?;
        target.fuel.storage += received;
        Ok(())
    }
}

/// Move one quality class of a resource to another agent.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SendResource {
    pub to_id:            AgentId,
    pub resource:         ResourceType,
    pub class:            QualityClass,
    pub amount:           f64,
    /// Quality of the sender's stock when the command was built.
    pub quality:          ResourceQuality,
    pub sender_loss_rate: f64,
}

impl SendResource {
    pub fn new(
        sender:   &AgentState,
        to_id:    AgentId,
        resource: ResourceType,
        class:    QualityClass,
        amount:   f64,
    ) -> Self {
        Self {
            to_id,
            resource,
            class,
            amount,
            quality: sender.resources.get(resource, class).quality,
            sender_loss_rate: sender.physics.resource_loss_rate_per_distance,
        }
    }
}

impl CommandHooks for SendResource {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, sender: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        let stock = sender.resources.get(self.resource, self.class);
        CommandOutcome::all([
            non_negative("resource amount", self.amount),
            sufficient(self.resource.as_str(), stock.amount, self.amount),
            CommandOutcome::check(stock.quality == self.quality, || {
                LocalizableMessage::text("stock quality changed since the command was built")
            }),
            CommandOutcome::check(self.quality.is_non_negative(), || {
                LocalizableMessage::text("resource quality must be non-negative")
            }),
            rate_matches(self.sender_loss_rate, sender.physics.resource_loss_rate_per_distance),
        ])
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, _: &UniverseSettings) {
        sender.resources.withdraw(self.resource, self.class, self.amount);
    }

    fn can_execute(&self, _: &AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::ok()
    }

    fn execute(
        &self,
        target:          &mut AgentState,
        _from_id:        AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> Result<(), ExecuteFault> {
        let received = arrived_amount(
            "received resource",
            self.amount,
            from_coordinate,
            target.coordinate,
            self.sender_loss_rate,
            target.physics.resource_loss_rate_per_distance,
            settings,
        )?;
        target.resources.deposit(self.resource, self.class, received, self.quality);
        Ok(())
    }
}
