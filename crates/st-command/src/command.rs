//! The `Command` union and the lifecycle every variant implements.
//!
//! # Lifecycle
//!
//! ```text
//!  sender side                         receiver side
//!  ───────────                         ─────────────
//!  can_send(self_state)  ──fail──▶ dropped, never transmitted
//!     │ ok
//!  self_execute_before_send(&mut self_state)      (exactly once)
//!     │
//!     └──── in flight for ⌈d / c⌉ ticks ────▶ can_execute(target, from)
//!                                                │ ok          └─fail─▶ no-op
//!                                             execute(&mut target, from)
//! ```
//!
//! A local debit made in `self_execute_before_send` is never refunded, even
//! when the receiver later rejects the command.

use st_agent::AgentState;
use st_core::{AgentId, Int4D, UniverseSettings};

use crate::catalogue::{
    AcceptPeace, BuildFactory, ChangeSalary, DeclareWar, Dummy, ProposePeace, RemoveFactory,
    SendFuel, SendResource, SetTaxRate, SupplyFactory,
};
use crate::{CommandOutcome, ExecuteFault};

/// The four hooks of the command lifecycle.
pub trait CommandHooks {
    /// Receiver of the command.
    fn to_id(&self) -> AgentId;

    /// Read-only sender-side validation.
    fn can_send(&self, sender: &AgentState, settings: &UniverseSettings) -> CommandOutcome;

    /// Local part of the command, applied once after a successful `can_send`.
    fn self_execute_before_send(&self, _sender: &mut AgentState, _settings: &UniverseSettings) {}

    /// Receiver-side re-validation from the receiver's own view.
    fn can_execute(
        &self,
        target:          &AgentState,
        from_id:         AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> CommandOutcome;

    /// Apply to the receiver.  Only called after `can_execute` succeeded.
    fn execute(
        &self,
        target:          &mut AgentState,
        from_id:         AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> Result<(), ExecuteFault>;
}

/// Every command kind the protocol understands.
///
/// Serialized as an internally tagged object: `{"type": "SendFuel", ...}`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type")]
pub enum Command {
    Dummy(Dummy),
    SendFuel(SendFuel),
    SendResource(SendResource),
    DeclareWar(DeclareWar),
    ProposePeace(ProposePeace),
    AcceptPeace(AcceptPeace),
    SetTaxRate(SetTaxRate),
    ChangeSalary(ChangeSalary),
    BuildFactory(BuildFactory),
    SupplyFactory(SupplyFactory),
    RemoveFactory(RemoveFactory),
}

macro_rules! dispatch {
    ($self:ident, $c:ident => $body:expr) => {
        match $self {
            Command::Dummy($c)         => $body,
            Command::SendFuel($c)      => $body,
            Command::SendResource($c)  => $body,
            Command::DeclareWar($c)    => $body,
            Command::ProposePeace($c)  => $body,
            Command::AcceptPeace($c)   => $body,
            Command::SetTaxRate($c)    => $body,
            Command::ChangeSalary($c)  => $body,
            Command::BuildFactory($c)  => $body,
            Command::SupplyFactory($c) => $body,
            Command::RemoveFactory($c) => $body,
        }
    };
}

impl Command {
    /// Stable snake_case name, used in logs and output files.
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Dummy(_)         => "dummy",
            Command::SendFuel(_)      => "send_fuel",
            Command::SendResource(_)  => "send_resource",
            Command::DeclareWar(_)    => "declare_war",
            Command::ProposePeace(_)  => "propose_peace",
            Command::AcceptPeace(_)   => "accept_peace",
            Command::SetTaxRate(_)    => "set_tax_rate",
            Command::ChangeSalary(_)  => "change_salary",
            Command::BuildFactory(_)  => "build_factory",
            Command::SupplyFactory(_) => "supply_factory",
            Command::RemoveFactory(_) => "remove_factory",
        }
    }
}

impl CommandHooks for Command {
    fn to_id(&self) -> AgentId {
        dispatch!(self, c => c.to_id())
    }

    fn can_send(&self, sender: &AgentState, settings: &UniverseSettings) -> CommandOutcome {
        dispatch!(self, c => c.can_send(sender, settings))
    }

    fn self_execute_before_send(&self, sender: &mut AgentState, settings: &UniverseSettings) {
        dispatch!(self, c => c.self_execute_before_send(sender, settings))
    }

    fn can_execute(
        &self,
        target:          &AgentState,
        from_id:         AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> CommandOutcome {
        dispatch!(self, c => c.can_execute(target, from_id, from_coordinate, settings))
    }

    fn execute(
        &self,
        target:          &mut AgentState,
        from_id:         AgentId,
        from_coordinate: Int4D,
        settings:        &UniverseSettings,
    ) -> Result<(), ExecuteFault> {
        dispatch!(self, c => c.execute(target, from_id, from_coordinate, settings))
    }
}

macro_rules! impl_from_variant {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Command {
                fn from(c: $variant) -> Self {
                    Command::$variant(c)
                }
            }
        )*
    };
}

impl_from_variant!(
    Dummy, SendFuel, SendResource, DeclareWar, ProposePeace, AcceptPeace, SetTaxRate,
    ChangeSalary, BuildFactory, SupplyFactory, RemoveFactory,
);
