//! Representative command catalogue.
//!
//! | Module        | Commands                                            |
//! |---------------|-----------------------------------------------------|
//! | [`transfer`]  | `SendFuel`, `SendResource`                          |
//! | [`diplomacy`] | `DeclareWar`, `ProposePeace`, `AcceptPeace`         |
//! | [`economy`]   | `SetTaxRate`, `ChangeSalary`                        |
//! | [`factory`]   | `BuildFactory`, `SupplyFactory`, `RemoveFactory`    |
//!
//! `Dummy` lives here: it is accepted everywhere and changes nothing.

pub mod diplomacy;
pub mod economy;
pub mod factory;
pub mod transfer;

use st_agent::AgentState;
use st_core::{AgentId, Int4D, UniverseSettings};

use crate::{CommandHooks, CommandOutcome, ExecuteFault, LocalizableMessage};

pub use diplomacy::{AcceptPeace, DeclareWar, ProposePeace};
pub use economy::{ChangeSalary, SetTaxRate};
pub use factory::{BuildFactory, RemoveFactory, SupplyFactory};
pub use transfer::{SendFuel, SendResource};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Dummy {
    pub to_id: AgentId,
}

impl CommandHooks for Dummy {
    fn to_id(&self) -> AgentId {
        self.to_id
    }

    fn can_send(&self, _: &AgentState, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::ok()
    }

    fn can_execute(&self, _: &AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> CommandOutcome {
        CommandOutcome::ok()
    }

    fn execute(&self, _: &mut AgentState, _: AgentId, _: Int4D, _: &UniverseSettings) -> Result<(), ExecuteFault> {
        Ok(())
    }
}

// ── Shared checks ─────────────────────────────────────────────────────────────

pub(crate) fn non_negative(what: &'static str, value: f64) -> CommandOutcome {
    CommandOutcome::check(value.is_finite() && value >= 0.0, || {
        LocalizableMessage::text(what).with_text("must be non-negative, got").with_value(value)
    })
}

pub(crate) fn sufficient(what: &'static str, have: f64, need: f64) -> CommandOutcome {
    CommandOutcome::check(have >= need, || {
        LocalizableMessage::text("not enough")
            .with_text(what)
            .with_text("have")
            .with_value(have)
            .with_text("need")
            .with_value(need)
    })
}

/// The rate a transfer was built with must be the sender's declared rate.
pub(crate) fn rate_matches(captured: f64, declared: f64) -> CommandOutcome {
    CommandOutcome::check(captured == declared, || {
        LocalizableMessage::text("declared loss rate changed, built with")
            .with_value(captured)
            .with_text("now")
            .with_value(declared)
    })
}

pub(crate) fn authority(granted: bool, relation: &'static str, id: AgentId) -> CommandOutcome {
    CommandOutcome::check(granted, || {
        LocalizableMessage::text("agent").with_value(id).with_text(relation)
    })
}

/// `amount` after transit from `from` to `to`, using the average of both
/// declared loss rates.
pub(crate) fn arrived_amount(
    what:          &'static str,
    amount:        f64,
    from:          Int4D,
    to:            Int4D,
    sender_rate:   f64,
    receiver_rate: f64,
    settings:      &UniverseSettings,
) -> Result<f64, ExecuteFault> {
    let value = amount * settings.metric().transfer_fraction(from, to, sender_rate, receiver_rate);
    if value.is_finite() {
        Ok(value)
    } else {
        Err(ExecuteFault::NonFinite { what, value })
    }
}
