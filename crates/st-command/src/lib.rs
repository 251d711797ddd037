//! `st-command` — the causal command protocol.
//!
//! An agent never writes to another agent's state directly.  It emits a
//! [`Command`], which is validated against the sender, optionally applied
//! locally, carried across space for `⌈d / c⌉` ticks, and finally
//! re-validated and applied by the receiver.  Transfers lose
//! `1 - (1 - r)^d` of their amount on the way.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                  |
//! |---------------|-----------------------------------------------------------|
//! | [`outcome`]   | `CommandOutcome`, `LocalizableMessage`                    |
//! | [`command`]   | `Command` union, `CommandHooks` lifecycle trait           |
//! | [`catalogue`] | concrete commands (transfers, diplomacy, economy, factories) |
//! | [`queue`]     | `InFlightCommand`, `InFlightQueue`                        |
//! | [`executor`]  | `CommandExecutor`, `CommandRecord`, `SendReport`          |
//! | [`error`]     | `ExecuteFault`, `CommandError`                            |

pub mod catalogue;
pub mod command;
pub mod error;
pub mod executor;
pub mod outcome;
pub mod queue;


pub use catalogue::{
    AcceptPeace, BuildFactory, ChangeSalary, DeclareWar, Dummy, ProposePeace, RemoveFactory,
    SendFuel, SendResource, SetTaxRate, SupplyFactory,
};
pub use command::{Command, CommandHooks};
pub use error::{CommandError, CommandResult, ExecuteFault};
pub use executor::{CommandExecutor, CommandPhase, CommandRecord, SendReport};
pub use outcome::{CommandOutcome, Fragment, LocalizableMessage};
pub use queue::{InFlightCommand, InFlightQueue};
