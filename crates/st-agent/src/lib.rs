//! `st-agent` — agent state and storage for the `st` workspace.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ledger`]      | `FuelLedger`, `ResourceLedger`, `ResourceQuality`          |
//! | [`entity`]      | `Carrier`, `Factory`, generation-checked `EntityTable`     |
//! | [`state`]       | `AgentState` and its authority/diplomacy predicates        |
//! | [`hierarchy`]   | leader/subordinate closure derivation                      |
//! | [`component`]   | `ComponentMap` for opaque collaborator state               |
//! | [`store`]       | `AgentStore`, `AgentRngs`                                  |
//! | [`builder`]     | `AgentStoreBuilder`                                        |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                      |
//! |---------|-------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on states, ledgers, keys. |

pub mod builder;
pub mod component;
pub mod entity;
pub mod error;
pub mod hierarchy;
pub mod ledger;
pub mod state;
pub mod store;


pub use builder::AgentStoreBuilder;
pub use component::ComponentMap;
pub use entity::{Carrier, CarrierId, Carriers, EntityTable, Factories, Factory, FactoryId};
pub use error::{AgentError, AgentResult};
pub use ledger::{FuelLedger, ResourceAmount, ResourceLedger, ResourceQuality};
pub use state::{AgentState, Authority, DiplomacyData, EconomyData, PhysicsData};
pub use store::{AgentRngs, AgentStore};
