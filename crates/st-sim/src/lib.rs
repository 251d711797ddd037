//! `st-sim` — tick loop orchestrator for the `st` causal-simulation workspace.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ⓪ Clock    — every agent's coordinate.t := tick
//!   ① Deliver  — drain InFlightQueue up to tick, group by target,
//!                CommandExecutor::deliver per target (parallel per target).
//!   ② Decide   — DecisionModel::decide for every agent against the
//!                read-only store (parallel per agent).
//!   ③ Send     — for each agent in ascending AgentId:
//!                  CommandExecutor::send_batch → local debit,
//!                  self-targeted commands applied on the spot,
//!                  remote ones pushed into InFlightQueue at now + delay.
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs deliver and decide on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the per-tick inbox map.                     |
//!
//! Results are identical with and without `parallel`: each agent owns its
//! RNG, delivery order within a target is causal, and sends are sequential.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use st_agent::AgentStoreBuilder;
//! use st_ai::{ReasonerModel, default_reasoner};
//! use st_core::{SimConfig, UniverseSettings};
//! use st_sim::{NoopObserver, SimBuilder};
//!
//! let (store, rngs) = AgentStoreBuilder::new(1_000, 42).build()?;
//! let model = ReasonerModel::new(default_reasoner())?;
//! let mut sim = SimBuilder::new(SimConfig::default(), UniverseSettings::default(), store, rngs, model)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod summary;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
pub use summary::TickSummary;
