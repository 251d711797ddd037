//! `st-ai` — dual-utility decision engine.
//!
//! Each tick, every agent runs its [`Reasoner`] tree against a read-only
//! [`DecisionContext`].  Options are scored by their [`Consideration`]s,
//! weighted choices draw one option with [`a_res`], and committed options
//! emit commands into a [`CommandSink`].  Expensive per-agent quantities
//! are memoized in a [`PlanState`] that lives for one pass.
//!
//! # Crate layout
//!
//! | Module              | Contents                                              |
//! |---------------------|-------------------------------------------------------|
//! | [`score`]           | `DualUtilityScore`, `OptionScore`                     |
//! | [`context`]         | `DecisionContext<'a>`                                 |
//! | [`plan`]            | `PlanState`                                           |
//! | [`consideration`]   | `Consideration` trait                                 |
//! | [`option`]          | `UtilityOption` trait, `CommandSink`                  |
//! | [`reasoner`]        | `Reasoner`, `SequenceReasoner`, `WeightedChoiceReasoner` |
//! | [`sampler`]         | `a_res` weighted reservoir sampling                   |
//! | [`model`]           | `DecisionModel` trait, `ReasonerModel`                |
//! | [`noop`]            | `NoopModel`                                           |
//! | [`builtin`]         | stock considerations/options, `default_reasoner()`    |
//! | [`error`]           | `AiError`, `AiResult<T>`                              |
//!
//! # Determinism
//!
//! The only source of randomness is the `AgentRng` passed to `decide`.  Same
//! snapshot, same plan state, same RNG state: same commands.

pub mod builtin;
pub mod consideration;
pub mod context;
pub mod error;
pub mod model;
pub mod noop;
pub mod option;
pub mod plan;
pub mod reasoner;
pub mod sampler;
pub mod score;

#[cfg(test)]
mod tests;

pub use builtin::default_reasoner;
pub use consideration::Consideration;
pub use context::DecisionContext;
pub use error::{AiError, AiResult};
pub use model::{DecisionModel, ReasonerModel};
pub use noop::NoopModel;
pub use option::{CommandSink, UtilityOption};
pub use plan::PlanState;
pub use reasoner::{Reasoner, ReasonerNode, SequenceReasoner, WeightedChoiceReasoner};
pub use sampler::a_res;
pub use score::{DualUtilityScore, OptionScore};
