//! `st-core` — foundational types for the `st` causal-simulation workspace.
//!
//! This crate is a dependency of every other `st-*` crate.  It intentionally
//! has no `st-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`coord`]       | `Int3D`, `Int4D` (time-ordered)                       |
//! | [`metric`]      | `SpacetimeMetric`, causal distance, decay fraction    |
//! | [`settings`]    | `UniverseSettings`                                    |
//! | [`time`]        | `Tick`, `SimClock`, `SimConfig`                       |
//! | [`rng`]         | `AgentRng` (per-agent, seeded)                        |
//! | [`resource`]    | `ResourceType`, `QualityClass`, `FuelCategory`        |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |
//!           | Required by `st-command` for command serialization.        |

pub mod coord;
pub mod error;
pub mod ids;
pub mod metric;
pub mod resource;
pub mod rng;
pub mod settings;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use coord::{Int3D, Int4D};
pub use error::{CoreError, CoreResult};
pub use ids::AgentId;
pub use metric::{SpacetimeMetric, average_loss_rate, causal_distance};
pub use resource::{FuelCategory, QualityClass, ResourceType};
pub use rng::AgentRng;
pub use settings::UniverseSettings;
pub use time::{SimClock, SimConfig, Tick};
