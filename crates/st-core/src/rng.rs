//! Deterministic per-agent RNG.
//!
//! # Determinism strategy
//!
//! Each agent gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (agent_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.
//! A decision pass only ever draws from the deciding agent's own stream, so
//! the outcome of `Reasoner::decide` does not depend on thread scheduling or
//! on how many other agents decided first.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::AgentId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-agent deterministic RNG.
///
/// The type is `!Sync` to prevent accidental sharing across threads; each
/// Rayon worker must hold its own `&mut`.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed directly, for tests and tools that need a stand-alone stream.
    pub fn from_seed(seed: u64) -> Self {
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Sample a uniformly distributed value of any `Standard`-distributed type.
    #[inline]
    pub fn random<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.0.r#gen()
    }

    /// Uniform draw from the open interval `(0, 1)`.
    ///
    /// Zero is rejected so `ln(u)` is always finite.
    #[inline]
    pub fn open_unit(&mut self) -> f64 {
        loop {
            let u: f64 = self.0.r#gen();
            if u > 0.0 {
                return u;
            }
        }
    }
}
