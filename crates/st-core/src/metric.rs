//! Causal distance, signal delay, and transit decay.
//!
//! # Model
//!
//! ```text
//! d        = ⌈ |Δspace| ⌉                      (integer causal distance)
//! delay    = ⌈ d / c ⌉                         (ticks until arrival)
//! fraction = 1.0                   if d ≤ same_locality_distance
//!          = (1 - r)^d             otherwise
//! ```
//!
//! `r` is always a *shared* rate, the [`average_loss_rate`] of the sender's and
//! the receiver's declared rates, so that neither side can shrink its
//! transit loss by declaring a smaller rate alone.
//!
//! Distances are computed with exact integer arithmetic (`u128::isqrt`), so
//! two runs on different machines never disagree on a delay.

use crate::{Int3D, Int4D, UniverseSettings};

/// Integer causal distance between two spatial points (ceiling of the
/// Euclidean norm).
pub fn causal_distance(a: Int3D, b: Int3D) -> u64 {
    let sq = a.distance_squared(b);
    let root = sq.isqrt();
    let ceil = if root * root < sq { root + 1 } else { root };
    u64::try_from(ceil).unwrap_or(u64::MAX)
}

/// Mean of two declared per-distance loss rates, each clamped to `[0, 1]`.
///
/// Symmetric: `average_loss_rate(a, b) == average_loss_rate(b, a)`.
#[inline]
pub fn average_loss_rate(a: f64, b: f64) -> f64 {
    (a.clamp(0.0, 1.0) + b.clamp(0.0, 1.0)) * 0.5
}

/// Distance/delay/decay calculator bound to one universe's constants.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SpacetimeMetric {
    /// Grid cells travelled per tick by a signal.  Always `> 0`.
    pub speed_of_light: f64,
    /// Transfers over at most this distance are lossless.
    pub same_locality_distance: u64,
}

impl SpacetimeMetric {
    pub fn new(speed_of_light: f64, same_locality_distance: u64) -> Self {
        Self { speed_of_light, same_locality_distance }
    }

    pub fn from_settings(settings: &UniverseSettings) -> Self {
        Self::new(settings.speed_of_light, settings.same_locality_distance)
    }

    /// Causal distance between the spatial parts of two events.
    #[inline]
    pub fn distance(&self, from: Int4D, to: Int4D) -> u64 {
        causal_distance(from.to_int3d(), to.to_int3d())
    }

    /// Ticks a signal needs to cover `distance`.
    pub fn delay_ticks(&self, distance: u64) -> u64 {
        if distance == 0 {
            return 0;
        }
        (distance as f64 / self.speed_of_light).ceil() as u64
    }

    /// `true` when `to` lies inside or on the future light cone of `from`.
    pub fn is_causally_reachable(&self, from: Int4D, to: Int4D) -> bool {
        let elapsed = to.t.saturating_sub(from.t);
        elapsed >= 0 && elapsed as u64 >= self.delay_ticks(self.distance(from, to))
    }

    /// Fraction of a quantity left after covering `distance` at `loss_rate`
    /// per unit distance.
    pub fn remaining_fraction(&self, distance: u64, loss_rate: f64) -> f64 {
        if distance <= self.same_locality_distance {
            return 1.0;
        }
        (1.0 - loss_rate.clamp(0.0, 1.0)).powf(distance as f64)
    }

    /// Remaining fraction for a transfer between two events, sharing the
    /// loss rate between sender and receiver.
    pub fn transfer_fraction(
        &self,
        from:          Int4D,
        to:            Int4D,
        sender_rate:   f64,
        receiver_rate: f64,
    ) -> f64 {
        self.remaining_fraction(
            self.distance(from, to),
            average_loss_rate(sender_rate, receiver_rate),
        )
    }
}
