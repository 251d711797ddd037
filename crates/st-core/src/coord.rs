//! Integer spacetime coordinates.
//!
//! The universe is a discretized grid: three integer spatial axes plus one
//! integer time axis.  `Int4D` orders by time first so a sorted collection of
//! historical events reads chronologically.

use std::cmp::Ordering;
use std::fmt;

/// A point on the spatial grid.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Int3D {
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Int3D {
    #[inline]
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Squared Euclidean distance, widened so extreme grids cannot overflow.
    #[inline]
    pub fn distance_squared(self, other: Int3D) -> u128 {
        let dx = self.x.abs_diff(other.x) as u128;
        let dy = self.y.abs_diff(other.y) as u128;
        let dz = self.z.abs_diff(other.z) as u128;
        dx * dx + dy * dy + dz * dz
    }

    /// Attach a time component.
    #[inline]
    pub fn at(self, t: i64) -> Int4D {
        Int4D { t, x: self.x, y: self.y, z: self.z }
    }
}

impl fmt::Display for Int3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// A point in discretized spacetime.
///
/// Totally ordered by `t`, then `x`, `y`, `z`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Int4D {
    pub t: i64,
    pub x: i64,
    pub y: i64,
    pub z: i64,
}

impl Int4D {
    #[inline]
    pub const fn new(t: i64, x: i64, y: i64, z: i64) -> Self {
        Self { t, x, y, z }
    }

    /// Spatial projection.
    #[inline]
    pub fn to_int3d(self) -> Int3D {
        Int3D { x: self.x, y: self.y, z: self.z }
    }

    /// Same spatial position at a different time.
    #[inline]
    pub fn with_time(self, t: i64) -> Int4D {
        Int4D { t, ..self }
    }
}

impl Ord for Int4D {
    fn cmp(&self, other: &Self) -> Ordering {
        self.t
            .cmp(&other.t)
            .then(self.x.cmp(&other.x))
            .then(self.y.cmp(&other.y))
            .then(self.z.cmp(&other.z))
    }
}

impl PartialOrd for Int4D {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Int4D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(t={}, {}, {}, {})", self.t, self.x, self.y, self.z)
    }
}
