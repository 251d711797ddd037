//! Universe-wide constants shared by every agent and command.

use crate::{CoreError, CoreResult, Int3D, SpacetimeMetric};

/// Physical constants of one universe.
///
/// Commands read these at both ends of a transfer; they never change during
/// a run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UniverseSettings {
    /// Grid cells a signal covers per tick.
    pub speed_of_light: f64,

    /// Transfers over a causal distance up to this value are lossless.
    pub same_locality_distance: u64,

    /// Spatial grid extent along x.
    pub x_dim: u32,
    /// Spatial grid extent along y.
    pub y_dim: u32,
    /// Spatial grid extent along z.
    pub z_dim: u32,
}

impl UniverseSettings {
    pub fn validate(&self) -> CoreResult<()> {
        if !(self.speed_of_light.is_finite() && self.speed_of_light > 0.0) {
            return Err(CoreError::Config(format!(
                "speed_of_light must be positive and finite, got {}",
                self.speed_of_light
            )));
        }
        if self.x_dim == 0 || self.y_dim == 0 || self.z_dim == 0 {
            return Err(CoreError::Config(format!(
                "grid dimensions must be non-zero, got {}x{}x{}",
                self.x_dim, self.y_dim, self.z_dim
            )));
        }
        Ok(())
    }

    /// `true` if `p` lies on the configured grid.
    pub fn contains(&self, p: Int3D) -> bool {
        (0..self.x_dim as i64).contains(&p.x)
            && (0..self.y_dim as i64).contains(&p.y)
            && (0..self.z_dim as i64).contains(&p.z)
    }

    #[inline]
    pub fn metric(&self) -> SpacetimeMetric {
        SpacetimeMetric::from_settings(self)
    }
}

impl Default for UniverseSettings {
    fn default() -> Self {
        Self {
            speed_of_light:         1.0,
            same_locality_distance: 1,
            x_dim:                  10,
            y_dim:                  10,
            z_dim:                  3,
        }
    }
}
