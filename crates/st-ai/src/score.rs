//! Dual-utility scores.
//!
//! A consideration answers with a *rank* (coarse tier, compared
//! lexicographically before anything else) and a *multiplier*/*bonus* pair
//! that feeds the option's continuous weight:
//!
//! ```text
//! rank(option)   = max(rank_i)                  0 if no considerations
//! weight(option) = Π multiplier_i × Σ bonus_i   0 if no considerations
//! ```

/// One consideration's verdict.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DualUtilityScore {
    pub rank:       i32,
    /// Always `>= 0`; constructors clamp.
    pub multiplier: f64,
    pub bonus:      f64,
}

impl DualUtilityScore {
    pub fn new(rank: i32, multiplier: f64, bonus: f64) -> Self {
        Self { rank, multiplier: clamp_multiplier(multiplier), bonus }
    }

    /// The "no opinion" score: never wins on rank, leaves weight untouched.
    pub const fn no_impact() -> Self {
        Self { rank: i32::MIN, multiplier: 1.0, bonus: 0.0 }
    }

    /// Forces the owning option's weight to zero.
    pub const fn veto() -> Self {
        Self { rank: i32::MIN, multiplier: 0.0, bonus: 0.0 }
    }

    /// Raise the option to `rank` without touching its weight.
    pub const fn rank_only(rank: i32) -> Self {
        Self { rank, multiplier: 1.0, bonus: 0.0 }
    }

    pub const fn bonus(bonus: f64) -> Self {
        Self { rank: i32::MIN, multiplier: 1.0, bonus }
    }

    pub fn multiplier(multiplier: f64) -> Self {
        Self { rank: i32::MIN, multiplier: clamp_multiplier(multiplier), bonus: 0.0 }
    }
}

impl Default for DualUtilityScore {
    fn default() -> Self {
        Self::no_impact()
    }
}

fn clamp_multiplier(m: f64) -> f64 {
    if m.is_nan() { 0.0 } else { m.max(0.0) }
}

/// Aggregate of every consideration on one option.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct OptionScore {
    pub rank:   i32,
    pub weight: f64,
}

impl OptionScore {
    pub fn aggregate(scores: &[DualUtilityScore]) -> Self {
        if scores.is_empty() {
            return Self { rank: 0, weight: 0.0 };
        }
        let rank = scores.iter().map(|s| s.rank).max().unwrap_or(0);
        let product: f64 = scores.iter().map(|s| s.multiplier).product();
        let sum: f64 = scores.iter().map(|s| s.bonus).sum();
        Self { rank, weight: product * sum }
    }

    /// Positive, finite weight.
    #[inline]
    pub fn is_eligible(&self) -> bool {
        self.weight.is_finite() && self.weight > 0.0
    }
}
