//! Fuel and resource ledgers.
//!
//! Ledgers are plain data: they never validate.  Commands check sufficiency in
//! `can_send` before calling the debit helpers here.

use std::collections::BTreeMap;

use st_core::{FuelCategory, QualityClass, ResourceType};

// ── Fuel ──────────────────────────────────────────────────────────────────────

/// Fuel rest mass split into budget categories.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FuelLedger {
    pub storage:    f64,
    pub movement:   f64,
    pub production: f64,
    pub trade:      f64,
}

impl FuelLedger {
    pub fn get(&self, category: FuelCategory) -> f64 {
        match category {
            FuelCategory::Storage    => self.storage,
            FuelCategory::Movement   => self.movement,
            FuelCategory::Production => self.production,
            FuelCategory::Trade      => self.trade,
        }
    }

    pub fn get_mut(&mut self, category: FuelCategory) -> &mut f64 {
        match category {
            FuelCategory::Storage    => &mut self.storage,
            FuelCategory::Movement   => &mut self.movement,
            FuelCategory::Production => &mut self.production,
            FuelCategory::Trade      => &mut self.trade,
        }
    }

    pub fn total(&self) -> f64 {
        self.storage + self.movement + self.production + self.trade
    }
}

// ── Resource quality ──────────────────────────────────────────────────────────

/// Three-component quality vector attached to every resource amount.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceQuality {
    pub quality1: f64,
    pub quality2: f64,
    pub quality3: f64,
}

impl ResourceQuality {
    pub const fn new(quality1: f64, quality2: f64, quality3: f64) -> Self {
        Self { quality1, quality2, quality3 }
    }

    /// Amount-weighted mean of two qualities.  Returns `self` when both
    /// weights are zero.
    pub fn blend(self, self_amount: f64, other: ResourceQuality, other_amount: f64) -> Self {
        let total = self_amount + other_amount;
        if total <= 0.0 {
            return self;
        }
        let mix = |a: f64, b: f64| (a * self_amount + b * other_amount) / total;
        Self {
            quality1: mix(self.quality1, other.quality1),
            quality2: mix(self.quality2, other.quality2),
            quality3: mix(self.quality3, other.quality3),
        }
    }

    /// Every component finite and `>= 0`.
    pub fn is_non_negative(&self) -> bool {
        [self.quality1, self.quality2, self.quality3]
            .iter()
            .all(|q| q.is_finite() && *q >= 0.0)
    }
}

/// An amount of one resource in one quality class.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceAmount {
    pub amount:  f64,
    pub quality: ResourceQuality,
}

// ── Resource stockpile ────────────────────────────────────────────────────────

/// Stockpile of every resource type, three quality classes each.
///
/// Absent resource types read as zero.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceLedger {
    entries: BTreeMap<ResourceType, [ResourceAmount; 3]>,
}

impl ResourceLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, resource: ResourceType, class: QualityClass) -> ResourceAmount {
        self.entries
            .get(&resource)
            .map(|slots| slots[class.index()])
            .unwrap_or_default()
    }

    #[inline]
    pub fn amount(&self, resource: ResourceType, class: QualityClass) -> f64 {
        self.get(resource, class).amount
    }

    /// Total amount across all quality classes.
    pub fn total(&self, resource: ResourceType) -> f64 {
        self.entries
            .get(&resource)
            .map(|slots| slots.iter().map(|s| s.amount).sum())
            .unwrap_or(0.0)
    }

    /// Add `amount` at `quality`, blending the class's quality by amount.
    pub fn deposit(
        &mut self,
        resource: ResourceType,
        class:    QualityClass,
        amount:   f64,
        quality:  ResourceQuality,
    ) {
        let slot = &mut self.entries.entry(resource).or_default()[class.index()];
        slot.quality = slot.quality.blend(slot.amount, quality, amount);
        slot.amount += amount;
    }

    /// Remove `amount`, saturating at zero.  Quality is unchanged.
    pub fn withdraw(&mut self, resource: ResourceType, class: QualityClass, amount: f64) {
        let slot = &mut self.entries.entry(resource).or_default()[class.index()];
        slot.amount = (slot.amount - amount).max(0.0);
    }

    /// Overwrite one slot, e.g. when seeding initial state.
    pub fn set(&mut self, resource: ResourceType, class: QualityClass, value: ResourceAmount) {
        self.entries.entry(resource).or_default()[class.index()] = value;
    }
}
