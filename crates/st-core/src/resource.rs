//! Resource and fuel category enums shared by ledgers and commands.
//!
//! All variants are always compiled in; ledgers index fixed-size tables with
//! [`FuelCategory::index`] and [`QualityClass::index`].

use std::fmt;

/// Kinds of stockpiled resources.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResourceType {
    Plant,
    Animal,
    Metal,
    Plastic,
    Fiber,
    Entertainment,
    Research,
}

impl ResourceType {
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Plant,
        ResourceType::Animal,
        ResourceType::Metal,
        ResourceType::Plastic,
        ResourceType::Fiber,
        ResourceType::Entertainment,
        ResourceType::Research,
    ];

    /// Human-readable label, useful for CSV column values and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceType::Plant         => "plant",
            ResourceType::Animal        => "animal",
            ResourceType::Metal         => "metal",
            ResourceType::Plastic       => "plastic",
            ResourceType::Fiber         => "fiber",
            ResourceType::Entertainment => "entertainment",
            ResourceType::Research      => "research",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Three quality tiers kept separately in every stockpile.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum QualityClass {
    #[default]
    First,
    Second,
    Third,
}

impl QualityClass {
    pub const ALL: [QualityClass; 3] = [QualityClass::First, QualityClass::Second, QualityClass::Third];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            QualityClass::First  => 0,
            QualityClass::Second => 1,
            QualityClass::Third  => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QualityClass::First  => "first",
            QualityClass::Second => "second",
            QualityClass::Third  => "third",
        }
    }
}

impl fmt::Display for QualityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Budget categories of an agent's fuel ledger.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FuelCategory {
    /// Unallocated fuel; the only category that can be sent.
    Storage,
    Movement,
    Production,
    Trade,
}

impl FuelCategory {
    pub const ALL: [FuelCategory; 4] = [
        FuelCategory::Storage,
        FuelCategory::Movement,
        FuelCategory::Production,
        FuelCategory::Trade,
    ];

    #[inline]
    pub fn index(self) -> usize {
        match self {
            FuelCategory::Storage    => 0,
            FuelCategory::Movement   => 1,
            FuelCategory::Production => 2,
            FuelCategory::Trade      => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FuelCategory::Storage    => "storage",
            FuelCategory::Movement   => "movement",
            FuelCategory::Production => "production",
            FuelCategory::Trade      => "trade",
        }
    }
}

impl fmt::Display for FuelCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
