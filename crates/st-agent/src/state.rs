//! `AgentState` — the mutable aggregate record of one agent.
//!
//! # Authority predicates
//!
//! The `is_*` helpers answer "what is `id` to *me*?" from this state alone,
//! using the derived leader/subordinate closures.  They are the reusable
//! primitives every command's `can_send` / `can_execute` is written with.
//!
//! ```text
//!          top leader         leader_ids = []          is_top_leader()
//!              │
//!          direct leader      leader_ids = [top]
//!              │
//!            self             leader_ids = [top, direct]
//!           /    \
//!        sub      sub         direct_subordinate_ids / subordinate_ids
//! ```

use std::collections::BTreeSet;

use st_core::{AgentId, Int4D};

use crate::{Carriers, Factories, FuelLedger, ResourceLedger};

/// Loss rates this agent declares for transfers it takes part in.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PhysicsData {
    /// Fraction of fuel lost per unit of causal distance, in `[0, 1]`.
    pub fuel_loss_rate_per_distance:     f64,
    /// Fraction of resources lost per unit of causal distance, in `[0, 1]`.
    pub resource_loss_rate_per_distance: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EconomyData {
    /// Income tax rate in `[0, 1]`.
    pub tax_rate: f64,
}

#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiplomacyData {
    /// Agents this agent considers itself at war with.
    pub enemies:      BTreeSet<AgentId>,
    /// Enemies that have offered peace and not yet been answered.
    pub peace_offers: BTreeSet<AgentId>,
}

/// Position of an agent in the leader/subordinate forest.
///
/// `leader_ids` and `subordinate_ids` are closures derived from the direct
/// links by [`derive_authority`][crate::hierarchy::derive_authority]; they are
/// never edited by hand.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Authority {
    pub direct_leader_id:       Option<AgentId>,
    /// All leaders, top leader first, direct leader last.
    pub leader_ids:             Vec<AgentId>,
    pub direct_subordinate_ids: BTreeSet<AgentId>,
    pub subordinate_ids:        BTreeSet<AgentId>,
}

/// The full state of one agent.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentState {
    pub id:         AgentId,
    pub coordinate: Int4D,
    pub fuel:       FuelLedger,
    pub resources:  ResourceLedger,
    pub physics:    PhysicsData,
    pub economy:    EconomyData,
    pub diplomacy:  DiplomacyData,
    pub carriers:   Carriers,
    pub factories:  Factories,
    pub authority:  Authority,
}

impl AgentState {
    /// A fresh, empty, top-level agent at `coordinate`.
    pub fn new(id: AgentId, coordinate: Int4D) -> Self {
        Self {
            id,
            coordinate,
            fuel:      FuelLedger::default(),
            resources: ResourceLedger::default(),
            physics:   PhysicsData::default(),
            economy:   EconomyData::default(),
            diplomacy: DiplomacyData::default(),
            carriers:  Carriers::new(),
            factories: Factories::new(),
            authority: Authority::default(),
        }
    }

    // ── Authority predicates ──────────────────────────────────────────────

    #[inline]
    pub fn is_self(&self, id: AgentId) -> bool {
        self.id == id
    }

    #[inline]
    pub fn is_direct_leader(&self, id: AgentId) -> bool {
        self.authority.direct_leader_id == Some(id)
    }

    #[inline]
    pub fn is_leader(&self, id: AgentId) -> bool {
        self.authority.leader_ids.contains(&id)
    }

    #[inline]
    pub fn is_leader_or_self(&self, id: AgentId) -> bool {
        self.is_self(id) || self.is_leader(id)
    }

    #[inline]
    pub fn is_direct_subordinate(&self, id: AgentId) -> bool {
        self.authority.direct_subordinate_ids.contains(&id)
    }

    #[inline]
    pub fn is_subordinate(&self, id: AgentId) -> bool {
        self.authority.subordinate_ids.contains(&id)
    }

    #[inline]
    pub fn is_subordinate_or_self(&self, id: AgentId) -> bool {
        self.is_self(id) || self.is_subordinate(id)
    }

    #[inline]
    pub fn is_top_leader(&self) -> bool {
        self.authority.direct_leader_id.is_none()
    }

    /// The root of this agent's hierarchy tree (itself if it has no leader).
    pub fn top_leader_id(&self) -> AgentId {
        self.authority.leader_ids.first().copied().unwrap_or(self.id)
    }

    // ── Diplomacy helpers ─────────────────────────────────────────────────

    #[inline]
    pub fn is_enemy(&self, id: AgentId) -> bool {
        self.diplomacy.enemies.contains(&id)
    }

    #[inline]
    pub fn has_peace_offer_from(&self, id: AgentId) -> bool {
        self.diplomacy.peace_offers.contains(&id)
    }

    /// Drop `id` from the enemy list together with any pending offer.
    pub fn end_war_with(&mut self, id: AgentId) {
        self.diplomacy.enemies.remove(&id);
        self.diplomacy.peace_offers.remove(&id);
    }

    // ── Aggregates over carriers ──────────────────────────────────────────

    pub fn total_population(&self) -> f64 {
        self.carriers.values().map(|c| c.population).sum()
    }

    /// Population-weighted mean salary; zero when nobody lives here.
    pub fn average_salary(&self) -> f64 {
        let population = self.total_population();
        if population <= 0.0 {
            return 0.0;
        }
        self.carriers
            .values()
            .map(|c| c.population * c.salary)
            .sum::<f64>()
            / population
    }
}
