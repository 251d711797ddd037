use st_core::AgentId;

use crate::{Consideration, DecisionContext, DualUtilityScore, PlanState};

/// Always answers with the same score.
#[derive(Copy, Clone, Debug)]
pub struct ConstantScore(pub DualUtilityScore);

impl Consideration for ConstantScore {
    fn score(&self, _: &DecisionContext<'_>, _: &mut PlanState) -> DualUtilityScore {
        self.0
    }
}

/// Vetoes top leaders; otherwise lifts the option to `rank`.
#[derive(Copy, Clone, Debug)]
pub struct HasDirectLeader {
    pub rank: i32,
}

impl Consideration for HasDirectLeader {
    fn score(&self, ctx: &DecisionContext<'_>, _: &mut PlanState) -> DualUtilityScore {
        if ctx.own().is_top_leader() {
            DualUtilityScore::veto()
        } else {
            DualUtilityScore::rank_only(self.rank)
        }
    }
}

/// Bonus grows with unreserved storage fuel above `threshold`; vetoes at or
/// below it.
#[derive(Copy, Clone, Debug)]
pub struct StorageFuelAbove {
    pub threshold: f64,
}

impl Consideration for StorageFuelAbove {
    fn score(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> DualUtilityScore {
        let surplus = plan.available_storage_fuel(ctx) - self.threshold;
        if surplus > 0.0 {
            DualUtilityScore::bonus(surplus.ln_1p())
        } else {
            DualUtilityScore::veto()
        }
    }
}

/// Fires when some current enemy has offered peace.
#[derive(Copy, Clone, Debug)]
pub struct PendingPeaceOffer {
    pub rank: i32,
}

impl Consideration for PendingPeaceOffer {
    fn score(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> DualUtilityScore {
        let own = ctx.own();
        let pending = own
            .diplomacy
            .peace_offers
            .iter()
            .any(|&id| own.is_enemy(id) && !plan.was_contacted(id));
        if pending {
            DualUtilityScore::new(self.rank, 1.0, 1.0)
        } else {
            DualUtilityScore::veto()
        }
    }
}

/// Bonus per enemy; vetoes in peacetime.
#[derive(Copy, Clone, Debug)]
pub struct AtWar {
    pub rank:            i32,
    pub bonus_per_enemy: f64,
}

impl Consideration for AtWar {
    fn score(&self, ctx: &DecisionContext<'_>, _: &mut PlanState) -> DualUtilityScore {
        let enemies = ctx.own().diplomacy.enemies.len();
        if enemies == 0 {
            DualUtilityScore::veto()
        } else {
            DualUtilityScore::new(self.rank, 1.0, self.bonus_per_enemy * enemies as f64)
        }
    }
}

/// Vetoes a second command to the same agent in one pass.
#[derive(Copy, Clone, Debug)]
pub struct NotContacted {
    pub target: AgentId,
}

impl Consideration for NotContacted {
    fn score(&self, _: &DecisionContext<'_>, plan: &mut PlanState) -> DualUtilityScore {
        if plan.was_contacted(self.target) {
            DualUtilityScore::veto()
        } else {
            DualUtilityScore::no_impact()
        }
    }
}

/// Multiplier equal to the share of fuel that would survive a transfer
/// `from → to`.
#[derive(Copy, Clone, Debug)]
pub struct DeliveryEfficiency {
    pub from: AgentId,
    pub to:   AgentId,
}

impl Consideration for DeliveryEfficiency {
    fn score(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> DualUtilityScore {
        plan.fuel_remaining_fraction(ctx, self.from, self.to)
            .map_or_else(DualUtilityScore::veto, DualUtilityScore::multiplier)
    }
}
