use st_agent::AgentState;
use st_command::{AcceptPeace, ProposePeace, SendFuel};
use st_core::AgentId;

use super::{AtWar, DeliveryEfficiency, HasDirectLeader, NotContacted, PendingPeaceOffer, StorageFuelAbove};
use crate::{CommandSink, Consideration, DecisionContext, DualUtilityScore, PlanState, UtilityOption};

/// Does nothing.  The default fallback of a weighted choice.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoOpOption;

impl UtilityOption for NoOpOption {
    fn name(&self) -> &str {
        "no_op"
    }

    fn considerations(&self, _: &DecisionContext<'_>, _: &mut PlanState) -> Vec<Box<dyn Consideration>> {
        Vec::new()
    }

    fn commit(&self, _: &DecisionContext<'_>, _: &mut PlanState, _: &mut CommandSink) {}
}

/// Ship `fraction` of the storage fuel above `keep` to the direct leader.
/// Less attractive the more would be lost on the way.
#[derive(Copy, Clone, Debug)]
pub struct SendFuelToLeaderOption {
    pub fraction: f64,
    pub keep:     f64,
    pub rank:     i32,
}

impl UtilityOption for SendFuelToLeaderOption {
    fn name(&self) -> &str {
        "send_fuel_to_leader"
    }

    fn considerations(&self, ctx: &DecisionContext<'_>, _: &mut PlanState) -> Vec<Box<dyn Consideration>> {
        let Some(leader) = ctx.own().authority.direct_leader_id else {
            return vec![Box::new(HasDirectLeader { rank: self.rank })];
        };
        vec![
            Box::new(HasDirectLeader { rank: self.rank }),
            Box::new(StorageFuelAbove { threshold: self.keep }),
            Box::new(NotContacted { target: leader }),
            Box::new(DeliveryEfficiency { from: ctx.agent, to: leader }),
        ]
    }

    fn commit(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, sink: &mut CommandSink) {
        let own = ctx.own();
        let Some(leader) = own.authority.direct_leader_id else {
            return;
        };
        let amount = (plan.available_storage_fuel(ctx) - self.keep) * self.fraction.clamp(0.0, 1.0);
        if amount <= 0.0 {
            return;
        }
        sink.push(SendFuel::new(own, leader, amount));
        plan.reserve_fuel(amount);
        plan.mark_contacted(leader);
    }
}

/// Accept the lowest-id pending peace offer.
#[derive(Copy, Clone, Debug)]
pub struct AcceptPeaceOption {
    pub rank: i32,
}

impl UtilityOption for AcceptPeaceOption {
    fn name(&self) -> &str {
        "accept_peace"
    }

    fn considerations(&self, _: &DecisionContext<'_>, _: &mut PlanState) -> Vec<Box<dyn Consideration>> {
        vec![Box::new(PendingPeaceOffer { rank: self.rank })]
    }

    fn commit(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, sink: &mut CommandSink) {
        let own = ctx.own();
        let offer = own
            .diplomacy
            .peace_offers
            .iter()
            .copied()
            .find(|&id| own.is_enemy(id) && !plan.was_contacted(id));
        if let Some(to_id) = offer {
            sink.push(AcceptPeace { to_id });
            plan.mark_contacted(to_id);
        }
    }
}

/// Offer peace to the lowest-id enemy that has not offered it first.
#[derive(Copy, Clone, Debug)]
pub struct ProposePeaceOption {
    pub rank:            i32,
    pub bonus_per_enemy: f64,
}

fn next_peace_target(own: &AgentState, plan: &PlanState) -> Option<AgentId> {
    own.diplomacy
        .enemies
        .iter()
        .copied()
        .find(|&id| !own.has_peace_offer_from(id) && !plan.was_contacted(id))
}

struct HasPeaceTarget;

impl Consideration for HasPeaceTarget {
    fn score(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> DualUtilityScore {
        if next_peace_target(ctx.own(), plan).is_some() {
            DualUtilityScore::no_impact()
        } else {
            DualUtilityScore::veto()
        }
    }
}

impl UtilityOption for ProposePeaceOption {
    fn name(&self) -> &str {
        "propose_peace"
    }

    fn considerations(&self, _: &DecisionContext<'_>, _: &mut PlanState) -> Vec<Box<dyn Consideration>> {
        vec![
            Box::new(AtWar { rank: self.rank, bonus_per_enemy: self.bonus_per_enemy }),
            Box::new(HasPeaceTarget),
        ]
    }

    fn commit(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, sink: &mut CommandSink) {
        if let Some(to_id) = next_peace_target(ctx.own(), plan) {
            sink.push(ProposePeace { to_id });
            plan.mark_contacted(to_id);
        }
    }
}
