//! A small stock of considerations and options, and a default tree built
//! from them.

pub mod considerations;
pub mod options;

pub use considerations::{
    AtWar, ConstantScore, DeliveryEfficiency, HasDirectLeader, NotContacted, PendingPeaceOffer,
    StorageFuelAbove,
};
pub use options::{AcceptPeaceOption, NoOpOption, ProposePeaceOption, SendFuelToLeaderOption};

use crate::{Reasoner, SequenceReasoner, WeightedChoiceReasoner};

/// Diplomacy first (accepting beats proposing), then logistics.
pub fn default_reasoner() -> Reasoner {
    SequenceReasoner::new("root")
        .with_reasoner(
            WeightedChoiceReasoner::new("diplomacy")
                .with_option(AcceptPeaceOption { rank: 2 })
                .with_option(ProposePeaceOption { rank: 1, bonus_per_enemy: 1.0 }),
        )
        .with_reasoner(
            WeightedChoiceReasoner::new("logistics")
                .with_option(SendFuelToLeaderOption { fraction: 0.1, keep: 100.0, rank: 0 }),
        )
        .into()
}
