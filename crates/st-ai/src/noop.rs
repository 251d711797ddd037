use st_command::Command;
use st_core::AgentRng;

use crate::{DecisionContext, DecisionModel};

/// A [`DecisionModel`] that never sends anything.  Agents still receive.
pub struct NoopModel;

impl DecisionModel for NoopModel {
    fn decide(&self, _ctx: &DecisionContext<'_>, _rng: &mut AgentRng) -> Vec<Command> {
        vec![]
    }
}
