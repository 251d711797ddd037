//! The `DecisionModel` trait — what the tick loop calls for each agent.

use st_command::Command;
use st_core::AgentRng;

use crate::{AiResult, CommandSink, DecisionContext, PlanState, Reasoner};

/// Pluggable per-agent decision making.
///
/// The sim may call `decide` for many agents in parallel, each with its own
/// RNG and a shared read-only context, so implementations must be
/// `Send + Sync` and keep no per-agent mutable state of their own.
pub trait DecisionModel: Send + Sync + 'static {
    /// Commands `ctx.agent` wants to send this tick, in emission order.
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut AgentRng) -> Vec<Command>;
}

/// Runs a reasoner tree with a fresh [`PlanState`] per pass.
pub struct ReasonerModel {
    root: Reasoner,
}

impl ReasonerModel {
    pub fn new(root: impl Into<Reasoner>) -> AiResult<Self> {
        let root = root.into();
        root.validate()?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Reasoner {
        &self.root
    }
}

impl DecisionModel for ReasonerModel {
    fn decide(&self, ctx: &DecisionContext<'_>, rng: &mut AgentRng) -> Vec<Command> {
        let mut plan = PlanState::new();
        let mut sink = CommandSink::new();
        self.root.decide(ctx, &mut plan, rng, &mut sink);
        sink.into_commands()
    }
}
