//! The `UtilityOption` trait and the command accumulator it commits into.

use st_command::Command;

use crate::{Consideration, DecisionContext, DualUtilityScore, OptionScore, PlanState};

/// Commands emitted during one decision pass, in commit order.
#[derive(Debug, Default)]
pub struct CommandSink {
    commands: Vec<Command>,
}

impl CommandSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: impl Into<Command>) {
        self.commands.push(command.into());
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}

/// A candidate action.
///
/// Only [`considerations`](Self::considerations) and
/// [`commit`](Self::commit) are required; rank and weight are derived.
pub trait UtilityOption: Send + Sync {
    fn name(&self) -> &str;

    /// The factors this option is judged by, for this context.
    fn considerations(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> Vec<Box<dyn Consideration>>;

    /// Carry the option out.  Effects on other agents go through `sink`;
    /// the only thing mutated directly is `plan`.
    fn commit(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, sink: &mut CommandSink);

    /// Score every consideration once and aggregate.
    fn evaluate(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> OptionScore {
        let scores: Vec<DualUtilityScore> = self
            .considerations(ctx, plan)
            .iter()
            .map(|c| c.score(ctx, plan))
            .collect();
        OptionScore::aggregate(&scores)
    }

    /// Highest consideration rank, 0 without considerations.
    fn rank(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> i32 {
        self.evaluate(ctx, plan).rank
    }

    /// Π multiplier × Σ bonus, 0.0 without considerations.
    fn weight(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> f64 {
        self.evaluate(ctx, plan).weight
    }
}
