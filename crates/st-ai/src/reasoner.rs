//! Reasoner tree.
//!
//! ```text
//! Sequence("root")
//! ├── WeightedChoice("diplomacy")      ← commits exactly one option
//! │     ├── AcceptPeace   rank 2
//! │     ├── ProposePeace  rank 1
//! │     └── (fallback)    NoOp
//! └── WeightedChoice("logistics")
//!       └── SendFuelToLeader
//! ```
//!
//! A [`SequenceReasoner`] runs every child in order.  A
//! [`WeightedChoiceReasoner`] scores its options, drops those with weight
//! `<= 0`, keeps the highest-rank survivors and draws one of them with
//! probability proportional to weight.

use st_core::AgentRng;
use tracing::trace;

use crate::builtin::NoOpOption;
use crate::{AiError, AiResult, CommandSink, DecisionContext, OptionScore, PlanState, UtilityOption, a_res};

pub enum Reasoner {
    Sequence(SequenceReasoner),
    WeightedChoice(WeightedChoiceReasoner),
}

/// A child of a [`SequenceReasoner`].
pub enum ReasonerNode {
    Reasoner(Reasoner),
    Option(Box<dyn UtilityOption>),
}

impl Reasoner {
    pub fn name(&self) -> &str {
        match self {
            Reasoner::Sequence(r) => &r.name,
            Reasoner::WeightedChoice(r) => &r.name,
        }
    }

    /// Run this subtree once.  Emitted commands land in `sink`.
    pub fn decide(
        &self,
        ctx:  &DecisionContext<'_>,
        plan: &mut PlanState,
        rng:  &mut AgentRng,
        sink: &mut CommandSink,
    ) {
        match self {
            Reasoner::Sequence(r) => r.decide(ctx, plan, rng, sink),
            Reasoner::WeightedChoice(r) => r.decide(ctx, plan, rng, sink),
        }
    }

    /// Reject empty sequences and choices anywhere in the tree.
    pub fn validate(&self) -> AiResult<()> {
        match self {
            Reasoner::Sequence(r) => {
                if r.children.is_empty() {
                    return Err(AiError::EmptyReasoner(r.name.clone()));
                }
                r.children.iter().try_for_each(|c| match c {
                    ReasonerNode::Reasoner(inner) => inner.validate(),
                    ReasonerNode::Option(_) => Ok(()),
                })
            }
            Reasoner::WeightedChoice(r) if r.options.is_empty() => Err(AiError::EmptyReasoner(r.name.clone())),
            Reasoner::WeightedChoice(_) => Ok(()),
        }
    }
}

impl From<SequenceReasoner> for Reasoner {
    fn from(r: SequenceReasoner) -> Self {
        Reasoner::Sequence(r)
    }
}

impl From<WeightedChoiceReasoner> for Reasoner {
    fn from(r: WeightedChoiceReasoner) -> Self {
        Reasoner::WeightedChoice(r)
    }
}

// ── Sequence ──────────────────────────────────────────────────────────────────

pub struct SequenceReasoner {
    name:     String,
    children: Vec<ReasonerNode>,
}

impl SequenceReasoner {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), children: Vec::new() }
    }

    pub fn with_reasoner(mut self, reasoner: impl Into<Reasoner>) -> Self {
        self.children.push(ReasonerNode::Reasoner(reasoner.into()));
        self
    }

    pub fn with_option(mut self, option: impl UtilityOption + 'static) -> Self {
        self.children.push(ReasonerNode::Option(Box::new(option)));
        self
    }

    fn decide(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, rng: &mut AgentRng, sink: &mut CommandSink) {
        for child in &self.children {
            match child {
                ReasonerNode::Reasoner(r) => r.decide(ctx, plan, rng, sink),
                ReasonerNode::Option(o) => o.commit(ctx, plan, sink),
            }
        }
    }
}

// ── Weighted choice ───────────────────────────────────────────────────────────

pub struct WeightedChoiceReasoner {
    name:     String,
    options:  Vec<Box<dyn UtilityOption>>,
    fallback: Box<dyn UtilityOption>,
}

impl WeightedChoiceReasoner {
    /// A choice with [`NoOpOption`] as fallback.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            options:  Vec::new(),
            fallback: Box::new(NoOpOption),
        }
    }

    pub fn with_option(mut self, option: impl UtilityOption + 'static) -> Self {
        self.options.push(Box::new(option));
        self
    }

    /// Option committed when nothing is eligible.
    pub fn with_fallback(mut self, option: impl UtilityOption + 'static) -> Self {
        self.fallback = Box::new(option);
        self
    }

    pub fn options(&self) -> &[Box<dyn UtilityOption>] {
        &self.options
    }

    /// Index of the option to commit, or `None` for the fallback.
    pub fn choose(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, rng: &mut AgentRng) -> Option<usize> {
        let scored: Vec<(usize, OptionScore)> = self
            .options
            .iter()
            .enumerate()
            .map(|(i, o)| (i, o.evaluate(ctx, plan)))
            .filter(|(_, s)| s.is_eligible())
            .collect();

        let top_rank = scored.iter().map(|(_, s)| s.rank).max()?;
        let finalists = scored.into_iter().filter(|(_, s)| s.rank == top_rank);
        a_res(1, finalists, rng, |(_, s)| s.weight).first().map(|(i, _)| *i)
    }

    fn decide(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState, rng: &mut AgentRng, sink: &mut CommandSink) {
        let chosen = match self.choose(ctx, plan, rng) {
            Some(i) => &self.options[i],
            None => &self.fallback,
        };
        trace!(agent = %ctx.agent, reasoner = %self.name, option = chosen.name(), "option chosen");
        chosen.commit(ctx, plan, sink);
    }
}
