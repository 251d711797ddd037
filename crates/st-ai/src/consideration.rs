//! The `Consideration` trait.

use crate::{DecisionContext, DualUtilityScore, PlanState};

/// One decision factor of an option.
///
/// Implementations read the context and the pass's memoized values; they
/// never mutate agent state.  `plan` is `&mut` only so cached values can be
/// filled in on first use.  A consideration with nothing to say returns
/// [`DualUtilityScore::no_impact`].
pub trait Consideration: Send + Sync {
    fn score(&self, ctx: &DecisionContext<'_>, plan: &mut PlanState) -> DualUtilityScore;
}
