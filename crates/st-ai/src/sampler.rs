//! Weighted reservoir sampling (A-Res).
//!
//! Each item with weight `w > 0` gets key `u^(1/w)` for `u ~ U(0, 1)`; the
//! `k` largest keys win.  Keys are compared as `ln(u) / w`, which orders
//! identically and does not underflow for small weights.  For `k = 1` the
//! probability of picking item `i` is exactly `w_i / Σ w`.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use ordered_float::OrderedFloat;
use st_core::AgentRng;

/// Sample up to `k` items without replacement, weighted by `weight`.
///
/// Items with a non-positive or non-finite weight are skipped and consume no
/// randomness.  The result is ordered by descending key (the single winner
/// first).  Exactly one uniform draw is taken per eligible item, in input
/// order, so the outcome depends only on the items and the RNG state.
pub fn a_res<T, F>(k: usize, items: impl IntoIterator<Item = T>, rng: &mut AgentRng, mut weight: F) -> Vec<T>
where
    F: FnMut(&T) -> f64,
{
    if k == 0 {
        return Vec::new();
    }

    let mut slots: Vec<Option<T>> = Vec::new();
    // Min-heap on key; ties broken towards the earlier item.
    let mut heap: BinaryHeap<Reverse<(OrderedFloat<f64>, Reverse<usize>)>> = BinaryHeap::with_capacity(k + 1);

    for item in items {
        let w = weight(&item);
        if !(w.is_finite() && w > 0.0) {
            continue;
        }
        let key = OrderedFloat(rng.open_unit().ln() / w);
        let index = slots.len();
        slots.push(Some(item));
        heap.push(Reverse((key, Reverse(index))));
        if heap.len() > k {
            if let Some(Reverse((_, Reverse(evicted)))) = heap.pop() {
                slots[evicted] = None;
            }
        }
    }

    let mut winners = heap.into_vec();
    winners.sort_unstable();
    winners
        .into_iter()
        .filter_map(|Reverse((_, Reverse(index)))| slots[index].take())
        .collect()
}
