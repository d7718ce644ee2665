use std::collections::BTreeMap;

use regent_core::{DeterministicRng, Order, OrderGroup, Priorities};
use tracing::trace;

/// `priority * (focus weight + U(0,1) * randomize)`. Negative or non-finite results
/// become zero so they can never win a draw against a positive weight.
pub fn weighted_priority<W>(
    order: &Order<W>,
    priorities: &Priorities,
    rng: &mut impl DeterministicRng,
) -> f64 {
    let noise = rng.next_f64_unit() * priorities.randomize;
    let weight = order.priority * (priorities.weight(order.focus) + noise);
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Settle competing orders: exactly one winner per non-empty `(group, entity_id)` bucket.
///
/// Winners come back grouped by bucket, in bucket key order.
pub fn arbitrate<W>(
    orders: Vec<Order<W>>,
    priorities: &Priorities,
    rng: &mut impl DeterministicRng,
) -> Vec<Order<W>> {
    let mut buckets: BTreeMap<(OrderGroup, u32), Vec<(f64, Order<W>)>> = BTreeMap::new();
    for order in orders {
        let weight = weighted_priority(&order, priorities, rng);
        buckets.entry(order.bucket()).or_default().push((weight, order));
    }

    let mut winners = Vec::with_capacity(buckets.len());
    for (key, candidates) in buckets {
        let idx = roulette(&candidates, rng);
        trace!(
            group = key.0.as_str(),
            entity = key.1,
            candidates = candidates.len(),
            winner = idx,
            "bucket settled"
        );
        if let Some((_, order)) = candidates.into_iter().nth(idx) {
            winners.push(order);
        }
    }
    winners
}

/// Index picked by a draw in `[0, total)` against the running sum. When every weight is
/// zero the first candidate wins.
fn roulette<W>(candidates: &[(f64, Order<W>)], rng: &mut impl DeterministicRng) -> usize {
    let total: f64 = candidates.iter().map(|(w, _)| *w).sum();
    let draw = rng.next_f64_unit() * total;
    if total <= 0.0 {
        return 0;
    }

    let mut acc = 0.0;
    let mut last_positive = 0;
    for (i, (weight, _)) in candidates.iter().enumerate() {
        if *weight <= 0.0 {
            continue;
        }
        acc += weight;
        last_positive = i;
        if acc >= draw {
            return i;
        }
    }
    // Float rounding can leave the sum a hair under the draw.
    last_positive
}
