use std::collections::HashSet;

use crate::models::OutfitCandidate;

/// Picks up to `count` candidates, preferring ones that share no items
///
/// A greedy pass keeps candidates disjoint from everything accepted so far;
/// if that leaves fewer than `count`, a backfill pass adds the remaining
/// candidates in order, overlap allowed. Greedy picks come first in the result.
pub fn select_diverse(candidates: Vec<OutfitCandidate>, count: usize) -> Vec<OutfitCandidate> {
    if candidates.len() <= count {
        return candidates;
    }

    let mut used_items: HashSet<&str> = HashSet::new();
    let mut picked: Vec<usize> = Vec::with_capacity(count);

    for (index, candidate) in candidates.iter().enumerate() {
        if picked.len() >= count {
            break;
        }
        if candidate.item_ids().any(|id| used_items.contains(id)) {
            continue;
        }
        used_items.extend(candidate.item_ids());
        picked.push(index);
    }

    let disjoint = picked.len();
    if disjoint < count {
        let backfill: Vec<usize> = (0..candidates.len())
            .filter(|index| !picked.contains(index))
            .take(count - disjoint)
            .collect();
        picked.extend(backfill);
    }

    tracing::debug!(
        available = candidates.len(),
        requested = count,
        disjoint,
        backfilled = picked.len() - disjoint,
        "Selected diverse outfits"
    );

    let mut slots: Vec<Option<OutfitCandidate>> = candidates.into_iter().map(Some).collect();
    picked
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}
