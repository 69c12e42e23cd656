//! Weighted choice, shared by every selector in the engine.
//!
//! Category selection, chain and story selection, chain outcome and story
//! branch resolution, and scheduled-event outcomes all go through
//! [`pick_index`]: one uniform draw in `[0, total)`, then a walk over the
//! cumulative weights.
//!
//! Non-finite and non-positive weights are treated as zero. When every
//! weight is zero no draw is made and the result is `None`.

use rand::Rng;

fn usable(weight: f64) -> f64 {
    if weight.is_finite() && weight > 0.0 {
        weight
    } else {
        0.0
    }
}

/// Pick an index with probability proportional to its weight.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, weights: &[f64]) -> Option<usize> {
    let total: f64 = weights.iter().copied().map(usable).sum();
    if total <= 0.0 {
        return None;
    }

    let roll = rng.random::<f64>() * total;
    let mut cumulative = 0.0;
    let mut last_positive = None;
    for (index, weight) in weights.iter().copied().map(usable).enumerate() {
        if weight <= 0.0 {
            continue;
        }
        cumulative += weight;
        last_positive = Some(index);
        if roll < cumulative {
            return Some(index);
        }
    }
    // Float rounding can leave `roll` a hair above the final cumulative sum.
    last_positive
}

/// Pick a value with probability proportional to its weight.
pub fn pick<'a, T, R: Rng + ?Sized>(rng: &mut R, candidates: &'a [(T, f64)]) -> Option<&'a T> {
    let weights: Vec<f64> = candidates.iter().map(|(_, weight)| *weight).collect();
    pick_index(rng, &weights).and_then(|index| candidates.get(index).map(|(value, _)| value))
}

/// Pick a branch, preferring narrative momentum.
///
/// When exactly one branch contradicts a live mood (`conflicts[i]`) and at
/// least one other branch with positive weight does not, the contradicting
/// branch is dropped before the roll. Any other pattern rolls on the weights
/// unchanged.
pub fn pick_with_momentum<R: Rng + ?Sized>(
    rng: &mut R,
    weights: &[f64],
    conflicts: &[bool],
) -> Option<usize> {
    let conflicting = conflicts.iter().filter(|c| **c).count();
    let has_clean_alternative = weights
        .iter()
        .zip(conflicts)
        .any(|(weight, conflict)| !conflict && usable(*weight) > 0.0);

    if conflicting == 1 && has_clean_alternative {
        let filtered: Vec<f64> = weights
            .iter()
            .zip(conflicts)
            .map(|(weight, conflict)| if *conflict { 0.0 } else { *weight })
            .collect();
        return pick_index(rng, &filtered);
    }
    pick_index(rng, weights)
}

/// Bernoulli roll at probability `p`.
///
/// Non-finite and non-positive `p` never succeed; `p` above 1 is capped.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, p: f64) -> bool {
    if !p.is_finite() || p <= 0.0 {
        return false;
    }
    rng.random_bool(p.min(1.0))
}

/// Scale weights in place so they sum to 1.
///
/// Returns `false` (leaving the weights untouched) if they sum to zero.
pub fn normalize<T>(weights: &mut [(T, f64)]) -> bool {
    let total: f64 = weights.iter().map(|(_, weight)| usable(*weight)).sum();
    if total <= 0.0 {
        return false;
    }
    for (_, weight) in weights.iter_mut() {
        *weight = usable(*weight) / total;
    }
    true
}
