//! Seeded random selection helpers
//!
//! All generator randomness flows through one [`RandomSelector`] so that a
//! level is reproducible from its seed.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Thin wrapper over a seeded `StdRng` with the draws the generator needs
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a selector from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[0, 1)`
    pub fn value(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// True with probability `p`
    pub fn chance(&mut self, p: f64) -> bool {
        self.value() < p
    }

    /// Integer in `[low, high)`, or `low` when the range is empty
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            low
        } else {
            self.rng.random_range(low..high)
        }
    }

    /// Index in `[0, len)`, or `None` when `len` is zero
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.random_range(0..len))
    }

    /// Uniformly chosen element
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        self.index(items.len()).and_then(|i| items.get(i))
    }

    /// Shuffle in place
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Index drawn proportionally to `weights`
    ///
    /// Non-positive weights are never chosen. Returns `None` when no weight is
    /// positive.
    pub fn weighted_index(&mut self, weights: &[f64]) -> Option<usize> {
        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return None;
        }

        let mut remaining = self.value() * total;
        let mut last_positive = None;
        for (index, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            if remaining < weight {
                return Some(index);
            }
            remaining -= weight;
            last_positive = Some(index);
        }
        // Floating-point residue lands on the last positive weight
        last_positive
    }
}
