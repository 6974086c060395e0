//! Opponent policies
//!
//! Memoryless rules for the non-player side of a round. None of them
//! condition on earlier rounds or on the player's current move.

use serde::{Deserialize, Serialize};
use crate::random::RandomSource;

/// Independent Bernoulli draw each round
///
/// Picks the primary move iff a uniform draw in `[0, 1)` falls below
/// `probability`. `0` never picks it, `1` always does.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bernoulli {
    probability: f64,
}

impl Bernoulli {
    pub fn new(probability: f64) -> Self {
        let probability = if probability.is_finite() { probability.clamp(0.0, 1.0) } else { 0.5 };
        Self { probability }
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn sample<R: RandomSource + ?Sized>(&self, rng: &mut R) -> bool {
        rng.next_unit() < self.probability
    }
}

impl Default for Bernoulli {
    fn default() -> Self {
        Self::new(0.5)
    }
}

/// Ultimatum responder with a floored logistic acceptance curve
///
/// `p = floor + (1 − floor) · sigmoid(steepness · (offer − threshold))`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogisticResponder {
    pub floor: f64,
    pub threshold: f64,
    pub steepness: f64,
}

impl LogisticResponder {
    /// Curve used by the demo: ~1% at 0, ~10% at 20%, ~95% at 50%
    pub const STANDARD: LogisticResponder = LogisticResponder {
        floor: 0.01,
        threshold: 0.332,
        steepness: 17.442,
    };

    /// Acceptance probability for an offer fraction
    ///
    /// Exactly `floor` at or below zero, exactly `1` at or above one.
    pub fn acceptance_probability(&self, offer: f64) -> f64 {
        if offer <= 0.0 {
            return self.floor;
        }
        if offer >= 1.0 {
            return 1.0;
        }
        let z = self.steepness * (offer - self.threshold);
        let s = 1.0 / (1.0 + (-z).exp());
        (self.floor + (1.0 - self.floor) * s).clamp(self.floor, 1.0)
    }

    /// Draw the responder's decision; returns the decision and the
    /// probability it was drawn against
    pub fn decide<R: RandomSource + ?Sized>(&self, offer: f64, rng: &mut R) -> (bool, f64) {
        let p = self.acceptance_probability(offer);
        (rng.next_unit() < p, p)
    }
}

impl Default for LogisticResponder {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Capital side of the Labor–Capital game
///
/// Deterministic: invests a fixed fraction of its current wealth every
/// round and always accepts the proposed split.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FixedInvestor {
    fraction: f64,
}

impl FixedInvestor {
    pub fn new(fraction: f64) -> Self {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.5 };
        Self { fraction }
    }

    pub fn fraction(&self) -> f64 {
        self.fraction
    }

    pub fn invest(&self, wealth: f64) -> f64 {
        wealth * self.fraction
    }
}
