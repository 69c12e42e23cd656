//! Decaying directional biases left by high-impact content.
//!
//! A ripple remembers that a category recently moved hard in one direction.
//! Its strength halves every `half_life_days`. Live ripples raise their
//! category's selection weight and tilt outcome/branch weights toward their
//! own direction. A new ripple removes a fraction of every live ripple of the
//! opposite sign.

use bullrun_types::{Category, Sentiment};
use serde::{Deserialize, Serialize};

/// Ripples weaker than this are dropped.
pub const MIN_RIPPLE_STRENGTH: f64 = 0.01;

/// Ceiling on the category weight multiplier from ripples.
const MAX_CATEGORY_MULTIPLIER: f64 = 2.0;

/// Bounds on the outcome weight multiplier from ripples.
const OUTCOME_BIAS_RANGE: (f64, f64) = (0.5, 1.5);

/// One decaying directional bias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ripple {
    /// Category of the content that created it.
    pub category: Category,
    /// Direction of that content.
    pub sentiment: Sentiment,
    /// Strength on the day it was created.
    pub magnitude: f64,
    /// Day it was created.
    pub created_day: u32,
    /// Days for the strength to halve.
    pub half_life_days: f64,
}

impl Ripple {
    /// Strength on `day` after exponential decay.
    pub fn strength_on(&self, day: u32) -> f64 {
        if self.half_life_days <= 0.0 || !self.half_life_days.is_finite() {
            return 0.0;
        }
        let age = f64::from(day.saturating_sub(self.created_day));
        self.magnitude * 0.5_f64.powf(age / self.half_life_days)
    }
}

/// Live ripples, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RippleLedger {
    ripples: Vec<Ripple>,
}

impl RippleLedger {
    /// An empty ledger.
    pub const fn new() -> Self {
        Self {
            ripples: Vec::new(),
        }
    }

    /// Add a ripple, cancelling `cancel_fraction` of every opposite-sign one.
    pub fn add(&mut self, ripple: Ripple, cancel_fraction: f64) {
        let keep = 1.0 - cancel_fraction.clamp(0.0, 1.0);
        for existing in &mut self.ripples {
            if existing.sentiment.opposes(ripple.sentiment) {
                existing.magnitude *= keep;
            }
        }
        self.ripples.push(ripple);
    }

    /// Drop ripples whose strength on `day` is below [`MIN_RIPPLE_STRENGTH`].
    pub fn prune(&mut self, day: u32) {
        self.ripples
            .retain(|ripple| ripple.strength_on(day) >= MIN_RIPPLE_STRENGTH);
    }

    /// Selection weight multiplier for `category` on `day`.
    ///
    /// `1 + gain * (sum of live strengths in the category)`, capped at 2.
    pub fn category_multiplier(&self, category: Category, day: u32, gain: f64) -> f64 {
        let strength: f64 = self
            .ripples
            .iter()
            .filter(|ripple| ripple.category == category)
            .map(|ripple| ripple.strength_on(day))
            .sum();
        (1.0 + gain * strength).clamp(1.0, MAX_CATEGORY_MULTIPLIER)
    }

    /// Signed pressure in `category`: bullish strength minus bearish.
    pub fn net_bias(&self, category: Category, day: u32) -> f64 {
        self.ripples
            .iter()
            .filter(|ripple| ripple.category == category)
            .map(|ripple| ripple.sentiment.sign() * ripple.strength_on(day))
            .sum()
    }

    /// Weight multiplier for an outcome of `sentiment` in `category`.
    ///
    /// Outcomes aligned with the category's net pressure are favored,
    /// opposing ones disfavored; neutral outcomes are unaffected.
    pub fn outcome_bias(&self, category: Category, sentiment: Sentiment, day: u32, gain: f64) -> f64 {
        let (low, high) = OUTCOME_BIAS_RANGE;
        (1.0 + gain * sentiment.sign() * self.net_bias(category, day)).clamp(low, high)
    }

    /// Live ripples, oldest first.
    pub fn as_slice(&self) -> &[Ripple] {
        &self.ripples
    }

    /// Number of live ripples.
    pub fn len(&self) -> usize {
        self.ripples.len()
    }

    /// Whether no ripple is live.
    pub fn is_empty(&self) -> bool {
        self.ripples.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ripple(category: Category, sentiment: Sentiment, magnitude: f64, day: u32) -> Ripple {
        Ripple {
            category,
            sentiment,
            magnitude,
            created_day: day,
            half_life_days: 2.0,
        }
    }

    #[test]
    fn strength_halves_each_half_life() {
        let r = ripple(Category::Tech, Sentiment::Bullish, 0.4, 10);
        assert!((r.strength_on(10) - 0.4).abs() < 1e-12);
        assert!((r.strength_on(12) - 0.2).abs() < 1e-12);
        assert!((r.strength_on(14) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn opposite_sign_is_partially_cancelled() {
        let mut ledger = RippleLedger::new();
        ledger.add(ripple(Category::Energy, Sentiment::Bullish, 0.2, 1), 0.5);
        ledger.add(ripple(Category::Energy, Sentiment::Bearish, 0.1, 1), 0.5);

        let bullish = ledger
            .as_slice()
            .iter()
            .find(|r| r.sentiment == Sentiment::Bullish)
            .map(|r| r.magnitude);
        assert!(bullish.is_some_and(|m| (m - 0.1).abs() < 1e-12));
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn prune_drops_faded_ripples() {
        let mut ledger = RippleLedger::new();
        ledger.add(ripple(Category::Crypto, Sentiment::Bearish, 0.04, 1), 0.5);
        ledger.prune(2);
        assert_eq!(ledger.len(), 1);
        // 0.04 * 0.5^(4/2) = 0.01, still live; one more day drops it.
        ledger.prune(6);
        assert!(ledger.is_empty());
    }

    #[test]
    fn category_multiplier_is_bounded() {
        let mut ledger = RippleLedger::new();
        assert!((ledger.category_multiplier(Category::Tech, 1, 1.0) - 1.0).abs() < 1e-12);

        ledger.add(ripple(Category::Tech, Sentiment::Bullish, 5.0, 1), 0.5);
        assert!((ledger.category_multiplier(Category::Tech, 1, 1.0) - 2.0).abs() < 1e-12);
        assert!((ledger.category_multiplier(Category::Macro, 1, 1.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn outcome_bias_follows_pressure() {
        let mut ledger = RippleLedger::new();
        ledger.add(ripple(Category::Biotech, Sentiment::Bearish, 0.3, 3), 0.5);

        let bearish = ledger.outcome_bias(Category::Biotech, Sentiment::Bearish, 3, 1.0);
        let bullish = ledger.outcome_bias(Category::Biotech, Sentiment::Bullish, 3, 1.0);
        let neutral = ledger.outcome_bias(Category::Biotech, Sentiment::Neutral, 3, 1.0);
        assert!(bearish > 1.0);
        assert!(bullish < 1.0);
        assert!((neutral - 1.0).abs() < 1e-12);
    }
}
