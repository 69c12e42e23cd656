//! Catalog entry types: the immutable content the engine draws from.
//!
//! These structs mirror the catalog YAML one-to-one. Entries are consumed,
//! never mutated; per-game progress lives in the engine's state aggregate.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::enums::{Category, Sentiment};
use crate::ids::{AssetId, ChainId, EventId, PoolId, ScheduledId, StoryId};

/// Per-asset price effects, as signed fractions (`0.05` = +5%).
pub type Effects = BTreeMap<AssetId, f64>;

/// Sum of absolute effects, the engine's measure of how much content moves
/// the market. Non-finite entries are ignored.
pub fn total_magnitude(effects: &Effects) -> f64 {
    effects
        .values()
        .filter(|effect| effect.is_finite())
        .map(|effect| effect.abs())
        .sum()
}

/// Overall direction of a set of effects (sign of their sum).
pub fn net_sentiment(effects: &Effects) -> Sentiment {
    Sentiment::from_effect(effects.values().filter(|effect| effect.is_finite()).sum())
}

// ---------------------------------------------------------------------------
// Assets
// ---------------------------------------------------------------------------

/// A tradable asset in the static registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Asset {
    /// Ticker symbol.
    pub id: AssetId,
    /// Display name.
    pub name: String,
    /// Sector the asset belongs to.
    pub sector: Category,
    /// Price on day 0.
    #[ts(as = "String")]
    pub base_price: Decimal,
    /// Fractional daily noise amplitude (`0.05` = up to +/-5% per day).
    pub volatility: f64,
}

// ---------------------------------------------------------------------------
// Single-day events
// ---------------------------------------------------------------------------

/// Temporary boost to the selection weight of some categories.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Escalation {
    /// Categories whose weight is multiplied.
    pub categories: Vec<Category>,
    /// Weight multiplier while the boost is active.
    pub multiplier: f64,
    /// Number of days after the triggering event that the boost lasts.
    pub duration_days: u32,
}

/// A single-day market event from the weighted pool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEvent {
    /// Unique headline id.
    pub id: EventId,
    /// Topic used for weighted selection and blocking.
    pub category: Category,
    /// Headline text.
    pub headline: String,
    /// Price effects applied the day the event fires.
    #[serde(default)]
    pub effects: Effects,
    /// Optional weight boost registered when this event fires.
    #[serde(default)]
    pub escalation: Option<Escalation>,
    /// Whether this event may contradict a recorded asset mood.
    #[serde(default)]
    pub allows_reversal: bool,
}

// ---------------------------------------------------------------------------
// Weighted outcomes (chains and scheduled events)
// ---------------------------------------------------------------------------

/// One weighted resolution branch of a chain or scheduled event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outcome {
    /// Short label shown in prediction-market hints.
    #[serde(default)]
    pub label: String,
    /// Headline text when this outcome is chosen.
    pub headline: String,
    /// Price effects when this outcome is chosen.
    #[serde(default)]
    pub effects: Effects,
    /// Branch probability; a definition's probabilities sum to 1.
    pub probability: f64,
    /// Whether this outcome may contradict a recorded asset mood.
    #[serde(default)]
    pub allows_reversal: bool,
}

impl Outcome {
    /// Overall direction of this outcome.
    pub fn sentiment(&self) -> Sentiment {
        net_sentiment(&self.effects)
    }
}

/// A rumor that resolves after a fixed countdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainDef {
    /// Unique chain id.
    pub id: ChainId,
    /// Topic, blocked while the chain is active.
    pub category: Category,
    /// Finer-grained topic tag (for presentation).
    #[serde(default)]
    pub subcategory: String,
    /// Rumor text shown while the chain is active.
    pub rumor: String,
    /// Days between creation and resolution.
    pub duration_days: u32,
    /// Weighted resolution branches.
    pub outcomes: Vec<Outcome>,
}

// ---------------------------------------------------------------------------
// Stories
// ---------------------------------------------------------------------------

/// One weighted branch of a story's branching stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryBranch {
    /// Headline text when this branch is chosen.
    pub headline: String,
    /// Price effects when this branch is chosen.
    #[serde(default)]
    pub effects: Effects,
    /// Branch probability; a stage's probabilities sum to 1.
    pub probability: f64,
    /// When set and a later stage exists, the story carries on.
    #[serde(default)]
    pub continues: bool,
    /// Whether this branch may contradict a recorded asset mood.
    #[serde(default)]
    pub allows_reversal: bool,
}

impl StoryBranch {
    /// Overall direction of this branch.
    pub fn sentiment(&self) -> Sentiment {
        net_sentiment(&self.effects)
    }
}

/// A stage of a story: a linear beat or a weighted branch point.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoryStage {
    /// Linear stage: always shows its headline and applies its effects.
    Beat {
        /// Headline text.
        headline: String,
        /// Price effects.
        #[serde(default)]
        effects: Effects,
    },
    /// Branch point holding 2 or 3 weighted branches.
    Branch {
        /// Weighted branches.
        branches: Vec<StoryBranch>,
    },
}

/// A multi-stage narrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoryDef {
    /// Unique story id.
    pub id: StoryId,
    /// Topic, blocked while the story is active.
    pub category: Category,
    /// Finer-grained topic tag (for presentation).
    #[serde(default)]
    pub subcategory: String,
    /// Ordered stages; the first is a low-effect rumor beat.
    pub stages: Vec<StoryStage>,
}

// ---------------------------------------------------------------------------
// Scheduled events
// ---------------------------------------------------------------------------

/// A calendar-anchored announce/resolve event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledEventDef {
    /// Unique scheduled-event id.
    pub id: ScheduledId,
    /// Topic of the event.
    pub category: Category,
    /// Announcement headline.
    pub announcement: String,
    /// Small pre-positioning effects applied on announcement.
    #[serde(default)]
    pub announcement_effects: Effects,
    /// First day the event may be announced.
    pub earliest_day: u32,
    /// Day on which the event is announced unconditionally if still pending.
    pub latest_day: u32,
    /// Days between announcement and resolution.
    pub lead_days: u32,
    /// Weighted resolution outcomes.
    pub outcomes: Vec<Outcome>,
    /// Whether the announcement carries a prediction-market hint.
    #[serde(default)]
    pub prediction_market: bool,
}

// ---------------------------------------------------------------------------
// Flavor and quiet pools
// ---------------------------------------------------------------------------

/// A zero-effect headline from the flavor or quiet pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolEntry {
    /// Unique pool id.
    pub id: PoolId,
    /// Headline text.
    pub headline: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn effects(pairs: &[(&str, f64)]) -> Effects {
        pairs
            .iter()
            .map(|(id, effect)| (AssetId::new(*id), *effect))
            .collect()
    }

    #[test]
    fn magnitude_sums_absolute_values() {
        let e = effects(&[("NOVA", 0.05), ("PTRA", -0.03)]);
        assert!((total_magnitude(&e) - 0.08).abs() < 1e-12);
    }

    #[test]
    fn magnitude_ignores_non_finite() {
        let e = effects(&[("NOVA", f64::INFINITY), ("PTRA", -0.02)]);
        assert!((total_magnitude(&e) - 0.02).abs() < 1e-12);
    }

    #[test]
    fn net_sentiment_follows_sum() {
        assert_eq!(
            net_sentiment(&effects(&[("NOVA", 0.05), ("PTRA", -0.03)])),
            Sentiment::Bullish
        );
        assert_eq!(
            net_sentiment(&effects(&[("NOVA", -0.05), ("PTRA", 0.01)])),
            Sentiment::Bearish
        );
        assert_eq!(net_sentiment(&Effects::new()), Sentiment::Neutral);
    }

    #[test]
    fn story_stage_uses_kind_tag() {
        let json = r#"{"kind":"beat","headline":"Whispers","effects":{"NOVA":0.01}}"#;
        let stage: Result<StoryStage, _> = serde_json::from_str(json);
        assert!(matches!(stage, Ok(StoryStage::Beat { .. })));

        let json = r#"{"kind":"branch","branches":[{"headline":"A","probability":1.0}]}"#;
        let stage: Result<StoryStage, _> = serde_json::from_str(json);
        assert!(matches!(stage, Ok(StoryStage::Branch { .. })));
    }
}
