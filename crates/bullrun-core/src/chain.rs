//! Rumor chains: a rumor now, a weighted resolution a few days later.
//!
//! Starting a chain posts its rumor (shown apart from the dated headlines)
//! and blocks its category until it resolves. The countdown drops by one
//! each day; at zero an outcome is chosen by `probability * ripple bias`,
//! with narrative momentum dropping a lone outcome that would contradict a
//! live mood.

use std::collections::BTreeSet;

use bullrun_catalog::Catalog;
use bullrun_types::{Category, ChainDef, ChainId, Headline, HeadlineKind, Outcome, Rumor};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::mood::MoodLedger;
use crate::ripple::RippleLedger;
use crate::selector;
use crate::weighted;

/// A chain that has posted its rumor and awaits resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveChain {
    /// Catalog chain id.
    pub chain_id: ChainId,
    /// Blocked category.
    pub category: Category,
    /// Rumor text.
    pub rumor: String,
    /// Day the chain started.
    pub start_day: u32,
    /// Days until resolution.
    pub days_remaining: u32,
}

impl ActiveChain {
    /// Start `def` on `day`.
    pub fn start(def: &ChainDef, day: u32) -> Self {
        Self {
            chain_id: def.id.clone(),
            category: def.category,
            rumor: def.rumor.clone(),
            start_day: day,
            days_remaining: def.duration_days,
        }
    }

    /// The rumor as shown to the player.
    pub fn rumor(&self) -> Rumor {
        Rumor {
            chain_id: self.chain_id.clone(),
            category: self.category,
            text: self.rumor.clone(),
            days_remaining: self.days_remaining,
        }
    }
}

/// Chains that may start on `day`, weighted by their category's selection
/// weight.
///
/// A chain is eligible if it is unused, its category is selectable today
/// and it resolves no later than the final day.
pub fn eligible<'a>(
    catalog: &'a Catalog,
    used: &BTreeSet<ChainId>,
    weights: &[(Category, f64)],
    day: u32,
    total_days: u32,
) -> Vec<(&'a ChainDef, f64)> {
    catalog
        .chains()
        .iter()
        .filter(|def| !used.contains(&def.id))
        .filter(|def| day.saturating_add(def.duration_days) <= total_days)
        .map(|def| (def, selector::weight_of(weights, def.category)))
        .filter(|(_, weight)| *weight > 0.0)
        .collect()
}

/// Pick an outcome for `def` resolving on `day`.
pub fn resolve<'a, R: Rng + ?Sized>(
    rng: &mut R,
    def: &'a ChainDef,
    day: u32,
    moods: &MoodLedger,
    ripples: &RippleLedger,
    config: &EngineConfig,
) -> Option<&'a Outcome> {
    let window = config.mood.decay_days;
    let weights: Vec<f64> = def
        .outcomes
        .iter()
        .map(|outcome| {
            outcome.probability
                * ripples.outcome_bias(
                    def.category,
                    outcome.sentiment(),
                    day,
                    config.ripple.outcome_gain,
                )
        })
        .collect();
    let conflicts: Vec<bool> = def
        .outcomes
        .iter()
        .map(|outcome| !outcome.allows_reversal && moods.conflicts(&outcome.effects, day, window))
        .collect();

    weighted::pick_with_momentum(rng, &weights, &conflicts).and_then(|index| def.outcomes.get(index))
}

/// The dated headline for a resolved chain.
pub fn resolution_headline(def: &ChainDef, outcome: &Outcome, day: u32) -> Headline {
    Headline::new(day, HeadlineKind::ChainResolution, outcome.headline.clone())
        .with_category(def.category)
        .with_effects(outcome.effects.clone())
        .with_source(def.id.as_str())
}

/// Neutral headline for a chain that cannot resolve an outcome, or whose
/// definition is gone from the catalog.
pub fn stale_headline(chain: &ActiveChain, day: u32) -> Headline {
    Headline::new(
        day,
        HeadlineKind::ChainResolution,
        format!("No further word on: {}", chain.rumor),
    )
    .with_category(chain.category)
    .with_source(chain.chain_id.as_str())
}
