//! Weighted category selection and the single-event selector.
//!
//! A selection round starts from the catalog's base category weights,
//! drops blocked categories, applies the Director's multipliers and any
//! live escalation boosts, and renormalizes so the weights sum to 1.
//!
//! The event selector rolls a category on those weights, then picks an
//! unused event in it uniformly. A candidate that contradicts a live mood
//! (and does not allow reversal) is skipped and the roll is repeated, up to
//! `max_rerolls` extra times. If every attempt is skipped, no event fires.

use std::collections::BTreeSet;

use bullrun_catalog::Catalog;
use bullrun_types::{Category, EventId, MarketEvent};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::director::DirectorModifiers;
use crate::mood::MoodLedger;
use crate::weighted;

/// A temporary weight boost registered by a fired event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveEscalation {
    /// Event that registered the boost.
    pub source: EventId,
    /// Boosted categories.
    pub categories: Vec<Category>,
    /// Weight multiplier.
    pub multiplier: f64,
    /// Day the event fired; the boost starts the day after.
    pub start_day: u32,
    /// Last boosted day.
    pub expires_day: u32,
}

impl ActiveEscalation {
    /// The boost registered by `event` firing on `day`, if it has one.
    pub fn from_event(event: &MarketEvent, day: u32) -> Option<Self> {
        event.escalation.as_ref().map(|escalation| Self {
            source: event.id.clone(),
            categories: escalation.categories.clone(),
            multiplier: escalation.multiplier,
            start_day: day,
            expires_day: day.saturating_add(escalation.duration_days),
        })
    }

    /// Whether the boost applies on `day`.
    pub const fn is_active(&self, day: u32) -> bool {
        day > self.start_day && day <= self.expires_day
    }

    /// Multiplier this boost applies to `category` on `day`.
    pub fn multiplier_for(&self, category: Category, day: u32) -> f64 {
        if self.is_active(day) && self.categories.contains(&category) {
            self.multiplier
        } else {
            1.0
        }
    }
}

/// Drop boosts that cannot apply on any day after `day`.
pub fn prune_escalations(escalations: &mut Vec<ActiveEscalation>, day: u32) {
    escalations.retain(|escalation| escalation.expires_day > day);
}

/// Normalized category weights for one selection round on `day`.
///
/// Blocked categories and categories whose adjusted weight is zero are
/// absent. The result sums to 1, or is empty when nothing is selectable.
pub fn category_weights(
    catalog: &Catalog,
    blocked: &BTreeSet<Category>,
    escalations: &[ActiveEscalation],
    modifiers: &DirectorModifiers,
    day: u32,
) -> Vec<(Category, f64)> {
    let mut weights: Vec<(Category, f64)> = catalog
        .category_weights()
        .iter()
        .filter(|(category, _)| !blocked.contains(category))
        .map(|(category, base)| {
            let boost: f64 = escalations
                .iter()
                .map(|escalation| escalation.multiplier_for(*category, day))
                .product();
            (
                *category,
                base * modifiers.category_multiplier(*category) * boost,
            )
        })
        .filter(|(_, weight)| weight.is_finite() && *weight > 0.0)
        .collect();

    if weighted::normalize(&mut weights) {
        weights
    } else {
        Vec::new()
    }
}

/// Restrict `weights` to categories that still have an unused event, and
/// renormalize.
pub fn event_weights(
    weights: &[(Category, f64)],
    catalog: &Catalog,
    used: &BTreeSet<EventId>,
) -> Vec<(Category, f64)> {
    let mut available: Vec<(Category, f64)> = weights
        .iter()
        .filter(|(category, _)| {
            catalog
                .events_in(*category)
                .any(|event| !used.contains(&event.id))
        })
        .copied()
        .collect();

    if weighted::normalize(&mut available) {
        available
    } else {
        Vec::new()
    }
}

/// Weight of `category` in a selection round (0 if absent).
pub fn weight_of(weights: &[(Category, f64)], category: Category) -> f64 {
    weights
        .iter()
        .find(|(c, _)| *c == category)
        .map_or(0.0, |(_, weight)| *weight)
}

/// Result of one event selection.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSelection<'a> {
    /// The chosen event, if any survived the mood gate.
    pub event: Option<&'a MarketEvent>,
    /// Candidates skipped for contradicting a live mood.
    pub skipped: u32,
}

/// Everything the event selector reads besides the RNG.
#[derive(Debug, Clone, Copy)]
pub struct EventQuery<'c, 's> {
    /// Catalog to draw from.
    pub catalog: &'c Catalog,
    /// Output of [`event_weights`].
    pub weights: &'s [(Category, f64)],
    /// Events already used this game.
    pub used: &'s BTreeSet<EventId>,
    /// Mood ledger including today's tags so far.
    pub moods: &'s MoodLedger,
    /// Day being resolved.
    pub day: u32,
    /// Mood decay window.
    pub mood_window: u32,
    /// Extra attempts after a skip.
    pub max_rerolls: u32,
}

/// Roll a category, pick an unused event in it, and apply the mood gate.
pub fn select_event<'c, R: Rng + ?Sized>(
    rng: &mut R,
    query: &EventQuery<'c, '_>,
) -> EventSelection<'c> {
    let mut tried: BTreeSet<&EventId> = BTreeSet::new();
    let mut skipped = 0_u32;

    for _ in 0..=query.max_rerolls {
        let Some(category) = weighted::pick(rng, query.weights).copied() else {
            break;
        };
        let candidates: Vec<&MarketEvent> = query
            .catalog
            .events_in(category)
            .filter(|event| !query.used.contains(&event.id) && !tried.contains(&event.id))
            .collect();
        let Some(event) = candidates.choose(rng).copied() else {
            continue;
        };

        if !event.allows_reversal
            && query
                .moods
                .conflicts(&event.effects, query.day, query.mood_window)
        {
            debug!(
                day = query.day,
                event_id = %event.id,
                %category,
                "Skipping event that contradicts a live mood"
            );
            tried.insert(&event.id);
            skipped = skipped.saturating_add(1);
            continue;
        }

        return EventSelection {
            event: Some(event),
            skipped,
        };
    }

    EventSelection {
        event: None,
        skipped,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use bullrun_types::{Phase, Sentiment};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::EngineConfig;
    use crate::director::DirectorState;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap_or_else(|err| panic!("builtin catalog: {err}"))
    }

    fn neutral_modifiers() -> DirectorModifiers {
        DirectorState::new().modifiers(Phase::Midpoint, 10, &EngineConfig::default())
    }

    fn sum(weights: &[(Category, f64)]) -> f64 {
        weights.iter().map(|(_, w)| w).sum()
    }

    #[test]
    fn weights_sum_to_one_and_skip_blocked() {
        let catalog = catalog();
        let blocked: BTreeSet<Category> = [Category::Tech, Category::Crypto].into_iter().collect();
        let weights = category_weights(&catalog, &blocked, &[], &neutral_modifiers(), 10);

        assert!((sum(&weights) - 1.0).abs() < 1e-9);
        assert!(weights.iter().all(|(c, _)| !blocked.contains(c)));
        assert_eq!(weights.len(), Category::ALL.len() - 2);
    }

    #[test]
    fn escalation_boosts_only_while_active() {
        let catalog = catalog();
        let escalation = ActiveEscalation {
            source: EventId::new("opec-cut"),
            categories: vec![Category::Energy],
            multiplier: 3.0,
            start_day: 5,
            expires_day: 7,
        };
        let blocked = BTreeSet::new();
        let modifiers = neutral_modifiers();
        let escalations = [escalation];

        let base = weight_of(&category_weights(&catalog, &blocked, &[], &modifiers, 6), Category::Energy);
        let boosted = weight_of(
            &category_weights(&catalog, &blocked, &escalations, &modifiers, 6),
            Category::Energy,
        );
        let same_day = weight_of(
            &category_weights(&catalog, &blocked, &escalations, &modifiers, 5),
            Category::Energy,
        );
        assert!(boosted > base);
        assert!((same_day - base).abs() < 1e-12);

        let boosted_weights = category_weights(&catalog, &blocked, &escalations, &modifiers, 6);
        assert!((sum(&boosted_weights) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn prune_keeps_only_future_boosts() {
        let mut escalations = vec![ActiveEscalation {
            source: EventId::new("e"),
            categories: vec![Category::Macro],
            multiplier: 2.0,
            start_day: 1,
            expires_day: 3,
        }];
        prune_escalations(&mut escalations, 2);
        assert_eq!(escalations.len(), 1);
        prune_escalations(&mut escalations, 3);
        assert!(escalations.is_empty());
    }

    #[test]
    fn selected_event_is_unused_and_unblocked() {
        let catalog = catalog();
        let blocked: BTreeSet<Category> = [Category::Energy].into_iter().collect();
        let weights = category_weights(&catalog, &blocked, &[], &neutral_modifiers(), 4);
        let used: BTreeSet<EventId> = [EventId::new("nova-earnings-beat")].into_iter().collect();
        let weights = event_weights(&weights, &catalog, &used);
        let moods = MoodLedger::new();

        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let query = EventQuery {
                catalog: &catalog,
                weights: &weights,
                used: &used,
                moods: &moods,
                day: 4,
                mood_window: 3,
                max_rerolls: 3,
            };
            let selection = select_event(&mut rng, &query);
            let event = selection.event;
            assert!(event.is_some());
            if let Some(event) = event {
                assert_ne!(event.category, Category::Energy);
                assert_ne!(event.id.as_str(), "nova-earnings-beat");
            }
        }
    }

    #[test]
    fn contradicting_candidate_is_skipped() {
        let catalog = catalog();
        // Only tech is selectable and every tech event but one bullish NOVA
        // headline is used.
        let blocked: BTreeSet<Category> = Category::ALL
            .into_iter()
            .filter(|c| *c != Category::Tech)
            .collect();
        let used: BTreeSet<EventId> = catalog
            .events_in(Category::Tech)
            .filter(|e| e.id.as_str() != "nova-earnings-beat")
            .map(|e| e.id.clone())
            .collect();
        let weights = category_weights(&catalog, &blocked, &[], &neutral_modifiers(), 8);
        let weights = event_weights(&weights, &catalog, &used);

        let mut moods = MoodLedger::new();
        moods.record(&bullrun_types::AssetId::new("NOVA"), Sentiment::Bearish, 7);

        let mut rng = StdRng::seed_from_u64(22);
        let query = EventQuery {
            catalog: &catalog,
            weights: &weights,
            used: &used,
            moods: &moods,
            day: 8,
            mood_window: 3,
            max_rerolls: 3,
        };
        let selection = select_event(&mut rng, &query);
        assert!(selection.event.is_none());
        assert_eq!(selection.skipped, 1);
    }
}
