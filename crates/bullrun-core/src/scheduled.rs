//! Calendar-anchored scheduled events.
//!
//! A scheduled event is announced inside its `[earliest_day, latest_day]`
//! window and resolves `lead_days` later. Announcing applies the
//! announcement effects and, when the event has a prediction market, shows a
//! hint naming the outcome the market favors. The hint is wrong at
//! `miss_rate`. At most one scheduled event is pending at a time.
//!
//! An event whose window closes while another one is pending stays a
//! candidate and is announced on the first free day, as long as its
//! resolution still lands inside the game.

use std::collections::BTreeSet;

use bullrun_catalog::Catalog;
use bullrun_types::{
    Category, Headline, HeadlineKind, Outcome, PredictionHint, ScheduledEventDef, ScheduledId,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::ScheduledConfig;
use crate::weighted;

/// An announced scheduled event awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveScheduled {
    /// Catalog id.
    pub scheduled_id: ScheduledId,
    /// Topic.
    pub category: Category,
    /// Day of the announcement.
    pub announced_day: u32,
    /// Day the outcome lands.
    pub resolve_day: u32,
}

/// Scheduled events that may be announced on `day`: unused, window open or
/// already closed, and resolving by `total_days`.
pub fn candidates<'a>(
    catalog: &'a Catalog,
    used: &BTreeSet<ScheduledId>,
    day: u32,
    total_days: u32,
) -> Vec<&'a ScheduledEventDef> {
    catalog
        .scheduled()
        .iter()
        .filter(|def| !used.contains(&def.id))
        .filter(|def| def.earliest_day <= day)
        .filter(|def| day.saturating_add(def.lead_days) <= total_days)
        .collect()
}

/// Decide which candidate, if any, is announced on `day`.
///
/// A candidate on the last day of its window, or past it, is announced
/// without a roll; the earliest deadline goes first. Otherwise one roll at
/// `announce_chance`, then a uniform pick.
pub fn choose_announcement<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[&'a ScheduledEventDef],
    day: u32,
    config: &ScheduledConfig,
) -> Option<&'a ScheduledEventDef> {
    let due = candidates
        .iter()
        .filter(|def| def.latest_day <= day)
        .min_by_key(|def| def.latest_day);
    if let Some(due) = due {
        if due.latest_day < day {
            warn!(
                day,
                scheduled_id = %due.id,
                latest_day = due.latest_day,
                "Announcing scheduled event after its window"
            );
        }
        return Some(*due);
    }
    if candidates.is_empty() || !weighted::chance(rng, config.announce_chance) {
        return None;
    }
    candidates.choose(rng).copied()
}

fn outcome_label(outcome: &Outcome) -> String {
    if outcome.label.is_empty() {
        outcome.headline.clone()
    } else {
        outcome.label.clone()
    }
}

/// The prediction-market hint for `def`.
///
/// Names the most probable outcome, or at `miss_rate` a different one shown
/// with the same probability.
pub fn prediction_hint<R: Rng + ?Sized>(
    rng: &mut R,
    def: &ScheduledEventDef,
    miss_rate: f64,
) -> Option<PredictionHint> {
    let (favored_index, favored) = def
        .outcomes
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.probability.total_cmp(&b.1.probability).then(b.0.cmp(&a.0)))?;

    let shown = if def.outcomes.len() > 1 && weighted::chance(rng, miss_rate) {
        let others: Vec<&Outcome> = def
            .outcomes
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != favored_index)
            .map(|(_, outcome)| outcome)
            .collect();
        debug!(scheduled_id = %def.id, "Prediction market misses");
        others.choose(rng).copied().unwrap_or(favored)
    } else {
        favored
    };

    Some(PredictionHint {
        favored: outcome_label(shown),
        probability: favored.probability,
    })
}

/// Announce `def` on `day`.
pub fn announce<R: Rng + ?Sized>(
    rng: &mut R,
    def: &ScheduledEventDef,
    day: u32,
    config: &ScheduledConfig,
) -> (ActiveScheduled, Headline) {
    let active = ActiveScheduled {
        scheduled_id: def.id.clone(),
        category: def.category,
        announced_day: day,
        resolve_day: day.saturating_add(def.lead_days),
    };
    let mut headline = Headline::new(day, HeadlineKind::ScheduledAnnouncement, def.announcement.clone())
        .with_category(def.category)
        .with_effects(def.announcement_effects.clone())
        .with_source(def.id.as_str());
    if def.prediction_market {
        if let Some(hint) = prediction_hint(rng, def, config.miss_rate) {
            headline = headline.with_prediction(hint);
        }
    }
    (active, headline)
}

/// Unused events whose window closes on `day`.
///
/// Called after the day's announcement; anything returned missed its window.
pub fn lapsing<'a>(
    catalog: &'a Catalog,
    used: &BTreeSet<ScheduledId>,
    day: u32,
) -> Vec<&'a ScheduledEventDef> {
    catalog
        .scheduled()
        .iter()
        .filter(|def| def.latest_day == day && !used.contains(&def.id))
        .collect()
}

/// Resolve `def` on `day` with a weighted draw over its outcome
/// probabilities.
pub fn resolve<R: Rng + ?Sized>(rng: &mut R, def: &ScheduledEventDef, day: u32) -> Headline {
    let weights: Vec<f64> = def.outcomes.iter().map(|o| o.probability).collect();
    let outcome = weighted::pick_index(rng, &weights).and_then(|index| def.outcomes.get(index));
    match outcome {
        Some(outcome) => Headline::new(day, HeadlineKind::ScheduledResolution, outcome.headline.clone())
            .with_category(def.category)
            .with_effects(outcome.effects.clone())
            .with_source(def.id.as_str()),
        None => Headline::new(day, HeadlineKind::ScheduledResolution, def.announcement.clone())
            .with_category(def.category)
            .with_source(def.id.as_str()),
    }
}

/// Neutral headline for a pending event whose definition is gone.
pub fn stale_headline(active: &ActiveScheduled, day: u32) -> Headline {
    Headline::new(day, HeadlineKind::ScheduledResolution, "Scheduled event postponed indefinitely")
        .with_category(active.category)
        .with_source(active.scheduled_id.as_str())
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use bullrun_types::{AssetId, Effects};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::config::EngineConfig;

    fn outcome(label: &str, effect: f64, probability: f64) -> Outcome {
        let mut effects = Effects::new();
        effects.insert(AssetId::new("GOLD"), effect);
        Outcome {
            label: label.to_owned(),
            headline: format!("Fed decides: {label}"),
            effects,
            probability,
            allows_reversal: false,
        }
    }

    fn rate_decision() -> ScheduledEventDef {
        ScheduledEventDef {
            id: ScheduledId::new("rates"),
            category: Category::Macro,
            announcement: "Central bank meets next week".to_owned(),
            announcement_effects: Effects::new(),
            earliest_day: 3,
            latest_day: 6,
            lead_days: 3,
            outcomes: vec![
                outcome("Hold", 0.0, 0.6),
                outcome("Cut", 0.03, 0.3),
                outcome("Hike", -0.03, 0.1),
            ],
            prediction_market: true,
        }
    }

    #[test]
    fn last_window_day_forces_announcement() {
        let def = rate_decision();
        let config = ScheduledConfig {
            announce_chance: 0.0,
            ..EngineConfig::default().scheduled
        };
        let mut rng = StdRng::seed_from_u64(51);
        assert!(choose_announcement(&mut rng, &[&def], 5, &config).is_none());
        assert_eq!(
            choose_announcement(&mut rng, &[&def], 6, &config).map(|d| d.id.clone()),
            Some(def.id.clone())
        );
    }

    #[test]
    fn candidates_respect_window_and_game_end() {
        let catalog = Catalog::builtin().unwrap_or_else(|err| panic!("builtin catalog: {err}"));
        for def in catalog.scheduled() {
            let found = candidates(&catalog, &BTreeSet::new(), def.earliest_day, 30);
            assert!(found.iter().any(|d| d.id == def.id));
            let before = def.earliest_day.saturating_sub(1);
            if before > 0 {
                let early = candidates(&catalog, &BTreeSet::new(), before, 30);
                assert!(early.iter().all(|d| d.id != def.id));
            }
            // A closed window keeps the event available while it still fits.
            let overdue = def.latest_day.saturating_add(1);
            let late = candidates(&catalog, &BTreeSet::new(), overdue, 30);
            assert_eq!(
                late.iter().any(|d| d.id == def.id),
                overdue.saturating_add(def.lead_days) <= 30
            );
        }
        let used: BTreeSet<ScheduledId> = catalog.scheduled().iter().map(|d| d.id.clone()).collect();
        assert!(candidates(&catalog, &used, 10, 30).is_empty());
        // A short game cannot fit anything whose resolution lands past the end.
        assert!(candidates(&catalog, &BTreeSet::new(), 4, 5).is_empty());
    }

    #[test]
    fn overdue_event_is_announced_earliest_deadline_first() {
        let mut late = rate_decision();
        late.id = ScheduledId::new("late");
        late.earliest_day = 2;
        late.latest_day = 2;
        let mut later = rate_decision();
        later.id = ScheduledId::new("later");
        later.earliest_day = 3;
        later.latest_day = 4;
        let open = rate_decision();
        let config = ScheduledConfig {
            announce_chance: 0.0,
            ..EngineConfig::default().scheduled
        };
        let mut rng = StdRng::seed_from_u64(55);
        let chosen = choose_announcement(&mut rng, &[&open, &later, &late], 5, &config);
        assert_eq!(chosen.map(|d| d.id.clone()), Some(late.id.clone()));
        let chosen = choose_announcement(&mut rng, &[&open, &later], 5, &config);
        assert_eq!(chosen.map(|d| d.id.clone()), Some(later.id.clone()));
    }

    #[test]
    fn lapsing_lists_unused_events_closing_today() {
        let catalog = Catalog::builtin().unwrap_or_else(|err| panic!("builtin catalog: {err}"));
        let Some(def) = catalog.scheduled().as_slice().first() else {
            panic!("builtin catalog has scheduled events");
        };
        let closing = lapsing(&catalog, &BTreeSet::new(), def.latest_day);
        assert!(closing.iter().any(|d| d.id == def.id));
        let used: BTreeSet<ScheduledId> = [def.id.clone()].into_iter().collect();
        let closing = lapsing(&catalog, &used, def.latest_day);
        assert!(closing.iter().all(|d| d.id != def.id));
    }

    #[test]
    fn accurate_hint_names_the_favorite() {
        let def = rate_decision();
        let mut rng = StdRng::seed_from_u64(52);
        let hint = prediction_hint(&mut rng, &def, 0.0);
        assert_eq!(
            hint,
            Some(PredictionHint {
                favored: "Hold".to_owned(),
                probability: 0.6,
            })
        );
    }

    #[test]
    fn missed_hint_names_another_outcome_with_same_odds() {
        let def = rate_decision();
        let mut rng = StdRng::seed_from_u64(53);
        for _ in 0..50 {
            let hint = prediction_hint(&mut rng, &def, 1.0);
            assert!(hint.as_ref().is_some_and(|h| h.favored != "Hold"));
            assert!(hint.is_some_and(|h| (h.probability - 0.6).abs() < 1e-12));
        }
    }

    #[test]
    fn announcement_schedules_resolution() {
        let def = rate_decision();
        let config = EngineConfig::default().scheduled;
        let mut rng = StdRng::seed_from_u64(54);
        let (active, headline) = announce(&mut rng, &def, 4, &config);
        assert_eq!(active.resolve_day, 7);
        assert_eq!(headline.kind, HeadlineKind::ScheduledAnnouncement);
        assert!(headline.prediction.is_some());

        let resolution = resolve(&mut rng, &def, 7);
        assert_eq!(resolution.kind, HeadlineKind::ScheduledResolution);
        assert!(resolution.text.starts_with("Fed decides"));
    }
}
