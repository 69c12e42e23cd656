//! Whole-game runner.
//!
//! [`run_game`] drives [`NarrativeEngine::resolve_next_day`] from the
//! state's current day to the final day. A [`DayCallback`] supplies the
//! deferred effects for each day and observes every [`DayOutcome`].

use std::collections::BTreeMap;

use bullrun_types::{AssetId, DeferredEffect};
use rust_decimal::Decimal;
use tracing::info;

use crate::pipeline::{DayOutcome, NarrativeEngine};
use crate::state::GameState;

/// Hooks invoked around each resolved day.
pub trait DayCallback {
    /// Effects queued by collaborators for `day`. Defaults to none.
    fn deferred_for(&mut self, _day: u32) -> Vec<DeferredEffect> {
        Vec::new()
    }

    /// Called after a day resolves.
    fn on_day(&mut self, outcome: &DayOutcome);
}

/// A callback that queues nothing and ignores every outcome.
pub struct NoOpCallback;

impl DayCallback for NoOpCallback {
    fn on_day(&mut self, _outcome: &DayOutcome) {}
}

/// Result of a completed game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameSummary {
    /// State after the final day.
    pub final_state: GameState,
    /// Days resolved by this run.
    pub days_played: u32,
    /// Headlines produced by this run.
    pub headline_count: usize,
    /// Closing price per asset.
    pub final_prices: BTreeMap<AssetId, Decimal>,
}

/// Resolve every remaining day of `state`.
pub fn run_game(
    engine: &NarrativeEngine,
    mut state: GameState,
    callback: &mut dyn DayCallback,
) -> GameSummary {
    let mut days_played: u32 = 0;
    let mut headline_count: usize = 0;

    info!(
        seed = state.seed,
        start_day = state.day,
        total_days = state.total_days,
        "Game starting"
    );

    while !state.is_finished() {
        let day = state.day.saturating_add(1);
        let deferred = callback.deferred_for(day);
        let outcome = engine.resolve_next_day(&state, &deferred);
        callback.on_day(&outcome);

        days_played = days_played.saturating_add(1);
        headline_count = headline_count.saturating_add(outcome.headlines.len());
        state = outcome.state;
    }

    info!(days_played, headline_count, "Game finished");

    GameSummary {
        final_prices: state.prices.clone(),
        final_state: state,
        days_played,
        headline_count,
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use bullrun_catalog::Catalog;
    use bullrun_types::{Effects, HeadlineKind};

    use super::*;
    use crate::config::EngineConfig;

    struct Recorder {
        days: Vec<u32>,
        queued_on: u32,
    }

    impl DayCallback for Recorder {
        fn deferred_for(&mut self, day: u32) -> Vec<DeferredEffect> {
            if day != self.queued_on {
                return Vec::new();
            }
            let mut effects = Effects::new();
            effects.insert(AssetId::new("GOLD"), 0.05);
            vec![DeferredEffect {
                due_day: day,
                source: "ability".to_owned(),
                headline: Some("A rival fund dumps its gold".to_owned()),
                category: None,
                effects,
            }]
        }

        fn on_day(&mut self, outcome: &DayOutcome) {
            self.days.push(outcome.day);
            if outcome.day == self.queued_on {
                assert!(outcome.headlines.iter().any(|h| h.kind == HeadlineKind::Deferred));
            }
        }
    }

    fn engine() -> NarrativeEngine {
        let catalog = Catalog::builtin().unwrap_or_else(|err| panic!("builtin catalog: {err}"));
        NarrativeEngine::new(catalog, EngineConfig::default())
            .unwrap_or_else(|err| panic!("engine: {err}"))
    }

    #[test]
    fn plays_every_day_once() {
        let engine = engine();
        let mut recorder = Recorder {
            days: Vec::new(),
            queued_on: 4,
        };
        let summary = run_game(&engine, engine.new_game(), &mut recorder);

        assert_eq!(summary.days_played, 30);
        assert_eq!(recorder.days, (1..=30).collect::<Vec<_>>());
        assert!(summary.final_state.is_finished());
        assert!(summary.headline_count > 0);
        assert_eq!(summary.final_prices.len(), engine.catalog().assets().len());
    }

    #[test]
    fn finished_game_plays_nothing() {
        let engine = engine();
        let mut state = engine.new_game();
        state.day = state.total_days;
        let summary = run_game(&engine, state, &mut NoOpCallback);
        assert_eq!(summary.days_played, 0);
    }
}
