//! Shared fixtures for the engine integration tests.

#![allow(dead_code, clippy::panic)]

use bullrun_catalog::{Catalog, CatalogFile};
use bullrun_core::config::PhaseValues;
use bullrun_core::{DayOutcome, EngineConfig, GameState, NarrativeEngine};
use bullrun_types::{Asset, AssetId, Category, Effects, PoolEntry, PoolId};
use rust_decimal_macros::dec;

pub fn asset(id: &str, sector: Category) -> Asset {
    Asset {
        id: AssetId::new(id),
        name: format!("{id} Holdings"),
        sector,
        base_price: dec!(50.00),
        volatility: 0.02,
    }
}

pub fn effects(pairs: &[(&str, f64)]) -> Effects {
    pairs
        .iter()
        .map(|(asset, value)| (AssetId::new(*asset), *value))
        .collect()
}

/// A catalog file with two assets, the given category weights and a quiet
/// pool, and nothing else.
pub fn base_file(weights: &[(Category, f64)]) -> CatalogFile {
    CatalogFile {
        assets: vec![asset("NOVA", Category::Tech), asset("HBNK", Category::Finance)],
        category_weights: weights.iter().copied().collect(),
        quiet: (1..=3)
            .map(|n| PoolEntry {
                id: PoolId::new(format!("quiet-{n}")),
                headline: format!("Quiet session number {n}"),
            })
            .collect(),
        ..CatalogFile::default()
    }
}

/// Defaults with every spontaneous roll switched off.
pub fn still_config() -> EngineConfig {
    let mut config = EngineConfig::default();
    config.events.base_probability = 0.0;
    config.events.flavor_chance = 0.0;
    config.chains.base_start_probability = 0.0;
    config.stories.phase_chance = PhaseValues::uniform(0.0);
    config.stories.staleness_start_days = 100;
    config.stories.staleness_full_days = 200;
    config.scheduled.announce_chance = 0.0;
    config.director.event_boost = PhaseValues::uniform(0.0);
    config.director.debt_event_boost = 0.0;
    config
}

pub fn engine(file: CatalogFile, config: EngineConfig) -> NarrativeEngine {
    let catalog = Catalog::new(file).unwrap_or_else(|err| panic!("fixture catalog: {err}"));
    NarrativeEngine::new(catalog, config).unwrap_or_else(|err| panic!("fixture engine: {err}"))
}

pub fn builtin_engine() -> NarrativeEngine {
    NarrativeEngine::from_config(EngineConfig::default())
        .unwrap_or_else(|err| panic!("builtin engine: {err}"))
}

/// Resolve `days` days from `state`, returning every outcome.
pub fn play(engine: &NarrativeEngine, mut state: GameState, days: u32) -> Vec<DayOutcome> {
    let mut outcomes = Vec::new();
    for _ in 0..days {
        let outcome = engine.resolve_next_day(&state, &[]);
        state = outcome.state.clone();
        outcomes.push(outcome);
    }
    outcomes
}

/// The outcome for `day` (1-indexed).
pub fn day(outcomes: &[DayOutcome], day: u32) -> &DayOutcome {
    outcomes
        .iter()
        .find(|outcome| outcome.day == day)
        .unwrap_or_else(|| panic!("no outcome for day {day}"))
}
