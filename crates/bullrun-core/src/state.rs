//! Persistent game state carried between days.
//!
//! [`GameState`] is plain data: the engine clones it at the start of a day,
//! mutates the clone through the pipeline and hands it back in the
//! [`DayOutcome`](crate::pipeline::DayOutcome). It serializes to JSON so a
//! save file can resume a game exactly.

use std::collections::{BTreeMap, BTreeSet};

use bullrun_catalog::Catalog;
use bullrun_types::{
    AssetId, Candle, Category, ChainId, EventId, PoolId, Rumor, ScheduledId, StoryId,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::chain::ActiveChain;
use crate::clock::{ClockError, GameClock, phase_of};
use crate::director::{DirectorState, DirectorView};
use crate::mood::MoodLedger;
use crate::scheduled::ActiveScheduled;
use crate::selector::ActiveEscalation;
use crate::story::ActiveStory;

/// Catalog ids already consumed this game. Nothing in here fires again.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsedIds {
    /// Fired single events.
    pub events: BTreeSet<EventId>,
    /// Started chains.
    pub chains: BTreeSet<ChainId>,
    /// Started stories.
    pub stories: BTreeSet<StoryId>,
    /// Announced scheduled events.
    pub scheduled: BTreeSet<ScheduledId>,
    /// Shown flavor headlines.
    pub flavor: BTreeSet<PoolId>,
    /// Shown quiet-day headlines.
    pub quiet: BTreeSet<PoolId>,
}

/// Everything the engine remembers between days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Seed the per-day RNG streams derive from.
    pub seed: u64,
    /// Last resolved day (0 before the first day).
    pub day: u32,
    /// Game length in days.
    pub total_days: u32,
    /// Latest close per asset.
    pub prices: BTreeMap<AssetId, Decimal>,
    /// Latest candle per asset.
    pub candles: BTreeMap<AssetId, Candle>,
    /// Chains awaiting resolution.
    pub active_chains: Vec<ActiveChain>,
    /// Running stories.
    pub active_stories: Vec<ActiveStory>,
    /// Announced scheduled event awaiting resolution.
    pub active_scheduled: Option<ActiveScheduled>,
    /// Live escalation boosts.
    pub escalations: Vec<ActiveEscalation>,
    /// Category cooldowns: blocked through the stored day.
    pub cooldowns: BTreeMap<Category, u32>,
    /// Per-asset mood tags.
    pub moods: MoodLedger,
    /// Pacing controller.
    pub director: DirectorState,
    /// Consumed catalog ids.
    pub used: UsedIds,
    /// Day the last story started (0 if none has).
    pub last_story_start_day: u32,
}

impl GameState {
    /// A fresh game at day 0 with every asset at its base price.
    pub fn new(catalog: &Catalog, total_days: u32, seed: u64) -> Self {
        let prices = catalog
            .assets()
            .iter()
            .map(|asset| (asset.id.clone(), asset.base_price))
            .collect();
        Self {
            seed,
            day: 0,
            total_days,
            prices,
            candles: BTreeMap::new(),
            active_chains: Vec::new(),
            active_stories: Vec::new(),
            active_scheduled: None,
            escalations: Vec::new(),
            cooldowns: BTreeMap::new(),
            moods: MoodLedger::new(),
            director: DirectorState::new(),
            used: UsedIds::default(),
            last_story_start_day: 0,
        }
    }

    /// Clock positioned at the last resolved day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError`] if the stored day and length are inconsistent.
    pub fn clock(&self) -> Result<GameClock, ClockError> {
        GameClock::from_parts(self.day, self.total_days)
    }

    /// Whether the final day has been resolved.
    pub const fn is_finished(&self) -> bool {
        self.day >= self.total_days
    }

    /// Latest close for `asset`.
    pub fn price(&self, asset: &AssetId) -> Option<Decimal> {
        self.prices.get(asset).copied()
    }

    /// Categories no new content may use on `day`: those held by an
    /// active chain or story, plus those cooling down.
    pub fn blocked_on(&self, day: u32) -> BTreeSet<Category> {
        let mut blocked: BTreeSet<Category> = self
            .active_chains
            .iter()
            .map(|chain| chain.category)
            .chain(self.active_stories.iter().map(|story| story.category))
            .collect();
        blocked.extend(
            self.cooldowns
                .iter()
                .filter(|(_, until)| **until >= day)
                .map(|(category, _)| *category),
        );
        blocked
    }

    /// Categories blocked for the next day to be resolved.
    pub fn blocked_categories(&self) -> BTreeSet<Category> {
        self.blocked_on(self.day.saturating_add(1))
    }

    /// Block `category` through `until`, keeping any longer cooldown.
    pub fn block_category(&mut self, category: Category, until: u32) {
        let entry = self.cooldowns.entry(category).or_insert(until);
        *entry = (*entry).max(until);
    }

    /// Read-only Director view for the next day to be resolved.
    pub fn director_view(&self) -> DirectorView {
        self.director
            .view(phase_of(self.day.saturating_add(1), self.total_days))
    }

    /// Rumors of every chain awaiting resolution.
    pub fn rumors(&self) -> Vec<Rumor> {
        self.active_chains.iter().map(ActiveChain::rumor).collect()
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use bullrun_types::Phase;
    use rust_decimal_macros::dec;

    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().unwrap_or_else(|err| panic!("builtin catalog: {err}"))
    }

    #[test]
    fn new_game_starts_at_base_prices() {
        let catalog = catalog();
        let state = GameState::new(&catalog, 30, 7);
        assert_eq!(state.day, 0);
        assert_eq!(state.prices.len(), catalog.assets().len());
        assert_eq!(state.price(&AssetId::new("NOVA")), Some(dec!(142.50)));
        assert!(!state.is_finished());
        assert_eq!(state.director_view().phase, Phase::Setup);
    }

    #[test]
    fn blocking_combines_narratives_and_cooldowns() {
        let catalog = catalog();
        let mut state = GameState::new(&catalog, 30, 7);
        state.day = 5;
        state.active_chains.push(ActiveChain {
            chain_id: ChainId::new("nova-acquisition"),
            category: Category::Tech,
            rumor: "Nova said to explore a sale".to_owned(),
            start_day: 4,
            days_remaining: 2,
        });
        state.block_category(Category::Energy, 6);
        state.block_category(Category::Energy, 5);

        let blocked = state.blocked_categories();
        assert!(blocked.contains(&Category::Tech));
        assert!(blocked.contains(&Category::Energy));
        assert!(!state.blocked_on(7).contains(&Category::Energy));
        assert_eq!(state.rumors().len(), 1);
    }

    #[test]
    fn state_round_trips_through_json() {
        let catalog = catalog();
        let mut state = GameState::new(&catalog, 30, 99);
        state.used.events.insert(EventId::new("opec-cut"));
        state.block_category(Category::Macro, 4);

        let json = serde_json::to_string(&state).unwrap_or_default();
        let back: Result<GameState, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(state));
    }
}
