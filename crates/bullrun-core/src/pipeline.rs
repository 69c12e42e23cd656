//! Daily pipeline: resolves one game day from the previous state.
//!
//! Each call to [`NarrativeEngine::advance_day`] runs these steps in order:
//!
//! 1. **Deferred** -- merge externally queued effects due today.
//! 2. **Stories** -- advance every running story by one stage.
//! 3. **Scheduled** -- resolve the pending scheduled event if due, otherwise
//!    possibly announce a new one.
//! 4. **Chains** -- count down active chains and resolve those at zero.
//! 5. **New content** -- start a chain, start a story or fire one event, at
//!    most one of the three. A forcing Director tries its phase's kind first
//!    and falls back to the others.
//! 6. **Flavor** -- maybe add a zero-effect flavor headline.
//! 7. **Quiet** -- if nothing newsworthy happened, add a quiet-day headline.
//! 8. **Merge** -- sum every per-asset effect collected today.
//! 9. **Prices** -- move every asset, in catalog order.
//! 10. **Bookkeeping** -- prune moods, escalations and cooldowns, then fold
//!     the day into the Director.
//! 11. **Outcome** -- assemble the [`DayOutcome`].
//!
//! The pipeline never fails. Given the same state, RNG stream and deferred
//! effects it always produces the same outcome.

use std::collections::BTreeMap;

use bullrun_catalog::Catalog;
use bullrun_types::{
    AssetId, Category, ChainId, DeferredEffect, Effects, EventId, ForcedContent, Headline,
    HeadlineKind, Phase, PoolEntry, PriceDelta, Rumor, ScheduledId, Sentiment, StoryId,
    total_magnitude,
};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::chain::{self, ActiveChain};
use crate::clock::{GameClock, phase_of};
use crate::config::{EngineConfig, MAX_CONCURRENT_CHAINS, MAX_CONCURRENT_STORIES};
use crate::director::{ContentSignal, DirectorModifiers};
use crate::error::EngineError;
use crate::price;
use crate::rng::day_rng;
use crate::scheduled;
use crate::selector::{self, ActiveEscalation, EventQuery};
use crate::state::GameState;
use crate::story;
use crate::weighted;

/// What happened on one day, beyond the headlines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayActivity {
    /// Deferred effects merged today.
    pub deferred_applied: u32,
    /// Stories that showed a stage today (not counting a new start).
    pub stories_advanced: Vec<StoryId>,
    /// Stories that ended today.
    pub stories_finished: Vec<StoryId>,
    /// Scheduled event announced today.
    pub scheduled_announced: Option<ScheduledId>,
    /// Scheduled event resolved today.
    pub scheduled_resolved: Option<ScheduledId>,
    /// Chains resolved today.
    pub chains_resolved: Vec<ChainId>,
    /// Chain started today.
    pub chain_started: Option<ChainId>,
    /// Story started today.
    pub story_started: Option<StoryId>,
    /// Single event fired today.
    pub event_fired: Option<EventId>,
    /// Content kind the Director forced, if any fired.
    pub forced: Option<ForcedContent>,
    /// Event candidates skipped for contradicting a live mood.
    pub mood_skips: u32,
    /// Whether a flavor headline ran.
    pub flavor: bool,
    /// Whether the quiet-day filler ran.
    pub quiet: bool,
}

/// Result of resolving one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOutcome {
    /// Day that was resolved.
    pub day: u32,
    /// Its phase.
    pub phase: Phase,
    /// State after the day.
    pub state: GameState,
    /// Headlines in the order they were produced.
    pub headlines: Vec<Headline>,
    /// Price movement of every asset.
    pub price_deltas: BTreeMap<AssetId, PriceDelta>,
    /// Category of today's new chain, story or event.
    pub used_category_today: Option<Category>,
    /// Rumors of every chain still awaiting resolution.
    pub rumors: Vec<Rumor>,
    /// Activity summary.
    pub activity: DayActivity,
}

/// The narrative engine: an immutable catalog and configuration.
///
/// All game progress lives in [`GameState`], so one engine can drive any
/// number of games.
#[derive(Debug, Clone)]
pub struct NarrativeEngine {
    catalog: Catalog,
    config: EngineConfig,
}

impl NarrativeEngine {
    /// Build an engine from a validated catalog and a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the configuration is out of range.
    pub fn new(catalog: Catalog, config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let clock = GameClock::new(config.game.total_days)?;
        info!(
            total_days = clock.total_days(),
            seed = config.game.seed,
            assets = catalog.assets().len(),
            events = catalog.events().len(),
            chains = catalog.chains().len(),
            stories = catalog.stories().len(),
            scheduled = catalog.scheduled().len(),
            "Narrative engine ready"
        );
        Ok(Self { catalog, config })
    }

    /// Build an engine, loading the catalog named by `catalog.path` or the
    /// built-in one.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] if the catalog cannot be loaded or the
    /// configuration is out of range.
    pub fn from_config(config: EngineConfig) -> Result<Self, EngineError> {
        let catalog = match &config.catalog.path {
            Some(path) => {
                info!(path = %path.display(), "Loading catalog");
                Catalog::from_file(path)?
            }
            None => Catalog::builtin()?,
        };
        Self::new(catalog, config)
    }

    /// The content catalog.
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The engine configuration.
    pub const fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// A fresh game using the configured length and seed.
    pub fn new_game(&self) -> GameState {
        self.new_game_with_seed(self.config.game.seed)
    }

    /// A fresh game using the configured length and an explicit seed.
    pub fn new_game_with_seed(&self, seed: u64) -> GameState {
        GameState::new(&self.catalog, self.config.game.total_days, seed)
    }

    /// Resolve the next day using the state's own per-day RNG stream.
    pub fn resolve_next_day(&self, state: &GameState, deferred: &[DeferredEffect]) -> DayOutcome {
        let mut rng = day_rng(state.seed, state.day.saturating_add(1));
        self.advance_day(state, &mut rng, deferred)
    }

    /// Resolve the day after `state.day`.
    ///
    /// `deferred` may hold effects for any day; only those due on or before
    /// the resolved day are merged.
    pub fn advance_day<R: Rng + ?Sized>(
        &self,
        state: &GameState,
        rng: &mut R,
        deferred: &[DeferredEffect],
    ) -> DayOutcome {
        let day = state.day.saturating_add(1);
        if day > state.total_days {
            warn!(day, total_days = state.total_days, "Resolving a day past the end of the game");
        }
        let phase = phase_of(day, state.total_days);
        let modifiers = state.director.modifiers(phase, day, &self.config);
        let mut ctx = DayContext::new(self, state, day, phase);

        // --- Step 1: Deferred effects ---
        ctx.stage_deferred(deferred);

        // --- Step 2: Stories ---
        ctx.stage_stories(rng);

        // --- Step 3: Scheduled events ---
        ctx.stage_scheduled(rng);

        // --- Step 4: Chain countdown ---
        ctx.stage_chains(rng);

        // --- Step 5: New content ---
        ctx.stage_new_content(rng, &modifiers);

        // --- Step 6: Flavor ---
        ctx.stage_flavor(rng);

        // --- Step 7: Quiet filler ---
        ctx.stage_quiet(rng);

        // --- Step 8: Merge effects ---
        let merged = ctx.merged_effects();

        // --- Step 9: Prices ---
        let price_deltas = ctx.stage_prices(rng, &merged);

        // --- Step 10: Bookkeeping ---
        ctx.stage_bookkeeping();

        // --- Step 11: Outcome ---
        ctx.finish(price_deltas)
    }
}

/// Order in which content kinds are tried when `forced` is due.
const fn fallback_order(forced: ForcedContent) -> [ForcedContent; 3] {
    match forced {
        ForcedContent::Chain => [ForcedContent::Chain, ForcedContent::Story, ForcedContent::Event],
        ForcedContent::Story => [ForcedContent::Story, ForcedContent::Chain, ForcedContent::Event],
        ForcedContent::Event => [ForcedContent::Event, ForcedContent::Chain, ForcedContent::Story],
    }
}

/// Working set for one day.
struct DayContext<'a> {
    catalog: &'a Catalog,
    config: &'a EngineConfig,
    day: u32,
    phase: Phase,
    /// State being built for the end of the day.
    next: GameState,
    headlines: Vec<Headline>,
    /// Per-asset effects from every source, in the order they fired.
    contributions: Vec<Effects>,
    signals: Vec<ContentSignal>,
    activity: DayActivity,
    used_category_today: Option<Category>,
}

impl<'a> DayContext<'a> {
    fn new(engine: &'a NarrativeEngine, state: &GameState, day: u32, phase: Phase) -> Self {
        let mut next = state.clone();
        next.day = day;
        Self {
            catalog: &engine.catalog,
            config: &engine.config,
            day,
            phase,
            next,
            headlines: Vec::new(),
            contributions: Vec::new(),
            signals: Vec::new(),
            activity: DayActivity::default(),
            used_category_today: None,
        }
    }

    /// Record a headline, its effects and its mood tags.
    fn emit(&mut self, headline: Headline, narrative_start: bool) {
        if headline.kind.is_newsworthy() {
            self.signals.push(ContentSignal {
                kind: Some(headline.kind),
                category: headline.category,
                sentiment: headline.sentiment,
                magnitude: total_magnitude(&headline.effects),
                narrative_start,
            });
        }
        self.apply_effects(&headline.effects);
        self.headlines.push(headline);
    }

    fn apply_effects(&mut self, effects: &Effects) {
        if effects.is_empty() {
            return;
        }
        self.next.moods.record_effects(effects, self.day);
        self.contributions.push(effects.clone());
    }

    fn cool_down(&mut self, category: Category, days: u32) {
        if days > 0 {
            self.next
                .block_category(category, self.day.saturating_add(days));
        }
    }

    fn has_chain_capacity(&self) -> bool {
        let limit = self.config.chains.max_concurrent.min(MAX_CONCURRENT_CHAINS);
        u32::try_from(self.next.active_chains.len()).unwrap_or(u32::MAX) < limit
    }

    fn has_story_capacity(&self) -> bool {
        let limit = self.config.stories.max_concurrent.min(MAX_CONCURRENT_STORIES);
        u32::try_from(self.next.active_stories.len()).unwrap_or(u32::MAX) < limit
    }

    /// Step 1: merge deferred effects due today.
    fn stage_deferred(&mut self, deferred: &[DeferredEffect]) {
        let today = self.day;
        for entry in deferred.iter().filter(|entry| entry.due_day <= today) {
            if entry.due_day < today {
                debug!(
                    day = self.day,
                    due_day = entry.due_day,
                    source = %entry.source,
                    "Applying overdue deferred effect"
                );
            }

            let mut effects = Effects::new();
            for (asset, value) in &entry.effects {
                if self.catalog.asset(asset).is_none() {
                    warn!(
                        day = self.day,
                        %asset,
                        source = %entry.source,
                        "Dropping deferred effect on unknown asset"
                    );
                    continue;
                }
                if value.is_finite() {
                    effects.insert(asset.clone(), *value);
                }
            }

            self.activity.deferred_applied = self.activity.deferred_applied.saturating_add(1);
            match &entry.headline {
                Some(text) => {
                    let mut headline = Headline::new(self.day, HeadlineKind::Deferred, text.clone())
                        .with_effects(effects)
                        .with_source(entry.source.clone());
                    if let Some(category) = entry.category {
                        headline = headline.with_category(category);
                    }
                    self.emit(headline, false);
                }
                None => self.apply_effects(&effects),
            }
        }
    }

    /// Step 2: show the next stage of every running story.
    fn stage_stories<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let stories = std::mem::take(&mut self.next.active_stories);
        for mut active in stories {
            if active.last_advance_day >= self.day {
                self.next.active_stories.push(active);
                continue;
            }

            let step = story::advance(
                rng,
                &mut active,
                self.catalog,
                self.day,
                &self.next.moods,
                &self.next.director.ripples,
                self.config,
            );
            self.activity.stories_advanced.push(active.story_id.clone());
            self.emit(step.headline, false);

            if step.finished {
                debug!(day = self.day, story_id = %active.story_id, "Story finished");
                self.cool_down(active.category, self.config.stories.cooldown_days);
                self.activity.stories_finished.push(active.story_id);
            } else {
                self.next.active_stories.push(active);
            }
        }
    }

    /// Step 3: resolve the pending scheduled event, or maybe announce one.
    fn stage_scheduled<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.resolve_or_announce(rng);
        for def in scheduled::lapsing(self.catalog, &self.next.used.scheduled, self.day) {
            warn!(
                day = self.day,
                scheduled_id = %def.id,
                "Scheduled window closed before announcement"
            );
        }
    }

    fn resolve_or_announce<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if let Some(active) = self.next.active_scheduled.take() {
            if active.resolve_day > self.day {
                self.next.active_scheduled = Some(active);
                return;
            }

            let headline = match self.catalog.scheduled_event(&active.scheduled_id) {
                Some(def) => scheduled::resolve(rng, def, self.day),
                None => {
                    warn!(
                        day = self.day,
                        scheduled_id = %active.scheduled_id,
                        "Pending scheduled event missing from catalog"
                    );
                    scheduled::stale_headline(&active, self.day)
                }
            };
            debug!(day = self.day, scheduled_id = %active.scheduled_id, "Scheduled event resolved");
            self.emit(headline, false);
            self.activity.scheduled_resolved = Some(active.scheduled_id);
            return;
        }

        let candidates = scheduled::candidates(
            self.catalog,
            &self.next.used.scheduled,
            self.day,
            self.next.total_days,
        );
        let Some(def) =
            scheduled::choose_announcement(rng, &candidates, self.day, &self.config.scheduled)
        else {
            return;
        };

        let (active, headline) = scheduled::announce(rng, def, self.day, &self.config.scheduled);
        debug!(
            day = self.day,
            scheduled_id = %def.id,
            resolve_day = active.resolve_day,
            "Scheduled event announced"
        );
        self.next.used.scheduled.insert(def.id.clone());
        self.next.active_scheduled = Some(active);
        self.activity.scheduled_announced = Some(def.id.clone());
        self.emit(headline, false);
    }

    /// Step 4: count down chains and resolve those that reach zero.
    fn stage_chains<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let chains = std::mem::take(&mut self.next.active_chains);
        for mut active in chains {
            active.days_remaining = active.days_remaining.saturating_sub(1);
            if active.days_remaining > 0 {
                self.next.active_chains.push(active);
                continue;
            }

            let headline = match self.catalog.chain(&active.chain_id) {
                Some(def) => {
                    let outcome = chain::resolve(
                        rng,
                        def,
                        self.day,
                        &self.next.moods,
                        &self.next.director.ripples,
                        self.config,
                    );
                    match outcome {
                        Some(outcome) => {
                            debug!(
                                day = self.day,
                                chain_id = %def.id,
                                outcome = %outcome.label,
                                "Chain resolved"
                            );
                            chain::resolution_headline(def, outcome, self.day)
                        }
                        None => {
                            warn!(
                                day = self.day,
                                chain_id = %def.id,
                                "Chain had no resolvable outcome"
                            );
                            chain::stale_headline(&active, self.day)
                        }
                    }
                }
                None => {
                    warn!(
                        day = self.day,
                        chain_id = %active.chain_id,
                        "Active chain missing from catalog"
                    );
                    chain::stale_headline(&active, self.day)
                }
            };

            self.emit(headline, false);
            self.cool_down(active.category, self.config.chains.cooldown_days);
            self.activity.chains_resolved.push(active.chain_id);
        }
    }

    /// Step 5: at most one new chain, story or event.
    fn stage_new_content<R: Rng + ?Sized>(&mut self, rng: &mut R, modifiers: &DirectorModifiers) {
        let blocked = self.next.blocked_on(self.day);
        let weights = selector::category_weights(
            self.catalog,
            &blocked,
            &self.next.escalations,
            modifiers,
            self.day,
        );

        if let Some(forced) = modifiers.forced {
            for kind in fallback_order(forced) {
                if self.try_start(kind, rng, &weights) {
                    info!(day = self.day, ?forced, fired = ?kind, "Director forced content");
                    self.activity.forced = Some(kind);
                    return;
                }
            }
            warn!(day = self.day, ?forced, "Director forced content but nothing was eligible");
            return;
        }

        let chain_probability =
            self.config.chains.base_start_probability * modifiers.chain_probability_multiplier;
        if self.has_chain_capacity()
            && weighted::chance(rng, chain_probability)
            && self.try_chain(rng, &weights)
        {
            return;
        }

        let story_probability = story::start_chance(
            self.phase,
            self.day,
            self.next.last_story_start_day,
            &self.config.stories,
        );
        if self.has_story_capacity()
            && weighted::chance(rng, story_probability)
            && self.try_story(rng, &weights)
        {
            return;
        }

        let event_probability =
            self.config.events.base_probability + modifiers.event_probability_boost;
        if weighted::chance(rng, event_probability) {
            self.try_event(rng, &weights);
        }
    }

    fn try_start<R: Rng + ?Sized>(
        &mut self,
        kind: ForcedContent,
        rng: &mut R,
        weights: &[(Category, f64)],
    ) -> bool {
        match kind {
            ForcedContent::Chain => self.try_chain(rng, weights),
            ForcedContent::Story => self.try_story(rng, weights),
            ForcedContent::Event => self.try_event(rng, weights),
        }
    }

    fn try_chain<R: Rng + ?Sized>(&mut self, rng: &mut R, weights: &[(Category, f64)]) -> bool {
        if !self.has_chain_capacity() {
            return false;
        }
        let candidates = chain::eligible(
            self.catalog,
            &self.next.used.chains,
            weights,
            self.day,
            self.next.total_days,
        );
        let Some(def) = weighted::pick(rng, &candidates).copied() else {
            return false;
        };

        debug!(
            day = self.day,
            chain_id = %def.id,
            category = %def.category,
            duration_days = def.duration_days,
            "Chain started"
        );
        self.next.used.chains.insert(def.id.clone());
        self.next.active_chains.push(ActiveChain::start(def, self.day));
        self.signals.push(ContentSignal {
            kind: None,
            category: Some(def.category),
            sentiment: Sentiment::Neutral,
            magnitude: 0.0,
            narrative_start: true,
        });
        self.activity.chain_started = Some(def.id.clone());
        self.used_category_today = Some(def.category);
        true
    }

    fn try_story<R: Rng + ?Sized>(&mut self, rng: &mut R, weights: &[(Category, f64)]) -> bool {
        if !self.has_story_capacity() {
            return false;
        }
        let candidates = story::eligible(
            self.catalog,
            &self.next.used.stories,
            weights,
            self.day,
            self.next.total_days,
        );
        let Some(def) = weighted::pick(rng, &candidates).copied() else {
            return false;
        };

        debug!(day = self.day, story_id = %def.id, category = %def.category, "Story started");
        let (active, headline) = story::start(def, self.day);
        self.next.used.stories.insert(def.id.clone());
        self.next.active_stories.push(active);
        self.next.last_story_start_day = self.day;
        self.activity.story_started = Some(def.id.clone());
        self.used_category_today = Some(def.category);
        self.emit(headline, true);
        true
    }

    fn try_event<R: Rng + ?Sized>(&mut self, rng: &mut R, weights: &[(Category, f64)]) -> bool {
        let event_weights = selector::event_weights(weights, self.catalog, &self.next.used.events);
        let query = EventQuery {
            catalog: self.catalog,
            weights: &event_weights,
            used: &self.next.used.events,
            moods: &self.next.moods,
            day: self.day,
            mood_window: self.config.mood.decay_days,
            max_rerolls: self.config.events.max_rerolls,
        };
        let selection = selector::select_event(rng, &query);
        self.activity.mood_skips = self.activity.mood_skips.saturating_add(selection.skipped);

        let Some(event) = selection.event else {
            debug!(day = self.day, skipped = selection.skipped, "No event fired");
            return false;
        };

        self.next.used.events.insert(event.id.clone());
        if let Some(escalation) = ActiveEscalation::from_event(event, self.day) {
            debug!(
                day = self.day,
                event_id = %event.id,
                expires_day = escalation.expires_day,
                "Escalation registered"
            );
            self.next.escalations.push(escalation);
        }
        self.activity.event_fired = Some(event.id.clone());
        self.used_category_today = Some(event.category);

        let headline = Headline::new(self.day, HeadlineKind::Event, event.headline.clone())
            .with_category(event.category)
            .with_effects(event.effects.clone())
            .with_source(event.id.as_str());
        self.emit(headline, false);
        true
    }

    /// Step 6: maybe one unused flavor headline.
    fn stage_flavor<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if !weighted::chance(rng, self.config.events.flavor_chance) {
            return;
        }
        let unused: Vec<&PoolEntry> = self
            .catalog
            .flavor()
            .iter()
            .filter(|entry| !self.next.used.flavor.contains(&entry.id))
            .collect();
        let Some(entry) = unused.choose(rng).copied() else {
            return;
        };

        self.next.used.flavor.insert(entry.id.clone());
        self.activity.flavor = true;
        let headline = Headline::new(self.day, HeadlineKind::Flavor, entry.headline.clone())
            .with_source(entry.id.as_str());
        self.emit(headline, false);
    }

    /// Step 7: quiet-day filler when nothing newsworthy happened.
    fn stage_quiet<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let had_news = self.activity.chain_started.is_some()
            || self.headlines.iter().any(|h| h.kind.is_newsworthy());
        if had_news {
            return;
        }

        let pool = self.catalog.quiet();
        let unused: Vec<&PoolEntry> = pool
            .iter()
            .filter(|entry| !self.next.used.quiet.contains(&entry.id))
            .collect();
        let entry = if unused.is_empty() {
            pool.as_slice().choose(rng)
        } else {
            unused.choose(rng).copied()
        };
        let Some(entry) = entry else {
            return;
        };

        self.next.used.quiet.insert(entry.id.clone());
        self.activity.quiet = true;
        let headline = Headline::new(self.day, HeadlineKind::Quiet, entry.headline.clone())
            .with_source(entry.id.as_str());
        self.emit(headline, false);
    }

    /// Step 8: sum every contribution per asset.
    fn merged_effects(&self) -> Effects {
        let mut merged = Effects::new();
        for effects in &self.contributions {
            for (asset, value) in effects {
                *merged.entry(asset.clone()).or_insert(0.0) += value;
            }
        }
        merged
    }

    /// Step 9: move every asset in catalog order.
    fn stage_prices<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        merged: &Effects,
    ) -> BTreeMap<AssetId, PriceDelta> {
        let mut deltas = BTreeMap::new();
        for asset in self.catalog.assets() {
            let open = self
                .next
                .prices
                .get(&asset.id)
                .copied()
                .unwrap_or(asset.base_price);
            let effect = merged.get(&asset.id).copied().unwrap_or(0.0);
            let update = price::update_price(rng, open, asset.volatility, effect, &self.config.price);

            self.next.prices.insert(asset.id.clone(), update.close);
            self.next.candles.insert(asset.id.clone(), update.candle);
            deltas.insert(
                asset.id.clone(),
                PriceDelta {
                    previous: open,
                    current: update.close,
                    change: update.close.saturating_sub(open),
                    effect,
                    candle: update.candle,
                },
            );
        }
        deltas
    }

    /// Step 10: expire short-lived state and update the Director.
    fn stage_bookkeeping(&mut self) {
        let next_day = self.day.saturating_add(1);
        self.next.moods.prune(next_day, self.config.mood.decay_days);
        selector::prune_escalations(&mut self.next.escalations, self.day);
        self.next.cooldowns.retain(|_, until| *until >= next_day);
        self.next
            .director
            .update(self.day, self.phase, &self.signals, self.config);
    }

    /// Step 11: assemble the outcome.
    fn finish(self, price_deltas: BTreeMap<AssetId, PriceDelta>) -> DayOutcome {
        let rumors = self.next.rumors();
        info!(
            day = self.day,
            phase = ?self.phase,
            headlines = self.headlines.len(),
            chains = self.next.active_chains.len(),
            stories = self.next.active_stories.len(),
            debt = self.next.director.dopamine_debt,
            theme = ?self.next.director.active_theme,
            "Day resolved"
        );
        DayOutcome {
            day: self.day,
            phase: self.phase,
            state: self.next,
            headlines: self.headlines,
            price_deltas,
            used_category_today: self.used_category_today,
            rumors,
            activity: self.activity,
        }
    }
}
