//! Narrative Director: the pacing controller.
//!
//! The Director turns `(phase, dopamine debt, theme, ripples)` into the
//! day's [`DirectorModifiers`] before any content is chosen, and folds the
//! day's fired content back into its state afterwards.
//!
//! # Dopamine debt
//!
//! - A day without significant content adds `debt_per_quiet_day`.
//! - A day with high-impact content (total magnitude at or above
//!   `high_impact_threshold`, a chain start or resolution, or a story beat)
//!   removes `relief`, floored at 0.
//! - Any other day leaves the debt unchanged.
//!
//! Debt at or above `force_threshold` forces the next day to carry content.
//! The forced kind depends on the phase: chains while the arc is building,
//! stories during escalation, single events at the climax and after.
//!
//! # Theme
//!
//! At most one category is the active theme. The first qualifying content
//! (magnitude at or above `theme_threshold`, or any chain or story content)
//! seeds it at full strength. Matching content refreshes it; days without
//! matching content decay it until it expires.
//!
//! # Ripples
//!
//! The day's strongest directional content at or above the ripple threshold
//! leaves a [`Ripple`] in the Director's [`RippleLedger`].

use std::collections::BTreeMap;

use bullrun_types::{Category, ForcedContent, HeadlineKind, Phase, Sentiment};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::EngineConfig;
use crate::ripple::{Ripple, RippleLedger};

/// Themes weaker than this expire.
const MIN_THEME_STRENGTH: f64 = 0.05;

/// Content kind forced in each phase when debt crosses the threshold.
pub const fn forced_kind(phase: Phase) -> ForcedContent {
    match phase {
        Phase::Setup | Phase::RisingAction | Phase::Midpoint => ForcedContent::Chain,
        Phase::Escalation => ForcedContent::Story,
        Phase::Climax | Phase::Resolution => ForcedContent::Event,
    }
}

/// What one piece of fired content tells the Director.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentSignal {
    /// Kind of headline the content produced; `None` for a chain start,
    /// which only posts a rumor.
    pub kind: Option<HeadlineKind>,
    /// Topic, if any.
    pub category: Option<Category>,
    /// Net direction.
    pub sentiment: Sentiment,
    /// Total absolute effect.
    pub magnitude: f64,
    /// Whether the content started a chain or story.
    pub narrative_start: bool,
}

impl ContentSignal {
    /// Whether the content belongs to a chain or story.
    pub const fn is_narrative(&self) -> bool {
        self.narrative_start
            || matches!(
                self.kind,
                Some(
                    HeadlineKind::ChainResolution
                        | HeadlineKind::StoryBeat
                        | HeadlineKind::StoryResolution
                )
            )
    }

    fn is_relieving(&self, config: &EngineConfig) -> bool {
        self.magnitude >= config.director.high_impact_threshold || self.is_narrative()
    }

    fn is_significant(&self, config: &EngineConfig) -> bool {
        self.magnitude >= config.director.significance_threshold || self.is_relieving(config)
    }
}

/// Per-day selection modifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectorModifiers {
    /// Phase of the day being resolved.
    pub phase: Phase,
    /// Added to the base single-event probability.
    pub event_probability_boost: f64,
    /// Multiplies the base chain start probability.
    pub chain_probability_multiplier: f64,
    /// Content kind the day must carry, if debt is high enough.
    pub forced: Option<ForcedContent>,
    /// Multiplier applied to each category's base weight.
    pub category_multipliers: BTreeMap<Category, f64>,
}

impl DirectorModifiers {
    /// Multiplier for one category (1 when absent).
    pub fn category_multiplier(&self, category: Category) -> f64 {
        self.category_multipliers
            .get(&category)
            .copied()
            .unwrap_or(1.0)
    }
}

/// Read-only view of the Director for collaborators outside the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorView {
    /// Phase of the next day to be resolved.
    pub phase: Phase,
    /// Active theme, if any.
    pub theme: Option<Category>,
    /// Strength of the active theme in `[0, 1]`.
    pub theme_strength: f64,
    /// Current dopamine debt.
    pub dopamine_debt: f64,
}

/// Pacing state carried between days.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorState {
    /// Phase of the last resolved day (cached; derived from the day).
    pub phase: Phase,
    /// Pressure toward forcing content, `>= 0`.
    pub dopamine_debt: f64,
    /// Active theme category.
    pub active_theme: Option<Category>,
    /// Theme strength in `[0, 1]`.
    pub theme_strength: f64,
    /// Days before the theme expires without matching content.
    pub theme_days_remaining: u32,
    /// Live ripples.
    pub ripples: RippleLedger,
}

impl Default for DirectorState {
    fn default() -> Self {
        Self::new()
    }
}

impl DirectorState {
    /// A fresh Director: setup phase, no debt, no theme.
    pub const fn new() -> Self {
        Self {
            phase: Phase::Setup,
            dopamine_debt: 0.0,
            active_theme: None,
            theme_strength: 0.0,
            theme_days_remaining: 0,
            ripples: RippleLedger::new(),
        }
    }

    /// Whether the current debt forces content.
    pub fn is_forcing(&self, config: &EngineConfig) -> bool {
        self.dopamine_debt >= config.director.force_threshold
    }

    /// Compute the modifiers for `day`, which falls in `phase`.
    pub fn modifiers(&self, phase: Phase, day: u32, config: &EngineConfig) -> DirectorModifiers {
        let director = &config.director;
        let event_probability_boost = (director.event_boost.get(phase)
            + self.dopamine_debt * director.debt_event_boost)
            .clamp(0.0, 1.0);
        let forced = self.is_forcing(config).then(|| forced_kind(phase));

        let category_multipliers = Category::ALL
            .iter()
            .map(|category| {
                let mut multiplier =
                    self.ripples
                        .category_multiplier(*category, day, config.ripple.category_gain);
                if self.active_theme == Some(*category) {
                    multiplier *= 1.0 + (director.theme_boost - 1.0) * self.theme_strength;
                }
                (*category, multiplier)
            })
            .collect();

        DirectorModifiers {
            phase,
            event_probability_boost,
            chain_probability_multiplier: director.chain_multiplier.get(phase),
            forced,
            category_multipliers,
        }
    }

    /// Read-only view, reporting `next_phase` as the phase.
    pub const fn view(&self, next_phase: Phase) -> DirectorView {
        DirectorView {
            phase: next_phase,
            theme: self.active_theme,
            theme_strength: self.theme_strength,
            dopamine_debt: self.dopamine_debt,
        }
    }

    /// Fold the content fired on `day` into the pacing state.
    pub fn update(
        &mut self,
        day: u32,
        phase: Phase,
        signals: &[ContentSignal],
        config: &EngineConfig,
    ) {
        self.phase = phase;
        self.update_debt(signals, config);
        self.update_theme(signals, config);
        self.update_ripples(day, signals, config);

        debug!(
            day,
            ?phase,
            debt = self.dopamine_debt,
            theme = ?self.active_theme,
            theme_strength = self.theme_strength,
            ripples = self.ripples.len(),
            "Director updated"
        );
    }

    fn update_debt(&mut self, signals: &[ContentSignal], config: &EngineConfig) {
        let director = &config.director;
        let relieving = signals.iter().any(|s| s.is_relieving(config));
        let significant = signals.iter().any(|s| s.is_significant(config));

        if !significant {
            self.dopamine_debt =
                (self.dopamine_debt + director.debt_per_quiet_day).min(director.max_debt);
        } else if relieving {
            self.dopamine_debt = (self.dopamine_debt - director.relief).max(0.0);
        }
    }

    fn update_theme(&mut self, signals: &[ContentSignal], config: &EngineConfig) {
        let director = &config.director;

        if let Some(theme) = self.active_theme {
            if signals.iter().any(|s| s.category == Some(theme)) {
                self.theme_strength = (self.theme_strength + director.theme_refresh).min(1.0);
                self.theme_days_remaining = director.theme_duration_days;
            } else {
                self.theme_strength *= 1.0 - director.theme_decay;
                self.theme_days_remaining = self.theme_days_remaining.saturating_sub(1);
                if self.theme_days_remaining == 0 || self.theme_strength < MIN_THEME_STRENGTH {
                    debug!(?theme, "Theme expired");
                    self.active_theme = None;
                    self.theme_strength = 0.0;
                    self.theme_days_remaining = 0;
                }
            }
            return;
        }

        let seed = signals
            .iter()
            .filter(|s| s.magnitude >= director.theme_threshold || s.is_narrative())
            .filter_map(|s| s.category.map(|category| (category, s.magnitude)))
            .max_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((category, _)) = seed {
            debug!(?category, "Theme seeded");
            self.active_theme = Some(category);
            self.theme_strength = 1.0;
            self.theme_days_remaining = director.theme_duration_days;
        }
    }

    fn update_ripples(&mut self, day: u32, signals: &[ContentSignal], config: &EngineConfig) {
        let ripple = &config.ripple;
        self.ripples.prune(day);

        let strongest = signals
            .iter()
            .filter(|s| s.sentiment != Sentiment::Neutral && s.magnitude >= ripple.threshold)
            .filter_map(|s| s.category.map(|category| (category, s)))
            .max_by(|a, b| a.1.magnitude.total_cmp(&b.1.magnitude));
        if let Some((category, signal)) = strongest {
            self.ripples.add(
                Ripple {
                    category,
                    sentiment: signal.sentiment,
                    magnitude: signal.magnitude,
                    created_day: day,
                    half_life_days: ripple.half_life_days,
                },
                ripple.cancel_fraction,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(category: Category, magnitude: f64, sentiment: Sentiment) -> ContentSignal {
        ContentSignal {
            kind: Some(HeadlineKind::Event),
            category: Some(category),
            sentiment,
            magnitude,
            narrative_start: false,
        }
    }

    #[test]
    fn quiet_days_accumulate_debt_until_forced() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();
        for day in 1..=3 {
            assert!(!director.is_forcing(&config));
            director.update(day, Phase::Setup, &[], &config);
        }
        assert!((director.dopamine_debt - 3.0).abs() < 1e-12);
        assert!(director.is_forcing(&config));
        let modifiers = director.modifiers(Phase::RisingAction, 4, &config);
        assert_eq!(modifiers.forced, Some(ForcedContent::Chain));
    }

    #[test]
    fn debt_is_capped() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();
        for day in 1..=40 {
            director.update(day, Phase::Setup, &[], &config);
        }
        assert!((director.dopamine_debt - config.director.max_debt).abs() < 1e-12);
    }

    #[test]
    fn high_impact_relieves_and_small_news_holds() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();
        director.dopamine_debt = 2.0;

        // Significant but not high-impact: unchanged.
        director.update(1, Phase::Setup, &[event(Category::Tech, 0.05, Sentiment::Bullish)], &config);
        assert!((director.dopamine_debt - 2.0).abs() < 1e-12);

        // High-impact: relief, floored at zero.
        director.update(2, Phase::Setup, &[event(Category::Tech, 0.2, Sentiment::Bullish)], &config);
        assert!((director.dopamine_debt - 0.5).abs() < 1e-12);
        director.update(3, Phase::Setup, &[event(Category::Tech, 0.2, Sentiment::Bullish)], &config);
        assert!(director.dopamine_debt.abs() < 1e-12);
    }

    #[test]
    fn forced_kind_follows_phase() {
        assert_eq!(forced_kind(Phase::Setup), ForcedContent::Chain);
        assert_eq!(forced_kind(Phase::Midpoint), ForcedContent::Chain);
        assert_eq!(forced_kind(Phase::Escalation), ForcedContent::Story);
        assert_eq!(forced_kind(Phase::Climax), ForcedContent::Event);
        assert_eq!(forced_kind(Phase::Resolution), ForcedContent::Event);
    }

    #[test]
    fn theme_seeds_refreshes_and_expires() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();

        director.update(1, Phase::Setup, &[event(Category::Energy, 0.15, Sentiment::Bullish)], &config);
        assert_eq!(director.active_theme, Some(Category::Energy));
        assert!((director.theme_strength - 1.0).abs() < 1e-12);

        // Unrelated content does not steal the theme; it decays instead.
        director.update(2, Phase::Setup, &[event(Category::Tech, 0.3, Sentiment::Bullish)], &config);
        assert_eq!(director.active_theme, Some(Category::Energy));
        assert!(director.theme_strength < 1.0);

        // Matching content refreshes it.
        let before = director.theme_strength;
        director.update(3, Phase::Setup, &[event(Category::Energy, 0.02, Sentiment::Bearish)], &config);
        assert!(director.theme_strength > before);
        assert_eq!(director.theme_days_remaining, config.director.theme_duration_days);

        for day in 4..=20 {
            director.update(day, Phase::Setup, &[], &config);
        }
        assert_eq!(director.active_theme, None);
    }

    #[test]
    fn theme_boosts_its_category_weight() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();
        director.active_theme = Some(Category::Crypto);
        director.theme_strength = 1.0;

        let modifiers = director.modifiers(Phase::Midpoint, 10, &config);
        assert!((modifiers.category_multiplier(Category::Crypto) - 1.5).abs() < 1e-12);
        assert!((modifiers.category_multiplier(Category::Tech) - 1.0).abs() < 1e-12);
        assert_eq!(modifiers.forced, None);
    }

    #[test]
    fn strongest_content_leaves_a_ripple() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();
        director.update(
            5,
            Phase::Midpoint,
            &[
                event(Category::Biotech, 0.09, Sentiment::Bearish),
                event(Category::Macro, 0.2, Sentiment::Bullish),
                event(Category::Tech, 0.01, Sentiment::Bullish),
            ],
            &config,
        );
        let ripples = director.ripples.as_slice();
        assert_eq!(ripples.len(), 1);
        assert_eq!(ripples.first().map(|r| r.category), Some(Category::Macro));
    }

    #[test]
    fn chain_start_counts_as_relief() {
        let config = EngineConfig::default();
        let mut director = DirectorState::new();
        director.dopamine_debt = 3.0;
        let start = ContentSignal {
            kind: None,
            category: Some(Category::Finance),
            sentiment: Sentiment::Neutral,
            magnitude: 0.0,
            narrative_start: true,
        };
        director.update(4, Phase::RisingAction, &[start], &config);
        assert!((director.dopamine_debt - 1.5).abs() < 1e-12);
    }
}
