//! Configuration loading and typed config structures for the Bull Run engine.
//!
//! The canonical configuration lives in `bullrun-config.yaml` at the project
//! root. Every section and every field has a default, so a partial or empty
//! file is valid and yields the tuned defaults below.
//!
//! Loading is two-step: [`EngineConfig::parse`] / [`EngineConfig::from_file`]
//! deserialize and apply environment overrides, then
//! [`EngineConfig::validate`] rejects out-of-range values. The engine calls
//! `validate` itself when it is constructed.

use std::path::{Path, PathBuf};

use bullrun_types::Phase;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Hard upper bound on concurrently active chains.
pub const MAX_CONCURRENT_CHAINS: u32 = 2;

/// Hard upper bound on concurrently active stories.
pub const MAX_CONCURRENT_STORIES: u32 = 2;

/// Errors that can occur when loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration.
///
/// Mirrors the structure of `bullrun-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Game length and seed.
    #[serde(default)]
    pub game: GameConfig,

    /// Where to load the content catalog from.
    #[serde(default)]
    pub catalog: CatalogConfig,

    /// Logging setup for the binary.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Price model tuning.
    #[serde(default)]
    pub price: PriceConfig,

    /// Single-event and flavor rolls.
    #[serde(default)]
    pub events: EventsConfig,

    /// Rumor chain tuning.
    #[serde(default)]
    pub chains: ChainsConfig,

    /// Story tuning.
    #[serde(default)]
    pub stories: StoriesConfig,

    /// Scheduled-event tuning.
    #[serde(default)]
    pub scheduled: ScheduledConfig,

    /// Mood ledger tuning.
    #[serde(default)]
    pub mood: MoodConfig,

    /// Ripple ledger tuning.
    #[serde(default)]
    pub ripple: RippleConfig,

    /// Director (pacing controller) tuning.
    #[serde(default)]
    pub director: DirectorConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `BULLRUN_SEED` overrides `game.seed` when set to a valid `u64`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.game.apply_env_overrides();
        Ok(config)
    }

    /// Reject values outside their allowed ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.total_days == 0 {
            return Err(invalid("game.total_days", "must be at least 1"));
        }

        check_probability("price.effect_noise_damping", self.price.effect_noise_damping)?;
        check_non_negative("price.wick_factor", self.price.wick_factor)?;

        check_probability("events.base_probability", self.events.base_probability)?;
        check_probability("events.flavor_chance", self.events.flavor_chance)?;

        check_probability(
            "chains.base_start_probability",
            self.chains.base_start_probability,
        )?;
        if self.chains.max_concurrent > MAX_CONCURRENT_CHAINS {
            return Err(invalid(
                "chains.max_concurrent",
                format!("must not exceed {MAX_CONCURRENT_CHAINS}"),
            ));
        }

        for phase in Phase::ALL {
            check_probability("stories.phase_chance", self.stories.phase_chance.get(phase))?;
            check_non_negative("director.event_boost", self.director.event_boost.get(phase))?;
            check_non_negative(
                "director.chain_multiplier",
                self.director.chain_multiplier.get(phase),
            )?;
        }
        if self.stories.max_concurrent > MAX_CONCURRENT_STORIES {
            return Err(invalid(
                "stories.max_concurrent",
                format!("must not exceed {MAX_CONCURRENT_STORIES}"),
            ));
        }
        if self.stories.staleness_start_days >= self.stories.staleness_full_days {
            return Err(invalid(
                "stories.staleness_start_days",
                "must be below stories.staleness_full_days",
            ));
        }

        check_probability("scheduled.announce_chance", self.scheduled.announce_chance)?;
        check_probability("scheduled.miss_rate", self.scheduled.miss_rate)?;

        if self.mood.decay_days == 0 {
            return Err(invalid("mood.decay_days", "must be at least 1"));
        }

        if !self.ripple.half_life_days.is_finite() || self.ripple.half_life_days <= 0.0 {
            return Err(invalid("ripple.half_life_days", "must be positive"));
        }
        check_non_negative("ripple.threshold", self.ripple.threshold)?;
        check_probability("ripple.cancel_fraction", self.ripple.cancel_fraction)?;
        check_non_negative("ripple.category_gain", self.ripple.category_gain)?;
        check_non_negative("ripple.outcome_gain", self.ripple.outcome_gain)?;

        let director = &self.director;
        check_non_negative("director.debt_per_quiet_day", director.debt_per_quiet_day)?;
        check_non_negative("director.relief", director.relief)?;
        if !director.force_threshold.is_finite() || director.force_threshold <= 0.0 {
            return Err(invalid("director.force_threshold", "must be positive"));
        }
        if director.max_debt < director.force_threshold {
            return Err(invalid(
                "director.max_debt",
                "must be at least director.force_threshold",
            ));
        }
        check_non_negative("director.debt_event_boost", director.debt_event_boost)?;
        check_probability("director.theme_decay", director.theme_decay)?;
        check_probability("director.theme_refresh", director.theme_refresh)?;
        if !director.theme_boost.is_finite() || director.theme_boost < 1.0 {
            return Err(invalid("director.theme_boost", "must be at least 1"));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

fn check_probability(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} is outside [0, 1]")))
    }
}

fn check_non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(invalid(field, format!("{value} must be finite and non-negative")))
    }
}

// ---------------------------------------------------------------------------
// Per-phase tables
// ---------------------------------------------------------------------------

/// One value per [`Phase`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseValues {
    /// Value during [`Phase::Setup`].
    pub setup: f64,
    /// Value during [`Phase::RisingAction`].
    pub rising_action: f64,
    /// Value during [`Phase::Midpoint`].
    pub midpoint: f64,
    /// Value during [`Phase::Escalation`].
    pub escalation: f64,
    /// Value during [`Phase::Climax`].
    pub climax: f64,
    /// Value during [`Phase::Resolution`].
    pub resolution: f64,
}

impl PhaseValues {
    /// The same value in every phase.
    pub const fn uniform(value: f64) -> Self {
        Self {
            setup: value,
            rising_action: value,
            midpoint: value,
            escalation: value,
            climax: value,
            resolution: value,
        }
    }

    /// The value for `phase`.
    pub const fn get(&self, phase: Phase) -> f64 {
        match phase {
            Phase::Setup => self.setup,
            Phase::RisingAction => self.rising_action,
            Phase::Midpoint => self.midpoint,
            Phase::Escalation => self.escalation,
            Phase::Climax => self.climax,
            Phase::Resolution => self.resolution,
        }
    }
}

// ---------------------------------------------------------------------------
// Sections
// ---------------------------------------------------------------------------

/// Game length and seed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of days in a game.
    #[serde(default = "default_total_days")]
    pub total_days: u32,

    /// Base random seed; each day's RNG is derived from it.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl GameConfig {
    /// Override the seed with `BULLRUN_SEED` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("BULLRUN_SEED") {
            match val.trim().parse::<u64>() {
                Ok(seed) => self.seed = seed,
                Err(err) => warn!(value = %val, %err, "Ignoring invalid BULLRUN_SEED"),
            }
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            total_days: default_total_days(),
            seed: default_seed(),
        }
    }
}

/// Catalog source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Path to a catalog YAML file; the built-in catalog is used when unset.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

/// Price model tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceConfig {
    /// Noise scale applied to an asset that has a scripted effect today.
    #[serde(default = "default_effect_noise_damping")]
    pub effect_noise_damping: f64,

    /// Candle wicks extend up to `open * volatility * wick_factor`.
    #[serde(default = "default_wick_factor")]
    pub wick_factor: f64,
}

impl Default for PriceConfig {
    fn default() -> Self {
        Self {
            effect_noise_damping: default_effect_noise_damping(),
            wick_factor: default_wick_factor(),
        }
    }
}

/// Single-event and flavor rolls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventsConfig {
    /// Chance of a single weighted event on a day with no narrative start.
    #[serde(default = "default_event_probability")]
    pub base_probability: f64,

    /// Independent chance of a zero-effect flavor headline.
    #[serde(default = "default_flavor_chance")]
    pub flavor_chance: f64,

    /// Extra rolls after a candidate is skipped for contradicting a mood.
    #[serde(default = "default_max_rerolls")]
    pub max_rerolls: u32,
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            base_probability: default_event_probability(),
            flavor_chance: default_flavor_chance(),
            max_rerolls: default_max_rerolls(),
        }
    }
}

/// Rumor chain tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainsConfig {
    /// Daily chance of starting a chain, before the Director's multiplier.
    #[serde(default = "default_chain_probability")]
    pub base_start_probability: f64,

    /// Concurrently active chains (at most 2).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: u32,

    /// Days a resolved chain's category stays blocked.
    #[serde(default = "default_chain_cooldown_days")]
    pub cooldown_days: u32,
}

impl Default for ChainsConfig {
    fn default() -> Self {
        Self {
            base_start_probability: default_chain_probability(),
            max_concurrent: default_max_concurrent(),
            cooldown_days: default_chain_cooldown_days(),
        }
    }
}

/// Story tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoriesConfig {
    /// Base daily start chance per phase.
    #[serde(default = "default_story_phase_chance")]
    pub phase_chance: PhaseValues,

    /// Days without a story start before staleness pressure begins.
    #[serde(default = "default_staleness_start_days")]
    pub staleness_start_days: u32,

    /// Days without a story start at which a start becomes certain.
    #[serde(default = "default_staleness_full_days")]
    pub staleness_full_days: u32,

    /// Concurrently active stories (at most 2).
    #[serde(default = "default_max_concurrent")]
    pub max_concurrent: u32,

    /// Days a finished story's category stays blocked.
    #[serde(default = "default_story_cooldown_days")]
    pub cooldown_days: u32,
}

impl Default for StoriesConfig {
    fn default() -> Self {
        Self {
            phase_chance: default_story_phase_chance(),
            staleness_start_days: default_staleness_start_days(),
            staleness_full_days: default_staleness_full_days(),
            max_concurrent: default_max_concurrent(),
            cooldown_days: default_story_cooldown_days(),
        }
    }
}

/// Scheduled-event tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledConfig {
    /// Chance per eligible day of announcing before the window closes.
    #[serde(default = "default_announce_chance")]
    pub announce_chance: f64,

    /// Fraction of prediction hints that name the wrong outcome.
    #[serde(default = "default_miss_rate")]
    pub miss_rate: f64,
}

impl Default for ScheduledConfig {
    fn default() -> Self {
        Self {
            announce_chance: default_announce_chance(),
            miss_rate: default_miss_rate(),
        }
    }
}

/// Mood ledger tuning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoodConfig {
    /// Days a recorded mood stays live, counting the day it was recorded.
    #[serde(default = "default_mood_decay_days")]
    pub decay_days: u32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            decay_days: default_mood_decay_days(),
        }
    }
}

/// Ripple ledger tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RippleConfig {
    /// Minimum total magnitude for the day's top content to leave a ripple.
    #[serde(default = "default_ripple_threshold")]
    pub threshold: f64,

    /// Days for a ripple to lose half its strength.
    #[serde(default = "default_ripple_half_life")]
    pub half_life_days: f64,

    /// Fraction of opposite-sign ripple magnitude removed by a new ripple.
    #[serde(default = "default_cancel_fraction")]
    pub cancel_fraction: f64,

    /// Category weight gain per unit of live ripple strength.
    #[serde(default = "default_category_gain")]
    pub category_gain: f64,

    /// Outcome weight gain per unit of aligned ripple strength.
    #[serde(default = "default_outcome_gain")]
    pub outcome_gain: f64,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            threshold: default_ripple_threshold(),
            half_life_days: default_ripple_half_life(),
            cancel_fraction: default_cancel_fraction(),
            category_gain: default_category_gain(),
            outcome_gain: default_outcome_gain(),
        }
    }
}

/// Director (pacing controller) tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectorConfig {
    /// Debt added on a day without significant content.
    #[serde(default = "default_debt_per_quiet_day")]
    pub debt_per_quiet_day: f64,

    /// Debt removed on a day with high-impact content.
    #[serde(default = "default_relief")]
    pub relief: f64,

    /// Debt ceiling.
    #[serde(default = "default_max_debt")]
    pub max_debt: f64,

    /// Debt at which the next day is forced to carry content.
    #[serde(default = "default_force_threshold")]
    pub force_threshold: f64,

    /// Total magnitude at which content counts as significant.
    #[serde(default = "default_significance_threshold")]
    pub significance_threshold: f64,

    /// Total magnitude at which content counts as high-impact.
    #[serde(default = "default_high_impact_threshold")]
    pub high_impact_threshold: f64,

    /// Event probability added per unit of debt.
    #[serde(default = "default_debt_event_boost")]
    pub debt_event_boost: f64,

    /// Total magnitude at which content may seed a theme.
    #[serde(default = "default_theme_threshold")]
    pub theme_threshold: f64,

    /// Lifetime of a freshly seeded or refreshed theme.
    #[serde(default = "default_theme_duration_days")]
    pub theme_duration_days: u32,

    /// Strength restored when matching content fires.
    #[serde(default = "default_theme_refresh")]
    pub theme_refresh: f64,

    /// Fraction of strength lost on a day without matching content.
    #[serde(default = "default_theme_decay")]
    pub theme_decay: f64,

    /// Weight multiplier for the theme category at full strength.
    #[serde(default = "default_theme_boost")]
    pub theme_boost: f64,

    /// Event probability boost per phase.
    #[serde(default = "default_event_boost")]
    pub event_boost: PhaseValues,

    /// Chain start probability multiplier per phase.
    #[serde(default = "default_chain_multiplier")]
    pub chain_multiplier: PhaseValues,
}

impl Default for DirectorConfig {
    fn default() -> Self {
        Self {
            debt_per_quiet_day: default_debt_per_quiet_day(),
            relief: default_relief(),
            max_debt: default_max_debt(),
            force_threshold: default_force_threshold(),
            significance_threshold: default_significance_threshold(),
            high_impact_threshold: default_high_impact_threshold(),
            debt_event_boost: default_debt_event_boost(),
            theme_threshold: default_theme_threshold(),
            theme_duration_days: default_theme_duration_days(),
            theme_refresh: default_theme_refresh(),
            theme_decay: default_theme_decay(),
            theme_boost: default_theme_boost(),
            event_boost: default_event_boost(),
            chain_multiplier: default_chain_multiplier(),
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions
// ---------------------------------------------------------------------------

const fn default_total_days() -> u32 {
    30
}

const fn default_seed() -> u64 {
    42
}

fn default_log_level() -> String {
    "info".to_owned()
}

const fn default_effect_noise_damping() -> f64 {
    0.08
}

const fn default_wick_factor() -> f64 {
    0.5
}

const fn default_event_probability() -> f64 {
    0.55
}

const fn default_flavor_chance() -> f64 {
    0.15
}

const fn default_max_rerolls() -> u32 {
    3
}

const fn default_chain_probability() -> f64 {
    0.2
}

const fn default_max_concurrent() -> u32 {
    2
}

const fn default_chain_cooldown_days() -> u32 {
    2
}

const fn default_story_phase_chance() -> PhaseValues {
    PhaseValues {
        setup: 0.02,
        rising_action: 0.1,
        midpoint: 0.15,
        escalation: 0.2,
        climax: 0.1,
        resolution: 0.0,
    }
}

const fn default_staleness_start_days() -> u32 {
    5
}

const fn default_staleness_full_days() -> u32 {
    12
}

const fn default_story_cooldown_days() -> u32 {
    3
}

const fn default_announce_chance() -> f64 {
    0.3
}

const fn default_miss_rate() -> f64 {
    0.25
}

const fn default_mood_decay_days() -> u32 {
    3
}

const fn default_ripple_threshold() -> f64 {
    0.08
}

const fn default_ripple_half_life() -> f64 {
    2.0
}

const fn default_cancel_fraction() -> f64 {
    0.5
}

const fn default_category_gain() -> f64 {
    1.0
}

const fn default_outcome_gain() -> f64 {
    0.5
}

const fn default_debt_per_quiet_day() -> f64 {
    1.0
}

const fn default_relief() -> f64 {
    1.5
}

const fn default_max_debt() -> f64 {
    10.0
}

const fn default_force_threshold() -> f64 {
    3.0
}

const fn default_significance_threshold() -> f64 {
    0.03
}

const fn default_high_impact_threshold() -> f64 {
    0.1
}

const fn default_debt_event_boost() -> f64 {
    0.1
}

const fn default_theme_threshold() -> f64 {
    0.1
}

const fn default_theme_duration_days() -> u32 {
    4
}

const fn default_theme_refresh() -> f64 {
    0.3
}

const fn default_theme_decay() -> f64 {
    0.25
}

const fn default_theme_boost() -> f64 {
    1.5
}

const fn default_event_boost() -> PhaseValues {
    PhaseValues {
        setup: 0.0,
        rising_action: 0.05,
        midpoint: 0.1,
        escalation: 0.15,
        climax: 0.25,
        resolution: 0.1,
    }
}

const fn default_chain_multiplier() -> PhaseValues {
    PhaseValues {
        setup: 0.6,
        rising_action: 1.0,
        midpoint: 1.2,
        escalation: 1.3,
        climax: 1.0,
        resolution: 0.3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.game.total_days, 30);
        assert_eq!(config.chains.max_concurrent, 2);
        assert_eq!(config.mood.decay_days, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn parse_minimal_yaml() {
        let yaml = "game:\n  total_days: 20\nevents:\n  flavor_chance: 0.0\n";
        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.game.total_days, 20);
        assert!(config.events.flavor_chance.abs() < f64::EPSILON);
        // Everything else uses defaults
        assert_eq!(config.events.max_rerolls, 3);
        assert_eq!(config.stories.staleness_full_days, 12);
    }

    #[test]
    fn parse_phase_table_and_log_format() {
        let yaml = r"
logging:
  level: debug
  format: json
director:
  chain_multiplier:
    setup: 0.0
    rising_action: 0.5
    midpoint: 1.0
    escalation: 1.0
    climax: 2.0
    resolution: 0.0
";
        let config = EngineConfig::parse(yaml).ok().unwrap_or_default();
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, "debug");
        assert!((config.director.chain_multiplier.get(Phase::Climax) - 2.0).abs() < 1e-12);
        assert!((config.director.relief - 1.5).abs() < 1e-12);
    }

    #[test]
    fn parse_empty_yaml() {
        let config = EngineConfig::parse("");
        assert!(config.is_ok());
    }

    #[test]
    fn validate_rejects_out_of_range() {
        let mut config = EngineConfig::default();
        config.events.base_probability = 1.5;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "events.base_probability",
                ..
            })
        ));

        let mut config = EngineConfig::default();
        config.chains.max_concurrent = 3;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid {
                field: "chains.max_concurrent",
                ..
            })
        ));

        let mut config = EngineConfig::default();
        config.game.total_days = 0;
        assert!(config.validate().is_err());

        let mut config = EngineConfig::default();
        config.ripple.half_life_days = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("bullrun-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
            let config = config.ok().unwrap_or_default();
            assert!(config.validate().is_ok());
            // The shipped file documents the defaults.
            let defaults = EngineConfig::default();
            assert_eq!(config.director, defaults.director);
            assert_eq!(config.stories, defaults.stories);
            assert_eq!(config.catalog, defaults.catalog);
        }
    }
}
