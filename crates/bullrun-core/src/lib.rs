//! Narrative engine for Bull Run, a 30-day market game.
//!
//! Each day the engine picks market content (single events, rumor chains,
//! multi-stage stories, scheduled events), turns it into dated headlines
//! with per-asset effects, and moves every asset's price. A pacing
//! controller, the Director, shapes what fires so the month reads as an
//! arc rather than noise.
//!
//! # Modules
//!
//! - [`clock`] -- Day counter and phase derivation.
//! - [`config`] -- Configuration loading from `bullrun-config.yaml`.
//! - [`rng`] -- Per-day deterministic RNG streams.
//! - [`weighted`] -- Weighted choice shared by every selector.
//! - [`price`] -- Daily close and candle model.
//! - [`mood`] -- Per-asset sentiment ledger gating contradicting news.
//! - [`ripple`] -- Decaying directional biases from high-impact content.
//! - [`director`] -- Dopamine debt, themes and per-day modifiers.
//! - [`selector`] -- Category weights and single-event selection.
//! - [`chain`], [`story`], [`scheduled`] -- The three narrative forms.
//! - [`state`] -- Persistent [`GameState`].
//! - [`pipeline`] -- The daily pipeline and [`NarrativeEngine`].
//! - [`runner`] -- Whole-game loop with per-day callbacks.
//!
//! [`GameState`]: state::GameState
//! [`NarrativeEngine`]: pipeline::NarrativeEngine

pub mod chain;
pub mod clock;
pub mod config;
pub mod director;
pub mod error;
pub mod mood;
pub mod pipeline;
pub mod price;
pub mod ripple;
pub mod rng;
pub mod runner;
pub mod scheduled;
pub mod selector;
pub mod state;
pub mod story;
pub mod weighted;

pub use config::EngineConfig;
pub use error::EngineError;
pub use pipeline::{DayActivity, DayOutcome, NarrativeEngine};
pub use runner::{DayCallback, GameSummary, NoOpCallback, run_game};
pub use state::{GameState, UsedIds};
