//! Shared type definitions for the Bull Run narrative market engine.
//!
//! This crate is the single source of truth for the data model shared by the
//! catalog loader, the engine and its consumers. Output types flow downstream
//! to `TypeScript` via `ts-rs` for the presentation layer.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe string wrappers for every catalog id space
//! - [`enums`] -- Categories, sentiment, game phases, headline kinds
//! - [`catalog`] -- Immutable catalog entries (assets, events, chains, stories,
//!   scheduled events, flavor/quiet pools)
//! - [`headline`] -- Per-day output (headlines, candles, price deltas, rumors)
//!   and externally queued deferred effects

pub mod catalog;
pub mod enums;
pub mod headline;
pub mod ids;

// Re-export all public types at crate root for convenience.
pub use catalog::{
    Asset, ChainDef, Effects, Escalation, MarketEvent, Outcome, PoolEntry, ScheduledEventDef,
    StoryBranch, StoryDef, StoryStage, net_sentiment, total_magnitude,
};
pub use enums::{Category, ForcedContent, HeadlineKind, Phase, Sentiment};
pub use headline::{Candle, DeferredEffect, Headline, PredictionHint, PriceDelta, Rumor};
pub use ids::{AssetId, ChainId, EventId, PoolId, ScheduledId, StoryId};
