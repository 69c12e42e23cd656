//! Per-asset sentiment ledger.
//!
//! Every asset touched by fired content gets a `(sentiment, day)` tag. A tag
//! is live for `window` days counting the day it was recorded, so a tag from
//! day 5 with a 3-day window blocks contradicting content on days 5, 6 and 7.
//!
//! Gated content (single events) asks [`MoodLedger::conflicts`] before it
//! fires. Content that fires without a gate still records its tags, so an
//! asset can carry opposing live tags at once; gated content is then blocked
//! in both directions until the older tag decays. Tags leave the ledger only
//! through [`MoodLedger::prune`].

use std::collections::BTreeMap;

use bullrun_types::{AssetId, Effects, Sentiment};
use serde::{Deserialize, Serialize};

/// One recorded mood tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetMood {
    /// Direction of the content that touched the asset.
    pub sentiment: Sentiment,
    /// Day the tag was recorded.
    pub recorded_day: u32,
}

impl AssetMood {
    /// Whether the tag still counts on `day`.
    pub const fn is_live(&self, day: u32, window: u32) -> bool {
        day >= self.recorded_day && day < self.recorded_day.saturating_add(window)
    }
}

/// Indexed ledger of mood tags per asset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MoodLedger {
    moods: BTreeMap<AssetId, Vec<AssetMood>>,
}

impl MoodLedger {
    /// An empty ledger.
    pub const fn new() -> Self {
        Self {
            moods: BTreeMap::new(),
        }
    }

    /// Whether `candidate` opposes a live tag on `asset`.
    pub fn would_conflict(
        &self,
        asset: &AssetId,
        candidate: Sentiment,
        day: u32,
        window: u32,
    ) -> bool {
        self.moods.get(asset).is_some_and(|tags| {
            tags.iter()
                .any(|tag| tag.is_live(day, window) && candidate.opposes(tag.sentiment))
        })
    }

    /// Whether any per-asset direction in `effects` opposes a live tag.
    pub fn conflicts(&self, effects: &Effects, day: u32, window: u32) -> bool {
        effects.iter().any(|(asset, effect)| {
            self.would_conflict(asset, Sentiment::from_effect(*effect), day, window)
        })
    }

    /// Append a tag. Neutral tags are not recorded.
    pub fn record(&mut self, asset: &AssetId, sentiment: Sentiment, day: u32) {
        if sentiment == Sentiment::Neutral {
            return;
        }
        self.moods.entry(asset.clone()).or_default().push(AssetMood {
            sentiment,
            recorded_day: day,
        });
    }

    /// Record one tag per asset in `effects`.
    pub fn record_effects(&mut self, effects: &Effects, day: u32) {
        for (asset, effect) in effects {
            self.record(asset, Sentiment::from_effect(*effect), day);
        }
    }

    /// Drop tags that are no longer live on `day`.
    pub fn prune(&mut self, day: u32, window: u32) {
        for tags in self.moods.values_mut() {
            tags.retain(|tag| day < tag.recorded_day.saturating_add(window));
        }
        self.moods.retain(|_, tags| !tags.is_empty());
    }

    /// Live tags for one asset.
    pub fn live(&self, asset: &AssetId, day: u32, window: u32) -> Vec<AssetMood> {
        self.moods
            .get(asset)
            .map(|tags| {
                tags.iter()
                    .copied()
                    .filter(|tag| tag.is_live(day, window))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Iterate every asset's tags, live or not.
    pub fn entries(&self) -> impl Iterator<Item = (&AssetId, &[AssetMood])> {
        self.moods.iter().map(|(asset, tags)| (asset, tags.as_slice()))
    }

    /// Number of stored tags.
    pub fn len(&self) -> usize {
        self.moods.values().map(Vec::len).sum()
    }

    /// Whether the ledger holds no tags.
    pub fn is_empty(&self) -> bool {
        self.moods.is_empty()
    }
}
