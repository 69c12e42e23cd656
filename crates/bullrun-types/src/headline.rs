//! Output types: what one resolved day hands to the presentation layer.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::catalog::{Effects, net_sentiment};
use crate::enums::{Category, HeadlineKind, Sentiment};
use crate::ids::ChainId;

/// A dated news headline produced by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Headline {
    /// Day the headline ran (1-indexed).
    pub day: u32,
    /// What produced the headline.
    pub kind: HeadlineKind,
    /// Topic, if the headline has one.
    pub category: Option<Category>,
    /// Headline text.
    pub text: String,
    /// Price effects carried by this headline.
    pub effects: Effects,
    /// Direction of the effects.
    pub sentiment: Sentiment,
    /// Catalog id (or external source tag) the headline came from.
    pub source: Option<String>,
    /// Prediction-market hint attached to a scheduled announcement.
    pub prediction: Option<PredictionHint>,
}

impl Headline {
    /// Create a zero-effect headline.
    pub fn new(day: u32, kind: HeadlineKind, text: impl Into<String>) -> Self {
        Self {
            day,
            kind,
            category: None,
            text: text.into(),
            effects: Effects::new(),
            sentiment: Sentiment::Neutral,
            source: None,
            prediction: None,
        }
    }

    /// Attach a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Attach effects and derive the headline sentiment from them.
    #[must_use]
    pub fn with_effects(mut self, effects: Effects) -> Self {
        self.sentiment = net_sentiment(&effects);
        self.effects = effects;
        self
    }

    /// Attach the originating id.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Attach a prediction-market hint.
    #[must_use]
    pub fn with_prediction(mut self, prediction: PredictionHint) -> Self {
        self.prediction = Some(prediction);
        self
    }
}

/// Displayed prediction-market odds for a scheduled event.
///
/// The hint may be deliberately wrong; nothing in it reveals whether it is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PredictionHint {
    /// Label of the outcome the market favors.
    pub favored: String,
    /// Displayed probability of that outcome, in `[0, 1]`.
    pub probability: f64,
}

/// Intraday open/high/low/close for one asset on one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Candle {
    /// Yesterday's close.
    #[ts(as = "String")]
    pub open: Decimal,
    /// Intraday high.
    #[ts(as = "String")]
    pub high: Decimal,
    /// Intraday low.
    #[ts(as = "String")]
    pub low: Decimal,
    /// Today's close.
    #[ts(as = "String")]
    pub close: Decimal,
}

/// One asset's price movement for a resolved day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct PriceDelta {
    /// Close before the day.
    #[ts(as = "String")]
    pub previous: Decimal,
    /// Close after the day.
    #[ts(as = "String")]
    pub current: Decimal,
    /// `current - previous`.
    #[ts(as = "String")]
    pub change: Decimal,
    /// Merged scripted effect applied to this asset.
    pub effect: f64,
    /// Intraday candle.
    pub candle: Candle,
}

/// An effect queued outside the engine (abilities, encounters) and merged
/// into a specific future day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DeferredEffect {
    /// Day the effect lands.
    pub due_day: u32,
    /// Tag naming the collaborator that queued the effect.
    pub source: String,
    /// Optional headline shown when the effect lands.
    #[serde(default)]
    pub headline: Option<String>,
    /// Optional topic of the effect.
    #[serde(default)]
    pub category: Option<Category>,
    /// Price effects.
    pub effects: Effects,
}

/// An ongoing chain rumor, shown apart from the dated headlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Rumor {
    /// Chain the rumor belongs to.
    pub chain_id: ChainId,
    /// Topic of the rumor.
    pub category: Category,
    /// Rumor text.
    pub text: String,
    /// Days until the rumor resolves.
    pub days_remaining: u32,
}
