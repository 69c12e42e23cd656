//! Enumeration types for the Bull Run engine.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

// ---------------------------------------------------------------------------
// Content categories
// ---------------------------------------------------------------------------

/// Narrative topic of a piece of market content.
///
/// Categories drive weighted event selection, topic blocking (active chains,
/// active stories, cooldowns), Director themes and ripples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Category {
    /// Software, hardware and platform companies.
    Tech,
    /// Oil, gas and renewables.
    Energy,
    /// Digital currencies and exchanges.
    Crypto,
    /// Drug trials, approvals and health scares.
    Biotech,
    /// Banks, lenders and credit markets.
    Finance,
    /// Retail, spending and consumer brands.
    Consumer,
    /// Rates, inflation and central-bank policy.
    Macro,
    /// Conflicts, sanctions and elections.
    Geopolitics,
}

impl Category {
    /// Every category in declaration order.
    pub const ALL: [Self; 8] = [
        Self::Tech,
        Self::Energy,
        Self::Crypto,
        Self::Biotech,
        Self::Finance,
        Self::Consumer,
        Self::Macro,
        Self::Geopolitics,
    ];

    /// Short lowercase label used in logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Tech => "tech",
            Self::Energy => "energy",
            Self::Crypto => "crypto",
            Self::Biotech => "biotech",
            Self::Finance => "finance",
            Self::Consumer => "consumer",
            Self::Macro => "macro",
            Self::Geopolitics => "geopolitics",
        }
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// Sentiment
// ---------------------------------------------------------------------------

/// Direction of a market signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Sentiment {
    /// Pushes prices up.
    Bullish,
    /// Pushes prices down.
    Bearish,
    /// No directional pressure.
    Neutral,
}

impl Sentiment {
    /// Classify a signed effect: positive is bullish, negative is bearish.
    ///
    /// Zero and non-finite values are neutral.
    pub fn from_effect(effect: f64) -> Self {
        if !effect.is_finite() {
            Self::Neutral
        } else if effect > 0.0 {
            Self::Bullish
        } else if effect < 0.0 {
            Self::Bearish
        } else {
            Self::Neutral
        }
    }

    /// Whether `self` and `other` point in opposite directions.
    ///
    /// Neutral never opposes anything.
    pub const fn opposes(self, other: Self) -> bool {
        matches!(
            (self, other),
            (Self::Bullish, Self::Bearish) | (Self::Bearish, Self::Bullish)
        )
    }

    /// `+1.0` for bullish, `-1.0` for bearish, `0.0` for neutral.
    pub const fn sign(self) -> f64 {
        match self {
            Self::Bullish => 1.0,
            Self::Bearish => -1.0,
            Self::Neutral => 0.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Game phase
// ---------------------------------------------------------------------------

/// Dramatic phase of the game, derived from `day / total_days`.
///
/// Variants are declared in chronological order, so `Ord` follows the arc.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum Phase {
    /// Opening days: introduce the market quietly.
    Setup,
    /// Narratives begin to build.
    RisingAction,
    /// Middle of the game.
    Midpoint,
    /// Stakes increase.
    Escalation,
    /// Peak intensity.
    Climax,
    /// Final days: narratives wind down.
    Resolution,
}

impl Phase {
    /// Every phase in chronological order.
    pub const ALL: [Self; 6] = [
        Self::Setup,
        Self::RisingAction,
        Self::Midpoint,
        Self::Escalation,
        Self::Climax,
        Self::Resolution,
    ];
}

// ---------------------------------------------------------------------------
// Headline kinds
// ---------------------------------------------------------------------------

/// What produced a headline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum HeadlineKind {
    /// A single weighted market event.
    Event,
    /// The resolution of a rumor chain.
    ChainResolution,
    /// A linear story stage (including the opening rumor stage).
    StoryBeat,
    /// The branch chosen at a story's branching stage.
    StoryResolution,
    /// First phase of a scheduled event.
    ScheduledAnnouncement,
    /// Second phase of a scheduled event.
    ScheduledResolution,
    /// An effect queued by a collaborator outside the engine.
    Deferred,
    /// Zero-effect color text.
    Flavor,
    /// Filler shown on a day without news.
    Quiet,
}

impl HeadlineKind {
    /// Whether this kind counts as news for the quiet-filler rule.
    pub const fn is_newsworthy(self) -> bool {
        !matches!(self, Self::Flavor | Self::Quiet)
    }
}

/// Content kind the Director may force on a day with high dopamine debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "bindings/")]
pub enum ForcedContent {
    /// Start a rumor chain.
    Chain,
    /// Start a story.
    Story,
    /// Fire a single market event.
    Event,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentiment_from_effect() {
        assert_eq!(Sentiment::from_effect(0.02), Sentiment::Bullish);
        assert_eq!(Sentiment::from_effect(-0.02), Sentiment::Bearish);
        assert_eq!(Sentiment::from_effect(0.0), Sentiment::Neutral);
        assert_eq!(Sentiment::from_effect(f64::NAN), Sentiment::Neutral);
    }

    #[test]
    fn only_bullish_and_bearish_oppose() {
        assert!(Sentiment::Bullish.opposes(Sentiment::Bearish));
        assert!(Sentiment::Bearish.opposes(Sentiment::Bullish));
        assert!(!Sentiment::Bullish.opposes(Sentiment::Bullish));
        assert!(!Sentiment::Neutral.opposes(Sentiment::Bearish));
        assert!(!Sentiment::Bearish.opposes(Sentiment::Neutral));
    }

    #[test]
    fn phases_are_ordered() {
        assert!(Phase::Setup < Phase::RisingAction);
        assert!(Phase::Climax < Phase::Resolution);
        assert_eq!(Phase::ALL.len(), 6);
    }

    #[test]
    fn category_serializes_snake_case() {
        let json = serde_json::to_string(&Category::Geopolitics).unwrap_or_default();
        assert_eq!(json, "\"geopolitics\"");
    }

    #[test]
    fn flavor_and_quiet_are_not_news() {
        assert!(!HeadlineKind::Flavor.is_newsworthy());
        assert!(!HeadlineKind::Quiet.is_newsworthy());
        assert!(HeadlineKind::Event.is_newsworthy());
        assert!(HeadlineKind::Deferred.is_newsworthy());
    }
}
