//! Multi-stage stories.
//!
//! A story opens with its first stage as a headline and then advances one
//! stage per day. Beat stages always show; a branch stage picks one weighted
//! branch, which either ends the story or, if it `continues`, lets it run on
//! to the next stage. The story's category stays blocked while it runs.
//!
//! New stories start with `max(phase chance, staleness)`: staleness climbs
//! linearly from 0 to 1 as days pass without a story starting.

use std::collections::BTreeSet;

use bullrun_catalog::Catalog;
use bullrun_types::{
    Category, Effects, Headline, HeadlineKind, Phase, StoryDef, StoryId, StoryStage,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::{EngineConfig, StoriesConfig};
use crate::mood::MoodLedger;
use crate::ripple::RippleLedger;
use crate::selector;
use crate::weighted;

/// A running story.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveStory {
    /// Catalog story id.
    pub story_id: StoryId,
    /// Blocked category.
    pub category: Category,
    /// Day the story started.
    pub start_day: u32,
    /// Index of the last stage shown.
    pub current_stage: usize,
    /// Day the last stage was shown.
    pub last_advance_day: u32,
}

/// What advancing a story produced.
#[derive(Debug, Clone, PartialEq)]
pub struct StoryStep {
    /// Headline for the stage shown today.
    pub headline: Headline,
    /// Whether the story is over.
    pub finished: bool,
}

/// Chance that a new story starts on `day`.
///
/// `last_start_day` is the day the previous story started (0 if none has).
pub fn start_chance(phase: Phase, day: u32, last_start_day: u32, config: &StoriesConfig) -> f64 {
    let idle = day.saturating_sub(last_start_day);
    let staleness = if idle <= config.staleness_start_days {
        0.0
    } else if idle >= config.staleness_full_days
        || config.staleness_full_days <= config.staleness_start_days
    {
        1.0
    } else {
        let span = config
            .staleness_full_days
            .saturating_sub(config.staleness_start_days);
        f64::from(idle.saturating_sub(config.staleness_start_days)) / f64::from(span)
    };
    config.phase_chance.get(phase).max(staleness).clamp(0.0, 1.0)
}

/// Stories that may start on `day`, weighted by their category's selection
/// weight. A story must be able to show every stage by the final day.
pub fn eligible<'a>(
    catalog: &'a Catalog,
    used: &BTreeSet<StoryId>,
    weights: &[(Category, f64)],
    day: u32,
    total_days: u32,
) -> Vec<(&'a StoryDef, f64)> {
    catalog
        .stories()
        .iter()
        .filter(|def| !used.contains(&def.id))
        .filter(|def| {
            let extra_days = u32::try_from(def.stages.len().saturating_sub(1)).unwrap_or(u32::MAX);
            day.saturating_add(extra_days) <= total_days
        })
        .map(|def| (def, selector::weight_of(weights, def.category)))
        .filter(|(_, weight)| *weight > 0.0)
        .collect()
}

/// Start `def` on `day`, returning the running story and its opening
/// headline.
pub fn start(def: &StoryDef, day: u32) -> (ActiveStory, Headline) {
    let story = ActiveStory {
        story_id: def.id.clone(),
        category: def.category,
        start_day: day,
        current_stage: 0,
        last_advance_day: day,
    };
    let headline = match def.stages.first() {
        Some(StoryStage::Beat { headline, effects }) => beat_headline(def, headline, effects, day),
        // Catalog validation rejects stories that open on a branch.
        Some(StoryStage::Branch { .. }) | None => {
            Headline::new(day, HeadlineKind::StoryBeat, def.subcategory.clone())
                .with_category(def.category)
                .with_source(def.id.as_str())
        }
    };
    (story, headline)
}

fn beat_headline(def: &StoryDef, text: &str, effects: &Effects, day: u32) -> Headline {
    Headline::new(day, HeadlineKind::StoryBeat, text)
        .with_category(def.category)
        .with_effects(effects.clone())
        .with_source(def.id.as_str())
}

/// Show the next stage of `story` on `day`.
pub fn advance<R: Rng + ?Sized>(
    rng: &mut R,
    story: &mut ActiveStory,
    catalog: &Catalog,
    day: u32,
    moods: &MoodLedger,
    ripples: &RippleLedger,
    config: &EngineConfig,
) -> StoryStep {
    let Some(def) = catalog.story(&story.story_id) else {
        warn!(day, story_id = %story.story_id, "Active story missing from catalog, closing it");
        return StoryStep {
            headline: Headline::new(day, HeadlineKind::StoryResolution, "The story fades from the news")
                .with_category(story.category)
                .with_source(story.story_id.as_str()),
            finished: true,
        };
    };

    let next = story.current_stage.saturating_add(1);
    story.current_stage = next;
    story.last_advance_day = day;
    let has_later_stage = next.saturating_add(1) < def.stages.len();

    match def.stages.get(next) {
        Some(StoryStage::Beat { headline, effects }) => StoryStep {
            headline: beat_headline(def, headline, effects, day),
            finished: !has_later_stage,
        },
        Some(StoryStage::Branch { branches }) => {
            let window = config.mood.decay_days;
            let weights: Vec<f64> = branches
                .iter()
                .map(|branch| {
                    branch.probability
                        * ripples.outcome_bias(
                            def.category,
                            branch.sentiment(),
                            day,
                            config.ripple.outcome_gain,
                        )
                })
                .collect();
            let conflicts: Vec<bool> = branches
                .iter()
                .map(|b| !b.allows_reversal && moods.conflicts(&b.effects, day, window))
                .collect();
            let branch = weighted::pick_with_momentum(rng, &weights, &conflicts)
                .and_then(|index| branches.get(index))
                .or_else(|| branches.first());

            match branch {
                Some(branch) => StoryStep {
                    headline: Headline::new(day, HeadlineKind::StoryResolution, branch.headline.clone())
                        .with_category(def.category)
                        .with_effects(branch.effects.clone())
                        .with_source(def.id.as_str()),
                    finished: !(branch.continues && has_later_stage),
                },
                None => StoryStep {
                    headline: Headline::new(day, HeadlineKind::StoryResolution, def.subcategory.clone())
                        .with_category(def.category)
                        .with_source(def.id.as_str()),
                    finished: true,
                },
            }
        }
        None => {
            warn!(day, story_id = %story.story_id, stage = next, "Story advanced past its last stage");
            StoryStep {
                headline: Headline::new(day, HeadlineKind::StoryResolution, "The story fades from the news")
                    .with_category(def.category)
                    .with_source(def.id.as_str()),
                finished: true,
            }
        }
    }
}
