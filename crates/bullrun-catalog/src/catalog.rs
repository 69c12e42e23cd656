//! The validated, id-indexed content catalog.
//!
//! A [`CatalogFile`] mirrors the YAML layout. [`Catalog::new`] validates it
//! and builds one [`Registry`] per id space; after that the engine only ever
//! sees a [`Catalog`], so unknown or duplicate ids cannot surface at runtime.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use bullrun_types::{
    Asset, AssetId, Category, ChainDef, ChainId, EventId, MarketEvent, PoolEntry, PoolId,
    ScheduledEventDef, ScheduledId, StoryDef, StoryId,
};

use crate::error::CatalogError;
use crate::registry::Registry;
use crate::validate;

/// The built-in catalog shipped with the engine.
const BUILTIN_CATALOG: &str = include_str!("../data/default-catalog.yaml");

/// Raw catalog content as it appears on disk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogFile {
    /// Tradable assets.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// Base selection weight of each category; must sum to 1.
    #[serde(default)]
    pub category_weights: BTreeMap<Category, f64>,
    /// Single-day events.
    #[serde(default)]
    pub events: Vec<MarketEvent>,
    /// Rumor chains.
    #[serde(default)]
    pub chains: Vec<ChainDef>,
    /// Multi-stage stories.
    #[serde(default)]
    pub stories: Vec<StoryDef>,
    /// Calendar-anchored scheduled events.
    #[serde(default)]
    pub scheduled: Vec<ScheduledEventDef>,
    /// Zero-effect flavor headlines.
    #[serde(default)]
    pub flavor: Vec<PoolEntry>,
    /// Quiet-day filler headlines.
    #[serde(default)]
    pub quiet: Vec<PoolEntry>,
}

/// Validated content catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    assets: Registry<AssetId, Asset>,
    category_weights: Vec<(Category, f64)>,
    events: Registry<EventId, MarketEvent>,
    chains: Registry<ChainId, ChainDef>,
    stories: Registry<StoryId, StoryDef>,
    scheduled: Registry<ScheduledId, ScheduledEventDef>,
    flavor: Registry<PoolId, PoolEntry>,
    quiet: Registry<PoolId, PoolEntry>,
}

impl Catalog {
    /// Validate raw catalog content and index it by id.
    ///
    /// Categories missing from `category_weights` get weight 0.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] describing the first problem found.
    pub fn new(file: CatalogFile) -> Result<Self, CatalogError> {
        let assets = Registry::build(file.assets, "asset", |a| &a.id)?;
        validate::assets(&assets)?;

        validate::check_normalized("category_weights", file.category_weights.values().copied())?;
        let category_weights = Category::ALL
            .iter()
            .map(|category| {
                (
                    *category,
                    file.category_weights.get(category).copied().unwrap_or(0.0),
                )
            })
            .collect();

        let events = Registry::build(file.events, "event", |e| &e.id)?;
        for event in &events {
            validate::event(event, &assets)?;
        }

        let chains = Registry::build(file.chains, "chain", |c| &c.id)?;
        for chain in &chains {
            validate::chain(chain, &assets)?;
        }

        let stories = Registry::build(file.stories, "story", |s| &s.id)?;
        for story in &stories {
            validate::story(story, &assets)?;
        }

        let scheduled = Registry::build(file.scheduled, "scheduled event", |s| &s.id)?;
        for def in &scheduled {
            validate::scheduled(def, &assets)?;
        }

        let flavor = Registry::build(file.flavor, "flavor", |f| &f.id)?;
        let quiet = Registry::build(file.quiet, "quiet", |q| &q.id)?;
        if quiet.is_empty() {
            return Err(CatalogError::Empty {
                what: "quiet headlines",
            });
        }

        debug!(
            assets = assets.len(),
            events = events.len(),
            chains = chains.len(),
            stories = stories.len(),
            scheduled = scheduled.len(),
            flavor = flavor.len(),
            quiet = quiet.len(),
            "Catalog validated"
        );

        Ok(Self {
            assets,
            category_weights,
            events,
            chains,
            stories,
            scheduled,
            flavor,
            quiet,
        })
    }

    /// Parse and validate a catalog from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Yaml`] for malformed YAML, or any validation
    /// error from [`Catalog::new`].
    pub fn parse(yaml: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_yml::from_str(yaml)?;
        Self::new(file)
    }

    /// Load and validate a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, otherwise
    /// the same errors as [`Catalog::parse`].
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// The catalog embedded in the crate.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded YAML is broken, which the crate's tests
    /// rule out.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::parse(BUILTIN_CATALOG)
    }

    // --- Assets ---

    /// The asset registry.
    pub const fn assets(&self) -> &Registry<AssetId, Asset> {
        &self.assets
    }

    /// Look up an asset.
    pub fn asset(&self, id: &AssetId) -> Option<&Asset> {
        self.assets.get(id)
    }

    // --- Events ---

    /// Base category weights in [`Category::ALL`] order; they sum to 1.
    pub fn category_weights(&self) -> &[(Category, f64)] {
        &self.category_weights
    }

    /// The single-day event pool.
    pub const fn events(&self) -> &Registry<EventId, MarketEvent> {
        &self.events
    }

    /// Look up a single-day event.
    pub fn event(&self, id: &EventId) -> Option<&MarketEvent> {
        self.events.get(id)
    }

    /// Events in one category, in catalog order.
    pub fn events_in(&self, category: Category) -> impl Iterator<Item = &MarketEvent> {
        self.events.iter().filter(move |e| e.category == category)
    }

    // --- Narratives ---

    /// Chain definitions.
    pub const fn chains(&self) -> &Registry<ChainId, ChainDef> {
        &self.chains
    }

    /// Look up a chain definition.
    pub fn chain(&self, id: &ChainId) -> Option<&ChainDef> {
        self.chains.get(id)
    }

    /// Story definitions.
    pub const fn stories(&self) -> &Registry<StoryId, StoryDef> {
        &self.stories
    }

    /// Look up a story definition.
    pub fn story(&self, id: &StoryId) -> Option<&StoryDef> {
        self.stories.get(id)
    }

    /// Scheduled-event definitions.
    pub const fn scheduled(&self) -> &Registry<ScheduledId, ScheduledEventDef> {
        &self.scheduled
    }

    /// Look up a scheduled-event definition.
    pub fn scheduled_event(&self, id: &ScheduledId) -> Option<&ScheduledEventDef> {
        self.scheduled.get(id)
    }

    // --- Pools ---

    /// Flavor headlines.
    pub const fn flavor(&self) -> &Registry<PoolId, PoolEntry> {
        &self.flavor
    }

    /// Quiet-day filler headlines (never empty).
    pub const fn quiet(&self) -> &Registry<PoolId, PoolEntry> {
        &self.quiet
    }
}
