//! Load-time validation of catalog content.
//!
//! Id uniqueness is enforced by [`Registry::build`]; this module checks
//! everything else: asset references, weight normalization, numeric ranges
//! and story shape.
//!
//! [`Registry::build`]: crate::registry::Registry::build

use bullrun_types::{
    Asset, AssetId, ChainDef, Effects, MarketEvent, Outcome, ScheduledEventDef, StoryDef,
    StoryStage,
};

use crate::error::CatalogError;
use crate::registry::Registry;

/// Tolerance used when checking that weights sum to 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Minimum number of branches in a story branch stage.
pub const MIN_BRANCHES: usize = 2;

/// Maximum number of branches in a story branch stage.
pub const MAX_BRANCHES: usize = 3;

/// Check that a set of weights is non-negative, finite and sums to 1.
pub(crate) fn check_normalized(
    owner: &str,
    weights: impl IntoIterator<Item = f64>,
) -> Result<(), CatalogError> {
    let mut sum = 0.0;
    for weight in weights {
        if !weight.is_finite() || weight < 0.0 {
            return Err(CatalogError::InvalidValue {
                owner: owner.to_owned(),
                reason: format!("weight {weight} must be finite and non-negative"),
            });
        }
        sum += weight;
    }
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(CatalogError::WeightsNotNormalized {
            owner: owner.to_owned(),
            sum,
        });
    }
    Ok(())
}

/// Check that every effect targets a registered asset and is finite.
pub(crate) fn check_effects(
    owner: &str,
    effects: &Effects,
    assets: &Registry<AssetId, Asset>,
) -> Result<(), CatalogError> {
    for (asset, effect) in effects {
        if !assets.contains(asset) {
            return Err(CatalogError::UnknownAsset {
                owner: owner.to_owned(),
                asset: asset.clone(),
            });
        }
        if !effect.is_finite() {
            return Err(CatalogError::InvalidValue {
                owner: owner.to_owned(),
                reason: format!("effect on {asset} is not finite"),
            });
        }
    }
    Ok(())
}

fn check_outcomes(
    owner: &str,
    outcomes: &[Outcome],
    assets: &Registry<AssetId, Asset>,
) -> Result<(), CatalogError> {
    if outcomes.is_empty() {
        return Err(CatalogError::InvalidValue {
            owner: owner.to_owned(),
            reason: "at least one outcome is required".to_owned(),
        });
    }
    check_normalized(owner, outcomes.iter().map(|o| o.probability))?;
    for outcome in outcomes {
        check_effects(owner, &outcome.effects, assets)?;
    }
    Ok(())
}

/// Validate the asset registry.
pub(crate) fn assets(assets: &Registry<AssetId, Asset>) -> Result<(), CatalogError> {
    if assets.is_empty() {
        return Err(CatalogError::Empty { what: "assets" });
    }
    for asset in assets {
        let owner = format!("asset {}", asset.id);
        if asset.base_price <= rust_decimal::Decimal::ZERO {
            return Err(CatalogError::InvalidValue {
                owner,
                reason: format!("base price {} must be positive", asset.base_price),
            });
        }
        if !asset.volatility.is_finite() || !(0.0..1.0).contains(&asset.volatility) {
            return Err(CatalogError::InvalidValue {
                owner,
                reason: format!("volatility {} must be in [0, 1)", asset.volatility),
            });
        }
    }
    Ok(())
}

/// Validate one single-day event.
pub(crate) fn event(
    event: &MarketEvent,
    assets: &Registry<AssetId, Asset>,
) -> Result<(), CatalogError> {
    let owner = format!("event {}", event.id);
    check_effects(&owner, &event.effects, assets)?;
    if let Some(escalation) = &event.escalation {
        if !escalation.multiplier.is_finite() || escalation.multiplier <= 0.0 {
            return Err(CatalogError::InvalidValue {
                owner,
                reason: format!(
                    "escalation multiplier {} must be positive",
                    escalation.multiplier
                ),
            });
        }
        if escalation.duration_days == 0 || escalation.categories.is_empty() {
            return Err(CatalogError::InvalidValue {
                owner,
                reason: "escalation needs a duration and at least one category".to_owned(),
            });
        }
    }
    Ok(())
}

/// Validate one chain definition.
pub(crate) fn chain(chain: &ChainDef, assets: &Registry<AssetId, Asset>) -> Result<(), CatalogError> {
    let owner = format!("chain {}", chain.id);
    if chain.duration_days == 0 {
        return Err(CatalogError::InvalidValue {
            owner,
            reason: "duration_days must be at least 1".to_owned(),
        });
    }
    check_outcomes(&owner, &chain.outcomes, assets)
}

/// Validate one story definition.
///
/// The first stage must be a linear beat (the rumor shown on the start
/// day), the last stage must be a branch point, and every branch point
/// holds 2 or 3 branches whose probabilities sum to 1.
pub(crate) fn story(story: &StoryDef, assets: &Registry<AssetId, Asset>) -> Result<(), CatalogError> {
    let owner = format!("story {}", story.id);
    let invalid = |reason: &str| CatalogError::InvalidValue {
        owner: owner.clone(),
        reason: reason.to_owned(),
    };

    match story.stages.first() {
        Some(StoryStage::Beat { .. }) => {}
        Some(StoryStage::Branch { .. }) => {
            return Err(invalid("first stage must be a beat"));
        }
        None => return Err(invalid("story has no stages")),
    }
    if !matches!(story.stages.last(), Some(StoryStage::Branch { .. })) {
        return Err(invalid("last stage must be a branch"));
    }

    for stage in &story.stages {
        match stage {
            StoryStage::Beat { effects, .. } => check_effects(&owner, effects, assets)?,
            StoryStage::Branch { branches } => {
                if !(MIN_BRANCHES..=MAX_BRANCHES).contains(&branches.len()) {
                    return Err(invalid("branch stages hold 2 or 3 branches"));
                }
                check_normalized(&owner, branches.iter().map(|b| b.probability))?;
                for branch in branches {
                    check_effects(&owner, &branch.effects, assets)?;
                }
            }
        }
    }
    Ok(())
}

/// Validate one scheduled-event definition.
pub(crate) fn scheduled(
    def: &ScheduledEventDef,
    assets: &Registry<AssetId, Asset>,
) -> Result<(), CatalogError> {
    let owner = format!("scheduled event {}", def.id);
    if def.earliest_day == 0 || def.earliest_day > def.latest_day {
        return Err(CatalogError::InvalidValue {
            owner,
            reason: format!(
                "announce window [{}, {}] is empty or starts before day 1",
                def.earliest_day, def.latest_day
            ),
        });
    }
    if def.lead_days == 0 {
        return Err(CatalogError::InvalidValue {
            owner,
            reason: "lead_days must be at least 1".to_owned(),
        });
    }
    check_effects(&owner, &def.announcement_effects, assets)?;
    check_outcomes(&owner, &def.outcomes, assets)
}
