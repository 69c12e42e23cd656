//! Catalog loading and load-time validation.

#![allow(clippy::unwrap_used)]

use std::path::Path;

use bullrun_catalog::{Catalog, CatalogError};
use bullrun_types::{AssetId, Category, ChainId, EventId};
use rust_decimal_macros::dec;

/// A minimal valid catalog; tests splice broken sections into it.
const MINIMAL: &str = r#"
assets:
  - { id: NOVA, name: Nova, sector: tech, base_price: "100.00", volatility: 0.05 }
category_weights:
  tech: 1.0
events:
  - id: nova-up
    category: tech
    headline: Nova rallies
    effects: { NOVA: 0.05 }
chains:
  - id: nova-rumor
    category: tech
    rumor: Nova rumor
    duration_days: 2
    outcomes:
      - { headline: Deal, effects: { NOVA: 0.1 }, probability: 0.5 }
      - { headline: Walk, effects: { NOVA: -0.1 }, probability: 0.5 }
quiet:
  - { id: q1, headline: Quiet }
"#;

// ---------------------------------------------------------------------------
// Happy paths
// ---------------------------------------------------------------------------

#[test]
fn builtin_catalog_is_complete() {
    let catalog = Catalog::builtin().unwrap();

    assert_eq!(catalog.assets().len(), 8);
    assert!(catalog.events().len() >= 30);
    assert!(!catalog.chains().is_empty());
    assert!(!catalog.stories().is_empty());
    assert!(!catalog.scheduled().is_empty());
    assert!(!catalog.flavor().is_empty());
    assert!(!catalog.quiet().is_empty());

    let total: f64 = catalog.category_weights().iter().map(|(_, w)| w).sum();
    assert!((total - 1.0).abs() < 1e-6);
    assert_eq!(catalog.category_weights().len(), Category::ALL.len());

    let nova = catalog.asset(&AssetId::new("NOVA")).unwrap();
    assert_eq!(nova.base_price, dec!(142.50));
}

#[test]
fn every_category_has_events() {
    let catalog = Catalog::builtin().unwrap();
    for category in Category::ALL {
        assert!(
            catalog.events_in(category).next().is_some(),
            "no events for {category}"
        );
    }
}

#[test]
fn minimal_catalog_parses_with_zero_weight_fill() {
    let catalog = Catalog::parse(MINIMAL).unwrap();
    assert!(catalog.event(&EventId::new("nova-up")).is_some());
    assert!(catalog.chain(&ChainId::new("nova-rumor")).is_some());
    assert!(catalog.stories().is_empty());

    let energy = catalog
        .category_weights()
        .iter()
        .find(|(c, _)| *c == Category::Energy)
        .map(|(_, w)| *w);
    assert!(energy.is_some_and(|w| w.abs() < f64::EPSILON));
}

// ---------------------------------------------------------------------------
// Load-time failures
// ---------------------------------------------------------------------------

#[test]
fn missing_file_is_io_error() {
    let result = Catalog::from_file(Path::new("/definitely/not/here.yaml"));
    assert!(matches!(result, Err(CatalogError::Io { .. })));
}

#[test]
fn malformed_yaml_is_yaml_error() {
    let result = Catalog::parse("assets: [ {");
    assert!(matches!(result, Err(CatalogError::Yaml { .. })));
}

#[test]
fn duplicate_event_id_fails() {
    let yaml = MINIMAL.replace(
        "chains:",
        "  - id: nova-up\n    category: tech\n    headline: Again\nchains:",
    );
    let result = Catalog::parse(&yaml);
    assert!(matches!(
        result,
        Err(CatalogError::DuplicateId { kind: "event", .. })
    ));
}

#[test]
fn unknown_asset_fails() {
    let yaml = MINIMAL.replace("effects: { NOVA: 0.05 }", "effects: { ZZZZ: 0.05 }");
    let result = Catalog::parse(&yaml);
    assert!(matches!(result, Err(CatalogError::UnknownAsset { .. })));
}

#[test]
fn unnormalized_category_weights_fail() {
    let yaml = MINIMAL.replace("tech: 1.0", "tech: 0.7");
    let result = Catalog::parse(&yaml);
    assert!(matches!(
        result,
        Err(CatalogError::WeightsNotNormalized { .. })
    ));
}

#[test]
fn unnormalized_outcomes_fail() {
    let yaml = MINIMAL.replace("probability: 0.5 }\n      - { headline: Walk", "probability: 0.2 }\n      - { headline: Walk");
    let result = Catalog::parse(&yaml);
    assert!(matches!(
        result,
        Err(CatalogError::WeightsNotNormalized { .. })
    ));
}

#[test]
fn zero_duration_chain_fails() {
    let yaml = MINIMAL.replace("duration_days: 2", "duration_days: 0");
    let result = Catalog::parse(&yaml);
    assert!(matches!(result, Err(CatalogError::InvalidValue { .. })));
}

#[test]
fn story_must_end_in_branch() {
    let yaml = MINIMAL.replace(
        "quiet:",
        "stories:\n  - id: s\n    category: tech\n    stages:\n      - { kind: beat, headline: Only a rumor }\nquiet:",
    );
    let result = Catalog::parse(&yaml);
    assert!(matches!(result, Err(CatalogError::InvalidValue { .. })));
}

#[test]
fn non_positive_price_fails() {
    let yaml = MINIMAL.replace("\"100.00\"", "\"0\"");
    let result = Catalog::parse(&yaml);
    assert!(matches!(result, Err(CatalogError::InvalidValue { .. })));
}

#[test]
fn empty_quiet_pool_fails() {
    let yaml = MINIMAL.replace("quiet:\n  - { id: q1, headline: Quiet }\n", "quiet: []\n");
    let result = Catalog::parse(&yaml);
    assert!(matches!(
        result,
        Err(CatalogError::Empty {
            what: "quiet headlines"
        })
    ));
}
