//! Static catalogs for the Bull Run narrative market engine.
//!
//! The catalog is everything the engine draws from but never mutates: the
//! asset registry, the single-day event pool with its category weight table,
//! chain, story and scheduled-event definitions, and the flavor and quiet
//! headline pools.
//!
//! Catalogs are loaded from YAML and validated once. Any duplicate id,
//! dangling asset reference or unnormalized weight table is a load-time
//! [`CatalogError`]; the engine never resolves ids ad hoc.
//!
//! # Modules
//!
//! - [`catalog`] -- [`CatalogFile`] (on-disk layout) and [`Catalog`] (validated)
//! - [`registry`] -- Ordered, id-indexed [`Registry`]
//! - [`error`] -- [`CatalogError`]

pub mod catalog;
pub mod error;
pub mod registry;
mod validate;

pub use catalog::{Catalog, CatalogFile};
pub use error::CatalogError;
pub use registry::Registry;
pub use validate::{MAX_BRANCHES, MIN_BRANCHES, WEIGHT_TOLERANCE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_loads() {
        let catalog = Catalog::builtin();
        assert!(catalog.is_ok(), "builtin catalog failed: {catalog:?}");
    }
}
