//! Error types for the `bullrun-catalog` crate.
//!
//! Every catalog problem is a load-time failure. Once a [`Catalog`] exists,
//! lookups by id are infallible apart from returning `None`.
//!
//! [`Catalog`]: crate::Catalog

use bullrun_types::AssetId;

/// Errors that can occur while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Failed to read the catalog file from disk.
    #[error("failed to read catalog file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse catalog YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// Two entries in the same id space share an id.
    #[error("duplicate {kind} id: {id}")]
    DuplicateId {
        /// Which id space (`"asset"`, `"event"`, `"chain"`, ...).
        kind: &'static str,
        /// The repeated id.
        id: String,
    },

    /// An effect map references an asset that is not in the registry.
    #[error("{owner} references unknown asset {asset}")]
    UnknownAsset {
        /// The entry holding the bad reference.
        owner: String,
        /// The unknown asset id.
        asset: AssetId,
    },

    /// Weights or probabilities that must sum to 1 do not.
    #[error("weights of {owner} sum to {sum}, expected 1")]
    WeightsNotNormalized {
        /// The entry holding the weights.
        owner: String,
        /// The actual sum.
        sum: f64,
    },

    /// A field holds a value outside its allowed range.
    #[error("invalid value in {owner}: {reason}")]
    InvalidValue {
        /// The entry holding the bad value.
        owner: String,
        /// Explanation of what is wrong.
        reason: String,
    },

    /// A required pool or registry is empty.
    #[error("catalog has no {what}")]
    Empty {
        /// Which collection is empty.
        what: &'static str,
    },
}

impl From<serde_yml::Error> for CatalogError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}
