//! Errors raised while constructing the engine.
//!
//! Resolving a day never fails: stale catalog references degrade to neutral
//! headlines and are logged. Only building an engine can go wrong.

use bullrun_catalog::CatalogError;

use crate::clock::ClockError;
use crate::config::ConfigError;

/// Errors that can occur while building a [`NarrativeEngine`].
///
/// [`NarrativeEngine`]: crate::pipeline::NarrativeEngine
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The configuration is invalid.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The game length is invalid.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// The catalog could not be loaded.
    #[error("catalog error: {source}")]
    Catalog {
        /// The underlying catalog error.
        #[from]
        source: CatalogError,
    },
}
