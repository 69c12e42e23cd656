//! Error types for the game binary.
//!
//! [`AppError`] wraps every failure mode of startup and the game loop so
//! `main` can propagate with `?`.

/// Top-level error for the game binary.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration loading or validation failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: bullrun_core::config::ConfigError,
    },

    /// Engine construction failed.
    #[error("engine error: {source}")]
    Engine {
        /// The underlying engine error.
        #[from]
        source: bullrun_core::EngineError,
    },

    /// Writing the day feed failed.
    #[error("output error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// A day could not be serialized.
    #[error("serialization error: {source}")]
    Json {
        /// The underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}
