//! Game binary for Bull Run.
//!
//! Plays one full game headlessly and streams every resolved day to stdout
//! as a JSON line. Logs go to stderr so the feed stays machine-readable.
//!
//! # Startup Sequence
//!
//! 1. Load configuration from `bullrun-config.yaml` (defaults if absent)
//! 2. Initialize structured logging (tracing)
//! 3. Build the narrative engine and its catalog
//! 4. Run the game loop, writing the day feed
//! 5. Log the final prices

mod error;
mod feed;

use std::io;
use std::path::Path;

use bullrun_core::config::LogFormat;
use bullrun_core::{EngineConfig, NarrativeEngine, run_game};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::error::AppError;
use crate::feed::FeedCallback;

/// Config file looked up relative to the working directory.
const CONFIG_PATH: &str = "bullrun-config.yaml";

/// Application entry point.
///
/// # Errors
///
/// Returns an error if configuration, engine setup or the day feed fails.
fn main() -> Result<(), AppError> {
    // 1. Load configuration. Logging is not up yet, so remember whether
    //    the file was found and report it afterwards.
    let (config, from_file) = load_config()?;

    // 2. Initialize structured logging.
    init_tracing(&config);
    info!(
        from_file,
        total_days = config.game.total_days,
        seed = config.game.seed,
        "bullrun-engine starting"
    );

    // 3. Build the engine.
    let engine = NarrativeEngine::from_config(config)?;
    let state = engine.new_game();

    // 4. Play the game.
    let mut feed = FeedCallback::new(io::BufWriter::new(io::stdout().lock()));
    let summary = run_game(&engine, state, &mut feed);
    feed.finish()?;

    // 5. Log results.
    for (asset, price) in &summary.final_prices {
        info!(asset = %asset, price = %price, "Final price");
    }
    info!(
        days_played = summary.days_played,
        headlines = summary.headline_count,
        "bullrun-engine shutdown complete"
    );

    Ok(())
}

/// Load `bullrun-config.yaml`, falling back to defaults when it is absent.
fn load_config() -> Result<(EngineConfig, bool), AppError> {
    let config_path = Path::new(CONFIG_PATH);
    if config_path.exists() {
        Ok((EngineConfig::from_file(config_path)?, true))
    } else {
        let mut config = EngineConfig::default();
        config.game.apply_env_overrides();
        Ok((config, false))
    }
}

/// Install the global subscriber. `RUST_LOG` wins over `logging.level`.
fn init_tracing(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(true);

    match config.logging.format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
