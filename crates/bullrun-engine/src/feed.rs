//! Day callback that streams each resolved day as one JSON line.
//!
//! The record carries what a game UI consumes: the dated headlines, every
//! asset's price movement and the open rumors. The full [`GameState`] is
//! left out; it is only needed for save files.
//!
//! [`GameState`]: bullrun_core::GameState

use std::collections::BTreeMap;
use std::io::Write;

use bullrun_core::{DayActivity, DayCallback, DayOutcome};
use bullrun_types::{AssetId, Headline, Phase, PriceDelta, Rumor};
use serde::Serialize;
use tracing::{debug, error};

use crate::error::AppError;

/// One line of the day feed.
#[derive(Debug, Serialize)]
struct DayRecord<'a> {
    day: u32,
    phase: Phase,
    headlines: &'a [Headline],
    prices: &'a BTreeMap<AssetId, PriceDelta>,
    rumors: &'a [Rumor],
    activity: &'a DayActivity,
}

impl<'a> From<&'a DayOutcome> for DayRecord<'a> {
    fn from(outcome: &'a DayOutcome) -> Self {
        Self {
            day: outcome.day,
            phase: outcome.phase,
            headlines: &outcome.headlines,
            prices: &outcome.price_deltas,
            rumors: &outcome.rumors,
            activity: &outcome.activity,
        }
    }
}

/// Writes a [`DayRecord`] per day to `out`.
///
/// `on_day` cannot fail, so the first write error is kept and every later
/// day is skipped. Call [`FeedCallback::finish`] once the game is over.
pub struct FeedCallback<W: Write> {
    out: W,
    failure: Option<AppError>,
}

impl<W: Write> FeedCallback<W> {
    /// Create a feed writing to `out`.
    pub const fn new(out: W) -> Self {
        Self { out, failure: None }
    }

    /// Flush the output and surface the first error, if any.
    pub fn finish(mut self) -> Result<W, AppError> {
        if let Some(failure) = self.failure.take() {
            return Err(failure);
        }
        self.out.flush()?;
        Ok(self.out)
    }

    fn write_day(&mut self, outcome: &DayOutcome) -> Result<(), AppError> {
        serde_json::to_writer(&mut self.out, &DayRecord::from(outcome))?;
        self.out.write_all(b"\n")?;
        Ok(())
    }
}

impl<W: Write> DayCallback for FeedCallback<W> {
    fn on_day(&mut self, outcome: &DayOutcome) {
        if self.failure.is_some() {
            return;
        }
        match self.write_day(outcome) {
            Ok(()) => debug!(day = outcome.day, headlines = outcome.headlines.len(), "Day written"),
            Err(err) => {
                error!(day = outcome.day, error = %err, "Failed to write day, feed stopped");
                self.failure = Some(err);
            }
        }
    }
}
