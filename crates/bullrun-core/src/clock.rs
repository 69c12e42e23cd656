//! Game clock and phase derivation.
//!
//! The day counter is the single source of truth for time. The dramatic
//! [`Phase`] and the progress fraction are computed from `(day, total_days)`
//! and never stored independently; the Director's cached phase is refreshed
//! from here every day.
//!
//! Days are 1-indexed. A clock at day 0 is a game that has not resolved any
//! day yet.

use bullrun_types::Phase;

/// Progress fractions at which each phase after [`Phase::Setup`] begins.
const PHASE_BOUNDARIES: [(f64, Phase); 5] = [
    (0.10, Phase::RisingAction),
    (0.35, Phase::Midpoint),
    (0.50, Phase::Escalation),
    (0.75, Phase::Climax),
    (0.90, Phase::Resolution),
];

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Day counter would overflow.
    #[error("day counter overflow: cannot advance beyond u32::MAX")]
    DayOverflow,

    /// Invalid clock parameters (e.g. a zero-length game).
    #[error("invalid clock configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong.
        reason: String,
    },
}

/// Game clock for a fixed-length game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameClock {
    /// Last resolved day (0 before the first day).
    day: u32,
    /// Number of days in the game.
    total_days: u32,
}

impl GameClock {
    /// Create a clock at day 0.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `total_days` is 0.
    pub fn new(total_days: u32) -> Result<Self, ClockError> {
        Self::from_parts(0, total_days)
    }

    /// Create a clock from explicit parameters (state restoration).
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::InvalidConfig`] if `total_days` is 0.
    pub fn from_parts(day: u32, total_days: u32) -> Result<Self, ClockError> {
        if total_days == 0 {
            return Err(ClockError::InvalidConfig {
                reason: "total_days must be at least 1".to_owned(),
            });
        }
        Ok(Self { day, total_days })
    }

    /// Advance by one day. Returns the new day.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::DayOverflow`] if the counter would exceed
    /// `u32::MAX`.
    pub fn advance(&mut self) -> Result<u32, ClockError> {
        self.day = self.day.checked_add(1).ok_or(ClockError::DayOverflow)?;
        Ok(self.day)
    }

    /// Last resolved day.
    pub const fn day(&self) -> u32 {
        self.day
    }

    /// Number of days in the game.
    pub const fn total_days(&self) -> u32 {
        self.total_days
    }

    /// Phase of the current day.
    pub fn phase(&self) -> Phase {
        phase_of(self.day, self.total_days)
    }

    /// Fraction of the game elapsed before the current day started.
    pub fn progress(&self) -> f64 {
        progress_of(self.day, self.total_days)
    }

    /// Days left after the current day.
    pub const fn days_remaining(&self) -> u32 {
        self.total_days.saturating_sub(self.day)
    }

    /// Whether every day of the game has been resolved.
    pub const fn is_finished(&self) -> bool {
        self.day >= self.total_days
    }
}

/// Fraction of the game elapsed before `day` started: `(day - 1) / total`.
///
/// Clamped to `[0, 1]`; day 0 and day 1 both report 0.
pub fn progress_of(day: u32, total_days: u32) -> f64 {
    if total_days == 0 {
        return 1.0;
    }
    let elapsed = f64::from(day.saturating_sub(1));
    (elapsed / f64::from(total_days)).clamp(0.0, 1.0)
}

/// Phase of `day` in a game of `total_days`.
pub fn phase_of(day: u32, total_days: u32) -> Phase {
    let progress = progress_of(day, total_days);
    PHASE_BOUNDARIES
        .iter()
        .rev()
        .find(|(start, _)| progress >= *start)
        .map_or(Phase::Setup, |(_, phase)| *phase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clock_starts_at_zero() {
        let clock = GameClock::new(30);
        assert!(clock.is_ok());
        let clock = clock.ok();
        assert_eq!(clock.map(|c| c.day()), Some(0));
        assert_eq!(clock.map(|c| c.days_remaining()), Some(30));
    }

    #[test]
    fn zero_length_game_is_rejected() {
        assert!(matches!(
            GameClock::new(0),
            Err(ClockError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn advance_increments_and_overflows() {
        let mut clock = GameClock::from_parts(0, 30).ok().unwrap_or(GameClock {
            day: 0,
            total_days: 30,
        });
        assert_eq!(clock.advance().ok(), Some(1));
        assert_eq!(clock.advance().ok(), Some(2));

        let mut clock = GameClock {
            day: u32::MAX,
            total_days: 30,
        };
        assert!(matches!(clock.advance(), Err(ClockError::DayOverflow)));
    }

    #[test]
    fn phases_follow_thirty_day_arc() {
        let phases: Vec<Phase> = (1..=30).map(|day| phase_of(day, 30)).collect();
        assert_eq!(phases.first(), Some(&Phase::Setup));
        // Day 3: (3-1)/30 < 0.10
        assert_eq!(phase_of(3, 30), Phase::Setup);
        // Day 4: 3/30 = 0.10
        assert_eq!(phase_of(4, 30), Phase::RisingAction);
        assert_eq!(phase_of(12, 30), Phase::Midpoint);
        assert_eq!(phase_of(16, 30), Phase::Escalation);
        assert_eq!(phase_of(24, 30), Phase::Climax);
        assert_eq!(phase_of(30, 30), Phase::Resolution);

        // Phases never go backwards.
        assert!(phases.windows(2).all(|w| w.first() <= w.get(1)));
    }

    #[test]
    fn days_past_the_end_stay_in_resolution() {
        assert_eq!(phase_of(45, 30), Phase::Resolution);
        assert!((progress_of(45, 30) - 1.0).abs() < 1e-12);
        let clock = GameClock { day: 45, total_days: 30 };
        assert!(clock.is_finished());
        assert_eq!(clock.days_remaining(), 0);
    }
}
