//! Time management for the replay
//!
//! The replay operates on a single clock measured in abstract time units.
//! Each replayed burst advances the clock by its length; the clock never
//! moves backwards.

use serde::{Deserialize, Serialize};

/// Simulation time in abstract units
pub type Time = u64;

/// Monotonic clock advanced by instruction bursts
///
/// # Example
/// ```
/// use sched_replay_core_rs::SimulationClock;
///
/// let mut clock = SimulationClock::new();
/// assert_eq!(clock.now(), 0);
///
/// clock.advance(5);
/// assert_eq!(clock.now(), 5);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationClock {
    /// Time units elapsed since replay start
    now: Time,
}

impl SimulationClock {
    /// Create a clock at time zero
    pub fn new() -> Self {
        Self { now: 0 }
    }

    /// Advance the clock by `burst` time units
    ///
    /// Returns the time after advancing.
    ///
    /// # Example
    /// ```
    /// use sched_replay_core_rs::SimulationClock;
    ///
    /// let mut clock = SimulationClock::new();
    /// assert_eq!(clock.advance(3), 3);
    /// assert_eq!(clock.advance(0), 3);
    /// assert_eq!(clock.advance(4), 7);
    /// ```
    pub fn advance(&mut self, burst: Time) -> Time {
        self.now = self.now.saturating_add(burst);
        self.now
    }

    /// Current time (total elapsed units)
    pub fn now(&self) -> Time {
        self.now
    }

    /// Check whether any time has elapsed
    pub fn has_elapsed(&self) -> bool {
        self.now > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_burst_leaves_clock_unchanged() {
        let mut clock = SimulationClock::new();
        clock.advance(0);
        assert_eq!(clock.now(), 0);
        assert!(!clock.has_elapsed());
    }

    #[test]
    fn test_advance_saturates() {
        let mut clock = SimulationClock::new();
        clock.advance(Time::MAX);
        clock.advance(10);
        assert_eq!(clock.now(), Time::MAX);
    }
}
