//! Simulation clock
//!
//! Converts real seconds into in-world hours using the configured day length.
//! All actor timers (cooldowns, bleed-out, sleep) are driven from the
//! `FrameTime` this produces.

use serde::{Deserialize, Serialize};

/// Real seconds in one in-world day when nothing else is configured
pub const DEFAULT_DAY_LENGTH_SECONDS: f32 = 3600.0;

/// Time information for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FrameTime {
    /// Real seconds since the previous tick (never negative)
    pub delta_seconds: f32,
    /// In-world hours elapsed during this tick
    pub delta_game_hours: f32,
    /// Real seconds since the clock started, at the end of this tick
    pub now_seconds: f64,
}

impl FrameTime {
    pub fn delta_game_minutes(&self) -> f32 {
        self.delta_game_hours * 60.0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationClock {
    elapsed_seconds: f64,
    day_length_seconds: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(DEFAULT_DAY_LENGTH_SECONDS)
    }
}

impl SimulationClock {
    pub fn new(day_length_seconds: f32) -> Self {
        Self {
            elapsed_seconds: 0.0,
            day_length_seconds: if day_length_seconds > 0.0 {
                day_length_seconds
            } else {
                DEFAULT_DAY_LENGTH_SECONDS
            },
        }
    }

    pub fn now(&self) -> f64 {
        self.elapsed_seconds
    }

    pub fn day_length_seconds(&self) -> f32 {
        self.day_length_seconds
    }

    pub fn game_hours_per_second(&self) -> f32 {
        24.0 / self.day_length_seconds
    }

    /// Advance the clock and describe the tick that just elapsed
    pub fn advance(&mut self, delta_seconds: f32) -> FrameTime {
        let delta = delta_seconds.max(0.0);
        self.elapsed_seconds += delta as f64;
        FrameTime {
            delta_seconds: delta,
            delta_game_hours: delta * self.game_hours_per_second(),
            now_seconds: self.elapsed_seconds,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_conversion() {
        // 24 real minutes per day: one real minute is one game hour
        let mut clock = SimulationClock::new(1440.0);
        let frame = clock.advance(60.0);
        assert!((frame.delta_game_hours - 1.0).abs() < 1e-5);
        assert!((frame.delta_game_minutes() - 60.0).abs() < 1e-3);
        assert_eq!(clock.now(), 60.0);
    }

    #[test]
    fn test_negative_delta_is_clamped() {
        let mut clock = SimulationClock::default();
        let frame = clock.advance(-1.0);
        assert_eq!(frame.delta_seconds, 0.0);
        assert_eq!(clock.now(), 0.0);
    }

    #[test]
    fn test_invalid_day_length_falls_back() {
        let clock = SimulationClock::new(0.0);
        assert_eq!(clock.day_length_seconds(), DEFAULT_DAY_LENGTH_SECONDS);
    }
}
