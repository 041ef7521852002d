//! Read-only helpers turning hazard proximity into presentation cues.

use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Added to the count of revealed cells next to the hazard.
pub const HAUNTED_COUNT_BOOST: u8 = 4;

/// Target suspense volume for a hazard-to-player distance.
pub fn suspense_volume(distance: Option<Coord>) -> f32 {
    match distance {
        Some(0 | 1) => 1.0,
        Some(2) => 0.4,
        Some(3) => 0.2,
        Some(4) => 0.1,
        _ => 0.0,
    }
}

/// How a revealed count looks to the player while the hazard sits next to it.
pub fn haunted_count(count: u8) -> u8 {
    count.saturating_add(HAUNTED_COUNT_BOOST).min(8)
}

fn move_toward(from: f32, to: f32, max_delta: f32) -> f32 {
    if to > from {
        (from + max_delta).min(to)
    } else {
        (from - max_delta).max(to)
    }
}

/// Smoothed suspense level that chases [`suspense_volume`] at a fixed rate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SuspenseMeter {
    level: f32,
    rate_per_sec: f32,
}

impl SuspenseMeter {
    pub const DEFAULT_RATE_PER_SEC: f32 = 2.0;

    pub fn new(rate_per_sec: f32) -> Self {
        Self {
            level: 0.0,
            rate_per_sec,
        }
    }

    pub fn update(&mut self, distance: Option<Coord>, delta: Duration) -> f32 {
        let target = suspense_volume(distance);
        self.level = move_toward(self.level, target, delta.as_secs_f32() * self.rate_per_sec);
        self.level
    }
}

impl Default for SuspenseMeter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_RATE_PER_SEC)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn volume_buckets() {
        assert_eq!(suspense_volume(Some(0)), 1.0);
        assert_eq!(suspense_volume(Some(1)), 1.0);
        assert_eq!(suspense_volume(Some(2)), 0.4);
        assert_eq!(suspense_volume(Some(3)), 0.2);
        assert_eq!(suspense_volume(Some(4)), 0.1);
        assert_eq!(suspense_volume(Some(5)), 0.0);
        assert_eq!(suspense_volume(None), 0.0);
    }

    #[test]
    fn haunted_count_is_capped() {
        assert_eq!(haunted_count(0), 4);
        assert_eq!(haunted_count(3), 7);
        assert_eq!(haunted_count(6), 8);
    }

    #[test]
    fn meter_ramps_at_fixed_rate() {
        let mut meter = SuspenseMeter::default();

        assert_eq!(meter.update(Some(1), Duration::from_millis(250)), 0.5);
        assert_eq!(meter.update(Some(1), Duration::from_millis(250)), 1.0);
        assert_eq!(meter.update(Some(1), Duration::from_millis(250)), 1.0);
        assert_eq!(meter.update(None, Duration::from_millis(125)), 0.75);
    }
}
