use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

use super::TimeSource;

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Corrected wall-clock instant read at the tick.
    ///
    /// Everything the clock displays derives from this value; nothing is
    /// accumulated from `dt`, so dropped frames never cause drift.
    pub wall: DateTime<Utc>,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stalled loop (debugger, suspended terminal)
/// reports a bounded `dt`. The wall instant is never clamped.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta-time baseline, e.g. when a view is remounted.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Advances the clock, reading the wall instant from `source`.
    pub fn tick(&mut self, source: &TimeSource) -> FrameTime {
        let now = Instant::now();
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);
        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            wall: source.now(),
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::time::TimeOffset;
    use crate::time::testing::ManualClock;

    #[test]
    fn frame_index_increments() {
        let source = TimeSource::new();
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(&source).frame_index, 0);
        assert_eq!(clock.tick(&source).frame_index, 1);
        assert_eq!(clock.tick(&source).frame_index, 2);
    }

    #[test]
    fn dt_is_clamped_to_minimum() {
        let source = TimeSource::new();
        let mut clock = FrameClock::with_clamps(Duration::from_millis(5), Duration::from_millis(10));
        let ft = clock.tick(&source);
        assert!(ft.dt >= 0.005 - f32::EPSILON);
        assert!(ft.dt <= 0.010 + f32::EPSILON);
    }

    #[test]
    fn wall_time_comes_from_corrected_source() {
        let t = Utc.with_ymd_and_hms(2026, 1, 1, 23, 59, 59).unwrap();
        let source = TimeSource::with_clock(ManualClock::at(t));
        source.apply_offset(TimeOffset::from_millis(1_000));

        let ft = FrameClock::new().tick(&source);
        assert_eq!(ft.wall, Utc.with_ymd_and_hms(2026, 1, 2, 0, 0, 0).unwrap());
    }
}
