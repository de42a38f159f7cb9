use instant::Instant;
use std::time::Duration;

use crate::constants::MAX_FRAME_DT_SEC;

/// Wall-clock frame timer for the host loop.
///
/// Deltas are clamped to `max_dt` so a stalled or backgrounded page resumes
/// with an ordinary step instead of a jump.
pub struct FrameClock {
    started: Instant,
    last: Instant,
    max_dt: f32,
}

/// Timing for one frame: clamped delta plus total clock time in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    pub dt: f32,
    pub now: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(MAX_FRAME_DT_SEC)
    }
}

impl FrameClock {
    pub fn new(max_dt: f32) -> Self {
        let now = Instant::now();
        Self {
            started: now,
            last: now,
            max_dt,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let elapsed = now - self.last;
        self.last = now;
        FrameTime {
            dt: clamp_frame_dt(elapsed, self.max_dt),
            now: (now - self.started).as_secs_f64(),
        }
    }
}

#[inline]
pub fn clamp_frame_dt(elapsed: Duration, max_dt: f32) -> f32 {
    elapsed.as_secs_f32().min(max_dt)
}
