//! Looping scroll position of the world group.
//!
//! The world never moves past `loop_end`: once the offset reaches it, the group
//! snaps back to `loop_start` and a fresh segment begins. Because city segments
//! repeat, the snap is invisible and the drive looks endless.

use crate::config::{Easing, WorldConfig};
use crate::error::ConfigError;

const VELOCITY_SETTLE_EPSILON: f32 = 1e-3;

/// Observable scroll state, read by the renderer once per frame.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldState {
    pub offset: f32,
    pub velocity: f32,
    pub target_velocity: f32,
    pub loop_start: f32,
    pub loop_end: f32,
    pub running: bool,
    pub last_offset_before_pause: Option<f32>,
}

/// Drives `WorldState` from a play/pause signal.
///
/// Position is time based within a segment: `offset = base + elapsed * velocity`
/// rather than a per-frame sum, so long runs at cruise speed do not accumulate
/// drift. A segment starts on resume, on wrap, and on every frame in which the
/// velocity is still easing toward its target.
///
/// Typical usage:
/// - Construct with `WorldScroller::new(&config)`
/// - Call `set_target_velocity` whenever the music starts or stops
/// - Call `advance(dt, playing)` once per frame and apply the returned offset
pub struct WorldScroller {
    state: WorldState,
    acceleration_rate: f32,
    nominal_step: f32,
    easing: Easing,
    base_offset: f32,
    segment_time: f32,
}

impl WorldScroller {
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            state: WorldState {
                offset: config.loop_start,
                velocity: 0.0,
                target_velocity: config.cruise_velocity,
                loop_start: config.loop_start,
                loop_end: config.loop_end,
                running: false,
                last_offset_before_pause: None,
            },
            acceleration_rate: config.acceleration_rate,
            nominal_step: config.nominal_step,
            easing: config.easing,
            base_offset: config.loop_start,
            segment_time: 0.0,
        })
    }

    pub fn state(&self) -> &WorldState {
        &self.state
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.state.offset
    }

    /// Set the steady-state speed the scroller eases toward.
    ///
    /// Negative targets would run the world backwards out of its loop, so
    /// they are clamped to zero.
    pub fn set_target_velocity(&mut self, velocity: f32) {
        if !(velocity >= 0.0) {
            log::warn!("[world] clamping target velocity {} to 0", velocity);
            self.state.target_velocity = 0.0;
            return;
        }
        self.state.target_velocity = velocity;
    }

    /// Advance one frame and return the new offset.
    pub fn advance(&mut self, dt: f32, playing: bool) -> f32 {
        let dt = dt.max(0.0);
        let s = &mut self.state;

        if !playing {
            if s.running {
                s.last_offset_before_pause = Some(s.offset);
                s.velocity = 0.0;
                s.running = false;
                log::info!("[world] paused at offset {:.2}", s.offset);
            }
            return s.offset;
        }

        if !s.running {
            s.running = true;
            if let Some(snapshot) = s.last_offset_before_pause.take() {
                s.offset = snapshot;
            }
            self.base_offset = s.offset;
            self.segment_time = 0.0;
            log::info!("[world] resumed at offset {:.2}", s.offset);
        }

        let step = match self.easing {
            Easing::FixedStep => self.nominal_step,
            Easing::DeltaTime => dt,
        };
        let blend = (self.acceleration_rate * step).min(1.0);
        let previous_velocity = s.velocity;
        s.velocity += (s.target_velocity - s.velocity) * blend;
        if (s.target_velocity - s.velocity).abs() < VELOCITY_SETTLE_EPSILON {
            s.velocity = s.target_velocity;
        }

        // While easing, the segment restarts every frame so a falling velocity
        // never pulls the offset backwards.
        if s.velocity != previous_velocity {
            self.base_offset = s.offset;
            self.segment_time = 0.0;
        }
        self.segment_time += dt;
        s.offset = self.base_offset + self.segment_time * s.velocity;

        if s.offset >= s.loop_end {
            s.offset = s.loop_start;
            self.base_offset = s.loop_start;
            self.segment_time = 0.0;
            log::debug!("[world] wrapped to {:.1}", s.loop_start);
        }
        s.offset
    }
}
