use crate::archetype::ArchetypeTable;
use crate::constants::*;
use crate::error::ConfigError;

/// How velocity easing is scaled each frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Multiply by a fixed nominal step regardless of the real frame delta.
    /// Perceived acceleration varies slightly with frame rate.
    #[default]
    FixedStep,
    /// Multiply by the real frame delta.
    DeltaTime,
}

/// Parameters of the scrolling world group.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldConfig {
    pub loop_start: f32,
    pub loop_end: f32,
    pub cruise_velocity: f32,
    pub acceleration_rate: f32,
    pub nominal_step: f32,
    pub easing: Easing,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            loop_start: LOOP_START,
            loop_end: LOOP_END,
            cruise_velocity: CRUISE_VELOCITY,
            acceleration_rate: ACCELERATION_RATE,
            nominal_step: NOMINAL_STEP,
            easing: Easing::FixedStep,
        }
    }
}

impl WorldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.loop_start.is_finite() || !self.loop_end.is_finite() {
            return Err(ConfigError::NonFinite("loop bounds"));
        }
        if self.loop_start >= self.loop_end {
            return Err(ConfigError::InvalidLoopBounds {
                start: self.loop_start,
                end: self.loop_end,
            });
        }
        if !self.cruise_velocity.is_finite() {
            return Err(ConfigError::NonFinite("cruise velocity"));
        }
        if self.cruise_velocity < 0.0 {
            return Err(ConfigError::NegativeVelocity(self.cruise_velocity));
        }
        if !(self.acceleration_rate.is_finite() && self.acceleration_rate > 0.0) {
            return Err(ConfigError::NonPositiveAcceleration(self.acceleration_rate));
        }
        if !(self.nominal_step.is_finite() && self.nominal_step > 0.0) {
            return Err(ConfigError::NonFinite("nominal step"));
        }
        Ok(())
    }
}

/// Parameters of the oncoming traffic population.
#[derive(Clone, Debug)]
pub struct TrafficConfig {
    pub archetypes: ArchetypeTable,
    pub spawn_x: f32,
    pub exit_x: f32,
    pub max_live: usize,
    pub min_interval: f32,
    pub max_interval: f32,
}

impl Default for TrafficConfig {
    fn default() -> Self {
        Self {
            archetypes: ArchetypeTable::default(),
            spawn_x: SPAWN_X,
            exit_x: EXIT_X,
            max_live: MAX_LIVE_VEHICLES,
            min_interval: SPAWN_INTERVAL_MIN_SEC,
            max_interval: SPAWN_INTERVAL_MAX_SEC,
        }
    }
}

impl TrafficConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.spawn_x.is_finite() || !self.exit_x.is_finite() {
            return Err(ConfigError::NonFinite("spawn/exit positions"));
        }
        if self.spawn_x >= self.exit_x {
            return Err(ConfigError::InvalidSpawnRange {
                spawn: self.spawn_x,
                exit: self.exit_x,
            });
        }
        if self.max_live == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.min_interval.is_finite() || !self.max_interval.is_finite() {
            return Err(ConfigError::NonFinite("spawn interval"));
        }
        if self.min_interval < 0.0 || self.min_interval > self.max_interval {
            return Err(ConfigError::InvalidSpawnInterval {
                min: self.min_interval,
                max: self.max_interval,
            });
        }
        if self.archetypes.is_empty() {
            return Err(ConfigError::EmptyArchetypes);
        }
        Ok(())
    }
}

/// Complete scene configuration handed to `DriveSession::new`.
#[derive(Clone, Debug, Default)]
pub struct DriveConfig {
    pub world: WorldConfig,
    pub traffic: TrafficConfig,
}

impl DriveConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.world.validate()?;
        self.traffic.validate()
    }
}
