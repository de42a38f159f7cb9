use thiserror::Error;

use crate::archetype::ModelKind;

/// Configuration rejected at construction time.
///
/// The simulation itself never fails once built; every invariant it relies on
/// is checked here, once.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("loop bounds must satisfy start < end (start={start}, end={end})")]
    InvalidLoopBounds { start: f32, end: f32 },

    #[error("cruise velocity must be non-negative, got {0}")]
    NegativeVelocity(f32),

    #[error("acceleration rate must be positive, got {0}")]
    NonPositiveAcceleration(f32),

    #[error("spawn position must lie before the exit (spawn={spawn}, exit={exit})")]
    InvalidSpawnRange { spawn: f32, exit: f32 },

    #[error("traffic capacity must be greater than zero")]
    ZeroCapacity,

    #[error("spawn interval must satisfy 0 <= min <= max (min={min}, max={max})")]
    InvalidSpawnInterval { min: f32, max: f32 },

    #[error("archetype table is empty")]
    EmptyArchetypes,

    #[error("archetype {kind:?} must have a positive speed, got {speed}")]
    NonPositiveSpeed { kind: ModelKind, speed: f32 },

    #[error("{0} must be finite")]
    NonFinite(&'static str),
}

/// Failure decoding a message pushed by the MIDI relay.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("malformed MIDI message: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("track {0} is outside the supported range")]
    TrackOutOfRange(u8),
}
