use rand::Rng;

use crate::constants::{INNER_LANE_Z, ONCOMING_HEADING, OUTER_LANE_Z};
use crate::error::ConfigError;

/// Visual archetype of an oncoming vehicle.
///
/// The set is closed; the renderer maps each tag to its own representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ModelKind {
    Sedan,
    Coupe,
    Taxi,
    Pickup,
    Van,
}

impl ModelKind {
    pub const ALL: [ModelKind; 5] = [
        ModelKind::Sedan,
        ModelKind::Coupe,
        ModelKind::Taxi,
        ModelKind::Pickup,
        ModelKind::Van,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ModelKind::Sedan => "sedan",
            ModelKind::Coupe => "coupe",
            ModelKind::Taxi => "taxi",
            ModelKind::Pickup => "pickup",
            ModelKind::Van => "van",
        }
    }
}

/// Template a vehicle is spawned from.
///
/// Fields:
/// - `lateral_offset`: fixed perpendicular placement (lane)
/// - `heading`: yaw in radians around the up axis
/// - `speed`: travel speed along the axis, units per second
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Archetype {
    pub model_kind: ModelKind,
    pub lateral_offset: f32,
    pub heading: f32,
    pub speed: f32,
}

/// Mapping from model tag to archetype, resolved once at startup.
#[derive(Clone, Debug)]
pub struct ArchetypeTable {
    entries: Vec<Archetype>,
}

impl ArchetypeTable {
    pub fn new(entries: Vec<Archetype>) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::EmptyArchetypes);
        }
        for a in &entries {
            if !a.lateral_offset.is_finite() || !a.heading.is_finite() {
                return Err(ConfigError::NonFinite("archetype placement"));
            }
            if !(a.speed.is_finite() && a.speed > 0.0) {
                return Err(ConfigError::NonPositiveSpeed {
                    kind: a.model_kind,
                    speed: a.speed,
                });
            }
        }
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[Archetype] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First archetype registered for `kind`.
    pub fn get(&self, kind: ModelKind) -> Option<&Archetype> {
        self.entries.iter().find(|a| a.model_kind == kind)
    }

    /// Uniformly pick one entry. The table is never empty once constructed.
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &Archetype {
        let i = rng.gen_range(0..self.entries.len());
        &self.entries[i]
    }
}

impl Default for ArchetypeTable {
    fn default() -> Self {
        let lane = |model_kind, lateral_offset, speed| Archetype {
            model_kind,
            lateral_offset,
            heading: ONCOMING_HEADING,
            speed,
        };
        Self {
            entries: vec![
                lane(ModelKind::Sedan, INNER_LANE_Z, 150.0),
                lane(ModelKind::Coupe, INNER_LANE_Z, 170.0),
                lane(ModelKind::Taxi, INNER_LANE_Z, 140.0),
                lane(ModelKind::Pickup, OUTER_LANE_Z, 130.0),
                lane(ModelKind::Van, OUTER_LANE_Z, 120.0),
            ],
        }
    }
}
