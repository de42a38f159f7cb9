//! Oncoming traffic population.
//!
//! Vehicles appear at `spawn_x` after a randomized delay, move toward `exit_x`
//! at their archetype's constant speed, and are dropped once they cross it.
//! The live list is bounded by `max_live`; it is a capacity-limited list, and a
//! retired vehicle's id is never handed out again.

use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use smallvec::SmallVec;

use crate::archetype::{ArchetypeTable, ModelKind};
use crate::config::TrafficConfig;
use crate::error::ConfigError;

/// Identity of a vehicle, unique for the lifetime of a spawner.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VehicleId(pub u64);

/// A single oncoming vehicle.
#[derive(Clone, Debug, PartialEq)]
pub struct TrafficVehicle {
    pub id: VehicleId,
    pub model_kind: ModelKind,
    pub position_axis: f32,
    pub lateral_offset: f32,
    pub heading: f32,
    pub speed: f32,
    /// Clock time of the frame that spawned it.
    pub spawned_at: f64,
}

impl TrafficVehicle {
    /// World-space position: travel axis on X, lateral placement on Z.
    #[inline]
    pub fn world_position(&self) -> Vec3 {
        Vec3::new(self.position_axis, 0.0, self.lateral_offset)
    }

    #[inline]
    pub fn rotation(&self) -> Quat {
        Quat::from_rotation_y(self.heading)
    }
}

/// What changed during one `tick`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    pub retired: SmallVec<[VehicleId; 4]>,
    pub spawned: Option<VehicleId>,
}

/// Owns the live vehicles and decides when new ones appear.
pub struct TrafficSpawner<R: Rng = StdRng> {
    archetypes: ArchetypeTable,
    spawn_x: f32,
    exit_x: f32,
    max_live: usize,
    min_interval: f32,
    max_interval: f32,
    live: Vec<TrafficVehicle>,
    time_since_last_spawn: f32,
    next_spawn_threshold: f32,
    next_id: u64,
    rng: R,
}

impl TrafficSpawner<StdRng> {
    pub fn new(config: TrafficConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> TrafficSpawner<R> {
    /// Build a spawner drawing archetypes and intervals from `rng`.
    pub fn with_rng(config: TrafficConfig, mut rng: R) -> Result<Self, ConfigError> {
        config.validate()?;
        let next_spawn_threshold =
            sample_interval(&mut rng, config.min_interval, config.max_interval);
        Ok(Self {
            live: Vec::with_capacity(config.max_live),
            archetypes: config.archetypes,
            spawn_x: config.spawn_x,
            exit_x: config.exit_x,
            max_live: config.max_live,
            min_interval: config.min_interval,
            max_interval: config.max_interval,
            time_since_last_spawn: 0.0,
            next_spawn_threshold,
            next_id: 1,
            rng,
        })
    }

    /// Live vehicles in spawn order.
    pub fn vehicles(&self) -> &[TrafficVehicle] {
        &self.live
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.max_live
    }

    pub fn time_since_last_spawn(&self) -> f32 {
        self.time_since_last_spawn
    }

    pub fn next_spawn_threshold(&self) -> f32 {
        self.next_spawn_threshold
    }

    pub fn exit_x(&self) -> f32 {
        self.exit_x
    }

    /// Advance one frame: move and retire first, then consider a spawn.
    ///
    /// Retiring first frees capacity that the spawn check in the same frame
    /// can use.
    pub fn tick(&mut self, dt: f32, now: f64) -> TickReport {
        let dt = dt.max(0.0);
        let mut report = TickReport::default();

        let exit_x = self.exit_x;
        self.live.retain_mut(|v| {
            v.position_axis += v.speed * dt;
            if v.position_axis >= exit_x {
                report.retired.push(v.id);
                false
            } else {
                true
            }
        });
        for id in &report.retired {
            log::debug!("[traffic] retired #{}", id.0);
        }

        self.time_since_last_spawn += dt;
        if self.time_since_last_spawn > self.next_spawn_threshold && self.live.len() < self.max_live
        {
            report.spawned = Some(self.spawn(now));
        }
        report
    }

    fn spawn(&mut self, now: f64) -> VehicleId {
        let archetype = *self.archetypes.choose(&mut self.rng);
        let id = VehicleId(self.next_id);
        self.next_id += 1;
        self.live.push(TrafficVehicle {
            id,
            model_kind: archetype.model_kind,
            position_axis: self.spawn_x,
            lateral_offset: archetype.lateral_offset,
            heading: archetype.heading,
            speed: archetype.speed,
            spawned_at: now,
        });
        self.time_since_last_spawn = 0.0;
        self.next_spawn_threshold =
            sample_interval(&mut self.rng, self.min_interval, self.max_interval);
        log::debug!(
            "[traffic] spawned #{} {} (live={}/{}, next in {:.2}s)",
            id.0,
            archetype.model_kind.label(),
            self.live.len(),
            self.max_live,
            self.next_spawn_threshold
        );
        id
    }
}

#[inline]
fn sample_interval<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
