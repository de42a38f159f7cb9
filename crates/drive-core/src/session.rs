use glam::Vec3;
use rand::rngs::StdRng;
use rand::Rng;

use crate::archetype::ModelKind;
use crate::config::DriveConfig;
use crate::error::ConfigError;
use crate::traffic::{TickReport, TrafficSpawner, TrafficVehicle, VehicleId};
use crate::world::{WorldScroller, WorldState};

/// Read-only view of one vehicle handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct VehicleSnapshot {
    pub id: VehicleId,
    pub model_kind: ModelKind,
    pub position_axis: f32,
    pub lateral_offset: f32,
    pub heading: f32,
    pub position: Vec3,
}

impl From<&TrafficVehicle> for VehicleSnapshot {
    fn from(v: &TrafficVehicle) -> Self {
        Self {
            id: v.id,
            model_kind: v.model_kind,
            position_axis: v.position_axis,
            lateral_offset: v.lateral_offset,
            heading: v.heading,
            position: v.world_position(),
        }
    }
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameSnapshot {
    pub offset: f32,
    pub velocity: f32,
    pub playing: bool,
    pub vehicles: Vec<VehicleSnapshot>,
}

/// One drive: the scrolling world plus its oncoming traffic.
///
/// `frame` runs the per-frame update in a fixed order (world, then traffic
/// advance/retire, then the spawn decision) and refreshes the snapshot.
/// Traffic is frozen while paused, like the world offset.
pub struct DriveSession<R: Rng = StdRng> {
    world: WorldScroller,
    traffic: TrafficSpawner<R>,
    snapshot: FrameSnapshot,
    last_report: TickReport,
    frames: u64,
}

impl DriveSession<StdRng> {
    pub fn new(config: DriveConfig, seed: u64) -> Result<Self, ConfigError> {
        let world = WorldScroller::new(&config.world)?;
        let traffic = TrafficSpawner::new(config.traffic, seed)?;
        Ok(Self::from_parts(world, traffic))
    }
}

impl<R: Rng> DriveSession<R> {
    pub fn from_parts(world: WorldScroller, traffic: TrafficSpawner<R>) -> Self {
        let snapshot = FrameSnapshot {
            offset: world.offset(),
            ..FrameSnapshot::default()
        };
        Self {
            world,
            traffic,
            snapshot,
            last_report: TickReport::default(),
            frames: 0,
        }
    }

    pub fn world(&self) -> &WorldState {
        self.world.state()
    }

    pub fn traffic(&self) -> &TrafficSpawner<R> {
        &self.traffic
    }

    pub fn snapshot(&self) -> &FrameSnapshot {
        &self.snapshot
    }

    /// Changes from the most recent frame that advanced traffic.
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn set_target_velocity(&mut self, velocity: f32) {
        self.world.set_target_velocity(velocity);
    }

    pub fn frame(&mut self, dt: f32, now: f64, playing: bool) -> &FrameSnapshot {
        self.frames += 1;
        let offset = self.world.advance(dt, playing);
        if playing {
            self.last_report = self.traffic.tick(dt, now);
        }

        let snap = &mut self.snapshot;
        snap.offset = offset;
        snap.velocity = self.world.state().velocity;
        snap.playing = playing;
        snap.vehicles.clear();
        snap.vehicles
            .extend(self.traffic.vehicles().iter().map(VehicleSnapshot::from));
        &self.snapshot
    }
}
