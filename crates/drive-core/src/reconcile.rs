use fnv::FnvHashSet;

use crate::session::VehicleSnapshot;
use crate::traffic::VehicleId;

/// Visual representations the renderer keeps per live vehicle.
pub trait VehicleVisuals {
    fn create(&mut self, vehicle: &VehicleSnapshot);
    fn update(&mut self, vehicle: &VehicleSnapshot);
    fn destroy(&mut self, id: VehicleId);
}

/// Counts of calls made by one `reconcile` pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    pub created: usize,
    pub updated: usize,
    pub destroyed: usize,
}

/// Keeps renderer visuals in step with the traffic snapshot, keyed by id.
///
/// Each pass creates visuals for ids it has not seen, updates the ones it has,
/// and destroys visuals whose ids are no longer in the snapshot. The snapshot
/// itself is only read.
#[derive(Default)]
pub struct Reconciler {
    known: FnvHashSet<VehicleId>,
    scratch: FnvHashSet<VehicleId>,
}

impl Reconciler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reconcile<V: VehicleVisuals + ?Sized>(
        &mut self,
        vehicles: &[VehicleSnapshot],
        visuals: &mut V,
    ) -> ReconcileStats {
        let mut stats = ReconcileStats::default();
        self.scratch.clear();
        for v in vehicles {
            self.scratch.insert(v.id);
            if self.known.contains(&v.id) {
                visuals.update(v);
                stats.updated += 1;
            } else {
                visuals.create(v);
                stats.created += 1;
            }
        }
        for id in self.known.difference(&self.scratch) {
            visuals.destroy(*id);
            stats.destroyed += 1;
        }
        std::mem::swap(&mut self.known, &mut self.scratch);
        stats
    }

    /// Destroy every visual still tracked, e.g. when the scene is torn down.
    pub fn clear<V: VehicleVisuals + ?Sized>(&mut self, visuals: &mut V) {
        for id in self.known.drain() {
            visuals.destroy(id);
        }
    }

    pub fn tracked(&self) -> usize {
        self.known.len()
    }

    pub fn is_tracking(&self, id: VehicleId) -> bool {
        self.known.contains(&id)
    }
}
