//! Session-scoped cache for render assets keyed by identity.
//!
//! The renderer owns one `AssetCache` per session: `init` when the scene is
//! built, `register`/`get` while drawing, `sweep` on a timer to evict entries
//! nobody asked for recently, and `teardown` when the scene goes away.

use fnv::FnvHashMap;
use smallvec::SmallVec;
use std::hash::Hash;

struct Entry<V> {
    value: V,
    last_used: f64,
}

pub struct AssetCache<K, V> {
    entries: FnvHashMap<K, Entry<V>>,
    last_sweep: f64,
}

impl<K: Copy + Eq + Hash, V> AssetCache<K, V> {
    /// Start an empty cache; `now` seeds the sweep timer.
    pub fn init(now: f64) -> Self {
        Self {
            entries: FnvHashMap::default(),
            last_sweep: now,
        }
    }

    /// Insert or replace an asset. Returns the previous value, if any.
    pub fn register(&mut self, key: K, value: V, now: f64) -> Option<V> {
        self.entries
            .insert(
                key,
                Entry {
                    value,
                    last_used: now,
                },
            )
            .map(|e| e.value)
    }

    /// Look up an asset, marking it as used at `now`.
    pub fn get(&mut self, key: &K, now: f64) -> Option<&V> {
        self.entries.get_mut(key).map(|e| {
            e.last_used = now;
            &e.value
        })
    }

    /// Look up an asset, building and registering it on a miss.
    pub fn get_or_insert_with(&mut self, key: K, now: f64, build: impl FnOnce() -> V) -> &V {
        let e = self.entries.entry(key).or_insert_with(|| Entry {
            value: build(),
            last_used: now,
        });
        e.last_used = now;
        &e.value
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once `interval` seconds have passed since the last sweep.
    pub fn sweep_due(&self, now: f64, interval: f64) -> bool {
        now - self.last_sweep >= interval
    }

    /// Evict entries unused for longer than `max_idle` seconds.
    pub fn sweep(&mut self, now: f64, max_idle: f64) -> SmallVec<[K; 8]> {
        self.last_sweep = now;
        let mut evicted = SmallVec::new();
        self.entries.retain(|k, e| {
            let keep = now - e.last_used <= max_idle;
            if !keep {
                evicted.push(*k);
            }
            keep
        });
        if !evicted.is_empty() {
            log::debug!("[cache] evicted {} idle assets", evicted.len());
        }
        evicted
    }

    /// Drop every asset, handing them back so the caller can release them.
    pub fn teardown(self) -> Vec<(K, V)> {
        let released: Vec<(K, V)> = self.entries.into_iter().map(|(k, e)| (k, e.value)).collect();
        log::info!("[cache] teardown released {} assets", released.len());
        released
    }
}
