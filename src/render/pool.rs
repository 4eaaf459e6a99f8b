use crate::render::snapshot::Snapshot;

/// Pool configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SnapshotPoolOpts {
    /// Free-list slots reserved up front. No snapshot is constructed before it is needed.
    pub capacity_hint: usize,
}

impl Default for SnapshotPoolOpts {
    fn default() -> Self {
        Self { capacity_hint: 32 }
    }
}

/// Pool counters.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotPoolStats {
    /// Snapshots ever constructed. Equals the high-water mark of concurrent allocations.
    pub constructed: usize,
    /// Snapshots currently sitting in the free list.
    pub free: usize,
    /// Total `allocate` calls.
    pub allocations: u64,
}

/// Free list of reusable [`Snapshot`]s.
///
/// Grows by one snapshot when empty and never shrinks. Ownership moves out on `allocate` and
/// back in on `free`, so a snapshot is never reachable from two places.
#[derive(Debug)]
pub struct SnapshotPool {
    free: Vec<Snapshot>,
    stats: SnapshotPoolStats,
}

impl Default for SnapshotPool {
    fn default() -> Self {
        Self::new(SnapshotPoolOpts::default())
    }
}

impl SnapshotPool {
    /// Build a [`SnapshotPool`] value with an empty free list.
    pub fn new(opts: SnapshotPoolOpts) -> Self {
        Self {
            free: Vec::with_capacity(opts.capacity_hint),
            stats: SnapshotPoolStats::default(),
        }
    }

    /// Current counters.
    pub fn stats(&self) -> SnapshotPoolStats {
        SnapshotPoolStats {
            free: self.free.len(),
            ..self.stats
        }
    }

    /// Take a snapshot from the free list, constructing one if it is empty.
    pub fn allocate(&mut self) -> Snapshot {
        self.stats.allocations = self.stats.allocations.saturating_add(1);
        if let Some(snapshot) = self.free.pop() {
            return snapshot;
        }

        self.stats.constructed += 1;
        tracing::debug!(constructed = self.stats.constructed, "snapshot pool grew");
        Snapshot::blank()
    }

    /// Return a snapshot. Its field values are left as they are.
    pub fn free(&mut self, snapshot: Snapshot) {
        self.free.push(snapshot);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/pool.rs"]
mod tests;
