use smallvec::SmallVec;

use crate::{
    foundation::error::{RenderError, RenderResult},
    render::context::RenderContext,
    render::device::RenderDevice,
    render::pool::{SnapshotPool, SnapshotPoolOpts, SnapshotPoolStats},
    render::snapshot::{ComponentSet, Snapshot},
};

/// LIFO stack of saved render state.
///
/// Every `save` must be matched by one `restore`, nested like parentheses. The stack enforces
/// the order but not the balance: a missing `restore` leaves the saved state on the stack, an
/// extra one fails with [`RenderError::StackUnderflow`].
#[derive(Debug, Default)]
pub struct SnapshotStack {
    frames: SmallVec<[Snapshot; 8]>,
    pool: SnapshotPool,
}

impl SnapshotStack {
    /// Build a [`SnapshotStack`] value backed by a pool configured with `opts`.
    pub fn new(opts: SnapshotPoolOpts) -> Self {
        Self {
            frames: SmallVec::new(),
            pool: SnapshotPool::new(opts),
        }
    }

    /// Number of unmatched saves.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Whether every save has been restored.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Counters of the backing pool.
    pub fn pool_stats(&self) -> SnapshotPoolStats {
        self.pool.stats()
    }

    /// Capture `subset` of `ctx` (everything for `None`) and push it.
    pub fn save(&mut self, ctx: &RenderContext, subset: Option<ComponentSet>) {
        let mut snapshot = self.pool.allocate();
        snapshot.capture(ctx, subset);
        self.frames.push(snapshot);
        tracing::trace!(depth = self.frames.len(), ?subset, "render state saved");
    }

    /// Pop the top snapshot and write what it captured back onto `ctx`.
    ///
    /// The snapshot goes back to the pool even when a device call fails mid-restore.
    pub fn restore<D: RenderDevice + ?Sized>(
        &mut self,
        ctx: &mut RenderContext,
        device: &mut D,
    ) -> RenderResult<()> {
        let snapshot = self.frames.pop().ok_or(RenderError::StackUnderflow)?;
        let applied = snapshot.apply(ctx, device);
        tracing::trace!(depth = self.frames.len(), "render state restored");
        self.pool.free(snapshot);
        applied
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/stack.rs"]
mod tests;
