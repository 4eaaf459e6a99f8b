//! Render state core: current context, pooled snapshots, save/restore stack, and the device seam.

/// Clip region and first-wins clip state.
pub(crate) mod clip;
/// Mutable current draw state and dirty flags.
pub(crate) mod context;
/// Draw-primitive trait and the recording device.
pub(crate) mod device;
/// Drawing front end owning device, context and stack.
pub(crate) mod engine;
/// Snapshot free list.
pub(crate) mod pool;
/// State components, component sets and captured snapshots.
pub(crate) mod snapshot;
/// Save/restore stack.
pub(crate) mod stack;
/// Selection splitting for text runs.
pub(crate) mod text;
