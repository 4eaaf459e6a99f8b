//! Scoped, restorable render state for immediate-mode 2D drawing.
//!
//! Nested drawing routines change the current state (cursor, color, alpha, font, text and image
//! scale, clip, blend mode), draw, and put back exactly what they changed:
//!
//! ```
//! use render_scope::{Color, ComponentSet, RecordingDevice, RenderEngine};
//!
//! let mut engine = RenderEngine::new(RecordingDevice::new(640, 480));
//! engine.begin_frame()?;
//!
//! engine.save_state(Some(ComponentSet::COLOR | ComponentSet::ALPHA));
//! engine.set_color(Color::new(1.0, 0.0, 0.0, 0.5));
//! engine.render_quad(10, 10, 100, 20)?;
//! engine.restore_state()?;
//!
//! assert_eq!(engine.context().color(), Color::WHITE);
//! engine.end_frame()?;
//! # Ok::<(), render_scope::RenderError>(())
//! ```
//!
//! The design constraints:
//!
//! - **Selective save/restore**: a save names the [`StateComponent`]s it captures; restore writes
//!   back those and nothing else.
//! - **No per-frame allocation**: snapshots come from a [`SnapshotPool`] that grows to the
//!   deepest nesting seen and is reused after that.
//! - **First clip wins**: while a clip is active, nested clip requests are dropped.
//! - **Dirty flags**: color mutators keep [`DirtyFlags`] that effect code uses to decide whether
//!   per-vertex blending is needed; only the color flag resets per frame.
//!
//! See [`crate::guide`] for a walkthrough.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;
mod render;

/// Standalone walkthrough of the render state model.
pub mod guide;

pub use foundation::core::{BlendMode, Color, Point, Rect};
pub use foundation::error::{RenderError, RenderResult};
pub use render::clip::{ClipRegion, ClipState};
pub use render::context::{DirtyFlags, RenderContext};
pub use render::device::{
    CornerColors, DeviceCall, FixedAdvanceFont, FontHandle, ImageHandle, Quad, RecordingDevice,
    RenderDevice, RenderFont, RenderImage,
};
pub use render::engine::{RenderEngine, RenderEngineOpts};
pub use render::pool::{SnapshotPool, SnapshotPoolOpts, SnapshotPoolStats};
pub use render::snapshot::{ComponentSet, Snapshot, StateComponent};
pub use render::stack::SnapshotStack;
pub use render::text::{TextRun, TextSelection, split_selection};
