//! # render-scope guide
//!
//! A walkthrough of the render state model: what the current state is, how scoped changes are
//! saved and restored, and which rules are easy to get wrong.
//!
//! ---
//!
//! ## Core concepts
//!
//! - [`RenderContext`](crate::RenderContext): the single mutable current state
//! - [`StateComponent`](crate::StateComponent) / [`ComponentSet`](crate::ComponentSet): the eight
//!   independently saveable parts of that state
//! - [`Snapshot`](crate::Snapshot): a captured subset, tagged with the mask of what it holds
//! - [`SnapshotPool`](crate::SnapshotPool): reuse reservoir for snapshots
//! - [`SnapshotStack`](crate::SnapshotStack): `save` / `restore` in LIFO order
//! - [`RenderDevice`](crate::RenderDevice): the rasterizer seam; draws, clips, blends
//! - [`RenderEngine`](crate::RenderEngine): owns all of the above and issues draw calls
//!
//! ## Positions
//!
//! Every draw call is relative to the absolute origin, `global_offset + cursor`, truncated toward
//! zero to integer device pixels. `set_global_position` is for rare rebasing (viewport changes),
//! `move_to` for per-element placement. Callers that need sub-pixel precision must round before
//! calling `move_to`.
//!
//! ## Color and the two dirty flags
//!
//! | call                      | RGB      | alpha                         | color flag | alpha flag |
//! |---------------------------|----------|-------------------------------|------------|------------|
//! | `set_color`               | replaced | replaced                      | set        | set        |
//! | `set_color_alpha`         | kept     | replaced                      | kept       | set        |
//! | `set_color_ignore_alpha`  | replaced | lowered if flag set and lower | set        | kept       |
//! | `begin_frame`             | kept     | kept                          | cleared    | kept       |
//!
//! The alpha flag surviving `begin_frame` is what lets a fade effect that only touched alpha
//! keep forcing per-vertex alpha on gradient quads in later frames.
//!
//! ## Save and restore
//!
//! ```
//! use render_scope::{ComponentSet, RecordingDevice, RenderContext, SnapshotStack, RenderDevice};
//!
//! let mut device = RecordingDevice::new(320, 240);
//! let font = device.load_font("ui.fnt")?;
//! let mut ctx = RenderContext::new();
//! let mut stack = SnapshotStack::default();
//!
//! stack.save(&ctx, Some(ComponentSet::COLOR));
//! ctx.set_color(render_scope::Color::BLACK);
//! ctx.set_font(Some(font.clone()));
//! stack.restore(&mut ctx, &mut device)?;
//!
//! // Font was not captured, so it stays.
//! assert_eq!(ctx.font(), Some(&font));
//! # Ok::<(), render_scope::RenderError>(())
//! ```
//!
//! `save(None)` captures all eight components. `restore` on an empty stack is
//! [`RenderError::StackUnderflow`](crate::RenderError::StackUnderflow). Subsets parsed from
//! text (`"color, alpha".parse::<ComponentSet>()`) reject unknown names with
//! `InvalidComponentSubset`.
//!
//! The global offset is not one of the components. `set_global_position` inside a saved scope
//! survives the restore; scope per-element placement with `move_to` and POSITION instead.
//!
//! Restoring CLIP or BLEND_MODE talks to the device; every other component is a field write.
//!
//! ## Clipping
//!
//! Only one clip is ever active. `enable_clip` while a clip is active is dropped, so a child
//! cannot widen or replace its parent's clip. `disable_clip` always clears it. Restoring a
//! snapshot that captured CLIP replaces the clip state wholesale, in either direction.
//!
//! ## Pooling
//!
//! The pool constructs a snapshot only when its free list is empty, so the number of snapshots
//! ever constructed equals the deepest nesting reached. It never shrinks.
