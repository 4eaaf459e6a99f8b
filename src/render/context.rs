//! Mutable current draw state.
//!
//! [`RenderContext`] holds everything a draw call reads: where to draw (global offset plus
//! cursor), with which color, font and scales, inside which clip, with which blend mode. Color
//! mutators maintain two dirty flags in [`DirtyFlags`] that downstream effect code reads to decide
//! whether per-vertex color blending must run. The two flags have different reset rules:
//!
//! - `color_changed` is cleared by [`RenderContext::begin_frame`];
//! - `alpha_changed` survives frame boundaries and only changes on explicit writes
//!   (a color mutator, or restoring a snapshot that captured alpha).

use crate::{
    foundation::core::{BlendMode, Color, Point},
    foundation::error::RenderResult,
    render::clip::{ClipRegion, ClipState},
    render::device::{FontHandle, RenderDevice},
};

/// Dirty tracking for the draw color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub(crate) color_changed: bool,
    pub(crate) alpha_changed: bool,
}

impl DirtyFlags {
    /// Set by any color mutator that touched RGB; cleared every frame.
    pub fn color_changed(self) -> bool {
        self.color_changed
    }

    /// Set by any color mutator that touched alpha; survives frames.
    pub fn alpha_changed(self) -> bool {
        self.alpha_changed
    }

    /// Per-frame reset. Only `color_changed` is frame scoped.
    fn reset_frame(&mut self) {
        self.color_changed = false;
    }
}

/// The single mutable current state every draw call reads.
///
/// Starts at the origin, white, no font, unit scales, no clip, [`BlendMode::Normal`].
#[derive(Clone, Debug, PartialEq)]
pub struct RenderContext {
    pub(crate) global_offset: Point,
    pub(crate) cursor: Point,
    pub(crate) color: Color,
    pub(crate) dirty: DirtyFlags,
    pub(crate) font: Option<FontHandle>,
    pub(crate) text_scale: f32,
    pub(crate) image_scale: f32,
    pub(crate) clip: ClipState,
    pub(crate) blend_mode: BlendMode,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            global_offset: Point::ORIGIN,
            cursor: Point::ORIGIN,
            color: Color::WHITE,
            dirty: DirtyFlags::default(),
            font: None,
            text_scale: 1.0,
            image_scale: 1.0,
            clip: ClipState::Disabled,
            blend_mode: BlendMode::Normal,
        }
    }
}

impl RenderContext {
    /// Build a [`RenderContext`] value in its initial state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frame hook: clears the color dirty flag and nothing else.
    pub fn begin_frame(&mut self) {
        self.dirty.reset_frame();
    }

    /// Current draw color.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Both dirty flags.
    pub fn dirty(&self) -> DirtyFlags {
        self.dirty
    }

    /// Whether RGB was written since the frame began.
    pub fn is_color_changed(&self) -> bool {
        self.dirty.color_changed
    }

    /// Whether alpha was written since it was last restored or reset.
    pub fn is_alpha_changed(&self) -> bool {
        self.dirty.alpha_changed
    }

    /// Replace the whole color. Marks both color and alpha dirty.
    pub fn set_color(&mut self, color: Color) {
        self.color = color;
        self.dirty.color_changed = true;
        self.dirty.alpha_changed = true;
    }

    /// Replace alpha only, keeping RGB. Marks alpha dirty.
    pub fn set_color_alpha(&mut self, alpha: f32) {
        self.color.a = alpha;
        self.dirty.alpha_changed = true;
    }

    /// Replace RGB only, keeping the current alpha.
    ///
    /// If alpha was changed earlier and `color` carries a lower alpha, the current alpha is
    /// lowered to it. Alpha is never raised here.
    pub fn set_color_ignore_alpha(&mut self, color: Color) {
        self.color.r = color.r;
        self.color.g = color.g;
        self.color.b = color.b;
        self.dirty.color_changed = true;

        if self.dirty.alpha_changed && self.color.a > color.a {
            self.color.a = color.a;
        }
    }

    /// Move the cursor, relative to the global offset.
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.cursor = Point::new(x, y);
    }

    /// Current cursor.
    pub fn cursor(&self) -> Point {
        self.cursor
    }

    /// Rebase all positions. An already active clip keeps its absolute coordinates.
    pub fn set_global_position(&mut self, x: f64, y: f64) {
        self.global_offset = Point::new(x, y);
    }

    /// Current global offset.
    pub fn global_offset(&self) -> Point {
        self.global_offset
    }

    /// `global_offset.x + cursor.x`, truncated toward zero.
    pub fn absolute_x(&self) -> i32 {
        (self.global_offset.x + self.cursor.x) as i32
    }

    /// `global_offset.y + cursor.y`, truncated toward zero.
    pub fn absolute_y(&self) -> i32 {
        (self.global_offset.y + self.cursor.y) as i32
    }

    /// Replace the active font; `None` clears it.
    pub fn set_font(&mut self, font: Option<FontHandle>) {
        self.font = font;
    }

    /// Active font, if any.
    pub fn font(&self) -> Option<&FontHandle> {
        self.font.as_ref()
    }

    /// Scale applied to glyph runs.
    pub fn set_text_scale(&mut self, scale: f32) {
        self.text_scale = scale;
    }

    /// Current text scale.
    pub fn text_scale(&self) -> f32 {
        self.text_scale
    }

    /// Scale applied to images.
    pub fn set_image_scale(&mut self, scale: f32) {
        self.image_scale = scale;
    }

    /// Current image scale.
    pub fn image_scale(&self) -> f32 {
        self.image_scale
    }

    /// Active clip region, if any.
    pub fn clip(&self) -> Option<ClipRegion> {
        self.clip.region()
    }

    /// Clip to a caller-local rectangle, relative to the current absolute position.
    ///
    /// Ignored while another clip is active: a nested element cannot replace its parent's clip,
    /// only the outermost active clip is ever in effect.
    pub fn enable_clip<D: RenderDevice + ?Sized>(
        &mut self,
        device: &mut D,
        x0: i32,
        y0: i32,
        x1: i32,
        y1: i32,
    ) -> RenderResult<()> {
        let region = ClipRegion::from_local(x0, y0, x1, y1, (self.absolute_x(), self.absolute_y()));
        if !self.clip.enable(region) {
            tracing::trace!(?region, "clip already active, request dropped");
            return Ok(());
        }
        self.clip.apply(device)
    }

    /// Clear any active clip and tell the device.
    pub fn disable_clip<D: RenderDevice + ?Sized>(&mut self, device: &mut D) -> RenderResult<()> {
        self.clip.disable();
        self.clip.apply(device)
    }

    /// Replace the clip state wholesale and push it to the device.
    pub(crate) fn replace_clip<D: RenderDevice + ?Sized>(
        &mut self,
        device: &mut D,
        clip: ClipState,
    ) -> RenderResult<()> {
        self.clip = clip;
        self.clip.apply(device)
    }

    /// Store `mode` and forward it to the device immediately.
    pub fn set_blend_mode<D: RenderDevice + ?Sized>(
        &mut self,
        device: &mut D,
        mode: BlendMode,
    ) -> RenderResult<()> {
        self.blend_mode = mode;
        device.set_blend_mode(mode)
    }

    /// Current blend mode.
    pub fn blend_mode(&self) -> BlendMode {
        self.blend_mode
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/context.rs"]
mod tests;
