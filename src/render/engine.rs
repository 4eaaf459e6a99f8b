use std::collections::HashMap;

use crate::{
    foundation::core::{BlendMode, Color},
    foundation::error::{RenderError, RenderResult},
    render::clip::ClipRegion,
    render::context::RenderContext,
    render::device::{CornerColors, FontHandle, ImageHandle, Quad, RenderDevice},
    render::pool::{SnapshotPoolOpts, SnapshotPoolStats},
    render::snapshot::ComponentSet,
    render::stack::SnapshotStack,
    render::text::{TextSelection, split_selection},
};

/// Options for [`RenderEngine`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RenderEngineOpts {
    /// Snapshot pool options.
    pub pool: SnapshotPoolOpts,
    /// Log a warning when a frame ends with saved state still on the stack.
    pub warn_unbalanced_frames: bool,
}

impl Default for RenderEngineOpts {
    fn default() -> Self {
        Self {
            pool: SnapshotPoolOpts::default(),
            warn_unbalanced_frames: true,
        }
    }
}

impl RenderEngineOpts {
    /// Build a [`RenderEngineOpts`] value from JSON; missing keys take their defaults.
    pub fn from_json(json: &str) -> RenderResult<Self> {
        serde_json::from_str(json).map_err(|e| RenderError::config(e.to_string()))
    }
}

/// Immediate-mode drawing front end over a [`RenderDevice`].
///
/// Owns the device, the current [`RenderContext`] and the [`SnapshotStack`]. Every draw call is
/// positioned relative to the context's absolute origin and reads color, font and scales from
/// the context at the time of the call.
pub struct RenderEngine<D: RenderDevice> {
    device: D,
    ctx: RenderContext,
    stack: SnapshotStack,
    fonts: HashMap<String, FontHandle>,
    display_width: u32,
    display_height: u32,
    opts: RenderEngineOpts,
}

impl<D: RenderDevice> RenderEngine<D> {
    /// Build a [`RenderEngine`] value with default options.
    pub fn new(device: D) -> Self {
        Self::with_opts(device, RenderEngineOpts::default())
    }

    /// Build a [`RenderEngine`] value with explicit options.
    pub fn with_opts(device: D, opts: RenderEngineOpts) -> Self {
        Self {
            display_width: device.width(),
            display_height: device.height(),
            device,
            ctx: RenderContext::new(),
            stack: SnapshotStack::new(opts.pool),
            fonts: HashMap::new(),
            opts,
        }
    }

    /// The owned device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// The owned device, mutably.
    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    /// Consume the engine and return the device.
    pub fn into_device(self) -> D {
        self.device
    }

    /// The current render state.
    pub fn context(&self) -> &RenderContext {
        &self.ctx
    }

    /// Display width as of the last resolution change.
    pub fn width(&self) -> u32 {
        self.display_width
    }

    /// Display height as of the last resolution change.
    pub fn height(&self) -> u32 {
        self.display_height
    }

    /// Re-read the display size from the device.
    pub fn display_resolution_changed(&mut self) {
        self.display_width = self.device.width();
        self.display_height = self.device.height();
        tracing::debug!(
            width = self.display_width,
            height = self.display_height,
            "display resolution changed"
        );
    }

    /// Start a frame on the device, then clear the color dirty flag.
    pub fn begin_frame(&mut self) -> RenderResult<()> {
        self.device.begin_frame()?;
        self.ctx.begin_frame();
        Ok(())
    }

    /// End the frame. Saved state left on the stack is reported, not unwound.
    pub fn end_frame(&mut self) -> RenderResult<()> {
        if self.opts.warn_unbalanced_frames && !self.stack.is_empty() {
            tracing::warn!(
                depth = self.stack.depth(),
                "frame ended with unrestored render state"
            );
        }
        self.device.end_frame()
    }

    /// Clear the device surface.
    pub fn clear(&mut self) -> RenderResult<()> {
        self.device.clear()
    }

    /// Font for `name`, loaded through the device on first use and cached after that.
    #[tracing::instrument(skip(self))]
    pub fn create_font(&mut self, name: &str) -> RenderResult<FontHandle> {
        if let Some(font) = self.fonts.get(name) {
            return Ok(font.clone());
        }
        let font = self.device.load_font(name)?;
        tracing::debug!("font loaded");
        self.fonts.insert(name.to_string(), font.clone());
        Ok(font)
    }

    fn quad(&self, x: i32, y: i32, width: i32, height: i32) -> Quad {
        Quad::new(
            x.saturating_add(self.ctx.absolute_x()),
            y.saturating_add(self.ctx.absolute_y()),
            width,
            height,
        )
    }

    /// Solid quad in the current color.
    pub fn render_quad(&mut self, x: i32, y: i32, width: i32, height: i32) -> RenderResult<()> {
        let quad = self.quad(x, y, width, height);
        self.device.draw_quad(quad, self.ctx.color)
    }

    /// Gradient quad. While an alpha override is active (the alpha dirty flag is set) every
    /// corner takes the current alpha; otherwise the corner colors pass through unchanged.
    pub fn render_quad_gradient(
        &mut self,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
        corners: CornerColors,
    ) -> RenderResult<()> {
        let quad = self.quad(x, y, width, height);
        let corners = if self.ctx.is_alpha_changed() {
            corners.with_alpha(self.ctx.color.a)
        } else {
            corners
        };
        self.device.draw_quad_gradient(quad, corners)
    }

    /// Draw `image` tinted white with the current alpha, at the current image scale.
    pub fn render_image(
        &mut self,
        image: &ImageHandle,
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    ) -> RenderResult<()> {
        let quad = self.quad(x, y, width, height);
        let tint = Color::WHITE.with_alpha(self.ctx.color.a);
        self.device
            .draw_image(image, quad, tint, self.ctx.image_scale)
    }

    /// Draw `text` with the active font, color and text scale.
    ///
    /// With a selection the text is drawn as up to three runs, the selected one in
    /// `selection_color`, each run starting where the previous one ended.
    pub fn render_text(
        &mut self,
        text: &str,
        x: i32,
        y: i32,
        selection: Option<TextSelection>,
        selection_color: Color,
    ) -> RenderResult<()> {
        let Some(font) = self.ctx.font.clone() else {
            tracing::warn!(text, "render_text without an active font; nothing drawn");
            return Ok(());
        };

        let x = x.saturating_add(self.ctx.absolute_x());
        let y = y.saturating_add(self.ctx.absolute_y());
        let color = self.ctx.color;
        let scale = self.ctx.text_scale;

        let Some(selection) = selection else {
            return self
                .device
                .draw_glyph_run(&font, text, x, y, color, scale);
        };

        let mut run_x = x;
        for run in split_selection(text, selection) {
            let run_color = if run.selected { selection_color } else { color };
            self.device
                .draw_glyph_run(&font, run.text, run_x, y, run_color, scale)?;
            run_x = run_x.saturating_add(font.width(run.text));
        }
        Ok(())
    }

    /// See [`RenderContext::set_font`].
    pub fn set_font(&mut self, font: Option<FontHandle>) {
        self.ctx.set_font(font);
    }

    /// See [`RenderContext::font`].
    pub fn font(&self) -> Option<&FontHandle> {
        self.ctx.font()
    }

    /// See [`RenderContext::set_color`].
    pub fn set_color(&mut self, color: Color) {
        self.ctx.set_color(color);
    }

    /// See [`RenderContext::set_color_alpha`].
    pub fn set_color_alpha(&mut self, alpha: f32) {
        self.ctx.set_color_alpha(alpha);
    }

    /// See [`RenderContext::set_color_ignore_alpha`].
    pub fn set_color_ignore_alpha(&mut self, color: Color) {
        self.ctx.set_color_ignore_alpha(color);
    }

    /// See [`RenderContext::is_color_changed`].
    pub fn is_color_changed(&self) -> bool {
        self.ctx.is_color_changed()
    }

    /// See [`RenderContext::is_alpha_changed`].
    pub fn is_color_alpha_changed(&self) -> bool {
        self.ctx.is_alpha_changed()
    }

    /// See [`RenderContext::move_to`].
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    /// See [`RenderContext::set_global_position`].
    pub fn set_global_position(&mut self, x: f64, y: f64) {
        self.ctx.set_global_position(x, y);
    }

    /// See [`RenderContext::set_text_scale`].
    pub fn set_text_scale(&mut self, scale: f32) {
        self.ctx.set_text_scale(scale);
    }

    /// See [`RenderContext::set_image_scale`].
    pub fn set_image_scale(&mut self, scale: f32) {
        self.ctx.set_image_scale(scale);
    }

    /// See [`RenderContext::enable_clip`].
    pub fn enable_clip(&mut self, x0: i32, y0: i32, x1: i32, y1: i32) -> RenderResult<()> {
        self.ctx.enable_clip(&mut self.device, x0, y0, x1, y1)
    }

    /// See [`RenderContext::disable_clip`].
    pub fn disable_clip(&mut self) -> RenderResult<()> {
        self.ctx.disable_clip(&mut self.device)
    }

    /// Active clip region, if any.
    pub fn clip(&self) -> Option<ClipRegion> {
        self.ctx.clip()
    }

    /// See [`RenderContext::set_blend_mode`].
    pub fn set_blend_mode(&mut self, mode: BlendMode) -> RenderResult<()> {
        self.ctx.set_blend_mode(&mut self.device, mode)
    }

    /// Save `subset` of the current state (everything for `None`).
    pub fn save_state(&mut self, subset: Option<ComponentSet>) {
        self.stack.save(&self.ctx, subset);
    }

    /// Restore the most recent save; fails with [`RenderError::StackUnderflow`] if there is none.
    pub fn restore_state(&mut self) -> RenderResult<()> {
        self.stack.restore(&mut self.ctx, &mut self.device)
    }

    /// Number of unmatched saves.
    pub fn state_depth(&self) -> usize {
        self.stack.depth()
    }

    /// Counters of the snapshot pool.
    pub fn pool_stats(&self) -> SnapshotPoolStats {
        self.stack.pool_stats()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/engine.rs"]
mod tests;
