use std::{fmt, sync::Arc};

use crate::{
    foundation::core::{BlendMode, Color},
    foundation::error::{RenderError, RenderResult},
    render::clip::ClipRegion,
};

/// A font loaded by a device.
pub trait RenderFont {
    /// Advance width of `text` in device pixels at scale 1.0.
    fn width(&self, text: &str) -> i32;

    /// Line height in device pixels at scale 1.0.
    fn height(&self) -> i32;
}

/// An image loaded by a device.
pub trait RenderImage {
    /// Width in device pixels.
    fn width(&self) -> u32;
    /// Height in device pixels.
    fn height(&self) -> u32;
}

/// Shared handle to a device font.
///
/// Equality is identity: two handles are equal when they point at the same loaded font.
#[derive(Clone)]
pub struct FontHandle(Arc<dyn RenderFont>);

impl FontHandle {
    /// Build a [`FontHandle`] value owning `font`.
    pub fn new(font: impl RenderFont + 'static) -> Self {
        Self(Arc::new(font))
    }

    /// Advance width of `text` at scale 1.0.
    pub fn width(&self, text: &str) -> i32 {
        self.0.width(text)
    }

    /// Line height at scale 1.0.
    pub fn height(&self) -> i32 {
        self.0.height()
    }
}

impl PartialEq for FontHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FontHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FontHandle")
            .field(&Arc::as_ptr(&self.0).cast::<()>())
            .finish()
    }
}

/// Shared handle to a device image. Equality is identity, as for [`FontHandle`].
#[derive(Clone)]
pub struct ImageHandle(Arc<dyn RenderImage>);

impl ImageHandle {
    /// Build an [`ImageHandle`] value owning `image`.
    pub fn new(image: impl RenderImage + 'static) -> Self {
        Self(Arc::new(image))
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.0.width()
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.0.height()
    }
}

impl PartialEq for ImageHandle {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ImageHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageHandle")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

/// Axis-aligned quad in absolute device pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Quad {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: i32,
    /// Height.
    pub height: i32,
}

impl Quad {
    /// Build a [`Quad`] value.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// Per-corner colors for gradient quads.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerColors {
    /// Top-left corner.
    pub top_left: Color,
    /// Top-right corner.
    pub top_right: Color,
    /// Bottom-right corner.
    pub bottom_right: Color,
    /// Bottom-left corner.
    pub bottom_left: Color,
}

impl CornerColors {
    /// Build a [`CornerColors`] value with the same color at every corner.
    pub const fn uniform(color: Color) -> Self {
        Self {
            top_left: color,
            top_right: color,
            bottom_right: color,
            bottom_left: color,
        }
    }

    /// Replace the alpha of every corner, keeping each corner's RGB.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self {
            top_left: self.top_left.with_alpha(a),
            top_right: self.top_right.with_alpha(a),
            bottom_right: self.bottom_right.with_alpha(a),
            bottom_left: self.bottom_left.with_alpha(a),
        }
    }
}

/// Draw-primitive surface of the rasterizer.
///
/// Calls occur on the rendering thread, in submission order. Errors are propagated to the
/// caller unchanged; nothing in this crate retries a failed device call.
pub trait RenderDevice {
    /// Current surface width in device pixels.
    fn width(&self) -> u32;

    /// Current surface height in device pixels.
    fn height(&self) -> u32;

    /// Frame start hook.
    fn begin_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }

    /// Frame end hook.
    fn end_frame(&mut self) -> RenderResult<()> {
        Ok(())
    }

    /// Clear the whole surface.
    fn clear(&mut self) -> RenderResult<()> {
        Ok(())
    }

    /// Load a font by name. Called at most once per name by [`crate::RenderEngine`].
    fn load_font(&mut self, name: &str) -> RenderResult<FontHandle>;

    /// Fill `quad` with a solid color.
    fn draw_quad(&mut self, quad: Quad, color: Color) -> RenderResult<()>;

    /// Fill `quad` interpolating between corner colors.
    fn draw_quad_gradient(&mut self, quad: Quad, corners: CornerColors) -> RenderResult<()>;

    /// Draw `text` with its top-left at (`x`, `y`).
    fn draw_glyph_run(
        &mut self,
        font: &FontHandle,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
        scale: f32,
    ) -> RenderResult<()>;

    /// Draw `image` stretched over `quad`, tinted by `color`.
    fn draw_image(
        &mut self,
        image: &ImageHandle,
        quad: Quad,
        color: Color,
        scale: f32,
    ) -> RenderResult<()>;

    /// Limit drawing to `region`.
    fn enable_clip(&mut self, region: ClipRegion) -> RenderResult<()>;

    /// Stop clipping.
    fn disable_clip(&mut self) -> RenderResult<()>;

    /// Switch how subsequent draws combine with the target.
    fn set_blend_mode(&mut self, mode: BlendMode) -> RenderResult<()>;
}

/// One call received by a [`RecordingDevice`].
#[derive(Clone, Debug, PartialEq)]
pub enum DeviceCall {
    /// [`RenderDevice::begin_frame`].
    BeginFrame,
    /// [`RenderDevice::end_frame`].
    EndFrame,
    /// [`RenderDevice::clear`].
    Clear,
    /// [`RenderDevice::load_font`].
    LoadFont {
        /// Requested font name.
        name: String,
    },
    /// [`RenderDevice::draw_quad`].
    Quad {
        /// Target quad.
        quad: Quad,
        /// Fill color.
        color: Color,
    },
    /// [`RenderDevice::draw_quad_gradient`].
    QuadGradient {
        /// Target quad.
        quad: Quad,
        /// Corner colors.
        corners: CornerColors,
    },
    /// [`RenderDevice::draw_glyph_run`].
    GlyphRun {
        /// Run text.
        text: String,
        /// Absolute x.
        x: i32,
        /// Absolute y.
        y: i32,
        /// Text color.
        color: Color,
        /// Text scale.
        scale: f32,
    },
    /// [`RenderDevice::draw_image`].
    Image {
        /// Target quad.
        quad: Quad,
        /// Tint.
        color: Color,
        /// Image scale.
        scale: f32,
    },
    /// [`RenderDevice::enable_clip`].
    EnableClip(ClipRegion),
    /// [`RenderDevice::disable_clip`].
    DisableClip,
    /// [`RenderDevice::set_blend_mode`].
    BlendMode(BlendMode),
}

/// Monospaced font used by [`RecordingDevice`]: every char advances by the same width.
#[derive(Clone, Copy, Debug)]
pub struct FixedAdvanceFont {
    /// Advance per char.
    pub advance: i32,
    /// Line height.
    pub line_height: i32,
}

impl RenderFont for FixedAdvanceFont {
    fn width(&self, text: &str) -> i32 {
        let chars = i32::try_from(text.chars().count()).unwrap_or(i32::MAX);
        chars.saturating_mul(self.advance)
    }

    fn height(&self) -> i32 {
        self.line_height
    }
}

/// Headless device that draws nothing and records every call it receives.
///
/// Fonts it loads are [`FixedAdvanceFont`]s. A pending failure set with
/// [`RecordingDevice::fail_next`] is returned by the next call instead of recording it.
#[derive(Debug)]
pub struct RecordingDevice {
    width: u32,
    height: u32,
    font_advance: i32,
    calls: Vec<DeviceCall>,
    pending_failure: Option<String>,
}

impl RecordingDevice {
    /// Build a [`RecordingDevice`] value with an empty call log.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            font_advance: 8,
            calls: Vec::new(),
            pending_failure: None,
        }
    }

    /// Advance used by fonts loaded after this call.
    pub fn with_font_advance(mut self, advance: i32) -> Self {
        self.font_advance = advance;
        self
    }

    /// Change the reported surface size.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Calls recorded so far, oldest first.
    pub fn calls(&self) -> &[DeviceCall] {
        &self.calls
    }

    /// Drain the call log.
    pub fn take_calls(&mut self) -> Vec<DeviceCall> {
        std::mem::take(&mut self.calls)
    }

    /// Make the next call fail with [`RenderError::Device`] instead of being recorded.
    pub fn fail_next(&mut self, msg: impl Into<String>) {
        self.pending_failure = Some(msg.into());
    }

    fn record(&mut self, call: DeviceCall) -> RenderResult<()> {
        if let Some(msg) = self.pending_failure.take() {
            return Err(RenderError::device(msg));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl RenderDevice for RecordingDevice {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn begin_frame(&mut self) -> RenderResult<()> {
        self.record(DeviceCall::BeginFrame)
    }

    fn end_frame(&mut self) -> RenderResult<()> {
        self.record(DeviceCall::EndFrame)
    }

    fn clear(&mut self) -> RenderResult<()> {
        self.record(DeviceCall::Clear)
    }

    fn load_font(&mut self, name: &str) -> RenderResult<FontHandle> {
        self.record(DeviceCall::LoadFont {
            name: name.to_string(),
        })?;
        Ok(FontHandle::new(FixedAdvanceFont {
            advance: self.font_advance,
            line_height: self.font_advance * 2,
        }))
    }

    fn draw_quad(&mut self, quad: Quad, color: Color) -> RenderResult<()> {
        self.record(DeviceCall::Quad { quad, color })
    }

    fn draw_quad_gradient(&mut self, quad: Quad, corners: CornerColors) -> RenderResult<()> {
        self.record(DeviceCall::QuadGradient { quad, corners })
    }

    fn draw_glyph_run(
        &mut self,
        _font: &FontHandle,
        text: &str,
        x: i32,
        y: i32,
        color: Color,
        scale: f32,
    ) -> RenderResult<()> {
        self.record(DeviceCall::GlyphRun {
            text: text.to_string(),
            x,
            y,
            color,
            scale,
        })
    }

    fn draw_image(
        &mut self,
        _image: &ImageHandle,
        quad: Quad,
        color: Color,
        scale: f32,
    ) -> RenderResult<()> {
        self.record(DeviceCall::Image { quad, color, scale })
    }

    fn enable_clip(&mut self, region: ClipRegion) -> RenderResult<()> {
        self.record(DeviceCall::EnableClip(region))
    }

    fn disable_clip(&mut self) -> RenderResult<()> {
        self.record(DeviceCall::DisableClip)
    }

    fn set_blend_mode(&mut self, mode: BlendMode) -> RenderResult<()> {
        self.record(DeviceCall::BlendMode(mode))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/device.rs"]
mod tests;
