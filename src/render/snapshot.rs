use std::{fmt, str::FromStr};

use bitflags::bitflags;

use crate::{
    foundation::core::{BlendMode, Point},
    foundation::error::{RenderError, RenderResult},
    render::clip::ClipState,
    render::context::RenderContext,
    render::device::{FontHandle, RenderDevice},
};

/// One independently saveable part of the render state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateComponent {
    /// Cursor position (not the global offset).
    Position,
    /// RGB and the color dirty flag.
    Color,
    /// Alpha and the alpha dirty flag.
    Alpha,
    /// Active font.
    Font,
    /// Text scale.
    TextScale,
    /// Image scale.
    ImageScale,
    /// Clip state, enabled or not.
    Clip,
    /// Blend mode.
    BlendMode,
}

impl StateComponent {
    /// All components, in restore order.
    pub const ALL: [Self; 8] = [
        Self::Position,
        Self::Color,
        Self::Alpha,
        Self::Font,
        Self::TextScale,
        Self::ImageScale,
        Self::Clip,
        Self::BlendMode,
    ];

    /// Stable lowercase name, as accepted by `FromStr`.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Position => "position",
            Self::Color => "color",
            Self::Alpha => "alpha",
            Self::Font => "font",
            Self::TextScale => "text_scale",
            Self::ImageScale => "image_scale",
            Self::Clip => "clip",
            Self::BlendMode => "blend_mode",
        }
    }

    /// Single-component [`ComponentSet`].
    pub const fn flag(self) -> ComponentSet {
        match self {
            Self::Position => ComponentSet::POSITION,
            Self::Color => ComponentSet::COLOR,
            Self::Alpha => ComponentSet::ALPHA,
            Self::Font => ComponentSet::FONT,
            Self::TextScale => ComponentSet::TEXT_SCALE,
            Self::ImageScale => ComponentSet::IMAGE_SCALE,
            Self::Clip => ComponentSet::CLIP,
            Self::BlendMode => ComponentSet::BLEND_MODE,
        }
    }
}

impl fmt::Display for StateComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StateComponent {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == s)
            .ok_or_else(|| RenderError::invalid_subset(format!("unknown component `{s}`")))
    }
}

bitflags! {
    /// Set of [`StateComponent`]s named by a save request.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct ComponentSet: u8 {
        /// [`StateComponent::Position`].
        const POSITION = 1 << 0;
        /// [`StateComponent::Color`].
        const COLOR = 1 << 1;
        /// [`StateComponent::Alpha`].
        const ALPHA = 1 << 2;
        /// [`StateComponent::Font`].
        const FONT = 1 << 3;
        /// [`StateComponent::TextScale`].
        const TEXT_SCALE = 1 << 4;
        /// [`StateComponent::ImageScale`].
        const IMAGE_SCALE = 1 << 5;
        /// [`StateComponent::Clip`].
        const CLIP = 1 << 6;
        /// [`StateComponent::BlendMode`].
        const BLEND_MODE = 1 << 7;
    }
}

impl ComponentSet {
    /// Components in the set, in restore order.
    pub fn components(self) -> impl Iterator<Item = StateComponent> {
        StateComponent::ALL
            .into_iter()
            .filter(move |c| self.contains(c.flag()))
    }
}

impl From<StateComponent> for ComponentSet {
    fn from(component: StateComponent) -> Self {
        component.flag()
    }
}

impl FromIterator<StateComponent> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = StateComponent>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::empty(), |set, c| set | c.flag())
    }
}

/// Parses a comma separated list of component names, e.g. `"color, alpha"`.
impl FromStr for ComponentSet {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(StateComponent::from_str)
            .collect()
    }
}

/// Captured subset of a [`RenderContext`].
///
/// Snapshots are pooled. Fields outside `captured` hold whatever a previous save wrote and are
/// never read; the accessors return `None` for them.
#[derive(Clone, Debug)]
pub struct Snapshot {
    captured: ComponentSet,
    capture_all: bool,

    cursor: Point,
    rgb: [f32; 3],
    color_changed: bool,
    alpha: f32,
    alpha_changed: bool,
    font: Option<FontHandle>,
    text_scale: f32,
    image_scale: f32,
    clip: ClipState,
    blend_mode: BlendMode,
}

impl Snapshot {
    pub(crate) fn blank() -> Self {
        Self {
            captured: ComponentSet::empty(),
            capture_all: false,
            cursor: Point::ORIGIN,
            rgb: [1.0; 3],
            color_changed: false,
            alpha: 1.0,
            alpha_changed: false,
            font: None,
            text_scale: 1.0,
            image_scale: 1.0,
            clip: ClipState::Disabled,
            blend_mode: BlendMode::Normal,
        }
    }

    /// Components this snapshot holds.
    pub fn captured(&self) -> ComponentSet {
        self.captured
    }

    /// Whether it was saved with no subset.
    pub fn is_capture_all(&self) -> bool {
        self.capture_all
    }

    fn has(&self, component: StateComponent) -> bool {
        self.captured.contains(component.flag())
    }

    /// Saved cursor, if captured.
    pub fn position(&self) -> Option<Point> {
        self.has(StateComponent::Position).then_some(self.cursor)
    }

    /// Saved RGB, if captured.
    pub fn rgb(&self) -> Option<[f32; 3]> {
        self.has(StateComponent::Color).then_some(self.rgb)
    }

    /// Saved alpha, if captured.
    pub fn alpha(&self) -> Option<f32> {
        self.has(StateComponent::Alpha).then_some(self.alpha)
    }

    /// `Some(None)` means "captured, no font was active".
    pub fn font(&self) -> Option<Option<&FontHandle>> {
        self.has(StateComponent::Font).then_some(self.font.as_ref())
    }

    /// Saved text scale, if captured.
    pub fn text_scale(&self) -> Option<f32> {
        self.has(StateComponent::TextScale).then_some(self.text_scale)
    }

    /// Saved image scale, if captured.
    pub fn image_scale(&self) -> Option<f32> {
        self.has(StateComponent::ImageScale).then_some(self.image_scale)
    }

    /// Saved clip state, if captured.
    pub fn clip(&self) -> Option<ClipState> {
        self.has(StateComponent::Clip).then_some(self.clip)
    }

    /// Saved blend mode, if captured.
    pub fn blend_mode(&self) -> Option<BlendMode> {
        self.has(StateComponent::BlendMode).then_some(self.blend_mode)
    }

    /// Capture `subset` from `ctx`; `None` captures everything.
    ///
    /// The mask is replaced, not merged, so nothing from a previous use leaks into the next
    /// restore.
    pub(crate) fn capture(&mut self, ctx: &RenderContext, subset: Option<ComponentSet>) {
        self.captured = ComponentSet::empty();
        self.capture_all = subset.is_none();

        for component in subset.unwrap_or(ComponentSet::all()).components() {
            self.capture_component(ctx, component);
        }
    }

    fn capture_component(&mut self, ctx: &RenderContext, component: StateComponent) {
        match component {
            StateComponent::Position => self.cursor = ctx.cursor,
            StateComponent::Color => {
                self.rgb = [ctx.color.r, ctx.color.g, ctx.color.b];
                self.color_changed = ctx.dirty.color_changed;
            }
            StateComponent::Alpha => {
                self.alpha = ctx.color.a;
                self.alpha_changed = ctx.dirty.alpha_changed;
            }
            StateComponent::Font => self.font = ctx.font.clone(),
            StateComponent::TextScale => self.text_scale = ctx.text_scale,
            StateComponent::ImageScale => self.image_scale = ctx.image_scale,
            StateComponent::Clip => self.clip = ctx.clip,
            StateComponent::BlendMode => self.blend_mode = ctx.blend_mode,
        }
        self.captured.insert(component.flag());
    }

    /// Write the captured components back onto `ctx`.
    ///
    /// Clip and blend mode are re-issued to `device`; every other component is a plain field
    /// write. A device error stops the restore at that component.
    pub(crate) fn apply<D: RenderDevice + ?Sized>(
        &self,
        ctx: &mut RenderContext,
        device: &mut D,
    ) -> RenderResult<()> {
        let mask = if self.capture_all {
            ComponentSet::all()
        } else {
            self.captured
        };

        for component in mask.components() {
            match component {
                StateComponent::Position => ctx.cursor = self.cursor,
                StateComponent::Color => {
                    let [r, g, b] = self.rgb;
                    ctx.color.r = r;
                    ctx.color.g = g;
                    ctx.color.b = b;
                    ctx.dirty.color_changed = self.color_changed;
                }
                StateComponent::Alpha => {
                    ctx.color.a = self.alpha;
                    ctx.dirty.alpha_changed = self.alpha_changed;
                }
                StateComponent::Font => ctx.font = self.font.clone(),
                StateComponent::TextScale => ctx.text_scale = self.text_scale,
                StateComponent::ImageScale => ctx.image_scale = self.image_scale,
                StateComponent::Clip => ctx.replace_clip(device, self.clip)?,
                StateComponent::BlendMode => ctx.set_blend_mode(device, self.blend_mode)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/snapshot.rs"]
mod tests;
