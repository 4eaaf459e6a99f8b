use crate::{
    foundation::core::Rect,
    foundation::error::RenderResult,
    render::device::RenderDevice,
};

/// Clip rectangle in absolute device coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ClipRegion {
    /// Left edge.
    pub x0: i32,
    /// Top edge.
    pub y0: i32,
    /// Right edge.
    pub x1: i32,
    /// Bottom edge.
    pub y1: i32,
}

impl ClipRegion {
    /// Build a [`ClipRegion`] value from absolute corners.
    pub const fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Build a region from caller-local corners and the absolute origin they are relative to.
    pub const fn from_local(x0: i32, y0: i32, x1: i32, y1: i32, origin: (i32, i32)) -> Self {
        let (ox, oy) = origin;
        Self {
            x0: x0.saturating_add(ox),
            y0: y0.saturating_add(oy),
            x1: x1.saturating_add(ox),
            y1: y1.saturating_add(oy),
        }
    }

    /// Same region as a `kurbo` rectangle.
    pub fn to_rect(self) -> Rect {
        Rect::new(
            f64::from(self.x0),
            f64::from(self.y0),
            f64::from(self.x1),
            f64::from(self.y1),
        )
    }
}

/// Clip composition state: at most one region is active, and the first one applied wins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ClipState {
    /// No clip; the device draws everywhere.
    #[default]
    Disabled,
    /// Drawing is limited to this region.
    Enabled(ClipRegion),
}

impl ClipState {
    /// Active region, if any.
    pub fn region(self) -> Option<ClipRegion> {
        match self {
            Self::Disabled => None,
            Self::Enabled(region) => Some(region),
        }
    }

    /// Whether a region is active.
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// Activate `region` unless a region is already active. Returns `true` if it was applied.
    pub fn enable(&mut self, region: ClipRegion) -> bool {
        match self {
            Self::Enabled(_) => false,
            Self::Disabled => {
                *self = Self::Enabled(region);
                true
            }
        }
    }

    /// Clear the active region, whatever it was.
    pub fn disable(&mut self) {
        *self = Self::Disabled;
    }

    /// Push this state to the device: enable the region, or turn device clipping off.
    pub(crate) fn apply<D: RenderDevice + ?Sized>(self, device: &mut D) -> RenderResult<()> {
        match self {
            Self::Enabled(region) => device.enable_clip(region),
            Self::Disabled => device.disable_clip(),
        }
    }
}

impl From<Option<ClipRegion>> for ClipState {
    fn from(region: Option<ClipRegion>) -> Self {
        region.map_or(Self::Disabled, Self::Enabled)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/clip.rs"]
mod tests;
