/// Geometry types shared with device implementations.
pub use kurbo::{Point, Rect};

/// Straight (non-premultiplied) RGBA color with `f32` channels.
///
/// Channels are nominally in `0.0..=1.0`, but nothing here clamps or renormalizes them: whatever
/// the caller stores is what the device receives.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Color {
    /// Red channel.
    pub r: f32,
    /// Green channel.
    pub g: f32,
    /// Blue channel.
    pub b: f32,
    /// Alpha channel.
    pub a: f32,
}

impl Color {
    /// Opaque white; the initial render color.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Build a [`Color`] value from `f32` channels.
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same RGB, different alpha.
    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Build a [`Color`] value from 8-bit channels, mapping `0..=255` onto `0.0..=1.0`.
    pub fn from_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: f32::from(r) / 255.0,
            g: f32::from(g) / 255.0,
            b: f32::from(b) / 255.0,
            a: f32::from(a) / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

/// How the device combines drawn pixels with the target.
///
/// The render state only stores and forwards this; its meaning is up to the device.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum BlendMode {
    /// Standard "source over destination".
    #[default]
    Normal,
    /// Multiply source and destination.
    Multiply,
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
