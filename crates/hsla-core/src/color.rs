//! The RGBA contract shared by every color type.

use crate::hsla::Hsla;

/// Expand an 8-bit channel to 16 bits by duplicating the byte.
pub const fn expand(v: u8) -> u32 {
    let v = v as u32;
    v | (v << 8)
}

/// Narrow a 16-bit expanded channel back to its 8-bit value.
pub const fn narrow(v: u32) -> u8 {
    (v >> 8) as u8
}

/// A color that can report its channels as 16-bit expanded RGBA.
///
/// Each returned channel is an 8-bit value expanded with [`expand`], so
/// full intensity is `0xffff`.
pub trait Color {
    /// Red, green, blue and alpha, each in `0..=0xffff`.
    fn rgba(&self) -> (u32, u32, u32, u32);

    /// Convert to HSLA.
    ///
    /// The default goes through [`Color::rgba`]. [`Hsla`] overrides this to
    /// return itself untouched.
    fn to_hsla(&self) -> Hsla {
        Hsla::from_rgba(self.rgba())
    }
}

/// A plain 8-bit per channel color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from red, green and blue.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 0xff)
    }

    /// Format as `#rrggbbaa`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::rgb(0, 0, 0)
    }
}

impl Color for Rgba {
    fn rgba(&self) -> (u32, u32, u32, u32) {
        (expand(self.r), expand(self.g), expand(self.b), expand(self.a))
    }
}

impl From<(u32, u32, u32, u32)> for Rgba {
    fn from((r, g, b, a): (u32, u32, u32, u32)) -> Self {
        Self::new(narrow(r), narrow(g), narrow(b), narrow(a))
    }
}

impl From<Rgba> for ratatui::style::Color {
    fn from(c: Rgba) -> Self {
        ratatui::style::Color::Rgb(c.r, c.g, c.b)
    }
}

/// A model converts arbitrary colors into its own representation.
pub trait Model {
    /// The representation this model produces.
    type Output;

    /// Convert `c` into [`Model::Output`].
    fn convert(&self, c: &dyn Color) -> Self::Output;
}

/// Converts any [`Color`] into [`Hsla`].
#[derive(Debug, Clone, Copy, Default)]
pub struct HslaModel;

impl Model for HslaModel {
    type Output = Hsla;

    fn convert(&self, c: &dyn Color) -> Hsla {
        c.to_hsla()
    }
}
