//! The HSLA color type.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::color::{Color, Rgba, expand, narrow};

/// A color in hue, saturation, lightness and alpha.
///
/// Serializes as its four raw fields so stored colors reload exactly.
/// Deserialization also accepts the `hsla(...)` string form.
///
/// - `h`: hue in degrees, `[0, 360)`
/// - `s`: saturation, `[0, 1]`
/// - `l`: lightness, `[0, 1]`
/// - `a`: alpha, `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Hsla {
    pub h: f64,
    pub s: f64,
    pub l: f64,
    pub a: f64,
}

impl Default for Hsla {
    fn default() -> Self {
        Self::opaque(0.0, 0.0, 0.0)
    }
}

/// Scale a unit value to a byte, rounding and saturating at the ends.
fn unit_to_byte(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

impl Hsla {
    pub const fn new(h: f64, s: f64, l: f64, a: f64) -> Self {
        Self { h, s, l, a }
    }

    /// Fully opaque color.
    pub const fn opaque(h: f64, s: f64, l: f64) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert any color to HSLA. An `Hsla` input is returned as is.
    pub fn from_color<C: Color + ?Sized>(c: &C) -> Self {
        c.to_hsla()
    }

    /// Convert from 16-bit expanded RGBA channels.
    pub fn from_rgba((r, g, b, a): (u32, u32, u32, u32)) -> Self {
        let r = narrow(r) as f64 / 255.0;
        let g = narrow(g) as f64 / 255.0;
        let b = narrow(b) as f64 / 255.0;
        let a = narrow(a) as f64 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let l = (max + min) / 2.0;

        // Achromatic: hue is undefined and saturation would divide by zero.
        if delta == 0.0 {
            return Self::new(0.0, 0.0, l, a);
        }

        let s = if l > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };

        let sector = if max == r {
            (g - b) / delta
        } else if max == g {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        let h = (sector * 60.0).rem_euclid(360.0);

        Self::new(h, s, l, a)
    }

    /// The 8-bit channels of this color.
    pub fn to_rgba8(&self) -> Rgba {
        Rgba::from(self.rgba())
    }

    /// Rotate the hue by `degrees`, wrapping at 360 and never going below 0.
    #[must_use]
    pub fn rotate_hue(self, degrees: f64) -> Self {
        // `+ 0.0` turns a `-0.0` remainder into `0.0`.
        Self {
            h: ((self.h + degrees) % 360.0).max(0.0) + 0.0,
            ..self
        }
    }

    /// Increase saturation by `percent`, clamped to `[0, 100]`.
    #[must_use]
    pub fn saturate(self, percent: f64) -> Self {
        Self {
            s: (self.s + percent).clamp(0.0, 100.0),
            ..self
        }
    }

    /// Increase lightness by `percent`, clamped to `[0, 100]`.
    #[must_use]
    pub fn lighten(self, percent: f64) -> Self {
        Self {
            l: (self.l + percent).clamp(0.0, 100.0),
            ..self
        }
    }
}

impl Color for Hsla {
    fn rgba(&self) -> (u32, u32, u32, u32) {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let (s, l) = (self.s, self.l);

        let chroma = (1.0 - (2.0 * l - 1.0).abs()) * s;
        let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());

        let (r, g, b) = match h {
            h if h < 1.0 => (chroma, x, 0.0),
            h if h < 2.0 => (x, chroma, 0.0),
            h if h < 3.0 => (0.0, chroma, x),
            h if h < 4.0 => (0.0, x, chroma),
            h if h < 5.0 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let m = l - chroma / 2.0;
        (
            expand(unit_to_byte(r + m)),
            expand(unit_to_byte(g + m)),
            expand(unit_to_byte(b + m)),
            expand(unit_to_byte(self.a)),
        )
    }

    fn to_hsla(&self) -> Hsla {
        *self
    }
}

impl fmt::Display for Hsla {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "hsla({}, {}%, {}%, {})",
            self.h,
            self.s * 100.0,
            self.l * 100.0,
            self.a
        )
    }
}

/// The accepted serialized shapes of [`Hsla`].
#[derive(Deserialize)]
#[serde(untagged)]
enum HslaRepr {
    Text(String),
    Fields { h: f64, s: f64, l: f64, a: f64 },
}

impl<'de> Deserialize<'de> for Hsla {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match HslaRepr::deserialize(deserializer)? {
            HslaRepr::Text(s) => s.parse().map_err(serde::de::Error::custom),
            HslaRepr::Fields { h, s, l, a } => Ok(Hsla::new(h, s, l, a)),
        }
    }
}

impl From<Hsla> for ratatui::style::Color {
    fn from(c: Hsla) -> Self {
        c.to_rgba8().into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsla_of(r: u8, g: u8, b: u8) -> Hsla {
        Hsla::from_color(&Rgba::rgb(r, g, b))
    }

    #[test]
    fn test_primaries_to_hsla() {
        assert_eq!(hsla_of(255, 0, 0), Hsla::opaque(0.0, 1.0, 0.5));
        assert_eq!(hsla_of(0, 255, 0), Hsla::opaque(120.0, 1.0, 0.5));
        assert_eq!(hsla_of(0, 0, 255), Hsla::opaque(240.0, 1.0, 0.5));
    }

    #[test]
    fn test_primaries_to_rgba() {
        assert_eq!(Hsla::opaque(0.0, 1.0, 0.5).to_rgba8(), Rgba::rgb(255, 0, 0));
        assert_eq!(Hsla::opaque(120.0, 1.0, 0.5).to_rgba8(), Rgba::rgb(0, 255, 0));
        assert_eq!(Hsla::opaque(240.0, 1.0, 0.5).to_rgba8(), Rgba::rgb(0, 0, 255));
    }

    #[test]
    fn test_grayscale_is_achromatic() {
        for v in [0u8, 1, 64, 128, 200, 255] {
            let hsla = hsla_of(v, v, v);
            assert_eq!(hsla.s, 0.0);
            assert_eq!(hsla.h, 0.0);
            assert!((hsla.l - v as f64 / 255.0).abs() < 1e-12);
            assert!(!hsla.s.is_nan());
        }
    }

    #[test]
    fn test_hue_stays_positive() {
        // Red is max and blue exceeds green, so the raw sector is negative.
        let hsla = hsla_of(255, 0, 51);
        assert!(hsla.h > 300.0 && hsla.h < 360.0);
    }

    #[test]
    fn test_round_trip_within_one() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(15) {
                for b in (0..=255u8).step_by(15) {
                    let back = hsla_of(r, g, b).to_rgba8();
                    assert!(back.r.abs_diff(r) <= 1, "{r},{g},{b} -> {back:?}");
                    assert!(back.g.abs_diff(g) <= 1, "{r},{g},{b} -> {back:?}");
                    assert!(back.b.abs_diff(b) <= 1, "{r},{g},{b} -> {back:?}");
                    assert_eq!(back.a, 255);
                }
            }
        }
    }

    #[test]
    fn test_alpha_is_carried() {
        let c = Hsla::new(0.0, 1.0, 0.5, 0.5).to_rgba8();
        assert_eq!(c.a, 128);
        let hsla = Hsla::from_color(&Rgba::new(10, 20, 30, 0));
        assert_eq!(hsla.a, 0.0);
    }

    #[test]
    fn test_hue_wraps_before_sector_selection() {
        assert_eq!(
            Hsla::opaque(480.0, 1.0, 0.5).to_rgba8(),
            Hsla::opaque(120.0, 1.0, 0.5).to_rgba8()
        );
        assert_eq!(
            Hsla::opaque(-120.0, 1.0, 0.5).to_rgba8(),
            Hsla::opaque(240.0, 1.0, 0.5).to_rgba8()
        );
    }

    #[test]
    fn test_rotate_hue() {
        let c = Hsla::opaque(120.0, 0.5, 0.5);
        assert_eq!(c.rotate_hue(360.0).h, 120.0);
        assert_eq!(c.rotate_hue(300.0).h, 60.0);
        assert_eq!(c.rotate_hue(-200.0).h, 0.0);
        assert!((c.rotate_hue(360.5).h - 120.5).abs() < 1e-9);
        for deg in [-720.0, -361.0, -1.0, 0.0, 1.0, 359.0, 1000.0] {
            let h = c.rotate_hue(deg).h;
            assert!((0.0..360.0).contains(&h), "{deg} -> {h}");
        }
    }

    #[test]
    fn test_rotate_hue_never_negative_zero() {
        let c = Hsla::opaque(0.0, 1.0, 0.5).rotate_hue(-360.0);
        assert!(c.h.is_sign_positive());
        assert_eq!(c.to_string(), "hsla(0, 100%, 50%, 1)");
        assert!(Hsla::opaque(120.0, 1.0, 0.5).rotate_hue(-840.0).h.is_sign_positive());
    }

    #[test]
    fn test_saturate_and_lighten_clamp() {
        let c = Hsla::opaque(0.0, 0.5, 0.5);
        assert_eq!(c.saturate(0.25).s, 0.75);
        assert_eq!(c.saturate(-1.0).s, 0.0);
        assert_eq!(c.saturate(500.0).s, 100.0);
        assert_eq!(c.lighten(-0.25).l, 0.25);
        assert_eq!(c.lighten(-3.0).l, 0.0);
        assert_eq!(c.lighten(200.0).l, 100.0);
        // Other channels are untouched.
        assert_eq!(c.lighten(0.1).s, 0.5);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            Hsla::new(120.0, 0.5, 0.25, 1.0).to_string(),
            "hsla(120, 50%, 25%, 1)"
        );
        assert_eq!(
            Hsla::new(0.0, 1.0, 0.5, 0.5).to_string(),
            "hsla(0, 100%, 50%, 0.5)"
        );
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Doc {
        color: Hsla,
    }

    #[test]
    fn test_serde_round_trip_is_exact() {
        for i in 0..1000 {
            let f = (i as f64 * 0.7369).fract();
            let doc = Doc {
                color: Hsla::new(f * 360.0, f, 1.0 - f, f),
            };
            let text = toml::to_string(&doc).unwrap();
            assert_eq!(toml::from_str::<Doc>(&text).unwrap(), doc, "{text}");
        }
    }

    #[test]
    fn test_serde_accepts_string_form() {
        let doc: Doc = toml::from_str(r#"color = "hsla(120, 50%, 25%, 1)""#).unwrap();
        assert_eq!(doc.color, Hsla::new(120.0, 0.5, 0.25, 1.0));
        assert!(toml::from_str::<Doc>(r#"color = "rgb(1, 2, 3)""#).is_err());
    }

    #[test]
    fn test_ratatui_color() {
        let c: ratatui::style::Color = Hsla::opaque(240.0, 1.0, 0.5).into();
        assert_eq!(c, ratatui::style::Color::Rgb(0, 0, 255));
    }
}
