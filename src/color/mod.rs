//! Color values and color allocation.
//!
//! [`Rgba`] and [`Hsla`] are the color representations used throughout the
//! crate. The allocation engine assigns colors from a [`ColorPalette`] to string
//! keys under two policies:
//!
//! - **Rotating** ([`RotatingAssigner`]): unlimited keys, colors reused only after
//!   the whole scheme has been handed out.
//! - **Unique** ([`UniquePools`]): finite named pools, colors held exclusively
//!   until released.
//!
//! [`Colorer`] bundles both behind a single palette, together with the
//! case-insensitive fixed-value table.
//!
//! ```rust
//! use vizscene::color::{ColorPalette, Colorer, Rgba};
//!
//! let palette = ColorPalette::new(vec![Rgba::RED, Rgba::GREEN, Rgba::BLUE])
//!     .with_fixed("ruby", Rgba::RED);
//! let mut colorer = Colorer::new(palette);
//!
//! assert_eq!(colorer.fixed("Ruby"), Rgba::RED);
//! let a = colorer.unique_assign("A", "main");
//! assert_eq!(colorer.unique("A", "main"), Some(a));
//! ```

pub mod colorer;
pub mod palette;
pub mod rotating;
pub mod unique;

pub use colorer::Colorer;
pub use palette::ColorPalette;
pub use rotating::RotatingAssigner;
pub use unique::{UniquePools, MAIN_POOL};

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGBA color with 8-bit components.
///
/// Serialized as a `#rrggbb` (opaque) or `#rrggbbaa` hex string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
#[repr(C)]
pub struct Rgba {
    /// Red component (0-255).
    pub r: u8,
    /// Green component (0-255).
    pub g: u8,
    /// Blue component (0-255).
    pub b: u8,
    /// Alpha component (0-255, 255 = fully opaque).
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque pink (hot pink).
    pub const PINK: Self = Self::new(255, 105, 180, 255);

    /// Create a new RGBA color.
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create an opaque RGB color (alpha = 255).
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Create a color with modified alpha.
    #[must_use]
    pub const fn with_alpha(self, a: u8) -> Self {
        Self::new(self.r, self.g, self.b, a)
    }

    /// Create an opaque color from a packed `0xRRGGBB` value.
    #[must_use]
    pub const fn from_rgb_u32(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Parse a `#rrggbb` or `#rrggbbaa` hex string (leading `#` optional).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidColor`] for any other length or non-hex digits.
    pub fn from_hex(hex: &str) -> crate::Result<Self> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.is_ascii() || (digits.len() != 6 && digits.len() != 8) {
            return Err(Error::InvalidColor(hex.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| Error::InvalidColor(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// Format as a lowercase hex string; alpha is omitted when opaque.
    #[must_use]
    pub fn to_hex(self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgba {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgba {
    type Error = Error;

    fn try_from(value: String) -> crate::Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgba> for String {
    fn from(color: Rgba) -> Self {
        color.to_hex()
    }
}

/// HSLA color with floating-point components.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Hsla {
    /// Hue (0.0-360.0 degrees).
    pub h: f32,
    /// Saturation (0.0-1.0).
    pub s: f32,
    /// Lightness (0.0-1.0).
    pub l: f32,
    /// Alpha (0.0-1.0).
    pub a: f32,
}

impl Hsla {
    /// Create a new HSLA color.
    #[must_use]
    pub const fn new(h: f32, s: f32, l: f32, a: f32) -> Self {
        Self { h, s, l, a }
    }

    /// Create an opaque HSL color (alpha = 1.0).
    #[must_use]
    pub const fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(h, s, l, 1.0)
    }

    /// Convert to RGBA.
    #[must_use]
    pub fn to_rgba(self) -> Rgba {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        let (r, g, b) = if s == 0.0 {
            (l, l, l)
        } else {
            let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
            let p = 2.0 * l - q;

            (
                hue_to_rgb(p, q, h + 1.0 / 3.0),
                hue_to_rgb(p, q, h),
                hue_to_rgb(p, q, h - 1.0 / 3.0),
            )
        };

        Rgba::new(
            (r * 255.0) as u8,
            (g * 255.0) as u8,
            (b * 255.0) as u8,
            (self.a.clamp(0.0, 1.0) * 255.0) as u8,
        )
    }
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl From<Hsla> for Rgba {
    fn from(hsla: Hsla) -> Self {
        hsla.to_rgba()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_constants() {
        assert_eq!(Rgba::BLACK, Rgba::rgb(0, 0, 0));
        assert_eq!(Rgba::WHITE, Rgba::rgb(255, 255, 255));
        assert_eq!(Rgba::RED.r, 255);
        assert_eq!(Rgba::GREEN.g, 255);
        assert_eq!(Rgba::BLUE.b, 255);
    }

    #[test]
    fn test_from_hex_opaque() {
        assert_eq!(Rgba::from_hex("#1f77b4").unwrap(), Rgba::rgb(0x1f, 0x77, 0xb4));
        assert_eq!(Rgba::from_hex("FF0000").unwrap(), Rgba::RED);
    }

    #[test]
    fn test_from_hex_with_alpha() {
        let color = Rgba::from_hex("#00ff0080").unwrap();
        assert_eq!(color, Rgba::GREEN.with_alpha(0x80));
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        assert!(matches!(Rgba::from_hex("red"), Err(Error::InvalidColor(_))));
        assert!(matches!(Rgba::from_hex("#12345"), Err(Error::InvalidColor(_))));
        assert!(matches!(Rgba::from_hex("#gg0000"), Err(Error::InvalidColor(_))));
        assert!(Rgba::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_to_hex_omits_opaque_alpha() {
        assert_eq!(Rgba::RED.to_hex(), "#ff0000");
        assert_eq!(Rgba::TRANSPARENT.to_hex(), "#00000000");
        assert_eq!(Rgba::BLUE.to_string(), "#0000ff");
    }

    #[test]
    fn test_from_str_parses_hex() {
        let color: Rgba = "#ff69b4".parse().unwrap();
        assert_eq!(color, Rgba::PINK);
    }

    #[test]
    fn test_from_rgb_u32() {
        assert_eq!(Rgba::from_rgb_u32(0x1f77b4), Rgba::rgb(0x1f, 0x77, 0xb4));
    }

    #[test]
    fn test_hsla_to_rgba() {
        let red = Hsla::hsl(0.0, 1.0, 0.5).to_rgba();
        assert_eq!((red.r, red.g, red.b), (255, 0, 0));

        let gray = Hsla::hsl(0.0, 0.0, 0.5).to_rgba();
        assert_eq!((gray.r, gray.g, gray.b), (127, 127, 127));
    }

    #[test]
    fn test_hsla_to_rgba_low_lightness() {
        let dark_red = Hsla::hsl(0.0, 1.0, 0.25).to_rgba();
        assert_eq!((dark_red.r, dark_red.g, dark_red.b), (127, 0, 0));
    }

    #[test]
    fn test_hsla_hue_wraps() {
        // 360 degrees is the same hue as 0.
        assert_eq!(Hsla::hsl(360.0, 1.0, 0.5).to_rgba(), Hsla::hsl(0.0, 1.0, 0.5).to_rgba());
    }

    #[test]
    fn test_hsla_to_rgba_cyan() {
        let cyan = Hsla::hsl(180.0, 1.0, 0.5).to_rgba();
        assert_eq!(cyan.r, 0);
        // Allow for floating point rounding (254 or 255)
        assert!(cyan.g >= 254);
        assert!(cyan.b >= 254);
    }

    #[test]
    fn test_from_hsla_trait() {
        let rgba: Rgba = Hsla::hsl(0.0, 1.0, 0.5).into();
        assert_eq!(rgba, Rgba::RED);
    }

    #[test]
    fn test_hsla_new() {
        let hsla = Hsla::new(180.0, 0.5, 0.5, 0.8);
        approx::assert_relative_eq!(hsla.h, 180.0);
        approx::assert_relative_eq!(hsla.a, 0.8);
    }
}
