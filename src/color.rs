//! Color values and the call-to-action contrast rule.

use std::fmt;
use std::str::FromStr;

use palette::{LinSrgb, Srgb};

use crate::error::ColorParseError;

/// An opaque sRGB color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Self = Self::new(0xff, 0xff, 0xff);
    pub const BLACK: Self = Self::new(0x00, 0x00, 0x00);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parses `#rrggbb` or `#rgb` (the leading `#` is optional, case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, ColorParseError> {
        let parsed: Srgb<u8> = hex
            .trim()
            .parse()
            .map_err(|_| ColorParseError::InvalidHex(hex.to_string()))?;
        Ok(Self::new(parsed.red, parsed.green, parsed.blue))
    }

    /// Lower-case `#rrggbb` form.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Returns the channels as an `[r, g, b, 255]` pixel.
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 255]
    }

    /// WCAG 2.1 relative luminance in `0.0..=1.0`.
    pub fn relative_luminance(&self) -> f32 {
        let srgb = Srgb::new(
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        );
        let linear: LinSrgb = srgb.into_linear();
        0.2126 * linear.red + 0.7152 * linear.green + 0.0722 * linear.blue
    }

    /// Light colors need a dark backdrop to stay legible.
    pub fn is_light(&self) -> bool {
        self.relative_luminance() > LIGHT_LUMINANCE_THRESHOLD
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// Luminance above which a text color counts as light.
pub const LIGHT_LUMINANCE_THRESHOLD: f32 = 0.5;

/// A background/foreground color pair for a filled control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContrastPair {
    pub background: Rgb,
    pub foreground: Rgb,
}

/// Picks the call-to-action colors by inverting the template's text color.
///
/// Light text colors (white in the built-in catalog) get a black button with
/// white text; everything else gets a white button with black text.
pub fn cta_contrast(text_color: Rgb) -> ContrastPair {
    if text_color.is_light() {
        ContrastPair {
            background: Rgb::BLACK,
            foreground: Rgb::WHITE,
        }
    } else {
        ContrastPair {
            background: Rgb::WHITE,
            foreground: Rgb::BLACK,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_long_and_short_hex() {
        assert_eq!(Rgb::from_hex("#667eea").unwrap(), Rgb::new(0x66, 0x7e, 0xea));
        assert_eq!(Rgb::from_hex("#0093E9").unwrap(), Rgb::new(0x00, 0x93, 0xe9));
        assert_eq!(Rgb::from_hex("fff").unwrap(), Rgb::WHITE);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(Rgb::from_hex("#12345").is_err());
        assert!(Rgb::from_hex("not a color").is_err());
        assert!("".parse::<Rgb>().is_err());
    }

    #[test]
    fn hex_is_lower_case() {
        assert_eq!(Rgb::new(0xFA, 0x8B, 0xFF).to_hex(), "#fa8bff");
        assert_eq!(Rgb::WHITE.to_string(), "#ffffff");
    }

    #[test]
    fn luminance_extremes() {
        assert!((Rgb::WHITE.relative_luminance() - 1.0).abs() < 1e-4);
        assert!(Rgb::BLACK.relative_luminance().abs() < 1e-4);
    }

    #[test]
    fn white_text_gets_black_button() {
        let pair = cta_contrast(Rgb::WHITE);
        assert_eq!(pair.background, Rgb::BLACK);
        assert_eq!(pair.foreground, Rgb::WHITE);
    }

    #[test]
    fn dark_text_gets_white_button() {
        for text in [Rgb::BLACK, Rgb::new(0x33, 0x33, 0x33)] {
            let pair = cta_contrast(text);
            assert_eq!(pair.background, Rgb::WHITE);
            assert_eq!(pair.foreground, Rgb::BLACK);
        }
    }

    #[test]
    fn contrast_never_matches_text_color() {
        for value in (0..=255u8).step_by(5) {
            let text = Rgb::new(value, value, value);
            assert_ne!(cta_contrast(text).background, text);
        }
        for text in [Rgb::new(0xff, 0xee, 0x00), Rgb::new(0x13, 0x4e, 0x5e)] {
            assert_ne!(cta_contrast(text).background, text);
        }
    }
}
