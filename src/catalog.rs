//! Built-in size presets and color templates.
//!
//! Both catalogs are compiled in and never change at runtime. A
//! [`Configuration`](crate::Configuration) selects entries by `&'static`
//! reference, so a selection is always a catalog member.

use std::fmt;

use crate::color::Rgb;
use crate::geometry::SizePx;

// ============================================================================
// Size presets
// ============================================================================

/// Named target pixel dimensions for a publishing platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizePreset {
    /// Human-readable, unique name (e.g. "Instagram Post").
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl SizePreset {
    const fn new(name: &'static str, width: u32, height: u32) -> Self {
        Self { name, width, height }
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }
}

impl fmt::Display for SizePreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.width, self.height)
    }
}

pub static SIZE_PRESETS: [SizePreset; 8] = [
    SizePreset::new("Instagram Post", 1080, 1080),
    SizePreset::new("Instagram Story", 1080, 1920),
    SizePreset::new("Facebook Ad", 1200, 628),
    SizePreset::new("Twitter/X Post", 1200, 675),
    SizePreset::new("LinkedIn Post", 1200, 627),
    SizePreset::new("YouTube Thumbnail", 1280, 720),
    SizePreset::new("Google Display", 970, 250),
    SizePreset::new("Billboard", 1920, 1080),
];

/// The preset selected when nothing else is.
pub fn default_size() -> &'static SizePreset {
    &SIZE_PRESETS[0]
}

/// Looks up a size preset by its exact name.
pub fn find_size(name: &str) -> Option<&'static SizePreset> {
    SIZE_PRESETS.iter().find(|preset| preset.name == name)
}

// ============================================================================
// Backgrounds
// ============================================================================

/// A color stop along a gradient line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub color: Rgb,
    /// Position along the gradient line, `0.0..=1.0`.
    pub offset: f32,
}

impl GradientStop {
    pub const fn new(color: Rgb, offset: f32) -> Self {
        Self { color, offset }
    }
}

/// Background fill of a composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Background {
    Solid(Rgb),
    /// CSS-style linear gradient. `angle` is in degrees, 0 pointing up and
    /// increasing clockwise.
    LinearGradient {
        angle: f32,
        stops: &'static [GradientStop],
    },
}

impl Background {
    /// Renders the background as a CSS `background` value.
    pub fn to_css(&self) -> String {
        match self {
            Self::Solid(color) => color.to_hex(),
            Self::LinearGradient { angle, stops } => {
                let stops: Vec<String> = stops
                    .iter()
                    .map(|stop| format!("{} {}%", stop.color, stop.offset * 100.0))
                    .collect();
                format!("linear-gradient({}deg, {})", angle, stops.join(", "))
            }
        }
    }

    /// Computes the gradient line `(x1, y1, x2, y2)` for a `width` x `height`
    /// box, following CSS sizing: the line passes through the center and is
    /// long enough for the corners to hit the first and last stops.
    ///
    /// Returns `None` for solid backgrounds.
    pub fn gradient_line(&self, width: f32, height: f32) -> Option<(f32, f32, f32, f32)> {
        let Self::LinearGradient { angle, .. } = self else {
            return None;
        };
        let radians = angle.to_radians();
        let (dx, dy) = (radians.sin(), -radians.cos());
        let half = (width * dx.abs() + height * dy.abs()) / 2.0;
        let (cx, cy) = (width / 2.0, height / 2.0);
        Some((cx - dx * half, cy - dy * half, cx + dx * half, cy + dy * half))
    }
}

// ============================================================================
// Color templates
// ============================================================================

/// Named background/text color pairing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorTemplate {
    pub id: &'static str,
    pub name: &'static str,
    pub background: Background,
    pub text_color: Rgb,
}

const fn diagonal(stops: &'static [GradientStop]) -> Background {
    Background::LinearGradient { angle: 135.0, stops }
}

const fn stop(hex: u32, offset: f32) -> GradientStop {
    GradientStop::new(
        Rgb::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8),
        offset,
    )
}

const WHITE_TEXT: Rgb = Rgb::WHITE;
const BLACK_TEXT: Rgb = Rgb::BLACK;
const CHARCOAL_TEXT: Rgb = Rgb::new(0x33, 0x33, 0x33);

const SUNSET_GLOW: [GradientStop; 2] = [stop(0x667eea, 0.0), stop(0x764ba2, 1.0)];
const OCEAN_BREEZE: [GradientStop; 2] = [stop(0x0093e9, 0.0), stop(0x80d0c7, 1.0)];
const FOREST_GREEN: [GradientStop; 2] = [stop(0x134e5e, 0.0), stop(0x71b280, 1.0)];
const FIRE_BURST: [GradientStop; 3] = [
    stop(0xfa8bff, 0.0),
    stop(0x2bd2ff, 0.5),
    stop(0x2bff88, 1.0),
];
const MIDNIGHT: [GradientStop; 2] = [stop(0x000000, 0.0), stop(0x434343, 1.0)];
const GOLDEN_HOUR: [GradientStop; 2] = [stop(0xffd89b, 0.0), stop(0x19547b, 1.0)];
const COTTON_CANDY: [GradientStop; 2] = [stop(0xfad0c4, 0.0), stop(0xffd1ff, 1.0)];
const ELECTRIC_LIME: [GradientStop; 2] = [stop(0x00f260, 0.0), stop(0x0575e6, 1.0)];
const ROYAL_PURPLE: [GradientStop; 2] = [stop(0x360033, 0.0), stop(0x0b8793, 1.0)];
const NEON_LIGHTS: [GradientStop; 2] = [stop(0xf093fb, 0.0), stop(0xf5576c, 1.0)];

pub static COLOR_TEMPLATES: [ColorTemplate; 10] = [
    ColorTemplate {
        id: "1",
        name: "Sunset Glow",
        background: diagonal(&SUNSET_GLOW),
        text_color: WHITE_TEXT,
    },
    ColorTemplate {
        id: "2",
        name: "Ocean Breeze",
        background: diagonal(&OCEAN_BREEZE),
        text_color: WHITE_TEXT,
    },
    ColorTemplate {
        id: "3",
        name: "Forest Green",
        background: diagonal(&FOREST_GREEN),
        text_color: WHITE_TEXT,
    },
    ColorTemplate {
        id: "4",
        name: "Fire Burst",
        background: diagonal(&FIRE_BURST),
        text_color: BLACK_TEXT,
    },
    ColorTemplate {
        id: "5",
        name: "Midnight",
        background: diagonal(&MIDNIGHT),
        text_color: WHITE_TEXT,
    },
    ColorTemplate {
        id: "6",
        name: "Golden Hour",
        background: diagonal(&GOLDEN_HOUR),
        text_color: BLACK_TEXT,
    },
    ColorTemplate {
        id: "7",
        name: "Cotton Candy",
        background: diagonal(&COTTON_CANDY),
        text_color: CHARCOAL_TEXT,
    },
    ColorTemplate {
        id: "8",
        name: "Electric Lime",
        background: diagonal(&ELECTRIC_LIME),
        text_color: WHITE_TEXT,
    },
    ColorTemplate {
        id: "9",
        name: "Royal Purple",
        background: diagonal(&ROYAL_PURPLE),
        text_color: WHITE_TEXT,
    },
    ColorTemplate {
        id: "10",
        name: "Neon Lights",
        background: diagonal(&NEON_LIGHTS),
        text_color: WHITE_TEXT,
    },
];

/// The template selected when nothing else is.
pub fn default_template() -> &'static ColorTemplate {
    &COLOR_TEMPLATES[0]
}

/// Looks up a template by id.
pub fn find_template(id: &str) -> Option<&'static ColorTemplate> {
    COLOR_TEMPLATES.iter().find(|template| template.id == id)
}

/// Looks up a template by display name, ignoring ASCII case.
pub fn find_template_by_name(name: &str) -> Option<&'static ColorTemplate> {
    COLOR_TEMPLATES
        .iter()
        .find(|template| template.name.eq_ignore_ascii_case(name))
}
