//! Projection of a [`Configuration`] onto a visual composition.
//!
//! [`compose`] is a pure function: the same configuration always yields an
//! identical [`Composition`]. The composition is always at the native size of
//! the selected preset; preview scaling and export oversampling are applied
//! by their consumers, never here.

use log::debug;

use crate::catalog::Background;
use crate::color::{Rgb, cta_contrast};
use crate::config::Configuration;
use crate::geometry::SizePx;

/// Distance of the logo from the top-left corner.
pub const LOGO_INSET: f32 = 32.0;
/// Logo font size relative to the headline font size.
pub const LOGO_SCALE: f32 = 0.4;
/// Extra spacing between logo glyphs, in em.
pub const LOGO_LETTER_SPACING_EM: f32 = 0.05;

pub const HEADLINE_LINE_HEIGHT: f32 = 1.2;
/// Line height of subheadline and call-to-action text.
pub const BODY_LINE_HEIGHT: f32 = 1.5;

/// CTA font size relative to the subheadline font size.
pub const CTA_FONT_SCALE: f32 = 0.8;
pub const CTA_PADDING_VERTICAL_SCALE: f32 = 0.5;
pub const CTA_PADDING_HORIZONTAL_SCALE: f32 = 1.2;

/// Padding between the canvas edge and its content.
pub const CONTAINER_PADDING: f32 = 32.0;
/// Horizontal padding of the centered text block.
pub const TEXT_BLOCK_PADDING: f32 = 32.0;
/// Space below the headline.
pub const HEADLINE_GAP: f32 = 24.0;
/// Space below the subheadline.
pub const SUBHEADLINE_GAP: f32 = 32.0;

/// Large text shadow under the headline.
pub const HEADLINE_SHADOW: [DropShadow; 2] = [
    DropShadow::new(10.0, 8.0, 0.04),
    DropShadow::new(4.0, 3.0, 0.1),
];
/// Medium text shadow under the subheadline.
pub const SUBHEADLINE_SHADOW: [DropShadow; 2] = [
    DropShadow::new(4.0, 3.0, 0.07),
    DropShadow::new(2.0, 2.0, 0.06),
];
/// Soft, wide shadow under the call-to-action button.
pub const CTA_SHADOW: BoxShadow = BoxShadow {
    offset_y: 25.0,
    blur: 50.0,
    spread: -12.0,
    opacity: 0.25,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontWeight {
    SemiBold,
    Bold,
    Black,
}

impl FontWeight {
    /// Numeric CSS weight.
    pub fn value(self) -> u16 {
        match self {
            Self::SemiBold => 600,
            Self::Bold => 700,
            Self::Black => 900,
        }
    }
}

/// A black shadow following the shape of the glyphs.
///
/// Shadows of one element are applied in order, each to the result of the
/// previous one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropShadow {
    /// Downward offset in pixels.
    pub offset_y: f32,
    /// Blur radius in pixels (twice the Gaussian standard deviation).
    pub blur: f32,
    pub opacity: f32,
}

impl DropShadow {
    pub const fn new(offset_y: f32, blur: f32, opacity: f32) -> Self {
        Self {
            offset_y,
            blur,
            opacity,
        }
    }
}

/// A black shadow cast by a box, grown or shrunk by `spread`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxShadow {
    pub offset_y: f32,
    pub blur: f32,
    pub spread: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub font_size: f32,
    pub color: Rgb,
    pub weight: FontWeight,
    /// Line height as a multiple of the font size.
    pub line_height: f32,
    /// Extra spacing between glyphs in pixels.
    pub letter_spacing: f32,
    pub shadows: &'static [DropShadow],
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub style: TextStyle,
}

/// Brand label pinned to the top-left corner.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoElement {
    pub label: TextElement,
    /// Offset from both the top and left edge.
    pub inset: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub vertical: f32,
    pub horizontal: f32,
}

/// The pill-shaped call-to-action button.
#[derive(Debug, Clone, PartialEq)]
pub struct CtaElement {
    pub label: TextElement,
    pub background: Rgb,
    pub padding: Padding,
    pub shadow: Option<BoxShadow>,
}

/// The full-resolution visual tree derived from a configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    /// Native canvas size, equal to the selected preset.
    pub size: SizePx,
    pub background: Background,
    /// Present only while the logo is shown.
    pub logo: Option<LogoElement>,
    pub headline: TextElement,
    pub subheadline: TextElement,
    pub cta: CtaElement,
}

/// Projects a configuration onto a composition.
///
/// # Example
///
/// ```
/// use ad_composer::{compose, ConfigurationStore, Rgb};
///
/// let store = ConfigurationStore::new();
/// let composition = compose(store.get());
///
/// assert_eq!(composition.size.width, 1080);
/// assert_eq!(composition.cta.background, Rgb::BLACK);
/// ```
pub fn compose(config: &Configuration) -> Composition {
    let template = config.template();
    let text_color = template.text_color;
    let headline_size = config.headline_font_size() as f32;
    let subheadline_size = config.subheadline_font_size() as f32;

    let logo = config.visible_logo_text().map(|text| {
        let font_size = headline_size * LOGO_SCALE;
        LogoElement {
            label: TextElement {
                text: text.to_string(),
                style: TextStyle {
                    font_size,
                    color: text_color,
                    weight: FontWeight::Bold,
                    line_height: BODY_LINE_HEIGHT,
                    letter_spacing: font_size * LOGO_LETTER_SPACING_EM,
                    shadows: &[],
                },
            },
            inset: LOGO_INSET,
        }
    });

    let headline = TextElement {
        text: config.headline().to_string(),
        style: TextStyle {
            font_size: headline_size,
            color: text_color,
            weight: FontWeight::Black,
            line_height: HEADLINE_LINE_HEIGHT,
            letter_spacing: 0.0,
            shadows: &HEADLINE_SHADOW,
        },
    };

    let subheadline = TextElement {
        text: config.subheadline().to_string(),
        style: TextStyle {
            font_size: subheadline_size,
            color: text_color,
            weight: FontWeight::SemiBold,
            line_height: BODY_LINE_HEIGHT,
            letter_spacing: 0.0,
            shadows: &SUBHEADLINE_SHADOW,
        },
    };

    let contrast = cta_contrast(text_color);
    let cta = CtaElement {
        label: TextElement {
            text: config.cta().to_string(),
            style: TextStyle {
                font_size: subheadline_size * CTA_FONT_SCALE,
                color: contrast.foreground,
                weight: FontWeight::Bold,
                line_height: BODY_LINE_HEIGHT,
                letter_spacing: 0.0,
                shadows: &[],
            },
        },
        background: contrast.background,
        padding: Padding {
            vertical: subheadline_size * CTA_PADDING_VERTICAL_SCALE,
            horizontal: subheadline_size * CTA_PADDING_HORIZONTAL_SCALE,
        },
        shadow: Some(CTA_SHADOW),
    };

    debug!(
        "Composed {} on {} ({})",
        config.size(),
        template.name,
        if logo.is_some() { "logo" } else { "no logo" }
    );

    Composition {
        size: config.size().size(),
        background: template.background,
        logo,
        headline,
        subheadline,
        cta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::COLOR_TEMPLATES;
    use crate::config::ConfigurationStore;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn projection_is_deterministic() {
        let mut store = ConfigurationStore::new();
        store.set_headline("Twice");
        store.select_template_by_id("4");
        assert_eq!(compose(store.get()), compose(store.get()));
    }

    #[test]
    fn reference_values_for_default_template() {
        let mut store = ConfigurationStore::new();
        store.set_headline_font_size(72);
        store.set_subheadline_font_size(36);
        store.set_show_logo(true);
        store.set_logo_text("YOUR LOGO");

        let composition = compose(store.get());
        let logo = composition.logo.expect("logo is shown");
        assert_eq!(logo.label.text, "YOUR LOGO");
        assert!(approx(logo.label.style.font_size, 28.8));
        assert_eq!(logo.inset, LOGO_INSET);

        let cta = &composition.cta;
        assert!(approx(cta.label.style.font_size, 28.8));
        assert!(approx(cta.padding.vertical, 18.0));
        assert!(approx(cta.padding.horizontal, 43.2));
        assert_eq!(cta.background.to_hex(), "#000000");
        assert_eq!(cta.label.style.color.to_hex(), "#ffffff");
    }

    #[test]
    fn text_elements_use_template_color() {
        let mut store = ConfigurationStore::new();
        store.select_template_by_id("7");
        let composition = compose(store.get());
        let charcoal = Rgb::new(0x33, 0x33, 0x33);
        assert_eq!(composition.headline.style.color, charcoal);
        assert_eq!(composition.subheadline.style.color, charcoal);
        assert_eq!(composition.logo.unwrap().label.style.color, charcoal);
        assert_eq!(composition.cta.background, Rgb::WHITE);
        assert_eq!(composition.cta.label.style.color, Rgb::BLACK);
    }

    #[test]
    fn headline_and_subheadline_styles() {
        let mut store = ConfigurationStore::new();
        store.set_headline_font_size(100);
        store.set_subheadline_font_size(20);
        let composition = compose(store.get());
        assert_eq!(composition.headline.style.font_size, 100.0);
        assert_eq!(composition.headline.style.line_height, 1.2);
        assert_eq!(composition.headline.style.weight.value(), 900);
        assert_eq!(composition.subheadline.style.font_size, 20.0);
        assert!(approx(composition.cta.label.style.font_size, 16.0));
    }

    #[test]
    fn shadows_follow_element_role() {
        let composition = compose(ConfigurationStore::new().get());
        assert_eq!(composition.headline.style.shadows, &HEADLINE_SHADOW);
        assert_eq!(composition.subheadline.style.shadows, &SUBHEADLINE_SHADOW);
        assert_eq!(composition.cta.shadow, Some(CTA_SHADOW));
        assert!(composition.cta.label.style.shadows.is_empty());
        assert!(composition.logo.unwrap().label.style.shadows.is_empty());
    }

    #[test]
    fn hidden_logo_is_not_composed() {
        let mut store = ConfigurationStore::new();
        store.set_show_logo(false);
        assert!(compose(store.get()).logo.is_none());
    }

    #[test]
    fn canvas_matches_selected_preset() {
        let mut store = ConfigurationStore::new();
        store.select_size_by_name("Google Display");
        store.select_template_by_id("3");
        let composition = compose(store.get());
        assert_eq!(composition.size, SizePx::new(970, 250));
        assert_eq!(composition.background, COLOR_TEMPLATES[2].background);
    }

    #[test]
    fn cta_contrasts_with_text_for_every_template() {
        let mut store = ConfigurationStore::new();
        for template in &COLOR_TEMPLATES {
            store.select_template(template);
            let composition = compose(store.get());
            assert_ne!(composition.cta.background, template.text_color, "{}", template.name);
            assert_ne!(composition.cta.background, composition.cta.label.style.color);
        }
    }
}
