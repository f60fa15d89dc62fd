//! SVG rendering of compositions using resvg/usvg.
//!
//! A [`Composition`] is first written out as an SVG document at its native
//! size, then rasterized at any pixel ratio. Both the preview and the export
//! go through here, so they always draw the same picture.

use std::fmt::Write as _;
use std::sync::{Arc, OnceLock};

use image::{Rgba, RgbaImage};
use log::debug;
use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree, fontdb};

use crate::catalog::Background;
use crate::color::Rgb;
use crate::compose::{BoxShadow, Composition, DropShadow};
use crate::error::RasterError;
use crate::geometry::{RectF, SizePx};
use crate::layout::{Layout, PlacedText, TextAnchor, layout};

/// Font families tried in order for every text element.
pub const FONT_FAMILY: &str =
    "Inter, Helvetica, Arial, 'Liberation Sans', 'DejaVu Sans', sans-serif";

const HEADLINE_FILTER: &str = "headline-shadow";
const SUBHEADLINE_FILTER: &str = "subheadline-shadow";
const CTA_FILTER: &str = "cta-shadow";

// ============================================================================
// SVG document
// ============================================================================

/// Writes a composition as a standalone SVG document at its native size.
pub fn to_svg(composition: &Composition) -> String {
    let placed = layout(composition);
    let SizePx { width, height } = composition.size;

    let mut svg = String::new();
    // Writing into a String cannot fail
    let _ = write_document(&mut svg, composition, &placed, width, height);
    svg
}

fn write_document(
    out: &mut String,
    composition: &Composition,
    placed: &Layout,
    width: u32,
    height: u32,
) -> std::fmt::Result {
    write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#
    )?;

    out.push_str("<defs>");
    let fill = match composition.background {
        Background::Solid(color) => color.to_hex(),
        Background::LinearGradient { stops, .. } => {
            // Gradients always have a line
            let (x1, y1, x2, y2) = composition
                .background
                .gradient_line(width as f32, height as f32)
                .unwrap_or((0.0, 0.0, width as f32, height as f32));
            write!(
                out,
                r#"<linearGradient id="background" gradientUnits="userSpaceOnUse" x1="{x1}" y1="{y1}" x2="{x2}" y2="{y2}">"#
            )?;
            for stop in stops {
                write!(
                    out,
                    r#"<stop offset="{}" stop-color="{}"/>"#,
                    stop.offset, stop.color
                )?;
            }
            out.push_str("</linearGradient>");
            "url(#background)".to_string()
        }
    };
    write_drop_shadow_filter(out, HEADLINE_FILTER, placed.headline.style.shadows)?;
    write_drop_shadow_filter(out, SUBHEADLINE_FILTER, placed.subheadline.style.shadows)?;
    let cta_shadow = composition
        .cta
        .shadow
        .map(|shadow| (shadow, box_shadow_rect(&placed.cta.rect, &shadow)));
    if let Some((shadow, rect)) = &cta_shadow {
        write_box_shadow_filter(out, rect, shadow)?;
    }
    out.push_str("</defs>");

    write!(
        out,
        r#"<rect x="0" y="0" width="{width}" height="{height}" fill="{fill}"/>"#
    )?;

    if let Some(logo) = &placed.logo {
        write_text(out, logo, None)?;
    }
    write_text(out, &placed.headline, Some(HEADLINE_FILTER))?;
    write_text(out, &placed.subheadline, Some(SUBHEADLINE_FILTER))?;

    let button = &placed.cta;
    let radius = button.corner_radius();
    if let Some((shadow, rect)) = &cta_shadow {
        let shadow_radius = (radius + shadow.spread).max(0.0);
        write!(
            out,
            r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{shadow_radius}" ry="{shadow_radius}" fill="{}" fill-opacity="{}" filter="url(#{CTA_FILTER})"/>"#,
            rect.x,
            rect.y,
            rect.width,
            rect.height,
            Rgb::BLACK,
            shadow.opacity
        )?;
    }
    write!(
        out,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="{radius}" ry="{radius}" fill="{}"/>"#,
        button.rect.x,
        button.rect.y,
        button.rect.width,
        button.rect.height,
        composition.cta.background
    )?;
    write_text(out, &button.label, None)?;

    out.push_str("</svg>");
    Ok(())
}

/// Chains one `feDropShadow` per shadow. Writes nothing for unshadowed text.
fn write_drop_shadow_filter(
    out: &mut String,
    id: &str,
    shadows: &[DropShadow],
) -> std::fmt::Result {
    if shadows.is_empty() {
        return Ok(());
    }
    write!(
        out,
        r#"<filter id="{id}" x="-20%" y="-50%" width="140%" height="200%">"#
    )?;
    for shadow in shadows {
        write!(
            out,
            r#"<feDropShadow dx="0" dy="{}" stdDeviation="{}" flood-color="{}" flood-opacity="{}"/>"#,
            shadow.offset_y,
            shadow.blur / 2.0,
            Rgb::BLACK,
            shadow.opacity
        )?;
    }
    out.push_str("</filter>");
    Ok(())
}

/// Blur for the shadow rectangle, with a region wide enough for the whole
/// Gaussian tail.
fn write_box_shadow_filter(
    out: &mut String,
    rect: &RectF,
    shadow: &BoxShadow,
) -> std::fmt::Result {
    let deviation = shadow.blur / 2.0;
    let margin = deviation * 3.0;
    write!(
        out,
        r#"<filter id="{CTA_FILTER}" filterUnits="userSpaceOnUse" x="{}" y="{}" width="{}" height="{}"><feGaussianBlur stdDeviation="{deviation}"/></filter>"#,
        rect.x - margin,
        rect.y - margin,
        rect.width + 2.0 * margin,
        rect.height + 2.0 * margin
    )
}

/// The box casting `shadow`: the button grown by the spread and moved down
/// by the offset.
fn box_shadow_rect(button: &RectF, shadow: &BoxShadow) -> RectF {
    RectF::new(
        button.x - shadow.spread,
        button.y - shadow.spread + shadow.offset_y,
        (button.width + 2.0 * shadow.spread).max(0.0),
        (button.height + 2.0 * shadow.spread).max(0.0),
    )
}

fn write_text(out: &mut String, text: &PlacedText, filter: Option<&str>) -> std::fmt::Result {
    let anchor = match text.anchor {
        TextAnchor::Start => "start",
        TextAnchor::Middle => "middle",
    };
    let style = &text.style;
    for line in &text.lines {
        write!(
            out,
            r#"<text x="{}" y="{}" font-family="{}" font-size="{}" font-weight="{}" fill="{}" text-anchor="{anchor}""#,
            line.x,
            line.baseline,
            FONT_FAMILY,
            style.font_size,
            style.weight.value(),
            style.color,
        )?;
        if style.letter_spacing != 0.0 {
            write!(out, r#" letter-spacing="{}""#, style.letter_spacing)?;
        }
        if let Some(id) = filter.filter(|_| !style.shadows.is_empty()) {
            write!(out, r#" filter="url(#{id})""#)?;
        }
        write!(out, ">{}</text>", escape_xml(&line.text))?;
    }
    Ok(())
}

/// Escapes the five XML special characters and drops characters XML 1.0
/// does not allow in documents (most C0 controls, U+FFFE and U+FFFF).
pub fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\t' | '\n' | '\r' => escaped.push(ch),
            '\u{0}'..='\u{1f}' | '\u{fffe}' | '\u{ffff}' => {}
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

// ============================================================================
// Rasterization
// ============================================================================

/// The process-wide font database, loaded from system fonts on first use.
pub fn system_fonts() -> Arc<fontdb::Database> {
    static FONTS: OnceLock<Arc<fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = fontdb::Database::new();
            db.load_system_fonts();
            debug!("Loaded {} font faces", db.len());
            Arc::new(db)
        })
        .clone()
}

/// Renders an SVG document into an RGBA image of exactly `output` pixels,
/// scaling the document's user space by `scale`.
pub fn render_svg(
    svg_data: &str,
    output: SizePx,
    scale: f32,
    fonts: Arc<fontdb::Database>,
) -> Result<RgbaImage, RasterError> {
    let opts = Options {
        fontdb: fonts,
        ..Options::default()
    };
    let tree =
        Tree::from_str(svg_data, &opts).map_err(|e| RasterError::InvalidSvg(e.to_string()))?;

    let mut pixmap =
        Pixmap::new(output.width, output.height).ok_or(RasterError::SurfaceUnavailable(output))?;
    resvg::render(&tree, Transform::from_scale(scale, scale), &mut pixmap.as_mut());

    Ok(pixmap_to_rgba_image(&pixmap))
}

/// Converts a tiny_skia Pixmap to an image::RgbaImage.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let height = pixmap.height();
    let mut img = RgbaImage::new(width, height);

    for (index, pixel) in pixmap.pixels().iter().enumerate() {
        let x = index as u32 % width;
        let y = index as u32 / width;
        // tiny_skia stores premultiplied alpha
        let (r, g, b, a) = unpremultiply(pixel.red(), pixel.green(), pixel.blue(), pixel.alpha());
        img.put_pixel(x, y, Rgba([r, g, b, a]));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
