//! Positions the elements of a [`Composition`] on its canvas.
//!
//! The logo sits at a fixed inset from the top-left corner. Headline,
//! subheadline and call-to-action form one block centered on both axes;
//! headline and subheadline wrap at word boundaries to fit the block width.
//!
//! Text is measured with per-weight average glyph advances rather than real
//! font metrics, so layout stays deterministic regardless of which fonts the
//! rasterizer finds.

use crate::compose::{
    CONTAINER_PADDING, Composition, FontWeight, HEADLINE_GAP, SUBHEADLINE_GAP,
    TEXT_BLOCK_PADDING, TextElement, TextStyle,
};
use crate::geometry::RectF;

/// Distance from the middle of a line box to the baseline, in em. Puts the
/// cap height roughly in the middle of the line.
const BASELINE_OFFSET_EM: f32 = 0.35;

/// Horizontal alignment of a line relative to its `x` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAnchor {
    Start,
    Middle,
}

/// One line of text with its baseline position.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub x: f32,
    pub baseline: f32,
}

/// A text element broken into positioned lines.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedText {
    pub lines: Vec<PlacedLine>,
    pub anchor: TextAnchor,
    pub style: TextStyle,
    /// Bounds of all line boxes.
    pub rect: RectF,
}

/// The call-to-action pill and its label.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedButton {
    pub rect: RectF,
    pub label: PlacedText,
}

impl PlacedButton {
    /// Corner radius that makes the button fully rounded.
    pub fn corner_radius(&self) -> f32 {
        self.rect.height.min(self.rect.width) / 2.0
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub canvas: RectF,
    pub logo: Option<PlacedText>,
    pub headline: PlacedText,
    pub subheadline: PlacedText,
    pub cta: PlacedButton,
}

/// Lays out a composition at its native size.
pub fn layout(composition: &Composition) -> Layout {
    let width = composition.size.width as f32;
    let height = composition.size.height as f32;
    let canvas = RectF::new(0.0, 0.0, width, height);
    let center_x = width / 2.0;

    let block_width = (width - 2.0 * (CONTAINER_PADDING + TEXT_BLOCK_PADDING)).max(0.0);

    let headline_lines = wrap_text(&composition.headline, block_width);
    let subheadline_lines = wrap_text(&composition.subheadline, block_width);

    let headline_height = text_height(&composition.headline.style, headline_lines.len());
    let subheadline_height = text_height(&composition.subheadline.style, subheadline_lines.len());

    let cta = &composition.cta;
    let label_style = cta.label.style;
    let label_height = text_height(&label_style, 1);
    let button_width = measure_text(&cta.label.text, &label_style) + 2.0 * cta.padding.horizontal;
    let button_height = label_height + 2.0 * cta.padding.vertical;

    let block_height =
        headline_height + HEADLINE_GAP + subheadline_height + SUBHEADLINE_GAP + button_height;
    let mut y = (height - block_height) / 2.0;

    let headline = place_lines(
        headline_lines,
        &composition.headline.style,
        center_x,
        y,
        TextAnchor::Middle,
    );
    y += headline_height + HEADLINE_GAP;

    let subheadline = place_lines(
        subheadline_lines,
        &composition.subheadline.style,
        center_x,
        y,
        TextAnchor::Middle,
    );
    y += subheadline_height + SUBHEADLINE_GAP;

    let button_rect = RectF::new(center_x - button_width / 2.0, y, button_width, button_height);
    let label_lines = if cta.label.text.is_empty() {
        Vec::new()
    } else {
        vec![cta.label.text.clone()]
    };
    let label = place_lines(
        label_lines,
        &label_style,
        center_x,
        y + cta.padding.vertical,
        TextAnchor::Middle,
    );

    let logo = composition.logo.as_ref().map(|logo| {
        let lines = if logo.label.text.is_empty() {
            Vec::new()
        } else {
            vec![logo.label.text.clone()]
        };
        place_lines(lines, &logo.label.style, logo.inset, logo.inset, TextAnchor::Start)
    });

    Layout {
        canvas,
        logo,
        headline,
        subheadline,
        cta: PlacedButton {
            rect: button_rect,
            label,
        },
    }
}

/// Estimated advance width of `text` in pixels.
pub fn measure_text(text: &str, style: &TextStyle) -> f32 {
    let glyphs = text.chars().count() as f32;
    glyphs * (style.font_size * average_advance_em(style.weight) + style.letter_spacing)
}

/// Greedy word wrap of an element's text to `max_width`.
///
/// Words wider than the limit get a line of their own. Empty text yields no
/// lines.
pub fn wrap_text(element: &TextElement, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in element.text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if measure_text(&candidate, &element.style) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn average_advance_em(weight: FontWeight) -> f32 {
    match weight {
        FontWeight::SemiBold => 0.56,
        FontWeight::Bold => 0.58,
        FontWeight::Black => 0.62,
    }
}

fn line_box_height(style: &TextStyle) -> f32 {
    style.font_size * style.line_height
}

fn text_height(style: &TextStyle, lines: usize) -> f32 {
    line_box_height(style) * lines as f32
}

fn place_lines(
    lines: Vec<String>,
    style: &TextStyle,
    x: f32,
    top: f32,
    anchor: TextAnchor,
) -> PlacedText {
    let line_height = line_box_height(style);
    let widest = lines
        .iter()
        .map(|line| measure_text(line, style))
        .fold(0.0f32, f32::max);
    let left = match anchor {
        TextAnchor::Start => x,
        TextAnchor::Middle => x - widest / 2.0,
    };
    let rect = RectF::new(left, top, widest, line_height * lines.len() as f32);

    let lines = lines
        .into_iter()
        .enumerate()
        .map(|(index, text)| PlacedLine {
            text,
            x,
            baseline: top
                + line_height * index as f32
                + line_height / 2.0
                + style.font_size * BASELINE_OFFSET_EM,
        })
        .collect();

    PlacedText {
        lines,
        anchor,
        style: *style,
        rect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compose::{LOGO_INSET, compose};
    use crate::config::ConfigurationStore;

    fn default_layout() -> Layout {
        layout(&compose(ConfigurationStore::new().get()))
    }

    #[test]
    fn block_is_vertically_centered() {
        let layout = default_layout();
        let top = layout.headline.rect.y;
        let bottom = layout.cta.rect.bottom();
        assert!(((top + bottom) / 2.0 - 540.0).abs() < 0.01);
    }

    #[test]
    fn block_is_horizontally_centered() {
        let layout = default_layout();
        assert!((layout.cta.rect.center_x() - 540.0).abs() < 0.01);
        assert!((layout.headline.rect.center_x() - 540.0).abs() < 0.01);
        assert!(layout.headline.lines.iter().all(|line| line.x == 540.0));
    }

    #[test]
    fn elements_are_stacked_in_order() {
        let layout = default_layout();
        let headline_gap = layout.subheadline.rect.y - layout.headline.rect.bottom();
        let subheadline_gap = layout.cta.rect.y - layout.subheadline.rect.bottom();
        assert!((headline_gap - HEADLINE_GAP).abs() < 0.01);
        assert!((subheadline_gap - SUBHEADLINE_GAP).abs() < 0.01);
    }

    #[test]
    fn default_content_fits_canvas() {
        let layout = default_layout();
        assert!(layout.canvas.contains(&layout.headline.rect));
        assert!(layout.canvas.contains(&layout.subheadline.rect));
        assert!(layout.canvas.contains(&layout.cta.rect));
    }

    #[test]
    fn logo_sits_at_inset() {
        let layout = default_layout();
        let logo = layout.logo.expect("logo shown by default");
        assert_eq!(logo.anchor, TextAnchor::Start);
        assert_eq!(logo.rect.x, LOGO_INSET);
        assert_eq!(logo.rect.y, LOGO_INSET);
        assert_eq!(logo.lines[0].text, "YOUR LOGO");
    }

    #[test]
    fn cta_size_includes_padding() {
        let composition = compose(ConfigurationStore::new().get());
        let layout = layout(&composition);
        let label_width = measure_text("Shop Now", &composition.cta.label.style);
        assert!((layout.cta.rect.width - (label_width + 2.0 * 43.2)).abs() < 0.01);
        assert!((layout.cta.rect.height - (28.8 * 1.5 + 2.0 * 18.0)).abs() < 0.01);
        assert!((layout.cta.corner_radius() - layout.cta.rect.height / 2.0).abs() < 0.01);
    }

    #[test]
    fn long_headline_wraps() {
        let mut store = ConfigurationStore::new();
        store.set_headline("The quick brown fox jumps over the lazy dog again and again");
        store.select_size_by_name("Google Display");
        let layout = layout(&compose(store.get()));
        assert!(layout.headline.lines.len() > 1);

        let max_width = 970.0 - 2.0 * (CONTAINER_PADDING + TEXT_BLOCK_PADDING);
        for line in &layout.headline.lines {
            // Multi-word lines respect the limit
            if line.text.contains(' ') {
                assert!(measure_text(&line.text, &layout.headline.style) <= max_width);
            }
        }
    }

    #[test]
    fn oversized_word_gets_own_line() {
        let mut store = ConfigurationStore::new();
        store.set_headline("a Supercalifragilisticexpialidocious b");
        store.set_headline_font_size(120);
        let composition = compose(store.get());
        let lines = wrap_text(&composition.headline, 300.0);
        assert_eq!(lines, vec!["a", "Supercalifragilisticexpialidocious", "b"]);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let mut store = ConfigurationStore::new();
        store.set_subheadline("");
        store.set_logo_text("");
        let layout = layout(&compose(store.get()));
        assert!(layout.subheadline.lines.is_empty());
        assert_eq!(layout.subheadline.rect.height, 0.0);
        assert!(layout.logo.unwrap().lines.is_empty());
    }

    #[test]
    fn baselines_advance_by_line_height() {
        let composition = compose(ConfigurationStore::new().get());
        let placed = place_lines(
            vec!["one".into(), "two".into()],
            &composition.headline.style,
            0.0,
            0.0,
            TextAnchor::Middle,
        );
        let step = placed.lines[1].baseline - placed.lines[0].baseline;
        assert!((step - 72.0 * 1.2).abs() < 0.01);
    }
}
