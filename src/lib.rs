//! ad-composer: Core of a social media ad banner editor
//!
//! This crate holds the editable state of an ad banner (texts, font sizes,
//! size preset, color template), projects it onto a native-resolution
//! composition, scales that composition for an on-screen preview and exports
//! it as an oversampled PNG.
//!
//! # Example
//!
//! ```
//! use ad_composer::{Editor, MemoryDelivery, CollectingNotifier};
//!
//! let mut editor = Editor::default();
//! editor.update(|store| {
//!     store.set_headline("Grand Opening");
//!     store.select_size_by_name("Facebook Ad");
//!     store.select_template_by_id("4");
//! });
//!
//! // The preview fits the 600x400 viewport
//! assert!((editor.preview_scale() - 0.5).abs() < 1e-6);
//!
//! // The export is twice the native size
//! let mut delivery = MemoryDelivery::default();
//! let mut notifier = CollectingNotifier::default();
//! let artifact = editor.export(&mut delivery, &mut notifier).unwrap();
//! assert_eq!((artifact.size.width, artifact.size.height), (2400, 1256));
//! assert!(artifact.filename.starts_with("ad-facebook-ad-"));
//! ```
//!
//! # Serializable Profiles
//!
//! A configuration can be described as JSON and applied through
//! [`EditorProfile`] and the [`Configurable`] trait:
//!
//! ```
//! use ad_composer::{Configurable, ConfigurationStore, EditorProfile};
//!
//! let mut store = ConfigurationStore::new();
//! let profile = EditorProfile::from_json(r#"{"headline": "Hello", "template": "6"}"#).unwrap();
//! store.apply_profile(&profile);
//!
//! assert_eq!(store.get().headline(), "Hello");
//! assert_eq!(store.get().template().name, "Golden Hour");
//! ```

mod catalog;
mod color;
mod compose;
mod config;
mod editor;
mod error;
mod export;
mod geometry;
mod layout;
mod preview;
mod profile;
mod svg;

pub use catalog::{
    Background, COLOR_TEMPLATES, ColorTemplate, GradientStop, SIZE_PRESETS, SizePreset,
    default_size, default_template, find_size, find_template, find_template_by_name,
};
pub use color::{ContrastPair, LIGHT_LUMINANCE_THRESHOLD, Rgb, cta_contrast};
pub use compose::{
    Composition, CtaElement, FontWeight, LogoElement, Padding, TextElement, TextStyle, compose,
};
pub use config::{
    Configurable, Configuration, ConfigurationStore, HEADLINE_FONT_SIZE_RANGE,
    SUBHEADLINE_FONT_SIZE_RANGE,
};
pub use editor::{CollectingNotifier, Editor, Notifier, StderrNotifier};
pub use error::{ColorParseError, EXPORT_FAILURE_MESSAGE, ExportError, ExportResult, RasterError};
pub use export::{
    Delivery, DirectoryDelivery, ExportArtifact, ExportJob, Exporter, MemoryDelivery,
    OVERSAMPLING_FACTOR, RasterRequest, Rasterizer, SvgRasterizer, artifact_filename,
    artifact_slug, encode_png, timestamp_token,
};
pub use geometry::{RectF, SizePx};
pub use layout::{Layout, PlacedButton, PlacedLine, PlacedText, TextAnchor, layout};
pub use preview::{PreviewTransform, PreviewViewport, render_preview};
pub use profile::{EditorProfile, LogoSettings};
pub use svg::{render_svg, system_fonts, to_svg};
