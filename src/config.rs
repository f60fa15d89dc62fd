//! The editable configuration and the store that owns it.
//!
//! [`ConfigurationStore`] is the single source of truth for an editing
//! session. Every field has its own setter; setters report whether anything
//! changed and bump a revision counter so observers can tell edits apart.

use std::ops::RangeInclusive;

use log::warn;

use crate::catalog::{self, ColorTemplate, SizePreset};
use crate::profile::{EditorProfile, LogoSettings};

/// Allowed headline font sizes, in pixels.
pub const HEADLINE_FONT_SIZE_RANGE: RangeInclusive<u32> = 24..=120;

/// Allowed subheadline font sizes, in pixels.
pub const SUBHEADLINE_FONT_SIZE_RANGE: RangeInclusive<u32> = 16..=72;

pub const DEFAULT_HEADLINE: &str = "Amazing Product";
pub const DEFAULT_SUBHEADLINE: &str = "Limited Time Offer - 50% Off!";
pub const DEFAULT_CTA: &str = "Shop Now";
pub const DEFAULT_LOGO_TEXT: &str = "YOUR LOGO";
pub const DEFAULT_HEADLINE_FONT_SIZE: u32 = 72;
pub const DEFAULT_SUBHEADLINE_FONT_SIZE: u32 = 36;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from an [`EditorProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    fn apply_profile(&mut self, profile: &EditorProfile);

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> EditorProfile;
}

// ============================================================================
// Configuration
// ============================================================================

/// Every user-editable parameter of a composition.
///
/// Always fully populated. Font sizes always lie within their ranges and the
/// selected size and template are always catalog entries; the only way to
/// change a value is through [`ConfigurationStore`].
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    headline: String,
    subheadline: String,
    cta: String,
    logo_text: String,
    show_logo: bool,
    headline_font_size: u32,
    subheadline_font_size: u32,
    size: &'static SizePreset,
    template: &'static ColorTemplate,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            headline: DEFAULT_HEADLINE.to_string(),
            subheadline: DEFAULT_SUBHEADLINE.to_string(),
            cta: DEFAULT_CTA.to_string(),
            logo_text: DEFAULT_LOGO_TEXT.to_string(),
            show_logo: true,
            headline_font_size: DEFAULT_HEADLINE_FONT_SIZE,
            subheadline_font_size: DEFAULT_SUBHEADLINE_FONT_SIZE,
            size: catalog::default_size(),
            template: catalog::default_template(),
        }
    }
}

impl Configuration {
    pub fn headline(&self) -> &str {
        &self.headline
    }

    pub fn subheadline(&self) -> &str {
        &self.subheadline
    }

    pub fn cta(&self) -> &str {
        &self.cta
    }

    /// The stored logo text, whether or not the logo is shown.
    pub fn logo_text(&self) -> &str {
        &self.logo_text
    }

    pub fn show_logo(&self) -> bool {
        self.show_logo
    }

    /// The logo text if the logo is shown.
    pub fn visible_logo_text(&self) -> Option<&str> {
        self.show_logo.then_some(self.logo_text.as_str())
    }

    pub fn headline_font_size(&self) -> u32 {
        self.headline_font_size
    }

    pub fn subheadline_font_size(&self) -> u32 {
        self.subheadline_font_size
    }

    pub fn size(&self) -> &'static SizePreset {
        self.size
    }

    pub fn template(&self) -> &'static ColorTemplate {
        self.template
    }
}

// ============================================================================
// ConfigurationStore
// ============================================================================

/// Owns the live [`Configuration`] and exposes one setter per field.
///
/// Setters have no cross-field effects. Hiding the logo keeps its text, so
/// showing it again restores what was there.
///
/// # Example
///
/// ```
/// use ad_composer::ConfigurationStore;
///
/// let mut store = ConfigurationStore::new();
/// store.set_logo_text("ACME");
/// store.set_show_logo(false);
/// store.set_show_logo(true);
/// assert_eq!(store.get().visible_logo_text(), Some("ACME"));
///
/// // Out-of-range sizes are clamped
/// store.set_headline_font_size(500);
/// assert_eq!(store.get().headline_font_size(), 120);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigurationStore {
    config: Configuration,
    revision: u64,
}

impl ConfigurationStore {
    /// Creates a store holding the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current configuration.
    pub fn get(&self) -> &Configuration {
        &self.config
    }

    /// Returns an owned copy of the current configuration.
    pub fn snapshot(&self) -> Configuration {
        self.config.clone()
    }

    /// Number of effective edits since creation.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn set_headline(&mut self, text: impl Into<String>) -> bool {
        let changed = replace(&mut self.config.headline, text.into());
        self.record(changed)
    }

    pub fn set_subheadline(&mut self, text: impl Into<String>) -> bool {
        let changed = replace(&mut self.config.subheadline, text.into());
        self.record(changed)
    }

    pub fn set_cta(&mut self, text: impl Into<String>) -> bool {
        let changed = replace(&mut self.config.cta, text.into());
        self.record(changed)
    }

    pub fn set_logo_text(&mut self, text: impl Into<String>) -> bool {
        let changed = replace(&mut self.config.logo_text, text.into());
        self.record(changed)
    }

    /// Shows or hides the logo. The logo text is kept either way.
    pub fn set_show_logo(&mut self, show: bool) -> bool {
        let changed = replace(&mut self.config.show_logo, show);
        self.record(changed)
    }

    /// Sets the headline font size, clamped to [`HEADLINE_FONT_SIZE_RANGE`].
    pub fn set_headline_font_size(&mut self, size: i32) -> bool {
        let size = clamp_font_size("headline", size, &HEADLINE_FONT_SIZE_RANGE);
        let changed = replace(&mut self.config.headline_font_size, size);
        self.record(changed)
    }

    /// Sets the subheadline font size, clamped to [`SUBHEADLINE_FONT_SIZE_RANGE`].
    pub fn set_subheadline_font_size(&mut self, size: i32) -> bool {
        let size = clamp_font_size("subheadline", size, &SUBHEADLINE_FONT_SIZE_RANGE);
        let changed = replace(&mut self.config.subheadline_font_size, size);
        self.record(changed)
    }

    /// Selects a size preset.
    ///
    /// The preset is resolved against the catalog by name, so a preset built
    /// outside the catalog selects the catalog entry of the same name (or the
    /// default when there is none).
    pub fn select_size(&mut self, preset: &SizePreset) -> bool {
        self.select_size_by_name(preset.name)
    }

    /// Selects a size preset by name, falling back to the first preset.
    pub fn select_size_by_name(&mut self, name: &str) -> bool {
        let preset = catalog::find_size(name).unwrap_or_else(|| {
            warn!("Unknown size preset {name:?}, using the default");
            catalog::default_size()
        });
        let changed = self.config.size != preset;
        self.config.size = preset;
        self.record(changed)
    }

    /// Selects a color template, resolved against the catalog by id.
    pub fn select_template(&mut self, template: &ColorTemplate) -> bool {
        self.select_template_by_id(template.id)
    }

    /// Selects a color template by id, falling back to the first template.
    pub fn select_template_by_id(&mut self, id: &str) -> bool {
        let template = catalog::find_template(id).unwrap_or_else(|| {
            warn!("Unknown color template {id:?}, using the default");
            catalog::default_template()
        });
        let changed = self.config.template.id != template.id;
        self.config.template = template;
        self.record(changed)
    }

    fn record(&mut self, changed: bool) -> bool {
        if changed {
            self.revision = self.revision.wrapping_add(1);
        }
        changed
    }
}

impl Configurable for ConfigurationStore {
    /// Applies a profile through the regular setters, so clamping and
    /// catalog fallbacks apply exactly as they do for interactive edits.
    fn apply_profile(&mut self, profile: &EditorProfile) {
        self.set_headline(profile.headline.clone());
        self.set_subheadline(profile.subheadline.clone());
        self.set_cta(profile.cta.clone());
        self.set_logo_text(profile.logo.text.clone());
        self.set_show_logo(profile.logo.enabled);
        self.set_headline_font_size(profile.headline_font_size);
        self.set_subheadline_font_size(profile.subheadline_font_size);
        self.select_size_by_name(&profile.size);
        self.select_template_by_id(&profile.template);
    }

    fn export_profile(&self) -> EditorProfile {
        let config = &self.config;
        EditorProfile {
            headline: config.headline.clone(),
            subheadline: config.subheadline.clone(),
            cta: config.cta.clone(),
            logo: LogoSettings {
                text: config.logo_text.clone(),
                enabled: config.show_logo,
            },
            headline_font_size: config.headline_font_size as i32,
            subheadline_font_size: config.subheadline_font_size as i32,
            size: config.size.name.to_string(),
            template: config.template.id.to_string(),
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn clamp_font_size(field: &str, size: i32, range: &RangeInclusive<u32>) -> u32 {
    let min = *range.start() as i32;
    let max = *range.end() as i32;
    let clamped = size.clamp(min, max);
    if clamped != size {
        warn!("{field} font size {size} outside {min}..={max}, clamped to {clamped}");
    }
    clamped as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{COLOR_TEMPLATES, SIZE_PRESETS};

    #[test]
    fn defaults() {
        let config = Configuration::default();
        assert_eq!(config.headline(), "Amazing Product");
        assert_eq!(config.subheadline(), "Limited Time Offer - 50% Off!");
        assert_eq!(config.cta(), "Shop Now");
        assert_eq!(config.logo_text(), "YOUR LOGO");
        assert!(config.show_logo());
        assert_eq!(config.headline_font_size(), 72);
        assert_eq!(config.subheadline_font_size(), 36);
        assert_eq!(config.size(), &SIZE_PRESETS[0]);
        assert_eq!(config.template(), &COLOR_TEMPLATES[0]);
    }

    #[test]
    fn setters_are_independent() {
        let mut store = ConfigurationStore::new();
        let before = store.snapshot();

        assert!(store.set_headline("New"));
        let after = store.get();
        assert_eq!(after.headline(), "New");
        assert_eq!(after.subheadline(), before.subheadline());
        assert_eq!(after.cta(), before.cta());
        assert_eq!(after.headline_font_size(), before.headline_font_size());
        assert_eq!(after.size(), before.size());
    }

    #[test]
    fn revision_counts_effective_edits() {
        let mut store = ConfigurationStore::new();
        assert_eq!(store.revision(), 0);

        assert!(store.set_cta("Buy"));
        assert_eq!(store.revision(), 1);

        // Same value is not an edit
        assert!(!store.set_cta("Buy"));
        assert_eq!(store.revision(), 1);

        assert!(store.set_show_logo(false));
        assert_eq!(store.revision(), 2);
    }

    #[test]
    fn hiding_logo_keeps_text() {
        let mut store = ConfigurationStore::new();
        store.set_show_logo(false);
        assert_eq!(store.get().visible_logo_text(), None);
        assert_eq!(store.get().logo_text(), "YOUR LOGO");

        store.set_show_logo(true);
        assert_eq!(store.get().visible_logo_text(), Some("YOUR LOGO"));
    }

    #[test]
    fn logo_text_editable_while_hidden() {
        let mut store = ConfigurationStore::new();
        store.set_show_logo(false);
        store.set_logo_text("ACME");
        store.set_show_logo(true);
        assert_eq!(store.get().visible_logo_text(), Some("ACME"));
    }

    #[test]
    fn headline_font_size_bounds() {
        let mut store = ConfigurationStore::new();
        store.set_headline_font_size(24);
        assert_eq!(store.get().headline_font_size(), 24);
        store.set_headline_font_size(120);
        assert_eq!(store.get().headline_font_size(), 120);
        store.set_headline_font_size(23);
        assert_eq!(store.get().headline_font_size(), 24);
        store.set_headline_font_size(121);
        assert_eq!(store.get().headline_font_size(), 120);
        store.set_headline_font_size(-5);
        assert_eq!(store.get().headline_font_size(), 24);
    }

    #[test]
    fn subheadline_font_size_bounds() {
        let mut store = ConfigurationStore::new();
        store.set_subheadline_font_size(15);
        assert_eq!(store.get().subheadline_font_size(), 16);
        store.set_subheadline_font_size(73);
        assert_eq!(store.get().subheadline_font_size(), 72);
        store.set_subheadline_font_size(40);
        assert_eq!(store.get().subheadline_font_size(), 40);
    }

    #[test]
    fn size_selection() {
        let mut store = ConfigurationStore::new();
        assert!(store.select_size(&SIZE_PRESETS[3]));
        assert_eq!(store.get().size().name, "Twitter/X Post");
        assert!(!store.select_size_by_name("Twitter/X Post"));

        // Unknown names fall back to the first preset
        assert!(store.select_size_by_name("Poster"));
        assert_eq!(store.get().size(), &SIZE_PRESETS[0]);
    }

    #[test]
    fn template_selection() {
        let mut store = ConfigurationStore::new();
        assert!(store.select_template(&COLOR_TEMPLATES[5]));
        assert_eq!(store.get().template().name, "Golden Hour");

        assert!(store.select_template_by_id("nope"));
        assert_eq!(store.get().template().id, "1");
    }

    #[test]
    fn profile_roundtrip_through_store() {
        let mut store = ConfigurationStore::new();
        store.set_headline("Hello");
        store.set_show_logo(false);
        store.select_size_by_name("Billboard");
        store.select_template_by_id("7");

        let profile = store.export_profile();
        let mut other = ConfigurationStore::new();
        other.apply_profile(&profile);
        assert_eq!(other.get(), store.get());
    }

    #[test]
    fn applying_profile_clamps() {
        let profile = EditorProfile {
            headline_font_size: 1000,
            subheadline_font_size: 0,
            ..EditorProfile::default()
        };
        let mut store = ConfigurationStore::new();
        store.apply_profile(&profile);
        assert_eq!(store.get().headline_font_size(), 120);
        assert_eq!(store.get().subheadline_font_size(), 16);
    }
}
