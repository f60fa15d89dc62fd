//! Serializable editor profile for frontend/backend communication.
//!
//! An [`EditorProfile`] describes a whole configuration as JSON input: the
//! size preset is referenced by name and the template by id. Missing fields
//! take their default values, so `{}` describes the default configuration.
//! Profiles are read on request; nothing is kept between editing sessions.
//!
//! # Example
//!
//! ```
//! use ad_composer::{Configurable, ConfigurationStore, EditorProfile};
//!
//! let profile = EditorProfile::from_json(r#"{ "headline": "Big Sale", "size": "Billboard" }"#)
//!     .unwrap();
//!
//! let mut store = ConfigurationStore::new();
//! store.apply_profile(&profile);
//! assert_eq!(store.get().size().width, 1920);
//!
//! let json = store.export_profile().to_json().unwrap();
//! assert!(json.contains("\"headlineFontSize\":72"));
//! ```

use serde::{Deserialize, Serialize};

use crate::catalog;
use crate::config::{
    DEFAULT_CTA, DEFAULT_HEADLINE, DEFAULT_HEADLINE_FONT_SIZE, DEFAULT_LOGO_TEXT,
    DEFAULT_SUBHEADLINE, DEFAULT_SUBHEADLINE_FONT_SIZE,
};

/// Serializable settings for the logo label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct LogoSettings {
    /// Brand text, kept even while the logo is hidden.
    #[serde(default = "default_logo_text")]
    pub text: String,

    /// Whether the logo is shown.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for LogoSettings {
    fn default() -> Self {
        Self {
            text: default_logo_text(),
            enabled: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_logo_text() -> String {
    DEFAULT_LOGO_TEXT.to_string()
}

/// A serializable description of a full configuration.
///
/// Font sizes are carried as plain integers; they are clamped when the
/// profile is applied to a [`ConfigurationStore`](crate::ConfigurationStore).
///
/// # JSON Format
///
/// ```json
/// {
///   "headline": "Amazing Product",
///   "subheadline": "Limited Time Offer - 50% Off!",
///   "cta": "Shop Now",
///   "logo": { "text": "YOUR LOGO", "enabled": true },
///   "headlineFontSize": 72,
///   "subheadlineFontSize": 36,
///   "size": "Instagram Post",
///   "template": "1"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase", default)]
pub struct EditorProfile {
    pub headline: String,
    pub subheadline: String,
    pub cta: String,
    pub logo: LogoSettings,
    pub headline_font_size: i32,
    pub subheadline_font_size: i32,
    /// Size preset name.
    pub size: String,
    /// Color template id.
    pub template: String,
}

impl Default for EditorProfile {
    fn default() -> Self {
        Self {
            headline: DEFAULT_HEADLINE.to_string(),
            subheadline: DEFAULT_SUBHEADLINE.to_string(),
            cta: DEFAULT_CTA.to_string(),
            logo: LogoSettings::default(),
            headline_font_size: DEFAULT_HEADLINE_FONT_SIZE as i32,
            subheadline_font_size: DEFAULT_SUBHEADLINE_FONT_SIZE as i32,
            size: catalog::default_size().name.to_string(),
            template: catalog::default_template().id.to_string(),
        }
    }
}

impl EditorProfile {
    /// Creates a profile describing the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_is_default() {
        let profile = EditorProfile::from_json("{}").unwrap();
        assert_eq!(profile, EditorProfile::default());
        assert!(profile.logo.enabled);
        assert_eq!(profile.size, "Instagram Post");
        assert_eq!(profile.template, "1");
    }

    #[test]
    fn json_uses_camel_case() {
        let json = EditorProfile::new().to_json_pretty().unwrap();
        assert!(json.contains("\"headlineFontSize\""));
        assert!(json.contains("\"subheadlineFontSize\""));
        assert!(json.contains("\"logo\""));
    }

    #[test]
    fn partial_logo_settings() {
        let profile = EditorProfile::from_json(r#"{ "logo": { "enabled": false } }"#).unwrap();
        assert!(!profile.logo.enabled);
        assert_eq!(profile.logo.text, "YOUR LOGO");
    }

    #[test]
    fn rejects_wrong_types() {
        assert!(EditorProfile::from_json(r#"{ "headlineFontSize": "big" }"#).is_err());
    }
}
