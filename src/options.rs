//! Request options for markup generation.
//!
//! The upstream template helper grew a long tail of keyword parameters; here
//! they are an explicit [`ImageOptions`] struct with documented defaults per
//! field, so call sites name only what they change:
//!
//! ```
//! use respimg::ImageOptions;
//!
//! let opts = ImageOptions {
//!     height: Some(1080),
//!     hi_def: true,
//!     ..ImageOptions::default()
//! };
//! # let _ = opts;
//! ```
//!
//! `ImageOptions` also deserializes from JSON (every field optional), and
//! width/height accept numeric strings there — template contexts routinely
//! hand over `"460"` instead of `460`.

use crate::markup::MarkupError;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Stock `sizes` template. Both `{}` slots receive the display width.
pub const DEFAULT_SIZES: &str = "(min-width: {}px) {}px, 100vw";

/// Browser loading strategy for the generated `<img>` tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Loading {
    /// Defer fetching until the image nears the viewport.
    #[default]
    Lazy,
    /// Let the browser decide.
    Auto,
    /// Fetch immediately — for above-the-fold hero images.
    Eager,
}

impl Loading {
    pub fn as_str(self) -> &'static str {
        match self {
            Loading::Lazy => "lazy",
            Loading::Auto => "auto",
            Loading::Eager => "eager",
        }
    }
}

impl fmt::Display for Loading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Loading {
    type Err = Infallible;

    /// Unrecognized values coerce to `lazy` rather than failing — loading is
    /// a hint, not a contract.
    fn from_str(s: &str) -> Result<Self, Infallible> {
        Ok(match s {
            "auto" => Loading::Auto,
            "eager" => Loading::Eager,
            _ => Loading::Lazy,
        })
    }
}

/// What the generator returns: rendered markup or the raw attribute mapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputMode {
    /// A self-closing `<img ... />` tag string.
    #[default]
    Html,
    /// The attribute mapping, for callers embedding into their own templates.
    Attrs,
}

impl FromStr for OutputMode {
    type Err = MarkupError;

    fn from_str(s: &str) -> Result<Self, MarkupError> {
        match s {
            "html" => Ok(OutputMode::Html),
            "attrs" => Ok(OutputMode::Attrs),
            other => Err(MarkupError::InvalidOutputMode(other.to_string())),
        }
    }
}

/// Options for one markup generation call. All fields have defaults; build
/// with struct-update syntax from [`ImageOptions::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImageOptions {
    /// Display height in pixels. Required for crop-to-fill.
    #[serde(deserialize_with = "dimension")]
    pub height: Option<u32>,
    /// Crop and fill to the exact width × height instead of fitting inside it.
    /// Only takes effect when `height` is set.
    pub fill: bool,
    /// Apply the CDN's sharpen effect.
    pub sharpen: bool,
    /// Loading strategy attribute. Default: lazy.
    pub loading: Loading,
    /// Explicit CDN format override (`"webp"`, `"jpg"`, ...). `None` means
    /// auto-detect from the source extension, falling back to `auto`.
    pub format: Option<String>,
    /// Extra HTML attributes, rendered verbatim after the fixed set. A
    /// `class` entry is passed through like any other attribute.
    pub attrs: BTreeMap<String, String>,
    /// `sizes` template; every `{}` slot receives the display width.
    pub sizes: String,
    /// Candidate width table for srcset. `None` uses
    /// [`DEFAULT_SRCSET_WIDTHS`](crate::srcset::DEFAULT_SRCSET_WIDTHS); an
    /// explicitly empty table disables candidates.
    pub srcset_widths: Option<Vec<u32>>,
    /// Double the srcset width cap for high-DPI displays.
    pub hi_def: bool,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            height: None,
            fill: false,
            sharpen: false,
            loading: Loading::Lazy,
            format: None,
            attrs: BTreeMap::new(),
            sizes: DEFAULT_SIZES.to_string(),
            srcset_widths: None,
            hi_def: false,
        }
    }
}

/// Accept a pixel dimension as a JSON number or a numeric string.
fn dimension<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Dimension {
        Number(u32),
        Text(String),
    }

    match Option::<Dimension>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Dimension::Number(n)) => Ok(Some(n)),
        Some(Dimension::Text(s)) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid dimension: {s:?}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documentation() {
        let opts = ImageOptions::default();
        assert_eq!(opts.loading, Loading::Lazy);
        assert_eq!(opts.sizes, DEFAULT_SIZES);
        assert!(!opts.fill && !opts.sharpen && !opts.hi_def);
        assert!(opts.height.is_none());
        assert!(opts.format.is_none());
        assert!(opts.srcset_widths.is_none());
        assert!(opts.attrs.is_empty());
    }

    #[test]
    fn loading_parses_known_values() {
        assert_eq!("lazy".parse(), Ok(Loading::Lazy));
        assert_eq!("auto".parse(), Ok(Loading::Auto));
        assert_eq!("eager".parse(), Ok(Loading::Eager));
    }

    #[test]
    fn loading_coerces_unknown_values_to_lazy() {
        assert_eq!("nonsense".parse(), Ok(Loading::Lazy));
    }

    #[test]
    fn output_mode_rejects_unknown_values() {
        assert!(matches!("html".parse(), Ok(OutputMode::Html)));
        assert!(matches!("attrs".parse(), Ok(OutputMode::Attrs)));
        assert!(matches!(
            "xml".parse::<OutputMode>(),
            Err(MarkupError::InvalidOutputMode(mode)) if mode == "xml"
        ));
    }

    #[test]
    fn deserializes_with_all_fields_missing() {
        let opts: ImageOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.sizes, DEFAULT_SIZES);
        assert!(opts.height.is_none());
    }

    #[test]
    fn height_accepts_number_or_numeric_string() {
        let opts: ImageOptions = serde_json::from_str(r#"{"height": 460}"#).unwrap();
        assert_eq!(opts.height, Some(460));

        let opts: ImageOptions = serde_json::from_str(r#"{"height": "460"}"#).unwrap();
        assert_eq!(opts.height, Some(460));
    }

    #[test]
    fn height_rejects_non_numeric_string() {
        assert!(serde_json::from_str::<ImageOptions>(r#"{"height": "tall"}"#).is_err());
    }

    #[test]
    fn extra_attributes_deserialize_as_map() {
        let opts: ImageOptions =
            serde_json::from_str(r#"{"attrs": {"class": "hero", "id": "main"}}"#).unwrap();
        assert_eq!(opts.attrs.get("class").map(String::as_str), Some("hero"));
        assert_eq!(opts.attrs.get("id").map(String::as_str), Some("main"));
    }
}
