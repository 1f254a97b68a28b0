//! Attribute assembly and HTML rendering for responsive `<img>` tags.
//!
//! [`image_template`] is the whole pipeline: validate the URL, classify its
//! format, assemble transform tokens, build the primary `src` and the srcset
//! candidates, and return an [`ImageAttrs`]. [`render`] wraps it with the
//! output-mode switch for callers that want a finished tag string.
//!
//! Rendering goes through [`maud::Render`], so an `ImageAttrs` drops straight
//! into a larger maud template with `(attrs)` and interpolated values are
//! escaped automatically. Because maud compiles templates into the binary
//! there is no runtime template to load or cache.

use crate::options::{ImageOptions, Loading, OutputMode};
use crate::srcset;
use crate::transform::{self, SourceKind, TransformSet};
use maud::{Escaper, Render};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write;
use thiserror::Error;
use url::Url;

#[derive(Error, Debug)]
pub enum MarkupError {
    #[error("url must contain a hostname: {0}")]
    MissingHost(String),
    #[error("output mode must be 'html' or 'attrs', got '{0}'")]
    InvalidOutputMode(String),
}

/// Final attribute set for one `<img>` tag.
///
/// `srcset` and `sizes` are always either both present or both absent.
/// Serializes to a flat JSON mapping with extra attributes merged in at the
/// top level, width as a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageAttrs {
    pub src: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub srcset: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sizes: Option<String>,
    pub alt: String,
    pub width: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    pub loading: Loading,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl ImageAttrs {
    /// Render to a self-closing `<img ... />` tag string.
    pub fn to_html(&self) -> String {
        self.render().into_string()
    }
}

impl Render for ImageAttrs {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str("<img");
        push_attr(buffer, "src", &self.src);
        if let Some(srcset) = &self.srcset {
            push_attr(buffer, "srcset", srcset);
        }
        if let Some(sizes) = &self.sizes {
            push_attr(buffer, "sizes", sizes);
        }
        push_attr(buffer, "alt", &self.alt);
        push_attr(buffer, "width", &self.width.to_string());
        if let Some(height) = self.height {
            push_attr(buffer, "height", &height.to_string());
        }
        push_attr(buffer, "loading", self.loading.as_str());
        for (name, value) in &self.extra {
            push_attr(buffer, name, value);
        }
        buffer.push_str(" />");
    }
}

/// Append ` name="value"` with the value HTML-escaped.
fn push_attr(buffer: &mut String, name: &str, value: &str) {
    buffer.push(' ');
    buffer.push_str(name);
    buffer.push_str("=\"");
    // Writing into a String cannot fail
    let _ = Escaper::new(buffer).write_str(value);
    buffer.push('"');
}

/// Generate the responsive image attribute set for one source URL.
///
/// # Arguments
/// * `url` - Absolute source image URL; must carry a hostname
/// * `alt` - Alt text for accessibility
/// * `width` - Display width in pixels
/// * `opts` - Everything else, see [`ImageOptions`]
///
/// # Errors
/// [`MarkupError::MissingHost`] when the URL is relative or has no host.
pub fn image_template(
    url: &str,
    alt: &str,
    width: u32,
    opts: &ImageOptions,
) -> Result<ImageAttrs, MarkupError> {
    let parsed = Url::parse(url).map_err(|_| MarkupError::MissingHost(url.to_string()))?;
    if parsed.host_str().is_none() {
        return Err(MarkupError::MissingHost(url.to_string()));
    }

    let kind = transform::classify(parsed.path());
    let format = transform::format_token(kind, opts.format.as_deref());
    // Crop-to-fill needs a target ratio, so it requires both dimensions
    let fill = opts.fill && opts.height.is_some();
    let transforms = TransformSet::new(&format, opts.sharpen, fill);
    let encoded_url = transform::encode_source_url(url);

    let src = transforms.src_url(&encoded_url, width, opts.height);

    let widths = if kind == SourceKind::Svg {
        Vec::new()
    } else {
        let table = opts
            .srcset_widths
            .as_deref()
            .unwrap_or(&srcset::DEFAULT_SRCSET_WIDTHS);
        srcset::candidate_widths(width, table, opts.hi_def)
    };
    let srcset_value = srcset::build_srcset(&transforms, &encoded_url, &widths);
    let sizes = srcset_value
        .as_ref()
        .map(|_| srcset::format_sizes(&opts.sizes, width));

    Ok(ImageAttrs {
        src,
        srcset: srcset_value,
        sizes,
        alt: alt.to_string(),
        width,
        height: opts.height,
        loading: opts.loading,
        extra: opts.attrs.clone(),
    })
}

/// Result of [`render`]: markup text or the raw attribute mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Html(String),
    Attrs(ImageAttrs),
}

/// [`image_template`] plus the output-mode switch.
pub fn render(
    url: &str,
    alt: &str,
    width: u32,
    opts: &ImageOptions,
    mode: OutputMode,
) -> Result<Output, MarkupError> {
    let attrs = image_template(url, alt, width, opts)?;
    Ok(match mode {
        OutputMode::Html => Output::Html(attrs.to_html()),
        OutputMode::Attrs => Output::Attrs(attrs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::CLOUDINARY_URL_BASE;

    const RASTER_URL: &str = "https://assets.example.com/v1/hero.png";

    #[test]
    fn rejects_url_without_hostname() {
        let err = image_template("/static/hero.png", "hero", 800, &ImageOptions::default());
        assert!(matches!(err, Err(MarkupError::MissingHost(_))));
    }

    #[test]
    fn src_is_the_full_cdn_url() {
        let opts = ImageOptions {
            height: Some(1080),
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, "hero", 1920, &opts).unwrap();
        assert_eq!(
            attrs.src,
            format!(
                "{CLOUDINARY_URL_BASE}/f_auto,q_auto,fl_sanitize,w_1920,h_1080/\
                 https%3A%2F%2Fassets.example.com%2Fv1%2Fhero.png"
            )
        );
    }

    #[test]
    fn svg_forces_vector_format_and_no_srcset() {
        let url = "https://assets.example.com/logo.svg";
        let attrs = image_template(url, "logo", 800, &ImageOptions::default()).unwrap();
        assert!(attrs.src.contains("f_svg,"));
        assert!(attrs.srcset.is_none());
        assert!(attrs.sizes.is_none());
    }

    #[test]
    fn svg_format_override_still_disables_srcset() {
        let url = "https://assets.example.com/logo.svg";
        let opts = ImageOptions {
            format: Some("png".to_string()),
            ..ImageOptions::default()
        };
        let attrs = image_template(url, "logo", 800, &opts).unwrap();
        assert!(attrs.src.contains("f_png,"));
        assert!(attrs.srcset.is_none());
    }

    #[test]
    fn webp_keeps_its_format_with_srcset() {
        let url = "https://assets.example.com/photo.webp";
        let attrs = image_template(url, "photo", 800, &ImageOptions::default()).unwrap();
        assert!(attrs.src.contains("f_webp,"));
        let srcset = attrs.srcset.unwrap();
        assert!(srcset.contains("f_webp,"));
        assert!(srcset.contains("460w"));
    }

    #[test]
    fn fill_requires_height() {
        let opts = ImageOptions {
            fill: true,
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, "hero", 800, &opts).unwrap();
        assert!(!attrs.src.contains("c_fill"));

        let opts = ImageOptions {
            fill: true,
            height: Some(600),
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, "hero", 800, &opts).unwrap();
        assert!(attrs.src.contains("c_fill"));
    }

    #[test]
    fn srcset_candidates_carry_width_only() {
        let opts = ImageOptions {
            height: Some(600),
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, "hero", 800, &opts).unwrap();
        // Primary src has both dimensions, candidates only the width
        assert!(attrs.src.contains("w_800,h_600"));
        for entry in attrs.srcset.unwrap().split(", ") {
            assert!(!entry.contains("h_600"), "unexpected height in {entry}");
        }
    }

    #[test]
    fn html_escapes_attribute_values() {
        let opts = ImageOptions {
            srcset_widths: Some(Vec::new()),
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, r#"a "quoted" <alt> & more"#, 800, &opts).unwrap();
        let html = attrs.to_html();
        assert!(html.contains(r#"alt="a &quot;quoted&quot; &lt;alt&gt; &amp; more""#));
    }

    #[test]
    fn html_renders_fixed_attribute_order() {
        let opts = ImageOptions {
            height: Some(50),
            srcset_widths: Some(Vec::new()),
            attrs: BTreeMap::from([("class".to_string(), "hero".to_string())]),
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, "hero", 50, &opts).unwrap();
        assert_eq!(
            attrs.to_html(),
            format!(
                r#"<img src="{}" alt="hero" width="50" height="50" loading="lazy" class="hero" />"#,
                attrs.src
            )
        );
    }

    #[test]
    fn attrs_serialize_with_extras_merged_flat() {
        let opts = ImageOptions {
            srcset_widths: Some(Vec::new()),
            attrs: BTreeMap::from([("id".to_string(), "main".to_string())]),
            ..ImageOptions::default()
        };
        let attrs = image_template(RASTER_URL, "hero", 800, &opts).unwrap();
        let json = serde_json::to_value(&attrs).unwrap();
        assert_eq!(json["width"], 800);
        assert_eq!(json["id"], "main");
        assert_eq!(json["loading"], "lazy");
        assert!(json.get("srcset").is_none());
        assert!(json.get("height").is_none());
    }

    #[test]
    fn render_switches_on_output_mode() {
        let opts = ImageOptions::default();
        let html = render(RASTER_URL, "hero", 800, &opts, OutputMode::Html).unwrap();
        let attrs = render(RASTER_URL, "hero", 800, &opts, OutputMode::Attrs).unwrap();
        match (html, attrs) {
            (Output::Html(tag), Output::Attrs(mapping)) => {
                assert_eq!(tag, mapping.to_html());
            }
            other => panic!("unexpected outputs: {other:?}"),
        }
    }
}
