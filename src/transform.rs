//! CDN transform tokens and source URL encoding.
//!
//! Every generated image URL has the shape
//! `<cdn-base>/<comma-joined-tokens>/<percent-encoded-source-url>`, where the
//! tokens instruct the image service to convert, compress, crop or sharpen
//! the source on the fly. See the
//! [Cloudinary transformation reference](https://cloudinary.com/documentation/image_transformations)
//! for the token vocabulary.
//!
//! Everything here is pure string assembly — the CDN does the pixel work.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, percent_encode};

/// Fetch endpoint of the image delivery service. All transformed URLs hang
/// off this base.
pub const CLOUDINARY_URL_BASE: &str = "https://res.cloudinary.com/canonical/image/fetch";

/// Escapes everything outside ASCII alphanumerics and `-._~`, including `/`
/// and `:`, so the whole source URL survives as a single path segment of the
/// CDN URL. Matches Python's `quote(url, safe="")`.
const FULL_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// How the source file's extension steers transform and srcset decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Vector image. Raster conversion would blur it, so the format token is
    /// forced to `svg` and no responsive candidates are generated — scaling a
    /// vector serves no one.
    Svg,
    /// Already-modern raster format (`webp`, `avif`). The source format is
    /// kept unless the caller overrides it; candidates are generated as usual.
    Modern(&'static str),
    /// Any other extension: the requested (or auto) format applies.
    Other,
}

/// Classify a URL path by its extension, case-insensitively.
pub fn classify(path: &str) -> SourceKind {
    let path = path.to_ascii_lowercase();
    if path.ends_with(".svg") {
        SourceKind::Svg
    } else if path.ends_with(".webp") {
        SourceKind::Modern("webp")
    } else if path.ends_with(".avif") {
        SourceKind::Modern("avif")
    } else {
        SourceKind::Other
    }
}

/// Pick the format token value. An explicit caller override always wins;
/// otherwise SVG and modern formats keep their own extension, and everything
/// else falls back to `auto` (the CDN negotiates with the browser).
pub fn format_token(kind: SourceKind, requested: Option<&str>) -> String {
    match (requested, kind) {
        (Some(fmt), _) => fmt.to_string(),
        (None, SourceKind::Svg) => "svg".to_string(),
        (None, SourceKind::Modern(ext)) => ext.to_string(),
        (None, SourceKind::Other) => "auto".to_string(),
    }
}

/// Ordered CDN transform tokens shared by the primary `src` and every srcset
/// candidate. Token order is fixed so generated URLs are reproducible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSet {
    tokens: Vec<String>,
}

impl TransformSet {
    /// Base token set: format, auto quality, SVG sanitization, then the
    /// optional sharpen and crop-to-fill effects.
    pub fn new(format: &str, sharpen: bool, fill: bool) -> Self {
        let mut tokens = vec![
            format!("f_{format}"),
            "q_auto".to_string(),
            "fl_sanitize".to_string(),
        ];
        if sharpen {
            tokens.push("e_sharpen".to_string());
        }
        if fill {
            tokens.push("c_fill".to_string());
        }
        Self { tokens }
    }

    /// CDN URL for the primary `src`: width plus height when known.
    pub fn src_url(&self, encoded_url: &str, width: u32, height: Option<u32>) -> String {
        let mut tokens = self.tokens.clone();
        tokens.push(format!("w_{width}"));
        if let Some(height) = height {
            tokens.push(format!("h_{height}"));
        }
        format!("{CLOUDINARY_URL_BASE}/{}/{encoded_url}", tokens.join(","))
    }

    /// CDN URL for one srcset candidate: width only — the client picks the
    /// candidate, the CDN scales height to match the aspect ratio.
    pub fn candidate_url(&self, encoded_url: &str, width: u32) -> String {
        let mut tokens = self.tokens.clone();
        tokens.push(format!("w_{width}"));
        format!("{CLOUDINARY_URL_BASE}/{}/{encoded_url}", tokens.join(","))
    }
}

/// Percent-encode a source URL for embedding as one CDN path segment.
///
/// Decodes first so an already-escaped URL is not double-encoded, then
/// re-encodes every byte outside the unreserved set.
pub fn encode_source_url(url: &str) -> String {
    let decoded: Vec<u8> = percent_decode_str(url).collect();
    percent_encode(&decoded, FULL_ENCODE).to_string()
}
