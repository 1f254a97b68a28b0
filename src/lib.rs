//! # respimg
//!
//! Responsive `<img>` markup generation. Give it an image URL, alt text and a
//! display width; it returns either a finished tag or an attribute mapping,
//! with a CDN transform URL as `src` and `srcset`/`sizes` computed for
//! responsive loading. Page generators call it once per image — there is no
//! state, no I/O, and no retry story: the whole crate is one pure pipeline.
//!
//! ```
//! use respimg::{image_template, ImageOptions};
//!
//! let attrs = image_template(
//!     "https://assets.example.com/v1/hero.png",
//!     "Hero image",
//!     1280,
//!     &ImageOptions { height: Some(720), ..ImageOptions::default() },
//! )?;
//! let tag = attrs.to_html();
//! assert!(tag.starts_with("<img src=\"https://res.cloudinary.com/"));
//! assert!(tag.contains("srcset="));
//! # Ok::<(), respimg::MarkupError>(())
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`markup`] | The pipeline — validation, attribute assembly, HTML rendering, errors |
//! | [`transform`] | CDN transform tokens and source-URL percent-encoding |
//! | [`srcset`] | Candidate-width policy and `srcset`/`sizes` assembly |
//! | [`options`] | [`ImageOptions`] with per-field defaults, [`Loading`], [`OutputMode`] |
//!
//! # Design Decisions
//!
//! ## The CDN Does the Pixels
//!
//! This crate never touches image data. Resizing, format conversion, quality
//! tuning, cropping and sharpening are all delegated to a Cloudinary-style
//! fetch endpoint through URL tokens ([`transform`]). What remains is string
//! assembly, which is why the library is synchronous, allocation-only, and
//! safe to call from any number of threads.
//!
//! ## One Srcset Policy
//!
//! The upstream helper accumulated several generations of candidate-width
//! tables and thresholds. This implementation keeps exactly one policy,
//! documented in [`srcset`]: no candidates at or below 100px, a two-entry
//! double-up for small images, and a breakpoint table capped at the display
//! width (doubled in hi-def mode) for everything else.
//!
//! ## Maud Over Template Engines
//!
//! HTML is produced through [maud](https://maud.lambda.xyz/)'s `Render`
//! trait rather than a runtime template file. Interpolated attribute values
//! are escaped automatically, the "template" is compiled into the binary, and
//! an [`ImageAttrs`] embeds directly into a larger maud page with `(attrs)`.
//!
//! ## Explicit Options Struct
//!
//! Instead of a dozen keyword parameters, everything optional lives in
//! [`ImageOptions`] with documented defaults, built with struct-update
//! syntax. The struct also deserializes from JSON with numeric-string
//! coercion for dimensions, since template contexts are stringly typed.

pub mod markup;
pub mod options;
pub mod srcset;
pub mod transform;

pub use markup::{ImageAttrs, MarkupError, Output, image_template, render};
pub use options::{DEFAULT_SIZES, ImageOptions, Loading, OutputMode};
pub use srcset::DEFAULT_SRCSET_WIDTHS;
pub use transform::CLOUDINARY_URL_BASE;
