//! Responsive candidate selection and `srcset`/`sizes` assembly.
//!
//! The candidate-width policy in one place:
//!
//! - Images at or below [`MIN_RESPONSIVE_WIDTH`] get no candidates at all —
//!   the srcset overhead outweighs any saving on an icon-sized image.
//! - Images at or below the smallest table entry get exactly two candidates,
//!   the display width and its double, so high-DPI screens have a crisp
//!   option without oversized defaults being served to everyone.
//! - Larger images take every table entry up to a cap of the display width
//!   (doubled in hi-def mode, never beyond the largest table entry), with the
//!   display width itself appended when the table skips over it.
//!
//! The default table follows the [Vanilla framework breakpoints](https://vanillaframework.io/docs/settings/breakpoint-settings).

use crate::transform::TransformSet;

/// Stock candidate widths, ordered ascending.
pub const DEFAULT_SRCSET_WIDTHS: [u32; 4] = [460, 620, 1036, 1681];

/// Display widths at or below this get no responsive candidates.
pub const MIN_RESPONSIVE_WIDTH: u32 = 100;

/// Candidate widths for the srcset, in emission order.
///
/// # Arguments
/// * `width` - Display width of the image
/// * `table` - Candidate width table (ascending); empty disables candidates
/// * `hi_def` - Double the width cap for high-DPI displays
pub fn candidate_widths(width: u32, table: &[u32], hi_def: bool) -> Vec<u32> {
    if width <= MIN_RESPONSIVE_WIDTH {
        return Vec::new();
    }
    let (Some(&smallest), Some(&largest)) = (table.iter().min(), table.iter().max()) else {
        return Vec::new();
    };

    if width <= smallest {
        return vec![width, width * 2];
    }

    let factor = if hi_def { 2 } else { 1 };
    let max_limit = width.saturating_mul(factor).min(largest);

    let mut widths: Vec<u32> = table.iter().copied().filter(|&w| w <= max_limit).collect();
    if width <= max_limit && !widths.contains(&width) {
        widths.push(width);
    }
    widths
}

/// Join candidates into a srcset string: `"<url> <width>w"` entries separated
/// by `", "`. Returns `None` when there are no candidates, so callers can
/// omit the attribute entirely.
pub fn build_srcset(
    transforms: &TransformSet,
    encoded_url: &str,
    widths: &[u32],
) -> Option<String> {
    if widths.is_empty() {
        return None;
    }
    let entries: Vec<String> = widths
        .iter()
        .map(|&w| format!("{} {}w", transforms.candidate_url(encoded_url, w), w))
        .collect();
    Some(entries.join(", "))
}

/// Substitute the display width into every `{}` slot of a sizes template.
/// A template without slots passes through unchanged.
pub fn format_sizes(template: &str, width: u32) -> String {
    template.replace("{}", &width.to_string())
}
