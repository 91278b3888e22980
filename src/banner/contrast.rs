//! Readable text color for a banner background.

/// Foreground used on light backgrounds.
pub const DARK_TEXT: &str = "#000000";

/// Foreground used on dark backgrounds.
pub const LIGHT_TEXT: &str = "#FFFFFF";

/// Luminance above which a background counts as light.
const LIGHT_BACKGROUND_THRESHOLD: u32 = 125;

/// Split `#RRGGBB` into channels.
///
/// The leading `#` is optional and digits are case-insensitive. Any channel
/// that is not exactly two hex digits reads as 0, so a malformed color is
/// treated as (partially) black rather than rejected.
pub fn parse_channels(hex: &str) -> (u8, u8, u8) {
    let digits = hex.trim().strip_prefix('#').unwrap_or(hex.trim());
    let channel = |index: usize| -> u8 {
        digits
            .get(index * 2..index * 2 + 2)
            .filter(|pair| pair.bytes().all(|b| b.is_ascii_hexdigit()))
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .unwrap_or(0)
    };
    (channel(0), channel(1), channel(2))
}

/// Weighted channel sum scaled by 1000 (`299·R + 587·G + 114·B`).
fn weighted_sum(hex: &str) -> u32 {
    let (r, g, b) = parse_channels(hex);
    299 * r as u32 + 587 * g as u32 + 114 * b as u32
}

/// Perceived luminance on a 0–255 scale.
pub fn luminance(hex: &str) -> f64 {
    weighted_sum(hex) as f64 / 1000.0
}

/// Pick dark text for light backgrounds and light text for dark ones.
///
/// The comparison is strict: a luminance of exactly 125 gets light text.
pub fn text_color_for(background: &str) -> &'static str {
    // Integer comparison avoids rounding at the boundary
    if weighted_sum(background) > LIGHT_BACKGROUND_THRESHOLD * 1000 {
        DARK_TEXT
    } else {
        LIGHT_TEXT
    }
}
