//! Hex color parsing for brand colors.
//!
//! Brand files express colors the way CSS does. The accepted forms are:
//!
//! | Form | Example | Alpha |
//! |---|---|---|
//! | `#rgb` | `#fa0` | opaque |
//! | `#rgba` | `#fa08` | nibble, doubled |
//! | `#rrggbb` | `#f59e0b` | opaque |
//! | `#rrggbbaa` | `#f59e0b26` | explicit byte |
//!
//! The 8-digit form is how a layer embeds its alpha in a stroke or fill color
//! instead of using a separate opacity pass.

use thiserror::Error;
use tiny_skia::Color;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("invalid color '{0}': expected #rgb, #rgba, #rrggbb or #rrggbbaa")]
    Invalid(String),
}

/// Parse a hex color string into a straight-alpha [`Color`].
pub fn parse_color(value: &str) -> Result<Color, ColorError> {
    let invalid = || ColorError::Invalid(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|n| n * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16);

    let rgba = match hex.len() {
        3 => (nibble(0), nibble(1), nibble(2), Ok(255)),
        4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
        6 => (byte(0), byte(2), byte(4), Ok(255)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        _ => return Err(invalid()),
    };
    match rgba {
        (Ok(r), Ok(g), Ok(b), Ok(a)) => Ok(Color::from_rgba8(r, g, b, a)),
        _ => Err(invalid()),
    }
}

/// Return `color` with its alpha multiplied by `factor` (clamped to 0..=1).
pub fn with_alpha(color: Color, factor: f32) -> Color {
    let mut c = color;
    c.set_alpha((color.alpha() * factor).clamp(0.0, 1.0));
    c
}

/// Fully transparent variant of `color`, used as the far stop of glows so
/// the gradient fades in the color's own hue rather than through black.
pub fn transparent(color: Color) -> Color {
    with_alpha(color, 0.0)
}
