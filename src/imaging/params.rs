//! Parameter types for the composition.
//!
//! These describe *what* to draw, not *how*. They are the interface between
//! the [`calculations`](super::calculations) (pure geometry) and the
//! compositor, and between the compositor and a [`Typeface`](super::Typeface).
//!
//! ## Types
//!
//! - [`CanvasSize`]: surface dimensions, 1200×630 by convention.
//! - [`Opacity`]: alpha factor clamped to 0–1 on construction.
//! - [`FontWeight`] / [`FontSpec`]: what a text run is measured and drawn with.
//! - [`Geometry`]: the fixed layout constants of the card.

/// Surface dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanvasSize {
    pub width: u32,
    pub height: u32,
}

impl CanvasSize {
    /// The Open Graph convention.
    pub const OG: CanvasSize = CanvasSize {
        width: 1200,
        height: 630,
    };

    pub fn width_f(self) -> f32 {
        self.width as f32
    }

    pub fn height_f(self) -> f32 {
        self.height as f32
    }
}

impl Default for CanvasSize {
    fn default() -> Self {
        Self::OG
    }
}

/// Alpha factor for a layer (0 = invisible, 1 = opaque).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opacity(f32);

impl Opacity {
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    /// From an 8-bit alpha byte, as written in `#rrggbbaa` colors.
    pub fn from_byte(byte: u8) -> Self {
        Self(byte as f32 / 255.0)
    }

    pub fn value(self) -> f32 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Font used to measure and draw one text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSpec {
    pub weight: FontWeight,
    /// Pixel size (em height).
    pub size: f32,
    /// Extra advance added after every character, in pixels.
    pub letter_spacing: f32,
}

impl FontSpec {
    pub fn regular(size: f32) -> Self {
        Self {
            weight: FontWeight::Regular,
            size,
            letter_spacing: 0.0,
        }
    }

    pub fn bold(size: f32) -> Self {
        Self {
            weight: FontWeight::Bold,
            size,
            letter_spacing: 0.0,
        }
    }

    pub fn with_letter_spacing(self, letter_spacing: f32) -> Self {
        Self {
            letter_spacing,
            ..self
        }
    }
}

/// Fixed layout constants of the card.
///
/// The title block is capped at three lines with a 52px line step regardless
/// of canvas aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    /// Inset from every edge.
    pub padding: f32,
    /// Spacing of the grid overlay.
    pub grid_spacing: f32,
    pub grid_alpha: Opacity,
    pub ring_small_radius: f32,
    pub ring_small_alpha: Opacity,
    pub ring_large_radius: f32,
    pub ring_large_alpha: Opacity,
    pub glow_primary_radius: f32,
    pub glow_primary_alpha: Opacity,
    pub glow_secondary_radius: f32,
    pub glow_secondary_alpha: Opacity,
    /// Fraction of the glow radius at which it reaches full transparency.
    /// The glow box is a square of side `radius`, and the fade ends at 70%
    /// of its diagonal, just short of the box edge.
    pub glow_fade_stop: f32,
    /// Logo square edge.
    pub logo_size: u32,
    pub logo_opacity: Opacity,
    /// Upward shift of the logo center, as a fraction of canvas height.
    pub logo_lift: f32,
    pub badge_dot_radius: f32,
    pub badge_glow_blur: f32,
    pub badge_glow_alpha: Opacity,
    /// Gap between the dot's right edge and the brand name.
    pub badge_gap: f32,
    pub badge_font: FontSpec,
    pub domain_font: FontSpec,
    pub title_font: FontSpec,
    /// Baseline-to-baseline distance between title lines.
    pub title_line_height: f32,
    /// Distance from the domain baseline up to the last title baseline.
    pub title_domain_gap: f32,
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            padding: 48.0,
            grid_spacing: 48.0,
            grid_alpha: Opacity::from_byte(0x14),
            ring_small_radius: 64.0,
            ring_small_alpha: Opacity::new(0.06),
            ring_large_radius: 96.0,
            ring_large_alpha: Opacity::new(0.04),
            glow_primary_radius: 320.0,
            glow_primary_alpha: Opacity::from_byte(0x26),
            glow_secondary_radius: 256.0,
            glow_secondary_alpha: Opacity::from_byte(0x14),
            glow_fade_stop: 0.7 * std::f32::consts::SQRT_2,
            logo_size: 320,
            logo_opacity: Opacity::new(0.4),
            logo_lift: 0.15,
            badge_dot_radius: 8.0,
            badge_glow_blur: 8.0,
            badge_glow_alpha: Opacity::from_byte(0x99),
            badge_gap: 8.0,
            badge_font: FontSpec::bold(18.0).with_letter_spacing(2.0),
            domain_font: FontSpec::regular(22.0),
            title_font: FontSpec::bold(44.0),
            title_line_height: 52.0,
            title_domain_gap: 48.0,
        }
    }
}
