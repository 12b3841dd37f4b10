//! Text backend traits and shared types.
//!
//! The layout engine only needs to *measure* strings ([`TextMeasure`]); the
//! compositor also needs to *draw* them ([`Typeface`]). Keeping measurement
//! behind a trait makes the wrap algorithm testable with fixed-advance fonts
//! and keeps measured widths identical to drawn widths for the real face.
//!
//! The production implementation is
//! [`FontdueFace`](super::font::FontdueFace).

use super::params::FontSpec;
use thiserror::Error;
use tiny_skia::{Color, Pixmap};

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font unavailable: {0}")]
    Font(String),
    #[error("Rasterization failed: {0}")]
    Raster(String),
}

/// Measures the pixel width of a single-line string.
pub trait TextMeasure {
    /// Advance width of `text` under `font`, letter-spacing included.
    fn measure(&self, text: &str, font: &FontSpec) -> f32;
}

/// A face that can draw what it measures.
///
/// `Sync` so one face can serve a parallel batch.
pub trait Typeface: TextMeasure + Sync {
    /// Draw `text` with its left edge at `x` and its baseline at `baseline`.
    fn draw_text(
        &self,
        surface: &mut Pixmap,
        text: &str,
        font: &FontSpec,
        x: f32,
        baseline: f32,
        color: Color,
    ) -> Result<(), BackendError>;
}

impl<T: TextMeasure + ?Sized> TextMeasure for &T {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        (**self).measure(text, font)
    }
}
