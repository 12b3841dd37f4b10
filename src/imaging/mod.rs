//! Raster building blocks for the card: pure Rust, no system libraries
//! beyond the installed fonts.
//!
//! | Concern | Crate / function |
//! |---|---|
//! | **Surface, gradients, strokes** | `tiny-skia` |
//! | **Glyph metrics + coverage** | `fontdue` |
//! | **System font lookup** | `fontdb` |
//! | **Logo decode + resample** | `image` (Lanczos3) |
//!
//! The module is split into:
//! - **Calculations**: Pure geometry for every layer (unit testable)
//! - **Parameters**: Canvas size, font specs, fixed layout constants
//! - **Backend**: [`TextMeasure`] / [`Typeface`] traits
//! - **Font**: [`FontdueFace`], the production typeface

pub mod backend;
pub mod calculations;
pub mod font;
pub mod params;

pub use backend::{BackendError, TextMeasure, Typeface};
pub use font::FontdueFace;
pub use params::{CanvasSize, FontSpec, FontWeight, Geometry, Opacity};
