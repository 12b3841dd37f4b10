//! # OG Card
//!
//! A deterministic Open Graph image renderer. Give it a post title and a brand
//! file; it draws a 1200×630 PNG locally, with no image-generation service
//! and no network round-trip.
//!
//! # Architecture: Layout, Compose, Export
//!
//! ```text
//! 1. Layout    title      →  ≤ 3 lines     (greedy wrap + ellipsis clamp)
//! 2. Compose   request    →  PNG bytes     (8 layers, back to front)
//! 3. Export    PNG bytes  →  <slug>.png    (atomic write)
//! ```
//!
//! Layout and compose are pure: the same title, brand and logo asset always
//! produce the same bytes. Only the logo load suspends, and only export
//! touches the disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`layout`] | Word wrap and three-line clamp for the title |
//! | [`compose`] | The layer pipeline, PNG encoding, and the `render` operation |
//! | [`logo`] | Bounded asynchronous logo load into a [`logo::LogoAsset`] |
//! | [`export`] | Atomic saves, the one-at-a-time interactive exporter, parallel batches |
//! | [`config`] | `brand.toml` loading, stock defaults, overlay merge, validation |
//! | [`color`] | CSS-style hex color parsing |
//! | [`naming`] | Title → file name slug, batch de-duplication |
//! | [`types`] | `RenderRequest`, `RenderedImage`, `LineLayout` |
//! | [`imaging`] | Geometry, text backend traits, the fontdue typeface |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Text Behind a Trait
//!
//! The layout engine measures and the compositor draws through
//! [`imaging::TextMeasure`] and [`imaging::Typeface`]. Production uses
//! [`imaging::FontdueFace`]; tests use a fixed-advance block face, so every
//! layout and pixel assertion is exact and independent of installed fonts.
//!
//! ## Brand as a Value
//!
//! The brand is loaded once and passed by reference into every render. There
//! is no global state, so a batch can share one brand across rayon workers
//! and tests need no setup or teardown.
//!
//! ## Fixed Title Block
//!
//! Titles are clamped to three lines on a 52px step, anchored 48px above the
//! domain line. The block does not scale with the canvas aspect ratio.
//!
//! ## Logo Degrades, Everything Else Fails
//!
//! A missing, corrupt, or slow logo produces a card without the logo layer
//! and a warning. Any other drawing or encoding failure aborts the render with
//! one error and nothing is written.

pub mod color;
pub mod compose;
pub mod config;
pub mod export;
pub mod imaging;
pub mod layout;
pub mod logo;
pub mod naming;
pub mod output;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
