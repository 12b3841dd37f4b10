//! Shared test utilities for the og-card test suite.
//!
//! Brand fixtures, in-memory PNG builders, and pixel readers used by the
//! compositor, logo, and export tests. Text is drawn with the deterministic
//! faces in [`crate::imaging::backend::tests`], never with system fonts.
//!
//! # Usage
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let brand = brand_without_logo();
//! let logo = solid_logo(320, [255, 0, 0, 255]);
//! let c = Compositor::new(&BlockFace).compose(&RenderRequest::new("Hi", &brand), &logo)?;
//! assert_eq!(rgba_at(&c.surface, 56, 56), [245, 158, 11, 255]);
//! ```

use std::path::Path;

use image::{ImageFormat, Rgba, RgbaImage};
use tiny_skia::Pixmap;

use crate::config::BrandConfig;
use crate::logo::LogoAsset;

// =========================================================================
// Brand fixtures
// =========================================================================

/// The stock brand with no logo configured.
pub fn brand_without_logo() -> BrandConfig {
    BrandConfig {
        logo: None,
        ..BrandConfig::default()
    }
}

/// Write a `brand.toml` with `body` into `dir`.
pub fn write_brand_toml(dir: &Path, body: &str) {
    std::fs::write(dir.join(crate::config::CONFIG_FILE), body).unwrap();
}

// =========================================================================
// Image builders
// =========================================================================

/// Encode a solid-color PNG in memory.
pub fn png_bytes(width: u32, height: u32, rgba: [u8; 4]) -> Vec<u8> {
    let img = RgbaImage::from_pixel(width, height, Rgba(rgba));
    let mut buf = std::io::Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// Write a solid-color PNG to `path`.
pub fn write_png(path: &Path, width: u32, height: u32, rgba: [u8; 4]) {
    std::fs::write(path, png_bytes(width, height, rgba)).unwrap();
}

/// A ready logo asset of one solid color.
pub fn solid_logo(edge: u32, rgba: [u8; 4]) -> LogoAsset {
    let asset = LogoAsset::from_bytes(&png_bytes(edge, edge, rgba), edge);
    assert!(asset.pixmap().is_some(), "fixture logo failed to decode");
    asset
}

// =========================================================================
// Pixel readers
// =========================================================================

/// Demultiplied RGBA at `(x, y)`. Panics when out of bounds.
pub fn rgba_at(surface: &Pixmap, x: u32, y: u32) -> [u8; 4] {
    let px = surface
        .pixel(x, y)
        .unwrap_or_else(|| panic!("({x}, {y}) outside {}x{}", surface.width(), surface.height()))
        .demultiply();
    [px.red(), px.green(), px.blue(), px.alpha()]
}

/// Decode PNG bytes and read one pixel, for tests that only hold bytes.
pub fn png_pixel(bytes: &[u8], x: u32, y: u32) -> [u8; 4] {
    let img = image::load_from_memory_with_format(bytes, ImageFormat::Png)
        .unwrap()
        .to_rgba8();
    img.get_pixel(x, y).0
}
