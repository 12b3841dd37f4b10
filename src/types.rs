//! Values passed into and out of a render.
//!
//! A [`RenderRequest`] is built per export action and borrowed by the
//! compositor; a [`RenderedImage`] is produced exactly once per request and
//! owned by the caller until it is saved or dropped. Nothing here is cached.

use crate::config::BrandConfig;
use crate::imaging::CanvasSize;
use serde::Serialize;
use sha2::{Digest, Sha256};

/// One render: the title, the brand it is themed with, and the surface size.
///
/// `title` may be empty, arbitrarily long, or contain no whitespace at all.
#[derive(Debug, Clone, Copy)]
pub struct RenderRequest<'a> {
    pub title: &'a str,
    pub brand: &'a BrandConfig,
    pub canvas: CanvasSize,
}

impl<'a> RenderRequest<'a> {
    /// Request at the standard 1200×630 size.
    pub fn new(title: &'a str, brand: &'a BrandConfig) -> Self {
        Self {
            title,
            brand,
            canvas: CanvasSize::OG,
        }
    }
}

/// Title lines as laid out for drawing, first line first.
///
/// At most three lines; when the greedy wrap produced more, the third line
/// ends with [`ELLIPSIS`](crate::layout::ELLIPSIS) and `truncated` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LineLayout {
    pub lines: Vec<String>,
    pub truncated: bool,
}

impl LineLayout {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}

/// Whether layer 5 was drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogoStatus {
    /// The brand has no logo configured.
    NotConfigured,
    /// A logo was configured but could not be loaded in time; layer skipped.
    Skipped,
    Drawn,
}

/// A finished PNG plus the name it should be saved under.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedImage {
    #[serde(skip)]
    pub bytes: Vec<u8>,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// The title lines actually drawn (placeholder included).
    pub layout: LineLayout,
    pub logo: LogoStatus,
}

impl RenderedImage {
    /// SHA-256 of the PNG bytes, as a hex string.
    pub fn digest(&self) -> String {
        format!("{:x}", Sha256::digest(&self.bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_defaults_to_og_canvas() {
        let brand = BrandConfig::default();
        let request = RenderRequest::new("Title", &brand);
        assert_eq!(request.canvas, CanvasSize::OG);
        assert_eq!(request.title, "Title");
    }

    #[test]
    fn digest_is_stable_hex() {
        let image = RenderedImage {
            bytes: b"abc".to_vec(),
            file_name: "x.png".into(),
            width: 1,
            height: 1,
            layout: LineLayout::default(),
            logo: LogoStatus::NotConfigured,
        };
        assert_eq!(
            image.digest(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn logo_status_serializes_snake_case() {
        let json = serde_json::to_string(&LogoStatus::NotConfigured).unwrap();
        assert_eq!(json, "\"not_configured\"");
    }
}
