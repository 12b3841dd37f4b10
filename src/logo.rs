//! Logo loading, the one suspension point of a render.
//!
//! The logo is read and decoded asynchronously, bounded by the brand's
//! `render.logo_timeout_ms`. A missing file, corrupt bytes or a timeout all
//! produce a [`LogoAsset`], never an error: the compositor skips layer 5 for
//! anything but [`LogoAsset::Ready`].
//!
//! Tests hand the compositor a pre-resolved in-memory asset; a batch loads
//! the logo once and shares it.

use crate::config::BrandConfig;
use crate::imaging::Geometry;
use crate::types::LogoStatus;
use image::imageops::FilterType;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tiny_skia::{IntSize, Pixmap};

/// Outcome of a logo load.
#[derive(Debug, Clone)]
pub enum LogoAsset {
    /// The brand has no logo.
    None,
    /// A logo was configured but could not be used.
    Unavailable { reason: String },
    /// Decoded, resampled to the logo square, premultiplied.
    Ready(Pixmap),
}

impl LogoAsset {
    /// Decode in-memory image bytes into a ready `edge`×`edge` asset.
    pub fn from_bytes(bytes: &[u8], edge: u32) -> Self {
        match decode_logo(bytes, edge) {
            Ok(pixmap) => LogoAsset::Ready(pixmap),
            Err(reason) => LogoAsset::Unavailable { reason },
        }
    }

    pub fn pixmap(&self) -> Option<&Pixmap> {
        match self {
            LogoAsset::Ready(pixmap) => Some(pixmap),
            _ => None,
        }
    }

    pub fn status(&self) -> LogoStatus {
        match self {
            LogoAsset::None => LogoStatus::NotConfigured,
            LogoAsset::Unavailable { .. } => LogoStatus::Skipped,
            LogoAsset::Ready(_) => LogoStatus::Drawn,
        }
    }
}

/// Load the brand logo from disk with a bounded wait.
pub async fn load_logo(path: Option<&Path>, edge: u32, timeout: Duration) -> LogoAsset {
    let Some(path) = path else {
        return LogoAsset::None;
    };
    let owned: PathBuf = path.to_path_buf();
    let asset = resolve_logo(tokio::fs::read(owned), edge, timeout).await;
    if let LogoAsset::Unavailable { reason } = &asset {
        log::warn!(
            "logo {} unavailable, rendering without it: {reason}",
            path.display()
        );
    }
    asset
}

/// Load the logo configured on `brand` at the card's logo size.
pub async fn load_brand_logo(brand: &BrandConfig) -> LogoAsset {
    load_logo(
        brand.logo.as_deref(),
        Geometry::default().logo_size,
        Duration::from_millis(brand.render.logo_timeout_ms),
    )
    .await
}

/// Await `fetch` for at most `timeout`, then decode off the async thread.
pub async fn resolve_logo<F>(fetch: F, edge: u32, timeout: Duration) -> LogoAsset
where
    F: Future<Output = std::io::Result<Vec<u8>>>,
{
    let bytes = match tokio::time::timeout(timeout, fetch).await {
        Ok(Ok(bytes)) => bytes,
        Ok(Err(e)) => {
            return LogoAsset::Unavailable {
                reason: e.to_string(),
            };
        }
        Err(_) => {
            return LogoAsset::Unavailable {
                reason: format!("load exceeded {} ms", timeout.as_millis()),
            };
        }
    };

    match tokio::task::spawn_blocking(move || LogoAsset::from_bytes(&bytes, edge)).await {
        Ok(asset) => asset,
        Err(e) => LogoAsset::Unavailable {
            reason: format!("decode task failed: {e}"),
        },
    }
}

/// Decode, resample to an `edge` square with Lanczos3, and premultiply.
fn decode_logo(bytes: &[u8], edge: u32) -> Result<Pixmap, String> {
    let decoded = image::load_from_memory(bytes).map_err(|e| format!("decode failed: {e}"))?;
    let resized = decoded.resize_exact(edge, edge, FilterType::Lanczos3);
    let mut rgba = resized.to_rgba8().into_raw();
    premultiply_rgba_in_place(&mut rgba);
    let size = IntSize::from_wh(edge, edge).ok_or_else(|| format!("invalid logo edge {edge}"))?;
    Pixmap::from_vec(rgba, size).ok_or_else(|| "logo buffer size mismatch".to_string())
}

fn premultiply_rgba_in_place(bytes: &mut [u8]) {
    for pixel in bytes.chunks_exact_mut(4) {
        let alpha = pixel[3] as u16;
        pixel[0] = ((pixel[0] as u16 * alpha + 127) / 255) as u8;
        pixel[1] = ((pixel[1] as u16 * alpha + 127) / 255) as u8;
        pixel[2] = ((pixel[2] as u16 * alpha + 127) / 255) as u8;
    }
}
