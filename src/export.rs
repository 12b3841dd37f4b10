//! Saving rendered cards.
//!
//! Rendering never touches the disk; this module is the only writer. A card
//! is written to a hidden temp file in the target directory and renamed into
//! place, so an abandoned or failed export never leaves a file named like a
//! finished image.
//!
//! ## Interactive exports
//!
//! [`Exporter`] backs a single "export" action. While one export is in flight
//! a second one is ignored and reported as [`ExportOutcome::Ignored`]; it is
//! never queued. The in-flight flag is released on drop, so cancelling an
//! export future releases it too.
//!
//! ## Batch exports
//!
//! [`export_batch`] renders many titles in parallel with
//! [rayon](https://docs.rs/rayon), sharing one typeface, one brand and one
//! logo asset. File names are de-duplicated up front so workers never race
//! for the same path.

use crate::compose::{load_and_render, Compositor, RenderError};
use crate::config::BrandConfig;
use crate::imaging::Typeface;
use crate::logo::LogoAsset;
use crate::naming::{dedupe_file_names, file_name_for};
use crate::types::{RenderRequest, RenderedImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

/// Write `image` into `dir` under its file name, atomically.
pub fn save(image: &RenderedImage, dir: &Path) -> Result<PathBuf, ExportError> {
    save_as(image, dir, &image.file_name)
}

fn save_as(image: &RenderedImage, dir: &Path, file_name: &str) -> Result<PathBuf, ExportError> {
    std::fs::create_dir_all(dir)?;
    let target = dir.join(file_name);
    let partial = dir.join(format!(".{file_name}.partial"));
    if let Err(e) = std::fs::write(&partial, &image.bytes) {
        let _ = std::fs::remove_file(&partial);
        return Err(e.into());
    }
    std::fs::rename(&partial, &target)?;
    log::info!("saved {} ({} bytes)", target.display(), image.bytes.len());
    Ok(target)
}

/// Result of an interactive export.
#[derive(Debug)]
pub enum ExportOutcome {
    Saved { path: PathBuf, image: RenderedImage },
    /// Another export was already in flight.
    Ignored,
}

/// One export action at a time into a fixed directory.
#[derive(Debug)]
pub struct Exporter {
    out_dir: PathBuf,
    in_flight: AtomicBool,
}

/// Holds the in-flight flag; clears it on drop.
#[derive(Debug)]
pub struct InFlight<'a> {
    flag: &'a AtomicBool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

impl Exporter {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            in_flight: AtomicBool::new(false),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Claim the in-flight flag, or `None` if an export is running.
    pub fn try_begin(&self) -> Option<InFlight<'_>> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| InFlight {
                flag: &self.in_flight,
            })
    }

    /// Load the logo, render, and save. Ignored while another export runs.
    pub async fn export<F: Typeface + ?Sized>(
        &self,
        request: &RenderRequest<'_>,
        face: &F,
    ) -> Result<ExportOutcome, ExportError> {
        let Some(_guard) = self.try_begin() else {
            log::warn!(
                "export of '{}' ignored: another export is in flight",
                request.title
            );
            return Ok(ExportOutcome::Ignored);
        };
        let image = load_and_render(request, face).await?;
        let path = save(&image, &self.out_dir)?;
        Ok(ExportOutcome::Saved { path, image })
    }
}

// =============================================================================
// Batch
// =============================================================================

/// Progress events sent during a batch export.
#[derive(Debug, Clone)]
pub enum BatchEvent {
    Started { total: usize },
    Saved { index: usize, path: PathBuf, digest: String },
    Failed { index: usize, title: String, error: String },
}

/// Per-title result of a batch, in input order.
#[derive(Debug)]
pub struct BatchEntry {
    pub title: String,
    pub result: Result<(PathBuf, RenderedImage), ExportError>,
}

/// Non-empty, trimmed lines of a titles file.
pub fn read_titles(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Render and save every title in parallel. One failing title does not stop
/// the others.
pub fn export_batch<F: Typeface + ?Sized>(
    titles: &[String],
    brand: &BrandConfig,
    face: &F,
    logo: &LogoAsset,
    out_dir: &Path,
    progress: Option<Sender<BatchEvent>>,
) -> Vec<BatchEntry> {
    let names = dedupe_file_names(
        &titles
            .iter()
            .map(|t| file_name_for(t))
            .collect::<Vec<_>>(),
    );
    if let Some(tx) = &progress {
        tx.send(BatchEvent::Started {
            total: titles.len(),
        })
        .ok();
    }

    let compositor = Compositor::new(face);
    titles
        .par_iter()
        .zip(names.par_iter())
        .enumerate()
        .map_with(progress, |progress, (index, (title, name))| {
            let request = RenderRequest::new(title, brand);
            let result = compositor
                .render(&request, logo)
                .map_err(ExportError::from)
                .and_then(|image| save_as(&image, out_dir, name).map(|path| (path, image)));

            if let Some(tx) = progress {
                let event = match &result {
                    Ok((path, image)) => BatchEvent::Saved {
                        index,
                        path: path.clone(),
                        digest: image.digest(),
                    },
                    Err(e) => BatchEvent::Failed {
                        index,
                        title: title.clone(),
                        error: e.to_string(),
                    },
                };
                tx.send(event).ok();
            }
            BatchEntry {
                title: title.clone(),
                result: result.map(|(path, mut image)| {
                    image.file_name = name.clone();
                    (path, image)
                }),
            }
        })
        .collect()
}
