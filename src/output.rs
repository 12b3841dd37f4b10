//! CLI output formatting for every command.
//!
//! # Card-First Display
//!
//! The primary line for every card is where it landed. The title layout, the
//! logo layer, and the PNG digest follow as indented context lines, so the
//! output doubles as a record of exactly what was drawn.
//!
//! # Output Format
//!
//! ## Render
//!
//! ```text
//! Saved how-to-structure-campaign-objects.png → out/how-to-structure-campaign-objects.png
//!     Size: 1200x630
//!     Title: 3 lines (truncated)
//!         001 How to Structure Campaign Objects in
//!         002 Salesforce to Avoid Downstream Attribution
//!         003 Failure and Reporting Drift Across...
//!     Logo: drawn
//!     SHA-256: 5f1c…
//!     Prompt: A moody isometric diagram of a CRM pipeline
//! ```
//!
//! ## Layout
//!
//! ```text
//! Layout (2 lines)
//!     001 Pipeline stages drift between CRM and
//!     002 warehouse
//!     File: pipeline-stages-drift-between-crm-and-warehouse.png
//! ```
//!
//! ## Batch
//!
//! ```text
//! Rendering 3 titles
//! 001 → out/first.png
//! 002 failed: Text backend error: Font unavailable: ...
//! 003 → out/third.png
//!
//! Rendered 2 of 3 cards
//! ```
//!
//! ## Check
//!
//! ```text
//! Brand
//!     Config: ./brand.toml
//!     Name: The MOPerator
//!     Domain: the-moperator.com
//! Fonts
//!     Regular: Space Grotesk Regular
//!     Bold: Space Grotesk Bold
//! Logo
//!     not configured
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure: no I/O, no side effects.

use crate::export::{BatchEntry, BatchEvent};
use crate::types::{LineLayout, LogoStatus, RenderedImage};
use std::path::{Path, PathBuf};

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural_lines(n: usize) -> &'static str {
    if n == 1 { "line" } else { "lines" }
}

fn logo_label(status: LogoStatus) -> &'static str {
    match status {
        LogoStatus::NotConfigured => "not configured",
        LogoStatus::Skipped => "skipped (unavailable)",
        LogoStatus::Drawn => "drawn",
    }
}

/// Numbered title lines at `depth`.
fn layout_lines(layout: &LineLayout, depth: usize) -> Vec<String> {
    layout
        .lines
        .iter()
        .enumerate()
        .map(|(i, line)| format!("{}{} {}", indent(depth), format_index(i + 1), line))
        .collect()
}

// ============================================================================
// Render
// ============================================================================

/// Format a saved card with its layout, logo status, digest and prompt.
pub fn format_render_output(
    path: &Path,
    image: &RenderedImage,
    prompt: Option<&str>,
) -> Vec<String> {
    let mut lines = vec![format!("Saved {} → {}", image.file_name, path.display())];
    lines.push(format!("{}Size: {}x{}", indent(1), image.width, image.height));
    lines.push(format!(
        "{}Title: {} {}{}",
        indent(1),
        image.layout.len(),
        plural_lines(image.layout.len()),
        if image.layout.truncated { " (truncated)" } else { "" }
    ));
    lines.extend(layout_lines(&image.layout, 2));
    lines.push(format!("{}Logo: {}", indent(1), logo_label(image.logo)));
    lines.push(format!("{}SHA-256: {}", indent(1), image.digest()));
    if let Some(prompt) = prompt.map(str::trim).filter(|p| !p.is_empty()) {
        lines.push(format!("{}Prompt: {}", indent(1), prompt));
    }
    lines
}

pub fn print_render_output(path: &Path, image: &RenderedImage, prompt: Option<&str>) {
    for line in format_render_output(path, image, prompt) {
        println!("{}", line);
    }
}

/// Format the notice for an export dropped because another was in flight.
pub fn format_ignored_output(title: &str) -> Vec<String> {
    vec![format!("Ignored export of \"{title}\": another export is in flight")]
}

// ============================================================================
// Layout preview
// ============================================================================

pub fn format_layout_output(layout: &LineLayout, file_name: &str) -> Vec<String> {
    let mut lines = vec![format!(
        "Layout ({} {}{})",
        layout.len(),
        plural_lines(layout.len()),
        if layout.truncated { ", truncated" } else { "" }
    )];
    lines.extend(layout_lines(layout, 1));
    lines.push(format!("{}File: {}", indent(1), file_name));
    lines
}

pub fn print_layout_output(layout: &LineLayout, file_name: &str) {
    for line in format_layout_output(layout, file_name) {
        println!("{}", line);
    }
}

// ============================================================================
// Batch
// ============================================================================

/// Format one progress event from a batch export.
pub fn format_batch_event(event: &BatchEvent) -> Vec<String> {
    match event {
        BatchEvent::Started { total } => vec![format!(
            "Rendering {} {}",
            total,
            if *total == 1 { "title" } else { "titles" }
        )],
        BatchEvent::Saved { index, path, .. } => {
            vec![format!("{} → {}", format_index(index + 1), path.display())]
        }
        BatchEvent::Failed { index, error, .. } => {
            vec![format!("{} failed: {}", format_index(index + 1), error)]
        }
    }
}

pub fn format_batch_summary(entries: &[BatchEntry]) -> Vec<String> {
    let saved = entries.iter().filter(|e| e.result.is_ok()).count();
    vec![
        String::new(),
        format!("Rendered {} of {} cards", saved, entries.len()),
    ]
}

pub fn print_batch_summary(entries: &[BatchEntry]) {
    for line in format_batch_summary(entries) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// What `check` found, gathered by the binary.
#[derive(Debug, Clone)]
pub struct CheckReport {
    /// The brand file, or `None` when defaults were used.
    pub config_path: Option<PathBuf>,
    pub name: String,
    pub domain: String,
    /// `(regular, bold)` face names, or the resolution error.
    pub fonts: Result<(String, String), String>,
    pub logo_path: Option<PathBuf>,
    pub logo_status: LogoStatus,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.fonts.is_ok() && self.logo_status != LogoStatus::Skipped
    }
}

pub fn format_check_output(report: &CheckReport) -> Vec<String> {
    let mut lines = vec!["Brand".to_string()];
    match &report.config_path {
        Some(path) => lines.push(format!("{}Config: {}", indent(1), path.display())),
        None => lines.push(format!("{}Config: (stock defaults)", indent(1))),
    }
    lines.push(format!("{}Name: {}", indent(1), report.name));
    lines.push(format!("{}Domain: {}", indent(1), report.domain));

    lines.push("Fonts".to_string());
    match &report.fonts {
        Ok((regular, bold)) => {
            lines.push(format!("{}Regular: {}", indent(1), regular));
            lines.push(format!("{}Bold: {}", indent(1), bold));
        }
        Err(e) => lines.push(format!("{}error: {}", indent(1), e)),
    }

    lines.push("Logo".to_string());
    match (&report.logo_path, report.logo_status) {
        (Some(path), LogoStatus::Drawn) => {
            lines.push(format!("{}{} (ok)", indent(1), path.display()))
        }
        (Some(path), _) => lines.push(format!("{}{} (unavailable)", indent(1), path.display())),
        (None, _) => lines.push(format!("{}not configured", indent(1))),
    }
    lines
}

pub fn print_check_output(report: &CheckReport) {
    for line in format_check_output(report) {
        println!("{}", line);
    }
}
