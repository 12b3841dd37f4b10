//! Brand configuration module.
//!
//! Handles loading, validating, and merging `brand.toml`. The brand is the
//! static theme every image is rendered with: colors, display name, domain,
//! optional logo, and fonts. It is loaded once and passed by reference into
//! every render; nothing in the render path mutates it.
//!
//! ## Config File Location
//!
//! `brand.toml` lives in the config directory (`--config`, default `.`).
//! Relative paths inside it (logo, font files) resolve against that directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! name = "The MOPerator"        # Badge text (drawn uppercase)
//! domain = "the-moperator.com"  # Bottom line under the title
//! # logo = "assets/logo.png"    # Drawn centered at 40% opacity
//!
//! [colors]
//! background = "#0c0c0f"
//! background_gradient_end = "#1a1a22"
//! primary = "#f59e0b"
//! secondary = "#fbbf24"
//! text = "#e8e4dd"
//! text_muted = "#6b7280"
//!
//! [fonts]
//! family = "Space Grotesk"
//!
//! [render]
//! placeholder = "Your Post Title"
//! logo_timeout_ms = 3000
//!
//! [processing]
//! max_processes = 4             # Batch workers (omit for auto = CPU cores)
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [colors]
//! primary = "#22d3ee"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::color::parse_color;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up inside the config directory.
pub const CONFIG_FILE: &str = "brand.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Brand configuration loaded from `brand.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandConfig {
    /// Display name shown in the badge.
    pub name: String,
    /// Domain shown under the title.
    pub domain: String,
    /// Optional logo image, relative to the config directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<PathBuf>,
    /// Theme colors as hex strings.
    pub colors: BrandColors,
    /// Font family and optional explicit font files.
    pub fonts: FontConfig,
    /// Caller policies for the render operation.
    pub render: RenderConfig,
    /// Batch processing settings.
    pub processing: ProcessingConfig,
}

impl Default for BrandConfig {
    fn default() -> Self {
        Self {
            name: "The MOPerator".to_string(),
            domain: "the-moperator.com".to_string(),
            logo: None,
            colors: BrandColors::default(),
            fonts: FontConfig::default(),
            render: RenderConfig::default(),
            processing: ProcessingConfig::default(),
        }
    }
}

impl BrandConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Validation("name must not be empty".into()));
        }
        if self.domain.trim().is_empty() {
            return Err(ConfigError::Validation("domain must not be empty".into()));
        }
        if self.render.logo_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "render.logo_timeout_ms must be greater than 0".into(),
            ));
        }
        for (key, value) in self.colors.entries() {
            parse_color(value)
                .map_err(|e| ConfigError::Validation(format!("colors.{key}: {e}")))?;
        }
        Ok(())
    }

    /// Rewrite relative logo and font paths against `base`.
    ///
    /// Absolute paths are left alone.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let join = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };
        self.logo = self.logo.map(join);
        self.fonts.regular = self.fonts.regular.map(join);
        self.fonts.bold = self.fonts.bold.map(join);
        self
    }
}

/// Theme colors. Every field must parse as a hex color.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrandColors {
    /// Gradient start (top-left).
    pub background: String,
    /// Gradient end (bottom-right).
    pub background_gradient_end: String,
    /// Badge, grid, top-left ring, top-right glow.
    pub primary: String,
    /// Bottom-right ring, bottom-left glow.
    pub secondary: String,
    /// Title text.
    pub text: String,
    /// Domain text.
    pub text_muted: String,
}

impl BrandColors {
    /// `(key, value)` pairs in declaration order, for validation messages.
    pub fn entries(&self) -> [(&'static str, &str); 6] {
        [
            ("background", &self.background),
            ("background_gradient_end", &self.background_gradient_end),
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("text", &self.text),
            ("text_muted", &self.text_muted),
        ]
    }
}

impl Default for BrandColors {
    fn default() -> Self {
        Self {
            background: "#0c0c0f".to_string(),
            background_gradient_end: "#1a1a22".to_string(),
            primary: "#f59e0b".to_string(),
            secondary: "#fbbf24".to_string(),
            text: "#e8e4dd".to_string(),
            text_muted: "#6b7280".to_string(),
        }
    }
}

/// Font selection.
///
/// Explicit files win; otherwise `family` is looked up among system fonts,
/// falling back to common sans-serif families and then to any installed face.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FontConfig {
    pub family: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regular: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bold: Option<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Space Grotesk".to_string(),
            regular: None,
            bold: None,
        }
    }
}

/// Caller policies around the render operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Text drawn when the title is empty or whitespace-only.
    pub placeholder: String,
    /// Upper bound on the logo load before falling back to no logo.
    pub logo_timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            placeholder: "Your Post Title".to_string(),
            logo_timeout_ms: 3000,
        }
    }
}

/// Parallel processing settings for batch renders.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Maximum number of parallel render workers.
    /// When absent, defaults to the number of CPU cores.
    /// Values larger than the core count are clamped down.
    pub max_processes: Option<usize>,
}

/// Resolve the effective thread count from config.
///
/// - `None` → use all available cores
/// - `Some(n)` → use `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(config: &ProcessingConfig) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    config
        .max_processes
        .map(|n| n.clamp(1, cores))
        .unwrap_or(cores)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(BrandConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `brand.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<BrandConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: BrandConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the brand from `brand.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// validates, and resolves relative paths against `dir`.
pub fn load_config(dir: &Path) -> Result<BrandConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    Ok(resolve_config(base, overlay)?.resolve_paths(dir))
}

/// Returns a fully-commented stock `brand.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# og-card brand configuration
# ============================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.
# Relative paths resolve against the directory holding this file.

# Badge text, drawn uppercase and letter-spaced in the primary color.
name = "The MOPerator"

# Shown in the muted color along the bottom margin.
domain = "the-moperator.com"

# Optional logo, drawn 320x320 centered at 40% opacity.
# A missing or undecodable logo is skipped, never an error.
# logo = "assets/logo.png"

# ---------------------------------------------------------------------------
# Colors (#rgb, #rgba, #rrggbb or #rrggbbaa)
# ---------------------------------------------------------------------------
[colors]
background = "#0c0c0f"               # Gradient start, top-left
background_gradient_end = "#1a1a22"  # Gradient end, bottom-right
primary = "#f59e0b"                  # Badge, grid, top-left ring, top-right glow
secondary = "#fbbf24"                # Bottom-right ring, bottom-left glow
text = "#e8e4dd"                     # Title
text_muted = "#6b7280"               # Domain

# ---------------------------------------------------------------------------
# Fonts
# ---------------------------------------------------------------------------
[fonts]
# System family to look up; falls back to common sans-serif families
# (DejaVu Sans, Liberation Sans, Noto Sans, Arial), then any installed font.
family = "Space Grotesk"
# Explicit font files take priority over the system lookup.
# regular = "fonts/SpaceGrotesk-Regular.ttf"
# bold = "fonts/SpaceGrotesk-Bold.ttf"

# ---------------------------------------------------------------------------
# Render policies
# ---------------------------------------------------------------------------
[render]
# Drawn in place of an empty or whitespace-only title.
placeholder = "Your Post Title"
# How long to wait for the logo before rendering without it.
logo_timeout_ms = 3000

# ---------------------------------------------------------------------------
# Processing
# ---------------------------------------------------------------------------
[processing]
# Maximum parallel workers for `batch`.
# Omit or comment out to auto-detect (= number of CPU cores).
# max_processes = 4
"##
}
