//! Production typeface: fontdue rasterization, fontdb system lookup.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Find a system face by family + weight | `fontdb::Database::query` |
//! | Face name for `check` | `fontdb::FaceInfo::families` |
//! | Parse a face | `fontdue::Font::from_bytes` |
//! | Advance + kerning | `fontdue::Font::metrics`, `horizontal_kern` |
//! | Glyph coverage | `fontdue::Font::rasterize` |
//! | Composite onto the card | `tiny_skia::Pixmap::draw_pixmap` |
//!
//! Measuring and drawing walk the same pen advance (advance width, kerning,
//! letter spacing), so a line the layout engine accepted is exactly as wide
//! when drawn.

use super::backend::{BackendError, TextMeasure, Typeface};
use super::params::{FontSpec, FontWeight};
use crate::config::FontConfig;
use fontdue::{Font, FontSettings};
use std::path::Path;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

/// Families tried after the configured one, before settling for any face.
const FALLBACK_FAMILIES: [&str; 5] = [
    "DejaVu Sans",
    "Liberation Sans",
    "Noto Sans",
    "Arial",
    "Helvetica",
];

/// Regular + bold faces used for every text run on the card.
pub struct FontdueFace {
    regular: Font,
    bold: Font,
    names: (String, String),
}

/// A parsed face plus the name `check` reports for it.
struct NamedFont {
    font: Font,
    name: String,
}

impl FontdueFace {
    /// Build from raw font bytes. `bold` falls back to `regular` when absent.
    pub fn from_bytes(regular: &[u8], bold: Option<&[u8]>) -> Result<Self, BackendError> {
        let regular_font = parse_font(regular, 0)?;
        let bold_font = match bold {
            Some(bytes) => parse_font(bytes, 0)?,
            None => parse_font(regular, 0)?,
        };
        Ok(Self {
            regular: regular_font,
            bold: bold_font,
            names: ("embedded".to_string(), "embedded".to_string()),
        })
    }

    /// Resolve fonts from config: explicit files first, then the system
    /// family, then a list of common sans-serif families, then any installed
    /// face.
    pub fn from_config(config: &FontConfig) -> Result<Self, BackendError> {
        let mut db = None;
        let mut system = |weight: fontdb::Weight| -> Result<NamedFont, BackendError> {
            let db = db.get_or_insert_with(|| {
                let mut db = fontdb::Database::new();
                db.load_system_fonts();
                db
            });
            load_system_font(db, &config.family, weight)
        };

        let regular = match &config.regular {
            Some(path) => load_font_file(path)?,
            None => system(fontdb::Weight::NORMAL)?,
        };
        let bold = match &config.bold {
            Some(path) => load_font_file(path)?,
            None => system(fontdb::Weight::BOLD)?,
        };
        log::debug!("fonts resolved: regular={} bold={}", regular.name, bold.name);
        Ok(Self {
            regular: regular.font,
            bold: bold.font,
            names: (regular.name, bold.name),
        })
    }

    fn font(&self, weight: FontWeight) -> &Font {
        match weight {
            FontWeight::Regular => &self.regular,
            FontWeight::Bold => &self.bold,
        }
    }

    /// Human-readable face names, for `check` output.
    pub fn describe(&self) -> (String, String) {
        self.names.clone()
    }
}

fn parse_font(bytes: &[u8], collection_index: u32) -> Result<Font, BackendError> {
    let settings = FontSettings {
        collection_index,
        ..FontSettings::default()
    };
    Font::from_bytes(bytes, settings).map_err(|e| BackendError::Font(e.to_string()))
}

fn load_font_file(path: &Path) -> Result<NamedFont, BackendError> {
    let bytes = std::fs::read(path)?;
    let font = parse_font(&bytes, 0)
        .map_err(|e| BackendError::Font(format!("{}: {e}", path.display())))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(NamedFont { font, name })
}

/// Pick a face id: the configured family, then the fallback families, then
/// whichever installed face is closest in weight.
fn resolve_system_face(
    db: &fontdb::Database,
    family: &str,
    weight: fontdb::Weight,
) -> Option<fontdb::ID> {
    let mut families = vec![fontdb::Family::Name(family)];
    families.extend(FALLBACK_FAMILIES.iter().map(|&f| fontdb::Family::Name(f)));
    families.push(fontdb::Family::SansSerif);

    db.query(&fontdb::Query {
        families: &families,
        weight,
        ..fontdb::Query::default()
    })
    .or_else(|| {
        let any = db
            .faces()
            .min_by_key(|face| (i32::from(face.weight.0) - i32::from(weight.0)).abs())?;
        log::warn!(
            "no font for '{family}' or common sans-serif families, using {}",
            face_name(any)
        );
        Some(any.id)
    })
}

fn face_name(face: &fontdb::FaceInfo) -> String {
    face.families
        .first()
        .map(|(name, _)| name.clone())
        .unwrap_or_else(|| face.post_script_name.clone())
}

fn load_system_font(
    db: &fontdb::Database,
    family: &str,
    weight: fontdb::Weight,
) -> Result<NamedFont, BackendError> {
    let id = resolve_system_face(db, family, weight).ok_or_else(|| {
        BackendError::Font(format!(
            "no system font for '{family}' (weight {}): no fonts installed",
            weight.0
        ))
    })?;
    let name = db
        .face(id)
        .map(face_name)
        .unwrap_or_else(|| family.to_string());
    let font = db
        .with_face_data(id, |data, index| parse_font(data, index))
        .unwrap_or_else(|| Err(BackendError::Font(format!("{name}: font data unreadable"))))?;
    Ok(NamedFont { font, name })
}

/// Walk a string's pen positions: `(char, x offset)` pairs plus total advance.
fn pen_positions(font: &Font, text: &str, spec: &FontSpec) -> (Vec<(char, f32)>, f32) {
    let mut positions = Vec::with_capacity(text.len());
    let mut pen = 0.0;
    let mut prev: Option<char> = None;
    for c in text.chars() {
        if let Some(p) = prev {
            pen += font.horizontal_kern(p, c, spec.size).unwrap_or(0.0);
        }
        positions.push((c, pen));
        pen += font.metrics(c, spec.size).advance_width + spec.letter_spacing;
        prev = Some(c);
    }
    (positions, pen)
}

impl TextMeasure for FontdueFace {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        pen_positions(self.font(font.weight), text, font).1
    }
}

impl Typeface for FontdueFace {
    fn draw_text(
        &self,
        surface: &mut Pixmap,
        text: &str,
        font: &FontSpec,
        x: f32,
        baseline: f32,
        color: Color,
    ) -> Result<(), BackendError> {
        let face = self.font(font.weight);
        let (positions, _) = pen_positions(face, text, font);
        let paint = PixmapPaint::default();

        for (c, offset) in positions {
            if c.is_whitespace() {
                continue;
            }
            let (metrics, coverage) = face.rasterize(c, font.size);
            if metrics.width == 0 || metrics.height == 0 {
                continue;
            }
            let glyph =
                coverage_to_pixmap(metrics.width as u32, metrics.height as u32, &coverage, color)?;
            // fontdue's ymin is the bitmap's bottom edge relative to the baseline, y up.
            let gx = (x + offset + metrics.xmin as f32).round();
            let gy = (baseline - metrics.ymin as f32 - metrics.height as f32).round();
            surface.draw_pixmap(
                gx as i32,
                gy as i32,
                glyph.as_ref(),
                &paint,
                Transform::identity(),
                None,
            );
        }
        Ok(())
    }
}

/// Turn an 8-bit coverage mask into a premultiplied pixmap tinted `color`.
fn coverage_to_pixmap(
    width: u32,
    height: u32,
    coverage: &[u8],
    color: Color,
) -> Result<Pixmap, BackendError> {
    let mut glyph = Pixmap::new(width, height)
        .ok_or_else(|| BackendError::Raster(format!("cannot allocate {width}x{height} glyph")))?;
    for (px, &cov) in glyph.pixels_mut().iter_mut().zip(coverage) {
        if cov == 0 {
            continue;
        }
        let mut tinted = color;
        tinted.apply_opacity(cov as f32 / 255.0);
        *px = tinted.premultiply().to_color_u8();
    }
    Ok(glyph)
}

impl std::fmt::Debug for FontdueFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (regular, bold) = self.describe();
        f.debug_struct("FontdueFace")
            .field("regular", &regular)
            .field("bold", &bold)
            .finish()
    }
}
