//! End-to-end render through the public API: brand file on disk, logo on
//! disk, render, export, read the PNG back.
//!
//! Text is drawn with a fixed-advance face defined here, so the test does not
//! depend on installed fonts.

use og_card::compose::{load_and_render, render};
use og_card::config;
use og_card::export::{save, ExportOutcome, Exporter};
use og_card::imaging::{BackendError, FontSpec, TextMeasure, Typeface};
use og_card::logo::{load_brand_logo, LogoAsset};
use og_card::types::{LogoStatus, RenderRequest};
use std::path::Path;
use tempfile::TempDir;
use tiny_skia::{Color, Paint, Pixmap, Rect, Transform};

/// Every char is a solid block `0.6 * size` wide.
struct Blocks;

impl TextMeasure for Blocks {
    fn measure(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * (font.size * 3.0 / 5.0 + font.letter_spacing)
    }
}

impl Typeface for Blocks {
    fn draw_text(
        &self,
        surface: &mut Pixmap,
        text: &str,
        font: &FontSpec,
        x: f32,
        baseline: f32,
        color: Color,
    ) -> Result<(), BackendError> {
        let advance = font.size * 3.0 / 5.0 + font.letter_spacing;
        let cap = font.size * 7.0 / 10.0;
        let mut paint = Paint::default();
        paint.set_color(color);
        paint.anti_alias = false;
        for (i, c) in text.chars().enumerate() {
            if c.is_whitespace() {
                continue;
            }
            let rect = Rect::from_xywh(x + i as f32 * advance, baseline - cap, advance * 0.8, cap)
                .ok_or_else(|| BackendError::Raster("empty block".into()))?;
            surface.fill_rect(rect, &paint, Transform::identity(), None);
        }
        Ok(())
    }
}

fn write_logo(path: &Path) {
    let img = image::RgbaImage::from_pixel(64, 64, image::Rgba([255, 255, 255, 255]));
    img.save(path).unwrap();
}

fn pixel(bytes: &[u8], x: u32, y: u32) -> [u8; 4] {
    image::load_from_memory(bytes)
        .unwrap()
        .to_rgba8()
        .get_pixel(x, y)
        .0
}

#[tokio::test]
async fn brand_file_drives_colors_and_logo() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir(tmp.path().join("assets")).unwrap();
    write_logo(&tmp.path().join("assets/logo.png"));
    std::fs::write(
        tmp.path().join("brand.toml"),
        r##"
name = "Signal Room"
domain = "signal.example"
logo = "assets/logo.png"

[colors]
primary = "#22d3ee"
"##,
    )
    .unwrap();

    let brand = config::load_config(tmp.path()).unwrap();
    let request = RenderRequest::new("Reading the pipeline backwards", &brand);
    let image = load_and_render(&request, &Blocks).await.unwrap();

    assert_eq!((image.width, image.height), (1200, 630));
    assert_eq!(image.logo, LogoStatus::Drawn);
    assert_eq!(image.file_name, "reading-the-pipeline-backwards.png");
    assert_eq!(pixel(&image.bytes, 56, 56), [0x22, 0xd3, 0xee, 255]);

    // Logo square spans x 440..760; white at 40% lifts every channel
    let no_logo = render(&request, &Blocks, &LogoAsset::None).unwrap();
    let lit = pixel(&image.bytes, 600, 220);
    let dark = pixel(&no_logo.bytes, 600, 220);
    assert!(lit[2] > dark[2] + 80, "{lit:?} vs {dark:?}");
}

#[tokio::test]
async fn missing_logo_still_exports_complete_card() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("brand.toml"), "logo = \"gone.png\"\n").unwrap();
    let brand = config::load_config(tmp.path()).unwrap();

    let logo = load_brand_logo(&brand).await;
    assert_eq!(logo.status(), LogoStatus::Skipped);

    let out = tmp.path().join("out");
    let exporter = Exporter::new(&out);
    let outcome = exporter
        .export(&RenderRequest::new("", &brand), &Blocks)
        .await
        .unwrap();
    let ExportOutcome::Saved { path, image } = outcome else {
        panic!("export was ignored");
    };
    assert_eq!(path, out.join("og-image.png"));
    assert_eq!(image.layout.lines, vec!["Your Post Title"]);
    assert_eq!(image.logo, LogoStatus::Skipped);
    assert_eq!(std::fs::read(&path).unwrap(), image.bytes);
}

#[test]
fn same_inputs_give_same_file() {
    let tmp = TempDir::new().unwrap();
    let brand = config::load_config(tmp.path()).unwrap();
    let request = RenderRequest::new("How to Structure Campaign Objects in Salesforce", &brand);

    let first = render(&request, &Blocks, &LogoAsset::None).unwrap();
    let path = save(&first, tmp.path()).unwrap();
    let second = render(&request, &Blocks, &LogoAsset::None).unwrap();

    assert_eq!(std::fs::read(path).unwrap(), second.bytes);
    assert_eq!(first.digest(), second.digest());
}

#[test]
fn invalid_brand_color_is_rejected_at_load() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("brand.toml"), "[colors]\ntext = \"white\"\n").unwrap();
    let err = config::load_config(tmp.path()).unwrap_err();
    assert!(err.to_string().contains("colors.text"), "{err}");
}
