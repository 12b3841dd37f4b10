//! The compositor: draws a card back to front and serializes it to PNG.
//!
//! ## Layers
//!
//! | # | Layer | Color |
//! |---|---|---|
//! | 1 | 135° background gradient | `background` → `background_gradient_end` |
//! | 2 | 1px grid every 48px | `primary` at alpha 0x14 |
//! | 3 | Two decorative rings | `primary` / `secondary`, very low alpha |
//! | 4 | Corner glows (top-right, bottom-left) | `primary` / `secondary` → transparent |
//! | 5 | Logo, 320px square at 40% | (image) |
//! | 6 | Badge dot + uppercase brand name | `primary` |
//! | 7 | Domain line | `text_muted` |
//! | 8 | Title, bottom-anchored, drawn last line first | `text` |
//!
//! A render is one synchronous pass with no retries. Any drawing or encoding
//! failure aborts it with a single [`RenderError`]; no partial image is ever
//! returned. The logo is the only input that may be missing: it arrives as an
//! already-resolved [`LogoAsset`] and layer 5 is skipped unless it is ready.
//!
//! [`render`] is a pure function of the request, the typeface and the logo
//! asset, so two calls with the same inputs produce identical bytes.

use crate::color::{parse_color, transparent, with_alpha, ColorError};
use crate::config::BrandColors;
use crate::imaging::calculations::{
    badge_layout, domain_baseline, glow_boxes, gradient_axis, grid_offsets, logo_origin,
    max_text_width, ring_circles, title_baselines, Area, Circle, Glow,
};
use crate::imaging::{BackendError, CanvasSize, Geometry, Opacity, Typeface};
use crate::layout::wrap_title;
use crate::logo::{load_brand_logo, LogoAsset};
use crate::naming::file_name_for;
use crate::types::{LineLayout, RenderRequest, RenderedImage};
use thiserror::Error;
use tiny_skia::{
    Color, FillRule, GradientStop, LinearGradient, Paint, PathBuilder, Pixmap, PixmapPaint, Point,
    RadialGradient, Rect, SpreadMode, Stroke, Transform,
};

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Brand color error: {0}")]
    Color(#[from] ColorError),
    #[error("Text backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("Surface error: {0}")]
    Surface(String),
    #[error("PNG encoding failed: {0}")]
    Encode(String),
}

/// Title actually drawn: the placeholder stands in for an empty or
/// whitespace-only title.
pub fn display_title<'a>(title: &'a str, placeholder: &'a str) -> &'a str {
    if title.trim().is_empty() {
        placeholder
    } else {
        title
    }
}

/// Brand colors parsed once per render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub background: Color,
    pub background_end: Color,
    pub primary: Color,
    pub secondary: Color,
    pub text: Color,
    pub text_muted: Color,
}

impl Palette {
    pub fn from_brand(colors: &BrandColors) -> Result<Self, ColorError> {
        Ok(Self {
            background: parse_color(&colors.background)?,
            background_end: parse_color(&colors.background_gradient_end)?,
            primary: parse_color(&colors.primary)?,
            secondary: parse_color(&colors.secondary)?,
            text: parse_color(&colors.text)?,
            text_muted: parse_color(&colors.text_muted)?,
        })
    }
}

/// A finished surface and the title lines drawn on it.
#[derive(Debug)]
pub struct Composition {
    pub surface: Pixmap,
    pub layout: LineLayout,
}

/// Draws cards with one typeface and a fixed geometry.
pub struct Compositor<'f, F: Typeface + ?Sized> {
    face: &'f F,
    geometry: Geometry,
}

impl<'f, F: Typeface + ?Sized> Compositor<'f, F> {
    pub fn new(face: &'f F) -> Self {
        Self {
            face,
            geometry: Geometry::default(),
        }
    }

    /// Lay out the title that would be drawn for `request`, without drawing.
    pub fn layout(&self, request: &RenderRequest) -> LineLayout {
        let g = &self.geometry;
        let title = display_title(request.title, &request.brand.render.placeholder);
        wrap_title(
            title,
            self.face,
            &g.title_font,
            max_text_width(request.canvas, g),
        )
    }

    /// Draw every layer onto a fresh surface.
    pub fn compose(
        &self,
        request: &RenderRequest,
        logo: &LogoAsset,
    ) -> Result<Composition, RenderError> {
        let palette = Palette::from_brand(&request.brand.colors)?;
        let canvas = request.canvas;
        let mut surface = Pixmap::new(canvas.width, canvas.height).ok_or_else(|| {
            RenderError::Surface(format!(
                "cannot allocate {}x{} surface",
                canvas.width, canvas.height
            ))
        })?;

        self.draw_background(&mut surface, canvas, &palette)?;
        self.draw_grid(&mut surface, canvas, &palette)?;
        self.draw_rings(&mut surface, canvas, &palette)?;
        self.draw_glows(&mut surface, canvas, &palette)?;
        self.draw_logo(&mut surface, canvas, logo);
        self.draw_badge(&mut surface, &request.brand.name, &palette)?;
        self.draw_domain(&mut surface, canvas, &request.brand.domain, &palette)?;
        let layout = self.layout(request);
        self.draw_title(&mut surface, canvas, &layout, &palette)?;

        Ok(Composition { surface, layout })
    }

    /// Compose and encode to PNG.
    pub fn render(
        &self,
        request: &RenderRequest,
        logo: &LogoAsset,
    ) -> Result<RenderedImage, RenderError> {
        let Composition { surface, layout } = self.compose(request, logo)?;
        let bytes = surface
            .encode_png()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(RenderedImage {
            bytes,
            file_name: file_name_for(request.title),
            width: surface.width(),
            height: surface.height(),
            layout,
            logo: logo.status(),
        })
    }

    // 1
    fn draw_background(
        &self,
        surface: &mut Pixmap,
        canvas: CanvasSize,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let (start, end) = gradient_axis(135.0, canvas);
        let shader = LinearGradient::new(
            Point::from_xy(start.x, start.y),
            Point::from_xy(end.x, end.y),
            vec![
                GradientStop::new(0.0, palette.background),
                GradientStop::new(1.0, palette.background_end),
            ],
            SpreadMode::Pad,
            Transform::identity(),
        )
        .ok_or_else(|| RenderError::Surface("invalid background gradient".into()))?;

        let mut paint = Paint::default();
        paint.shader = shader;
        let rect = full_rect(canvas)?;
        surface.fill_rect(rect, &paint, Transform::identity(), None);
        log::debug!("layer 1: background gradient");
        Ok(())
    }

    // 2
    fn draw_grid(
        &self,
        surface: &mut Pixmap,
        canvas: CanvasSize,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let g = &self.geometry;
        let paint = solid(with_alpha(palette.primary, g.grid_alpha.value()));
        let (w, h) = (canvas.width_f(), canvas.height_f());

        let columns = grid_offsets(canvas.width, g.grid_spacing);
        let rows = grid_offsets(canvas.height, g.grid_spacing);
        for &x in &columns {
            let line = Rect::from_xywh(x, 0.0, 1.0, h)
                .ok_or_else(|| RenderError::Surface(format!("invalid grid column at {x}")))?;
            surface.fill_rect(line, &paint, Transform::identity(), None);
        }
        for &y in &rows {
            let line = Rect::from_xywh(0.0, y, w, 1.0)
                .ok_or_else(|| RenderError::Surface(format!("invalid grid row at {y}")))?;
            surface.fill_rect(line, &paint, Transform::identity(), None);
        }
        log::debug!(
            "layer 2: grid, {} columns x {} rows",
            columns.len(),
            rows.len()
        );
        Ok(())
    }

    // 3
    fn draw_rings(
        &self,
        surface: &mut Pixmap,
        canvas: CanvasSize,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let g = &self.geometry;
        let (small, large) = ring_circles(canvas, g);
        stroke_circle(surface, small, with_alpha(palette.primary, g.ring_small_alpha.value()))?;
        stroke_circle(surface, large, with_alpha(palette.secondary, g.ring_large_alpha.value()))?;
        log::debug!("layer 3: rings");
        Ok(())
    }

    // 4
    fn draw_glows(
        &self,
        surface: &mut Pixmap,
        canvas: CanvasSize,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let g = &self.geometry;
        let (top_right, bottom_left) = glow_boxes(canvas, g);
        fill_glow(surface, &top_right, palette.primary, g.glow_primary_alpha, g.glow_fade_stop)?;
        fill_glow(
            surface,
            &bottom_left,
            palette.secondary,
            g.glow_secondary_alpha,
            g.glow_fade_stop,
        )?;
        log::debug!("layer 4: corner glows");
        Ok(())
    }

    // 5
    fn draw_logo(&self, surface: &mut Pixmap, canvas: CanvasSize, logo: &LogoAsset) {
        let Some(pixmap) = logo.pixmap() else {
            log::debug!("layer 5: skipped ({:?})", logo.status());
            return;
        };
        let g = &self.geometry;
        let origin = logo_origin(canvas, g);
        let paint = PixmapPaint {
            opacity: g.logo_opacity.value(),
            ..PixmapPaint::default()
        };
        surface.draw_pixmap(
            origin.x.round() as i32,
            origin.y.round() as i32,
            pixmap.as_ref(),
            &paint,
            Transform::identity(),
            None,
        );
        log::debug!("layer 5: logo at ({}, {})", origin.x, origin.y);
    }

    // 6
    fn draw_badge(
        &self,
        surface: &mut Pixmap,
        name: &str,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let g = &self.geometry;
        let badge = badge_layout(g);

        let glow = Glow {
            anchor: badge.dot.center,
            radius: badge.glow_radius,
            bounds: square_around(badge.dot.center.x, badge.dot.center.y, badge.glow_radius),
        };
        fill_glow(surface, &glow, palette.primary, g.badge_glow_alpha, 1.0)?;
        fill_circle(surface, badge.dot, palette.primary)?;

        let label = name.to_uppercase();
        self.face.draw_text(
            surface,
            &label,
            &g.badge_font,
            badge.text_x,
            badge.text_baseline,
            palette.primary,
        )?;
        log::debug!("layer 6: badge '{label}'");
        Ok(())
    }

    // 7
    fn draw_domain(
        &self,
        surface: &mut Pixmap,
        canvas: CanvasSize,
        domain: &str,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let g = &self.geometry;
        self.face.draw_text(
            surface,
            domain,
            &g.domain_font,
            g.padding,
            domain_baseline(canvas, g),
            palette.text_muted,
        )?;
        log::debug!("layer 7: domain '{domain}'");
        Ok(())
    }

    // 8
    fn draw_title(
        &self,
        surface: &mut Pixmap,
        canvas: CanvasSize,
        layout: &LineLayout,
        palette: &Palette,
    ) -> Result<(), RenderError> {
        let g = &self.geometry;
        let baselines = title_baselines(layout.len(), canvas, g);
        for (line, baseline) in layout.lines.iter().zip(&baselines).rev() {
            self.face
                .draw_text(surface, line, &g.title_font, g.padding, *baseline, palette.text)?;
        }
        log::debug!(
            "layer 8: title, {} line(s){}",
            layout.len(),
            if layout.truncated { ", truncated" } else { "" }
        );
        Ok(())
    }
}

/// Render one card with an already-resolved logo.
pub fn render<F: Typeface + ?Sized>(
    request: &RenderRequest,
    face: &F,
    logo: &LogoAsset,
) -> Result<RenderedImage, RenderError> {
    Compositor::new(face).render(request, logo)
}

/// Load the brand's logo (bounded by its timeout), then render.
pub async fn load_and_render<F: Typeface + ?Sized>(
    request: &RenderRequest<'_>,
    face: &F,
) -> Result<RenderedImage, RenderError> {
    let logo = load_brand_logo(request.brand).await;
    render(request, face, &logo)
}

fn full_rect(canvas: CanvasSize) -> Result<Rect, RenderError> {
    Rect::from_xywh(0.0, 0.0, canvas.width_f(), canvas.height_f())
        .ok_or_else(|| RenderError::Surface("empty canvas".into()))
}

fn square_around(cx: f32, cy: f32, radius: f32) -> Area {
    Area {
        x: cx - radius,
        y: cy - radius,
        width: radius * 2.0,
        height: radius * 2.0,
    }
}

fn solid(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(color);
    paint
}

fn stroke_circle(surface: &mut Pixmap, circle: Circle, color: Color) -> Result<(), RenderError> {
    let path = PathBuilder::from_circle(circle.center.x, circle.center.y, circle.radius)
        .ok_or_else(|| RenderError::Surface(format!("invalid ring radius {}", circle.radius)))?;
    let stroke = Stroke {
        width: 1.0,
        ..Stroke::default()
    };
    surface.stroke_path(&path, &solid(color), &stroke, Transform::identity(), None);
    Ok(())
}

fn fill_circle(surface: &mut Pixmap, circle: Circle, color: Color) -> Result<(), RenderError> {
    let path = PathBuilder::from_circle(circle.center.x, circle.center.y, circle.radius)
        .ok_or_else(|| RenderError::Surface(format!("invalid dot radius {}", circle.radius)))?;
    surface.fill_path(
        &path,
        &solid(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
    Ok(())
}

/// Radial fade from `color` at `alpha` to transparent at `fade_stop` of the
/// radius, clipped to the glow's bounds.
fn fill_glow(
    surface: &mut Pixmap,
    glow: &Glow,
    color: Color,
    alpha: Opacity,
    fade_stop: f32,
) -> Result<(), RenderError> {
    let center = Point::from_xy(glow.anchor.x, glow.anchor.y);
    let shader = RadialGradient::new(
        center,
        center,
        glow.radius,
        vec![
            GradientStop::new(0.0, with_alpha(color, alpha.value())),
            GradientStop::new(fade_stop, transparent(color)),
        ],
        SpreadMode::Pad,
        Transform::identity(),
    )
    .ok_or_else(|| RenderError::Surface(format!("invalid glow radius {}", glow.radius)))?;

    let mut paint = Paint::default();
    paint.shader = shader;
    let b = glow.bounds;
    let rect = Rect::from_xywh(b.x, b.y, b.width, b.height)
        .ok_or_else(|| RenderError::Surface("empty glow bounds".into()))?;
    surface.fill_rect(rect, &paint, Transform::identity(), None);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BrandConfig;
    use crate::imaging::backend::tests::{BlockFace, FailingFace, RecordingFace};
    use crate::imaging::FontWeight;
    use crate::layout::ELLIPSIS;
    use crate::test_helpers::{brand_without_logo, rgba_at, solid_logo};
    use crate::types::LogoStatus;

    const PRIMARY: [u8; 4] = [245, 158, 11, 255];
    const SALESFORCE: &str = "How to Structure Campaign Objects in Salesforce to Avoid \
        Downstream Attribution Failure and Reporting Drift Across Every Connected Revenue System";

    fn compose_with(title: &str, brand: &BrandConfig, logo: &LogoAsset) -> Composition {
        let request = RenderRequest::new(title, brand);
        Compositor::new(&BlockFace).compose(&request, logo).unwrap()
    }

    fn compose_adjusted(brand: &BrandConfig, adjust: impl FnOnce(&mut Geometry)) -> Composition {
        let mut compositor = Compositor::new(&BlockFace);
        adjust(&mut compositor.geometry);
        let request = RenderRequest::new("Title", brand);
        compositor.compose(&request, &LogoAsset::None).unwrap()
    }

    // =========================================================================
    // Caller policy
    // =========================================================================

    #[test]
    fn display_title_substitutes_placeholder() {
        assert_eq!(display_title("", "Your Post Title"), "Your Post Title");
        assert_eq!(display_title(" \t ", "Your Post Title"), "Your Post Title");
        assert_eq!(display_title("Real", "Your Post Title"), "Real");
    }

    #[test]
    fn palette_rejects_bad_color() {
        let mut brand = brand_without_logo();
        brand.colors.primary = "orange".into();
        let request = RenderRequest::new("Title", &brand);
        let result = Compositor::new(&BlockFace).render(&request, &LogoAsset::None);
        assert!(matches!(result, Err(RenderError::Color(_))));
    }

    // =========================================================================
    // Layers
    // =========================================================================

    #[test]
    fn background_runs_from_start_to_end_color() {
        let brand = brand_without_logo();
        let c = compose_with("Title", &brand, &LogoAsset::None);
        let top_left = rgba_at(&c.surface, 1, 1);
        let bottom_right = rgba_at(&c.surface, 1198, 628);
        let close = |a: [u8; 4], b: [u8; 4]| (0..3).all(|i| a[i].abs_diff(b[i]) <= 2);
        assert!(close(top_left, [12, 12, 15, 255]), "{top_left:?}");
        assert!(close(bottom_right, [26, 26, 34, 255]), "{bottom_right:?}");
    }

    #[test]
    fn grid_lines_tint_every_48px() {
        let brand = brand_without_logo();
        let c = compose_with("Title", &brand, &LogoAsset::None);
        let on_line = rgba_at(&c.surface, 48, 10);
        let off_line = rgba_at(&c.surface, 50, 10);
        assert!(on_line[0] > off_line[0] + 10, "{on_line:?} vs {off_line:?}");
    }

    #[test]
    fn top_right_glow_brightens_corner() {
        let brand = brand_without_logo();
        let c = compose_with("Title", &brand, &LogoAsset::None);
        let glowing = rgba_at(&c.surface, 1190, 10);
        let outside = rgba_at(&c.surface, 870, 10);
        assert!(glowing[0] > outside[0] + 10, "{glowing:?} vs {outside:?}");
    }

    #[test]
    fn top_right_glow_reaches_most_of_its_radius() {
        let brand = brand_without_logo();
        let lit = compose_with("Title", &brand, &LogoAsset::None);
        let unlit = compose_adjusted(&brand, |g| g.glow_primary_alpha = Opacity::new(0.0));
        // 255px from the corner, 0.8 of the 320px radius
        let glowing = rgba_at(&lit.surface, 945, 5);
        let plain = rgba_at(&unlit.surface, 945, 5);
        assert!(glowing[0] >= plain[0] + 3, "{glowing:?} vs {plain:?}");
    }

    #[test]
    fn bottom_left_glow_tints_only_its_box() {
        let brand = brand_without_logo();
        let lit = compose_with("Title", &brand, &LogoAsset::None);
        let unlit = compose_adjusted(&brand, |g| g.glow_secondary_alpha = Opacity::new(0.0));

        let corner = rgba_at(&lit.surface, 5, 625);
        let plain = rgba_at(&unlit.surface, 5, 625);
        assert!(corner[0] >= plain[0] + 10, "{corner:?} vs {plain:?}");
        assert!(corner[1] >= plain[1] + 5, "{corner:?} vs {plain:?}");

        // Box is 256px wide
        assert_eq!(
            rgba_at(&lit.surface, 300, 625),
            rgba_at(&unlit.surface, 300, 625)
        );
    }

    #[test]
    fn rings_are_stroked_in_accent_colors() {
        let brand = brand_without_logo();
        let lit = compose_with("Title", &brand, &LogoAsset::None);
        let no_small = compose_adjusted(&brand, |g| g.ring_small_alpha = Opacity::new(0.0));
        let no_large = compose_adjusted(&brand, |g| g.ring_large_alpha = Opacity::new(0.0));

        let differs = |other: &Composition, x: u32, rows: std::ops::RangeInclusive<u32>| {
            rows.filter(|&y| rgba_at(&lit.surface, x, y) != rgba_at(&other.surface, x, y))
                .count()
        };
        // Bottom of the small ring: center (112, 112), radius 64
        assert!(differs(&no_small, 112, 172..=180) > 0);
        // Top of the large ring: center (1056, 534), radius 96
        assert!(differs(&no_large, 1056, 434..=442) > 0);
        // Ring interiors stay untouched
        assert_eq!(differs(&no_small, 112, 100..=124), 0);
    }

    #[test]
    fn badge_dot_and_name_use_primary_color() {
        let brand = brand_without_logo();
        let c = compose_with("Title", &brand, &LogoAsset::None);
        assert_eq!(rgba_at(&c.surface, 56, 56), PRIMARY);
        // First glyph block of the brand name starts at x = 72
        assert_eq!(rgba_at(&c.surface, 76, 56), PRIMARY);
    }

    #[test]
    fn badge_name_is_uppercase_bold_and_letter_spaced() {
        let brand = brand_without_logo();
        let face = RecordingFace::new();
        let request = RenderRequest::new("Title", &brand);
        Compositor::new(&face).compose(&request, &LogoAsset::None).unwrap();
        let badge = &face.get_calls()[0];
        assert_eq!(badge.text, "THE MOPERATOR");
        assert_eq!(badge.weight, FontWeight::Bold);
        assert_eq!(badge.x, 72.0);
        assert_eq!(badge.rgba, PRIMARY);
    }

    #[test]
    fn domain_sits_on_bottom_padding_in_muted_color() {
        let brand = brand_without_logo();
        let face = RecordingFace::new();
        let request = RenderRequest::new("Title", &brand);
        Compositor::new(&face).compose(&request, &LogoAsset::None).unwrap();
        let domain = &face.get_calls()[1];
        assert_eq!(domain.text, "the-moperator.com");
        assert_eq!(domain.weight, FontWeight::Regular);
        assert_eq!((domain.x, domain.baseline), (48.0, 582.0));
        assert_eq!(domain.rgba, [107, 114, 128, 255]);
    }

    #[test]
    fn title_lines_are_drawn_last_line_first() {
        let brand = brand_without_logo();
        let face = RecordingFace::new();
        let request = RenderRequest::new(SALESFORCE, &brand);
        let c = Compositor::new(&face).compose(&request, &LogoAsset::None).unwrap();
        assert_eq!(c.layout.len(), 3);
        assert!(c.layout.lines[2].ends_with(ELLIPSIS));

        let title_calls = &face.get_calls()[2..];
        assert_eq!(title_calls.len(), 3);
        assert_eq!(title_calls[0].text, c.layout.lines[2]);
        assert_eq!(title_calls[0].baseline, 534.0);
        assert_eq!(title_calls[1].baseline, 482.0);
        assert_eq!(title_calls[2].text, c.layout.lines[0]);
        assert_eq!(title_calls[2].baseline, 430.0);
        assert!(title_calls.iter().all(|call| call.rgba == [232, 228, 221, 255]));
    }

    #[test]
    fn single_line_title_sits_on_last_baseline() {
        let brand = brand_without_logo();
        let face = RecordingFace::new();
        let request = RenderRequest::new("Short title", &brand);
        Compositor::new(&face).compose(&request, &LogoAsset::None).unwrap();
        let calls = face.get_calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[2].text, "Short title");
        assert_eq!(calls[2].baseline, 534.0);
    }

    #[test]
    fn empty_title_draws_placeholder_and_falls_back_on_file_name() {
        let brand = brand_without_logo();
        let face = RecordingFace::new();
        let request = RenderRequest::new("", &brand);
        let image = render(&request, &face, &LogoAsset::None).unwrap();
        assert_eq!(image.layout.lines, vec!["Your Post Title"]);
        assert_eq!(image.file_name, "og-image.png");
        assert_eq!(face.get_calls()[2].text, "Your Post Title");
    }

    #[test]
    fn whitespace_title_draws_placeholder() {
        let brand = brand_without_logo();
        let request = RenderRequest::new(" \t ", &brand);
        let layout = Compositor::new(&BlockFace).layout(&request);
        assert_eq!(layout.lines, vec!["Your Post Title"]);
        assert!(!layout.truncated);
    }

    // =========================================================================
    // Logo
    // =========================================================================

    #[test]
    fn ready_logo_is_composited_at_center() {
        let brand = brand_without_logo();
        let plain = compose_with("Title", &brand, &LogoAsset::None);
        let logo = solid_logo(320, [255, 0, 0, 255]);
        let with_logo = compose_with("Title", &brand, &logo);
        let before = rgba_at(&plain.surface, 600, 220);
        let after = rgba_at(&with_logo.surface, 600, 220);
        // 40% red over a near-black background
        assert!(after[0] > before[0] + 80, "{before:?} -> {after:?}");
        assert!(after[1] <= before[1]);
    }

    #[test]
    fn unavailable_logo_still_renders_every_other_layer() {
        let brand = brand_without_logo();
        let missing = LogoAsset::Unavailable {
            reason: "not found".into(),
        };
        let request = RenderRequest::new("Title", &brand);
        let image = render(&request, &BlockFace, &missing).unwrap();
        assert_eq!((image.width, image.height), (1200, 630));
        assert_eq!(image.logo, LogoStatus::Skipped);

        let plain = render(&request, &BlockFace, &LogoAsset::None).unwrap();
        assert_eq!(image.bytes, plain.bytes);
    }

    // =========================================================================
    // Output
    // =========================================================================

    #[test]
    fn render_is_idempotent() {
        let brand = brand_without_logo();
        let logo = solid_logo(320, [0, 128, 255, 200]);
        let request = RenderRequest::new("Same title twice", &brand);
        let first = render(&request, &BlockFace, &logo).unwrap();
        let second = render(&request, &BlockFace, &logo).unwrap();
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.digest(), second.digest());
        assert_eq!(first.logo, LogoStatus::Drawn);
    }

    #[test]
    fn render_emits_png_with_slug_name() {
        let brand = brand_without_logo();
        let request = RenderRequest::new("My Post: A Guide!", &brand);
        let image = render(&request, &BlockFace, &LogoAsset::None).unwrap();
        assert_eq!(&image.bytes[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(image.file_name, "my-post-a-guide.png");
    }

    #[test]
    fn backend_failure_aborts_render() {
        let brand = brand_without_logo();
        let request = RenderRequest::new("Title", &brand);
        let result = render(&request, &FailingFace, &LogoAsset::None);
        assert!(matches!(result, Err(RenderError::Backend(_))));
    }

    #[test]
    fn layout_preview_matches_rendered_layout() {
        let brand = brand_without_logo();
        let request = RenderRequest::new(SALESFORCE, &brand);
        let compositor = Compositor::new(&BlockFace);
        let preview = compositor.layout(&request);
        let image = compositor.render(&request, &LogoAsset::None).unwrap();
        assert_eq!(preview, image.layout);
    }

    #[tokio::test]
    async fn load_and_render_without_logo_file() {
        let mut brand = brand_without_logo();
        brand.logo = Some("/nonexistent/logo.png".into());
        let request = RenderRequest::new("Title", &brand);
        let image = load_and_render(&request, &BlockFace).await.unwrap();
        assert_eq!(image.logo, LogoStatus::Skipped);
    }
}
