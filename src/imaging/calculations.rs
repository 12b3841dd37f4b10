//! Pure geometry for every layer of the card.
//!
//! All functions here are pure and testable without a surface or a font.
//! Coordinates are in pixels, y pointing down.

use super::params::{CanvasSize, Geometry};

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pt {
    pub x: f32,
    pub y: f32,
}

impl Pt {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Area {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A circle by center and radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub center: Pt,
    pub radius: f32,
}

/// Endpoints of a CSS-style `linear-gradient(<angle>deg, ...)` over a box.
///
/// The angle is measured clockwise from "to top", so 90° runs left to right
/// and 135° runs from the top-left corner to the bottom-right one. The
/// gradient line passes through the center and is long enough that the 0%
/// and 100% stops land exactly on the corners perpendicular to it.
pub fn gradient_axis(angle_deg: f32, size: CanvasSize) -> (Pt, Pt) {
    let (w, h) = (size.width_f(), size.height_f());
    let rad = angle_deg.to_radians();
    let (dx, dy) = (rad.sin(), -rad.cos());
    let half = (w * dx.abs() + h * dy.abs()) / 2.0;
    let (cx, cy) = (w / 2.0, h / 2.0);
    (
        Pt::new(cx - dx * half, cy - dy * half),
        Pt::new(cx + dx * half, cy + dy * half),
    )
}

/// Offsets of grid lines along one axis: `0, spacing, 2*spacing, ...` up to
/// (but excluding) `extent`.
pub fn grid_offsets(extent: u32, spacing: f32) -> Vec<f32> {
    if spacing <= 0.0 {
        return Vec::new();
    }
    let count = (extent as f32 / spacing).ceil() as usize;
    (0..count)
        .map(|i| i as f32 * spacing)
        .filter(|&o| o < extent as f32)
        .collect()
}

/// The two decorative rings: `(top_left, bottom_right)`.
pub fn ring_circles(size: CanvasSize, g: &Geometry) -> (Circle, Circle) {
    let small = Circle {
        center: Pt::new(
            g.padding + g.ring_small_radius,
            g.padding + g.ring_small_radius,
        ),
        radius: g.ring_small_radius,
    };
    let large = Circle {
        center: Pt::new(size.width_f() - 144.0, size.height_f() - 96.0),
        radius: g.ring_large_radius,
    };
    (small, large)
}

/// Radial glow anchored at a canvas corner, confined to the square box
/// between that corner and its radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glow {
    pub anchor: Pt,
    pub radius: f32,
    pub bounds: Area,
}

/// The two corner glows: `(top_right, bottom_left)`.
pub fn glow_boxes(size: CanvasSize, g: &Geometry) -> (Glow, Glow) {
    let (w, h) = (size.width_f(), size.height_f());
    let r1 = g.glow_primary_radius.min(w).min(h);
    let r2 = g.glow_secondary_radius.min(w).min(h);
    let top_right = Glow {
        anchor: Pt::new(w, 0.0),
        radius: g.glow_primary_radius,
        bounds: Area {
            x: w - r1,
            y: 0.0,
            width: r1,
            height: r1,
        },
    };
    let bottom_left = Glow {
        anchor: Pt::new(0.0, h),
        radius: g.glow_secondary_radius,
        bounds: Area {
            x: 0.0,
            y: h - r2,
            width: r2,
            height: r2,
        },
    };
    (top_right, bottom_left)
}

/// Top-left corner of the logo square: horizontally centered, vertically
/// centered then lifted by `logo_lift` of the canvas height.
pub fn logo_origin(size: CanvasSize, g: &Geometry) -> Pt {
    let edge = g.logo_size as f32;
    Pt::new(
        (size.width_f() - edge) / 2.0,
        (size.height_f() - edge) / 2.0 - size.height_f() * g.logo_lift,
    )
}

/// Badge dot and the pen origin of the brand name beside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BadgeLayout {
    pub dot: Circle,
    /// Radius of the soft glow disc drawn under the dot.
    pub glow_radius: f32,
    /// Left edge of the brand name.
    pub text_x: f32,
    /// Baseline of the brand name, placed so caps center on the dot.
    pub text_baseline: f32,
}

/// Approximate cap height as a fraction of the em size.
const CAP_HEIGHT_RATIO: f32 = 0.7;

pub fn badge_layout(g: &Geometry) -> BadgeLayout {
    let r = g.badge_dot_radius;
    let center = Pt::new(g.padding + r, g.padding + r);
    BadgeLayout {
        dot: Circle { center, radius: r },
        glow_radius: r + g.badge_glow_blur,
        text_x: center.x + r + g.badge_gap,
        text_baseline: center.y + g.badge_font.size * CAP_HEIGHT_RATIO / 2.0,
    }
}

/// Baseline of the domain line: the bottom padding inset.
pub fn domain_baseline(size: CanvasSize, g: &Geometry) -> f32 {
    size.height_f() - g.padding
}

/// Baselines for `count` title lines, first line first.
///
/// The last line always sits `title_domain_gap` above the domain baseline;
/// earlier lines stack upward by `title_line_height`, so one, two or three
/// lines all end at the same place.
pub fn title_baselines(count: usize, size: CanvasSize, g: &Geometry) -> Vec<f32> {
    let last = domain_baseline(size, g) - g.title_domain_gap;
    (0..count)
        .map(|i| last - (count - 1 - i) as f32 * g.title_line_height)
        .collect()
}

/// Horizontal text budget: canvas width minus padding on both sides.
pub fn max_text_width(size: CanvasSize, g: &Geometry) -> f32 {
    (size.width_f() - 2.0 * g.padding).max(1.0)
}
