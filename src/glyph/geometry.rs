//! Proportional geometry of the cart glyphs.
//!
//! Every offset here is a fraction of the glyph `size`, relative to the
//! glyph center. The tables are plain constants so the proportions can be
//! audited and tested without drawing anything; [`CartLayout::resolve`] and
//! [`CompactCartLayout::resolve`] turn them into absolute pixel geometry.
//!
//! Stroke widths are the one place where geometry does not scale linearly:
//! they are floor-clamped (see [`StrokeProfile`]) so small renders keep
//! legible lines.

use serde::{Deserialize, Serialize};

use crate::canvas::{BoundsF, PointF};

// ============================================================================
// Fraction Tables
// ============================================================================

/// An offset from the glyph center, in units of the glyph size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frac {
    pub dx: f32,
    pub dy: f32,
}

impl Frac {
    pub const fn new(dx: f32, dy: f32) -> Self {
        Self { dx, dy }
    }

    /// Resolves the offset against a center and size.
    pub fn at(self, center: PointF, size: f32) -> PointF {
        center.offset(self.dx * size, self.dy * size)
    }
}

/// Proportions of the detailed cart glyph.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CartTable {
    /// Top-left corner of the handle arc's bounding box.
    pub handle_min: Frac,
    /// Bottom-right corner of the handle arc's bounding box.
    pub handle_max: Frac,
    /// Handle arc start angle, clockwise from 3 o'clock.
    pub handle_start_deg: f32,
    /// Handle arc sweep.
    pub handle_sweep_deg: f32,
    pub body_top_left: Frac,
    pub body_top_right: Frac,
    pub body_bottom_right: Frac,
    pub body_bottom_left: Frac,
    /// Vertical position of the shelf line.
    pub shelf_dy: f32,
    pub shelf_left_dx: f32,
    pub shelf_right_dx: f32,
    pub wheel_left_dx: f32,
    pub wheel_right_dx: f32,
    /// Vertical position of both wheel centers.
    pub wheel_dy: f32,
}

/// The canonical cart proportions.
pub const CART: CartTable = CartTable {
    handle_min: Frac::new(-0.56, -0.58),
    handle_max: Frac::new(-0.24, -0.28),
    handle_start_deg: 180.0,
    handle_sweep_deg: 95.0,
    body_top_left: Frac::new(-0.38, -0.28),
    body_top_right: Frac::new(0.46, -0.28),
    body_bottom_right: Frac::new(0.36, 0.20),
    body_bottom_left: Frac::new(-0.26, 0.20),
    shelf_dy: -0.04,
    shelf_left_dx: -0.31,
    shelf_right_dx: 0.40,
    wheel_left_dx: -0.18,
    wheel_right_dx: 0.28,
    wheel_dy: 0.33,
};

/// Proportions of the compact favicon cart: an outlined basket and two
/// wheel dots.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompactCartTable {
    pub body_min: Frac,
    pub body_max: Frac,
    pub stroke_coeff: f32,
    pub stroke_floor_px: f32,
    pub wheel_coeff: f32,
    pub wheel_floor_px: f32,
    /// Left wheel inset from the body's left edge.
    pub wheel_left_inset: f32,
    /// Right wheel inset from the body's right edge.
    pub wheel_right_inset: f32,
    /// Wheel drop below the body's bottom edge.
    pub wheel_drop: f32,
}

pub const COMPACT_CART: CompactCartTable = CompactCartTable {
    body_min: Frac::new(-0.30, -0.30),
    body_max: Frac::new(0.40, 0.25),
    stroke_coeff: 0.12,
    stroke_floor_px: 2.0,
    wheel_coeff: 0.08,
    wheel_floor_px: 1.5,
    wheel_left_inset: 0.10,
    wheel_right_inset: 0.15,
    wheel_drop: 0.15,
};

// ============================================================================
// Stroke Profiles
// ============================================================================

/// Stroke boldness of the detailed cart glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrokeWeight {
    #[default]
    Regular,
    Bold,
}

/// Stroke width and wheel radius coefficients for one [`StrokeWeight`].
///
/// Major strokes (handle, body) are `max(size * major_coeff, major_floor_px)`.
/// Minor strokes (shelf, legs) are `max(major * minor_ratio, minor_floor_px)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeProfile {
    pub major_coeff: f32,
    pub major_floor_px: f32,
    pub minor_ratio: f32,
    pub minor_floor_px: f32,
    pub wheel_coeff: f32,
    pub wheel_floor_px: f32,
}

impl StrokeProfile {
    pub const REGULAR: Self = Self {
        major_coeff: 0.08,
        major_floor_px: 3.0,
        minor_ratio: 2.0 / 3.0,
        minor_floor_px: 2.0,
        wheel_coeff: 0.07,
        wheel_floor_px: 1.5,
    };

    pub const BOLD: Self = Self {
        major_coeff: 0.11,
        major_floor_px: 4.0,
        minor_ratio: 2.0 / 3.0,
        minor_floor_px: 2.0,
        wheel_coeff: 0.085,
        wheel_floor_px: 1.5,
    };

    pub fn for_weight(weight: StrokeWeight) -> Self {
        match weight {
            StrokeWeight::Regular => Self::REGULAR,
            StrokeWeight::Bold => Self::BOLD,
        }
    }

    pub fn major_width(&self, size: f32) -> f32 {
        (size * self.major_coeff).max(self.major_floor_px)
    }

    pub fn minor_width(&self, size: f32) -> f32 {
        (self.major_width(size) * self.minor_ratio).max(self.minor_floor_px)
    }

    pub fn wheel_radius(&self, size: f32) -> f32 {
        (size * self.wheel_coeff).max(self.wheel_floor_px)
    }
}

// ============================================================================
// Resolved Layouts
// ============================================================================

/// The detailed cart glyph resolved to absolute pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLayout {
    pub handle_bounds: BoundsF,
    pub handle_start_deg: f32,
    pub handle_sweep_deg: f32,
    /// Body corners: top-left, top-right, bottom-right, bottom-left.
    pub body: [PointF; 4],
    pub shelf: (PointF, PointF),
    /// Leg segments, each from the body's bottom edge to its wheel's top.
    pub legs: [(PointF, PointF); 2],
    pub wheels: [PointF; 2],
    pub wheel_radius: f32,
    pub major_width: f32,
    pub minor_width: f32,
}

impl CartLayout {
    /// Resolves [`CART`] for a glyph centered at `center` with the given size.
    pub fn resolve(center: PointF, size: f32, weight: StrokeWeight) -> Self {
        let t = &CART;
        let profile = StrokeProfile::for_weight(weight);
        let at = |f: Frac| f.at(center, size);

        let body = [
            at(t.body_top_left),
            at(t.body_top_right),
            at(t.body_bottom_right),
            at(t.body_bottom_left),
        ];
        let body_bottom = body[3].y;

        let wheel_radius = profile.wheel_radius(size);
        // Floors can outgrow the proportional gap at tiny sizes; never let a
        // wheel climb into the body.
        let wheel_y = (center.y + t.wheel_dy * size).max(body_bottom + wheel_radius);
        let wheels = [
            PointF::new(center.x + t.wheel_left_dx * size, wheel_y),
            PointF::new(center.x + t.wheel_right_dx * size, wheel_y),
        ];
        let leg = |wheel: PointF| {
            (
                PointF::new(wheel.x, body_bottom),
                PointF::new(wheel.x, wheel.y - wheel_radius),
            )
        };

        let shelf_y = center.y + t.shelf_dy * size;

        Self {
            handle_bounds: BoundsF::new(
                at(t.handle_min).x,
                at(t.handle_min).y,
                at(t.handle_max).x,
                at(t.handle_max).y,
            ),
            handle_start_deg: t.handle_start_deg,
            handle_sweep_deg: t.handle_sweep_deg,
            body,
            shelf: (
                PointF::new(center.x + t.shelf_left_dx * size, shelf_y),
                PointF::new(center.x + t.shelf_right_dx * size, shelf_y),
            ),
            legs: [leg(wheels[0]), leg(wheels[1])],
            wheels,
            wheel_radius,
            major_width: profile.major_width(size),
            minor_width: profile.minor_width(size),
        }
    }

    /// Points sampled along the handle arc's centerline.
    pub fn handle_points(&self) -> Vec<PointF> {
        let steps = 16;
        (0..=steps)
            .map(|i| {
                let deg = self.handle_start_deg + self.handle_sweep_deg * i as f32 / steps as f32;
                crate::shapes::ellipse_point(self.handle_bounds, deg)
            })
            .collect()
    }

    /// Box containing every painted pixel of the glyph, strokes included.
    pub fn ink_bounds(&self) -> BoundsF {
        let major = self.major_width / 2.0;
        let minor = self.minor_width / 2.0;

        let handle = points_bounds(&self.handle_points()).outset(major);
        let body = points_bounds(&self.body).outset(major);
        let shelf = points_bounds(&[self.shelf.0, self.shelf.1]).outset(minor);
        let wheels = self
            .wheels
            .iter()
            .map(|w| BoundsF::around(*w, self.wheel_radius, self.wheel_radius))
            .fold(shelf, |acc, b| acc.union(&b));

        handle.union(&body).union(&wheels)
    }

    /// X coordinates of the body's left and right edges at height `y`.
    pub fn body_span_at(&self, y: f32) -> (f32, f32) {
        let [tl, tr, br, bl] = self.body;
        let lerp_x = |top: PointF, bottom: PointF| {
            let t = (y - top.y) / (bottom.y - top.y);
            top.x + (bottom.x - top.x) * t
        };
        (lerp_x(tl, bl), lerp_x(tr, br))
    }
}

/// The compact favicon cart resolved to absolute pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct CompactCartLayout {
    pub body: BoundsF,
    pub stroke_width: f32,
    pub wheels: [PointF; 2],
    pub wheel_radius: f32,
}

impl CompactCartLayout {
    pub fn resolve(center: PointF, size: f32) -> Self {
        let t = &COMPACT_CART;
        let min = t.body_min.at(center, size);
        let max = t.body_max.at(center, size);
        let body = BoundsF::new(min.x, min.y, max.x, max.y);
        let wheel_y = body.bottom + t.wheel_drop * size;
        Self {
            body,
            stroke_width: (size * t.stroke_coeff).max(t.stroke_floor_px),
            wheels: [
                PointF::new(body.left + t.wheel_left_inset * size, wheel_y),
                PointF::new(body.right - t.wheel_right_inset * size, wheel_y),
            ],
            wheel_radius: (size * t.wheel_coeff).max(t.wheel_floor_px),
        }
    }

    pub fn ink_bounds(&self) -> BoundsF {
        self.wheels
            .iter()
            .map(|w| BoundsF::around(*w, self.wheel_radius, self.wheel_radius))
            .fold(self.body, |acc, b| acc.union(&b))
    }
}

fn points_bounds(points: &[PointF]) -> BoundsF {
    let first = BoundsF::new(points[0].x, points[0].y, points[0].x, points[0].y);
    points.iter().fold(first, |acc, p| {
        acc.union(&BoundsF::new(p.x, p.y, p.x, p.y))
    })
}

// ============================================================================
// Tests
// ============================================================================
