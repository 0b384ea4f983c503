//! Primitive shape operations.
//!
//! Every operation takes absolute pixel geometry and paints unconditionally
//! onto a [`Canvas`]. Degenerate input is clamped so that nothing drawn at
//! favicon sizes disappears: stroke widths and shape extents never go below
//! one pixel. Non-finite coordinates are rejected with a warning.
//!
//! Angles are in degrees, measured clockwise from the 3 o'clock direction
//! (screen coordinates, y pointing down).

use resvg::tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Rect, Stroke, Transform,
};
use tracing::{debug, warn};

use crate::brand::{Color, to_skia};
use crate::canvas::{BoundsF, Canvas, PointF, RectPx};

/// Narrowest stroke or extent any primitive will paint.
pub const MIN_EXTENT_PX: f32 = 1.0;

// ============================================================================
// Clamping
// ============================================================================

/// Clamps a stroke width to at least [`MIN_EXTENT_PX`].
pub fn clamp_stroke_width(width: f32) -> f32 {
    if width >= MIN_EXTENT_PX {
        return width;
    }
    debug!(width, "clamped stroke width");
    MIN_EXTENT_PX
}

/// Clamps a corner radius so opposite corners never overlap.
///
/// The result is at most `min(width, height) / 2`.
pub fn clamp_corner_radius(rect: RectPx, radius: u32) -> u32 {
    let max = rect.width.min(rect.height) / 2;
    if radius > max {
        debug!(radius, max, "clamped corner radius");
    }
    radius.min(max)
}

// ============================================================================
// Strokes
// ============================================================================

/// Strokes an elliptical arc inscribed in `bounds`.
///
/// The arc starts at `start_deg` and runs clockwise for `sweep_deg`.
pub fn stroke_arc(
    canvas: &mut Canvas,
    bounds: BoundsF,
    start_deg: f32,
    sweep_deg: f32,
    width: f32,
    color: Color,
) {
    if !bounds.is_finite() || !start_deg.is_finite() || !sweep_deg.is_finite() {
        warn!(?bounds, start_deg, sweep_deg, "rejected non-finite arc");
        return;
    }
    let bounds = bounds.normalized(MIN_EXTENT_PX);
    let mut pb = PathBuilder::new();
    append_arc(&mut pb, bounds, start_deg, sweep_deg, true);
    let stroke = Stroke {
        width: clamp_stroke_width(width),
        line_cap: LineCap::Round,
        ..Stroke::default()
    };
    apply_stroke(canvas, pb.finish(), color, &stroke);
}

/// Strokes a straight, butt-capped segment.
///
/// Segments shorter than a pixel are stretched to one pixel around their
/// midpoint.
pub fn stroke_line(canvas: &mut Canvas, from: PointF, to: PointF, width: f32, color: Color) {
    if !from.is_finite() || !to.is_finite() {
        warn!(?from, ?to, "rejected non-finite line");
        return;
    }
    let (from, to) = ensure_min_length(from, to);
    let mut pb = PathBuilder::new();
    pb.move_to(from.x, from.y);
    pb.line_to(to.x, to.y);
    let stroke = Stroke {
        width: clamp_stroke_width(width),
        line_cap: LineCap::Butt,
        ..Stroke::default()
    };
    apply_stroke(canvas, pb.finish(), color, &stroke);
}

/// Strokes a closed polygon outline with round joins.
pub fn stroke_polygon(canvas: &mut Canvas, points: &[PointF], width: f32, color: Color) {
    if points.len() < 2 {
        return;
    }
    if points.iter().any(|p| !p.is_finite()) {
        warn!(?points, "rejected non-finite polygon");
        return;
    }
    let mut pb = PathBuilder::new();
    pb.move_to(points[0].x, points[0].y);
    for p in &points[1..] {
        pb.line_to(p.x, p.y);
    }
    pb.close();
    let stroke = Stroke {
        width: clamp_stroke_width(width),
        line_join: LineJoin::Round,
        ..Stroke::default()
    };
    apply_stroke(canvas, pb.finish(), color, &stroke);
}

/// Strokes the outline of a rectangle, keeping the stroke inside `bounds`.
pub fn stroke_rect(canvas: &mut Canvas, bounds: BoundsF, width: f32, color: Color) {
    if !bounds.is_finite() {
        warn!(?bounds, "rejected non-finite rectangle");
        return;
    }
    let width = clamp_stroke_width(width);
    let inner = bounds
        .normalized(MIN_EXTENT_PX)
        .outset(-width / 2.0)
        .normalized(MIN_EXTENT_PX);
    let path = Rect::from_ltrb(inner.left, inner.top, inner.right, inner.bottom)
        .map(PathBuilder::from_rect);
    let stroke = Stroke {
        width,
        line_join: LineJoin::Miter,
        ..Stroke::default()
    };
    apply_stroke(canvas, path, color, &stroke);
}

// ============================================================================
// Fills
// ============================================================================

/// Fills the ellipse inscribed in `bounds`.
pub fn fill_ellipse(canvas: &mut Canvas, bounds: BoundsF, color: Color) {
    if !bounds.is_finite() {
        warn!(?bounds, "rejected non-finite ellipse");
        return;
    }
    let b = bounds.normalized(MIN_EXTENT_PX);
    let path = Rect::from_ltrb(b.left, b.top, b.right, b.bottom).and_then(PathBuilder::from_oval);
    apply_fill(canvas, path, color);
}

/// Fills a pie slice of the ellipse inscribed in `bounds`.
pub fn fill_pie(
    canvas: &mut Canvas,
    bounds: BoundsF,
    start_deg: f32,
    sweep_deg: f32,
    color: Color,
) {
    if !bounds.is_finite() || !start_deg.is_finite() || !sweep_deg.is_finite() {
        warn!(?bounds, start_deg, sweep_deg, "rejected non-finite pie");
        return;
    }
    let bounds = bounds.normalized(MIN_EXTENT_PX);
    let center = bounds.center();
    let mut pb = PathBuilder::new();
    pb.move_to(center.x, center.y);
    append_arc(&mut pb, bounds, start_deg, sweep_deg, false);
    pb.close();
    apply_fill(canvas, pb.finish(), color);
}

/// Fills a pixel-aligned rectangle.
pub fn fill_rect(canvas: &mut Canvas, rect: RectPx, color: Color) {
    fill_box(canvas, rect.to_bounds(), color);
}

/// Fills an axis-aligned box that may lie partly off the canvas.
pub fn fill_box(canvas: &mut Canvas, bounds: BoundsF, color: Color) {
    if !bounds.is_finite() {
        warn!(?bounds, "rejected non-finite box");
        return;
    }
    let b = bounds.normalized(MIN_EXTENT_PX);
    let path = Rect::from_ltrb(b.left, b.top, b.right, b.bottom).map(PathBuilder::from_rect);
    apply_fill(canvas, path, color);
}

/// Fills a rectangle with rounded corners.
///
/// Built from two overlapping rectangles covering the cross between the
/// corners plus four quarter-disc pies. The radius is clamped with
/// [`clamp_corner_radius`].
pub fn fill_rounded_rect(canvas: &mut Canvas, rect: RectPx, radius: u32, color: Color) {
    let r = clamp_corner_radius(rect, radius);
    if r == 0 {
        fill_rect(canvas, rect, color);
        return;
    }

    if rect.width > 2 * r {
        fill_rect(
            canvas,
            RectPx::new(rect.x + r, rect.y, rect.width - 2 * r, rect.height),
            color,
        );
    }
    if rect.height > 2 * r {
        fill_rect(
            canvas,
            RectPx::new(rect.x, rect.y + r, rect.width, rect.height - 2 * r),
            color,
        );
    }

    let d = 2 * r;
    let corner = |x: u32, y: u32| RectPx::new(x, y, d, d).to_bounds();
    let (left, top) = (rect.x, rect.y);
    let (right, bottom) = (rect.right() - d, rect.bottom() - d);
    fill_pie(canvas, corner(left, top), 180.0, 90.0, color);
    fill_pie(canvas, corner(right, top), 270.0, 90.0, color);
    fill_pie(canvas, corner(right, bottom), 0.0, 90.0, color);
    fill_pie(canvas, corner(left, bottom), 90.0, 90.0, color);
}

// ============================================================================
// Helpers
// ============================================================================

fn paint(color: Color) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color(to_skia(color));
    paint.anti_alias = true;
    paint
}

fn apply_fill(canvas: &mut Canvas, path: Option<Path>, color: Color) {
    let Some(path) = path else {
        warn!("skipped fill with empty path");
        return;
    };
    canvas.pixmap_mut().fill_path(
        &path,
        &paint(color),
        FillRule::Winding,
        Transform::identity(),
        None,
    );
}

fn apply_stroke(canvas: &mut Canvas, path: Option<Path>, color: Color, stroke: &Stroke) {
    let Some(path) = path else {
        warn!("skipped stroke with empty path");
        return;
    };
    canvas
        .pixmap_mut()
        .stroke_path(&path, &paint(color), stroke, Transform::identity(), None);
}

fn ensure_min_length(from: PointF, to: PointF) -> (PointF, PointF) {
    let (dx, dy) = (to.x - from.x, to.y - from.y);
    let len = (dx * dx + dy * dy).sqrt();
    if len >= MIN_EXTENT_PX {
        return (from, to);
    }
    debug!(?from, ?to, "stretched sub-pixel segment");
    let (ux, uy) = if len > f32::EPSILON {
        (dx / len, dy / len)
    } else {
        (0.0, 1.0)
    };
    let mid = PointF::new((from.x + to.x) / 2.0, (from.y + to.y) / 2.0);
    let half = MIN_EXTENT_PX / 2.0;
    (
        mid.offset(-ux * half, -uy * half),
        mid.offset(ux * half, uy * half),
    )
}

/// Point on the ellipse inscribed in `bounds` at `deg`.
pub(crate) fn ellipse_point(bounds: BoundsF, deg: f32) -> PointF {
    let c = bounds.center();
    let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);
    let t = deg.to_radians();
    PointF::new(c.x + rx * t.cos(), c.y + ry * t.sin())
}

/// Appends an elliptical arc as cubic segments of at most 90 degrees.
///
/// With `start_new` the arc opens a new subpath, otherwise it continues
/// the current one with a line to the arc's first point.
fn append_arc(
    pb: &mut PathBuilder,
    bounds: BoundsF,
    start_deg: f32,
    sweep_deg: f32,
    start_new: bool,
) {
    let c = bounds.center();
    let (rx, ry) = (bounds.width() / 2.0, bounds.height() / 2.0);

    let first = ellipse_point(bounds, start_deg);
    if start_new {
        pb.move_to(first.x, first.y);
    } else {
        pb.line_to(first.x, first.y);
    }

    let segments = (sweep_deg.abs() / 90.0).ceil().max(1.0) as u32;
    let step = (sweep_deg / segments as f32).to_radians();
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut a0 = start_deg.to_radians();
    for _ in 0..segments {
        let a1 = a0 + step;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        pb.cubic_to(
            c.x + rx * (c0 - k * s0),
            c.y + ry * (s0 + k * c0),
            c.x + rx * (c1 + k * s1),
            c.y + ry * (s1 - k * c1),
            c.x + rx * c1,
            c.y + ry * s1,
        );
        a0 = a1;
    }
}

// ============================================================================
// Tests
// ============================================================================
