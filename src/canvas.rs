//! Canvas and geometry types.
//!
//! A [`Canvas`] is the mutable pixel buffer a variant generator paints into.
//! It wraps a tiny-skia pixmap (premultiplied RGBA) and is converted into a
//! straight-alpha [`RgbaImage`] once the generator hands it off.

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{Pixmap, PremultipliedColorU8};
use tracing::debug;

use crate::brand::{Color, to_skia};
use crate::error::RenderError;

// ============================================================================
// Geometry
// ============================================================================

/// A rectangle defined in whole pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RectPx {
    /// X offset from the left edge of the canvas
    pub x: u32,
    /// Y offset from the top edge of the canvas
    pub y: u32,
    /// Width of the rectangle
    pub width: u32,
    /// Height of the rectangle
    pub height: u32,
}

impl RectPx {
    /// Creates a new rectangle with the given position and dimensions.
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }

    /// Creates a rectangle starting at origin (0, 0) with the given dimensions.
    pub fn from_size(size: SizePx) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Shrinks the rectangle by `pad` on every side, keeping at least 1x1.
    pub fn inset(&self, pad: u32) -> Self {
        let pad_x = pad.min(self.width.saturating_sub(1) / 2);
        let pad_y = pad.min(self.height.saturating_sub(1) / 2);
        Self::new(
            self.x + pad_x,
            self.y + pad_y,
            self.width - 2 * pad_x,
            self.height - 2 * pad_y,
        )
    }

    pub(crate) fn to_bounds(self) -> BoundsF {
        BoundsF::new(
            self.x as f32,
            self.y as f32,
            self.right() as f32,
            self.bottom() as f32,
        )
    }
}

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// A square size.
    pub fn square(side: u32) -> Self {
        Self::new(side, side)
    }

    /// The shorter of the two sides.
    pub fn min_side(&self) -> u32 {
        self.width.min(self.height)
    }
}

/// A point in canvas pixel space. Sub-pixel positions are allowed.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointF {
    pub x: f32,
    pub y: f32,
}

impl PointF {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`.
    pub fn offset(self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// An axis-aligned box in canvas pixel space, given by its edges.
///
/// Used as the bounding box of ellipses and arcs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BoundsF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl BoundsF {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The box of an ellipse with the given center and radii.
    pub fn around(center: PointF, rx: f32, ry: f32) -> Self {
        Self::new(center.x - rx, center.y - ry, center.x + rx, center.y + ry)
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    pub fn center(&self) -> PointF {
        PointF::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }

    /// Returns the box grown by `amount` on every side.
    pub fn outset(&self, amount: f32) -> Self {
        Self::new(
            self.left - amount,
            self.top - amount,
            self.right + amount,
            self.bottom + amount,
        )
    }

    /// True when `other` lies entirely inside this box (edges inclusive).
    pub fn contains(&self, other: &Self) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right <= self.right
            && other.bottom <= self.bottom
    }

    pub(crate) fn is_finite(&self) -> bool {
        self.left.is_finite()
            && self.top.is_finite()
            && self.right.is_finite()
            && self.bottom.is_finite()
    }

    /// Swaps inverted edges and grows each extent to at least `min_extent`
    /// around its center, so small shapes never vanish.
    pub(crate) fn normalized(&self, min_extent: f32) -> Self {
        let (left, right) = ordered(self.left, self.right);
        let (top, bottom) = ordered(self.top, self.bottom);
        let (left, right) = widen(left, right, min_extent);
        let (top, bottom) = widen(top, bottom, min_extent);
        let normalized = Self::new(left, top, right, bottom);
        if normalized != *self {
            debug!(original = ?self, ?normalized, "clamped degenerate bounds");
        }
        normalized
    }
}

fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b { (a, b) } else { (b, a) }
}

fn widen(lo: f32, hi: f32, min_extent: f32) -> (f32, f32) {
    if hi - lo >= min_extent {
        return (lo, hi);
    }
    let mid = (lo + hi) / 2.0;
    (mid - min_extent / 2.0, mid + min_extent / 2.0)
}

// ============================================================================
// Canvas
// ============================================================================

/// A fixed-size RGBA pixel buffer that shapes are painted onto.
///
/// Created empty (transparent) or filled with a solid color. Each canvas is
/// owned by exactly one variant generator and consumed by
/// [`into_image`](Self::into_image) when it is handed off.
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    /// Creates a fully transparent canvas.
    ///
    /// Zero dimensions are clamped to one pixel.
    pub fn transparent(size: SizePx) -> Result<Self, RenderError> {
        let width = size.width.max(1);
        let height = size.height.max(1);
        if (width, height) != (size.width, size.height) {
            debug!(?size, "clamped empty canvas to 1px");
        }
        let pixmap =
            Pixmap::new(width, height).ok_or(RenderError::CanvasAllocation { width, height })?;
        Ok(Self { pixmap })
    }

    /// Creates a canvas filled edge to edge with `color`.
    pub fn solid(size: SizePx, color: Color) -> Result<Self, RenderError> {
        let mut canvas = Self::transparent(size)?;
        canvas.pixmap.fill(to_skia(color));
        Ok(canvas)
    }

    /// Returns the pixel dimensions of the canvas.
    pub fn size(&self) -> SizePx {
        SizePx::new(self.pixmap.width(), self.pixmap.height())
    }

    /// The center of the canvas, snapped to whole pixels.
    pub fn center(&self) -> PointF {
        let size = self.size();
        PointF::new((size.width / 2) as f32, (size.height / 2) as f32)
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Hands off the canvas as a straight-alpha image.
    pub fn into_image(self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }
}

/// Converts a tiny-skia pixmap into an `image::RgbaImage`.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let width = pixmap.width();
    let mut img = RgbaImage::new(width, pixmap.height());

    for (i, pixel) in pixmap.pixels().iter().enumerate() {
        let x = i as u32 % width;
        let y = i as u32 / width;
        img.put_pixel(x, y, unpremultiply(*pixel));
    }

    img
}

/// Unpremultiplies a premultiplied alpha pixel.
fn unpremultiply(pixel: PremultipliedColorU8) -> Rgba<u8> {
    let a = pixel.alpha();
    if a == 0 {
        return Rgba([0, 0, 0, 0]);
    }
    let a_f = a as f32 / 255.0;
    let channel = |c: u8| (c as f32 / a_f).round().min(255.0) as u8;
    Rgba([
        channel(pixel.red()),
        channel(pixel.green()),
        channel(pixel.blue()),
        a,
    ])
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::{BURNT_ORANGE, DARK_BACKGROUND};

    #[test]
    fn rect_px_edges_and_inset() {
        let rect = RectPx::new(10, 20, 100, 200);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 220);

        let inset = rect.inset(5);
        assert_eq!(inset, RectPx::new(15, 25, 90, 190));

        // Never inset past a single pixel
        let tiny = RectPx::new(0, 0, 3, 3).inset(10);
        assert_eq!(tiny, RectPx::new(1, 1, 1, 1));
    }

    #[test]
    fn size_px_helpers() {
        assert_eq!(SizePx::square(48), SizePx::new(48, 48));
        assert_eq!(SizePx::new(1284, 2778).min_side(), 1284);
    }

    #[test]
    fn bounds_normalization_swaps_and_widens() {
        let inverted = BoundsF::new(10.0, 10.0, 4.0, 10.2);
        let fixed = inverted.normalized(1.0);
        assert_eq!(fixed.left, 4.0);
        assert_eq!(fixed.right, 10.0);
        assert!((fixed.height() - 1.0).abs() < 1e-6);
        assert!((fixed.center().y - 10.1).abs() < 1e-5);
    }

    #[test]
    fn bounds_union_and_contains() {
        let a = BoundsF::new(0.0, 0.0, 10.0, 10.0);
        let b = BoundsF::new(5.0, -2.0, 12.0, 4.0);
        let u = a.union(&b);
        assert_eq!(u, BoundsF::new(0.0, -2.0, 12.0, 10.0));
        assert!(u.contains(&a));
        assert!(!a.contains(&b));
    }

    #[test]
    fn transparent_canvas_is_empty() {
        let canvas = Canvas::transparent(SizePx::square(8)).unwrap();
        let img = canvas.into_image();
        assert_eq!(img.dimensions(), (8, 8));
        assert!(img.pixels().all(|p| p.0[3] == 0));
    }

    #[test]
    fn zero_sized_canvas_is_clamped() {
        let canvas = Canvas::transparent(SizePx::new(0, 5)).unwrap();
        assert_eq!(canvas.size(), SizePx::new(1, 5));
    }

    #[test]
    fn solid_canvas_round_trips_color() {
        let canvas = Canvas::solid(SizePx::new(4, 3), DARK_BACKGROUND).unwrap();
        let img = canvas.into_image();
        assert_eq!(img.get_pixel(3, 2).0, [28, 25, 23, 255]);
    }

    #[test]
    fn unpremultiply_restores_straight_alpha() {
        let orange = BURNT_ORANGE;
        let premultiplied =
            PremultipliedColorU8::from_rgba(112, 47, 14, 128).expect("valid premultiplied pixel");
        let straight = unpremultiply(premultiplied);
        assert_eq!(straight.0[3], 128);
        assert!((straight.0[0] as i32 - orange.red as i32).abs() <= 2);
        assert!((straight.0[1] as i32 - orange.green as i32).abs() <= 2);
    }

    #[test]
    fn canvas_center_snaps_to_pixels() {
        let canvas = Canvas::transparent(SizePx::new(1285, 11)).unwrap();
        assert_eq!(canvas.center(), PointF::new(642.0, 5.0));
    }
}
