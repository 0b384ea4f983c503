//! The brand glyphs: the shopping cart, its compact favicon form, and the
//! single-letter mark used at the smallest sizes.
//!
//! Each draw function takes a center point and a size and paints onto an
//! existing canvas. Proportions live in [`geometry`]; this module only maps
//! resolved geometry onto drawing primitives.

pub mod geometry;

pub use geometry::{CartLayout, CompactCartLayout, StrokeProfile, StrokeWeight};

use tracing::trace;

use crate::brand::Color;
use crate::canvas::{BoundsF, Canvas, PointF};
use crate::shapes::{fill_ellipse, stroke_arc, stroke_line, stroke_polygon, stroke_rect};
use crate::text::{TextEngine, TextStyle};

/// Draws the full shopping cart centered on `center`.
///
/// Renders, back to front: the handle arc, the trapezoid basket, the
/// shelf line across the basket, the two legs, and the two wheels.
pub fn draw_cart(
    canvas: &mut Canvas,
    center: PointF,
    size: f32,
    color: Color,
    weight: StrokeWeight,
) {
    let layout = CartLayout::resolve(center, size, weight);
    trace!(?center, size, ?weight, major = layout.major_width, "drawing cart");

    stroke_arc(
        canvas,
        layout.handle_bounds,
        layout.handle_start_deg,
        layout.handle_sweep_deg,
        layout.major_width,
        color,
    );
    stroke_polygon(canvas, &layout.body, layout.major_width, color);

    let (shelf_from, shelf_to) = layout.shelf;
    stroke_line(canvas, shelf_from, shelf_to, layout.minor_width, color);
    for (from, to) in layout.legs {
        stroke_line(canvas, from, to, layout.minor_width, color);
    }

    let r = layout.wheel_radius;
    for wheel in layout.wheels {
        fill_ellipse(canvas, BoundsF::around(wheel, r, r), color);
    }
}

/// Draws the simplified favicon cart: a box outline over two dots.
pub fn draw_compact_cart(canvas: &mut Canvas, center: PointF, size: f32, color: Color) {
    let layout = CompactCartLayout::resolve(center, size);
    stroke_rect(canvas, layout.body, layout.stroke_width, color);
    let r = layout.wheel_radius;
    for wheel in layout.wheels {
        fill_ellipse(canvas, BoundsF::around(wheel, r, r), color);
    }
}

/// Draws a single bold letter centered on `center` on both axes.
pub fn draw_lettermark(
    canvas: &mut Canvas,
    center: PointF,
    px: f32,
    letter: char,
    color: Color,
    text: &dyn TextEngine,
) {
    let mut buf = [0u8; 4];
    let letter = letter.encode_utf8(&mut buf);
    let style = TextStyle::bold(px);
    let metrics = text.measure(letter, style);
    let origin = PointF::new(
        (center.x - metrics.width / 2.0).round(),
        (center.y - metrics.height / 2.0).round(),
    );
    text.draw(canvas, letter, origin, style, color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brand::WHITE;
    use crate::canvas::SizePx;
    use crate::text::FixedMetricText;
    use image::RgbaImage;

    fn ink_box(img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let mut found: Option<(u32, u32, u32, u32)> = None;
        for (x, y, p) in img.enumerate_pixels() {
            if p.0[3] == 0 {
                continue;
            }
            found = Some(match found {
                None => (x, y, x, y),
                Some((l, t, r, b)) => (l.min(x), t.min(y), r.max(x), b.max(y)),
            });
        }
        found
    }

    #[test]
    fn cart_ink_stays_within_layout_bounds() {
        let mut canvas = Canvas::transparent(SizePx::square(256)).unwrap();
        let center = canvas.center();
        draw_cart(&mut canvas, center, 100.0, WHITE, StrokeWeight::Regular);
        let img = canvas.into_image();

        let expected = CartLayout::resolve(center, 100.0, StrokeWeight::Regular).ink_bounds();
        let (l, t, r, b) = ink_box(&img).expect("cart should paint pixels");
        assert!(l as f32 >= expected.left.floor() - 1.0);
        assert!(t as f32 >= expected.top.floor() - 1.0);
        assert!(r as f32 <= expected.right.ceil() + 1.0);
        assert!(b as f32 <= expected.bottom.ceil() + 1.0);
    }

    #[test]
    fn cart_paints_wheels_below_basket() {
        let mut canvas = Canvas::transparent(SizePx::square(256)).unwrap();
        let center = canvas.center();
        draw_cart(&mut canvas, center, 120.0, WHITE, StrokeWeight::Bold);
        let img = canvas.into_image();

        let layout = CartLayout::resolve(center, 120.0, StrokeWeight::Bold);
        for wheel in layout.wheels {
            let px = img.get_pixel(wheel.x.round() as u32, wheel.y.round() as u32);
            assert_eq!(px.0[3], 255, "wheel center should be fully painted");
        }
        // Basket interior is hollow.
        let inside = img.get_pixel(center.x as u32, (center.y - 0.15 * 120.0) as u32);
        assert_eq!(inside.0[3], 0, "basket interior should stay transparent");
    }

    #[test]
    fn tiny_cart_still_paints() {
        let mut canvas = Canvas::transparent(SizePx::square(16)).unwrap();
        let center = canvas.center();
        draw_cart(&mut canvas, center, 6.0, WHITE, StrokeWeight::Bold);
        assert!(ink_box(&canvas.into_image()).is_some());
    }

    #[test]
    fn compact_cart_outline_and_wheels() {
        let mut canvas = Canvas::transparent(SizePx::square(48)).unwrap();
        let center = canvas.center();
        draw_compact_cart(&mut canvas, center, 21.6, WHITE);
        let img = canvas.into_image();

        let layout = CompactCartLayout::resolve(center, 21.6);
        let (l, t, r, b) = ink_box(&img).unwrap();
        let ink = layout.ink_bounds();
        assert!(l as f32 >= ink.left.floor() - 1.0 && r as f32 <= ink.right.ceil() + 1.0);
        assert!(t as f32 >= ink.top.floor() - 1.0 && b as f32 <= ink.bottom.ceil() + 1.0);
    }

    #[test]
    fn lettermark_is_centered() {
        let mut canvas = Canvas::transparent(SizePx::square(24)).unwrap();
        let center = canvas.center();
        draw_lettermark(&mut canvas, center, 18.0, 'O', WHITE, &FixedMetricText);
        let (l, t, r, b) = ink_box(&canvas.into_image()).unwrap();

        let mid_x = (l + r + 1) as f32 / 2.0;
        let mid_y = (t + b + 1) as f32 / 2.0;
        assert!((mid_x - center.x).abs() <= 1.0, "horizontal center {mid_x}");
        assert!((mid_y - center.y).abs() <= 1.0, "vertical center {mid_y}");
    }
}
