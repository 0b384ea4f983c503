//! App icon: background, accent disc, and the detailed cart, all centered.
//!
//! The splash icon is the same composition at a smaller size.

use super::{VariantSpec, background_canvas, paint_disc};
use crate::brand::BrandPalette;
use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::glyph::draw_cart;

pub(super) fn render(spec: &VariantSpec, palette: &BrandPalette) -> Result<Canvas, RenderError> {
    let mut canvas = background_canvas(spec, palette)?;
    let center = canvas.center();
    paint_disc(&mut canvas, center, spec.disc_radius(), palette.accent);
    draw_cart(
        &mut canvas,
        center,
        spec.glyph_size(),
        palette.foreground,
        spec.weight(),
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use crate::variant::{BackgroundMode, render_variant};
    use super::*;
    use crate::text::FixedMetricText;

    /// First and last index along a line whose pixel is exactly `rgb`.
    fn exact_run(pixels: impl Iterator<Item = [u8; 4]>, rgb: [u8; 3]) -> Option<(u32, u32)> {
        let mut run: Option<(u32, u32)> = None;
        for (i, p) in pixels.enumerate() {
            if p[..3] == rgb && p[3] == 255 {
                let i = i as u32;
                run = Some(run.map_or((i, i), |(first, _)| (first, i)));
            }
        }
        run
    }

    #[test]
    fn full_bleed_icon_disc_is_centered_with_expected_radius() {
        let palette = BrandPalette::OJA;
        let spec = VariantSpec::icon(1024, BackgroundMode::FullBleed);
        let img = render_variant(&spec, &palette, &FixedMetricText).unwrap();
        let accent = [palette.accent.red, palette.accent.green, palette.accent.blue];

        let (left, right) = exact_run((0..1024).map(|x| img.get_pixel(x, 512).0), accent)
            .expect("center row should cross the disc");
        let (top, bottom) = exact_run((0..1024).map(|y| img.get_pixel(512, y).0), accent)
            .expect("center column should cross the disc");

        for (lo, hi, axis) in [(left, right, "horizontal"), (top, bottom, "vertical")] {
            let radius = (hi - lo + 1) as f32 / 2.0;
            let center = (lo + hi + 1) as f32 / 2.0;
            assert!((radius - 384.0).abs() <= 2.0, "{axis} radius was {radius}");
            assert!((center - 512.0).abs() <= 2.0, "{axis} center was {center}");
        }
    }

    #[test]
    fn full_bleed_icon_is_opaque_at_corners() {
        let palette = BrandPalette::OJA;
        let spec = VariantSpec::icon(64, BackgroundMode::FullBleed);
        let img = render_variant(&spec, &palette, &FixedMetricText).unwrap();
        let bg = palette.background;
        for (x, y) in [(0, 0), (63, 0), (0, 63), (63, 63)] {
            assert_eq!(img.get_pixel(x, y).0, [bg.red, bg.green, bg.blue, 255]);
        }
    }

    #[test]
    fn glyph_is_painted_in_foreground() {
        let palette = BrandPalette::OJA;
        let spec = VariantSpec::icon(512, BackgroundMode::FullBleed);
        let img = render_variant(&spec, &palette, &FixedMetricText).unwrap();
        let white = img
            .pixels()
            .filter(|p| p.0 == [255, 255, 255, 255])
            .count();
        assert!(white > 500, "expected a visible white cart, found {white} px");
    }
}
