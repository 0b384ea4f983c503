//! Favicon: an accent disc nearly filling the canvas, with a glyph whose
//! detail drops as the size shrinks.

use tracing::debug;

use super::{VariantSpec, background_canvas, paint_disc};
use crate::brand::BrandPalette;
use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::glyph::{draw_cart, draw_compact_cart, draw_lettermark};
use crate::text::TextEngine;

/// Largest side, in pixels, that renders the lettermark.
pub const LETTERMARK_MAX_PX: u32 = 24;
/// Largest side, in pixels, that renders the compact cart.
pub const COMPACT_GLYPH_MAX_PX: u32 = 48;

/// Letter size of the lettermark as a fraction of the side.
const LETTERMARK_FRACTION: f32 = 0.75;
const LETTERMARK: char = 'O';

/// How much of the brand glyph a favicon can afford to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaviconDetail {
    /// A single bold letter.
    Lettermark,
    /// A box outline over two wheel dots.
    CompactCart,
    /// The detailed cart in bold strokes.
    FullCart,
}

/// Upper size bound (inclusive) for each reduced detail level, smallest first.
const DETAIL_TABLE: [(u32, FaviconDetail); 2] = [
    (LETTERMARK_MAX_PX, FaviconDetail::Lettermark),
    (COMPACT_GLYPH_MAX_PX, FaviconDetail::CompactCart),
];

impl FaviconDetail {
    /// Picks the detail level for a favicon whose shorter side is `side` px.
    pub fn for_size(side: u32) -> Self {
        DETAIL_TABLE
            .iter()
            .find(|(max, _)| side <= *max)
            .map_or(FaviconDetail::FullCart, |(_, detail)| *detail)
    }
}

pub(super) fn render(
    spec: &VariantSpec,
    palette: &BrandPalette,
    text: &dyn TextEngine,
) -> Result<Canvas, RenderError> {
    let mut canvas = background_canvas(spec, palette)?;
    let center = canvas.center();
    paint_disc(&mut canvas, center, spec.disc_radius(), palette.accent);

    let side = spec.size().min_side();
    let detail = FaviconDetail::for_size(side);
    debug!(side, ?detail, "favicon detail");

    match detail {
        FaviconDetail::Lettermark => draw_lettermark(
            &mut canvas,
            center,
            side.max(1) as f32 * LETTERMARK_FRACTION,
            LETTERMARK,
            palette.foreground,
            text,
        ),
        FaviconDetail::CompactCart => {
            draw_compact_cart(&mut canvas, center, spec.glyph_size(), palette.foreground)
        }
        FaviconDetail::FullCart => draw_cart(
            &mut canvas,
            center,
            spec.glyph_size(),
            palette.foreground,
            spec.weight(),
        ),
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedMetricText;
    use crate::variant::render_variant;

    #[test]
    fn detail_thresholds() {
        let cases = [
            (16, FaviconDetail::Lettermark),
            (24, FaviconDetail::Lettermark),
            (25, FaviconDetail::CompactCart),
            (32, FaviconDetail::CompactCart),
            (48, FaviconDetail::CompactCart),
            (49, FaviconDetail::FullCart),
            (64, FaviconDetail::FullCart),
            (128, FaviconDetail::FullCart),
            (1024, FaviconDetail::FullCart),
        ];
        for (side, expected) in cases {
            assert_eq!(FaviconDetail::for_size(side), expected, "favicon at {side}px");
        }
    }

    #[test]
    fn favicon_corners_are_transparent() {
        for side in [16, 32, 48, 64, 128] {
            let spec = VariantSpec::favicon(side);
            let img = render_variant(&spec, &BrandPalette::OJA, &FixedMetricText).unwrap();
            assert_eq!((img.width(), img.height()), (side, side));
            assert_eq!(img.get_pixel(0, 0).0[3], 0, "{side}px corner should be clear");
        }
    }

    #[test]
    fn favicon_glyph_is_visible_at_every_threshold() {
        let palette = BrandPalette::OJA;
        for side in [16, 32, 48, 64, 128] {
            let spec = VariantSpec::favicon(side);
            let img = render_variant(&spec, &palette, &FixedMetricText).unwrap();
            let white = img.pixels().filter(|p| p.0 == [255, 255, 255, 255]).count();
            assert!(white > 0, "{side}px favicon shows no glyph");
        }
    }

    #[test]
    fn disc_nearly_fills_canvas() {
        let palette = BrandPalette::OJA;
        let img = render_variant(&VariantSpec::favicon(128), &palette, &FixedMetricText).unwrap();
        let accent = [palette.accent.red, palette.accent.green, palette.accent.blue, 255];
        // radius 60.8 leaves a 3.2px margin
        assert_eq!(img.get_pixel(5, 64).0, accent);
        assert_eq!(img.get_pixel(1, 64).0[3], 0);
    }
}
