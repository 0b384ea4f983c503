//! Splash screen: the icon composition lifted above center, followed by a
//! centered title and tagline.

use tracing::debug;

use super::{VariantSpec, background_canvas, paint_disc};
use crate::brand::BrandPalette;
use crate::canvas::{Canvas, PointF};
use crate::error::RenderError;
use crate::glyph::draw_cart;
use crate::text::{TextEngine, TextStyle, centered_origin};

/// Upward shift of the glyph center, as a fraction of the height.
const LIFT_FRACTION: f32 = 0.05;
/// Gap between the disc and the title, as a fraction of the height.
const TITLE_GAP_FRACTION: f32 = 0.04;
const TITLE_PX_FRACTION: f32 = 0.045;
/// Distance from the title top to the tagline top, as a fraction of the height.
const TAGLINE_STEP_FRACTION: f32 = 0.06;
const TAGLINE_PX_FRACTION: f32 = 0.02;

/// Resolved positions of every splash element.
///
/// Text origins depend on the measured width of each line, so the layout is
/// resolved against the text engine that will draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SplashLayout {
    pub center: PointF,
    pub disc_radius: f32,
    pub glyph_size: f32,
    pub title_origin: PointF,
    pub title_style: TextStyle,
    pub tagline_origin: PointF,
    pub tagline_style: TextStyle,
}

impl SplashLayout {
    pub fn resolve(spec: &VariantSpec, text: &dyn TextEngine) -> Self {
        let size = spec.size();
        let (w, h) = (size.width.max(1) as f32, size.height.max(1) as f32);
        let center = PointF::new(w / 2.0, h / 2.0 - LIFT_FRACTION * h);
        let disc_radius = spec.disc_radius();

        let (title, tagline) = spec
            .text()
            .map_or(("", ""), |t| (t.title.as_str(), t.tagline.as_str()));

        let title_style = TextStyle::bold(TITLE_PX_FRACTION * h);
        let title_top = center.y + disc_radius + TITLE_GAP_FRACTION * h;
        let title_origin = centered_origin(text, title, title_style, center.x, title_top);

        let tagline_style = TextStyle::regular(TAGLINE_PX_FRACTION * h);
        let tagline_top = title_top + TAGLINE_STEP_FRACTION * h;
        let tagline_origin = centered_origin(text, tagline, tagline_style, center.x, tagline_top);

        Self {
            center,
            disc_radius,
            glyph_size: spec.glyph_size(),
            title_origin,
            title_style,
            tagline_origin,
            tagline_style,
        }
    }
}

pub(super) fn render(
    spec: &VariantSpec,
    palette: &BrandPalette,
    text: &dyn TextEngine,
) -> Result<Canvas, RenderError> {
    let mut canvas = background_canvas(spec, palette)?;
    let layout = SplashLayout::resolve(spec, text);

    paint_disc(&mut canvas, layout.center, layout.disc_radius, palette.accent);
    draw_cart(
        &mut canvas,
        layout.center,
        layout.glyph_size,
        palette.foreground,
        spec.weight(),
    );

    let Some(lines) = spec.text() else {
        return Ok(canvas);
    };
    debug!(engine = text.name(), title = %lines.title, "drawing splash text");
    text.draw(
        &mut canvas,
        &lines.title,
        layout.title_origin,
        layout.title_style,
        palette.foreground,
    );
    text.draw(
        &mut canvas,
        &lines.tagline,
        layout.tagline_origin,
        layout.tagline_style,
        palette.accent_light,
    );
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::{FixedMetricText, TextMetrics};
    use crate::variant::{SplashText, render_variant};
    use image::RgbaImage;

    struct StubText;

    impl TextEngine for StubText {
        fn name(&self) -> &str {
            "stub"
        }

        fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
            TextMetrics {
                width: text.len() as f32 * style.px * 0.5,
                height: style.px,
            }
        }

        fn draw(&self, _: &mut Canvas, _: &str, _: PointF, _: TextStyle, _: crate::brand::Color) {}
    }

    fn release_splash() -> VariantSpec {
        VariantSpec::splash(1284, 2778, SplashText::default())
    }

    /// Leftmost and rightmost columns in `rows` that differ from `bg`.
    fn ink_columns(img: &RgbaImage, rows: std::ops::Range<u32>, bg: [u8; 4]) -> (u32, u32) {
        let mut span = (u32::MAX, 0);
        for y in rows {
            for x in 0..img.width() {
                if img.get_pixel(x, y).0 != bg {
                    span = (span.0.min(x), span.1.max(x));
                }
            }
        }
        span
    }

    #[test]
    fn layout_matches_release_proportions() {
        let layout = SplashLayout::resolve(&release_splash(), &StubText);
        assert_eq!(layout.center.x, 642.0);
        assert!((layout.center.y - (1389.0 - 138.9)).abs() < 0.01);
        assert!((layout.disc_radius - 0.18 * 1284.0).abs() < 0.01);
        assert!((layout.glyph_size - 0.22 * 1284.0).abs() < 0.01);

        let title_top = layout.center.y + layout.disc_radius + 0.04 * 2778.0;
        assert!((layout.title_origin.y - title_top).abs() < 0.01);
        assert!((layout.tagline_origin.y - (title_top + 0.06 * 2778.0)).abs() < 0.01);
        assert!(layout.title_style.bold && !layout.tagline_style.bold);
    }

    #[test]
    fn text_lines_are_centered_on_measured_width() {
        let spec = release_splash();
        let layout = SplashLayout::resolve(&spec, &StubText);
        let lines = SplashText::default();
        for (text, origin, style) in [
            (&lines.title, layout.title_origin, layout.title_style),
            (&lines.tagline, layout.tagline_origin, layout.tagline_style),
        ] {
            let w = StubText.measure(text, style).width;
            assert!(
                (origin.x - (642.0 - w / 2.0)).abs() <= 1.0,
                "{text:?} starts at {} for width {w}",
                origin.x
            );
        }
    }

    #[test]
    fn drawn_title_ink_is_horizontally_centered() {
        let palette = BrandPalette::OJA;
        let spec = VariantSpec::splash(642, 1389, SplashText::default());
        let img = render_variant(&spec, &palette, &FixedMetricText).unwrap();
        let layout = SplashLayout::resolve(&spec, &FixedMetricText);
        let bg = palette.background;
        let bg = [bg.red, bg.green, bg.blue, 255];

        for (origin, style) in [
            (layout.title_origin, layout.title_style),
            (layout.tagline_origin, layout.tagline_style),
        ] {
            let height = FixedMetricText::cell_px(style) * 7;
            let top = origin.y.round() as u32;
            let (left, right) = ink_columns(&img, top..top + height, bg);
            let mid = (left + right + 1) as f32 / 2.0;
            assert!((mid - 321.0).abs() <= 1.0, "text band centered at {mid}");
        }
    }

    #[test]
    fn text_sits_below_the_disc() {
        let spec = release_splash();
        let layout = SplashLayout::resolve(&spec, &FixedMetricText);
        assert!(layout.title_origin.y > layout.center.y + layout.disc_radius);
        assert!(layout.tagline_origin.y > layout.title_origin.y);
        assert!(layout.tagline_origin.y + layout.tagline_style.px < 2778.0);
    }
}
