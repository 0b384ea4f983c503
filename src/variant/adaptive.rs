//! Adaptive-icon foreground.
//!
//! The launcher supplies its own background and mask, so only the disc and
//! cart are painted, scaled down to stay inside the mask's safe zone.
//! [`VariantSpec::background`] is ignored.

use tracing::debug;

use super::{BackgroundMode, VariantSpec, paint_disc};
use crate::brand::BrandPalette;
use crate::canvas::Canvas;
use crate::error::RenderError;
use crate::glyph::draw_cart;

pub(super) fn render(spec: &VariantSpec, palette: &BrandPalette) -> Result<Canvas, RenderError> {
    if spec.background() != BackgroundMode::Transparent {
        debug!(background = ?spec.background(), "adaptive foreground is always transparent");
    }
    let mut canvas = Canvas::transparent(spec.size())?;
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
