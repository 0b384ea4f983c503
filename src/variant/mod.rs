//! Variant generators.
//!
//! A [`VariantSpec`] fully describes one output image: its kind, pixel size,
//! background treatment, the disc and glyph proportions, and any splash text.
//! [`render_variant`] turns a spec into pixels. Rendering is a pure function
//! of the variant, the palette and the text engine: the same inputs always
//! produce byte-identical images.
//!
//! Every variant composes its layers in the same order:
//!
//! ```text
//! background ─► accent disc ─► glyph ─► text
//! ```

mod adaptive;
mod favicon;
mod icon;
mod splash;

pub use favicon::{COMPACT_GLYPH_MAX_PX, FaviconDetail, LETTERMARK_MAX_PX};
pub use splash::SplashLayout;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::brand::{BrandPalette, Color};
use crate::canvas::{BoundsF, Canvas, PointF, RectPx, SizePx};
use crate::error::RenderError;
use crate::glyph::StrokeWeight;
use crate::shapes::{fill_ellipse, fill_rounded_rect};
use crate::text::TextEngine;

// ============================================================================
// Proportions
// ============================================================================

/// Accent disc radius of the app icon, as a fraction of its side.
pub const ICON_DISC_FRACTION: f32 = 0.375;
/// Cart size of the app icon, as a fraction of its side.
pub const ICON_GLYPH_FRACTION: f32 = 0.40;
/// Padding around the rounded-inset background, as a fraction of the side.
pub const INSET_PAD_FRACTION: f32 = 0.02;
/// Corner radius of the rounded-inset background, as a fraction of the side.
pub const INSET_CORNER_FRACTION: f32 = 0.18;

pub const ADAPTIVE_DISC_FRACTION: f32 = 0.28;
pub const ADAPTIVE_GLYPH_FRACTION: f32 = 0.32;

/// Gap between the favicon disc and the canvas edge, as a fraction of the side.
pub const FAVICON_PAD_FRACTION: f32 = 0.025;
pub const FAVICON_GLYPH_FRACTION: f32 = 0.45;

pub const SPLASH_DISC_FRACTION: f32 = 0.18;
pub const SPLASH_GLYPH_FRACTION: f32 = 0.22;

// ============================================================================
// Spec Types
// ============================================================================

/// The four kinds of brand asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    /// App icon with an opaque background.
    Icon,
    /// Android adaptive-icon foreground layer, transparent outside the disc.
    AdaptiveForeground,
    /// Small browser icon that simplifies its glyph with size.
    Favicon,
    /// Full-screen launch image with title and tagline.
    Splash,
}

/// How the area behind the accent disc is filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackgroundMode {
    /// A rounded rectangle inset from the canvas edges.
    RoundedInset,
    /// Solid edge to edge.
    #[default]
    FullBleed,
    /// Nothing; only the disc and glyph are painted.
    Transparent,
}

/// The two text lines drawn under the splash glyph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SplashText {
    pub title: String,
    pub tagline: String,
}

impl SplashText {
    pub fn new(title: impl Into<String>, tagline: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            tagline: tagline.into(),
        }
    }
}

impl Default for SplashText {
    fn default() -> Self {
        Self::new("Oja POS", "The POS Built for Nigerian Shops")
    }
}

/// Everything needed to render one asset.
///
/// Construct through [`icon`](Self::icon), [`adaptive`](Self::adaptive),
/// [`favicon`](Self::favicon) or [`splash`](Self::splash), which fill in the
/// brand proportions for each kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantSpec {
    kind: VariantKind,
    width: u32,
    height: u32,
    background: BackgroundMode,
    disc_fraction: f32,
    glyph_fraction: f32,
    #[serde(default)]
    weight: StrokeWeight,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<SplashText>,
}

impl VariantSpec {
    /// A square app icon.
    pub fn icon(size: u32, background: BackgroundMode) -> Self {
        Self {
            kind: VariantKind::Icon,
            width: size,
            height: size,
            background,
            disc_fraction: ICON_DISC_FRACTION,
            glyph_fraction: ICON_GLYPH_FRACTION,
            weight: StrokeWeight::Regular,
            text: None,
        }
    }

    /// A square adaptive-icon foreground.
    pub fn adaptive(size: u32) -> Self {
        Self {
            kind: VariantKind::AdaptiveForeground,
            width: size,
            height: size,
            background: BackgroundMode::Transparent,
            disc_fraction: ADAPTIVE_DISC_FRACTION,
            glyph_fraction: ADAPTIVE_GLYPH_FRACTION,
            weight: StrokeWeight::Regular,
            text: None,
        }
    }

    /// A square favicon.
    pub fn favicon(size: u32) -> Self {
        Self {
            kind: VariantKind::Favicon,
            width: size,
            height: size,
            background: BackgroundMode::Transparent,
            disc_fraction: 0.5 - FAVICON_PAD_FRACTION,
            glyph_fraction: FAVICON_GLYPH_FRACTION,
            weight: StrokeWeight::Bold,
            text: None,
        }
    }

    /// A full splash screen.
    pub fn splash(width: u32, height: u32, text: SplashText) -> Self {
        Self {
            kind: VariantKind::Splash,
            width,
            height,
            background: BackgroundMode::FullBleed,
            disc_fraction: SPLASH_DISC_FRACTION,
            glyph_fraction: SPLASH_GLYPH_FRACTION,
            weight: StrokeWeight::Regular,
            text: Some(text),
        }
    }

    pub fn kind(&self) -> VariantKind {
        self.kind
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }

    pub fn background(&self) -> BackgroundMode {
        self.background
    }

    /// Disc radius as a fraction of the shorter side.
    pub fn disc_fraction(&self) -> f32 {
        self.disc_fraction
    }

    /// Glyph size as a fraction of the shorter side.
    pub fn glyph_fraction(&self) -> f32 {
        self.glyph_fraction
    }

    pub fn weight(&self) -> StrokeWeight {
        self.weight
    }

    pub fn text(&self) -> Option<&SplashText> {
        self.text.as_ref()
    }

    /// The shorter side, never less than one pixel.
    fn min_side(&self) -> f32 {
        self.size().min_side().max(1) as f32
    }

    fn disc_radius(&self) -> f32 {
        self.disc_fraction * self.min_side()
    }

    fn glyph_size(&self) -> f32 {
        self.glyph_fraction * self.min_side()
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Renders `spec` into a straight-alpha image of exactly its declared size.
///
/// Zero dimensions are clamped to one pixel.
pub fn render_variant(
    spec: &VariantSpec,
    palette: &BrandPalette,
    text: &dyn TextEngine,
) -> Result<RgbaImage, RenderError> {
    debug!(
        kind = ?spec.kind,
        width = spec.width,
        height = spec.height,
        background = ?spec.background,
        "rendering variant"
    );
    let canvas = match spec.kind {
        VariantKind::Icon => icon::render(spec, palette)?,
        VariantKind::AdaptiveForeground => adaptive::render(spec, palette)?,
        VariantKind::Favicon => favicon::render(spec, palette, text)?,
        VariantKind::Splash => splash::render(spec, palette, text)?,
    };
    Ok(canvas.into_image())
}

/// Allocates the canvas and paints the background layer.
fn background_canvas(spec: &VariantSpec, palette: &BrandPalette) -> Result<Canvas, RenderError> {
    let size = spec.size();
    match spec.background {
        BackgroundMode::FullBleed => Canvas::solid(size, palette.background),
        BackgroundMode::Transparent => Canvas::transparent(size),
        BackgroundMode::RoundedInset => {
            let mut canvas = Canvas::transparent(size)?;
            let side = spec.min_side();
            let pad = (side * INSET_PAD_FRACTION).round() as u32;
            let radius = (side * INSET_CORNER_FRACTION).round() as u32;
            let rect = RectPx::from_size(canvas.size()).inset(pad);
            fill_rounded_rect(&mut canvas, rect, radius, palette.background);
            Ok(canvas)
        }
    }
}

/// Paints the accent disc centered on `center`.
fn paint_disc(canvas: &mut Canvas, center: PointF, radius: f32, color: Color) {
    fill_ellipse(canvas, BoundsF::around(center, radius, radius), color);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedMetricText;

    fn all_kinds(scale: u32) -> Vec<VariantSpec> {
        vec![
            VariantSpec::icon(128 * scale, BackgroundMode::FullBleed),
            VariantSpec::icon(128 * scale, BackgroundMode::RoundedInset),
            VariantSpec::adaptive(128 * scale),
            VariantSpec::favicon(16 * scale),
            VariantSpec::splash(160 * scale, 346 * scale, SplashText::default()),
        ]
    }

    #[test]
    fn output_has_exact_dimensions() {
        let palette = BrandPalette::OJA;
        for spec in all_kinds(1) {
            let img = render_variant(&spec, &palette, &FixedMetricText).unwrap();
            assert_eq!(
                (img.width(), img.height()),
                (spec.size().width, spec.size().height),
                "{:?} rendered at wrong size",
                spec.kind()
            );
        }
    }

    #[test]
    fn repeated_renders_are_byte_identical() {
        let palette = BrandPalette::OJA;
        for spec in all_kinds(2) {
            let first = render_variant(&spec, &palette, &FixedMetricText).unwrap();
            let second = render_variant(&spec, &palette, &FixedMetricText).unwrap();
            assert!(
                first.as_raw() == second.as_raw(),
                "{:?} render is not deterministic",
                spec.kind()
            );
        }
    }

    #[test]
    fn zero_size_clamps_to_one_pixel() {
        let spec = VariantSpec::icon(0, BackgroundMode::FullBleed);
        let img = render_variant(&spec, &BrandPalette::OJA, &FixedMetricText).unwrap();
        assert_eq!((img.width(), img.height()), (1, 1));
    }

    #[test]
    fn rounded_inset_leaves_corners_clear() {
        let spec = VariantSpec::icon(256, BackgroundMode::RoundedInset);
        let img = render_variant(&spec, &BrandPalette::OJA, &FixedMetricText).unwrap();
        assert_eq!(img.get_pixel(0, 0).0[3], 0);
        assert_eq!(img.get_pixel(255, 255).0[3], 0);
        // Edge midpoints sit inside the inset background.
        let bg = BrandPalette::OJA.background;
        let mid_left = img.get_pixel(10, 128).0;
        assert_eq!(mid_left, [bg.red, bg.green, bg.blue, 255]);
    }

    #[test]
    fn constructors_fill_brand_proportions() {
        let fav = VariantSpec::favicon(48);
        assert!((fav.disc_fraction() * 48.0 - (24.0 - 0.025 * 48.0)).abs() < 1e-4);
        assert_eq!(fav.weight(), StrokeWeight::Bold);
        assert_eq!(fav.background(), BackgroundMode::Transparent);

        let splash = VariantSpec::splash(1284, 2778, SplashText::default());
        assert_eq!(splash.text().map(|t| t.title.as_str()), Some("Oja POS"));
        assert!((splash.disc_radius() - 0.18 * 1284.0).abs() < 1e-3);
    }

    #[test]
    fn spec_json_uses_camel_case() {
        let spec = VariantSpec::adaptive(1024);
        let json = serde_json::to_string(&spec).unwrap();
        assert!(json.contains("\"kind\":\"adaptive-foreground\""));
        assert!(json.contains("\"discFraction\""));
        assert!(!json.contains("\"text\""), "icon specs carry no text");

        let parsed: VariantSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, spec);
    }
}
