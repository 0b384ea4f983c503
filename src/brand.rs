//! The fixed brand palette.

use palette::Srgba;

/// An 8-bit sRGB color with straight alpha.
pub type Color = Srgba<u8>;

/// Stone-900 backdrop, `#1C1917`.
pub const DARK_BACKGROUND: Color = Color::new(28, 25, 23, 255);
/// Glyph and title color, `#FFFFFF`.
pub const WHITE: Color = Color::new(255, 255, 255, 255);
/// Burnt orange accent disc, `#E05E1B`.
pub const BURNT_ORANGE: Color = Color::new(224, 94, 27, 255);
/// Lighter orange used for secondary text, `#F59E64`.
pub const LIGHT_ORANGE: Color = Color::new(245, 158, 100, 255);

/// The four colors every asset is drawn with.
///
/// Generators receive the palette by reference instead of reading module
/// state, which keeps every render a pure function of its inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrandPalette {
    pub background: Color,
    pub foreground: Color,
    pub accent: Color,
    pub accent_light: Color,
}

impl BrandPalette {
    /// The Oja POS palette.
    pub const OJA: Self = Self {
        background: DARK_BACKGROUND,
        foreground: WHITE,
        accent: BURNT_ORANGE,
        accent_light: LIGHT_ORANGE,
    };
}

impl Default for BrandPalette {
    fn default() -> Self {
        Self::OJA
    }
}

/// Converts a palette color into the rasterizer's color type.
pub(crate) fn to_skia(color: Color) -> resvg::tiny_skia::Color {
    resvg::tiny_skia::Color::from_rgba8(color.red, color.green, color.blue, color.alpha)
}

/// Formats a color as `#rrggbb`, the notation used in SVG markup.
pub(crate) fn to_hex(color: Color) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}
