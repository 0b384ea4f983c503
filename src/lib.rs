//! oja-icon-renderer: brand asset generator for Oja POS
//!
//! This crate draws the Oja POS shopping-cart mark from proportional
//! geometry and renders it into the app's raster assets: the app icon, the
//! adaptive-icon foreground, the favicon, and the splash screens.
//!
//! Every dimension is a fraction of the canvas, so one recipe produces the
//! same picture at any resolution. Stroke widths are floor-clamped so small
//! renders stay legible, and the favicon swaps in simpler glyphs below
//! [`COMPACT_GLYPH_MAX_PX`].
//!
//! # Example
//!
//! ```
//! use oja_icon_renderer::{
//!     BackgroundMode, BrandPalette, FixedMetricText, VariantSpec, render_variant,
//! };
//!
//! let spec = VariantSpec::icon(256, BackgroundMode::FullBleed);
//! let image = render_variant(&spec, &BrandPalette::OJA, &FixedMetricText).unwrap();
//! assert_eq!(image.dimensions(), (256, 256));
//! ```
//!
//! # Generating the Release Set
//!
//! [`AssetPipeline`] renders a list of artifacts and hands each image to an
//! [`ArtifactSink`]. An [`AssetManifest`] describes the same list as JSON:
//!
//! ```no_run
//! use oja_icon_renderer::{AssetManifest, BrandPalette, PngDirectory, resolve_text_engine};
//!
//! let manifest = AssetManifest::default();
//! let text = resolve_text_engine(&manifest.fonts);
//! let mut sink = PngDirectory::new(&manifest.output_dir);
//!
//! let report = manifest.pipeline().run(&BrandPalette::OJA, text.as_ref(), &mut sink);
//! for failure in report.failures() {
//!     eprintln!("{} failed", failure.file_name);
//! }
//! ```

mod brand;
mod canvas;
mod error;
pub mod glyph;
mod manifest;
mod pipeline;
pub mod shapes;
mod text;
mod variant;

pub use brand::{BURNT_ORANGE, BrandPalette, Color, DARK_BACKGROUND, LIGHT_ORANGE, WHITE};
pub use canvas::{BoundsF, Canvas, PointF, RectPx, SizePx};
pub use error::RenderError;
pub use glyph::{StrokeWeight, draw_cart, draw_compact_cart, draw_lettermark};
pub use manifest::AssetManifest;
pub use pipeline::{
    ArtifactEntry, ArtifactOutcome, ArtifactSink, AssetPipeline, PipelineReport, PngDirectory,
    release_entries,
};
pub use text::{
    FixedMetricText, FontSettings, SystemFontText, TextEngine, TextMetrics, TextStyle,
    centered_origin, resolve_text_engine,
};
pub use variant::{
    BackgroundMode, COMPACT_GLYPH_MAX_PX, FaviconDetail, LETTERMARK_MAX_PX, SplashLayout,
    SplashText, VariantKind, VariantSpec, render_variant,
};
