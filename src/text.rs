//! Text measurement and drawing.
//!
//! Text is a capability with two implementations:
//!
//! - [`SystemFontText`] shapes text with a scalable font from the host's font
//!   database, rendered through resvg.
//! - [`FixedMetricText`] paints a built-in 5x7 bitmap face with fixed advances.
//!   It needs no font files and is the fallback when no scalable font resolves.
//!
//! [`resolve_text_engine`] picks one at call time. Layout code always asks the
//! resolved engine for widths, so centering holds whichever face is in use.

use std::path::PathBuf;
use std::sync::Arc;

use resvg::tiny_skia::Transform;
use resvg::usvg::fontdb::{Database, Family, Query, Weight};
use resvg::usvg::{Options, Tree};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::brand::{Color, to_hex};
use crate::canvas::{BoundsF, Canvas, PointF};
use crate::shapes::fill_box;

// ============================================================================
// TextEngine
// ============================================================================

/// Size and weight of a run of text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    /// Font size in pixels.
    pub px: f32,
    pub bold: bool,
}

impl TextStyle {
    pub fn regular(px: f32) -> Self {
        Self { px, bold: false }
    }

    pub fn bold(px: f32) -> Self {
        Self { px, bold: true }
    }
}

/// The layout box of a measured run of text.
///
/// For scalable fonts this is the font's line box, which is wider than the
/// painted ink by the side bearings and taller by the ascent and descent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f32,
    pub height: f32,
}

/// Measures and paints single lines of text.
///
/// `draw` places the top-left corner of the run's layout box at `origin`, so
/// a run drawn at `x = center - measure().width / 2` is centered on `center`.
pub trait TextEngine {
    /// A short description of the face in use, for logging.
    fn name(&self) -> &str;

    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics;

    fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        origin: PointF,
        style: TextStyle,
        color: Color,
    );
}

/// Origin that horizontally centers `text` on `center_x`, with its layout top at `top`.
///
/// The x coordinate is rounded to a whole pixel.
pub fn centered_origin(
    engine: &dyn TextEngine,
    text: &str,
    style: TextStyle,
    center_x: f32,
    top: f32,
) -> PointF {
    let metrics = engine.measure(text, style);
    PointF::new((center_x - metrics.width / 2.0).round(), top)
}

// ============================================================================
// Font Settings
// ============================================================================

/// Which fonts to try before falling back to the fixed-metric face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FontSettings {
    /// Family names, in order of preference.
    pub families: Vec<String>,

    /// Extra font files to load before querying.
    pub files: Vec<PathBuf>,

    /// Whether to load the host's installed fonts.
    pub system_fonts: bool,
}

impl Default for FontSettings {
    fn default() -> Self {
        Self {
            families: ["Helvetica", "Arial", "DejaVu Sans", "Liberation Sans"]
                .into_iter()
                .map(String::from)
                .collect(),
            files: Vec::new(),
            system_fonts: true,
        }
    }
}

impl FontSettings {
    /// Settings that never resolve a scalable font.
    pub fn fixed_metric_only() -> Self {
        Self {
            families: Vec::new(),
            files: Vec::new(),
            system_fonts: false,
        }
    }
}

/// Resolves the best available text engine for `settings`.
///
/// Tries each preferred family, then the database's generic sans-serif
/// family. Falls back to [`FixedMetricText`] when none resolves.
pub fn resolve_text_engine(settings: &FontSettings) -> Box<dyn TextEngine> {
    let mut db = Database::new();
    if settings.system_fonts {
        db.load_system_fonts();
    }
    for file in &settings.files {
        if let Err(err) = db.load_font_file(file) {
            warn!(path = %file.display(), %err, "could not load font file");
        }
    }

    let mut candidates: Vec<Family> = settings
        .families
        .iter()
        .map(|name| Family::Name(name.as_str()))
        .collect();
    candidates.push(Family::SansSerif);

    for family in &candidates {
        let query = Query {
            families: std::slice::from_ref(family),
            weight: Weight::BOLD,
            ..Query::default()
        };
        let Some(id) = db.query(&query) else {
            continue;
        };
        let Some(name) = db
            .face(id)
            .and_then(|face| face.families.first())
            .map(|(name, _)| name.clone())
        else {
            continue;
        };
        debug!(family = %name, faces = db.len(), "resolved scalable font");
        return Box::new(SystemFontText::new(Arc::new(db), name));
    }

    warn!("no scalable font available; using fixed-metric fallback");
    Box::new(FixedMetricText)
}

// ============================================================================
// SystemFontText
// ============================================================================

/// Text shaped with a scalable font and rendered by resvg.
///
/// Each run is laid out as a one-line SVG document; its layout box
/// drives both [`measure`](TextEngine::measure) and the placement in
/// [`draw`](TextEngine::draw). Runs the font cannot shape fall back to
/// [`FixedMetricText`] for both operations.
pub struct SystemFontText {
    fontdb: Arc<Database>,
    family: String,
}

impl SystemFontText {
    pub fn new(fontdb: Arc<Database>, family: impl Into<String>) -> Self {
        Self {
            fontdb,
            family: family.into(),
        }
    }

    /// Parses the run into a tree and returns it with the run's layout box.
    fn layout(&self, text: &str, style: TextStyle, color: Color) -> Option<(Tree, BoundsF)> {
        let px = style.px.max(1.0);
        let chars = text.chars().count().max(1) as f32;
        // resvg does not clip text to the root size, so the document only needs
        // positive dimensions; the width is a generous guess, never a limit.
        let svg = format!(
            concat!(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
                r#"<text x="{pad}" y="{baseline}" font-family="{family}" font-size="{px}" "#,
                r#"font-weight="{weight}" fill="{fill}">{text}</text></svg>"#,
            ),
            w = px * (chars + 2.0),
            h = px * 2.0,
            pad = px / 2.0,
            baseline = px * 1.5,
            family = escape_xml(&self.family),
            weight = if style.bold { 700 } else { 400 },
            fill = to_hex(color),
            px = px,
            text = escape_xml(text),
        );

        let mut opts = Options::default();
        opts.fontdb = Arc::clone(&self.fontdb);
        let tree = Tree::from_str(&svg, &opts).ok()?;

        let node = tree.root().children().first()?;
        let bbox = node.abs_bounding_box();
        let bounds = BoundsF::new(bbox.left(), bbox.top(), bbox.right(), bbox.bottom());
        Some((tree, bounds))
    }
}

impl TextEngine for SystemFontText {
    fn name(&self) -> &str {
        &self.family
    }

    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        match self.layout(text, style, Color::new(0, 0, 0, 255)) {
            Some((_, bounds)) => TextMetrics {
                width: bounds.width(),
                height: bounds.height(),
            },
            None => FixedMetricText.measure(text, style),
        }
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        origin: PointF,
        style: TextStyle,
        color: Color,
    ) {
        let Some((tree, bounds)) = self.layout(text, style, color) else {
            debug!(text, family = %self.family, "font could not shape run; drawing fixed-metric");
            FixedMetricText.draw(canvas, text, origin, style, color);
            return;
        };
        let transform = Transform::from_translate(origin.x - bounds.left, origin.y - bounds.top);
        resvg::render(&tree, transform, &mut canvas.pixmap_mut().as_mut());
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

// ============================================================================
// FixedMetricText
// ============================================================================

const CELL_COLUMNS: u32 = 5;
const CELL_ROWS: u32 = 7;
/// Horizontal advance per character, in cells (glyph plus one blank column).
const ADVANCE_COLUMNS: u32 = CELL_COLUMNS + 1;
/// Font pixels per bitmap cell.
const PX_PER_CELL: f32 = 9.0;

/// A built-in 5x7 bitmap face with a fixed advance for every character.
///
/// Cells are scaled by a whole number so strokes stay crisp. Lowercase
/// letters render as capitals; unknown characters render as a hollow box.
/// `bold` has no effect.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedMetricText;

impl FixedMetricText {
    /// Pixel size of one bitmap cell for `style`.
    pub fn cell_px(style: TextStyle) -> u32 {
        ((style.px / PX_PER_CELL).floor() as u32).max(1)
    }
}

impl TextEngine for FixedMetricText {
    fn name(&self) -> &str {
        "fixed-metric 5x7"
    }

    fn measure(&self, text: &str, style: TextStyle) -> TextMetrics {
        // f32 throughout: long runs at large sizes would overflow u32.
        if text.is_empty() {
            return TextMetrics::default();
        }
        let cell = Self::cell_px(style) as f32;
        let chars = text.chars().count() as f32;
        TextMetrics {
            width: (chars * ADVANCE_COLUMNS as f32 - 1.0) * cell,
            height: CELL_ROWS as f32 * cell,
        }
    }

    fn draw(
        &self,
        canvas: &mut Canvas,
        text: &str,
        origin: PointF,
        style: TextStyle,
        color: Color,
    ) {
        let cell = Self::cell_px(style) as f32;
        let x0 = origin.x.round();
        let y0 = origin.y.round();

        for (i, c) in text.chars().enumerate() {
            let left = x0 + i as f32 * ADVANCE_COLUMNS as f32 * cell;
            for (row, bits) in glyph_rows(c).iter().enumerate() {
                for col in 0..CELL_COLUMNS {
                    if bits & (1 << (CELL_COLUMNS - 1 - col)) == 0 {
                        continue;
                    }
                    let x = left + col as f32 * cell;
                    let y = y0 + row as f32 * cell;
                    fill_box(canvas, BoundsF::new(x, y, x + cell, y + cell), color);
                }
            }
        }
    }
}

/// Rows of the 5x7 bitmap for `c`, most significant of the low five bits
/// leftmost.
fn glyph_rows(c: char) -> [u8; 7] {
    match c.to_ascii_uppercase() {
        ' ' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
        'A' => [0x0E, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1E],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '?' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '\'' => [0x04, 0x04, 0x08, 0x00, 0x00, 0x00, 0x00],
        '&' => [0x0C, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0D],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        _ => [0x1F, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1F],
    }
}

// ============================================================================
// Tests
// ============================================================================
