//! Asset pipeline: renders an ordered list of variants and saves each one.
//!
//! Artifacts are independent. A failure to render or save one is logged and
//! recorded in the [`PipelineReport`], and the remaining artifacts are still
//! produced.

use std::fs;
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::brand::BrandPalette;
use crate::error::RenderError;
use crate::text::TextEngine;
use crate::variant::{BackgroundMode, SplashText, VariantSpec, render_variant};

// ============================================================================
// Artifact Sink
// ============================================================================

/// Destination for rendered images.
pub trait ArtifactSink {
    /// Stores `image` under `file_name`, returning where it ended up.
    fn save(&mut self, file_name: &str, image: &RgbaImage) -> Result<PathBuf, RenderError>;
}

/// Writes PNG files into a directory, creating it on first save.
#[derive(Debug, Clone)]
pub struct PngDirectory {
    root: PathBuf,
}

impl PngDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArtifactSink for PngDirectory {
    fn save(&mut self, file_name: &str, image: &RgbaImage) -> Result<PathBuf, RenderError> {
        fs::create_dir_all(&self.root).map_err(|e| RenderError::io(&self.root, e))?;
        let path = self.root.join(file_name);
        match image.save_with_format(&path, ImageFormat::Png) {
            Ok(()) => Ok(path),
            Err(ImageError::IoError(source)) => Err(RenderError::Io { path, source }),
            Err(source) => Err(RenderError::Encode { path, source }),
        }
    }
}

// ============================================================================
// Entries and Outcomes
// ============================================================================

/// One output file and the variant rendered into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtifactEntry {
    pub file_name: String,
    pub variant: VariantSpec,
}

impl ArtifactEntry {
    pub fn new(file_name: impl Into<String>, variant: VariantSpec) -> Self {
        Self {
            file_name: file_name.into(),
            variant,
        }
    }
}

/// What happened to one artifact.
#[derive(Debug)]
pub struct ArtifactOutcome {
    pub file_name: String,
    pub result: Result<PathBuf, RenderError>,
}

impl ArtifactOutcome {
    pub fn is_saved(&self) -> bool {
        self.result.is_ok()
    }
}

/// Per-artifact results of a pipeline run, in entry order.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub outcomes: Vec<ArtifactOutcome>,
}

impl PipelineReport {
    /// True when every artifact was saved.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(ArtifactOutcome::is_saved)
    }

    pub fn failures(&self) -> impl Iterator<Item = &ArtifactOutcome> {
        self.outcomes.iter().filter(|o| !o.is_saved())
    }

    /// Paths of the artifacts that were written.
    pub fn saved(&self) -> impl Iterator<Item = &Path> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok().map(PathBuf::as_path))
    }
}

// ============================================================================
// AssetPipeline
// ============================================================================

/// An ordered list of artifacts to render.
///
/// # Example
///
/// ```no_run
/// use oja_icon_renderer::{AssetPipeline, BrandPalette, FixedMetricText, PngDirectory};
///
/// let mut sink = PngDirectory::new("assets");
/// let report = AssetPipeline::release().run(&BrandPalette::OJA, &FixedMetricText, &mut sink);
/// assert!(report.is_success());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AssetPipeline {
    entries: Vec<ArtifactEntry>,
}

impl AssetPipeline {
    pub fn new(entries: Vec<ArtifactEntry>) -> Self {
        Self { entries }
    }

    /// The full set of release assets.
    pub fn release() -> Self {
        Self::new(release_entries())
    }

    pub fn entries(&self) -> &[ArtifactEntry] {
        &self.entries
    }

    /// Renders and saves every entry in order.
    pub fn run(
        &self,
        palette: &BrandPalette,
        text: &dyn TextEngine,
        sink: &mut dyn ArtifactSink,
    ) -> PipelineReport {
        let outcomes = self
            .entries
            .iter()
            .map(|entry| {
                let result = render_variant(&entry.variant, palette, text)
                    .and_then(|image| sink.save(&entry.file_name, &image));
                match &result {
                    Ok(path) => {
                        info!(file = %entry.file_name, path = %path.display(), "saved artifact")
                    }
                    Err(err) => warn!(file = %entry.file_name, %err, "artifact failed"),
                }
                ArtifactOutcome {
                    file_name: entry.file_name.clone(),
                    result,
                }
            })
            .collect();
        PipelineReport { outcomes }
    }
}

/// File names and variants of the release asset set.
pub fn release_entries() -> Vec<ArtifactEntry> {
    vec![
        ArtifactEntry::new("icon.png", VariantSpec::icon(1024, BackgroundMode::FullBleed)),
        ArtifactEntry::new("adaptive-icon.png", VariantSpec::adaptive(1024)),
        ArtifactEntry::new("favicon.png", VariantSpec::favicon(48)),
        ArtifactEntry::new(
            "splash-icon.png",
            VariantSpec::icon(512, BackgroundMode::FullBleed),
        ),
        ArtifactEntry::new(
            "splash-full.png",
            VariantSpec::splash(1284, 2778, SplashText::default()),
        ),
        ArtifactEntry::new(
            "icon-rounded.png",
            VariantSpec::icon(1024, BackgroundMode::RoundedInset),
        ),
    ]
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::FixedMetricText;
    use std::io;

    /// Keeps images in memory and refuses the names it is told to.
    #[derive(Default)]
    struct MemorySink {
        saved: Vec<(String, (u32, u32))>,
        reject: Vec<&'static str>,
    }

    impl ArtifactSink for MemorySink {
        fn save(&mut self, file_name: &str, image: &RgbaImage) -> Result<PathBuf, RenderError> {
            if self.reject.contains(&file_name) {
                return Err(RenderError::io(
                    file_name,
                    io::Error::new(io::ErrorKind::PermissionDenied, "read-only"),
                ));
            }
            self.saved.push((file_name.to_string(), image.dimensions()));
            Ok(PathBuf::from(file_name))
        }
    }

    fn small_pipeline() -> AssetPipeline {
        AssetPipeline::new(vec![
            ArtifactEntry::new("a.png", VariantSpec::icon(64, BackgroundMode::FullBleed)),
            ArtifactEntry::new("b.png", VariantSpec::favicon(32)),
            ArtifactEntry::new("c.png", VariantSpec::adaptive(64)),
        ])
    }

    #[test]
    fn release_set_names_and_sizes() {
        let pipeline = AssetPipeline::release();
        let got: Vec<_> = pipeline
            .entries()
            .iter()
            .map(|e| {
                let size = e.variant.size();
                (e.file_name.as_str(), size.width, size.height)
            })
            .collect();
        assert_eq!(
            got,
            vec![
                ("icon.png", 1024, 1024),
                ("adaptive-icon.png", 1024, 1024),
                ("favicon.png", 48, 48),
                ("splash-icon.png", 512, 512),
                ("splash-full.png", 1284, 2778),
                ("icon-rounded.png", 1024, 1024),
            ]
        );
    }

    #[test]
    fn every_entry_is_saved_in_order() {
        let mut sink = MemorySink::default();
        let report = small_pipeline().run(&BrandPalette::OJA, &FixedMetricText, &mut sink);

        assert!(report.is_success());
        assert_eq!(report.saved().count(), 3);
        let names: Vec<_> = sink.saved.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, ["a.png", "b.png", "c.png"]);
        assert_eq!(sink.saved[1].1, (32, 32));
    }

    #[test]
    fn failed_save_does_not_stop_siblings() {
        let mut sink = MemorySink {
            reject: vec!["a.png"],
            ..MemorySink::default()
        };
        let report = small_pipeline().run(&BrandPalette::OJA, &FixedMetricText, &mut sink);

        assert!(!report.is_success());
        let failed: Vec<_> = report.failures().map(|o| o.file_name.as_str()).collect();
        assert_eq!(failed, ["a.png"]);
        assert_eq!(sink.saved.len(), 2, "later artifacts should still be saved");
    }

    #[test]
    fn failed_render_does_not_stop_siblings() {
        let pipeline = AssetPipeline::new(vec![
            ArtifactEntry::new("huge.png", VariantSpec::icon(u32::MAX, BackgroundMode::FullBleed)),
            ArtifactEntry::new("ok.png", VariantSpec::favicon(16)),
        ]);
        let mut sink = MemorySink::default();
        let report = pipeline.run(&BrandPalette::OJA, &FixedMetricText, &mut sink);

        assert!(matches!(
            report.outcomes[0].result,
            Err(RenderError::CanvasAllocation { .. })
        ));
        assert!(report.outcomes[1].is_saved());
        assert_eq!(sink.saved.len(), 1);
    }

    #[test]
    fn png_directory_writes_decodable_files() {
        let dir = std::env::temp_dir().join(format!("oja-png-dir-{}", std::process::id()));
        let mut sink = PngDirectory::new(dir.join("nested"));
        let report = small_pipeline().run(&BrandPalette::OJA, &FixedMetricText, &mut sink);
        assert!(report.is_success());

        let written = image::open(dir.join("nested").join("b.png")).unwrap();
        assert_eq!((written.width(), written.height()), (32, 32));
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn png_directory_reports_unwritable_root() {
        let file = std::env::temp_dir().join(format!("oja-not-a-dir-{}", std::process::id()));
        fs::write(&file, b"x").unwrap();

        let mut sink = PngDirectory::new(&file);
        let err = sink.save("icon.png", &RgbaImage::new(1, 1)).unwrap_err();
        assert!(matches!(err, RenderError::Io { .. }), "got {err:?}");
        fs::remove_file(&file).unwrap();
    }
}
