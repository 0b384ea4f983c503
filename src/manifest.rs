//! JSON asset manifest.
//!
//! An [`AssetManifest`] names the output directory, the fonts to try for
//! splash text, and the artifacts to produce. Every field is optional in
//! JSON; anything left out falls back to the release defaults.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "outputDir": "assets",
//!   "fonts": {
//!     "families": ["Helvetica", "Arial"],
//!     "files": ["fonts/Inter-Bold.ttf"],
//!     "systemFonts": true
//!   },
//!   "artifacts": [
//!     {
//!       "fileName": "favicon.png",
//!       "variant": {
//!         "kind": "favicon",
//!         "width": 48,
//!         "height": 48,
//!         "background": "transparent",
//!         "discFraction": 0.475,
//!         "glyphFraction": 0.45,
//!         "weight": "bold"
//!       }
//!     }
//!   ]
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::RenderError;
use crate::pipeline::{ArtifactEntry, AssetPipeline, release_entries};
use crate::text::FontSettings;

/// Configuration for one asset generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssetManifest {
    /// Directory the artifacts are written into.
    pub output_dir: PathBuf,

    pub fonts: FontSettings,

    /// Artifacts in generation order.
    pub artifacts: Vec<ArtifactEntry>,
}

impl Default for AssetManifest {
    /// The release asset set, written to `assets/`.
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("assets"),
            fonts: FontSettings::default(),
            artifacts: release_entries(),
        }
    }
}

impl AssetManifest {
    /// Reads and parses a manifest file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| RenderError::io(path, e))?;
        let manifest = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            artifacts = manifest.artifacts.len(),
            "loaded manifest"
        );
        Ok(manifest)
    }

    /// Builds the pipeline for this manifest's artifacts.
    pub fn pipeline(&self) -> AssetPipeline {
        AssetPipeline::new(self.artifacts.clone())
    }

    /// Serializes the manifest to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the manifest to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a manifest from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, RenderError> {
        Ok(serde_json::from_str(json)?)
    }
}

// ============================================================================
// Tests
// ============================================================================
