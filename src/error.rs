//! Error type shared by rendering, saving and manifest loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the asset renderer.
///
/// Degenerate geometry and missing fonts are not represented here: both are
/// recovered where they occur (clamping and the fixed-metric font fallback).
#[derive(Debug, Error)]
pub enum RenderError {
    /// The pixel buffer for a canvas could not be allocated.
    #[error("cannot allocate a {width}x{height} canvas")]
    CanvasAllocation { width: u32, height: u32 },

    /// A file or directory could not be read or written.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The rendered image could not be encoded to its output format.
    #[error("failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The asset manifest is not valid JSON for [`AssetManifest`](crate::AssetManifest).
    #[error("invalid asset manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}

impl RenderError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
