use std::path::PathBuf;
use thiserror::Error;

/// Why a mesh could not be loaded. Every variant is recoverable: the caller
/// keeps whatever mesh it was already showing.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported mesh format '{}' (expected .obj)", path.display())]
    UnsupportedFormat { path: PathBuf },

    #[error("malformed mesh '{}': {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("mesh '{}' has no usable geometry ({vertices} vertices, {faces} faces)", path.display())]
    EmptyGeometry {
        path: PathBuf,
        vertices: usize,
        faces: usize,
    },

    #[error("no .obj models found in '{}'", dir.display())]
    NoModels { dir: PathBuf },
}

impl LoadError {
    /// True for the "the file itself is bad" kinds (malformed or empty geometry).
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. } | Self::EmptyGeometry { .. })
    }
}

/// Anything that ends a viewer session early.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Config(#[from] crate::io::config::ConfigError),

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("failed to write image: {0}")]
    Image(#[from] image::ImageError),
}
