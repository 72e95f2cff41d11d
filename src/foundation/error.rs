use std::path::PathBuf;

/// Convenience result type used across orbitcast.
pub type OrbitResult<T> = Result<T, OrbitError>;

/// Top-level error taxonomy used by the render and assemble pipelines.
#[derive(thiserror::Error, Debug)]
pub enum OrbitError {
    /// Invalid user-provided parameters or inconsistent data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A point cloud or model file could not be parsed.
    #[error("load error: {0}")]
    Load(String),

    /// Failures while rasterizing a frame.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while writing frames to an output sink.
    #[error("encode error: {0}")]
    Encode(String),

    /// An input folder contained no usable files.
    #[error("no input files found in '{}'", .dir.display())]
    EmptyInput {
        /// Folder that was scanned.
        dir: PathBuf,
    },

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl OrbitError {
    /// Build a [`OrbitError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`OrbitError::Load`] value.
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`OrbitError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`OrbitError::Encode`] value.
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    /// Build a [`OrbitError::EmptyInput`] value.
    pub fn empty_input(dir: impl Into<PathBuf>) -> Self {
        Self::EmptyInput { dir: dir.into() }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
