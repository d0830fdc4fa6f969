//! Image backend trait and shared types.
//!
//! The [`ImageBackend`] trait is the seam between tag synthesis and the
//! filesystem. The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend); tests swap in
//! [`tests::MockBackend`] so no real image files are needed.

use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot read dimensions: {0}")]
    Unreadable(String),
}

/// Pixel size of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Trait for image backends.
pub trait ImageBackend {
    /// Get image dimensions.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;
}
