//! Pure Rust backend built on the `image` crate.
//!
//! Only the header is read: `ImageReader::into_dimensions` stops before
//! decoding pixel data. The format is sniffed from the file's magic bytes,
//! falling back to the extension, so a PNG saved as `.jpg` still probes.
//! SVG has no decoder and always reports [`BackendError::Unreadable`].

use super::backend::{BackendError, Dimensions, ImageBackend};
use image::ImageReader;
use std::path::Path;

/// Pure Rust backend using the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = ImageReader::open(path)?
            .with_guessed_format()?
            .into_dimensions()
            .map_err(|e| BackendError::Unreadable(format!("{}: {e}", path.display())))?;
        Ok(Dimensions { width, height })
    }
}
