//! High-level image operations.

use super::backend::{Dimensions, ImageBackend};
use std::path::Path;

/// Probe dimensions, treating any failure as "unknown".
///
/// Unsupported formats (SVG) and corrupt files land here. The caller emits
/// its tag without `width`/`height`; nothing is surfaced to the user.
pub fn probe_dimensions(backend: &impl ImageBackend, path: &Path) -> Option<Dimensions> {
    match backend.identify(path) {
        Ok(dims) => Some(dims),
        Err(err) => {
            log::debug!("no dimensions for {}: {err}", path.display());
            None
        }
    }
}
