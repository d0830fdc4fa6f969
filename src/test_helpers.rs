//! Shared test utilities for the pictag test suite.
//!
//! Two kinds of fixtures:
//!
//! - **In-memory** ([`image_file`], [`discovery_set`]): `MediaFile`s under a
//!   pretend `img/` base directory, for grouping and rendering tests that
//!   pair with `MockBackend`.
//! - **On disk** ([`media_tree`], [`write_png`]): real temp directories for
//!   scan and backend tests.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = media_tree(&["img/a.png", "img/pc/a.png"]);
//! let set = scan(&ScanOptions::new(tmp.path().join("img")), &allow);
//! assert_eq!(relative_paths(&set), vec!["a.png", "pc/a.png"]);
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use crate::types::{DiscoverySet, MediaFile, MediaKind};

// =========================================================================
// In-memory fixtures
// =========================================================================

fn kind_for(rel: &str) -> MediaKind {
    if rel.to_lowercase().ends_with(".mp4") {
        MediaKind::Video
    } else {
        MediaKind::Image
    }
}

/// A media file at `img/<rel>`; `.mp4` becomes a video.
pub fn image_file(rel: &str) -> MediaFile {
    MediaFile {
        path: Path::new("img").join(rel),
        relative_path: rel.to_string(),
        kind: kind_for(rel),
    }
}

/// A discovery set over `img/`, sorted the way `scan` sorts.
pub fn discovery_set(rels: &[&str]) -> DiscoverySet {
    let mut files: Vec<MediaFile> = rels.iter().map(|r| image_file(r)).collect();
    files.sort_by(|a, b| a.path.to_string_lossy().cmp(&b.path.to_string_lossy()));
    DiscoverySet {
        base_dir: PathBuf::from("img"),
        files,
    }
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Create a temp directory containing placeholder files at `paths`.
///
/// Contents are not valid images; use [`write_png`] when dimensions matter.
pub fn media_tree(paths: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for rel in paths {
        let path = tmp.path().join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "fake media").unwrap();
    }
    tmp
}

/// Write a real PNG of the given size, creating parent directories.
pub fn write_png(path: &Path, width: u32, height: u32) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save_with_format(path, image::ImageFormat::Png).unwrap();
}

// =========================================================================
// Lookups
// =========================================================================

/// Relative paths in set order.
pub fn relative_paths(set: &DiscoverySet) -> Vec<String> {
    set.iter().map(|f| f.relative_path.clone()).collect()
}

/// Find a file by relative path. Panics if not found.
pub fn find_file<'a>(set: &'a DiscoverySet, rel: &str) -> &'a MediaFile {
    set.iter()
        .find(|f| f.relative_path == rel)
        .unwrap_or_else(|| {
            let available = relative_paths(set);
            panic!("file '{rel}' not found. Available: {available:?}")
        })
}
