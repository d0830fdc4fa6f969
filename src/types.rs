//! Shared types passed from discovery to tag synthesis.
//!
//! These are also what the `scan` command serializes to JSON.

use serde::Serialize;
use std::path::PathBuf;

/// Whether a file renders as `<img>` or `<video>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

/// A discovered media file.
///
/// `relative_path` is relative to the base directory and always uses `/`
/// separators, since it ends up inside `src`/`srcset` URLs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    pub path: PathBuf,
    pub relative_path: String,
    pub kind: MediaKind,
}

impl MediaFile {
    /// Filename without directory, e.g. `a.png` for `pc/a.png`.
    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.relative_path)
    }

    /// Components of the relative path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.relative_path.split('/')
    }

    pub fn is_video(&self) -> bool {
        self.kind == MediaKind::Video
    }
}

/// Ordered, duplicate-free result of a discovery pass.
///
/// Sorted by the full path string, byte-wise.
#[derive(Debug, Clone, Serialize)]
pub struct DiscoverySet {
    pub base_dir: PathBuf,
    pub files: Vec<MediaFile>,
}

impl DiscoverySet {
    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MediaFile> {
        self.files.iter()
    }

    pub fn images(&self) -> impl Iterator<Item = &MediaFile> {
        self.files.iter().filter(|f| f.kind == MediaKind::Image)
    }

    pub fn videos(&self) -> impl Iterator<Item = &MediaFile> {
        self.files.iter().filter(|f| f.kind == MediaKind::Video)
    }
}

impl<'a> IntoIterator for &'a DiscoverySet {
    type Item = &'a MediaFile;
    type IntoIter = std::slice::Iter<'a, MediaFile>;

    fn into_iter(self) -> Self::IntoIter {
        self.files.iter()
    }
}
