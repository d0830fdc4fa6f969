//! Media discovery.
//!
//! First stage of both commands. Collects the media files under the base
//! directory into a [`DiscoverySet`] that tag synthesis consumes.
//!
//! ## Scan Roots
//!
//! ```text
//! img/                     # base directory: files directly inside only
//! ├── hero.png             # → root file
//! ├── pc/                  # every first-level sub-directory: walked recursively
//! │   └── hero.png
//! ├── sp/
//! │   └── hero.png
//! └── news/
//!     └── 2024/
//!         └── banner.jpg   # found, however deep
//! ```
//!
//! With `--dir <sub>` the only root is `img/<sub>`, walked recursively.
//!
//! ## Rules
//!
//! - Extension match is case-insensitive against the allow-list.
//! - The name filter is a plain substring match on the filename.
//! - Paths are de-duplicated after lexical normalization.
//! - The result is sorted by the full path *string*, so `img/a-b.png` sorts
//!   before `img/a/x.png` (`-` < `/`), unlike component-wise `Path` ordering.
//! - Symlinked directories are not followed, at any depth. Symlinked files are.
//! - A scan root that is missing, unreadable, or not a directory contributes
//!   nothing; scanning never fails.

use crate::config::ExtensionsConfig;
use crate::types::{DiscoverySet, MediaFile, MediaKind};
use std::collections::HashSet;
use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Per-run discovery parameters.
#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    pub base_dir: PathBuf,
    /// Substring every filename must contain. Empty matches everything.
    pub name_filter: String,
    /// Restrict the scan to `base_dir/<dir_override>`, recursively.
    pub dir_override: Option<PathBuf>,
}

impl ScanOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            ..Self::default()
        }
    }

    pub fn name_filter(mut self, filter: impl Into<String>) -> Self {
        self.name_filter = filter.into();
        self
    }

    pub fn dir_override(mut self, dir: Option<PathBuf>) -> Self {
        self.dir_override = dir;
        self
    }
}

/// Extensions accepted by a scan, lowercase.
#[derive(Debug, Clone)]
pub struct ExtensionAllowList {
    images: Vec<String>,
    videos: Vec<String>,
}

impl ExtensionAllowList {
    /// Images and videos, for `<img>`/`<video>` output.
    pub fn flat(config: &ExtensionsConfig) -> Self {
        Self {
            images: lowercase_all(&config.images),
            videos: lowercase_all(&config.videos),
        }
    }

    /// Images only, for `<picture>` output.
    pub fn images_only(config: &ExtensionsConfig) -> Self {
        Self {
            images: lowercase_all(&config.images),
            videos: Vec::new(),
        }
    }

    /// Kind of `path` if its extension is allowed.
    pub fn classify(&self, path: &Path) -> Option<MediaKind> {
        let ext = path.extension()?.to_string_lossy().to_lowercase();
        if self.images.contains(&ext) {
            Some(MediaKind::Image)
        } else if self.videos.contains(&ext) {
            Some(MediaKind::Video)
        } else {
            None
        }
    }
}

fn lowercase_all(exts: &[String]) -> Vec<String> {
    exts.iter().map(|e| e.to_lowercase()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum ScanRoot {
    /// Only files directly inside.
    Flat(PathBuf),
    /// Full nested traversal.
    Recursive(PathBuf),
}

/// Discover media files per the scan rules in the module docs.
pub fn scan(options: &ScanOptions, allow: &ExtensionAllowList) -> DiscoverySet {
    let mut collector = Collector::new(options, allow);

    for root in scan_roots(options) {
        match root {
            ScanRoot::Flat(dir) => {
                log::debug!("scanning {} (top level only)", dir.display());
                collector.collect_flat(&dir);
            }
            ScanRoot::Recursive(dir) => {
                log::debug!("scanning {} (recursive)", dir.display());
                collector.collect_tree(&dir);
            }
        }
    }

    collector.finish()
}

fn scan_roots(options: &ScanOptions) -> Vec<ScanRoot> {
    if let Some(sub) = &options.dir_override {
        return vec![ScanRoot::Recursive(options.base_dir.join(sub))];
    }

    let mut roots = vec![ScanRoot::Flat(options.base_dir.clone())];
    roots.extend(immediate_subdirs(&options.base_dir).into_iter().map(ScanRoot::Recursive));
    roots
}

fn immediate_subdirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            log_dir_error(dir, &err);
            return Vec::new();
        }
    };

    // `DirEntry::file_type` does not follow symlinks
    let mut subdirs: Vec<PathBuf> = entries
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_ok_and(|t| t.is_dir()))
        .map(|e| e.path())
        .collect();
    subdirs.sort();
    subdirs
}

fn log_dir_error(dir: &Path, err: &std::io::Error) {
    if err.kind() == ErrorKind::NotFound {
        log::debug!("{} does not exist, nothing to scan", dir.display());
    } else {
        log::warn!("cannot read {}: {err}", dir.display());
    }
}

/// Accumulates matches across scan roots.
struct Collector<'a> {
    base_dir: PathBuf,
    name_filter: &'a str,
    allow: &'a ExtensionAllowList,
    seen: HashSet<PathBuf>,
    files: Vec<MediaFile>,
}

impl<'a> Collector<'a> {
    fn new(options: &'a ScanOptions, allow: &'a ExtensionAllowList) -> Self {
        Self {
            base_dir: normalize(&options.base_dir),
            name_filter: &options.name_filter,
            allow,
            seen: HashSet::new(),
            files: Vec::new(),
        }
    }

    fn collect_flat(&mut self, dir: &Path) {
        let entries = match fs::read_dir(dir) {
            Ok(entries) => entries,
            Err(err) => {
                log_dir_error(dir, &err);
                return;
            }
        };

        for entry in entries {
            match entry {
                Ok(entry) => {
                    let path = entry.path();
                    if path.is_file() {
                        self.offer(&path);
                    }
                }
                Err(err) => log::warn!("skipping unreadable entry in {}: {err}", dir.display()),
            }
        }
    }

    fn collect_tree(&mut self, dir: &Path) {
        for entry in WalkDir::new(dir).follow_root_links(false) {
            match entry {
                Ok(entry) => {
                    if entry.depth() == 0 && !entry.file_type().is_dir() {
                        log::debug!("{} is not a directory, nothing to scan", dir.display());
                        return;
                    }
                    if entry.path().is_file() {
                        self.offer(entry.path());
                    }
                }
                Err(err) => match err.io_error() {
                    Some(io) if err.depth() == 0 => log_dir_error(dir, io),
                    _ => log::warn!("skipping unreadable entry under {}: {err}", dir.display()),
                },
            }
        }
    }

    /// Add `path` if it passes the extension, name, and uniqueness checks.
    fn offer(&mut self, path: &Path) -> bool {
        let Some(kind) = self.allow.classify(path) else {
            return false;
        };
        let name = match path.file_name() {
            Some(name) => name.to_string_lossy(),
            None => return false,
        };
        if !name.contains(self.name_filter) {
            return false;
        }

        let normalized = normalize(path);
        if !self.seen.insert(normalized.clone()) {
            log::debug!("{} already collected", normalized.display());
            return false;
        }

        let relative_path = relative_url_path(&normalized, &self.base_dir);
        self.files.push(MediaFile {
            path: normalized,
            relative_path,
            kind,
        });
        true
    }

    fn finish(self) -> DiscoverySet {
        let mut files = self.files;
        files.sort_by(|a, b| a.path.to_string_lossy().cmp(&b.path.to_string_lossy()));
        DiscoverySet {
            base_dir: self.base_dir,
            files,
        }
    }
}

/// Drop `.` components so `img/./a.png` and `img/a.png` compare equal.
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

/// Path of `path` relative to `base`, joined with `/`.
fn relative_url_path(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
