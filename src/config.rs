//! Tool configuration.
//!
//! Handles loading and validating `pictag.toml`. Every section falls back to
//! its defaults, so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_dir = "img"            # Directory scanned for media
//! # src_prefix = "./img/"     # URL prefix; derived from base_dir when unset
//!
//! [variants]
//! pc_dir = "pc"               # Desktop variants live here
//! sp_dir = "sp"               # Smartphone variants live here
//! pc_media = "(min-width: 768px)"
//!
//! [extensions]
//! images = ["png", "jpg", "jpeg", "gif", "svg", "webp"]
//! videos = ["mp4"]
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "pictag.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Tool configuration loaded from `pictag.toml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagConfig {
    /// Directory that holds the media tree.
    pub base_dir: String,
    /// URL prefix written in front of every relative path.
    /// `None` means `./{base_dir}/`.
    pub src_prefix: Option<String>,
    /// Desktop/smartphone directory convention.
    pub variants: VariantsConfig,
    /// Extension allow-lists, lowercase and without the leading dot.
    pub extensions: ExtensionsConfig,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            base_dir: "img".to_string(),
            src_prefix: None,
            variants: VariantsConfig::default(),
            extensions: ExtensionsConfig::default(),
        }
    }
}

impl TagConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_dir.trim().is_empty() {
            return Err(ConfigError::Validation("base_dir must not be empty".into()));
        }
        if self.variants.pc_dir.is_empty() || self.variants.sp_dir.is_empty() {
            return Err(ConfigError::Validation(
                "variants.pc_dir and variants.sp_dir must not be empty".into(),
            ));
        }
        if self.variants.pc_dir == self.variants.sp_dir {
            return Err(ConfigError::Validation(
                "variants.pc_dir and variants.sp_dir must differ".into(),
            ));
        }
        if self.extensions.images.is_empty() {
            return Err(ConfigError::Validation(
                "extensions.images must not be empty".into(),
            ));
        }
        let all = self
            .extensions
            .images
            .iter()
            .chain(&self.extensions.videos);
        for ext in all {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::Validation(format!(
                    "extension {ext:?} must be non-empty and written without a leading dot"
                )));
            }
        }
        if let Some(ext) = self.extensions.images.iter().find(|i| {
            self.extensions
                .videos
                .iter()
                .any(|v| v.eq_ignore_ascii_case(i))
        }) {
            return Err(ConfigError::Validation(format!(
                "extension {ext:?} is listed as both image and video"
            )));
        }
        Ok(())
    }

    /// Base directory as a path.
    pub fn base_path(&self) -> PathBuf {
        PathBuf::from(&self.base_dir)
    }

    /// Effective URL prefix for `src`/`srcset` attributes.
    ///
    /// - `"img"` → `"./img/"`
    /// - `"assets/img/"` → `"./assets/img/"`
    /// - `"."`, `"./"` → `"./"`
    /// - explicit `src_prefix` is returned untouched
    pub fn src_prefix(&self) -> String {
        if let Some(prefix) = &self.src_prefix {
            return prefix.clone();
        }
        let trimmed = self.base_dir.trim_end_matches('/');
        if trimmed.is_empty() {
            // "/" or a run of slashes
            return "/".to_string();
        }
        match trimmed.trim_start_matches("./") {
            "" | "." => "./".to_string(),
            base if Path::new(base).is_absolute() => format!("{base}/"),
            base => format!("./{base}/"),
        }
    }
}

/// Directory names that mark responsive variants.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VariantsConfig {
    /// First-level directory holding desktop images.
    pub pc_dir: String,
    /// First-level directory holding smartphone images.
    pub sp_dir: String,
    /// Media query attached to the desktop `<source>`.
    pub pc_media: String,
}

impl Default for VariantsConfig {
    fn default() -> Self {
        Self {
            pc_dir: "pc".to_string(),
            sp_dir: "sp".to_string(),
            pc_media: "(min-width: 768px)".to_string(),
        }
    }
}

/// Extension allow-lists.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExtensionsConfig {
    pub images: Vec<String>,
    pub videos: Vec<String>,
}

impl Default for ExtensionsConfig {
    fn default() -> Self {
        Self {
            images: ["png", "jpg", "jpeg", "gif", "svg", "webp"]
                .map(String::from)
                .to_vec(),
            videos: vec!["mp4".to_string()],
        }
    }
}

// =============================================================================
// Config loading
// =============================================================================

/// Load config from the file at `path`, falling back to stock defaults.
///
/// Every section is `#[serde(default)]`, so keys missing from the file keep
/// their default values.
pub fn load_config(path: &Path) -> Result<TagConfig, ConfigError> {
    let config: TagConfig = if path.exists() {
        let content = fs::read_to_string(path)?;
        toml::from_str(&content)?
    } else {
        log::debug!("{} not found, using defaults", path.display());
        TagConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `pictag.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# pictag configuration
# ====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Directory scanned for media. Files directly inside it are "root" files;
# every first-level sub-directory is walked recursively.
base_dir = "img"

# Prefix written in front of each path relative to base_dir.
# When unset it is "./" + base_dir + "/".
# src_prefix = "./img/"

# ---------------------------------------------------------------------------
# Responsive variants (picture mode)
# ---------------------------------------------------------------------------
[variants]
# First-level directory holding desktop images.
pc_dir = "pc"

# First-level directory holding smartphone images.
sp_dir = "sp"

# Media query of the desktop <source>.
pc_media = "(min-width: 768px)"

# ---------------------------------------------------------------------------
# Extensions (case-insensitive, without the dot)
# ---------------------------------------------------------------------------
[extensions]
images = ["png", "jpg", "jpeg", "gif", "svg", "webp"]

# Only used by `pictag img`; picture mode never emits videos.
videos = ["mp4"]
"##
}
