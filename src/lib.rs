//! # pictag
//!
//! Scans a directory of media assets and prints the HTML that references
//! them: `<img>`/`<video>` tags, or responsive `<picture>` elements that pair
//! desktop and smartphone variants of the same image by filename.
//!
//! # Architecture: Discovery, Then Synthesis
//!
//! ```text
//! 1. Scan       img/         →  DiscoverySet       (filesystem → sorted file list)
//! 2a. Flat      DiscoverySet →  <img> / <video>    (one tag per file)
//! 2b. Picture   DiscoverySet →  <picture>          (one element per filename)
//! ```
//!
//! Both synthesis stages are pure functions of the discovery set plus an
//! [`imaging::ImageBackend`], so tests drive them with a mock backend and
//! in-memory file lists; only the scan stage touches the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the base directory and builds the [`types::DiscoverySet`] |
//! | [`flat`] | `<img>` / `<video>` per file |
//! | [`picture`] | Filename grouping, pc/sp variant resolution, `<picture>` output |
//! | [`tags`] | The HTML fragments, rendered through maud |
//! | [`imaging`] | Dimension probing: [`imaging::ImageBackend`] trait and the `image`-crate backend |
//! | [`config`] | `pictag.toml` loading with per-key defaults, validation |
//! | [`types`] | Shared data model (`MediaFile`, `DiscoverySet`) |
//! | [`output`] | CLI output formatting |
//!
//! # Directory Convention
//!
//! ```text
//! img/
//! ├── hero.png        # root: mobile image when pc/hero.png exists, else desktop
//! ├── pc/hero.png     # desktop image, served behind (min-width: 768px)
//! └── sp/hero.png     # mobile image when there is no root copy
//! ```
//!
//! The directory names and media query are configurable; see [`config`].
//!
//! # Failure Model
//!
//! Nothing about the media tree is fatal. A missing directory scans as empty,
//! and an image whose size cannot be read (SVG, corrupt files) is emitted
//! without `width`/`height`. Only an invalid `pictag.toml` or bad arguments
//! stop the program.

pub mod config;
pub mod flat;
pub mod imaging;
pub mod output;
pub mod picture;
pub mod scan;
pub mod tags;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
