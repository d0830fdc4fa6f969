//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! # Output Format
//!
//! ## img / picture
//!
//! The rendered fragments, one per entry. A `<picture>` spans several lines.
//!
//! ## check
//!
//! ```text
//! Files
//! 001 a.png (image)
//!     Source: img/a.png
//! 002 a.png (image)
//!     Source: img/pc/a.png
//!
//! Pictures
//! 001 a.png
//!     pc: pc/a.png
//!     root: a.png
//!     desktop → pc/a.png
//!     mobile → a.png
//!
//! Found 2 images, 0 videos, 1 picture
//! ```

use crate::picture::VariantGroup;
use crate::types::{DiscoverySet, MediaKind};
use maud::Render;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 picture`, `2 pictures`.
fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn kind_label(kind: MediaKind) -> &'static str {
    match kind {
        MediaKind::Image => "image",
        MediaKind::Video => "video",
    }
}

// ============================================================================
// img / picture
// ============================================================================

/// Render each tag to its markup.
pub fn format_tags<T: Render>(tags: &[T]) -> Vec<String> {
    tags.iter().map(|t| t.render().into_string()).collect()
}

pub fn print_tags<T: Render>(tags: &[T]) {
    for tag in format_tags(tags) {
        println!("{}", tag);
    }
}

// ============================================================================
// check
// ============================================================================

/// Format the discovery inventory and the picture groups built from it.
pub fn format_check_output(set: &DiscoverySet, groups: &[VariantGroup<'_>]) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push("Files".to_string());
    for (i, file) in set.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            file.file_name(),
            kind_label(file.kind)
        ));
        lines.push(format!("{}Source: {}", indent(1), file.path.display()));
    }

    lines.push(String::new());
    lines.push("Pictures".to_string());
    for (i, group) in groups.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), group.file_name));
        for (role, file) in group.members() {
            lines.push(format!("{}{}: {}", indent(1), role.label(), file.relative_path));
        }
        let pair = group.resolve();
        if let Some(pc) = pair.pc {
            lines.push(format!("{}desktop → {}", indent(1), pc.relative_path));
        }
        if let Some(sp) = pair.sp {
            lines.push(format!("{}mobile → {}", indent(1), sp.relative_path));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Found {}, {}, {}",
        count_noun(set.images().count(), "image"),
        count_noun(set.videos().count(), "video"),
        count_noun(groups.len(), "picture"),
    ));
    lines
}

pub fn print_check_output(set: &DiscoverySet, groups: &[VariantGroup<'_>]) {
    for line in format_check_output(set, groups) {
        println!("{}", line);
    }
}
