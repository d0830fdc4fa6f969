//! Flat tag synthesis: one `<img>` or `<video>` per discovered file.

use crate::imaging::{ImageBackend, probe_dimensions};
use crate::tags::{ImgTag, MediaTag, VideoTag};
use crate::types::{DiscoverySet, MediaKind};

/// Build one tag per file, in discovery order.
///
/// Images are probed for dimensions; a failed probe drops `width`/`height`
/// and moves on to the next file.
pub fn synthesize_flat(
    set: &DiscoverySet,
    backend: &impl ImageBackend,
    src_prefix: &str,
) -> Vec<MediaTag> {
    set.iter()
        .map(|file| {
            let src = format!("{src_prefix}{}", file.relative_path);
            match file.kind {
                MediaKind::Video => MediaTag::Video(VideoTag { src }),
                MediaKind::Image => MediaTag::Img(ImgTag {
                    src,
                    dimensions: probe_dimensions(backend, &file.path),
                }),
            }
        })
        .collect()
}
