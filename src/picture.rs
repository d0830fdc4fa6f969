//! Responsive `<picture>` synthesis.
//!
//! Images sharing a filename are treated as variants of one logical image,
//! wherever they live under the base directory. Each variant gets a role from
//! the first directory of its relative path:
//!
//! | Relative path | Role |
//! |---|---|
//! | `pc/…/a.png` | [`Role::Pc`] |
//! | `a.png` | [`Role::Root`] |
//! | `sp/…/a.png` | [`Role::Sp`] |
//! | `anything/…/a.png` | [`Role::Other`] |
//!
//! ## Variant Resolution
//!
//! ```text
//! pc present:  desktop = pc     mobile = root, else sp      (other unused)
//! no pc:       desktop = root   mobile = sp, else other
//! ```
//!
//! The branches are deliberately asymmetric: with a `pc/` image, the root
//! image is the phone image and a stray `other` copy is ignored.
//!
//! ## Emission
//!
//! - desktop + mobile: media-queried desktop `<source>`, mobile `<source>`,
//!   fallback `<img>` = mobile, probed from the mobile image
//! - desktop only / mobile only: one `<source>` and an `<img>` of that image
//! - neither: nothing (unreachable with the rules above, kept total anyway)
//!
//! Groups are emitted in order of each filename's first appearance in the
//! sorted discovery set, not alphabetically by filename.

use crate::config::{TagConfig, VariantsConfig};
use crate::imaging::{ImageBackend, probe_dimensions};
use crate::tags::{ImgTag, PictureSources, PictureTag};
use crate::types::{DiscoverySet, MediaFile};
use serde::Serialize;
use std::collections::HashMap;

/// Where a file sits relative to the base directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Pc,
    Root,
    Sp,
    Other,
}

impl Role {
    pub fn label(self) -> &'static str {
        match self {
            Role::Pc => "pc",
            Role::Root => "root",
            Role::Sp => "sp",
            Role::Other => "other",
        }
    }
}

/// Classify a file by the first segment of its relative path.
pub fn classify(file: &MediaFile, variants: &VariantsConfig) -> Role {
    let mut segments = file.segments();
    let first = segments.next().unwrap_or_default();
    if segments.next().is_none() {
        return Role::Root;
    }
    if first == variants.pc_dir {
        Role::Pc
    } else if first == variants.sp_dir {
        Role::Sp
    } else {
        Role::Other
    }
}

/// All variants of one filename, at most one per role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantGroup<'a> {
    pub file_name: String,
    pub pc: Option<&'a MediaFile>,
    pub root: Option<&'a MediaFile>,
    pub sp: Option<&'a MediaFile>,
    pub other: Option<&'a MediaFile>,
}

impl<'a> VariantGroup<'a> {
    fn new(file_name: &str) -> Self {
        Self {
            file_name: file_name.to_string(),
            pc: None,
            root: None,
            sp: None,
            other: None,
        }
    }

    fn slot(&mut self, role: Role) -> &mut Option<&'a MediaFile> {
        match role {
            Role::Pc => &mut self.pc,
            Role::Root => &mut self.root,
            Role::Sp => &mut self.sp,
            Role::Other => &mut self.other,
        }
    }

    /// Store `file` under `role`, returning the file it displaced.
    pub fn assign(&mut self, role: Role, file: &'a MediaFile) -> Option<&'a MediaFile> {
        self.slot(role).replace(file)
    }

    /// Filled roles in `pc, root, sp, other` order.
    pub fn members(&self) -> Vec<(Role, &'a MediaFile)> {
        [
            (Role::Pc, self.pc),
            (Role::Root, self.root),
            (Role::Sp, self.sp),
            (Role::Other, self.other),
        ]
        .into_iter()
        .filter_map(|(role, file)| file.map(|f| (role, f)))
        .collect()
    }

    /// Pick the desktop and mobile images.
    pub fn resolve(&self) -> ResolvedPair<'a> {
        match self.pc {
            Some(pc) => ResolvedPair {
                pc: Some(pc),
                sp: self.root.or(self.sp),
            },
            None => ResolvedPair {
                pc: self.root,
                sp: self.sp.or(self.other),
            },
        }
    }
}

/// Group image files by filename, in first-appearance order.
///
/// Videos are skipped. When two files share a filename and a role, the later
/// one in sorted order replaces the earlier one; the replaced path is logged
/// as a warning since it never reaches the output.
pub fn group_by_basename<'a>(
    files: impl IntoIterator<Item = &'a MediaFile>,
    variants: &VariantsConfig,
) -> Vec<VariantGroup<'a>> {
    let mut groups: Vec<VariantGroup<'a>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for file in files.into_iter().filter(|f| !f.is_video()) {
        let name = file.file_name();
        let pos = *index.entry(name.to_string()).or_insert_with(|| {
            groups.push(VariantGroup::new(name));
            groups.len() - 1
        });

        let role = classify(file, variants);
        if let Some(displaced) = groups[pos].assign(role, file) {
            log::warn!(
                "{} shadows {} (both are the {} variant of {name}); only the former is used",
                file.relative_path,
                displaced.relative_path,
                role.label(),
            );
        }
    }

    groups
}

/// Desktop and mobile image chosen for a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedPair<'a> {
    pub pc: Option<&'a MediaFile>,
    pub sp: Option<&'a MediaFile>,
}

/// Which `<picture>` shape a resolved pair produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emission {
    Both,
    PcOnly,
    SpOnly,
    Nothing,
}

impl<'a> ResolvedPair<'a> {
    pub fn case(&self) -> Emission {
        match (self.pc, self.sp) {
            (Some(_), Some(_)) => Emission::Both,
            (Some(_), None) => Emission::PcOnly,
            (None, Some(_)) => Emission::SpOnly,
            (None, None) => Emission::Nothing,
        }
    }

    /// Build the `<picture>`, probing the image used by the fallback `<img>`.
    pub fn to_picture(
        &self,
        backend: &impl ImageBackend,
        src_prefix: &str,
        pc_media: &str,
    ) -> Option<PictureTag> {
        let src = |file: &MediaFile| format!("{src_prefix}{}", file.relative_path);

        let (sources, fallback) = match (self.pc, self.sp) {
            (Some(pc), Some(sp)) => (
                PictureSources::Responsive {
                    media: pc_media.to_string(),
                    pc: src(pc),
                    sp: src(sp),
                },
                sp,
            ),
            (Some(only), None) | (None, Some(only)) => {
                (PictureSources::Single { src: src(only) }, only)
            }
            (None, None) => return None,
        };

        Some(PictureTag {
            sources,
            fallback: ImgTag {
                src: src(fallback),
                dimensions: probe_dimensions(backend, &fallback.path),
            },
        })
    }
}

/// One `<picture>` per filename group, in group order.
pub fn synthesize_pictures(
    set: &DiscoverySet,
    backend: &impl ImageBackend,
    config: &TagConfig,
) -> Vec<PictureTag> {
    let src_prefix = config.src_prefix();
    group_by_basename(set, &config.variants)
        .iter()
        .filter_map(|group| {
            let pair = group.resolve();
            if pair.case() == Emission::Nothing {
                log::debug!("no usable variant for {}", group.file_name);
            }
            pair.to_picture(backend, &src_prefix, &config.variants.pc_media)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::MockBackend;
    use crate::test_helpers::*;
    use maud::Render;

    fn variants() -> VariantsConfig {
        VariantsConfig::default()
    }

    fn rel(file: Option<&MediaFile>) -> Option<&str> {
        file.map(|f| f.relative_path.as_str())
    }

    fn render_all(set: &DiscoverySet, backend: &MockBackend) -> Vec<String> {
        synthesize_pictures(set, backend, &TagConfig::default())
            .iter()
            .map(|p| p.render().into_string())
            .collect()
    }

    // =========================================================================
    // Classification
    // =========================================================================

    #[test]
    fn classify_by_first_segment() {
        let v = variants();
        assert_eq!(classify(&image_file("pc/a.png"), &v), Role::Pc);
        assert_eq!(classify(&image_file("pc/deep/a.png"), &v), Role::Pc);
        assert_eq!(classify(&image_file("a.png"), &v), Role::Root);
        assert_eq!(classify(&image_file("sp/a.png"), &v), Role::Sp);
        assert_eq!(classify(&image_file("news/a.png"), &v), Role::Other);
        assert_eq!(classify(&image_file("news/pc/a.png"), &v), Role::Other);
    }

    #[test]
    fn classify_root_file_named_like_variant_dir() {
        // A file literally called `pc` sits in the base directory
        assert_eq!(classify(&image_file("pc"), &variants()), Role::Root);
    }

    #[test]
    fn classify_uses_configured_dir_names() {
        let v = VariantsConfig {
            pc_dir: "desktop".to_string(),
            sp_dir: "mobile".to_string(),
            ..VariantsConfig::default()
        };
        assert_eq!(classify(&image_file("desktop/a.png"), &v), Role::Pc);
        assert_eq!(classify(&image_file("mobile/a.png"), &v), Role::Sp);
        assert_eq!(classify(&image_file("pc/a.png"), &v), Role::Other);
    }

    // =========================================================================
    // Grouping
    // =========================================================================

    #[test]
    fn groups_by_filename_across_directories() {
        let set = discovery_set(&["a.png", "b.png", "pc/a.png", "sp/a.png", "x/b.png"]);
        let groups = group_by_basename(&set, &variants());

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].file_name, "a.png");
        assert_eq!(rel(groups[0].pc), Some("pc/a.png"));
        assert_eq!(rel(groups[0].root), Some("a.png"));
        assert_eq!(rel(groups[0].sp), Some("sp/a.png"));
        assert_eq!(groups[0].other, None);
        assert_eq!(rel(groups[1].other), Some("x/b.png"));
    }

    #[test]
    fn group_order_follows_first_appearance_not_name() {
        // Sorted discovery order puts `news/zeta.png` before `pc/alpha.png`
        let set = discovery_set(&["news/zeta.png", "pc/alpha.png", "sp/zeta.png"]);
        let names: Vec<String> = group_by_basename(&set, &variants())
            .into_iter()
            .map(|g| g.file_name)
            .collect();
        assert_eq!(names, vec!["zeta.png", "alpha.png"]);
    }

    #[test]
    fn videos_are_never_grouped() {
        let set = discovery_set(&["a.png", "clip.mp4", "pc/clip.mp4"]);
        let groups = group_by_basename(&set, &variants());
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].file_name, "a.png");
    }

    #[test]
    fn role_collision_keeps_last_sorted() {
        let set = discovery_set(&["blog/a.png", "news/a.png"]);
        let groups = group_by_basename(&set, &variants());
        assert_eq!(rel(groups[0].other), Some("news/a.png"));
    }

    #[test]
    fn assign_returns_displaced_file() {
        let first = image_file("pc/a.png");
        let second = image_file("pc/old/a.png");
        let mut group = VariantGroup::new("a.png");
        assert_eq!(group.assign(Role::Pc, &first), None);
        assert_eq!(group.assign(Role::Pc, &second), Some(&first));
        assert_eq!(group.members(), vec![(Role::Pc, &second)]);
    }

    // =========================================================================
    // Resolution
    // =========================================================================

    fn resolve_layout(paths: &[&str]) -> (Option<String>, Option<String>) {
        let set = discovery_set(paths);
        let groups = group_by_basename(&set, &variants());
        assert_eq!(groups.len(), 1, "layout must produce one group");
        let pair = groups[0].resolve();
        (
            rel(pair.pc).map(String::from),
            rel(pair.sp).map(String::from),
        )
    }

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn pc_with_sp_uses_both() {
        assert_eq!(
            resolve_layout(&["pc/a.png", "sp/a.png"]),
            (some("pc/a.png"), some("sp/a.png"))
        );
    }

    #[test]
    fn pc_prefers_root_over_sp_for_mobile() {
        assert_eq!(
            resolve_layout(&["a.png", "pc/a.png", "sp/a.png"]),
            (some("pc/a.png"), some("a.png"))
        );
    }

    #[test]
    fn pc_never_falls_back_to_other() {
        assert_eq!(
            resolve_layout(&["news/a.png", "pc/a.png"]),
            (some("pc/a.png"), None)
        );
    }

    #[test]
    fn without_pc_root_is_desktop() {
        assert_eq!(resolve_layout(&["a.png"]), (some("a.png"), None));
        assert_eq!(
            resolve_layout(&["a.png", "sp/a.png"]),
            (some("a.png"), some("sp/a.png"))
        );
    }

    #[test]
    fn without_pc_sp_beats_other() {
        assert_eq!(
            resolve_layout(&["news/a.png", "sp/a.png"]),
            (None, some("sp/a.png"))
        );
        assert_eq!(resolve_layout(&["news/a.png"]), (None, some("news/a.png")));
    }

    #[test]
    fn every_nonempty_combination_emits() {
        let a = image_file("a.png");
        let pc = image_file("pc/a.png");
        let sp = image_file("sp/a.png");
        let other = image_file("x/a.png");

        for mask in 1u8..16 {
            let mut group = VariantGroup::new("a.png");
            if mask & 1 != 0 {
                group.assign(Role::Pc, &pc);
            }
            if mask & 2 != 0 {
                group.assign(Role::Root, &a);
            }
            if mask & 4 != 0 {
                group.assign(Role::Sp, &sp);
            }
            if mask & 8 != 0 {
                group.assign(Role::Other, &other);
            }
            let pair = group.resolve();
            assert_ne!(pair.case(), Emission::Nothing, "mask {mask:04b}");
            if group.pc.is_some() {
                assert_eq!(pair.pc, Some(&pc));
                assert_ne!(pair.sp, Some(&other));
            }
        }
    }

    #[test]
    fn empty_group_resolves_to_nothing() {
        let group = VariantGroup::new("a.png");
        let pair = group.resolve();
        assert_eq!(pair.case(), Emission::Nothing);
        assert!(pair.to_picture(&MockBackend::new(), "./img/", "x").is_none());
    }

    // =========================================================================
    // Emission
    // =========================================================================

    #[test]
    fn dual_source_probes_mobile_image() {
        let set = discovery_set(&["pc/a.png", "sp/a.png"]);
        let backend = MockBackend::with_dimensions(&[("pc/a.png", 1600, 900), ("sp/a.png", 750, 1000)]);

        assert_eq!(
            render_all(&set, &backend),
            vec![
                "<picture>\n  \
                 <source media=\"(min-width: 768px)\" srcset=\"./img/pc/a.png\">\n  \
                 <source srcset=\"./img/sp/a.png\">\n  \
                 <img src=\"./img/sp/a.png\" alt=\"\" width=\"750\" height=\"1000\" loading=\"lazy\" />\n\
                 </picture>"
            ]
        );
        assert_eq!(backend.get_identified(), vec!["img/sp/a.png"]);
    }

    #[test]
    fn pc_only_uses_pc_for_source_and_fallback() {
        let set = discovery_set(&["news/a.png", "pc/a.png"]);
        let backend = MockBackend::with_dimensions(&[("pc/a.png", 1600, 900)]);

        let rendered = render_all(&set, &backend);
        assert_eq!(
            rendered,
            vec![
                "<picture>\n  \
                 <source srcset=\"./img/pc/a.png\">\n  \
                 <img src=\"./img/pc/a.png\" alt=\"\" width=\"1600\" height=\"900\" loading=\"lazy\" />\n\
                 </picture>"
            ]
        );
    }

    #[test]
    fn sp_only_uses_sp_image() {
        let set = discovery_set(&["sp/a.png"]);
        let backend = MockBackend::with_dimensions(&[("sp/a.png", 300, 200)]);
        let rendered = render_all(&set, &backend);
        assert!(rendered[0].contains("<source srcset=\"./img/sp/a.png\">"));
        assert!(rendered[0].contains("width=\"300\" height=\"200\""));
        assert!(!rendered[0].contains("media="));
    }

    #[test]
    fn probe_failure_omits_dimensions() {
        let set = discovery_set(&["a.png", "pc/a.png"]);
        let rendered = render_all(&set, &MockBackend::new());
        assert!(rendered[0].contains(r#"<img src="./img/a.png" alt="" loading="lazy" />"#));
        assert!(!rendered[0].contains("width="));
    }

    #[test]
    fn custom_prefix_and_media_query() {
        let set = discovery_set(&["pc/a.png", "sp/a.png"]);
        let mut config = TagConfig::default();
        config.src_prefix = Some("/assets/".to_string());
        config.variants.pc_media = "(min-width: 1024px)".to_string();

        let pictures = synthesize_pictures(&set, &MockBackend::new(), &config);
        let html = pictures[0].render().into_string();
        assert!(html.contains(r#"media="(min-width: 1024px)" srcset="/assets/pc/a.png""#));
        assert!(html.contains(r#"<source srcset="/assets/sp/a.png">"#));
    }

    #[test]
    fn one_picture_per_group() {
        let set = discovery_set(&["a.png", "b.png", "c.png", "pc/b.png", "clip.mp4"]);
        let pictures = synthesize_pictures(&set, &MockBackend::new(), &TagConfig::default());
        assert_eq!(pictures.len(), 3);
        assert!(
            pictures
                .iter()
                .all(|p| !p.render().into_string().contains(".mp4"))
        );
    }
}
