//! HTML fragments emitted by both commands.
//!
//! Every tag implements [`maud::Render`], so attribute values go through
//! maud's escaping and the fragments can be embedded in larger `html!`
//! templates. `<source>` and `<video>` are plain `html!` templates. `<img>` is
//! written by hand because the output keeps the self-closing ` />` form that
//! maud does not produce for void elements.
//!
//! ```text
//! <img src="./img/a.png" alt="" width="640" height="480" loading="lazy" />
//! <video src="./img/clip.mp4" muted playsinline preload="metadata"></video>
//! <picture>
//!   <source media="(min-width: 768px)" srcset="./img/pc/a.png">
//!   <source srcset="./img/sp/a.png">
//!   <img src="./img/sp/a.png" alt="" width="375" height="500" loading="lazy" />
//! </picture>
//! ```

use crate::imaging::Dimensions;
use maud::{Markup, Render, html};

/// Lazily loaded `<img>`, with dimensions when they could be probed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImgTag {
    pub src: String,
    pub dimensions: Option<Dimensions>,
}

impl Render for ImgTag {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str("<img src=\"");
        self.src.render_to(buffer);
        buffer.push_str("\" alt=\"\"");
        if let Some(Dimensions { width, height }) = self.dimensions {
            buffer.push_str(" width=\"");
            width.render_to(buffer);
            buffer.push_str("\" height=\"");
            height.render_to(buffer);
            buffer.push('"');
        }
        buffer.push_str(" loading=\"lazy\" />");
    }
}

/// Muted inline `<video>`; dimensions are never probed for video.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoTag {
    pub src: String,
}

impl Render for VideoTag {
    fn render(&self) -> Markup {
        html! {
            video src=(self.src) muted playsinline preload="metadata" {}
        }
    }
}

/// Output of flat mode: one tag per discovered file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaTag {
    Img(ImgTag),
    Video(VideoTag),
}

impl Render for MediaTag {
    fn render_to(&self, buffer: &mut String) {
        match self {
            MediaTag::Img(img) => img.render_to(buffer),
            MediaTag::Video(video) => video.render_to(buffer),
        }
    }
}

/// The `<source>` entries of a `<picture>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PictureSources {
    /// Desktop source behind a media query, then the smartphone source.
    Responsive { media: String, pc: String, sp: String },
    /// A single unconditional source.
    Single { src: String },
}

/// A `<picture>` element with its fallback `<img>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PictureTag {
    pub sources: PictureSources,
    pub fallback: ImgTag,
}

impl PictureTag {
    fn source_lines(&self) -> Vec<Markup> {
        match &self.sources {
            PictureSources::Responsive { media, pc, sp } => vec![
                html! { source media=(media) srcset=(pc); },
                html! { source srcset=(sp); },
            ],
            PictureSources::Single { src } => vec![html! { source srcset=(src); }],
        }
    }
}

impl Render for PictureTag {
    fn render_to(&self, buffer: &mut String) {
        buffer.push_str("<picture>\n");
        for line in self.source_lines() {
            buffer.push_str("  ");
            buffer.push_str(&line.into_string());
            buffer.push('\n');
        }
        buffer.push_str("  ");
        self.fallback.render_to(buffer);
        buffer.push_str("\n</picture>");
    }
}
