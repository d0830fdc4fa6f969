//! Image dimension probing.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` (header only, no decode) |
//!
//! The module is split into:
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]
//! - **Operations**: [`probe_dimensions`], the fallible-to-optional wrapper
//!   tag synthesis calls

pub mod backend;
pub mod operations;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use operations::probe_dimensions;
pub use rust_backend::RustBackend;
