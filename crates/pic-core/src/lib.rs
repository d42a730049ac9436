//! # pic-core
//!
//! Core types for fast, allocation-conscious access to flat RGBA buffers.
//!
//! This crate provides the foundational types used throughout pic-rs:
//!
//! - [`PixelView`] - Owning or relative view over 4-byte-per-pixel RGBA data
//! - [`Rect`] - View bounds and sub-region selection
//! - [`Rgba`] - The 8-bit pixel value
//! - [`RgbaFrame`], [`RgbaFrameRef`] - External strided image representation
//! - [`Error`], [`Result`] - Access and construction failures
//!
//! ## Design Philosophy
//!
//! A view either owns a buffer or borrows its parent's through an `Arc`.
//! Deriving a relative view is O(1) and never touches pixel data; copying a
//! region yields an isolated, tightly packed buffer. Nothing is mutable after
//! construction, so any number of views can share one buffer across threads.
//!
//! ```rust
//! use pic_core::{PixelView, Rect, Rgba};
//!
//! let img = PixelView::from_fn(300, 300, |x, y| Rgba::new(x as u8, y as u8, 0, 255));
//! let view = img.sub_view_relative(Rect::new(30, 30, 120, 120));
//! assert_eq!(view.at(0, 0)?, img.at(30, 30)?);
//! # Ok::<(), pic_core::Error>(())
//! ```
//!
//! ## Crate Structure
//!
//! ```text
//! pic-core (this crate)
//!    ^
//!    |
//!    +-- pic-ops (pattern search)
//!    +-- pic-io (PNG adapter)
//!    +-- pic-cli
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod frame;
pub mod pixel;
pub mod rect;
pub mod view;

// Re-exports for convenience
pub use error::*;
pub use frame::{RgbaFrame, RgbaFrameRef};
pub use pixel::{Rgba, BYTES_PER_PIXEL};
pub use rect::Rect;
pub use view::PixelView;

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use pic_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::frame::{RgbaFrame, RgbaFrameRef};
    pub use crate::pixel::Rgba;
    pub use crate::rect::Rect;
    pub use crate::view::PixelView;
}
