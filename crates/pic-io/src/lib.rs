//! # pic-io
//!
//! PNG boundary adapter for [`pic_core::PixelView`].
//!
//! Decoding produces owning 8-bit RGBA views; encoding accepts any view,
//! including relative ones.
//!
//! ```rust,ignore
//! use pic_io::{read_png, write_png};
//!
//! let view = read_png("input.png")?;
//! write_png("output.png", &view)?;
//! ```

#![warn(missing_docs)]

mod error;
pub mod png;

pub use crate::png::{decode_png, encode_png, read_png, write_png};
pub use error::{IoError, IoResult};
