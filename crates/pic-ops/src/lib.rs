//! # pic-ops
//!
//! Operations over [`pic_core::PixelView`].
//!
//! # Modules
//!
//! - [`search`] - Brute-force sub-image search
//! - [`parallel`] - Row-parallel search (feature `parallel`)
//!
//! # Example
//!
//! ```rust
//! use pic_core::{PixelView, Rect, Rgba};
//! use pic_ops::locate;
//!
//! let screen = PixelView::from_fn(32, 24, |x, y| Rgba::new(x as u8, y as u8, 0, 255));
//! let icon = screen.copy_sub_region(Rect::new(12, 8, 4, 4))?;
//! assert_eq!(locate(&screen, &icon)?, Some((12, 8)));
//! # Ok::<(), pic_core::Error>(())
//! ```
//!
//! ## Options
//!
//! ```rust
//! use pic_core::{PixelView, Rect, Rgba};
//! use pic_ops::{locate, locate_with, EdgePolicy, SearchOptions};
//!
//! let screen = PixelView::from_fn(32, 24, |x, y| Rgba::new(x as u8, y as u8, 0, 255));
//! // flush with the bottom-right corner
//! let corner = screen.copy_sub_region(Rect::new(28, 20, 4, 4))?;
//! assert_eq!(locate(&screen, &corner)?, None);
//!
//! let opts = SearchOptions::default().with_edge(EdgePolicy::Inclusive);
//! assert_eq!(locate_with(&screen, &corner, &opts)?, Some((28, 20)));
//! # Ok::<(), pic_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod search;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use search::{locate, locate_all, locate_with, EdgePolicy, SearchOptions};
