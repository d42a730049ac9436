//! Error types for pic-core operations.
//!
//! Every failure in this crate is a contract violation by the caller:
//! reading outside a view, or handing a constructor a buffer that cannot
//! hold the rectangle it claims to describe. There are no transient errors
//! and nothing is retried.
//!
//! # Usage
//!
//! ```rust
//! use pic_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_range(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(3, 0, 2, 2).unwrap_err().is_bounds_error());
//! ```
//!
//! # Dependencies
//!
//! - [`thiserror`] - For derive macro error implementation
//!
//! # Used By
//!
//! - [`crate::view::PixelView`] - Pixel access and construction
//! - [`crate::frame`] - Ingress/egress adapters
//! - `pic-ops` - Pattern search propagates [`Error::OutOfRange`] unchanged

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or reading a pixel view.
///
/// # Categories
///
/// - **Access errors**: [`OutOfRange`](Error::OutOfRange)
/// - **Construction errors**: [`InvalidStride`](Error::InvalidStride),
///   [`BufferTooSmall`](Error::BufferTooSmall)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Pixel coordinates fall outside a view.
    ///
    /// Raised by [`PixelView::at`](crate::PixelView::at) when `(x, y)` is not
    /// inside `[0, width) x [0, height)` of the view that received it. For a
    /// relative view the coordinate and dimensions are those of the hop in
    /// the chain that rejected the access.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_core::Error;
    ///
    /// let err = Error::out_of_range(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of range for view {width}x{height}")]
    OutOfRange {
        /// X coordinate that was out of range
        x: u32,
        /// Y coordinate that was out of range
        y: u32,
        /// View width
        width: u32,
        /// View height
        height: u32,
    },

    /// Stride is too small for the given width.
    ///
    /// The row length of an RGBA buffer must be at least `4 * width` bytes.
    #[error("stride {stride} is less than minimum {min_stride} for width {width}")]
    InvalidStride {
        /// Provided stride
        stride: usize,
        /// Minimum required stride
        min_stride: usize,
        /// Rectangle width
        width: u32,
    },

    /// Backing buffer cannot hold the described rectangle.
    #[error("buffer of {len} bytes is too small, {required} bytes required")]
    BufferTooSmall {
        /// Actual buffer length
        len: usize,
        /// Bytes needed for the rectangle at the given stride
        required: usize,
    },
}

impl Error {
    /// Creates an [`Error::OutOfRange`] error.
    #[inline]
    pub fn out_of_range(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfRange {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidStride`] error.
    #[inline]
    pub fn invalid_stride(stride: usize, min_stride: usize, width: u32) -> Self {
        Self::InvalidStride {
            stride,
            min_stride,
            width,
        }
    }

    /// Creates an [`Error::BufferTooSmall`] error.
    #[inline]
    pub fn buffer_too_small(len: usize, required: usize) -> Self {
        Self::BufferTooSmall { len, required }
    }

    /// Returns `true` if this is an access error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }
}
