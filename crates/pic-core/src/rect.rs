//! Rectangle type for pixel view bounds and sub-regions.
//!
//! # Coordinate System
//!
//! All coordinates use the standard image convention:
//! - Origin (0, 0) is at the **top-left** corner
//! - X increases to the right
//! - Y increases downward
//!
//! The min corner is inclusive, the max corner exclusive:
//!
//! ```text
//! (x,y) ──────────────┐
//!   │                 │
//!   │   width x height│
//!   └──────────── (right, bottom)   <- not part of the rectangle
//! ```
//!
//! # Usage
//!
//! ```rust
//! use pic_core::Rect;
//!
//! // Two-corner form, as used by sub-region derivation
//! let rect = Rect::from_corners(1, 0, 2, 2);
//! assert_eq!((rect.width, rect.height), (1, 2));
//! assert!(rect.contains(1, 1));
//! assert!(!rect.contains(2, 1));
//! ```
//!
//! # Used By
//!
//! - [`crate::view::PixelView`] - View bounds, sub-region selection
//! - [`crate::frame`] - External image rectangles

/// A rectangle defined by origin (x, y) and dimensions (width, height).
///
/// A rectangle with zero width or height is empty and covers no pixels.
///
/// # Example
///
/// ```rust
/// use pic_core::Rect;
///
/// let rect = Rect::new(30, 30, 120, 90);
/// assert_eq!(rect.right(), 150);
/// assert_eq!(rect.bottom(), 120);
/// assert_eq!(rect.area(), 10_800);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle with the given origin and dimensions.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from origin (0, 0) with given dimensions.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// Creates a rectangle from two corner points.
    ///
    /// `(x0, y0)` is the inclusive min corner and `(x1, y1)` the exclusive
    /// max corner. Swapped coordinates are normalized.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_core::Rect;
    ///
    /// let rect = Rect::from_corners(150, 120, 30, 30);
    /// assert_eq!(rect, Rect::new(30, 30, 120, 90));
    /// ```
    #[inline]
    pub fn from_corners(x0: u32, y0: u32, x1: u32, y1: u32) -> Self {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self::new(min_x, min_y, max_x - min_x, max_y - min_y)
    }

    /// Returns the inclusive min corner `(x, y)`.
    #[inline]
    pub const fn min(&self) -> (u32, u32) {
        (self.x, self.y)
    }

    /// Returns the exclusive max corner `(right, bottom)`.
    #[inline]
    pub const fn max(&self) -> (u32, u32) {
        (self.right(), self.bottom())
    }

    /// Returns the X coordinate of the right edge (exclusive).
    ///
    /// Saturates instead of wrapping for rectangles at the edge of `u32`.
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Returns the Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Returns the area of the rectangle in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if the rectangle has zero area.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if the point (px, py) is inside this rectangle.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_core::Rect;
    ///
    /// let rect = Rect::new(30, 30, 120, 120);
    /// assert!(rect.contains(30, 30));
    /// assert!(rect.contains(149, 149));
    /// assert!(!rect.contains(150, 30));
    /// ```
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Returns an iterator over all (x, y) coordinates in this rectangle.
    ///
    /// Iterates row by row, left to right, top to bottom.
    #[inline]
    pub fn iter_coords(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (self.y..self.bottom()).flat_map(move |y| (self.x..self.right()).map(move |x| (x, y)))
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Rect({}, {}, {}x{})",
            self.x, self.y, self.width, self.height
        )
    }
}
