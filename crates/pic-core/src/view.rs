//! Pixel views over flat RGBA buffers.
//!
//! A [`PixelView`] is either:
//!
//! - **owning** - it holds an `Arc<Vec<u8>>` of RGBA bytes plus a row stride,
//!   or
//! - **relative** - it holds an `Arc` to a parent view and a rectangle in the
//!   parent's coordinate space. Reads are forwarded to the parent after
//!   translating by the rectangle's origin, hop by hop, until an owning view
//!   is reached.
//!
//! # Memory Layout
//!
//! ```text
//! offset(x, y) = y * stride + x * 4
//!
//! Memory: [R G B A R G B A ... pad]  <- Row 0 (stride bytes)
//!         [R G B A R G B A ... pad]  <- Row 1
//! ```
//!
//! Offsets always honor the stride. Buffers built by this crate (every copy
//! path) are tightly packed, `stride == 4 * width`.
//!
//! # Sharing
//!
//! Views are immutable after construction. Cloning a view, or deriving a
//! relative view from it, never copies pixel data: every view in a chain
//! reads the root's buffer and keeps it alive. Views are `Send + Sync` and
//! can be read from many threads at once.
//!
//! ```rust
//! use pic_core::{PixelView, Rect, Rgba};
//!
//! let view = PixelView::from_fn(4, 4, |x, y| Rgba::splat((y * 4 + x) as u8));
//!
//! // Zero-copy view of the bottom-right quadrant
//! let quad = view.sub_view_relative(Rect::new(2, 2, 2, 2));
//! assert_eq!(quad.at(1, 1)?, Rgba::splat(15));
//!
//! // Deep copy, isolated from the source
//! let copy = view.copy_sub_region(Rect::new(2, 2, 2, 2))?;
//! assert!(copy.equals(&quad)?);
//! # Ok::<(), pic_core::Error>(())
//! ```
//!
//! # Used By
//!
//! - [`crate::frame`] - Ingress/egress adapters
//! - `pic-ops` - Pattern search
//! - `pic-io` - PNG decode/encode

use crate::{Error, Rect, Result, Rgba, BYTES_PER_PIXEL};
use std::sync::{Arc, OnceLock};

/// A read-only view over RGBA pixel data.
///
/// See the [module documentation](self) for the storage model.
#[derive(Clone)]
pub struct PixelView {
    /// Owning: the view's rectangle (min is metadata only).
    /// Relative: the rectangle in the parent's local coordinates.
    bounds: Rect,
    storage: Storage,
}

#[derive(Clone)]
enum Storage {
    Owning { pixels: Arc<Vec<u8>>, stride: usize },
    Relative { parent: Arc<PixelView> },
}

/// Location of one pixel inside the root buffer of a chain.
pub(crate) struct Resolved<'a> {
    pub(crate) pixels: &'a [u8],
    pub(crate) stride: usize,
    pub(crate) offset: usize,
}

/// Zero-length buffer left behind in a view whose parent was detached.
fn detached_buffer() -> Arc<Vec<u8>> {
    static EMPTY: OnceLock<Arc<Vec<u8>>> = OnceLock::new();
    Arc::clone(EMPTY.get_or_init(|| Arc::new(Vec::new())))
}

/// Checks that `len` bytes can hold `rect` at `stride`.
///
/// The last row only needs `4 * width` bytes, so buffers whose final row
/// carries no padding are accepted.
fn validate_buffer(len: usize, rect: &Rect, stride: usize) -> Result<()> {
    let min_stride = rect.width as usize * BYTES_PER_PIXEL;
    if stride < min_stride {
        return Err(Error::invalid_stride(stride, min_stride, rect.width));
    }
    if rect.is_empty() {
        return Ok(());
    }
    let required = stride
        .checked_mul(rect.height as usize - 1)
        .and_then(|v| v.checked_add(min_stride))
        .unwrap_or(usize::MAX);
    if len < required {
        return Err(Error::buffer_too_small(len, required));
    }
    Ok(())
}

impl PixelView {
    /// Creates a tightly packed view filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgba::TRANSPARENT)
    }

    /// Creates a tightly packed view with every pixel set to `pixel`.
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        Self::from_fn(width, height, |_, _| pixel)
    }

    /// Creates a tightly packed view by evaluating `f` at every pixel.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_core::{PixelView, Rgba};
    ///
    /// let ramp = PixelView::from_fn(3, 1, |x, _| Rgba::splat(x as u8 * 10));
    /// assert_eq!(ramp.at(2, 0)?, Rgba::splat(20));
    /// # Ok::<(), pic_core::Error>(())
    /// ```
    pub fn from_fn<F>(width: u32, height: u32, mut f: F) -> Self
    where
        F: FnMut(u32, u32) -> Rgba,
    {
        let mut data = Vec::with_capacity(width as usize * height as usize * BYTES_PER_PIXEL);
        for y in 0..height {
            for x in 0..width {
                data.extend_from_slice(&f(x, y).to_array());
            }
        }
        let stride = width as usize * BYTES_PER_PIXEL;
        Self::owning(Rect::from_size(width, height), Arc::new(data), stride)
    }

    /// Creates a tightly packed view from row-major RGBA bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BufferTooSmall`] if `data` holds fewer than
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_buffer(
            Arc::new(data),
            Rect::from_size(width, height),
            width as usize * BYTES_PER_PIXEL,
        )
    }

    /// Wraps an external buffer without copying it.
    ///
    /// The view shares `pixels` with the caller; `rect` and `stride` are
    /// stored as given. Pixel (x, y) is read at `y * stride + x * 4`
    /// regardless of `rect`'s origin.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidStride`] if `stride < 4 * rect.width`
    /// - [`Error::BufferTooSmall`] if `pixels` cannot hold `rect.height` rows
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::sync::Arc;
    /// use pic_core::{PixelView, Rect};
    ///
    /// let shared = Arc::new(vec![7u8; 2 * 8]);
    /// let view = PixelView::from_buffer(shared.clone(), Rect::from_size(1, 2), 8)?;
    /// assert!(Arc::ptr_eq(view.shared_buffer(), &shared));
    /// # Ok::<(), pic_core::Error>(())
    /// ```
    pub fn from_buffer(pixels: Arc<Vec<u8>>, rect: Rect, stride: usize) -> Result<Self> {
        validate_buffer(pixels.len(), &rect, stride)?;
        Ok(Self::owning(rect, pixels, stride))
    }

    /// Copies an external buffer into a new tightly packed view.
    ///
    /// The result keeps `rect` as its bounds but its stride becomes
    /// `4 * rect.width`, whatever the source stride was.
    ///
    /// # Errors
    ///
    /// Same as [`from_buffer`](Self::from_buffer).
    pub fn from_buffer_copy(pixels: &[u8], rect: Rect, stride: usize) -> Result<Self> {
        validate_buffer(pixels.len(), &rect, stride)?;
        let row_len = rect.width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_len * rect.height as usize);
        if row_len > 0 {
            for row in 0..rect.height as usize {
                let start = row * stride;
                data.extend_from_slice(&pixels[start..start + row_len]);
            }
        }
        Ok(Self::owning(rect, Arc::new(data), row_len))
    }

    /// Builds a relative view over an already shared parent.
    ///
    /// This is [`sub_view_relative`](Self::sub_view_relative) without the
    /// allocation of a new parent handle: callers deriving many windows from
    /// one view can wrap it in an `Arc` once and reuse it.
    #[inline]
    pub fn relative(parent: Arc<PixelView>, rect: Rect) -> Self {
        Self {
            bounds: rect,
            storage: Storage::Relative { parent },
        }
    }

    #[inline]
    fn owning(bounds: Rect, pixels: Arc<Vec<u8>>, stride: usize) -> Self {
        Self {
            bounds,
            storage: Storage::Owning { pixels, stride },
        }
    }

    /// Returns the view's rectangle.
    ///
    /// For a relative view this is the region in its parent's coordinates.
    #[inline]
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the view width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.bounds.width
    }

    /// Returns the view height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.bounds.height
    }

    /// Returns the view dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.bounds.width, self.bounds.height)
    }

    /// Returns `true` if the view contains no pixels.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Returns `true` if this view forwards reads to a parent.
    #[inline]
    pub fn is_relative(&self) -> bool {
        matches!(self.storage, Storage::Relative { .. })
    }

    /// Returns the parent of a relative view.
    #[inline]
    pub fn parent(&self) -> Option<&PixelView> {
        match &self.storage {
            Storage::Owning { .. } => None,
            Storage::Relative { parent } => Some(&**parent),
        }
    }

    /// Returns the owning view at the end of the relative chain.
    pub fn root(&self) -> &PixelView {
        let mut view = self;
        while let Storage::Relative { parent } = &view.storage {
            view = &**parent;
        }
        view
    }

    /// Number of parent hops between this view and its owning root.
    pub fn depth(&self) -> usize {
        let mut depth = 0;
        let mut view = self;
        while let Storage::Relative { parent } = &view.storage {
            depth += 1;
            view = &**parent;
        }
        depth
    }

    /// Takes the parent handle out, leaving an empty owning view behind.
    fn take_parent(&mut self) -> Option<Arc<PixelView>> {
        if !self.is_relative() {
            return None;
        }
        let detached = Storage::Owning {
            pixels: detached_buffer(),
            stride: 0,
        };
        match std::mem::replace(&mut self.storage, detached) {
            Storage::Relative { parent } => Some(parent),
            Storage::Owning { .. } => None,
        }
    }

    /// Buffer and stride of the owning root.
    fn root_storage(&self) -> (&Arc<Vec<u8>>, usize) {
        let mut view = self;
        loop {
            match &view.storage {
                Storage::Owning { pixels, stride } => return (pixels, *stride),
                Storage::Relative { parent } => view = &**parent,
            }
        }
    }

    /// Returns the buffer shared by every view in the chain.
    #[inline]
    pub fn shared_buffer(&self) -> &Arc<Vec<u8>> {
        self.root_storage().0
    }

    /// Returns the raw bytes of the owning root.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        self.root_storage().0.as_slice()
    }

    /// Returns the row length in bytes of the owning root.
    #[inline]
    pub fn stride(&self) -> usize {
        self.root_storage().1
    }

    /// Maps a local coordinate to its byte offset in the root buffer.
    ///
    /// Every hop checks the coordinate against its own width and height.
    pub(crate) fn resolve(&self, mut x: u32, mut y: u32) -> Result<Resolved<'_>> {
        let mut view = self;
        loop {
            let b = view.bounds;
            if x >= b.width || y >= b.height {
                return Err(Error::out_of_range(x, y, b.width, b.height));
            }
            match &view.storage {
                Storage::Owning { pixels, stride } => {
                    return Ok(Resolved {
                        pixels: pixels.as_slice(),
                        stride: *stride,
                        offset: y as usize * *stride + x as usize * BYTES_PER_PIXEL,
                    });
                }
                Storage::Relative { parent } => {
                    // A saturated coordinate is rejected by the parent's check.
                    x = x.saturating_add(b.x);
                    y = y.saturating_add(b.y);
                    view = &**parent;
                }
            }
        }
    }

    /// Returns the pixel at (x, y) in local coordinates.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if (x, y) lies outside this view, or if a
    /// relative view's region reaches outside one of its ancestors.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_core::{PixelView, Rgba};
    ///
    /// let view = PixelView::filled(2, 2, Rgba::splat(9));
    /// assert_eq!(view.at(1, 1)?, Rgba::splat(9));
    /// assert!(view.at(2, 0).is_err());
    /// # Ok::<(), pic_core::Error>(())
    /// ```
    #[inline]
    pub fn at(&self, x: u32, y: u32) -> Result<Rgba> {
        let r = self.resolve(x, y)?;
        Ok(Rgba::from_bytes(&r.pixels[r.offset..r.offset + BYTES_PER_PIXEL]))
    }

    /// Returns the pixel at (x, y), or `None` if it cannot be read.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        self.at(x, y).ok()
    }

    /// Returns the bytes of `len` consecutive pixels starting at (x, y).
    ///
    /// A horizontal run is contiguous in the root buffer through any chain,
    /// so this costs two lookups regardless of `len`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any pixel of the run cannot be read.
    pub fn row_bytes(&self, x: u32, y: u32, len: u32) -> Result<&[u8]> {
        if len == 0 {
            return Ok(&[]);
        }
        let last = x
            .checked_add(len - 1)
            .ok_or_else(|| Error::out_of_range(u32::MAX, y, self.width(), self.height()))?;
        // Both ends pass every hop's check, so everything between does too.
        self.resolve(last, y)?;
        let first = self.resolve(x, y)?;
        let end = first.offset + len as usize * BYTES_PER_PIXEL;
        Ok(&first.pixels[first.offset..end])
    }

    /// Verifies that every pixel of `rect` can be read through this view.
    pub(crate) fn check_region(&self, rect: &Rect) -> Result<()> {
        if rect.is_empty() {
            return Ok(());
        }
        let far_x = rect.x.checked_add(rect.width - 1);
        let far_y = rect.y.checked_add(rect.height - 1);
        let (Some(far_x), Some(far_y)) = (far_x, far_y) else {
            return Err(Error::out_of_range(
                rect.right(),
                rect.bottom(),
                self.width(),
                self.height(),
            ));
        };
        self.resolve(rect.x, rect.y)?;
        self.resolve(far_x, far_y)?;
        Ok(())
    }

    /// Compares two views pixel by pixel.
    ///
    /// Views of different dimensions are never equal. Pixels are compared in
    /// row-major order and the comparison stops at the first difference. Two
    /// empty views of the same dimensions are equal.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if a pixel reached before any difference
    /// cannot be read on either side.
    pub fn equals(&self, other: &PixelView) -> Result<bool> {
        if self.dimensions() != other.dimensions() {
            return Ok(false);
        }
        let (width, height) = self.dimensions();
        for y in 0..height {
            match (self.row_bytes(0, y, width), other.row_bytes(0, y, width)) {
                (Ok(a), Ok(b)) => {
                    if a != b {
                        return Ok(false);
                    }
                }
                // Part of the row is unreadable: walk it up to the first
                // difference or the first pixel that fails.
                _ => {
                    for x in 0..width {
                        if self.at(x, y)? != other.at(x, y)? {
                            return Ok(false);
                        }
                    }
                }
            }
        }
        Ok(true)
    }

    /// Copies a region into a new, isolated, tightly packed view.
    ///
    /// `rect` is in this view's local coordinates. Pixel (i, j) of the result
    /// is this view's `(rect.x + i, rect.y + j)`; the result's bounds are
    /// `Rect::from_size(rect.width, rect.height)`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if `rect` is not readable through this
    /// view. Nothing is allocated in that case.
    ///
    /// # Example
    ///
    /// ```rust
    /// use pic_core::{PixelView, Rect, Rgba};
    ///
    /// let view = PixelView::from_rgba(2, 2, vec![1, 1, 1, 1, 2, 2, 2, 2, 3, 3, 3, 3, 4, 4, 4, 4])?;
    /// let column = view.copy_sub_region(Rect::from_corners(1, 0, 2, 2))?;
    /// assert_eq!(column.dimensions(), (1, 2));
    /// assert_eq!(column.pixels(), &[2, 2, 2, 2, 4, 4, 4, 4]);
    /// # Ok::<(), pic_core::Error>(())
    /// ```
    pub fn copy_sub_region(&self, rect: Rect) -> Result<PixelView> {
        self.check_region(&rect)?;
        let row_len = rect.width as usize * BYTES_PER_PIXEL;
        let mut data = Vec::with_capacity(row_len * rect.height as usize);
        if !rect.is_empty() {
            for y in rect.y..rect.bottom() {
                data.extend_from_slice(self.row_bytes(rect.x, y, rect.width)?);
            }
        }
        Ok(Self::owning(
            Rect::from_size(rect.width, rect.height),
            Arc::new(data),
            row_len,
        ))
    }

    /// Derives a relative view of `rect` without copying.
    ///
    /// `rect` is stored verbatim in this view's local coordinates and is only
    /// checked when pixels are read. Use
    /// [`sub_view_checked`](Self::sub_view_checked) to fail early instead.
    pub fn sub_view_relative(&self, rect: Rect) -> PixelView {
        Self::relative(Arc::new(self.clone()), rect)
    }

    /// Derives a relative view, verifying `rect` is readable first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] if any pixel of `rect` cannot be read
    /// through this view.
    pub fn sub_view_checked(&self, rect: Rect) -> Result<PixelView> {
        self.check_region(&rect)?;
        Ok(self.sub_view_relative(rect))
    }
}

impl Drop for PixelView {
    /// Unlinks a relative chain one level per iteration, so dropping a deep
    /// chain uses constant stack.
    fn drop(&mut self) {
        let mut next = self.take_parent();
        while let Some(parent) = next {
            next = Arc::into_inner(parent).and_then(|mut view| view.take_parent());
        }
    }
}

impl PartialEq for PixelView {
    /// An access error compares unequal.
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl std::fmt::Debug for PixelView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelView")
            .field("bounds", &self.bounds)
            .field("stride", &self.stride())
            .field("depth", &self.depth())
            .finish()
    }
}
