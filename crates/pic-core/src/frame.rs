//! External RGBA image representation and the adapters to and from it.
//!
//! [`RgbaFrame`] is the rectangle + stride + bytes layout used by
//! framebuffers and decoders at the edges of an application: pixel (x, y),
//! in the frame's own coordinates, lives at
//! `(y - rect.y) * stride + (x - rect.x) * 4`. [`RgbaFrameRef`] is the
//! borrowed form.
//!
//! | direction | copying | non-copying |
//! |-----------|---------|-------------|
//! | frame → view | [`PixelView::from_frame_copy`] | [`PixelView::from_frame`] |
//! | view → frame | [`PixelView::to_frame`] | [`PixelView::as_frame_ref`] |
//!
//! The non-copying ingress moves the frame's `Vec` into the view. The
//! non-copying egress borrows the root buffer of the view starting at the
//! view's first pixel, so it works for relative views too.
//!
//! ```rust
//! use pic_core::{PixelView, Rect, RgbaFrame};
//!
//! let frame = RgbaFrame::new(Rect::new(10, 10, 4, 3));
//! let view = PixelView::from_frame(frame)?;
//! let window = view.sub_view_relative(Rect::new(1, 1, 2, 2));
//!
//! let borrowed = window.as_frame_ref()?;
//! assert_eq!(borrowed.stride, 16);
//! assert_eq!(borrowed.rect, Rect::new(1, 1, 2, 2));
//! # Ok::<(), pic_core::Error>(())
//! ```

use crate::{PixelView, Rect, Result, Rgba, BYTES_PER_PIXEL};

/// An owned, strided RGBA image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaFrame {
    /// Image rectangle; its origin only positions the frame
    pub rect: Rect,
    /// Bytes per row
    pub stride: usize,
    /// Pixel bytes, R G B A order
    pub pix: Vec<u8>,
}

/// A borrowed, strided RGBA image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RgbaFrameRef<'a> {
    /// Image rectangle; its origin only positions the frame
    pub rect: Rect,
    /// Bytes per row
    pub stride: usize,
    /// Pixel bytes, R G B A order
    pub pix: &'a [u8],
}

/// Byte offset of (x, y), given in `rect` coordinates.
fn pix_offset(rect: &Rect, stride: usize, x: u32, y: u32) -> Option<usize> {
    if !rect.contains(x, y) {
        return None;
    }
    Some((y - rect.y) as usize * stride + (x - rect.x) as usize * BYTES_PER_PIXEL)
}

impl RgbaFrame {
    /// Creates a tightly packed, zeroed frame.
    pub fn new(rect: Rect) -> Self {
        let stride = rect.width as usize * BYTES_PER_PIXEL;
        Self {
            rect,
            stride,
            pix: vec![0; stride * rect.height as usize],
        }
    }

    /// Borrows this frame.
    #[inline]
    pub fn as_frame_ref(&self) -> RgbaFrameRef<'_> {
        RgbaFrameRef {
            rect: self.rect,
            stride: self.stride,
            pix: &self.pix,
        }
    }

    /// Byte offset of (x, y) in frame coordinates, if inside the frame.
    #[inline]
    pub fn pix_offset(&self, x: u32, y: u32) -> Option<usize> {
        pix_offset(&self.rect, self.stride, x, y)
    }

    /// Returns the pixel at (x, y) in frame coordinates.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        self.as_frame_ref().pixel(x, y)
    }

    /// Writes the pixel at (x, y) in frame coordinates.
    ///
    /// Returns `false` if (x, y) is outside the frame.
    pub fn set_pixel(&mut self, x: u32, y: u32, px: Rgba) -> bool {
        match self.pix_offset(x, y) {
            Some(off) if off + BYTES_PER_PIXEL <= self.pix.len() => {
                self.pix[off..off + BYTES_PER_PIXEL].copy_from_slice(&px.to_array());
                true
            }
            _ => false,
        }
    }
}

impl RgbaFrameRef<'_> {
    /// Byte offset of (x, y) in frame coordinates, if inside the frame.
    #[inline]
    pub fn pix_offset(&self, x: u32, y: u32) -> Option<usize> {
        pix_offset(&self.rect, self.stride, x, y)
    }

    /// Returns the pixel at (x, y) in frame coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let off = self.pix_offset(x, y)?;
        self.pix
            .get(off..off + BYTES_PER_PIXEL)
            .map(Rgba::from_bytes)
    }
}

impl PixelView {
    /// Wraps a frame without copying its bytes.
    ///
    /// # Errors
    ///
    /// Fails like [`PixelView::from_buffer`] when the frame's stride or
    /// buffer cannot describe its rectangle.
    pub fn from_frame(frame: RgbaFrame) -> Result<Self> {
        Self::from_buffer(std::sync::Arc::new(frame.pix), frame.rect, frame.stride)
    }

    /// Copies a frame into a new tightly packed view.
    ///
    /// # Errors
    ///
    /// Same as [`from_frame`](Self::from_frame).
    pub fn from_frame_copy(frame: &RgbaFrameRef<'_>) -> Result<Self> {
        Self::from_buffer_copy(frame.pix, frame.rect, frame.stride)
    }

    /// Copies this view into a new tightly packed frame.
    ///
    /// The frame's rectangle is the view's [`bounds`](PixelView::bounds).
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](crate::Error::OutOfRange) if a relative
    /// view reaches outside one of its ancestors.
    pub fn to_frame(&self) -> Result<RgbaFrame> {
        let (width, height) = self.dimensions();
        let stride = width as usize * BYTES_PER_PIXEL;
        let mut pix = Vec::with_capacity(stride * height as usize);
        for y in 0..height {
            pix.extend_from_slice(self.row_bytes(0, y, width)?);
        }
        Ok(RgbaFrame {
            rect: self.bounds(),
            stride,
            pix,
        })
    }

    /// Borrows this view as a frame without copying.
    ///
    /// The returned bytes start at the view's pixel (0, 0) inside the root
    /// buffer and use the root's stride. An empty view yields an empty
    /// slice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`](crate::Error::OutOfRange) if a relative
    /// view reaches outside one of its ancestors.
    pub fn as_frame_ref(&self) -> Result<RgbaFrameRef<'_>> {
        let bounds = self.bounds();
        if bounds.is_empty() {
            return Ok(RgbaFrameRef {
                rect: bounds,
                stride: self.stride(),
                pix: &[],
            });
        }
        let first = self.resolve(0, 0)?;
        let last = self.resolve(bounds.width - 1, bounds.height - 1)?;
        Ok(RgbaFrameRef {
            rect: bounds,
            stride: first.stride,
            pix: &first.pixels[first.offset..last.offset + BYTES_PER_PIXEL],
        })
    }
}

impl TryFrom<RgbaFrame> for PixelView {
    type Error = crate::Error;

    fn try_from(frame: RgbaFrame) -> Result<Self> {
        Self::from_frame(frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use std::sync::Arc;

    fn numbered(rect: Rect) -> RgbaFrame {
        let mut frame = RgbaFrame::new(rect);
        for (x, y) in rect.iter_coords() {
            let v = ((y - rect.y) * rect.width + (x - rect.x)) as u8;
            frame.set_pixel(x, y, Rgba::new(v, v, v, 255));
        }
        frame
    }

    #[test]
    fn test_frame_pixel_addressing() {
        let frame = numbered(Rect::new(5, 5, 3, 2));
        assert_eq!(frame.pix_offset(5, 5), Some(0));
        assert_eq!(frame.pix_offset(7, 6), Some(20));
        assert_eq!(frame.pix_offset(4, 5), None);
        assert_eq!(frame.pixel(6, 6), Some(Rgba::new(4, 4, 4, 255)));
    }

    #[test]
    fn test_from_frame_no_copy() {
        let frame = numbered(Rect::new(5, 5, 3, 2));
        let ptr = frame.pix.as_ptr();
        let view = PixelView::from_frame(frame).unwrap();
        assert_eq!(view.pixels().as_ptr(), ptr);
        assert_eq!(view.bounds(), Rect::new(5, 5, 3, 2));
        assert_eq!(view.at(1, 1).unwrap(), Rgba::new(4, 4, 4, 255));
    }

    #[test]
    fn test_from_frame_copy_repacks() {
        // 2x2 inside a 3-pixel-wide stride
        let parent = numbered(Rect::from_size(3, 2));
        let padded = RgbaFrameRef {
            rect: Rect::from_size(2, 2),
            stride: parent.stride,
            pix: &parent.pix,
        };
        let view = PixelView::from_frame_copy(&padded).unwrap();
        assert_eq!(view.stride(), 8);
        assert_eq!(view.at(0, 1).unwrap(), Rgba::new(3, 3, 3, 255));
        assert_ne!(view.pixels().as_ptr(), parent.pix.as_ptr());
    }

    #[test]
    fn test_from_frame_rejects_short_buffer() {
        let frame = RgbaFrame {
            rect: Rect::from_size(2, 2),
            stride: 8,
            pix: vec![0; 8],
        };
        assert_eq!(PixelView::try_from(frame).unwrap_err(), Error::buffer_too_small(8, 16));
    }

    #[test]
    fn test_to_frame_copies() {
        let view = PixelView::from_frame(numbered(Rect::from_size(4, 4))).unwrap();
        let sub = view.sub_view_relative(Rect::new(1, 2, 2, 2));
        let frame = sub.to_frame().unwrap();
        assert_eq!(frame.rect, Rect::new(1, 2, 2, 2));
        assert_eq!(frame.stride, 8);
        assert_eq!(frame.pixel(1, 2), Some(Rgba::new(9, 9, 9, 255)));
        assert_eq!(frame.pixel(2, 3), Some(Rgba::new(14, 14, 14, 255)));
    }

    #[test]
    fn test_as_frame_ref_aliases_root() {
        let view = PixelView::from_frame(numbered(Rect::from_size(4, 4))).unwrap();
        let sub = view
            .sub_view_relative(Rect::new(1, 1, 3, 3))
            .sub_view_relative(Rect::new(1, 1, 2, 2));
        let borrowed = sub.as_frame_ref().unwrap();
        assert_eq!(borrowed.stride, 16);
        // starts at root pixel (2, 2)
        assert_eq!(borrowed.pix.as_ptr(), view.pixels()[2 * 16 + 2 * 4..].as_ptr());
        assert_eq!(borrowed.pixel(1, 1), Some(Rgba::new(10, 10, 10, 255)));
        assert_eq!(borrowed.pixel(2, 2), Some(Rgba::new(15, 15, 15, 255)));

        let copy = PixelView::from_frame_copy(&borrowed).unwrap();
        assert!(copy.equals(&sub).unwrap());
    }

    #[test]
    fn test_as_frame_ref_out_of_range() {
        let view = PixelView::new(2, 2);
        let sub = view.sub_view_relative(Rect::new(1, 1, 2, 2));
        assert!(sub.as_frame_ref().unwrap_err().is_bounds_error());
    }

    #[test]
    fn test_as_frame_ref_owning() {
        let shared = Arc::new(vec![3u8; 32]);
        let view = PixelView::from_buffer(shared.clone(), Rect::from_size(2, 2), 16).unwrap();
        let borrowed = view.as_frame_ref().unwrap();
        assert_eq!(borrowed.pix.len(), 16 + 8);
        assert_eq!(borrowed.pix.as_ptr(), shared.as_ptr());
    }
}
