//! The 8-bit RGBA pixel value.
//!
//! Every buffer in this crate stores exactly four bytes per pixel in
//! R, G, B, A order. [`Rgba`] is the value returned by pixel access and has
//! the same layout as one pixel in memory.

/// Number of bytes occupied by one pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A single 8-bit RGBA pixel.
///
/// # Example
///
/// ```rust
/// use pic_core::Rgba;
///
/// let px = Rgba::new(255, 128, 0, 255);
/// assert_eq!(px.to_array(), [255, 128, 0, 255]);
/// assert_eq!(Rgba::from([1, 2, 3, 4]).b, 3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgba {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha channel
    pub a: u8,
}

impl Rgba {
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    /// Creates a pixel from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a pixel with the same value in every channel.
    #[inline]
    pub const fn splat(v: u8) -> Self {
        Self::new(v, v, v, v)
    }

    /// Reads a pixel from the first four bytes of `bytes`.
    ///
    /// # Panics
    ///
    /// Panics if `bytes` is shorter than [`BYTES_PER_PIXEL`].
    #[inline]
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2], bytes[3])
    }

    /// Returns the channels as `[r, g, b, a]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<[u8; 4]> for Rgba {
    #[inline]
    fn from(v: [u8; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

impl From<Rgba> for [u8; 4] {
    #[inline]
    fn from(px: Rgba) -> Self {
        px.to_array()
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}
