//! PNG reading and writing.
//!
//! Every decoded image becomes an 8-bit RGBA [`PixelView`]: palette images
//! are expanded, 16-bit samples keep their high byte, gray is replicated
//! into R, G and B, and missing alpha is opaque.
//!
//! Writing always emits 8-bit RGBA. Relative views are flattened row by row,
//! so a sub-view can be written without copying it first.
//!
//! ```rust,ignore
//! use pic_io::{read_png, write_png};
//!
//! let shot = read_png("screen.png")?;
//! write_png("button.png", &shot.sub_view_relative(Rect::new(10, 10, 64, 24)))?;
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Seek, Write};
use std::path::Path;

use pic_core::{PixelView, BYTES_PER_PIXEL};
use tracing::debug;

use crate::{IoError, IoResult};

/// Reads a PNG file into an owning view.
pub fn read_png<P: AsRef<Path>>(path: P) -> IoResult<PixelView> {
    let path = path.as_ref();
    debug!(path = %path.display(), "reading png");
    let file = File::open(path)?;
    decode_png(BufReader::new(file))
}

/// Writes a view to a PNG file.
pub fn write_png<P: AsRef<Path>>(path: P, view: &PixelView) -> IoResult<()> {
    let path = path.as_ref();
    debug!(path = %path.display(), width = view.width(), height = view.height(), "writing png");
    let mut writer = BufWriter::new(File::create(path)?);
    encode_png(&mut writer, view)?;
    writer.flush()?;
    Ok(())
}

/// Decodes a PNG stream into an owning, tightly packed view.
pub fn decode_png<R: BufRead + Seek>(reader: R) -> IoResult<PixelView> {
    let mut decoder = png::Decoder::new(reader);
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("cannot determine output buffer size".into()))?;
    let mut buf = vec![0u8; buf_size];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e: png::DecodingError| IoError::DecodeError(e.to_string()))?;
    buf.truncate(info.buffer_size());

    debug!(
        width = info.width,
        height = info.height,
        color = ?info.color_type,
        depth = ?info.bit_depth,
        "decoded png"
    );

    if info.bit_depth != png::BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "{:?} {:?}",
            info.color_type, info.bit_depth
        )));
    }

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|c| [c[0], c[1], c[2], 0xFF])
            .collect(),
        png::ColorType::Grayscale => buf.iter().flat_map(|&g| [g, g, g, 0xFF]).collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|ga| [ga[0], ga[0], ga[0], ga[1]])
            .collect(),
        other => {
            return Err(IoError::UnsupportedFormat(format!("{other:?}")));
        }
    };

    Ok(PixelView::from_rgba(info.width, info.height, rgba)?)
}

/// Encodes a view as an 8-bit RGBA PNG.
///
/// # Errors
///
/// [`IoError::Core`] if a relative view reaches outside one of its
/// ancestors, [`IoError::EncodeError`] for empty views or encoder failures.
pub fn encode_png<W: Write>(writer: W, view: &PixelView) -> IoResult<()> {
    let (width, height) = view.dimensions();
    if view.is_empty() {
        return Err(IoError::EncodeError(format!(
            "cannot encode empty image {width}x{height}"
        )));
    }

    // Flatten first so an unreadable view fails before any bytes are written.
    let frame = view.to_frame()?;
    debug_assert_eq!(frame.pix.len(), width as usize * height as usize * BYTES_PER_PIXEL);

    let mut encoder = png::Encoder::new(writer, width, height);
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);
    encoder.set_compression(png::Compression::default());

    let mut png_writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .write_image_data(&frame.pix)
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    png_writer
        .finish()
        .map_err(|e| IoError::EncodeError(e.to_string()))?;
    Ok(())
}
