//! Uncompressed 24-bit BMP reading and grayscale writing.
//!
//! Layout: 14-byte file header, a BITMAPINFOHEADER (40 bytes or a larger
//! variant), then pixel rows in B, G, R order, each padded to a 4-byte
//! boundary. Rows are stored bottom-up unless the height is negative.
//!
//! Decoded images always have row 0 at the top. Written files are bottom-up
//! with a 40-byte info header and the intensity repeated in all three
//! channels.

use std::fs;
use std::path::Path;

use ndarray::Array3;
use tracing::debug;

use crate::error::{FilterError, Result};
use crate::filters::grayscale::grayscale_rgb_u8;
use crate::grid::PixelGrid;

const SIGNATURE: &[u8; 2] = b"BM";
const FILE_HEADER_LEN: usize = 14;
const INFO_HEADER_LEN: usize = 40;
const BITS_PER_PIXEL: u16 = 24;
const BI_RGB: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BmpHeader {
    pub width: usize,
    pub height: usize,
    pub top_down: bool,
    pub data_offset: usize,
}

impl BmpHeader {
    /// Bytes per stored row including padding.
    pub fn stride(&self) -> usize {
        row_stride(self.width)
    }
}

#[inline]
pub fn row_stride(width: usize) -> usize {
    (width * 3 + 3) & !3
}

pub fn parse_header(bytes: &[u8]) -> Result<BmpHeader> {
    if bytes.len() < FILE_HEADER_LEN + INFO_HEADER_LEN {
        return Err(FilterError::format(format!(
            "file too short for a bitmap header ({} bytes)",
            bytes.len()
        )));
    }
    if &bytes[0..2] != SIGNATURE {
        return Err(FilterError::format(format!(
            "bad signature {:#04x} {:#04x}, expected 'BM'",
            bytes[0], bytes[1]
        )));
    }

    let data_offset = read_u32(bytes, 10) as usize;
    let info_len = read_u32(bytes, 14) as usize;
    let width = read_i32(bytes, 18);
    let height = read_i32(bytes, 22);
    let bpp = read_u16(bytes, 28);
    let compression = read_u32(bytes, 30);

    if info_len < INFO_HEADER_LEN {
        return Err(FilterError::format(format!(
            "unsupported info header of {info_len} bytes"
        )));
    }
    if bpp != BITS_PER_PIXEL {
        return Err(FilterError::format(format!(
            "{bpp}-bit images are not supported, expected {BITS_PER_PIXEL}-bit"
        )));
    }
    if compression != BI_RGB {
        return Err(FilterError::format(format!(
            "compressed bitmaps are not supported (compression {compression})"
        )));
    }
    if width <= 0 || height == 0 {
        return Err(FilterError::format(format!(
            "invalid dimensions {width}x{height}"
        )));
    }
    if data_offset < FILE_HEADER_LEN + info_len {
        return Err(FilterError::format(format!(
            "pixel data offset {data_offset} overlaps the header"
        )));
    }

    Ok(BmpHeader {
        width: width as usize,
        height: height.unsigned_abs() as usize,
        top_down: height < 0,
        data_offset,
    })
}

/// Decode the pixels of a 24-bit bitmap into an `(height, width, 3)` RGB array.
pub fn decode_rgb(bytes: &[u8]) -> Result<Array3<u8>> {
    let header = parse_header(bytes)?;
    let BmpHeader { width, height, .. } = header;
    let stride = header.stride();

    // The final row's padding is sometimes omitted by writers.
    let needed = header.data_offset + stride * (height - 1) + width * 3;
    if bytes.len() < needed {
        return Err(FilterError::format(format!(
            "pixel data truncated: need {needed} bytes, file has {}",
            bytes.len()
        )));
    }

    let mut rgb = Array3::<u8>::zeros((height, width, 3));
    for stored in 0..height {
        let y = if header.top_down { stored } else { height - 1 - stored };
        let start = header.data_offset + stored * stride;
        let row = &bytes[start..start + width * 3];
        for (x, bgr) in row.chunks_exact(3).enumerate() {
            rgb[[y, x, 0]] = bgr[2];
            rgb[[y, x, 1]] = bgr[1];
            rgb[[y, x, 2]] = bgr[0];
        }
    }

    Ok(rgb)
}

pub fn read_rgb(path: impl AsRef<Path>) -> Result<Array3<u8>> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| FilterError::io(path, e))?;
    let rgb = decode_rgb(&bytes)?;
    debug!(path = %path.display(), width = rgb.dim().1, height = rgb.dim().0, "decoded bitmap");
    Ok(rgb)
}

/// Read a bitmap and convert it to intensities.
pub fn decode(path: impl AsRef<Path>) -> Result<PixelGrid> {
    let rgb = read_rgb(path)?;
    grayscale_rgb_u8(rgb.view())
}

/// Serialize `grid` as a 24-bit bitmap with equal B, G and R.
pub fn encode_gray(grid: &PixelGrid) -> Vec<u8> {
    let (width, height) = (grid.width(), grid.height());
    let stride = row_stride(width);
    let image_size = stride * height;
    let data_offset = FILE_HEADER_LEN + INFO_HEADER_LEN;
    let file_size = data_offset + image_size;

    let mut out = Vec::with_capacity(file_size);

    // File header
    out.extend_from_slice(SIGNATURE);
    out.extend_from_slice(&(file_size as u32).to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&0u16.to_le_bytes());
    out.extend_from_slice(&(data_offset as u32).to_le_bytes());

    // Info header
    out.extend_from_slice(&(INFO_HEADER_LEN as u32).to_le_bytes());
    out.extend_from_slice(&(width as i32).to_le_bytes());
    out.extend_from_slice(&(height as i32).to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&BITS_PER_PIXEL.to_le_bytes());
    out.extend_from_slice(&BI_RGB.to_le_bytes());
    out.extend_from_slice(&(image_size as u32).to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0i32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());
    out.extend_from_slice(&0u32.to_le_bytes());

    let padding = stride - width * 3;
    let view = grid.view();
    for y in (0..height).rev() {
        for &value in view.row(y).iter() {
            out.extend_from_slice(&[value, value, value]);
        }
        out.extend(std::iter::repeat(0u8).take(padding));
    }

    out
}

pub fn encode(path: impl AsRef<Path>, grid: &PixelGrid) -> Result<()> {
    let path = path.as_ref();
    fs::write(path, encode_gray(grid)).map_err(|e| FilterError::io(path, e))?;
    debug!(path = %path.display(), width = grid.width(), height = grid.height(), "wrote bitmap");
    Ok(())
}

#[inline]
fn read_u16(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

#[inline]
fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

#[inline]
fn read_i32(bytes: &[u8], offset: usize) -> i32 {
    read_u32(bytes, offset) as i32
}
