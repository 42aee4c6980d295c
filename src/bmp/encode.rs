//! BMP encoder: uncompressed 32-bit BGRA with a `BITMAPV5HEADER`.

use enough::Stop;
use rgb::alt::BGRA8;

use super::header::{
    BI_BITFIELDS, BitmapInfo, FileHeader, HEADERS_LEN, LCS_SRGB, MAGIC, V5_HEADER_SIZE,
};
use crate::error::BmpEditError;
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, bgra_to_bytes};

/// 72 DPI.
const PIXELS_PER_METER: i32 = 2835;

/// Encode pixels to a complete 32-bit BMP file image.
///
/// `pixels` holds `width * height` pixels row by row, starting with the
/// bottom row, which is the order the editor addresses them in.
pub(crate) fn encode_bgra32(
    pixels: &[BGRA8],
    width: u32,
    height: u32,
    limits: Option<&Limits>,
    stop: &dyn Stop,
) -> Result<Vec<u8>, BmpEditError> {
    let w = width as usize;
    let h = height as usize;
    if i32::try_from(width).is_err() || i32::try_from(height).is_err() {
        return Err(BmpEditError::DimensionsTooLarge { width, height });
    }
    let expected = w
        .checked_mul(h)
        .ok_or(BmpEditError::DimensionsTooLarge { width, height })?;
    if pixels.len() < expected {
        return Err(BmpEditError::BufferTooSmall {
            needed: expected,
            actual: pixels.len(),
        });
    }

    let pixel_data_size = expected
        .checked_mul(BYTES_PER_PIXEL)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(BmpEditError::DimensionsTooLarge { width, height })?;
    let file_size = pixel_data_size
        .checked_add(HEADERS_LEN as u32)
        .ok_or(BmpEditError::DimensionsTooLarge { width, height })?;

    if let Some(limits) = limits {
        limits.check(width, height)?;
        limits.check_memory(u64::from(file_size))?;
    }
    stop.check()?;

    let mut out = Vec::with_capacity(file_size as usize);
    out.extend_from_slice(&MAGIC);
    FileHeader {
        file_size,
        reserved1: 0,
        reserved2: 0,
        offset: HEADERS_LEN as u32,
    }
    .write_to(&mut out);
    v5_info(width as i32, height as i32, pixel_data_size).write_to(&mut out);

    if w > 0 {
        for (row, chunk) in pixels[..expected].chunks_exact(w).enumerate() {
            if row % 16 == 0 {
                stop.check()?;
            }
            for &px in chunk {
                out.extend_from_slice(&bgra_to_bytes(px));
            }
        }
    }

    Ok(out)
}

fn v5_info(width: i32, height: i32, image_size: u32) -> BitmapInfo {
    BitmapInfo {
        header_size: V5_HEADER_SIZE,
        width,
        height, // positive = bottom-up
        planes: 1,
        bits_per_pixel: 32,
        compression: BI_BITFIELDS,
        image_size,
        x_pixels_per_meter: PIXELS_PER_METER,
        y_pixels_per_meter: PIXELS_PER_METER,
        red_mask: 0x00FF_0000,
        green_mask: 0x0000_FF00,
        blue_mask: 0x0000_00FF,
        alpha_mask: 0xFF00_0000,
        color_space: LCS_SRGB,
        intent: 4, // LCS_GM_IMAGES
        ..BitmapInfo::default()
    }
}
