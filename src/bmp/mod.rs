//! 32-bit `BITMAPV5HEADER` bitmap layout: header parsing and encoding.
//!
//! Use top-level [`crate::parse_headers`] and [`crate::encode_bgra32`].

mod encode;
pub(crate) mod header;

use crate::error::BmpEditError;
use crate::limits::Limits;
use enough::Stop;
use rgb::alt::BGRA8;

pub use header::{
    BI_ALPHABITFIELDS, BI_BITFIELDS, BI_RGB, BitmapInfo, FILE_HEADER_LEN, FileHeader, HEADERS_LEN,
    LCS_SRGB, MAGIC, V5_HEADER_SIZE, parse_headers,
};

/// Encode bottom-up BGRA pixels into a complete BMP file image.
pub fn encode_bgra32(
    pixels: &[BGRA8],
    width: u32,
    height: u32,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpEditError> {
    encode::encode_bgra32(pixels, width, height, None, &stop)
}

/// [`encode_bgra32`] with resource limits.
pub fn encode_bgra32_with_limits(
    pixels: &[BGRA8],
    width: u32,
    height: u32,
    limits: &Limits,
    stop: impl Stop,
) -> Result<Vec<u8>, BmpEditError> {
    encode::encode_bgra32(pixels, width, height, Some(limits), &stop)
}
