//! BMP file header and `BITMAPV5HEADER` decode/encode.
//!
//! Every field is decoded explicitly as little-endian, so parsing does not
//! depend on host byte order or struct layout.

use crate::error::BmpEditError;

/// Two-byte signature at the start of every supported file.
pub const MAGIC: [u8; 2] = *b"BM";

/// Size of [`FileHeader`] on disk (excluding the magic).
pub const FILE_HEADER_LEN: usize = 12;

/// The only supported DIB header size (`BITMAPV5HEADER`).
pub const V5_HEADER_SIZE: u32 = 124;

/// Magic + file header + V5 info header.
pub const HEADERS_LEN: usize = MAGIC.len() + FILE_HEADER_LEN + V5_HEADER_SIZE as usize;

pub const BI_RGB: u32 = 0;
pub const BI_BITFIELDS: u32 = 3;
pub const BI_ALPHABITFIELDS: u32 = 6;

/// `LCS_sRGB` color space tag.
pub const LCS_SRGB: u32 = u32::from_be_bytes(*b"sRGB");

// ── Cursor over header bytes ────────────────────────────────────────

struct Cursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_fixed_bytes<const N: usize>(&mut self) -> Result<[u8; N], BmpEditError> {
        let end = self.pos.checked_add(N).ok_or(BmpEditError::UnexpectedEof)?;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or(BmpEditError::UnexpectedEof)?;
        let mut buf = [0u8; N];
        buf.copy_from_slice(bytes);
        self.pos = end;
        Ok(buf)
    }

    fn get_u16_le(&mut self) -> Result<u16, BmpEditError> {
        Ok(u16::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_u32_le(&mut self) -> Result<u32, BmpEditError> {
        Ok(u32::from_le_bytes(self.read_fixed_bytes()?))
    }

    fn get_i32_le(&mut self) -> Result<i32, BmpEditError> {
        Ok(i32::from_le_bytes(self.read_fixed_bytes()?))
    }
}

// ── Header records ──────────────────────────────────────────────────

/// Container header following the `"BM"` magic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FileHeader {
    /// Declared total file size in bytes.
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    /// Byte position of the first pixel, from the start of the file.
    pub offset: u32,
}

impl FileHeader {
    fn read(cur: &mut Cursor<'_>) -> Result<Self, BmpEditError> {
        Ok(Self {
            file_size: cur.get_u32_le()?,
            reserved1: cur.get_u16_le()?,
            reserved2: cur.get_u16_le()?,
            offset: cur.get_u32_le()?,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.file_size.to_le_bytes());
        out.extend_from_slice(&self.reserved1.to_le_bytes());
        out.extend_from_slice(&self.reserved2.to_le_bytes());
        out.extend_from_slice(&self.offset.to_le_bytes());
    }
}

/// Pixel grid description (`BITMAPV5HEADER`).
///
/// Width and height are signed; a positive height means rows are stored
/// bottom-up with the origin at the bottom-left pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BitmapInfo {
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: i32,
    pub y_pixels_per_meter: i32,
    pub colors_used: u32,
    pub colors_important: u32,
    pub red_mask: u32,
    pub green_mask: u32,
    pub blue_mask: u32,
    pub alpha_mask: u32,
    pub color_space: u32,
    /// CIEXYZ endpoints for red, green, blue (2.30 fixed point).
    pub endpoints: [i32; 9],
    pub gamma_red: u32,
    pub gamma_green: u32,
    pub gamma_blue: u32,
    pub intent: u32,
    pub profile_data: u32,
    pub profile_size: u32,
    pub reserved: u32,
}

impl BitmapInfo {
    /// Decode everything after `header_size`.
    fn read_body(header_size: u32, cur: &mut Cursor<'_>) -> Result<Self, BmpEditError> {
        let width = cur.get_i32_le()?;
        let height = cur.get_i32_le()?;
        let planes = cur.get_u16_le()?;
        let bits_per_pixel = cur.get_u16_le()?;
        let compression = cur.get_u32_le()?;
        let image_size = cur.get_u32_le()?;
        let x_pixels_per_meter = cur.get_i32_le()?;
        let y_pixels_per_meter = cur.get_i32_le()?;
        let colors_used = cur.get_u32_le()?;
        let colors_important = cur.get_u32_le()?;
        let red_mask = cur.get_u32_le()?;
        let green_mask = cur.get_u32_le()?;
        let blue_mask = cur.get_u32_le()?;
        let alpha_mask = cur.get_u32_le()?;
        let color_space = cur.get_u32_le()?;
        let mut endpoints = [0i32; 9];
        for e in endpoints.iter_mut() {
            *e = cur.get_i32_le()?;
        }
        Ok(Self {
            header_size,
            width,
            height,
            planes,
            bits_per_pixel,
            compression,
            image_size,
            x_pixels_per_meter,
            y_pixels_per_meter,
            colors_used,
            colors_important,
            red_mask,
            green_mask,
            blue_mask,
            alpha_mask,
            color_space,
            endpoints,
            gamma_red: cur.get_u32_le()?,
            gamma_green: cur.get_u32_le()?,
            gamma_blue: cur.get_u32_le()?,
            intent: cur.get_u32_le()?,
            profile_data: cur.get_u32_le()?,
            profile_size: cur.get_u32_le()?,
            reserved: cur.get_u32_le()?,
        })
    }

    pub fn write_to(&self, out: &mut Vec<u8>) {
        out.extend_from_slice(&self.header_size.to_le_bytes());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.planes.to_le_bytes());
        out.extend_from_slice(&self.bits_per_pixel.to_le_bytes());
        for v in [
            self.compression,
            self.image_size,
            self.x_pixels_per_meter as u32,
            self.y_pixels_per_meter as u32,
            self.colors_used,
            self.colors_important,
            self.red_mask,
            self.green_mask,
            self.blue_mask,
            self.alpha_mask,
            self.color_space,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
        for e in self.endpoints {
            out.extend_from_slice(&e.to_le_bytes());
        }
        for v in [
            self.gamma_red,
            self.gamma_green,
            self.gamma_blue,
            self.intent,
            self.profile_data,
            self.profile_size,
            self.reserved,
        ] {
            out.extend_from_slice(&v.to_le_bytes());
        }
    }
}

/// Parse and validate the magic, [`FileHeader`], and [`BitmapInfo`].
///
/// Input shorter than the magic is reported as an invalid file type, with
/// the missing bytes shown as zero. The DIB header size is checked before
/// the rest of the info header is decoded, so an older, shorter header is
/// reported as [`BmpEditError::UnsupportedVariant`] even when the file ends
/// right after it.
pub fn parse_headers(data: &[u8]) -> Result<(FileHeader, BitmapInfo), BmpEditError> {
    let mut found = [0u8; 2];
    for (dst, src) in found.iter_mut().zip(data) {
        *dst = *src;
    }
    if found != MAGIC {
        return Err(BmpEditError::InvalidFileType { found });
    }

    let mut cur = Cursor::new(&data[MAGIC.len()..]);
    let file = FileHeader::read(&mut cur)?;
    let header_size = cur.get_u32_le()?;
    if header_size != V5_HEADER_SIZE {
        return Err(BmpEditError::UnsupportedVariant(format!(
            "DIB header size {header_size}, only {V5_HEADER_SIZE} (BITMAPV5HEADER) is supported"
        )));
    }
    let info = BitmapInfo::read_body(header_size, &mut cur)?;
    Ok((file, info))
}

/// Additional checks applied in strict mode.
pub(crate) fn check_strict(info: &BitmapInfo) -> Result<(), BmpEditError> {
    if info.bits_per_pixel != 32 {
        return Err(BmpEditError::UnsupportedVariant(format!(
            "{} bits per pixel, only 32 is supported",
            info.bits_per_pixel
        )));
    }
    if !matches!(
        info.compression,
        BI_RGB | BI_BITFIELDS | BI_ALPHABITFIELDS
    ) {
        return Err(BmpEditError::UnsupportedVariant(format!(
            "compression {} is not uncompressed",
            info.compression
        )));
    }
    if info.planes != 1 {
        return Err(BmpEditError::InvalidHeader(format!(
            "planes field is {}, expected 1",
            info.planes
        )));
    }
    if info.width < 0 {
        return Err(BmpEditError::InvalidHeader(format!(
            "negative width {}",
            info.width
        )));
    }
    Ok(())
}
