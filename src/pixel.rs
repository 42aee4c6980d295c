use rgb::alt::BGRA8;

/// Bytes per pixel in the only supported layout (B, G, R, A).
pub const BYTES_PER_PIXEL: usize = 4;

/// Pack channels into a `0xAARRGGBB` value.
///
/// The little-endian bytes of the result are `[b, g, r, a]`, which is the
/// on-disk order of a 32-bit bitmap pixel.
#[inline]
pub fn pack_argb(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from(a) << 24 | u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b)
}

/// Split a `0xAARRGGBB` value back into channels.
#[inline]
pub fn unpack_argb(packed: u32) -> BGRA8 {
    bgra_from_bytes(packed.to_le_bytes())
}

#[inline]
pub(crate) fn bgra_from_bytes(bytes: [u8; BYTES_PER_PIXEL]) -> BGRA8 {
    BGRA8 {
        b: bytes[0],
        g: bytes[1],
        r: bytes[2],
        a: bytes[3],
    }
}

#[inline]
pub(crate) fn bgra_to_bytes(px: BGRA8) -> [u8; BYTES_PER_PIXEL] {
    [px.b, px.g, px.r, px.a]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_layout_is_argb() {
        assert_eq!(pack_argb(0x11, 0x22, 0x33, 0x44), 0x4411_2233);
        assert_eq!(pack_argb(255, 0, 0, 255), 0xFF_FF_00_00);
    }

    #[test]
    fn packed_bytes_are_disk_order() {
        let packed = pack_argb(0x11, 0x22, 0x33, 0x44);
        assert_eq!(packed.to_le_bytes(), [0x33, 0x22, 0x11, 0x44]);
        let px = unpack_argb(packed);
        assert_eq!((px.r, px.g, px.b, px.a), (0x11, 0x22, 0x33, 0x44));
        assert_eq!(bgra_to_bytes(px), packed.to_le_bytes());
    }
}
