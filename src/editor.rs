//! File-backed bitmap editor.
//!
//! [`BitmapEditor`] copies a validated source bitmap to a destination file
//! and then edits the destination in place. Pixel `(x, y)` lives at byte
//! `offset + (y * width + x) * 4`, with `(0, 0)` at the bottom-left for a
//! bottom-up bitmap, stored as `[blue, green, red, alpha]`.

use std::fmt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use enough::{Stop, Unstoppable};
use rgb::alt::BGRA8;

use crate::bmp::header::{self, BitmapInfo, FileHeader, HEADERS_LEN};
use crate::error::BmpEditError;
use crate::limits::Limits;
use crate::pixel::{BYTES_PER_PIXEL, bgra_from_bytes, pack_argb};

/// Scan buffer for color substitution. Must be a multiple of 4.
const SWAP_CHUNK: usize = 64 * 1024;

// ── Options ─────────────────────────────────────────────────────────

/// Controls how strictly headers and pixel coordinates are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    /// Only the magic and the 124-byte DIB header size are validated.
    /// Coordinates are rejected when `x > width` or `y > height`, so an
    /// index equal to the dimension is accepted and lands in the next row
    /// (or just past the declared pixel region for `y == height`).
    #[default]
    Compatible,

    /// Also require 32 bits per pixel, one plane, an uncompressed
    /// encoding and a non-negative width. Coordinates must satisfy
    /// `x < width` and `y < |height|`.
    Strict,
}

/// Options for [`BitmapEditor::open_with`].
#[derive(Debug, Clone, Default)]
pub struct EditOptions {
    pub strictness: Strictness,
    /// Checked against the image dimensions and the file copy buffer.
    pub limits: Option<Limits>,
}

impl EditOptions {
    pub fn strict() -> Self {
        Self {
            strictness: Strictness::Strict,
            ..Self::default()
        }
    }

    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = Some(limits);
        self
    }
}

// ── Stats ───────────────────────────────────────────────────────────

/// Header summary for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapStats {
    pub file_size: u32,
    pub offset: u32,
    pub header_size: u32,
    pub width: i32,
    pub height: i32,
    pub planes: u16,
    pub bits_per_pixel: u16,
}

impl BitmapStats {
    fn new(file: &FileHeader, info: &BitmapInfo) -> Self {
        Self {
            file_size: file.file_size,
            offset: file.offset,
            header_size: info.header_size,
            width: info.width,
            height: info.height,
            planes: info.planes,
            bits_per_pixel: info.bits_per_pixel,
        }
    }
}

impl fmt::Display for BitmapStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "file size: {} offset: {} header size: {} width: {} height: {} color planes: {} bits per pixel: {}",
            self.file_size,
            self.offset,
            self.header_size,
            self.width,
            self.height,
            self.planes,
            self.bits_per_pixel
        )
    }
}

// ── Editor ──────────────────────────────────────────────────────────

/// Edits a copy of a 32-bit bitmap file in place.
///
/// Both files stay open for the lifetime of the editor and are closed on
/// drop. Only the destination is ever written.
#[derive(Debug)]
pub struct BitmapEditor {
    _source: File,
    dest: File,
    file: FileHeader,
    info: BitmapInfo,
    options: EditOptions,
}

impl BitmapEditor {
    /// Open `source`, validate it, and copy it to `destination`.
    ///
    /// The destination is opened first and created if missing, so it exists
    /// even when the source cannot be read. An existing destination is
    /// not truncated when opened; after the copy its length is set to the
    /// source length so it is byte-identical to the source.
    pub fn open(
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
    ) -> Result<Self, BmpEditError> {
        Self::open_with(source, destination, &EditOptions::default())
    }

    /// [`BitmapEditor::open`] with explicit options.
    pub fn open_with(
        source: impl AsRef<Path>,
        destination: impl AsRef<Path>,
        options: &EditOptions,
    ) -> Result<Self, BmpEditError> {
        let source = source.as_ref();
        let destination = destination.as_ref();

        let mut dest = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(destination)?;

        let mut src = File::open(source).map_err(|e| {
            log::error!("cannot open source image {}: {e}", source.display());
            BmpEditError::SourceOpen {
                path: source.to_path_buf(),
                source: e,
            }
        })?;
        log::debug!("opened source {}", source.display());

        let (file, info) = validate_format(&mut src, options.strictness)?;

        let source_len = src.seek(SeekFrom::End(0))?;
        if let Some(limits) = &options.limits {
            limits.check_signed(info.width, info.height)?;
            limits.check_memory(source_len)?;
        }
        copy_whole(&mut src, &mut dest, source_len)?;

        Ok(Self {
            _source: src,
            dest,
            file,
            info,
            options: options.clone(),
        })
    }

    pub fn file_header(&self) -> &FileHeader {
        &self.file
    }

    pub fn info(&self) -> &BitmapInfo {
        &self.info
    }

    pub fn options(&self) -> &EditOptions {
        &self.options
    }

    pub fn stats(&self) -> BitmapStats {
        BitmapStats::new(&self.file, &self.info)
    }

    /// Write one pixel to the destination.
    ///
    /// Out-of-range coordinates return [`BmpEditError::XOutOfRange`] or
    /// [`BmpEditError::YOutOfRange`] and leave the file untouched; the
    /// editor stays usable.
    pub fn set_pixel(
        &mut self,
        x: u32,
        y: u32,
        r: u8,
        g: u8,
        b: u8,
        a: u8,
    ) -> Result<(), BmpEditError> {
        let pos = self.pixel_position(x, y)?;
        self.dest.seek(SeekFrom::Start(pos))?;
        self.dest.write_all(&[b, g, r, a])?;
        Ok(())
    }

    /// Read one pixel back from the destination.
    pub fn get_pixel(&mut self, x: u32, y: u32) -> Result<BGRA8, BmpEditError> {
        let pos = self.pixel_position(x, y)?;
        self.dest.seek(SeekFrom::Start(pos))?;
        let mut buf = [0u8; BYTES_PER_PIXEL];
        self.dest.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                BmpEditError::UnexpectedEof
            } else {
                BmpEditError::Io(e)
            }
        })?;
        Ok(bgra_from_bytes(buf))
    }

    /// Replace every pixel of one color with another, given as channels.
    #[allow(clippy::too_many_arguments)]
    pub fn swap_color_channels(
        &mut self,
        ri: u8,
        gi: u8,
        bi: u8,
        ai: u8,
        ro: u8,
        go: u8,
        bo: u8,
        ao: u8,
    ) -> Result<u64, BmpEditError> {
        self.swap_color(pack_argb(ri, gi, bi, ai), pack_argb(ro, go, bo, ao))
    }

    /// Replace every `0xAARRGGBB` value `from` with `to`.
    ///
    /// The scan starts at the pixel-data offset and runs in 4-byte steps to
    /// the physical end of the file, not to the end of the declared pixel
    /// grid: whole words in trailing bytes after the grid are matched and
    /// rewritten too. A final partial word is left alone. Returns the
    /// number of words replaced.
    pub fn swap_color(&mut self, from: u32, to: u32) -> Result<u64, BmpEditError> {
        self.swap_color_with_stop(from, to, Unstoppable)
    }

    /// [`BitmapEditor::swap_color`] with cooperative cancellation between
    /// scan chunks. Chunks already rewritten stay rewritten.
    pub fn swap_color_with_stop(
        &mut self,
        from: u32,
        to: u32,
        stop: impl Stop,
    ) -> Result<u64, BmpEditError> {
        swap_words(
            &mut self.dest,
            u64::from(self.file.offset),
            from,
            to,
            &stop,
        )
    }

    pub fn flush(&mut self) -> Result<(), BmpEditError> {
        self.dest.flush()?;
        Ok(())
    }

    fn pixel_position(&self, x: u32, y: u32) -> Result<u64, BmpEditError> {
        let width = self.info.width;
        let height = self.info.height;
        let (x_ok, y_ok) = match self.options.strictness {
            Strictness::Compatible => (
                i64::from(x) <= i64::from(width),
                i64::from(y) <= i64::from(height),
            ),
            Strictness::Strict => (
                i64::from(x) < i64::from(width),
                u64::from(y) < u64::from(height.unsigned_abs()),
            ),
        };
        if !x_ok {
            log::warn!("x coordinate {x} exceeds width {width}");
            return Err(BmpEditError::XOutOfRange { x, width });
        }
        if !y_ok {
            log::warn!("y coordinate {y} exceeds height {height}");
            return Err(BmpEditError::YOutOfRange { y, height });
        }
        // width >= 0 here, since x >= 0 passed the check
        let index = u64::from(y) * u64::from(width.unsigned_abs()) + u64::from(x);
        Ok(u64::from(self.file.offset) + index * BYTES_PER_PIXEL as u64)
    }
}

/// Read and check the headers at the start of `src`.
fn validate_format(
    src: &mut File,
    strictness: Strictness,
) -> Result<(FileHeader, BitmapInfo), BmpEditError> {
    let mut buf = Vec::with_capacity(HEADERS_LEN);
    src.seek(SeekFrom::Start(0))?;
    Read::by_ref(src)
        .take(HEADERS_LEN as u64)
        .read_to_end(&mut buf)?;

    let (file, info) = header::parse_headers(&buf).inspect_err(|e| {
        log::error!("rejecting source image: {e}");
    })?;
    if strictness == Strictness::Strict {
        header::check_strict(&info)?;
    }
    log::debug!("{}", BitmapStats::new(&file, &info));
    Ok((file, info))
}

/// Copy all `len` bytes of `src` over the start of `dest`, then cut `dest`
/// to the same length.
fn copy_whole(src: &mut File, dest: &mut File, len: u64) -> Result<(), BmpEditError> {
    let cap = usize::try_from(len).map_err(|_| {
        BmpEditError::LimitExceeded(format!("source of {len} bytes does not fit in memory"))
    })?;
    let mut buffer = Vec::with_capacity(cap);
    src.seek(SeekFrom::Start(0))?;
    src.read_to_end(&mut buffer)?;

    dest.seek(SeekFrom::Start(0))?;
    dest.write_all(&buffer)?;
    dest.set_len(buffer.len() as u64)?;
    dest.flush()?;
    Ok(())
}

/// Fill `buf` from `r` until it is full or the reader is exhausted.
fn read_full<R: Read>(r: &mut R, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match r.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Replace each little-endian word equal to `from` with `to`, from `start`
/// to the end of the stream.
fn swap_words<F: Read + Write + Seek>(
    f: &mut F,
    start: u64,
    from: u32,
    to: u32,
    stop: &dyn Stop,
) -> Result<u64, BmpEditError> {
    let from_bytes = from.to_le_bytes();
    let to_bytes = to.to_le_bytes();
    let mut buf = vec![0u8; SWAP_CHUNK];
    let mut pos = start;
    let mut replaced = 0u64;

    loop {
        stop.check()?;
        f.seek(SeekFrom::Start(pos))?;
        let n = read_full(f, &mut buf)?;
        let words = n / BYTES_PER_PIXEL * BYTES_PER_PIXEL;
        if words == 0 {
            break;
        }

        let mut dirty = false;
        for word in buf[..words].chunks_exact_mut(BYTES_PER_PIXEL) {
            if *word == from_bytes {
                word.copy_from_slice(&to_bytes);
                replaced += 1;
                dirty = true;
            }
        }
        if dirty {
            f.seek(SeekFrom::Start(pos))?;
            f.write_all(&buf[..words])?;
        }

        pos += words as u64;
        if n < buf.len() {
            break;
        }
    }

    log::debug!("replaced {replaced} pixels of {from:#010x} with {to:#010x}");
    Ok(replaced)
}
