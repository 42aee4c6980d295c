//! # zenbmpedit
//!
//! In-place editing of uncompressed 32-bit BMP files with a
//! `BITMAPV5HEADER` (124-byte DIB header).
//!
//! [`BitmapEditor`] validates a source bitmap, copies it byte-for-byte to a
//! destination file, and then edits the destination directly on disk:
//! single-pixel writes and bulk color substitution. There is no in-memory
//! image model; pixels are addressed by file offset.
//!
//! ## Supported Format
//!
//! - `"BM"` magic, 12-byte file header, 124-byte `BITMAPV5HEADER`
//! - 32 bits per pixel, stored `[blue, green, red, alpha]`
//! - Rows bottom-up, `(0, 0)` at the bottom-left
//!
//! ## Non-Goals
//!
//! - Compressed, paletted, or 16/24-bit bitmaps
//! - Other DIB header versions (`BITMAPINFOHEADER`, V4, OS/2)
//! - Rendering or display
//!
//! ## Usage
//!
//! ```no_run
//! use zenbmpedit::{BitmapEditor, pack_argb};
//!
//! let mut editor = BitmapEditor::open("sprite.bmp", "sprite_recolored.bmp")?;
//! println!("{}", editor.stats());
//!
//! // Bottom-left pixel to opaque red.
//! editor.set_pixel(0, 0, 255, 0, 0, 255)?;
//!
//! // Every opaque white pixel to opaque black.
//! let replaced = editor.swap_color(pack_argb(255, 255, 255, 255), pack_argb(0, 0, 0, 255))?;
//! println!("replaced {replaced} pixels");
//! # Ok::<(), zenbmpedit::BmpEditError>(())
//! ```

#![forbid(unsafe_code)]

mod error;
mod limits;
mod pixel;

pub mod bmp;

mod editor;

// Re-exports
pub use bmp::{BitmapInfo, FileHeader, encode_bgra32, encode_bgra32_with_limits, parse_headers};
pub use editor::{BitmapEditor, BitmapStats, EditOptions, Strictness};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::BmpEditError;
pub use limits::Limits;
pub use pixel::{BYTES_PER_PIXEL, pack_argb, unpack_argb};
pub use rgb::alt::BGRA8;
