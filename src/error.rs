use std::io;
use std::path::PathBuf;

use enough::StopReason;

/// Errors from opening, validating, and editing a bitmap file.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BmpEditError {
    #[error("cannot open source image {}: {source}", path.display())]
    SourceOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid file type: expected \"BM\" magic, found {found:02x?}")]
    InvalidFileType { found: [u8; 2] },

    #[error("unsupported bitmap variant: {0}")]
    UnsupportedVariant(String),

    #[error("invalid header: {0}")]
    InvalidHeader(String),

    #[error("x coordinate {x} exceeds image width {width}")]
    XOutOfRange { x: u32, width: i32 },

    #[error("y coordinate {y} exceeds image height {height}")]
    YOutOfRange { y: u32, height: i32 },

    #[error("dimensions too large: {width}x{height}")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("limit exceeded: {0}")]
    LimitExceeded(String),

    #[error("buffer too small: need {needed} pixels, got {actual}")]
    BufferTooSmall { needed: usize, actual: usize },

    #[error("unexpected end of input")]
    UnexpectedEof,

    #[error("I/O failure: {0}")]
    Io(#[from] io::Error),

    #[error("operation cancelled")]
    Cancelled(StopReason),
}

impl From<StopReason> for BmpEditError {
    fn from(r: StopReason) -> Self {
        BmpEditError::Cancelled(r)
    }
}
