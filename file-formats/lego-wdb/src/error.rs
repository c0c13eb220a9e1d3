//! Error handling for WDB decoding and export

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when decoding a WDB container or exporting its contents
#[derive(Debug, Error)]
pub enum WdbError {
    /// A read would pass the end of the buffer currently in scope
    #[error("unexpected end of buffer at offset {offset} ({wanted} bytes wanted)")]
    UnexpectedEof {
        /// Position of the failed read
        offset: usize,
        /// Number of bytes the read required
        wanted: usize,
    },

    /// A seek target lies beyond the buffer currently in scope
    #[error("seek target {offset} is out of bounds (buffer is {len} bytes)")]
    BadSeek {
        /// The requested absolute offset
        offset: usize,
        /// Length of the buffer in scope
        len: usize,
    },

    /// A signed length or count field was negative
    #[error("negative length {value} in {field}")]
    NegativeLength {
        /// Name of the offending field
        field: &'static str,
        /// The value that was read
        value: i32,
    },

    /// The embedded ROI blob carries an unsupported version word
    #[error("unsupported ROI version {found} (expected {expected})")]
    VersionMismatch {
        /// The version this library supports
        expected: u32,
        /// The version found in the blob
        found: u32,
    },

    /// A name field held bytes that are not valid UTF-8
    #[error("invalid string data at offset {offset}")]
    InvalidString {
        /// Position where the string bytes start
        offset: usize,
    },

    /// A pixel referenced a palette entry that does not exist
    #[error("palette index {index} out of range for palette of {color_count} colors")]
    PaletteIndexOutOfRange {
        /// The offending palette index
        index: u8,
        /// Number of entries in the palette
        color_count: usize,
    },

    /// Pixel buffer length does not match the declared image dimensions
    #[error("pixel count mismatch: expected {expected}, got {actual}")]
    PixelCountMismatch {
        /// `width * height` of the image
        expected: usize,
        /// Actual number of pixel indices
        actual: usize,
    },

    /// Two entities map to the same output path under the strict policy
    #[error("output path collision: {}", .path.display())]
    NameCollision {
        /// The path that would have been written twice
        path: PathBuf,
    },

    /// File system error with the offending path
    #[error("I/O error with file {}: {source}", .path.display())]
    Io {
        /// The path being read or written
        path: PathBuf,
        /// The underlying I/O error
        source: io::Error,
    },

    /// Metadata serialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Raster image encoding failed
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Decode error with the record or field being decoded
    #[error("{0}: {1}")]
    Context(String, Box<Self>),
}

impl WdbError {
    /// Add the name of the record or field being decoded to an error
    pub fn with_context(self, context: &str) -> Self {
        WdbError::Context(context.to_owned(), Box::new(self))
    }
}

/// Type alias for Results from WDB operations
pub type Result<T> = std::result::Result<T, WdbError>;
