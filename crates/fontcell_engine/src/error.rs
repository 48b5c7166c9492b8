//! Unified error types for fontcell_engine

use thiserror::Error;

/// Main error type for conversion operations
#[derive(Debug, Error)]
pub enum ConvertError {
    // === Validation Errors ===
    #[error("Pixel width must be a multiple of 8 for horizontal addressing (got {width})")]
    WidthNotByteAligned { width: u32 },

    #[error("Pixel height must be a multiple of 8 for vertical addressing (got {height})")]
    HeightNotByteAligned { height: u32 },

    #[error("Cell size must be at least 1x1 (got {width}x{height})")]
    EmptyCell { width: u32, height: u32 },

    #[error("Code point range is inverted: start 0x{start:02X} > end 0x{end:02X}")]
    InvertedRange { start: u32, end: u32 },

    #[error("Control field '{field}' = {value} does not fit in one byte")]
    ControlByteOverflow { field: &'static str, value: u32 },

    // === Resource Errors ===
    #[error("Failed to parse font: {message}")]
    FontParse { message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // === Compose Errors ===
    #[error("Glyph byte count mismatch for 0x{code:02X}: expected {expected} bytes, got {actual}")]
    ByteCountMismatch { code: u32, expected: usize, actual: usize },
}

/// Result type alias for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;

impl ConvertError {
    /// Create a font parse error from any displayable type
    pub fn font_parse(msg: impl std::fmt::Display) -> Self {
        Self::FontParse { message: msg.to_string() }
    }
}
