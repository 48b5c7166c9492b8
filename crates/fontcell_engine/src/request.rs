//! Validated conversion request.
//!
//! One immutable request describes a whole run: cell geometry, the inclusive
//! code point range, the bit addressing convention and the generated array
//! style. Requests are constructed once and never mutated mid-conversion.

use crate::{ConvertError, Result};

/// Convention for ordering and packing bits into bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressingMode {
    /// Row-major, one byte per 8 columns, MSB-first within the byte.
    Horizontal,
    /// Column-major within 8-row bands, LSB-first within the byte.
    Vertical,
}

impl AddressingMode {
    /// Packed byte count of one glyph cell under this mode.
    pub fn glyph_byte_len(self, width: u32, height: u32) -> usize {
        let (width, height) = (width as usize, height as usize);
        match self {
            AddressingMode::Horizontal => height * width.div_ceil(8),
            AddressingMode::Vertical => height.div_ceil(8) * width,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AddressingMode::Horizontal => "horizontal",
            AddressingMode::Vertical => "vertical",
        }
    }
}

/// Declaration style of the generated array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayStyle {
    /// `static const unsigned char name[N] = { ... };`
    C,
    /// `static const std::array<uint8_t, N> name = { ... };`
    Cpp,
}

/// Immutable parameters of one conversion run.
///
/// The font face itself is borrowed separately for the run; the request only
/// carries the values that end up in the control bytes and the declaration.
#[derive(Debug, Clone)]
pub struct ConversionRequest {
    /// Cell width in pixels
    pub cell_width: u32,
    /// Cell height in pixels (also the default point size)
    pub cell_height: u32,
    /// First code point, inclusive
    pub code_start: u32,
    /// Last code point, inclusive
    pub code_end: u32,
    pub addressing_mode: AddressingMode,
    pub array_style: ArrayStyle,
    /// Identifier used in the generated declaration
    pub font_identifier: String,
    /// Emit per-glyph placement diagnostics
    pub verbose: bool,
}

impl ConversionRequest {
    /// Check the multiple-of-8 rule for the addressed dimension and the
    /// one-byte limits of the control fields. Violations are hard failures,
    /// never silent coercions.
    pub fn validate(&self) -> Result<()> {
        if self.cell_width == 0 || self.cell_height == 0 {
            return Err(ConvertError::EmptyCell {
                width: self.cell_width,
                height: self.cell_height,
            });
        }
        match self.addressing_mode {
            AddressingMode::Horizontal if self.cell_width % 8 != 0 => {
                return Err(ConvertError::WidthNotByteAligned { width: self.cell_width });
            }
            AddressingMode::Vertical if self.cell_height % 8 != 0 => {
                return Err(ConvertError::HeightNotByteAligned { height: self.cell_height });
            }
            _ => {}
        }
        if self.code_start > self.code_end {
            return Err(ConvertError::InvertedRange {
                start: self.code_start,
                end: self.code_end,
            });
        }
        if self.cell_width > 255 {
            return Err(ConvertError::ControlByteOverflow {
                field: "width",
                value: self.cell_width,
            });
        }
        if self.cell_height > 255 {
            return Err(ConvertError::ControlByteOverflow {
                field: "height",
                value: self.cell_height,
            });
        }
        if self.code_start > 255 {
            return Err(ConvertError::ControlByteOverflow {
                field: "code start",
                value: self.code_start,
            });
        }
        if self.code_end - self.code_start > 255 {
            return Err(ConvertError::ControlByteOverflow {
                field: "range length",
                value: self.code_end - self.code_start,
            });
        }
        Ok(())
    }

    /// Control header embedded before the glyph data:
    /// `[width, height, first code point, range length]`.
    pub fn control_bytes(&self) -> [u8; 4] {
        [
            self.cell_width as u8,
            self.cell_height as u8,
            self.code_start as u8,
            (self.code_end - self.code_start) as u8,
        ]
    }

    /// Packed byte count of one glyph under the requested geometry.
    pub fn glyph_byte_len(&self) -> usize {
        self.addressing_mode.glyph_byte_len(self.cell_width, self.cell_height)
    }

    /// Default rasterization size. The point size of the run is the cell
    /// height; the fitter derives reduced sizes from it per glyph.
    pub fn px_size(&self) -> f32 {
        self.cell_height as f32
    }

    pub fn code_points(&self) -> std::ops::RangeInclusive<u32> {
        self.code_start..=self.code_end
    }
}
