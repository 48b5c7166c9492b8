//! Glyph rasterization seam.
//!
//! The engine measures and renders characters through the [`GlyphSource`]
//! trait so the conversion pipeline can be exercised without a real font
//! file. [`FontFace`] is the production implementation on top of fontdue.

use std::path::Path;

use crate::{ConvertError, Result};

/// Coverage at or above this value becomes an "on" pixel. Output is strictly
/// 1-bit; fontdue's anti-aliased coverage is thresholded at 50%.
pub const INK_THRESHOLD: u8 = 128;

/// Ink bounding box of one glyph relative to its left-baseline anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InkExtents {
    /// Ink width in pixels
    pub width: usize,
    /// Ink height in pixels
    pub height: usize,
    /// Signed offset from the baseline down to the bottom edge of the ink
    /// box. Negative when ink reaches below the baseline.
    pub ymin: i32,
}

impl InkExtents {
    /// Ink pixels above the baseline.
    #[inline]
    pub fn above(&self) -> i32 {
        (self.ymin + self.height as i32).max(0)
    }

    /// Ink pixels below the baseline.
    #[inline]
    pub fn below(&self) -> i32 {
        (-self.ymin).max(0)
    }
}

/// One rasterized glyph: its extents plus an 8-bit coverage buffer,
/// row-major, top row first, `width * height` entries.
#[derive(Debug, Clone)]
pub struct RasterGlyph {
    pub extents: InkExtents,
    pub coverage: Vec<u8>,
}

/// A font resource able to measure and rasterize single characters at an
/// arbitrary point size.
pub trait GlyphSource {
    /// Measure the ink bounding box of a character, or `None` when the code
    /// point produces no ink (space, control characters) or cannot be
    /// measured.
    fn ink_extents(&self, ch: char, px: f32) -> Option<InkExtents>;

    /// Rasterize one character. `None` signals a source-level failure; the
    /// caller falls back to best-effort placement.
    fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph>;

    /// Reported ascent and descent at the given size, both as positive
    /// spans, or `None` when the font carries no vertical metrics.
    fn vertical_metrics(&self, px: f32) -> Option<(f32, f32)>;
}

/// A parsed TTF/OTF font.
pub struct FontFace {
    font: fontdue::Font,
    name: String,
}

impl FontFace {
    /// Parse a font from raw file bytes.
    pub fn from_bytes(name: impl Into<String>, data: &[u8]) -> Result<Self> {
        let font = fontdue::Font::from_bytes(data.to_vec(), fontdue::FontSettings::default()).map_err(ConvertError::font_parse)?;
        Ok(Self { font, name: name.into() })
    }

    /// Read and parse a font file. The face name is taken from the file stem.
    pub fn from_file(path: &Path) -> Result<Self> {
        let data = std::fs::read(path)?;
        let name = path.file_stem().and_then(|s| s.to_str()).unwrap_or("Imported").to_string();
        Self::from_bytes(name, &data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl GlyphSource for FontFace {
    fn ink_extents(&self, ch: char, px: f32) -> Option<InkExtents> {
        let metrics = self.font.metrics(ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        Some(InkExtents {
            width: metrics.width,
            height: metrics.height,
            ymin: metrics.ymin,
        })
    }

    fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph> {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        if metrics.width == 0 || metrics.height == 0 {
            return None;
        }
        Some(RasterGlyph {
            extents: InkExtents {
                width: metrics.width,
                height: metrics.height,
                ymin: metrics.ymin,
            },
            coverage,
        })
    }

    fn vertical_metrics(&self, px: f32) -> Option<(f32, f32)> {
        self.font.horizontal_line_metrics(px).map(|m| (m.ascent, -m.descent))
    }
}
