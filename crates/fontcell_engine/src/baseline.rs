//! Shared baseline placement.
//!
//! One baseline offset is chosen for a whole code point range by scanning
//! the ink extents of every glyph at one point size and fitting the extreme
//! ascender/descender into the cell. Every glyph rendered at that size then
//! sits on the same line.

use std::ops::RangeInclusive;

use crate::{Diagnostic, GlyphSource};

/// The vertical offset (pixels from the top of the cell) at which the
/// baseline is placed for one (point size, range, cell height) combination.
///
/// Solutions are recomputed whenever the point size changes, never cached
/// across sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaselineSolution {
    pub baseline_y: i32,
    /// Combined extreme ink height (tallest ascent + deepest descent) seen
    /// over the scanned range.
    pub total_ink: i32,
}

impl BaselineSolution {
    /// Scan the whole range at the given point size and place the baseline
    /// so the extreme ink is vertically centered, with spare pixels split
    /// evenly top and bottom. Ink taller than the cell is clipped
    /// symmetrically instead. Inkless and unmeasurable code points are
    /// skipped without failing the scan.
    pub fn solve(source: &dyn GlyphSource, px: f32, cell_height: u32, range: RangeInclusive<u32>) -> Self {
        let mut max_above = 0;
        let mut max_below = 0;
        for code in range {
            let Some(ch) = char::from_u32(code) else {
                continue;
            };
            let Some(extents) = source.ink_extents(ch, px) else {
                continue;
            };
            max_above = max_above.max(extents.above());
            max_below = max_below.max(extents.below());
        }

        let cell_h = cell_height as i32;
        let total_ink = max_above + max_below;
        let baseline_y = if total_ink == 0 {
            metric_fallback(source, px, cell_h)
        } else if total_ink <= cell_h {
            (cell_h - total_ink) / 2 + max_above
        } else {
            max_above - (total_ink - cell_h) / 2
        };
        log::debug!(
            "baseline at {px}px: max_above={max_above} max_below={max_below} total_ink={total_ink} cell_h={cell_h} baseline_y={baseline_y}"
        );
        Self { baseline_y, total_ink }
    }

    /// True when ink in the scanned range is taller than the cell and
    /// rendering on this baseline will clip.
    pub fn clips(&self, cell_height: u32) -> bool {
        self.total_ink > cell_height as i32
    }

    /// Non-fatal warning surfaced to the caller when this solution clips.
    pub fn clip_warning(&self, cell_height: u32) -> Option<Diagnostic> {
        self.clips(cell_height).then(|| {
            Diagnostic::warning(format!(
                "Font ink height ({}px) exceeds the {}px cell; some clipping is unavoidable. Try a smaller font size or a larger cell height.",
                self.total_ink, cell_height
            ))
        })
    }
}

/// No ink anywhere in the range (degenerate font or range): derive the
/// baseline from the font's reported ascent/descent, scaled to the cell
/// height. Fonts reporting no usable metric place it on the bottom row.
fn metric_fallback(source: &dyn GlyphSource, px: f32, cell_h: i32) -> i32 {
    match source.vertical_metrics(px) {
        Some((ascent, descent)) if ascent + descent > 0.0 => {
            let baseline = (ascent * cell_h as f32 / (ascent + descent)).round() as i32;
            baseline.clamp(0, cell_h - 1)
        }
        _ => cell_h - 1,
    }
}
