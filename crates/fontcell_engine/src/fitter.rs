//! Per-glyph fit decisions and rendering.
//!
//! For every code point the fitter decides how the glyph goes into its cell:
//! rendered as-is on the shared baseline, width-scaled with a reduced point
//! size, or placed best-effort at the cell origin when rendering misbehaves.
//! A single glyph never aborts the run.

use crate::{BaselineSolution, Canvas, ConversionRequest, Diagnostic, GlyphSource, INK_THRESHOLD, RasterGlyph};

/// How one glyph ended up in its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphFit {
    /// Rendered at the request size on the shared baseline. `x_offset > 0`
    /// means the ink was narrower than the cell and centered.
    Normal { x_offset: i32 },
    /// Ink was wider than the cell; rendered at a reduced point size with a
    /// baseline refit for that size.
    Scaled { px: u32 },
    /// Rendering failed; the glyph was drawn best-effort at the cell origin.
    Fallback,
}

/// Fits one conversion run's glyphs and accumulates the placement
/// diagnostics reported when the range completes.
pub struct GlyphFitter<'a> {
    source: &'a dyn GlyphSource,
    request: &'a ConversionRequest,
    baseline: BaselineSolution,
    scaled: Vec<String>,
    centered: Vec<String>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> GlyphFitter<'a> {
    pub fn new(source: &'a dyn GlyphSource, request: &'a ConversionRequest, baseline: BaselineSolution) -> Self {
        Self {
            source,
            request,
            baseline,
            scaled: Vec::new(),
            centered: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Fit and render one code point into a fresh canvas.
    pub fn fit(&mut self, code: u32) -> (Canvas, GlyphFit) {
        let canvas = Canvas::new(self.request.cell_width as usize, self.request.cell_height as usize);
        let Some(ch) = char::from_u32(code) else {
            return (canvas, GlyphFit::Normal { x_offset: 0 });
        };
        let px = self.request.px_size();
        let Some(extents) = self.source.ink_extents(ch, px) else {
            // No ink (space, control characters): a blank cell is the valid
            // result, not an error.
            return (canvas, GlyphFit::Normal { x_offset: 0 });
        };

        let cell_width = self.request.cell_width as i32;
        if extents.width as i32 <= cell_width {
            self.fit_normal(ch, code, canvas, cell_width - extents.width as i32)
        } else {
            self.fit_scaled(ch, code, canvas, extents.width)
        }
    }

    /// Ink fits the cell: render on the range baseline, centered in the
    /// spare width.
    fn fit_normal(&mut self, ch: char, code: u32, mut canvas: Canvas, spare_width: i32) -> (Canvas, GlyphFit) {
        let x_offset = spare_width / 2;
        match self.source.rasterize(ch, self.request.px_size()) {
            Some(glyph) => {
                if x_offset > 0 {
                    self.centered.push(format_code_point(ch, code));
                }
                blit_on_baseline(&mut canvas, &glyph, x_offset, self.baseline.baseline_y);
                (canvas, GlyphFit::Normal { x_offset })
            }
            None => self.fallback(ch, code, canvas),
        }
    }

    /// Ink wider than the cell: shrink the point size proportionally for
    /// this character only and render flush left.
    fn fit_scaled(&mut self, ch: char, code: u32, mut canvas: Canvas, ink_width: usize) -> (Canvas, GlyphFit) {
        let request = self.request;
        let scaled_px = ((request.cell_height as usize * request.cell_width as usize / ink_width).max(1)) as u32;
        // Descender proportions can differ at the reduced size, so the
        // baseline is refit over the whole range at that size.
        let scaled_baseline = BaselineSolution::solve(self.source, scaled_px as f32, request.cell_height, request.code_points());
        if let Some(warning) = scaled_baseline.clip_warning(request.cell_height) {
            self.diagnostics.push(warning);
        }
        match self.source.rasterize(ch, scaled_px as f32) {
            Some(glyph) => {
                self.scaled.push(format_code_point(ch, code));
                log::debug!(
                    "scaled '{ch}' (0x{code:02X}): ink_width={ink_width} > cell_width={} new size={scaled_px}px",
                    request.cell_width
                );
                blit_on_baseline(&mut canvas, &glyph, 0, scaled_baseline.baseline_y);
                (canvas, GlyphFit::Scaled { px: scaled_px })
            }
            None => self.fallback(ch, code, canvas),
        }
    }

    /// Rule of last resort: draw at the cell origin with the default
    /// instance and keep the run going.
    fn fallback(&mut self, ch: char, code: u32, mut canvas: Canvas) -> (Canvas, GlyphFit) {
        self.diagnostics.push(Diagnostic::warning(format!(
            "Glyph {} could not be rendered normally; placed best-effort at the cell origin.",
            format_code_point(ch, code)
        )));
        if let Some(glyph) = self.source.rasterize(ch, self.request.px_size()) {
            blit(&mut canvas, &glyph, 0, 0);
        }
        (canvas, GlyphFit::Fallback)
    }

    /// Close the run: summarize scaling and centering into the ordered
    /// diagnostic list. "Nothing scaled" is itself a reported outcome.
    pub fn finish(mut self) -> Vec<Diagnostic> {
        if self.scaled.is_empty() {
            self.diagnostics.push(Diagnostic::info("All glyphs fit within the cell width; no scaling needed."));
        } else {
            self.diagnostics.push(Diagnostic::warning(format!(
                "Width-scaled {} glyph(s) to fit the {}px cell: {}",
                self.scaled.len(),
                self.request.cell_width,
                self.scaled.join(", ")
            )));
            self.diagnostics.push(Diagnostic::warning(
                "Tip: increase the cell width or reduce the font size to avoid scaling.",
            ));
        }
        if self.request.verbose && !self.centered.is_empty() {
            let shown = self.centered.iter().take(10).cloned().collect::<Vec<_>>().join(", ");
            let ellipsis = if self.centered.len() > 10 { " ..." } else { "" };
            self.diagnostics.push(Diagnostic::info(format!(
                "Horizontally centered {} glyph(s): {shown}{ellipsis}",
                self.centered.len()
            )));
        }
        self.diagnostics
    }
}

fn format_code_point(ch: char, code: u32) -> String {
    format!("'{ch}'(0x{code:02X})")
}

/// Copy thresholded coverage into the canvas with the ink's left edge at
/// `x_offset` and its baseline on `baseline_y`.
fn blit_on_baseline(canvas: &mut Canvas, glyph: &RasterGlyph, x_offset: i32, baseline_y: i32) {
    let top = baseline_y - (glyph.extents.ymin + glyph.extents.height as i32);
    blit(canvas, glyph, x_offset, top);
}

fn blit(canvas: &mut Canvas, glyph: &RasterGlyph, left: i32, top: i32) {
    let width = glyph.extents.width;
    for gy in 0..glyph.extents.height {
        let y = top + gy as i32;
        if y < 0 {
            continue;
        }
        for gx in 0..width {
            let x = left + gx as i32;
            if x < 0 {
                continue;
            }
            if glyph.coverage[gy * width + gx] >= INK_THRESHOLD {
                canvas.set(x as usize, y as usize, true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AddressingMode, ArrayStyle, InkExtents};

    /// Renders every char as a fully inked rectangle whose size scales
    /// linearly with the point size, like an outline font would.
    struct RectSource {
        // width, height, ymin at 16px
        base: InkExtents,
        fail_raster: bool,
    }

    impl RectSource {
        fn scaled(&self, px: f32) -> InkExtents {
            let f = px / 16.0;
            InkExtents {
                width: ((self.base.width as f32 * f).round() as usize).max(1),
                height: ((self.base.height as f32 * f).round() as usize).max(1),
                ymin: (self.base.ymin as f32 * f).round() as i32,
            }
        }
    }

    impl GlyphSource for RectSource {
        fn ink_extents(&self, ch: char, px: f32) -> Option<InkExtents> {
            if ch == ' ' {
                return None;
            }
            Some(self.scaled(px))
        }

        fn rasterize(&self, ch: char, px: f32) -> Option<RasterGlyph> {
            if self.fail_raster || ch == ' ' {
                return None;
            }
            let extents = self.scaled(px);
            Some(RasterGlyph {
                extents,
                coverage: vec![255; extents.width * extents.height],
            })
        }

        fn vertical_metrics(&self, _px: f32) -> Option<(f32, f32)> {
            Some((12.0, 4.0))
        }
    }

    fn request() -> ConversionRequest {
        ConversionRequest {
            cell_width: 16,
            cell_height: 16,
            code_start: 65,
            code_end: 67,
            addressing_mode: AddressingMode::Horizontal,
            array_style: ArrayStyle::Cpp,
            font_identifier: "TestFont".to_string(),
            verbose: false,
        }
    }

    fn fitter_for<'a>(source: &'a RectSource, request: &'a ConversionRequest) -> GlyphFitter<'a> {
        let baseline = BaselineSolution::solve(source, request.px_size(), request.cell_height, request.code_points());
        GlyphFitter::new(source, request, baseline)
    }

    #[test]
    fn test_narrow_glyph_is_centered() {
        let source = RectSource {
            base: InkExtents { width: 8, height: 12, ymin: 0 },
            fail_raster: false,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);

        let (canvas, fit) = fitter.fit(65);
        assert_eq!(fit, GlyphFit::Normal { x_offset: 4 });
        // 12px of ink centered in 16: baseline at 2 + 12, ink rows 2..14,
        // columns 4..12.
        assert!(canvas.get(4, 2));
        assert!(canvas.get(11, 13));
        assert!(!canvas.get(3, 2));
        assert!(!canvas.get(4, 1));
        assert!(!canvas.get(12, 2));
    }

    #[test]
    fn test_inkless_code_point_yields_blank_cell() {
        let source = RectSource {
            base: InkExtents { width: 8, height: 12, ymin: 0 },
            fail_raster: false,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);

        let (canvas, fit) = fitter.fit(32);
        assert!(canvas.is_blank());
        assert_eq!(fit, GlyphFit::Normal { x_offset: 0 });
        // Blank cells are a valid outcome, not a warning.
        assert!(fitter.finish().iter().all(|d| d.level != crate::DiagnosticLevel::Warning));
    }

    #[test]
    fn test_wide_glyph_is_scaled_down() {
        let source = RectSource {
            base: InkExtents { width: 24, height: 12, ymin: 0 },
            fail_raster: false,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);

        let (canvas, fit) = fitter.fit(65);
        // 16 * 16 / 24 = 10 (floored)
        assert_eq!(fit, GlyphFit::Scaled { px: 10 });
        // Scaled glyphs render flush left.
        assert!(canvas.get(0, 8));

        let diagnostics = fitter.finish();
        assert!(diagnostics.iter().any(|d| d.message.starts_with("Width-scaled 1 glyph(s)")));
        assert!(diagnostics.iter().any(|d| d.message.starts_with("Tip:")));
    }

    #[test]
    fn test_scaled_size_never_drops_below_one() {
        let source = RectSource {
            base: InkExtents { width: 4096, height: 12, ymin: 0 },
            fail_raster: false,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);

        let (_, fit) = fitter.fit(65);
        assert_eq!(fit, GlyphFit::Scaled { px: 1 });
    }

    #[test]
    fn test_raster_failure_falls_back_without_aborting() {
        let source = RectSource {
            base: InkExtents { width: 8, height: 12, ymin: 0 },
            fail_raster: true,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);

        let (canvas, fit) = fitter.fit(65);
        assert_eq!(fit, GlyphFit::Fallback);
        assert!(canvas.is_blank());
        let diagnostics = fitter.finish();
        assert!(diagnostics.iter().any(|d| d.message.contains("best-effort")));
    }

    #[test]
    fn test_no_scaling_is_a_positive_outcome() {
        let source = RectSource {
            base: InkExtents { width: 8, height: 12, ymin: 0 },
            fail_raster: false,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);
        for code in req.code_points() {
            fitter.fit(code);
        }
        let diagnostics = fitter.finish();
        assert!(
            diagnostics
                .iter()
                .any(|d| d.level == crate::DiagnosticLevel::Info && d.message.contains("no scaling needed"))
        );
    }

    #[test]
    fn test_centered_list_only_reported_verbose() {
        let source = RectSource {
            base: InkExtents { width: 8, height: 12, ymin: 0 },
            fail_raster: false,
        };
        let mut req = request();
        let mut fitter = fitter_for(&source, &req);
        fitter.fit(65);
        assert!(!fitter.finish().iter().any(|d| d.message.contains("centered")));

        req.verbose = true;
        let mut fitter = fitter_for(&source, &req);
        fitter.fit(65);
        assert!(fitter.finish().iter().any(|d| d.message.contains("Horizontally centered 1 glyph(s): 'A'(0x41)")));
    }

    #[test]
    fn test_descender_reaches_below_baseline() {
        let source = RectSource {
            base: InkExtents { width: 8, height: 12, ymin: -4 },
            fail_raster: false,
        };
        let req = request();
        let mut fitter = fitter_for(&source, &req);

        // baseline = (16 - 12) / 2 + 8 = 10; ink rows 2..14
        let (canvas, _) = fitter.fit(65);
        assert!(canvas.get(4, 2));
        assert!(canvas.get(4, 13));
        assert!(!canvas.get(4, 14));
    }
}
