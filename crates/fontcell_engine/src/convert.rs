//! The conversion pipeline.
//!
//! Three phases per request: validate, convert every code point in range,
//! compose the artifact. A misbehaving glyph never aborts the run; only
//! validation failures, an unusable font resource and a compose-stage byte
//! count mismatch do.

use crate::{BaselineSolution, ConversionRequest, ConversionResult, Diagnostic, Glyph, GlyphFitter, GlyphSource, Result, compose, pack};

/// Outcome of one successful run: the composed artifact, the packed data it
/// was built from and the ordered diagnostics gathered along the way.
#[derive(Debug)]
pub struct ConversionRun {
    pub artifact: String,
    pub result: ConversionResult,
    pub diagnostics: Vec<Diagnostic>,
}

/// Run the whole pipeline for one request against one font source.
pub fn convert(request: &ConversionRequest, source: &dyn GlyphSource) -> Result<ConversionRun> {
    request.validate()?;

    let mut diagnostics = Vec::new();
    let baseline = BaselineSolution::solve(source, request.px_size(), request.cell_height, request.code_points());
    if let Some(warning) = baseline.clip_warning(request.cell_height) {
        diagnostics.push(warning);
    }

    let mut fitter = GlyphFitter::new(source, request, baseline);
    let mut glyphs = Vec::with_capacity((request.code_end - request.code_start + 1) as usize);
    for code in request.code_points() {
        let (canvas, _fit) = fitter.fit(code);
        glyphs.push(Glyph {
            code,
            ch: char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER),
            bytes: pack(&canvas, request.addressing_mode),
        });
    }
    diagnostics.extend(fitter.finish());

    let result = ConversionResult {
        control: request.control_bytes(),
        glyphs,
    };
    let artifact = compose(&result, request)?;
    Ok(ConversionRun {
        artifact,
        result,
        diagnostics,
    })
}
