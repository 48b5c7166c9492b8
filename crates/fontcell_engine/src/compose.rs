//! Textual artifact assembly.
//!
//! The control header and all packed glyphs become one C or C++ array
//! declaration. Composition is deterministic: identical input always yields
//! a byte-identical string, and the declared array size is checked against
//! the actual byte count before anything is handed back.

use crate::{ArrayStyle, ConversionRequest, ConvertError, Result};

/// One converted code point: the character and its packed cell bytes.
/// Created during packing, never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    pub code: u32,
    pub ch: char,
    pub bytes: Vec<u8>,
}

/// The sole artifact handed to the composer: the four control bytes
/// followed by the glyphs in code point order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionResult {
    pub control: [u8; 4],
    pub glyphs: Vec<Glyph>,
}

impl ConversionResult {
    /// Control bytes plus every glyph's packed bytes.
    pub fn total_bytes(&self) -> usize {
        self.control.len() + self.glyphs.iter().map(|g| g.bytes.len()).sum::<usize>()
    }
}

/// Assemble the final array artifact in the requested declaration style.
pub fn compose(result: &ConversionResult, request: &ConversionRequest) -> Result<String> {
    let expected = request.glyph_byte_len();
    for glyph in &result.glyphs {
        if glyph.bytes.len() != expected {
            return Err(ConvertError::ByteCountMismatch {
                code: glyph.code,
                expected,
                actual: glyph.bytes.len(),
            });
        }
    }
    let total = result.total_bytes();

    let mut out = String::new();
    out.push_str("// Auto-generated monospaced bitmap font (C/C++ array)\n");
    out.push_str("// Format: [width, height, ASCII offset, last char - ASCII offset]\n");
    out.push_str(&format!(
        "// Data layout: {}-addressed bytes per glyph\n",
        request.addressing_mode.display_name()
    ));
    out.push_str("// Generated by fontcell\n");
    out.push_str(&format!("// Generated font: {}\n", request.font_identifier));
    out.push_str(&format!("// Size: {}x{}\n", request.cell_width, request.cell_height));
    out.push_str(&format!("// ASCII range: 0x{:02X} -> 0x{:02X}\n", request.code_start, request.code_end));
    out.push_str(&format!("// Total size: {total} bytes\n"));
    out.push('\n');

    match request.array_style {
        ArrayStyle::Cpp => out.push_str(&format!("static const std::array<uint8_t, {total}> {} = {{\n", request.font_identifier)),
        ArrayStyle::C => out.push_str(&format!("static const unsigned char {}[{total}] = {{\n", request.font_identifier)),
    }

    push_byte_line(&mut out, &result.control);
    out.push('\n');
    for glyph in &result.glyphs {
        push_byte_line(&mut out, &glyph.bytes);
        if (32..=126).contains(&glyph.code) {
            out.push_str(&format!(" // '{}'", glyph.ch));
        }
        out.push('\n');
    }
    out.push_str("};\n");
    Ok(out)
}

/// `0xHH,` for every byte, no spaces, trailing comma included.
fn push_byte_line(out: &mut String, bytes: &[u8]) {
    for b in bytes {
        out.push_str(&format!("0x{b:02X},"));
    }
}
