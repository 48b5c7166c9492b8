//! Terminal preview of converted glyph data.
//!
//! Decodes the packed bytes back into pixel grids and prints them as
//! character art, `cols` glyphs per row, each pixel `scale` characters wide.

use fontcell_engine::{AddressingMode, ConversionRequest, ConversionResult, Glyph};

pub fn print(result: &ConversionResult, request: &ConversionRequest, scale: usize, cols: usize) {
    let cols = cols.max(1);
    let scale = scale.clamp(1, 8);
    for row in result.glyphs.chunks(cols) {
        for y in 0..request.cell_height as usize {
            let mut line = String::new();
            for glyph in row {
                for x in 0..request.cell_width as usize {
                    let c = if pixel(glyph, request, x, y) { '#' } else { '.' };
                    for _ in 0..scale {
                        line.push(c);
                    }
                }
                line.push(' ');
            }
            println!("{line}");
        }
        println!();
    }
}

/// Read one pixel back out of the packed bytes.
fn pixel(glyph: &Glyph, request: &ConversionRequest, x: usize, y: usize) -> bool {
    let width = request.cell_width as usize;
    match request.addressing_mode {
        AddressingMode::Horizontal => {
            let bytes_per_row = width.div_ceil(8);
            glyph.bytes[y * bytes_per_row + x / 8] & (0x80 >> (x % 8)) != 0
        }
        AddressingMode::Vertical => glyph.bytes[(y / 8) * width + x] & (1 << (y % 8)) != 0,
    }
}
