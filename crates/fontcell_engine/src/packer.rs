//! Bit packing of rendered cells.
//!
//! A canvas becomes an ordered byte sequence under one of two addressing
//! conventions. The bit orders differ on purpose: horizontal packing is
//! MSB-first, vertical packing LSB-first, matching the usual
//! display-controller conventions for each layout.

use crate::{AddressingMode, Canvas};

/// Pack a canvas into the byte order of the given addressing mode. Pure:
/// identical canvas and mode always yield identical bytes.
pub fn pack(canvas: &Canvas, mode: AddressingMode) -> Vec<u8> {
    match mode {
        AddressingMode::Horizontal => pack_horizontal(canvas),
        AddressingMode::Vertical => pack_vertical(canvas),
    }
}

/// Row-major, one byte per 8-column block, the block's first pixel in the
/// high bit. Pixels beyond the right edge read as 0.
fn pack_horizontal(canvas: &Canvas) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(canvas.height() * canvas.width().div_ceil(8));
    for y in 0..canvas.height() {
        for x_block in (0..canvas.width()).step_by(8) {
            let mut value = 0u8;
            for bit in 0..8 {
                value <<= 1;
                if canvas.get(x_block + bit, y) {
                    value |= 1;
                }
            }
            bytes.push(value);
        }
    }
    bytes
}

/// 8-row bands top to bottom, one byte per column within each band, the
/// band's top row in bit 0. Rows beyond the bottom edge read as 0.
fn pack_vertical(canvas: &Canvas) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(canvas.height().div_ceil(8) * canvas.width());
    for y_block in (0..canvas.height()).step_by(8) {
        for x in 0..canvas.width() {
            let mut value = 0u8;
            for bit in 0..8 {
                if canvas.get(x, y_block + bit) {
                    value |= 1 << bit;
                }
            }
            bytes.push(value);
        }
    }
    bytes
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_horizontal_first_pixel_lands_in_high_bit() {
        let mut canvas = Canvas::new(16, 1);
        canvas.set(0, 0, true);
        assert_eq!(pack(&canvas, AddressingMode::Horizontal), vec![0x80, 0x00]);
    }

    #[test]
    fn test_vertical_top_row_lands_in_bit_zero() {
        let mut canvas = Canvas::new(8, 8);
        canvas.set(0, 0, true);
        assert_eq!(pack(&canvas, AddressingMode::Vertical), vec![0x01, 0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_horizontal_row_major_order() {
        let mut canvas = Canvas::new(16, 2);
        canvas.set(8, 0, true); // second byte of row 0
        canvas.set(7, 1, true); // first byte of row 1
        assert_eq!(pack(&canvas, AddressingMode::Horizontal), vec![0x00, 0x80, 0x01, 0x00]);
    }

    #[test]
    fn test_vertical_bands_top_to_bottom() {
        let mut canvas = Canvas::new(2, 16);
        canvas.set(1, 3, true); // band 0, column 1, bit 3
        canvas.set(0, 8, true); // band 1, column 0, bit 0
        assert_eq!(pack(&canvas, AddressingMode::Vertical), vec![0x00, 0x08, 0x01, 0x00]);
    }

    #[test]
    fn test_packed_lengths_match_geometry() {
        let canvas = Canvas::new(12, 16);
        assert_eq!(pack(&canvas, AddressingMode::Horizontal).len(), 16 * 2);
        assert_eq!(pack(&canvas, AddressingMode::Vertical).len(), 2 * 12);

        let canvas = Canvas::new(8, 5);
        assert_eq!(pack(&canvas, AddressingMode::Horizontal).len(), 5);
        assert_eq!(pack(&canvas, AddressingMode::Vertical).len(), 8);
    }

    #[test]
    fn test_ragged_edges_read_as_zero() {
        // Width 12: the last 4 bits of each row byte pair must stay clear.
        let mut canvas = Canvas::new(12, 1);
        for x in 0..12 {
            canvas.set(x, 0, true);
        }
        assert_eq!(pack(&canvas, AddressingMode::Horizontal), vec![0xFF, 0xF0]);

        // Height 5: bits 5..8 of the single band must stay clear.
        let mut canvas = Canvas::new(1, 5);
        for y in 0..5 {
            canvas.set(0, y, true);
        }
        assert_eq!(pack(&canvas, AddressingMode::Vertical), vec![0x1F]);
    }

    #[test]
    fn test_packing_is_pure() {
        let mut canvas = Canvas::new(16, 8);
        canvas.set(3, 2, true);
        canvas.set(9, 7, true);
        let first = pack(&canvas, AddressingMode::Horizontal);
        assert_eq!(pack(&canvas, AddressingMode::Horizontal), first);
        let first = pack(&canvas, AddressingMode::Vertical);
        assert_eq!(pack(&canvas, AddressingMode::Vertical), first);
    }
}
