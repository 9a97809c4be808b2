//! Pieces module.
//! Draws each occupied square's glyph from the Chess symbol font.
//! White pieces are white with a black outline and black pieces the reverse,
//! so every glyph stays legible on both square colors.

use crate::fen::Board;
use crate::geometry::{pixel_origin, square_origin};
use crate::surface::{hex_color, FontFace, Surface, TextStyle};
use image::Rgba;

const WHITE: &str = "#fff";
const BLACK: &str = "#000";
const OUTLINE_WIDTH: f32 = 2.0;
const GLYPH_INSET_X: f32 = 2.0;

/// Chess font character for a FEN piece symbol, either case.
pub fn piece_glyph(symbol: char) -> char {
    match symbol.to_ascii_lowercase() {
        'p' => 'o',
        'n' => 'm',
        'b' => 'v',
        'r' => 't',
        'q' => 'w',
        'k' => 'l',
        _ => ' ',
    }
}

pub fn is_white(symbol: char) -> bool {
    symbol == symbol.to_ascii_uppercase()
}

/// `(fill, outline)` colors for a piece symbol.
pub fn piece_colors(symbol: char) -> (Rgba<u8>, Rgba<u8>) {
    if is_white(symbol) {
        (hex_color(WHITE), hex_color(BLACK))
    } else {
        (hex_color(BLACK), hex_color(WHITE))
    }
}

pub fn render_pieces(surface: &mut impl Surface, board: &Board, reversed: bool, square_size: f32) {
    let style = TextStyle {
        face: FontFace::Chess,
        size: square_size - 4.0,
    };

    for (index, symbol) in board.pieces() {
        let (fill, outline) = piece_colors(symbol);
        let (row, col) = square_origin(index, reversed);
        let (x, y) = pixel_origin(row, col, square_size);
        let glyph = piece_glyph(symbol).to_string();

        let x = x + GLYPH_INSET_X;
        let y = y + square_size / 6.0;

        surface.stroke_text(&glyph, x, y, style, outline, OUTLINE_WIDTH);
        surface.fill_text(&glyph, x, y, style, fill);
    }
}
