//! Board module.
//! Paints the 64 checkerboard squares and the rank/file coordinate labels.
//! Ranks run down the left edge, files along the bottom edge; both follow the
//! orientation so a reversed board reads 1..8 top to bottom and h..a left to right.

use crate::geometry::{pixel_origin, square_origin};
use crate::surface::{hex_color, FontFace, Surface, TextStyle};
use image::Rgba;

const DARK_SQUARE: &str = "#b5876b";
const LIGHT_SQUARE: &str = "#f0dec7";
const LABEL_COLOR: &str = "#000";
const FILE_LETTERS: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
const LABEL_INSET: f32 = 2.0;

/// Color of the square drawn at `(row, col)`. a1 is dark in both orientations.
pub fn square_color(row: usize, col: usize) -> Rgba<u8> {
    if (row + col) % 2 == 1 {
        hex_color(DARK_SQUARE)
    } else {
        hex_color(LIGHT_SQUARE)
    }
}

/// Label font size in pixels, a quarter square rounded down.
pub fn label_font_size(square_size: f32) -> f32 {
    (square_size / 4.0).floor()
}

/// Rank number shown in column 0 of `row`.
pub fn rank_label(row: usize, reversed: bool) -> String {
    let rank = if reversed { row + 1 } else { 8 - row };
    rank.to_string()
}

/// File letter shown in row 7 under `col`.
pub fn file_label(col: usize, reversed: bool) -> char {
    FILE_LETTERS[if reversed { 7 - col } else { col }]
}

pub fn render_board(surface: &mut impl Surface, reversed: bool, square_size: f32) {
    let font_size = label_font_size(square_size);
    let style = TextStyle {
        face: FontFace::Board,
        size: font_size,
    };
    let label_color = hex_color(LABEL_COLOR);

    for index in 0..64 {
        let (row, col) = square_origin(index, reversed);
        let (x, y) = pixel_origin(row, col, square_size);

        surface.fill_rect(x, y, square_size, square_size, square_color(row, col));

        if col == 0 {
            surface.fill_text(
                &rank_label(row, reversed),
                x + LABEL_INSET,
                y + LABEL_INSET,
                style,
                label_color,
            );
        }

        if row == 7 {
            surface.fill_text(
                &file_label(col, reversed).to_string(),
                x + square_size - font_size / 1.4,
                y + square_size - font_size * 1.4,
                style,
                label_color,
            );
        }
    }
}
