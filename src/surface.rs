//! Drawing surface abstraction.
//! The board and piece renderers only talk to this trait, so the same
//! drawing pass can target the raster canvas or an in-memory recorder.
//! Coordinates are real-valued pixels; text is anchored at its top-left.

use image::Rgba;

/// Which loaded font a piece of text is drawn with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FontFace {
    /// Coordinate labels.
    Board,
    /// Piece symbol font.
    Chess,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
}

pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba<u8>);

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle, color: Rgba<u8>);

    /// Outlines `text` with a pen `line_width` pixels wide.
    fn stroke_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Rgba<u8>,
        line_width: f32,
    );
}

/// Parses `#rgb` / `#rrggbb` into an opaque color.
/// Only used with the hardcoded palettes, so a malformed literal falls back to black.
pub fn hex_color(hex: &str) -> Rgba<u8> {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .unwrap_or(0)
    };

    match digits.len() {
        3 => {
            let expand = |i: usize| channel(i..i + 1) * 17;
            Rgba([expand(0), expand(1), expand(2), 255])
        }
        6 => Rgba([channel(0..2), channel(2..4), channel(4..6), 255]),
        _ => Rgba([0, 0, 0, 255]),
    }
}
