//! Raster canvas.
//! Implements [`Surface`] on an RGBA image with `imageproc` primitives.
//! Square edges are snapped to whole pixels by rounding both edges, so
//! fractional square sizes tile without gaps or overlaps.
//! Text sizes are em sizes, as in CSS `Npx` fonts; ab_glyph scales by
//! ascent-minus-descent height, so sizes are converted before drawing.
//! Text outlines are approximated by stamping the glyphs around a disc of
//! radius `line_width / 2` before the fill pass.

use crate::fonts::Fonts;
use crate::surface::{FontFace, Surface, TextStyle};
use ab_glyph::{Font, FontArc, PxScale};
use anyhow::{Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut};
use imageproc::rect::Rect;
use std::io::Cursor;

pub struct Canvas<'a> {
    image: RgbaImage,
    fonts: Option<&'a Fonts>,
}

impl<'a> Canvas<'a> {
    /// Transparent `size`×`size` canvas drawing text with `fonts`.
    pub fn new(size: u32, fonts: &'a Fonts) -> Self {
        Self {
            image: RgbaImage::new(size, size),
            fonts: Some(fonts),
        }
    }

    /// Canvas without fonts: rectangles are drawn, text calls are no-ops.
    pub fn blank(size: u32) -> Self {
        Self {
            image: RgbaImage::new(size, size),
            fonts: None,
        }
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Encodes the canvas as PNG.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut png = Cursor::new(Vec::new());
        self.image
            .write_to(&mut png, ImageFormat::Png)
            .context("Failed to encode diagram as PNG")?;
        Ok(png.into_inner())
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle, color: Rgba<u8>) {
        let Some(fonts) = self.fonts else {
            return;
        };
        if text.trim().is_empty() || style.size <= 0.0 {
            return;
        }
        let font: &FontArc = match style.face {
            FontFace::Board => fonts.board(),
            FontFace::Chess => fonts.chess(),
        };
        draw_text_mut(&mut self.image, color, x, y, em_scale(font, style.size), font, text);
    }
}

/// `PxScale` that gives `font` an em size of `size` pixels.
pub fn em_scale(font: &impl Font, size: f32) -> PxScale {
    PxScale::from(size * height_per_em(font.units_per_em(), font.height_unscaled()))
}

/// Ratio of a font's ascent-minus-descent height to its em square.
fn height_per_em(units_per_em: Option<f32>, height_unscaled: f32) -> f32 {
    match units_per_em {
        Some(upem) if upem > 0.0 && height_unscaled > 0.0 => height_unscaled / upem,
        _ => 1.0,
    }
}

/// Pixel offsets a glyph is stamped at to outline it with a `line_width` pen.
fn outline_offsets(line_width: f32) -> Vec<(i32, i32)> {
    let radius = (line_width / 2.0).ceil().max(1.0) as i32;
    let mut offsets = Vec::new();

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if (dx, dy) == (0, 0) || dx * dx + dy * dy > radius * radius * 2 {
                continue;
            }
            offsets.push((dx, dy));
        }
    }
    offsets
}

impl Surface for Canvas<'_> {
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba<u8>) {
        let left = x.round() as i32;
        let top = y.round() as i32;
        let right = (x + width).round() as i32;
        let bottom = (y + height).round() as i32;

        if right <= left || bottom <= top {
            return;
        }
        let rect = Rect::at(left, top).of_size((right - left) as u32, (bottom - top) as u32);
        draw_filled_rect_mut(&mut self.image, rect, color);
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32, style: TextStyle, color: Rgba<u8>) {
        self.draw_text(text, x.round() as i32, y.round() as i32, style, color);
    }

    fn stroke_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        style: TextStyle,
        color: Rgba<u8>,
        line_width: f32,
    ) {
        let (x, y) = (x.round() as i32, y.round() as i32);
        for (dx, dy) in outline_offsets(line_width) {
            self.draw_text(text, x + dx, y + dy, style, color);
        }
    }
}
