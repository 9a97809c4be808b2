//! Diagram module.
//! Composes the board and pieces for one request and encodes the result as PNG.
//! Each call owns its canvas and board; only the font set is shared.
//! Latency: a few ms at the default 800px, dominated by PNG encoding.

use crate::board::render_board;
use crate::canvas::Canvas;
use crate::fen;
use crate::fonts::Fonts;
use crate::pieces::render_pieces;
use crate::surface::Surface;
use anyhow::{bail, Result};
use std::sync::Arc;
use std::time::Instant;

/// One diagram to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiagramRequest {
    pub fen: String,
    pub reversed: bool,
    /// Board edge in pixels.
    pub size: u32,
}

impl DiagramRequest {
    pub fn square_size(&self) -> f32 {
        self.size as f32 / 8.0
    }
}

/// Turns a request into PNG bytes.
pub trait Render: Send + Sync {
    fn render(&self, request: &DiagramRequest) -> Result<Vec<u8>>;
}

/// Draws `fen` onto `surface`: squares and labels first, pieces on top.
pub fn draw(surface: &mut impl Surface, fen: &str, reversed: bool, square_size: f32) {
    let board = fen::parse(fen);
    render_board(surface, reversed, square_size);
    render_pieces(surface, &board, reversed, square_size);
}

pub struct DiagramService {
    fonts: Arc<Fonts>,
}

impl DiagramService {
    pub fn new(fonts: Arc<Fonts>) -> Self {
        Self { fonts }
    }
}

impl Render for DiagramService {
    fn render(&self, request: &DiagramRequest) -> Result<Vec<u8>> {
        if request.size == 0 {
            bail!("Diagram size must be positive");
        }
        let start = Instant::now();

        let mut canvas = Canvas::new(request.size, &self.fonts);
        draw(&mut canvas, &request.fen, request.reversed, request.square_size());
        let png = canvas.to_png()?;

        tracing::debug!(
            size = request.size,
            reversed = request.reversed,
            bytes = png.len(),
            latency = ?start.elapsed(),
            "diagram rendered"
        );
        Ok(png)
    }
}
