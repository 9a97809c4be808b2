//! Chess diagram renderer: FEN in, PNG out.
//!
//! The drawing pass is `fen` → `board` + `pieces` over a [`surface::Surface`],
//! placed with `geometry`. `canvas` rasterizes it, `diagram` wraps one request,
//! and `api` serves it over HTTP.

pub mod api;
pub mod board;
pub mod canvas;
pub mod config;
pub mod diagram;
pub mod fen;
pub mod fonts;
pub mod geometry;
pub mod pieces;
pub mod surface;
