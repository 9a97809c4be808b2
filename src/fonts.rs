//! Fonts module.
//! Loads the two font faces once at startup: "Board" for coordinate labels and
//! "Chess" for piece glyphs (a symbol font mapping o/m/v/t/w/l to pieces).
//! File locations come from a caller-supplied [`PathResolver`], so the same
//! loader serves the binary, tests and any embedding application.
//! The loaded set is immutable and shared across requests behind an `Arc`.

use ab_glyph::FontArc;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Maps a font file name to the path it is read from.
pub trait PathResolver {
    fn resolve(&self, file_name: &str) -> PathBuf;
}

/// Resolves font files relative to an asset directory.
#[derive(Clone, Debug)]
pub struct AssetDir {
    root: PathBuf,
}

impl AssetDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl PathResolver for AssetDir {
    fn resolve(&self, file_name: &str) -> PathBuf {
        self.root.join(file_name)
    }
}

/// File names of the two faces.
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FontFiles {
    pub board: String,
    pub chess: String,
}

impl Default for FontFiles {
    fn default() -> Self {
        Self {
            board: "roboto.ttf".to_string(),
            chess: "casefont.ttf".to_string(),
        }
    }
}

pub struct Fonts {
    board: FontArc,
    chess: FontArc,
}

impl Fonts {
    /// Reads and parses both faces. Any failure here is a startup error.
    pub fn load(resolver: &impl PathResolver, files: &FontFiles) -> Result<Self> {
        let board = load_face(&resolver.resolve(&files.board)).context("Failed to load Board font")?;
        let chess = load_face(&resolver.resolve(&files.chess)).context("Failed to load Chess font")?;
        tracing::info!(board = %files.board, chess = %files.chess, "fonts loaded");
        Ok(Self { board, chess })
    }

    /// Builds the set from in-memory font data.
    pub fn from_bytes(board: Vec<u8>, chess: Vec<u8>) -> Result<Self> {
        Ok(Self {
            board: FontArc::try_from_vec(board).context("Board font data is not a valid font")?,
            chess: FontArc::try_from_vec(chess).context("Chess font data is not a valid font")?,
        })
    }

    pub fn board(&self) -> &FontArc {
        &self.board
    }

    pub fn chess(&self) -> &FontArc {
        &self.chess
    }
}

fn load_face(path: &Path) -> Result<FontArc> {
    let data = fs::read(path).with_context(|| format!("Failed to read font file: {}", path.display()))?;
    FontArc::try_from_vec(data).with_context(|| format!("Invalid font file: {}", path.display()))
}
