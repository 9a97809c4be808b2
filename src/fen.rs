//! FEN module.
//! Expands the placement field of a FEN string into a 64-cell board.
//! Only the text before the first space is read; side to move, castling,
//! en passant and move counters are ignored even when malformed.
//! Parsing never fails: unknown characters are skipped, and input past the
//! eighth row is dropped.

/// Piece letters accepted in the placement field (black lowercase, white uppercase).
const PIECE_SYMBOLS: &str = "kqrnbpKQRNBP";

/// 64 cells in row-major order, rank 8 first, file a first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    cells: [Option<char>; 64],
}

impl Board {
    /// A board with every cell empty.
    pub fn empty() -> Self {
        Self { cells: [None; 64] }
    }

    /// Piece symbol at `index`, or `None` for an empty cell (or an index past 63).
    pub fn piece_at(&self, index: usize) -> Option<char> {
        self.cells.get(index).copied().flatten()
    }

    /// Iterates `(index, symbol)` over occupied cells in index order.
    pub fn pieces(&self) -> impl Iterator<Item = (usize, char)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(|(index, cell)| cell.map(|symbol| (index, symbol)))
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

/// Parses the placement field of `fen` into a [`Board`].
///
/// A `/`, or a column cursor already past the h-file, moves the cursor to the
/// start of the next row; in both cases the current character is dropped.
/// Once the cursor leaves the eighth row the rest of the input is ignored.
pub fn parse(fen: &str) -> Board {
    let placement = fen.split(' ').next().unwrap_or("");
    let mut board = Board::empty();

    let mut row = 0usize;
    let mut col = 0usize;

    for chr in placement.chars() {
        if row > 7 {
            break;
        }

        if chr == '/' || col > 7 {
            row += 1;
            col = 0;
            continue;
        }

        match chr {
            '1'..='8' => col += chr as usize - '0' as usize,
            _ if PIECE_SYMBOLS.contains(chr) => {
                if let Some(cell) = board.cells.get_mut(row * 8 + col) {
                    *cell = Some(chr);
                }
                col += 1;
            }
            _ => {}
        }
    }

    board
}
