//! Board geometry: square index to (row, col) and pixel origins.
//! Reversing the board is a point reflection through its center, so both
//! the rank and the file order flip together.

/// Converts a square index (0..=63) to `(row, col)` as drawn on screen.
pub fn square_origin(index: usize, reversed: bool) -> (usize, usize) {
    let col = index % 8;
    let row = (index - col) / 8;

    if reversed {
        (7 - row, 7 - col)
    } else {
        (row, col)
    }
}

/// Top-left pixel of the square drawn at `(row, col)`.
pub fn pixel_origin(row: usize, col: usize, square_size: f32) -> (f32, f32) {
    (col as f32 * square_size, row as f32 * square_size)
}
