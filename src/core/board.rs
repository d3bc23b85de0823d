//! Board module - the committed game grid.
//!
//! Cells hold a small integer tag: 0 = empty, 1..=7 = the locked piece's
//! color-id. Storage is a flat row-major array for cache locality; the grid
//! is allocated once per session and only ever reset in place.
//!
//! The collision predicate here is the single source of truth for "is this
//! placement legal" and is shared by movement, rotation, gravity, and the
//! shadow projection.

use arrayvec::ArrayVec;

use crate::core::pieces::ActivePiece;

/// The game board - `cols` x `rows` cells, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    cols: usize,
    rows: usize,
    cells: Vec<u8>,
}

impl Board {
    /// Create a new all-empty board.
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols,
            rows,
            cells: vec![0; cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline(always)]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.cols && y < self.rows);
        y * self.cols + x
    }

    /// Cell value at (x, y). Callers must stay in bounds.
    pub fn get(&self, x: usize, y: usize) -> u8 {
        self.cells[self.index(x, y)]
    }

    pub fn set(&mut self, x: usize, y: usize, value: u8) {
        debug_assert!(value <= 7);
        let idx = self.index(x, y);
        self.cells[idx] = value;
    }

    /// Reset every cell to empty, in place.
    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Collision predicate: true if any occupied cell of `piece` overlaps a
    /// locked cell, leaves the horizontal bounds, or passes the bottom bound.
    /// Rows above the top (`y < 0`) are tolerated and never index storage.
    pub fn collides(&self, piece: &ActivePiece) -> bool {
        let n = piece.matrix.size();
        for my in 0..n {
            for mx in 0..n {
                if piece.matrix.get(mx, my) == 0 {
                    continue;
                }
                let x = piece.x + mx as i32;
                let y = piece.y + my as i32;
                if x < 0 || x >= self.cols as i32 || y >= self.rows as i32 {
                    return true;
                }
                if y < 0 {
                    continue;
                }
                if self.get(x as usize, y as usize) != 0 {
                    return true;
                }
            }
        }
        false
    }

    /// Commit the piece's occupied cells into the grid at its position.
    pub fn merge(&mut self, piece: &ActivePiece) {
        for (mx, my, color) in piece.matrix.occupied() {
            let x = piece.x + mx as i32;
            let y = piece.y + my as i32;
            if x >= 0 && y >= 0 && (x as usize) < self.cols && (y as usize) < self.rows {
                self.set(x as usize, y as usize, color);
            }
        }
    }

    fn row_full(&self, y: usize) -> bool {
        let start = y * self.cols;
        self.cells[start..start + self.cols].iter().all(|&c| c != 0)
    }

    /// Remove row `y`; rows above shift down by one and an all-zero row
    /// enters at the top.
    fn remove_row(&mut self, y: usize) {
        for row in (1..=y).rev() {
            let src = (row - 1) * self.cols;
            let dst = row * self.cols;
            self.cells.copy_within(src..src + self.cols, dst);
        }
        self.cells[..self.cols].fill(0);
    }

    /// Sweep the board bottom-to-top, removing every fully occupied row.
    ///
    /// After a removal the same row index is examined again, since the row
    /// above has shifted into it. Returns the cleared row indices in the
    /// order they were removed; a single lock completes at most four rows.
    pub fn sweep(&mut self) -> ArrayVec<usize, 4> {
        let mut cleared = ArrayVec::new();
        let mut y = self.rows;
        while y > 0 {
            let row = y - 1;
            if self.row_full(row) {
                self.remove_row(row);
                cleared.push(row);
            } else {
                y -= 1;
            }
        }
        cleared
    }
}
