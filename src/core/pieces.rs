//! Pieces module - the piece catalog, shape matrices, and the active piece.
//!
//! Each piece type is a square bitmap whose nonzero cells carry the piece's
//! color-id. Rotation is encoded purely as matrix content (transpose plus a
//! reverse), not as an orientation index; every active piece owns a private
//! copy of its catalog matrix, so rotating never touches the masters.

use crate::types::{PieceKind, COLS};

/// Largest catalog matrix (the I piece).
pub const MAX_MATRIX: usize = 4;

/// A square shape matrix of side 2, 3, or 4, stored in a fixed 4x4 backing.
/// Cells hold 0 (empty) or the piece's color-id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeMatrix {
    size: usize,
    cells: [[u8; MAX_MATRIX]; MAX_MATRIX],
}

impl ShapeMatrix {
    /// Side length of the matrix.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell value at (x, y) within the matrix.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> u8 {
        debug_assert!(x < self.size && y < self.size);
        self.cells[y][x]
    }

    /// Iterate the occupied cells as (x, y, color_id).
    pub fn occupied(&self) -> impl Iterator<Item = (usize, usize, u8)> + '_ {
        let n = self.size;
        (0..n).flat_map(move |y| {
            (0..n).filter_map(move |x| {
                let v = self.cells[y][x];
                (v != 0).then_some((x, y, v))
            })
        })
    }

    /// Rotate 90 degrees in place: transpose, then reverse each row for
    /// clockwise (`dir > 0`) or reverse the row order for counter-clockwise.
    /// `rotate(1)` followed by `rotate(-1)` restores the matrix bit-for-bit.
    pub fn rotate(&mut self, dir: i32) {
        let n = self.size;
        for y in 0..n {
            for x in 0..y {
                let tmp = self.cells[y][x];
                self.cells[y][x] = self.cells[x][y];
                self.cells[x][y] = tmp;
            }
        }
        if dir > 0 {
            for row in self.cells[..n].iter_mut() {
                row[..n].reverse();
            }
        } else {
            self.cells[..n].reverse();
        }
    }
}

impl PieceKind {
    /// Clone this type's master shape from the catalog.
    ///
    /// Cell values are the color-ids of the original palette:
    /// T=1, I=2, S=3, Z=4, L=5, J=6, O=7.
    pub fn matrix(self) -> ShapeMatrix {
        match self {
            PieceKind::T => ShapeMatrix {
                size: 3,
                cells: [
                    [0, 1, 0, 0],
                    [1, 1, 1, 0],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0],
                ],
            },
            PieceKind::I => ShapeMatrix {
                size: 4,
                cells: [
                    [0, 0, 0, 0],
                    [2, 2, 2, 2],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0],
                ],
            },
            PieceKind::S => ShapeMatrix {
                size: 3,
                cells: [
                    [0, 3, 3, 0],
                    [3, 3, 0, 0],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0],
                ],
            },
            PieceKind::Z => ShapeMatrix {
                size: 3,
                cells: [
                    [4, 4, 0, 0],
                    [0, 4, 4, 0],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0],
                ],
            },
            PieceKind::L => ShapeMatrix {
                size: 3,
                cells: [
                    [0, 5, 0, 0],
                    [0, 5, 0, 0],
                    [0, 5, 5, 0],
                    [0, 0, 0, 0],
                ],
            },
            PieceKind::J => ShapeMatrix {
                size: 3,
                cells: [
                    [0, 6, 0, 0],
                    [0, 6, 0, 0],
                    [6, 6, 0, 0],
                    [0, 0, 0, 0],
                ],
            },
            PieceKind::O => ShapeMatrix {
                size: 2,
                cells: [
                    [7, 7, 0, 0],
                    [7, 7, 0, 0],
                    [0, 0, 0, 0],
                    [0, 0, 0, 0],
                ],
            },
        }
    }
}

/// The currently falling piece: an owned shape matrix plus its anchor
/// (the matrix's top-left corner) in board coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub matrix: ShapeMatrix,
    pub x: i32,
    pub y: i32,
}

impl ActivePiece {
    /// Spawn a fresh piece of `kind`, horizontally centered at the top.
    pub fn spawn(kind: PieceKind) -> Self {
        let matrix = kind.matrix();
        let x = (COLS / 2) as i32 - (matrix.size() / 2) as i32;
        Self {
            kind,
            matrix,
            x,
            y: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_cells_carry_color_id() {
        for kind in PieceKind::ALL {
            let m = kind.matrix();
            assert_eq!(m.occupied().count(), 4, "{kind:?} has 4 cells");
            for (_, _, v) in m.occupied() {
                assert_eq!(v, kind.color_id());
            }
        }
    }

    #[test]
    fn matrix_sizes() {
        assert_eq!(PieceKind::O.matrix().size(), 2);
        assert_eq!(PieceKind::I.matrix().size(), 4);
        for kind in [
            PieceKind::T,
            PieceKind::S,
            PieceKind::Z,
            PieceKind::L,
            PieceKind::J,
        ] {
            assert_eq!(kind.matrix().size(), 3);
        }
    }

    #[test]
    fn rotate_cw_then_ccw_restores_exactly() {
        for kind in PieceKind::ALL {
            let master = kind.matrix();
            let mut m = master;
            m.rotate(1);
            m.rotate(-1);
            assert_eq!(m, master, "{kind:?}");
        }
    }

    #[test]
    fn four_rotations_are_identity() {
        for kind in PieceKind::ALL {
            let master = kind.matrix();
            let mut m = master;
            for _ in 0..4 {
                m.rotate(1);
            }
            assert_eq!(m, master, "{kind:?}");
        }
    }

    #[test]
    fn rotate_cw_turns_i_horizontal_into_column() {
        let mut m = PieceKind::I.matrix();
        m.rotate(1);
        let cells: Vec<_> = m.occupied().collect();
        assert_eq!(
            cells,
            vec![(2, 0, 2), (2, 1, 2), (2, 2, 2), (2, 3, 2)]
        );
    }

    #[test]
    fn spawn_centers_anchor() {
        // x = COLS/2 - size/2 on a 10-wide board.
        assert_eq!(ActivePiece::spawn(PieceKind::O).x, 4);
        assert_eq!(ActivePiece::spawn(PieceKind::I).x, 3);
        assert_eq!(ActivePiece::spawn(PieceKind::T).x, 4);
        for kind in PieceKind::ALL {
            assert_eq!(ActivePiece::spawn(kind).y, 0);
        }
    }

    #[test]
    fn spawn_clones_catalog_master() {
        let mut piece = ActivePiece::spawn(PieceKind::T);
        piece.matrix.rotate(1);
        // Catalog master is unaffected by rotating the active copy.
        assert_eq!(PieceKind::T.matrix(), ActivePiece::spawn(PieceKind::T).matrix);
        assert_ne!(piece.matrix, PieceKind::T.matrix());
    }
}
