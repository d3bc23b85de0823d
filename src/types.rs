//! Core types shared across the application.
//! This module contains pure data types with no external I/O dependencies.

use thiserror::Error;

/// Board dimensions in cells.
pub const COLS: usize = 10;
pub const ROWS: usize = 20;

/// Game timing constants (in milliseconds).
pub const TICK_MS: u32 = 16;
/// Accumulated frame time beyond this forces a gravity drop.
pub const DROP_INTERVAL_MS: u32 = 1000;

/// An unrecognized piece-type label was passed to the catalog lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("invalid piece type label: {0:?}")]
pub struct InvalidPieceType(pub char);

/// Tetromino piece kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    T,
    I,
    S,
    Z,
    L,
    J,
    O,
}

impl PieceKind {
    pub const ALL: [PieceKind; 7] = [
        PieceKind::T,
        PieceKind::I,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::L,
        PieceKind::J,
        PieceKind::O,
    ];

    /// Color-id written into board cells when this piece locks (1..=7).
    pub fn color_id(self) -> u8 {
        match self {
            PieceKind::T => 1,
            PieceKind::I => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::L => 5,
            PieceKind::J => 6,
            PieceKind::O => 7,
        }
    }

    /// Catalog lookup by type label (case-insensitive).
    pub fn from_label(label: char) -> Result<Self, InvalidPieceType> {
        match label.to_ascii_uppercase() {
            'T' => Ok(PieceKind::T),
            'I' => Ok(PieceKind::I),
            'S' => Ok(PieceKind::S),
            'Z' => Ok(PieceKind::Z),
            'L' => Ok(PieceKind::L),
            'J' => Ok(PieceKind::J),
            'O' => Ok(PieceKind::O),
            _ => Err(InvalidPieceType(label)),
        }
    }

    pub fn label(self) -> char {
        match self {
            PieceKind::T => 'T',
            PieceKind::I => 'I',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::L => 'L',
            PieceKind::J => 'J',
            PieceKind::O => 'O',
        }
    }
}

/// Game commands delivered by the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    RotateCcw,
    Restart,
}
