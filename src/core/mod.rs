//! Core module - pure simulation logic with no I/O dependencies.
//!
//! Everything here is synchronous and deterministic for a fixed seed:
//! the board grid, the piece catalog, collision testing, rotation with
//! kick resolution, gravity/locking, line sweeping, and scoring.

pub mod board;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod session;

// Re-export commonly used types
pub use board::Board;
pub use pieces::{ActivePiece, ShapeMatrix};
pub use rng::SimpleRng;
pub use scoring::sweep_score;
pub use session::GameSession;
