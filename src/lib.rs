//! Terminal falling-block puzzle game.
//!
//! The simulation core lives in [`core`] and is free of I/O; [`input`],
//! [`term`], and the binary are thin adapters around it for key mapping,
//! rendering, and frame timing.

pub mod core;
pub mod input;
pub mod term;
pub mod types;
