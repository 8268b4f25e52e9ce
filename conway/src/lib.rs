//! Conway's Game of Life on a fixed-size toroidal grid.
//!
//! [`Grid`] owns the cells and the generation counter; [`patterns`] seeds
//! it with presets or random noise. Nothing here knows about windows.

pub mod grid;
pub mod patterns;

pub use grid::{Grid, next_state};
pub use patterns::{PATTERNS, Pattern, randomize, stamp};
