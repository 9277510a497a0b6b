//! # Rendering Module
//!
//! Draws menu, map and battle screens from a read-only view of the game state.

pub mod display;
pub mod ui;

pub use display::*;
pub use ui::*;
