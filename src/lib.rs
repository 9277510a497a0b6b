//! # Eldoria: The Lost Artifacts
//!
//! A small single-player, turn-based creature-collection game.
//!
//! ## Architecture Overview
//!
//! The crate is split into a window-free game engine and a thin frontend:
//!
//! - **Game**: creature catalog, player/creature/quest records, the world's
//!   points of interest, random encounters and the battle state machine
//! - **Persistence**: save-file schema and the storage medium abstraction
//! - **Input / Rendering / Scenes**: macroquad-driven keyboard polling, drawing
//!   and the main menu / playing loop
//!
//! Everything under [`game`] and [`persistence`] runs without a window, so
//! the whole rules engine can be driven from tests with a seeded RNG.

pub mod game;
pub mod input;
pub mod persistence;
pub mod rendering;
pub mod scenes;

// Core module re-exports
pub use game::*;
pub use input::*;
pub use persistence::*;
pub use rendering::*;

/// Core error type for the Eldoria game engine.
#[derive(thiserror::Error, Debug)]
pub enum EldoriaError {
    /// Creature type tag outside the catalog
    #[error("Unknown creature type: {0}")]
    UnknownType(String),

    /// No persisted game exists yet
    #[error("No saved game found")]
    NotFound,

    /// Persisted bytes could not be decoded into a game
    #[error("Corrupt save data: {0}")]
    CorruptData(String),

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Game state is invalid
    #[error("Invalid game state: {0}")]
    InvalidState(String),
}

/// Result type used throughout the Eldoria codebase.
pub type EldoriaResult<T> = Result<T, EldoriaError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Window width in pixels
    pub const SCREEN_WIDTH: f32 = 800.0;

    /// Window height in pixels
    pub const SCREEN_HEIGHT: f32 = 600.0;

    /// Side length of every sprite's square footprint, in pixels
    pub const GRID_SIZE: i32 = 40;

    /// Pixels moved per tick while a direction key is held
    pub const PLAYER_SPEED: i32 = 5;

    /// Frames per second target for the game loop
    pub const TARGET_FPS: u64 = 60;

    /// Save file used when none is given on the command line
    pub const DEFAULT_SAVE_FILE: &str = "save_game.json";

    /// Experience needed per level before the next level-up
    pub const EXPERIENCE_PER_LEVEL: u32 = 100;

    /// Highest level a save file may record
    pub const MAX_LEVEL: u32 = 10_000;
}
