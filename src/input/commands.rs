//! # Command Definitions
//!
//! The discrete inputs the game understands, independent of any keyboard.

use crate::{BattleAction, Direction};
use serde::{Deserialize, Serialize};

/// Choices on the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MenuChoice {
    StartNew,
    LoadAndStart,
    Quit,
}

/// Player input events consumed by the game loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerInput {
    /// Walk one step in a direction
    Move(Direction),
    /// Act during a battle
    Battle(BattleAction),
    /// Write the current game to the save file
    Save,
    /// Leave the game immediately, without saving
    Quit,
}

impl PlayerInput {
    pub fn is_quit(&self) -> bool {
        matches!(self, PlayerInput::Quit)
    }
}
