//! # Input Module
//!
//! Keyboard polling and the mapping from keys to [`PlayerInput`] events.

pub mod commands;

pub use commands::*;

use crate::{BattleAction, Direction};
use macroquad::prelude::*;

/// Input handler for processing player commands.
///
/// Movement keys are read as held (one step per frame while down), every other
/// key as a single press.
pub struct InputHandler;

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl InputHandler {
    /// Creates a new input handler.
    pub fn new() -> Self {
        Self
    }

    /// Reads the main menu keys.
    pub fn poll_menu(&self) -> Option<MenuChoice> {
        if is_key_pressed(KeyCode::S) {
            return Some(MenuChoice::StartNew);
        }
        if is_key_pressed(KeyCode::L) {
            return Some(MenuChoice::LoadAndStart);
        }
        if is_key_pressed(KeyCode::Q) || is_key_pressed(KeyCode::Escape) {
            return Some(MenuChoice::Quit);
        }
        None
    }

    /// Collects this frame's inputs while playing.
    pub fn poll_game(&self, in_battle: bool) -> Vec<PlayerInput> {
        let mut inputs = Vec::new();

        if is_key_pressed(KeyCode::Escape) {
            inputs.push(PlayerInput::Quit);
            return inputs;
        }
        if is_key_pressed(KeyCode::F5) {
            inputs.push(PlayerInput::Save);
        }

        if in_battle {
            if is_key_pressed(KeyCode::A) {
                inputs.push(PlayerInput::Battle(BattleAction::Attack));
            } else if is_key_pressed(KeyCode::C) {
                inputs.push(PlayerInput::Battle(BattleAction::Capture));
            }
            return inputs;
        }

        for direction in Direction::all() {
            if self.key_held(direction) {
                inputs.push(PlayerInput::Move(direction));
            }
        }
        inputs
    }

    fn key_held(&self, direction: Direction) -> bool {
        let arrow = match direction {
            Direction::North => KeyCode::Up,
            Direction::South => KeyCode::Down,
            Direction::East => KeyCode::Right,
            Direction::West => KeyCode::Left,
        };
        is_key_down(arrow)
    }
}
