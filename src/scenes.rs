//! # Scene Management System
//!
//! Switches between the main menu and play, and owns the per-frame loop.

use crate::{
    EldoriaResult, FileStore, GameState, InputHandler, MacroquadDisplay, MenuChoice, PlayerInput,
};
use log::{error, info};
use macroquad::prelude::*;
use std::time::Duration;

/// Represents the current scene in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneType {
    /// Title screen waiting for start, load or quit
    MainMenu,
    /// Exploring the world or fighting
    Playing,
}

/// The main scene manager that coordinates all game scenes
pub struct SceneManager {
    current_scene: SceneType,
    game_state: GameState,
    display: MacroquadDisplay,
    input_handler: InputHandler,
    store: FileStore,
}

impl SceneManager {
    /// Creates a scene manager showing the main menu.
    pub fn new(game_state: GameState, input_handler: InputHandler, store: FileStore) -> Self {
        Self {
            current_scene: SceneType::MainMenu,
            game_state,
            display: MacroquadDisplay::new(),
            input_handler,
            store,
        }
    }

    /// Runs the scene loop until the player quits.
    pub async fn run(&mut self) -> EldoriaResult<()> {
        loop {
            let exit = match self.current_scene {
                SceneType::MainMenu => self.update_main_menu(),
                SceneType::Playing => self.update_playing_scene()?,
            };
            if exit {
                info!("Player quit the game");
                break;
            }
            next_frame().await;
        }
        Ok(())
    }

    /// Updates the main menu, returns true if exit is requested
    fn update_main_menu(&mut self) -> bool {
        self.display.ui.render_main_menu();

        match self.input_handler.poll_menu() {
            Some(MenuChoice::StartNew) => {
                self.game_state.reset_for_new_game();
                self.game_state
                    .add_message("Welcome to Eldoria! Arrow keys to move, F5 to save.".to_string());
                self.current_scene = SceneType::Playing;
            }
            Some(MenuChoice::LoadAndStart) => {
                self.game_state.load_or_default(&self.store);
                self.current_scene = SceneType::Playing;
            }
            Some(MenuChoice::Quit) => return true,
            None => {}
        }
        false
    }

    /// Updates the playing scene, returns true if exit is requested
    fn update_playing_scene(&mut self) -> EldoriaResult<bool> {
        let inputs = self.input_handler.poll_game(self.game_state.in_battle());
        if inputs.iter().any(PlayerInput::is_quit) {
            return Ok(true);
        }

        if inputs.contains(&PlayerInput::Save) {
            if let Err(e) = self.game_state.save(&self.store) {
                error!("Failed to save game: {}", e);
                self.game_state.add_message(format!("Save failed: {}", e));
            }
        }

        let elapsed = Duration::from_secs_f32(get_frame_time());
        self.game_state.update(&inputs, elapsed)?;

        self.display.render_game(&self.game_state);
        Ok(false)
    }
}
