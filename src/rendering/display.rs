//! # Display Management
//!
//! Map and battle rendering with macroquad.

use crate::config::{GRID_SIZE, SCREEN_HEIGHT};
use crate::game::{BattleSession, Creature, GameState, Interaction, Position, Turn};
use crate::rendering::UI;
use macroquad::prelude::*;

/// Macroquad display manager for the game.
pub struct MacroquadDisplay {
    /// Size of one sprite square in pixels
    pub tile_size: f32,
    /// Number of messages shown under the map
    pub visible_messages: usize,
    pub ui: UI,
}

impl Default for MacroquadDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl MacroquadDisplay {
    /// Creates a new display manager.
    pub fn new() -> Self {
        Self {
            tile_size: GRID_SIZE as f32,
            visible_messages: 4,
            ui: UI::new(),
        }
    }

    /// Renders whichever screen matches the game state.
    pub fn render_game(&self, game_state: &GameState) {
        match &game_state.battle {
            Some(battle) => self.render_battle(battle, game_state.config.battle_log_window),
            None => self.render_world(game_state),
        }
    }

    fn draw_square(&self, position: Position, color: Color) {
        draw_rectangle(
            position.x as f32,
            position.y as f32,
            self.tile_size,
            self.tile_size,
            color,
        );
    }

    /// Renders the map, points of interest, player, status and messages.
    pub fn render_world(&self, game_state: &GameState) {
        clear_background(BLACK);

        // Scenery
        draw_rectangle(100.0, 100.0, 100.0, 100.0, DARKGREEN);
        draw_circle(400.0, 300.0, 50.0, MAROON);
        draw_rectangle(200.0, 400.0, 50.0, 50.0, PURPLE);

        for point in &game_state.world.points {
            let color = match point.interaction {
                Interaction::GrantsQuest { .. } => YELLOW,
                Interaction::GrantsItem { .. } => PURPLE,
            };
            self.draw_square(point.position, color);
        }
        self.draw_square(game_state.player.position, GREEN);

        self.ui.render_status(&game_state.player, &game_state.quests);
        self.ui
            .render_messages(&game_state.messages, self.visible_messages);
    }

    fn creature_color(creature: &Creature) -> Color {
        let [r, g, b] = creature.kind.archetype().color;
        Color::from_rgba(r, g, b, 255)
    }

    /// Renders the battle screen: both creatures, the log and the prompt.
    pub fn render_battle(&self, battle: &BattleSession, log_window: usize) {
        clear_background(WHITE);
        let font_size = self.ui.font_size;

        draw_text(
            &format!("A wild {} appeared!", battle.wild_creature.kind),
            50.0,
            50.0,
            font_size,
            BLACK,
        );
        draw_text(
            &format!(
                "Your {} - HP: {}",
                battle.player_creature.kind, battle.player_creature.health
            ),
            50.0,
            100.0,
            font_size,
            DARKGREEN,
        );
        draw_text(
            &format!(
                "Wild {} - HP: {}",
                battle.wild_creature.kind, battle.wild_creature.health
            ),
            50.0,
            150.0,
            font_size,
            RED,
        );

        draw_rectangle(
            650.0,
            90.0,
            self.tile_size,
            self.tile_size,
            Self::creature_color(&battle.player_creature),
        );
        draw_rectangle(
            650.0,
            140.0,
            self.tile_size,
            self.tile_size,
            Self::creature_color(&battle.wild_creature),
        );

        for (i, entry) in battle.log.recent(log_window).iter().enumerate() {
            draw_text(entry, 50.0, 200.0 + i as f32 * self.ui.line_height, font_size, BLACK);
        }

        if battle.turn == Turn::Player && !battle.is_over() {
            draw_text(
                "Press 'A' to attack or 'C' to capture!",
                50.0,
                SCREEN_HEIGHT - 40.0,
                font_size,
                BLACK,
            );
        }
    }
}
