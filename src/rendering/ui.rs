//! # User Interface Elements
//!
//! Text screens and panels: the main menu, the status line and the message log.

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::{Player, QuestHistory};
use macroquad::prelude::*;

/// Text-based interface elements.
pub struct UI {
    /// Font size used for all text
    pub font_size: f32,
    /// Vertical distance between lines of text
    pub line_height: f32,
}

impl Default for UI {
    fn default() -> Self {
        Self::new()
    }
}

impl UI {
    /// Creates a new UI instance.
    pub fn new() -> Self {
        Self {
            font_size: 36.0,
            line_height: 30.0,
        }
    }

    /// Draws text horizontally centred on the screen.
    fn draw_centered(&self, text: &str, y: f32, color: Color) {
        let dimensions = measure_text(text, None, self.font_size as u16, 1.0);
        draw_text(
            text,
            SCREEN_WIDTH / 2.0 - dimensions.width / 2.0,
            y,
            self.font_size,
            color,
        );
    }

    /// Renders the title screen with its three options.
    pub fn render_main_menu(&self) {
        clear_background(WHITE);
        let middle = SCREEN_HEIGHT / 2.0;
        self.draw_centered("Eldoria: The Lost Artifacts", middle - 100.0, BLACK);
        self.draw_centered("Press 'S' to Start New Game", middle, BLACK);
        self.draw_centered("Press 'L' to Load Game", middle + 50.0, BLACK);
        self.draw_centered("Press 'Q' to Quit", middle + 100.0, BLACK);
    }

    /// Renders level, experience, items and the active quest along the top.
    pub fn render_status(&self, player: &Player, quests: &QuestHistory) {
        let status = format!(
            "Lv {}  XP {}/{}  Captures {}",
            player.level,
            player.experience,
            player.experience_to_next_level(),
            player.captures.len()
        );
        draw_text(&status, 10.0, 24.0, 24.0, WHITE);

        let items: Vec<&str> = player
            .items
            .iter()
            .filter(|(_, held)| **held)
            .map(|(item, _)| item.as_str())
            .collect();
        if !items.is_empty() {
            draw_text(&format!("Items: {}", items.join(", ")), 10.0, 48.0, 24.0, WHITE);
        }

        if let Some(quest) = player.active_quest.and_then(|id| quests.get(id)) {
            let line = format!("Quest: {} ({}/{})", quest.name, quest.progress, quest.required);
            draw_text(&line, 10.0, 72.0, 24.0, YELLOW);
        }
    }

    /// Renders the most recent messages along the bottom of the screen.
    pub fn render_messages(&self, messages: &[String], count: usize) {
        let start = messages.len().saturating_sub(count);
        for (i, message) in messages[start..].iter().enumerate() {
            let y = SCREEN_HEIGHT - 10.0 - (count.min(messages.len()) - 1 - i) as f32 * 22.0;
            draw_text(message, 10.0, y, 22.0, LIGHTGRAY);
        }
    }
}
