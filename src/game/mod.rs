//! # Game Module
//!
//! Core game rules: the creature catalog, entity records, the world map, random
//! encounters, battles and the per-tick session state.
//!
//! Nothing in here touches the window or the keyboard. The frontend feeds
//! [`PlayerInput`](crate::PlayerInput) values into [`GameState::update`] and
//! draws whatever state comes back out.

pub mod battle;
pub mod catalog;
pub mod encounter;
pub mod entities;
pub mod quest;
pub mod state;
pub mod world;

pub use battle::*;
pub use catalog::*;
pub use encounter::*;
pub use entities::*;
pub use quest::*;
pub use state::*;
pub use world::*;

use crate::config;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Represents a 2D coordinate on the map, in pixels.
///
/// # Examples
///
/// ```
/// use eldoria::Position;
///
/// let pos = Position::new(10, 5);
/// assert_eq!(pos.x, 10);
/// assert_eq!(pos.y, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Creates a new position with the given coordinates.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the origin position (0, 0).
    pub fn origin() -> Self {
        Self::new(0, 0)
    }
}

/// Component-wise addition, saturating at the edges of `i32`.
impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(
            self.x.saturating_add(other.x),
            self.y.saturating_add(other.y),
        )
    }
}

/// The four directions the player can walk in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Converts a direction to a single-step delta.
    ///
    /// # Examples
    ///
    /// ```
    /// use eldoria::{Direction, Position};
    ///
    /// assert_eq!(Direction::North.to_delta(), Position::new(0, -1));
    /// ```
    pub fn to_delta(self) -> Position {
        match self {
            Direction::North => Position::new(0, -1),
            Direction::South => Position::new(0, 1),
            Direction::East => Position::new(1, 0),
            Direction::West => Position::new(-1, 0),
        }
    }

    /// Returns all four directions.
    pub fn all() -> [Direction; 4] {
        [
            Direction::North,
            Direction::South,
            Direction::East,
            Direction::West,
        ]
    }
}

/// Tunable rules for one play session.
///
/// The probabilities and pacing here are the knobs the session loop reads;
/// the fixed geometry lives in [`crate::config`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Random seed for encounters and captures
    pub seed: u64,
    /// Chance per idle world tick that a wild creature appears (0.0 to 1.0)
    pub encounter_chance: f64,
    /// Chance that a capture attempt succeeds (0.0 to 1.0)
    pub capture_chance: f64,
    /// Pause between the player's action and the wild creature's reply
    pub wild_turn_delay: Duration,
    /// Experience granted when a wild creature faints during a quest
    pub quest_experience_reward: u32,
    /// Number of battle log lines shown at once
    pub battle_log_window: usize,
    /// Creature the player fights with in every battle
    pub starter: CreatureType,
    /// Where the wild creature appears on the map
    pub encounter_position: Position,
    /// Save file location
    pub save_path: PathBuf,
}

impl GameConfig {
    /// Creates the standard configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use eldoria::GameConfig;
    ///
    /// let config = GameConfig::new(7);
    /// assert_eq!(config.encounter_chance, 0.05);
    /// assert_eq!(config.capture_chance, 0.5);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            encounter_chance: 0.05,
            capture_chance: 0.5,
            wild_turn_delay: Duration::from_millis(500),
            quest_experience_reward: 50,
            battle_log_window: 8,
            starter: CreatureType::Fire,
            encounter_position: Position::new(300, 300),
            save_path: PathBuf::from(config::DEFAULT_SAVE_FILE),
        }
    }

    /// Creates a configuration for tests: same rules, no pacing delay.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            wild_turn_delay: Duration::ZERO,
            ..Self::new(seed)
        }
    }

    /// Creates the seeded random number generator for a session.
    pub fn create_rng(&self) -> StdRng {
        StdRng::seed_from_u64(self.seed)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(0)
    }
}
