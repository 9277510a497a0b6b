//! # Game State Module
//!
//! Central game state and the per-tick update that drives it.
//!
//! One tick walks the player, runs any overlapping interactions, rolls for a
//! wild encounter and, while a battle is active, advances the battle instead
//! of the world. Saving, loading and quitting are separate requests made by
//! the scene layer.

use crate::{
    persistence, BattleAction, BattleOutcome, BattleReport, BattleRules, BattleSession, Creature,
    CreatureType, EldoriaError, EldoriaResult, EncounterController, GameConfig, Player,
    PlayerInput, PlayerSnapshot, Position, QuestHistory, SaveStore, Turn, World,
};
use crate::config::PLAYER_SPEED;
use log::{info, warn};
use rand::rngs::StdRng;
use std::time::Duration;

/// Maximum number of messages kept for display.
const MAX_MESSAGES: usize = 100;

/// Something noteworthy that happened during a tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    QuestAssigned { npc: String, quest: String },
    ItemFound { item: String },
    EncounterStarted { creature: CreatureType },
    BattleEnded { outcome: BattleOutcome },
    CreatureCaptured { creature: CreatureType },
    QuestCompleted { quest: String, reward: String },
    ExperienceGained { amount: u32 },
    LevelUp { level: u32 },
    /// Free-form notice for the player, e.g. about saving
    Notice(String),
}

impl GameEvent {
    /// Text shown to the player for this event.
    pub fn message(&self) -> String {
        match self {
            GameEvent::QuestAssigned { npc, quest } => {
                format!("{} gave you a quest: {}", npc, quest)
            }
            GameEvent::ItemFound { item } => format!("Found item: {}", item),
            GameEvent::EncounterStarted { creature } => format!("A wild {} appeared!", creature),
            GameEvent::BattleEnded { outcome } => match outcome {
                BattleOutcome::PlayerFainted => "Your creature fainted...".to_string(),
                BattleOutcome::WildFainted => "You won the battle!".to_string(),
                BattleOutcome::Captured | BattleOutcome::InProgress => {
                    "The wild creature was caught!".to_string()
                }
            },
            GameEvent::CreatureCaptured { creature } => {
                format!("{} joined your captures!", creature)
            }
            GameEvent::QuestCompleted { quest, reward } => {
                format!("Quest completed: {} - Reward: {}", quest, reward)
            }
            GameEvent::ExperienceGained { amount } => format!("Gained {} experience", amount),
            GameEvent::LevelUp { level } => format!("Level up! You are now level {}", level),
            GameEvent::Notice(text) => text.clone(),
        }
    }
}

/// Central game state for one play session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    pub player: Player,
    pub quests: QuestHistory,
    pub world: World,
    /// The running battle, if any
    pub battle: Option<BattleSession>,
    /// Number of ticks processed
    pub tick_number: u64,
    /// Recent messages for display, oldest first
    pub messages: Vec<String>,
    encounters: EncounterController,
    /// Time spent waiting for the wild creature's turn
    wild_turn_timer: Duration,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh game with the player at the world's spawn point.
    ///
    /// # Examples
    ///
    /// ```
    /// use eldoria::{GameConfig, GameState};
    ///
    /// let game_state = GameState::new(GameConfig::for_testing(12345));
    /// assert_eq!(game_state.tick_number, 0);
    /// assert_eq!(game_state.player.level, 1);
    /// assert!(game_state.battle.is_none());
    /// ```
    pub fn new(config: GameConfig) -> Self {
        let world = World::new();
        let rng = config.create_rng();
        Self {
            player: Player::new(world.player_spawn),
            quests: QuestHistory::new(),
            world,
            battle: None,
            tick_number: 0,
            messages: Vec::new(),
            encounters: EncounterController::from_config(&config),
            wild_turn_timer: Duration::ZERO,
            rng,
            config,
        }
    }

    /// Puts the player and quests back to their starting state.
    pub fn reset_for_new_game(&mut self) {
        self.player = Player::new(self.world.player_spawn);
        self.quests = QuestHistory::new();
        self.battle = None;
        self.wild_turn_timer = Duration::ZERO;
    }

    /// Whether a battle is currently running.
    pub fn in_battle(&self) -> bool {
        self.battle.is_some()
    }

    /// Advances the game by one tick.
    ///
    /// `elapsed` is the wall time since the previous tick; it only paces the
    /// wild creature's reply. Inputs that do not apply to the current mode
    /// are ignored. Quit, save and load are handled by the caller.
    pub fn update(&mut self, inputs: &[PlayerInput], elapsed: Duration) -> EldoriaResult<Vec<GameEvent>> {
        self.tick_number += 1;

        let events = if self.battle.is_some() {
            self.update_battle(inputs, elapsed)?
        } else {
            self.update_world(inputs)
        };

        for event in &events {
            self.add_message(event.message());
        }
        Ok(events)
    }

    /// Moves the player, runs interactions and rolls for an encounter.
    fn update_world(&mut self, inputs: &[PlayerInput]) -> Vec<GameEvent> {
        for input in inputs {
            if let PlayerInput::Move(direction) = input {
                let delta = direction.to_delta();
                self.player.move_by(delta.x * PLAYER_SPEED, delta.y * PLAYER_SPEED);
            }
        }

        let mut events = self.world.interact(&mut self.player, &mut self.quests);

        if let Some(wild) = self.encounters.check(self.battle.is_some(), &mut self.rng) {
            events.push(GameEvent::EncounterStarted { creature: wild.kind });
            self.start_battle(wild);
        }

        events
    }

    /// Starts a battle against `wild` with a fresh starter creature.
    pub fn start_battle(&mut self, wild: Creature) {
        info!("Battle started against a wild {}", wild.kind);
        let companion = Creature::new(self.config.starter, Position::origin());
        self.battle = Some(BattleSession::new(
            companion,
            wild,
            BattleRules::from_config(&self.config),
        ));
        self.wild_turn_timer = Duration::ZERO;
    }

    /// Applies at most one player action, the wild reply once its delay has
    /// passed, then the faint check.
    fn update_battle(&mut self, inputs: &[PlayerInput], elapsed: Duration) -> EldoriaResult<Vec<GameEvent>> {
        let battle = self
            .battle
            .as_mut()
            .ok_or_else(|| EldoriaError::InvalidState("No battle in progress".to_string()))?;

        let action = inputs.iter().find_map(|input| match input {
            PlayerInput::Battle(action) => Some(*action),
            _ => None,
        });
        if let Some(action) = action {
            if battle.player_action(action, &mut self.rng) {
                self.wild_turn_timer = Duration::ZERO;
            }
        }

        if battle.turn == Turn::Wild && !battle.is_over() {
            self.wild_turn_timer += elapsed;
            if self.wild_turn_timer >= self.config.wild_turn_delay {
                battle.wild_turn();
                self.wild_turn_timer = Duration::ZERO;
            }
        }

        if battle.evaluate_faint() == BattleOutcome::InProgress {
            return Ok(Vec::new());
        }

        match self.battle.take() {
            Some(battle) => {
                let report = battle.finish(&mut self.player, &mut self.quests)?;
                Ok(self.report_events(&report))
            }
            None => Ok(Vec::new()),
        }
    }

    /// Turns a battle report into player-facing events.
    fn report_events(&self, report: &BattleReport) -> Vec<GameEvent> {
        let mut events = vec![GameEvent::BattleEnded {
            outcome: report.outcome,
        }];

        if let Some(creature) = report.captured {
            events.push(GameEvent::CreatureCaptured { creature });
        }
        if let Some(name) = &report.quest_completed {
            let reward = self
                .quests
                .find_by_name(name)
                .and_then(|id| self.quests.get(id))
                .map(|quest| quest.reward.clone())
                .unwrap_or_default();
            events.push(GameEvent::QuestCompleted {
                quest: name.clone(),
                reward,
            });
        }
        if report.experience_gained > 0 {
            events.push(GameEvent::ExperienceGained {
                amount: report.experience_gained,
            });
        }
        if report.levels_gained > 0 {
            events.push(GameEvent::LevelUp {
                level: self.player.level,
            });
        }

        events
    }

    /// Shortcut for a single battle action with no pacing delay.
    pub fn battle_action(&mut self, action: BattleAction) -> EldoriaResult<Vec<GameEvent>> {
        if self.battle.is_none() {
            return Err(EldoriaError::InvalidState("No battle in progress".to_string()));
        }
        let delay = self.config.wild_turn_delay;
        self.update(&[PlayerInput::Battle(action)], delay)
    }

    /// Writes the player and quest history to `store`.
    pub fn save(&mut self, store: &dyn SaveStore) -> EldoriaResult<()> {
        persistence::save(store, &self.player, &self.quests)?;
        self.add_message("Game saved.".to_string());
        Ok(())
    }

    /// Replaces the player and quests with a loaded snapshot.
    pub fn apply_snapshot(&mut self, snapshot: PlayerSnapshot) {
        self.player = snapshot.player;
        self.quests = snapshot.quests;
        self.battle = None;
        self.wild_turn_timer = Duration::ZERO;
    }

    /// Loads from `store`, falling back to a fresh game.
    ///
    /// A missing save and an unreadable save both leave a fresh game behind
    /// and report why through the returned notice.
    pub fn load_or_default(&mut self, store: &dyn SaveStore) -> GameEvent {
        let notice = match persistence::load(store) {
            Ok(snapshot) => {
                self.apply_snapshot(snapshot);
                "Game loaded.".to_string()
            }
            Err(EldoriaError::NotFound) => {
                self.reset_for_new_game();
                "No save file found. Starting a new game.".to_string()
            }
            Err(e) => {
                warn!("Failed to load save: {}", e);
                self.reset_for_new_game();
                format!("Could not load save ({}). Starting a new game.", e)
            }
        };

        self.add_message(notice.clone());
        GameEvent::Notice(notice)
    }

    /// Adds a message for display, dropping the oldest past the limit.
    pub fn add_message(&mut self, message: String) {
        self.messages.push(message);
        if self.messages.len() > MAX_MESSAGES {
            let excess = self.messages.len() - MAX_MESSAGES;
            self.messages.drain(..excess);
        }
    }
}
