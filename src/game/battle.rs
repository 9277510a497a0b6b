//! # Battle System
//!
//! Turn-based fights between the player's creature and a wild one.
//!
//! A battle starts on the player's turn. The player either attacks or tries a
//! capture; unless that ends the fight, the wild creature answers on its own
//! turn. After every update the session checks whether a side has fainted,
//! the player's creature first. Once the outcome is decided the session is
//! consumed by [`BattleSession::finish`], which applies captures and rewards.

use crate::{Creature, CreatureType, EldoriaError, EldoriaResult, GameConfig, Player, QuestHistory};
use log::{debug, info};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Actions the player can choose on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleAction {
    Attack,
    Capture,
}

/// Whose move it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Wild,
}

/// How a battle ended, or that it has not yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleOutcome {
    InProgress,
    PlayerFainted,
    WildFainted,
    Captured,
}

/// Append-only battle messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleLog {
    entries: Vec<String>,
}

impl BattleLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, entry: impl Into<String>) {
        let entry = entry.into();
        debug!("Battle: {}", entry);
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The last `window` entries, oldest first.
    pub fn recent(&self, window: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(window);
        &self.entries[start..]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Probabilities and rewards a battle is fought under.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattleRules {
    /// Chance that a capture attempt succeeds
    pub capture_chance: f64,
    /// Experience for defeating a creature while on a quest
    pub quest_experience_reward: u32,
}

impl BattleRules {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            capture_chance: config.capture_chance,
            quest_experience_reward: config.quest_experience_reward,
        }
    }
}

impl Default for BattleRules {
    fn default() -> Self {
        Self {
            capture_chance: 0.5,
            quest_experience_reward: 50,
        }
    }
}

/// What a finished battle did to the player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BattleReport {
    pub outcome: BattleOutcome,
    pub log: BattleLog,
    /// Creature added to the player's captures, if any
    pub captured: Option<CreatureType>,
    /// Name of the quest the battle completed, if any
    pub quest_completed: Option<String>,
    pub experience_gained: u32,
    pub levels_gained: u32,
}

/// A battle in progress.
#[derive(Debug, Clone, PartialEq)]
pub struct BattleSession {
    pub player_creature: Creature,
    pub wild_creature: Creature,
    pub turn: Turn,
    pub log: BattleLog,
    pub outcome: BattleOutcome,
    pub rules: BattleRules,
}

impl BattleSession {
    /// Starts a battle on the player's turn.
    pub fn new(player_creature: Creature, wild_creature: Creature, rules: BattleRules) -> Self {
        let mut log = BattleLog::new();
        log.push(format!("A wild {} appeared!", wild_creature.kind));

        Self {
            player_creature,
            wild_creature,
            turn: Turn::Player,
            log,
            outcome: BattleOutcome::InProgress,
            rules,
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome != BattleOutcome::InProgress
    }

    /// Whether the session is waiting for the player to choose an action.
    pub fn awaiting_player(&self) -> bool {
        !self.is_over() && self.turn == Turn::Player
    }

    /// Performs the player's chosen action.
    ///
    /// Returns false, changing nothing, when it is not the player's turn.
    pub fn player_action<R: Rng + ?Sized>(&mut self, action: BattleAction, rng: &mut R) -> bool {
        if !self.awaiting_player() {
            return false;
        }

        match action {
            BattleAction::Attack => {
                let damage = self.player_creature.damage_against(&self.wild_creature);
                self.wild_creature.take_damage(damage);
                self.log.push(format!(
                    "Your {} attacked for {} damage!",
                    self.player_creature.kind, damage
                ));
                if !self.wild_creature.is_fainted() {
                    self.turn = Turn::Wild;
                }
            }

            BattleAction::Capture => {
                if rng.gen::<f64>() < self.rules.capture_chance {
                    self.log
                        .push(format!("You captured the {}!", self.wild_creature.kind));
                    self.outcome = BattleOutcome::Captured;
                } else {
                    self.log.push("Capture failed!");
                    self.turn = Turn::Wild;
                }
            }
        }

        true
    }

    /// Lets the wild creature strike back.
    ///
    /// Returns false, changing nothing, unless it is the wild creature's turn.
    pub fn wild_turn(&mut self) -> bool {
        if self.is_over() || self.turn != Turn::Wild {
            return false;
        }

        let damage = self.wild_creature.damage_against(&self.player_creature);
        self.player_creature.take_damage(damage);
        self.log.push(format!(
            "The wild {} attacked for {} damage!",
            self.wild_creature.kind, damage
        ));
        self.turn = Turn::Player;
        true
    }

    /// Checks both creatures for fainting and settles the outcome.
    ///
    /// The player's creature is checked first, so a double knock-out is a loss.
    pub fn evaluate_faint(&mut self) -> BattleOutcome {
        if self.is_over() {
            return self.outcome;
        }

        if self.player_creature.is_fainted() {
            self.log
                .push(format!("Your {} fainted!", self.player_creature.kind));
            self.outcome = BattleOutcome::PlayerFainted;
        } else if self.wild_creature.is_fainted() {
            self.log
                .push(format!("Wild {} fainted!", self.wild_creature.kind));
            self.outcome = BattleOutcome::WildFainted;
        }

        self.outcome
    }

    /// Ends a decided battle and applies its consequences to the player.
    ///
    /// A captured creature joins the player's captures. Defeating the wild
    /// creature while on an unfinished quest advances the quest, completes it
    /// if possible and then grants the quest experience, in that order.
    pub fn finish(self, player: &mut Player, quests: &mut QuestHistory) -> EldoriaResult<BattleReport> {
        if !self.is_over() {
            return Err(EldoriaError::InvalidState(
                "Battle finished while still in progress".to_string(),
            ));
        }

        let mut report = BattleReport {
            outcome: self.outcome,
            log: self.log,
            captured: None,
            quest_completed: None,
            experience_gained: 0,
            levels_gained: 0,
        };

        match self.outcome {
            BattleOutcome::Captured => {
                report.captured = Some(self.wild_creature.kind);
                player.captures.push(self.wild_creature);
            }

            BattleOutcome::WildFainted => {
                let quest = match player.active_quest {
                    Some(id) => quests.get_mut(id).filter(|quest| !quest.completed),
                    None => None,
                };

                if let Some(quest) = quest {
                    quest.progress = quest.progress.saturating_add(1);
                    let name = quest.name.clone();

                    if player.complete_quest(quests) {
                        report.quest_completed = Some(name);
                    }
                    report.experience_gained = self.rules.quest_experience_reward;
                    report.levels_gained = player.gain_experience(self.rules.quest_experience_reward);
                }
            }

            BattleOutcome::PlayerFainted | BattleOutcome::InProgress => {}
        }

        info!("Battle ended: {:?}", report.outcome);
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Position, Quest};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn creature(kind: CreatureType) -> Creature {
        Creature::new(kind, Position::origin())
    }

    fn session(player: CreatureType, wild: CreatureType) -> BattleSession {
        BattleSession::new(creature(player), creature(wild), BattleRules::default())
    }

    #[test]
    fn test_battle_starts_on_player_turn() {
        let battle = session(CreatureType::Fire, CreatureType::Water);
        assert_eq!(battle.turn, Turn::Player);
        assert_eq!(battle.outcome, BattleOutcome::InProgress);
        assert_eq!(battle.log.entries(), ["A wild Water appeared!"]);
    }

    #[test]
    fn test_attack_then_wild_reply() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut battle = session(CreatureType::Fire, CreatureType::Air);

        assert!(battle.player_action(BattleAction::Attack, &mut rng));
        // Fire 30 attack vs Air 15 defense
        assert_eq!(battle.wild_creature.health, 65);
        assert_eq!(battle.turn, Turn::Wild);

        // The player cannot act again until the wild creature has moved
        assert!(!battle.player_action(BattleAction::Attack, &mut rng));
        assert_eq!(battle.wild_creature.health, 65);

        assert!(battle.wild_turn());
        // Air 35 attack vs Fire 20 defense
        assert_eq!(battle.player_creature.health, 105);
        assert_eq!(battle.turn, Turn::Player);
        assert!(!battle.wild_turn());

        assert_eq!(battle.evaluate_faint(), BattleOutcome::InProgress);
    }

    #[test]
    fn test_zero_damage_does_not_end_battle() {
        let mut rng = StdRng::seed_from_u64(1);
        // Fire 30 attack vs Earth 40 defense
        let mut battle = session(CreatureType::Fire, CreatureType::Earth);

        battle.player_action(BattleAction::Attack, &mut rng);
        assert_eq!(battle.wild_creature.health, 150);
        assert_eq!(battle.log.entries().last().unwrap(), "Your Fire attacked for 0 damage!");

        battle.wild_turn();
        assert_eq!(battle.player_creature.health, 120);
        assert_eq!(battle.evaluate_faint(), BattleOutcome::InProgress);
    }

    #[test]
    fn test_knockout_skips_wild_turn() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut battle = session(CreatureType::Fire, CreatureType::Air);
        battle.wild_creature.health = 10;

        battle.player_action(BattleAction::Attack, &mut rng);
        assert_eq!(battle.turn, Turn::Player);
        assert!(!battle.wild_turn());
        assert_eq!(battle.evaluate_faint(), BattleOutcome::WildFainted);
        assert_eq!(battle.log.entries().last().unwrap(), "Wild Air fainted!");
    }

    #[test]
    fn test_player_faint_takes_priority() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut battle = session(CreatureType::Fire, CreatureType::Air);
        battle.player_creature.health = 15;
        battle.wild_creature.health = 30;

        // Both knock-outs land before the faint check runs
        assert!(battle.player_action(BattleAction::Attack, &mut rng));
        assert!(battle.wild_turn());
        assert_eq!(battle.player_creature.health, 0);
        assert!(battle.player_action(BattleAction::Attack, &mut rng));
        assert_eq!(battle.wild_creature.health, 0);
        assert!(!battle.wild_turn());

        assert_eq!(battle.evaluate_faint(), BattleOutcome::PlayerFainted);
        assert_eq!(battle.log.entries().last().unwrap(), "Your Fire fainted!");
        // A settled outcome never changes
        assert_eq!(battle.evaluate_faint(), BattleOutcome::PlayerFainted);
    }

    #[test]
    fn test_wild_reply_can_faint_player() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut battle = session(CreatureType::Fire, CreatureType::Air);
        battle.player_creature.health = 5;

        battle.player_action(BattleAction::Attack, &mut rng);
        battle.wild_turn();
        assert_eq!(battle.player_creature.health, 0);
        assert_eq!(battle.evaluate_faint(), BattleOutcome::PlayerFainted);
        assert!(!battle.player_action(BattleAction::Attack, &mut rng));
    }

    #[test]
    fn test_capture_rate_converges() {
        let mut rng = StdRng::seed_from_u64(99);
        let trials = 10_000;
        let mut captured = 0;

        for _ in 0..trials {
            let mut battle = session(CreatureType::Fire, CreatureType::Water);
            battle.player_action(BattleAction::Capture, &mut rng);
            match battle.outcome {
                BattleOutcome::Captured => captured += 1,
                _ => {
                    assert_eq!(battle.turn, Turn::Wild);
                    assert_eq!(battle.log.entries().last().unwrap(), "Capture failed!");
                }
            }
        }

        let rate = captured as f64 / trials as f64;
        assert!((rate - 0.5).abs() < 0.03, "capture rate was {}", rate);
    }

    #[test]
    fn test_capture_moves_creature_to_player() {
        let mut rng = StdRng::seed_from_u64(1);
        let rules = BattleRules {
            capture_chance: 1.0,
            ..BattleRules::default()
        };
        let mut battle = BattleSession::new(creature(CreatureType::Fire), creature(CreatureType::Air), rules);
        battle.wild_creature.health = 40;
        let mut player = Player::new(Position::origin());
        let mut quests = QuestHistory::new();

        battle.player_action(BattleAction::Capture, &mut rng);
        assert_eq!(battle.evaluate_faint(), BattleOutcome::Captured);

        let report = battle.finish(&mut player, &mut quests).unwrap();
        assert_eq!(report.captured, Some(CreatureType::Air));
        assert_eq!(report.experience_gained, 0);
        assert_eq!(player.captures.len(), 1);
        assert_eq!(player.captures[0].health, 40);
    }

    #[test]
    fn test_quest_reward_flow() {
        let mut player = Player::new(Position::origin());
        let mut quests = QuestHistory::new();
        let id = quests.register(Quest::new("Find the Lost Artifact", 1, "Gold"));
        player.assign_quest(id);

        let mut battle = session(CreatureType::Fire, CreatureType::Water);
        battle.wild_creature.health = 0;
        assert_eq!(battle.evaluate_faint(), BattleOutcome::WildFainted);

        let report = battle.finish(&mut player, &mut quests).unwrap();
        let quest = quests.get(id).unwrap();
        assert_eq!(quest.progress, 1);
        assert!(quest.completed);
        assert!(player.active_quest.is_none());
        assert_eq!(player.experience, 50);
        assert_eq!(report.experience_gained, 50);
        assert_eq!(report.quest_completed.as_deref(), Some("Find the Lost Artifact"));
    }

    #[test]
    fn test_partial_quest_progress_still_grants_experience() {
        let mut player = Player::new(Position::origin());
        let mut quests = QuestHistory::new();
        let id = quests.register(Quest::new("Cull the wilds", 3, "Bow"));
        player.assign_quest(id);

        let mut battle = session(CreatureType::Fire, CreatureType::Water);
        battle.wild_creature.health = 0;
        battle.evaluate_faint();
        let report = battle.finish(&mut player, &mut quests).unwrap();

        assert_eq!(quests.get(id).unwrap().progress, 1);
        assert!(!quests.get(id).unwrap().completed);
        assert_eq!(player.active_quest, Some(id));
        assert_eq!(report.quest_completed, None);
        assert_eq!(player.experience, 50);
    }

    #[test]
    fn test_no_reward_without_quest() {
        let mut player = Player::new(Position::origin());
        let mut quests = QuestHistory::new();

        let mut battle = session(CreatureType::Fire, CreatureType::Water);
        battle.wild_creature.health = 0;
        battle.evaluate_faint();
        let report = battle.finish(&mut player, &mut quests).unwrap();

        assert_eq!(report.outcome, BattleOutcome::WildFainted);
        assert_eq!(player.experience, 0);
        assert!(player.captures.is_empty());
    }

    #[test]
    fn test_quest_progress_saturates() {
        let mut player = Player::new(Position::origin());
        let mut quests = QuestHistory::new();
        let mut quest = Quest::new("Endless Hunt", u32::MAX, "Gold");
        quest.progress = u32::MAX;
        let id = quests.register(quest);
        player.assign_quest(id);

        let mut battle = session(CreatureType::Fire, CreatureType::Air);
        battle.wild_creature.health = 0;
        battle.evaluate_faint();
        let report = battle.finish(&mut player, &mut quests).unwrap();
        assert_eq!(report.quest_completed.as_deref(), Some("Endless Hunt"));

        let quest = quests.get(id).unwrap();
        assert_eq!(quest.progress, u32::MAX);
        assert!(quest.completed);
    }

    #[test]
    fn test_finish_in_progress_is_an_error() {
        let mut player = Player::new(Position::origin());
        let mut quests = QuestHistory::new();
        let battle = session(CreatureType::Fire, CreatureType::Water);
        assert!(matches!(
            battle.finish(&mut player, &mut quests),
            Err(EldoriaError::InvalidState(_))
        ));
    }

    #[test]
    fn test_log_window() {
        let mut log = BattleLog::new();
        for i in 0..10 {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.len(), 10);
        assert_eq!(log.recent(3), ["line 7", "line 8", "line 9"]);
        assert_eq!(log.recent(50).len(), 10);
    }
}
