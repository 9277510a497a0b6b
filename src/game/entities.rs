//! # Entities
//!
//! The player and creature records together with the operations that mutate
//! them: movement, experience and level-ups, quests, items and damage.

use crate::config::EXPERIENCE_PER_LEVEL;
use crate::{CreatureType, Position, QuestHistory, QuestId};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A creature instance, either wild or owned by the player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creature {
    pub kind: CreatureType,
    pub position: Position,
    /// Current health, never above the archetype's base health
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Creature {
    /// Creates a full-health creature of the given type.
    ///
    /// # Examples
    ///
    /// ```
    /// use eldoria::{Creature, CreatureType, Position};
    ///
    /// let water = Creature::new(CreatureType::Water, Position::origin());
    /// assert_eq!(water.health, 100);
    /// assert_eq!(water.defense, 30);
    /// ```
    pub fn new(kind: CreatureType, position: Position) -> Self {
        let archetype = kind.archetype();
        Self {
            kind,
            position,
            health: archetype.base_health,
            attack: archetype.base_attack,
            defense: archetype.base_defense,
        }
    }

    /// Damage this creature deals to `target` with a plain attack.
    pub fn damage_against(&self, target: &Creature) -> u32 {
        self.attack.saturating_sub(target.defense)
    }

    /// Removes health, stopping at zero.
    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }

    pub fn is_fainted(&self) -> bool {
        self.health == 0
    }

    pub fn max_health(&self) -> u32 {
        self.kind.archetype().base_health
    }
}

/// Player combat stats. They only grow through level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub health: u32,
    pub attack: u32,
    pub defense: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            health: 100,
            attack: 20,
            defense: 10,
        }
    }
}

/// The player character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub position: Position,
    /// Always at least 1
    pub level: u32,
    pub experience: u32,
    pub stats: PlayerStats,
    /// Item name to possessed flag
    pub items: BTreeMap<String, bool>,
    /// Captured creatures in capture order
    pub captures: Vec<Creature>,
    pub active_quest: Option<QuestId>,
}

impl Player {
    /// Creates a level-1 player with the starting inventory.
    pub fn new(position: Position) -> Self {
        let items = ["bomb", "bow"]
            .into_iter()
            .map(|item| (item.to_string(), false))
            .collect();

        Self {
            position,
            level: 1,
            experience: 0,
            stats: PlayerStats::default(),
            items,
            captures: Vec::new(),
            active_quest: None,
        }
    }

    /// Moves the player by the given offset. Positions are not clamped to the map.
    pub fn move_by(&mut self, dx: i32, dy: i32) {
        self.position = self.position + Position::new(dx, dy);
    }

    /// Experience needed at the current level before the next level-up.
    pub fn experience_to_next_level(&self) -> u32 {
        EXPERIENCE_PER_LEVEL.saturating_mul(self.level)
    }

    /// Adds experience and applies every level-up it pays for.
    ///
    /// Returns the number of levels gained.
    ///
    /// # Examples
    ///
    /// ```
    /// use eldoria::{Player, Position};
    ///
    /// let mut player = Player::new(Position::origin());
    /// assert_eq!(player.gain_experience(100), 1);
    /// assert_eq!(player.level, 2);
    /// assert_eq!(player.experience, 0);
    /// ```
    pub fn gain_experience(&mut self, amount: u32) -> u32 {
        self.experience = self.experience.saturating_add(amount);
        debug!("Gained {} experience ({} total)", amount, self.experience);

        let mut levels = 0;
        while self.experience >= self.experience_to_next_level() {
            self.level_up();
            levels += 1;
        }
        levels
    }

    /// Raises the level by one, resetting experience and growing stats.
    pub fn level_up(&mut self) {
        self.level = self.level.saturating_add(1);
        self.experience = 0;
        self.stats.health = self.stats.health.saturating_add(20);
        self.stats.attack = self.stats.attack.saturating_add(5);
        self.stats.defense = self.stats.defense.saturating_add(5);
        info!("Level up! Now level {}", self.level);
    }

    /// Makes `quest` the active quest, replacing any unfinished one.
    pub fn assign_quest(&mut self, quest: QuestId) {
        self.active_quest = Some(quest);
    }

    /// Completes the active quest if its progress allows it.
    ///
    /// Returns true when a quest was completed and cleared.
    pub fn complete_quest(&mut self, quests: &mut QuestHistory) -> bool {
        let Some(id) = self.active_quest else {
            return false;
        };
        let Some(quest) = quests.get_mut(id) else {
            return false;
        };
        if !quest.try_complete() {
            return false;
        }

        info!("Quest completed: {} - Reward: {}", quest.name, quest.reward);
        self.active_quest = None;
        true
    }

    /// Marks an item as possessed. Returns true if it was not held before.
    pub fn acquire_item(&mut self, item: &str) -> bool {
        let held = self.items.insert(item.to_string(), true);
        let newly_acquired = held != Some(true);
        if newly_acquired {
            info!("Item found: {}", item);
        }
        newly_acquired
    }

    pub fn has_item(&self, item: &str) -> bool {
        self.items.get(item).copied().unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Quest;
    use proptest::prelude::*;

    #[test]
    fn test_player_defaults() {
        let player = Player::new(Position::new(100, 100));
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 0);
        assert_eq!(player.stats, PlayerStats::default());
        assert_eq!(player.items.len(), 2);
        assert!(!player.has_item("bomb"));
        assert!(player.captures.is_empty());
        assert!(player.active_quest.is_none());
    }

    #[test]
    fn test_move_is_unbounded() {
        let mut player = Player::new(Position::origin());
        player.move_by(-5000, 0);
        player.move_by(0, 12);
        assert_eq!(player.position, Position::new(-5000, 12));
    }

    #[test]
    fn test_level_up_grows_stats() {
        let mut player = Player::new(Position::origin());
        player.experience = 42;
        player.level_up();
        assert_eq!(player.level, 2);
        assert_eq!(player.experience, 0);
        assert_eq!(
            player.stats,
            PlayerStats {
                health: 120,
                attack: 25,
                defense: 15
            }
        );
    }

    #[test]
    fn test_gain_experience_below_threshold() {
        let mut player = Player::new(Position::origin());
        assert_eq!(player.gain_experience(99), 0);
        assert_eq!(player.level, 1);
        assert_eq!(player.experience, 99);
    }

    #[test]
    fn test_gain_experience_crosses_threshold() {
        let mut player = Player::new(Position::origin());
        let levels = player.gain_experience(250);
        assert!(levels >= 1);
        assert!(player.experience < player.experience_to_next_level());
    }

    #[test]
    fn test_complete_quest_requires_progress() {
        let mut quests = QuestHistory::new();
        let id = quests.register(Quest::new("Hunt", 1, "Gold"));
        let mut player = Player::new(Position::origin());

        assert!(!player.complete_quest(&mut quests));

        player.assign_quest(id);
        assert!(!player.complete_quest(&mut quests));
        assert_eq!(player.active_quest, Some(id));

        quests.get_mut(id).unwrap().progress = 1;
        assert!(player.complete_quest(&mut quests));
        assert!(quests.get(id).unwrap().completed);
        assert!(player.active_quest.is_none());
    }

    #[test]
    fn test_assign_quest_overwrites() {
        let mut quests = QuestHistory::new();
        let first = quests.register(Quest::new("First", 1, "Gold"));
        let second = quests.register(Quest::new("Second", 1, "Gold"));
        let mut player = Player::new(Position::origin());

        player.assign_quest(first);
        player.assign_quest(second);
        assert_eq!(player.active_quest, Some(second));
    }

    #[test]
    fn test_acquire_item_is_idempotent() {
        let mut player = Player::new(Position::origin());
        assert!(player.acquire_item("bomb"));
        assert!(!player.acquire_item("bomb"));
        assert!(player.acquire_item("Mystic Stone"));
        assert!(player.has_item("bomb"));
        assert!(player.has_item("Mystic Stone"));
        assert_eq!(player.items.len(), 3);
    }

    #[test]
    fn test_huge_level_and_stats_saturate() {
        let mut player = Player::new(Position::origin());
        player.level = 50_000_000;
        player.stats.health = u32::MAX;
        assert_eq!(player.experience_to_next_level(), u32::MAX);

        assert_eq!(player.gain_experience(50), 0);
        player.level_up();
        assert_eq!(player.level, 50_000_001);
        assert_eq!(player.stats.health, u32::MAX);
    }

    #[test]
    fn test_take_damage_saturates() {
        let mut air = Creature::new(CreatureType::Air, Position::origin());
        air.take_damage(1000);
        assert_eq!(air.health, 0);
        assert!(air.is_fainted());
    }

    proptest! {
        #[test]
        fn prop_damage_never_negative(attack in 0u32..500, defense in 0u32..500) {
            let mut attacker = Creature::new(CreatureType::Fire, Position::origin());
            let mut target = Creature::new(CreatureType::Earth, Position::origin());
            attacker.attack = attacker.attack.min(attack);
            target.defense = defense;

            let damage = attacker.damage_against(&target);
            if attacker.attack < defense {
                prop_assert_eq!(damage, 0);
            } else {
                prop_assert_eq!(damage, attacker.attack - defense);
            }

            let before = target.health;
            target.take_damage(damage);
            prop_assert!(target.health <= before);
        }

        #[test]
        fn prop_experience_stays_below_threshold(amounts in proptest::collection::vec(0u32..2000, 1..20)) {
            let mut player = Player::new(Position::origin());
            for amount in amounts {
                let level_before = player.level;
                let gained = player.gain_experience(amount);
                prop_assert_eq!(player.level, level_before + gained);
                prop_assert!(player.experience < player.experience_to_next_level());
            }
        }
    }
}
