//! # World
//!
//! The map's fixed points of interest and collision checks against the player.

use crate::config::GRID_SIZE;
use crate::{GameEvent, Player, Position, Quest, QuestHistory};
use log::info;
use serde::{Deserialize, Serialize};

/// What happens when the player steps onto a point of interest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Interaction {
    /// An NPC offering a quest
    GrantsQuest { npc: String, quest: Quest },
    /// A treasure spot holding an item
    GrantsItem { item: String },
}

/// A fixed spot on the map the player can interact with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub position: Position,
    pub interaction: Interaction,
}

impl PointOfInterest {
    /// Creates a quest giver.
    pub fn quest_giver(position: Position, npc: impl Into<String>, quest: Quest) -> Self {
        Self {
            position,
            interaction: Interaction::GrantsQuest {
                npc: npc.into(),
                quest,
            },
        }
    }

    /// Creates a treasure spot.
    pub fn treasure(position: Position, item: impl Into<String>) -> Self {
        Self {
            position,
            interaction: Interaction::GrantsItem { item: item.into() },
        }
    }

    /// Applies this point's interaction to the player.
    ///
    /// Runs on every tick the player overlaps the point. Quest givers register
    /// their quest in the history the first time; afterwards the history's copy
    /// is the one that counts, so a completed quest is never handed out again.
    /// Events are only produced when something actually changed.
    pub fn interact(&self, player: &mut Player, quests: &mut QuestHistory) -> Vec<GameEvent> {
        let mut events = Vec::new();

        match &self.interaction {
            Interaction::GrantsQuest { npc, quest } => {
                let id = match quests.find_by_name(&quest.name) {
                    Some(id) => id,
                    None => quests.register(quest.clone()),
                };
                let completed = quests.get(id).map_or(true, |q| q.completed);

                if !completed && player.active_quest != Some(id) {
                    player.assign_quest(id);
                    info!("Quest started: {}", quest.name);
                    events.push(GameEvent::QuestAssigned {
                        npc: npc.clone(),
                        quest: quest.name.clone(),
                    });
                }
            }

            Interaction::GrantsItem { item } => {
                if player.acquire_item(item) {
                    events.push(GameEvent::ItemFound { item: item.clone() });
                }
            }
        }

        events
    }
}

/// Returns true if the player's square overlaps the point's square.
///
/// Both squares are `GRID_SIZE` wide and anchored at their top-left corner.
/// Squares that only share an edge do not overlap.
///
/// # Examples
///
/// ```
/// use eldoria::{check_collision, PointOfInterest, Position};
///
/// let chest = PointOfInterest::treasure(Position::new(500, 500), "Mystic Stone");
/// assert!(check_collision(Position::new(470, 520), &chest));
/// assert!(!check_collision(Position::new(460, 500), &chest));
/// ```
pub fn check_collision(player: Position, point: &PointOfInterest) -> bool {
    let other = point.position;
    player.x < other.x.saturating_add(GRID_SIZE)
        && other.x < player.x.saturating_add(GRID_SIZE)
        && player.y < other.y.saturating_add(GRID_SIZE)
        && other.y < player.y.saturating_add(GRID_SIZE)
}

/// The static map: where the player starts and what can be found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct World {
    pub player_spawn: Position,
    pub points: Vec<PointOfInterest>,
}

impl World {
    /// Creates the standard map with the Elder and the Mystic Stone.
    pub fn new() -> Self {
        Self {
            player_spawn: Position::new(100, 100),
            points: vec![
                PointOfInterest::quest_giver(
                    Position::new(300, 300),
                    "Elder",
                    Quest::new("Find the Lost Artifact", 1, "Gold"),
                ),
                PointOfInterest::treasure(Position::new(500, 500), "Mystic Stone"),
            ],
        }
    }

    /// Runs the interaction of every point the player currently overlaps.
    pub fn interact(&self, player: &mut Player, quests: &mut QuestHistory) -> Vec<GameEvent> {
        let mut events = Vec::new();
        for point in &self.points {
            if check_collision(player.position, point) {
                events.extend(point.interact(player, quests));
            }
        }
        events
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
