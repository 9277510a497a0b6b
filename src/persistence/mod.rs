//! # Persistence Module
//!
//! Save-file schema and the encode/decode step between game state and bytes.
//!
//! Only the archetype tag of each captured creature is written, so captures
//! always come back at full health. Quests are stored in full.

pub mod store;

pub use store::*;

use crate::config::MAX_LEVEL;
use crate::{
    Creature, CreatureType, EldoriaError, EldoriaResult, Player, PlayerStats, Position, Quest,
    QuestHistory,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Top-level persisted record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveData {
    pub player: PlayerRecord,
    pub quests: Vec<Quest>,
}

/// Persisted player fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub x: i32,
    pub y: i32,
    pub level: u32,
    pub experience: u32,
    pub stats: PlayerStats,
    pub items: BTreeMap<String, bool>,
    /// Archetype tags in capture order
    pub captures: Vec<String>,
}

/// Player and quest history rebuilt from a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSnapshot {
    pub player: Player,
    pub quests: QuestHistory,
}

impl SaveData {
    /// Captures the persistable parts of a player and quest history.
    pub fn from_state(player: &Player, quests: &QuestHistory) -> Self {
        Self {
            player: PlayerRecord {
                x: player.position.x,
                y: player.position.y,
                level: player.level,
                experience: player.experience,
                stats: player.stats,
                items: player.items.clone(),
                captures: player
                    .captures
                    .iter()
                    .map(|creature| creature.kind.to_string())
                    .collect(),
            },
            quests: quests.as_slice().to_vec(),
        }
    }

    /// Rebuilds the player, validating what serde cannot.
    pub fn into_snapshot(self) -> EldoriaResult<PlayerSnapshot> {
        let record = self.player;
        if record.level == 0 || record.level > MAX_LEVEL {
            return Err(EldoriaError::CorruptData(format!(
                "player level {} outside 1..={}",
                record.level, MAX_LEVEL
            )));
        }
        if let Some(quest) = self.quests.iter().find(|quest| quest.required == 0) {
            return Err(EldoriaError::CorruptData(format!(
                "quest '{}' requires no progress",
                quest.name
            )));
        }

        let captures = record
            .captures
            .iter()
            .map(|tag| {
                tag.parse::<CreatureType>()
                    .map(|kind| Creature::new(kind, Position::origin()))
                    .map_err(|e| EldoriaError::CorruptData(e.to_string()))
            })
            .collect::<EldoriaResult<Vec<_>>>()?;

        let player = Player {
            position: Position::new(record.x, record.y),
            level: record.level,
            experience: record.experience,
            stats: record.stats,
            items: record.items,
            captures,
            active_quest: None,
        };

        Ok(PlayerSnapshot {
            player,
            quests: QuestHistory::from_quests(self.quests),
        })
    }
}

/// Serializes the player and quest history.
pub fn encode(player: &Player, quests: &QuestHistory) -> EldoriaResult<Vec<u8>> {
    serde_json::to_vec_pretty(&SaveData::from_state(player, quests)).map_err(EldoriaError::from)
}

/// Deserializes a save produced by [`encode`].
pub fn decode(bytes: &[u8]) -> EldoriaResult<PlayerSnapshot> {
    let data: SaveData =
        serde_json::from_slice(bytes).map_err(|e| EldoriaError::CorruptData(e.to_string()))?;
    data.into_snapshot()
}

/// Encodes the game and writes it to `store`.
pub fn save(store: &dyn SaveStore, player: &Player, quests: &QuestHistory) -> EldoriaResult<()> {
    let bytes = encode(player, quests)?;
    store.write(&bytes)?;
    log::info!("Game saved ({} bytes)", bytes.len());
    Ok(())
}

/// Reads and decodes the game from `store`.
///
/// Fails with [`EldoriaError::NotFound`] when nothing has been saved yet.
pub fn load(store: &dyn SaveStore) -> EldoriaResult<PlayerSnapshot> {
    let bytes = store.read()?.ok_or(EldoriaError::NotFound)?;
    let snapshot = decode(&bytes)?;
    log::info!("Game loaded");
    Ok(snapshot)
}
