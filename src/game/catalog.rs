//! # Creature Catalog
//!
//! The fixed table of creature archetypes and their base stats.

use crate::{EldoriaError, EldoriaResult};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Creature type tags known to the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CreatureType {
    Fire,
    Water,
    Earth,
    Air,
}

/// Static template of base stats for a creature type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatureArchetype {
    pub kind: CreatureType,
    pub base_health: u32,
    pub base_attack: u32,
    pub base_defense: u32,
    /// Display label only
    pub special_move: &'static str,
    /// RGB colour the renderer fills the creature's square with
    pub color: [u8; 3],
}

static ARCHETYPES: [CreatureArchetype; 4] = [
    CreatureArchetype {
        kind: CreatureType::Fire,
        base_health: 120,
        base_attack: 30,
        base_defense: 20,
        special_move: "Fireball",
        color: [255, 0, 0],
    },
    CreatureArchetype {
        kind: CreatureType::Water,
        base_health: 100,
        base_attack: 25,
        base_defense: 30,
        special_move: "Water Blast",
        color: [0, 0, 255],
    },
    CreatureArchetype {
        kind: CreatureType::Earth,
        base_health: 150,
        base_attack: 20,
        base_defense: 40,
        special_move: "Rock Throw",
        color: [255, 255, 0],
    },
    CreatureArchetype {
        kind: CreatureType::Air,
        base_health: 80,
        base_attack: 35,
        base_defense: 15,
        special_move: "Wind Slash",
        color: [0, 255, 255],
    },
];

impl CreatureType {
    /// Every type in catalog order.
    pub const ALL: [CreatureType; 4] = [
        CreatureType::Fire,
        CreatureType::Water,
        CreatureType::Earth,
        CreatureType::Air,
    ];

    /// Returns the archetype for this type.
    pub fn archetype(self) -> &'static CreatureArchetype {
        &ARCHETYPES[self as usize]
    }

    /// Returns the tag string used in save files.
    pub fn as_str(self) -> &'static str {
        match self {
            CreatureType::Fire => "Fire",
            CreatureType::Water => "Water",
            CreatureType::Earth => "Earth",
            CreatureType::Air => "Air",
        }
    }

    /// Picks a type uniformly at random.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> CreatureType {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CreatureType {
    type Err = EldoriaError;

    fn from_str(tag: &str) -> EldoriaResult<Self> {
        CreatureType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == tag)
            .ok_or_else(|| EldoriaError::UnknownType(tag.to_string()))
    }
}

/// Looks up the archetype for a type tag.
///
/// # Examples
///
/// ```
/// use eldoria::lookup;
///
/// let earth = lookup("Earth").unwrap();
/// assert_eq!(earth.base_defense, 40);
/// assert!(lookup("Lightning").is_err());
/// ```
pub fn lookup(tag: &str) -> EldoriaResult<&'static CreatureArchetype> {
    tag.parse::<CreatureType>().map(CreatureType::archetype)
}
