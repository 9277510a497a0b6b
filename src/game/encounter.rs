//! # Encounters
//!
//! Decides when a wild creature jumps out at the player.

use crate::{Creature, CreatureType, GameConfig, Position};
use log::debug;
use rand::Rng;

/// Rolls for random wild encounters once per world tick.
#[derive(Debug, Clone, PartialEq)]
pub struct EncounterController {
    /// Chance per tick (0.0 to 1.0)
    pub chance: f64,
    /// Where wild creatures appear
    pub spawn: Position,
}

impl EncounterController {
    pub fn new(chance: f64, spawn: Position) -> Self {
        Self { chance, spawn }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.encounter_chance, config.encounter_position)
    }

    /// Rolls for an encounter.
    ///
    /// While a battle is already running nothing is drawn from `rng` and no
    /// creature is returned.
    pub fn check<R: Rng + ?Sized>(&self, battle_active: bool, rng: &mut R) -> Option<Creature> {
        if battle_active {
            return None;
        }
        if rng.gen::<f64>() >= self.chance {
            return None;
        }

        let kind = CreatureType::random(rng);
        debug!("Wild {} encounter triggered", kind);
        Some(Creature::new(kind, self.spawn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_rate_converges_when_idle() {
        let controller = EncounterController::new(0.05, Position::new(300, 300));
        let mut rng = StdRng::seed_from_u64(42);
        let ticks = 20_000;

        let hits = (0..ticks)
            .filter_map(|_| controller.check(false, &mut rng))
            .inspect(|creature| assert_eq!(creature.position, Position::new(300, 300)))
            .count();

        let rate = hits as f64 / ticks as f64;
        assert!((rate - 0.05).abs() < 0.01, "encounter rate was {}", rate);
    }

    #[test]
    fn test_never_triggers_during_battle() {
        let controller = EncounterController::new(1.0, Position::origin());
        let mut rng = StdRng::seed_from_u64(42);
        assert!((0..1000).all(|_| controller.check(true, &mut rng).is_none()));
    }

    #[test]
    fn test_spawned_creature_is_full_health() {
        let controller = EncounterController::new(1.0, Position::origin());
        let mut rng = StdRng::seed_from_u64(5);
        let creature = controller.check(false, &mut rng).unwrap();
        assert_eq!(creature.health, creature.max_health());
    }
}
