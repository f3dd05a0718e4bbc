//! Planets and the ships on them.

use serde::{Deserialize, Serialize};

use crate::core::{PlanetId, PlayerId, PlayerMap};

/// A planet. Every planet is some player's home planet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Planet {
    pub id: PlanetId,
    pub owner: Option<PlayerId>,
    ships: PlayerMap<u32>,
}

impl Planet {
    #[must_use]
    pub fn new(id: PlanetId, owner: Option<PlayerId>, player_count: usize) -> Self {
        Self {
            id,
            owner,
            ships: PlayerMap::with_value(player_count, 0),
        }
    }

    /// Ships `player` has here.
    #[must_use]
    pub fn ships(&self, player: PlayerId) -> u32 {
        self.ships[player]
    }

    pub fn add_ships(&mut self, player: PlayerId, count: u32) {
        self.ships[player] += count;
    }

    /// Remove `count` ships. Removing more than are present is a bug.
    pub fn remove_ships(&mut self, player: PlayerId, count: u32) {
        debug_assert!(
            self.ships[player] >= count,
            "{} has {} ships on {}, cannot remove {}",
            player,
            self.ships[player],
            self.id,
            count
        );
        self.ships[player] = self.ships[player].saturating_sub(count);
    }

    /// Take every ship `player` has here.
    pub fn clear(&mut self, player: PlayerId) -> u32 {
        std::mem::take(&mut self.ships[player])
    }

    /// `player` has at least one ship here.
    #[must_use]
    pub fn has_colony(&self, player: PlayerId) -> bool {
        self.ships[player] > 0
    }

    #[must_use]
    pub fn is_home_of(&self, player: PlayerId) -> bool {
        self.owner == Some(player)
    }

    /// The owner holds at least one ship here.
    #[must_use]
    pub fn is_home_colony(&self) -> bool {
        self.owner.is_some_and(|owner| self.has_colony(owner))
    }

    /// `player` has ships here and does not own the planet.
    #[must_use]
    pub fn is_foreign_colony_of(&self, player: PlayerId) -> bool {
        !self.is_home_of(player) && self.has_colony(player)
    }

    /// Players with ships here, in seat order.
    pub fn occupants(&self) -> impl Iterator<Item = (PlayerId, u32)> + '_ {
        self.ships.iter().filter(|(_, n)| **n > 0).map(|(p, n)| (p, *n))
    }

    #[must_use]
    pub fn total_ships(&self) -> u32 {
        self.ships.values().sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colony_properties() {
        let red = PlayerId::new(0);
        let blue = PlayerId::new(1);
        let mut planet = Planet::new(PlanetId::new(0), Some(red), 2);

        assert!(!planet.is_home_colony());
        planet.add_ships(red, 2);
        assert!(planet.is_home_colony());
        assert!(!planet.is_foreign_colony_of(red));

        planet.add_ships(blue, 1);
        assert!(planet.is_foreign_colony_of(blue));
        assert_eq!(planet.occupants().collect::<Vec<_>>(), vec![(red, 2), (blue, 1)]);
        assert_eq!(planet.total_ships(), 3);

        assert_eq!(planet.clear(red), 2);
        assert!(!planet.is_home_colony());
    }

    #[test]
    #[should_panic(expected = "cannot remove")]
    fn test_remove_too_many_fails_loudly() {
        let mut planet = Planet::new(PlanetId::new(0), None, 2);
        planet.remove_ships(PlayerId::new(0), 1);
    }
}
