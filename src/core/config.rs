//! Game configuration.
//!
//! `GameConfig` carries the table constants and the optional expansions
//! (`Variants`). Builders set fields; `validate` rejects tables that cannot
//! be played.

use serde::{Deserialize, Serialize};

use super::error::{EngineError, Result};

/// Optional rule expansions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variants {
    /// Each player carries a second power.
    pub dual_powers: bool,
    /// Reduced-player table: the defender is always the other player.
    pub two_player: bool,
    /// Flare cards are shuffled into the main deck.
    pub flares: bool,
    /// Defensive allies draw rewards from a separate rewards deck.
    pub rewards_deck: bool,
    /// Players research tech cards during regroup.
    pub tech: bool,
    /// Destiny cards may carry hazard warnings.
    pub hazards: bool,
    /// Each player owns a station on a home planet.
    pub stations: bool,
}

impl Default for Variants {
    fn default() -> Self {
        Self {
            dual_powers: false,
            two_player: false,
            flares: true,
            rewards_deck: false,
            tech: false,
            hazards: false,
            stations: false,
        }
    }
}

/// Complete table configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of players (2-8).
    pub player_count: usize,
    /// Home planets per player.
    pub planets_per_player: usize,
    /// Ships placed on each home planet at setup.
    pub ships_per_planet: u32,
    /// Cards dealt at setup and on a forced redraw.
    pub starting_hand_size: usize,
    /// Upper bound on ships a single player commits to one encounter.
    pub max_ships_per_encounter: u32,
    /// Foreign colonies needed to win.
    pub win_colonies: usize,
    /// Home colonies needed to keep powers active.
    pub min_home_colonies: usize,
    /// Ships each main player loses when a deal fails.
    pub deal_penalty_ships: u32,
    /// Turns before the game stops without a colony winner.
    pub max_turns: u32,
    /// Optional expansions.
    pub variants: Variants,
}

impl GameConfig {
    /// Standard table for `player_count` players.
    ///
    /// The reduced-player variant is switched on for two players.
    #[must_use]
    pub fn new(player_count: usize) -> Self {
        Self {
            player_count,
            planets_per_player: 5,
            ships_per_planet: 4,
            starting_hand_size: 8,
            max_ships_per_encounter: 4,
            win_colonies: 5,
            min_home_colonies: 3,
            deal_penalty_ships: 3,
            max_turns: 100,
            variants: Variants {
                two_player: player_count == 2,
                ..Variants::default()
            },
        }
    }

    /// Set the turn limit.
    #[must_use]
    pub fn with_max_turns(mut self, max_turns: u32) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Set the number of foreign colonies needed to win.
    #[must_use]
    pub fn with_win_colonies(mut self, colonies: usize) -> Self {
        self.win_colonies = colonies;
        self
    }

    /// Set the starting hand size.
    #[must_use]
    pub fn with_hand_size(mut self, size: usize) -> Self {
        self.starting_hand_size = size;
        self
    }

    /// Replace the variant flags.
    #[must_use]
    pub fn with_variants(mut self, variants: Variants) -> Self {
        self.variants = variants;
        self
    }

    /// Ships each player owns for the whole game.
    #[must_use]
    pub fn ships_per_player(&self) -> u32 {
        self.planets_per_player as u32 * self.ships_per_planet
    }

    /// Check the table can be played.
    pub fn validate(&self) -> Result<()> {
        if !(2..=8).contains(&self.player_count) {
            return Err(EngineError::InvalidConfig(format!(
                "player count must be 2-8, got {}",
                self.player_count
            )));
        }
        if self.variants.two_player && self.player_count != 2 {
            return Err(EngineError::InvalidConfig(
                "the two-player variant needs exactly two players".to_string(),
            ));
        }
        if self.planets_per_player == 0 || self.ships_per_planet == 0 {
            return Err(EngineError::InvalidConfig(
                "players need at least one planet and one ship per planet".to_string(),
            ));
        }
        if self.min_home_colonies > self.planets_per_player {
            return Err(EngineError::InvalidConfig(format!(
                "{} home colonies required but only {} planets per player",
                self.min_home_colonies, self.planets_per_player
            )));
        }
        if self.max_ships_per_encounter == 0 || self.win_colonies == 0 {
            return Err(EngineError::InvalidConfig(
                "encounter ship limit and win threshold must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new(4);
        assert_eq!(config.ships_per_player(), 20);
        assert_eq!(config.win_colonies, 5);
        assert!(!config.variants.two_player);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_two_players_switch_on_fixed_opponent() {
        let config = GameConfig::new(2);
        assert!(config.variants.two_player);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_methods() {
        let config = GameConfig::new(3)
            .with_max_turns(7)
            .with_win_colonies(2)
            .with_hand_size(5)
            .with_variants(Variants {
                tech: true,
                ..Variants::default()
            });

        assert_eq!(config.max_turns, 7);
        assert_eq!(config.win_colonies, 2);
        assert_eq!(config.starting_hand_size, 5);
        assert!(config.variants.tech);
    }

    #[test]
    fn test_validate_rejects_bad_tables() {
        assert!(matches!(GameConfig::new(1).validate(), Err(EngineError::InvalidConfig(_))));
        assert!(matches!(GameConfig::new(9).validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = GameConfig::new(4);
        config.variants.two_player = true;
        assert!(config.validate().is_err());

        let mut config = GameConfig::new(4);
        config.min_home_colonies = 6;
        assert!(config.validate().is_err());
    }
}
