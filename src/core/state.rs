//! Complete game state.
//!
//! `GameState` owns every mutable piece of a game: players, planets, the
//! gate, the decks, the current encounter and the log. The orchestrator is
//! the only writer. Ship movement helpers keep each ship in exactly one
//! place (planet, gate, warp or removed); `ships_conserved` checks it.

use smallvec::SmallVec;

use super::config::GameConfig;
use super::error::Result;
use super::history::GameLog;
use super::player::{PlanetId, PlayerId, PlayerMap};
use super::rng::GameRng;
use crate::board::{HyperspaceGate, Origins, Planet, Player, StationState, TechState};
use crate::cards::{Card, Decks};
use crate::encounter::{EncounterState, Phase};
use crate::powers::Side;

/// Bonus a station gives its owner when defending its planet.
pub const STATION_DEFENSE_BONUS: i32 = 2;

/// Everything that changes during a game.
#[derive(Clone, Debug)]
pub struct GameState {
    pub config: GameConfig,
    pub players: PlayerMap<Player>,
    pub planets: Vec<Planet>,
    pub gate: HyperspaceGate,
    pub decks: Decks,
    /// Reset at the start of every encounter.
    pub encounter: EncounterState,
    /// Destiny wilds and compensation picks draw from here.
    pub rng: GameRng,
    /// Turn number, starting at 1.
    pub turn: u32,
    pub phase: Phase,
    pub log: GameLog,
}

impl GameState {
    /// Set up the board: every player gets `planets_per_player` home planets
    /// holding `ships_per_planet` ships each.
    #[must_use]
    pub fn new(config: GameConfig, decks: Decks, rng: GameRng) -> Self {
        let player_count = config.player_count;
        let mut planets = Vec::with_capacity(player_count * config.planets_per_player);
        for owner in PlayerId::all(player_count) {
            for _ in 0..config.planets_per_player {
                let mut planet = Planet::new(PlanetId::new(planets.len() as u16), Some(owner), player_count);
                planet.add_ships(owner, config.ships_per_planet);
                planets.push(planet);
            }
        }

        let variants = config.variants.clone();
        let players = PlayerMap::new(player_count, |id| {
            let mut player = Player::new(id, id.to_string());
            if variants.stations {
                player.station = Some(StationState {
                    planet: PlanetId::new((id.index() * config.planets_per_player) as u16),
                    defense_bonus: STATION_DEFENSE_BONUS,
                });
            }
            if variants.tech {
                player.tech = Some(TechState::default());
            }
            player
        });

        Self {
            config,
            players,
            planets,
            gate: HyperspaceGate::new(),
            decks,
            encounter: EncounterState::new(PlayerId::new(0), 1),
            rng,
            turn: 1,
            phase: Phase::StartTurn,
            log: GameLog::new(),
        }
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    #[must_use]
    pub fn planet(&self, id: PlanetId) -> &Planet {
        &self.planets[id.index()]
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> &mut Planet {
        &mut self.planets[id.index()]
    }

    /// Every other seat, in seat order after `player`.
    #[must_use]
    pub fn opponents(&self, player: PlayerId) -> Vec<PlayerId> {
        let count = self.player_count();
        (1..count)
            .map(|offset| PlayerId::new(((player.index() + offset) % count) as u8))
            .collect()
    }

    // === Colonies ===

    pub fn home_planets(&self, player: PlayerId) -> impl Iterator<Item = PlanetId> + '_ {
        self.planets
            .iter()
            .filter(move |planet| planet.is_home_of(player))
            .map(|planet| planet.id)
    }

    /// Own home planets the player still has ships on.
    #[must_use]
    pub fn home_colonies(&self, player: PlayerId) -> usize {
        self.planets
            .iter()
            .filter(|planet| planet.is_home_of(player) && planet.has_colony(player))
            .count()
    }

    /// Other players' planets the player has ships on.
    #[must_use]
    pub fn foreign_colonies(&self, player: PlayerId) -> usize {
        self.planets
            .iter()
            .filter(|planet| planet.is_foreign_colony_of(player))
            .count()
    }

    /// Every planet the player has ships on.
    #[must_use]
    pub fn colonies(&self, player: PlayerId) -> Vec<PlanetId> {
        self.planets
            .iter()
            .filter(|planet| planet.has_colony(player))
            .map(|planet| planet.id)
            .collect()
    }

    // === Ship counts ===

    #[must_use]
    pub fn ships_on_planets(&self, player: PlayerId) -> u32 {
        self.planets.iter().map(|planet| planet.ships(player)).sum()
    }

    /// Ships the player has in the current encounter: staged on the gate,
    /// plus the defender's ships on the target planet.
    #[must_use]
    pub fn committed_ships(&self, player: PlayerId) -> u32 {
        let defending = match (self.encounter.defense, self.gate.target()) {
            (Some(defense), Some(target)) if defense == player => self.planet(target).ships(player),
            _ => 0,
        };
        self.gate.staged(player) + defending
    }

    /// Ships fighting for `side`: main player plus allies.
    #[must_use]
    pub fn side_ships(&self, side: Side) -> u32 {
        self.encounter
            .side_players(side)
            .iter()
            .map(|p| self.committed_ships(*p))
            .sum()
    }

    /// Every ship a player owns, wherever it is.
    #[must_use]
    pub fn total_ships(&self, player: PlayerId) -> u32 {
        let p = &self.players[player];
        self.ships_on_planets(player) + self.gate.staged(player) + p.ships_in_warp + p.ships_removed
    }

    /// No ship was created or lost.
    #[must_use]
    pub fn ships_conserved(&self) -> bool {
        let expected = self.config.ships_per_player();
        self.players.player_ids().all(|p| self.total_ships(p) == expected)
    }

    // === Ship movement ===

    /// Remove up to `count` ships from the player's planets, one at a time
    /// from the planet with the most of them (lowest id on ties).
    pub fn take_ships(&mut self, player: PlayerId, count: u32) -> Origins {
        let mut origins = Origins::new();
        for _ in 0..count {
            let Some(source) = self
                .planets
                .iter()
                .filter(|planet| planet.has_colony(player))
                .max_by(|a, b| a.ships(player).cmp(&b.ships(player)).then(b.id.cmp(&a.id)))
                .map(|planet| planet.id)
            else {
                break;
            };
            self.planet_mut(source).remove_ships(player, 1);
            match origins.iter_mut().find(|(planet, _)| *planet == source) {
                Some((_, n)) => *n += 1,
                None => origins.push((source, 1)),
            }
        }
        origins
    }

    /// Move up to `count` ships onto the gate. Returns the number staged.
    pub fn stage_ships(&mut self, player: PlayerId, count: u32) -> u32 {
        let origins = self.take_ships(player, count);
        let mut staged = 0;
        for (planet, n) in origins {
            self.gate.stage(player, planet, n);
            staged += n;
        }
        staged
    }

    /// Send the player's staged ships back where they came from.
    pub fn return_staged(&mut self, player: PlayerId) -> u32 {
        let mut returned = 0;
        for (planet, n) in self.gate.take(player) {
            self.planet_mut(planet).add_ships(player, n);
            returned += n;
        }
        returned
    }

    /// Land the player's staged ships on `planet`.
    pub fn land_staged(&mut self, player: PlayerId, planet: PlanetId) -> u32 {
        let count: u32 = self.gate.take(player).iter().map(|(_, n)| n).sum();
        self.planet_mut(planet).add_ships(player, count);
        count
    }

    /// Remove the player's staged ships from the gate without placing them.
    pub fn take_staged(&mut self, player: PlayerId) -> u32 {
        self.gate.take(player).iter().map(|(_, n)| n).sum()
    }

    /// Where returning ships go: the first home planet the player still
    /// holds, else any colony, else the first home planet.
    #[must_use]
    pub fn placement_planet(&self, player: PlayerId) -> Option<PlanetId> {
        let mut homes = self.home_planets(player);
        let first_home = homes.next();
        self.home_planets(player)
            .find(|planet| self.planet(*planet).has_colony(player))
            .or_else(|| self.colonies(player).first().copied())
            .or(first_home)
    }

    /// Put `count` off-board ships back on the player's colonies.
    pub fn place_ships(&mut self, player: PlayerId, count: u32) {
        if count == 0 {
            return;
        }
        match self.placement_planet(player) {
            Some(planet) => self.planet_mut(planet).add_ships(player, count),
            None => {
                debug_assert!(false, "{player} has nowhere to place {count} ships");
                self.players[player].ships_in_warp += count;
            }
        }
    }

    /// Move up to `count` ships from the warp to the player's colonies.
    pub fn retrieve_from_warp(&mut self, player: PlayerId, count: u32) -> u32 {
        let retrieved = count.min(self.players[player].ships_in_warp);
        self.players[player].ships_in_warp -= retrieved;
        self.place_ships(player, retrieved);
        retrieved
    }

    // === Cards ===

    /// Draw from the main deck into the player's hand.
    pub fn draw_cards(&mut self, player: PlayerId, count: u32) -> Result<()> {
        let cards = self.decks.main.draw_multiple(count as usize)?;
        self.players[player].hand.extend(cards);
        Ok(())
    }

    /// Draw from the rewards deck, falling back to the main deck.
    pub fn draw_rewards(&mut self, player: PlayerId, count: u32) -> Result<()> {
        let cards = self.decks.draw_rewards(count as usize)?;
        self.players[player].hand.extend(cards);
        Ok(())
    }

    /// Put a card on the discard pile of the deck it came from.
    pub fn discard(&mut self, card: Card) {
        self.decks.discard(card);
    }

    /// Discard the whole hand.
    pub fn discard_hand(&mut self, player: PlayerId) {
        let hand = std::mem::take(&mut self.players[player].hand);
        for card in hand {
            self.discard(card);
        }
    }

    /// Move up to `count` random cards from one hand to another.
    pub fn transfer_random_cards(&mut self, from: PlayerId, to: PlayerId, count: u32) -> u32 {
        let mut moved = 0;
        for _ in 0..count {
            let Some(index) = self.rng.choose_index(self.players[from].hand.len()) else {
                break;
            };
            let card = self.players[from].hand.swap_remove(index);
            self.players[to].hand.push(card);
            moved += 1;
        }
        moved
    }

    // === Powers ===

    /// Recompute every `power_active` flag from home colonies.
    ///
    /// `exempt` marks players whose power ignores the home colony rule.
    /// Returns the players whose flag changed.
    pub fn refresh_power_active(&mut self, exempt: impl Fn(PlayerId) -> bool) -> SmallVec<[PlayerId; 4]> {
        let threshold = self.config.min_home_colonies;
        let mut changed = SmallVec::new();
        for player in self.players.player_ids() {
            let active = exempt(player) || self.home_colonies(player) >= threshold;
            if self.players[player].power_active != active {
                self.players[player].power_active = active;
                changed.push(player);
            }
        }
        changed
    }

    /// Players at or above the colony win threshold.
    #[must_use]
    pub fn colony_winners(&self) -> Vec<PlayerId> {
        let threshold = self.config.win_colonies;
        self.players
            .player_ids()
            .filter(|p| self.foreign_colonies(*p) >= threshold)
            .collect()
    }
}
