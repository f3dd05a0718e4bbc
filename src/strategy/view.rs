//! Read-only game view handed to strategies.

use crate::board::Player;
use crate::cards::{Card, DeckCounts};
use crate::core::{GameConfig, GameState, PlayerId};
use crate::encounter::{EncounterState, Phase};
use crate::powers::{Role, Side};

/// What a strategy sees when asked for a decision.
///
/// The full state is reachable through `state`; the helpers cover what a
/// seat would normally look at.
#[derive(Clone, Copy)]
pub struct GameView<'a> {
    pub state: &'a GameState,
    pub viewer: PlayerId,
}

impl<'a> GameView<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, viewer: PlayerId) -> Self {
        Self { state, viewer }
    }

    #[must_use]
    pub fn player(&self) -> &'a Player {
        &self.state.players[self.viewer]
    }

    #[must_use]
    pub fn hand(&self) -> &'a [Card] {
        &self.player().hand
    }

    #[must_use]
    pub fn config(&self) -> &'a GameConfig {
        &self.state.config
    }

    #[must_use]
    pub fn encounter(&self) -> &'a EncounterState {
        &self.state.encounter
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    #[must_use]
    pub fn role(&self) -> Role {
        self.state.encounter.role_of(self.viewer)
    }

    #[must_use]
    pub fn side(&self) -> Option<Side> {
        self.role().side()
    }

    /// Ships on each side right now.
    #[must_use]
    pub fn side_ships(&self, side: Side) -> u32 {
        self.state.side_ships(side)
    }

    #[must_use]
    pub fn foreign_colonies(&self, player: PlayerId) -> usize {
        self.state.foreign_colonies(player)
    }

    /// Main deck pile sizes.
    #[must_use]
    pub fn main_deck(&self) -> DeckCounts {
        DeckCounts::from(&self.state.decks.main)
    }
}
