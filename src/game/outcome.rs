//! How a game ended.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Why the game stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// Someone reached the foreign colony threshold.
    ColonyThreshold,
    /// A power's own win condition was met.
    AlternateWin,
    /// The turn limit ran out.
    TurnLimit,
}

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameResult {
    /// Every player who won. Empty when the turn limit ran out first.
    pub winners: Vec<PlayerId>,
    pub turns_played: u32,
    pub end_reason: EndReason,
}

impl GameResult {
    /// Check if a player won.
    #[must_use]
    pub fn is_winner(&self, player: PlayerId) -> bool {
        self.winners.contains(&player)
    }

    /// No winner: the turn limit ended the game.
    #[must_use]
    pub fn is_draw(&self) -> bool {
        self.winners.is_empty()
    }
}
