//! Engine error type.
//!
//! Only conditions a caller can act on are errors. Exhausted hands and
//! invalid strategy output are recovered inside the engine; broken internal
//! invariants are `debug_assert!`s.

use thiserror::Error;

use super::player::PlayerId;

/// Errors surfaced by the encounter engine.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Draw and discard piles are empty and the deck has no emergency supply.
    #[error("{deck} deck is exhausted and has no emergency supply")]
    DeckExhausted { deck: &'static str },

    /// A full pass over the destiny deck produced no opponent.
    #[error("destiny deck cannot produce a defender for {offense}")]
    NoValidDefender { offense: PlayerId },

    /// A power name was not found in the registry.
    #[error("unknown power `{0}`")]
    UnknownPower(String),

    /// The configuration cannot describe a playable game.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A seat was left without a strategy.
    #[error("{0} has no strategy attached")]
    MissingStrategy(PlayerId),

    /// Encoding the encounter log failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
