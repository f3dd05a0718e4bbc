//! Cards and decks.
//!
//! ## Key Types
//!
//! - `Card`: main/rewards deck card (attack, negotiate, morph, reinforcement,
//!   kicker, artifact, flare)
//! - `DestinyCard`: picks the defender
//! - `TechCard`, `HazardCard`: expansion decks
//! - `Deck<C>`: draw + discard piles with reshuffle and emergency supply
//! - `Decks`: every deck a game uses

pub mod card;
pub mod catalog;
pub mod deck;
pub mod destiny;

pub use card::{ArtifactKind, Card, FlareCard, FlareEffect};
pub use deck::{Deck, DeckCard, DeckCounts, Decks};
pub use destiny::{DestinyCard, DestinyTarget, HazardCard, TechCard};
