//! Cards held in hands and the main/rewards decks.
//!
//! Cards are plain immutable values. The engine moves them between decks,
//! hands and discard piles; it never copies one to create another.

use serde::{Deserialize, Serialize};

use crate::powers::PowerId;

/// A card from the main deck or the rewards deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Card {
    /// Encounter card: value added to the side's ships.
    Attack(u32),
    /// Encounter card: asks for a deal, loses to an attack.
    Negotiate,
    /// Encounter card: becomes a copy of the opposing card.
    Morph,
    /// Added to a side's total after the attack values are known.
    Reinforcement(u32),
    /// Played with an encounter card; multiplies its attack value.
    Kicker(u32),
    /// One-shot effect card.
    Artifact(ArtifactKind),
    /// Power-linked effect card with a wild and a super tier.
    Flare(FlareCard),
}

impl Card {
    /// Attack, negotiate and morph cards can be played as the encounter card.
    #[must_use]
    pub fn is_encounter_card(&self) -> bool {
        matches!(self, Card::Attack(_) | Card::Negotiate | Card::Morph)
    }

    /// Artifacts and flares are offered at phase opportunities.
    #[must_use]
    pub fn is_special(&self) -> bool {
        matches!(self, Card::Artifact(_) | Card::Flare(_))
    }

    /// Attack value, if this is an attack card.
    #[must_use]
    pub fn attack_value(&self) -> Option<u32> {
        match self {
            Card::Attack(value) => Some(*value),
            _ => None,
        }
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Card::Attack(value) => write!(f, "Attack {value:02}"),
            Card::Negotiate => write!(f, "Negotiate"),
            Card::Morph => write!(f, "Morph"),
            Card::Reinforcement(value) => write!(f, "Reinforcement +{value}"),
            Card::Kicker(multiplier) => write!(f, "Kicker x{multiplier}"),
            Card::Artifact(kind) => write!(f, "{kind:?}"),
            Card::Flare(flare) => write!(f, "Flare ({})", flare.power),
        }
    }
}

/// One-shot artifacts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArtifactKind {
    /// Zaps one power for the rest of the encounter.
    CosmicZap,
    /// Cancels the encounter before resolution.
    ForceField,
    /// Frees ships from the warp.
    MobiusTubes,
    /// Every revealed attack counts as a negotiate.
    EmotionControl,
}

/// Flare card tied to one power.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlareCard {
    /// Power whose holder may use the super tier.
    pub power: PowerId,
    /// Effect available to everyone else.
    pub wild: FlareEffect,
    /// Effect available to the matching power's holder.
    pub super_effect: FlareEffect,
}

/// What a flare does when played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FlareEffect {
    /// Adds to the player's side total.
    CombatBonus(i32),
    /// The player draws cards from the main deck.
    DrawCards(u32),
    /// The player retrieves ships from the warp.
    RetrieveShips(u32),
    /// Zaps the opposing main player's powers.
    ZapOpponent,
}
