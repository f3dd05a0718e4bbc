//! Destiny deck cards and the tech/hazard expansion cards.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Who a destiny card points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DestinyTarget {
    /// A player's colour.
    Player(PlayerId),
    /// Any opponent, picked at random.
    Wild,
}

/// A destiny card, optionally flagged with a hazard warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DestinyCard {
    pub target: DestinyTarget,
    pub hazard: bool,
}

impl DestinyCard {
    /// Colour card for `player`.
    #[must_use]
    pub const fn player(player: PlayerId) -> Self {
        Self {
            target: DestinyTarget::Player(player),
            hazard: false,
        }
    }

    /// Wild card.
    #[must_use]
    pub const fn wild() -> Self {
        Self {
            target: DestinyTarget::Wild,
            hazard: false,
        }
    }

    /// Mark the card with a hazard warning.
    #[must_use]
    pub const fn with_hazard(mut self) -> Self {
        self.hazard = true;
        self
    }
}

/// A researchable technology.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TechCard {
    pub name: String,
    /// Research points needed to complete it.
    pub cost: u32,
    /// Added to the owner's side total once completed.
    pub combat_bonus: i32,
}

impl TechCard {
    #[must_use]
    pub fn new(name: impl Into<String>, cost: u32, combat_bonus: i32) -> Self {
        Self {
            name: name.into(),
            cost,
            combat_bonus,
        }
    }
}

/// Random events drawn when destiny shows a hazard warning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HazardCard {
    /// The offense loses a ship to the warp.
    IonStorm,
    /// Every player draws a card.
    CosmicQuake,
    /// The gate swings to another planet of the defender.
    GravityRift,
    /// Main players' powers are zapped for the encounter.
    PowerFailure,
}
