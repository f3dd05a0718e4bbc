//! Effect definitions.
//!
//! Effects are the only way powers, artifacts, flares and hazards change
//! the game. Each source returns a list of effects; the `EffectResolver`
//! applies them to the state in order.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlanetId, PlayerId};
use crate::powers::{PowerId, Side, WarpReason};

/// Effects produced by one hook call or one card.
pub type Effects = SmallVec<[Effect; 2]>;

/// Where a combat bonus came from. Bonuses are added in this order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BonusSource {
    Flare,
    Tech,
    Station,
}

/// An atomic change to the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Effect {
    // === Cards ===

    /// Draw from the main deck.
    DrawCards { player: PlayerId, count: u32 },

    /// Draw from the rewards deck, or the main deck without one.
    DrawRewards { player: PlayerId, count: u32 },

    // === Ships ===

    /// Move ships from the warp to the player's colonies.
    RetrieveShips { player: PlayerId, count: u32 },

    /// Take ships off the player's colonies and send them to the warp.
    LoseShips {
        player: PlayerId,
        count: u32,
        reason: WarpReason,
    },

    // === Encounter ===

    /// Add to a side's pending bonus.
    AddBonus {
        side: Side,
        source: BonusSource,
        amount: i32,
    },

    /// Disable one power for the rest of the encounter.
    ZapPower(PowerId),

    /// Disable every power a player holds for the rest of the encounter.
    ZapPlayerPowers(PlayerId),

    /// Skip resolution; staged ships go home.
    CancelEncounter,

    /// Aim the gate elsewhere, unless it is locked.
    ReaimGate(PlanetId),

    /// Revealed attacks count as negotiates.
    ConvertAttacksToNegotiate,
}
