//! The `Power` trait and the context its hooks receive.
//!
//! Every hook has a no-op default, so a power only overrides what it
//! changes. Hooks never get mutable access to the game: value hooks return
//! the adjusted value and event hooks return `Effects` for the engine to
//! resolve.

use serde::{Deserialize, Serialize};

use crate::board::Player;
use crate::core::{GameState, PlanetId, PlayerId};
use crate::effects::Effects;
use crate::encounter::{EncounterState, Phase};

/// Registration index of a power. Lower ids fold first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PowerId(pub u16);

impl PowerId {
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for PowerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Power {}", self.0)
    }
}

/// One of the two sides of an encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Offense,
    Defense,
}

impl Side {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Side::Offense => Side::Defense,
            Side::Defense => Side::Offense,
        }
    }
}

/// A player's part in the current encounter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Offense,
    Defense,
    OffensiveAlly,
    DefensiveAlly,
    Bystander,
}

impl Role {
    /// Side the role fights on, if any.
    #[must_use]
    pub const fn side(self) -> Option<Side> {
        match self {
            Role::Offense | Role::OffensiveAlly => Some(Side::Offense),
            Role::Defense | Role::DefensiveAlly => Some(Side::Defense),
            Role::Bystander => None,
        }
    }

    /// Offense or defense.
    #[must_use]
    pub const fn is_main(self) -> bool {
        matches!(self, Role::Offense | Role::Defense)
    }

    /// Main player of `side`.
    #[must_use]
    pub fn is_main_of(self, side: Side) -> bool {
        self.is_main() && self.side() == Some(side)
    }
}

/// Why ships are headed to the warp.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WarpReason {
    /// Lost an encounter.
    Combat,
    /// Deal failed.
    DealPenalty,
    /// Hazard card.
    Hazard,
}

/// Presence flags the engine checks directly instead of calling a hook.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerFlags {
    /// A negotiate played by the holder beats an attack.
    pub wins_negotiate_vs_attack: bool,
    /// The holder may always take another encounter.
    pub grants_repeat_encounters: bool,
    /// Ships beaten by the holder's side leave the game.
    pub destroys_instead_of_warp: bool,
    /// Flips the winner comparison. Composes by XOR.
    pub reverses_outcome: bool,
    /// Ties go to the defense when the holder defends.
    pub favors_defense_on_tie: bool,
    /// The power stays active with fewer home colonies.
    pub ignores_home_colony_rule: bool,
    /// The holder may ally without an invitation.
    pub self_qualifies_as_ally: bool,
}

/// Read-only view handed to every hook.
#[derive(Clone, Copy)]
pub struct PowerContext<'a> {
    pub state: &'a GameState,
    /// Player holding the power.
    pub owner: PlayerId,
    pub role: Role,
}

impl<'a> PowerContext<'a> {
    #[must_use]
    pub fn new(state: &'a GameState, owner: PlayerId) -> Self {
        Self {
            state,
            owner,
            role: state.encounter.role_of(owner),
        }
    }

    #[must_use]
    pub fn player(&self) -> &'a Player {
        &self.state.players[self.owner]
    }

    #[must_use]
    pub fn encounter(&self) -> &'a EncounterState {
        &self.state.encounter
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Ships the owner committed to the current encounter.
    #[must_use]
    pub fn own_ships(&self) -> u32 {
        self.state.committed_ships(self.owner)
    }
}

/// A power: a bundle of hooks into the encounter.
///
/// ```
/// use rust_cosmic::powers::{Power, PowerContext, Side};
///
/// #[derive(Debug)]
/// struct Doubler;
///
/// impl Power for Doubler {
///     fn name(&self) -> &'static str {
///         "Doubler"
///     }
///
///     fn modify_total(&self, ctx: &PowerContext<'_>, value: i32, side: Side) -> i32 {
///         if ctx.role.is_main_of(side) { value * 2 } else { value }
///     }
/// }
/// ```
pub trait Power: std::fmt::Debug {
    /// Unique name, used as the registry key.
    fn name(&self) -> &'static str;

    /// Optional powers are offered to the strategy before use.
    fn is_optional(&self) -> bool {
        false
    }

    fn flags(&self) -> PowerFlags {
        PowerFlags::default()
    }

    /// Whether the power applies right now. Optional powers are only
    /// offered to the strategy when this holds.
    fn should_use(&self, _ctx: &PowerContext<'_>) -> bool {
        true
    }

    fn on_game_start(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    fn on_turn_start(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    fn on_regroup(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    /// Redirect the defender chosen by destiny.
    fn on_destiny(&self, _ctx: &PowerContext<'_>, _defense: PlayerId) -> Option<PlayerId> {
        None
    }

    /// Re-aim the gate before it locks.
    fn on_launch(&self, _ctx: &PowerContext<'_>, _target: PlanetId) -> Option<PlanetId> {
        None
    }

    fn on_planning(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    fn on_reveal(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    fn modify_ship_count(&self, _ctx: &PowerContext<'_>, value: i32, _side: Side) -> i32 {
        value
    }

    fn modify_attack_value(&self, _ctx: &PowerContext<'_>, value: i32, _side: Side) -> i32 {
        value
    }

    fn modify_total(&self, _ctx: &PowerContext<'_>, value: i32, _side: Side) -> i32 {
        value
    }

    fn on_win_encounter(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    fn on_lose_encounter(&self, _ctx: &PowerContext<'_>) -> Effects {
        Effects::new()
    }

    /// How many of the owner's `count` ships actually enter the warp.
    /// The rest return to the owner's colonies.
    fn on_ships_to_warp(&self, _ctx: &PowerContext<'_>, count: u32, _reason: WarpReason) -> u32 {
        count
    }

    /// Alternate win condition.
    fn has_won(&self, _ctx: &PowerContext<'_>) -> bool {
        false
    }
}
