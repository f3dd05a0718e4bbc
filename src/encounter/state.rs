//! Per-encounter state.
//!
//! Everything here is reset when an encounter starts and has no meaning
//! after it ends.

use std::ops::{Index, IndexMut};

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::phase::Phase;
use crate::cards::{Card, HazardCard};
use crate::core::PlayerId;
use crate::effects::BonusSource;
use crate::powers::{PowerId, Role, Side};

/// One value for each side of an encounter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SideMap<T> {
    pub offense: T,
    pub defense: T,
}

impl<T> SideMap<T> {
    #[must_use]
    pub fn new(offense: T, defense: T) -> Self {
        Self { offense, defense }
    }

    /// Build both values from a factory.
    pub fn from_fn(mut factory: impl FnMut(Side) -> T) -> Self {
        Self {
            offense: factory(Side::Offense),
            defense: factory(Side::Defense),
        }
    }

    /// Iterate `(Side, &T)`, offense first.
    pub fn iter(&self) -> impl Iterator<Item = (Side, &T)> {
        [(Side::Offense, &self.offense), (Side::Defense, &self.defense)].into_iter()
    }
}

impl<T> Index<Side> for SideMap<T> {
    type Output = T;

    fn index(&self, side: Side) -> &T {
        match side {
            Side::Offense => &self.offense,
            Side::Defense => &self.defense,
        }
    }
}

impl<T> IndexMut<Side> for SideMap<T> {
    fn index_mut(&mut self, side: Side) -> &mut T {
        match side {
            Side::Offense => &mut self.offense,
            Side::Defense => &mut self.defense,
        }
    }
}

/// How an encounter ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    OffenseWon,
    DefenseWon,
    DealMade,
    DealFailed,
    Tie,
    /// Resolution was skipped (force field).
    Cancelled,
}

impl Outcome {
    /// Winning side, if there is one.
    #[must_use]
    pub const fn winner(self) -> Option<Side> {
        match self {
            Outcome::OffenseWon => Some(Side::Offense),
            Outcome::DefenseWon => Some(Side::Defense),
            _ => None,
        }
    }

    #[must_use]
    pub const fn win_for(side: Side) -> Self {
        match side {
            Side::Offense => Outcome::OffenseWon,
            Side::Defense => Outcome::DefenseWon,
        }
    }
}

/// Pending bonuses for one side, applied in source order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bonuses {
    pub flare: i32,
    pub tech: i32,
    pub station: i32,
}

impl Bonuses {
    pub fn add(&mut self, source: BonusSource, amount: i32) {
        match source {
            BonusSource::Flare => self.flare += amount,
            BonusSource::Tech => self.tech += amount,
            BonusSource::Station => self.station += amount,
        }
    }

    /// Flare, then tech, then station.
    #[must_use]
    pub fn in_order(&self) -> [(BonusSource, i32); 3] {
        [
            (BonusSource::Flare, self.flare),
            (BonusSource::Tech, self.tech),
            (BonusSource::Station, self.station),
        ]
    }
}

/// State of the encounter in flight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterState {
    /// 1 for the first encounter of a turn.
    pub number: u32,
    pub offense: PlayerId,
    pub defense: Option<PlayerId>,
    pub allies: SideMap<Vec<PlayerId>>,
    /// Encounter cards as played (before morph/emotion control).
    pub cards: SideMap<Option<Card>>,
    /// Kicker multipliers.
    pub kickers: SideMap<Option<u32>>,
    pub reinforcements: SideMap<i32>,
    pub bonuses: SideMap<Bonuses>,
    /// Powers disabled for this encounter.
    pub zapped: FxHashSet<PowerId>,
    /// Optional powers their holder chose not to use this encounter.
    pub declined: FxHashSet<PowerId>,
    /// Hazard drawn at destiny, waiting for its phase.
    pub hazard: Option<HazardCard>,
    /// Emotion control: attacks count as negotiates.
    pub attacks_negotiate: bool,
    pub cancelled: bool,
    pub deal_made: bool,
    /// Cards to discard at the end of the encounter.
    pub played: Vec<Card>,
    pub totals: Option<SideMap<i32>>,
    pub outcome: Option<Outcome>,
    /// Phases entered, in order.
    pub phases: Vec<Phase>,
}

impl EncounterState {
    #[must_use]
    pub fn new(offense: PlayerId, number: u32) -> Self {
        Self {
            number,
            offense,
            defense: None,
            allies: SideMap::default(),
            cards: SideMap::default(),
            kickers: SideMap::default(),
            reinforcements: SideMap::default(),
            bonuses: SideMap::default(),
            zapped: FxHashSet::default(),
            declined: FxHashSet::default(),
            hazard: None,
            attacks_negotiate: false,
            cancelled: false,
            deal_made: false,
            played: Vec::new(),
            totals: None,
            outcome: None,
            phases: Vec::new(),
        }
    }

    /// Main player of `side`.
    #[must_use]
    pub fn main_player(&self, side: Side) -> Option<PlayerId> {
        match side {
            Side::Offense => Some(self.offense),
            Side::Defense => self.defense,
        }
    }

    /// Main player then allies of `side`.
    #[must_use]
    pub fn side_players(&self, side: Side) -> Vec<PlayerId> {
        self.main_player(side)
            .into_iter()
            .chain(self.allies[side].iter().copied())
            .collect()
    }

    /// Main players and every ally.
    #[must_use]
    pub fn participants(&self) -> Vec<PlayerId> {
        let mut players = self.side_players(Side::Offense);
        players.extend(self.side_players(Side::Defense));
        players
    }

    #[must_use]
    pub fn role_of(&self, player: PlayerId) -> Role {
        if player == self.offense {
            Role::Offense
        } else if Some(player) == self.defense {
            Role::Defense
        } else if self.allies.offense.contains(&player) {
            Role::OffensiveAlly
        } else if self.allies.defense.contains(&player) {
            Role::DefensiveAlly
        } else {
            Role::Bystander
        }
    }

    /// Side `player` fights on.
    #[must_use]
    pub fn side_of(&self, player: PlayerId) -> Option<Side> {
        self.role_of(player).side()
    }

    /// The other main player, for a main player.
    #[must_use]
    pub fn opponent_of(&self, player: PlayerId) -> Option<PlayerId> {
        match self.role_of(player) {
            Role::Offense => self.defense,
            Role::Defense => Some(self.offense),
            _ => None,
        }
    }
}
