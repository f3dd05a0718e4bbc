//! Player entity: hand, warp, powers and optional expansion state.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::cards::{Card, TechCard};
use crate::core::{PlanetId, PlayerId};
use crate::powers::PowerId;

/// Research progress for the tech expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechState {
    /// Tech currently being researched.
    pub researching: Option<TechCard>,
    /// Points put into `researching` so far.
    pub progress: u32,
    /// Finished techs; their bonuses stay for the rest of the game.
    pub completed: Vec<TechCard>,
}

impl TechState {
    /// Add research points. Returns the tech if it completed.
    pub fn advance(&mut self, points: u32) -> Option<TechCard> {
        let cost = self.researching.as_ref()?.cost;
        self.progress += points;
        if self.progress < cost {
            return None;
        }
        self.progress = 0;
        let done = self.researching.take()?;
        self.completed.push(done.clone());
        Some(done)
    }

    /// Sum of completed tech bonuses.
    #[must_use]
    pub fn combat_bonus(&self) -> i32 {
        self.completed.iter().map(|t| t.combat_bonus).sum()
    }
}

/// A station on one of the player's home planets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StationState {
    pub planet: PlanetId,
    /// Added to the owner's side when defending `planet`.
    pub defense_bonus: i32,
}

/// A seat at the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    /// Display name. Never used as a key.
    pub name: String,
    pub hand: Vec<Card>,
    pub ships_in_warp: u32,
    /// Ships destroyed for good by destroy-instead-of-warp effects.
    pub ships_removed: u32,
    /// Power slots in registration order: primary, then the dual-power slot.
    pub powers: SmallVec<[PowerId; 2]>,
    /// Recomputed at every encounter end from the home colony count.
    pub power_active: bool,
    pub tech: Option<TechState>,
    pub station: Option<StationState>,
}

impl Player {
    #[must_use]
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            hand: Vec::new(),
            ships_in_warp: 0,
            ships_removed: 0,
            powers: SmallVec::new(),
            power_active: true,
            tech: None,
            station: None,
        }
    }

    /// Whether the hand holds an attack, negotiate or morph.
    #[must_use]
    pub fn has_encounter_card(&self) -> bool {
        self.hand.iter().any(Card::is_encounter_card)
    }

    /// Hand indices of encounter cards.
    #[must_use]
    pub fn encounter_card_indices(&self) -> Vec<usize> {
        self.indices_where(Card::is_encounter_card)
    }

    /// Hand indices of cards matching `predicate`.
    pub fn indices_where(&self, predicate: impl Fn(&Card) -> bool) -> Vec<usize> {
        self.hand
            .iter()
            .enumerate()
            .filter(|(_, card)| predicate(card))
            .map(|(i, _)| i)
            .collect()
    }

    /// Remove the card at `index`, if it exists.
    pub fn take_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    /// Whether the player carries `power`.
    #[must_use]
    pub fn has_power(&self, power: PowerId) -> bool {
        self.powers.contains(&power)
    }
}
