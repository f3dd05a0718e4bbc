//! Hyperspace gate: encounter target plus ships staged for it.
//!
//! The gate remembers which planet every staged ship came from, so ships
//! that do not land can be returned exactly where they were.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{PlanetId, PlayerId};

/// Planets a player's staged ships came from, with counts.
pub type Origins = SmallVec<[(PlanetId, u32); 4]>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperspaceGate {
    target: Option<PlanetId>,
    locked: bool,
    staged: FxHashMap<PlayerId, Origins>,
}

impl HyperspaceGate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reset aim, lock and staging for a new launch.
    ///
    /// Staged ships must have been landed or returned first.
    pub fn clear(&mut self) {
        debug_assert_eq!(self.total_staged(), 0, "gate cleared with ships still staged");
        self.target = None;
        self.locked = false;
        self.staged.clear();
    }

    #[must_use]
    pub fn target(&self) -> Option<PlanetId> {
        self.target
    }

    /// Aim the gate. Returns false if the gate is locked.
    pub fn aim(&mut self, planet: PlanetId) -> bool {
        if self.locked {
            return false;
        }
        self.target = Some(planet);
        true
    }

    pub fn lock(&mut self) {
        self.locked = true;
    }

    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Record `count` ships from `origin` for `player`.
    pub fn stage(&mut self, player: PlayerId, origin: PlanetId, count: u32) {
        if count == 0 {
            return;
        }
        let origins = self.staged.entry(player).or_default();
        match origins.iter_mut().find(|(planet, _)| *planet == origin) {
            Some((_, n)) => *n += count,
            None => origins.push((origin, count)),
        }
    }

    /// Ships `player` has staged.
    #[must_use]
    pub fn staged(&self, player: PlayerId) -> u32 {
        self.staged
            .get(&player)
            .map_or(0, |origins| origins.iter().map(|(_, n)| n).sum())
    }

    /// Remove and return `player`'s staged ships with their origins.
    pub fn take(&mut self, player: PlayerId) -> Origins {
        self.staged.remove(&player).unwrap_or_default()
    }

    /// Players with ships staged, in seat order.
    #[must_use]
    pub fn staged_players(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self
            .staged
            .iter()
            .filter(|(_, origins)| !origins.is_empty())
            .map(|(p, _)| *p)
            .collect();
        players.sort_unstable();
        players
    }

    #[must_use]
    pub fn total_staged(&self) -> u32 {
        self.staged
            .values()
            .flat_map(|origins| origins.iter().map(|(_, n)| *n))
            .sum()
    }
}
