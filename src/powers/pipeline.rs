//! Powers in play and the modifier pipeline.
//!
//! Modifier hooks fold: every active power of every participant is applied
//! in ascending `PowerId` order and each result feeds the next call. Two
//! doublers give 4x, not 2x + 2x.
//!
//! Outcome reversal is the exception. Each active reversing power toggles
//! the comparison, so the net effect is the XOR of all of them.

use smallvec::SmallVec;

use crate::core::{GameState, PlanetId, PlayerId};
use crate::effects::Effects;

use super::power::{Power, PowerContext, PowerFlags, PowerId, Side, WarpReason};

/// A power instance held by a player.
#[derive(Debug)]
pub struct PowerInstance {
    pub id: PowerId,
    pub owner: PlayerId,
    pub power: Box<dyn Power>,
}

/// The three value hooks of the pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Modifier {
    ShipCount,
    AttackValue,
    Total,
}

/// Every power instance in the game, sorted by id.
#[derive(Debug, Default)]
pub struct PowerTable {
    instances: Vec<PowerInstance>,
}

impl PowerTable {
    #[must_use]
    pub fn new(mut instances: Vec<PowerInstance>) -> Self {
        instances.sort_by_key(|instance| instance.id);
        Self { instances }
    }

    pub fn iter(&self) -> impl Iterator<Item = &PowerInstance> {
        self.instances.iter()
    }

    #[must_use]
    pub fn get(&self, id: PowerId) -> Option<&PowerInstance> {
        self.instances.iter().find(|instance| instance.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Whether `id` takes part in the current encounter.
    ///
    /// Inactive when the holder's `power_active` is off, when zapped, or when
    /// an optional power was declined this encounter.
    #[must_use]
    pub fn is_active(&self, state: &GameState, id: PowerId) -> bool {
        let Some(instance) = self.get(id) else {
            return false;
        };
        state.players[instance.owner].power_active
            && !state.encounter.zapped.contains(&id)
            && !state.encounter.declined.contains(&id)
    }

    /// Active powers, all players, in id order.
    pub fn active<'a>(&'a self, state: &'a GameState) -> impl Iterator<Item = &'a PowerInstance> + 'a {
        self.instances
            .iter()
            .filter(move |instance| self.is_active(state, instance.id))
    }

    /// Active powers held by any of `players`, in id order.
    pub fn active_among<'a>(
        &'a self,
        state: &'a GameState,
        players: &'a [PlayerId],
    ) -> impl Iterator<Item = &'a PowerInstance> + 'a {
        self.active(state)
            .filter(move |instance| players.contains(&instance.owner))
    }

    /// Active powers held by `player`, in id order.
    pub fn active_for<'a>(
        &'a self,
        state: &'a GameState,
        player: PlayerId,
    ) -> impl Iterator<Item = &'a PowerInstance> + 'a {
        self.active(state)
            .filter(move |instance| instance.owner == player)
    }

    /// Fold `value` through one modifier hook of every active participant.
    #[must_use]
    pub fn fold(&self, state: &GameState, modifier: Modifier, side: Side, value: i32) -> i32 {
        let participants = state.encounter.participants();
        self.active_among(state, &participants)
            .fold(value, |acc, instance| {
                let ctx = PowerContext::new(state, instance.owner);
                let next = match modifier {
                    Modifier::ShipCount => instance.power.modify_ship_count(&ctx, acc, side),
                    Modifier::AttackValue => instance.power.modify_attack_value(&ctx, acc, side),
                    Modifier::Total => instance.power.modify_total(&ctx, acc, side),
                };
                if next != acc {
                    log::trace!(
                        "{} ({}) {:?} {:?}: {} -> {}",
                        instance.power.name(),
                        instance.owner,
                        modifier,
                        side,
                        acc,
                        next
                    );
                }
                next
            })
    }

    /// Whether the winner comparison is flipped: an odd number of active
    /// reversing powers among the participants.
    #[must_use]
    pub fn outcome_reversed(&self, state: &GameState) -> bool {
        let participants = state.encounter.participants();
        self.active_among(state, &participants)
            .filter(|instance| instance.power.flags().reverses_outcome)
            .fold(false, |reversed, _| !reversed)
    }

    /// Whether any active power of `players` has a flag set.
    #[must_use]
    pub fn any_flag(
        &self,
        state: &GameState,
        players: &[PlayerId],
        flag: impl Fn(&PowerFlags) -> bool,
    ) -> bool {
        self.active_among(state, players)
            .any(|instance| flag(&instance.power.flags()))
    }

    /// Ships of `player` that enter the warp out of `count`.
    #[must_use]
    pub fn ships_to_warp(
        &self,
        state: &GameState,
        player: PlayerId,
        count: u32,
        reason: WarpReason,
    ) -> u32 {
        self.active_for(state, player).fold(count, |acc, instance| {
            let ctx = PowerContext::new(state, player);
            instance.power.on_ships_to_warp(&ctx, acc, reason).min(acc)
        })
    }

    /// Apply destiny redirects in id order. Redirects onto the offense are
    /// ignored.
    #[must_use]
    pub fn redirect_destiny(&self, state: &GameState, defense: PlayerId) -> PlayerId {
        let offense = state.encounter.offense;
        self.active(state).fold(defense, |current, instance| {
            let ctx = PowerContext::new(state, instance.owner);
            match instance.power.on_destiny(&ctx, current) {
                Some(target) if target != offense && target.index() < state.player_count() => {
                    log::debug!("{} redirects destiny to {}", instance.power.name(), target);
                    target
                }
                _ => current,
            }
        })
    }

    /// Apply launch re-aims in id order, restricted to `candidates`.
    #[must_use]
    pub fn reaim_gate(&self, state: &GameState, target: PlanetId, candidates: &[PlanetId]) -> PlanetId {
        self.active(state).fold(target, |current, instance| {
            let ctx = PowerContext::new(state, instance.owner);
            match instance.power.on_launch(&ctx, current) {
                Some(planet) if candidates.contains(&planet) => planet,
                _ => current,
            }
        })
    }

    /// Collect event-hook effects from every active power, in id order.
    #[must_use]
    pub fn collect(
        &self,
        state: &GameState,
        hook: impl Fn(&dyn Power, &PowerContext<'_>) -> Effects,
    ) -> Effects {
        let mut effects = Effects::new();
        for instance in self.active(state) {
            let ctx = PowerContext::new(state, instance.owner);
            effects.extend(hook(instance.power.as_ref(), &ctx));
        }
        effects
    }

    /// Powers with an alternate win condition met, by owner.
    #[must_use]
    pub fn alternate_winners(&self, state: &GameState) -> SmallVec<[PlayerId; 2]> {
        let mut winners = SmallVec::new();
        for instance in &self.instances {
            if !state.players[instance.owner].power_active {
                continue;
            }
            let ctx = PowerContext::new(state, instance.owner);
            if instance.power.has_won(&ctx) && !winners.contains(&instance.owner) {
                winners.push(instance.owner);
            }
        }
        winners
    }

    /// Whether `player` holds a power that ignores the home colony rule.
    #[must_use]
    pub fn ignores_home_colony_rule(&self, player: PlayerId) -> bool {
        self.instances
            .iter()
            .any(|instance| instance.owner == player && instance.power.flags().ignores_home_colony_rule)
    }
}
