//! Effect resolution - applying effects to game state.
//!
//! The resolver borrows the power table because sending ships to the warp
//! runs the owner's `on_ships_to_warp` fold.

use crate::core::{GameState, PlayerId};
use crate::powers::{PowerTable, WarpReason};

use super::Effect;

/// Result of resolving an effect.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResolveResult {
    /// Effect resolved successfully.
    Success,
    /// Effect failed (e.g., deck exhausted).
    Failed(String),
    /// Effect had nothing to act on (e.g., empty warp, locked gate).
    Skipped,
}

/// Applies effects to game state.
pub struct EffectResolver<'a> {
    powers: &'a PowerTable,
}

impl<'a> EffectResolver<'a> {
    #[must_use]
    pub fn new(powers: &'a PowerTable) -> Self {
        Self { powers }
    }

    /// Resolve effects in order.
    pub fn resolve_all<'e>(
        &self,
        state: &mut GameState,
        effects: impl IntoIterator<Item = &'e Effect>,
    ) -> Vec<ResolveResult> {
        effects
            .into_iter()
            .map(|effect| self.resolve(state, effect))
            .collect()
    }

    /// Resolve a single effect.
    pub fn resolve(&self, state: &mut GameState, effect: &Effect) -> ResolveResult {
        log::debug!("resolving {:?}", effect);
        match effect {
            Effect::DrawCards { player, count } => match state.draw_cards(*player, *count) {
                Ok(()) => ResolveResult::Success,
                Err(e) => ResolveResult::Failed(e.to_string()),
            },

            Effect::DrawRewards { player, count } => match state.draw_rewards(*player, *count) {
                Ok(()) => ResolveResult::Success,
                Err(e) => ResolveResult::Failed(e.to_string()),
            },

            Effect::RetrieveShips { player, count } => {
                if state.retrieve_from_warp(*player, *count) > 0 {
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Effect::LoseShips { player, count, reason } => {
                let taken: u32 = state
                    .take_ships(*player, *count)
                    .iter()
                    .map(|(_, n)| n)
                    .sum();
                if taken == 0 {
                    return ResolveResult::Skipped;
                }
                self.send_to_warp(state, *player, taken, *reason, false);
                ResolveResult::Success
            }

            Effect::AddBonus { side, source, amount } => {
                state.encounter.bonuses[*side].add(*source, *amount);
                ResolveResult::Success
            }

            Effect::ZapPower(id) => {
                state.encounter.zapped.insert(*id);
                ResolveResult::Success
            }

            Effect::ZapPlayerPowers(player) => {
                let ids = state.players[*player].powers.clone();
                if ids.is_empty() {
                    return ResolveResult::Skipped;
                }
                state.encounter.zapped.extend(ids);
                ResolveResult::Success
            }

            Effect::CancelEncounter => {
                state.encounter.cancelled = true;
                ResolveResult::Success
            }

            Effect::ReaimGate(planet) => {
                if state.gate.aim(*planet) {
                    ResolveResult::Success
                } else {
                    ResolveResult::Skipped
                }
            }

            Effect::ConvertAttacksToNegotiate => {
                state.encounter.attacks_negotiate = true;
                ResolveResult::Success
            }
        }
    }

    /// Put `count` ships that already left the board into the warp.
    ///
    /// With `destroy` they leave the game instead. Otherwise the owner's
    /// powers decide how many enter the warp; the rest go back to the
    /// owner's colonies.
    pub fn send_to_warp(
        &self,
        state: &mut GameState,
        player: PlayerId,
        count: u32,
        reason: WarpReason,
        destroy: bool,
    ) {
        if count == 0 {
            return;
        }
        if destroy {
            log::debug!("{player} loses {count} ships permanently");
            state.players[player].ships_removed += count;
            return;
        }
        let warped = self.powers.ships_to_warp(state, player, count, reason);
        state.players[player].ships_in_warp += warped;
        state.place_ships(player, count - warped);
        log::debug!("{player}: {warped} of {count} ships to the warp ({reason:?})");
    }
}
