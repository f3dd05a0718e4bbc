//! The `Strategy` trait: every decision point the engine asks a seat about.
//!
//! Each method has a deterministic minimal default, so scripted strategies
//! only override the decisions they care about. The engine validates every
//! answer and substitutes the first valid option for anything out of range.

use serde::{Deserialize, Serialize};

use crate::core::{GameRng, PlanetId, PlayerId};
use crate::encounter::{Deal, Phase};
use crate::powers::{PowerId, Side};

use super::view::GameView;

/// Answer to an alliance invitation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllianceChoice {
    Join(Side),
    Decline,
}

/// What a winning defensive ally takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllyReward {
    Cards,
    Ships,
}

/// Decision maker for one seat.
pub trait Strategy {
    /// Receives this seat's random stream when the game is built.
    fn seed(&mut self, _rng: GameRng) {}

    /// Hand index of the encounter card to play. Only asked when the hand
    /// holds one.
    fn select_encounter_card(&mut self, view: &GameView<'_>) -> usize {
        view.player().encounter_card_indices().first().copied().unwrap_or(0)
    }

    /// Hand index of a kicker to play with the encounter card.
    fn select_kicker(&mut self, _view: &GameView<'_>) -> Option<usize> {
        None
    }

    /// Ships to launch, at most `max`.
    fn select_ship_count(&mut self, _view: &GameView<'_>, max: u32) -> u32 {
        max.min(1)
    }

    /// Planet to attack, one of `candidates`. `None` takes the first.
    fn select_attack_target(&mut self, _view: &GameView<'_>, _candidates: &[PlanetId]) -> Option<PlanetId> {
        None
    }

    /// Players to invite onto `side`.
    fn alliance_invitations(
        &mut self,
        _view: &GameView<'_>,
        _side: Side,
        _candidates: &[PlayerId],
    ) -> Vec<PlayerId> {
        Vec::new()
    }

    /// Join one of the sides in `offered`, or decline.
    fn alliance_response(&mut self, _view: &GameView<'_>, _offered: &[Side]) -> AllianceChoice {
        AllianceChoice::Decline
    }

    /// Ships to send as an ally, at most `max`.
    fn select_ally_ship_count(&mut self, _view: &GameView<'_>, _side: Side, max: u32) -> u32 {
        max.min(1)
    }

    /// Hand index of a reinforcement to add to `side`.
    fn select_reinforcement(
        &mut self,
        _view: &GameView<'_>,
        _side: Side,
        _own_total: i32,
        _opposing_total: i32,
    ) -> Option<usize> {
        None
    }

    /// Deal offered when both main players negotiate.
    fn propose_deal(&mut self, _view: &GameView<'_>) -> Option<Deal> {
        None
    }

    /// Take another encounter this turn. Only asked when eligible.
    fn want_second_encounter(&mut self, _view: &GameView<'_>) -> bool {
        false
    }

    /// Cards or ships, `amount` of them.
    fn choose_ally_reward(&mut self, _view: &GameView<'_>, _amount: u32) -> AllyReward {
        AllyReward::Cards
    }

    /// Hand index of an artifact or flare to play now, from `candidates`.
    fn play_special_card(&mut self, _view: &GameView<'_>, _phase: Phase, _candidates: &[usize]) -> Option<usize> {
        None
    }

    /// Use an optional power this encounter.
    fn use_power(&mut self, _view: &GameView<'_>, _power: PowerId) -> bool {
        true
    }
}
