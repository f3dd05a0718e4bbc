//! A simple rule-of-thumb strategy for simulations and benchmarks.

use crate::cards::Card;
use crate::core::{GameRng, PlanetId, PlayerId};
use crate::encounter::{Deal, Phase};
use crate::powers::{Role, Side};

use super::decision::{AllianceChoice, AllyReward, Strategy};
use super::view::GameView;

/// Plays its strongest card, commits everything it can, and breaks ties
/// with its own seeded stream.
#[derive(Clone, Debug)]
pub struct BasicStrategy {
    rng: GameRng,
    /// Probability of playing an offered artifact or flare.
    special_card_rate: f64,
}

impl Default for BasicStrategy {
    fn default() -> Self {
        Self {
            rng: GameRng::new(0),
            special_card_rate: 0.5,
        }
    }
}

impl BasicStrategy {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_special_card_rate(mut self, rate: f64) -> Self {
        self.special_card_rate = rate.clamp(0.0, 1.0);
        self
    }
}

impl Strategy for BasicStrategy {
    fn seed(&mut self, rng: GameRng) {
        self.rng = rng;
    }

    fn select_encounter_card(&mut self, view: &GameView<'_>) -> usize {
        let hand = view.hand();
        let best_attack = hand
            .iter()
            .enumerate()
            .filter_map(|(i, card)| card.attack_value().map(|v| (i, v)))
            .max_by_key(|(_, v)| *v);
        let fallback = || view.player().encounter_card_indices().first().copied().unwrap_or(0);

        match best_attack {
            // Weak attacks are sometimes swapped for a negotiate.
            Some((i, v)) if v >= 8 => i,
            Some((i, _)) => {
                let negotiate = hand.iter().position(|c| *c == Card::Negotiate);
                match negotiate {
                    Some(n) if self.rng.gen_bool(0.4) => n,
                    _ => i,
                }
            }
            None => fallback(),
        }
    }

    fn select_kicker(&mut self, view: &GameView<'_>) -> Option<usize> {
        view.hand().iter().position(|c| matches!(c, Card::Kicker(_)))
    }

    fn select_ship_count(&mut self, _view: &GameView<'_>, max: u32) -> u32 {
        max
    }

    fn select_attack_target(&mut self, _view: &GameView<'_>, candidates: &[PlanetId]) -> Option<PlanetId> {
        self.rng.choose(candidates).copied()
    }

    fn alliance_invitations(
        &mut self,
        _view: &GameView<'_>,
        _side: Side,
        candidates: &[PlayerId],
    ) -> Vec<PlayerId> {
        candidates.to_vec()
    }

    fn alliance_response(&mut self, _view: &GameView<'_>, offered: &[Side]) -> AllianceChoice {
        if offered.is_empty() || !self.rng.gen_bool(0.5) {
            return AllianceChoice::Decline;
        }
        self.rng
            .choose(offered)
            .map_or(AllianceChoice::Decline, |side| AllianceChoice::Join(*side))
    }

    fn select_ally_ship_count(&mut self, _view: &GameView<'_>, _side: Side, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        1 + self.rng.gen_range_usize(0..max as usize) as u32
    }

    fn select_reinforcement(
        &mut self,
        view: &GameView<'_>,
        side: Side,
        own_total: i32,
        opposing_total: i32,
    ) -> Option<usize> {
        let helping_other_side = match view.side() {
            Some(mine) => mine != side,
            None => return None,
        };
        if helping_other_side || own_total > opposing_total {
            return None;
        }
        // Smallest reinforcement that wins outright.
        view.hand()
            .iter()
            .enumerate()
            .filter_map(|(i, card)| match card {
                Card::Reinforcement(v) if own_total + *v as i32 > opposing_total => Some((i, *v)),
                _ => None,
            })
            .min_by_key(|(_, v)| *v)
            .map(|(i, _)| i)
    }

    fn propose_deal(&mut self, view: &GameView<'_>) -> Option<Deal> {
        if self.rng.gen_bool(0.25) {
            return None;
        }
        let deal = match view.role() {
            Role::Offense => Deal {
                offense_colony: true,
                cards_to_defense: 1,
                ..Deal::default()
            },
            _ => Deal {
                defense_colony: true,
                cards_to_offense: 1,
                ..Deal::default()
            },
        };
        Some(deal)
    }

    fn want_second_encounter(&mut self, view: &GameView<'_>) -> bool {
        view.encounter().number < 2
    }

    fn choose_ally_reward(&mut self, view: &GameView<'_>, amount: u32) -> AllyReward {
        if view.player().ships_in_warp >= amount {
            AllyReward::Ships
        } else {
            AllyReward::Cards
        }
    }

    fn play_special_card(&mut self, _view: &GameView<'_>, _phase: Phase, candidates: &[usize]) -> Option<usize> {
        if candidates.is_empty() || !self.rng.gen_bool(self.special_card_rate) {
            return None;
        }
        self.rng.choose(candidates).copied()
    }
}
