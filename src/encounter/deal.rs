//! Deals between two negotiating main players.

use serde::{Deserialize, Serialize};

use crate::core::{PlanetId, PlayerId, Result};
use crate::effects::Effect;
use crate::game::Game;
use crate::powers::{Side, WarpReason};

use super::state::Outcome;

/// Terms a main player offers when both sides negotiate.
///
/// An empty deal counts as no offer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deal {
    /// The offense lands its launched ships on the target planet.
    pub offense_colony: bool,
    /// The defense places ships on one of the offense's home planets.
    pub defense_colony: bool,
    /// Random cards the defense hands to the offense.
    pub cards_to_offense: u32,
    /// Random cards the offense hands to the defense.
    pub cards_to_defense: u32,
}

impl Deal {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.offense_colony
            && !self.defense_colony
            && self.cards_to_offense == 0
            && self.cards_to_defense == 0
    }
}

impl Game {
    /// Both main players played negotiate.
    ///
    /// The deal succeeds when both offer non-empty terms; the offense's terms
    /// are carried out. Otherwise both main players pay the deal penalty.
    pub(crate) fn negotiate_deal(&mut self) -> Result<()> {
        let offense = self.state.encounter.offense;
        let Some(defense) = self.state.encounter.defense else {
            return Ok(());
        };

        let offered = self
            .ask(offense, |strategy, view| strategy.propose_deal(view))
            .filter(|deal| !deal.is_empty());
        let countered = self
            .ask(defense, |strategy, view| strategy.propose_deal(view))
            .filter(|deal| !deal.is_empty());

        match (offered, countered) {
            (Some(deal), Some(_)) => {
                self.apply_deal(offense, defense, deal);
                self.state.encounter.deal_made = true;
                self.state.encounter.outcome = Some(Outcome::DealMade);
                log::info!("{offense} and {defense} strike a deal: {deal:?}");
            }
            _ => {
                self.fail_deal(offense, defense);
                self.state.encounter.outcome = Some(Outcome::DealFailed);
                log::info!("deal between {offense} and {defense} failed");
            }
        }
        Ok(())
    }

    fn apply_deal(&mut self, offense: PlayerId, defense: PlayerId, deal: Deal) {
        // Allies take no part in a deal.
        for side in [Side::Offense, Side::Defense] {
            for ally in self.state.encounter.allies[side].clone() {
                self.state.return_staged(ally);
            }
        }

        let launched = self.state.gate.staged(offense);
        match (deal.offense_colony, self.state.gate.target()) {
            (true, Some(target)) => {
                self.state.land_staged(offense, target);
            }
            _ => {
                self.state.return_staged(offense);
            }
        }

        if deal.defense_colony {
            if let Some(planet) = self.defense_colony_site(offense, defense) {
                let moved: u32 = self
                    .state
                    .take_ships(defense, launched.max(1))
                    .iter()
                    .map(|(_, n)| n)
                    .sum();
                self.state.planet_mut(planet).add_ships(defense, moved);
            }
        }

        self.state
            .transfer_random_cards(defense, offense, deal.cards_to_offense);
        self.state
            .transfer_random_cards(offense, defense, deal.cards_to_defense);
    }

    /// First offense home planet without a defense colony, else the first.
    fn defense_colony_site(&self, offense: PlayerId, defense: PlayerId) -> Option<PlanetId> {
        let mut homes = self.state.home_planets(offense);
        let first = homes.next();
        self.state
            .home_planets(offense)
            .find(|planet| !self.state.planet(*planet).has_colony(defense))
            .or(first)
    }

    fn fail_deal(&mut self, offense: PlayerId, defense: PlayerId) {
        for player in self.state.gate.staged_players() {
            self.state.return_staged(player);
        }
        let count = self.state.config.deal_penalty_ships;
        let penalties = [offense, defense].map(|player| Effect::LoseShips {
            player,
            count,
            reason: WarpReason::DealPenalty,
        });
        self.resolve_effects(&penalties);
    }
}
