//! Resolution phase: card comparison, totals and the consequences of the
//! result.

use crate::cards::Card;
use crate::core::{PlayerId, Result};
use crate::effects::{standing_bonuses, Effect, EffectResolver, Effects};
use crate::game::Game;
use crate::powers::{Modifier, Side, WarpReason};
use crate::strategy::AllyReward;

use super::state::{Outcome, SideMap};

/// An encounter card after morph and emotion control are applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Revealed {
    Attack(u32),
    Negotiate,
}

/// Resolve morphs against each other, then emotion control.
///
/// A morph copies the opposing card; two morphs are both attack 0.
pub(crate) fn reveal_cards(cards: SideMap<Card>, attacks_negotiate: bool) -> SideMap<Revealed> {
    let plain = |card: &Card| match card {
        Card::Negotiate => Revealed::Negotiate,
        other => Revealed::Attack(other.attack_value().unwrap_or(0)),
    };
    let revealed = match (&cards.offense, &cards.defense) {
        (Card::Morph, Card::Morph) => SideMap::new(Revealed::Attack(0), Revealed::Attack(0)),
        (Card::Morph, other) | (other, Card::Morph) => SideMap::new(plain(other), plain(other)),
        (offense, defense) => SideMap::new(plain(offense), plain(defense)),
    };
    if attacks_negotiate {
        SideMap::from_fn(|_| Revealed::Negotiate)
    } else {
        revealed
    }
}

impl Game {
    pub(crate) fn resolution(&mut self) -> Result<()> {
        if self.state.encounter.cancelled {
            self.return_all_staged();
            self.state.encounter.outcome = Some(Outcome::Cancelled);
            log::info!("encounter {} cancelled", self.state.encounter.number);
            return Ok(());
        }

        let encounter = &self.state.encounter;
        let (Some(offense_card), Some(defense_card)) =
            (encounter.cards.offense.clone(), encounter.cards.defense.clone())
        else {
            debug_assert!(false, "resolution without both encounter cards");
            self.return_all_staged();
            self.state.encounter.outcome = Some(Outcome::Cancelled);
            return Ok(());
        };
        let revealed = reveal_cards(
            SideMap::new(offense_card, defense_card),
            self.state.encounter.attacks_negotiate,
        );

        match (revealed.offense, revealed.defense) {
            (Revealed::Negotiate, Revealed::Negotiate) => self.negotiate_deal(),
            (Revealed::Negotiate, Revealed::Attack(_)) => self.negotiate_against_attack(Side::Offense),
            (Revealed::Attack(_), Revealed::Negotiate) => self.negotiate_against_attack(Side::Defense),
            (Revealed::Attack(offense), Revealed::Attack(defense)) => {
                self.compare_attacks(SideMap::new(offense, defense))
            }
        }
    }

    /// One side negotiated against an attack. The attack wins and the
    /// negotiator takes compensation, unless a power lets the negotiator win.
    fn negotiate_against_attack(&mut self, negotiator: Side) -> Result<()> {
        let encounter = &self.state.encounter;
        let (Some(loser), Some(winner)) = (
            encounter.main_player(negotiator),
            encounter.main_player(negotiator.opposite()),
        ) else {
            return Ok(());
        };

        if self
            .powers
            .any_flag(&self.state, &[loser], |flags| flags.wins_negotiate_vs_attack)
        {
            log::debug!("{loser} wins with a negotiate");
            return self.settle(negotiator);
        }

        let compensation = self.state.committed_ships(loser).max(1);
        self.settle(negotiator.opposite())?;
        self.compensate(winner, loser, compensation)
    }

    /// Move `count` random cards from `from` to `to`, topping up from the
    /// deck when the hand runs short.
    fn compensate(&mut self, from: PlayerId, to: PlayerId, count: u32) -> Result<()> {
        let moved = self.state.transfer_random_cards(from, to, count);
        if moved < count {
            self.state.draw_cards(to, count - moved)?;
        }
        log::debug!("{to} takes {count} cards of compensation");
        Ok(())
    }

    fn compare_attacks(&mut self, values: SideMap<u32>) -> Result<()> {
        let mut totals = SideMap::from_fn(|side| self.side_total(side, values[side]));
        self.play_reinforcements(&mut totals);

        let bonuses = standing_bonuses(&self.state);
        self.resolve_effects(&bonuses);
        for side in [Side::Offense, Side::Defense] {
            for (_, amount) in self.state.encounter.bonuses[side].in_order() {
                totals[side] += amount;
            }
        }
        self.state.encounter.totals = Some(totals);
        log::debug!("totals: offense {} defense {}", totals.offense, totals.defense);

        let mut winner = match totals.offense.cmp(&totals.defense) {
            std::cmp::Ordering::Greater => Some(Side::Offense),
            std::cmp::Ordering::Less => Some(Side::Defense),
            std::cmp::Ordering::Equal => None,
        };
        if self.powers.outcome_reversed(&self.state) {
            winner = winner.map(Side::opposite);
        }
        if winner.is_none() {
            let defense: Vec<PlayerId> = self.state.encounter.defense.into_iter().collect();
            let favored = self
                .powers
                .any_flag(&self.state, &defense, |flags| flags.favors_defense_on_tie);
            winner = favored.then_some(Side::Defense);
        }

        match winner {
            Some(side) => self.settle(side),
            None => {
                self.return_all_staged();
                self.state.encounter.outcome = Some(Outcome::Tie);
                Ok(())
            }
        }
    }

    /// Card, kicker, attack value modifiers, ships, then total modifiers.
    fn side_total(&self, side: Side, card: u32) -> i32 {
        let encounter = &self.state.encounter;
        let mut value = card as i32;
        if let Some(multiplier) = encounter.kickers[side] {
            value *= multiplier as i32;
        }
        let value = self
            .powers
            .fold(&self.state, Modifier::AttackValue, side, value);
        let ships = self.powers.fold(
            &self.state,
            Modifier::ShipCount,
            side,
            self.state.side_ships(side) as i32,
        );
        self.powers
            .fold(&self.state, Modifier::Total, side, value + ships)
    }

    /// Each participant may add reinforcements, offense side first, main
    /// player before allies. Every choice sees the running totals.
    fn play_reinforcements(&mut self, totals: &mut SideMap<i32>) {
        for side in [Side::Offense, Side::Defense] {
            for player in self.state.encounter.side_players(side) {
                loop {
                    let (own, opposing) = (totals[side], totals[side.opposite()]);
                    let choice = self.ask(player, |strategy, view| {
                        strategy.select_reinforcement(view, side, own, opposing)
                    });
                    let Some(index) = choice else {
                        break;
                    };
                    let Some(Card::Reinforcement(amount)) = self.state.players[player].hand.get(index).cloned()
                    else {
                        break;
                    };
                    self.state.players[player].hand.remove(index);
                    totals[side] += amount as i32;
                    self.state.encounter.reinforcements[side] += amount as i32;
                    self.state.encounter.played.push(Card::Reinforcement(amount));
                    log::debug!("{player} reinforces the {side:?} by {amount}");
                }
            }
        }
    }

    /// Carry out a win for `winner`.
    fn settle(&mut self, winner: Side) -> Result<()> {
        let offense_side = self.state.encounter.side_players(Side::Offense);
        let defense_side = self.state.encounter.side_players(Side::Defense);
        let winners = match winner {
            Side::Offense => &offense_side,
            Side::Defense => &defense_side,
        };
        let destroy = self
            .powers
            .any_flag(&self.state, winners, |flags| flags.destroys_instead_of_warp);
        let target = self.state.gate.target();

        match (winner, target) {
            (Side::Offense, Some(target)) => {
                let mut losses = Vec::new();
                if let Some(defense) = self.state.encounter.defense {
                    losses.push((defense, self.state.planet_mut(target).clear(defense)));
                    if self.state.players[defense]
                        .station
                        .is_some_and(|station| station.planet == target)
                    {
                        log::info!("{defense} loses its station");
                        self.state.players[defense].station = None;
                    }
                }
                for &ally in defense_side.iter().skip(1) {
                    losses.push((ally, self.state.take_staged(ally)));
                }
                for (player, count) in losses {
                    self.warp(player, count, destroy);
                }
                for &player in &offense_side {
                    self.state.land_staged(player, target);
                }
            }
            (Side::Defense, _) => {
                for &player in &offense_side {
                    let count = self.state.take_staged(player);
                    self.warp(player, count, destroy);
                }
                for &ally in defense_side.iter().skip(1) {
                    self.reward_ally(ally);
                }
            }
            (Side::Offense, None) => {
                debug_assert!(false, "offense won with no target");
                self.return_all_staged();
            }
        }

        let hooks: Effects = self.powers.collect(&self.state, |power, ctx| match ctx.role.side() {
            Some(side) if side == winner => power.on_win_encounter(ctx),
            Some(_) => power.on_lose_encounter(ctx),
            None => Effects::new(),
        });
        self.resolve_effects(&hooks);

        self.state.encounter.outcome = Some(Outcome::win_for(winner));
        log::info!(
            "encounter {}: {:?} wins",
            self.state.encounter.number,
            winner
        );
        Ok(())
    }

    fn warp(&mut self, player: PlayerId, count: u32, destroy: bool) {
        EffectResolver::new(&self.powers).send_to_warp(
            &mut self.state,
            player,
            count,
            WarpReason::Combat,
            destroy,
        );
    }

    /// A winning defensive ally takes its ships home and one card or one
    /// ship from the warp per ship it sent.
    fn reward_ally(&mut self, ally: PlayerId) {
        let amount = self.state.gate.staged(ally);
        let reward = self.ask(ally, |strategy, view| strategy.choose_ally_reward(view, amount));
        self.state.return_staged(ally);
        let effect = match reward {
            AllyReward::Cards => Effect::DrawRewards { player: ally, count: amount },
            AllyReward::Ships => Effect::RetrieveShips { player: ally, count: amount },
        };
        log::debug!("{ally} takes {amount} {reward:?} as a defensive reward");
        self.resolve_effects(&[effect]);
    }

    pub(crate) fn return_all_staged(&mut self) {
        for player in self.state.gate.staged_players() {
            self.state.return_staged(player);
        }
    }
}
