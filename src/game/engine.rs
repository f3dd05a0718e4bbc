//! The game loop and encounter phase drivers.
//!
//! `Game` owns the state, the power table and one strategy per seat. The
//! three live in separate fields so phase drivers can hand the state to a
//! strategy or a power fold while holding the others.

use crate::cards::{Card, DestinyTarget};
use crate::core::{EncounterRecord, EngineError, GameState, PlanetId, PlayerId, PlayerMap, Result};
use crate::effects::{Effect, EffectResolver, Effects, ResolveResult};
use crate::encounter::{EncounterState, Outcome, Phase};
use crate::powers::{Power, PowerContext, PowerId, PowerTable, Side};
use crate::strategy::{AllianceChoice, GameView, Strategy};

use super::outcome::{EndReason, GameResult};

/// A game in progress.
pub struct Game {
    pub(crate) state: GameState,
    pub(crate) powers: PowerTable,
    pub(crate) strategies: PlayerMap<Box<dyn Strategy>>,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("turn", &self.state.turn)
            .field("phase", &self.state.phase)
            .field("powers", &self.powers)
            .finish_non_exhaustive()
    }
}

impl Game {
    pub(crate) fn new(state: GameState, powers: PowerTable, strategies: PlayerMap<Box<dyn Strategy>>) -> Self {
        Self {
            state,
            powers,
            strategies,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Mutable state, for setting up scenarios.
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn powers(&self) -> &PowerTable {
        &self.powers
    }

    // === Plumbing ===

    /// Ask `player`'s strategy for a decision.
    pub(crate) fn ask<R>(&mut self, player: PlayerId, decide: impl FnOnce(&mut dyn Strategy, &GameView<'_>) -> R) -> R {
        let view = GameView::new(&self.state, player);
        decide(self.strategies[player].as_mut(), &view)
    }

    pub(crate) fn resolve_effects(&mut self, effects: &[Effect]) {
        let resolver = EffectResolver::new(&self.powers);
        for (effect, result) in effects.iter().zip(resolver.resolve_all(&mut self.state, effects)) {
            if let ResolveResult::Failed(reason) = result {
                log::warn!("{effect:?} failed: {reason}");
            }
        }
    }

    /// Collect and resolve one event hook across all active powers.
    fn fire(&mut self, hook: impl Fn(&dyn Power, &PowerContext<'_>) -> Effects) {
        let effects = self.powers.collect(&self.state, hook);
        self.resolve_effects(&effects);
    }

    fn enter_phase(&mut self, phase: Phase) {
        self.state.phase = phase;
        self.state.encounter.phases.push(phase);
        log::debug!(
            "turn {} encounter {}: {}",
            self.state.turn,
            self.state.encounter.number,
            phase
        );
    }

    // === Game loop ===

    /// Deal opening hands and fire game-start hooks.
    pub(crate) fn start(&mut self) -> Result<()> {
        let hand_size = self.state.config.starting_hand_size as u32;
        for player in PlayerId::all(self.state.player_count()) {
            self.state.draw_cards(player, hand_size)?;
        }
        self.fire(|power, ctx| power.on_game_start(ctx));
        Ok(())
    }

    /// Play turns until someone wins or the turn limit runs out.
    pub fn run(&mut self) -> Result<GameResult> {
        loop {
            if let Some(result) = self.play_turn()? {
                log::info!("game over after {} turns: {:?}", result.turns_played, result);
                return Ok(result);
            }
        }
    }

    /// Play one full turn. Returns the result if the game ended.
    pub fn play_turn(&mut self) -> Result<Option<GameResult>> {
        if self.state.turn > self.state.config.max_turns {
            return Ok(Some(GameResult {
                winners: Vec::new(),
                turns_played: self.state.config.max_turns,
                end_reason: EndReason::TurnLimit,
            }));
        }

        let offense = PlayerId::new(((self.state.turn - 1) as usize % self.state.player_count()) as u8);
        self.state.encounter = EncounterState::new(offense, 1);
        self.state.phase = Phase::StartTurn;
        self.fire(|power, ctx| power.on_turn_start(ctx));

        let mut number = 1;
        loop {
            self.run_encounter(offense, number)?;
            if let Some(result) = self.check_winners() {
                return Ok(Some(result));
            }
            if !self.second_encounter_eligible() {
                break;
            }
            if !self.ask(offense, |strategy, view| strategy.want_second_encounter(view)) {
                break;
            }
            number += 1;
        }

        self.state.turn += 1;
        Ok(None)
    }

    /// Run one encounter for `offense` through all eight phases.
    pub fn run_encounter(&mut self, offense: PlayerId, number: u32) -> Result<Outcome> {
        self.state.encounter = EncounterState::new(offense, number);
        self.regroup();
        self.destiny()?;
        self.launch()?;
        self.alliance();
        self.planning()?;
        self.reveal();
        self.enter_phase(Phase::Resolution);
        self.resolution()?;
        Ok(self.end_encounter())
    }

    /// Another encounter is allowed after a win or a deal on the first
    /// encounter while the offense still holds an encounter card, or at any
    /// time with a repeat-encounter power.
    #[must_use]
    pub fn second_encounter_eligible(&self) -> bool {
        let encounter = &self.state.encounter;
        let offense = encounter.offense;
        if self
            .powers
            .any_flag(&self.state, &[offense], |flags| flags.grants_repeat_encounters)
        {
            return true;
        }
        let succeeded = encounter.outcome == Some(Outcome::OffenseWon) || encounter.deal_made;
        encounter.number == 1 && succeeded && self.state.players[offense].has_encounter_card()
    }

    fn check_winners(&self) -> Option<GameResult> {
        let (winners, end_reason) = match self.state.colony_winners() {
            winners if !winners.is_empty() => (winners, EndReason::ColonyThreshold),
            _ => {
                let winners = self.powers.alternate_winners(&self.state);
                if winners.is_empty() {
                    return None;
                }
                (winners.into_vec(), EndReason::AlternateWin)
            }
        };
        Some(GameResult {
            winners,
            turns_played: self.state.turn,
            end_reason,
        })
    }

    // === Phases ===

    fn regroup(&mut self) {
        self.enter_phase(Phase::Regroup);
        let offense = self.state.encounter.offense;
        let retrieved = self.state.retrieve_from_warp(offense, 1);
        if retrieved > 0 {
            log::debug!("{offense} retrieves a ship from the warp");
        }
        if self.state.config.variants.tech {
            self.research(offense);
        }
        self.fire(|power, ctx| power.on_regroup(ctx));
        self.offer_special_cards();
    }

    /// Put one research point into the player's tech, drawing a new one
    /// when idle.
    fn research(&mut self, player: PlayerId) {
        let GameState { players, decks, .. } = &mut self.state;
        let (Some(tech), Some(deck)) = (players[player].tech.as_mut(), decks.tech.as_mut()) else {
            return;
        };
        if tech.researching.is_none() {
            match deck.draw() {
                Ok(card) => tech.researching = Some(card),
                Err(_) => return,
            }
        }
        if let Some(done) = tech.advance(1) {
            log::info!("{player} completes {} (+{})", done.name, done.combat_bonus);
        }
    }

    fn destiny(&mut self) -> Result<()> {
        self.enter_phase(Phase::Destiny);
        let offense = self.state.encounter.offense;
        let drawn = if self.state.config.variants.two_player {
            offense.next(self.state.player_count())
        } else {
            self.draw_destiny(offense)?
        };
        self.state.encounter.defense = Some(drawn);

        let defense = self.powers.redirect_destiny(&self.state, drawn);
        self.state.encounter.defense = Some(defense);
        log::debug!("{offense} encounters {defense}");

        self.trigger_hazard();
        self.offer_special_cards();
        Ok(())
    }

    /// Draw destiny cards until one names an opponent. Wilds pick a random
    /// opponent; the offense's own color is redrawn.
    fn draw_destiny(&mut self, offense: PlayerId) -> Result<PlayerId> {
        let attempts = self.state.decks.destiny.population().max(1);
        for _ in 0..attempts {
            let card = self
                .state
                .decks
                .destiny
                .draw()
                .map_err(|_| EngineError::NoValidDefender { offense })?;
            self.state.decks.destiny.discard(card);
            if card.hazard {
                self.draw_hazard();
            }
            match card.target {
                DestinyTarget::Player(player) if player != offense && player.index() < self.state.player_count() => {
                    return Ok(player);
                }
                DestinyTarget::Wild => {
                    let opponents = self.state.opponents(offense);
                    if let Some(player) = self.state.rng.choose(&opponents).copied() {
                        return Ok(player);
                    }
                }
                DestinyTarget::Player(_) => {}
            }
        }
        Err(EngineError::NoValidDefender { offense })
    }

    fn draw_hazard(&mut self) {
        let Some(deck) = self.state.decks.hazards.as_mut() else {
            return;
        };
        if let Ok(hazard) = deck.draw() {
            log::info!("hazard warning: {hazard:?}");
            if let Some(previous) = self.state.encounter.hazard.replace(hazard) {
                deck.discard(previous);
            }
        }
    }

    /// Fire the pending hazard if this is its phase.
    fn trigger_hazard(&mut self) {
        let Some(hazard) = self.state.encounter.hazard else {
            return;
        };
        if hazard.phase() != self.state.phase {
            return;
        }
        let effects = hazard.effects(&self.state);
        self.resolve_effects(&effects);
        self.state.encounter.hazard = None;
        if let Some(deck) = self.state.decks.hazards.as_mut() {
            deck.discard(hazard);
        }
    }

    fn launch(&mut self) -> Result<()> {
        self.enter_phase(Phase::Launch);
        let offense = self.state.encounter.offense;
        let Some(defense) = self.state.encounter.defense else {
            return Err(EngineError::NoValidDefender { offense });
        };

        self.state.gate.clear();
        let candidates: Vec<PlanetId> = self.state.home_planets(defense).collect();
        let chosen = self
            .ask(offense, |strategy, view| strategy.select_attack_target(view, &candidates))
            .filter(|planet| candidates.contains(planet));
        let Some(target) = chosen.or_else(|| candidates.first().copied()) else {
            return Err(EngineError::NoValidDefender { offense });
        };
        self.state.gate.aim(target);
        let target = self.powers.reaim_gate(&self.state, target, &candidates);
        self.state.gate.aim(target);
        self.trigger_hazard();
        self.state.gate.lock();

        let max = self.launch_limit(offense);
        let requested = self.ask(offense, |strategy, view| strategy.select_ship_count(view, max));
        let staged = self.state.stage_ships(offense, requested.clamp(max.min(1), max));
        log::debug!("{offense} launches {staged} ships at {:?}", self.state.gate.target());

        self.offer_special_cards();
        Ok(())
    }

    fn launch_limit(&self, player: PlayerId) -> u32 {
        self.state
            .config
            .max_ships_per_encounter
            .min(self.state.ships_on_planets(player))
    }

    fn alliance(&mut self) {
        self.enter_phase(Phase::Alliance);
        let offense = self.state.encounter.offense;
        let candidates: Vec<PlayerId> = self
            .state
            .opponents(offense)
            .into_iter()
            .filter(|player| Some(*player) != self.state.encounter.defense)
            .collect();

        let mut invited: Vec<(Side, Vec<PlayerId>)> = Vec::with_capacity(2);
        for side in [Side::Offense, Side::Defense] {
            let Some(main) = self.state.encounter.main_player(side) else {
                continue;
            };
            let mut list = self.ask(main, |strategy, view| {
                strategy.alliance_invitations(view, side, &candidates)
            });
            list.retain(|player| candidates.contains(player));
            invited.push((side, list));
        }

        for player in candidates {
            let self_invited = self
                .powers
                .any_flag(&self.state, &[player], |flags| flags.self_qualifies_as_ally);
            let offered: Vec<Side> = invited
                .iter()
                .filter(|(_, list)| self_invited || list.contains(&player))
                .map(|(side, _)| *side)
                .collect();
            if offered.is_empty() {
                continue;
            }

            let AllianceChoice::Join(side) = self.ask(player, |strategy, view| strategy.alliance_response(view, &offered))
            else {
                continue;
            };
            let max = self.launch_limit(player);
            if !offered.contains(&side) || max == 0 {
                continue;
            }
            let requested = self.ask(player, |strategy, view| {
                strategy.select_ally_ship_count(view, side, max)
            });
            self.state.encounter.allies[side].push(player);
            let staged = self.state.stage_ships(player, requested.clamp(1, max));
            log::debug!("{player} allies with the {side:?} with {staged} ships");
        }

        self.offer_special_cards();
    }

    fn planning(&mut self) -> Result<()> {
        self.enter_phase(Phase::Planning);

        let mains: Vec<(Side, PlayerId)> = [Side::Offense, Side::Defense]
            .into_iter()
            .filter_map(|side| self.state.encounter.main_player(side).map(|p| (side, p)))
            .collect();
        for &(_, player) in &mains {
            self.ensure_encounter_card(player)?;
        }

        self.ask_optional_powers();

        for &(side, player) in &mains {
            let indices = self.state.players[player].encounter_card_indices();
            let chosen = self.ask(player, |strategy, view| strategy.select_encounter_card(view));
            let index = if indices.contains(&chosen) {
                chosen
            } else {
                indices.first().copied().unwrap_or_default()
            };
            let card = self.state.players[player].take_card(index);
            self.state.encounter.cards[side] = card;

            let kicker = self.ask(player, |strategy, view| strategy.select_kicker(view));
            if let Some(index) = kicker {
                if let Some(Card::Kicker(multiplier)) = self.state.players[player].hand.get(index) {
                    let multiplier = *multiplier;
                    self.state.players[player].hand.remove(index);
                    self.state.encounter.kickers[side] = Some(multiplier);
                    self.state.encounter.played.push(Card::Kicker(multiplier));
                }
            }
        }

        self.fire(|power, ctx| power.on_planning(ctx));
        self.offer_special_cards();
        Ok(())
    }

    /// A main player with no encounter card discards the hand and draws a
    /// fresh one, then keeps drawing until an encounter card shows up.
    fn ensure_encounter_card(&mut self, player: PlayerId) -> Result<()> {
        if self.state.players[player].has_encounter_card() {
            return Ok(());
        }
        log::debug!("{player} has no encounter card and redraws");
        self.state.discard_hand(player);
        self.state
            .draw_cards(player, self.state.config.starting_hand_size as u32)?;
        while !self.state.players[player].has_encounter_card() {
            self.state.draw_cards(player, 1)?;
        }
        Ok(())
    }

    /// Optional powers of participants are used only if their holder agrees.
    fn ask_optional_powers(&mut self) {
        let participants = self.state.encounter.participants();
        let optional: Vec<(PlayerId, PowerId)> = self
            .powers
            .active_among(&self.state, &participants)
            .filter(|instance| {
                let ctx = PowerContext::new(&self.state, instance.owner);
                instance.power.is_optional() && instance.power.should_use(&ctx)
            })
            .map(|instance| (instance.owner, instance.id))
            .collect();
        for (owner, id) in optional {
            if !self.ask(owner, |strategy, view| strategy.use_power(view, id)) {
                log::debug!("{owner} declines {id}");
                self.state.encounter.declined.insert(id);
            }
        }
    }

    fn reveal(&mut self) {
        self.enter_phase(Phase::Reveal);
        let encounter = &self.state.encounter;
        log::debug!(
            "reveal: {:?} vs {:?}",
            encounter.cards.offense,
            encounter.cards.defense
        );
        self.fire(|power, ctx| power.on_reveal(ctx));
        self.trigger_hazard();
        self.offer_special_cards();
    }

    fn end_encounter(&mut self) -> Outcome {
        self.enter_phase(Phase::End);

        let encounter = &mut self.state.encounter;
        let mut spent: Vec<Card> = std::mem::take(&mut encounter.played);
        spent.extend(encounter.cards.offense.take());
        spent.extend(encounter.cards.defense.take());
        for card in spent {
            self.state.discard(card);
        }
        if let Some(hazard) = self.state.encounter.hazard.take() {
            if let Some(deck) = self.state.decks.hazards.as_mut() {
                deck.discard(hazard);
            }
        }

        let powers = &self.powers;
        for player in self
            .state
            .refresh_power_active(|player| powers.ignores_home_colony_rule(player))
        {
            log::info!(
                "{player} power {}",
                if self.state.players[player].power_active { "restored" } else { "lost" }
            );
        }

        debug_assert_eq!(self.state.gate.total_staged(), 0, "ships left on the gate");
        debug_assert!(self.state.ships_conserved(), "ship count drifted");

        let encounter = &self.state.encounter;
        let outcome = encounter.outcome.unwrap_or(Outcome::Cancelled);
        let record = EncounterRecord {
            turn: self.state.turn,
            number: encounter.number,
            offense: encounter.offense,
            defense: encounter.defense,
            target: self.state.gate.target(),
            offensive_allies: encounter.allies.offense.clone(),
            defensive_allies: encounter.allies.defense.clone(),
            phases: encounter.phases.clone(),
            outcome,
            totals: encounter.totals.map(|totals| (totals.offense, totals.defense)),
        };
        self.state.log.record(record);
        outcome
    }

    // === Special cards ===

    /// Offer artifacts and flares in the current phase: offense, defense,
    /// then everyone else in seat order. Each pass plays at most one card;
    /// passes repeat until nobody plays.
    fn offer_special_cards(&mut self) {
        let order = self.opportunity_order();
        let limit = 2 * self.state.player_count();
        for _ in 0..limit {
            let mut played = false;
            for &player in &order {
                let candidates = self.special_candidates(player);
                if candidates.is_empty() {
                    continue;
                }
                let phase = self.state.phase;
                let choice = self.ask(player, |strategy, view| {
                    strategy.play_special_card(view, phase, &candidates)
                });
                let Some(index) = choice.filter(|index| candidates.contains(index)) else {
                    continue;
                };
                self.play_special(player, index);
                played = true;
                break;
            }
            if !played {
                break;
            }
        }
    }

    fn opportunity_order(&self) -> Vec<PlayerId> {
        let offense = self.state.encounter.offense;
        let defense = self.state.encounter.defense;
        let mut order = vec![offense];
        order.extend(defense);
        order.extend(
            self.state
                .opponents(offense)
                .into_iter()
                .filter(|player| Some(*player) != defense),
        );
        order
    }

    /// Hand indices of specials `player` may play right now.
    fn special_candidates(&self, player: PlayerId) -> Vec<usize> {
        let state = &self.state;
        state.players[player].indices_where(|card| match card {
            Card::Artifact(kind) => kind.is_playable(state, player),
            Card::Flare(flare) => flare
                .tier(state, &self.powers, player)
                .is_some_and(|effect| effect.is_playable(state, player)),
            _ => false,
        })
    }

    fn play_special(&mut self, player: PlayerId, index: usize) {
        let Some(card) = self.state.players[player].take_card(index) else {
            return;
        };
        let effects = match &card {
            Card::Artifact(kind) => kind.effects(&self.state, player),
            Card::Flare(flare) => flare
                .tier(&self.state, &self.powers, player)
                .map(|effect| effect.effects(&self.state, player))
                .unwrap_or_default(),
            _ => Effects::new(),
        };
        log::info!("{player} plays {card} during {}", self.state.phase);
        self.resolve_effects(&effects);
        self.state.discard(card);
    }
}
