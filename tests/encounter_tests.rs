//! Encounter integration tests.
//!
//! Two-player tables keep destiny fixed (the defender is always the other
//! seat). Larger tables get a one-card destiny deck, so every encounter here
//! is fully scripted: hands are set by hand and the strategies below answer
//! every decision the same way.

use std::cell::RefCell;
use std::rc::Rc;

use rust_cosmic::cards::{ArtifactKind, Card, Deck, DestinyCard, FlareCard, FlareEffect, HazardCard, TechCard};
use rust_cosmic::core::{GameConfig, GameRng, PlanetId, PlayerId};
use rust_cosmic::effects::BonusSource;
use rust_cosmic::encounter::{Deal, Outcome, Phase};
use rust_cosmic::game::{Game, GameBuilder};
use rust_cosmic::powers::{PowerId, Side};
use rust_cosmic::strategy::{AllianceChoice, AllyReward, GameView, Strategy};

/// Answers every decision from fixed settings.
#[derive(Default)]
struct Scripted {
    /// Ships to launch, as main player or ally.
    launch: u32,
    kick: bool,
    deal: Option<Deal>,
    /// Players invited onto this seat's side.
    invite: Vec<PlayerId>,
    /// Side joined when asked, even if not offered.
    join: Option<Side>,
    reward: Option<AllyReward>,
    /// Phase in which every offered special card is played.
    special: Option<Phase>,
    /// Seats in the order they played specials, shared across seats.
    specials_played: Rc<RefCell<Vec<PlayerId>>>,
}

impl Scripted {
    fn launching(launch: u32) -> Self {
        Self {
            launch,
            ..Self::default()
        }
    }
}

impl Strategy for Scripted {
    fn select_ship_count(&mut self, _view: &GameView<'_>, max: u32) -> u32 {
        self.launch.min(max)
    }

    fn select_kicker(&mut self, view: &GameView<'_>) -> Option<usize> {
        if !self.kick {
            return None;
        }
        view.hand().iter().position(|card| matches!(card, Card::Kicker(_)))
    }

    fn alliance_invitations(&mut self, _view: &GameView<'_>, _side: Side, candidates: &[PlayerId]) -> Vec<PlayerId> {
        candidates
            .iter()
            .copied()
            .filter(|player| self.invite.contains(player))
            .collect()
    }

    fn alliance_response(&mut self, _view: &GameView<'_>, _offered: &[Side]) -> AllianceChoice {
        self.join.map_or(AllianceChoice::Decline, AllianceChoice::Join)
    }

    fn select_ally_ship_count(&mut self, _view: &GameView<'_>, _side: Side, max: u32) -> u32 {
        self.launch.min(max)
    }

    fn propose_deal(&mut self, _view: &GameView<'_>) -> Option<Deal> {
        self.deal
    }

    fn choose_ally_reward(&mut self, _view: &GameView<'_>, _amount: u32) -> AllyReward {
        self.reward.unwrap_or(AllyReward::Cards)
    }

    fn play_special_card(&mut self, view: &GameView<'_>, phase: Phase, candidates: &[usize]) -> Option<usize> {
        if self.special != Some(phase) {
            return None;
        }
        let index = candidates.first().copied()?;
        self.specials_played.borrow_mut().push(view.player().id);
        Some(index)
    }
}

const OFFENSE: PlayerId = PlayerId::new(0);
const DEFENSE: PlayerId = PlayerId::new(1);
/// Third seat on three-player tables.
const BYSTANDER: PlayerId = PlayerId::new(2);
/// First home planet of the defense, the default target.
const TARGET: PlanetId = PlanetId::new(5);

fn build(config: GameConfig, powers: &[(u8, &str)], seats: Vec<Scripted>) -> Game {
    let mut builder = GameBuilder::new(config).seed(11);
    for (seat, name) in powers {
        builder = builder.power(*seat, name);
    }
    for (seat, strategy) in seats.into_iter().enumerate() {
        builder = builder.strategy(seat as u8, strategy);
    }
    builder.build().unwrap()
}

fn game(powers: &[(u8, &str)], offense: Scripted, defense: Scripted) -> Game {
    build(GameConfig::new(2), powers, vec![offense, defense])
}

/// Three seats; destiny always names `DEFENSE`.
fn three_player_game(powers: &[(u8, &str)], seats: [Scripted; 3]) -> Game {
    let mut game = build(GameConfig::new(3), powers, seats.into());
    game.state_mut().decks.destiny = Deck::new("destiny", vec![DestinyCard::player(DEFENSE)], GameRng::new(1));
    game
}

/// Wild-tier flare for a power nobody holds.
fn flare(wild: FlareEffect) -> Card {
    Card::Flare(FlareCard {
        power: PowerId::new(40),
        wild,
        super_effect: wild,
    })
}

fn set_hand(game: &mut Game, player: PlayerId, cards: Vec<Card>) {
    let state = game.state_mut();
    state.discard_hand(player);
    state.players[player].hand = cards;
}

fn run(game: &mut Game) -> Outcome {
    let outcome = game.run_encounter(OFFENSE, 1).unwrap();
    assert!(game.state().ships_conserved());
    assert_eq!(game.state().gate.total_staged(), 0);
    outcome
}

// =============================================================================
// Attack vs Attack
// =============================================================================

/// Test that a stronger attack plus launched ships takes the planet.
#[test]
fn test_attack_win_lands_offense() {
    let mut game = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);

    let state = game.state();
    let record = state.log.last().unwrap();
    assert_eq!(record.totals, Some((18, 12)));
    assert_eq!(record.target, Some(TARGET));
    assert_eq!(state.planet(TARGET).ships(OFFENSE), 4);
    assert_eq!(state.planet(TARGET).ships(DEFENSE), 0);
    assert_eq!(state.players[DEFENSE].ships_in_warp, 4);
    assert_eq!(state.foreign_colonies(OFFENSE), 1);
}

/// Test that the losing offense sends its launched ships to the warp.
#[test]
fn test_defense_win_warps_offense() {
    let mut game = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(4)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(12)]);

    assert_eq!(run(&mut game), Outcome::DefenseWon);
    assert_eq!(game.state().players[OFFENSE].ships_in_warp, 4);
    assert_eq!(game.state().planet(TARGET).ships(DEFENSE), 4);
}

/// Test that equal totals return every launched ship.
#[test]
fn test_tie_returns_ships() {
    let mut game = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(10)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(10)]);

    assert_eq!(run(&mut game), Outcome::Tie);
    assert_eq!(game.state().ships_on_planets(OFFENSE), 20);
    assert_eq!(game.state().players[OFFENSE].ships_in_warp, 0);
}

/// Test that a morph takes the value of the opposing card.
#[test]
fn test_morph_copies_opposing_attack() {
    let mut game = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Morph]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(12)]);

    assert_eq!(run(&mut game), Outcome::Tie);
    assert_eq!(game.state().log.last().unwrap().totals, Some((16, 16)));
}

/// Test that a kicker multiplies the card before ships are added.
#[test]
fn test_kicker_multiplies_card() {
    let offense = Scripted {
        launch: 4,
        kick: true,
        ..Scripted::default()
    };
    let mut game = game(&[], offense, Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(5), Card::Kicker(3)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(12)]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    assert_eq!(game.state().log.last().unwrap().totals, Some((19, 16)));
    assert!(game.state().players[OFFENSE].hand.is_empty());
}

// =============================================================================
// Powers in Resolution
// =============================================================================

/// Test that one reversing power flips the result and two cancel out.
#[test]
fn test_reversal_parity() {
    let mut single = game(&[(0, "Loser")], Scripted::launching(4), Scripted::default());
    set_hand(&mut single, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut single, DEFENSE, vec![Card::Attack(8)]);
    assert_eq!(run(&mut single), Outcome::DefenseWon);

    let mut double = game(
        &[(0, "Loser"), (1, "Anti-Matter")],
        Scripted::launching(4),
        Scripted::default(),
    );
    set_hand(&mut double, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut double, DEFENSE, vec![Card::Attack(8)]);
    assert_eq!(run(&mut double), Outcome::OffenseWon);
}

/// Test that the defense takes ties with a tie-breaking power.
#[test]
fn test_guardian_wins_ties_for_defense() {
    let mut game = game(&[(1, "Guardian")], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(10)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(10)]);

    assert_eq!(run(&mut game), Outcome::DefenseWon);
    assert_eq!(game.state().players[OFFENSE].ships_in_warp, 4);
}

/// Test that a destroying power removes beaten ships from the game.
#[test]
fn test_void_destroys_beaten_ships() {
    let mut game = game(&[(0, "Void")], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let defense = &game.state().players[DEFENSE];
    assert_eq!(defense.ships_removed, 4);
    assert_eq!(defense.ships_in_warp, 0);
}

/// Test that a warp-proof power puts beaten ships back on its colonies.
#[test]
fn test_zombie_ships_return_to_colonies() {
    let mut game = game(&[(1, "Zombie")], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let state = game.state();
    assert_eq!(state.players[DEFENSE].ships_in_warp, 0);
    assert_eq!(state.ships_on_planets(DEFENSE), 20);
    assert_eq!(state.planet(PlanetId::new(6)).ships(DEFENSE), 8);
}

/// Test that losing home colonies turns a power off at encounter end.
#[test]
fn test_power_lost_with_home_colonies() {
    for (power, expect_active) in [("Warrior", false), ("Survivor", true)] {
        let mut game = game(&[(1, power)], Scripted::launching(4), Scripted::default());
        set_hand(&mut game, OFFENSE, vec![Card::Attack(30)]);
        set_hand(&mut game, DEFENSE, vec![Card::Attack(1)]);
        {
            let state = game.state_mut();
            for planet in [6, 7] {
                let lost = state.planet_mut(PlanetId::new(planet)).clear(DEFENSE);
                state.players[DEFENSE].ships_in_warp += lost;
            }
        }
        assert!(game.state().players[DEFENSE].power_active);

        assert_eq!(run(&mut game), Outcome::OffenseWon);
        assert_eq!(game.state().home_colonies(DEFENSE), 2);
        assert_eq!(game.state().players[DEFENSE].power_active, expect_active, "{power}");
    }
}

// =============================================================================
// Negotiation
// =============================================================================

/// Test that a negotiate loses to an attack but collects compensation.
#[test]
fn test_negotiate_against_attack_pays_compensation() {
    let mut game = game(&[], Scripted::launching(1), Scripted::default());
    set_hand(
        &mut game,
        OFFENSE,
        vec![Card::Attack(10), Card::Reinforcement(2), Card::Reinforcement(3)],
    );
    set_hand(&mut game, DEFENSE, vec![Card::Negotiate]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let state = game.state();
    // Four ships on the target: two cards from the winner, two from the deck.
    assert!(state.players[OFFENSE].hand.is_empty());
    assert_eq!(state.players[DEFENSE].hand.len(), 4);
    assert_eq!(state.players[DEFENSE].ships_in_warp, 4);
}

/// Test that a negotiate-winning power beats an attack outright.
#[test]
fn test_pacifist_negotiate_beats_attack() {
    let mut game = game(&[(1, "Pacifist")], Scripted::launching(4), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Attack(40)]);
    set_hand(&mut game, DEFENSE, vec![Card::Negotiate]);

    assert_eq!(run(&mut game), Outcome::DefenseWon);
    assert_eq!(game.state().players[OFFENSE].ships_in_warp, 4);
    assert_eq!(game.state().planet(TARGET).ships(DEFENSE), 4);
}

/// Test that a failed deal costs each main player the penalty.
#[test]
fn test_failed_deal_costs_both_sides() {
    let mut game = game(&[], Scripted::launching(2), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Negotiate]);
    set_hand(&mut game, DEFENSE, vec![Card::Negotiate]);

    assert_eq!(run(&mut game), Outcome::DealFailed);
    let state = game.state();
    let penalty = state.config.deal_penalty_ships;
    assert_eq!(state.players[OFFENSE].ships_in_warp, penalty);
    assert_eq!(state.players[DEFENSE].ships_in_warp, penalty);
    assert_eq!(state.foreign_colonies(OFFENSE), 0);
}

/// Test that an agreed deal lands the offense and allows another encounter.
#[test]
fn test_deal_lands_offense_and_allows_second_encounter() {
    let offense = Scripted {
        launch: 2,
        deal: Some(Deal {
            offense_colony: true,
            ..Deal::default()
        }),
        ..Scripted::default()
    };
    let defense = Scripted {
        deal: Some(Deal {
            cards_to_defense: 1,
            ..Deal::default()
        }),
        ..Scripted::default()
    };
    let mut game = game(&[], offense, defense);
    set_hand(&mut game, OFFENSE, vec![Card::Negotiate, Card::Attack(5)]);
    set_hand(&mut game, DEFENSE, vec![Card::Negotiate]);

    assert_eq!(run(&mut game), Outcome::DealMade);
    let state = game.state();
    assert!(state.encounter.deal_made);
    assert_eq!(state.planet(TARGET).ships(OFFENSE), 2);
    assert_eq!(state.players[OFFENSE].ships_in_warp, 0);
    assert!(game.second_encounter_eligible());
}

// =============================================================================
// Encounter Flow
// =============================================================================

/// Test that an encounter visits every phase once, in order.
#[test]
fn test_encounter_visits_phases_in_order() {
    let mut game = game(&[], Scripted::launching(1), Scripted::default());
    run(&mut game);
    let record = game.state().log.last().unwrap();
    assert_eq!(record.phases, Phase::ENCOUNTER.to_vec());
    assert_eq!(record.offense, OFFENSE);
    assert_eq!(record.defense, Some(DEFENSE));
}

/// Test the second encounter rule: only after a first-encounter success
/// with an encounter card left, unless a power grants more.
#[test]
fn test_second_encounter_eligibility() {
    let mut won = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut won, OFFENSE, vec![Card::Attack(30), Card::Attack(4)]);
    set_hand(&mut won, DEFENSE, vec![Card::Attack(1)]);
    assert_eq!(run(&mut won), Outcome::OffenseWon);
    assert!(won.second_encounter_eligible());

    let mut empty_handed = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut empty_handed, OFFENSE, vec![Card::Attack(30)]);
    set_hand(&mut empty_handed, DEFENSE, vec![Card::Attack(1)]);
    assert_eq!(run(&mut empty_handed), Outcome::OffenseWon);
    assert!(!empty_handed.second_encounter_eligible());

    let mut lost = game(&[], Scripted::launching(4), Scripted::default());
    set_hand(&mut lost, OFFENSE, vec![Card::Attack(1), Card::Attack(4)]);
    set_hand(&mut lost, DEFENSE, vec![Card::Attack(30)]);
    assert_eq!(run(&mut lost), Outcome::DefenseWon);
    assert!(!lost.second_encounter_eligible());

    let mut machine = game(&[(0, "Machine")], Scripted::launching(4), Scripted::default());
    set_hand(&mut machine, OFFENSE, vec![Card::Attack(1)]);
    set_hand(&mut machine, DEFENSE, vec![Card::Attack(30)]);
    assert_eq!(run(&mut machine), Outcome::DefenseWon);
    assert!(machine.second_encounter_eligible());
}

/// Test that a main player without an encounter card redraws.
#[test]
fn test_redraw_without_encounter_card() {
    let mut game = game(&[], Scripted::launching(1), Scripted::default());
    set_hand(&mut game, OFFENSE, vec![Card::Reinforcement(2)]);
    run(&mut game);
    let record = game.state().log.last().unwrap();
    assert_ne!(record.outcome, Outcome::Cancelled);
}

// =============================================================================
// Alliances
// =============================================================================

/// Test that an invited offensive ally adds its ships and lands on a win.
#[test]
fn test_offensive_ally_lands_on_win() {
    let offense = Scripted {
        launch: 4,
        invite: vec![BYSTANDER],
        ..Scripted::default()
    };
    let ally = Scripted {
        launch: 2,
        join: Some(Side::Offense),
        ..Scripted::default()
    };
    let mut game = three_player_game(&[], [offense, Scripted::default(), ally]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let state = game.state();
    let record = state.log.last().unwrap();
    assert_eq!(record.offensive_allies, vec![BYSTANDER]);
    assert_eq!(record.totals, Some((20, 12)));
    assert_eq!(state.planet(TARGET).ships(OFFENSE), 4);
    assert_eq!(state.planet(TARGET).ships(BYSTANDER), 2);
}

/// Test that a beaten offensive ally loses its ships to the warp.
#[test]
fn test_offensive_ally_warps_on_loss() {
    let offense = Scripted {
        launch: 4,
        invite: vec![BYSTANDER],
        ..Scripted::default()
    };
    let ally = Scripted {
        launch: 2,
        join: Some(Side::Offense),
        ..Scripted::default()
    };
    let mut game = three_player_game(&[], [offense, Scripted::default(), ally]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(4)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(30)]);

    assert_eq!(run(&mut game), Outcome::DefenseWon);
    assert_eq!(game.state().players[OFFENSE].ships_in_warp, 4);
    assert_eq!(game.state().players[BYSTANDER].ships_in_warp, 2);
}

/// Test that an uninvited player cannot join unless its power lets it.
#[test]
fn test_self_qualifying_ally() {
    for (powers, expected) in [(&[][..], vec![]), (&[(2, "Parasite")][..], vec![BYSTANDER])] {
        let ally = Scripted {
            launch: 1,
            join: Some(Side::Offense),
            ..Scripted::default()
        };
        let mut game = three_player_game(powers, [Scripted::launching(4), Scripted::default(), ally]);
        set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
        set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

        run(&mut game);
        assert_eq!(game.state().log.last().unwrap().offensive_allies, expected);
    }
}

/// Test that a winning defensive ally takes one card per ship sent.
#[test]
fn test_defensive_ally_rewarded_with_cards() {
    let defense = Scripted {
        invite: vec![BYSTANDER],
        ..Scripted::default()
    };
    let ally = Scripted {
        launch: 3,
        join: Some(Side::Defense),
        reward: Some(AllyReward::Cards),
        ..Scripted::default()
    };
    let mut game = three_player_game(&[], [Scripted::launching(4), defense, ally]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(1)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(30)]);
    set_hand(&mut game, BYSTANDER, Vec::new());

    assert_eq!(run(&mut game), Outcome::DefenseWon);
    let state = game.state();
    assert_eq!(state.log.last().unwrap().defensive_allies, vec![BYSTANDER]);
    assert_eq!(state.players[BYSTANDER].hand.len(), 3);
    assert_eq!(state.ships_on_planets(BYSTANDER), 20);
}

/// Test that a winning defensive ally may take ships from the warp instead.
#[test]
fn test_defensive_ally_rewarded_with_ships() {
    let defense = Scripted {
        invite: vec![BYSTANDER],
        ..Scripted::default()
    };
    let ally = Scripted {
        launch: 3,
        join: Some(Side::Defense),
        reward: Some(AllyReward::Ships),
        ..Scripted::default()
    };
    let mut game = three_player_game(&[], [Scripted::launching(4), defense, ally]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(1)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(30)]);
    set_hand(&mut game, BYSTANDER, Vec::new());
    {
        let state = game.state_mut();
        let lost = state.planet_mut(PlanetId::new(10)).clear(BYSTANDER);
        state.players[BYSTANDER].ships_in_warp += lost;
    }

    assert_eq!(run(&mut game), Outcome::DefenseWon);
    let state = game.state();
    assert_eq!(state.players[BYSTANDER].ships_in_warp, 1);
    assert_eq!(state.ships_on_planets(BYSTANDER), 19);
    assert!(state.players[BYSTANDER].hand.is_empty());
}

/// Test that a win clears only the defender's ships from the target.
#[test]
fn test_other_colonists_keep_the_target() {
    let mut game = three_player_game(&[], [Scripted::launching(4), Scripted::default(), Scripted::default()]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);
    {
        let state = game.state_mut();
        let moved = state.planet_mut(PlanetId::new(10)).clear(BYSTANDER);
        state.planet_mut(TARGET).add_ships(BYSTANDER, moved);
    }

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let target = game.state().planet(TARGET);
    assert_eq!(target.ships(DEFENSE), 0);
    assert_eq!(target.ships(BYSTANDER), 4);
    assert_eq!(target.ships(OFFENSE), 4);
}

// =============================================================================
// Special Cards
// =============================================================================

/// Test that a force field cancels the encounter and sends every ship home.
#[test]
fn test_force_field_cancels_resolution() {
    let offense = Scripted {
        launch: 4,
        special: Some(Phase::Reveal),
        ..Scripted::default()
    };
    let mut game = game(&[], offense, Scripted::default());
    set_hand(
        &mut game,
        OFFENSE,
        vec![Card::Attack(30), Card::Artifact(ArtifactKind::ForceField)],
    );
    set_hand(&mut game, DEFENSE, vec![Card::Attack(1)]);

    assert_eq!(run(&mut game), Outcome::Cancelled);
    let state = game.state();
    assert_eq!(state.log.last().unwrap().totals, None);
    assert!(state.players[OFFENSE].hand.is_empty());
    for player in [OFFENSE, DEFENSE] {
        assert_eq!(state.ships_on_planets(player), 20);
        assert_eq!(state.players[player].ships_in_warp, 0);
    }
}

/// Test that specials are offered offense first, then defense, then the
/// rest, and that every pass starts over after one card is played.
#[test]
fn test_special_card_opportunity_order() {
    let played = Rc::new(RefCell::new(Vec::new()));
    let seat = |launch| Scripted {
        launch,
        special: Some(Phase::Planning),
        specials_played: Rc::clone(&played),
        ..Scripted::default()
    };
    let mut game = three_player_game(&[], [seat(1), seat(0), seat(0)]);
    // Destiny names the third seat, so the second is the bystander.
    game.state_mut().decks.destiny = Deck::new("destiny", vec![DestinyCard::player(BYSTANDER)], GameRng::new(1));
    game.state_mut().decks.main = Deck::new("main", vec![Card::Attack(5); 20], GameRng::new(2));
    let draw = flare(FlareEffect::DrawCards(1));
    set_hand(&mut game, OFFENSE, vec![Card::Attack(10), draw.clone(), draw.clone()]);
    set_hand(&mut game, DEFENSE, vec![draw.clone()]);
    set_hand(&mut game, BYSTANDER, vec![Card::Attack(10), draw]);

    run(&mut game);
    assert_eq!(*played.borrow(), vec![OFFENSE, OFFENSE, BYSTANDER, DEFENSE]);
}

// =============================================================================
// Hazards
// =============================================================================

/// Draw `hazard` with the first destiny card of a three-player encounter.
fn hazard_game(hazard: HazardCard, powers: &[(u8, &str)]) -> Game {
    let mut game = three_player_game(powers, [Scripted::launching(4), Scripted::default(), Scripted::default()]);
    let state = game.state_mut();
    state.decks.destiny = Deck::new("destiny", vec![DestinyCard::player(DEFENSE).with_hazard()], GameRng::new(1));
    state.decks.hazards = Some(Deck::new("hazard", vec![hazard], GameRng::new(1)));
    game
}

/// Test that destiny hazards fire as soon as the defender is known.
#[test]
fn test_destiny_hazards() {
    let mut storm = hazard_game(HazardCard::IonStorm, &[]);
    set_hand(&mut storm, OFFENSE, vec![Card::Attack(10)]);
    set_hand(&mut storm, DEFENSE, vec![Card::Attack(10)]);
    assert_eq!(run(&mut storm), Outcome::Tie);
    assert_eq!(storm.state().players[OFFENSE].ships_in_warp, 1);
    assert_eq!(storm.state().encounter.hazard, None);

    let mut quake = hazard_game(HazardCard::CosmicQuake, &[]);
    set_hand(&mut quake, BYSTANDER, Vec::new());
    run(&mut quake);
    assert_eq!(quake.state().players[BYSTANDER].hand.len(), 1);
}

/// Test that a launch hazard moves the gate before it locks.
#[test]
fn test_gravity_rift_reaims_at_launch() {
    let mut game = hazard_game(HazardCard::GravityRift, &[]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let rifted = PlanetId::new(6);
    assert_eq!(game.state().log.last().unwrap().target, Some(rifted));
    assert_eq!(game.state().planet(rifted).ships(OFFENSE), 4);
    assert_eq!(game.state().planet(TARGET).ships(DEFENSE), 4);
}

/// Test that a reveal hazard zaps the main players' powers before
/// resolution.
#[test]
fn test_power_failure_at_reveal() {
    let mut game = hazard_game(HazardCard::PowerFailure, &[(0, "Loser")]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(14)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8)]);

    // Without the hazard the reversal hands the win to the defense.
    assert_eq!(run(&mut game), Outcome::OffenseWon);
    assert_eq!(
        game.state().decks.hazards.as_ref().map(Deck::discard_len),
        Some(1)
    );
}

// =============================================================================
// Standing Bonuses
// =============================================================================

/// Test that flare, tech and station bonuses all reach the defense total,
/// recorded in that order.
#[test]
fn test_bonuses_add_in_source_order() {
    let mut config = GameConfig::new(2);
    config.variants.tech = true;
    config.variants.stations = true;
    let defense = Scripted {
        special: Some(Phase::Reveal),
        ..Scripted::default()
    };
    let mut game = build(config, &[], vec![Scripted::launching(4), defense]);
    set_hand(&mut game, OFFENSE, vec![Card::Attack(20)]);
    set_hand(&mut game, DEFENSE, vec![Card::Attack(8), flare(FlareEffect::CombatBonus(2))]);
    if let Some(tech) = game.state_mut().players[DEFENSE].tech.as_mut() {
        tech.completed.push(TechCard::new("Plasma Lance", 4, 3));
    }

    assert_eq!(run(&mut game), Outcome::OffenseWon);
    let state = game.state();
    assert_eq!(state.log.last().unwrap().totals, Some((24, 19)));
    assert_eq!(
        state.encounter.bonuses.defense.in_order(),
        [(BonusSource::Flare, 2), (BonusSource::Tech, 3), (BonusSource::Station, 2)]
    );
    // The station fell with its planet.
    assert_eq!(state.players[DEFENSE].station, None);
}
