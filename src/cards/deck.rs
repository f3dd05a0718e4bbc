//! Draw/discard decks.
//!
//! A `Deck` owns a draw pile and a discard pile. The top of the draw pile is
//! the end of the vector. When the draw pile runs out the discard pile is
//! shuffled into a new draw pile; only when both are empty does the deck fall
//! back to its emergency supply.
//!
//! ```
//! use rust_cosmic::cards::{Card, Deck};
//! use rust_cosmic::core::GameRng;
//!
//! let mut deck = Deck::new("main", vec![Card::Attack(4), Card::Negotiate], GameRng::new(1));
//! let first = deck.draw().unwrap();
//! let second = deck.draw().unwrap();
//! deck.discard(first);
//! deck.discard(second);
//!
//! // Draw pile empty: the discard pile is reshuffled.
//! assert!(deck.draw().is_ok());
//! assert_eq!(deck.draw_len(), 1);
//! ```

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::core::{EngineError, GameConfig, GameRng, Result};

use super::catalog;
use super::{Card, DestinyCard, FlareCard, HazardCard, TechCard};

/// Card types that can live in a `Deck`.
pub trait DeckCard: Clone + std::fmt::Debug {
    /// Cards synthesized when the draw and discard piles are both empty.
    ///
    /// Decks without a supply report `DeckExhausted` instead.
    fn emergency_supply() -> Vec<Self> {
        Vec::new()
    }
}

impl DeckCard for Card {
    fn emergency_supply() -> Vec<Self> {
        vec![Card::Attack(6), Card::Attack(8), Card::Negotiate]
    }
}

impl DeckCard for DestinyCard {}
impl DeckCard for TechCard {}
impl DeckCard for HazardCard {}

/// A draw pile plus its discard pile.
#[derive(Clone, Debug)]
pub struct Deck<C> {
    name: &'static str,
    draw: Vec<C>,
    discard: Vec<C>,
    rng: GameRng,
    population: usize,
    emergency_issued: usize,
}

impl<C: DeckCard> Deck<C> {
    /// Create a deck from `cards`, shuffled with `rng`.
    pub fn new(name: &'static str, mut cards: Vec<C>, mut rng: GameRng) -> Self {
        rng.shuffle(&mut cards);
        let population = cards.len();
        Self {
            name,
            draw: cards,
            discard: Vec::new(),
            rng,
            population,
            emergency_issued: 0,
        }
    }

    /// Deck name used in errors and logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Draw the top card.
    ///
    /// Reshuffles the discard pile if the draw pile is empty, then falls back
    /// to the emergency supply. Fails only when all three are empty.
    pub fn draw(&mut self) -> Result<C> {
        if self.draw.is_empty() {
            self.reshuffle();
        }
        if self.draw.is_empty() {
            let mut supply = C::emergency_supply();
            if supply.is_empty() {
                return Err(EngineError::DeckExhausted { deck: self.name });
            }
            log::warn!(
                "{} deck exhausted, issuing {} emergency cards",
                self.name,
                supply.len()
            );
            self.emergency_issued += supply.len();
            self.rng.shuffle(&mut supply);
            self.draw = supply;
        }
        self.draw
            .pop()
            .ok_or(EngineError::DeckExhausted { deck: self.name })
    }

    /// Draw `count` cards.
    ///
    /// On failure the cards already drawn go back on top in their original
    /// order, so nothing is lost.
    pub fn draw_multiple(&mut self, count: usize) -> Result<Vec<C>> {
        let mut drawn = Vec::with_capacity(count);
        for _ in 0..count {
            match self.draw() {
                Ok(card) => drawn.push(card),
                Err(err) => {
                    while let Some(card) = drawn.pop() {
                        self.draw.push(card);
                    }
                    return Err(err);
                }
            }
        }
        Ok(drawn)
    }

    /// Put a card on the discard pile.
    pub fn discard(&mut self, card: C) {
        self.discard.push(card);
    }

    /// Look at up to `count` cards from the top, top first.
    ///
    /// If the draw pile holds fewer than `count` cards, the discard pile is
    /// shuffled in underneath first so the peek sees everything a draw would.
    pub fn peek(&mut self, count: usize) -> Vec<&C> {
        if self.draw.len() < count && !self.discard.is_empty() {
            let mut pile = std::mem::take(&mut self.discard);
            self.rng.shuffle(&mut pile);
            pile.append(&mut self.draw);
            self.draw = pile;
        }
        self.draw.iter().rev().take(count).collect()
    }

    /// Cards left in the draw pile.
    #[must_use]
    pub fn draw_len(&self) -> usize {
        self.draw.len()
    }

    /// Cards in the discard pile.
    #[must_use]
    pub fn discard_len(&self) -> usize {
        self.discard.len()
    }

    /// Cards the deck was created with.
    #[must_use]
    pub fn population(&self) -> usize {
        self.population
    }

    /// Emergency cards synthesized so far.
    #[must_use]
    pub fn emergency_issued(&self) -> usize {
        self.emergency_issued
    }

    fn reshuffle(&mut self) {
        if self.discard.is_empty() {
            return;
        }
        log::debug!("reshuffling {} discards into the {} deck", self.discard.len(), self.name);
        std::mem::swap(&mut self.draw, &mut self.discard);
        self.rng.shuffle(&mut self.draw);
    }
}

/// Snapshot of a deck's pile sizes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckCounts {
    pub draw: usize,
    pub discard: usize,
}

impl<C: DeckCard> From<&Deck<C>> for DeckCounts {
    fn from(deck: &Deck<C>) -> Self {
        Self {
            draw: deck.draw_len(),
            discard: deck.discard_len(),
        }
    }
}

/// Every deck in a game. Optional decks exist only when their variant is on.
///
/// Main and rewards cards share one type. `Decks` counts the reward cards
/// currently out of the rewards deck, by value, so `discard` can send each
/// card back to the deck it came from.
#[derive(Clone, Debug)]
pub struct Decks {
    pub main: Deck<Card>,
    pub destiny: Deck<DestinyCard>,
    pub rewards: Option<Deck<Card>>,
    pub tech: Option<Deck<TechCard>>,
    pub hazards: Option<Deck<HazardCard>>,
    rewards_out: FxHashMap<Card, u32>,
}

impl Decks {
    /// Build all decks for `config`, each with its own fork of `rng`.
    ///
    /// Forks are taken in a fixed order (main, destiny, rewards, tech,
    /// hazards) so the same seed always produces the same decks.
    pub fn build(config: &GameConfig, flares: Vec<FlareCard>, rng: &mut GameRng) -> Self {
        let variants = &config.variants;
        let main = Deck::new("main", catalog::main_deck(flares), rng.fork());
        let destiny = Deck::new(
            "destiny",
            catalog::destiny_deck(config.player_count, variants.hazards),
            rng.fork(),
        );
        let rewards = variants
            .rewards_deck
            .then(|| Deck::new("rewards", catalog::rewards_deck(), rng.fork()));
        let tech = variants
            .tech
            .then(|| Deck::new("tech", catalog::tech_deck(), rng.fork()));
        let hazards = variants
            .hazards
            .then(|| Deck::new("hazard", catalog::hazard_deck(), rng.fork()));

        Self {
            main,
            destiny,
            rewards,
            tech,
            hazards,
            rewards_out: FxHashMap::default(),
        }
    }

    /// Draw `count` cards from the rewards deck, or from the main deck when
    /// the rewards variant is off.
    pub fn draw_rewards(&mut self, count: usize) -> Result<Vec<Card>> {
        let Some(rewards) = self.rewards.as_mut() else {
            return self.main.draw_multiple(count);
        };
        let cards = rewards.draw_multiple(count)?;
        for card in &cards {
            *self.rewards_out.entry(card.clone()).or_default() += 1;
        }
        Ok(cards)
    }

    /// Discard a game card onto the pile it was drawn from.
    pub fn discard(&mut self, card: Card) {
        let owed = self.rewards_out.get_mut(&card);
        match (self.rewards.as_mut(), owed) {
            (Some(rewards), Some(owed)) => {
                *owed -= 1;
                if *owed == 0 {
                    self.rewards_out.remove(&card);
                }
                rewards.discard(card);
            }
            _ => self.main.discard(card),
        }
    }

    /// Reward cards currently held outside the rewards deck.
    #[must_use]
    pub fn rewards_outstanding(&self) -> usize {
        self.rewards_out.values().map(|&count| count as usize).sum()
    }
}
