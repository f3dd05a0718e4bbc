//! # rust-cosmic
//!
//! Encounter resolution engine for a multiplayer negotiation-and-combat
//! card game.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: one seed fixes the whole game. Every deck and every
//!    strategy draws from its own fork of the game's `GameRng`.
//!
//! 2. **N-Player First**: every API takes the seat count from the state.
//!    Two-player tables are a variant, not a special case.
//!
//! 3. **Powers Never Mutate**: powers return values or `Effect`s. The engine
//!    applies them, so the fold order is the only ordering that matters.
//!
//! ## Modules
//!
//! - `core`: ids, configuration, errors, RNG, `GameState`, encounter log
//! - `cards`: card types, generic decks, deck catalogs
//! - `board`: players, planets, the hyperspace gate
//! - `powers`: the `Power` trait, registry, modifier pipeline, built-ins
//! - `effects`: effects, their resolver, artifact/flare/hazard timing
//! - `encounter`: phases, encounter state, resolution, deals
//! - `strategy`: decision interface and a basic strategy
//! - `game`: the `Game` orchestrator and `GameBuilder`

pub mod board;
pub mod cards;
pub mod core;
pub mod effects;
pub mod encounter;
pub mod game;
pub mod powers;
pub mod strategy;

// Re-export commonly used types
pub use crate::core::{
    EngineError, GameConfig, GameRng, GameRngState, GameState, PlanetId, PlayerId, PlayerMap, Result, Variants,
};

pub use crate::cards::{Card, Deck, Decks};

pub use crate::powers::{Power, PowerContext, PowerFlags, PowerId, PowerRegistry, PowerTable, Role, Side};

pub use crate::effects::{Effect, EffectResolver, Effects};

pub use crate::encounter::{Deal, EncounterState, Outcome, Phase};

pub use crate::strategy::{BasicStrategy, GameView, Strategy};

pub use crate::game::{EndReason, Game, GameBuilder, GameResult};
