//! Board entities: players, planets and the hyperspace gate.
//!
//! Ship locations are plain counters. A player's ships are always on a
//! planet, staged on the gate, in the warp, or (rarely) removed from play;
//! `GameState` moves them between those places.

pub mod gate;
pub mod planet;
pub mod player;

pub use gate::{HyperspaceGate, Origins};
pub use planet::Planet;
pub use player::{Player, StationState, TechState};
