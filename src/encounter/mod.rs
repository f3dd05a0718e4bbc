//! The encounter: phase order, per-encounter state, deals and resolution.
//!
//! Phase drivers live on `Game`; this module holds the encounter's data and
//! the resolution rules.

pub mod deal;
pub mod phase;
pub mod resolution;
pub mod state;

pub use deal::Deal;
pub use phase::Phase;
pub use state::{Bonuses, EncounterState, Outcome, SideMap};
