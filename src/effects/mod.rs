//! Effects: the single path by which powers, artifacts, flares, hazards,
//! tech and stations change a game.
//!
//! ## Key Types
//!
//! - `Effect`: one atomic change
//! - `Effects`: small list of effects returned by a hook or card
//! - `EffectResolver`: applies effects to `GameState`
//!
//! Artifacts, flares and hazards declare the phases in which they fire
//! (`phases()` / `phase()`) and compute their effects from a read-only
//! state, so they plug into the encounter without their own control flow.

pub mod artifact;
pub mod bonus;
pub mod effect;
pub mod flare;
pub mod hazard;
pub mod resolver;

pub use bonus::standing_bonuses;
pub use effect::{BonusSource, Effect, Effects};
pub use flare::flare_for;
pub use resolver::{EffectResolver, ResolveResult};
