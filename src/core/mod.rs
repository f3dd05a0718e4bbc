//! Core engine types: ids, per-seat storage, RNG, configuration, errors,
//! game state and the encounter log.

pub mod config;
pub mod error;
pub mod history;
pub mod player;
pub mod rng;
pub mod state;

pub use config::{GameConfig, Variants};
pub use error::{EngineError, Result};
pub use history::{EncounterRecord, GameLog};
pub use player::{PlanetId, PlayerId, PlayerMap};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, STATION_DEFENSE_BONUS};
