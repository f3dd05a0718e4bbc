//! The game orchestrator and its builder.

pub mod builder;
pub mod engine;
pub mod outcome;

pub use builder::GameBuilder;
pub use engine::Game;
pub use outcome::{EndReason, GameResult};
