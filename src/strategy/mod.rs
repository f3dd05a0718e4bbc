//! Decision making for seats.
//!
//! The engine owns no decision logic. At every decision point it calls
//! out to the seat's `Strategy` with a read-only `GameView` and validates
//! the answer.

pub mod basic;
pub mod decision;
pub mod view;

pub use basic::BasicStrategy;
pub use decision::{AllianceChoice, AllyReward, Strategy};
pub use view::GameView;
