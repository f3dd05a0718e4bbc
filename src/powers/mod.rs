//! Powers: independently authored hook sets that rewrite encounters.
//!
//! ## Key Types
//!
//! - `Power`: the hook trait, every method a no-op by default
//! - `PowerRegistry`: name → factory, fixes fold order
//! - `PowerTable`: instances in play and the modifier pipeline
//! - `PowerContext`: read-only game view given to hooks

pub mod catalog;
pub mod pipeline;
pub mod power;
pub mod registry;

pub use pipeline::{Modifier, PowerInstance, PowerTable};
pub use power::{Power, PowerContext, PowerFlags, PowerId, Role, Side, WarpReason};
pub use registry::{PowerFactory, PowerRegistry};
