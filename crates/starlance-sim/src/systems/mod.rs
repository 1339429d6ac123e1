//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions over `&mut World` (or `&World` for read-only)
//! plus engine-owned state. Exactly one system owns mutation of each state
//! record per tick; the engine calls them in a fixed documented order so
//! every tick is deterministic.

pub mod cleanup;
pub mod collision;
pub mod combat;
pub mod flight;
pub mod hostile;
pub mod shields;
pub mod snapshot;
pub mod weapons;
