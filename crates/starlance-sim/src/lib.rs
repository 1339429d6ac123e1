//! Simulation engine for Starlance.
//!
//! Owns the hecs ECS world, runs the per-tick systems in a fixed documented
//! order, and produces `GameStateSnapshot`s for the presentation layers.
//! Completely headless — no rendering, audio, or UI dependency — so the
//! whole game can run deterministically under test.

pub mod camera;
pub mod combat_state;
pub mod engine;
pub mod systems;
pub mod world_setup;

pub use camera::CameraRig;
pub use combat_state::{CombatState, ShipHealth};
pub use engine::{SimConfig, SimulationEngine};
pub use starlance_core as core;

#[cfg(test)]
mod tests;
