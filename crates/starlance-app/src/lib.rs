//! Starlance host adapter.
//!
//! Runs the simulation engine on a dedicated fixed-rate thread and exposes
//! it through a command channel plus a shared latest-snapshot slot — the
//! boundary a rendering frontend plugs into. The simulation itself never
//! depends on anything in here.

pub mod game_loop;
pub mod state;

pub use starlance_core as core;
