//! Core types and definitions for the Starlance simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! components, input model, commands, state snapshots, events, and constants.
//! It has no dependency on any rendering or runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod events;
pub mod input;
pub mod state;
pub mod types;

#[cfg(test)]
mod tests;
