//! Hostile behavior state machine for Starlance.
//!
//! Pure functions that compute behavior transitions, desired facing, and
//! weapon eligibility for the hostile ship. No ECS dependency — operates on
//! plain data; the simulation applies the decisions.

pub mod fsm;

pub use fsm::{evaluate, HostileContext, HostileDecision};
