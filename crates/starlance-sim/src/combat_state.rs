//! Combat data model — health records for the two participants.
//!
//! Stored on `SimulationEngine`, NOT as ECS entities: there are exactly two
//! records and the combat system is their only writer each tick. Shield
//! fields are mirrored in from `ShieldState` before hit evaluation and
//! written back after it.

use starlance_core::constants::HULL_MAX;
use starlance_core::enums::GameOutcome;

/// One participant's destructible state.
#[derive(Debug, Clone, Copy)]
pub struct ShipHealth {
    /// Hull integrity, `[0, max_hull]`. Floors at zero.
    pub hull: f32,
    pub max_hull: f32,
    /// Mirrored from the ship's `ShieldState` each tick.
    pub shields_up: bool,
    /// Mirrored shield pool; drained by absorption during hits.
    pub shield_strength: f32,
    /// Monotonic: once true, stays true.
    pub is_destroyed: bool,
    /// Hit feedback timer, reset to 1.0 on damage, linear decay to 0.
    pub damage_flash: f32,
}

impl ShipHealth {
    pub fn new(max_hull: f32) -> Self {
        Self {
            hull: max_hull,
            max_hull,
            shields_up: false,
            shield_strength: 0.0,
            is_destroyed: false,
            damage_flash: 0.0,
        }
    }

    /// Hull integrity fraction, `[0, 1]`.
    pub fn hull_fraction(&self) -> f32 {
        if self.max_hull > 0.0 {
            self.hull / self.max_hull
        } else {
            0.0
        }
    }
}

impl Default for ShipHealth {
    fn default() -> Self {
        Self::new(HULL_MAX)
    }
}

/// Exactly two health records plus the terminal outcome.
#[derive(Debug, Clone, Copy, Default)]
pub struct CombatState {
    pub player: ShipHealth,
    pub hostile: ShipHealth,
    /// Set at most once; never reverts without a full mission reset.
    pub game_over: Option<GameOutcome>,
}

impl CombatState {
    pub fn new() -> Self {
        Self::default()
    }
}
