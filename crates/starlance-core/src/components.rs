//! ECS components for hecs entities.
//!
//! Components are plain data structs with no game logic.
//! Logic lives in systems, not components.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::{Allegiance, HostileBehavior, ProjectileKind};
use crate::types::{FORWARD, RIGHT, UP};

/// World-space position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

/// World-space velocity (units/s).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Velocity(pub Vec3);

/// Unit-quaternion orientation. Re-normalized after every composition so
/// repeated incremental rotations cannot drift off the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Orientation(pub Quat);

impl Default for Orientation {
    fn default() -> Self {
        Self(Quat::IDENTITY)
    }
}

impl Orientation {
    /// World-space forward axis.
    pub fn forward(&self) -> Vec3 {
        self.0 * FORWARD
    }

    /// World-space up axis.
    pub fn up(&self) -> Vec3 {
        self.0 * UP
    }

    /// World-space right axis.
    pub fn right(&self) -> Vec3 {
        self.0 * RIGHT
    }

    /// Compose an incremental rotation about a ship-local axis, then
    /// renormalize.
    pub fn rotate_local(&mut self, axis: Vec3, angle: f32) {
        self.0 = (self.0 * Quat::from_axis_angle(axis, angle)).normalize();
    }

    /// Rotate toward a target orientation by at most `max_angle` radians.
    /// The bounded slerp gives every ship the same can't-snap-turn feel.
    pub fn turn_toward(&mut self, target: Quat, max_angle: f32) {
        let angle = self.0.angle_between(target);
        if angle < 1e-5 {
            self.0 = target.normalize();
            return;
        }
        let t = (max_angle / angle).min(1.0);
        self.0 = self.0.slerp(target, t).normalize();
    }
}

/// Marks the player's ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PlayerShip;

/// Marks the hostile ship.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Hostile;

/// Throttle and propulsion state.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ThrottleState {
    /// Commanded throttle fraction, `[0, 1]`.
    pub throttle: f32,
    /// Actual normalized speed. Impulse range `[0, 1]`; warp range
    /// `(1, WARP_MULTIPLIER]`. Rate-limited toward its target, never snapped.
    pub speed: f32,
    /// Whether warp is engaged. Auto-disengages when throttle decays below
    /// `WARP_MIN_THROTTLE`.
    pub is_warp: bool,
}

impl Default for ThrottleState {
    fn default() -> Self {
        Self {
            throttle: 0.0,
            speed: 0.0,
            is_warp: false,
        }
    }
}

impl ThrottleState {
    /// Normalized warp ramp: 0 at impulse speeds, 1 at full warp. Drives the
    /// camera offset lerp.
    pub fn warp_ramp(&self) -> f32 {
        ((self.speed - 1.0) / (WARP_MULTIPLIER - 1.0)).clamp(0.0, 1.0)
    }
}

/// Weapon trigger state and ammunition economy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WeaponState {
    /// Phaser charge, `[0, 100]`. Regenerates over time, drains while firing.
    pub phaser_charge: f32,
    /// Remaining torpedoes. Firing at zero is silently suppressed.
    pub torpedo_count: u32,
    /// Per-frame intent: beam trigger held and charge above the floor.
    pub phaser_firing: bool,
    /// Per-frame intent: torpedo edge-triggered this tick with ammo left.
    pub torpedo_firing: bool,
    /// Remaining beam re-fire cooldown (seconds).
    pub phaser_cooldown_secs: f32,
}

impl Default for WeaponState {
    fn default() -> Self {
        Self {
            phaser_charge: PHASER_CHARGE_MAX,
            torpedo_count: TORPEDO_CAPACITY,
            phaser_firing: false,
            torpedo_firing: false,
            phaser_cooldown_secs: 0.0,
        }
    }
}

/// Toggleable defensive shield layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShieldState {
    /// Whether shields are raised. Forced off when strength hits zero.
    pub active: bool,
    /// Strength pool, `[0, 100]`. Drains slowly while active.
    pub strength: f32,
    /// Activation feedback pulse; resets on any toggle, decays linearly.
    /// Gates nothing.
    pub pulse_secs: f32,
    /// Visual opacity smoothed toward the active flag on its own constant.
    pub opacity: f32,
    /// Edge-triggered toggle intent raised by the controlling system
    /// (flight model or hostile AI); consumed by the shield system.
    pub toggle_requested: bool,
}

impl Default for ShieldState {
    fn default() -> Self {
        Self {
            active: false,
            strength: SHIELD_STRENGTH_MAX,
            pulse_secs: 0.0,
            opacity: 0.0,
            toggle_requested: false,
        }
    }
}

/// An in-flight projectile record. The simulation owns these; the renderer
/// keeps a visual resource keyed 1:1 by the entity id, so removal must be
/// explicit and immediate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub kind: ProjectileKind,
    pub shooter: Allegiance,
    /// Strictly increasing age (seconds).
    pub age_secs: f32,
    /// Hard expiry independent of hit detection.
    pub max_age_secs: f32,
    /// Torpedoes only: current steer-toward target position.
    pub homing_target: Option<Vec3>,
}

/// Hostile behavior scratch state — per-behavior working data plus weapon
/// cooldowns and the cosmetic breakup animation after destruction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HostileState {
    pub behavior: HostileBehavior,
    /// Seconds spent in the current behavior.
    pub behavior_elapsed_secs: f32,
    /// Idle orbit center (the spawn point).
    pub orbit_center: Vec3,
    /// Idle orbit phase angle (radians).
    pub orbit_angle: f32,
    /// Seed offsetting the evasive jink oscillation per instance.
    pub evasive_seed: f32,
    /// Remaining beam cooldown (seconds). Re-armed to a randomized interval.
    pub beam_cooldown_secs: f32,
    /// Remaining beam burst window (seconds); the beam intent holds while
    /// this is positive.
    pub beam_burst_secs: f32,
    /// Remaining torpedo cooldown (seconds). Fixed interval.
    pub torpedo_cooldown_secs: f32,
    /// Accumulated breakup roll after destruction (cosmetic).
    pub breakup_spin: f32,
    /// Breakup shrink factor, 1 → 0 (cosmetic).
    pub breakup_scale: f32,
}

impl HostileState {
    pub fn new(spawn_point: Vec3, evasive_seed: f32) -> Self {
        Self {
            behavior: HostileBehavior::Idle,
            behavior_elapsed_secs: 0.0,
            orbit_center: spawn_point,
            orbit_angle: 0.0,
            evasive_seed,
            beam_cooldown_secs: 0.0,
            beam_burst_secs: 0.0,
            torpedo_cooldown_secs: 0.0,
            breakup_spin: 0.0,
            breakup_scale: 1.0,
        }
    }
}

/// A solid world body (planet or star) the ship can collide with. Bodies
/// have fixed world coordinates; only the backdrop tracks the camera.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct WorldBody {
    /// Collision radius (world units).
    pub radius: f32,
    /// Self-rotation rate (rad/s), presentational.
    pub rotation_speed: f32,
}
