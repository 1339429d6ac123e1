//! Fundamental geometric and simulation types.
//!
//! Coordinate convention (ship-local space, right-handed):
//! `FORWARD = -Z`, `UP = +Y`, `RIGHT = +X`, transformed into world space by
//! the orientation quaternion. Every spawn direction, camera offset, and
//! cone test in the workspace goes through these constants so a weapon can
//! never silently fire backward.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Canonical forward axis in ship-local space.
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Canonical up axis in ship-local space.
pub const UP: Vec3 = Vec3::Y;

/// Canonical right axis in ship-local space.
pub const RIGHT: Vec3 = Vec3::X;

/// Identifier of a star system in the universe model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SystemId(pub u32);

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f32,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds. `dt` must already be clamped.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Frame-rate-independent exponential smoothing factor.
///
/// `value += (target - value) * smooth_factor(rate, dt)` converges on the
/// same curve regardless of how `dt` is subdivided, unlike a fixed-fraction
/// lerp.
pub fn smooth_factor(rate: f32, dt: f32) -> f32 {
    1.0 - (-rate * dt).exp()
}

/// Rotate a unit direction toward a desired direction by at most `max_angle`
/// radians, preserving unit length. Returns `current` unchanged when the two
/// are antiparallel (no unique rotation plane).
pub fn steer_toward(current: Vec3, desired: Vec3, max_angle: f32) -> Vec3 {
    let cur = match current.try_normalize() {
        Some(v) => v,
        None => return current,
    };
    let des = match desired.try_normalize() {
        Some(v) => v,
        None => return cur,
    };

    let angle = cur.dot(des).clamp(-1.0, 1.0).acos();
    if angle <= max_angle {
        return des;
    }

    let axis = cur.cross(des);
    if axis.length_squared() < 1e-12 {
        return cur;
    }
    (Quat::from_axis_angle(axis.normalize(), max_angle) * cur).normalize()
}

/// Orientation quaternion that points `FORWARD` along `dir`.
pub fn facing(dir: Vec3) -> Quat {
    let dir = dir.try_normalize().unwrap_or(FORWARD);
    Quat::from_rotation_arc(FORWARD, dir)
}
