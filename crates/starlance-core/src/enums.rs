//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level mission phase. Strictly sequential; Victory/Defeat return to
/// Free only through an explicit reset command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionPhase {
    /// Free flight — no hostiles, no combat evaluation.
    #[default]
    Free,
    /// Mission briefing narration is playing (flight still allowed).
    Briefing,
    /// Combat is live: hostile AI and hit evaluation run.
    Active,
    /// Hostile destroyed.
    Victory,
    /// Player destroyed.
    Defeat,
}

/// Hostile ship behavior state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostileBehavior {
    /// Slow orbit around the spawn point; does not fire.
    #[default]
    Idle,
    /// Player detected: turn to face, raise shields, hold position.
    Alert,
    /// Close / back off / hold range and fire when aligned.
    Attack,
    /// Low hull: erratic high-speed heading, opportunistic fire only.
    Evasive,
}

/// Which side fired a projectile / owns a ship record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Allegiance {
    Player,
    Hostile,
}

/// Projectile variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    /// Ephemeral phaser pulse: short visual lifetime, hit-tested as a cone
    /// from the shooter's forward axis.
    Beam,
    /// Persistent torpedo: finite velocity, long lifetime, optional homing.
    Torpedo,
}

/// Terminal combat outcome. Set at most once, never reverts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    Victory,
    Defeat,
}

/// Camera rig mode. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CameraMode {
    /// Smoothed follow bound to the ship transform.
    #[default]
    Chase,
    /// Detached free-fly observation (photo mode).
    Free,
}
