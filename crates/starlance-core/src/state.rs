//! Game state snapshot — the complete visible state produced each tick.
//!
//! The snapshot is the only outward interface of the simulation: HUD,
//! renderer, and audio all consume these read-only views. Nothing in the
//! core depends on them back.

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::AudioEvent;
use crate::types::{SimTime, SystemId};

/// Complete per-tick state for the presentation layers.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: MissionPhase,
    /// Orthogonal photo-mode flag: free camera active, flight frozen.
    pub photo_mode: bool,
    /// Briefing narration finished or skipped; combat may be confirmed.
    pub narration_complete: bool,
    pub ship: ShipView,
    pub weapons: WeaponView,
    pub shields: ShieldView,
    /// Present only while a mission is live (Active/Victory/Defeat).
    pub combat: Option<CombatView>,
    /// Present only while the hostile entity exists.
    pub hostile: Option<HostileView>,
    pub projectiles: Vec<ProjectileView>,
    pub camera: CameraView,
    pub system: SystemView,
    pub audio_events: Vec<AudioEvent>,
}

/// Player ship transform and propulsion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    pub position: Vec3,
    pub orientation: Quat,
    pub velocity: Vec3,
    pub throttle: f32,
    /// Normalized speed (impulse `[0,1]`, warp above 1).
    pub speed: f32,
    pub is_warp: bool,
}

/// Weapon economy for the HUD.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponView {
    pub phaser_charge: f32,
    pub torpedo_count: u32,
    pub phaser_firing: bool,
}

/// Shield layer state for HUD and shield-bubble rendering.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShieldView {
    pub active: bool,
    pub strength: f32,
    /// Activation feedback pulse, 1 → 0.
    pub pulse: f32,
    pub opacity: f32,
}

/// One participant's combat health record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HealthView {
    pub hull: f32,
    pub max_hull: f32,
    pub shields_up: bool,
    pub shield_strength: f32,
    pub is_destroyed: bool,
    /// Transient hit feedback, 1 → 0.
    pub damage_flash: f32,
}

/// Both participants plus the terminal outcome.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombatView {
    pub player: HealthView,
    pub hostile: HealthView,
    pub game_over: Option<GameOutcome>,
}

/// Hostile ship state for rendering and the HUD behavior label.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostileView {
    /// Opaque stable id the renderer keys its visual by.
    pub id: u64,
    pub position: Vec3,
    pub orientation: Quat,
    pub behavior: HostileBehavior,
    /// Cosmetic breakup roll after destruction.
    pub breakup_spin: f32,
    /// Cosmetic breakup shrink, 1 → 0.
    pub breakup_scale: f32,
}

/// One projectile record for the renderer (visuals are keyed 1:1 by id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: u64,
    pub kind: ProjectileKind,
    pub shooter: Allegiance,
    pub position: Vec3,
    /// Unit travel direction.
    pub direction: Vec3,
}

/// Camera rig output consumed by the renderer verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraView {
    pub mode: CameraMode,
    pub position: Vec3,
    pub look_at: Vec3,
    pub fov_deg: f32,
}

/// Current star system identity for the HUD and star map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SystemView {
    pub id: SystemId,
    pub name: String,
    pub sector: String,
}
