//! Snapshot system: queries the ECS world and builds a complete
//! `GameStateSnapshot`.
//!
//! This system is read-only — it never modifies the world.

use hecs::World;

use starlance_core::components::*;
use starlance_core::enums::MissionPhase;
use starlance_core::events::AudioEvent;
use starlance_core::state::*;
use starlance_core::types::SimTime;

use starlance_universe::StarSystem;

use crate::camera::CameraRig;
use crate::combat_state::{CombatState, ShipHealth};

/// Build a complete snapshot from the current simulation state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: MissionPhase,
    photo_mode: bool,
    narration_complete: bool,
    camera: &CameraRig,
    combat: Option<&CombatState>,
    system: Option<&StarSystem>,
    audio_events: Vec<AudioEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        photo_mode,
        narration_complete,
        ship: build_ship(world),
        weapons: build_weapons(world),
        shields: build_shields(world),
        combat: combat.map(build_combat),
        hostile: build_hostile(world),
        projectiles: build_projectiles(world),
        camera: camera.view(),
        system: system
            .map(|s| SystemView {
                id: s.id,
                name: s.name.clone(),
                sector: s.sector.clone(),
            })
            .unwrap_or_default(),
        audio_events,
    }
}

fn build_ship(world: &World) -> ShipView {
    world
        .query::<(&PlayerShip, &Position, &Orientation, &Velocity, &ThrottleState)>()
        .iter()
        .next()
        .map(|(_, (_, pos, orient, vel, throttle))| ShipView {
            position: pos.0,
            orientation: orient.0,
            velocity: vel.0,
            throttle: throttle.throttle,
            speed: throttle.speed,
            is_warp: throttle.is_warp,
        })
        .unwrap_or_default()
}

fn build_weapons(world: &World) -> WeaponView {
    world
        .query::<(&PlayerShip, &WeaponState)>()
        .iter()
        .next()
        .map(|(_, (_, weapons))| WeaponView {
            phaser_charge: weapons.phaser_charge,
            torpedo_count: weapons.torpedo_count,
            phaser_firing: weapons.phaser_firing,
        })
        .unwrap_or_default()
}

fn build_shields(world: &World) -> ShieldView {
    world
        .query::<(&PlayerShip, &ShieldState)>()
        .iter()
        .next()
        .map(|(_, (_, shields))| ShieldView {
            active: shields.active,
            strength: shields.strength,
            pulse: (shields.pulse_secs / starlance_core::constants::SHIELD_PULSE_SECS)
                .clamp(0.0, 1.0),
            opacity: shields.opacity,
        })
        .unwrap_or_default()
}

fn build_health(record: &ShipHealth) -> HealthView {
    HealthView {
        hull: record.hull,
        max_hull: record.max_hull,
        shields_up: record.shields_up,
        shield_strength: record.shield_strength,
        is_destroyed: record.is_destroyed,
        damage_flash: record.damage_flash,
    }
}

fn build_combat(combat: &CombatState) -> CombatView {
    CombatView {
        player: build_health(&combat.player),
        hostile: build_health(&combat.hostile),
        game_over: combat.game_over,
    }
}

fn build_hostile(world: &World) -> Option<HostileView> {
    world
        .query::<(&Hostile, &Position, &Orientation, &HostileState)>()
        .iter()
        .next()
        .map(|(entity, (_, pos, orient, state))| HostileView {
            id: entity.to_bits().get(),
            position: pos.0,
            orientation: orient.0,
            behavior: state.behavior,
            breakup_spin: state.breakup_spin,
            breakup_scale: state.breakup_scale,
        })
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<(&Projectile, &Position, &Velocity)>()
        .iter()
        .map(|(entity, (projectile, pos, vel))| ProjectileView {
            id: entity.to_bits().get(),
            kind: projectile.kind,
            shooter: projectile.shooter,
            position: pos.0,
            direction: vel.0.normalize_or_zero(),
        })
        .collect();

    projectiles.sort_by_key(|p| p.id);
    projectiles
}
