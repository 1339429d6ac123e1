//! Weapon system — projectile lifecycle, cooldowns, and the ammo economy.
//!
//! Exclusively owns the active-projectile collection: spawning on fire
//! intents, per-tick aging with hard expiry, bounded homing steer, and
//! flagging for removal. Hit evaluation lives in the combat system, which
//! only reads positions and reports entities to remove.

use glam::{Quat, Vec3};
use hecs::{Entity, World};

use starlance_core::components::*;
use starlance_core::constants::*;
use starlance_core::enums::{Allegiance, ProjectileKind};
use starlance_core::events::AudioEvent;
use starlance_core::types::{steer_toward, FORWARD};

/// Run the weapon system for one tick: consume the player's fire intents,
/// then age, steer, and expire every projectile in flight.
pub fn run(
    world: &mut World,
    dt: f32,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
) {
    let player_pos = ship_position::<PlayerShip>(world);
    let hostile_pos = ship_position::<Hostile>(world);

    fire_player_weapons(world, dt, hostile_pos, audio_events);
    age_and_steer(world, dt, player_pos, hostile_pos, despawn_buffer);
}

/// Current position of the ship carrying marker `M`, if it exists.
fn ship_position<M: hecs::Component>(world: &World) -> Option<Vec3> {
    let mut query = world.query::<(&M, &Position)>();
    query.iter().next().map(|(_, (_, pos))| pos.0)
}

/// Consume the flight model's fire intents.
fn fire_player_weapons(
    world: &mut World,
    dt: f32,
    hostile_pos: Option<Vec3>,
    audio_events: &mut Vec<AudioEvent>,
) {
    // Buffer spawns; hecs cannot spawn while a query borrow is live.
    let mut beam_spawn: Option<(Vec3, Quat)> = None;
    let mut torpedo_spawn: Option<(Vec3, Quat)> = None;

    for (_entity, (_player, pos, orient, weapons)) in world.query_mut::<(
        &PlayerShip,
        &Position,
        &Orientation,
        &mut WeaponState,
    )>() {
        weapons.phaser_cooldown_secs = (weapons.phaser_cooldown_secs - dt).max(0.0);

        // Sustained pulse train: each expired cooldown emits one pulse while
        // the trigger intent holds.
        if weapons.phaser_firing && weapons.phaser_cooldown_secs <= 0.0 {
            beam_spawn = Some((pos.0, orient.0));
            weapons.phaser_cooldown_secs = PHASER_COOLDOWN_SECS;
        }

        // One torpedo per edge-triggered press; the intent already checked
        // ammo, but the magazine is decremented here where the spawn happens.
        if weapons.torpedo_firing {
            weapons.torpedo_firing = false;
            if weapons.torpedo_count > 0 {
                weapons.torpedo_count -= 1;
                torpedo_spawn = Some((pos.0, orient.0));
            }
        }
    }

    if let Some((pos, orient)) = beam_spawn {
        spawn_beam(world, Allegiance::Player, pos, orient);
        audio_events.push(AudioEvent::PhaserFired {
            shooter: Allegiance::Player,
        });
    }
    if let Some((pos, orient)) = torpedo_spawn {
        spawn_torpedo(world, Allegiance::Player, pos, orient, hostile_pos);
        audio_events.push(AudioEvent::TorpedoAway {
            shooter: Allegiance::Player,
        });
    }
}

/// Spawn one beam pulse at the hull-relative muzzle offset, transformed into
/// world space by the shooter's orientation. The velocity is visual; hit
/// testing is a cone from the shooter's forward axis.
pub fn spawn_beam(world: &mut World, shooter: Allegiance, position: Vec3, orientation: Quat) -> Entity {
    let origin = position + orientation * BEAM_MUZZLE_OFFSET;
    let direction = orientation * FORWARD;
    world.spawn((
        Projectile {
            kind: ProjectileKind::Beam,
            shooter,
            age_secs: 0.0,
            max_age_secs: BEAM_MAX_AGE_SECS,
            homing_target: None,
        },
        Position(origin),
        Velocity(direction * BEAM_SPEED),
    ))
}

/// Spawn one torpedo with a world-space velocity along the shooter's forward
/// axis, optionally homing on a target position.
pub fn spawn_torpedo(
    world: &mut World,
    shooter: Allegiance,
    position: Vec3,
    orientation: Quat,
    homing_target: Option<Vec3>,
) -> Entity {
    let origin = position + orientation * TORPEDO_MUZZLE_OFFSET;
    let direction = orientation * FORWARD;
    world.spawn((
        Projectile {
            kind: ProjectileKind::Torpedo,
            shooter,
            age_secs: 0.0,
            max_age_secs: TORPEDO_MAX_AGE_SECS,
            homing_target,
        },
        Position(origin),
        Velocity(direction * TORPEDO_SPEED),
    ))
}

/// Age every projectile, flag expired ones, steer homing torpedoes, and
/// integrate motion.
fn age_and_steer(
    world: &mut World,
    dt: f32,
    player_pos: Option<Vec3>,
    hostile_pos: Option<Vec3>,
    despawn_buffer: &mut Vec<Entity>,
) {
    for (entity, (projectile, pos, vel)) in
        world.query_mut::<(&mut Projectile, &mut Position, &mut Velocity)>()
    {
        projectile.age_secs += dt;
        // Hard expiry, independent of hit detection: the shot goes past and
        // fades.
        if projectile.age_secs >= projectile.max_age_secs {
            despawn_buffer.push(entity);
            continue;
        }

        if projectile.kind == ProjectileKind::Torpedo && projectile.homing_target.is_some() {
            // Track the opposing ship's live position; keep the last known
            // point if the ship is gone.
            let fresh = match projectile.shooter {
                Allegiance::Player => hostile_pos,
                Allegiance::Hostile => player_pos,
            };
            if let Some(target) = fresh {
                projectile.homing_target = Some(target);
            }
            if let Some(target) = projectile.homing_target {
                // Bounded steer preserving speed magnitude — never an
                // instantaneous snap onto the pursuit line.
                let desired = target - pos.0;
                let direction = steer_toward(vel.0, desired, TORPEDO_TURN_RATE * dt);
                vel.0 = direction * TORPEDO_SPEED;
            }
        }

        pos.0 += vel.0 * dt;
    }
}
