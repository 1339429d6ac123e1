//! Entity spawn factories and teardown helpers.
//!
//! Creates the player ship, the hostile, and the world bodies of the current
//! star system with appropriate component bundles.

use glam::Vec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlance_core::components::*;
use starlance_core::constants::*;

use starlance_universe::SystemEnvironment;

/// Spawn the player ship at the system entry point with full systems.
pub fn spawn_player(world: &mut World) -> Entity {
    world.spawn((
        PlayerShip,
        Position(PLAYER_SPAWN_POSITION),
        Orientation::default(),
        Velocity::default(),
        ThrottleState::default(),
        WeaponState::default(),
        ShieldState::default(),
    ))
}

/// Restore all player transient state to initial values: transform,
/// throttle, weapons, shields. A full reset, not a partial one.
pub fn reset_player(world: &mut World) {
    for (_entity, (_player, pos, orient, vel, throttle, weapons, shields)) in world
        .query_mut::<(
            &PlayerShip,
            &mut Position,
            &mut Orientation,
            &mut Velocity,
            &mut ThrottleState,
            &mut WeaponState,
            &mut ShieldState,
        )>()
    {
        *pos = Position(PLAYER_SPAWN_POSITION);
        *orient = Orientation::default();
        *vel = Velocity::default();
        *throttle = ThrottleState::default();
        *weapons = WeaponState::default();
        *shields = ShieldState::default();
    }
}

/// Spawn the hostile ship offset from the player, idling in orbit around
/// its own spawn point.
pub fn spawn_hostile(world: &mut World, player_pos: Vec3, rng: &mut ChaCha8Rng) -> Entity {
    let spawn_point = player_pos + HOSTILE_SPAWN_OFFSET;
    let evasive_seed: f32 = rng.gen_range(0.0..100.0);

    world.spawn((
        Hostile,
        Position(spawn_point),
        Orientation::default(),
        Velocity::default(),
        HostileState::new(spawn_point, evasive_seed),
        WeaponState {
            torpedo_count: HOSTILE_TORPEDO_CAPACITY,
            ..Default::default()
        },
        ShieldState::default(),
    ))
}

/// Remove the hostile and every in-flight projectile (mission teardown).
pub fn despawn_hostile_and_projectiles(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, _hostile) in world.query_mut::<&Hostile>() {
        despawn_buffer.push(entity);
    }
    for (entity, _projectile) in world.query_mut::<&Projectile>() {
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

/// Spawn solid world bodies (star + planets) from a built environment.
pub fn spawn_world_bodies(world: &mut World, environment: &SystemEnvironment) {
    world.spawn((
        Position(environment.star.position),
        WorldBody {
            radius: environment.star.radius,
            rotation_speed: 0.0,
        },
    ));
    for body in &environment.bodies {
        world.spawn((
            Position(body.position),
            WorldBody {
                radius: body.radius,
                rotation_speed: body.rotation_speed,
            },
        ));
    }
}

/// Remove all world bodies (before rebuilding for another system).
pub fn despawn_world_bodies(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    despawn_buffer.clear();
    for (entity, _body) in world.query_mut::<&WorldBody>() {
        despawn_buffer.push(entity);
    }
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
