//! Hostile AI system — applies the behavior FSM to the hostile ship.
//!
//! Destruction short-circuits before any behavior logic: a dead hostile only
//! runs the cosmetic breakup animation. Turning uses the same bounded slerp
//! as everything else in the simulation; firing cadence (randomized beam
//! re-arm, fixed torpedo interval) lives here, not in the FSM.

use glam::{Quat, Vec3};
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use starlance_core::components::*;
use starlance_core::constants::*;
use starlance_core::enums::{Allegiance, HostileBehavior};
use starlance_core::events::AudioEvent;

use starlance_enemy_ai::fsm::{evaluate, HostileContext};

use crate::combat_state::CombatState;
use crate::systems::weapons;

/// Run the hostile AI for one tick.
pub fn run(
    world: &mut World,
    combat: &CombatState,
    rng: &mut ChaCha8Rng,
    time_secs: f32,
    dt: f32,
    audio_events: &mut Vec<AudioEvent>,
) {
    let player_pos = {
        let mut query = world.query::<(&PlayerShip, &Position)>();
        match query.iter().next().map(|(_, (_, pos))| pos.0) {
            Some(pos) => pos,
            None => return,
        }
    };

    // Buffer spawns; hecs cannot spawn while a query borrow is live.
    let mut beam_spawn: Option<(Vec3, Quat)> = None;
    let mut torpedo_spawn: Option<(Vec3, Quat)> = None;

    for (_entity, (_hostile, pos, orient, vel, state, weapons_state, shields)) in world
        .query_mut::<(
            &Hostile,
            &mut Position,
            &mut Orientation,
            &mut Velocity,
            &mut HostileState,
            &mut WeaponState,
            &mut ShieldState,
        )>()
    {
        if combat.hostile.is_destroyed {
            tick_breakup(state, vel, weapons_state, dt);
            continue;
        }

        let ctx = HostileContext {
            behavior: state.behavior,
            elapsed_in_behavior_secs: state.behavior_elapsed_secs,
            position: pos.0,
            orientation: orient.0,
            hull_fraction: combat.hostile.hull_fraction(),
            player_position: player_pos,
            orbit_center: state.orbit_center,
            orbit_angle: state.orbit_angle,
            evasive_seed: state.evasive_seed,
            time_secs,
        };
        let decision = evaluate(&ctx);

        if decision.behavior_changed {
            state.behavior = decision.next_behavior;
            state.behavior_elapsed_secs = 0.0;
        } else {
            state.behavior_elapsed_secs += dt;
        }

        if state.behavior == HostileBehavior::Idle {
            state.orbit_angle += HOSTILE_ORBIT_RATE * dt;
        }

        if decision.raise_shields && !shields.active && shields.strength > 0.0 {
            shields.toggle_requested = true;
        }

        // Bounded turn toward the desired facing, then thrust along forward.
        orient.turn_toward(decision.desired_facing, HOSTILE_TURN_RATE * dt);
        vel.0 = orient.forward() * decision.thrust_speed;
        pos.0 += vel.0 * dt;

        // --- Weapons ---
        state.beam_cooldown_secs = (state.beam_cooldown_secs - dt).max(0.0);
        state.beam_burst_secs = (state.beam_burst_secs - dt).max(0.0);
        state.torpedo_cooldown_secs = (state.torpedo_cooldown_secs - dt).max(0.0);

        if decision.beam_eligible && state.beam_cooldown_secs <= 0.0 {
            beam_spawn = Some((pos.0, orient.0));
            state.beam_burst_secs = HOSTILE_BEAM_BURST_SECS;
            // Randomized re-arm, longer while evasive, so the fire pattern
            // never turns metronomic.
            let factor = if state.behavior == HostileBehavior::Evasive {
                HOSTILE_EVASIVE_FIRE_FACTOR
            } else {
                1.0
            };
            state.beam_cooldown_secs =
                HOSTILE_BEAM_COOLDOWN_SECS * factor * rng.gen_range(0.6..1.6);
        }
        // The beam intent holds for the burst window while alignment holds;
        // the combat system turns it into damage-over-time.
        weapons_state.phaser_firing = decision.beam_eligible && state.beam_burst_secs > 0.0;

        if decision.torpedo_eligible
            && state.torpedo_cooldown_secs <= 0.0
            && weapons_state.torpedo_count > 0
        {
            torpedo_spawn = Some((pos.0, orient.0));
            weapons_state.torpedo_count -= 1;
            state.torpedo_cooldown_secs = HOSTILE_TORPEDO_COOLDOWN_SECS;
        }
    }

    if let Some((pos, orient)) = beam_spawn {
        weapons::spawn_beam(world, Allegiance::Hostile, pos, orient);
        audio_events.push(AudioEvent::PhaserFired {
            shooter: Allegiance::Hostile,
        });
    }
    if let Some((pos, orient)) = torpedo_spawn {
        weapons::spawn_torpedo(world, Allegiance::Hostile, pos, orient, Some(player_pos));
        audio_events.push(AudioEvent::TorpedoAway {
            shooter: Allegiance::Hostile,
        });
    }
}

/// Advance only the cosmetic breakup animation (used after victory, when
/// the rest of the AI no longer runs).
pub fn run_breakup(world: &mut World, dt: f32) {
    for (_entity, (_hostile, vel, state, weapons_state)) in world.query_mut::<(
        &Hostile,
        &mut Velocity,
        &mut HostileState,
        &mut WeaponState,
    )>() {
        tick_breakup(state, vel, weapons_state, dt);
    }
}

/// Spin up and shrink the wreck; stop all motion and firing.
fn tick_breakup(state: &mut HostileState, vel: &mut Velocity, weapons: &mut WeaponState, dt: f32) {
    vel.0 = Vec3::ZERO;
    weapons.phaser_firing = false;
    state.breakup_spin += HOSTILE_BREAKUP_SPIN_RATE * dt;
    state.breakup_scale = (state.breakup_scale - dt / HOSTILE_BREAKUP_SHRINK_SECS).max(0.0);
}
