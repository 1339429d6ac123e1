//! Flight model — integrates the player ship from one frame's input.
//!
//! Owns the player transform, throttle, and the weapon/shield intents.
//! Rotation is composed pitch, then yaw, then roll; the composition order
//! shapes combined maneuvers and must stay fixed for reproducible flight
//! feel. Orientation is renormalized after composition.

use hecs::World;

use starlance_core::components::*;
use starlance_core::constants::*;
use starlance_core::events::AudioEvent;
use starlance_core::input::{InputAction, InputState};
use starlance_core::types::{FORWARD, RIGHT, UP};

/// Run the flight model for one tick.
pub fn run(world: &mut World, input: &mut InputState, dt: f32, audio_events: &mut Vec<AudioEvent>) {
    // Edge-triggered intents are consumed once, before the query loop, so a
    // second reader this tick cannot double-fire them.
    let mut throttle_set: Option<f32> = None;
    for level in 0..=THROTTLE_LEVELS {
        if input.was_just_triggered(InputAction::ThrottleLevel(level)) {
            throttle_set = Some(level as f32 / THROTTLE_LEVELS as f32);
        }
    }
    let warp_toggled = input.was_just_triggered(InputAction::ToggleWarp);
    let shield_toggled = input.was_just_triggered(InputAction::ToggleShields);
    let torpedo_pressed = input.was_just_triggered(InputAction::FireTorpedo);

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
        // --- Rotation: pitch, then yaw, then roll ---
        let mut pitch = 0.0;
        if input.is_held(InputAction::PitchUp) {
            pitch += PITCH_RATE * dt;
        }
        if input.is_held(InputAction::PitchDown) {
            pitch -= PITCH_RATE * dt;
        }
        let mut yaw = 0.0;
        if input.is_held(InputAction::YawLeft) {
            yaw += YAW_RATE * dt;
        }
        if input.is_held(InputAction::YawRight) {
            yaw -= YAW_RATE * dt;
        }
        let mut roll = 0.0;
        if input.is_held(InputAction::RollLeft) {
            roll += ROLL_RATE * dt;
        }
        if input.is_held(InputAction::RollRight) {
            roll -= ROLL_RATE * dt;
        }

        if pitch != 0.0 {
            orient.rotate_local(RIGHT, pitch);
        }
        if yaw != 0.0 {
            orient.rotate_local(UP, yaw);
        }
        if roll != 0.0 {
            orient.rotate_local(FORWARD, roll);
        }

        // --- Throttle: direct-set discrete levels ---
        if let Some(fraction) = throttle_set {
            throttle.throttle = fraction;
        }

        // --- Warp toggle; engaging requires throttle above the epsilon ---
        if warp_toggled {
            if throttle.is_warp {
                throttle.is_warp = false;
                audio_events.push(AudioEvent::WarpDisengaged);
            } else if throttle.throttle > WARP_MIN_THROTTLE {
                throttle.is_warp = true;
                audio_events.push(AudioEvent::WarpEngaged);
            }
        }
        // Auto-disengage is re-checked every frame, not just on toggle.
        if throttle.is_warp && throttle.throttle <= WARP_MIN_THROTTLE {
            throttle.is_warp = false;
            audio_events.push(AudioEvent::WarpDisengaged);
        }

        // --- Speed: bounded-rate approach to the throttle target ---
        let multiplier = if throttle.is_warp { WARP_MULTIPLIER } else { 1.0 };
        let target_speed = throttle.throttle * multiplier;
        let max_step = SPEED_ACCEL_RATE * dt;
        throttle.speed += (target_speed - throttle.speed).clamp(-max_step, max_step);

        // --- Position integration along the orientation's forward axis ---
        let forward = orient.forward();
        vel.0 = forward * throttle.speed * MOVEMENT_SCALE;
        pos.0 += vel.0 * dt;

        // --- Weapon intents ---
        // Zero ammo / low charge suppress silently: a normal gameplay state,
        // not a fault.
        weapons.phaser_firing =
            input.is_held(InputAction::FirePhaser) && weapons.phaser_charge > PHASER_MIN_CHARGE;
        weapons.torpedo_firing = torpedo_pressed && weapons.torpedo_count > 0;

        // Charge economy: regen and drain both apply within the frame;
        // drain dominates while firing.
        let mut charge = weapons.phaser_charge + PHASER_REGEN_RATE * dt;
        if weapons.phaser_firing {
            charge -= PHASER_DRAIN_RATE * dt;
        }
        weapons.phaser_charge = charge.clamp(0.0, PHASER_CHARGE_MAX);

        // --- Shield intent, consumed by the shield system ---
        if shield_toggled {
            shields.toggle_requested = true;
        }
    }
}
