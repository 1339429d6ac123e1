//! Hostile behavior finite state machine.
//!
//! idle → alert → attack ⇄ evasive. Destruction is handled by the caller
//! before this runs; it never appears here. Each evaluation returns the next
//! behavior plus movement and weapon-eligibility intents; the simulation
//! turns toward the desired facing at a bounded rate and owns cooldowns and
//! randomized re-arm.

use glam::{Quat, Vec3};

use starlance_core::constants::*;
use starlance_core::enums::HostileBehavior;
use starlance_core::types::{facing, FORWARD, UP};

/// Input to the hostile FSM for a single evaluation.
pub struct HostileContext {
    pub behavior: HostileBehavior,
    /// Seconds spent in the current behavior.
    pub elapsed_in_behavior_secs: f32,
    pub position: Vec3,
    pub orientation: Quat,
    /// Hull integrity fraction, `[0, 1]`.
    pub hull_fraction: f32,
    pub player_position: Vec3,
    /// Idle orbit center (the spawn point).
    pub orbit_center: Vec3,
    /// Idle orbit phase angle, advanced by the simulation while idle.
    pub orbit_angle: f32,
    /// Per-instance offset for the evasive jink oscillation.
    pub evasive_seed: f32,
    /// Absolute simulation time (seconds) seeding the jink.
    pub time_secs: f32,
}

/// Output of one FSM evaluation.
pub struct HostileDecision {
    pub next_behavior: HostileBehavior,
    pub behavior_changed: bool,
    /// Orientation to turn toward (bounded slerp applied by the caller).
    pub desired_facing: Quat,
    /// Signed forward thrust (world units/s; negative backs off).
    pub thrust_speed: f32,
    /// Alert and combat states keep shields raised.
    pub raise_shields: bool,
    /// Alignment and range permit a beam shot (cooldown applied by caller).
    pub beam_eligible: bool,
    /// Tight alignment and range permit a torpedo launch.
    pub torpedo_eligible: bool,
}

/// Evaluate the FSM for one hostile.
pub fn evaluate(ctx: &HostileContext) -> HostileDecision {
    match ctx.behavior {
        HostileBehavior::Idle => evaluate_idle(ctx),
        HostileBehavior::Alert => evaluate_alert(ctx),
        HostileBehavior::Attack => evaluate_attack(ctx),
        HostileBehavior::Evasive => evaluate_evasive(ctx),
    }
}

fn range_to_player(ctx: &HostileContext) -> f32 {
    ctx.position.distance(ctx.player_position)
}

/// Forward-axis dot against the direction to the player.
fn player_alignment(ctx: &HostileContext) -> f32 {
    let to_player = ctx.player_position - ctx.position;
    match to_player.try_normalize() {
        Some(dir) => (ctx.orientation * FORWARD).dot(dir),
        None => 1.0,
    }
}

fn evaluate_idle(ctx: &HostileContext) -> HostileDecision {
    if range_to_player(ctx) <= HOSTILE_DETECTION_RANGE {
        return HostileDecision {
            next_behavior: HostileBehavior::Alert,
            behavior_changed: true,
            desired_facing: facing(ctx.player_position - ctx.position),
            thrust_speed: 0.0,
            raise_shields: false,
            beam_eligible: false,
            torpedo_eligible: false,
        };
    }

    // Chase a point slightly ahead on the orbit circle; the bounded turn
    // bends the path into the orbit.
    let lead_angle = ctx.orbit_angle + 0.35;
    let orbit_target = ctx.orbit_center
        + Vec3::new(
            HOSTILE_ORBIT_RADIUS * lead_angle.cos(),
            0.0,
            HOSTILE_ORBIT_RADIUS * lead_angle.sin(),
        );

    HostileDecision {
        next_behavior: HostileBehavior::Idle,
        behavior_changed: false,
        desired_facing: facing(orbit_target - ctx.position),
        thrust_speed: HOSTILE_ORBIT_RADIUS * HOSTILE_ORBIT_RATE,
        raise_shields: false,
        beam_eligible: false,
        torpedo_eligible: false,
    }
}

fn evaluate_alert(ctx: &HostileContext) -> HostileDecision {
    let next_behavior = if ctx.elapsed_in_behavior_secs >= HOSTILE_ALERT_SECS {
        HostileBehavior::Attack
    } else {
        HostileBehavior::Alert
    };

    // Turn to face, raise shields, hold position, hold fire.
    HostileDecision {
        behavior_changed: next_behavior != ctx.behavior,
        next_behavior,
        desired_facing: facing(ctx.player_position - ctx.position),
        thrust_speed: 0.0,
        raise_shields: true,
        beam_eligible: false,
        torpedo_eligible: false,
    }
}

fn evaluate_attack(ctx: &HostileContext) -> HostileDecision {
    if ctx.hull_fraction < HOSTILE_EVASIVE_HULL_FRACTION {
        return HostileDecision {
            next_behavior: HostileBehavior::Evasive,
            behavior_changed: true,
            desired_facing: evasive_facing(ctx),
            thrust_speed: HOSTILE_EVASIVE_SPEED,
            raise_shields: true,
            beam_eligible: false,
            torpedo_eligible: false,
        };
    }

    let range = range_to_player(ctx);
    let thrust_speed = if range > HOSTILE_ATTACK_RANGE {
        HOSTILE_ATTACK_SPEED
    } else if range < HOSTILE_MIN_RANGE {
        -HOSTILE_ATTACK_SPEED * 0.6
    } else {
        0.0
    };

    let alignment = player_alignment(ctx);

    HostileDecision {
        next_behavior: HostileBehavior::Attack,
        behavior_changed: false,
        desired_facing: facing(ctx.player_position - ctx.position),
        thrust_speed,
        raise_shields: true,
        beam_eligible: alignment >= HOSTILE_BEAM_ALIGN_DOT && range <= BEAM_MAX_RANGE,
        torpedo_eligible: alignment >= HOSTILE_TORPEDO_ALIGN_DOT
            && range <= HOSTILE_TORPEDO_RANGE,
    }
}

fn evaluate_evasive(ctx: &HostileContext) -> HostileDecision {
    let range = range_to_player(ctx);
    let recovered =
        ctx.hull_fraction >= HOSTILE_EVASIVE_HULL_FRACTION + HOSTILE_RECOVER_MARGIN;
    let player_gone = range > HOSTILE_DETECTION_RANGE;

    if recovered || player_gone {
        // Recovered near the player resumes the attack; recovered with the
        // player out of detection settles back into the idle orbit.
        let next_behavior = if range <= HOSTILE_DETECTION_RANGE {
            HostileBehavior::Attack
        } else {
            HostileBehavior::Idle
        };
        return HostileDecision {
            next_behavior,
            behavior_changed: true,
            desired_facing: facing(ctx.player_position - ctx.position),
            thrust_speed: 0.0,
            raise_shields: next_behavior == HostileBehavior::Attack,
            beam_eligible: false,
            torpedo_eligible: false,
        };
    }

    // Opportunistic beam fire while jinking; the caller doubles the cooldown.
    let alignment = player_alignment(ctx);

    HostileDecision {
        next_behavior: HostileBehavior::Evasive,
        behavior_changed: false,
        desired_facing: evasive_facing(ctx),
        thrust_speed: HOSTILE_EVASIVE_SPEED,
        raise_shields: true,
        beam_eligible: alignment >= HOSTILE_BEAM_ALIGN_DOT && range <= BEAM_MAX_RANGE,
        torpedo_eligible: false,
    }
}

/// Erratic evasive heading: away from the player with a time-seeded lateral
/// oscillation, so the path weaves deterministically without snapping.
fn evasive_facing(ctx: &HostileContext) -> Quat {
    let away = ctx.position - ctx.player_position;
    let base = away.try_normalize().unwrap_or(Vec3::Z);
    let jink = ((ctx.time_secs + ctx.evasive_seed) * HOSTILE_EVASIVE_JINK_RATE).sin()
        * HOSTILE_EVASIVE_JINK_ANGLE;
    facing(Quat::from_axis_angle(UP, jink) * base)
}
