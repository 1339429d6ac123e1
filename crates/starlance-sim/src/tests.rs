//! Tests for the simulation engine: determinism, flight, weapons, shields,
//! combat resolution, hostile behavior, and the mission phase machine.

use glam::Vec3;

use starlance_core::commands::GameCommand;
use starlance_core::components::*;
use starlance_core::constants::*;
use starlance_core::enums::*;
use starlance_core::events::AudioEvent;
use starlance_core::input::{InputAction, InputState};
use starlance_core::types::SystemId;

use crate::engine::{SimConfig, SimulationEngine};
use crate::systems::combat::apply_damage;

const DT: f32 = 1.0 / 60.0;

fn engine() -> SimulationEngine {
    SimulationEngine::new(SimConfig::default())
}

fn run_ticks(engine: &mut SimulationEngine, input: &mut InputState, ticks: usize) {
    for _ in 0..ticks {
        engine.tick(input, DT);
    }
}

/// Drive Free → Briefing → Active in one tick's worth of commands.
fn start_combat(engine: &mut SimulationEngine, input: &mut InputState) {
    engine.queue_commands([
        GameCommand::StartBriefing,
        GameCommand::SkipBriefing,
        GameCommand::BeginCombat,
    ]);
    engine.tick(input, DT);
    assert_eq!(engine.phase(), MissionPhase::Active);
}

fn player_component<T: hecs::Component + Copy>(engine: &SimulationEngine) -> T {
    let mut query = engine.world().query::<(&PlayerShip, &T)>();
    let (_, (_, value)) = query.iter().next().expect("player ship exists");
    *value
}

fn hostile_component<T: hecs::Component + Copy>(engine: &SimulationEngine) -> T {
    let mut query = engine.world().query::<(&Hostile, &T)>();
    let (_, (_, value)) = query.iter().next().expect("hostile exists");
    *value
}

fn set_player_position(engine: &mut SimulationEngine, position: Vec3) {
    for (_entity, (_player, pos)) in engine
        .world_mut()
        .query_mut::<(&PlayerShip, &mut Position)>()
    {
        pos.0 = position;
    }
}

fn set_hostile_position(engine: &mut SimulationEngine, position: Vec3) {
    for (_entity, (_hostile, pos)) in engine.world_mut().query_mut::<(&Hostile, &mut Position)>() {
        pos.0 = position;
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig { seed: 12345 });
    let mut engine_b = SimulationEngine::new(SimConfig { seed: 12345 });
    let mut input_a = InputState::new();
    let mut input_b = InputState::new();

    start_combat(&mut engine_a, &mut input_a);
    start_combat(&mut engine_b, &mut input_b);

    for inp in [&mut input_a, &mut input_b] {
        inp.press(InputAction::ThrottleLevel(9));
        inp.press(InputAction::FirePhaser);
    }

    for tick in 0..300 {
        if tick == 30 {
            input_a.press(InputAction::FireTorpedo);
            input_b.press(InputAction::FireTorpedo);
        }
        let snap_a = engine_a.tick(&mut input_a, DT);
        let snap_b = engine_b.tick(&mut input_b, DT);

        let json_a = serde_json::to_string(&snap_a).unwrap();
        let json_b = serde_json::to_string(&snap_b).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed at tick {tick}");
    }
}

// ---- Flight model ----

#[test]
fn test_orientation_stays_normalized_under_arbitrary_input() {
    let mut engine = engine();
    let mut input = InputState::new();
    input.press(InputAction::PitchUp);
    input.press(InputAction::YawLeft);
    input.press(InputAction::RollRight);

    for tick in 0..1200 {
        if tick == 400 {
            input.release(InputAction::YawLeft);
            input.press(InputAction::YawRight);
        }
        engine.tick(&mut input, DT);
        let orient: Orientation = player_component(&engine);
        assert!(
            (orient.0.length() - 1.0).abs() < 1e-4,
            "Orientation drifted at tick {tick}: {}",
            orient.0.length()
        );
    }
}

#[test]
fn test_throttle_level_direct_set_and_motion() {
    let mut engine = engine();
    let mut input = InputState::new();
    let start: Position = player_component(&engine);

    input.press(InputAction::ThrottleLevel(9));
    run_ticks(&mut engine, &mut input, 120);

    let throttle: ThrottleState = player_component(&engine);
    assert!((throttle.throttle - 1.0).abs() < 1e-5);
    assert!((throttle.speed - 1.0).abs() < 1e-3, "Speed should settle at impulse max");

    let pos: Position = player_component(&engine);
    // Default orientation faces -Z; the ship must have moved that way.
    assert!(pos.0.z < start.0.z - 10.0, "Ship should advance along forward");
}

#[test]
fn test_speed_bounded_and_rate_limited() {
    let mut engine = engine();
    let mut input = InputState::new();
    input.press(InputAction::ThrottleLevel(9));
    engine.tick(&mut input, DT);
    input.release(InputAction::ThrottleLevel(9));
    input.press(InputAction::ToggleWarp);

    let mut previous = player_component::<ThrottleState>(&engine).speed;
    for _ in 0..1000 {
        engine.tick(&mut input, DT);
        let throttle: ThrottleState = player_component(&engine);
        let step = (throttle.speed - previous).abs();
        assert!(
            step <= SPEED_ACCEL_RATE * DT + 1e-4,
            "Speed changed faster than the accel bound: {step}"
        );
        assert!(
            throttle.speed <= WARP_MULTIPLIER + 1e-4,
            "Speed exceeded the warp ceiling"
        );
        previous = throttle.speed;
    }
    assert!((previous - WARP_MULTIPLIER).abs() < 1e-2, "Should settle at full warp");
}

#[test]
fn test_warp_engage_requires_throttle() {
    let mut engine = engine();
    let mut input = InputState::new();

    // Throttle is zero; the toggle must be refused.
    input.press(InputAction::ToggleWarp);
    let snap = engine.tick(&mut input, DT);
    assert!(!snap.ship.is_warp);
    assert!(
        !snap
            .audio_events
            .iter()
            .any(|e| matches!(e, AudioEvent::WarpEngaged)),
        "No engage event without throttle"
    );
}

/// Scenario: warp at mid throttle, then throttle to zero — warp drops on its
/// own once throttle decays below the epsilon, without any toggle action.
#[test]
fn test_warp_auto_disengage() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::ThrottleLevel(5));
    engine.tick(&mut input, DT);
    input.release(InputAction::ThrottleLevel(5));

    input.press(InputAction::ToggleWarp);
    let snap = engine.tick(&mut input, DT);
    assert!(snap.ship.is_warp, "Warp should engage at mid throttle");
    input.release(InputAction::ToggleWarp);

    input.press(InputAction::ThrottleLevel(0));
    let mut disengaged = false;
    for _ in 0..10 {
        let snap = engine.tick(&mut input, DT);
        if !snap.ship.is_warp {
            disengaged = true;
            break;
        }
    }
    assert!(disengaged, "Warp must auto-disengage at zero throttle");
    let throttle: ThrottleState = player_component(&engine);
    assert!(throttle.throttle <= WARP_MIN_THROTTLE);
}

/// A frame hitch must not cause a huge simulation jump: the tick clamps
/// delta time before any integration sees it.
#[test]
fn test_delta_time_spike_clamped() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::ThrottleLevel(9));
    run_ticks(&mut engine, &mut input, 60);

    let before: Position = player_component(&engine);
    let speed = player_component::<ThrottleState>(&engine).speed;
    engine.tick(&mut input, 3.0); // stalled tab resumes
    let after: Position = player_component(&engine);

    let moved = after.0.distance(before.0);
    assert!(
        moved <= speed * MOVEMENT_SCALE * MAX_DT + 1e-3,
        "A 3s hitch integrated {moved} units; must clamp to MAX_DT"
    );
}

#[test]
fn test_collision_pushes_player_out_of_bodies() {
    let mut engine = engine();
    let mut input = InputState::new();

    // Drop the ship inside the home star (radius 60 at the origin).
    set_player_position(&mut engine, Vec3::new(5.0, 0.0, 0.0));
    engine.tick(&mut input, DT);

    let pos: Position = player_component(&engine);
    assert!(
        pos.0.length() >= 60.0 + BODY_COLLISION_MARGIN - 1e-3,
        "Ship should be projected out to the body surface margin, at {}",
        pos.0.length()
    );
}

// ---- Weapons ----

#[test]
fn test_phaser_pulse_train_while_held() {
    let mut engine = engine();
    let mut input = InputState::new();
    input.press(InputAction::FirePhaser);

    let snap = {
        let mut last = engine.tick(&mut input, DT);
        for _ in 0..20 {
            last = engine.tick(&mut input, DT);
        }
        last
    };

    let beams = snap
        .projectiles
        .iter()
        .filter(|p| p.kind == ProjectileKind::Beam)
        .count();
    assert!(
        beams >= 2,
        "A held trigger should produce a pulse train, got {beams} live beams"
    );

    let weapons: WeaponState = player_component(&engine);
    assert!(
        weapons.phaser_charge < PHASER_CHARGE_MAX,
        "Firing must drain charge faster than regen"
    );
}

#[test]
fn test_phaser_suppressed_below_charge_floor() {
    let mut engine = engine();
    let mut input = InputState::new();

    for (_entity, (_player, weapons)) in engine
        .world_mut()
        .query_mut::<(&PlayerShip, &mut WeaponState)>()
    {
        weapons.phaser_charge = 0.0;
    }

    input.press(InputAction::FirePhaser);
    let snap = engine.tick(&mut input, DT);
    assert!(!snap.weapons.phaser_firing);
    assert!(snap.projectiles.is_empty(), "No beam below the charge floor");
}

#[test]
fn test_ammo_monotonic_and_zero_ammo_suppressed() {
    let mut engine = engine();
    let mut input = InputState::new();

    for (_entity, (_player, weapons)) in engine
        .world_mut()
        .query_mut::<(&PlayerShip, &mut WeaponState)>()
    {
        weapons.torpedo_count = 1;
    }

    input.press(InputAction::FireTorpedo);
    let snap = engine.tick(&mut input, DT);
    input.release(InputAction::FireTorpedo);
    assert_eq!(snap.weapons.torpedo_count, 0);
    assert_eq!(
        snap.projectiles
            .iter()
            .filter(|p| p.kind == ProjectileKind::Torpedo)
            .count(),
        1
    );

    // Firing empty: count unchanged, nothing spawned, no error surfaced.
    input.press(InputAction::FireTorpedo);
    let snap = engine.tick(&mut input, DT);
    assert_eq!(snap.weapons.torpedo_count, 0);
    assert_eq!(
        snap.projectiles
            .iter()
            .filter(|p| p.kind == ProjectileKind::Torpedo)
            .count(),
        1,
        "The empty press must not spawn"
    );
}

#[test]
fn test_projectile_ages_and_expires_on_schedule() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::FireTorpedo);
    engine.tick(&mut input, DT);
    input.release(InputAction::FireTorpedo);

    let mut previous_age = 0.0;
    let mut expired_at = None;
    for tick in 0..400 {
        engine.tick(&mut input, DT);
        let mut query = engine.world().query::<&Projectile>();
        match query.iter().next() {
            Some((_, projectile)) => {
                assert!(
                    projectile.age_secs > previous_age,
                    "Age must strictly increase"
                );
                previous_age = projectile.age_secs;
            }
            None => {
                expired_at = Some(tick);
                break;
            }
        }
    }

    let expired_at = expired_at.expect("Torpedo should expire");
    let expected_ticks = (TORPEDO_MAX_AGE_SECS / DT) as i32;
    assert!(
        (expired_at as i32 - expected_ticks).abs() <= 2,
        "Expiry should land on the max-age tick, got {expired_at}"
    );
}

#[test]
fn test_projectile_ids_stable_across_ticks() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::FireTorpedo);
    let first = engine.tick(&mut input, DT);
    input.release(InputAction::FireTorpedo);
    let id = first.projectiles[0].id;

    let later = engine.tick(&mut input, DT);
    assert_eq!(later.projectiles[0].id, id, "Renderer keys visuals by id");
}

// ---- Shields ----

#[test]
fn test_shield_toggle_pulse_and_passive_drain() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::ToggleShields);
    let snap = engine.tick(&mut input, DT);
    input.release(InputAction::ToggleShields);

    assert!(snap.shields.active);
    assert!(snap.shields.pulse > 0.9, "Activation resets the pulse");
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::ShieldsRaised { .. })));

    let before = snap.shields.strength;
    run_ticks(&mut engine, &mut input, 60);
    let snap = engine.tick(&mut input, DT);
    let expected = before - SHIELD_DRAIN_RATE * 61.0 * DT;
    assert!(
        (snap.shields.strength - expected).abs() < 0.1,
        "Active shields drain at the constant rate"
    );
    assert!(snap.shields.pulse < 0.1, "Pulse decays linearly to zero");
}

#[test]
fn test_shields_force_off_at_zero_strength() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::ToggleShields);
    engine.tick(&mut input, DT);
    input.release(InputAction::ToggleShields);

    for (_entity, (_player, shields)) in engine
        .world_mut()
        .query_mut::<(&PlayerShip, &mut ShieldState)>()
    {
        shields.strength = SHIELD_DRAIN_RATE * DT * 0.5;
    }

    let snap = engine.tick(&mut input, DT);
    assert!(!snap.shields.active, "Depletion must force-deactivate");
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::ShieldsDropped { .. })));

    // Raising again at zero strength is refused.
    input.press(InputAction::ToggleShields);
    let snap = engine.tick(&mut input, DT);
    assert!(!snap.shields.active);
}

// ---- Mission phases ----

#[test]
fn test_begin_combat_requires_narration() {
    let mut engine = engine();
    let mut input = InputState::new();

    engine.queue_command(GameCommand::StartBriefing);
    engine.queue_command(GameCommand::BeginCombat);
    engine.tick(&mut input, DT);
    assert_eq!(
        engine.phase(),
        MissionPhase::Briefing,
        "Combat cannot start before the narration completes"
    );

    engine.queue_command(GameCommand::NarrationComplete);
    engine.queue_command(GameCommand::BeginCombat);
    let snap = engine.tick(&mut input, DT);
    assert_eq!(engine.phase(), MissionPhase::Active);
    assert!(snap.combat.is_some());
    assert!(snap.hostile.is_some());
}

#[test]
fn test_flight_runs_during_briefing() {
    let mut engine = engine();
    let mut input = InputState::new();

    engine.queue_command(GameCommand::StartBriefing);
    input.press(InputAction::ThrottleLevel(9));
    let start: Position = player_component(&engine);
    run_ticks(&mut engine, &mut input, 120);

    let pos: Position = player_component(&engine);
    assert!(
        pos.0.distance(start.0) > 10.0,
        "The player can fly around during the briefing"
    );
}

#[test]
fn test_victory_on_hostile_destroyed() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    apply_damage(&mut engine.combat_mut().unwrap().hostile, 1e9);
    let snap = engine.tick(&mut input, DT);

    assert_eq!(engine.phase(), MissionPhase::Victory);
    assert_eq!(
        snap.combat.as_ref().unwrap().game_over,
        Some(GameOutcome::Victory)
    );
    assert!(snap
        .audio_events
        .iter()
        .any(|e| matches!(e, AudioEvent::MissionOver { outcome: GameOutcome::Victory })));
}

#[test]
fn test_outcome_never_reverts_after_victory() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    apply_damage(&mut engine.combat_mut().unwrap().hostile, 1e9);
    engine.tick(&mut input, DT);
    assert_eq!(engine.phase(), MissionPhase::Victory);

    // A later player destruction must not flip the settled outcome.
    apply_damage(&mut engine.combat_mut().unwrap().player, 1e9);
    let snap = engine.tick(&mut input, DT);
    assert_eq!(engine.phase(), MissionPhase::Victory);
    assert_eq!(
        snap.combat.as_ref().unwrap().game_over,
        Some(GameOutcome::Victory)
    );
}

#[test]
fn test_defeat_priority_on_simultaneous_destruction() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    let combat = engine.combat_mut().unwrap();
    apply_damage(&mut combat.hostile, 1e9);
    apply_damage(&mut combat.player, 1e9);
    engine.tick(&mut input, DT);

    assert_eq!(
        engine.phase(),
        MissionPhase::Defeat,
        "Defeat takes priority when both ships die in the same tick"
    );
}

/// Scenario: defeat, then reset — phase back to free, player state restored
/// to initial defaults, hostile removed.
#[test]
fn test_mission_reset_restores_everything() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    // Burn some state first.
    input.press(InputAction::ThrottleLevel(9));
    input.press(InputAction::FireTorpedo);
    run_ticks(&mut engine, &mut input, 60);
    input.release(InputAction::FireTorpedo);

    apply_damage(&mut engine.combat_mut().unwrap().player, 1e9);
    engine.tick(&mut input, DT);
    assert_eq!(engine.phase(), MissionPhase::Defeat);

    engine.queue_command(GameCommand::ResetMission);
    let snap = engine.tick(&mut input, DT);

    assert_eq!(engine.phase(), MissionPhase::Free);
    assert!(snap.combat.is_none());
    assert!(snap.hostile.is_none(), "Hostile instance must be torn down");
    assert!(snap.projectiles.is_empty(), "In-flight shots are cleared");

    let pos: Position = player_component(&engine);
    assert!(pos.0.distance(PLAYER_SPAWN_POSITION) < 1.0);
    let weapons: WeaponState = player_component(&engine);
    assert_eq!(weapons.torpedo_count, TORPEDO_CAPACITY);
    let throttle: ThrottleState = player_component(&engine);
    assert_eq!(throttle.throttle, 0.0);
    assert!(!throttle.is_warp);
}

// ---- Hostile behavior ----

/// Scenario: idle hostile, player placed in detection range → alert after
/// one tick; after the alert timer with no further changes → attack.
#[test]
fn test_hostile_idle_alert_attack_progression() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    // Rewind the hostile to idle, far from the player.
    let player_pos = player_component::<Position>(&engine).0;
    let far = player_pos + Vec3::new(0.0, 0.0, -(HOSTILE_DETECTION_RANGE + 100.0));
    set_hostile_position(&mut engine, far);
    for (_entity, (_hostile, state)) in engine
        .world_mut()
        .query_mut::<(&Hostile, &mut HostileState)>()
    {
        state.behavior = HostileBehavior::Idle;
        state.behavior_elapsed_secs = 0.0;
        state.orbit_center = far;
    }

    engine.tick(&mut input, DT);
    assert_eq!(
        hostile_component::<HostileState>(&engine).behavior,
        HostileBehavior::Idle,
        "Out of detection range the hostile keeps orbiting"
    );

    // Bring it within detection range: one tick to alert.
    set_hostile_position(
        &mut engine,
        player_pos + Vec3::new(0.0, 0.0, -(HOSTILE_DETECTION_RANGE - 20.0)),
    );
    engine.tick(&mut input, DT);
    assert_eq!(
        hostile_component::<HostileState>(&engine).behavior,
        HostileBehavior::Alert
    );

    // Alert raises shields and holds for the timer, then commits.
    let alert_ticks = (HOSTILE_ALERT_SECS / DT) as usize + 2;
    run_ticks(&mut engine, &mut input, alert_ticks);
    assert_eq!(
        hostile_component::<HostileState>(&engine).behavior,
        HostileBehavior::Attack
    );
    let shields: ShieldState = hostile_component(&engine);
    assert!(shields.active, "Alert raises the hostile's shields");
}

#[test]
fn test_hostile_goes_evasive_on_low_hull() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    // Force attack posture near the player.
    let player_pos = player_component::<Position>(&engine).0;
    set_hostile_position(&mut engine, player_pos + Vec3::new(0.0, 0.0, -30.0));
    for (_entity, (_hostile, state)) in engine
        .world_mut()
        .query_mut::<(&Hostile, &mut HostileState)>()
    {
        state.behavior = HostileBehavior::Attack;
    }
    engine.combat_mut().unwrap().hostile.hull =
        HULL_MAX * (HOSTILE_EVASIVE_HULL_FRACTION - 0.05);

    engine.tick(&mut input, DT);
    assert_eq!(
        hostile_component::<HostileState>(&engine).behavior,
        HostileBehavior::Evasive
    );
}

#[test]
fn test_hostile_fires_when_aligned_in_attack() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    // Park the hostile in attack posture dead ahead of the player, facing
    // back at them (identity faces -Z, so put the player at -Z of it).
    let player_pos = player_component::<Position>(&engine).0;
    set_hostile_position(&mut engine, player_pos + Vec3::new(0.0, 0.0, 30.0));
    for (_entity, (_hostile, state)) in engine
        .world_mut()
        .query_mut::<(&Hostile, &mut HostileState)>()
    {
        state.behavior = HostileBehavior::Attack;
    }

    let mut hostile_fired = false;
    for _ in 0..240 {
        let snap = engine.tick(&mut input, DT);
        if snap.audio_events.iter().any(|e| {
            matches!(
                e,
                AudioEvent::PhaserFired {
                    shooter: Allegiance::Hostile
                }
            )
        }) {
            hostile_fired = true;
            break;
        }
    }
    assert!(hostile_fired, "An aligned attacking hostile fires its beam");
}

/// A destroyed hostile short-circuits all behavior: no motion, no fire,
/// only the cosmetic breakup animation.
#[test]
fn test_hostile_breakup_after_destruction() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    apply_damage(&mut engine.combat_mut().unwrap().hostile, 1e9);
    engine.tick(&mut input, DT);
    assert_eq!(engine.phase(), MissionPhase::Victory);

    let first = engine.tick(&mut input, DT);
    let hostile_a = first.hostile.clone().unwrap();
    run_ticks(&mut engine, &mut input, 30);
    let later = engine.tick(&mut input, DT);
    let hostile_b = later.hostile.clone().unwrap();

    assert!(hostile_b.breakup_spin > hostile_a.breakup_spin, "Wreck spins");
    assert!(hostile_b.breakup_scale < hostile_a.breakup_scale, "Wreck shrinks");
    assert_eq!(
        hostile_a.position, hostile_b.position,
        "A dead hostile stops moving"
    );
    assert!(
        later.projectiles.iter().all(|p| p.shooter != Allegiance::Hostile),
        "A dead hostile stops firing"
    );
}

// ---- Combat integration ----

/// One homing torpedo against a bare-hulled hostile takes exactly one
/// 18-point quantum off.
#[test]
fn test_torpedo_hit_applies_one_quantum() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    // Park the hostile dead ahead with no shield pool.
    let player_pos = player_component::<Position>(&engine).0;
    set_hostile_position(&mut engine, player_pos + Vec3::new(0.0, 0.0, -20.0));
    for (_entity, (_hostile, shields)) in engine
        .world_mut()
        .query_mut::<(&Hostile, &mut ShieldState)>()
    {
        shields.strength = 0.0;
        shields.active = false;
    }

    input.press(InputAction::FireTorpedo);
    engine.tick(&mut input, DT);
    input.release(InputAction::FireTorpedo);

    let mut hull_after = HULL_MAX;
    for _ in 0..120 {
        let snap = engine.tick(&mut input, DT);
        let combat = snap.combat.as_ref().unwrap();
        if combat.hostile.hull < HULL_MAX {
            hull_after = combat.hostile.hull;
            break;
        }
    }
    assert!(
        (hull_after - (HULL_MAX - TORPEDO_DAMAGE)).abs() < 1e-3,
        "Exactly one torpedo quantum should land, hull at {hull_after}"
    );
}

#[test]
fn test_player_beam_wears_hostile_down() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    let player_pos = player_component::<Position>(&engine).0;
    set_hostile_position(&mut engine, player_pos + Vec3::new(0.0, 0.0, -25.0));
    for (_entity, (_hostile, shields)) in engine
        .world_mut()
        .query_mut::<(&Hostile, &mut ShieldState)>()
    {
        shields.strength = 0.0;
    }

    input.press(InputAction::FirePhaser);
    let before = engine.tick(&mut input, DT).combat.unwrap().hostile.hull;
    run_ticks(&mut engine, &mut input, 60);
    let after = engine.tick(&mut input, DT).combat.unwrap().hostile.hull;

    let lost = before - after;
    assert!(lost > 0.0, "Continuous beam damage should accumulate");
    assert!(
        lost <= BEAM_DPS * 62.0 * DT + 1e-2,
        "Beam damage is DPS-bounded, lost {lost}"
    );
}

#[test]
fn test_damage_flash_decays_between_hits() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    apply_damage(&mut engine.combat_mut().unwrap().hostile, 5.0);
    let snap = engine.tick(&mut input, DT);
    let first = snap.combat.as_ref().unwrap().hostile.damage_flash;
    assert!(first > 0.9);

    run_ticks(&mut engine, &mut input, 30);
    let snap = engine.tick(&mut input, DT);
    let later = snap.combat.as_ref().unwrap().hostile.damage_flash;
    assert!(later < first, "Flash decays linearly every tick");
}

// ---- Photo mode ----

#[test]
fn test_photo_mode_freezes_flight() {
    let mut engine = engine();
    let mut input = InputState::new();

    input.press(InputAction::TogglePhotoMode);
    engine.tick(&mut input, DT);
    input.release(InputAction::TogglePhotoMode);
    assert!(engine.photo_mode());

    let before: Position = player_component(&engine);
    input.press(InputAction::ThrottleLevel(9));
    input.press(InputAction::PitchUp);
    run_ticks(&mut engine, &mut input, 60);
    let after: Position = player_component(&engine);
    assert_eq!(before.0, after.0, "The ship is frozen in photo mode");

    // Handing back to chase mode resumes flight. Re-press the throttle so
    // the edge fires again.
    input.release(InputAction::ThrottleLevel(9));
    input.release(InputAction::PitchUp);
    input.press(InputAction::TogglePhotoMode);
    engine.tick(&mut input, DT);
    input.release(InputAction::TogglePhotoMode);
    assert!(!engine.photo_mode());
    input.press(InputAction::ThrottleLevel(9));
    run_ticks(&mut engine, &mut input, 60);
    let moved: Position = player_component(&engine);
    assert!(moved.0.distance(after.0) > 1.0);
}

// ---- Travel ----

#[test]
fn test_travel_follows_connection_graph() {
    let mut engine = engine();
    let mut input = InputState::new();
    let home = engine.current_system();

    // Not connected to home: silently ignored.
    engine.queue_command(GameCommand::TravelTo {
        system: SystemId(3),
    });
    engine.tick(&mut input, DT);
    assert_eq!(engine.current_system(), home);

    // Unknown id: silently ignored, never a crash.
    engine.queue_command(GameCommand::TravelTo {
        system: SystemId(9999),
    });
    engine.tick(&mut input, DT);
    assert_eq!(engine.current_system(), home);

    // A direct neighbor works and is discovered on arrival.
    engine.queue_command(GameCommand::TravelTo {
        system: SystemId(1),
    });
    let snap = engine.tick(&mut input, DT);
    assert_eq!(engine.current_system(), SystemId(1));
    assert!(engine.galaxy().get(SystemId(1)).unwrap().discovered);
    assert_eq!(snap.system.name, "Cygnus Reach");

    let pos: Position = player_component(&engine);
    assert!(pos.0.distance(PLAYER_SPAWN_POSITION) < 1.0);
}

#[test]
fn test_travel_blocked_outside_free_phase() {
    let mut engine = engine();
    let mut input = InputState::new();
    start_combat(&mut engine, &mut input);

    engine.queue_command(GameCommand::TravelTo {
        system: SystemId(1),
    });
    engine.tick(&mut input, DT);
    assert_eq!(engine.current_system(), SystemId(0), "No travel mid-mission");
}

