//! Combat and damage model — shield absorption, hull damage, hit testing,
//! and the win/lose poll.
//!
//! This system is the sole writer of the two `ShipHealth` records. Shield
//! fields are mirrored in from the `ShieldState` components before hit
//! evaluation and written back after it, so absorption drain lands in the
//! authoritative pool.

use glam::Vec3;
use hecs::{Entity, World};

use starlance_core::components::*;
use starlance_core::constants::*;
use starlance_core::enums::{Allegiance, GameOutcome, ProjectileKind};
use starlance_core::events::AudioEvent;

use crate::combat_state::{CombatState, ShipHealth};

/// What one `apply_damage` call did.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DamageOutcome {
    pub absorbed: f32,
    pub hull_damage: f32,
    /// True only on the tick the target's destruction flag flipped.
    pub destroyed_now: bool,
}

/// Apply raw damage to a health record.
///
/// Destroyed targets absorb no further state change, and non-positive damage
/// changes no field. With shields up, `absorbed = raw * SHIELD_ABSORPTION`
/// is taken off the top and the shield pool drains at half the absorbed
/// amount; shields drop mid-hit if the pool depletes. Hull floors at zero
/// and destruction is monotonic.
pub fn apply_damage(target: &mut ShipHealth, raw_damage: f32) -> DamageOutcome {
    if target.is_destroyed || raw_damage <= 0.0 {
        return DamageOutcome::default();
    }

    let mut absorbed = 0.0;
    if target.shields_up && target.shield_strength > 0.0 {
        absorbed = raw_damage * SHIELD_ABSORPTION;
        target.shield_strength -= absorbed * SHIELD_HIT_DRAIN_FACTOR;
        if target.shield_strength <= 0.0 {
            target.shield_strength = 0.0;
            target.shields_up = false;
        }
    }

    let hull_damage = raw_damage - absorbed;
    target.hull = (target.hull - hull_damage).max(0.0);

    let destroyed_now = target.hull <= 0.0;
    if destroyed_now {
        target.is_destroyed = true;
    }

    target.damage_flash = 1.0;

    DamageOutcome {
        absorbed,
        hull_damage,
        destroyed_now,
    }
}

/// Minimum forward-axis dot for a beam hit at a given distance.
///
/// The cone loosens at close range: very close is very forgiving, a
/// near-miss at long range is forgiven less.
pub fn required_alignment(distance: f32) -> f32 {
    BEAM_CONE_BASE_DOT.max(1.0 - BEAM_CONE_FORGIVENESS / distance.max(1.0))
}

/// Beam cone test: target in range AND within the distance-dependent angular
/// tolerance of the shooter's forward axis.
pub fn beam_cone_hit(shooter_pos: Vec3, shooter_forward: Vec3, target_pos: Vec3) -> bool {
    let to_target = target_pos - shooter_pos;
    let distance = to_target.length();
    if distance > BEAM_MAX_RANGE {
        return false;
    }
    let direction = match to_target.try_normalize() {
        Some(d) => d,
        // Point blank on top of each other — always a hit.
        None => return true,
    };
    shooter_forward.dot(direction) >= required_alignment(distance)
}

/// Run combat hit evaluation for one tick: beam damage-over-time while the
/// intent and alignment hold, torpedo proximity quanta, and the shield
/// write-back.
pub fn run(
    world: &mut World,
    combat: &mut CombatState,
    dt: f32,
    despawn_buffer: &mut Vec<Entity>,
    audio_events: &mut Vec<AudioEvent>,
) {
    mirror_shields_in(world, combat);

    let player = ship_snapshot::<PlayerShip>(world);
    let hostile = ship_snapshot::<Hostile>(world);

    // Beam fire is continuous: DPS * dt while the shooter's intent holds and
    // the cone test passes.
    if let (Some(p), Some(h)) = (&player, &hostile) {
        if p.firing && beam_cone_hit(p.position, p.forward, h.position) {
            let outcome = apply_damage(&mut combat.hostile, BEAM_DPS * dt);
            if outcome.destroyed_now {
                audio_events.push(AudioEvent::ShipDestroyed {
                    ship: Allegiance::Hostile,
                });
            }
        }
        if h.firing && beam_cone_hit(h.position, h.forward, p.position) {
            let outcome = apply_damage(&mut combat.player, HOSTILE_BEAM_DPS * dt);
            if outcome.destroyed_now {
                audio_events.push(AudioEvent::ShipDestroyed {
                    ship: Allegiance::Player,
                });
            }
        }
    }

    // Torpedo proximity: one fixed quantum per hit, flagged for immediate
    // removal (the renderer holds a matching visual per record).
    let mut torpedo_hits: Vec<(Entity, Allegiance)> = Vec::new();
    {
        let mut query = world.query::<(&Projectile, &Position)>();
        for (entity, (projectile, pos)) in query.iter() {
            if projectile.kind != ProjectileKind::Torpedo
                || projectile.age_secs >= projectile.max_age_secs
            {
                continue;
            }
            let target = match projectile.shooter {
                Allegiance::Player => hostile.as_ref(),
                Allegiance::Hostile => player.as_ref(),
            };
            if let Some(target) = target {
                if pos.0.distance(target.position) <= TORPEDO_HIT_RADIUS {
                    torpedo_hits.push((entity, projectile.shooter));
                }
            }
        }
    }
    for (entity, shooter) in torpedo_hits {
        let (record, ship) = match shooter {
            Allegiance::Player => (&mut combat.hostile, Allegiance::Hostile),
            Allegiance::Hostile => (&mut combat.player, Allegiance::Player),
        };
        let outcome = apply_damage(record, TORPEDO_DAMAGE);
        if outcome.absorbed > 0.0 {
            audio_events.push(AudioEvent::ShieldHit { ship });
        }
        if outcome.hull_damage > 0.0 {
            audio_events.push(AudioEvent::HullHit { ship });
        }
        if outcome.destroyed_now {
            audio_events.push(AudioEvent::ShipDestroyed { ship });
        }
        despawn_buffer.push(entity);
    }

    mirror_shields_out(world, combat, audio_events);
}

/// Decay both damage-flash timers. Separate from hit evaluation so the decay
/// runs even in ticks without damage events.
pub fn tick_timers(combat: &mut CombatState, dt: f32) {
    for record in [&mut combat.player, &mut combat.hostile] {
        record.damage_flash = (record.damage_flash - dt / DAMAGE_FLASH_SECS).max(0.0);
    }
}

/// Dedicated per-frame win/lose poll. Sets `game_over` the first time either
/// destruction flag flips and returns it on that tick only.
///
/// Defeat takes priority on simultaneous destruction: the player's ship
/// blowing up ends the mission regardless of what else happened this frame.
pub fn check_outcome(combat: &mut CombatState) -> Option<GameOutcome> {
    if combat.game_over.is_some() {
        return None;
    }
    let outcome = if combat.player.is_destroyed {
        Some(GameOutcome::Defeat)
    } else if combat.hostile.is_destroyed {
        Some(GameOutcome::Victory)
    } else {
        None
    };
    combat.game_over = outcome;
    outcome
}

struct ShipShot {
    position: Vec3,
    forward: Vec3,
    firing: bool,
}

fn ship_snapshot<M: hecs::Component>(world: &World) -> Option<ShipShot> {
    let mut query = world.query::<(&M, &Position, &Orientation, &WeaponState)>();
    query
        .iter()
        .next()
        .map(|(_, (_, pos, orient, weapons))| ShipShot {
            position: pos.0,
            forward: orient.forward(),
            firing: weapons.phaser_firing,
        })
}

fn mirror_shields_in(world: &mut World, combat: &mut CombatState) {
    for (_entity, (shields, player)) in
        world.query_mut::<(&ShieldState, Option<&PlayerShip>)>()
    {
        let record = if player.is_some() {
            &mut combat.player
        } else {
            &mut combat.hostile
        };
        record.shields_up = shields.active;
        record.shield_strength = shields.strength;
    }
}

fn mirror_shields_out(
    world: &mut World,
    combat: &mut CombatState,
    audio_events: &mut Vec<AudioEvent>,
) {
    for (_entity, (shields, player)) in
        world.query_mut::<(&mut ShieldState, Option<&PlayerShip>)>()
    {
        let (record, ship) = if player.is_some() {
            (&combat.player, Allegiance::Player)
        } else {
            (&combat.hostile, Allegiance::Hostile)
        };
        // Absorption can deplete the pool mid-hit; report the forced drop.
        if shields.active && !record.shields_up {
            shields.pulse_secs = SHIELD_PULSE_SECS;
            audio_events.push(AudioEvent::ShieldsDropped { ship });
        }
        shields.active = record.shields_up;
        shields.strength = record.shield_strength;
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    fn bare_hull() -> ShipHealth {
        ShipHealth::new(HULL_MAX)
    }

    fn shielded(strength: f32) -> ShipHealth {
        let mut health = ShipHealth::new(HULL_MAX);
        health.shields_up = true;
        health.shield_strength = strength;
        health
    }

    /// Three 18-point torpedo hits leave the hull at 46; a fourth at 28.
    #[test]
    fn test_basic_combat_round() {
        let mut enemy = bare_hull();
        for _ in 0..3 {
            apply_damage(&mut enemy, 18.0);
        }
        assert!((enemy.hull - 46.0).abs() < 1e-4);
        assert!(!enemy.is_destroyed);

        apply_damage(&mut enemy, 18.0);
        assert!((enemy.hull - 28.0).abs() < 1e-4);
        assert!(!enemy.is_destroyed);
    }

    /// Shields at 100, 10 raw: absorbed 7, shield pool to 96.5, hull -3.
    #[test]
    fn test_shield_absorption_math() {
        let mut target = shielded(100.0);
        let outcome = apply_damage(&mut target, 10.0);

        assert_relative_eq!(outcome.absorbed, 7.0, epsilon = 1e-5);
        assert_relative_eq!(target.shield_strength, 96.5, epsilon = 1e-4);
        assert_relative_eq!(target.hull, 97.0, epsilon = 1e-4);
        assert!(target.shields_up);
    }

    #[test]
    fn test_shields_drop_when_depleted_mid_hit() {
        let mut target = shielded(2.0);
        apply_damage(&mut target, 10.0);
        assert!(!target.shields_up, "Depleted shields must auto-drop");
        assert_eq!(target.shield_strength, 0.0);
    }

    #[test]
    fn test_depleted_shields_take_full_damage() {
        let mut target = shielded(0.0);
        apply_damage(&mut target, 10.0);
        assert!((target.hull - 90.0).abs() < 1e-4, "No absorption at zero pool");
    }

    /// `apply_damage(target, 0)` changes no field, including the flash.
    #[test]
    fn test_zero_damage_is_noop() {
        let mut target = shielded(50.0);
        let before = target;
        let outcome = apply_damage(&mut target, 0.0);
        assert_eq!(outcome, DamageOutcome::default());
        assert_eq!(target.hull, before.hull);
        assert_eq!(target.shield_strength, before.shield_strength);
        assert_eq!(target.damage_flash, before.damage_flash);
    }

    /// A destroyed target absorbs nothing, for all damage values.
    #[test]
    fn test_destroyed_target_absorbs_nothing() {
        let mut target = bare_hull();
        apply_damage(&mut target, 1e9);
        assert!(target.is_destroyed);
        assert_eq!(target.hull, 0.0);

        let before = target;
        for raw in [-5.0, 0.0, 18.0, 1e12] {
            let outcome = apply_damage(&mut target, raw);
            assert_eq!(outcome, DamageOutcome::default());
            assert_eq!(target.hull, before.hull);
            assert_eq!(target.damage_flash, before.damage_flash);
        }
    }

    #[test]
    fn test_hull_floors_at_zero_and_destruction_is_monotonic() {
        let mut target = bare_hull();
        let outcome = apply_damage(&mut target, 500.0);
        assert_eq!(target.hull, 0.0);
        assert!(outcome.destroyed_now);
        assert!(target.is_destroyed);
    }

    #[test]
    fn test_damage_resets_flash_and_tick_decays_linearly() {
        let mut combat = CombatState::new();
        apply_damage(&mut combat.hostile, 5.0);
        assert_eq!(combat.hostile.damage_flash, 1.0);

        tick_timers(&mut combat, 0.25);
        assert!((combat.hostile.damage_flash - 0.75).abs() < 1e-5);
        tick_timers(&mut combat, 10.0);
        assert_eq!(combat.hostile.damage_flash, 0.0);
    }

    // ---- Win/lose ----

    #[test]
    fn test_outcome_set_once_and_never_reverts() {
        let mut combat = CombatState::new();
        assert_eq!(check_outcome(&mut combat), None);

        apply_damage(&mut combat.hostile, 1e9);
        assert_eq!(check_outcome(&mut combat), Some(GameOutcome::Victory));
        assert_eq!(combat.game_over, Some(GameOutcome::Victory));

        // Later player destruction must not override the settled outcome.
        apply_damage(&mut combat.player, 1e9);
        assert_eq!(check_outcome(&mut combat), None);
        assert_eq!(combat.game_over, Some(GameOutcome::Victory));
    }

    /// Simultaneous destruction resolves to defeat.
    #[test]
    fn test_defeat_takes_priority_on_simultaneous_kill() {
        let mut combat = CombatState::new();
        apply_damage(&mut combat.player, 1e9);
        apply_damage(&mut combat.hostile, 1e9);
        assert_eq!(check_outcome(&mut combat), Some(GameOutcome::Defeat));
    }

    // ---- Beam cone ----

    /// The required alignment relaxes monotonically as range closes.
    #[test]
    fn test_cone_forgiveness_tightens_with_range() {
        let mut previous = required_alignment(1.0);
        for distance in [5.0, 10.0, 20.0, 40.0, BEAM_MAX_RANGE] {
            let required = required_alignment(distance);
            assert!(
                required >= previous,
                "Tolerance must only tighten with distance"
            );
            previous = required;
        }
        // Point blank falls back to the base tolerance floor.
        assert_eq!(required_alignment(0.5), BEAM_CONE_BASE_DOT);
    }

    #[test]
    fn test_cone_hit_requires_range_and_alignment() {
        let forward = Vec3::NEG_Z;
        // Dead ahead, in range.
        assert!(beam_cone_hit(Vec3::ZERO, forward, Vec3::new(0.0, 0.0, -30.0)));
        // Dead ahead but out of range.
        assert!(!beam_cone_hit(
            Vec3::ZERO,
            forward,
            Vec3::new(0.0, 0.0, -(BEAM_MAX_RANGE + 1.0))
        ));
        // In range but far off axis.
        assert!(!beam_cone_hit(Vec3::ZERO, forward, Vec3::new(30.0, 0.0, -30.0)));
    }

    /// The same angular offset that misses at long range hits up close.
    #[test]
    fn test_cone_more_forgiving_up_close() {
        let forward = Vec3::NEG_Z;
        let off_axis_angle = 0.5_f32;

        let near = 5.0;
        let near_target = Vec3::new(
            near * off_axis_angle.sin(),
            0.0,
            -near * off_axis_angle.cos(),
        );
        assert!(beam_cone_hit(Vec3::ZERO, forward, near_target));

        let far = 58.0;
        let far_target = Vec3::new(far * off_axis_angle.sin(), 0.0, -far * off_axis_angle.cos());
        assert!(!beam_cone_hit(Vec3::ZERO, forward, far_target));
    }
}
