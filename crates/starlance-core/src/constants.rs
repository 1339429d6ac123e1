//! Simulation constants and tuning parameters.

use glam::Vec3;

/// Nominal simulation tick rate (Hz) for the host loop.
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the nominal rate.
pub const NOMINAL_DT: f32 = 1.0 / TICK_RATE as f32;

/// Maximum delta time fed to any integration step (seconds).
/// A stalled tab must not cause a huge simulation jump on resume.
pub const MAX_DT: f32 = 0.05;

// --- Flight model ---

/// Pitch rate (rad/s) while the pitch key is held.
pub const PITCH_RATE: f32 = 1.1;

/// Yaw rate (rad/s).
pub const YAW_RATE: f32 = 0.9;

/// Roll rate (rad/s).
pub const ROLL_RATE: f32 = 1.6;

/// Number of discrete throttle levels above zero (levels 0..=9).
pub const THROTTLE_LEVELS: u8 = 9;

/// Speed multiplier applied to the throttle target while warping.
pub const WARP_MULTIPLIER: f32 = 8.0;

/// Throttle epsilon below which warp auto-disengages (checked every frame).
pub const WARP_MIN_THROTTLE: f32 = 0.05;

/// Bounded acceleration rate for the normalized speed scalar (per second).
pub const SPEED_ACCEL_RATE: f32 = 2.5;

/// World units traveled per second at normalized speed 1.0.
pub const MOVEMENT_SCALE: f32 = 40.0;

// --- Phasers ---

/// Maximum phaser charge.
pub const PHASER_CHARGE_MAX: f32 = 100.0;

/// Charge regeneration per second (applies even while firing; drain dominates).
pub const PHASER_REGEN_RATE: f32 = 15.0;

/// Charge drained per second while the beam is firing.
pub const PHASER_DRAIN_RATE: f32 = 25.0;

/// Firing is forbidden below this charge floor.
pub const PHASER_MIN_CHARGE: f32 = 5.0;

/// Re-fire cooldown between beam pulses (seconds). Short enough that a held
/// trigger produces a sustained pulse train.
pub const PHASER_COOLDOWN_SECS: f32 = 0.12;

/// Beam pulse visual lifetime (seconds).
pub const BEAM_MAX_AGE_SECS: f32 = 0.5;

/// Beam pulse travel speed (world units/s). Visual only; hit testing is a
/// cone from the shooter's forward axis.
pub const BEAM_SPEED: f32 = 80.0;

/// Continuous beam damage per second while aligned and in range.
pub const BEAM_DPS: f32 = 22.0;

/// Maximum beam hit range (world units).
pub const BEAM_MAX_RANGE: f32 = 60.0;

/// Base angular tolerance for the beam cone test (minimum forward-axis dot).
pub const BEAM_CONE_BASE_DOT: f32 = 0.86;

/// Close-range forgiveness constant: required dot is
/// `max(BEAM_CONE_BASE_DOT, 1 - BEAM_CONE_FORGIVENESS / max(distance, 1))`,
/// so the cone loosens as the target gets closer.
pub const BEAM_CONE_FORGIVENESS: f32 = 6.0;

/// Beam muzzle offset in ship-local space (below and ahead of the nose).
pub const BEAM_MUZZLE_OFFSET: Vec3 = Vec3::new(0.0, -0.4, -2.2);

// --- Torpedoes ---

/// Torpedo flight speed (world units/s).
pub const TORPEDO_SPEED: f32 = 55.0;

/// Torpedo lifetime before hard expiry (seconds).
pub const TORPEDO_MAX_AGE_SECS: f32 = 5.0;

/// Damage quantum applied by one torpedo hit.
pub const TORPEDO_DAMAGE: f32 = 18.0;

/// Proximity radius for a torpedo hit (world units).
pub const TORPEDO_HIT_RADIUS: f32 = 2.5;

/// Maximum homing steer rate (rad/s); speed magnitude is preserved.
pub const TORPEDO_TURN_RATE: f32 = 1.2;

/// Player torpedo magazine size.
pub const TORPEDO_CAPACITY: u32 = 15;

/// Torpedo muzzle offset in ship-local space.
pub const TORPEDO_MUZZLE_OFFSET: Vec3 = Vec3::new(0.0, -0.8, -2.6);

// --- Shields ---

/// Maximum shield strength.
pub const SHIELD_STRENGTH_MAX: f32 = 100.0;

/// Passive strength drain per second while shields are active.
pub const SHIELD_DRAIN_RATE: f32 = 2.0;

/// Activation pulse duration (seconds). Feedback only; gates nothing.
pub const SHIELD_PULSE_SECS: f32 = 0.8;

/// Exponential smoothing rate for shield opacity toward the active flag.
pub const SHIELD_OPACITY_RATE: f32 = 6.0;

/// Fraction of raw damage absorbed while shields hold.
pub const SHIELD_ABSORPTION: f32 = 0.7;

/// Shield strength lost per point of absorbed damage (shields drain at half
/// the absorbed amount, not 1:1).
pub const SHIELD_HIT_DRAIN_FACTOR: f32 = 0.5;

// --- Hull / combat ---

/// Hull integrity pool for both participants.
pub const HULL_MAX: f32 = 100.0;

/// Damage flash timer reset value; decays linearly at 1/s.
pub const DAMAGE_FLASH_SECS: f32 = 1.0;

// --- Hostile AI ---

/// Range at which the hostile notices the player (world units).
pub const HOSTILE_DETECTION_RANGE: f32 = 120.0;

/// Preferred engagement range; beyond it the hostile closes in.
pub const HOSTILE_ATTACK_RANGE: f32 = 45.0;

/// Below this range the hostile backs off.
pub const HOSTILE_MIN_RANGE: f32 = 15.0;

/// Alert hold duration before committing to attack (seconds).
pub const HOSTILE_ALERT_SECS: f32 = 2.0;

/// Hull fraction below which the hostile goes evasive.
pub const HOSTILE_EVASIVE_HULL_FRACTION: f32 = 0.30;

/// Recovery margin above the evasive threshold to return to attack.
pub const HOSTILE_RECOVER_MARGIN: f32 = 0.15;

/// Idle orbit radius around the spawn point (world units).
pub const HOSTILE_ORBIT_RADIUS: f32 = 20.0;

/// Idle orbit angular rate (rad/s).
pub const HOSTILE_ORBIT_RATE: f32 = 0.3;

/// Maximum hostile turn rate toward a desired facing (rad/s).
pub const HOSTILE_TURN_RATE: f32 = 1.0;

/// Hostile cruise speed in attack (world units/s).
pub const HOSTILE_ATTACK_SPEED: f32 = 12.0;

/// Hostile speed while evasive (faster than attack).
pub const HOSTILE_EVASIVE_SPEED: f32 = 18.0;

/// Evasive heading oscillation rate (rad/s of the jink phase).
pub const HOSTILE_EVASIVE_JINK_RATE: f32 = 1.6;

/// Evasive heading oscillation amplitude (radians).
pub const HOSTILE_EVASIVE_JINK_ANGLE: f32 = 0.7;

/// Base beam cooldown; the re-arm interval is randomized around this so the
/// fire pattern never feels metronomic.
pub const HOSTILE_BEAM_COOLDOWN_SECS: f32 = 1.4;

/// Cooldown multiplier while evasive (fires at a reduced rate).
pub const HOSTILE_EVASIVE_FIRE_FACTOR: f32 = 2.0;

/// Beam burst window after each hostile pulse (seconds); continuous beam
/// damage applies while the burst holds and alignment holds.
pub const HOSTILE_BEAM_BURST_SECS: f32 = 0.35;

/// Forward-axis dot required for the hostile to fire its beam.
pub const HOSTILE_BEAM_ALIGN_DOT: f32 = 0.92;

/// Hostile beam damage per second.
pub const HOSTILE_BEAM_DPS: f32 = 14.0;

/// Fixed torpedo cooldown (seconds).
pub const HOSTILE_TORPEDO_COOLDOWN_SECS: f32 = 6.0;

/// Tight alignment required for a hostile torpedo launch.
pub const HOSTILE_TORPEDO_ALIGN_DOT: f32 = 0.985;

/// Maximum range for a hostile torpedo launch (world units).
pub const HOSTILE_TORPEDO_RANGE: f32 = 70.0;

/// Hostile torpedo magazine size.
pub const HOSTILE_TORPEDO_CAPACITY: u32 = 8;

/// Cosmetic breakup spin rate after destruction (rad/s).
pub const HOSTILE_BREAKUP_SPIN_RATE: f32 = 2.4;

/// Seconds over which the destroyed hostile shrinks to nothing.
pub const HOSTILE_BREAKUP_SHRINK_SECS: f32 = 3.0;

/// Hostile spawn offset from the player at mission start (world units).
pub const HOSTILE_SPAWN_OFFSET: Vec3 = Vec3::new(30.0, 0.0, -90.0);

// --- Camera rig ---

/// Chase offset in ship-local space at impulse speeds (behind = +Z).
pub const CAMERA_CHASE_OFFSET: Vec3 = Vec3::new(0.0, 2.2, 7.5);

/// Chase offset while at full warp (pulled further back).
pub const CAMERA_WARP_OFFSET: Vec3 = Vec3::new(0.0, 2.8, 10.5);

/// Exponential follow rate for the chase camera position.
pub const CAMERA_FOLLOW_RATE: f32 = 6.0;

/// Exponential follow rate for the chase look target.
pub const CAMERA_LOOK_RATE: f32 = 8.0;

/// Distance ahead of the ship the chase camera looks at (world units).
pub const CAMERA_LOOK_AHEAD: f32 = 12.0;

/// Field of view at rest (degrees).
pub const CAMERA_FOV_MIN_DEG: f32 = 55.0;

/// Field of view at full warp (degrees) — the tunnel-vision ceiling.
pub const CAMERA_FOV_MAX_DEG: f32 = 85.0;

/// Free-fly translation speed (world units/s).
pub const CAMERA_FREE_SPEED: f32 = 25.0;

/// Free-fly look sensitivity (radians per mouse-delta unit).
pub const CAMERA_FREE_SENSITIVITY: f32 = 0.003;

/// Free-fly pitch clamp (radians, just short of the poles).
pub const CAMERA_PITCH_LIMIT: f32 = 1.54;

/// Free-fly zoom rate (degrees of FOV per second).
pub const CAMERA_ZOOM_RATE: f32 = 40.0;

/// Free-fly FOV bounds (degrees).
pub const CAMERA_ZOOM_FOV_MIN_DEG: f32 = 30.0;
pub const CAMERA_ZOOM_FOV_MAX_DEG: f32 = 90.0;

// --- World bodies ---

/// Clearance kept between the ship and a body surface (world units).
pub const BODY_COLLISION_MARGIN: f32 = 1.5;

/// Player spawn / system-entry point, outside the outermost shipped orbit.
pub const PLAYER_SPAWN_POSITION: Vec3 = Vec3::new(0.0, 0.0, 1500.0);
