//! Camera rig — smoothed chase camera and detached free-fly camera.
//!
//! Exactly one mode is active at a time. Chase smoothing uses the
//! frame-rate-independent exponential form `pos += (desired - pos) *
//! (1 - e^(-k*dt))`, not a fixed-fraction lerp, so the follow feel does not
//! change with tick rate.

use glam::{EulerRot, Quat, Vec2, Vec3};
use hecs::World;

use starlance_core::components::{Orientation, PlayerShip, Position, ThrottleState};
use starlance_core::constants::*;
use starlance_core::enums::CameraMode;
use starlance_core::input::{InputAction, InputState};
use starlance_core::state::CameraView;
use starlance_core::types::{smooth_factor, FORWARD};

/// The camera rig state, owned by the engine (not an ECS entity).
#[derive(Debug, Clone)]
pub struct CameraRig {
    mode: CameraMode,
    position: Vec3,
    look_at: Vec3,
    fov_deg: f32,
    // Free-fly state: independent yaw/pitch, not coupled to the ship.
    free_yaw: f32,
    free_pitch: f32,
    // Pose captured when entering free mode; restored by CameraReset.
    reset_position: Vec3,
    reset_fov_deg: f32,
    reset_yaw: f32,
    reset_pitch: f32,
}

impl CameraRig {
    /// Start in chase mode, placed at the ship's chase offset.
    pub fn new(ship_position: Vec3, ship_orientation: Quat) -> Self {
        let position = ship_position + ship_orientation * CAMERA_CHASE_OFFSET;
        let look_at = ship_position + ship_orientation * FORWARD * CAMERA_LOOK_AHEAD;
        Self {
            mode: CameraMode::Chase,
            position,
            look_at,
            fov_deg: CAMERA_FOV_MIN_DEG,
            free_yaw: 0.0,
            free_pitch: 0.0,
            reset_position: position,
            reset_fov_deg: CAMERA_FOV_MIN_DEG,
            reset_yaw: 0.0,
            reset_pitch: 0.0,
        }
    }

    pub fn mode(&self) -> CameraMode {
        self.mode
    }

    /// Switch between chase and free-fly. Entering free mode captures the
    /// current pose as the reset target; exiting needs no interpolation
    /// since chase recomputes from scratch.
    pub fn toggle_mode(&mut self) {
        match self.mode {
            CameraMode::Chase => {
                let dir = (self.look_at - self.position)
                    .try_normalize()
                    .unwrap_or(FORWARD);
                self.free_yaw = (-dir.x).atan2(-dir.z);
                self.free_pitch = dir.y.clamp(-1.0, 1.0).asin();
                self.reset_position = self.position;
                self.reset_fov_deg = self.fov_deg;
                self.reset_yaw = self.free_yaw;
                self.reset_pitch = self.free_pitch;
                self.mode = CameraMode::Free;
            }
            CameraMode::Free => {
                self.mode = CameraMode::Chase;
            }
        }
    }

    pub fn view(&self) -> CameraView {
        CameraView {
            mode: self.mode,
            position: self.position,
            look_at: self.look_at,
            fov_deg: self.fov_deg,
        }
    }
}

/// Per-tick camera update. Reads the ship transform in chase mode; consumes
/// mouse/translation input in free mode.
pub fn run(rig: &mut CameraRig, world: &World, input: &mut InputState, dt: f32) {
    match rig.mode {
        CameraMode::Chase => {
            let ship = {
                let mut query = world.query::<(&PlayerShip, &Position, &Orientation, &ThrottleState)>();
                query
                    .iter()
                    .next()
                    .map(|(_, (_, pos, orient, throttle))| (pos.0, orient.0, *throttle))
            };
            if let Some((pos, orient, throttle)) = ship {
                update_chase(rig, pos, orient, &throttle, dt);
            }
        }
        CameraMode::Free => update_free(rig, input, dt),
    }
}

/// Chase follow: offset lerped normal→warp by the warp ramp, position and
/// look target exponentially smoothed, FOV on a quadratic ease of normalized
/// speed so the tunnel effect ramps in disproportionately at high speed.
fn update_chase(
    rig: &mut CameraRig,
    ship_pos: Vec3,
    ship_orient: Quat,
    throttle: &ThrottleState,
    dt: f32,
) {
    let offset = CAMERA_CHASE_OFFSET.lerp(CAMERA_WARP_OFFSET, throttle.warp_ramp());
    let desired = ship_pos + ship_orient * offset;
    rig.position += (desired - rig.position) * smooth_factor(CAMERA_FOLLOW_RATE, dt);

    let look_desired = ship_pos + ship_orient * FORWARD * CAMERA_LOOK_AHEAD;
    rig.look_at += (look_desired - rig.look_at) * smooth_factor(CAMERA_LOOK_RATE, dt);

    let t = (throttle.speed / WARP_MULTIPLIER).clamp(0.0, 1.0);
    rig.fov_deg = CAMERA_FOV_MIN_DEG + (CAMERA_FOV_MAX_DEG - CAMERA_FOV_MIN_DEG) * t * t;
}

/// Free-fly: mouse-drag look, translation along the camera's own local
/// axes, zoom-bounded FOV, and an explicit reset to the captured pose.
fn update_free(rig: &mut CameraRig, input: &mut InputState, dt: f32) {
    if input.was_just_triggered(InputAction::CameraReset) {
        rig.position = rig.reset_position;
        rig.fov_deg = rig.reset_fov_deg;
        rig.free_yaw = rig.reset_yaw;
        rig.free_pitch = rig.reset_pitch;
    }

    let delta: Vec2 = input.mouse_delta();
    rig.free_yaw -= delta.x * CAMERA_FREE_SENSITIVITY;
    rig.free_pitch = (rig.free_pitch - delta.y * CAMERA_FREE_SENSITIVITY)
        .clamp(-CAMERA_PITCH_LIMIT, CAMERA_PITCH_LIMIT);

    let rotation = Quat::from_euler(EulerRot::YXZ, rig.free_yaw, rig.free_pitch, 0.0);

    let mut translation = Vec3::ZERO;
    if input.is_held(InputAction::CameraForward) {
        translation.z -= 1.0;
    }
    if input.is_held(InputAction::CameraBack) {
        translation.z += 1.0;
    }
    if input.is_held(InputAction::CameraLeft) {
        translation.x -= 1.0;
    }
    if input.is_held(InputAction::CameraRight) {
        translation.x += 1.0;
    }
    if input.is_held(InputAction::CameraUp) {
        translation.y += 1.0;
    }
    if input.is_held(InputAction::CameraDown) {
        translation.y -= 1.0;
    }
    if translation != Vec3::ZERO {
        rig.position += rotation * translation.normalize() * CAMERA_FREE_SPEED * dt;
    }

    if input.is_held(InputAction::ZoomIn) {
        rig.fov_deg -= CAMERA_ZOOM_RATE * dt;
    }
    if input.is_held(InputAction::ZoomOut) {
        rig.fov_deg += CAMERA_ZOOM_RATE * dt;
    }
    rig.fov_deg = rig
        .fov_deg
        .clamp(CAMERA_ZOOM_FOV_MIN_DEG, CAMERA_ZOOM_FOV_MAX_DEG);

    rig.look_at = rig.position + rotation * FORWARD;
}
