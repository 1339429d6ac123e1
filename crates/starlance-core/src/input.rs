//! Logical input model — the interface the host's device polling fills in.
//!
//! The simulation never touches keyboard or touch state directly. The host
//! maps device events onto `InputAction`s before the tick; the tick reads a
//! stable snapshot (no mid-tick re-polling) and calls `end_frame` when done.

use std::collections::HashSet;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// A logical, device-independent action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    // --- Flight (held) ---
    PitchUp,
    PitchDown,
    YawLeft,
    YawRight,
    RollLeft,
    RollRight,
    /// Beam trigger — fires a sustained pulse train while held.
    FirePhaser,

    // --- Flight (edge-triggered) ---
    /// One torpedo per press.
    FireTorpedo,
    ToggleWarp,
    ToggleShields,
    /// Discrete throttle setting, level 0..=9.
    ThrottleLevel(u8),

    // --- Camera ---
    /// Edge-triggered: enter/exit detached photo mode.
    TogglePhotoMode,
    /// Edge-triggered: snap the free camera back to its captured pose.
    CameraReset,
    // Held: free-camera translation along its own local axes.
    CameraForward,
    CameraBack,
    CameraLeft,
    CameraRight,
    CameraUp,
    CameraDown,
    // Held: free-camera FOV zoom.
    ZoomIn,
    ZoomOut,
}

/// Per-frame input snapshot with held-key and edge-trigger queries.
///
/// Edge-triggered actions are consumed at most once per tick:
/// `was_just_triggered` clears the flag it reads, so a second call site in
/// the same tick sees `false` and cannot double-fire.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<InputAction>,
    just_triggered: HashSet<InputAction>,
    mouse_delta: Vec2,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key-down from the host. A press that wasn't already held
    /// also raises the edge flag.
    pub fn press(&mut self, action: InputAction) {
        if self.held.insert(action) {
            self.just_triggered.insert(action);
        }
    }

    /// Record a key-up from the host.
    pub fn release(&mut self, action: InputAction) {
        self.held.remove(&action);
    }

    /// Accumulate a mouse-drag delta for the free camera.
    pub fn add_mouse_delta(&mut self, delta: Vec2) {
        self.mouse_delta += delta;
    }

    /// Is this action currently held?
    pub fn is_held(&self, action: InputAction) -> bool {
        self.held.contains(&action)
    }

    /// Was this action newly triggered this frame? Self-clearing: the first
    /// reader consumes the flag.
    pub fn was_just_triggered(&mut self, action: InputAction) -> bool {
        self.just_triggered.remove(&action)
    }

    /// Mouse drag accumulated since the last `end_frame`.
    pub fn mouse_delta(&self) -> Vec2 {
        self.mouse_delta
    }

    /// End-of-tick reset: clears unconsumed edge flags and the mouse delta.
    /// Held state persists until the host reports a release.
    pub fn end_frame(&mut self) {
        self.just_triggered.clear();
        self.mouse_delta = Vec2::ZERO;
    }
}
