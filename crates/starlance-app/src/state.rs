//! Shared state between the host frontend and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use starlance_core::commands::GameCommand;
use starlance_core::input::InputAction;
use starlance_core::state::GameStateSnapshot;

/// Messages sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A discrete game command to forward to the engine.
    Game(GameCommand),
    /// A logical input action went down.
    Press(InputAction),
    /// A logical input action went up.
    Release(InputAction),
    /// Mouse drag delta for the free camera.
    MouseDelta { x: f32, y: f32 },
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state.
///
/// The game loop thread owns the engine and the input state; the host only
/// holds the command sender and the latest-snapshot slot.
pub struct AppState {
    /// Channel sender to forward commands to the game loop thread.
    /// `None` before the loop is started.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Latest snapshot for synchronous polling.
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}
