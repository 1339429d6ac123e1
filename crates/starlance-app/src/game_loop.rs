//! Game loop thread — runs the simulation engine at the nominal tick rate
//! and publishes snapshots.
//!
//! The engine is created inside the thread because it's cleaner for
//! ownership. Commands and input events arrive via `mpsc`; the latest
//! snapshot is stored in shared state for synchronous polling by whatever
//! frontend is attached.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use glam::Vec2;

use starlance_core::constants::TICK_RATE;
use starlance_core::input::InputState;
use starlance_core::state::GameStateSnapshot;
use starlance_sim::engine::{SimConfig, SimulationEngine};

use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread.
///
/// Returns the command sender for the host to use.
pub fn spawn_game_loop(
    latest_snapshot: Arc<Mutex<Option<GameStateSnapshot>>>,
) -> mpsc::Sender<GameLoopCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    std::thread::Builder::new()
        .name("starlance-game-loop".into())
        .spawn(move || {
            run_game_loop(cmd_rx, &latest_snapshot);
        })
        .expect("Failed to spawn game loop thread");

    cmd_tx
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut input = InputState::new();
    let mut next_tick_time = Instant::now();
    let mut last_tick = Instant::now();

    loop {
        // 1. Drain all pending messages.
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Game(command)) => engine.queue_command(command),
                Ok(GameLoopCommand::Press(action)) => input.press(action),
                Ok(GameLoopCommand::Release(action)) => input.release(action),
                Ok(GameLoopCommand::MouseDelta { x, y }) => {
                    input.add_mouse_delta(Vec2::new(x, y));
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick with the measured frame delta (the engine
        //    clamps spikes itself).
        let now = Instant::now();
        let dt = (now - last_tick).as_secs_f32();
        last_tick = now;
        let snapshot = engine.tick(&mut input, dt);

        // 3. Store the latest snapshot for synchronous polling.
        if let Ok(mut slot) = latest_snapshot.lock() {
            *slot = Some(snapshot);
        }

        // 4. Sleep until the next tick boundary.
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind — reset to avoid a catch-up spiral.
            next_tick_time = now;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starlance_core::commands::GameCommand;
    use starlance_core::input::InputAction;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<GameLoopCommand>();

        tx.send(GameLoopCommand::Game(GameCommand::StartBriefing))
            .unwrap();
        tx.send(GameLoopCommand::Press(InputAction::FirePhaser))
            .unwrap();
        tx.send(GameLoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            GameLoopCommand::Game(GameCommand::StartBriefing)
        ));
        assert!(matches!(
            commands[1],
            GameLoopCommand::Press(InputAction::FirePhaser)
        ));
        assert!(matches!(commands[2], GameLoopCommand::Shutdown));
    }

    #[test]
    fn test_loop_publishes_snapshots_and_shuts_down() {
        let slot = Arc::new(Mutex::new(None));
        let tx = spawn_game_loop(Arc::clone(&slot));

        tx.send(GameLoopCommand::Game(GameCommand::StartBriefing))
            .unwrap();

        // Wait for at least one published snapshot.
        let mut saw_snapshot = false;
        for _ in 0..200 {
            std::thread::sleep(Duration::from_millis(5));
            if slot.lock().unwrap().is_some() {
                saw_snapshot = true;
                break;
            }
        }
        assert!(saw_snapshot, "The loop should publish snapshots");

        tx.send(GameLoopCommand::Shutdown).unwrap();
    }
}
