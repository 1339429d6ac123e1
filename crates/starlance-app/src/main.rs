//! Headless demo driver: scripts a short mission against the simulation and
//! prints snapshot JSON at key moments. Useful for exercising the whole
//! stack without a frontend attached.

use starlance_core::commands::GameCommand;
use starlance_core::constants::NOMINAL_DT;
use starlance_core::enums::MissionPhase;
use starlance_core::input::{InputAction, InputState};
use starlance_sim::engine::{SimConfig, SimulationEngine};

fn main() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut input = InputState::new();

    // Fly toward the hostile spawn area at full impulse.
    input.press(InputAction::ThrottleLevel(9));
    for _ in 0..120 {
        engine.tick(&mut input, NOMINAL_DT);
    }
    input.release(InputAction::ThrottleLevel(9));

    // Briefing, then combat.
    engine.queue_commands([
        GameCommand::StartBriefing,
        GameCommand::SkipBriefing,
        GameCommand::BeginCombat,
    ]);
    let snapshot = engine.tick(&mut input, NOMINAL_DT);
    print_snapshot("combat start", &snapshot);

    // Fight: hold the beam trigger, lob a torpedo every few seconds, and
    // keep shields up.
    input.press(InputAction::ToggleShields);
    input.press(InputAction::FirePhaser);

    let mut last = snapshot;
    for tick in 0..(10 * 60 * 60) {
        if tick % 300 == 0 {
            input.release(InputAction::FireTorpedo);
            input.press(InputAction::FireTorpedo);
        }
        last = engine.tick(&mut input, NOMINAL_DT);
        if matches!(last.phase, MissionPhase::Victory | MissionPhase::Defeat) {
            break;
        }
        if tick % 600 == 0 {
            print_snapshot("in flight", &last);
        }
    }

    print_snapshot("final", &last);
}

fn print_snapshot(label: &str, snapshot: &starlance_core::state::GameStateSnapshot) {
    match serde_json::to_string(snapshot) {
        Ok(json) => println!("--- {label} (tick {}) ---\n{json}", snapshot.time.tick),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
}
