//! Simulation engine — the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes game commands,
//! runs all systems in a fixed documented order, and produces
//! `GameStateSnapshot`s. Completely headless (no rendering or UI
//! dependency), enabling deterministic testing.

use std::collections::VecDeque;

use glam::Quat;
use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use starlance_core::commands::GameCommand;
use starlance_core::components::{PlayerShip, Position, Velocity};
use starlance_core::constants::{MAX_DT, PLAYER_SPAWN_POSITION};
use starlance_core::enums::{CameraMode, GameOutcome, MissionPhase};
use starlance_core::events::AudioEvent;
use starlance_core::input::{InputAction, InputState};
use starlance_core::state::GameStateSnapshot;
use starlance_core::types::{SimTime, SystemId};

use starlance_universe::{build_environment, Galaxy, SystemEnvironment};

use crate::camera::{self, CameraRig};
use crate::combat_state::CombatState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self { seed: 42 }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    time: SimTime,
    phase: MissionPhase,
    narration_complete: bool,
    rng: ChaCha8Rng,
    command_queue: VecDeque<GameCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    audio_events: Vec<AudioEvent>,
    camera: CameraRig,
    combat: Option<CombatState>,
    galaxy: Galaxy,
    current_system: SystemId,
    environment: SystemEnvironment,
}

impl SimulationEngine {
    /// Create a new simulation engine in the home system, free-roam phase.
    pub fn new(config: SimConfig) -> Self {
        let galaxy = Galaxy::standard();
        let current_system = galaxy
            .systems()
            .first()
            .map(|s| s.id)
            .unwrap_or(SystemId(0));
        let environment = galaxy
            .get(current_system)
            .map(build_environment)
            .unwrap_or_default();

        let mut world = World::new();
        world_setup::spawn_player(&mut world);
        world_setup::spawn_world_bodies(&mut world, &environment);

        Self {
            world,
            time: SimTime::default(),
            phase: MissionPhase::default(),
            narration_complete: false,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            camera: CameraRig::new(PLAYER_SPAWN_POSITION, Quat::IDENTITY),
            combat: None,
            galaxy,
            current_system,
            environment,
        }
    }

    /// Queue a game command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: GameCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = GameCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    ///
    /// Input is sampled once and stable for the whole tick; edge-triggered
    /// flags left unconsumed are cleared by `end_frame` at the end.
    pub fn tick(&mut self, input: &mut InputState, dt_raw: f32) -> GameStateSnapshot {
        // Delta spikes (tab backgrounding, GC pauses) are clamped before any
        // integration sees them.
        let dt = dt_raw.clamp(0.0, MAX_DT);

        self.process_commands();
        self.run_systems(input, dt);
        self.time.advance(dt);

        let audio_events = std::mem::take(&mut self.audio_events);
        let snapshot = systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            self.photo_mode(),
            self.narration_complete,
            &self.camera,
            self.combat.as_ref(),
            self.galaxy.get(self.current_system),
            audio_events,
        );

        input.end_frame();
        snapshot
    }

    pub fn phase(&self) -> MissionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Orthogonal photo-mode flag: the camera is detached and flight is
    /// frozen.
    pub fn photo_mode(&self) -> bool {
        self.camera.mode() == CameraMode::Free
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn camera(&self) -> &CameraRig {
        &self.camera
    }

    pub fn combat(&self) -> Option<&CombatState> {
        self.combat.as_ref()
    }

    pub fn galaxy(&self) -> &Galaxy {
        &self.galaxy
    }

    pub fn current_system(&self) -> SystemId {
        self.current_system
    }

    pub fn environment(&self) -> &SystemEnvironment {
        &self.environment
    }

    /// Get mutable world access for test setup.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Get mutable combat access for test setup.
    #[cfg(test)]
    pub fn combat_mut(&mut self) -> Option<&mut CombatState> {
        self.combat.as_mut()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single game command. Invalid-phase commands are silently
    /// ignored — the worst failure mode is "this action did nothing".
    fn handle_command(&mut self, command: GameCommand) {
        match command {
            GameCommand::StartBriefing => {
                if self.phase == MissionPhase::Free {
                    self.phase = MissionPhase::Briefing;
                    self.narration_complete = false;
                }
            }
            GameCommand::SkipBriefing | GameCommand::NarrationComplete => {
                if self.phase == MissionPhase::Briefing {
                    self.narration_complete = true;
                }
            }
            GameCommand::BeginCombat => {
                if self.phase == MissionPhase::Briefing && self.narration_complete {
                    let player_pos = self.player_position();
                    world_setup::spawn_hostile(&mut self.world, player_pos, &mut self.rng);
                    self.combat = Some(CombatState::new());
                    self.phase = MissionPhase::Active;
                }
            }
            GameCommand::ResetMission => {
                if matches!(self.phase, MissionPhase::Victory | MissionPhase::Defeat) {
                    self.reset_mission();
                }
            }
            GameCommand::TravelTo { system } => self.travel_to(system),
        }
    }

    /// Full mission teardown: hostile and projectiles removed, all player
    /// transient state back to initial values.
    fn reset_mission(&mut self) {
        world_setup::despawn_hostile_and_projectiles(&mut self.world, &mut self.despawn_buffer);
        world_setup::reset_player(&mut self.world);
        self.combat = None;
        self.narration_complete = false;
        self.phase = MissionPhase::Free;
        self.camera = CameraRig::new(PLAYER_SPAWN_POSITION, Quat::IDENTITY);
    }

    /// Inter-system travel across the connection graph. Only valid while
    /// free-roaming; unknown or unconnected targets are silently ignored.
    fn travel_to(&mut self, target: SystemId) {
        if self.phase != MissionPhase::Free || target == self.current_system {
            return;
        }
        if !self.galaxy.are_connected(self.current_system, target) {
            return;
        }
        let environment = match self.galaxy.get(target) {
            Some(system) => build_environment(system),
            None => return,
        };

        self.environment = environment;
        self.galaxy.discover(target);
        self.current_system = target;

        world_setup::despawn_world_bodies(&mut self.world, &mut self.despawn_buffer);
        world_setup::spawn_world_bodies(&mut self.world, &self.environment);

        // Arrive at the system entry point, stationary.
        for (_entity, (_player, pos, vel)) in self
            .world
            .query_mut::<(&PlayerShip, &mut Position, &mut Velocity)>()
        {
            pos.0 = PLAYER_SPAWN_POSITION;
            vel.0 = glam::Vec3::ZERO;
        }
    }

    fn player_position(&self) -> glam::Vec3 {
        self.world
            .query::<(&PlayerShip, &Position)>()
            .iter()
            .next()
            .map(|(_, (_, pos))| pos.0)
            .unwrap_or(PLAYER_SPAWN_POSITION)
    }

    /// Run all systems in order. The order is the contract: every writer of
    /// a state record runs at a fixed point in the tick.
    fn run_systems(&mut self, input: &mut InputState, dt: f32) {
        // 1. Photo-mode toggle, resolved first so detaching freezes flight
        //    within the same tick.
        if input.was_just_triggered(InputAction::TogglePhotoMode) {
            self.camera.toggle_mode();
        }

        // 2. Flight model: player transform + throttle + weapon/shield
        //    intents. Frozen while the camera is detached.
        if self.camera.mode() == CameraMode::Chase {
            systems::flight::run(&mut self.world, input, dt, &mut self.audio_events);
        }

        // 3. Solid-body collision against the current system's bodies.
        systems::collision::run(&mut self.world);

        // 4. Camera rig follows the (possibly corrected) ship transform.
        camera::run(&mut self.camera, &self.world, input, dt);

        // 5. Shield layer: toggles, passive drain, pulse, opacity.
        systems::shields::run(&mut self.world, dt, &mut self.audio_events);

        // 6. Weapon system: player fire intents, projectile aging/homing.
        systems::weapons::run(
            &mut self.world,
            dt,
            &mut self.despawn_buffer,
            &mut self.audio_events,
        );

        // 7-8. Combat evaluation and hostile AI run only while the mission
        //      is live; the win/lose poll follows them.
        match self.phase {
            MissionPhase::Active => {
                if let Some(combat) = self.combat.as_mut() {
                    systems::combat::run(
                        &mut self.world,
                        combat,
                        dt,
                        &mut self.despawn_buffer,
                        &mut self.audio_events,
                    );
                    systems::hostile::run(
                        &mut self.world,
                        combat,
                        &mut self.rng,
                        self.time.elapsed_secs,
                        dt,
                        &mut self.audio_events,
                    );
                    if let Some(outcome) = systems::combat::check_outcome(combat) {
                        self.audio_events.push(AudioEvent::MissionOver { outcome });
                        self.phase = match outcome {
                            GameOutcome::Victory => MissionPhase::Victory,
                            GameOutcome::Defeat => MissionPhase::Defeat,
                        };
                    }
                }
            }
            // The wreck keeps breaking up on the victory screen.
            MissionPhase::Victory => systems::hostile::run_breakup(&mut self.world, dt),
            _ => {}
        }

        // Flash decay runs whenever combat state exists, independent of
        // damage events or phase.
        if let Some(combat) = self.combat.as_mut() {
            systems::combat::tick_timers(combat, dt);
        }

        // 9. Drain flagged despawns before the snapshot is built.
        systems::cleanup::run(&mut self.world, &mut self.despawn_buffer);
    }
}
