#[cfg(test)]
mod tests {
    use glam::{Quat, Vec2, Vec3};

    use crate::commands::GameCommand;
    use crate::components::Orientation;
    use crate::enums::*;
    use crate::events::AudioEvent;
    use crate::input::{InputAction, InputState};
    use crate::state::GameStateSnapshot;
    use crate::types::{facing, smooth_factor, steer_toward, SimTime, SystemId, FORWARD};

    /// Verify the phase and behavior enums round-trip through serde_json.
    #[test]
    fn test_mission_phase_serde() {
        let variants = vec![
            MissionPhase::Free,
            MissionPhase::Briefing,
            MissionPhase::Active,
            MissionPhase::Victory,
            MissionPhase::Defeat,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: MissionPhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    #[test]
    fn test_hostile_behavior_serde() {
        let variants = vec![
            HostileBehavior::Idle,
            HostileBehavior::Alert,
            HostileBehavior::Attack,
            HostileBehavior::Evasive,
        ];
        for v in variants {
            let json = serde_json::to_string(&v).unwrap();
            let back: HostileBehavior = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify GameCommand round-trips through serde (tagged union).
    #[test]
    fn test_game_command_serde() {
        let commands = vec![
            GameCommand::StartBriefing,
            GameCommand::SkipBriefing,
            GameCommand::NarrationComplete,
            GameCommand::BeginCombat,
            GameCommand::ResetMission,
            GameCommand::TravelTo {
                system: SystemId(3),
            },
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: GameCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    /// Verify AudioEvent round-trips through serde.
    #[test]
    fn test_audio_event_serde() {
        let events = vec![
            AudioEvent::PhaserFired {
                shooter: Allegiance::Player,
            },
            AudioEvent::TorpedoAway {
                shooter: Allegiance::Hostile,
            },
            AudioEvent::WarpEngaged,
            AudioEvent::MissionOver {
                outcome: GameOutcome::Victory,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let _back: AudioEvent = serde_json::from_str(&json).unwrap();
        }
    }

    /// Verify GameStateSnapshot can be serialized to JSON.
    #[test]
    fn test_snapshot_serde() {
        let snapshot = GameStateSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 2048,
            "Empty snapshot should be small, was {} bytes",
            json.len()
        );
    }

    // ---- Input model ----

    /// Held queries are repeatable; edge queries are consumed at most once
    /// per tick even when checked from multiple call sites.
    #[test]
    fn test_edge_trigger_consumed_once() {
        let mut input = InputState::new();
        input.press(InputAction::FireTorpedo);

        assert!(input.is_held(InputAction::FireTorpedo));
        assert!(input.was_just_triggered(InputAction::FireTorpedo));
        assert!(
            !input.was_just_triggered(InputAction::FireTorpedo),
            "Second call site in the same tick must not double-fire"
        );
        assert!(input.is_held(InputAction::FireTorpedo));
    }

    /// Holding a key across frames raises the edge flag only on the press.
    #[test]
    fn test_edge_trigger_only_on_press() {
        let mut input = InputState::new();
        input.press(InputAction::ToggleWarp);
        assert!(input.was_just_triggered(InputAction::ToggleWarp));
        input.end_frame();

        // Still held next frame, but no new press.
        input.press(InputAction::ToggleWarp);
        assert!(!input.was_just_triggered(InputAction::ToggleWarp));

        input.release(InputAction::ToggleWarp);
        input.press(InputAction::ToggleWarp);
        assert!(input.was_just_triggered(InputAction::ToggleWarp));
    }

    #[test]
    fn test_end_frame_clears_edges_and_mouse() {
        let mut input = InputState::new();
        input.press(InputAction::CameraReset);
        input.add_mouse_delta(Vec2::new(4.0, -2.0));

        input.end_frame();
        assert!(!input.was_just_triggered(InputAction::CameraReset));
        assert_eq!(input.mouse_delta(), Vec2::ZERO);
    }

    // ---- Math helpers ----

    /// A bounded steer never rotates past the limit and converges on the
    /// desired direction.
    #[test]
    fn test_steer_toward_bounded() {
        let current = Vec3::NEG_Z;
        let desired = Vec3::X;
        let max_angle = 0.1;

        let stepped = steer_toward(current, desired, max_angle);
        let turned = current.dot(stepped).clamp(-1.0, 1.0).acos();
        assert!(
            (turned - max_angle).abs() < 1e-4,
            "Should turn exactly the limit, turned {turned}"
        );
        assert!((stepped.length() - 1.0).abs() < 1e-5);

        let mut dir = current;
        for _ in 0..20 {
            dir = steer_toward(dir, desired, 0.1);
        }
        assert!(dir.dot(desired) > 0.999, "Should converge on the target");
    }

    #[test]
    fn test_facing_points_forward_along_dir() {
        let dir = Vec3::new(1.0, 2.0, -0.5).normalize();
        let quat = facing(dir);
        let fwd = quat * FORWARD;
        assert!(fwd.dot(dir) > 0.9999);
    }

    /// Renormalization keeps orientation on the unit sphere over long
    /// sequences of incremental rotations.
    #[test]
    fn test_orientation_rotate_stays_unit() {
        let mut orientation = Orientation::default();
        for i in 0..10_000 {
            let angle = 0.013 * ((i % 7) as f32 - 3.0);
            orientation.rotate_local(Vec3::X, angle);
            orientation.rotate_local(Vec3::Y, angle * 0.7);
            orientation.rotate_local(Vec3::Z, angle * 1.3);
            assert!(
                (orientation.0.length() - 1.0).abs() < 1e-4,
                "Orientation drifted off the unit sphere at step {i}"
            );
        }
    }

    #[test]
    fn test_turn_toward_bounded() {
        let mut orientation = Orientation::default();
        let target = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);

        orientation.turn_toward(target, 0.2);
        let remaining = orientation.0.angle_between(target);
        assert!(
            (remaining - (std::f32::consts::FRAC_PI_2 - 0.2)).abs() < 1e-3,
            "One bounded step should close exactly 0.2 rad, remaining {remaining}"
        );

        for _ in 0..20 {
            orientation.turn_toward(target, 0.2);
        }
        assert!(orientation.0.angle_between(target) < 1e-3);
    }

    /// The exponential smoothing factor is frame-rate independent: one big
    /// step equals two half steps.
    #[test]
    fn test_smooth_factor_subdivision_invariant() {
        let rate = 6.0;
        let full = smooth_factor(rate, 0.1);
        let half = smooth_factor(rate, 0.05);
        let two_steps = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((full - two_steps).abs() < 1e-5);
    }

    /// Verify SimTime advancement accumulates dt.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-4);
    }
}
