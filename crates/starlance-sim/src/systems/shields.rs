//! Shield system — toggle handling, passive drain, pulse and opacity.
//!
//! Toggles arrive as edge-triggered intents raised by the flight model or
//! the hostile AI; this system never polls input directly. The zero-strength
//! force-off is re-checked every tick because passive drain (or combat
//! absorption) can zero the pool independent of any toggle event.

use hecs::World;

use starlance_core::components::{PlayerShip, ShieldState};
use starlance_core::constants::*;
use starlance_core::enums::Allegiance;
use starlance_core::events::AudioEvent;
use starlance_core::types::smooth_factor;

/// Run the shield layer for every shielded ship.
pub fn run(world: &mut World, dt: f32, audio_events: &mut Vec<AudioEvent>) {
    for (_entity, (shields, player)) in
        world.query_mut::<(&mut ShieldState, Option<&PlayerShip>)>()
    {
        let ship = if player.is_some() {
            Allegiance::Player
        } else {
            Allegiance::Hostile
        };

        // Consume the toggle intent. Raising is refused at zero strength.
        if shields.toggle_requested {
            shields.toggle_requested = false;
            if shields.active {
                shields.active = false;
                shields.pulse_secs = SHIELD_PULSE_SECS;
                audio_events.push(AudioEvent::ShieldsDropped { ship });
            } else if shields.strength > 0.0 {
                shields.active = true;
                shields.pulse_secs = SHIELD_PULSE_SECS;
                audio_events.push(AudioEvent::ShieldsRaised { ship });
            }
        }

        // Passive drain while raised.
        if shields.active {
            shields.strength = (shields.strength - SHIELD_DRAIN_RATE * dt).max(0.0);
        }

        // Force-off at zero, regardless of how it got there.
        if shields.active && shields.strength <= 0.0 {
            shields.active = false;
            shields.pulse_secs = SHIELD_PULSE_SECS;
            audio_events.push(AudioEvent::ShieldsDropped { ship });
        }

        // Feedback pulse decays linearly; it gates nothing.
        shields.pulse_secs = (shields.pulse_secs - dt).max(0.0);

        // Opacity follows the active flag on its own smoothing constant,
        // decoupled from the pulse timer.
        let target = if shields.active { 1.0 } else { 0.0 };
        shields.opacity += (target - shields.opacity) * smooth_factor(SHIELD_OPACITY_RATE, dt);
    }
}
