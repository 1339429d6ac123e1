//! Events emitted by the simulation for audio and UI feedback.
//!
//! Fire-and-forget: the simulation emits, a presentation-side listener maps
//! each event to a sound or cue. The core never manages playback state.

use serde::{Deserialize, Serialize};

use crate::enums::{Allegiance, GameOutcome};

/// Audio events drained into the snapshot once per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum AudioEvent {
    /// A beam pulse left the launcher.
    PhaserFired { shooter: Allegiance },
    /// A torpedo left the tube.
    TorpedoAway { shooter: Allegiance },
    ShieldsRaised { ship: Allegiance },
    ShieldsDropped { ship: Allegiance },
    WarpEngaged,
    WarpDisengaged,
    /// Damage got through to the hull.
    HullHit { ship: Allegiance },
    /// Damage was absorbed by shields.
    ShieldHit { ship: Allegiance },
    ShipDestroyed { ship: Allegiance },
    /// Combat resolved one way or the other.
    MissionOver { outcome: GameOutcome },
}
