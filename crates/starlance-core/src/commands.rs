//! Game commands sent from the host to the simulation.
//!
//! Commands cover discrete meta actions (mission phase control, inter-system
//! travel); continuous flight control goes through `input::InputState`.
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::types::SystemId;

/// All discrete host-level actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameCommand {
    // --- Mission phase ---
    /// Begin the mission briefing narration (Free → Briefing).
    StartBriefing,
    /// Skip the remaining narration; unlocks combat confirmation.
    SkipBriefing,
    /// Presentation-layer callback: narration finished playing.
    NarrationComplete,
    /// Confirm and start combat (Briefing → Active). Spawns the hostile and
    /// initializes combat state. Ignored until narration is complete or
    /// skipped.
    BeginCombat,
    /// Full reset after Victory/Defeat: tears down the hostile and restores
    /// all player transient state to initial values.
    ResetMission,

    // --- Navigation ---
    /// Travel to a directly-connected star system. Only valid in the Free
    /// phase; unknown or unconnected ids are silently ignored.
    TravelTo { system: SystemId },
}
