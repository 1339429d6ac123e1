//! Cleanup system — the single drain point for flagged despawns.
//!
//! Weapons flag expired projectiles, combat flags spent torpedoes; both land
//! in the same pre-allocated buffer and are despawned here before the
//! snapshot is built, so the renderer never sees a stale record.

use hecs::{Entity, World};

/// Despawn everything flagged this tick. Double-flags are harmless.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
