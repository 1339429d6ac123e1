//! Solid-body collision — keeps the player ship out of planets and the star.
//!
//! Runs right after flight integration. A penetrating position is projected
//! back to the body surface plus a clearance margin; no damage, no crash.

use glam::Vec3;
use hecs::World;

use starlance_core::components::{PlayerShip, Position, WorldBody};
use starlance_core::constants::BODY_COLLISION_MARGIN;
use starlance_core::types::UP;

/// Push the player out of any world body it ended the frame inside.
pub fn run(world: &mut World) {
    let bodies: Vec<(Vec3, f32)> = {
        let mut query = world.query::<(&WorldBody, &Position)>();
        query
            .iter()
            .map(|(_, (body, pos))| (pos.0, body.radius))
            .collect()
    };
    if bodies.is_empty() {
        return;
    }

    for (_entity, (_player, pos)) in world.query_mut::<(&PlayerShip, &mut Position)>() {
        for (center, radius) in &bodies {
            let clearance = radius + BODY_COLLISION_MARGIN;
            let delta = pos.0 - *center;
            let distance = delta.length();
            if distance < clearance {
                pos.0 = if distance > 1e-4 {
                    *center + delta / distance * clearance
                } else {
                    // Dead center: push straight up, any direction works.
                    *center + UP * clearance
                };
            }
        }
    }
}
