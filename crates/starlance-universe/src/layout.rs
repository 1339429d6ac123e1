//! Space environment builder — turns a star system record into positioned
//! world objects.
//!
//! Planets get fixed world coordinates from their orbital radius/angle; they
//! never track the camera. Only the backdrop (starfield/nebula sphere) is
//! camera-locked, which is what makes it read as infinitely far away.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::galaxy::{PlanetKind, SpectralClass, StarSystem};

/// The system's star, placed at the environment origin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarInstance {
    pub class: SpectralClass,
    pub color: [f32; 3],
    pub radius: f32,
    pub intensity: f32,
    pub position: Vec3,
}

/// One positioned planet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyInstance {
    /// Index into the system's planet list; stable visual key.
    pub index: usize,
    pub kind: PlanetKind,
    pub position: Vec3,
    pub radius: f32,
    pub rotation_speed: f32,
    pub texture_key: String,
    pub rings: bool,
    pub atmosphere: Option<[f32; 3]>,
}

/// The infinite-distance backdrop. The renderer re-centers it on the camera
/// every frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Backdrop {
    /// Always true: the backdrop follows the camera, world bodies do not.
    pub camera_locked: bool,
    pub star_count: u32,
    pub nebula_tint: [f32; 3],
}

/// A fully positioned environment for one star system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemEnvironment {
    pub star: StarInstance,
    pub bodies: Vec<BodyInstance>,
    pub backdrop: Backdrop,
}

impl SystemEnvironment {
    /// Body lookup by planet index. Out-of-range returns `None` — callers
    /// skip the behavior rather than crash the tick.
    pub fn body(&self, index: usize) -> Option<&BodyInstance> {
        self.bodies.iter().find(|b| b.index == index)
    }
}

impl Default for SystemEnvironment {
    /// Empty space: no bodies, a dark backdrop. The sentinel environment
    /// when no system data is available.
    fn default() -> Self {
        Self {
            star: StarInstance {
                class: SpectralClass::G,
                color: SpectralClass::G.color(),
                radius: 0.0,
                intensity: 0.0,
                position: Vec3::ZERO,
            },
            bodies: Vec::new(),
            backdrop: Backdrop {
                camera_locked: true,
                star_count: 0,
                nebula_tint: [0.0, 0.0, 0.0],
            },
        }
    }
}

/// Build the positioned environment for a system.
pub fn build_environment(system: &StarSystem) -> SystemEnvironment {
    let star = StarInstance {
        class: system.star.class,
        color: system.star.class.color(),
        radius: system.star.size,
        intensity: system.star.intensity,
        position: Vec3::ZERO,
    };

    let bodies = system
        .planets
        .iter()
        .enumerate()
        .map(|(index, planet)| BodyInstance {
            index,
            kind: planet.kind,
            position: orbit_position(planet.orbital_radius, planet.orbital_angle),
            radius: planet.radius,
            rotation_speed: planet.rotation_speed,
            texture_key: planet.texture_key.clone(),
            rings: planet.rings,
            atmosphere: planet.atmosphere,
        })
        .collect();

    SystemEnvironment {
        star,
        bodies,
        backdrop: build_backdrop(system),
    }
}

/// Fixed world position on the orbital plane (XZ) for a given radius/angle.
fn orbit_position(orbital_radius: f32, orbital_angle: f32) -> Vec3 {
    Vec3::new(
        orbital_radius * orbital_angle.cos(),
        0.0,
        orbital_radius * orbital_angle.sin(),
    )
}

/// Deterministic backdrop parameters derived from the system identity, so a
/// revisited system always looks the same.
fn build_backdrop(system: &StarSystem) -> Backdrop {
    let seed = system.id.0;
    let star_count = 1400 + (seed * 397) % 800;
    let star_color = system.star.class.color();
    let nebula_tint = [
        star_color[0] * 0.25 + 0.05,
        star_color[1] * 0.2 + 0.05,
        star_color[2] * 0.3 + 0.08,
    ];
    Backdrop {
        camera_locked: true,
        star_count,
        nebula_tint,
    }
}
