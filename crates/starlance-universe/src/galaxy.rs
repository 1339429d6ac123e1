//! Star-system schema and the shipped galaxy data.
//!
//! Systems are code literals, not loaded assets; the connection graph and
//! orbital parameters round-trip exactly through serde_json.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use starlance_core::types::SystemId;

/// Stellar spectral class, hottest to coolest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpectralClass {
    O,
    B,
    A,
    F,
    G,
    K,
    M,
}

impl SpectralClass {
    /// Representative RGB color for rendering and the star map.
    pub fn color(&self) -> [f32; 3] {
        match self {
            SpectralClass::O => [0.61, 0.69, 1.0],
            SpectralClass::B => [0.67, 0.75, 1.0],
            SpectralClass::A => [0.79, 0.84, 1.0],
            SpectralClass::F => [0.97, 0.97, 1.0],
            SpectralClass::G => [1.0, 0.96, 0.92],
            SpectralClass::K => [1.0, 0.82, 0.64],
            SpectralClass::M => [1.0, 0.8, 0.44],
        }
    }
}

/// Planet surface archetype, mapped to a texture set by the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlanetKind {
    Rocky,
    Ocean,
    Desert,
    Ice,
    Lava,
    GasGiant,
}

/// Star parameters for one system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarDescriptor {
    pub class: SpectralClass,
    /// Rendered radius (world units).
    pub size: f32,
    /// Light intensity multiplier.
    pub intensity: f32,
}

/// One planet in a system's ordered planet list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanetDescriptor {
    pub kind: PlanetKind,
    /// Body radius (world units).
    pub radius: f32,
    /// Distance from the star (world units).
    pub orbital_radius: f32,
    /// Fixed position angle on the orbit (radians).
    pub orbital_angle: f32,
    /// Self-rotation rate (rad/s), presentational.
    pub rotation_speed: f32,
    /// Texture lookup key for the renderer.
    pub texture_key: String,
    pub rings: bool,
    /// Atmosphere tint, if any.
    pub atmosphere: Option<[f32; 3]>,
}

/// A reachable star system. Immutable at runtime except `discovered`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarSystem {
    pub id: SystemId,
    pub name: String,
    pub sector: String,
    /// 2D coordinates for the star-map display.
    pub map_coords: Vec2,
    pub star: StarDescriptor,
    pub planets: Vec<PlanetDescriptor>,
    /// Directly-connected system ids (undirected edges).
    pub connections: Vec<SystemId>,
    pub discovered: bool,
}

/// The full reachable universe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Galaxy {
    systems: Vec<StarSystem>,
}

impl Galaxy {
    pub fn new(systems: Vec<StarSystem>) -> Self {
        Self { systems }
    }

    /// Look up a system by id. Unknown ids return `None`; callers treat that
    /// as "skip this behavior".
    pub fn get(&self, id: SystemId) -> Option<&StarSystem> {
        self.systems.iter().find(|s| s.id == id)
    }

    fn get_mut(&mut self, id: SystemId) -> Option<&mut StarSystem> {
        self.systems.iter_mut().find(|s| s.id == id)
    }

    /// Directly-connected neighbor ids. Unknown ids yield an empty slice.
    pub fn neighbors(&self, id: SystemId) -> &[SystemId] {
        self.get(id).map(|s| s.connections.as_slice()).unwrap_or(&[])
    }

    /// Undirected reachability: true if either system lists the other.
    pub fn are_connected(&self, a: SystemId, b: SystemId) -> bool {
        self.neighbors(a).contains(&b) || self.neighbors(b).contains(&a)
    }

    /// Mark a system discovered. No-op on unknown ids.
    pub fn discover(&mut self, id: SystemId) {
        if let Some(system) = self.get_mut(id) {
            system.discovered = true;
        }
    }

    pub fn systems(&self) -> &[StarSystem] {
        &self.systems
    }

    pub fn len(&self) -> usize {
        self.systems.len()
    }

    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// The shipped sector map. Meridian is home and starts discovered.
    pub fn standard() -> Self {
        Self::new(vec![
            StarSystem {
                id: SystemId(0),
                name: "Meridian".into(),
                sector: "Core Reach".into(),
                map_coords: Vec2::new(0.0, 0.0),
                star: StarDescriptor {
                    class: SpectralClass::G,
                    size: 60.0,
                    intensity: 1.0,
                },
                planets: vec![
                    PlanetDescriptor {
                        kind: PlanetKind::Rocky,
                        radius: 9.0,
                        orbital_radius: 320.0,
                        orbital_angle: 0.6,
                        rotation_speed: 0.02,
                        texture_key: "rocky_brown".into(),
                        rings: false,
                        atmosphere: None,
                    },
                    PlanetDescriptor {
                        kind: PlanetKind::Ocean,
                        radius: 14.0,
                        orbital_radius: 560.0,
                        orbital_angle: 2.4,
                        rotation_speed: 0.015,
                        texture_key: "ocean_blue".into(),
                        rings: false,
                        atmosphere: Some([0.45, 0.65, 0.95]),
                    },
                    PlanetDescriptor {
                        kind: PlanetKind::GasGiant,
                        radius: 38.0,
                        orbital_radius: 1150.0,
                        orbital_angle: 4.1,
                        rotation_speed: 0.03,
                        texture_key: "gas_amber".into(),
                        rings: true,
                        atmosphere: Some([0.85, 0.7, 0.5]),
                    },
                ],
                connections: vec![SystemId(1), SystemId(2)],
                discovered: true,
            },
            StarSystem {
                id: SystemId(1),
                name: "Cygnus Reach".into(),
                sector: "Core Reach".into(),
                map_coords: Vec2::new(1.8, 0.7),
                star: StarDescriptor {
                    class: SpectralClass::A,
                    size: 75.0,
                    intensity: 1.4,
                },
                planets: vec![
                    PlanetDescriptor {
                        kind: PlanetKind::Desert,
                        radius: 11.0,
                        orbital_radius: 420.0,
                        orbital_angle: 1.1,
                        rotation_speed: 0.025,
                        texture_key: "desert_tan".into(),
                        rings: false,
                        atmosphere: Some([0.9, 0.8, 0.6]),
                    },
                    PlanetDescriptor {
                        kind: PlanetKind::Ice,
                        radius: 8.0,
                        orbital_radius: 880.0,
                        orbital_angle: 5.3,
                        rotation_speed: 0.01,
                        texture_key: "ice_white".into(),
                        rings: true,
                        atmosphere: None,
                    },
                ],
                connections: vec![SystemId(0), SystemId(3)],
                discovered: false,
            },
            StarSystem {
                id: SystemId(2),
                name: "Korvan Drift".into(),
                sector: "Frontier Verge".into(),
                map_coords: Vec2::new(-1.2, 1.5),
                star: StarDescriptor {
                    class: SpectralClass::K,
                    size: 50.0,
                    intensity: 0.8,
                },
                planets: vec![PlanetDescriptor {
                    kind: PlanetKind::Lava,
                    radius: 10.0,
                    orbital_radius: 260.0,
                    orbital_angle: 3.3,
                    rotation_speed: 0.04,
                    texture_key: "lava_red".into(),
                    rings: false,
                    atmosphere: Some([0.9, 0.4, 0.2]),
                }],
                connections: vec![SystemId(0), SystemId(4)],
                discovered: false,
            },
            StarSystem {
                id: SystemId(3),
                name: "Tarsis".into(),
                sector: "Frontier Verge".into(),
                map_coords: Vec2::new(3.1, -0.4),
                star: StarDescriptor {
                    class: SpectralClass::M,
                    size: 40.0,
                    intensity: 0.6,
                },
                planets: vec![
                    PlanetDescriptor {
                        kind: PlanetKind::Rocky,
                        radius: 7.0,
                        orbital_radius: 180.0,
                        orbital_angle: 0.2,
                        rotation_speed: 0.02,
                        texture_key: "rocky_grey".into(),
                        rings: false,
                        atmosphere: None,
                    },
                    PlanetDescriptor {
                        kind: PlanetKind::Ice,
                        radius: 12.0,
                        orbital_radius: 640.0,
                        orbital_angle: 2.9,
                        rotation_speed: 0.012,
                        texture_key: "ice_blue".into(),
                        rings: false,
                        atmosphere: Some([0.7, 0.8, 0.95]),
                    },
                ],
                connections: vec![SystemId(1), SystemId(5)],
                discovered: false,
            },
            StarSystem {
                id: SystemId(4),
                name: "Veil Hollow".into(),
                sector: "Dark Margin".into(),
                map_coords: Vec2::new(-2.6, 2.8),
                star: StarDescriptor {
                    class: SpectralClass::B,
                    size: 85.0,
                    intensity: 1.7,
                },
                planets: vec![PlanetDescriptor {
                    kind: PlanetKind::GasGiant,
                    radius: 44.0,
                    orbital_radius: 980.0,
                    orbital_angle: 1.8,
                    rotation_speed: 0.035,
                    texture_key: "gas_violet".into(),
                    rings: true,
                    atmosphere: Some([0.6, 0.5, 0.9]),
                }],
                connections: vec![SystemId(2), SystemId(5)],
                discovered: false,
            },
            StarSystem {
                id: SystemId(5),
                name: "Halcyon Deep".into(),
                sector: "Dark Margin".into(),
                map_coords: Vec2::new(0.9, 3.4),
                star: StarDescriptor {
                    class: SpectralClass::F,
                    size: 65.0,
                    intensity: 1.2,
                },
                planets: vec![
                    PlanetDescriptor {
                        kind: PlanetKind::Ocean,
                        radius: 13.0,
                        orbital_radius: 500.0,
                        orbital_angle: 4.7,
                        rotation_speed: 0.018,
                        texture_key: "ocean_teal".into(),
                        rings: false,
                        atmosphere: Some([0.4, 0.8, 0.8]),
                    },
                    PlanetDescriptor {
                        kind: PlanetKind::Desert,
                        radius: 9.0,
                        orbital_radius: 760.0,
                        orbital_angle: 0.9,
                        rotation_speed: 0.022,
                        texture_key: "desert_red".into(),
                        rings: false,
                        atmosphere: None,
                    },
                ],
                connections: vec![SystemId(3), SystemId(4)],
                discovered: false,
            },
        ])
    }
}
