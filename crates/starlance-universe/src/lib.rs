//! Static universe data for Starlance.
//!
//! Declarative star-system records (star, planets, orbits, and the
//! undirected connection graph between systems) plus the environment
//! builder that turns one system into positioned world objects. Pure data:
//! the only runtime mutation is the per-system `discovered` flag.

pub mod galaxy;
pub mod layout;

pub use galaxy::{Galaxy, PlanetDescriptor, PlanetKind, SpectralClass, StarDescriptor, StarSystem};
pub use layout::{build_environment, Backdrop, BodyInstance, StarInstance, SystemEnvironment};
