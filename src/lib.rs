//! Pixelgarden Engine - falling-sand garden simulation
//!
//! A 2-D cellular automaton where every cell owns exactly one material and
//! the world advances one synchronous tick at a time. Materials cover simple
//! physics (stone, water, earth) and a small plant ecology (seeds, roots,
//! stems, leaves, blooms, clouds).
//!
//! Architecture:
//! - core/       - RNG and error taxonomy
//! - domain/     - material catalog: kinds, state records, id registry
//! - spatial/    - dense grid storage
//! - systems/    - per-material transition functions
//! - simulation/ - orchestration and the public world API

pub mod core;
pub mod domain;
pub mod spatial;
pub mod systems;
pub mod simulation;

// Short-path re-exports (keeps internal and external paths compact)
pub use domain::material;
pub use domain::registry;
pub use spatial::grid;
pub use systems::behaviors;

pub use crate::core::error::EngineError;
pub use domain::material::{Color, Material, MaterialKind};
pub use domain::registry::MaterialRegistry;
pub use simulation::snapshot::{PixelRecord, WorldSnapshot};
pub use simulation::WorldCore;
pub use spatial::grid::PixelGrid;

#[cfg(target_arch = "wasm32")]
pub use simulation::facade::World;

/// Get engine version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
