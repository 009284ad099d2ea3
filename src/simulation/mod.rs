//! World - the simulation core.
//!
//! `WorldCore` owns the grid, the RNG state and the tick counter, and only
//! orchestrates: behaviors live in `systems/`, storage in `spatial/`, the
//! codec in `snapshot`. One call to `step` is one full synchronous pass
//! over the grid; external callers may mutate cells freely between ticks.

use crate::core::error::EngineError;
use crate::core::random::sanitize_seed;
use crate::domain::material::{Color, Material, MaterialKind};
use crate::domain::registry::MaterialRegistry;
use crate::spatial::grid::PixelGrid;

#[path = "step/step.rs"]
mod step;
#[path = "commands/commands.rs"]
mod commands;
pub mod snapshot;
#[cfg(target_arch = "wasm32")]
pub mod facade;

pub use snapshot::{PixelRecord, WorldSnapshot};

const DEFAULT_SEED: u32 = 12345;

/// The simulation world.
pub struct WorldCore {
    grid: PixelGrid,
    registry: MaterialRegistry,
    tick: u64,
    rng_state: u32,
}

impl WorldCore {
    /// Create a new world with given dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_seed(width, height, DEFAULT_SEED)
    }

    /// Create a world with an explicit RNG seed; the same seed reproduces
    /// the same run tick for tick.
    pub fn with_seed(width: u32, height: u32, seed: u32) -> Self {
        Self {
            grid: PixelGrid::new(width, height),
            registry: MaterialRegistry::new(),
            tick: 0,
            rng_state: sanitize_seed(seed),
        }
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Reseed the RNG mid-run.
    pub fn seed_rng(&mut self, seed: u32) {
        self.rng_state = sanitize_seed(seed);
    }

    pub fn registry(&self) -> &MaterialRegistry {
        &self.registry
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    // === Cell surface (consumed by UI and renderer collaborators) ===

    pub fn get(&self, x: i32, y: i32) -> Option<&Material> {
        self.grid.get(x, y)
    }

    pub fn kind(&self, x: i32, y: i32) -> Option<MaterialKind> {
        self.grid.kind(x, y)
    }

    pub fn set(&mut self, x: i32, y: i32, material: Material) {
        self.grid.set(x, y, material);
    }

    pub fn swap(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        self.grid.swap(x1, y1, x2, y2);
    }

    /// Display color at `(x, y)`; out-of-range reads render as air.
    pub fn color_at(&self, x: i32, y: i32) -> Color {
        match self.grid.get(x, y) {
            Some(material) => material.color(x, y),
            None => crate::domain::material::AIR_COLOR,
        }
    }

    // === Commands (paint tool surface) ===

    /// Place a fresh material by catalog id.
    pub fn paint(&mut self, x: i32, y: i32, id: &str) -> Result<(), EngineError> {
        commands::paint(self, x, y, id)
    }

    /// Fill a disc with a material by catalog id (brush).
    pub fn paint_radius(&mut self, cx: i32, cy: i32, radius: i32, id: &str) -> Result<(), EngineError> {
        commands::paint_radius(self, cx, cy, radius, id)
    }

    /// Reset a disc back to air.
    pub fn erase_radius(&mut self, cx: i32, cy: i32, radius: i32) {
        commands::erase_radius(self, cx, cy, radius)
    }

    /// Reset every cell to air and restart the clock.
    pub fn clear(&mut self) {
        commands::clear(self)
    }

    // === Simulation ===

    /// Run exactly one tick.
    pub fn step(&mut self) {
        step::step(self);
    }

    // === Codec ===

    /// Sparse snapshot of every non-air cell.
    pub fn snapshot(&self) -> WorldSnapshot {
        snapshot::capture(self)
    }

    /// Restore from a snapshot. Version and dimension mismatches fail
    /// before any cell is touched.
    pub fn restore(&mut self, snap: &WorldSnapshot) -> Result<(), EngineError> {
        snapshot::restore(self, snap)
    }

    /// Snapshot serialized to the versioned JSON wire format.
    pub fn save_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    /// Load from the versioned JSON wire format.
    pub fn load_json(&mut self, json: &str) -> Result<(), EngineError> {
        let snap: WorldSnapshot = serde_json::from_str(json)?;
        self.restore(&snap)
    }
}

// Private accessors for the submodules.
impl WorldCore {
    pub(crate) fn parts_mut(&mut self) -> (&mut PixelGrid, &mut u32) {
        (&mut self.grid, &mut self.rng_state)
    }

    pub(crate) fn grid_mut(&mut self) -> &mut PixelGrid {
        &mut self.grid
    }

    pub(crate) fn advance_tick(&mut self) {
        self.tick += 1;
    }

    pub(crate) fn reset_tick(&mut self) {
        self.tick = 0;
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
