//! Behaviors - material transition functions.
//!
//! One module per material family. Dispatch is a closed `match` over the
//! kind tag, so adding a kind without wiring its behavior is a compile
//! error. Each `update_*` returns whether the cell changed; the scheduler
//! records nothing from it, the flag exists for bookkeeping and tests.
//!
//! Update bodies are ordered cascades of independent probabilistic checks:
//! the first guard that fires performs its mutation and short-circuits the
//! rest. No transition may fail or panic - neighbor probes go through the
//! bounds-checked grid accessors and treat out-of-range as "no neighbor".

mod common;
mod powder;
mod liquid;
mod emitter;
mod seed;
mod root;
mod stem;
mod leaf;
mod bloom;
mod cloud;

pub use common::{
    count_neighbors, kind_in_radius, leaf_can_settle, search_plant_graph, weighted_pick, CARDINALS,
};

use crate::domain::material::MaterialKind;
use crate::spatial::grid::PixelGrid;

/// Context handed to every transition call.
pub struct UpdateContext<'a> {
    pub grid: &'a mut PixelGrid,
    pub x: i32,
    pub y: i32,
    pub rng: &'a mut u32,
}

/// Run the transition function for the cell at the context's coordinates.
pub fn update_cell(ctx: &mut UpdateContext) -> bool {
    let Some(kind) = ctx.grid.kind(ctx.x, ctx.y) else {
        return false;
    };
    match kind {
        // Inert: no transition ever fires.
        MaterialKind::Air | MaterialKind::Badrock => false,
        MaterialKind::Stone => powder::update_stone(ctx),
        MaterialKind::EarthDry => powder::update_earth_dry(ctx),
        MaterialKind::EarthWet => powder::update_earth_wet(ctx),
        MaterialKind::Water => liquid::update_water(ctx),
        MaterialKind::WaterSource => emitter::update_source(ctx),
        MaterialKind::Seed => seed::update_seed(ctx),
        MaterialKind::RootDry => root::update_root_dry(ctx),
        MaterialKind::RootWet => root::update_root_wet(ctx),
        MaterialKind::StemDry => stem::update_stem_dry(ctx),
        MaterialKind::StemWet => stem::update_stem_wet(ctx),
        MaterialKind::LeafDry => leaf::update_leaf_dry(ctx),
        MaterialKind::LeafWet => leaf::update_leaf_wet(ctx),
        MaterialKind::Bloom => bloom::update_bloom(ctx),
        MaterialKind::Flower => bloom::update_flower(ctx),
        MaterialKind::Cloud => cloud::update_cloud(ctx),
    }
}

// Cooldowns shared across the plant family: a cell that just passed or
// received a wet token waits this long before acting again.
pub const TRANSFER_COOLDOWN: u16 = 15;

/// How far blooms are felt: stems route water toward them and leaves stop
/// expanding inside this (square) radius.
pub const BLOOM_RADIUS: i32 = 5;
