//! Liquid behavior - water.
//!
//! Order of the cascade matters: evaporation, sliding off plant tops,
//! absorption into dry earth, gravity, then horizontal spreading when
//! pooled on more water.

use crate::core::random::{chance, pick};
use crate::domain::material::{EarthWetState, Material, MaterialKind};

use super::UpdateContext;

/// Per-tick evaporation chance.
const EVAPORATION_CHANCE: f32 = 0.000_33;

// Absorption into adjacent dry earth: below is favored, then the sides,
// then above.
const ABSORB_TARGETS: [(i32, i32, f32); 4] = [
    (0, 1, 0.8),
    (-1, 0, 0.5),
    (1, 0, 0.5),
    (0, -1, 0.2),
];

pub(super) fn update_water(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);

    if chance(ctx.rng, EVAPORATION_CHANCE) {
        ctx.grid.set(x, y, Material::Air);
        return true;
    }

    // Resting on a plant column: slide off sideways instead of drowning it.
    if rests_on_plant(ctx, x, y) {
        let mut candidates: Vec<i32> = Vec::with_capacity(2);
        for tx in [x - 1, x + 1] {
            if ctx.grid.is_air(tx, y) {
                candidates.push(tx);
            }
        }
        if !candidates.is_empty() {
            let tx = *pick(ctx.rng, &candidates);
            ctx.grid.swap(x, y, tx, y);
            return true;
        }
    }

    // Soak into neighboring dry earth.
    for (dx, dy, p) in ABSORB_TARGETS {
        if ctx.grid.kind(x + dx, y + dy) == Some(MaterialKind::EarthDry) && chance(ctx.rng, p) {
            ctx.grid.set(x, y, Material::Air);
            ctx.grid.set(x + dx, y + dy, Material::EarthWet(EarthWetState::default()));
            return true;
        }
    }

    // Gravity: fall into air or displace anything strictly lighter.
    if let Some(below) = ctx.grid.get(x, y + 1) {
        let water_density = MaterialKind::Water.props().density;
        if below.kind() == MaterialKind::Air || below.density() < water_density {
            ctx.grid.swap(x, y, x, y + 1);
            return true;
        }
    }

    // Pooled on more water: flow toward the nearest opening in the row below.
    if ctx.grid.kind(x, y + 1) == Some(MaterialKind::Water) {
        return spread(ctx, x, y);
    }

    false
}

fn rests_on_plant(ctx: &UpdateContext, x: i32, y: i32) -> bool {
    match ctx.grid.kind(x, y + 1) {
        Some(k) => k.is_root() || k.is_stem() || k == MaterialKind::Seed,
        None => false,
    }
}

/// Symmetric expanding search along the row below for the nearest air cell
/// reachable through water. Any other material walls that side off.
fn spread(ctx: &mut UpdateContext, x: i32, y: i32) -> bool {
    let below = y + 1;
    let mut stop_left = false;
    let mut stop_right = false;
    let mut target: Option<i32> = None;

    for dx in 1..ctx.grid.width() as i32 {
        if !stop_left {
            match ctx.grid.kind(x - dx, below) {
                Some(MaterialKind::Air) => {
                    target = Some(x - dx);
                    break;
                }
                Some(MaterialKind::Water) => {}
                _ => stop_left = true,
            }
        }
        if !stop_right {
            match ctx.grid.kind(x + dx, below) {
                Some(MaterialKind::Air) => {
                    target = Some(x + dx);
                    break;
                }
                Some(MaterialKind::Water) => {}
                _ => stop_right = true,
            }
        }
        if stop_left && stop_right {
            break;
        }
    }

    if let Some(tx) = target {
        ctx.grid.swap(x, y, tx, below);
        return true;
    }
    false
}
