//! Powder behaviors - stone and the earth family.
//!
//! Granular solids fall through air and water one row per visit. Earth is
//! cohesive: on the first tick it fails to fall it may slide sideways off a
//! pillar, and the wet variant spreads its moisture into neighboring dry
//! earth once per landing.

use crate::core::random::{chance, pick};
use crate::domain::material::{EarthDryState, EarthWetState, Material, MaterialKind};

use super::UpdateContext;

const SLIDE_CHANCE: f32 = 0.5;

// One-shot moisture spread on landing: below is favored over the diagonals.
const SPREAD_BELOW_CHANCE: f32 = 0.7;
const SPREAD_DIAGONAL_CHANCE: f32 = 0.25;

/// Wet earth slowly dries back out.
const DRYBACK_CHANCE: f32 = 0.0005;

pub(super) fn update_stone(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    match ctx.grid.kind(x, y + 1) {
        // Heavier than water, so it sinks through it.
        Some(MaterialKind::Air) | Some(MaterialKind::Water) => {
            ctx.grid.swap(x, y, x, y + 1);
            true
        }
        _ => false,
    }
}

pub(super) fn update_earth_dry(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::EarthDry(s)) => *s,
        _ => return false,
    };

    if sinks_below(ctx, x, y) {
        st.just_landed = false;
        ctx.grid.set(x, y, Material::EarthDry(st));
        ctx.grid.swap(x, y, x, y + 1);
        return true;
    }

    if !st.just_landed {
        st.just_landed = true;
        if let Some(tx) = roll_slide(ctx, x, y) {
            st.just_landed = false;
            ctx.grid.set(x, y, Material::EarthDry(st));
            ctx.grid.swap(x, y, tx, y);
            return true;
        }
        ctx.grid.set(x, y, Material::EarthDry(st));
    }
    false
}

pub(super) fn update_earth_wet(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::EarthWet(s)) => *s,
        _ => return false,
    };

    // Vaporization: the moisture is lost back to the air.
    if chance(ctx.rng, DRYBACK_CHANCE) {
        ctx.grid.set(x, y, Material::EarthDry(EarthDryState::default()));
        return true;
    }

    if sinks_below(ctx, x, y) {
        st.just_landed = false;
        ctx.grid.set(x, y, Material::EarthWet(st));
        ctx.grid.swap(x, y, x, y + 1);
        return true;
    }

    if !st.just_landed {
        st.just_landed = true;
        if let Some(tx) = roll_slide(ctx, x, y) {
            st.just_landed = false;
            ctx.grid.set(x, y, Material::EarthWet(st));
            ctx.grid.swap(x, y, tx, y);
            return true;
        }
    }

    if !st.has_spread {
        spread_moisture(ctx, x, y);
        st.has_spread = true;
    }
    ctx.grid.set(x, y, Material::EarthWet(st));
    false
}

/// Earth falls through air and through water (it is heavier).
fn sinks_below(ctx: &UpdateContext, x: i32, y: i32) -> bool {
    matches!(
        ctx.grid.kind(x, y + 1),
        Some(MaterialKind::Air) | Some(MaterialKind::Water)
    )
}

/// Pillar slide: a coin flip, then a lateral cell whose own floor is open.
/// Both the side cell and the cell below it must be air.
fn roll_slide(ctx: &mut UpdateContext, x: i32, y: i32) -> Option<i32> {
    if !chance(ctx.rng, SLIDE_CHANCE) {
        return None;
    }
    let mut candidates: Vec<i32> = Vec::with_capacity(2);
    for tx in [x - 1, x + 1] {
        if ctx.grid.is_air(tx, y) && ctx.grid.is_air(tx, y + 1) {
            candidates.push(tx);
        }
    }
    if candidates.is_empty() {
        None
    } else {
        Some(*pick(ctx.rng, &candidates))
    }
}

fn spread_moisture(ctx: &mut UpdateContext, x: i32, y: i32) {
    let below = y + 1;
    if below >= ctx.grid.height() as i32 {
        return;
    }
    let targets = [
        (x, SPREAD_BELOW_CHANCE),
        (x - 1, SPREAD_DIAGONAL_CHANCE),
        (x + 1, SPREAD_DIAGONAL_CHANCE),
    ];
    for (tx, p) in targets {
        if ctx.grid.kind(tx, below) == Some(MaterialKind::EarthDry) && chance(ctx.rng, p) {
            ctx.grid.set(tx, below, Material::EarthWet(EarthWetState::default()));
        }
    }
}
