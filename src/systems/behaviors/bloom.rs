//! Reproductive behaviors - bloom and flower.
//!
//! A bloom sits beside a stem collecting water fed by wet stems. At the
//! threshold it stamps a hand-drawn petal outline into the surrounding air
//! and leaves, mirrored away from its stem, and becomes a flower itself.
//! Flowers age on a fixed countdown: the color turns at the midpoint and at
//! zero each petal either scatters a drifting seed or vanishes.

use crate::core::random::{chance, pick_index};
use crate::domain::material::{
    FlowerState, Material, MaterialKind, SeedState, FLOWER_MIDPOINT,
};

use super::UpdateContext;

/// Water feedings required before the bloom opens.
const BLOOM_THRESHOLD: u16 = 12;

/// Chance for an expired petal to leave a seed behind.
const SEED_DROP_CHANCE: f32 = 0.1;

// Petal outline relative to the bloom, columns pointing away from the stem.
const PETAL_OFFSETS: [(i32, i32); 17] = [
    (1, 0),
    (1, -1),
    (1, 1),
    (2, -2),
    (2, -1),
    (2, 1),
    (2, 2),
    (3, -2),
    (3, -1),
    (3, 1),
    (3, 2),
    (4, -2),
    (4, -1),
    (4, 1),
    (4, 2),
    (5, -1),
    (5, 1),
];

pub(super) fn update_bloom(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let st = match ctx.grid.get(x, y) {
        Some(Material::Bloom(s)) => *s,
        _ => return false,
    };

    if st.water_counter >= BLOOM_THRESHOLD {
        open_flower(ctx, x, y);
        return true;
    }
    false
}

fn open_flower(ctx: &mut UpdateContext, x: i32, y: i32) {
    // Petals unfold away from the stem; with no stem adjacent the side is
    // a coin flip.
    let stem_left = ctx.grid.kind(x - 1, y).is_some_and(MaterialKind::is_stem);
    let stem_right = ctx.grid.kind(x + 1, y).is_some_and(MaterialKind::is_stem);
    let direction = if stem_left {
        1
    } else if stem_right {
        -1
    } else if pick_index(ctx.rng, 2) == 0 {
        -1
    } else {
        1
    };

    let petal = |center: (i32, i32)| {
        Material::Flower(FlowerState { center: Some(center), ..Default::default() })
    };

    for (dx, dy) in PETAL_OFFSETS {
        let (tx, ty) = (x + dx * direction, y + dy);
        match ctx.grid.kind(tx, ty) {
            Some(MaterialKind::Air) => ctx.grid.set(tx, ty, petal((x, y))),
            Some(k) if k.is_leaf() => ctx.grid.set(tx, ty, petal((x, y))),
            _ => {}
        }
    }
    ctx.grid.set(x, y, petal((x, y)));
}

pub(super) fn update_flower(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::Flower(s)) => *s,
        _ => return false,
    };

    st.timer -= 1;

    if st.timer <= 0 {
        if chance(ctx.rng, SEED_DROP_CHANCE) {
            let bias = if pick_index(ctx.rng, 2) == 0 { -1 } else { 1 };
            ctx.grid.set(x, y, Material::Seed(SeedState { diagonal: true, bias }));
        } else {
            ctx.grid.set(x, y, Material::Air);
        }
        return true;
    }

    ctx.grid.set(x, y, Material::Flower(st));
    // The midpoint tick is when the render color turns.
    st.timer == FLOWER_MIDPOINT
}
