//! Stem behaviors - the above-ground half of the moisture transport chain.
//!
//! A dry stem pulls the wet token up from below (and may sprout a lateral
//! leaf while doing so). A wet stem is the distribution hub: it opens a
//! bloom once the stalk is tall enough, feeds an adjacent bloom, routes
//! water upward when a bloom is near, waters a dry leaf, or spends the
//! token growing the stalk by one cell.

use crate::core::random::{chance, pick};
use crate::domain::material::{
    GrowDirection, LeafState, Material, MaterialKind, RootState, StemState,
};
use crate::spatial::grid::PixelGrid;

use super::{common, UpdateContext, BLOOM_RADIUS, TRANSFER_COOLDOWN};

/// Chance to sprout a lateral leaf while receiving a token.
const LEAF_SPAWN_CHANCE: f32 = 0.05;

/// Contiguous stem cells (downward, self included) before a bloom may open.
const BLOOM_MIN_STALK: i32 = 12;

/// A growth target may touch at most this many existing stem cells.
const STEM_CROWD_LIMIT: usize = 1;

// Growth weights by carried bias: a biased stem mostly keeps its heading,
// an unbiased one mostly climbs.
const WEIGHTS_UP: [f32; 3] = [0.6, 0.2, 0.2];
const WEIGHTS_LEFT: [f32; 3] = [0.2, 0.7, 0.1];
const WEIGHTS_RIGHT: [f32; 3] = [0.2, 0.1, 0.7];

pub(super) fn update_stem_dry(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::StemDry(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
        ctx.grid.set(x, y, Material::StemDry(st));
        return false;
    }

    // Pull the token up from a wet root or wet stem below.
    match ctx.grid.kind(x, y + 1) {
        Some(MaterialKind::RootWet) => {
            try_spawn_leaf(ctx, x, y);
            ctx.grid.set(
                x,
                y + 1,
                Material::RootDry(RootState { cooldown: TRANSFER_COOLDOWN, spawn_cooldown: 0 }),
            );
        }
        Some(MaterialKind::StemWet) => {
            try_spawn_leaf(ctx, x, y);
            ctx.grid.set(
                x,
                y + 1,
                Material::StemDry(StemState {
                    cooldown: TRANSFER_COOLDOWN,
                    preferred: GrowDirection::Up,
                }),
            );
        }
        _ => return false,
    }

    ctx.grid.set(
        x,
        y,
        Material::StemWet(StemState { cooldown: TRANSFER_COOLDOWN, preferred: st.preferred }),
    );
    true
}

/// Low-probability lateral leaf, only if no leaf is already attached and the
/// target air cell touches nothing but air, leaves and this stem.
fn try_spawn_leaf(ctx: &mut UpdateContext, x: i32, y: i32) {
    if common::count_neighbors(ctx.grid, x, y, MaterialKind::is_leaf) > 0 {
        return;
    }
    if !chance(ctx.rng, LEAF_SPAWN_CHANCE) {
        return;
    }
    let mut candidates: Vec<i32> = Vec::with_capacity(2);
    for tx in [x - 1, x + 1] {
        if ctx.grid.is_air(tx, y) && common::leaf_can_settle(ctx.grid, tx, y, Some((x, y))) {
            candidates.push(tx);
        }
    }
    if candidates.is_empty() {
        return;
    }
    let tx = *pick(ctx.rng, &candidates);
    ctx.grid.set(
        tx,
        y,
        Material::LeafDry(LeafState { cooldown: TRANSFER_COOLDOWN, ..Default::default() }),
    );
}

pub(super) fn update_stem_wet(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::StemWet(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
        ctx.grid.set(x, y, Material::StemWet(st));
        return false;
    }

    let bloom_near = common::kind_in_radius(ctx.grid, x, y, BLOOM_RADIUS, |k| {
        k == MaterialKind::Bloom
    });

    // 1. Ripe stalk with no bloom yet: open one beside the tip.
    if !bloom_near && stalk_height(ctx.grid, x, y) >= BLOOM_MIN_STALK {
        let mut candidates: Vec<i32> = Vec::with_capacity(2);
        for tx in [x - 1, x + 1] {
            if ctx.grid.is_air(tx, y) {
                candidates.push(tx);
            }
        }
        if !candidates.is_empty() {
            let tx = *pick(ctx.rng, &candidates);
            ctx.grid.set(tx, y, Material::Bloom(Default::default()));
            become_dry(ctx, x, y, st);
            return true;
        }
    }

    // 2. Feed an adjacent bloom: the token lands in its accumulator.
    for (dx, dy) in common::CARDINALS {
        if let Some(Material::Bloom(bloom)) = ctx.grid.get_mut(x + dx, y + dy) {
            bloom.water_counter += 1;
            become_dry(ctx, x, y, st);
            return true;
        }
    }

    // 3. Bloom in range but not adjacent: push the token straight up the
    //    stalk. No lateral leaf-feeding here, it would strand the water.
    if bloom_near {
        if let Some(&Material::StemDry(above)) = ctx.grid.get(x, y - 1) {
            ctx.grid.set(
                x,
                y - 1,
                Material::StemWet(StemState {
                    cooldown: TRANSFER_COOLDOWN,
                    preferred: above.preferred,
                }),
            );
            become_dry(ctx, x, y, st);
            return true;
        }
        // No stem above to route through: hold the token and retry.
        ctx.grid.set(x, y, Material::StemWet(st));
        return false;
    }

    // 4. Water an adjacent dry leaf.
    let mut leaves: Vec<(i32, i32)> = Vec::with_capacity(4);
    for (dx, dy) in common::CARDINALS {
        if ctx.grid.kind(x + dx, y + dy) == Some(MaterialKind::LeafDry) {
            leaves.push((x + dx, y + dy));
        }
    }
    if !leaves.is_empty() {
        let &(tx, ty) = pick(ctx.rng, &leaves);
        let target_solar = match ctx.grid.get(tx, ty) {
            Some(Material::LeafDry(leaf)) => leaf.solar_cooldown,
            _ => 0,
        };
        ctx.grid.set(
            tx,
            ty,
            Material::LeafWet(LeafState {
                cooldown: TRANSFER_COOLDOWN,
                energy: 0,
                solar_cooldown: target_solar,
            }),
        );
        become_dry(ctx, x, y, st);
        return true;
    }

    // 5. Spend the token on growth: weighted pick among open directions.
    if grow(ctx, x, y, st) {
        return true;
    }

    // 6. Nothing useful to do: the token is lost.
    become_dry(ctx, x, y, st);
    true
}

fn become_dry(ctx: &mut UpdateContext, x: i32, y: i32, st: StemState) {
    ctx.grid.set(
        x,
        y,
        Material::StemDry(StemState { cooldown: TRANSFER_COOLDOWN, preferred: st.preferred }),
    );
}

/// Count contiguous stem cells downward, starting at `(x, y)` itself.
fn stalk_height(grid: &PixelGrid, x: i32, y: i32) -> i32 {
    let mut height = 0;
    let mut yy = y;
    while grid.kind(x, yy).is_some_and(MaterialKind::is_stem) {
        height += 1;
        yy += 1;
    }
    height
}

/// Weighted growth among {up, left, right} air cells that are not already
/// crowded by stems. The new cell inherits the direction it grew toward, so
/// biased stems produce zig-zags and branches instead of straight poles.
fn grow(ctx: &mut UpdateContext, x: i32, y: i32, st: StemState) -> bool {
    let weights = match st.preferred {
        GrowDirection::Up => WEIGHTS_UP,
        GrowDirection::Left => WEIGHTS_LEFT,
        GrowDirection::Right => WEIGHTS_RIGHT,
    };
    let options = [
        ((x, y - 1), GrowDirection::Up, weights[0]),
        ((x - 1, y), GrowDirection::Left, weights[1]),
        ((x + 1, y), GrowDirection::Right, weights[2]),
    ];

    let candidates: Vec<(((i32, i32), GrowDirection), f32)> = options
        .into_iter()
        .filter(|&((tx, ty), _, _)| {
            ctx.grid.is_air(tx, ty)
                && common::count_neighbors(ctx.grid, tx, ty, MaterialKind::is_stem)
                    <= STEM_CROWD_LIMIT
        })
        .map(|(pos, dir, w)| ((pos, dir), w))
        .collect();

    if candidates.is_empty() {
        return false;
    }

    let &((tx, ty), dir) = common::weighted_pick(ctx.rng, &candidates);
    become_dry(ctx, x, y, st);
    ctx.grid.set(
        tx,
        ty,
        Material::StemDry(StemState { cooldown: TRANSFER_COOLDOWN, preferred: dir }),
    );
    true
}
