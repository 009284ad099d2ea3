//! Root behaviors - the underground half of the moisture transport chain.
//!
//! A dry root drinks from adjacent wet earth or standing water, turning
//! itself wet; a wet root hands the token one hop up the plant (straight up
//! first, else a random side) and turns back dry. Each successful drink may
//! also grow the root network one cell, subject to the fan-out cap that
//! keeps the network from matting solid.

use crate::core::random::{pick, pick_index};
use crate::domain::material::{EarthDryState, Material, MaterialKind, RootState, StemState};
use crate::spatial::grid::PixelGrid;

use super::{common, UpdateContext, CARDINALS, TRANSFER_COOLDOWN};

/// Ticks a root waits between spawning new root cells.
const SPAWN_COOLDOWN: u16 = 30;

/// A root may branch only while it has fewer than this many root neighbors.
const FANOUT_LIMIT: usize = 3;

pub(super) fn update_root_dry(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::RootDry(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
        // The spawn clock keeps running while absorption is gated.
        if st.spawn_cooldown > 0 {
            st.spawn_cooldown -= 1;
        }
        ctx.grid.set(x, y, Material::RootDry(st));
        return false;
    }
    if st.spawn_cooldown > 0 {
        st.spawn_cooldown -= 1;
    }

    for (dx, dy) in CARDINALS {
        let (nx, ny) = (x + dx, y + dy);
        match ctx.grid.kind(nx, ny) {
            // Drink from wet earth: the earth dries out.
            Some(MaterialKind::EarthWet) => {
                absorb(ctx, x, y, nx, ny, Material::EarthDry(EarthDryState::default()), &mut st);
                return true;
            }
            // Drink standing water outright.
            Some(MaterialKind::Water) => {
                absorb(ctx, x, y, nx, ny, Material::Air, &mut st);
                return true;
            }
            _ => {}
        }
    }

    ctx.grid.set(x, y, Material::RootDry(st));
    false
}

fn absorb(
    ctx: &mut UpdateContext,
    x: i32,
    y: i32,
    nx: i32,
    ny: i32,
    residue: Material,
    st: &mut RootState,
) {
    ctx.grid.set(nx, ny, residue);
    if st.spawn_cooldown == 0 {
        try_spawn(ctx, x, y, st);
    }
    ctx.grid.set(
        x,
        y,
        Material::RootWet(RootState {
            cooldown: TRANSFER_COOLDOWN,
            spawn_cooldown: st.spawn_cooldown,
        }),
    );
}

pub(super) fn update_root_wet(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::RootWet(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
        if st.spawn_cooldown > 0 {
            st.spawn_cooldown -= 1;
        }
        ctx.grid.set(x, y, Material::RootWet(st));
        return false;
    }
    if st.spawn_cooldown > 0 {
        st.spawn_cooldown -= 1;
    }

    // Straight up has priority; the token wants to reach the stem.
    if let Some(kind) = ctx.grid.kind(x, y - 1) {
        if kind == MaterialKind::RootDry || kind == MaterialKind::StemDry {
            forward_token(ctx, x, y, x, y - 1, kind, st.spawn_cooldown);
            return true;
        }
    }

    // Else a random dry root/stem to the side.
    let mut candidates: Vec<(i32, MaterialKind)> = Vec::with_capacity(2);
    for tx in [x - 1, x + 1] {
        if let Some(kind) = ctx.grid.kind(tx, y) {
            if kind == MaterialKind::RootDry || kind == MaterialKind::StemDry {
                candidates.push((tx, kind));
            }
        }
    }
    if !candidates.is_empty() {
        let (tx, kind) = candidates[pick_index(ctx.rng, candidates.len())];
        forward_token(ctx, x, y, tx, y, kind, st.spawn_cooldown);
        return true;
    }

    // Nowhere to push: hold the token and retry next tick.
    ctx.grid.set(x, y, Material::RootWet(st));
    false
}

/// Move the wet token one hop: this cell dries out, the target wets up.
fn forward_token(
    ctx: &mut UpdateContext,
    x: i32,
    y: i32,
    tx: i32,
    ty: i32,
    target_kind: MaterialKind,
    spawn_cooldown: u16,
) {
    ctx.grid.set(
        x,
        y,
        Material::RootDry(RootState { cooldown: TRANSFER_COOLDOWN, spawn_cooldown }),
    );
    let wet = match target_kind {
        MaterialKind::RootDry => Material::RootWet(RootState {
            cooldown: TRANSFER_COOLDOWN,
            spawn_cooldown: 0,
        }),
        _ => Material::StemWet(StemState {
            cooldown: TRANSFER_COOLDOWN,
            preferred: Default::default(),
        }),
    };
    ctx.grid.set(tx, ty, wet);
}

/// True if the root at `(x, y)` could branch right now: below the fan-out
/// limit with at least one eligible earth neighbor.
pub(crate) fn can_spawn(grid: &PixelGrid, x: i32, y: i32) -> bool {
    if common::count_neighbors(grid, x, y, MaterialKind::is_root) >= FANOUT_LIMIT {
        return false;
    }
    spawn_candidates(grid, x, y).next().is_some()
}

/// Eligible branch targets: earth cells beside or below (never above) that
/// would end up with at most one root neighbor.
fn spawn_candidates(grid: &PixelGrid, x: i32, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
    [(0, 1), (-1, 0), (1, 0)]
        .into_iter()
        .map(move |(dx, dy)| (x + dx, y + dy))
        .filter(|&(nx, ny)| {
            grid.kind(nx, ny).is_some_and(MaterialKind::is_earth)
                && common::count_neighbors(grid, nx, ny, MaterialKind::is_root) <= 1
        })
}

/// Branch once if allowed, stamping a fresh dry root into a random eligible
/// earth cell and rearming both spawn clocks.
fn try_spawn(ctx: &mut UpdateContext, x: i32, y: i32, st: &mut RootState) {
    if common::count_neighbors(ctx.grid, x, y, MaterialKind::is_root) >= FANOUT_LIMIT {
        return;
    }
    let candidates: Vec<(i32, i32)> = spawn_candidates(ctx.grid, x, y).collect();
    if candidates.is_empty() {
        return;
    }
    let &(tx, ty) = pick(ctx.rng, &candidates);
    ctx.grid.set(
        tx,
        ty,
        Material::RootDry(RootState { cooldown: 0, spawn_cooldown: SPAWN_COOLDOWN }),
    );
    st.spawn_cooldown = SPAWN_COOLDOWN;
}

/// Solar-driven growth: an energized leaf found this root through the plant
/// graph and asks it to branch without receiving any water.
pub(super) fn force_spawn(ctx: &mut UpdateContext, x: i32, y: i32) {
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::RootDry(s)) => *s,
        _ => return,
    };
    if st.spawn_cooldown > 0 {
        return;
    }
    try_spawn(ctx, x, y, &mut st);
    ctx.grid.set(x, y, Material::RootDry(st));
}
