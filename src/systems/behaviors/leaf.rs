//! Leaf behaviors - canopy growth and the solar trigger.
//!
//! A wet leaf spends its water in priority order: conserve for a nearby
//! bloom, duplicate into an isolated air cell, pass the water to a dry
//! neighbor leaf, or lose it. Leaves never touch anything but air, other
//! leaves and their stem, which keeps the canopy a simple connected mass.
//!
//! Both leaf kinds occasionally fire a "solar" pulse: they walk the plant
//! graph down to a dry root that is ready to branch and make it grow
//! without consuming any water. This is how the root network keeps
//! expanding in search of moisture.

use crate::core::random::{chance, pick};
use crate::domain::material::{LeafState, Material, MaterialKind};

use super::{common, root, UpdateContext, BLOOM_RADIUS, TRANSFER_COOLDOWN};

/// Per-tick chance to attempt a solar pulse once the cooldown has elapsed.
const SOLAR_CHANCE: f32 = 0.005;
const SOLAR_COOLDOWN: u16 = 3600;
/// Ticks the energized flash stays visible.
const SOLAR_FLASH: u16 = 15;

pub(super) fn update_leaf_dry(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::LeafDry(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
    }
    if st.energy > 0 {
        st.energy -= 1;
    }
    if st.solar_cooldown > 0 {
        st.solar_cooldown -= 1;
    }

    if st.solar_cooldown == 0 && chance(ctx.rng, SOLAR_CHANCE) && trigger_solar(ctx, x, y) {
        st.energy = SOLAR_FLASH;
        st.solar_cooldown = SOLAR_COOLDOWN;
    }

    // Dry leaves otherwise just wait; watering is the stem's job.
    ctx.grid.set(x, y, Material::LeafDry(st));
    false
}

pub(super) fn update_leaf_wet(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::LeafWet(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
        ctx.grid.set(x, y, Material::LeafWet(st));
        return false;
    }
    if st.energy > 0 {
        st.energy -= 1;
    }
    if st.solar_cooldown > 0 {
        st.solar_cooldown -= 1;
    }

    if st.solar_cooldown == 0 && chance(ctx.rng, SOLAR_CHANCE) && trigger_solar(ctx, x, y) {
        st.energy = SOLAR_FLASH;
        st.solar_cooldown = SOLAR_COOLDOWN;
    }

    // A bloom is collecting nearby: dry out and leave the water to it.
    if common::kind_in_radius(ctx.grid, x, y, BLOOM_RADIUS, |k| k == MaterialKind::Bloom) {
        become_dry(ctx, x, y, st);
        return true;
    }

    // Duplicate into an air cell that keeps the canopy isolated.
    let mut spots: Vec<(i32, i32)> = Vec::with_capacity(4);
    for (dx, dy) in common::CARDINALS {
        let (tx, ty) = (x + dx, y + dy);
        if ctx.grid.is_air(tx, ty) && common::leaf_can_settle(ctx.grid, tx, ty, None) {
            spots.push((tx, ty));
        }
    }
    if !spots.is_empty() {
        let &(tx, ty) = pick(ctx.rng, &spots);
        become_dry(ctx, x, y, st);
        // The new leaf starts fresh, with no solar history.
        ctx.grid.set(
            tx,
            ty,
            Material::LeafDry(LeafState { cooldown: TRANSFER_COOLDOWN, ..Default::default() }),
        );
        return true;
    }

    // Hand the water to a neighboring dry leaf.
    let mut dry: Vec<(i32, i32)> = Vec::with_capacity(4);
    for (dx, dy) in common::CARDINALS {
        if ctx.grid.kind(x + dx, y + dy) == Some(MaterialKind::LeafDry) {
            dry.push((x + dx, y + dy));
        }
    }
    if !dry.is_empty() {
        let &(tx, ty) = pick(ctx.rng, &dry);
        let target_solar = match ctx.grid.get(tx, ty) {
            Some(Material::LeafDry(leaf)) => leaf.solar_cooldown,
            _ => 0,
        };
        become_dry(ctx, x, y, st);
        ctx.grid.set(
            tx,
            ty,
            Material::LeafWet(LeafState {
                cooldown: TRANSFER_COOLDOWN,
                energy: 0,
                solar_cooldown: target_solar,
            }),
        );
        return true;
    }

    // Nobody to give it to: the water is simply lost.
    become_dry(ctx, x, y, st);
    true
}

fn become_dry(ctx: &mut UpdateContext, x: i32, y: i32, st: LeafState) {
    ctx.grid.set(
        x,
        y,
        Material::LeafDry(LeafState {
            cooldown: TRANSFER_COOLDOWN,
            energy: 0,
            solar_cooldown: st.solar_cooldown,
        }),
    );
}

/// Solar pulse: find the stem this leaf hangs on, walk the plant graph down
/// to the first dry root that is off spawn cooldown and able to branch, and
/// force it to grow. Returns whether a root was actually grown.
fn trigger_solar(ctx: &mut UpdateContext, x: i32, y: i32) -> bool {
    let mut stem: Option<(i32, i32)> = None;
    for (dx, dy) in common::CARDINALS {
        if ctx.grid.kind(x + dx, y + dy).is_some_and(MaterialKind::is_stem) {
            stem = Some((x + dx, y + dy));
            break;
        }
    }
    let Some((sx, sy)) = stem else { return false };

    let found = common::search_plant_graph(ctx.grid, sx, sy, |grid, cx, cy| {
        matches!(
            grid.get(cx, cy),
            Some(Material::RootDry(rs)) if rs.spawn_cooldown == 0
        ) && root::can_spawn(grid, cx, cy)
    });

    let Some((rx, ry)) = found else { return false };
    root::force_spawn(ctx, rx, ry);
    true
}
