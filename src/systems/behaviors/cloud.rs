//! Ephemeral behavior - clouds.
//!
//! Clouds float, let falling water pass through them, occasionally rain,
//! and reproduce on a cooldown with a duplication chance that decays with
//! every generation until the lineage dissolves back into air.

use crate::core::random::{chance, next_f32};
use crate::domain::material::{CloudState, Material, MaterialKind};

use super::{common, UpdateContext};

/// Per-tick chance to drop a rain droplet below.
const RAIN_CHANCE: f32 = 0.03;

/// Ticks between duplication attempts.
const DUPLICATION_PERIOD: u16 = 20;

/// Percentage points lost from the duplication chance per attempt.
const CHANCE_DECAY: f32 = 3.0;

// Clouds spread sideways much more readily than vertically.
const SPREAD_DIRS: [((i32, i32), f32); 4] = [
    ((-1, 0), 0.35),
    ((1, 0), 0.35),
    ((0, -1), 0.15),
    ((0, 1), 0.15),
];

pub(super) fn update_cloud(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::Cloud(s)) => *s,
        _ => return false,
    };

    // Water above falls straight through the cloud.
    if ctx.grid.kind(x, y - 1) == Some(MaterialKind::Water) {
        ctx.grid.set(x, y, Material::Cloud(st));
        ctx.grid.swap(x, y, x, y - 1);
        return true;
    }

    // Rain. Deliberately no early return and no `changed` from this branch:
    // the duplication clock still runs in the same tick.
    if chance(ctx.rng, RAIN_CHANCE) && ctx.grid.is_air(x, y + 1) {
        ctx.grid.set(x, y + 1, Material::Water);
    }

    if st.cooldown > 0 {
        st.cooldown -= 1;
        ctx.grid.set(x, y, Material::Cloud(st));
        return false;
    }
    st.cooldown = DUPLICATION_PERIOD;

    let roll = next_f32(ctx.rng) * 100.0;
    if roll < st.duplication_chance {
        let &(dx, dy) = common::weighted_pick(ctx.rng, &SPREAD_DIRS);
        let (tx, ty) = (x + dx, y + dy);
        if ctx.grid.is_air(tx, ty) {
            // The whole lineage shares the decayed chance.
            st.duplication_chance -= CHANCE_DECAY;
            ctx.grid.set(
                tx,
                ty,
                Material::Cloud(CloudState {
                    duplication_chance: st.duplication_chance,
                    cooldown: 0,
                }),
            );
            ctx.grid.set(x, y, Material::Cloud(st));
            return true;
        }
    }

    // Failed roll, blocked target or exhausted chance: the cloud dissolves.
    ctx.grid.set(x, y, Material::Air);
    true
}
