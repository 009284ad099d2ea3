//! Seed behavior.
//!
//! Seeds fall through air and water and germinate the moment they rest on
//! wet earth: the seed becomes a dry stem and the earth below becomes the
//! first root. Flower-born seeds carry a lateral drift so a dying flower
//! scatters its offspring instead of dropping them straight down.

use crate::core::random::{chance, pick};
use crate::domain::material::{Material, MaterialKind, RootState, StemState};

use super::UpdateContext;

/// Chance per tick that a drifting seed tries the diagonal before falling.
const DRIFT_STEP_CHANCE: f32 = 0.3;

pub(super) fn update_seed(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::Seed(s)) => *s,
        _ => return false,
    };

    if st.diagonal && chance(ctx.rng, DRIFT_STEP_CHANCE) {
        let tx = x + st.bias as i32;
        match ctx.grid.kind(tx, y + 1) {
            Some(MaterialKind::Air) | Some(MaterialKind::Water) => {
                ctx.grid.set(x, y, Material::Seed(st));
                ctx.grid.swap(x, y, tx, y + 1);
                return true;
            }
            // Obstruction (or the world edge): drift the other way next time.
            _ => st.bias = -st.bias,
        }
    }

    match ctx.grid.kind(x, y + 1) {
        Some(MaterialKind::Air) | Some(MaterialKind::Water) => {
            ctx.grid.set(x, y, Material::Seed(st));
            ctx.grid.swap(x, y, x, y + 1);
            return true;
        }
        Some(MaterialKind::EarthWet) => {
            // Germination: stem above, root below.
            ctx.grid.set(x, y, Material::StemDry(StemState::default()));
            ctx.grid.set(x, y + 1, Material::RootDry(RootState::default()));
            return true;
        }
        Some(k) if k.is_leaf() => {
            // Perched on the canopy: slip off onto an open diagonal.
            let mut candidates: Vec<i32> = Vec::with_capacity(2);
            for tx in [x - 1, x + 1] {
                if ctx.grid.is_air(tx, y + 1) {
                    candidates.push(tx);
                }
            }
            if !candidates.is_empty() {
                let tx = *pick(ctx.rng, &candidates);
                ctx.grid.set(x, y, Material::Seed(st));
                ctx.grid.swap(x, y, tx, y + 1);
                return true;
            }
        }
        _ => {}
    }

    ctx.grid.set(x, y, Material::Seed(st));
    false
}
