//! Emitter behavior - the water source.
//!
//! An anchored infinite spring. Every `SOURCE_PERIOD` ticks it stamps a
//! fresh water cell directly below itself, as long as the cell below is air
//! or water. While blocked by anything else it idles with the cooldown
//! spent, so it emits the moment the obstruction clears.

use crate::domain::material::{Material, MaterialKind, SOURCE_PERIOD};

use super::UpdateContext;

pub(super) fn update_source(ctx: &mut UpdateContext) -> bool {
    let (x, y) = (ctx.x, ctx.y);
    let mut st = match ctx.grid.get(x, y) {
        Some(Material::WaterSource(s)) => *s,
        _ => return false,
    };

    if st.cooldown > 0 {
        st.cooldown -= 1;
        if st.cooldown > 0 {
            ctx.grid.set(x, y, Material::WaterSource(st));
            return false;
        }
    }

    match ctx.grid.kind(x, y + 1) {
        Some(MaterialKind::Air) | Some(MaterialKind::Water) => {
            ctx.grid.set(x, y + 1, Material::Water);
            st.cooldown = SOURCE_PERIOD;
            ctx.grid.set(x, y, Material::WaterSource(st));
            true
        }
        _ => {
            ctx.grid.set(x, y, Material::WaterSource(st));
            false
        }
    }
}
